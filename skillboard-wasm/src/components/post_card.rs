use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::alert;
use crate::controller::remove_post;
use crate::models::Post;
use crate::palette::{card_label, fallback_color};
use crate::state::AppState;

fn confirm_delete() -> bool {
    window()
        .confirm_with_message("Delete this post?")
        .unwrap_or(false)
}

#[component]
pub(crate) fn PostCard(post: Post, state: AppState) -> impl IntoView {
    let post_id = post.id;
    let background = post
        .color
        .clone()
        .unwrap_or_else(|| fallback_color(js_sys::Math::random));
    let label = card_label(&post.kind, &post.category);

    let on_edit = {
        let post = post.clone();
        move |_| {
            state.menus.update(|menus| menus.close_all());
            state.editor.update(|editor| editor.start_edit(&post));
        }
    };

    let on_delete = move |_| {
        state.menus.update(|menus| menus.close_all());
        if !confirm_delete() {
            return;
        }

        state.loading.set(true);
        spawn_local(async move {
            match api::delete_post(post_id).await {
                Ok(()) => {
                    state.posts.update(|posts| {
                        remove_post(posts, post_id);
                    });
                    state.clear_error();
                }
                Err(err) => alert(&err.to_string()),
            }
            state.loading.set(false);
        });
    };

    view! {
        <li class="post-card" style=format!("background-color: {background};")>
            <div class="post-card__header">
                <h3>{post.title}</h3>
                <div class="post-card__actions" on:click=|ev| ev.stop_propagation()>
                    <button
                        class="post-card__menu-toggle"
                        aria-label="Post actions"
                        on:click=move |_| state.menus.update(|menus| menus.toggle(post_id))
                    >
                        "⋯"
                    </button>
                    <Show when=move || state.menus.with(|menus| menus.is_open(post_id))>
                        <div class="post-card__menu">
                            <button on:click=on_edit.clone() disabled=move || state.loading.get()>
                                "Edit"
                            </button>
                            <button on:click=on_delete disabled=move || state.loading.get()>
                                "Delete"
                            </button>
                        </div>
                    </Show>
                </div>
            </div>
            <small class="post-card__label">{label}</small>
            <p>{post.description}</p>
        </li>
    }
}
