use leptos::ev;
use leptos::prelude::*;

use crate::components::post_card::PostCard;
use crate::components::post_modal::PostModal;
use crate::components::search_box::SearchBox;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    state.refresh_posts();

    // клик, дошедший до window, был вне всех меню и поля поиска
    let listener = window_event_listener(ev::click, move |_| {
        state.menus.update(|menus| menus.close_all());
        state.show_suggestions.set(false);
    });
    on_cleanup(move || listener.remove());

    let error_text = move || state.error.get().unwrap_or_default();

    view! {
        <main class="page">
            <section class="container">
                <header class="toolbar">
                    <h1>"Skill Exchange Board"</h1>
                    <SearchBox state=state />
                    <button on:click=move |_| state.editor.update(|editor| editor.open_create())>
                        "New post"
                    </button>
                </header>

                <Show when=move || state.error.with(Option::is_some)>
                    <div class="error-banner">
                        <strong>"Error: "</strong>
                        {error_text}
                    </div>
                </Show>

                <ul class="posts">
                    <For
                        each=move || state.posts.get()
                        key=|post| post.clone()
                        children=move |post| view! { <PostCard post=post state=state /> }
                    />
                </ul>

                <PostModal state=state />
            </section>
        </main>
    }
}
