use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::alert;
use crate::controller::{PostForm, Submission, prepend_post, replace_post};
use crate::state::AppState;

const KINDS: [(&str, &str); 2] = [("request", "Request"), ("offer", "Offer")];
const CATEGORIES: [(&str, &str); 4] = [
    ("coding", "Coding"),
    ("math", "Math"),
    ("science", "Science"),
    ("other", "Other"),
];

#[component]
pub(crate) fn PostModal(state: AppState) -> impl IntoView {
    let field = move |read: fn(&PostForm) -> String| {
        move || state.editor.with(|editor| read(editor.form()))
    };
    let set_field = move |write: fn(&mut PostForm, String), value: String| {
        state.editor.update(|editor| write(editor.form_mut(), value));
    };

    let heading = move || {
        if state.editor.with(|editor| editor.editing().is_some()) {
            "Edit post"
        } else {
            "New post"
        }
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let submission = match state.editor.with(|editor| editor.submission()) {
            Ok(submission) => submission,
            Err(err) => {
                alert(&err.to_string());
                return;
            }
        };

        state.loading.set(true);
        spawn_local(async move {
            let result = match submission {
                Submission::Create(payload) => api::create_post(&payload)
                    .await
                    .map(|created| state.posts.update(|posts| prepend_post(posts, created))),
                Submission::Update(id, payload) => api::update_post(id, &payload)
                    .await
                    .map(|updated| {
                        state.posts.update(|posts| {
                            replace_post(posts, updated);
                        })
                    }),
            };

            match result {
                Ok(()) => {
                    state.editor.update(|editor| editor.close());
                    state.clear_error();
                }
                Err(err) => alert(&err.to_string()),
            }
            state.loading.set(false);
        });
    };

    let on_close = move |_| state.editor.update(|editor| editor.close());

    view! {
        <Show when=move || state.editor.with(|editor| editor.is_open())>
            <div class="modal-backdrop">
                <form class="modal" on:submit=on_submit>
                    <h2>{heading}</h2>
                    <input
                        placeholder="Title"
                        maxlength="100"
                        prop:value=field(|form| form.title.clone())
                        on:input=move |ev| {
                            set_field(|form, value| form.title = value, event_target_value(&ev))
                        }
                    />
                    <select
                        prop:value=field(|form| form.kind.clone())
                        on:change=move |ev| {
                            set_field(|form, value| form.kind = value, event_target_value(&ev))
                        }
                    >
                        {KINDS
                            .iter()
                            .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                            .collect_view()}
                    </select>
                    <select
                        prop:value=field(|form| form.category.clone())
                        on:change=move |ev| {
                            set_field(|form, value| form.category = value, event_target_value(&ev))
                        }
                    >
                        <option value="" disabled=true>"Select category"</option>
                        {CATEGORIES
                            .iter()
                            .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                            .collect_view()}
                    </select>
                    <textarea
                        placeholder="Description"
                        prop:value=field(|form| form.description.clone())
                        on:input=move |ev| {
                            set_field(|form, value| form.description = value, event_target_value(&ev))
                        }
                    ></textarea>
                    <div class="modal__buttons">
                        <button type="button" on:click=on_close>"Cancel"</button>
                        <button type="submit" disabled=move || state.loading.get()>"Save"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
