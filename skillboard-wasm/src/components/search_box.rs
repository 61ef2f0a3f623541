use leptos::prelude::*;

use crate::controller::{SuggestionEntry, group_suggestions};
use crate::palette::capitalize;
use crate::state::AppState;

#[component]
pub(crate) fn SearchBox(state: AppState) -> impl IntoView {
    let entries = move || state.suggestions.with(|suggestions| group_suggestions(suggestions));

    let render_entry = move |entry: SuggestionEntry| match entry {
        SuggestionEntry::Category(category) => {
            let label = capitalize(&category);
            view! {
                <li
                    class="suggestions__category"
                    on:click=move |_| state.filter_by_category(category.clone())
                >
                    {label}
                </li>
            }
            .into_any()
        }
        SuggestionEntry::Title { title, color } => {
            let style = color
                .map(|color| format!("border-left: 4px solid {color};"))
                .unwrap_or_default();
            let text = title.clone();
            view! {
                <li
                    class="suggestions__title"
                    style=style
                    on:click=move |_| state.search_now(title.clone())
                >
                    {text}
                </li>
            }
            .into_any()
        }
    };

    view! {
        <div class="search" on:click=|ev| ev.stop_propagation()>
            <input
                type="search"
                placeholder="Search posts..."
                prop:value=move || state.search_text.get()
                on:input=move |ev| state.on_search_input(event_target_value(&ev))
            />
            <Show when=move || state.show_suggestions.get()>
                <ul class="suggestions">
                    {move || entries().into_iter().map(render_entry).collect_view()}
                </ul>
            </Show>
        </div>
    }
}
