use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::controller::{
    ActionMenus, DEBOUNCE_MS, DebounceSlot, PostEditor, SearchAction, SearchSequence,
    plan_search,
};
use crate::models::{Post, Suggestion};

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) posts: RwSignal<Vec<Post>>,
    pub(crate) error: RwSignal<Option<String>>,
    pub(crate) loading: RwSignal<bool>,
    pub(crate) editor: RwSignal<PostEditor>,
    pub(crate) menus: RwSignal<ActionMenus>,
    pub(crate) search_text: RwSignal<String>,
    pub(crate) suggestions: RwSignal<Vec<Suggestion>>,
    pub(crate) show_suggestions: RwSignal<bool>,
    search_sequence: StoredValue<SearchSequence>,
    debounce: StoredValue<DebounceSlot<TimeoutHandle>>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            posts: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            editor: RwSignal::new(PostEditor::default()),
            menus: RwSignal::new(ActionMenus::default()),
            search_text: RwSignal::new(String::new()),
            suggestions: RwSignal::new(Vec::new()),
            show_suggestions: RwSignal::new(false),
            search_sequence: StoredValue::new(SearchSequence::default()),
            debounce: StoredValue::new(DebounceSlot::default()),
        }
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    pub(crate) fn clear_error(&self) {
        self.error.set(None);
    }

    fn next_ticket(&self) -> u64 {
        let mut ticket = 0;
        self.search_sequence
            .update_value(|sequence| ticket = sequence.issue());
        ticket
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.search_sequence
            .with_value(|sequence| sequence.is_current(ticket))
    }

    fn load_list<F>(&self, request: F)
    where
        F: Future<Output = Result<Vec<Post>, ApiError>> + 'static,
    {
        self.load_list_for(self.next_ticket(), request);
    }

    /// Заменяет основной список результатом `request`, если за это время не ушёл более новый запрос.
    fn load_list_for<F>(&self, ticket: u64, request: F)
    where
        F: Future<Output = Result<Vec<Post>, ApiError>> + 'static,
    {
        let state = *self;
        state.loading.set(true);

        spawn_local(async move {
            let result = request.await;
            if !state.is_current(ticket) {
                return;
            }
            match result {
                Ok(posts) => {
                    state.posts.set(posts);
                    state.clear_error();
                }
                Err(err) => state.set_error(err.to_string()),
            }
            state.loading.set(false);
        });
    }

    pub(crate) fn refresh_posts(&self) {
        self.load_list(api::list_posts());
    }

    /// Отменяет ввод, который ещё ждёт окончания debounce-окна.
    fn cancel_pending_search(&self) {
        let mut pending = None;
        self.debounce.update_value(|slot| pending = slot.disarm());
        if let Some(handle) = pending {
            handle.clear();
        }
    }

    pub(crate) fn filter_by_category(&self, category: String) {
        self.cancel_pending_search();
        self.show_suggestions.set(false);
        self.load_list(async move { api::posts_by_category(&category).await });
    }

    /// Только полный поиск; вызывается при выборе подсказки.
    pub(crate) fn search_now(&self, text: String) {
        self.cancel_pending_search();
        self.search_text.set(text.clone());
        self.show_suggestions.set(false);

        match plan_search(&text) {
            SearchAction::Reset => self.refresh_posts(),
            SearchAction::Run(query) => {
                self.load_list(async move { api::search_posts(&query).await });
            }
        }
    }

    /// Ввод устоялся: обновляет основной список и подсказки вместе.
    fn run_query(&self, text: String) {
        match plan_search(&text) {
            SearchAction::Reset => {
                self.show_suggestions.set(false);
                self.suggestions.set(Vec::new());
                self.refresh_posts();
            }
            SearchAction::Run(query) => {
                let ticket = self.next_ticket();
                let search_query = query.clone();
                self.load_list_for(ticket, async move { api::search_posts(&search_query).await });

                let state = *self;
                spawn_local(async move {
                    let result = api::suggest(&query).await;
                    if !state.is_current(ticket) {
                        return;
                    }
                    match result {
                        Ok(suggestions) => {
                            state.show_suggestions.set(!suggestions.is_empty());
                            state.suggestions.set(suggestions);
                        }
                        Err(err) => state.set_error(err.to_string()),
                    }
                });
            }
        }
    }

    /// Перезапускает debounce-таймер; до сервера доходит только последний ввод в окне.
    pub(crate) fn on_search_input(&self, text: String) {
        self.search_text.set(text.clone());
        self.cancel_pending_search();

        let state = *self;
        let handle = set_timeout_with_handle(
            move || state.run_query(text),
            Duration::from_millis(DEBOUNCE_MS),
        );
        match handle {
            Ok(handle) => {
                self.debounce.update_value(|slot| {
                    slot.arm(handle);
                });
            }
            Err(_) => self.set_error("failed to schedule search"),
        }
    }
}
