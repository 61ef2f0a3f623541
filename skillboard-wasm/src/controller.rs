//! Состояние UI, на котором построены компоненты Leptos.

use thiserror::Error;

use crate::models::{Post, PostPayload, Suggestion};

/// Задержка между последним нажатием клавиши и запросами search/suggest.
pub const DEBOUNCE_MS: u64 = 300;

pub const DEFAULT_KIND: &str = "request";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub kind: String,
    /// Пусто, пока пользователь не выберет категорию явно.
    pub category: String,
    pub description: String,
}

impl Default for PostForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            kind: DEFAULT_KIND.to_string(),
            category: String::new(),
            description: String::new(),
        }
    }
}

impl PostForm {
    fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            kind: post.kind.clone(),
            category: post.category.clone(),
            description: post.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter a title")]
    MissingTitle,
    #[error("Please enter a description")]
    MissingDescription,
    #[error("Please choose a category")]
    MissingCategory,
}

/// Проверка обязательных полей на клиенте до отправки запроса.
pub fn validate_form(form: &PostForm) -> Result<PostPayload, FormError> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(FormError::MissingTitle);
    }
    let description = form.description.trim();
    if description.is_empty() {
        return Err(FormError::MissingDescription);
    }
    if form.category.trim().is_empty() {
        return Err(FormError::MissingCategory);
    }

    Ok(PostPayload {
        title: title.to_string(),
        kind: form.kind.clone(),
        category: form.category.clone(),
        description: description.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(PostPayload),
    Update(i64, PostPayload),
}

/// Состояние модального окна. `editing` задан: редактирование, иначе создание.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostEditor {
    editing: Option<Post>,
    form: PostForm,
    open: bool,
}

impl PostEditor {
    pub fn open_create(&mut self) {
        self.editing = None;
        self.form = PostForm::default();
        self.open = true;
    }

    /// Заполняет форму из `post`. Цвет в форму не входит.
    pub fn start_edit(&mut self, post: &Post) {
        self.form = PostForm::from_post(post);
        self.editing = Some(post.clone());
        self.open = true;
    }

    pub fn close(&mut self) {
        self.editing = None;
        self.form = PostForm::default();
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<&Post> {
        self.editing.as_ref()
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PostForm {
        &mut self.form
    }

    pub fn submission(&self) -> Result<Submission, FormError> {
        let payload = validate_form(&self.form)?;
        Ok(match &self.editing {
            Some(post) => Submission::Update(post.id, payload),
            None => Submission::Create(payload),
        })
    }
}

pub fn prepend_post(posts: &mut Vec<Post>, post: Post) {
    posts.insert(0, post);
}

/// Заменяет карточку с тем же id на месте. Возвращает false, если её уже нет в списке.
pub fn replace_post(posts: &mut [Post], updated: Post) -> bool {
    match posts.iter_mut().find(|post| post.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub fn remove_post(posts: &mut Vec<Post>, id: i64) -> bool {
    let before = posts.len();
    posts.retain(|post| post.id != id);
    posts.len() != before
}

/// Открыто не больше одного меню действий.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionMenus {
    open: Option<i64>,
}

impl ActionMenus {
    pub fn toggle(&mut self, id: i64) {
        self.open = if self.open == Some(id) { None } else { Some(id) };
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self, id: i64) -> bool {
        self.open == Some(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionEntry {
    /// Кликабельный заголовок; фильтрует основной список по этой категории.
    Category(String),
    Title {
        title: String,
        color: Option<String>,
    },
}

/// Вставляет заголовок перед первой подсказкой каждой категории.
pub fn group_suggestions(suggestions: &[Suggestion]) -> Vec<SuggestionEntry> {
    let mut seen: Vec<&str> = Vec::new();
    let mut entries = Vec::with_capacity(suggestions.len() * 2);

    for suggestion in suggestions {
        if !seen.contains(&suggestion.category.as_str()) {
            seen.push(&suggestion.category);
            entries.push(SuggestionEntry::Category(suggestion.category.clone()));
        }
        entries.push(SuggestionEntry::Title {
            title: suggestion.title.clone(),
            color: suggestion.color.clone(),
        });
    }

    entries
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Скрыть подсказки и снова показать полный список.
    Reset,
    Run(String),
}

pub fn plan_search(input: &str) -> SearchAction {
    let query = input.trim();
    if query.is_empty() {
        SearchAction::Reset
    } else {
        SearchAction::Run(query.to_string())
    }
}

/// Номера запущенных циклов поиска; применить ответ может только последний.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSequence {
    latest: u64,
}

impl SearchSequence {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

/// Единственный debounce-таймер, который может ждать срабатывания.
#[derive(Debug, Clone, Copy)]
pub struct DebounceSlot<H> {
    pending: Option<H>,
}

impl<H> Default for DebounceSlot<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> DebounceSlot<H> {
    /// Сохраняет новый таймер и возвращает тот, который он заменил.
    pub fn arm(&mut self, handle: H) -> Option<H> {
        self.pending.replace(handle)
    }

    /// Забирает ждущий таймер, чтобы вызывающий мог его отменить.
    pub fn disarm(&mut self) -> Option<H> {
        self.pending.take()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(id: i64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            kind: "offer".to_string(),
            category: "coding".to_string(),
            description: "pair programming".to_string(),
            color: Some("hsl(200, 96%, 97%)".to_string()),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    fn suggestion(title: &str, category: &str) -> Suggestion {
        Suggestion {
            title: title.to_string(),
            category: category.to_string(),
            color: None,
        }
    }

    #[test]
    fn new_form_defaults_to_request_without_category() {
        let form = PostForm::default();
        assert_eq!(form.kind, "request");
        assert!(form.category.is_empty());
    }

    #[test]
    fn validate_form_requires_explicit_category() {
        let form = PostForm {
            title: "Rust help".to_string(),
            description: "lifetimes".to_string(),
            ..PostForm::default()
        };
        assert_eq!(validate_form(&form), Err(FormError::MissingCategory));
    }

    #[test]
    fn validate_form_rejects_blank_title_and_description() {
        let mut form = PostForm {
            title: "   ".to_string(),
            description: "d".to_string(),
            category: "math".to_string(),
            ..PostForm::default()
        };
        assert_eq!(validate_form(&form), Err(FormError::MissingTitle));

        form.title = "t".to_string();
        form.description = "\n".to_string();
        assert_eq!(validate_form(&form), Err(FormError::MissingDescription));
    }

    #[test]
    fn validate_form_trims_payload() {
        let form = PostForm {
            title: "  Need calculus help ".to_string(),
            kind: "request".to_string(),
            category: "math".to_string(),
            description: " derivatives ".to_string(),
        };

        let payload = validate_form(&form).expect("form is complete");
        assert_eq!(payload.title, "Need calculus help");
        assert_eq!(payload.description, "derivatives");
    }

    #[test]
    fn editor_edit_then_close_returns_to_create_mode() {
        let mut editor = PostEditor::default();
        let post = sample_post(5, "Rust pairing");

        editor.start_edit(&post);
        assert!(editor.is_open());
        assert_eq!(editor.form().title, "Rust pairing");
        assert_eq!(editor.form().category, "coding");
        assert!(matches!(
            editor.submission(),
            Ok(Submission::Update(5, _))
        ));

        editor.close();
        assert!(!editor.is_open());
        assert!(editor.editing().is_none());
        assert_eq!(editor.form(), &PostForm::default());
    }

    #[test]
    fn editor_create_mode_submits_create() {
        let mut editor = PostEditor::default();
        editor.start_edit(&sample_post(1, "old"));
        editor.open_create();

        let form = editor.form_mut();
        form.title = "Guitar lessons".to_string();
        form.kind = "offer".to_string();
        form.category = "other".to_string();
        form.description = "chords".to_string();

        match editor.submission() {
            Ok(Submission::Create(payload)) => assert_eq!(payload.kind, "offer"),
            other => panic!("expected create submission, got {other:?}"),
        }
    }

    #[test]
    fn list_mutations_touch_only_the_target_card() {
        let mut posts = vec![sample_post(1, "a"), sample_post(2, "b")];

        prepend_post(&mut posts, sample_post(3, "c"));
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), [3, 1, 2]);

        assert!(replace_post(&mut posts, sample_post(1, "a2")));
        assert_eq!(posts[1].title, "a2");
        assert!(!replace_post(&mut posts, sample_post(9, "zz")));

        assert!(remove_post(&mut posts, 3));
        assert!(!remove_post(&mut posts, 3));
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn opening_a_menu_closes_the_others() {
        let mut menus = ActionMenus::default();
        menus.toggle(1);
        menus.toggle(2);
        assert!(!menus.is_open(1));
        assert!(menus.is_open(2));

        menus.toggle(2);
        assert!(!menus.is_open(2));

        menus.toggle(4);
        menus.close_all();
        assert!(!menus.is_open(4));
    }

    #[test]
    fn suggestions_get_one_header_per_category_in_first_seen_order() {
        let entries = group_suggestions(&[
            suggestion("Calculus", "math"),
            suggestion("Rust", "coding"),
            suggestion("Algebra", "math"),
        ]);

        let labels: Vec<String> = entries
            .iter()
            .map(|entry| match entry {
                SuggestionEntry::Category(name) => format!("#{name}"),
                SuggestionEntry::Title { title, .. } => title.clone(),
            })
            .collect();
        assert_eq!(labels, ["#math", "Calculus", "#coding", "Rust", "Algebra"]);
    }

    #[test]
    fn blank_input_resets_the_list() {
        assert_eq!(plan_search("   "), SearchAction::Reset);
        assert_eq!(plan_search(" rust "), SearchAction::Run("rust".to_string()));
    }

    #[test]
    fn only_latest_ticket_is_current() {
        let mut sequence = SearchSequence::default();
        let first = sequence.issue();
        let second = sequence.issue();

        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
    }

    #[test]
    fn rearming_returns_the_timer_to_cancel() {
        let mut slot = DebounceSlot::default();
        assert_eq!(slot.arm(1), None);
        assert_eq!(slot.arm(2), Some(1));
        assert!(slot.is_armed());
    }

    #[test]
    fn immediate_search_leaves_no_timer_behind() {
        // ввели символ и выбрали подсказку внутри debounce-окна
        let mut slot = DebounceSlot::default();
        slot.arm("typed");

        assert_eq!(slot.disarm(), Some("typed"));
        assert!(!slot.is_armed());
        assert_eq!(slot.disarm(), None);
    }
}
