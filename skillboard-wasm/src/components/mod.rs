use leptos::prelude::window;

pub(crate) mod post_card;
pub(crate) mod post_modal;
pub(crate) mod search_box;

/// Блокирующий alert браузера при неудачном сохранении или удалении.
pub(crate) fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}
