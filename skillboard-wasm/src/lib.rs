//! Браузерный UI skillboard: карточки постов, модальное окно создания и редактирования, живой поиск с debounce.
//!
//! Состояние (`controller`, `palette`) собирается под любую цель, чтобы его можно было
//! тестировать на хосте; слой представления Leptos только для wasm32.

pub mod controller;
pub mod models;
pub mod palette;

#[cfg(target_arch = "wasm32")]
mod api;
#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod state;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
