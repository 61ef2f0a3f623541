//! Клиентская библиотека для REST API skillboard.
//!
//! `BoardClient` покрывает все маршруты `/api/posts` сервера `skillboard-server`
//! и переводит ответы с ошибками в [`BoardClientError`].
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BoardClientError, BoardClientResult};
pub use http_client::BoardClient;
pub use models::{Post, PostPayload, Suggestion};
