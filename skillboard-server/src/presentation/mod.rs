use std::sync::Arc;

use crate::application::board_service::BoardService;
use crate::data::post_repository::DynPostRepository;
use crate::infrastructure::settings::StorageBackend;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod json;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) board_service: Arc<BoardService<DynPostRepository>>,
    pub(crate) storage: StorageBackend,
}

impl AppState {
    pub(crate) fn new(
        board_service: Arc<BoardService<DynPostRepository>>,
        storage: StorageBackend,
    ) -> Self {
        Self {
            board_service,
            storage,
        }
    }
}
