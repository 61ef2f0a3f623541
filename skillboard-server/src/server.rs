use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::board_service::BoardService;
use crate::data::post_repository::DynPostRepository;
use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::infrastructure::database::{create_pool, run_migrations};
use crate::infrastructure::settings::{Settings, StorageBackend};
use crate::presentation::middleware::cors::apply_cors;
use crate::presentation::middleware::limits::apply_limits;
use crate::presentation::middleware::trace::apply_trace;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::{AppState, http_handlers};

pub(crate) async fn build_state(settings: &Settings) -> Result<AppState> {
    let repo: DynPostRepository = match settings.storage_backend {
        StorageBackend::Postgres => {
            let database_url = settings
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;
            let pool = create_pool(database_url, settings.database_max_connections).await?;
            run_migrations(&pool).await?;
            Arc::new(PostgresPostRepository::new(pool))
        }
        StorageBackend::Memory => {
            info!("using in-memory post store, data will not survive a restart");
            Arc::new(InMemoryPostRepository::new())
        }
    };

    Ok(AppState::new(
        Arc::new(BoardService::new(repo)),
        settings.storage_backend,
    ))
}

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> Result<()> {
    let app = build_router(state);
    let app = apply_limits(app, settings);
    let app = apply_trace(app);
    let app = apply_cors(app, settings)?;

    let listener = TcpListener::bind(&settings.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.http_addr))?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    http_handlers::routes(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
