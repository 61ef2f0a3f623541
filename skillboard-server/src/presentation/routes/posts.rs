use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, list_posts, posts_by_category, search_posts,
    suggest_posts, update_post,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/search", get(search_posts))
        .route("/suggest", get(suggest_posts))
        .route("/category/{category}", get(posts_by_category))
        .route(
            "/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}
