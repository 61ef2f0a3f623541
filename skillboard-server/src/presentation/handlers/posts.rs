use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::post::{Post, PostInput};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::json::{AppJson, AppPath, AppQuery};

/// Create and update payload. Any `color`, `id` or `createdAt` sent by a client is ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct PostPayloadDto {
    #[validate(length(min = 1))]
    pub(crate) title: Option<String>,
    /// `request` or `offer`.
    #[serde(rename = "type")]
    pub(crate) kind: Option<String>,
    /// `coding`, `math`, `science` or `other`; `other` when omitted.
    pub(crate) category: Option<String>,
    #[validate(length(min = 1))]
    pub(crate) description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    pub(crate) qry: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    #[serde(rename = "type")]
    pub(crate) kind: String,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) color: String,
    pub(crate) created_at: DateTime<Utc>,
}

/// Lightweight projection used by the live-search dropdown.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SuggestionDto {
    pub(crate) title: String,
    pub(crate) category: String,
    pub(crate) color: String,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            kind: post.kind.as_str().to_string(),
            category: post.category.as_str().to_string(),
            description: post.description,
            color: post.color.to_string(),
            created_at: post.created_at,
        }
    }
}

impl From<Post> for SuggestionDto {
    fn from(post: Post) -> Self {
        Self {
            title: post.title,
            category: post.category.as_str().to_string(),
            color: post.color.to_string(),
        }
    }
}

impl From<PostPayloadDto> for PostInput {
    fn from(dto: PostPayloadDto) -> Self {
        Self {
            title: dto.title,
            kind: dto.kind,
            category: dto.category,
            description: dto.description,
        }
    }
}

fn to_dtos(posts: Vec<Post>) -> Vec<PostDto> {
    posts.into_iter().map(PostDto::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts, newest first", body = [PostDto]),
        (status = 500, description = "Storage error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let posts = state.board_service.list_posts().await?;

    Ok((StatusCode::OK, Json(to_dtos(posts))))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found or id is not a number"),
        (status = 500, description = "Storage error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state.board_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = PostPayloadDto,
    responses(
        (status = 201, description = "Post created with a generated color", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Storage error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    AppJson(dto): AppJson<PostPayloadDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;

    let post = state.board_service.create_post(dto.into()).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = PostPayloadDto,
    responses(
        (status = 200, description = "Post updated, color unchanged", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Storage error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<PostPayloadDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;

    let post = state.board_service.update_post(id, dto.into()).await?;
    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Storage error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    state.board_service.delete_post(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/posts/search",
    tag = "posts",
    params(
        ("qry" = Option<String>, Query, description = "Substring of title, description or category; omitted lists everything")
    ),
    responses(
        (status = 200, description = "Matching posts, newest first", body = [PostDto]),
        (status = 400, description = "Malformed query string"),
        (status = 500, description = "Storage error")
    )
)]
pub(crate) async fn search_posts(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let posts = state
        .board_service
        .search_posts(query.qry.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(to_dtos(posts))))
}

#[utoipa::path(
    get,
    path = "/api/posts/suggest",
    tag = "posts",
    params(
        ("qry" = String, Query, description = "Substring of title or category")
    ),
    responses(
        (status = 200, description = "Up to 10 suggestions", body = [SuggestionDto]),
        (status = 400, description = "Query is missing"),
        (status = 500, description = "Storage error")
    )
)]
pub(crate) async fn suggest_posts(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> AppResult<(StatusCode, Json<Vec<SuggestionDto>>)> {
    let posts = state
        .board_service
        .suggest_posts(query.qry.as_deref())
        .await?;

    let suggestions = posts.into_iter().map(SuggestionDto::from).collect();
    Ok((StatusCode::OK, Json(suggestions)))
}

#[utoipa::path(
    get,
    path = "/api/posts/category/{category}",
    tag = "posts",
    params(
        ("category" = String, Path, description = "Case-insensitive substring of the category")
    ),
    responses(
        (status = 200, description = "Posts in matching categories, newest first", body = [PostDto]),
        (status = 500, description = "Storage error")
    )
)]
pub(crate) async fn posts_by_category(
    State(state): State<AppState>,
    AppPath(category): AppPath<String>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let posts = state.board_service.posts_by_category(&category).await?;

    Ok((StatusCode::OK, Json(to_dtos(posts))))
}
