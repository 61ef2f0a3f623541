use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Post, PostPayload, Suggestion};

const API_BASE_URL: &str = match option_env!("SKILLBOARD_API_BASE_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:3000",
};

#[derive(Debug, Clone, Error)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("http error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("decode error: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn parse_error_body(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => match status {
            400 => "Invalid post data".to_string(),
            404 => "Post not found".to_string(),
            500..=599 => "Server error".to_string(),
            _ => format!("HTTP error {status}"),
        },
    };

    ApiError::Http { status, message }
}

async fn send(request: Request) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }
    Ok(response)
}

async fn fetch<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    let request = builder
        .build()
        .map_err(|err| ApiError::Network(err.to_string()))?;
    parse_json(send(request).await?).await
}

async fn fetch_with_body<T: DeserializeOwned>(
    builder: RequestBuilder,
    payload: &PostPayload,
) -> Result<T, ApiError> {
    let request = builder
        .json(payload)
        .map_err(|err| ApiError::Network(err.to_string()))?;
    parse_json(send(request).await?).await
}

pub(crate) async fn list_posts() -> Result<Vec<Post>, ApiError> {
    fetch(Request::get(&endpoint("/api/posts"))).await
}

pub(crate) async fn create_post(payload: &PostPayload) -> Result<Post, ApiError> {
    fetch_with_body(Request::post(&endpoint("/api/posts")), payload).await
}

pub(crate) async fn update_post(id: i64, payload: &PostPayload) -> Result<Post, ApiError> {
    fetch_with_body(Request::put(&endpoint(&format!("/api/posts/{id}"))), payload).await
}

pub(crate) async fn delete_post(id: i64) -> Result<(), ApiError> {
    let request = Request::delete(&endpoint(&format!("/api/posts/{id}")))
        .build()
        .map_err(|err| ApiError::Network(err.to_string()))?;
    send(request).await?;
    Ok(())
}

pub(crate) async fn search_posts(query: &str) -> Result<Vec<Post>, ApiError> {
    fetch(Request::get(&endpoint("/api/posts/search")).query([("qry", query)])).await
}

pub(crate) async fn suggest(query: &str) -> Result<Vec<Suggestion>, ApiError> {
    fetch(Request::get(&endpoint("/api/posts/suggest")).query([("qry", query)])).await
}

pub(crate) async fn posts_by_category(category: &str) -> Result<Vec<Post>, ApiError> {
    let segment = String::from(js_sys::encode_uri_component(category));
    fetch(Request::get(&endpoint(&format!("/api/posts/category/{segment}")))).await
}
