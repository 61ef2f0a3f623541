use axum::extract::{FromRequest, FromRequestParts};

use super::app_error::AppError;

/// JSON body extractor whose rejections (malformed body, missing content type)
/// become `400 {"error": ...}` instead of axum's plain-text 415/422.
#[derive(FromRequest, Debug, Clone, Copy, Default)]
#[from_request(via(axum::Json), rejection(AppError))]
pub(crate) struct AppJson<T>(pub(crate) T);

/// Path extractor; an id that does not parse resolves to no post and answers `404 {"error": ...}`.
#[derive(FromRequestParts, Debug, Clone, Copy, Default)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub(crate) struct AppPath<T>(pub(crate) T);

/// Query-string extractor with `400 {"error": ...}` rejections.
#[derive(FromRequestParts, Debug, Clone, Copy, Default)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub(crate) struct AppQuery<T>(pub(crate) T);
