use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки, возвращаемые `skillboard-client`.
pub enum BoardClientError {
    /// Ошибка транспорта (`reqwest`): нет соединения, таймаут, нечитаемое тело ответа.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Запрошенный пост не существует.
    #[error("not found")]
    NotFound,

    /// Сервер отклонил данные или запрос (4xx).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Сервер не смог обработать запрос (5xx).
    #[error("server error: {0}")]
    Server(String),
}

/// Результат операций `skillboard-client`.
pub type BoardClientResult<T> = Result<T, BoardClientError>;

impl BoardClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            status if status.is_server_error() => Self::Server(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
