use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{BoardClientError, BoardClientResult};
use crate::models::{Post, PostPayload, Suggestion};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    qry: Option<&'a str>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST API `skillboard-server`.
pub struct BoardClient {
    base_url: String,
    client: Client,
}

impl BoardClient {
    /// Создаёт клиент с базовым URL сервера, например `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> BoardClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.endpoint(path))
    }

    async fn decode_error(response: reqwest::Response) -> BoardClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        BoardClientError::from_http_status(status, Some(message))
    }

    async fn execute(request: RequestBuilder) -> BoardClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(BoardClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    /// общий helper: отправить запрос, проверить статус, разобрать json
    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> BoardClientResult<T> {
        Self::execute(request)
            .await?
            .json::<T>()
            .await
            .map_err(BoardClientError::from_reqwest)
    }

    /// Возвращает все посты, новые первыми.
    pub async fn list_posts(&self) -> BoardClientResult<Vec<Post>> {
        Self::fetch(self.request(Method::GET, "/api/posts")).await
    }

    /// Получает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> BoardClientResult<Post> {
        Self::fetch(self.request(Method::GET, &format!("/api/posts/{id}"))).await
    }

    /// Создаёт пост. Идентификатор, цвет и время создания назначает сервер.
    pub async fn create_post(&self, payload: &PostPayload) -> BoardClientResult<Post> {
        Self::fetch(self.request(Method::POST, "/api/posts").json(payload)).await
    }

    /// Обновляет редактируемые поля поста. Цвет и время создания сохраняются.
    pub async fn update_post(&self, id: i64, payload: &PostPayload) -> BoardClientResult<Post> {
        Self::fetch(
            self.request(Method::PUT, &format!("/api/posts/{id}"))
                .json(payload),
        )
        .await
    }

    /// Удаляет пост по идентификатору.
    pub async fn delete_post(&self, id: i64) -> BoardClientResult<()> {
        Self::execute(self.request(Method::DELETE, &format!("/api/posts/{id}"))).await?;
        Ok(())
    }

    /// Поиск без учёта регистра по заголовку, описанию и категории.
    ///
    /// При `None` возвращаются все посты.
    pub async fn search_posts(&self, query: Option<&str>) -> BoardClientResult<Vec<Post>> {
        let query = SearchQuery { qry: query };
        Self::fetch(self.request(Method::GET, "/api/posts/search").query(&query)).await
    }

    /// До десяти подсказок, у которых заголовок или категория содержат `query`.
    pub async fn suggest(&self, query: &str) -> BoardClientResult<Vec<Suggestion>> {
        let query = SearchQuery { qry: Some(query) };
        Self::fetch(self.request(Method::GET, "/api/posts/suggest").query(&query)).await
    }

    /// Посты, категория которых содержит `category` без учёта регистра.
    pub async fn posts_by_category(&self, category: &str) -> BoardClientResult<Vec<Post>> {
        let url = self.category_url(category)?;
        Self::fetch(self.client.get(url)).await
    }

    fn category_url(&self, category: &str) -> BoardClientResult<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.endpoint("/api/posts/category/"))
            .map_err(|err| BoardClientError::InvalidRequest(format!("invalid base url: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| BoardClientError::InvalidRequest("base url cannot hold a path".into()))?
            .pop_if_empty()
            .push(category);
        Ok(url)
    }
}
