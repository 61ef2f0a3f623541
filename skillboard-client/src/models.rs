use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Запрос или предложение навыка в том виде, в каком его отдаёт сервер.
pub struct Post {
    /// Идентификатор, назначенный сервером.
    pub id: i64,
    /// Короткий заголовок, не длиннее 100 символов.
    pub title: String,
    /// `request` или `offer`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `coding`, `math`, `science` или `other`.
    pub category: String,
    /// Произвольный текст поста.
    pub description: String,
    /// Пастельный цвет фона, например `hsl(210, 97%, 96%)`. Задаётся при создании.
    pub color: String,
    /// Время создания (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Урезанная модель поста для подсказок живого поиска.
pub struct Suggestion {
    /// Заголовок поста.
    pub title: String,
    /// Категория поста.
    pub category: String,
    /// Цвет поста.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Тело запросов на создание и обновление.
pub struct PostPayload {
    /// Заголовок; сервер обрезает пробелы.
    pub title: String,
    /// `request` или `offer`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Категория; если не указана, сервер сохраняет `other`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Текст поста; сервер обрезает пробелы.
    pub description: String,
}

impl From<&Post> for PostPayload {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            kind: post.kind.clone(),
            category: Some(post.category.clone()),
            description: post.description.clone(),
        }
    }
}
