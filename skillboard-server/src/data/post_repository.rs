use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::post::{PastelColor, Post, PostDraft};
use crate::domain::search::PostFilter;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) draft: PostDraft,
    pub(crate) color: PastelColor,
    pub(crate) created_at: DateTime<Utc>,
}

/// Storage for posts. Every listing is ordered newest-first by `created_at`,
/// ties in insertion order.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn insert(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn find_all(&self) -> Result<Vec<Post>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn update_by_id(&self, id: i64, patch: PostDraft) -> Result<Option<Post>, DomainError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, DomainError>;
    async fn find_matching(
        &self,
        filter: &PostFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Post>, DomainError>;
}

pub(crate) type DynPostRepository = Arc<dyn PostRepository>;

#[async_trait]
impl<T: PostRepository + ?Sized> PostRepository for Arc<T> {
    async fn insert(&self, input: NewPost) -> Result<Post, DomainError> {
        (**self).insert(input).await
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        (**self).find_by_id(id).await
    }

    async fn update_by_id(&self, id: i64, patch: PostDraft) -> Result<Option<Post>, DomainError> {
        (**self).update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DomainError> {
        (**self).delete_by_id(id).await
    }

    async fn find_matching(
        &self,
        filter: &PostFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Post>, DomainError> {
        (**self).find_matching(filter, limit).await
    }
}
