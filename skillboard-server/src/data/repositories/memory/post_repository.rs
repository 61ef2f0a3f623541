//! Process-local post store. Data is lost on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDraft};
use crate::domain::search::PostFilter;

#[derive(Default)]
struct Store {
    last_id: i64,
    // insertion order
    posts: Vec<Post>,
}

#[derive(Default)]
pub(crate) struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

fn newest_first<'a>(posts: impl Iterator<Item = &'a Post>) -> Vec<Post> {
    let mut sorted: Vec<Post> = posts.cloned().collect();
    // stable sort keeps insertion order for equal timestamps
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut store = self.store.write().await;

        let id = store.last_id + 1;
        let post = Post::new(id, input.draft, input.color, input.created_at)?;
        store.last_id = id;
        store.posts.push(post.clone());

        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        let store = self.store.read().await;
        Ok(newest_first(store.posts.iter()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let store = self.store.read().await;
        Ok(store.posts.iter().find(|post| post.id == id).cloned())
    }

    async fn update_by_id(&self, id: i64, patch: PostDraft) -> Result<Option<Post>, DomainError> {
        let mut store = self.store.write().await;

        let Some(post) = store.posts.iter_mut().find(|post| post.id == id) else {
            return Ok(None);
        };
        post.apply(patch);

        Ok(Some(post.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;

        let before = store.posts.len();
        store.posts.retain(|post| post.id != id);

        Ok(store.posts.len() < before)
    }

    async fn find_matching(
        &self,
        filter: &PostFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Post>, DomainError> {
        let store = self.store.read().await;

        let mut matched = newest_first(store.posts.iter().filter(|post| filter.matches(post)));
        if let Some(limit) = limit {
            matched.truncate(limit);
        }

        Ok(matched)
    }
}
