use chrono::Utc;
use tracing::{debug, info};

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{PastelColor, Post, PostInput};
use crate::domain::search::{PostFilter, SUGGEST_LIMIT};

pub(crate) struct BoardService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> BoardService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.find_all().await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn create_post(&self, input: PostInput) -> Result<Post, DomainError> {
        let draft = input.validate()?;

        let new_post = NewPost {
            draft,
            color: PastelColor::random(),
            created_at: Utc::now(),
        };
        let post = self.repo.insert(new_post).await?;

        info!(post_id = post.id, color = %post.color, "post created");
        Ok(post)
    }

    /// Replaces title/type/category/description. The color is kept as assigned at creation.
    pub(crate) async fn update_post(&self, id: i64, input: PostInput) -> Result<Post, DomainError> {
        let draft = input.validate()?;

        let post = self
            .repo
            .update_by_id(id, draft)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {id}")))?;

        info!(post_id = post.id, "post updated");
        Ok(post)
    }

    pub(crate) async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        let deleted = self.repo.delete_by_id(id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {id}")));
        }

        info!(post_id = id, "post deleted");
        Ok(())
    }

    /// Blank or absent query lists everything.
    pub(crate) async fn search_posts(&self, query: Option<&str>) -> Result<Vec<Post>, DomainError> {
        let Some(query) = non_blank(query) else {
            return self.repo.find_all().await;
        };

        debug!(query, "searching posts");
        self.repo
            .find_matching(&PostFilter::Search(query.to_string()), None)
            .await
    }

    pub(crate) async fn suggest_posts(&self, query: Option<&str>) -> Result<Vec<Post>, DomainError> {
        let Some(query) = non_blank(query) else {
            return Err(DomainError::Validation {
                field: "qry",
                message: "query is required",
            });
        };

        debug!(query, "suggesting posts");
        self.repo
            .find_matching(&PostFilter::Suggest(query.to_string()), Some(SUGGEST_LIMIT))
            .await
    }

    pub(crate) async fn posts_by_category(&self, category: &str) -> Result<Vec<Post>, DomainError> {
        debug!(category, "filtering posts by category");
        self.repo
            .find_matching(&PostFilter::Category(category.trim().to_string()), None)
            .await
    }
}

fn non_blank(query: Option<&str>) -> Option<&str> {
    query.map(str::trim).filter(|q| !q.is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::BoardService;
    use crate::data::post_repository::{NewPost, PostRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::{Category, PastelColor, Post, PostDraft, PostInput, PostKind};
    use crate::domain::search::{PostFilter, SUGGEST_LIMIT};

    #[derive(Clone)]
    struct FakePostRepo {
        inserted: Arc<Mutex<Option<NewPost>>>,
        update_call: Arc<Mutex<Option<(i64, PostDraft)>>>,
        update_result: Arc<Mutex<Option<Post>>>,
        delete_result: Arc<Mutex<bool>>,
        all_calls: Arc<Mutex<u32>>,
        matching_call: Arc<Mutex<Option<(PostFilter, Option<usize>)>>>,
    }

    impl FakePostRepo {
        fn new() -> Self {
            Self {
                inserted: Arc::new(Mutex::new(None)),
                update_call: Arc::new(Mutex::new(None)),
                update_result: Arc::new(Mutex::new(None)),
                delete_result: Arc::new(Mutex::new(true)),
                all_calls: Arc::new(Mutex::new(0)),
                matching_call: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn insert(&self, input: NewPost) -> Result<Post, DomainError> {
            *self.inserted.lock().expect("inserted mutex poisoned") = Some(input.clone());
            Post::new(1, input.draft, input.color, input.created_at)
        }

        async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
            *self.all_calls.lock().expect("all_calls mutex poisoned") += 1;
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<Post>, DomainError> {
            Ok(None)
        }

        async fn update_by_id(
            &self,
            id: i64,
            patch: PostDraft,
        ) -> Result<Option<Post>, DomainError> {
            *self.update_call.lock().expect("update_call mutex poisoned") = Some((id, patch));
            Ok(self
                .update_result
                .lock()
                .expect("update_result mutex poisoned")
                .clone())
        }

        async fn delete_by_id(&self, _id: i64) -> Result<bool, DomainError> {
            Ok(*self.delete_result.lock().expect("delete_result mutex poisoned"))
        }

        async fn find_matching(
            &self,
            filter: &PostFilter,
            limit: Option<usize>,
        ) -> Result<Vec<Post>, DomainError> {
            *self
                .matching_call
                .lock()
                .expect("matching_call mutex poisoned") = Some((filter.clone(), limit));
            Ok(Vec::new())
        }
    }

    fn input(title: &str, kind: &str, category: Option<&str>, description: &str) -> PostInput {
        PostInput {
            title: Some(title.to_string()),
            kind: Some(kind.to_string()),
            category: category.map(str::to_string),
            description: Some(description.to_string()),
        }
    }

    #[tokio::test]
    async fn create_post_validates_and_assigns_pastel_color() {
        let repo = FakePostRepo::new();
        let service = BoardService::new(repo.clone());
        let before = Utc::now();

        let created = service
            .create_post(input(
                "  Need calculus help ",
                "request",
                Some("math"),
                "Struggling with derivatives",
            ))
            .await
            .expect("create_post must succeed");

        assert_eq!(created.title, "Need calculus help");
        assert!(created.created_at >= before);

        let inserted = repo
            .inserted
            .lock()
            .expect("inserted mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert_eq!(inserted.draft.category, Category::Math);
        assert_eq!(inserted.draft.kind, PostKind::Request);
        let reparsed: PastelColor = inserted
            .color
            .to_string()
            .parse()
            .expect("generated color must be a valid pastel");
        assert_eq!(reparsed, inserted.color);
    }

    #[tokio::test]
    async fn create_post_rejects_invalid_input_before_repo_call() {
        let repo = FakePostRepo::new();
        let service = BoardService::new(repo.clone());

        let err = service
            .create_post(input("title", "barter", None, "body"))
            .await
            .expect_err("invalid type must fail");

        assert!(matches!(err, DomainError::Validation { field: "type", .. }));
        assert!(repo.inserted.lock().expect("inserted mutex poisoned").is_none());
    }

    #[tokio::test]
    async fn update_post_passes_validated_draft() {
        let repo = FakePostRepo::new();
        let service = BoardService::new(repo.clone());
        let color = PastelColor::new(10, 95, 100).expect("valid color");
        *repo
            .update_result
            .lock()
            .expect("update_result mutex poisoned") = Some(
            Post::new(
                7,
                PostDraft {
                    title: "new".to_string(),
                    kind: PostKind::Offer,
                    category: Category::Other,
                    description: "body".to_string(),
                },
                color,
                Utc::now(),
            )
            .expect("valid post"),
        );

        let updated = service
            .update_post(7, input(" new ", "offer", None, " body "))
            .await
            .expect("update must succeed");
        assert_eq!(updated.id, 7);
        assert_eq!(updated.color, color);

        let (id, draft) = repo
            .update_call
            .lock()
            .expect("update_call mutex poisoned")
            .clone()
            .expect("update call must be captured");
        assert_eq!(id, 7);
        assert_eq!(draft.title, "new");
        assert_eq!(draft.description, "body");
        assert_eq!(draft.category, Category::Other);
    }

    #[tokio::test]
    async fn update_post_returns_not_found_when_missing() {
        let service = BoardService::new(FakePostRepo::new());

        let err = service
            .update_post(42, input("t", "request", None, "d"))
            .await
            .expect_err("post must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_post_returns_not_found_when_nothing_deleted() {
        let repo = FakePostRepo::new();
        *repo
            .delete_result
            .lock()
            .expect("delete_result mutex poisoned") = false;
        let service = BoardService::new(repo);

        let err = service.delete_post(3).await.expect_err("must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_without_query_lists_everything() {
        let repo = FakePostRepo::new();
        let service = BoardService::new(repo.clone());

        service.search_posts(None).await.expect("search");
        service.search_posts(Some("   ")).await.expect("search");

        assert_eq!(*repo.all_calls.lock().expect("all_calls mutex poisoned"), 2);
        assert!(
            repo.matching_call
                .lock()
                .expect("matching_call mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn search_with_query_uses_search_filter_without_limit() {
        let repo = FakePostRepo::new();
        let service = BoardService::new(repo.clone());

        service.search_posts(Some(" calc ")).await.expect("search");

        let call = repo
            .matching_call
            .lock()
            .expect("matching_call mutex poisoned")
            .clone();
        assert_eq!(call, Some((PostFilter::Search("calc".to_string()), None)));
    }

    #[tokio::test]
    async fn suggest_requires_query_and_caps_results() {
        let repo = FakePostRepo::new();
        let service = BoardService::new(repo.clone());

        let err = service
            .suggest_posts(Some(""))
            .await
            .expect_err("empty query must fail");
        assert!(matches!(err, DomainError::Validation { field: "qry", .. }));

        service.suggest_posts(Some("math")).await.expect("suggest");
        let call = repo
            .matching_call
            .lock()
            .expect("matching_call mutex poisoned")
            .clone();
        assert_eq!(
            call,
            Some((PostFilter::Suggest("math".to_string()), Some(SUGGEST_LIMIT)))
        );
    }

    #[tokio::test]
    async fn posts_by_category_uses_category_filter() {
        let repo = FakePostRepo::new();
        let service = BoardService::new(repo.clone());

        service.posts_by_category("sci").await.expect("category");

        let call = repo
            .matching_call
            .lock()
            .expect("matching_call mutex poisoned")
            .clone();
        assert_eq!(call, Some((PostFilter::Category("sci".to_string()), None)));
    }
}
