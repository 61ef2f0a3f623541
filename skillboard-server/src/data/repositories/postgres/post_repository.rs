use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{PastelColor, Post, PostDraft};
use crate::domain::search::{PostFilter, escape_like};

const POST_COLUMNS: &str = "id, title, post_type, category, description, color, created_at";
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id ASC";

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    post_type: String,
    category: String,
    description: String,
    color: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, input: NewPost) -> Result<Post, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO posts (title, post_type, category, description, color, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(&input.draft.title)
            .bind(input.draft.kind.as_str())
            .bind(input.draft.category.as_str())
            .bind(&input.draft.description)
            .bind(input.color.to_string())
            .bind(input.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts {NEWEST_FIRST}");

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn update_by_id(&self, id: i64, patch: PostDraft) -> Result<Option<Post>, DomainError> {
        let sql = format!(
            r#"
            UPDATE posts
            SET title = $2,
                post_type = $3,
                category = $4,
                description = $5
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .bind(&patch.title)
            .bind(patch.kind.as_str())
            .bind(patch.category.as_str())
            .bind(&patch.description)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_matching(
        &self,
        filter: &PostFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Post>, DomainError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE {} {NEWEST_FIRST} LIMIT $2",
            where_clause(filter)
        );
        let pattern = format!("%{}%", escape_like(filter.needle()));
        let limit = limit.map(|value| i64::try_from(value).unwrap_or(i64::MAX));

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }
}

fn where_clause(filter: &PostFilter) -> &'static str {
    match filter {
        PostFilter::Search(_) => {
            r"(title ILIKE $1 ESCAPE '\' OR description ILIKE $1 ESCAPE '\' OR category ILIKE $1 ESCAPE '\')"
        }
        PostFilter::Suggest(_) => r"(title ILIKE $1 ESCAPE '\' OR category ILIKE $1 ESCAPE '\')",
        PostFilter::Category(_) => r"category ILIKE $1 ESCAPE '\'",
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    let id = row.id;
    let corrupt = |err: DomainError| DomainError::Storage(format!("corrupt post row {id}: {err}"));

    let draft = PostDraft {
        title: row.title,
        kind: row.post_type.parse().map_err(corrupt)?,
        category: row.category.parse().map_err(corrupt)?,
        description: row.description,
    };
    let color: PastelColor = row.color.parse().map_err(corrupt)?;

    Post::new(id, draft, color, row.created_at).map_err(corrupt)
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23514")
    {
        return DomainError::Validation {
            field: "post",
            message: "rejected by the store schema",
        };
    }
    DomainError::Storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::where_clause;
    use crate::domain::search::PostFilter;

    #[test]
    fn suggest_clause_never_touches_description() {
        let clause = where_clause(&PostFilter::Suggest("x".to_string()));
        assert!(clause.contains("title"));
        assert!(clause.contains("category"));
        assert!(!clause.contains("description"));
    }

    #[test]
    fn category_clause_only_touches_category() {
        let clause = where_clause(&PostFilter::Category("x".to_string()));
        assert!(!clause.contains("title"));
        assert!(clause.contains("category"));
    }
}
