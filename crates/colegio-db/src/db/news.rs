use colegio_core::models::{News, NewsDraft};
use colegio_core::AppError;
use sqlx::PgPool;

const NEWS_COLUMNS: &str = r#"id, title, content, extract, link, "type", is_active, created_at, updated_at"#;

#[derive(Clone)]
pub struct NewsRepository {
    pool: PgPool,
}

impl NewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "news", db.operation = "insert"))]
    pub async fn create(&self, draft: &NewsDraft) -> Result<News, AppError> {
        let row = sqlx::query_as::<_, News>(&format!(
            r#"
            INSERT INTO news (title, content, extract, link, "type", is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {NEWS_COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.extract)
        .bind(&draft.link)
        .bind(draft.news_type)
        .bind(draft.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "news", db.operation = "update"))]
    pub async fn update(&self, id: i64, draft: &NewsDraft) -> Result<Option<News>, AppError> {
        let row = sqlx::query_as::<_, News>(&format!(
            r#"
            UPDATE news SET
                title = $2, content = $3, extract = $4, link = $5,
                "type" = $6, is_active = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {NEWS_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.extract)
        .bind(&draft.link)
        .bind(draft.news_type)
        .bind(draft.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "news", db.operation = "select"))]
    pub async fn get(&self, id: i64) -> Result<Option<News>, AppError> {
        let row = sqlx::query_as::<_, News>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Newest first; `search` matches the title or content.
    #[tracing::instrument(skip(self), fields(db.table = "news", db.operation = "select"))]
    pub async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<News>, AppError> {
        let rows = sqlx::query_as::<_, News>(&format!(
            r#"
            SELECT {NEWS_COLUMNS} FROM news
            WHERE $1::text IS NULL
               OR title ILIKE '%' || $1 || '%'
               OR content ILIKE '%' || $1 || '%'
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self), fields(db.table = "news", db.operation = "update"))]
    pub async fn toggle_active(&self, id: i64) -> Result<Option<News>, AppError> {
        let row = sqlx::query_as::<_, News>(&format!(
            r#"
            UPDATE news SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            RETURNING {NEWS_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Delete the news row only. Media cleanup happens above this layer,
    /// before the row goes away.
    #[tracing::instrument(skip(self), fields(db.table = "news", db.operation = "delete"))]
    pub async fn delete_row(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
