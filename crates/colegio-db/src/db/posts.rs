use colegio_core::models::{Post, PostDraft, ReorderItem};
use colegio_core::AppError;
use sqlx::PgPool;
use std::collections::HashSet;

use super::transaction::TransactionGuard;

const POST_COLUMNS: &str = r#"id, link, "order", is_active, created_at, updated_at"#;

/// Same carousel semantics as banners, over the posts table.
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "posts", db.operation = "insert"))]
    pub async fn create(&self, draft: &PostDraft) -> Result<Post, AppError> {
        let row = sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (link, "order", is_active)
            VALUES ($1, $2, $3)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&draft.link)
        .bind(draft.order)
        .bind(draft.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "posts", db.operation = "update"))]
    pub async fn update(&self, id: i64, draft: &PostDraft) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET link = $2, "order" = $3, is_active = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&draft.link)
        .bind(draft.order)
        .bind(draft.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "select"))]
    pub async fn get(&self, id: i64) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, Post>(&format!(
            r#"SELECT {POST_COLUMNS} FROM posts ORDER BY "order" ASC, id ASC"#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "update"))]
    pub async fn toggle_active(&self, id: i64) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Apply a bulk reorder, all-or-nothing. Every referenced id must exist;
    /// otherwise no row is touched.
    #[tracing::instrument(skip(self, items), fields(db.table = "posts", db.operation = "update", count = items.len()))]
    pub async fn reorder(&self, items: &[ReorderItem]) -> Result<(), AppError> {
        let ids: Vec<i64> = items
            .iter()
            .map(|i| i.id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let found: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_one(&mut **tx)
            .await?;

        if found as usize != ids.len() {
            return Err(AppError::NotFound(
                "One or more posts in the reorder request do not exist".to_string(),
            ));
        }

        for item in items {
            sqlx::query(r#"UPDATE posts SET "order" = $2, updated_at = NOW() WHERE id = $1"#)
                .bind(item.id)
                .bind(item.order)
                .execute(&mut **tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete the post row only. Media cleanup happens above this layer,
    /// before the row goes away.
    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "delete"))]
    pub async fn delete_row(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
