use async_trait::async_trait;
use colegio_core::models::{Attachment, NewAttachment};
use colegio_core::{AppError, EntityKind};
use sqlx::PgPool;

/// Trait for attachment row persistence
/// This abstracts the database implementation (PostgreSQL)
#[async_trait]
pub trait AttachmentRows: Send + Sync {
    /// Insert a row for a freshly stored file.
    async fn insert(&self, new: NewAttachment) -> Result<Attachment, AppError>;

    /// Fetch one row by id.
    async fn get(&self, id: i64) -> Result<Option<Attachment>, AppError>;

    /// All rows of one collection of one owner, oldest first.
    async fn list_collection(
        &self,
        owner_kind: EntityKind,
        owner_id: i64,
        collection_name: &str,
    ) -> Result<Vec<Attachment>, AppError>;

    /// Delete one row. Returns whether a row existed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Atomically delete every row of the collection and insert the
    /// replacement row. Used by single-file collections so the database never
    /// shows two current files for the same slot.
    async fn replace_collection(&self, new: NewAttachment) -> Result<Attachment, AppError>;
}

#[derive(Clone)]
pub struct PostgresAttachmentRepository {
    pool: PgPool,
}

impl PostgresAttachmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ATTACHMENT_COLUMNS: &str = "id, owner_kind, owner_id, collection_name, disk, \
     file_name, mime_type, size, manipulations, custom_properties, \
     generated_conversions, responsive_images, created_at, updated_at";

#[async_trait]
impl AttachmentRows for PostgresAttachmentRepository {
    #[tracing::instrument(skip(self, new), fields(db.table = "media", db.operation = "insert"))]
    async fn insert(&self, new: NewAttachment) -> Result<Attachment, AppError> {
        let row = sqlx::query_as::<_, Attachment>(&format!(
            r#"
            INSERT INTO media (
                owner_kind, owner_id, collection_name, disk,
                file_name, mime_type, size,
                manipulations, custom_properties, generated_conversions, responsive_images
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, '{{}}', '{{}}', '{{}}', '[]')
            RETURNING {ATTACHMENT_COLUMNS}
            "#
        ))
        .bind(new.owner_kind)
        .bind(new.owner_id)
        .bind(&new.collection_name)
        .bind(&new.disk)
        .bind(&new.file_name)
        .bind(&new.mime_type)
        .bind(new.size)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "select"))]
    async fn get(&self, id: i64) -> Result<Option<Attachment>, AppError> {
        let row = sqlx::query_as::<_, Attachment>(&format!(
            "SELECT {ATTACHMENT_COLUMNS} FROM media WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "select"))]
    async fn list_collection(
        &self,
        owner_kind: EntityKind,
        owner_id: i64,
        collection_name: &str,
    ) -> Result<Vec<Attachment>, AppError> {
        let rows = sqlx::query_as::<_, Attachment>(&format!(
            r#"
            SELECT {ATTACHMENT_COLUMNS} FROM media
            WHERE owner_kind = $1 AND owner_id = $2 AND collection_name = $3
            ORDER BY id ASC
            "#
        ))
        .bind(owner_kind)
        .bind(owner_id)
        .bind(collection_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "delete"))]
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self, new), fields(db.table = "media", db.operation = "replace"))]
    async fn replace_collection(&self, new: NewAttachment) -> Result<Attachment, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM media WHERE owner_kind = $1 AND owner_id = $2 AND collection_name = $3",
        )
        .bind(new.owner_kind)
        .bind(new.owner_id)
        .bind(&new.collection_name)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, Attachment>(&format!(
            r#"
            INSERT INTO media (
                owner_kind, owner_id, collection_name, disk,
                file_name, mime_type, size,
                manipulations, custom_properties, generated_conversions, responsive_images
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, '{{}}', '{{}}', '{{}}', '[]')
            RETURNING {ATTACHMENT_COLUMNS}
            "#
        ))
        .bind(new.owner_kind)
        .bind(new.owner_id)
        .bind(&new.collection_name)
        .bind(&new.disk)
        .bind(&new.file_name)
        .bind(&new.mime_type)
        .bind(new.size)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row)
    }
}
