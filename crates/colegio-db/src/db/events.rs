use chrono::{DateTime, Utc};
use colegio_core::models::{EventDraft, EventRecord};
use colegio_core::{AppError, EventKind};
use sqlx::PgPool;

/// Repository over the three event tables
///
/// Courses, webinars and conferences share one record shape but live in
/// separate tables. Every query dispatches on `EventKind` for the table name
/// and the title column (`conferences` stores the title as `name`, the other
/// two as `topic`); the select list aliases both to `title` so one row type
/// covers all three.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

fn table(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Course => "courses",
        EventKind::Webinar => "webinars",
        EventKind::Conference => "conferences",
    }
}

fn title_column(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Course | EventKind::Webinar => "topic",
        EventKind::Conference => "name",
    }
}

/// Select list yielding the unified `EventRecord` shape. Only `webinars`
/// has a `bank_detail_id` column; the other tables surface a typed NULL.
fn select_columns(kind: EventKind) -> String {
    let bank = match kind {
        EventKind::Webinar => "bank_detail_id",
        _ => "NULL::bigint AS bank_detail_id",
    };
    format!(
        "id, '{tag}' AS kind, {title} AS title, description, objectives, date, duration, \
         organized_by, sponsored_by, link, member_price, guest_price, resident_price, \
         {bank}, created_at, updated_at",
        tag = kind.tag(),
        title = title_column(kind),
    )
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, draft, description), fields(db.operation = "insert", event_kind = %kind))]
    pub async fn create(
        &self,
        kind: EventKind,
        draft: &EventDraft,
        date: DateTime<Utc>,
        description: &str,
    ) -> Result<EventRecord, AppError> {
        let sql = if kind == EventKind::Webinar {
            format!(
                r#"
                INSERT INTO {table} (
                    {title}, description, objectives, date, duration,
                    organized_by, sponsored_by, link,
                    member_price, guest_price, resident_price, bank_detail_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING {columns}
                "#,
                table = table(kind),
                title = title_column(kind),
                columns = select_columns(kind),
            )
        } else {
            format!(
                r#"
                INSERT INTO {table} (
                    {title}, description, objectives, date, duration,
                    organized_by, sponsored_by, link,
                    member_price, guest_price, resident_price
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING {columns}
                "#,
                table = table(kind),
                title = title_column(kind),
                columns = select_columns(kind),
            )
        };

        let mut query = sqlx::query_as::<_, EventRecord>(&sql)
            .bind(&draft.title)
            .bind(description)
            .bind(&draft.objectives)
            .bind(date)
            .bind(draft.duration)
            .bind(&draft.organized_by)
            .bind(&draft.sponsored_by)
            .bind(&draft.link)
            .bind(draft.member_price)
            .bind(draft.guest_price)
            .bind(draft.resident_price);
        if kind == EventKind::Webinar {
            query = query.bind(draft.bank_detail_id);
        }

        let row = query.fetch_one(&self.pool).await?;
        Ok(row)
    }

    #[tracing::instrument(skip(self, draft, description), fields(db.operation = "update", event_kind = %kind))]
    pub async fn update(
        &self,
        kind: EventKind,
        id: i64,
        draft: &EventDraft,
        date: DateTime<Utc>,
        description: &str,
    ) -> Result<Option<EventRecord>, AppError> {
        let sql = if kind == EventKind::Webinar {
            format!(
                r#"
                UPDATE {table} SET
                    {title} = $2, description = $3, objectives = $4, date = $5,
                    duration = $6, organized_by = $7, sponsored_by = $8, link = $9,
                    member_price = $10, guest_price = $11, resident_price = $12,
                    bank_detail_id = $13, updated_at = NOW()
                WHERE id = $1
                RETURNING {columns}
                "#,
                table = table(kind),
                title = title_column(kind),
                columns = select_columns(kind),
            )
        } else {
            format!(
                r#"
                UPDATE {table} SET
                    {title} = $2, description = $3, objectives = $4, date = $5,
                    duration = $6, organized_by = $7, sponsored_by = $8, link = $9,
                    member_price = $10, guest_price = $11, resident_price = $12,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING {columns}
                "#,
                table = table(kind),
                title = title_column(kind),
                columns = select_columns(kind),
            )
        };

        let mut query = sqlx::query_as::<_, EventRecord>(&sql)
            .bind(id)
            .bind(&draft.title)
            .bind(description)
            .bind(&draft.objectives)
            .bind(date)
            .bind(draft.duration)
            .bind(&draft.organized_by)
            .bind(&draft.sponsored_by)
            .bind(&draft.link)
            .bind(draft.member_price)
            .bind(draft.guest_price)
            .bind(draft.resident_price);
        if kind == EventKind::Webinar {
            query = query.bind(draft.bank_detail_id);
        }

        let row = query.fetch_optional(&self.pool).await?;
        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.operation = "select", event_kind = %kind))]
    pub async fn get(&self, kind: EventKind, id: i64) -> Result<Option<EventRecord>, AppError> {
        let sql = format!(
            "SELECT {columns} FROM {table} WHERE id = $1",
            columns = select_columns(kind),
            table = table(kind),
        );

        let row = sqlx::query_as::<_, EventRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.operation = "select", event_kind = %kind))]
    pub async fn exists(&self, kind: EventKind, id: i64) -> Result<bool, AppError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)",
            table = table(kind),
        );

        let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(exists)
    }

    /// Newest first; `search` matches the title or description.
    #[tracing::instrument(skip(self), fields(db.operation = "select", event_kind = %kind))]
    pub async fn list(
        &self,
        kind: EventKind,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventRecord>, AppError> {
        let sql = format!(
            r#"
            SELECT {columns} FROM {table}
            WHERE $1::text IS NULL
               OR {title} ILIKE '%' || $1 || '%'
               OR description ILIKE '%' || $1 || '%'
            ORDER BY date DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
            columns = select_columns(kind),
            table = table(kind),
            title = title_column(kind),
        );

        let rows = sqlx::query_as::<_, EventRecord>(&sql)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Delete the event row only. Media cleanup happens above this layer,
    /// before the row goes away.
    #[tracing::instrument(skip(self), fields(db.operation = "delete", event_kind = %kind))]
    pub async fn delete_row(&self, kind: EventKind, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {table} WHERE id = $1", table = table(kind));

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
