use colegio_core::models::{Attendee, AttendeeStatus};
use colegio_core::{AppError, EventKind, PersonType};
use rust_decimal::Decimal;
use sqlx::PgPool;

const ATTENDEE_COLUMNS: &str = "id, event_type, event_id, person_type, person_id, folio, \
     name, email, phone, state, city, status, price, did_attend, created_at, updated_at";

/// Values ready for an attendee insert or update: defaults applied, the CMEC
/// member id already resolved to a member row id by the service.
#[derive(Debug, Clone)]
pub struct AttendeeWrite {
    pub event_type: EventKind,
    pub event_id: i64,
    pub person_type: PersonType,
    pub person_id: Option<i64>,
    pub folio: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub city: String,
    pub status: AttendeeStatus,
    pub price: Option<Decimal>,
    pub did_attend: bool,
}

#[derive(Clone)]
pub struct AttendeeRepository {
    pool: PgPool,
}

impl AttendeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, write), fields(db.table = "attendees", db.operation = "insert"))]
    pub async fn create(&self, write: &AttendeeWrite) -> Result<Attendee, AppError> {
        let row = sqlx::query_as::<_, Attendee>(&format!(
            r#"
            INSERT INTO attendees (
                event_type, event_id, person_type, person_id, folio,
                name, email, phone, state, city, status, price, did_attend
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {ATTENDEE_COLUMNS}
            "#
        ))
        .bind(write.event_type)
        .bind(write.event_id)
        .bind(write.person_type)
        .bind(write.person_id)
        .bind(&write.folio)
        .bind(&write.name)
        .bind(&write.email)
        .bind(&write.phone)
        .bind(&write.state)
        .bind(&write.city)
        .bind(write.status)
        .bind(write.price)
        .bind(write.did_attend)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, write), fields(db.table = "attendees", db.operation = "update"))]
    pub async fn update(&self, id: i64, write: &AttendeeWrite) -> Result<Option<Attendee>, AppError> {
        let row = sqlx::query_as::<_, Attendee>(&format!(
            r#"
            UPDATE attendees SET
                event_type = $2, event_id = $3, person_type = $4, person_id = $5,
                folio = $6, name = $7, email = $8, phone = $9, state = $10,
                city = $11, status = $12, price = $13, did_attend = $14,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ATTENDEE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(write.event_type)
        .bind(write.event_id)
        .bind(write.person_type)
        .bind(write.person_id)
        .bind(&write.folio)
        .bind(&write.name)
        .bind(&write.email)
        .bind(&write.phone)
        .bind(&write.state)
        .bind(&write.city)
        .bind(write.status)
        .bind(write.price)
        .bind(write.did_attend)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "attendees", db.operation = "select"))]
    pub async fn get(&self, id: i64) -> Result<Option<Attendee>, AppError> {
        let row = sqlx::query_as::<_, Attendee>(&format!(
            "SELECT {ATTENDEE_COLUMNS} FROM attendees WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Registrations for one event kind, newest first. `search` matches the
    /// attendee's name, email, state, city or the title of the event they
    /// registered for.
    #[tracing::instrument(skip(self), fields(db.table = "attendees", db.operation = "select"))]
    pub async fn list(
        &self,
        event_type: EventKind,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Attendee>, AppError> {
        let (table, title) = match event_type {
            EventKind::Course => ("courses", "topic"),
            EventKind::Webinar => ("webinars", "topic"),
            EventKind::Conference => ("conferences", "name"),
        };

        let sql = format!(
            r#"
            SELECT a.id, a.event_type, a.event_id, a.person_type, a.person_id, a.folio,
                   a.name, a.email, a.phone, a.state, a.city, a.status, a.price,
                   a.did_attend, a.created_at, a.updated_at
            FROM attendees a
            JOIN {table} e ON e.id = a.event_id
            WHERE a.event_type = $1
              AND ($2::text IS NULL
                   OR a.name ILIKE '%' || $2 || '%'
                   OR a.email ILIKE '%' || $2 || '%'
                   OR a.state ILIKE '%' || $2 || '%'
                   OR a.city ILIKE '%' || $2 || '%'
                   OR e.{title} ILIKE '%' || $2 || '%')
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT $3 OFFSET $4
            "#
        );

        let rows = sqlx::query_as::<_, Attendee>(&sql)
            .bind(event_type)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Flip the payment status between paid and pending. Cancelled rows are
    /// left alone; returns the updated row when one changed.
    #[tracing::instrument(skip(self), fields(db.table = "attendees", db.operation = "update"))]
    pub async fn toggle_status(&self, id: i64) -> Result<Option<Attendee>, AppError> {
        let row = sqlx::query_as::<_, Attendee>(&format!(
            r#"
            UPDATE attendees
            SET status = CASE status WHEN 'paid' THEN 'pending' ELSE 'paid' END,
                updated_at = NOW()
            WHERE id = $1 AND status <> 'cancelled'
            RETURNING {ATTENDEE_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "attendees", db.operation = "update"))]
    pub async fn set_did_attend(&self, id: i64, did_attend: bool) -> Result<Option<Attendee>, AppError> {
        let row = sqlx::query_as::<_, Attendee>(&format!(
            r#"
            UPDATE attendees SET did_attend = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {ATTENDEE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(did_attend)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Delete the attendee row only. Diploma cleanup happens above this
    /// layer, before the row goes away.
    #[tracing::instrument(skip(self), fields(db.table = "attendees", db.operation = "delete"))]
    pub async fn delete_row(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM attendees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
