use colegio_core::models::Member;
use colegio_core::AppError;
use sqlx::PgPool;

const MEMBER_COLUMNS: &str = "id, name, email, cmec_member_id, created_at, updated_at";

/// Read-only access to the members table. Member rows are written by a
/// separate membership system; this side only resolves them.
#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "members", db.operation = "select"))]
    pub async fn get(&self, id: i64) -> Result<Option<Member>, AppError> {
        let row = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Resolve a registration's CMEC member id to a member row.
    #[tracing::instrument(skip(self), fields(db.table = "members", db.operation = "select"))]
    pub async fn find_by_cmec_id(&self, cmec_member_id: &str) -> Result<Option<Member>, AppError> {
        let row = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE cmec_member_id = $1"
        ))
        .bind(cmec_member_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
