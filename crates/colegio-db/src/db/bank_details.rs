use colegio_core::models::{BankDetail, BankDetailDraft};
use colegio_core::AppError;
use sqlx::PgPool;

const BANK_DETAIL_COLUMNS: &str = "id, bank, account_number, clabe_number, reference, \
     beneficiary, subsidiary, updated_by, created_at, updated_at";

#[derive(Clone)]
pub struct BankDetailRepository {
    pool: PgPool,
}

impl BankDetailRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "bank_details", db.operation = "insert"))]
    pub async fn create(
        &self,
        draft: &BankDetailDraft,
        updated_by: i64,
    ) -> Result<BankDetail, AppError> {
        let row = sqlx::query_as::<_, BankDetail>(&format!(
            r#"
            INSERT INTO bank_details (
                bank, account_number, clabe_number, reference,
                beneficiary, subsidiary, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {BANK_DETAIL_COLUMNS}
            "#
        ))
        .bind(&draft.bank)
        .bind(&draft.account_number)
        .bind(&draft.clabe_number)
        .bind(&draft.reference)
        .bind(&draft.beneficiary)
        .bind(&draft.subsidiary)
        .bind(updated_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, draft), fields(db.table = "bank_details", db.operation = "update"))]
    pub async fn update(
        &self,
        id: i64,
        draft: &BankDetailDraft,
        updated_by: i64,
    ) -> Result<Option<BankDetail>, AppError> {
        let row = sqlx::query_as::<_, BankDetail>(&format!(
            r#"
            UPDATE bank_details SET
                bank = $2, account_number = $3, clabe_number = $4, reference = $5,
                beneficiary = $6, subsidiary = $7, updated_by = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {BANK_DETAIL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&draft.bank)
        .bind(&draft.account_number)
        .bind(&draft.clabe_number)
        .bind(&draft.reference)
        .bind(&draft.beneficiary)
        .bind(&draft.subsidiary)
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "bank_details", db.operation = "select"))]
    pub async fn get(&self, id: i64) -> Result<Option<BankDetail>, AppError> {
        let row = sqlx::query_as::<_, BankDetail>(&format!(
            "SELECT {BANK_DETAIL_COLUMNS} FROM bank_details WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "bank_details", db.operation = "select"))]
    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bank_details WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    #[tracing::instrument(skip(self), fields(db.table = "bank_details", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<BankDetail>, AppError> {
        let rows = sqlx::query_as::<_, BankDetail>(&format!(
            "SELECT {BANK_DETAIL_COLUMNS} FROM bank_details ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self), fields(db.table = "bank_details", db.operation = "delete"))]
    pub async fn delete_row(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bank_details WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
