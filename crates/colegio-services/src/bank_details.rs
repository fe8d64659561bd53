//! Bank detail lifecycle
//!
//! Account and CLABE numbers are checked by `validation::bank` (at least one
//! present, shape rules, Luhn on 16-digit card numbers). Every save stamps
//! `updated_by` from the injected actor, falling back to the system actor
//! when none is present.

use colegio_core::models::{BankDetail, BankDetailDraft};
use colegio_core::validation::validate_bank_detail_numbers;
use colegio_core::AppError;
use colegio_db::BankDetailRepository;
use validator::Validate;

#[derive(Clone)]
pub struct BankDetailService {
    bank_details: BankDetailRepository,
    system_user_id: i64,
}

impl BankDetailService {
    pub fn new(bank_details: BankDetailRepository, system_user_id: i64) -> Self {
        Self {
            bank_details,
            system_user_id,
        }
    }

    fn actor(&self, actor_id: Option<i64>) -> i64 {
        actor_id.unwrap_or(self.system_user_id)
    }

    fn check(draft: &BankDetailDraft) -> Result<(), AppError> {
        draft.validate()?;
        validate_bank_detail_numbers(
            draft.account_number.as_deref(),
            draft.clabe_number.as_deref(),
        )
    }

    pub async fn create(
        &self,
        draft: BankDetailDraft,
        actor_id: Option<i64>,
    ) -> Result<BankDetail, AppError> {
        Self::check(&draft)?;
        self.bank_details.create(&draft, self.actor(actor_id)).await
    }

    pub async fn update(
        &self,
        id: i64,
        draft: BankDetailDraft,
        actor_id: Option<i64>,
    ) -> Result<BankDetail, AppError> {
        Self::check(&draft)?;
        self.bank_details
            .update(id, &draft, self.actor(actor_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bank detail {} not found", id)))
    }

    pub async fn get(&self, id: i64) -> Result<BankDetail, AppError> {
        self.bank_details
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bank detail {} not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<BankDetail>, AppError> {
        self.bank_details.list().await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.bank_details.delete_row(id).await? {
            return Err(AppError::NotFound(format!("Bank detail {} not found", id)));
        }
        Ok(())
    }
}
