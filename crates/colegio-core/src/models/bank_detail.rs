//! Bank detail entity
//!
//! Payment collection accounts. `updated_by` records the user who last
//! saved the row and is stamped on every save, falling back to the system
//! actor when no authenticated user is present.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BankDetail {
    pub id: i64,
    pub bank: String,
    pub account_number: Option<String>,
    pub clabe_number: Option<String>,
    pub reference: Option<String>,
    pub beneficiary: Option<String>,
    pub subsidiary: Option<String>,
    pub updated_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sanitized bank-detail fields. The account/CLABE pair rules (at least one
/// present, mutually distinguishable shapes, Luhn on card numbers) are
/// enforced by `validation::bank`, not here.
#[derive(Debug, Clone, Validate)]
pub struct BankDetailDraft {
    #[validate(length(min = 1, max = 255))]
    pub bank: String,
    pub account_number: Option<String>,
    pub clabe_number: Option<String>,
    pub reference: Option<String>,
    pub beneficiary: Option<String>,
    pub subsidiary: Option<String>,
}
