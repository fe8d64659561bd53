//! Event-like entities: courses, webinars and conferences
//!
//! The three kinds share one record shape; conferences title their rows
//! `name` instead of `topic` at the storage level, the repository aliases
//! both to `title`. Only webinars carry a direct bank-detail foreign key
//! (payment instructions shown during registration).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::morph::EventKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct EventRecord {
    pub id: i64,
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub objectives: Option<String>,
    /// Event date and start time combined into one timestamp at write time.
    pub date: DateTime<Utc>,
    pub duration: Decimal,
    pub organized_by: String,
    pub sponsored_by: Option<String>,
    pub link: Option<String>,
    pub member_price: Decimal,
    pub guest_price: Option<Decimal>,
    pub resident_price: Option<Decimal>,
    /// Webinars only; always None for courses and conferences.
    pub bank_detail_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sanitized event fields. `date` and `time` arrive separately and are
/// combined into the stored timestamp by the service.
#[derive(Debug, Clone, Validate)]
pub struct EventDraft {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    pub objectives: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: Decimal,
    #[validate(length(min = 1, max = 255))]
    pub organized_by: String,
    #[validate(length(max = 255))]
    pub sponsored_by: Option<String>,
    #[validate(url)]
    pub link: Option<String>,
    pub member_price: Decimal,
    pub guest_price: Option<Decimal>,
    pub resident_price: Option<Decimal>,
    /// Only meaningful for webinars; rejected for other kinds at save time.
    pub bank_detail_id: Option<i64>,
}
