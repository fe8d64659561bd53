//! Banner entity (publicity carousel)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Banner {
    pub id: i64,
    pub link: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct BannerDraft {
    /// Absolute http/https URL when present.
    #[validate(url)]
    pub link: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

/// One element of a bulk reorder request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReorderItem {
    pub id: i64,
    pub order: i32,
}
