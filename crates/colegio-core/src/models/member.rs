//! Member entity
//!
//! Minimal person target for attendee references. Members are managed by a
//! separate membership system; this core only reads them to resolve
//! attendee registrations by CMEC member id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub cmec_member_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
