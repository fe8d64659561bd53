//! Attachment record
//!
//! One row per uploaded file, keyed by `(collection_name, owner_tag,
//! owner_id)`. Storage paths are derived from `(collection_name, owner_id,
//! id)`, never from the filename, so two uploads with the same name cannot
//! collide and cleanup is directory-based.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::morph::EntityKind;

/// An uploaded file handed to the attachment store by the (excluded) HTTP
/// layer. Scalar fields are assumed already sanitized; MIME acceptance is
/// enforced here because request validation cannot express per-collection
/// policy.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Stored attachment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Attachment {
    pub id: i64,
    pub owner_kind: EntityKind,
    pub owner_id: i64,
    pub collection_name: String,
    pub disk: String,
    pub file_name: String,
    pub mime_type: String,
    pub size: i64,
    /// Structured metadata written by the conversion pipeline.
    pub manipulations: JsonValue,
    pub custom_properties: JsonValue,
    pub generated_conversions: JsonValue,
    pub responsive_images: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting a new attachment row.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub owner_kind: EntityKind,
    pub owner_id: i64,
    pub collection_name: String,
    pub disk: String,
    pub file_name: String,
    pub mime_type: String,
    pub size: i64,
}
