//! Colegio Core Library
//!
//! This crate provides the domain models, entity-kind mapping, media
//! collection configuration, error types and validation shared across all
//! colegio components.

pub mod config;
pub mod constants;
pub mod error;
pub mod media_collections;
pub mod models;
pub mod morph;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use media_collections::{collection_config, collections_for, CollectionConfig};
pub use morph::{EntityKind, EntityRef, EventKind, PersonType};
