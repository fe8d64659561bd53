//! Storage backends for attachment files
//!
//! Attachments live in a deterministic directory tree:
//!
//! ```text
//! {collection_name}/{owner_id}/{attachment_id}/{file_name}
//! {collection_name}/{owner_id}/{attachment_id}/conversions/...
//! {collection_name}/{owner_id}/{attachment_id}/responsive/...
//! ```
//!
//! Paths are derived from ids, never from filenames, so cleanup is
//! directory-based: removing an attachment removes its directory, and the
//! owner's collection directory is removed once nothing remains in it.

pub mod keys;
pub mod local;
pub mod traits;

pub use keys::{attachment_dir, conversions_dir, file_key, owner_dir, responsive_dir};
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
