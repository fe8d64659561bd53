//! Repository implementations
//!
//! Each repository owns a `PgPool` clone and provides the CRUD operations
//! and specialized queries for one entity. The attachment repository is the
//! only one behind a trait: the media store is exercised against an
//! in-memory implementation in tests.

pub mod attachments;
pub mod attendees;
pub mod bank_details;
pub mod banners;
pub mod events;
pub mod members;
pub mod morph;
pub mod news;
pub mod pool;
pub mod posts;
pub mod transaction;
pub mod users;
