//! Database repositories for the data access layer
//!
//! One repository per entity, a shared attachment repository behind the
//! `AttachmentRows` trait, the polymorphic reference resolver, and
//! transaction utilities.

pub mod db;

pub use db::attachments::{AttachmentRows, PostgresAttachmentRepository};
pub use db::attendees::{AttendeeRepository, AttendeeWrite};
pub use db::bank_details::BankDetailRepository;
pub use db::banners::BannerRepository;
pub use db::events::EventRepository;
pub use db::members::MemberRepository;
pub use db::morph::MorphResolver;
pub use db::news::NewsRepository;
pub use db::pool::setup_database;
pub use db::posts::PostRepository;
pub use db::transaction::TransactionGuard;
pub use db::users::UserRepository;
