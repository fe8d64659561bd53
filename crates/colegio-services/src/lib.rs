//! Entity lifecycle services
//!
//! The media attachment store plus one service per admin resource. Services
//! own the operation ordering that repositories cannot see: defaults applied
//! before validation, media cleared before rows are deleted, the actor id
//! stamped on bank-detail saves.

pub mod attendees;
pub mod bank_details;
pub mod events;
pub mod media_store;
pub mod news;
pub mod publicity;
pub mod users;

pub use attendees::AttendeeService;
pub use bank_details::BankDetailService;
pub use events::EventService;
pub use media_store::MediaAttachmentStore;
pub use news::NewsService;
pub use publicity::{BannerService, PostService};
pub use users::UserService;
