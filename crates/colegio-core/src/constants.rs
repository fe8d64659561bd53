//! Shared constants

// Table names
pub const TABLE_ATTENDEES: &str = "attendees";
pub const TABLE_BANK_DETAILS: &str = "bank_details";
pub const TABLE_BANNERS: &str = "banners";
pub const TABLE_CONFERENCES: &str = "conferences";
pub const TABLE_COURSES: &str = "courses";
pub const TABLE_MEDIA: &str = "media";
pub const TABLE_MEMBERS: &str = "members";
pub const TABLE_NEWS: &str = "news";
pub const TABLE_POSTS: &str = "posts";
pub const TABLE_USERS: &str = "users";
pub const TABLE_WEBINARS: &str = "webinars";

/// Fallback actor id stamped into `updated_by` when no authenticated actor
/// is present (system-initiated saves, seeds, migrations).
pub const SYSTEM_USER_ID: i64 = 1;

/// Maximum length of an attendee folio.
pub const FOLIO_MAX_LEN: usize = 5;

/// Description default applied when an event is saved without one.
pub const DEFAULT_EVENT_DESCRIPTION: &str = "No disponible";
