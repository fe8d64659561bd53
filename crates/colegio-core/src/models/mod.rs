//! Domain models
//!
//! One module per entity kind, plus the attachment record shared by every
//! media-owning kind and the `AnyEntity` union produced by polymorphic
//! reference resolution.

pub mod attachment;
pub mod attendee;
pub mod bank_detail;
pub mod banner;
pub mod event;
pub mod member;
pub mod news;
pub mod post;
pub mod user;

pub use attachment::{Attachment, NewAttachment, UploadedFile};
pub use attendee::{Attendee, AttendeeDraft, AttendeeStatus};
pub use bank_detail::{BankDetail, BankDetailDraft};
pub use banner::{Banner, BannerDraft, ReorderItem};
pub use event::{EventDraft, EventRecord};
pub use member::Member;
pub use news::{News, NewsDraft, NewsType};
pub use post::{Post, PostDraft};
pub use user::{User, UserDraft, UserRole};

use crate::morph::EntityKind;

/// Union of every concrete entity a polymorphic reference can resolve to.
#[derive(Debug, Clone)]
pub enum AnyEntity {
    Attendee(Attendee),
    BankDetail(BankDetail),
    Banner(Banner),
    Conference(EventRecord),
    Course(EventRecord),
    Member(Member),
    News(News),
    Post(Post),
    User(User),
    Webinar(EventRecord),
}

impl AnyEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            AnyEntity::Attendee(_) => EntityKind::Attendee,
            AnyEntity::BankDetail(_) => EntityKind::BankDetail,
            AnyEntity::Banner(_) => EntityKind::Banner,
            AnyEntity::Conference(_) => EntityKind::Conference,
            AnyEntity::Course(_) => EntityKind::Course,
            AnyEntity::Member(_) => EntityKind::Member,
            AnyEntity::News(_) => EntityKind::News,
            AnyEntity::Post(_) => EntityKind::Post,
            AnyEntity::User(_) => EntityKind::User,
            AnyEntity::Webinar(_) => EntityKind::Webinar,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            AnyEntity::Attendee(e) => e.id,
            AnyEntity::BankDetail(e) => e.id,
            AnyEntity::Banner(e) => e.id,
            AnyEntity::Conference(e) => e.id,
            AnyEntity::Course(e) => e.id,
            AnyEntity::Member(e) => e.id,
            AnyEntity::News(e) => e.id,
            AnyEntity::Post(e) => e.id,
            AnyEntity::User(e) => e.id,
            AnyEntity::Webinar(e) => e.id,
        }
    }
}
