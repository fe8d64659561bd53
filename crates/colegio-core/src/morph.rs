//! Entity-kind tags and polymorphic references
//!
//! A stored polymorphic reference is a `(type_tag, id)` pair. Tags come from
//! the closed mapping below, never from a type's own name, so renaming a Rust
//! type does not break stored references. The map is append-only in practice:
//! removing or renaming a tag silently invalidates every stored reference
//! that points at it, and nothing at runtime can detect that. Add kinds at
//! the end, never repurpose a tag.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Closed set of entity kinds that can participate in polymorphic
/// references, either as a reference target or as a media owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "attendee"))]
    Attendee,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "bank_detail"))]
    BankDetail,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "banner"))]
    Banner,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "conference"))]
    Conference,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "course"))]
    Course,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "member"))]
    Member,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "news"))]
    News,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "post"))]
    Post,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "user"))]
    User,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "webinar"))]
    Webinar,
}

impl EntityKind {
    /// All participating kinds, in tag order.
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Attendee,
        EntityKind::BankDetail,
        EntityKind::Banner,
        EntityKind::Conference,
        EntityKind::Course,
        EntityKind::Member,
        EntityKind::News,
        EntityKind::Post,
        EntityKind::User,
        EntityKind::Webinar,
    ];

    /// Canonical short tag used when a reference is written.
    /// Pure and total over the closed set.
    pub const fn tag(&self) -> &'static str {
        match self {
            EntityKind::Attendee => "attendee",
            EntityKind::BankDetail => "bank_detail",
            EntityKind::Banner => "banner",
            EntityKind::Conference => "conference",
            EntityKind::Course => "course",
            EntityKind::Member => "member",
            EntityKind::News => "news",
            EntityKind::Post => "post",
            EntityKind::User => "user",
            EntityKind::Webinar => "webinar",
        }
    }

    /// Resolve a stored tag back to its kind.
    ///
    /// A tag missing from the map means the stored data no longer matches
    /// the compiled mapping (schema drift); that is surfaced as
    /// `AppError::UnknownTag`, never as a plain not-found.
    pub fn from_tag(tag: &str) -> Result<EntityKind, AppError> {
        match tag {
            "attendee" => Ok(EntityKind::Attendee),
            "bank_detail" => Ok(EntityKind::BankDetail),
            "banner" => Ok(EntityKind::Banner),
            "conference" => Ok(EntityKind::Conference),
            "course" => Ok(EntityKind::Course),
            "member" => Ok(EntityKind::Member),
            "news" => Ok(EntityKind::News),
            "post" => Ok(EntityKind::Post),
            "user" => Ok(EntityKind::User),
            "webinar" => Ok(EntityKind::Webinar),
            other => Err(AppError::UnknownTag {
                tag: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A polymorphic reference: which kind, and which row of that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }
}

/// Event-like kinds an attendee can register for. Narrower than
/// `EntityKind`: attendee writes are validated against this closed set even
/// though the reference mechanism itself is general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Course,
    Webinar,
    Conference,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Course, EventKind::Webinar, EventKind::Conference];

    pub const fn entity_kind(&self) -> EntityKind {
        match self {
            EventKind::Course => EntityKind::Course,
            EventKind::Webinar => EntityKind::Webinar,
            EventKind::Conference => EntityKind::Conference,
        }
    }

    pub const fn tag(&self) -> &'static str {
        self.entity_kind().tag()
    }

    pub fn from_tag(tag: &str) -> Result<EventKind, AppError> {
        match EntityKind::from_tag(tag)? {
            EntityKind::Course => Ok(EventKind::Course),
            EntityKind::Webinar => Ok(EventKind::Webinar),
            EntityKind::Conference => Ok(EventKind::Conference),
            other => Err(AppError::InvalidInput(format!(
                "{} is not an event kind",
                other.tag()
            ))),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Person-like kinds an attendee can be. Guests and residents have no
/// backing person row, so an attendee's person reference is nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    Member,
    Guest,
    Resident,
}

impl PersonType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PersonType::Member => "member",
            PersonType::Guest => "guest",
            PersonType::Resident => "resident",
        }
    }

    pub fn parse(s: &str) -> Result<PersonType, AppError> {
        match s {
            "member" => Ok(PersonType::Member),
            "guest" => Ok(PersonType::Guest),
            "resident" => Ok(PersonType::Resident),
            other => Err(AppError::InvalidInput(format!(
                "{} is not a valid person type",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip_for_every_kind() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_tag(kind.tag()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_tag_is_integrity_fault() {
        let err = EntityKind::from_tag("nonexistent_tag").unwrap_err();
        assert!(matches!(err, AppError::UnknownTag { ref tag } if tag == "nonexistent_tag"));
    }

    #[test]
    fn test_tag_is_not_type_name() {
        // The tag is the stable storage identifier, decoupled from the Rust
        // type name.
        assert_eq!(EntityKind::BankDetail.tag(), "bank_detail");
        assert_ne!(EntityKind::BankDetail.tag(), "BankDetail");
    }

    #[test]
    fn test_event_kind_rejects_non_event_tags() {
        assert!(EventKind::from_tag("course").is_ok());
        assert!(EventKind::from_tag("webinar").is_ok());
        assert!(EventKind::from_tag("conference").is_ok());
        let err = EventKind::from_tag("banner").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        // Unknown tags still fault as UnknownTag, not InvalidInput.
        let err = EventKind::from_tag("payment").unwrap_err();
        assert!(matches!(err, AppError::UnknownTag { .. }));
    }

    #[test]
    fn test_person_type_parse() {
        assert_eq!(PersonType::parse("guest").unwrap(), PersonType::Guest);
        assert!(PersonType::parse("sponsor").is_err());
    }
}
