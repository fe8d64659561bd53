//! Attendee entity
//!
//! An attendee registers for exactly one event-like entity (course, webinar
//! or conference) through a polymorphic `event` reference, and optionally
//! points at a person record. Guests and residents have no backing person
//! row, so `person_id` is nullable; `person_type` is always stored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::morph::{EntityRef, EventKind, PersonType};

/// Payment status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum AttendeeStatus {
    Paid,
    Pending,
    Cancelled,
}

impl Default for AttendeeStatus {
    fn default() -> Self {
        AttendeeStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Attendee {
    pub id: i64,
    pub event_type: EventKind,
    pub event_id: i64,
    pub person_type: PersonType,
    pub person_id: Option<i64>,
    pub folio: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub city: String,
    pub status: AttendeeStatus,
    pub price: Option<Decimal>,
    pub did_attend: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attendee {
    /// The event this registration belongs to, as a polymorphic reference.
    pub fn event_ref(&self) -> EntityRef {
        EntityRef::new(self.event_type.entity_kind(), self.event_id)
    }

    /// The person behind this registration, if one exists. Guests resolve to
    /// `None`, which is an ordinary absent value, not an error.
    pub fn person_ref(&self) -> Option<EntityRef> {
        self.person_id
            .map(|id| EntityRef::new(crate::morph::EntityKind::Member, id))
    }
}

/// Sanitized attendee fields as produced by the (excluded) validation layer.
#[derive(Debug, Clone, Validate)]
pub struct AttendeeDraft {
    pub event_type: EventKind,
    pub event_id: i64,
    pub person_type: PersonType,
    /// CMEC member id, required when `person_type` is member; resolved to a
    /// member row id at save time.
    #[validate(length(max = 50))]
    pub cmec_member_id: Option<String>,
    #[validate(length(min = 1, max = 5))]
    pub folio: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 10, max = 20))]
    pub phone: String,
    #[validate(length(min = 1, max = 50))]
    pub state: String,
    #[validate(length(min = 1, max = 50))]
    pub city: String,
    pub status: AttendeeStatus,
    pub price: Option<Decimal>,
    pub did_attend: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::EntityKind;

    fn attendee(person_type: PersonType, person_id: Option<i64>) -> Attendee {
        Attendee {
            id: 1,
            event_type: EventKind::Webinar,
            event_id: 42,
            person_type,
            person_id,
            folio: "A-001".to_string(),
            name: "Ana Torres".to_string(),
            email: "ana@example.com".to_string(),
            phone: "5512345678".to_string(),
            state: "CDMX".to_string(),
            city: "CDMX".to_string(),
            status: AttendeeStatus::default(),
            price: None,
            did_attend: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_event_ref_uses_the_event_tag() {
        let a = attendee(PersonType::Guest, None);
        let r = a.event_ref();
        assert_eq!(r.kind, EntityKind::Webinar);
        assert_eq!(r.id, 42);
    }

    #[test]
    fn test_guest_person_is_an_ordinary_absent_value() {
        // A guest has no backing person row; that resolves to None, never an
        // error.
        assert!(attendee(PersonType::Guest, None).person_ref().is_none());

        let member = attendee(PersonType::Member, Some(7)).person_ref().unwrap();
        assert_eq!(member.kind, EntityKind::Member);
        assert_eq!(member.id, 7);
    }
}
