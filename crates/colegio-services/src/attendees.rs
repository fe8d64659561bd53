//! Attendee registration lifecycle
//!
//! Registrations point at one event (course, webinar or conference) and
//! optionally at a member resolved by CMEC id. Guests and residents carry no
//! person row. Diplomas are a single-file PDF collection, cleared before the
//! registration row is deleted.

use colegio_core::models::{Attendee, AttendeeDraft, UploadedFile};
use colegio_core::{AppError, EntityKind, EntityRef, PersonType};
use colegio_db::{AttendeeRepository, AttendeeWrite, EventRepository, MemberRepository};
use rust_decimal::Decimal;
use validator::Validate;

use crate::media_store::MediaAttachmentStore;

const DIPLOMAS: &str = "diplomas";

/// Attendee row plus the derived diploma URL.
#[derive(Debug, Clone)]
pub struct AttendeeDetail {
    pub attendee: Attendee,
    pub diploma_url: Option<String>,
}

#[derive(Clone)]
pub struct AttendeeService {
    attendees: AttendeeRepository,
    events: EventRepository,
    members: MemberRepository,
    media: MediaAttachmentStore,
}

impl AttendeeService {
    pub fn new(
        attendees: AttendeeRepository,
        events: EventRepository,
        members: MemberRepository,
        media: MediaAttachmentStore,
    ) -> Self {
        Self {
            attendees,
            events,
            members,
            media,
        }
    }

    /// Checks validation cannot express: the event must exist, the price must
    /// not be negative, and a member registration must resolve its CMEC id.
    async fn resolve_write(&self, draft: &AttendeeDraft) -> Result<AttendeeWrite, AppError> {
        draft.validate()?;

        if let Some(price) = draft.price {
            if price < Decimal::ZERO {
                return Err(AppError::InvalidInput(
                    "Price cannot be negative".to_string(),
                ));
            }
        }

        if !self.events.exists(draft.event_type, draft.event_id).await? {
            return Err(AppError::InvalidInput(format!(
                "{} {} does not exist",
                draft.event_type.tag(),
                draft.event_id
            )));
        }

        let person_id = match draft.person_type {
            PersonType::Member => {
                let cmec_id = draft.cmec_member_id.as_deref().ok_or_else(|| {
                    AppError::InvalidInput(
                        "A member registration requires a CMEC member id".to_string(),
                    )
                })?;
                let member = self
                    .members
                    .find_by_cmec_id(cmec_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::InvalidInput(format!("No member with CMEC id {}", cmec_id))
                    })?;
                Some(member.id)
            }
            PersonType::Guest | PersonType::Resident => None,
        };

        Ok(AttendeeWrite {
            event_type: draft.event_type,
            event_id: draft.event_id,
            person_type: draft.person_type,
            person_id,
            folio: draft.folio.clone(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            state: draft.state.clone(),
            city: draft.city.clone(),
            status: draft.status,
            price: draft.price,
            did_attend: draft.did_attend,
        })
    }

    pub async fn create(
        &self,
        draft: AttendeeDraft,
        diploma: Option<UploadedFile>,
    ) -> Result<Attendee, AppError> {
        let write = self.resolve_write(&draft).await?;
        let attendee = self.attendees.create(&write).await?;

        if let Some(file) = diploma {
            self.media
                .attach(Self::owner(attendee.id), DIPLOMAS, file)
                .await?;
        }
        Ok(attendee)
    }

    pub async fn update(
        &self,
        id: i64,
        draft: AttendeeDraft,
        diploma: Option<UploadedFile>,
    ) -> Result<Attendee, AppError> {
        let write = self.resolve_write(&draft).await?;
        let attendee = self
            .attendees
            .update(id, &write)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attendee {} not found", id)))?;

        if let Some(file) = diploma {
            self.media
                .attach(Self::owner(attendee.id), DIPLOMAS, file)
                .await?;
        }
        Ok(attendee)
    }

    pub async fn get(&self, id: i64) -> Result<AttendeeDetail, AppError> {
        let attendee = self
            .attendees
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attendee {} not found", id)))?;
        let diploma_url = self.media.url_for(Self::owner(id), DIPLOMAS).await?;
        Ok(AttendeeDetail {
            attendee,
            diploma_url,
        })
    }

    pub async fn list(
        &self,
        event_type: colegio_core::EventKind,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Attendee>, AppError> {
        self.attendees.list(event_type, search, limit, offset).await
    }

    /// Flip paid/pending. Cancelled registrations are left untouched.
    pub async fn toggle_status(&self, id: i64) -> Result<Attendee, AppError> {
        self.attendees
            .toggle_status(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attendee {} not found", id)))
    }

    pub async fn set_did_attend(&self, id: i64, did_attend: bool) -> Result<Attendee, AppError> {
        self.attendees
            .set_did_attend(id, did_attend)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attendee {} not found", id)))
    }

    /// Replace the registration's diploma and return its URL.
    pub async fn upload_diploma(&self, id: i64, file: UploadedFile) -> Result<String, AppError> {
        if self.attendees.get(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Attendee {} not found", id)));
        }
        let attachment = self.media.attach(Self::owner(id), DIPLOMAS, file).await?;
        Ok(self.media.url_of(&attachment))
    }

    /// Clear the diploma, then delete the row.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.attendees.get(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Attendee {} not found", id)));
        }
        self.media
            .clear_collection(Self::owner(id), DIPLOMAS)
            .await?;
        self.attendees.delete_row(id).await?;
        Ok(())
    }

    fn owner(id: i64) -> EntityRef {
        EntityRef::new(EntityKind::Attendee, id)
    }
}
