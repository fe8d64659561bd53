//! Course, webinar and conference lifecycle
//!
//! One service covers the three event kinds; the repository dispatches on
//! `EventKind` underneath. The service owns the write-time rules the
//! repository cannot see: the description default, date and time combined
//! into one timestamp, the webinar-only bank-detail reference, and media
//! cleared before a row is deleted.

use chrono::{DateTime, TimeZone, Utc};
use colegio_core::constants::DEFAULT_EVENT_DESCRIPTION;
use colegio_core::models::{EventDraft, EventRecord, UploadedFile};
use colegio_core::{AppError, EntityRef, EventKind};
use colegio_db::{BankDetailRepository, EventRepository};
use validator::Validate;

use crate::media_store::MediaAttachmentStore;

/// The four media collections every event kind declares.
struct EventCollections {
    covers: &'static str,
    gallery: &'static str,
    sponsors_logos: &'static str,
    program: &'static str,
}

fn collections(kind: EventKind) -> EventCollections {
    match kind {
        EventKind::Course => EventCollections {
            covers: "courses_covers",
            gallery: "courses_gallery",
            sponsors_logos: "courses_sponsors_logos",
            program: "courses_program",
        },
        EventKind::Webinar => EventCollections {
            covers: "webinars_covers",
            gallery: "webinars_gallery",
            sponsors_logos: "webinars_sponsors_logos",
            program: "webinars_program",
        },
        EventKind::Conference => EventCollections {
            covers: "conferences_covers",
            gallery: "conferences_gallery",
            sponsors_logos: "conferences_sponsors_logos",
            program: "conferences_program",
        },
    }
}

/// Event row plus its derived media URLs, shaped for a detail page.
#[derive(Debug, Clone)]
pub struct EventDetail {
    pub event: EventRecord,
    pub cover_url: Option<String>,
    pub gallery_urls: Vec<String>,
    pub sponsors_logos_urls: Vec<String>,
    pub program_url: Option<String>,
}

/// One gallery entry, id included so single images can be detached.
#[derive(Debug, Clone)]
pub struct GalleryImage {
    pub id: i64,
    pub url: String,
}

/// Media changes accompanying an event save. Cover and program replace the
/// current file; gallery uploads append; sponsor logos, when present,
/// replace the whole set.
#[derive(Default)]
pub struct EventMediaUpdate {
    pub cover: Option<UploadedFile>,
    pub program: Option<UploadedFile>,
    pub gallery: Vec<UploadedFile>,
    pub sponsors_logos: Option<Vec<UploadedFile>>,
}

#[derive(Clone)]
pub struct EventService {
    events: EventRepository,
    bank_details: BankDetailRepository,
    media: MediaAttachmentStore,
}

impl EventService {
    pub fn new(
        events: EventRepository,
        bank_details: BankDetailRepository,
        media: MediaAttachmentStore,
    ) -> Self {
        Self {
            events,
            bank_details,
            media,
        }
    }

    fn combine_date_time(draft: &EventDraft) -> DateTime<Utc> {
        Utc.from_utc_datetime(&draft.date.and_time(draft.time))
    }

    fn effective_description(draft: &EventDraft) -> String {
        match &draft.description {
            Some(d) if !d.trim().is_empty() => d.clone(),
            _ => DEFAULT_EVENT_DESCRIPTION.to_string(),
        }
    }

    /// Only webinars reference a bank detail, and the reference must point
    /// at an existing row.
    async fn check_bank_detail(&self, kind: EventKind, draft: &EventDraft) -> Result<(), AppError> {
        match (kind, draft.bank_detail_id) {
            (EventKind::Webinar, Some(id)) => {
                if !self.bank_details.exists(id).await? {
                    return Err(AppError::InvalidInput(format!(
                        "Bank detail {} does not exist",
                        id
                    )));
                }
                Ok(())
            }
            (EventKind::Webinar, None) => Ok(()),
            (_, Some(_)) => Err(AppError::InvalidInput(
                "Only webinars can reference a bank detail".to_string(),
            )),
            (_, None) => Ok(()),
        }
    }

    pub async fn create(
        &self,
        kind: EventKind,
        draft: EventDraft,
        media: EventMediaUpdate,
    ) -> Result<EventRecord, AppError> {
        draft.validate()?;
        self.check_bank_detail(kind, &draft).await?;

        let event = self
            .events
            .create(
                kind,
                &draft,
                Self::combine_date_time(&draft),
                &Self::effective_description(&draft),
            )
            .await?;

        self.apply_media(kind, event.id, media).await?;
        Ok(event)
    }

    pub async fn update(
        &self,
        kind: EventKind,
        id: i64,
        draft: EventDraft,
        media: EventMediaUpdate,
    ) -> Result<EventRecord, AppError> {
        draft.validate()?;
        self.check_bank_detail(kind, &draft).await?;

        let event = self
            .events
            .update(
                kind,
                id,
                &draft,
                Self::combine_date_time(&draft),
                &Self::effective_description(&draft),
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind.tag(), id)))?;

        self.apply_media(kind, event.id, media).await?;
        Ok(event)
    }

    async fn apply_media(
        &self,
        kind: EventKind,
        id: i64,
        media: EventMediaUpdate,
    ) -> Result<(), AppError> {
        let owner = EntityRef::new(kind.entity_kind(), id);
        let cols = collections(kind);

        if let Some(cover) = media.cover {
            self.media.attach(owner, cols.covers, cover).await?;
        }
        if let Some(program) = media.program {
            self.media.attach(owner, cols.program, program).await?;
        }
        if !media.gallery.is_empty() {
            self.media
                .attach_many(owner, cols.gallery, media.gallery)
                .await?;
        }
        if let Some(logos) = media.sponsors_logos {
            // Sponsor logos are replaced as a set, not appended.
            self.media.clear_collection(owner, cols.sponsors_logos).await?;
            if !logos.is_empty() {
                self.media
                    .attach_many(owner, cols.sponsors_logos, logos)
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn get(&self, kind: EventKind, id: i64) -> Result<EventDetail, AppError> {
        let event = self
            .events
            .get(kind, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind.tag(), id)))?;

        let owner = EntityRef::new(kind.entity_kind(), id);
        let cols = collections(kind);

        Ok(EventDetail {
            cover_url: self.media.url_for(owner, cols.covers).await?,
            gallery_urls: self.media.urls_for(owner, cols.gallery).await?,
            sponsors_logos_urls: self.media.urls_for(owner, cols.sponsors_logos).await?,
            program_url: self.media.url_for(owner, cols.program).await?,
            event,
        })
    }

    pub async fn list(
        &self,
        kind: EventKind,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventRecord>, AppError> {
        self.events.list(kind, search, limit, offset).await
    }

    pub async fn gallery(&self, kind: EventKind, id: i64) -> Result<Vec<GalleryImage>, AppError> {
        let owner = EntityRef::new(kind.entity_kind(), id);
        let attachments = self.media.list(owner, collections(kind).gallery).await?;
        Ok(attachments
            .iter()
            .map(|a| GalleryImage {
                id: a.id,
                url: self.media.url_of(a),
            })
            .collect())
    }

    pub async fn gallery_append(
        &self,
        kind: EventKind,
        id: i64,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<GalleryImage>, AppError> {
        if !self.events.exists(kind, id).await? {
            return Err(AppError::NotFound(format!("{} {} not found", kind.tag(), id)));
        }
        let owner = EntityRef::new(kind.entity_kind(), id);
        let attached = self
            .media
            .attach_many(owner, collections(kind).gallery, files)
            .await?;
        Ok(attached
            .iter()
            .map(|a| GalleryImage {
                id: a.id,
                url: self.media.url_of(a),
            })
            .collect())
    }

    /// Detach one gallery image; false when the id is not in this event's
    /// gallery.
    pub async fn gallery_delete(
        &self,
        kind: EventKind,
        id: i64,
        attachment_id: i64,
    ) -> Result<bool, AppError> {
        let owner = EntityRef::new(kind.entity_kind(), id);
        self.media
            .detach_one(owner, collections(kind).gallery, attachment_id)
            .await
    }

    /// Clear all four collections, then delete the row. Media first, so a
    /// failed storage delete leaves the row (and a retry path) in place.
    pub async fn delete(&self, kind: EventKind, id: i64) -> Result<(), AppError> {
        if !self.events.exists(kind, id).await? {
            return Err(AppError::NotFound(format!("{} {} not found", kind.tag(), id)));
        }

        self.media
            .clear_all_collections(EntityRef::new(kind.entity_kind(), id))
            .await?;
        self.events.delete_row(kind, id).await?;
        Ok(())
    }
}
