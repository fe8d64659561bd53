//! Polymorphic reference resolution
//!
//! Resolves a stored `(type_tag, id)` pair to the concrete entity behind it.
//! Tag decoding is strict: a tag outside the closed map is an integrity
//! fault (`AppError::UnknownTag`), while a known tag pointing at a missing
//! row is an ordinary `NotFound`. The two never blur into each other.

use colegio_core::models::AnyEntity;
use colegio_core::{AppError, EntityKind, EntityRef, EventKind};
use sqlx::PgPool;

use super::attendees::AttendeeRepository;
use super::bank_details::BankDetailRepository;
use super::banners::BannerRepository;
use super::events::EventRepository;
use super::members::MemberRepository;
use super::news::NewsRepository;
use super::posts::PostRepository;
use super::users::UserRepository;

#[derive(Clone)]
pub struct MorphResolver {
    attendees: AttendeeRepository,
    bank_details: BankDetailRepository,
    banners: BannerRepository,
    events: EventRepository,
    members: MemberRepository,
    news: NewsRepository,
    posts: PostRepository,
    users: UserRepository,
}

impl MorphResolver {
    pub fn new(pool: PgPool) -> Self {
        Self {
            attendees: AttendeeRepository::new(pool.clone()),
            bank_details: BankDetailRepository::new(pool.clone()),
            banners: BannerRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            members: MemberRepository::new(pool.clone()),
            news: NewsRepository::new(pool.clone()),
            posts: PostRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Resolve a raw stored tag and id, as read from a polymorphic column.
    pub async fn resolve_tag(&self, tag: &str, id: i64) -> Result<AnyEntity, AppError> {
        let kind = EntityKind::from_tag(tag)?;
        self.resolve(EntityRef::new(kind, id)).await
    }

    /// Resolve a typed reference to the entity behind it.
    #[tracing::instrument(skip(self), fields(entity_kind = %entity_ref.kind, entity_id = entity_ref.id))]
    pub async fn resolve(&self, entity_ref: EntityRef) -> Result<AnyEntity, AppError> {
        let EntityRef { kind, id } = entity_ref;
        let entity = match kind {
            EntityKind::Attendee => self.attendees.get(id).await?.map(AnyEntity::Attendee),
            EntityKind::BankDetail => self.bank_details.get(id).await?.map(AnyEntity::BankDetail),
            EntityKind::Banner => self.banners.get(id).await?.map(AnyEntity::Banner),
            EntityKind::Conference => self
                .events
                .get(EventKind::Conference, id)
                .await?
                .map(AnyEntity::Conference),
            EntityKind::Course => self
                .events
                .get(EventKind::Course, id)
                .await?
                .map(AnyEntity::Course),
            EntityKind::Member => self.members.get(id).await?.map(AnyEntity::Member),
            EntityKind::News => self.news.get(id).await?.map(AnyEntity::News),
            EntityKind::Post => self.posts.get(id).await?.map(AnyEntity::Post),
            EntityKind::User => self.users.get(id).await?.map(AnyEntity::User),
            EntityKind::Webinar => self
                .events
                .get(EventKind::Webinar, id)
                .await?
                .map(AnyEntity::Webinar),
        };

        entity.ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind.tag(), id)))
    }

    /// Resolve a nullable reference. A `None` reference is an ordinary
    /// absent value (guest registrations), not an error.
    pub async fn resolve_optional(
        &self,
        entity_ref: Option<EntityRef>,
    ) -> Result<Option<AnyEntity>, AppError> {
        match entity_ref {
            Some(r) => Ok(Some(self.resolve(r).await?)),
            None => Ok(None),
        }
    }
}
