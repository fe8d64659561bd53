//! Repository integration tests
//!
//! These run against a real PostgreSQL instance named by `DATABASE_URL`
//! (migrations from the workspace `migrations/` directory are applied on
//! connect), so they are ignored by default:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test -p colegio-db -- --ignored
//! ```

use chrono::{TimeZone, Utc};
use colegio_core::models::{BannerDraft, EventDraft, NewAttachment, ReorderItem};
use colegio_core::{AppError, EntityKind, EntityRef, EventKind};
use colegio_db::{
    AttachmentRows, BannerRepository, EventRepository, MorphResolver, PostgresAttachmentRepository,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::path::Path;

async fn test_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for ignored tests");
    let pool = PgPool::connect(&url).await.expect("connect");

    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .expect("load migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    pool
}

fn event_draft(title: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: Some("Taller presencial".to_string()),
        objectives: None,
        date: chrono::NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
        time: chrono::NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
        duration: Decimal::new(25, 1),
        organized_by: "Comite academico".to_string(),
        sponsored_by: None,
        link: None,
        member_price: Decimal::new(50000, 2),
        guest_price: Some(Decimal::new(75000, 2)),
        resident_price: None,
        bank_detail_id: None,
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_event_create_get_and_title_aliasing() {
    let pool = test_pool().await;
    let repo = EventRepository::new(pool);
    let when = Utc.with_ymd_and_hms(2025, 6, 12, 18, 30, 0).unwrap();

    for kind in EventKind::ALL {
        let created = repo
            .create(kind, &event_draft("Actualizacion en cardiologia"), when, "Taller presencial")
            .await
            .unwrap();
        assert_eq!(created.kind, kind);
        assert_eq!(created.title, "Actualizacion en cardiologia");
        assert_eq!(created.bank_detail_id, None);

        let fetched = repo.get(kind, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, created.title);

        assert!(repo.delete_row(kind, created.id).await.unwrap());
        assert!(repo.get(kind, created.id).await.unwrap().is_none());
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_banner_reorder_is_all_or_nothing() {
    let pool = test_pool().await;
    let repo = BannerRepository::new(pool);

    let draft = BannerDraft {
        link: None,
        order: 1,
        is_active: true,
    };
    let a = repo.create(&draft).await.unwrap();
    let b = repo
        .create(&BannerDraft { order: 2, ..draft.clone() })
        .await
        .unwrap();

    // One bogus id: nothing moves.
    let err = repo
        .reorder(&[
            ReorderItem { id: a.id, order: 9 },
            ReorderItem { id: i64::MAX, order: 1 },
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(repo.get(a.id).await.unwrap().unwrap().order, 1);

    repo.reorder(&[
        ReorderItem { id: a.id, order: 2 },
        ReorderItem { id: b.id, order: 1 },
    ])
    .await
    .unwrap();
    assert_eq!(repo.get(a.id).await.unwrap().unwrap().order, 2);
    assert_eq!(repo.get(b.id).await.unwrap().unwrap().order, 1);

    repo.delete_row(a.id).await.unwrap();
    repo.delete_row(b.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_attachment_replace_collection_leaves_one_row() {
    let pool = test_pool().await;
    let banners = BannerRepository::new(pool.clone());
    let attachments = PostgresAttachmentRepository::new(pool);

    let banner = banners
        .create(&BannerDraft {
            link: None,
            order: 1,
            is_active: true,
        })
        .await
        .unwrap();

    let new = |file: &str| NewAttachment {
        owner_kind: EntityKind::Banner,
        owner_id: banner.id,
        collection_name: "banners".to_string(),
        disk: "public".to_string(),
        file_name: file.to_string(),
        mime_type: "image/png".to_string(),
        size: 10,
    };

    attachments.insert(new("first.png")).await.unwrap();
    let replacement = attachments.replace_collection(new("second.png")).await.unwrap();

    let rows = attachments
        .list_collection(EntityKind::Banner, banner.id, "banners")
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, replacement.id);
    assert_eq!(rows[0].file_name, "second.png");

    attachments.delete(replacement.id).await.unwrap();
    banners.delete_row(banner.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_resolver_distinguishes_unknown_tag_from_missing_row() {
    let pool = test_pool().await;
    let resolver = MorphResolver::new(pool);

    let err = resolver.resolve_tag("sessionable", 1).await.unwrap_err();
    assert!(matches!(err, AppError::UnknownTag { .. }));

    let err = resolver
        .resolve(EntityRef::new(EntityKind::Course, i64::MAX))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
