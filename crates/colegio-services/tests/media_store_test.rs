//! Media attachment store tests
//!
//! Exercise the store against an in-memory row store and a tempdir-backed
//! `LocalStorage`, so the full attach/replace/detach lifecycle runs without
//! a database.

use async_trait::async_trait;
use chrono::Utc;
use colegio_core::models::{Attachment, NewAttachment, UploadedFile};
use colegio_core::{AppError, EntityKind, EntityRef};
use colegio_db::AttachmentRows;
use colegio_services::MediaAttachmentStore;
use colegio_storage::{keys, LocalStorage, Storage};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

struct InMemoryRows {
    next_id: AtomicI64,
    rows: Mutex<Vec<Attachment>>,
}

impl InMemoryRows {
    fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            rows: Mutex::new(Vec::new()),
        }
    }

    fn row_from(&self, new: NewAttachment) -> Attachment {
        let now = Utc::now();
        Attachment {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            owner_kind: new.owner_kind,
            owner_id: new.owner_id,
            collection_name: new.collection_name,
            disk: new.disk,
            file_name: new.file_name,
            mime_type: new.mime_type,
            size: new.size,
            manipulations: serde_json::json!({}),
            custom_properties: serde_json::json!({}),
            generated_conversions: serde_json::json!({}),
            responsive_images: serde_json::json!([]),
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl AttachmentRows for InMemoryRows {
    async fn insert(&self, new: NewAttachment) -> Result<Attachment, AppError> {
        let row = self.row_from(new);
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<Attachment>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn list_collection(
        &self,
        owner_kind: EntityKind,
        owner_id: i64,
        collection_name: &str,
    ) -> Result<Vec<Attachment>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                r.owner_kind == owner_kind
                    && r.owner_id == owner_id
                    && r.collection_name == collection_name
            })
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }

    async fn replace_collection(&self, new: NewAttachment) -> Result<Attachment, AppError> {
        let row = self.row_from(new);
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|r| {
            !(r.owner_kind == row.owner_kind
                && r.owner_id == row.owner_id
                && r.collection_name == row.collection_name)
        });
        rows.push(row.clone());
        Ok(row)
    }
}

async fn store(dir: &TempDir) -> (MediaAttachmentStore, Arc<LocalStorage>) {
    let storage = Arc::new(
        LocalStorage::new(dir.path(), "http://localhost:8000/storage".to_string())
            .await
            .unwrap(),
    );
    let rows: Arc<dyn AttachmentRows> = Arc::new(InMemoryRows::new());
    (MediaAttachmentStore::new(rows, storage.clone()), storage)
}

fn png(name: &str) -> UploadedFile {
    UploadedFile::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
}

fn pdf(name: &str) -> UploadedFile {
    UploadedFile::new(name, "application/pdf", b"%PDF-1.4".to_vec())
}

#[tokio::test]
async fn test_single_file_replace_leaves_exactly_one_directory() {
    let dir = TempDir::new().unwrap();
    let (store, storage) = store(&dir).await;
    let owner = EntityRef::new(EntityKind::Banner, 7);

    let first = store.attach(owner, "banners", png("first.png")).await.unwrap();
    let second = store.attach(owner, "banners", png("second.png")).await.unwrap();
    assert_ne!(first.id, second.id);

    // Exactly one row, and the first attachment's directory is gone.
    let rows = store.list(owner, "banners").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, second.id);

    let first_key = keys::file_key("banners", 7, first.id, "first.png");
    let second_key = keys::file_key("banners", 7, second.id, "second.png");
    assert!(!storage.exists(&first_key).await.unwrap());
    assert!(storage.exists(&second_key).await.unwrap());
}

#[tokio::test]
async fn test_unsupported_mime_has_zero_side_effects() {
    let dir = TempDir::new().unwrap();
    let (store, storage) = store(&dir).await;
    let owner = EntityRef::new(EntityKind::Attendee, 3);

    let err = store
        .attach(owner, "diplomas", png("diploma.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedMimeType { .. }));

    assert!(store.list(owner, "diplomas").await.unwrap().is_empty());
    assert!(storage.dir_is_empty(&keys::owner_dir("diplomas", 3)).await.unwrap());
}

#[tokio::test]
async fn test_unknown_collection_is_a_configuration_fault() {
    let dir = TempDir::new().unwrap();
    let (store, _) = store(&dir).await;
    let owner = EntityRef::new(EntityKind::Banner, 1);

    let err = store.attach(owner, "posters", png("a.png")).await.unwrap_err();
    assert!(matches!(err, AppError::UnknownCollection { .. }));

    // Kinds without media reject every collection name.
    let err = store
        .attach(EntityRef::new(EntityKind::User, 1), "avatars", png("a.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownCollection { .. }));
}

#[tokio::test]
async fn test_attach_many_appends_in_order() {
    let dir = TempDir::new().unwrap();
    let (store, _) = store(&dir).await;
    let owner = EntityRef::new(EntityKind::Course, 11);

    store
        .attach_many(owner, "courses_gallery", vec![png("a.png"), png("b.png")])
        .await
        .unwrap();
    store
        .attach_many(owner, "courses_gallery", vec![png("c.png")])
        .await
        .unwrap();

    let names: Vec<String> = store
        .list(owner, "courses_gallery")
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.file_name)
        .collect();
    assert_eq!(names, vec!["a.png", "b.png", "c.png"]);

    // Single-file collections reject batch appends.
    let err = store
        .attach_many(owner, "courses_covers", vec![png("x.png")])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn test_attach_many_validates_every_mime_before_storing() {
    let dir = TempDir::new().unwrap();
    let (store, _) = store(&dir).await;
    let owner = EntityRef::new(EntityKind::Course, 12);

    let err = store
        .attach_many(
            owner,
            "courses_gallery",
            vec![png("ok.png"), pdf("bad.pdf")],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedMimeType { .. }));
    assert!(store.list(owner, "courses_gallery").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_clear_collection_removes_rows_and_owner_directory() {
    let dir = TempDir::new().unwrap();
    let (store, storage) = store(&dir).await;
    let owner = EntityRef::new(EntityKind::Webinar, 4);

    store
        .attach_many(owner, "webinars_gallery", vec![png("a.png"), png("b.png")])
        .await
        .unwrap();
    store.clear_collection(owner, "webinars_gallery").await.unwrap();

    assert!(store.list(owner, "webinars_gallery").await.unwrap().is_empty());
    assert!(!storage.exists(&keys::owner_dir("webinars_gallery", 4)).await.unwrap());
}

#[tokio::test]
async fn test_detach_one_and_owner_directory_lifecycle() {
    let dir = TempDir::new().unwrap();
    let (store, storage) = store(&dir).await;
    let owner = EntityRef::new(EntityKind::Conference, 9);

    let attached = store
        .attach_many(
            owner,
            "conferences_gallery",
            vec![png("a.png"), png("b.png")],
        )
        .await
        .unwrap();

    // Detaching one of two leaves the owner directory in place.
    assert!(store
        .detach_one(owner, "conferences_gallery", attached[0].id)
        .await
        .unwrap());
    assert!(!storage
        .dir_is_empty(&keys::owner_dir("conferences_gallery", 9))
        .await
        .unwrap());

    // Detaching the last removes the owner directory too.
    assert!(store
        .detach_one(owner, "conferences_gallery", attached[1].id)
        .await
        .unwrap());
    assert!(!storage
        .exists(&keys::owner_dir("conferences_gallery", 9))
        .await
        .unwrap());

    // Unknown id is an ordinary false, not a fault.
    assert!(!store
        .detach_one(owner, "conferences_gallery", 9999)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_detach_one_rejects_foreign_attachments() {
    let dir = TempDir::new().unwrap();
    let (store, _) = store(&dir).await;
    let owner_a = EntityRef::new(EntityKind::Course, 1);
    let owner_b = EntityRef::new(EntityKind::Course, 2);

    let attached = store
        .attach_many(owner_a, "courses_gallery", vec![png("a.png")])
        .await
        .unwrap();

    // Another owner cannot detach it.
    assert!(!store
        .detach_one(owner_b, "courses_gallery", attached[0].id)
        .await
        .unwrap());
    assert_eq!(store.list(owner_a, "courses_gallery").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_urls_are_derived_without_filesystem_access() {
    let dir = TempDir::new().unwrap();
    let (store, _) = store(&dir).await;
    let owner = EntityRef::new(EntityKind::News, 5);

    assert!(store.url_for(owner, "news_images").await.unwrap().is_none());

    let attached = store
        .attach(owner, "news_images", png("portada.png"))
        .await
        .unwrap();
    let url = store.url_for(owner, "news_images").await.unwrap().unwrap();
    assert_eq!(
        url,
        format!(
            "http://localhost:8000/storage/news_images/5/{}/portada.png",
            attached.id
        )
    );
}

#[tokio::test]
async fn test_news_pdf_collection_tolerates_octet_stream() {
    let dir = TempDir::new().unwrap();
    let (store, _) = store(&dir).await;
    let owner = EntityRef::new(EntityKind::News, 6);

    let file = UploadedFile::new("boletin.pdf", "application/octet-stream", b"%PDF".to_vec());
    store.attach(owner, "news_pdfs", file).await.unwrap();
    assert_eq!(store.list(owner, "news_pdfs").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_filenames_are_sanitized_into_the_attachment_directory() {
    let dir = TempDir::new().unwrap();
    let (store, storage) = store(&dir).await;
    let owner = EntityRef::new(EntityKind::Banner, 8);

    let attached = store
        .attach(owner, "banners", png("../../etc/evil.png"))
        .await
        .unwrap();
    assert_eq!(attached.file_name, "evil.png");
    assert!(storage
        .exists(&keys::file_key("banners", 8, attached.id, "evil.png"))
        .await
        .unwrap());
}
