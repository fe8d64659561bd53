//! Media attachment store
//!
//! Manages the files attached to an owner's named collections: per-collection
//! MIME policy, single-file replace semantics, appends, and directory-based
//! cleanup. Database rows live behind `AttachmentRows`; bytes live behind
//! `Storage`. The replace sequence is deletes-before-writes: a crash
//! mid-operation can leave an orphaned new file, never a stale old one that
//! would silently violate the single-file invariant.

use std::sync::Arc;

use colegio_core::media_collections::{collection_config, collections_for, CollectionConfig};
use colegio_core::models::{Attachment, NewAttachment, UploadedFile};
use colegio_core::{AppError, EntityRef};
use colegio_db::AttachmentRows;
use colegio_storage::{keys, Storage};

#[derive(Clone)]
pub struct MediaAttachmentStore {
    rows: Arc<dyn AttachmentRows>,
    storage: Arc<dyn Storage>,
}

impl MediaAttachmentStore {
    pub fn new(rows: Arc<dyn AttachmentRows>, storage: Arc<dyn Storage>) -> Self {
        Self { rows, storage }
    }

    fn config(owner: EntityRef, collection_name: &str) -> Result<&'static CollectionConfig, AppError> {
        collection_config(owner.kind, collection_name).ok_or_else(|| AppError::UnknownCollection {
            kind: owner.kind.tag().to_string(),
            collection: collection_name.to_string(),
        })
    }

    fn check_mime(config: &CollectionConfig, file: &UploadedFile) -> Result<(), AppError> {
        if !config.accepts(&file.content_type) {
            return Err(AppError::UnsupportedMimeType {
                collection: config.name.to_string(),
                mime: file.content_type.clone(),
            });
        }
        Ok(())
    }

    /// Attach one file. In single-file collections the previous attachment is
    /// superseded: its storage directory is deleted and its row replaced in
    /// the same database transaction as the new row's insert. MIME rejection
    /// happens before any side effect.
    #[tracing::instrument(skip(self, file), fields(owner_kind = %owner.kind, owner_id = owner.id, collection = collection_name))]
    pub async fn attach(
        &self,
        owner: EntityRef,
        collection_name: &str,
        file: UploadedFile,
    ) -> Result<Attachment, AppError> {
        let config = Self::config(owner, collection_name)?;
        Self::check_mime(config, &file)?;

        let new = NewAttachment {
            owner_kind: owner.kind,
            owner_id: owner.id,
            collection_name: collection_name.to_string(),
            disk: config.disk.to_string(),
            file_name: keys::sanitize_file_name(&file.file_name),
            mime_type: file.content_type.clone(),
            size: file.bytes.len() as i64,
        };

        let row = if config.is_single() {
            let previous = self
                .rows
                .list_collection(owner.kind, owner.id, collection_name)
                .await?;
            for old in &previous {
                self.storage
                    .delete_dir(&keys::attachment_dir(collection_name, owner.id, old.id))
                    .await?;
            }
            self.rows.replace_collection(new).await?
        } else {
            self.rows.insert(new).await?
        };

        self.write_file(&row, file.bytes).await?;
        Ok(row)
    }

    /// Append a batch to a multi-file collection. Every file's MIME type is
    /// validated before any is stored.
    #[tracing::instrument(skip(self, files), fields(owner_kind = %owner.kind, owner_id = owner.id, collection = collection_name, count = files.len()))]
    pub async fn attach_many(
        &self,
        owner: EntityRef,
        collection_name: &str,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<Attachment>, AppError> {
        let config = Self::config(owner, collection_name)?;
        if config.is_single() {
            return Err(AppError::InvalidInput(format!(
                "Collection {} holds a single file",
                collection_name
            )));
        }
        for file in &files {
            Self::check_mime(config, file)?;
        }

        let mut attached = Vec::with_capacity(files.len());
        for file in files {
            let row = self
                .rows
                .insert(NewAttachment {
                    owner_kind: owner.kind,
                    owner_id: owner.id,
                    collection_name: collection_name.to_string(),
                    disk: config.disk.to_string(),
                    file_name: keys::sanitize_file_name(&file.file_name),
                    mime_type: file.content_type.clone(),
                    size: file.bytes.len() as i64,
                })
                .await?;
            self.write_file(&row, file.bytes).await?;
            attached.push(row);
        }
        Ok(attached)
    }

    /// Write the attachment's bytes; on storage failure the just-inserted row
    /// and any partial directory are removed before the error propagates.
    async fn write_file(&self, row: &Attachment, bytes: Vec<u8>) -> Result<(), AppError> {
        let key = keys::file_key(&row.collection_name, row.owner_id, row.id, &row.file_name);
        if let Err(e) = self.storage.put(&key, bytes).await {
            let dir = keys::attachment_dir(&row.collection_name, row.owner_id, row.id);
            if let Err(cleanup) = self.storage.delete_dir(&dir).await {
                tracing::warn!(error = %cleanup, dir = %dir, "Cleanup after failed put also failed");
            }
            if let Err(cleanup) = self.rows.delete(row.id).await {
                tracing::warn!(error = %cleanup, attachment_id = row.id, "Row cleanup after failed put failed");
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Delete every attachment in the collection, rows and directories, then
    /// the owner's collection directory itself.
    #[tracing::instrument(skip(self), fields(owner_kind = %owner.kind, owner_id = owner.id, collection = collection_name))]
    pub async fn clear_collection(
        &self,
        owner: EntityRef,
        collection_name: &str,
    ) -> Result<(), AppError> {
        Self::config(owner, collection_name)?;

        let attachments = self
            .rows
            .list_collection(owner.kind, owner.id, collection_name)
            .await?;
        for attachment in attachments {
            self.storage
                .delete_dir(&keys::attachment_dir(collection_name, owner.id, attachment.id))
                .await?;
            self.rows.delete(attachment.id).await?;
        }

        self.storage
            .delete_dir(&keys::owner_dir(collection_name, owner.id))
            .await?;
        Ok(())
    }

    /// Remove one attachment from a collection. Returns false, not an error,
    /// when the id does not belong to this owner's collection; the caller
    /// surfaces that as an ordinary not-found. The owner's collection
    /// directory is removed too once nothing remains in it.
    #[tracing::instrument(skip(self), fields(owner_kind = %owner.kind, owner_id = owner.id, collection = collection_name))]
    pub async fn detach_one(
        &self,
        owner: EntityRef,
        collection_name: &str,
        attachment_id: i64,
    ) -> Result<bool, AppError> {
        Self::config(owner, collection_name)?;

        let attachment = match self.rows.get(attachment_id).await? {
            Some(a)
                if a.owner_kind == owner.kind
                    && a.owner_id == owner.id
                    && a.collection_name == collection_name =>
            {
                a
            }
            _ => return Ok(false),
        };

        self.storage
            .delete_dir(&keys::attachment_dir(collection_name, owner.id, attachment.id))
            .await?;
        self.rows.delete(attachment.id).await?;

        let owner_dir = keys::owner_dir(collection_name, owner.id);
        if self.storage.dir_is_empty(&owner_dir).await? {
            self.storage.delete_dir(&owner_dir).await?;
        }
        Ok(true)
    }

    /// All attachments of a collection, oldest first.
    pub async fn list(
        &self,
        owner: EntityRef,
        collection_name: &str,
    ) -> Result<Vec<Attachment>, AppError> {
        Self::config(owner, collection_name)?;
        Ok(self
            .rows
            .list_collection(owner.kind, owner.id, collection_name)
            .await?)
    }

    /// Public URL of a stored attachment, derived without filesystem access.
    pub fn url_of(&self, attachment: &Attachment) -> String {
        self.storage.url_for_key(&keys::file_key(
            &attachment.collection_name,
            attachment.owner_id,
            attachment.id,
            &attachment.file_name,
        ))
    }

    /// URL of a single-file collection's current attachment, if any.
    pub async fn url_for(
        &self,
        owner: EntityRef,
        collection_name: &str,
    ) -> Result<Option<String>, AppError> {
        let attachments = self.list(owner, collection_name).await?;
        Ok(attachments.first().map(|a| self.url_of(a)))
    }

    /// Ordered URLs of a multi-file collection.
    pub async fn urls_for(
        &self,
        owner: EntityRef,
        collection_name: &str,
    ) -> Result<Vec<String>, AppError> {
        let attachments = self.list(owner, collection_name).await?;
        Ok(attachments.iter().map(|a| self.url_of(a)).collect())
    }

    /// Clear every collection the owner's kind declares. Used right before
    /// the owning row is deleted.
    #[tracing::instrument(skip(self), fields(owner_kind = %owner.kind, owner_id = owner.id))]
    pub async fn clear_all_collections(&self, owner: EntityRef) -> Result<(), AppError> {
        for config in collections_for(owner.kind) {
            self.clear_collection(owner, config.name).await?;
        }
        Ok(())
    }
}
