//! Publicity carousels: banners and posts
//!
//! Two identical carousels over separate tables and collections. Each item
//! carries a single image, a numeric order and an active flag; reorders are
//! all-or-nothing.

use colegio_core::models::{Banner, BannerDraft, Post, PostDraft, ReorderItem, UploadedFile};
use colegio_core::{AppError, EntityKind, EntityRef};
use colegio_db::{BannerRepository, PostRepository};
use validator::Validate;

use crate::media_store::MediaAttachmentStore;

const BANNERS: &str = "banners";
const POSTS: &str = "posts";

/// Carousel item plus its derived image URL.
#[derive(Debug, Clone)]
pub struct BannerDetail {
    pub banner: Banner,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct BannerService {
    banners: BannerRepository,
    media: MediaAttachmentStore,
}

impl BannerService {
    pub fn new(banners: BannerRepository, media: MediaAttachmentStore) -> Self {
        Self { banners, media }
    }

    fn owner(id: i64) -> EntityRef {
        EntityRef::new(EntityKind::Banner, id)
    }

    pub async fn create(
        &self,
        draft: BannerDraft,
        image: Option<UploadedFile>,
    ) -> Result<Banner, AppError> {
        draft.validate()?;
        let banner = self.banners.create(&draft).await?;
        if let Some(file) = image {
            self.media.attach(Self::owner(banner.id), BANNERS, file).await?;
        }
        Ok(banner)
    }

    pub async fn update(
        &self,
        id: i64,
        draft: BannerDraft,
        image: Option<UploadedFile>,
    ) -> Result<Banner, AppError> {
        draft.validate()?;
        let banner = self
            .banners
            .update(id, &draft)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Banner {} not found", id)))?;
        if let Some(file) = image {
            self.media.attach(Self::owner(id), BANNERS, file).await?;
        }
        Ok(banner)
    }

    pub async fn get(&self, id: i64) -> Result<BannerDetail, AppError> {
        let banner = self
            .banners
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Banner {} not found", id)))?;
        let image_url = self.media.url_for(Self::owner(id), BANNERS).await?;
        Ok(BannerDetail { banner, image_url })
    }

    pub async fn list(&self) -> Result<Vec<BannerDetail>, AppError> {
        let mut out = Vec::new();
        for banner in self.banners.list().await? {
            let image_url = self.media.url_for(Self::owner(banner.id), BANNERS).await?;
            out.push(BannerDetail { banner, image_url });
        }
        Ok(out)
    }

    /// All-or-nothing: fails without touching any row when an id is unknown.
    pub async fn reorder(&self, items: &[ReorderItem]) -> Result<(), AppError> {
        self.banners.reorder(items).await
    }

    pub async fn toggle_active(&self, id: i64) -> Result<Banner, AppError> {
        self.banners
            .toggle_active(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Banner {} not found", id)))
    }

    pub async fn remove_image(&self, id: i64) -> Result<(), AppError> {
        self.media.clear_collection(Self::owner(id), BANNERS).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.banners.get(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Banner {} not found", id)));
        }
        self.media.clear_collection(Self::owner(id), BANNERS).await?;
        self.banners.delete_row(id).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PostService {
    posts: PostRepository,
    media: MediaAttachmentStore,
}

impl PostService {
    pub fn new(posts: PostRepository, media: MediaAttachmentStore) -> Self {
        Self { posts, media }
    }

    fn owner(id: i64) -> EntityRef {
        EntityRef::new(EntityKind::Post, id)
    }

    pub async fn create(
        &self,
        draft: PostDraft,
        image: Option<UploadedFile>,
    ) -> Result<Post, AppError> {
        draft.validate()?;
        let post = self.posts.create(&draft).await?;
        if let Some(file) = image {
            self.media.attach(Self::owner(post.id), POSTS, file).await?;
        }
        Ok(post)
    }

    pub async fn update(
        &self,
        id: i64,
        draft: PostDraft,
        image: Option<UploadedFile>,
    ) -> Result<Post, AppError> {
        draft.validate()?;
        let post = self
            .posts
            .update(id, &draft)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;
        if let Some(file) = image {
            self.media.attach(Self::owner(id), POSTS, file).await?;
        }
        Ok(post)
    }

    pub async fn get(&self, id: i64) -> Result<PostDetail, AppError> {
        let post = self
            .posts
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;
        let image_url = self.media.url_for(Self::owner(id), POSTS).await?;
        Ok(PostDetail { post, image_url })
    }

    pub async fn list(&self) -> Result<Vec<PostDetail>, AppError> {
        let mut out = Vec::new();
        for post in self.posts.list().await? {
            let image_url = self.media.url_for(Self::owner(post.id), POSTS).await?;
            out.push(PostDetail { post, image_url });
        }
        Ok(out)
    }

    pub async fn reorder(&self, items: &[ReorderItem]) -> Result<(), AppError> {
        self.posts.reorder(items).await
    }

    pub async fn toggle_active(&self, id: i64) -> Result<Post, AppError> {
        self.posts
            .toggle_active(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))
    }

    pub async fn remove_image(&self, id: i64) -> Result<(), AppError> {
        self.media.clear_collection(Self::owner(id), POSTS).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.posts.get(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Post {} not found", id)));
        }
        self.media.clear_collection(Self::owner(id), POSTS).await?;
        self.posts.delete_row(id).await?;
        Ok(())
    }
}
