//! News lifecycle
//!
//! A news entry carries an independent single image and single PDF, each
//! replaceable and removable on its own. Deleting the entry clears both
//! collections first.

use colegio_core::models::{News, NewsDraft, UploadedFile};
use colegio_core::{AppError, EntityKind, EntityRef};
use colegio_db::NewsRepository;
use validator::Validate;

use crate::media_store::MediaAttachmentStore;

const NEWS_IMAGES: &str = "news_images";
const NEWS_PDFS: &str = "news_pdfs";

/// News row plus its derived media URLs.
#[derive(Debug, Clone)]
pub struct NewsDetail {
    pub news: News,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
}

#[derive(Clone)]
pub struct NewsService {
    news: NewsRepository,
    media: MediaAttachmentStore,
}

impl NewsService {
    pub fn new(news: NewsRepository, media: MediaAttachmentStore) -> Self {
        Self { news, media }
    }

    fn owner(id: i64) -> EntityRef {
        EntityRef::new(EntityKind::News, id)
    }

    async fn apply_media(
        &self,
        id: i64,
        image: Option<UploadedFile>,
        pdf: Option<UploadedFile>,
    ) -> Result<(), AppError> {
        if let Some(file) = image {
            self.media.attach(Self::owner(id), NEWS_IMAGES, file).await?;
        }
        if let Some(file) = pdf {
            self.media.attach(Self::owner(id), NEWS_PDFS, file).await?;
        }
        Ok(())
    }

    pub async fn create(
        &self,
        draft: NewsDraft,
        image: Option<UploadedFile>,
        pdf: Option<UploadedFile>,
    ) -> Result<News, AppError> {
        draft.validate()?;
        let news = self.news.create(&draft).await?;
        self.apply_media(news.id, image, pdf).await?;
        Ok(news)
    }

    pub async fn update(
        &self,
        id: i64,
        draft: NewsDraft,
        image: Option<UploadedFile>,
        pdf: Option<UploadedFile>,
    ) -> Result<News, AppError> {
        draft.validate()?;
        let news = self
            .news
            .update(id, &draft)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("News {} not found", id)))?;
        self.apply_media(id, image, pdf).await?;
        Ok(news)
    }

    pub async fn get(&self, id: i64) -> Result<NewsDetail, AppError> {
        let news = self
            .news
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("News {} not found", id)))?;
        Ok(NewsDetail {
            image_url: self.media.url_for(Self::owner(id), NEWS_IMAGES).await?,
            pdf_url: self.media.url_for(Self::owner(id), NEWS_PDFS).await?,
            news,
        })
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<News>, AppError> {
        self.news.list(search, limit, offset).await
    }

    pub async fn toggle_active(&self, id: i64) -> Result<News, AppError> {
        self.news
            .toggle_active(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("News {} not found", id)))
    }

    pub async fn remove_image(&self, id: i64) -> Result<(), AppError> {
        self.media.clear_collection(Self::owner(id), NEWS_IMAGES).await
    }

    pub async fn remove_pdf(&self, id: i64) -> Result<(), AppError> {
        self.media.clear_collection(Self::owner(id), NEWS_PDFS).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.news.get(id).await?.is_none() {
            return Err(AppError::NotFound(format!("News {} not found", id)));
        }
        self.media.clear_collection(Self::owner(id), NEWS_IMAGES).await?;
        self.media.clear_collection(Self::owner(id), NEWS_PDFS).await?;
        self.news.delete_row(id).await?;
        Ok(())
    }
}
