//! Media collection configuration
//!
//! Every entity kind that owns uploaded files declares its collections here,
//! once, as a static table: accepted MIME types, single-file or multi-file
//! cardinality, storage disk, and whether responsive image variants are
//! generated for it. The attachment store consults this table on every
//! attach; there is no runtime registration.

use crate::morph::EntityKind;

pub const MIME_IMAGE: &[&str] = &["image/jpeg", "image/png", "image/webp"];
pub const MIME_PDF: &[&str] = &["application/pdf"];
/// News PDFs additionally tolerate the generic octet-stream types some
/// browsers send for PDF uploads.
pub const MIME_PDF_LENIENT: &[&str] = &[
    "application/pdf",
    "application/octet-stream",
    "application/x-pdf",
];

pub const DISK_PUBLIC: &str = "public";

/// Cardinality of a collection: single-file collections replace the previous
/// attachment on upload, multi-file collections append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Multi,
}

/// Declaration of one named collection on an owning entity kind.
#[derive(Debug, Clone, Copy)]
pub struct CollectionConfig {
    pub name: &'static str,
    pub accepted_mime_types: &'static [&'static str],
    pub cardinality: Cardinality,
    pub disk: &'static str,
    pub responsive_images: bool,
}

impl CollectionConfig {
    pub fn accepts(&self, mime: &str) -> bool {
        self.accepted_mime_types.contains(&mime)
    }

    pub fn is_single(&self) -> bool {
        self.cardinality == Cardinality::Single
    }
}

const fn single(name: &'static str, mimes: &'static [&'static str]) -> CollectionConfig {
    CollectionConfig {
        name,
        accepted_mime_types: mimes,
        cardinality: Cardinality::Single,
        disk: DISK_PUBLIC,
        responsive_images: false,
    }
}

const fn single_responsive(name: &'static str, mimes: &'static [&'static str]) -> CollectionConfig {
    CollectionConfig {
        name,
        accepted_mime_types: mimes,
        cardinality: Cardinality::Single,
        disk: DISK_PUBLIC,
        responsive_images: true,
    }
}

const fn multi_responsive(name: &'static str, mimes: &'static [&'static str]) -> CollectionConfig {
    CollectionConfig {
        name,
        accepted_mime_types: mimes,
        cardinality: Cardinality::Multi,
        disk: DISK_PUBLIC,
        responsive_images: true,
    }
}

const COURSE_COLLECTIONS: &[CollectionConfig] = &[
    single_responsive("courses_covers", MIME_IMAGE),
    multi_responsive("courses_gallery", MIME_IMAGE),
    multi_responsive("courses_sponsors_logos", MIME_IMAGE),
    single("courses_program", MIME_PDF),
];

const WEBINAR_COLLECTIONS: &[CollectionConfig] = &[
    single_responsive("webinars_covers", MIME_IMAGE),
    multi_responsive("webinars_gallery", MIME_IMAGE),
    multi_responsive("webinars_sponsors_logos", MIME_IMAGE),
    single("webinars_program", MIME_PDF),
];

const CONFERENCE_COLLECTIONS: &[CollectionConfig] = &[
    single_responsive("conferences_covers", MIME_IMAGE),
    multi_responsive("conferences_gallery", MIME_IMAGE),
    multi_responsive("conferences_sponsors_logos", MIME_IMAGE),
    single("conferences_program", MIME_PDF),
];

const ATTENDEE_COLLECTIONS: &[CollectionConfig] = &[single("diplomas", MIME_PDF)];

const BANNER_COLLECTIONS: &[CollectionConfig] = &[single_responsive("banners", MIME_IMAGE)];

const POST_COLLECTIONS: &[CollectionConfig] = &[single_responsive("posts", MIME_IMAGE)];

const NEWS_COLLECTIONS: &[CollectionConfig] = &[
    single_responsive("news_images", MIME_IMAGE),
    single("news_pdfs", MIME_PDF_LENIENT),
];

/// All collections declared by an entity kind. Kinds without media own the
/// empty slice.
pub fn collections_for(kind: EntityKind) -> &'static [CollectionConfig] {
    match kind {
        EntityKind::Course => COURSE_COLLECTIONS,
        EntityKind::Webinar => WEBINAR_COLLECTIONS,
        EntityKind::Conference => CONFERENCE_COLLECTIONS,
        EntityKind::Attendee => ATTENDEE_COLLECTIONS,
        EntityKind::Banner => BANNER_COLLECTIONS,
        EntityKind::Post => POST_COLLECTIONS,
        EntityKind::News => NEWS_COLLECTIONS,
        EntityKind::BankDetail | EntityKind::Member | EntityKind::User => &[],
    }
}

/// Look up a single collection declaration by owner kind and name.
pub fn collection_config(kind: EntityKind, name: &str) -> Option<&'static CollectionConfig> {
    collections_for(kind).iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kinds_declare_four_collections() {
        for kind in [EntityKind::Course, EntityKind::Webinar, EntityKind::Conference] {
            let cols = collections_for(kind);
            assert_eq!(cols.len(), 4);
            // cover and program are single-file, gallery and logos multi-file
            assert!(cols[0].is_single());
            assert!(!cols[1].is_single());
            assert!(!cols[2].is_single());
            assert!(cols[3].is_single());
        }
    }

    #[test]
    fn test_diplomas_accept_only_pdf() {
        let diplomas = collection_config(EntityKind::Attendee, "diplomas").unwrap();
        assert!(diplomas.is_single());
        assert!(diplomas.accepts("application/pdf"));
        assert!(!diplomas.accepts("image/png"));
        assert!(!diplomas.responsive_images);
    }

    #[test]
    fn test_news_pdf_accepts_octet_stream() {
        let pdfs = collection_config(EntityKind::News, "news_pdfs").unwrap();
        assert!(pdfs.accepts("application/pdf"));
        assert!(pdfs.accepts("application/octet-stream"));
        assert!(pdfs.accepts("application/x-pdf"));
        assert!(!pdfs.accepts("image/jpeg"));
    }

    #[test]
    fn test_unknown_collection_lookup() {
        assert!(collection_config(EntityKind::Banner, "posters").is_none());
        assert!(collections_for(EntityKind::User).is_empty());
    }
}
