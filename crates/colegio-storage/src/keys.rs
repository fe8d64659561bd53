//! Shared key generation for storage backends.
//!
//! Every attachment's files live under
//! `{collection_name}/{owner_id}/{attachment_id}/`, with generated
//! conversions and responsive variants one level deeper. Keys are derived
//! from ids only; the original filename appears solely as the leaf name.

/// Directory holding everything that belongs to one owner in one collection.
pub fn owner_dir(collection_name: &str, owner_id: i64) -> String {
    format!("{}/{}", collection_name, owner_id)
}

/// Directory holding one attachment's files.
pub fn attachment_dir(collection_name: &str, owner_id: i64, attachment_id: i64) -> String {
    format!("{}/{}/{}", collection_name, owner_id, attachment_id)
}

/// Key of the attachment's original file.
pub fn file_key(
    collection_name: &str,
    owner_id: i64,
    attachment_id: i64,
    file_name: &str,
) -> String {
    format!(
        "{}/{}",
        attachment_dir(collection_name, owner_id, attachment_id),
        sanitize_file_name(file_name)
    )
}

/// Directory for generated conversions (thumbnails etc).
pub fn conversions_dir(collection_name: &str, owner_id: i64, attachment_id: i64) -> String {
    format!(
        "{}/conversions",
        attachment_dir(collection_name, owner_id, attachment_id)
    )
}

/// Directory for responsive image variants.
pub fn responsive_dir(collection_name: &str, owner_id: i64, attachment_id: i64) -> String {
    format!(
        "{}/responsive",
        attachment_dir(collection_name, owner_id, attachment_id)
    )
}

/// Strip path separators and parent references from an uploaded filename so
/// it can only ever name the leaf inside the attachment directory.
pub fn sanitize_file_name(file_name: &str) -> String {
    let leaf = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .replace("..", "");
    if leaf.is_empty() {
        "file".to_string()
    } else {
        leaf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_derived_from_ids() {
        assert_eq!(owner_dir("banners", 15), "banners/15");
        assert_eq!(attachment_dir("banners", 15, 3), "banners/15/3");
        assert_eq!(file_key("banners", 15, 3, "hero.png"), "banners/15/3/hero.png");
        assert_eq!(conversions_dir("banners", 15, 3), "banners/15/3/conversions");
        assert_eq!(responsive_dir("banners", 15, 3), "banners/15/3/responsive");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("hero.png"), "hero.png");
        assert_eq!(sanitize_file_name("a/b/hero.png"), "hero.png");
        assert_eq!(sanitize_file_name("..\\..\\hero.png"), "hero.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name(".."), "file");
    }
}
