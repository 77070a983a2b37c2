//! Photo asset helpers: storage keys, public-URL round-trips, and the
//! reconciliation step that produces a record's final photo list.

use chrono::Utc;
use uuid::Uuid;

use crate::config::{DEFAULT_PHOTO_EXTENSION, PHOTO_BUCKET, PHOTO_KEY_PREFIX};

/// A newly selected photo file, not yet uploaded.
#[derive(Clone)]
pub struct NewPhoto {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for NewPhoto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewPhoto")
            .field("file_name", &self.file_name)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// Derive a collision-resistant storage key for an uploaded file:
/// time-based prefix, random suffix, original extension (defaulting to
/// jpg when the name carries none).
pub fn storage_key(file_name: &str) -> String {
    let ext = extension_of(file_name);
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}/{}_{}.{}",
        PHOTO_KEY_PREFIX,
        Utc::now().timestamp_millis(),
        &suffix[..12],
        ext
    )
}

/// Extension of a file name, or the default when absent.
fn extension_of(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext,
        _ => DEFAULT_PHOTO_EXTENSION,
    }
}

/// Compute the final ordered photo list: retained-existing URLs first,
/// newly uploaded URLs appended. Order within each segment is the
/// caller's; retained photos keep their curation order and new uploads
/// never interleave.
pub fn reconcile(existing: Vec<String>, uploaded: Vec<String>) -> Vec<String> {
    let mut fotos = existing;
    fotos.extend(uploaded);
    fotos
}

/// Recover the storage key from a stored public URL: the path segment
/// after the bucket marker. URLs that don't point into the photo bucket
/// yield `None` and are skipped by cleanup.
pub fn storage_key_from_url(url: &str) -> Option<String> {
    let marker = format!("{}/", PHOTO_BUCKET);
    url.split_once(&marker).and_then(|(_, key)| {
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_shape() {
        let key = storage_key("retrato.png");
        assert!(key.starts_with("talents/"), "{key}");
        assert!(key.ends_with(".png"), "{key}");

        // missing extension falls back to jpg
        assert!(storage_key("retrato").ends_with(".jpg"));
        // dotfile-style names have no usable extension
        assert!(storage_key(".hidden").ends_with(".jpg"));
    }

    #[test]
    fn storage_keys_do_not_collide() {
        let a = storage_key("a.jpg");
        let b = storage_key("a.jpg");
        assert_ne!(a, b);
    }

    #[test]
    fn reconcile_keeps_segment_order() {
        let fotos = reconcile(vec!["urlB".into()], vec!["urlC".into()]);
        assert_eq!(fotos, vec!["urlB", "urlC"]);

        assert!(reconcile(vec![], vec![]).is_empty());
    }

    #[test]
    fn key_recovered_from_public_url() {
        assert_eq!(
            storage_key_from_url("https://store/talent-photos/talents/123_abc.jpg").as_deref(),
            Some("talents/123_abc.jpg")
        );
        assert_eq!(storage_key_from_url("https://elsewhere/other.jpg"), None);
        assert_eq!(storage_key_from_url("https://store/talent-photos/"), None);
    }
}
