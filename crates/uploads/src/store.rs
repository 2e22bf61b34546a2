//! Content-addressed in-memory image storage.
//!
//! The store validates incoming bytes (media type by content sniffing,
//! size against the configured cap) and keys accepted images by their
//! SHA-256 hash. Identical content always produces the same reference, so
//! re-uploading the same image is idempotent. Nothing touches the
//! filesystem: stored images live for the lifetime of the process.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{UploadError, ACCEPTED_MEDIA_TYPES};

/// Renderable reference to a stored image.
///
/// This is what the surrounding application hands to its view layer: the
/// hash addresses the bytes, the media type drives rendering, and the
/// original filename and timestamp are presentation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ImageRef {
    /// Hexadecimal SHA-256 digest of the image bytes.
    pub hash: String,

    /// Detected media type (one of [`ACCEPTED_MEDIA_TYPES`]).
    pub media_type: String,

    /// Size of the image in bytes.
    pub size_bytes: u64,

    /// Filename as supplied by the uploader.
    pub original_filename: String,

    /// UTC timestamp when the image was accepted.
    pub stored_at: DateTime<Utc>,
}

struct StoredImage {
    reference: ImageRef,
    bytes: Vec<u8>,
}

/// In-memory image store with validation.
///
/// Cloning is cheap and all clones share the same underlying map, so the
/// store can be handed to every request handler.
#[derive(Clone)]
pub struct ImageStore {
    max_bytes: u64,
    images: Arc<RwLock<HashMap<String, StoredImage>>>,
}

impl ImageStore {
    /// Creates an empty store that accepts images up to `max_bytes`.
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            images: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The configured size cap in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Validates image bytes without storing them.
    ///
    /// Returns the detected media type.
    ///
    /// # Errors
    ///
    /// - [`UploadError::FileTooLarge`] if the bytes exceed the cap
    /// - [`UploadError::UnsupportedFileType`] if the content is not a
    ///   JPEG, PNG, GIF or WebP image
    pub fn validate(&self, bytes: &[u8]) -> Result<&'static str, UploadError> {
        let size_bytes = bytes.len() as u64;
        if size_bytes > self.max_bytes {
            return Err(UploadError::FileTooLarge {
                size_bytes,
                max_bytes: self.max_bytes,
            });
        }

        let kind = infer::get(bytes).ok_or(UploadError::UnsupportedFileType)?;
        let media_type = kind.mime_type();
        if !ACCEPTED_MEDIA_TYPES.contains(&media_type) {
            return Err(UploadError::UnsupportedFileType);
        }
        Ok(media_type)
    }

    /// Validates and stores image bytes, returning the renderable
    /// reference.
    ///
    /// Adding content that is already stored returns the existing
    /// reference unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`ImageStore::validate`].
    pub fn add(&self, bytes: Vec<u8>, original_filename: &str) -> Result<ImageRef, UploadError> {
        let media_type = self.validate(&bytes)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = hex::encode(hasher.finalize());

        let mut images = self.images.write().expect("image store lock poisoned");
        if let Some(existing) = images.get(&hash) {
            return Ok(existing.reference.clone());
        }

        let reference = ImageRef {
            hash: hash.clone(),
            media_type: media_type.to_string(),
            size_bytes: bytes.len() as u64,
            original_filename: original_filename.to_string(),
            stored_at: Utc::now(),
        };
        images.insert(
            hash,
            StoredImage {
                reference: reference.clone(),
                bytes,
            },
        );

        Ok(reference)
    }

    /// Retrieves a stored image's reference and bytes by hash.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::NotFound`] if no image is stored under
    /// `hash`.
    pub fn get(&self, hash: &str) -> Result<(ImageRef, Vec<u8>), UploadError> {
        let images = self.images.read().expect("image store lock poisoned");
        images
            .get(hash)
            .map(|stored| (stored.reference.clone(), stored.bytes.clone()))
            .ok_or_else(|| UploadError::NotFound(hash.to_string()))
    }

    /// Removes a stored image. This is the removal action exposed by the
    /// upload surface.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::NotFound`] if no image is stored under
    /// `hash`.
    pub fn remove(&self, hash: &str) -> Result<ImageRef, UploadError> {
        let mut images = self.images.write().expect("image store lock poisoned");
        images
            .remove(hash)
            .map(|stored| stored.reference)
            .ok_or_else(|| UploadError::NotFound(hash.to_string()))
    }

    /// Number of stored images.
    pub fn len(&self) -> usize {
        self.images.read().expect("image store lock poisoned").len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE_MIB: u64 = 5 * 1024 * 1024;

    /// Minimal valid PNG signature.
    fn png_bytes() -> Vec<u8> {
        vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
    }

    /// Minimal GIF89a header.
    fn gif_bytes() -> Vec<u8> {
        b"GIF89a".to_vec()
    }

    /// Minimal JPEG SOI marker sequence.
    fn jpeg_bytes() -> Vec<u8> {
        vec![0xFF, 0xD8, 0xFF, 0xDB]
    }

    /// Minimal RIFF/WebP container header.
    fn webp_bytes() -> Vec<u8> {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(b"WEBPVP8 ");
        bytes
    }

    #[test]
    fn test_accepts_all_supported_formats() {
        let store = ImageStore::new(FIVE_MIB);
        assert_eq!(store.validate(&png_bytes()).unwrap(), "image/png");
        assert_eq!(store.validate(&gif_bytes()).unwrap(), "image/gif");
        assert_eq!(store.validate(&jpeg_bytes()).unwrap(), "image/jpeg");
        assert_eq!(store.validate(&webp_bytes()).unwrap(), "image/webp");
    }

    #[test]
    fn test_rejects_non_image_content() {
        let store = ImageStore::new(FIVE_MIB);
        let result = store.add(b"just some text".to_vec(), "notes.txt");
        assert!(matches!(result, Err(UploadError::UnsupportedFileType)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_rejects_unaccepted_image_format() {
        // A valid BMP header: an image, but not an accepted format.
        let mut bmp = b"BM".to_vec();
        bmp.extend_from_slice(&[0u8; 12]);
        let store = ImageStore::new(FIVE_MIB);
        assert!(matches!(
            store.validate(&bmp),
            Err(UploadError::UnsupportedFileType)
        ));
    }

    #[test]
    fn test_rejects_oversized_image() {
        let store = ImageStore::new(FIVE_MIB);
        let mut big = png_bytes();
        big.resize(FIVE_MIB as usize + 1, 0);
        let result = store.add(big, "huge.png");
        match result {
            Err(UploadError::FileTooLarge {
                size_bytes,
                max_bytes,
            }) => {
                assert_eq!(size_bytes, FIVE_MIB + 1);
                assert_eq!(max_bytes, FIVE_MIB);
            }
            other => panic!("expected FileTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_cap_is_accepted() {
        let store = ImageStore::new(FIVE_MIB);
        let mut bytes = png_bytes();
        bytes.resize(FIVE_MIB as usize, 0);
        assert!(store.add(bytes, "exact.png").is_ok());
    }

    #[test]
    fn test_add_returns_renderable_reference() {
        let store = ImageStore::new(FIVE_MIB);
        let reference = store.add(png_bytes(), "medicine.png").unwrap();

        assert_eq!(reference.media_type, "image/png");
        assert_eq!(reference.size_bytes, 8);
        assert_eq!(reference.original_filename, "medicine.png");
        assert_eq!(reference.hash.len(), 64); // SHA-256 hex length
    }

    #[test]
    fn test_identical_content_deduplicates() {
        let store = ImageStore::new(FIVE_MIB);
        let first = store.add(png_bytes(), "a.png").unwrap();
        let second = store.add(png_bytes(), "b.png").unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_round_trip() {
        let store = ImageStore::new(FIVE_MIB);
        let reference = store.add(gif_bytes(), "pill.gif").unwrap();

        let (got_ref, got_bytes) = store.get(&reference.hash).unwrap();
        assert_eq!(got_ref, reference);
        assert_eq!(got_bytes, gif_bytes());
    }

    #[test]
    fn test_get_unknown_hash() {
        let store = ImageStore::new(FIVE_MIB);
        assert!(matches!(
            store.get("deadbeef"),
            Err(UploadError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_deletes_the_image() {
        let store = ImageStore::new(FIVE_MIB);
        let reference = store.add(jpeg_bytes(), "tablet.jpg").unwrap();

        let removed = store.remove(&reference.hash).unwrap();
        assert_eq!(removed, reference);
        assert!(store.is_empty());
        assert!(matches!(
            store.remove(&reference.hash),
            Err(UploadError::NotFound(_))
        ));
    }

    #[test]
    fn test_clones_share_storage() {
        let store = ImageStore::new(FIVE_MIB);
        let clone = store.clone();
        let reference = store.add(png_bytes(), "shared.png").unwrap();
        assert!(clone.get(&reference.hash).is_ok());
    }

    #[test]
    fn test_image_ref_serializes() {
        let store = ImageStore::new(FIVE_MIB);
        let reference = store.add(png_bytes(), "medicine.png").unwrap();
        let json = serde_json::to_string(&reference).unwrap();
        assert!(json.contains("image/png"));
        assert!(json.contains(&reference.hash));
    }
}
