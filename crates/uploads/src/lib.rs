//! # Medinfo Uploads
//!
//! Image upload validation and storage for the medicine upload surface.
//!
//! ## Design Principles
//!
//! - Validation happens before storage: media type is detected from the
//!   bytes themselves (client-declared types are never trusted) and the
//!   size cap is enforced up front
//! - Accepted images are content-addressed by SHA-256, so identical
//!   uploads deduplicate to the same reference
//! - Storage is in-memory only: the application holds no persistent state,
//!   and everything is discarded on process exit
//! - The drop surface is a plain state machine; drag tracking is a single
//!   boolean toggled by enter/leave/drop events, no debouncing
//!
//! Camera capture is deliberately out of scope: the surrounding
//! application exposes the affordance but no behaviour is defined for it.

mod store;
mod surface;

pub use store::{ImageRef, ImageStore};
pub use surface::{DropEvent, DropSurface};

/// Media types accepted by the upload surface.
pub const ACCEPTED_MEDIA_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Errors that can occur on the upload path.
///
/// All of these are recovered at the boundary and rendered as transient
/// user notifications; none are fatal.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The bytes are not one of the accepted image formats.
    #[error("unsupported file type: expected JPEG, PNG, GIF or WebP")]
    UnsupportedFileType,

    /// The image exceeds the configured size cap.
    #[error("file too large: {size_bytes} bytes exceeds the {max_bytes} byte limit")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    /// No image is stored under the requested hash.
    #[error("no stored image with hash {0}")]
    NotFound(String),
}
