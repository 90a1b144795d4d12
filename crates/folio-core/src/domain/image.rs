//! Image uploads and the content-addressed naming scheme for stored images.

use sha2::{Digest, Sha256};

use crate::error::DomainError;

/// Default upper bound for an uploaded image: 2 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Extensions accepted for uploads.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Image formats that may be attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Detect the format from the leading bytes of the file.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(JPEG_MAGIC) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(PNG_MAGIC) {
            Some(Self::Png)
        } else {
            None
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Format of a stored asset, judged by its name.
    pub fn from_asset_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        Self::from_extension(extension)
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// An image as received from a client, before it is stored.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// Original file extension, without the leading dot.
    pub extension: String,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("len", &self.bytes.len())
            .field("extension", &self.extension)
            .finish()
    }
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, extension: impl Into<String>) -> Self {
        Self {
            bytes,
            extension: extension.into(),
        }
    }

    /// Lowercased extension with any leading dot removed.
    pub fn normalized_extension(&self) -> String {
        self.extension.trim_start_matches('.').to_ascii_lowercase()
    }

    /// Check presence, size, declared type and actual content of the upload.
    pub fn validate(&self, max_bytes: usize) -> Result<ImageKind, DomainError> {
        if self.bytes.is_empty() {
            return Err(DomainError::validation("image", "The image field is required."));
        }
        if self.bytes.len() > max_bytes {
            return Err(DomainError::validation(
                "image",
                format!(
                    "The image may not be greater than {} kilobytes.",
                    max_bytes / 1024
                ),
            ));
        }

        let declared = ImageKind::from_extension(&self.normalized_extension()).ok_or_else(|| {
            DomainError::validation(
                "image",
                format!(
                    "The image must be a file of type: {}.",
                    ACCEPTED_EXTENSIONS.join(", ")
                ),
            )
        })?;

        match ImageKind::sniff(&self.bytes) {
            Some(actual) if actual == declared => Ok(actual),
            Some(_) => Err(DomainError::validation(
                "image",
                "The image content does not match its file type.",
            )),
            None => Err(DomainError::validation("image", "The image must be an image.")),
        }
    }
}

/// Content-addressed name for a blob: hex SHA-256 of the bytes plus the extension.
///
/// Used for every stored image, whether it arrives on create or on update.
pub fn asset_name(bytes: &[u8], extension: &str) -> String {
    let digest = Sha256::digest(bytes);
    format!(
        "{}.{}",
        hex::encode(digest),
        extension.trim_start_matches('.').to_ascii_lowercase()
    )
}

/// Whether `name` has the exact shape produced by [`asset_name`].
///
/// Rejects anything that could address a path outside the store.
pub fn is_valid_asset_name(name: &str) -> bool {
    let Some((stem, extension)) = name.split_once('.') else {
        return false;
    };
    stem.len() == 64
        && stem
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        && ACCEPTED_EXTENSIONS.contains(&extension)
}
