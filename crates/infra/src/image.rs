//! Image encoding for the add-item flow.
//!
//! Records keep their image inline as a `data:` URL. Encoding is the one
//! asynchronous step of creating a record; callers await it before persisting.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

/// An image as uploaded: its mime type and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image upload is empty")]
    Empty,

    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("failed to read image {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ImageUpload {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read an image from disk, guessing its mime type from the extension.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mime_type = mime_guess::MimeGuess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        Ok(Self { mime_type, bytes })
    }

    /// Mime type as declared, or guessed from a file name when the browser gave none.
    pub fn with_fallback_type(mut self, file_name: &str) -> Self {
        if self.mime_type.trim().is_empty() {
            if let Some(guess) = mime_guess::from_path(file_name).first() {
                self.mime_type = guess.essence_str().to_string();
            }
        }
        self
    }
}

/// Turns an upload into the text stored in `InventoryRecord::image_data`.
#[async_trait]
pub trait ImageEncoder: Send + Sync {
    async fn encode(&self, image: &ImageUpload) -> Result<String, ImageError>;
}

/// Encodes uploads as `data:<mime>;base64,<payload>` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlEncoder;

#[async_trait]
impl ImageEncoder for DataUrlEncoder {
    async fn encode(&self, image: &ImageUpload) -> Result<String, ImageError> {
        if image.bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        let mime = image.mime_type.trim().to_ascii_lowercase();
        if !mime.starts_with("image/") {
            return Err(ImageError::UnsupportedType(image.mime_type.clone()));
        }
        Ok(format!("data:{mime};base64,{}", STANDARD.encode(&image.bytes)))
    }
}
