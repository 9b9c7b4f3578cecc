use crate::error::{PhotoshootError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// MIME types the upload step accepts.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectRole {
    First,
    Second,
}

impl SubjectRole {
    pub fn label(&self) -> &'static str {
        match self {
            SubjectRole::First => "first subject",
            SubjectRole::Second => "second subject",
        }
    }
}

/// A user-supplied face photo. Immutable; re-uploading replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    bytes: Vec<u8>,
    mime_type: String,
}

impl ReferenceImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Result<Self> {
        let mime_type = mime_type.into();
        if bytes.is_empty() {
            return Err(PhotoshootError::InvalidInput(
                "reference image is empty".into(),
            ));
        }
        if !ACCEPTED_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(PhotoshootError::InvalidInput(format!(
                "unsupported reference image type: {}",
                mime_type
            )));
        }
        Ok(Self { bytes, mime_type })
    }

    /// Sniffs the MIME type from the magic bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mime_type = infer::get(&bytes)
            .map(|kind| kind.mime_type().to_string())
            .ok_or_else(|| {
                PhotoshootError::InvalidInput("reference image is not a recognised image".into())
            })?;
        Self::new(bytes, mime_type)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes).map_err(|e| match e {
            PhotoshootError::InvalidInput(msg) => {
                PhotoshootError::InvalidInput(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn encode(&self) -> EncodedImage {
        EncodedImage {
            mime_type: self.mime_type.clone(),
            data: STANDARD.encode(&self.bytes),
        }
    }
}

/// Base64 transport form of a reference image, shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

/// One image returned by the generation API, paired with the prompt that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub prompt: String,
    pub mime_type: String,
    /// Base64 encoded image bytes.
    pub data: String,
}

impl GeneratedImage {
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| PhotoshootError::ResponseError(format!("invalid image data: {}", e)))
    }

    /// `data:` URL suitable for direct display.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Smallest byte prefix `infer` recognises as PNG.
    pub fn png_bytes() -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
        bytes
    }

    pub fn jpeg_bytes() -> Vec<u8> {
        vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F']
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_from_bytes_sniffs_mime() {
        let png = ReferenceImage::from_bytes(png_bytes()).unwrap();
        assert_eq!(png.mime_type(), "image/png");
        let jpeg = ReferenceImage::from_bytes(jpeg_bytes()).unwrap();
        assert_eq!(jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_rejects_empty_and_non_images() {
        assert!(matches!(
            ReferenceImage::new(Vec::new(), "image/png"),
            Err(PhotoshootError::InvalidInput(_))
        ));
        assert!(ReferenceImage::from_bytes(b"plain text, not a photo".to_vec()).is_err());
        assert!(ReferenceImage::new(vec![1, 2, 3], "application/pdf").is_err());
    }

    #[test]
    fn test_encode_roundtrips_through_generated_image() {
        let reference = ReferenceImage::from_bytes(png_bytes()).unwrap();
        let encoded = reference.encode();
        let generated = GeneratedImage {
            prompt: "p".into(),
            mime_type: encoded.mime_type.clone(),
            data: encoded.data.clone(),
        };
        assert_eq!(generated.decode().unwrap(), png_bytes());
        assert!(generated.data_url().starts_with("data:image/png;base64,"));
        assert_eq!(generated.extension(), "png");
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.txt");
        std::fs::write(&path, b"hello").unwrap();
        let err = ReferenceImage::load(&path).unwrap_err();
        assert!(err.to_string().contains("face.txt"));
    }
}
