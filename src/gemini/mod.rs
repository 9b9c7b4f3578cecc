pub mod image_client;
pub mod key;

use crate::{
    error::Result,
    models::{AspectRatio, EncodedImage},
};
use async_trait::async_trait;

pub use image_client::GeminiImageClient;
pub use key::{EnvKeyProvider, KeyProvider, StaticKeyProvider};

/// Everything one attempt needs. The encoded images are borrowed from the
/// batch and shared by every prompt.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub first: &'a EncodedImage,
    pub second: &'a EncodedImage,
    pub instruction: &'a str,
    pub aspect_ratio: AspectRatio,
}

/// A model endpoint that composes two reference images and an instruction
/// into a new image.
///
/// `Ok(None)` means the call succeeded but the response carried no image.
#[async_trait]
pub trait GenerationCapability: Send + Sync {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<Option<EncodedImage>>;
}
