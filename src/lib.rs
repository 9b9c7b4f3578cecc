pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod session;

pub use config::{Config, GeminiConfig, GenerationConfig};
pub use error::{PhotoshootError, Result};
pub use gemini::{
    EnvKeyProvider, GeminiImageClient, GenerationCapability, GenerationRequest, KeyProvider,
    StaticKeyProvider,
};
pub use models::{
    AspectRatio, EncodedImage, GeneratedImage, ReferenceImage, SubjectRole, Theme,
};
pub use orchestrator::PhotoshootGenerator;
pub use session::{Clipboard, MemoryClipboard, PhotoshootSession, SessionStatus};
