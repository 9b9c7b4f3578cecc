use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoshootError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Credential error: {0}")]
    CredentialError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Archive error: {0}")]
    ArchiveError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Timed out after {0}ms")]
    Timeout(u64),
}

impl From<serde_json::Error> for PhotoshootError {
    fn from(e: serde_json::Error) -> Self {
        PhotoshootError::SerializationError(e.to_string())
    }
}

impl From<zip::result::ZipError> for PhotoshootError {
    fn from(e: zip::result::ZipError) -> Self {
        PhotoshootError::ArchiveError(e.to_string())
    }
}

impl PhotoshootError {
    /// Errors that are worth another attempt for the same prompt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PhotoshootError::RequestError(_)
                | PhotoshootError::ResponseError(_)
                | PhotoshootError::SerializationError(_)
                | PhotoshootError::Timeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PhotoshootError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PhotoshootError::InvalidInput("prompts".into());
        assert_eq!(err.to_string(), "Invalid input: prompts");
        assert_eq!(PhotoshootError::Timeout(1500).to_string(), "Timed out after 1500ms");
    }

    #[test]
    fn test_transient_classification() {
        assert!(PhotoshootError::Timeout(10).is_transient());
        assert!(PhotoshootError::RequestError("reset".into()).is_transient());
        assert!(!PhotoshootError::CredentialError("missing".into()).is_transient());
        assert!(!PhotoshootError::InvalidInput("empty".into()).is_transient());
    }
}
