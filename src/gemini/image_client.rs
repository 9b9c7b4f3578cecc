use crate::{
    config::GeminiConfig,
    error::{PhotoshootError, Result},
    gemini::{GenerationCapability, GenerationRequest},
    models::{
        gemini::{
            ApiErrorEnvelope, Content, GenerateContentRequest, GenerateContentResponse,
            GenerationConfig, ImageConfig, InlineData, Part,
        },
        EncodedImage,
    },
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// `generateContent` client for image-output Gemini models.
#[derive(Clone)]
pub struct GeminiImageClient {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout_ms: u64,
}

impl GeminiImageClient {
    /// Fails with `CredentialError` when no key is configured. The key is fixed
    /// for the client's lifetime; a key picked later by a `KeyProvider` needs a
    /// new client.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PhotoshootError::CredentialError("Gemini API key is not set".into()))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PhotoshootError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key,
            timeout_ms: config.request_timeout.as_millis() as u64,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_payload(request: &GenerationRequest<'_>) -> GenerateContentRequest {
        let inline = |image: &EncodedImage| Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            },
        };

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    inline(request.first),
                    inline(request.second),
                    Part::Text {
                        text: request.instruction.to_string(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: Some(ImageConfig {
                    aspect_ratio: request.aspect_ratio.label().to_string(),
                }),
            },
        }
    }

    fn status_error(status: StatusCode, body: &str) -> PhotoshootError {
        let message = match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(ApiErrorEnvelope { error }) => match error.status {
                Some(api_status) => format!("{} ({})", error.message, api_status),
                None => error.message,
            },
            Err(_) => body.chars().take(300).collect(),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                PhotoshootError::CredentialError(format!("{}: {}", status, message))
            }
            _ => PhotoshootError::ResponseError(format!("{}: {}", status, message)),
        }
    }
}

#[async_trait]
impl GenerationCapability for GeminiImageClient {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<Option<EncodedImage>> {
        let payload = Self::build_payload(&request);

        log::debug!(
            "Requesting image from {} ({} aspect ratio)",
            self.endpoint,
            request.aspect_ratio
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PhotoshootError::Timeout(self.timeout_ms)
                } else {
                    PhotoshootError::RequestError(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PhotoshootError::ResponseError(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_first_image().map(|inline| EncodedImage {
            mime_type: inline.mime_type,
            data: inline.data,
        }))
    }
}
