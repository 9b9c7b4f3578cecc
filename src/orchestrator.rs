use crate::{
    config::GenerationConfig,
    error::{PhotoshootError, Result},
    gemini::{GenerationCapability, GenerationRequest, KeyProvider},
    logger, prompt,
    models::{AspectRatio, EncodedImage, GeneratedImage, ReferenceImage},
};
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Fans one photoshoot request out into one generation per prompt and joins
/// the survivors.
pub struct PhotoshootGenerator<C> {
    capability: C,
    key_provider: Option<Arc<dyn KeyProvider>>,
    config: GenerationConfig,
}

struct EncodedReferences {
    first: EncodedImage,
    second: EncodedImage,
}

impl<C: GenerationCapability> PhotoshootGenerator<C> {
    pub fn new(capability: C) -> Self {
        Self {
            capability,
            key_provider: None,
            config: GenerationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_key_provider(mut self, provider: Arc<dyn KeyProvider>) -> Self {
        self.key_provider = Some(provider);
        self
    }

    pub fn capability(&self) -> &C {
        &self.capability
    }

    /// Generates one image per prompt, in prompt order.
    ///
    /// Prompts that still fail after the retry budget are dropped, so the
    /// result may be shorter than `prompts`, or empty. Errors are reserved
    /// for misuse and for failures detected before dispatch (bad config,
    /// missing key) or an exceeded batch deadline. An empty `prompts` slice
    /// returns an empty list without encoding or calling the capability.
    pub async fn generate<S: AsRef<str>>(
        &self,
        first: &ReferenceImage,
        second: &ReferenceImage,
        prompts: &[S],
        aspect_ratio: AspectRatio,
    ) -> Result<Vec<GeneratedImage>> {
        self.config.validate()?;

        if let Some(keys) = &self.key_provider {
            if !keys.has_key() {
                return Err(PhotoshootError::CredentialError(
                    "no API key selected".into(),
                ));
            }
        }

        if prompts.is_empty() {
            log::warn!("No prompts supplied, nothing to generate");
            return Ok(Vec::new());
        }
        if let Some(index) = prompts.iter().position(|p| p.as_ref().trim().is_empty()) {
            return Err(PhotoshootError::InvalidInput(format!(
                "prompt #{} is blank",
                index
            )));
        }

        match self.config.batch_timeout {
            Some(deadline) => tokio::time::timeout(
                deadline,
                self.fan_out(first, second, prompts, aspect_ratio),
            )
            .await
            .map_err(|_| PhotoshootError::Timeout(deadline.as_millis() as u64)),
            None => Ok(self.fan_out(first, second, prompts, aspect_ratio).await),
        }
    }

    async fn fan_out<S: AsRef<str>>(
        &self,
        first: &ReferenceImage,
        second: &ReferenceImage,
        prompts: &[S],
        aspect_ratio: AspectRatio,
    ) -> Vec<GeneratedImage> {
        let _timer = logger::timer(&format!("Photoshoot batch of {} prompts", prompts.len()));

        let references = EncodedReferences {
            first: first.encode(),
            second: second.encode(),
        };

        log::info!(
            "🎨 Generating {} images at {} (up to {} in flight)",
            prompts.len(),
            aspect_ratio,
            self.config.concurrency
        );

        let references = &references;
        let mut slots: Vec<(usize, Option<GeneratedImage>)> =
            stream::iter(prompts.iter().enumerate())
                .map(|(index, scene)| async move {
                    let image = self
                        .run_prompt(index, scene.as_ref(), references, aspect_ratio)
                        .await;
                    (index, image)
                })
                .buffer_unordered(self.config.concurrency)
                .collect()
                .await;

        // Completion order is arbitrary; restore prompt order.
        slots.sort_by_key(|(index, _)| *index);
        let images: Vec<GeneratedImage> = slots
            .into_iter()
            .filter_map(|(_, image)| image)
            .collect();
        log::info!(
            "✅ Batch finished: {}/{} prompts produced an image",
            images.len(),
            prompts.len()
        );
        images
    }

    async fn run_prompt(
        &self,
        index: usize,
        scene: &str,
        references: &EncodedReferences,
        aspect_ratio: AspectRatio,
    ) -> Option<GeneratedImage> {
        let instruction = prompt::compose(scene, aspect_ratio);
        let budget = self.config.max_attempts;

        for attempt in 1..=budget {
            let request = GenerationRequest {
                first: &references.first,
                second: &references.second,
                instruction: &instruction,
                aspect_ratio,
            };

            match self.capability.generate(request).await {
                Ok(Some(image)) => {
                    log::debug!("Prompt #{} succeeded on attempt {}", index, attempt);
                    return Some(GeneratedImage {
                        prompt: scene.to_string(),
                        mime_type: image.mime_type,
                        data: image.data,
                    });
                }
                Ok(None) => {
                    log::warn!(
                        "Attempt {}/{} for prompt #{} returned no image",
                        attempt,
                        budget,
                        index
                    );
                }
                Err(e) if e.is_transient() => {
                    log::warn!(
                        "Attempt {}/{} for prompt #{} failed: {}",
                        attempt,
                        budget,
                        index,
                        e
                    );
                }
                Err(e) => {
                    log::error!(
                        "Attempt {}/{} for prompt #{} failed unexpectedly: {}",
                        attempt,
                        budget,
                        index,
                        e
                    );
                }
            }

            if attempt < budget {
                tokio::time::sleep(self.config.retry_delay_for(attempt)).await;
            }
        }

        log::error!("Prompt #{} dropped after {} attempts", index, budget);
        None
    }
}
