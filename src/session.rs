//! Presentation state for one photoshoot: uploads, choices, the gallery and
//! the transient notices shown around it.

use crate::{
    catalog, export,
    error::{PhotoshootError, Result},
    gemini::GenerationCapability,
    models::{AspectRatio, GeneratedImage, ReferenceImage, SubjectRole, Theme},
    orchestrator::PhotoshootGenerator,
};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate images. Please try again.";
pub const ARCHIVE_FAILED_MESSAGE: &str = "Failed to create zip file.";
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);
pub const ARCHIVE_NOTICE_DURATION: Duration = Duration::from_secs(4);

pub trait Clipboard {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// Keeps the last copied text; stands in for a system clipboard.
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| {
                PhotoshootError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "clipboard poisoned",
                ))
            })?;
        *guard = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// A message that stops showing once `expires_at` passes.
#[derive(Debug, Clone)]
struct Notice {
    text: String,
    expires_at: Instant,
}

impl Notice {
    fn new(text: String, now: Instant, ttl: Duration) -> Self {
        Self {
            text,
            expires_at: now + ttl,
        }
    }

    fn active_at(&self, now: Instant) -> Option<&str> {
        (now < self.expires_at).then_some(self.text.as_str())
    }
}

pub struct PhotoshootSession {
    first: Option<ReferenceImage>,
    second: Option<ReferenceImage>,
    theme: Option<&'static Theme>,
    aspect_ratio: AspectRatio,
    status: SessionStatus,
    results: Vec<GeneratedImage>,
    copied: Option<Notice>,
    archive_notice: Option<Notice>,
}

impl Default for PhotoshootSession {
    fn default() -> Self {
        Self {
            first: None,
            second: None,
            theme: Some(catalog::default_theme()),
            aspect_ratio: AspectRatio::default(),
            status: SessionStatus::Idle,
            results: Vec::new(),
            copied: None,
            archive_notice: None,
        }
    }
}

impl PhotoshootSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces (or clears, with `None`) the photo for one subject.
    pub fn set_reference(&mut self, role: SubjectRole, image: Option<ReferenceImage>) {
        match role {
            SubjectRole::First => self.first = image,
            SubjectRole::Second => self.second = image,
        }
    }

    pub fn reference(&self, role: SubjectRole) -> Option<&ReferenceImage> {
        match role {
            SubjectRole::First => self.first.as_ref(),
            SubjectRole::Second => self.second.as_ref(),
        }
    }

    pub fn select_theme(&mut self, id: u32) -> Result<&'static Theme> {
        let theme = catalog::find(id)
            .ok_or_else(|| PhotoshootError::InvalidInput(format!("unknown theme id: {}", id)))?;
        self.theme = Some(theme);
        Ok(theme)
    }

    pub fn theme(&self) -> Option<&'static Theme> {
        self.theme
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.aspect_ratio = ratio;
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn results(&self) -> &[GeneratedImage] {
        &self.results
    }

    pub fn can_generate(&self) -> bool {
        self.first.is_some()
            && self.second.is_some()
            && self.theme.is_some()
            && self.status != SessionStatus::Loading
    }

    /// Runs a whole batch. Total failure (an error, or zero images) leaves the
    /// gallery empty with a single retryable message.
    pub async fn run<C: GenerationCapability>(
        &mut self,
        generator: &PhotoshootGenerator<C>,
    ) -> &SessionStatus {
        let (Some(first), Some(second), Some(theme)) =
            (self.first.clone(), self.second.clone(), self.theme)
        else {
            log::warn!("Generation requested before both photos and a theme were chosen");
            return &self.status;
        };

        self.results.clear();
        self.status = SessionStatus::Loading;
        log::info!("📸 Starting \"{}\" photoshoot", theme.name);

        match generator
            .generate(&first, &second, theme.prompts, self.aspect_ratio)
            .await
        {
            Ok(images) if !images.is_empty() => {
                self.results = images;
                self.status = SessionStatus::Ready;
            }
            Ok(_) => {
                log::error!("Every prompt failed for theme \"{}\"", theme.name);
                self.status = SessionStatus::Failed(GENERATION_FAILED_MESSAGE.to_string());
            }
            Err(e) => {
                log::error!("Photoshoot failed: {}", e);
                self.status = SessionStatus::Failed(GENERATION_FAILED_MESSAGE.to_string());
            }
        }
        &self.status
    }

    pub fn copy_prompt(&mut self, clipboard: &dyn Clipboard, index: usize) -> Result<()> {
        self.copy_prompt_at(clipboard, index, Instant::now())
    }

    pub fn copy_prompt_at(
        &mut self,
        clipboard: &dyn Clipboard,
        index: usize,
        now: Instant,
    ) -> Result<()> {
        let prompt = self.result(index)?.prompt.clone();
        clipboard.set_text(&prompt)?;
        self.copied = Some(Notice::new(prompt, now, COPY_ACK_DURATION));
        Ok(())
    }

    /// The prompt whose "copied" notice is still showing at `now`.
    pub fn copied_prompt(&self, now: Instant) -> Option<&str> {
        self.copied.as_ref().and_then(|ack| ack.active_at(now))
    }

    pub fn download(&self, index: usize, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let image = self.result(index)?;
        export::save_image(dir, self.theme_name(), index, image)
    }

    pub fn download_all(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        self.download_all_at(dir, Instant::now())
    }

    /// Saves every result as one archive. A failure leaves the gallery and any
    /// files already saved alone and shows a short-lived notice instead.
    pub fn download_all_at(&mut self, dir: impl AsRef<Path>, now: Instant) -> Result<PathBuf> {
        match export::save_archive(dir, self.theme_name(), &self.results) {
            Ok(path) => {
                self.archive_notice = None;
                Ok(path)
            }
            Err(e) => {
                log::error!("Creating the zip archive failed: {}", e);
                self.archive_notice = Some(Notice::new(
                    ARCHIVE_FAILED_MESSAGE.to_string(),
                    now,
                    ARCHIVE_NOTICE_DURATION,
                ));
                Err(e)
            }
        }
    }

    /// The archive failure notice, if one is still showing at `now`.
    pub fn archive_error(&self, now: Instant) -> Option<&str> {
        self.archive_notice
            .as_ref()
            .and_then(|notice| notice.active_at(now))
    }

    fn result(&self, index: usize) -> Result<&GeneratedImage> {
        self.results.get(index).ok_or_else(|| {
            PhotoshootError::InvalidInput(format!("no generated image at position {}", index + 1))
        })
    }

    fn theme_name(&self) -> &'static str {
        self.theme.map(|t| t.name).unwrap_or("untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::gemini::GenerationRequest;
    use crate::models::image::fixtures::{jpeg_bytes, png_bytes};
    use crate::models::EncodedImage;
    use async_trait::async_trait;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    struct FixedCapability {
        succeed: bool,
    }

    #[async_trait]
    impl GenerationCapability for FixedCapability {
        async fn generate(&self, _request: GenerationRequest<'_>) -> Result<Option<EncodedImage>> {
            if self.succeed {
                Ok(Some(EncodedImage {
                    mime_type: "image/png".into(),
                    data: STANDARD.encode(b"generated"),
                }))
            } else {
                Ok(None)
            }
        }
    }

    fn generator(succeed: bool) -> PhotoshootGenerator<FixedCapability> {
        PhotoshootGenerator::new(FixedCapability { succeed })
            .with_config(GenerationConfig::new().with_retry_delay(Duration::ZERO))
    }

    fn ready_session() -> PhotoshootSession {
        let mut session = PhotoshootSession::new();
        session.set_reference(
            SubjectRole::First,
            Some(ReferenceImage::from_bytes(png_bytes()).unwrap()),
        );
        session.set_reference(
            SubjectRole::Second,
            Some(ReferenceImage::from_bytes(jpeg_bytes()).unwrap()),
        );
        session
    }

    #[test]
    fn test_defaults_and_gating() {
        let mut session = PhotoshootSession::new();
        assert_eq!(session.theme().map(|t| t.id), Some(1));
        assert_eq!(session.aspect_ratio(), AspectRatio::Square);
        assert!(!session.can_generate());

        session.set_reference(
            SubjectRole::First,
            Some(ReferenceImage::from_bytes(png_bytes()).unwrap()),
        );
        assert!(!session.can_generate());
        session.set_reference(
            SubjectRole::Second,
            Some(ReferenceImage::from_bytes(jpeg_bytes()).unwrap()),
        );
        assert!(session.can_generate());

        session.set_reference(SubjectRole::First, None);
        assert!(session.reference(SubjectRole::First).is_none());
        assert!(!session.can_generate());
    }

    #[test]
    fn test_select_theme() {
        let mut session = PhotoshootSession::new();
        assert_eq!(session.select_theme(4).unwrap().name, "Traditional Indian Wedding");
        assert!(session.select_theme(99).is_err());
        assert_eq!(session.theme().map(|t| t.id), Some(4));
    }

    #[tokio::test]
    async fn test_run_fills_gallery() {
        let mut session = ready_session();
        session.select_theme(2).unwrap();
        session.set_aspect_ratio(AspectRatio::Portrait9x16);

        let status = session.run(&generator(true)).await.clone();

        assert_eq!(status, SessionStatus::Ready);
        assert_eq!(session.results().len(), 9);
    }

    #[tokio::test]
    async fn test_zero_images_is_total_failure() {
        let mut session = ready_session();
        session.run(&generator(true)).await;
        assert_eq!(session.results().len(), 9);

        let status = session.run(&generator(false)).await.clone();

        assert_eq!(status, SessionStatus::Failed(GENERATION_FAILED_MESSAGE.into()));
        assert!(session.results().is_empty());
    }

    #[tokio::test]
    async fn test_run_without_photos_does_nothing() {
        let mut session = PhotoshootSession::new();
        let status = session.run(&generator(true)).await.clone();
        assert_eq!(status, SessionStatus::Idle);
        assert!(session.results().is_empty());
    }

    #[tokio::test]
    async fn test_copy_prompt_ack_expires() {
        let mut session = ready_session();
        session.run(&generator(true)).await;
        let clipboard = MemoryClipboard::new();
        let start = Instant::now();

        session.copy_prompt_at(&clipboard, 0, start).unwrap();

        let expected = catalog::default_theme().prompts[0];
        assert_eq!(clipboard.contents().as_deref(), Some(expected));
        assert_eq!(session.copied_prompt(start + Duration::from_millis(1999)), Some(expected));
        assert_eq!(session.copied_prompt(start + COPY_ACK_DURATION), None);
        assert!(session.copy_prompt(&clipboard, 42).is_err());
    }

    #[tokio::test]
    async fn test_downloads() {
        let mut session = ready_session();
        session.run(&generator(true)).await;
        let dir = tempfile::tempdir().unwrap();

        let single = session.download(1, dir.path()).unwrap();
        assert_eq!(
            single.file_name().unwrap(),
            "couple-photoshoot-studio-fashion-shoot-2.png"
        );
        assert_eq!(std::fs::read(&single).unwrap(), b"generated");

        let archive = session.download_all(dir.path()).unwrap();
        assert!(archive.ends_with("couple-photoshoot-studio-fashion-shoot.zip"));
        assert!(session.download(9, dir.path()).is_err());
        assert_eq!(session.archive_error(Instant::now()), None);
    }

    #[tokio::test]
    async fn test_archive_failure_shows_expiring_notice() {
        let mut session = ready_session();
        session.run(&generator(true)).await;
        let dir = tempfile::tempdir().unwrap();
        let saved = session.download(0, dir.path()).unwrap();

        session.results.push(GeneratedImage {
            prompt: "broken".into(),
            mime_type: "image/png".into(),
            data: "not base64 !!".into(),
        });
        let start = Instant::now();

        let err = session.download_all_at(dir.path(), start).unwrap_err();

        assert!(matches!(err, PhotoshootError::ArchiveError(_)));
        assert_eq!(session.archive_error(start), Some(ARCHIVE_FAILED_MESSAGE));
        assert_eq!(
            session.archive_error(start + ARCHIVE_NOTICE_DURATION - Duration::from_millis(1)),
            Some(ARCHIVE_FAILED_MESSAGE)
        );
        assert_eq!(session.archive_error(start + ARCHIVE_NOTICE_DURATION), None);

        assert_eq!(session.status(), &SessionStatus::Ready);
        assert_eq!(session.results().len(), 10);
        assert_eq!(std::fs::read(&saved).unwrap(), b"generated");
        assert!(!dir
            .path()
            .join("couple-photoshoot-studio-fashion-shoot.zip")
            .exists());
    }
}
