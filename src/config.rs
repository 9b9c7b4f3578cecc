use crate::error::{PhotoshootError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 900;
pub const DEFAULT_CONCURRENCY: usize = 9;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model = env::var("GEMINI_MODEL").unwrap_or(defaults.model);
        let base_url = env::var("GEMINI_BASE_URL").unwrap_or(defaults.base_url);
        let request_timeout = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        GeminiConfig {
            api_key,
            model,
            base_url,
            request_timeout,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// `{base}/v1beta/models/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Knobs for one batch: retry budget, pacing and fan-out width.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Total attempts per prompt, the first one included.
    pub max_attempts: u32,
    /// Delay before attempt `n + 1` is `retry_delay * n`.
    pub retry_delay: Duration,
    pub concurrency: usize,
    pub batch_timeout: Option<Duration>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            concurrency: DEFAULT_CONCURRENCY,
            batch_timeout: None,
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds from any variable source; unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_attempts = lookup("DUETSHOT_MAX_ATTEMPTS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_attempts);
        let retry_delay = lookup("DUETSHOT_RETRY_DELAY_MS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_delay);
        let concurrency = lookup("DUETSHOT_CONCURRENCY")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.concurrency);
        let batch_timeout = lookup("DUETSHOT_BATCH_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        GenerationConfig {
            max_attempts,
            retry_delay,
            concurrency,
            batch_timeout,
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(PhotoshootError::ConfigError(
                "max_attempts must be at least 1".into(),
            ));
        }
        if self.concurrency == 0 {
            return Err(PhotoshootError::ConfigError(
                "concurrency must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn retry_delay_for(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(attempt.max(1))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub generation: GenerationConfig,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini: GeminiConfig::default(),
            generation: GenerationConfig::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let output_dir = env::var("DUETSHOT_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Config {
            gemini: GeminiConfig::from_env(),
            generation: GenerationConfig::from_env(),
            output_dir,
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_generation(mut self, config: GenerationConfig) -> Self {
        self.generation = config;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_generation_config_ignores_unparsable_values() {
        let vars: HashMap<&str, &str> = [
            ("DUETSHOT_MAX_ATTEMPTS", "abc"),
            ("DUETSHOT_RETRY_DELAY_MS", "250"),
            ("DUETSHOT_CONCURRENCY", "-4"),
            ("DUETSHOT_BATCH_TIMEOUT_SECS", "120"),
        ]
        .into_iter()
        .collect();

        let config = GenerationConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.retry_delay, Duration::from_millis(250));
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.batch_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = GeminiConfig::new()
            .with_base_url("http://localhost:8080/")
            .with_model("test-model");
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/test-model:generateContent"
        );
    }

    #[test]
    fn test_generation_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.concurrency, 9);
        assert!(config.batch_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        let config = GenerationConfig::new().with_max_attempts(0);
        assert!(matches!(
            config.validate(),
            Err(PhotoshootError::ConfigError(_))
        ));
        let config = GenerationConfig::new().with_concurrency(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retry_delay_is_linear() {
        let config = GenerationConfig::new().with_retry_delay(Duration::from_millis(100));
        assert_eq!(config.retry_delay_for(1), Duration::from_millis(100));
        assert_eq!(config.retry_delay_for(2), Duration::from_millis(200));
        assert_eq!(config.retry_delay_for(0), Duration::from_millis(100));
    }
}
