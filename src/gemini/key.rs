use crate::error::{PhotoshootError, Result};
use async_trait::async_trait;
use std::sync::RwLock;

/// Host-provided API key gate. Generation must not start unless `has_key` is true.
#[async_trait]
pub trait KeyProvider: Send + Sync {
    fn has_key(&self) -> bool;

    /// Asks the host to pick or refresh a key.
    async fn select_key(&self) -> Result<()>;
}

type Lookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Reads the key from `GEMINI_API_KEY` (or `API_KEY`), re-reading `.env` on selection.
///
/// `GeminiImageClient` copies the key when it is built, so hosts call
/// `select_key` before constructing the client (as the `duetshot` binary does).
pub struct EnvKeyProvider {
    key: RwLock<Option<String>>,
    lookup: Box<Lookup>,
}

impl EnvKeyProvider {
    pub fn new(initial: Option<String>) -> Self {
        Self::with_lookup(initial, |name| std::env::var(name).ok())
    }

    /// Same as `new`, but `select_key` consults `lookup` instead of the process environment.
    pub fn with_lookup(
        initial: Option<String>,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: RwLock::new(initial.filter(|k| !k.trim().is_empty())),
            lookup: Box::new(lookup),
        }
    }

    pub fn from_env() -> Self {
        let mut provider = Self::new(None);
        let key = provider.lookup_key();
        provider.key = RwLock::new(key);
        provider
    }

    pub fn key(&self) -> Option<String> {
        self.key.read().ok().and_then(|guard| guard.clone())
    }
}

impl EnvKeyProvider {
    fn lookup_key(&self) -> Option<String> {
        ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|name| (self.lookup)(name))
            .find(|k| !k.trim().is_empty())
    }
}

#[async_trait]
impl KeyProvider for EnvKeyProvider {
    fn has_key(&self) -> bool {
        self.key().is_some()
    }

    async fn select_key(&self) -> Result<()> {
        if dotenv::dotenv().is_err() {
            log::debug!("No .env file found while selecting key");
        }
        let found = self.lookup_key().ok_or_else(|| {
            PhotoshootError::CredentialError(
                "no API key found; set GEMINI_API_KEY or API_KEY".into(),
            )
        })?;
        let mut guard = self
            .key
            .write()
            .map_err(|_| PhotoshootError::CredentialError("key store poisoned".into()))?;
        *guard = Some(found);
        log::info!("🔑 API key selected");
        Ok(())
    }
}

/// Fixed answer, for hosts that manage keys elsewhere.
pub struct StaticKeyProvider {
    available: bool,
}

impl StaticKeyProvider {
    pub fn new(available: bool) -> Self {
        Self { available }
    }
}

#[async_trait]
impl KeyProvider for StaticKeyProvider {
    fn has_key(&self) -> bool {
        self.available
    }

    async fn select_key(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(PhotoshootError::CredentialError(
                "key selection is not available".into(),
            ))
        }
    }
}
