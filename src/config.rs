//! Environment configuration for the API server.

use anyhow::{bail, Context};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODELS_DIR: &str = "models";
pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-change-this";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_EXTERNAL_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Supabase,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supabase" => Ok(Self::Supabase),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub models_dir: PathBuf,
    pub store_backend: StoreBackend,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub secret_key: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub external_timeout: Duration,
}

// Credentials stay out of debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("models_dir", &self.models_dir)
            .field("store_backend", &self.store_backend)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &self.supabase_key.as_ref().map(|_| "<set>"))
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<set>"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("external_timeout", &self.external_timeout)
            .finish()
    }
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        if dotenv::dotenv().is_ok() {
            info!("Loaded variables from .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = try_load(&get, "PORT", DEFAULT_PORT)?;
        let store_backend = try_load(&get, "STORE_BACKEND", StoreBackend::Supabase)?;
        let timeout_secs: u64 = try_load(&get, "EXTERNAL_TIMEOUT_SECS", DEFAULT_EXTERNAL_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            bail!("EXTERNAL_TIMEOUT_SECS must be positive");
        }

        let models_dir = get("MODELS_DIR").unwrap_or_else(|| {
            info!("MODELS_DIR not set, using default: {DEFAULT_MODELS_DIR}");
            DEFAULT_MODELS_DIR.to_string()
        });

        let secret_key = get("SECRET_KEY").unwrap_or_else(|| {
            warn!("SECRET_KEY not set, using the insecure development default");
            DEFAULT_SECRET_KEY.to_string()
        });

        let supabase_url = get("SUPABASE_URL");
        let supabase_key = get("SUPABASE_KEY");
        if store_backend == StoreBackend::Supabase && (supabase_url.is_none() || supabase_key.is_none()) {
            warn!("SUPABASE_URL or SUPABASE_KEY not set, database features disabled");
        }

        let gemini_api_key = get("GEMINI_API_KEY");
        if gemini_api_key.is_none() {
            warn!("GEMINI_API_KEY not set, AI features disabled");
        }

        Ok(Self {
            port,
            models_dir: PathBuf::from(models_dir),
            store_backend,
            supabase_url,
            supabase_key,
            secret_key,
            gemini_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            external_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Local development settings: memory store, no AI, no artifacts.
    pub fn local(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: DEFAULT_PORT,
            models_dir: models_dir.into(),
            store_backend: StoreBackend::Memory,
            supabase_url: None,
            supabase_key: None,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            external_timeout: Duration::from_secs(DEFAULT_EXTERNAL_TIMEOUT_SECS),
        }
    }
}

fn try_load<T, G>(get: &G, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid {key} value '{raw}'")),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StoreBackend::Supabase => "supabase",
            StoreBackend::Memory => "memory",
        })
    }
}
