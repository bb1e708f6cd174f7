use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "HealCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default namespace for store slots (`healcare_appointments`, ...).
pub const DEFAULT_SLOT_PREFIX: &str = "healcare";

/// Default local bind address for the portal host.
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Narration rate handed to the text-to-speech capability.
pub const SPEECH_RATE: f32 = 1.02;

/// Recognition and narration language.
pub const SPEECH_LANG: &str = "en-US";

/// Half-width in degrees of the map box drawn around the user's position.
pub const MAP_BBOX_OFFSET: f64 = 0.02;

/// Embedded map endpoint.
pub const MAP_EMBED_BASE: &str = "https://www.openstreetmap.org/export/embed.html";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,healcare_lib=debug"
}

/// Get the application data directory
/// ~/HealCare/ on all platforms
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("HealCare")
}

/// Path of the slot database inside a data directory.
pub fn storage_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("portal.db")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid bind address {value}: {reason}")]
    InvalidBind { value: String, reason: String },
}

/// Runtime settings for the portal host.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub bind: SocketAddr,
    pub data_dir: PathBuf,
    /// Static page directory served at `/`. `None` serves the API only.
    pub web_dir: Option<PathBuf>,
    pub slot_prefix: String,
    /// Whether the client-side recognizer capability is offered.
    pub voice_enabled: bool,
}

impl PortalConfig {
    /// Read settings from `HEALCARE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("HEALCARE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBind {
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let data_dir = lookup("HEALCARE_DATA_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(app_data_dir);

        let web_dir = lookup("HEALCARE_WEB_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let slot_prefix = lookup("HEALCARE_SLOT_PREFIX")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SLOT_PREFIX.to_string());

        let voice_enabled = !matches!(
            lookup("HEALCARE_VOICE").as_deref().map(str::trim),
            Some("off") | Some("0") | Some("false")
        );

        Ok(Self {
            bind,
            data_dir,
            web_dir,
            slot_prefix,
            voice_enabled,
        })
    }
}
