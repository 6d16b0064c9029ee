use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable carrying the required API credential
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub gemini: GeminiConfig,
    pub voice: VoiceConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct GeminiConfig {
    /// Model id used for both chat and analysis
    pub model: String,

    /// Override for the API base URL (testing against a local stub)
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoiceConfig {
    /// Whether a recognition feed is available; false disables voice capture
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    /// Render responses as markdown; false falls back to escaped plain text
    pub markdown: bool,
}

impl Config {
    /// Load settings from a config file, with built-in defaults
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "verdant")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8787)?
            .set_default("gemini.model", "gemini-2.5-flash")?
            .set_default("gemini.base_url", None::<String>)?
            .set_default("voice.enabled", true)?
            .set_default("render.markdown", true)?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Read the required API credential from the environment
    ///
    /// Absence is fatal: no component that talks to the remote service can
    /// start without it.
    pub fn api_key() -> Result<String> {
        std::env::var(API_KEY_VAR)
            .with_context(|| format!("{} environment variable not set", API_KEY_VAR))
    }
}
