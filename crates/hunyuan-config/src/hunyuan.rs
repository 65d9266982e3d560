use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Public Hunyuan API endpoint
pub const DEFAULT_API_BASE: &str = "https://hunyuan.cloud.tencent.com";

/// Environment variable holding the application ID
pub const APP_ID_ENV: &str = "HUNYUAN_APP_ID";
/// Environment variable holding the secret ID
pub const SECRET_ID_ENV: &str = "HUNYUAN_SECRET_ID";
/// Environment variable holding the secret key
pub const SECRET_KEY_ENV: &str = "HUNYUAN_SECRET_KEY";
/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "HUNYUAN_API_BASE";

/// Credentials and request defaults for the Hunyuan chat API
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HunyuanConfig {
    /// Application ID issued by the Hunyuan console
    pub app_id: String,
    /// Secret ID paired with the secret key
    pub secret_id: String,
    /// Secret key used as HMAC key material when signing requests
    pub secret_key: SecretString,
    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: Url,
    /// Query ID attached to every request, if set
    #[serde(default)]
    pub query_id: Option<String>,
    /// Sampling temperature (0.0 to 2.0)
    #[serde(default = "default_sampling")]
    pub temperature: f64,
    /// Nucleus sampling threshold (0.0 to 1.0)
    #[serde(default = "default_sampling")]
    pub top_p: f64,
    /// Whether requests ask for a streamed response
    #[serde(default)]
    pub streaming: bool,
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("valid default URL")
}

const fn default_sampling() -> f64 {
    1.0
}

impl HunyuanConfig {
    /// Build a configuration from `HUNYUAN_*` environment variables
    ///
    /// `HUNYUAN_APP_ID`, `HUNYUAN_SECRET_ID` and `HUNYUAN_SECRET_KEY` are
    /// required; `HUNYUAN_API_BASE` overrides the default endpoint. Sampling
    /// parameters take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is unset, the base URL does
    /// not parse, or validation fails
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base = match std::env::var(API_BASE_ENV) {
            Ok(raw) => Url::parse(&raw).map_err(|e| anyhow::anyhow!("invalid {API_BASE_ENV}: {e}"))?,
            Err(_) => default_api_base(),
        };

        let config = Self {
            app_id: required_var(APP_ID_ENV)?,
            secret_id: required_var(SECRET_ID_ENV)?,
            secret_key: SecretString::from(required_var(SECRET_KEY_ENV)?),
            api_base,
            query_id: None,
            temperature: default_sampling(),
            top_p: default_sampling(),
            streaming: false,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check credentials are present and sampling parameters are in range
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending field
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.app_id.trim().is_empty() {
            anyhow::bail!("hunyuan app_id must not be empty");
        }
        if self.secret_id.trim().is_empty() {
            anyhow::bail!("hunyuan secret_id must not be empty");
        }
        if self.secret_key.expose_secret().is_empty() {
            anyhow::bail!("hunyuan secret_key must not be empty");
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            anyhow::bail!("hunyuan temperature must be between 0.0 and 2.0, got {}", self.temperature);
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            anyhow::bail!("hunyuan top_p must be between 0.0 and 1.0, got {}", self.top_p);
        }
        Ok(())
    }
}

fn required_var(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("environment variable not found: `{name}`"))
}
