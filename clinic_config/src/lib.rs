use std::{net::IpAddr, path::Path};

use anyhow::Context;
use clinic_models::email_address::EmailAddressWithName;
use config::{Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATHS_ENV: &str = "CLINIC_CONFIG";

/// Prefix of environment variables overriding single values, e.g.
/// `CLINIC__EMAIL__PASSWORD`.
pub const ENV_PREFIX: &str = "CLINIC";

/// Load the default config, the files listed in `CLINIC_CONFIG` and the
/// environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let extra_paths = std::env::var(CONFIG_PATHS_ENV).unwrap_or_default();
    let paths = std::iter::once(DEFAULT_CONFIG_PATH)
        .chain(extra_paths.split(':').filter(|path| !path.is_empty()))
        .collect::<Vec<_>>();

    load_paths(&paths)
}

/// Load and merge the given config files, then apply environment overrides.
pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    builder(paths)?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

/// Load and merge the given config files followed by inline TOML snippets.
/// The environment is ignored.
pub fn load_with_overrides(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    overrides
        .iter()
        .fold(builder(paths)?, |builder, content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn builder(
    paths: &[impl AsRef<Path>],
) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
    pub booking: Option<BookingConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddressWithName,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_url", &self.smtp_url)
            .field("from", &self.from)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Inbox receiving contact form submissions
    pub recipient: EmailAddressWithName,
    /// Phone number offered when a submission cannot be delivered
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct BookingConfig {
    pub business_id: String,
    pub script_url: Url,
    pub embed_url: Url,
}
