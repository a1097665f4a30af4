//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Where the settings record is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsBackendKind {
    /// JSON file at `settings_path`.
    File,
    /// `site_config` row in PostgreSQL.
    Postgres { database_url: String },
    /// Process memory; lost on exit.
    Memory,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Settings persistence backend (default: file).
    pub settings_backend: SettingsBackendKind,

    /// Settings file for the file backend (default: ./data/settings.json).
    pub settings_path: PathBuf,

    /// Maximum database connections in pool (default: 5).
    pub database_max_connections: u32,

    /// Prefix for registered identities (default: "devonebc_").
    pub type_prefix: String,

    /// Menu position of the first content type (default: 25).
    pub menu_position_base: u32,

    /// Menu position increment per content type (default: 5).
    pub menu_position_step: u32,

    /// Create the default "services" definition on an empty store (default: true).
    pub seed_defaults: bool,

    /// Bearer token required on admin routes. When None, admin routes are open.
    pub admin_token: Option<String>,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Cookie SameSite policy: "strict", "lax", or "none" (default: "strict").
    pub cookie_same_site: String,

    /// Send the session cookie over HTTPS only (default: true).
    pub cookie_secure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            settings_backend: SettingsBackendKind::File,
            settings_path: PathBuf::from("./data/settings.json"),
            database_max_connections: 5,
            type_prefix: "devonebc_".to_string(),
            menu_position_base: 25,
            menu_position_step: 5,
            seed_defaults: true,
            admin_token: None,
            cors_allowed_origins: vec!["*".to_string()],
            cookie_same_site: "strict".to_string(),
            cookie_secure: true,
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{name} must be a boolean, got '{other}'"),
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let settings_backend = match env::var("SETTINGS_BACKEND")
            .unwrap_or_else(|_| "file".to_string())
            .to_lowercase()
            .as_str()
        {
            "file" => SettingsBackendKind::File,
            "memory" => SettingsBackendKind::Memory,
            "postgres" => SettingsBackendKind::Postgres {
                database_url: env::var("DATABASE_URL")
                    .context("DATABASE_URL is required when SETTINGS_BACKEND=postgres")?,
            },
            other => bail!("SETTINGS_BACKEND must be file, postgres or memory, got '{other}'"),
        };

        let settings_path = env::var("SETTINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.settings_path);

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let type_prefix = env::var("TYPE_PREFIX").unwrap_or(defaults.type_prefix);

        let menu_position_base = env::var("MENU_POSITION_BASE")
            .unwrap_or_else(|_| "25".to_string())
            .parse()
            .context("MENU_POSITION_BASE must be a valid u32")?;

        let menu_position_step = env::var("MENU_POSITION_STEP")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("MENU_POSITION_STEP must be a valid u32")?;

        let seed_defaults = env::var("SEED_DEFAULTS")
            .map(|v| parse_bool("SEED_DEFAULTS", &v))
            .unwrap_or(Ok(true))?;

        let admin_token = env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let cookie_same_site = env::var("COOKIE_SAME_SITE")
            .unwrap_or_else(|_| "strict".to_string())
            .to_lowercase();

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| parse_bool("COOKIE_SECURE", &v))
            .unwrap_or(Ok(true))?;

        Ok(Self {
            port,
            settings_backend,
            settings_path,
            database_max_connections,
            type_prefix,
            menu_position_base,
            menu_position_step,
            seed_defaults,
            admin_token,
            cors_allowed_origins,
            cookie_same_site,
            cookie_secure,
        })
    }

    /// Configuration for tests: in-memory settings, no seeding, insecure
    /// cookies.
    pub fn for_tests() -> Self {
        Self {
            settings_backend: SettingsBackendKind::Memory,
            seed_defaults: false,
            cookie_secure: false,
            ..Self::default()
        }
    }
}
