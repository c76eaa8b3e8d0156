use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Allowed CORS origins. Defaults to localhost dev ports.
    /// Set BACKOFFICE__API__CORS_ALLOWED_ORIGINS (comma-separated) in production.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiry")]
    pub jwt_expiry_hours: u64,
}

fn default_bind() -> String { "0.0.0.0".to_string() }
fn default_api_port() -> u16 { 8080 }
fn default_db_path() -> String { "./backoffice.db".to_string() }
fn default_jwt_expiry() -> u64 { 8 }
fn default_cors_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";
const MIN_JWT_SECRET_LEN: usize = 32;
const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 365;

pub fn validate(cfg: &Config) -> Result<()> {
    if cfg.auth.jwt_secret == DEFAULT_JWT_SECRET {
        anyhow::bail!(
            "SECURITY ERROR: JWT secret must be changed from default value '{}'. \
            Set BACKOFFICE__AUTH__JWT_SECRET environment variable with a strong random value.",
            DEFAULT_JWT_SECRET
        );
    }

    if cfg.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
        anyhow::bail!(
            "CONFIG ERROR: JWT secret must be at least {} characters (current: {})",
            MIN_JWT_SECRET_LEN,
            cfg.auth.jwt_secret.len()
        );
    }

    if cfg.auth.jwt_expiry_hours == 0 {
        anyhow::bail!("CONFIG ERROR: auth.jwt_expiry_hours must be greater than zero");
    }

    if cfg.auth.jwt_expiry_hours > MAX_JWT_EXPIRY_HOURS {
        anyhow::bail!(
            "CONFIG ERROR: auth.jwt_expiry_hours must be at most {} (current: {})",
            MAX_JWT_EXPIRY_HOURS,
            cfg.auth.jwt_expiry_hours
        );
    }

    // In-memory databases have no directory to check.
    if cfg.database.path != ":memory:" {
        if let Some(parent) = std::path::Path::new(&cfg.database.path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                anyhow::bail!(
                    "CONFIG ERROR: Database directory does not exist: {}",
                    parent.display()
                );
            }
        }
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("BACKOFFICE")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("api.cors_allowed_origins")
}

pub fn load() -> Result<Config> {
    let cfg = build(env_source())?;
    validate(&cfg)?;
    Ok(cfg)
}

fn build(env: config::Environment) -> Result<Config> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(env)
        .set_default("api.bind", "0.0.0.0")?
        .set_default("api.port", 8080)?
        .set_default("database.path", "./backoffice.db")?
        .set_default("auth.jwt_secret", DEFAULT_JWT_SECRET)?
        .set_default("auth.jwt_expiry_hours", 8)?
        .build()?
        .try_deserialize()?;

    Ok(cfg)
}
