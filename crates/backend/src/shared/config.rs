use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub shop: ShopConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Maximum match score (0 = perfect) for a product to appear in search results
    #[serde(default = "default_search_threshold")]
    pub search_threshold: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_threshold: default_search_threshold(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ShopConfig {
    /// Address used for "Contact for Price" inquiries; empty disables the link
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// HS256 secret shared with the admin login surface
    #[serde(default)]
    pub jwt_secret: String,
}

fn default_port() -> u16 {
    3000
}

fn default_search_threshold() -> f64 {
    0.4
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/catalog.db"

[server]
port = 3000

[catalog]
search_threshold = 0.4

[shop]
email = ""

[auth]
jwt_secret = ""
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Store the loaded configuration for handlers
pub fn install(config: Config) -> anyhow::Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Configuration is already installed"))
}

/// Installed configuration, or the embedded default when nothing was installed
pub fn current() -> Config {
    match CONFIG.get() {
        Some(config) => config.clone(),
        None => embedded_default(),
    }
}

fn embedded_default() -> Config {
    Config {
        database: DatabaseConfig {
            path: "target/db/catalog.db".to_string(),
        },
        server: ServerConfig::default(),
        catalog: CatalogConfig::default(),
        shop: ShopConfig::default(),
        auth: AuthConfig::default(),
    }
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/catalog.db");
        assert_eq!(config.server.port, 3000);
        assert!((config.catalog.search_threshold - 0.4).abs() < f64::EPSILON);
        assert!(config.shop.email.is_empty());
    }

    #[test]
    fn test_optional_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert!((config.catalog.search_threshold - 0.4).abs() < f64::EPSILON);
        assert!(config.auth.jwt_secret.is_empty());
    }

    #[test]
    fn test_embedded_default_matches_text() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        let built = embedded_default();
        assert_eq!(parsed.database.path, built.database.path);
        assert_eq!(parsed.server.port, built.server.port);
    }
}
