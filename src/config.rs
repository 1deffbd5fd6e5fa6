//! Server configuration from environment variables

use crate::types::SessionConfig;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Served as the fallback for non-API routes (client build output)
    pub static_dir: PathBuf,
    /// Optional JSON word list replacing the built-in catalog
    pub words_file: Option<PathBuf>,
    pub max_description_rounds: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            words_file: None,
            max_description_rounds: SessionConfig::default().max_description_rounds,
        }
    }
}

impl ServerConfig {
    /// Load config from environment variables.
    /// Unparseable values fall back to defaults with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = non_empty_var("HOST").unwrap_or(defaults.host);
        let port = parse_var::<u16>("PORT").unwrap_or(defaults.port);
        let static_dir = non_empty_var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);
        let words_file = non_empty_var("WORDS_FILE").map(PathBuf::from);
        let max_description_rounds = parse_var::<u32>("MAX_DESCRIPTION_ROUNDS")
            .filter(|&rounds| rounds > 0)
            .unwrap_or(defaults.max_description_rounds);

        Self {
            host,
            port,
            static_dir,
            words_file,
            max_description_rounds,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_description_rounds: self.max_description_rounds,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = non_empty_var(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}
