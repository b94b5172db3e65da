//! Configuration management

use serde::{Deserialize, Serialize};

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/amino";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 2;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default database idle timeout in seconds (10 minutes).
pub const DEFAULT_DATABASE_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

// ============================================================================
// Source Connector Constants
// ============================================================================

/// Per-connector deadline in seconds.
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_SOURCE_USER_AGENT: &str = concat!("amino/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_UNIPROT_BASE_URL: &str = "https://rest.uniprot.org";
pub const DEFAULT_NCBI_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
pub const DEFAULT_RCSB_SEARCH_URL: &str = "https://search.rcsb.org";
pub const DEFAULT_RCSB_DATA_URL: &str = "https://data.rcsb.org";
pub const DEFAULT_ALPHAFOLD_BASE_URL: &str = "https://alphafold.ebi.ac.uk/api";
pub const DEFAULT_STRING_BASE_URL: &str = "https://string-db.org/api";
pub const DEFAULT_DISGENET_BASE_URL: &str = "https://www.disgenet.org/api";

/// Minimum STRING combined score (0-1000) for an interaction to be reported.
pub const DEFAULT_STRING_REQUIRED_SCORE: u32 = 400;

/// Maximum number of STRING interaction partners.
pub const DEFAULT_STRING_LIMIT: u32 = 10;

/// Maximum number of PDB entries detailed per query.
pub const DEFAULT_PDB_MAX_STRUCTURES: usize = 10;

/// NCBI taxonomy id used to restrict searches to human.
pub const HUMAN_TAXON_ID: u32 = 9606;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub sources: SourcesConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// External data source configuration
///
/// Base URLs are overridable so the connectors can point at mirrors or at a
/// local mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub uniprot_base_url: String,
    pub ncbi_base_url: String,
    #[serde(skip_serializing)]
    pub ncbi_api_key: Option<String>,
    pub rcsb_search_url: String,
    pub rcsb_data_url: String,
    pub alphafold_base_url: String,
    pub string_base_url: String,
    pub string_required_score: u32,
    pub string_limit: u32,
    pub disgenet_base_url: String,
    #[serde(skip_serializing)]
    pub disgenet_api_key: Option<String>,
    pub pdb_max_structures: usize,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: env_or("AMINO_HOST", DEFAULT_SERVER_HOST),
                port: env_parse("AMINO_PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_parse(
                    "AMINO_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                ),
            },
            database: DatabaseConfig {
                url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
                max_connections: env_parse(
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                ),
                min_connections: env_parse(
                    "DATABASE_MIN_CONNECTIONS",
                    DEFAULT_DATABASE_MIN_CONNECTIONS,
                ),
                connect_timeout_secs: env_parse(
                    "DATABASE_CONNECT_TIMEOUT",
                    DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                ),
                idle_timeout_secs: env_parse(
                    "DATABASE_IDLE_TIMEOUT",
                    DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
                ),
            },
            cors: CorsConfig {
                allowed_origins: env_or("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ALLOWED_ORIGIN)
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_parse("CORS_ALLOW_CREDENTIALS", true),
            },
            sources: SourcesConfig::from_env(),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Database min_connections ({}) cannot be greater than max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        self.sources.validate()
    }
}

impl SourcesConfig {
    /// Read source settings from the environment, falling back to the public endpoints
    pub fn from_env() -> Self {
        Self {
            timeout_secs: env_parse("SOURCE_TIMEOUT_SECS", DEFAULT_SOURCE_TIMEOUT_SECS),
            user_agent: env_or("SOURCE_USER_AGENT", DEFAULT_SOURCE_USER_AGENT),
            uniprot_base_url: env_or("UNIPROT_BASE_URL", DEFAULT_UNIPROT_BASE_URL),
            ncbi_base_url: env_or("NCBI_BASE_URL", DEFAULT_NCBI_BASE_URL),
            ncbi_api_key: env_opt("NCBI_API_KEY"),
            rcsb_search_url: env_or("RCSB_SEARCH_URL", DEFAULT_RCSB_SEARCH_URL),
            rcsb_data_url: env_or("RCSB_DATA_URL", DEFAULT_RCSB_DATA_URL),
            alphafold_base_url: env_or("ALPHAFOLD_BASE_URL", DEFAULT_ALPHAFOLD_BASE_URL),
            string_base_url: env_or("STRING_BASE_URL", DEFAULT_STRING_BASE_URL),
            string_required_score: env_parse(
                "STRING_REQUIRED_SCORE",
                DEFAULT_STRING_REQUIRED_SCORE,
            ),
            string_limit: env_parse("STRING_LIMIT", DEFAULT_STRING_LIMIT),
            disgenet_base_url: env_or("DISGENET_BASE_URL", DEFAULT_DISGENET_BASE_URL),
            disgenet_api_key: env_opt("DISGENET_API_KEY"),
            pdb_max_structures: env_parse("PDB_MAX_STRUCTURES", DEFAULT_PDB_MAX_STRUCTURES),
        }
    }

    /// Point every HTTP connector at one base URL
    ///
    /// Used by tests that serve all upstream APIs from a single mock server;
    /// paths stay distinct because each connector keeps its own path layout.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            uniprot_base_url: base.clone(),
            ncbi_base_url: base.clone(),
            rcsb_search_url: base.clone(),
            rcsb_data_url: base.clone(),
            alphafold_base_url: base.clone(),
            string_base_url: base.clone(),
            disgenet_base_url: base,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("SOURCE_TIMEOUT_SECS must be greater than 0");
        }

        if self.pdb_max_structures == 0 {
            anyhow::bail!("PDB_MAX_STRUCTURES must be greater than 0");
        }

        if self.string_required_score > 1000 {
            anyhow::bail!(
                "STRING_REQUIRED_SCORE must be between 0 and 1000, got {}",
                self.string_required_score
            );
        }

        for (name, url) in [
            ("UNIPROT_BASE_URL", &self.uniprot_base_url),
            ("NCBI_BASE_URL", &self.ncbi_base_url),
            ("RCSB_SEARCH_URL", &self.rcsb_search_url),
            ("RCSB_DATA_URL", &self.rcsb_data_url),
            ("ALPHAFOLD_BASE_URL", &self.alphafold_base_url),
            ("STRING_BASE_URL", &self.string_base_url),
            ("DISGENET_BASE_URL", &self.disgenet_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://, got '{}'", name, url);
            }
        }

        Ok(())
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_SOURCE_TIMEOUT_SECS,
            user_agent: DEFAULT_SOURCE_USER_AGENT.to_string(),
            uniprot_base_url: DEFAULT_UNIPROT_BASE_URL.to_string(),
            ncbi_base_url: DEFAULT_NCBI_BASE_URL.to_string(),
            ncbi_api_key: None,
            rcsb_search_url: DEFAULT_RCSB_SEARCH_URL.to_string(),
            rcsb_data_url: DEFAULT_RCSB_DATA_URL.to_string(),
            alphafold_base_url: DEFAULT_ALPHAFOLD_BASE_URL.to_string(),
            string_base_url: DEFAULT_STRING_BASE_URL.to_string(),
            string_required_score: DEFAULT_STRING_REQUIRED_SCORE,
            string_limit: DEFAULT_STRING_LIMIT,
            disgenet_base_url: DEFAULT_DISGENET_BASE_URL.to_string(),
            disgenet_api_key: None,
            pdb_max_structures: DEFAULT_PDB_MAX_STRUCTURES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                idle_timeout_secs: DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
            sources: SourcesConfig::default(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_min_above_max_connections() {
        let mut config = Config::default();
        config.database.min_connections = 20;
        config.database.max_connections = 5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_connections"));
    }

    #[test]
    fn test_rejects_zero_source_timeout() {
        let mut config = Config::default();
        config.sources.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.sources.string_base_url = "ftp://string-db.org".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("STRING_BASE_URL"));
    }

    #[test]
    fn test_with_base_url_points_every_connector_at_mock() {
        let sources = SourcesConfig::with_base_url("http://127.0.0.1:9999/");
        assert_eq!(sources.uniprot_base_url, "http://127.0.0.1:9999");
        assert_eq!(sources.disgenet_base_url, "http://127.0.0.1:9999");
        assert_eq!(sources.timeout_secs, DEFAULT_SOURCE_TIMEOUT_SECS);
        assert!(sources.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_sources_from_env_overrides() {
        std::env::set_var("STRING_REQUIRED_SCORE", "700");
        std::env::set_var("DISGENET_API_KEY", "  ");
        std::env::set_var("PDB_MAX_STRUCTURES", "not-a-number");

        let sources = SourcesConfig::from_env();
        assert_eq!(sources.string_required_score, 700);
        assert_eq!(sources.disgenet_api_key, None);
        assert_eq!(sources.pdb_max_structures, DEFAULT_PDB_MAX_STRUCTURES);

        std::env::remove_var("STRING_REQUIRED_SCORE");
        std::env::remove_var("DISGENET_API_KEY");
        std::env::remove_var("PDB_MAX_STRUCTURES");
    }
}
