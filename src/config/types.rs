use serde::{Deserialize, Serialize};
use crate::stats::{SingleRunPolicy, StabilityOptions, StabilitySignal};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DB_PATH: &str = "./data/fixstats.db";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FixstatsConfig {
    pub server: Option<ServerConfig>,
    pub database: Option<DatabaseConfig>,
    pub stability: Option<StabilityConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Browser origins allowed to call the API.
    pub cors_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    /// SQLite file path. `$NAME` reads the path from the environment.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StabilityConfig {
    pub signal: Option<StabilitySignal>,
    pub single_run_policy: Option<SingleRunPolicy>,
}

impl FixstatsConfig {
    pub fn host(&self) -> String {
        self.server.as_ref()
            .and_then(|s| s.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.server.as_ref()
            .and_then(|s| s.cors_origins.clone())
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()])
    }

    pub fn db_path(&self) -> String {
        self.database.as_ref()
            .and_then(|d| d.path.clone())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
    }

    pub fn stability_options(&self) -> StabilityOptions {
        let stability = self.stability.clone().unwrap_or_default();
        StabilityOptions {
            signal: stability.signal.unwrap_or_default(),
            single_run_policy: stability.single_run_policy.unwrap_or_default(),
        }
    }
}
