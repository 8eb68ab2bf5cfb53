use std::path::Path;
use crate::errors::FixstatsError;
use super::env::resolve_env;
use super::types::FixstatsConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<FixstatsConfig, FixstatsError> {
    if !path.exists() {
        return Err(FixstatsError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(FixstatsError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse configuration from YAML text.
pub fn parse_config_str(content: &str) -> Result<FixstatsConfig, FixstatsError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    if yaml.is_null() {
        return Ok(FixstatsConfig::default());
    }

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let mut config: FixstatsConfig = serde_yaml::from_value(yaml)?;

    validate_conflicts(&config)?;
    resolve_env_refs(&mut config);

    Ok(config)
}

/// Load the config file when one is given, otherwise use defaults.
pub async fn load_config(path: Option<&str>) -> Result<FixstatsConfig, FixstatsError> {
    match path {
        Some(p) => parse_config(Path::new(p)).await,
        None => Ok(FixstatsConfig::default()),
    }
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), FixstatsError> {
    // Convert YAML value to JSON for schema validation
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| FixstatsError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| FixstatsError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| FixstatsError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only: typed parsing below rejects anything unusable.
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &FixstatsConfig) -> Result<(), FixstatsError> {
    if let Some(server) = &config.server {
        if server.port == Some(0) {
            return Err(FixstatsError::Config("server.port must be between 1 and 65535".into()));
        }
        if let Some(origins) = &server.cors_origins {
            if origins.iter().any(|o| o.trim().is_empty()) {
                return Err(FixstatsError::Config("server.cors_origins contains an empty origin".into()));
            }
            if origins.is_empty() {
                warn!("No CORS origins configured; browser clients will be rejected");
            }
        }
    }

    if let Some(db) = &config.database {
        if db.path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(FixstatsError::Config("database.path must not be empty".into()));
        }
    }

    Ok(())
}

fn resolve_env_refs(config: &mut FixstatsConfig) {
    if let Some(db) = config.database.as_mut() {
        if let Some(path) = db.path.as_mut() {
            *path = resolve_env(path);
        }
    }
    if let Some(server) = config.server.as_mut() {
        if let Some(host) = server.host.as_mut() {
            *host = resolve_env(host);
        }
        if let Some(origins) = server.cors_origins.as_mut() {
            for origin in origins.iter_mut() {
                *origin = resolve_env(origin);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{SingleRunPolicy, StabilitySignal};

    #[test]
    fn test_parse_full_config() {
        let config = parse_config_str(
            "server:\n  host: 127.0.0.1\n  port: 9000\n  cors_origins:\n    - http://localhost:3000\n\
             database:\n  path: /var/lib/fixstats/fixstats.db\n\
             stability:\n  signal: false_positives\n  single_run_policy: omit\n",
        ).unwrap();
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 9000);
        assert_eq!(config.cors_origins(), vec!["http://localhost:3000".to_string()]);
        assert_eq!(config.db_path(), "/var/lib/fixstats/fixstats.db");
        let options = config.stability_options();
        assert_eq!(options.signal, StabilitySignal::FalsePositives);
        assert_eq!(options.single_run_policy, SingleRunPolicy::Omit);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("").unwrap();
        assert_eq!(config.port(), 8000);
    }

    #[test]
    fn test_parse_config_unknown_signal() {
        assert!(parse_config_str("stability:\n  signal: warnings\n").is_err());
    }

    #[test]
    fn test_validate_conflicts_port_zero() {
        let err = parse_config_str("server:\n  port: 0\n").unwrap_err();
        assert!(matches!(err, FixstatsError::Config(_)));
    }

    #[test]
    fn test_validate_conflicts_empty_origin() {
        let err = parse_config_str("server:\n  cors_origins: ['']\n").unwrap_err();
        assert!(matches!(err, FixstatsError::Config(_)));
    }

    #[test]
    fn test_validate_conflicts_empty_config() {
        let config = FixstatsConfig::default();
        assert!(validate_conflicts(&config).is_ok());
    }

    #[test]
    fn test_db_path_from_environment() {
        std::env::set_var("FIXSTATS_PARSER_TEST_DB", "/tmp/from-env.db");
        let config = parse_config_str("database:\n  path: $FIXSTATS_PARSER_TEST_DB\n").unwrap();
        assert_eq!(config.db_path(), "/tmp/from-env.db");
    }

    #[tokio::test]
    async fn test_parse_config_missing_file() {
        let err = parse_config(Path::new("/nonexistent/fixstats.yaml")).await.unwrap_err();
        assert!(matches!(err, FixstatsError::Config(_)));
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fixstats.yaml");
        std::fs::write(&path, "server:\n  port: 8123\n").unwrap();
        let config = load_config(path.to_str()).await.unwrap();
        assert_eq!(config.port(), 8123);
        assert_eq!(load_config(None).await.unwrap().port(), 8000);
    }
}
