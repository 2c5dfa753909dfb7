//! Configuration loading from disk and command-line overrides.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Overrides taken from the command line or environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replaces `listener.bind_address`.
    pub bind_address: Option<String>,
    /// Replaces only the port of the bind address.
    pub port: Option<u16>,
}

/// Parse configuration from TOML text without validating it.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Build the effective configuration: file (or defaults), then overrides,
/// then validation.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    apply_overrides(&mut config, overrides);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_overrides(config: &mut ServiceConfig, overrides: &Overrides) {
    if let Some(bind) = &overrides.bind_address {
        config.listener.bind_address = bind.clone();
    }

    if let Some(port) = overrides.port {
        // Unparseable addresses are left for validation to report.
        if let Ok(mut addr) = config.listener.bind_address.parse::<SocketAddr>() {
            addr.set_port(port);
            config.listener.bind_address = addr.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.limits.request_timeout_secs, 30);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.limits.max_body_bytes, 64 * 1024);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse_config("[listener\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn port_override_replaces_only_port() {
        let overrides = Overrides {
            bind_address: Some("127.0.0.1:8080".into()),
            port: Some(3000),
        };
        let config = resolve_config(None, &overrides).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn invalid_override_fails_validation() {
        let overrides = Overrides {
            bind_address: Some("localhost".into()),
            port: Some(3000),
        };
        let err = resolve_config(None, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = resolve_config(Some(Path::new("/nonexistent/product.toml")), &Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
