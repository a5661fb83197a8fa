mod file_config;

pub use file_config::{FileConfig, LimitsConfig};

use crate::server::RequestsLoggingLevel;
use crate::views::ViewLimits;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_VIEW_LOAD_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    pub view_load_timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    /// 0 disables the timeout.
    pub view_load_timeout_ms: u64,

    pub limits: LimitsSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsSettings {
    pub max_uuid_batch: usize,
    pub max_password_batch: usize,
    pub max_body_bytes: usize,
}

impl Default for LimitsSettings {
    fn default() -> Self {
        let views = ViewLimits::default();
        Self {
            max_uuid_batch: views.max_uuid_batch,
            max_password_batch: views.max_password_batch,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if port == metrics_port {
            bail!("port and metrics_port must differ (both are {})", port);
        }

        let logging_level = match file.logging_level {
            Some(level) => parse_logging_level(&level)
                .ok_or_else(|| anyhow::anyhow!("Invalid logging_level in config file: {}", level))?,
            None => cli.logging_level.clone(),
        };

        let content_cache_age_sec = file
            .content_cache_age_sec
            .unwrap_or(cli.content_cache_age_sec);

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());
        if let Some(dir) = &frontend_dir_path {
            if !Path::new(dir).is_dir() {
                bail!("Frontend directory does not exist: {:?}", dir);
            }
        }

        let view_load_timeout_ms = file
            .view_load_timeout_ms
            .unwrap_or(cli.view_load_timeout_ms);

        let defaults = LimitsSettings::default();
        let limits_file = file.limits.unwrap_or_default();
        let limits = LimitsSettings {
            max_uuid_batch: limits_file
                .max_uuid_batch
                .unwrap_or(defaults.max_uuid_batch),
            max_password_batch: limits_file
                .max_password_batch
                .unwrap_or(defaults.max_password_batch),
            max_body_bytes: limits_file
                .max_body_bytes
                .unwrap_or(defaults.max_body_bytes),
        };
        if limits.max_uuid_batch == 0 || limits.max_password_batch == 0 {
            bail!("Batch limits must be positive: {:?}", limits);
        }
        if limits.max_body_bytes == 0 {
            bail!("max_body_bytes must be positive");
        }

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            content_cache_age_sec,
            frontend_dir_path,
            view_load_timeout_ms,
            limits,
        })
    }

    pub fn view_limits(&self) -> ViewLimits {
        ViewLimits {
            max_uuid_batch: self.limits.max_uuid_batch,
            max_password_batch: self.limits.max_password_batch,
        }
    }

    pub fn view_load_timeout(&self) -> Option<Duration> {
        match self.view_load_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn cli() -> CliConfig {
        CliConfig {
            port: 3001,
            metrics_port: 9091,
            logging_level: RequestsLoggingLevel::Path,
            content_cache_age_sec: 3600,
            frontend_dir_path: None,
            view_load_timeout_ms: DEFAULT_VIEW_LOAD_TIMEOUT_MS,
        }
    }

    #[test]
    fn test_parse_logging_level() {
        assert!(matches!(
            parse_logging_level("none"),
            Some(RequestsLoggingLevel::None)
        ));
        assert!(matches!(
            parse_logging_level("headers"),
            Some(RequestsLoggingLevel::Headers)
        ));
        // Case insensitive
        assert!(matches!(
            parse_logging_level("BODY"),
            Some(RequestsLoggingLevel::Body)
        ));
        assert!(parse_logging_level("invalid").is_none());
    }

    #[test]
    fn test_resolve_cli_only() {
        let frontend = TempDir::new().unwrap();
        let cli = CliConfig {
            frontend_dir_path: Some(frontend.path().to_string_lossy().to_string()),
            ..cli()
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(config.metrics_port, 9091);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Path);
        assert_eq!(config.content_cache_age_sec, 3600);
        assert!(config.frontend_dir_path.is_some());
        assert_eq!(config.limits, LimitsSettings::default());
        assert_eq!(
            config.view_load_timeout(),
            Some(Duration::from_millis(DEFAULT_VIEW_LOAD_TIMEOUT_MS))
        );
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let file_config = FileConfig {
            port: Some(4000),
            logging_level: Some("body".to_string()),
            view_load_timeout_ms: Some(0),
            limits: Some(LimitsConfig {
                max_uuid_batch: Some(20),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli(), Some(file_config)).unwrap();

        // TOML values should override CLI
        assert_eq!(config.port, 4000);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Body);
        assert_eq!(config.view_load_timeout(), None);
        assert_eq!(config.view_limits().max_uuid_batch, 20);
        // CLI value used when TOML doesn't specify
        assert_eq!(config.metrics_port, 9091);
        assert_eq!(config.content_cache_age_sec, 3600);
        assert_eq!(config.limits.max_password_batch, 50);
    }

    #[test]
    fn test_load_file_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port = 5000\nlogging_level = \"headers\"\n\n[limits]\nmax_body_bytes = 1024\n"
        )
        .unwrap();

        let file_config = FileConfig::load(file.path()).unwrap();
        assert_eq!(file_config.port, Some(5000));

        let config = AppConfig::resolve(&cli(), Some(file_config)).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Headers);
        assert_eq!(config.limits.max_body_bytes, 1024);
    }

    #[test]
    fn test_load_invalid_file_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();
        assert!(FileConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_resolve_invalid_logging_level_error() {
        let file_config = FileConfig {
            logging_level: Some("verbose".to_string()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli(), Some(file_config));
        assert!(result.unwrap_err().to_string().contains("logging_level"));
    }

    #[test]
    fn test_resolve_nonexistent_frontend_dir_error() {
        let cli = CliConfig {
            frontend_dir_path: Some("/nonexistent/path/that/should/not/exist".to_string()),
            ..cli()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_same_ports_error() {
        let cli = CliConfig {
            metrics_port: 3001,
            ..cli()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }

    #[test]
    fn test_resolve_zero_limits_error() {
        let file_config = FileConfig {
            limits: Some(LimitsConfig {
                max_password_batch: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli(), Some(file_config)).is_err());
    }
}
