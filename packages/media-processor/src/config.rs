use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
/// アップロードの最大サイズ（50MiB）
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value `{value}`: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// サーバー設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// 環境変数から設定を読み込む。
    ///
    /// 任意の環境変数:
    /// - HOST (default: 0.0.0.0)
    /// - PORT (default: 8080)
    /// - MAX_UPLOAD_BYTES (default: 52428800)
    /// - LOG_LEVEL (default: info、RUST_LOG があればそちらが優先)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST").filter(|v| !v.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                value: port.clone(),
                reason: format!("{e}"),
            })?;
        }

        if let Some(limit) = lookup("MAX_UPLOAD_BYTES") {
            let parsed: usize = limit.trim().parse().map_err(|e| ConfigError::Invalid {
                name: "MAX_UPLOAD_BYTES",
                value: limit.clone(),
                reason: format!("{e}"),
            })?;
            if parsed == 0 {
                return Err(ConfigError::Invalid {
                    name: "MAX_UPLOAD_BYTES",
                    value: limit,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.max_upload_bytes = parsed;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            let normalized = level.trim().to_ascii_lowercase();
            if !LOG_LEVELS.contains(&normalized.as_str()) {
                return Err(ConfigError::Invalid {
                    name: "LOG_LEVEL",
                    value: level,
                    reason: format!("expected one of {}", LOG_LEVELS.join(", ")),
                });
            }
            config.log_level = normalized;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("LOG_LEVEL", "DEBUG"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_port() {
        let result = AppConfig::from_lookup(lookup_from(&[("PORT", "http")]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "PORT", .. })));
    }

    #[test]
    fn test_invalid_upload_limit() {
        assert!(AppConfig::from_lookup(lookup_from(&[("MAX_UPLOAD_BYTES", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("MAX_UPLOAD_BYTES", "-5")])).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let result = AppConfig::from_lookup(lookup_from(&[("LOG_LEVEL", "verbose")]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "LOG_LEVEL", .. })));
    }
}
