//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Upper bound for `api.max_embed_depth`.
pub const MAX_EMBED_DEPTH_LIMIT: usize = 256;

/// Validate a merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_api(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_api(config: &Config) -> ConfigResult<()> {
    let base = &config.api.base_path;
    if !base.is_empty() && (!base.starts_with('/') || base.ends_with('/') || base.contains("//")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_path".to_owned(),
            message: format!(
                "'{base}' must be empty or start with '/' and have no trailing or repeated '/'"
            ),
        });
    }

    let depth = config.api.max_embed_depth;
    if depth == 0 || depth > MAX_EMBED_DEPTH_LIMIT {
        return Err(ConfigError::ValidationError {
            field: "api.max_embed_depth".to_owned(),
            message: format!("{depth} is out of range; must be between 1 and {MAX_EMBED_DEPTH_LIMIT}"),
        });
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        });
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        });
    }

    if let Some(empty) = config.logging.directives.iter().position(|d| d.trim().is_empty()) {
        return Err(ConfigError::ValidationError {
            field: format!("logging.directives[{empty}]"),
            message: "directive must not be empty".to_owned(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_base_path_rules() {
        for good in ["", "/api", "/api/v1"] {
            let mut config = Config::default();
            config.api.base_path = good.to_owned();
            assert!(validate(&config).is_ok(), "{good}");
        }
        for bad in ["api", "/api/", "//api", "/"] {
            let mut config = Config::default();
            config.api.base_path = bad.to_owned();
            assert!(validate(&config).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_embed_depth_bounds() {
        let mut config = Config::default();
        config.api.max_embed_depth = 0;
        assert!(validate(&config).is_err());
        config.api.max_embed_depth = MAX_EMBED_DEPTH_LIMIT;
        assert!(validate(&config).is_ok());
        config.api.max_embed_depth = MAX_EMBED_DEPTH_LIMIT.saturating_add(1);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_logging() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_owned();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("logging.level"));

        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.logging.directives = vec!["halyard=debug".to_owned(), " ".to_owned()];
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("logging.directives[1]"));
    }
}
