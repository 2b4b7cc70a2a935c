//! Bridge from `halyard_config::Config` to runtime and telemetry types.
//!
//! The config crate has no dependencies on other internal crates; the
//! conversion into domain types happens here, once.

use halyard_config::Config;
use halyard_telemetry::{LogConfig, LogFormat};

use crate::api::ApiSettings;

/// Convert config to [`ApiSettings`].
#[must_use]
pub fn to_api_settings(cfg: &Config) -> ApiSettings {
    ApiSettings {
        base_path: cfg.api.base_path.clone(),
        max_embed_depth: cfg.api.max_embed_depth,
        pretty_json: cfg.api.pretty_json,
    }
}

/// Convert config to [`LogConfig`].
///
/// The format string was validated when the config was loaded; an
/// unknown value falls back to the default format.
#[must_use]
pub fn to_log_config(cfg: &Config) -> LogConfig {
    let format = cfg
        .logging
        .format
        .parse::<LogFormat>()
        .unwrap_or_default();

    cfg.logging.directives.iter().fold(
        LogConfig::new(&cfg.logging.level).with_format(format),
        |log, directive| log.with_directive(directive),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_api_settings() {
        let mut cfg = Config::default();
        cfg.api.base_path = "/v1".to_owned();
        cfg.api.max_embed_depth = 3;

        let settings = to_api_settings(&cfg);
        assert_eq!(settings.base_path, "/v1");
        assert_eq!(settings.max_embed_depth, 3);
        assert!(settings.pretty_json);
    }

    #[test]
    fn test_to_log_config() {
        let mut cfg = Config::default();
        cfg.logging.level = "debug".to_owned();
        cfg.logging.format = "json".to_owned();
        cfg.logging.directives = vec!["halyard_graph=trace".to_owned()];

        let log = to_log_config(&cfg);
        assert_eq!(log.level, "debug");
        assert_eq!(log.format, LogFormat::Json);
        assert_eq!(log.directives, vec!["halyard_graph=trace"]);
    }

    #[test]
    fn test_unknown_format_falls_back() {
        let mut cfg = Config::default();
        cfg.logging.format = "xml".to_owned();
        assert_eq!(to_log_config(&cfg).format, LogFormat::Compact);
    }
}
