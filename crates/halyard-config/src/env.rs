use std::collections::HashMap;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::set_path;

/// Prefix of every variable this crate reads.
pub const ENV_PREFIX: &str = "HALYARD_";

#[derive(Debug, Clone, Copy)]
enum Kind {
    String,
    Integer,
    Bool,
}

/// Variable name, dotted config path, value kind.
const OVERRIDES: &[(&str, &str, Kind)] = &[
    ("HALYARD_BASE_PATH", "api.base_path", Kind::String),
    ("HALYARD_MAX_EMBED_DEPTH", "api.max_embed_depth", Kind::Integer),
    ("HALYARD_PRETTY_JSON", "api.pretty_json", Kind::Bool),
    ("HALYARD_LOG_LEVEL", "logging.level", Kind::String),
    ("HALYARD_LOG_FORMAT", "logging.format", Kind::String),
];

/// Snapshot of the `HALYARD_*` variables in the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with(ENV_PREFIX))
        .collect()
}

/// Apply environment overrides to a merged value tree. Returns how many
/// variables were applied.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] if a numeric or boolean
/// variable does not parse.
pub fn apply_env_overrides(
    merged: &mut toml::Value,
    env_vars: &HashMap<String, String>,
) -> ConfigResult<usize> {
    let mut applied = 0usize;
    for &(var, path, kind) in OVERRIDES {
        let Some(raw) = env_vars.get(var) else {
            continue;
        };
        let value = parse_value(raw.trim(), kind).ok_or_else(|| ConfigError::ValidationError {
            field: path.to_owned(),
            message: format!("{var}='{raw}' is not a valid {kind:?}"),
        })?;
        tracing::debug!(var, path, "applying environment override");
        set_path(merged, path, value);
        applied = applied.saturating_add(1);
    }
    Ok(applied)
}

fn parse_value(raw: &str, kind: Kind) -> Option<toml::Value> {
    match kind {
        Kind::String => Some(toml::Value::String(raw.to_owned())),
        Kind::Integer => raw.parse::<i64>().ok().map(toml::Value::Integer),
        Kind::Bool => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(toml::Value::Boolean(true)),
            "false" | "0" | "no" | "off" => Some(toml::Value::Boolean(false)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_overrides_are_typed() {
        let mut merged = toml::Value::Table(toml::map::Map::new());
        let applied = apply_env_overrides(
            &mut merged,
            &env(&[
                ("HALYARD_BASE_PATH", "/api"),
                ("HALYARD_MAX_EMBED_DEPTH", " 4 "),
                ("HALYARD_PRETTY_JSON", "off"),
                ("HALYARD_UNRELATED", "x"),
            ]),
        )
        .unwrap();

        assert_eq!(applied, 3);
        assert_eq!(merged["api"]["base_path"].as_str(), Some("/api"));
        assert_eq!(merged["api"]["max_embed_depth"].as_integer(), Some(4));
        assert_eq!(merged["api"]["pretty_json"].as_bool(), Some(false));
    }

    #[test]
    fn test_malformed_override_is_rejected() {
        let mut merged = toml::Value::Table(toml::map::Map::new());
        let err = apply_env_overrides(&mut merged, &env(&[("HALYARD_PRETTY_JSON", "maybe")]))
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "api.pretty_json")
        );
    }
}
