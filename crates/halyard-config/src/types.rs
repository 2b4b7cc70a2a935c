//! Configuration types.
//!
//! Every struct implements [`Default`] matching `defaults.toml`, so a bare
//! `[section]` header in a file produces a working configuration.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Request handling.
    pub api: ApiSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

/// Request handling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Prefix every request path must carry and every link is built with.
    /// Empty, or `/segment[/segment...]` without a trailing slash.
    pub base_path: String,
    /// Maximum nesting of embedded children.
    pub max_embed_depth: usize,
    /// Whether JSON bodies are pretty-printed.
    pub pretty_json: bool,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            max_embed_depth: 16,
            pretty_json: true,
        }
    }
}

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"` or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["halyard_graph=debug"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}
