//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Diagnostics written to stderr by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `"warn"` or `"securedocs_client=debug"`.
    /// `RUST_LOG` replaces it when set.
    #[serde(default = "default_level")]
    pub level: String,
    /// `"pretty"` for humans, `"json"` for log collectors.
    #[serde(default = "default_format")]
    pub format: String,
}

impl LoggingConfig {
    /// Whether events are emitted as JSON lines.
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "warn".into()
}

fn default_format() -> String {
    "pretty".into()
}
