use crate::infrastructure::error::{CliError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOGGED_CRATES: [&str; 5] = [
    "huddle",
    "huddle_cli",
    "huddle_core",
    "huddle_relay",
    "huddle_negotiator",
];

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub default_level: tracing::Level,
    pub json_format: bool,
    pub show_thread_ids: bool,
    pub show_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: tracing::Level::INFO,
            json_format: false,
            show_thread_ids: false,
            show_targets: true,
        }
    }
}

impl LogConfig {
    /// Verbose, human readable
    pub fn dev() -> Self {
        Self {
            default_level: tracing::Level::DEBUG,
            show_thread_ids: true,
            ..Default::default()
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json_format = json;
        self
    }

    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.default_level = level;
        self
    }

    /// Filter used when `RUST_LOG` is not set
    pub fn default_directives(&self) -> String {
        let level = self.default_level.to_string().to_lowercase();
        LOGGED_CRATES
            .iter()
            .map(|krate| format!("{}={}", krate, level))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(self.default_directives())
                .map_err(|e| CliError::Logging(e.to_string())),
        }
    }

    pub fn init(self) -> Result<()> {
        let env_filter = self.env_filter()?;

        if self.json_format {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(self.show_targets)
                .with_thread_ids(self.show_thread_ids);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| CliError::Logging(e.to_string()))
        } else {
            let fmt_layer = fmt::layer()
                .with_target(self.show_targets)
                .with_thread_ids(self.show_thread_ids);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| CliError::Logging(e.to_string()))
        }
    }
}
