pub mod application;
pub mod cli;
pub mod infrastructure;

pub use cli::{Cli, Commands};
pub use infrastructure::{CliError, LogConfig, Result};
