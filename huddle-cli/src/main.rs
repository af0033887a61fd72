use clap::Parser;
use huddle_cli::application::{probe, schema, serve};
use huddle_cli::{Cli, CliError, Commands, LogConfig, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::dev()
    } else {
        LogConfig::default()
    };
    log_config.with_json(cli.json_logs).init()?;

    match cli.command {
        command @ Commands::Serve { .. } => {
            let config = command
                .relay_config()
                .ok_or_else(|| CliError::InvalidConfig("missing relay settings".to_string()))?;
            config
                .validate()
                .map_err(|e| CliError::InvalidConfig(e.to_string()))?;
            serve(config).await
        }
        Commands::Probe { server, room } => probe(&server, room).await,
        Commands::Schema { output: Some(dir) } => {
            for path in schema::write_schemas(&dir)? {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Schema { output: None } => {
            println!("{}", schema::combined_schema()?);
            Ok(())
        }
    }
}
