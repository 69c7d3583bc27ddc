use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use review_tool::config::Config;
use review_tool::Cli;

fn main() -> anyhow::Result<ExitCode> {
    review_tool::config::load_dotenv();
    review_tool::init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    match review_tool::run(cli, config) {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            eprintln!("{}", serde_json::to_string_pretty(&err.to_response())?);
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
