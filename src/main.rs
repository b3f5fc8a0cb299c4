use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use tracing::info;

use cloud_proxy_app::args::{bind, BindError};
use cloud_proxy_app::config::ResolvedConfig;
use cloud_proxy_app::logging::init_tracing;

fn main() -> ExitCode {
    init_tracing();

    let config = match bind(std::env::args_os()) {
        Ok(config) => config,
        Err(BindError::DisplayRequested(text)) => {
            print!("{text}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        file_id = config.file_id.as_deref().unwrap_or("-"),
        input = ?config.input_filepath,
        output = ?config.output_filepath,
        "configuration resolved"
    );

    match emit(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Write the resolved configuration to stdout as one JSON object.
fn emit(config: &ResolvedConfig) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, config)
        .context("Failed to serialise resolved configuration")?;
    writeln!(stdout).context("Failed to write to stdout")?;
    Ok(())
}
