use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::{self, ConfigError};
use crate::transport::{self, TransportError};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Flow Launcher plugin that jumps to directories ranked by zoxide.
#[derive(Debug, Parser, PartialEq, Eq)]
#[command(name = "flow-zoxide", version)]
pub struct RuntimeOptions {
    /// Plugin config file (defaults to plugin.toml next to the executable).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON-RPC request from the launcher. Read from stdin when omitted.
    #[arg(value_name = "REQUEST_JSON")]
    pub request: Option<String>,
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, clap::Error> {
    RuntimeOptions::try_parse_from(
        std::iter::once("flow-zoxide".to_string()).chain(args.iter().cloned()),
    )
}

/// Serves exactly one launcher request and returns.
pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    let config = config::load(options.config.as_deref())?;
    if let Err(error) = crate::logging::init(&config) {
        eprintln!("[flow-zoxide] logging disabled: {error}");
    }

    let payload = match options.request {
        Some(request) => request,
        None => read_stdin()?,
    };

    if let Some(encoded) = transport::respond(config, &payload)? {
        write_response(&encoded)?;
    }
    Ok(())
}

fn read_stdin() -> Result<String, std::io::Error> {
    let mut payload = String::new();
    std::io::stdin().read_to_string(&mut payload)?;
    Ok(payload)
}

fn write_response(encoded: &str) -> Result<(), std::io::Error> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{encoded}")?;
    stdout.flush()?;
    Ok(())
}
