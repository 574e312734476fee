use thiserror::Error;
use tracing_appender::rolling::{Builder, InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::Config;

pub const LOG_FILE_PREFIX: &str = "flow-zoxide";
pub const LOG_ENV_VAR: &str = "FLOW_ZOXIDE_LOG";
const MAX_LOG_FILES: usize = 5;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory: {0}")]
    CreateDir(#[from] std::io::Error),
    #[error("failed to open log file: {0}")]
    Appender(#[from] InitError),
    #[error("failed to install subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Routes `tracing` output to a rolling file in `log_dir` and errors to
/// stderr. stdout stays reserved for the JSON-RPC response.
///
/// An unusable `log_dir` only drops the file layer; the stderr layer is
/// always installed and reports why the file is missing.
pub fn init(config: &Config) -> Result<(), LoggingError> {
    let (subscriber, file_error) = build_subscriber(config, std::io::stderr);
    subscriber.try_init()?;

    if let Some(error) = file_error {
        tracing::error!(
            %error,
            log_dir = %config.log_dir.display(),
            "file logging disabled"
        );
    }

    install_panic_hook();
    Ok(())
}

/// Assembles the subscriber without installing it. The second value is the
/// reason the file layer was left out, if it was.
pub fn build_subscriber<W>(
    config: &Config,
    stderr: W,
) -> (
    impl tracing::Subscriber + Send + Sync + 'static,
    Option<LoggingError>,
)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (file_layer, file_error) = match open_log_file(config) {
        Ok(appender) => {
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(appender)
                .with_filter(file_filter(config));
            (Some(layer), None)
        }
        Err(error) => (None, Some(error)),
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(stderr)
        .with_filter(LevelFilter::ERROR);

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer);
    (subscriber, file_error)
}

fn open_log_file(config: &Config) -> Result<RollingFileAppender, LoggingError> {
    std::fs::create_dir_all(&config.log_dir)?;
    let appender = Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(&config.log_dir)?;
    Ok(appender)
}

fn file_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(format!("flow_zoxide={}", config.log_level)))
}

fn install_panic_hook() {
    let prior = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let detail = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<non-string payload>");
        match info.location() {
            Some(at) => tracing::error!(
                file = at.file(),
                line = at.line(),
                detail,
                "plugin panicked"
            ),
            None => tracing::error!(detail, "plugin panicked"),
        }
        prior(info);
    }));
}
