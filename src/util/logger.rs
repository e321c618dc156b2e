use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Installs the global tracing subscriber: pretty console output plus four
/// daily-rolling files under `logs/` (plain text and JSON, each with an
/// error-only variant).
///
/// The guards flush the non-blocking writers; dropping them stops the
/// background threads, so the instance must live for the whole run.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let guards = Self::setup_logging()?;
        Ok(Logger { guards })
    }

    pub fn setup_logging() -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
        std::fs::create_dir_all("logs")?;

        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("debug,coolbreeze_backend=debug"));
        // File sinks have their own levels, independent of RUST_LOG.
        let file_level = std::env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());
        let error_level =
            std::env::var("ERROR_FILE_LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        let (general, general_guard) = file_writer("logs", "coolbreeze-backend.log");
        let (errors, errors_guard) = file_writer("logs/error", "coolbreeze-backend-error.log");
        let (json, json_guard) = file_writer("logs/json", "coolbreeze-backend.json");
        let (error_json, error_json_guard) =
            file_writer("logs/error/json", "coolbreeze-backend-error.json");

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(true)
                    .with_filter(console_filter),
            )
            .with(file_layer(general).with_filter(EnvFilter::new(file_level.clone())))
            .with(file_layer(errors).with_filter(EnvFilter::new(error_level.clone())))
            .with(file_layer(json).json().with_filter(EnvFilter::new(file_level)))
            .with(
                file_layer(error_json)
                    .json()
                    .with_filter(EnvFilter::new(error_level)),
            )
            .init();

        Ok(vec![general_guard, errors_guard, json_guard, error_json_guard])
    }
}

fn file_writer(dir: &str, file_name: &str) -> (NonBlocking, WorkerGuard) {
    non_blocking(rolling::daily(dir, file_name))
}

fn file_layer<S>(
    writer: NonBlocking,
) -> fmt::Layer<S, fmt::format::DefaultFields, fmt::format::Format, NonBlocking> {
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
}
