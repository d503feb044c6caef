//! Logging initialization

use std::path::PathBuf;

/// Initialize logging based on debug flag
/// Returns the log file path if debug logging is enabled
///
/// Without the flag, warnings and errors go to stderr so stdout stays clean
/// for report output.
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    if debug {
        // Named temp file that outlives this process
        let temp_file = tempfile::Builder::new()
            .prefix("recall-trace-")
            .suffix(".log")
            .tempfile()
            .map(|f| {
                let path = f.path().to_path_buf();
                // Leak the handle so the file is not removed on drop
                std::mem::forget(f);
                path
            })
            .unwrap_or_else(|_| {
                let temp_dir = std::env::temp_dir();
                temp_dir.join(format!("recall-trace-{}.log", std::process::id()))
            });

        let file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&temp_file)
            .expect("Failed to open log file");

        tracing_subscriber::fmt()
            .with_writer(file)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .init();

        Some(temp_file)
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_target(false)
            .init();

        None
    }
}
