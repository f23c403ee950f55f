//! # Wirelog
//!
//! Wire-format capture log for intercepted HTTP exchanges.
//!
//! An intercepting proxy hands each completed request/response pair to this
//! crate, which serializes both halves back to raw HTTP/1 wire format and
//! appends them to a flat capture file, flushing after every entry.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │            Host proxy (TLS, parsing)             │
//! ├──────────────────────────────────────────────────┤
//! │                 Wirelog (Rust)                   │
//! │  ┌──────────┐  ┌────────┐  ┌────────┐  ┌──────┐  │
//! │  │  Hooks   │──│ Logger │──│  Wire  │──│ Sink │  │
//! │  └──────────┘  └────────┘  └────────┘  └──────┘  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! The host owns connection handling and HTTP reassembly; wirelog owns the
//! exchange model, the wire serializer, and the capture file.

pub mod capture;
pub mod models;
pub mod wire;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the capture library (call once at startup).
/// `storage_path` is used to store log files in release mode.
#[allow(unused_variables)]
pub fn init_logging(storage_path: Option<String>) -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }

    #[cfg(debug_assertions)]
    {
        // Debug mode: log to console (stderr)
        let level = resolve_log_level();
        let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
    }

    #[cfg(not(debug_assertions))]
    {
        // Release mode: log to file
        use anyhow::Context;

        let level = resolve_log_level();
        let log_dir = storage_path
            .as_ref()
            .map(|p| std::path::PathBuf::from(p).join("logs"))
            .unwrap_or_else(|| std::path::PathBuf::from("logs"));

        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("creating log directory {}", log_dir.display()))?;
        let file_appender = tracing_appender::rolling::daily(&log_dir, "wirelog");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Keep the guard alive for the lifetime of the program; logging
        // should last until process exit.
        std::mem::forget(guard);

        // If a subscriber is already set by the embedding host, keep it.
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(non_blocking)
            .try_init();
    }

    tracing::info!("Wirelog initialized v{}", VERSION);
    Ok(())
}

fn resolve_log_level() -> tracing::level_filters::LevelFilter {
    use tracing::level_filters::LevelFilter;

    match std::env::var("RUST_LOG") {
        Ok(val) => match val.to_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info" => LevelFilter::INFO,
            "warn" | "warning" => LevelFilter::WARN,
            "error" => LevelFilter::ERROR,
            "off" => LevelFilter::OFF,
            _ => LevelFilter::INFO,
        },
        Err(_) => LevelFilter::INFO,
    }
}
