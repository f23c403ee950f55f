//! Exchange capture: the response logger, its output sink, and the hook
//! surface the host proxy dispatches into.

mod hooks;
mod logger;
mod sink;

pub use hooks::{ExchangeHook, HookRegistry};
pub use logger::ResponseLogger;
pub use sink::DumpFile;

use std::path::PathBuf;

/// Default capture file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "output.txt";

/// Capture configuration.
pub struct CaptureConfig {
    /// Path of the capture file; created/truncated when the logger opens it
    pub output_path: PathBuf,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}
