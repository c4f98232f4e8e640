pub mod cancel;
pub mod config;
pub mod estimate;
pub mod generator;
pub mod pool;
pub mod progress;
pub mod seeds;
pub mod sink;
pub mod stats;
pub mod token;

// Re-exports for convenience
pub use cancel::CancelToken;
pub use config::Config;
pub use estimate::{count_sequences, Window};
pub use generator::{Engine, Outcome, RunSummary};
pub use pool::{ExpansionRecord, TokenPool};
pub use progress::{ProgressReport, ReportSettings};
pub use seeds::{SeedLoader, Seeds};
pub use sink::OutputSink;
pub use stats::RunStats;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types
pub mod error {
    use std::path::PathBuf;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("at least one token is required")]
        NoTokens,

        #[error("zero-length token in pool")]
        EmptyToken,

        #[error("invalid length window: min {min} exceeds max {max}")]
        InvalidWindow { min: usize, max: usize },

        #[error("no combinations producible within length window {min}..={max}")]
        NoCombinations { min: usize, max: usize },

        #[error("output file is locked by another process: {}", path.display())]
        Locked { path: PathBuf },

        #[error("I/O error: {0}")]
        Io(#[from] std::io::Error),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Utilities module
pub mod utils {

    /// Format a byte count in megabytes
    pub fn format_mb(bytes: u64) -> String {
        format!("{:.3} MB", bytes as f64 / (1024.0 * 1024.0))
    }

    /// Format duration in human-readable format
    pub fn format_duration(seconds: f64) -> String {
        if seconds < 60.0 {
            format!("{:.1}s", seconds)
        } else if seconds < 3600.0 {
            format!("{:.1}m", seconds / 60.0)
        } else {
            format!("{:.1}h", seconds / 3600.0)
        }
    }

    /// Format number with thousands separator
    pub fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();
        for (i, c) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }
        result.chars().rev().collect()
    }
}
