//! Error types for the solver, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code for documentation lookup:
//!
//! - C001: `InvalidWorkerCount` (worker count must be at least 1)
//! - C002: `InvalidCacheLimit` (cache limit must be at least 1)
//! - C003: `InvalidCacheClearFraction` (fraction must be within [0, 1])
//! - C004: `InvalidFastPathSpeed` (speed factor must be positive and finite)
//! - C005: `InvalidBatchSize` (result batch size must be at least 1)
//! - D001: `Io` (dictionary source unreadable)
//! - S001: `Config` (configuration rejected at solve time)
//! - S002: `WorkerPanicked` (a search worker terminated abnormally)
//!
//! Dictionary entries with characters outside a–z are not an error: the
//! loader skips them (see `word_list` for the policy).

use std::io;

/// Rejected configuration value.
///
/// Raised by [`crate::config::SearchConfig::validate`]; always fatal at
/// startup, never silently ignored.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("worker_count must be >= 1 (got {got})")]
    InvalidWorkerCount { got: usize },

    #[error("cache_limit must be >= 1 (got {got})")]
    InvalidCacheLimit { got: usize },

    #[error("cache_clear_fraction must be in [0, 1] (got {got})")]
    InvalidCacheClearFraction { got: f64 },

    #[error("fast_path_relative_speed must be positive and finite (got {got})")]
    InvalidFastPathSpeed { got: f64 },

    #[error("result_batch_size must be >= 1 (got {got})")]
    InvalidBatchSize { got: usize },
}

impl ConfigError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidWorkerCount { .. } => "C001",
            ConfigError::InvalidCacheLimit { .. } => "C002",
            ConfigError::InvalidCacheClearFraction { .. } => "C003",
            ConfigError::InvalidFastPathSpeed { .. } => "C004",
            ConfigError::InvalidBatchSize { .. } => "C005",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ConfigError::InvalidWorkerCount { .. } => {
                Some("Use at least one worker, e.g. --workers=4")
            }
            ConfigError::InvalidCacheLimit { .. } => {
                Some("The cache must hold at least one entry, e.g. --cache-limit=1000000")
            }
            ConfigError::InvalidCacheClearFraction { .. } => {
                Some("Use a fraction of capacity to reclaim on eviction, e.g. 0.1")
            }
            ConfigError::InvalidFastPathSpeed { .. } => {
                Some("The heuristic threshold must be a positive number, e.g. 0.3")
            }
            ConfigError::InvalidBatchSize { .. } => {
                Some("Workers stream results in batches of this many entries, e.g. 1000")
            }
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Failure while obtaining the dictionary. Fatal before any search begins.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl DictionaryError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            DictionaryError::Io { .. } => "D001",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            DictionaryError::Io { .. } => {
                Some("Check the path passed via --dictionary; the file must be readable")
            }
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Unified error type for a solve run.
///
/// Consolidates configuration rejection and worker failure so callers only
/// handle a single `Result<_, SolveError>`.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    /// The configuration was rejected before any worker started.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A worker terminated abnormally. This is distinct from a worker that
    /// simply produced zero results, and it is fatal: partial output from
    /// the other workers is discarded rather than returned as if complete.
    #[error("search worker {worker_id} terminated abnormally")]
    WorkerPanicked { worker_id: usize },
}

impl SolveError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SolveError::Config(_) => "S001",
            SolveError::WorkerPanicked { .. } => "S002",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            SolveError::Config(_) => None, // ConfigError carries its own help
            SolveError::WorkerPanicked { .. } => {
                Some("This is an internal error; rerun with RUST_LOG=debug for diagnostics")
            }
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            SolveError::Config(ce) => {
                format!("{} caused by: {}", self.code(), ce.display_detailed())
            }
            _ => format_error_with_code_and_help(&self.to_string(), self.code(), self.help()),
        }
    }
}

/// Helper to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(
    base_msg: &str,
    code: &str,
    help: Option<&str>,
) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
