//! Tunable knobs for a solve run.
//!
//! Every option has a default matching the reference behavior; validation is
//! explicit and fatal (never silently clamped). The options only affect
//! performance — result sets are identical for any valid combination.

use crate::errors::ConfigError;

/// Configuration for [`crate::coordinator::solve`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of parallel search workers (outer-scan shards).
    pub worker_count: usize,
    /// Whether workers memoize sub-results by remaining-letter key.
    pub caching_enabled: bool,
    /// Maximum number of cache entries before eviction kicks in.
    pub cache_limit: usize,
    /// Fraction of `cache_limit` to reclaim (beyond the overage) on eviction.
    pub cache_clear_fraction: f64,
    /// Whether the trie-walk strategy may be selected for small remainders.
    pub fast_path_enabled: bool,
    /// Heuristic threshold: the trie walk is chosen when
    /// `reachable_combinations < groups_remaining * fast_path_relative_speed`.
    pub fast_path_relative_speed: f64,
    /// Number of decompositions per batch streamed from worker to coordinator.
    pub result_batch_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            worker_count: 1,
            caching_enabled: false,
            cache_limit: 1_000_000,
            cache_clear_fraction: 0.1,
            fast_path_enabled: true,
            fast_path_relative_speed: 0.3,
            result_batch_size: 1000,
        }
    }
}

impl SearchConfig {
    /// Check every option against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first offending option as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count < 1 {
            return Err(ConfigError::InvalidWorkerCount { got: self.worker_count });
        }
        if self.cache_limit < 1 {
            return Err(ConfigError::InvalidCacheLimit { got: self.cache_limit });
        }
        if !(0.0..=1.0).contains(&self.cache_clear_fraction) || self.cache_clear_fraction.is_nan() {
            return Err(ConfigError::InvalidCacheClearFraction { got: self.cache_clear_fraction });
        }
        if !self.fast_path_relative_speed.is_finite() || self.fast_path_relative_speed <= 0.0 {
            return Err(ConfigError::InvalidFastPathSpeed { got: self.fast_path_relative_speed });
        }
        if self.result_batch_size < 1 {
            return Err(ConfigError::InvalidBatchSize { got: self.result_batch_size });
        }
        Ok(())
    }
}
