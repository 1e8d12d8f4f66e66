//! Execution strategy control for the filtering loops.

/// Pixel count above which `Auto` switches to the parallel path.
const AUTO_PARALLEL_THRESHOLD: usize = 100_000;

/// Controls how filtering operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Parallel for images above a pixel-count threshold, serial otherwise.
    #[default]
    Auto,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of
    /// parallelization outweighs the benefits.
    Serial,

    /// Process rows in parallel on the global Rayon thread pool.
    Parallel,
}

impl ExecutionStrategy {
    /// Whether the parallel path should be taken for the given pixel count.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Auto => num_pixels >= AUTO_PARALLEL_THRESHOLD,
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_threshold() {
        assert!(!ExecutionStrategy::Auto.is_parallel(99_999));
        assert!(ExecutionStrategy::Auto.is_parallel(100_000));
        assert!(!ExecutionStrategy::Serial.is_parallel(usize::MAX));
        assert!(ExecutionStrategy::Parallel.is_parallel(1));
    }
}
