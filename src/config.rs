//! Tuning knobs for the optimized multiplier.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::error::MatmulError;

/// Tile edge that works well for `f64` against a typical 32 KiB L1.
pub const DEFAULT_TILE_SIZE: usize = 8;

/// Inner algorithm each worker runs over its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kernel {
    /// i-j-p order, one finished cell at a time.
    Reference,
    /// i-p-j order over whole rows.
    Reordered,
    /// i-p-j order inside `tile_size × tile_size` blocks of C.
    #[default]
    Tiled,
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kernel::Reference => "reference",
            Kernel::Reordered => "reordered",
            Kernel::Tiled => "tiled",
        };
        f.write_str(name)
    }
}

impl FromStr for Kernel {
    type Err = MatmulError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reference" | "ijk" => Ok(Kernel::Reference),
            "reordered" | "ikj" => Ok(Kernel::Reordered),
            "tiled" => Ok(Kernel::Tiled),
            other => Err(MatmulError::InvalidArgument(format!(
                "unknown kernel `{other}` (expected reference, reordered or tiled)"
            ))),
        }
    }
}

/// Configuration for [`multiply_with`](crate::multiply_with).
///
/// The default uses every hardware thread the OS reports, the tiled kernel,
/// and [`DEFAULT_TILE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplyConfig {
    pub workers: NonZeroUsize,
    pub tile_size: NonZeroUsize,
    pub kernel: Kernel,
}

impl MultiplyConfig {
    /// Single worker, tiled kernel.
    pub fn single_threaded() -> Self {
        Self {
            workers: NonZeroUsize::MIN,
            ..Self::default()
        }
    }

    /// Zero is clamped to one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN);
        self
    }

    /// Zero is clamped to one.
    pub fn with_tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = NonZeroUsize::new(tile_size).unwrap_or(NonZeroUsize::MIN);
        self
    }

    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }
}

impl Default for MultiplyConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            tile_size: NonZeroUsize::new(DEFAULT_TILE_SIZE).unwrap_or(NonZeroUsize::MIN),
            kernel: Kernel::default(),
        }
    }
}

/// Hardware concurrency, or 1 when the OS won't say.
pub fn default_workers() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MultiplyConfig::default();
        assert_eq!(config.kernel, Kernel::Tiled);
        assert_eq!(config.tile_size.get(), DEFAULT_TILE_SIZE);
        assert!(config.workers.get() >= 1);
    }

    #[test]
    fn test_zero_is_clamped() {
        let config = MultiplyConfig::default().with_workers(0).with_tile_size(0);
        assert_eq!(config.workers.get(), 1);
        assert_eq!(config.tile_size.get(), 1);
    }

    #[test]
    fn test_kernel_parse() {
        assert_eq!("ikj".parse::<Kernel>().unwrap(), Kernel::Reordered);
        assert_eq!("tiled".parse::<Kernel>().unwrap(), Kernel::Tiled);
        assert_eq!(Kernel::Reference.to_string(), "reference");
        assert!("strassen".parse::<Kernel>().is_err());
    }
}
