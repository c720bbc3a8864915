//! Cache-blocked GEMM.
//!
//! The tiled kernel cuts C into small square tiles so the slices of B and C
//! being reused stay resident in L1 while they are hot.
//!
//! Available implementations:
//! - `tiled`: i-p-j accumulation inside `T × T` tiles of C

pub mod tiled;
