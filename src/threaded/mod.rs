//! Multi-threaded GEMM.
//!
//! Output rows are split into contiguous, disjoint ranges, one per worker.
//! Each worker gets exclusive `&mut` access to its rows of C, so the
//! partition itself is the only synchronization besides the final join.
//!
//! - `partition`: row ranges and the matching slices of C
//! - `parallel`: scoped-thread driver and the parallel multiply

pub mod parallel;
pub mod partition;
