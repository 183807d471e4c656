//! Benchmark ordinary least-squares line fits over growing sample sizes.
//!
//! ```text
//!  load → sample → fit → score → average → report
//! ```

pub mod bench;
pub mod config;
pub mod data;
pub mod predict;
pub mod regression;
pub mod report;
