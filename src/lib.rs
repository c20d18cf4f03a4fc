//! GFS Fetcher Library
//!
//! A Rust library for downloading Global Forecast System GRIB2 subsets from
//! a NOMADS-style filter endpoint. Resolves the latest published cycle,
//! fetches every forecast offset concurrently and verifies the result on disk.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
