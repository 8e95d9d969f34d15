//! Table loading for tablescope.
//!
//! A table is a polars `DataFrame`. It comes from an upload (CSV, TSV or
//! JSON bytes plus a declared extension), a file on disk, or the synthetic
//! generator.

// === Error Types ===
pub mod error;

// === Loading ===
mod json;
pub mod loader;

// === Generation and Sampling ===
pub mod generate;
pub mod sample;

pub use error::{IngestError, Result};
pub use generate::{
    GenerateOptions, MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS, Pattern, clamp_dimensions, generate,
    seeded_rng,
};
pub use loader::{
    DataFormat, MAX_UPLOAD_BYTES, load_bytes, load_path, write_csv, write_csv_path,
};
pub use sample::{Sample, SampleMode, sample};
