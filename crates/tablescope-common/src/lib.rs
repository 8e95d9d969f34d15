//! Shared utilities for tablescope crates.
//!
//! Polars value conversions and numeric column extraction used by the
//! loader, the analyzer, the renderer and the predictor.

pub mod numeric;
pub mod polars;

pub use numeric::{NumericColumn, column_f64, is_numeric_dtype, numeric_column_names, numeric_columns};
pub use polars::{any_to_f64, any_to_string, format_numeric, parse_f64};
