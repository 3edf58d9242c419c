//! Small matrix type used throughout the crate.
//!
//! Intentionally lightweight: flat storage, a handful of convenience
//! methods, and delimiter-separated text ingestion/serialization.
pub mod matrix;

pub use matrix::Matrix;
