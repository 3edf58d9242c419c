//! mrmr-core: information-theoretic attribute ranking for tabular data.
//!
//! This crate provides the numerical engine behind the `mrmr` tool: a
//! dense matrix container with text ingestion, per-attribute discrete
//! probability/entropy caching, dataset discretization with pairwise
//! mutual information, and the greedy minimum-Redundancy-Maximum-
//! Relevance selection loop.
//!
//! The design favors small, testable modules; the command-line surface
//! (argument parsing, stream opening, logging setup) lives in the
//! companion `mrmr-cli` crate.
pub mod attribute;
pub mod config;
pub mod dataset;
pub mod error;
pub mod feature_selection;
pub mod math;
