//! Attribute ranking.
//!
//! This module contains the greedy minimum-Redundancy-Maximum-
//! Relevance selector and the tab-separated ranking table writer.
pub mod mrmr;

pub use mrmr::{write_ranking, MrmrSelector, RankRecord};
