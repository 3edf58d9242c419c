use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Per-cell transform mapping raw values to signed integers before
/// translation into unsigned codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discretization {
    Round,
    Floor,
    Ceiling,
    #[default]
    Truncate,
}

impl Discretization {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Discretization::Round => value.round(),
            Discretization::Floor => value.floor(),
            Discretization::Ceiling => value.ceil(),
            Discretization::Truncate => value.trunc(),
        }
    }
}

impl FromStr for Discretization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "round" => Ok(Discretization::Round),
            "floor" => Ok(Discretization::Floor),
            "ceiling" => Ok(Discretization::Ceiling),
            "truncate" => Ok(Discretization::Truncate),
            _ => Err(format!(
                "Unknown discretization method: {}. Expected one of round, floor, ceiling, truncate",
                s
            )),
        }
    }
}

/// Configuration bundle consumed by the ranking engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Field separator for ingestion and output.
    pub delimiter: char,
    /// 0-based index of the class attribute.
    pub class_attribute: usize,
    /// Per-cell discretization transform.
    pub discretization: Discretization,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            class_attribute: 0,
            discretization: Discretization::Truncate,
        }
    }
}
