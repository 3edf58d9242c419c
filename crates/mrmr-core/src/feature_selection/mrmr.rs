use std::io::Write;

use crate::dataset::{Code, Dataset};
use crate::error::{MrmrError, Result};

/// One row of the ranking output.
///
/// `rank` 0 is always the class attribute itself, carrying its entropy
/// as relevance and `NaN` as score to signal "not a ranked selection".
/// Zero-entropy attributes come last with a score of `-inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankRecord {
    pub rank: usize,
    pub attribute: usize,
    pub name: String,
    pub entropy: f64,
    pub relevance: f64,
    pub score: f64,
}

/// Greedy mRMR ranking over a borrowed dataset.
///
/// Relevance is the mutual information between a candidate and the
/// class attribute; redundancy is the cumulative mutual information
/// between a candidate and everything selected so far, accumulated
/// incrementally (one new term per round, never recomputed). One
/// joint-histogram evaluation per (selected, remaining) pair keeps the
/// loop at O(k^2) mutual-information computations.
pub struct MrmrSelector<'a, C: Code> {
    dataset: &'a Dataset<C>,
    class_attribute: usize,
}

impl<'a, C: Code> MrmrSelector<'a, C> {
    pub fn new(dataset: &'a Dataset<C>, class_attribute: usize) -> Result<Self> {
        if class_attribute >= dataset.num_attributes() {
            return Err(MrmrError::InvalidIndex {
                index: class_attribute,
                bound: dataset.num_attributes(),
            });
        }
        Ok(Self {
            dataset,
            class_attribute,
        })
    }

    /// Produce the full ranking: every attribute index appears exactly
    /// once, and the record count equals the attribute count.
    pub fn rank(&self) -> Vec<RankRecord> {
        let data = self.dataset;
        let class = self.class_attribute;
        let num_attributes = data.num_attributes();

        // Zero-entropy attributes are useless: constant columns share
        // no information with anything, so they skip the relevance and
        // redundancy computations entirely and sink to the bottom.
        log::info!("computing mutual information between each attribute and the class");
        let mut relevance = vec![0.0f64; num_attributes];
        let mut redundancy = vec![0.0f64; num_attributes];
        let mut pool: Vec<usize> = Vec::new();
        let mut useless: Vec<usize> = Vec::new();
        for attribute in 0..num_attributes {
            if attribute == class {
                continue;
            }
            if data.attribute_entropy(attribute) > 0.0 {
                relevance[attribute] = data.mutual_information(class, attribute);
                pool.push(attribute);
            } else {
                useless.push(attribute);
            }
        }
        // The class attribute must never win a selection round.
        relevance[class] = f64::NEG_INFINITY;

        let mut records = Vec::with_capacity(num_attributes);
        let class_entropy = data.attribute_entropy(class);
        records.push(RankRecord {
            rank: 0,
            attribute: class,
            name: data.attribute_name(class).to_string(),
            entropy: class_entropy,
            relevance: class_entropy,
            score: f64::NAN,
        });

        log::info!("performing main mRMR computations");
        let mut rank = 1;

        // Rank 1 has no redundancy term: pick the strictly maximal
        // relevance, lowest index winning ties because the pool is in
        // ascending index order and only a strictly greater value
        // displaces the running best.
        let seed = {
            let mut best: Option<(usize, f64)> = None;
            for (position, &attribute) in pool.iter().enumerate() {
                if best.map_or(true, |(_, value)| relevance[attribute] > value) {
                    best = Some((position, relevance[attribute]));
                }
            }
            best.map(|(position, _)| position)
        };
        if let Some(position) = seed {
            let selected = pool.remove(position);
            records.push(RankRecord {
                rank,
                attribute: selected,
                name: data.attribute_name(selected).to_string(),
                entropy: data.attribute_entropy(selected),
                relevance: relevance[selected],
                score: relevance[selected],
            });
            rank += 1;
            let mut last_selected = selected;

            while !pool.is_empty() {
                let mut best_score = f64::NEG_INFINITY;
                let mut best_position = 0;
                for (position, &attribute) in pool.iter().enumerate() {
                    redundancy[attribute] += data.mutual_information(last_selected, attribute);
                    let score =
                        relevance[attribute] - redundancy[attribute] / (rank - 1) as f64;
                    log::debug!(
                        "candidate {} ({}): score {}",
                        attribute,
                        data.attribute_name(attribute),
                        score
                    );
                    // Near-ties within machine epsilon keep the
                    // earliest-encountered (lowest-index) best.
                    if score - best_score > f64::EPSILON {
                        best_score = score;
                        best_position = position;
                    }
                }
                let selected = pool.remove(best_position);
                records.push(RankRecord {
                    rank,
                    attribute: selected,
                    name: data.attribute_name(selected).to_string(),
                    entropy: data.attribute_entropy(selected),
                    relevance: relevance[selected],
                    score: best_score,
                });
                rank += 1;
                last_selected = selected;
            }
        }

        useless.sort_unstable();
        for attribute in useless {
            records.push(RankRecord {
                rank,
                attribute,
                name: data.attribute_name(attribute).to_string(),
                entropy: 0.0,
                relevance: 0.0,
                score: f64::NEG_INFINITY,
            });
            rank += 1;
        }

        records
    }
}

/// Write the ranking table: a tab-separated header followed by one row
/// per record in ascending rank order.
pub fn write_ranking<W: Write>(writer: &mut W, records: &[RankRecord]) -> Result<()> {
    writeln!(writer, "Rank\tIndex\tName\tEntropy\tMutualInformation\tmRMRScore")?;
    for record in records {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            record.rank, record.attribute, record.name, record.entropy, record.relevance,
            record.score
        )?;
    }
    Ok(())
}
