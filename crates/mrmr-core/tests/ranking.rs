//! Integration tests for the greedy mRMR selector.

use std::collections::HashSet;

use mrmr_core::config::Discretization;
use mrmr_core::dataset::Dataset;
use mrmr_core::feature_selection::{write_ranking, MrmrSelector, RankRecord};

const REFERENCE_INPUT: &str =
    "class\tattr1\tattr2\n0\t0\t1\n0\t1\t1\n0\t0\t0\n1\t1\t1\n1\t0\t1\n1\t1\t1\n";

// Reference input with two constant attributes spliced in at indices
// 2 and 4.
const INPUT_WITH_USELESS: &str = "class\tattr1\tflat1\tattr2\tflat2\n\
                                  0\t0\t7\t1\t3\n\
                                  0\t1\t7\t1\t3\n\
                                  0\t0\t7\t0\t3\n\
                                  1\t1\t7\t1\t3\n\
                                  1\t0\t7\t1\t3\n\
                                  1\t1\t7\t1\t3\n";

fn rank_text(input: &str, class_attribute: usize) -> Vec<RankRecord> {
    let dataset =
        Dataset::<u8>::from_reader(input.as_bytes(), '\t', Discretization::Round).unwrap();
    MrmrSelector::new(&dataset, class_attribute).unwrap().rank()
}

fn rendered(records: &[RankRecord]) -> String {
    let mut buffer = Vec::new();
    write_ranking(&mut buffer, records).unwrap();
    String::from_utf8(buffer).unwrap()
}

// ---------------------------------------------------------------------------
// Structural invariants
// ---------------------------------------------------------------------------

#[test]
fn rank_zero_is_the_class_attribute() {
    let records = rank_text(REFERENCE_INPUT, 0);
    assert_eq!(records[0].rank, 0);
    assert_eq!(records[0].attribute, 0);
    assert_eq!(records[0].name, "class");
    assert_eq!(records[0].entropy, 1.0);
    assert_eq!(records[0].relevance, 1.0);
    assert!(records[0].score.is_nan());
}

#[test]
fn every_attribute_appears_exactly_once() {
    let records = rank_text(INPUT_WITH_USELESS, 0);
    assert_eq!(records.len(), 5);
    let indices: HashSet<usize> = records.iter().map(|r| r.attribute).collect();
    assert_eq!(indices, (0..5).collect::<HashSet<usize>>());
    for (expected_rank, record) in records.iter().enumerate() {
        assert_eq!(record.rank, expected_rank);
    }
}

#[test]
fn nonzero_class_attribute_is_respected() {
    let records = rank_text(REFERENCE_INPUT, 1);
    assert_eq!(records[0].attribute, 1);
    assert_eq!(records.len(), 3);
}

// ---------------------------------------------------------------------------
// Selection order
// ---------------------------------------------------------------------------

#[test]
fn seeding_picks_the_most_relevant_attribute() {
    // MI(class, attr2) > MI(class, attr1), so attr2 seeds the ranking
    // and its score equals its relevance (no redundancy at rank 1).
    let records = rank_text(REFERENCE_INPUT, 0);
    assert_eq!(records[1].attribute, 2);
    assert_eq!(records[1].score, records[1].relevance);
    assert_eq!((records[1].relevance * 1e7).round(), 1908745.0);
    assert_eq!(records[2].attribute, 1);
}

#[test]
fn later_ranks_subtract_mean_redundancy() {
    let dataset = Dataset::<u8>::from_reader(
        REFERENCE_INPUT.as_bytes(),
        '\t',
        Discretization::Round,
    )
    .unwrap();
    let records = MrmrSelector::new(&dataset, 0).unwrap().rank();
    // Rank 2 with one selected attribute: score = relevance - MI(attr2, attr1) / 1.
    let expected =
        dataset.mutual_information(0, 1) - dataset.mutual_information(2, 1);
    assert!((records[2].score - expected).abs() < 1e-12);
}

#[test]
fn useless_attributes_sink_to_the_bottom_in_index_order() {
    let records = rank_text(INPUT_WITH_USELESS, 0);
    let tail: Vec<usize> = records[3..].iter().map(|r| r.attribute).collect();
    assert_eq!(tail, vec![2, 4]);
    for record in &records[3..] {
        assert_eq!(record.entropy, 0.0);
        assert_eq!(record.relevance, 0.0);
        assert_eq!(record.score, f64::NEG_INFINITY);
    }
    // Informative attributes all precede the useless ones.
    assert!(records[..3].iter().all(|r| r.score.is_nan() || r.score.is_finite()));
}

// ---------------------------------------------------------------------------
// Output rendering and determinism
// ---------------------------------------------------------------------------

#[test]
fn ranking_table_has_the_expected_header() {
    let records = rank_text(REFERENCE_INPUT, 0);
    let text = rendered(&records);
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Rank\tIndex\tName\tEntropy\tMutualInformation\tmRMRScore")
    );
    assert_eq!(text.lines().count(), 1 + records.len());
    let rank_zero = lines.next().unwrap();
    assert!(rank_zero.starts_with("0\t0\tclass\t"));
    assert!(rank_zero.ends_with("\tNaN"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let first = rendered(&rank_text(INPUT_WITH_USELESS, 0));
    let second = rendered(&rank_text(INPUT_WITH_USELESS, 0));
    assert_eq!(first, second);
}
