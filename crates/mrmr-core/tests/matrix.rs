//! Integration tests for the dense matrix container.

use std::io::Cursor;

use mrmr_core::error::MrmrError;
use mrmr_core::math::Matrix;

fn to_text<T: std::fmt::Display>(m: &Matrix<T>) -> String {
    let mut buffer = Vec::new();
    m.write_to(&mut buffer, '\t').unwrap();
    String::from_utf8(buffer).unwrap()
}

// ---------------------------------------------------------------------------
// Construction and access
// ---------------------------------------------------------------------------

#[test]
fn from_shape_vec_and_indexing() {
    let m = Matrix::from_shape_vec((2, 3), vec![0.0, 0.1, 0.2, 1.0, 1.1, 1.2]).unwrap();
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m[(0, 0)], 0.0);
    assert_eq!(m[(0, 2)], 0.2);
    assert_eq!(m[(1, 1)], 1.1);
}

#[test]
fn from_shape_vec_rejects_length_mismatch() {
    let result = Matrix::<f64>::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0]);
    assert!(matches!(
        result,
        Err(MrmrError::Construction {
            expected: 6,
            found: 3
        })
    ));
}

#[test]
fn row_slice_is_contiguous() {
    let m = Matrix::from_shape_vec((2, 2), vec![1, 2, 3, 4]).unwrap();
    assert_eq!(m.row_slice(0), &[1, 2]);
    assert_eq!(m.row_slice(1), &[3, 4]);
}

#[test]
fn transpose_swaps_dimensions() {
    let m = Matrix::from_shape_vec((2, 3), vec![0.0, 0.1, 0.2, 1.0, 1.1, 1.2]).unwrap();
    let t = m.transpose();
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t[(0, 1)], 1.0);
    assert_eq!(t[(1, 0)], 0.1);
    assert_eq!(t[(2, 1)], 1.2);
}

// ---------------------------------------------------------------------------
// Text parse / serialize
// ---------------------------------------------------------------------------

#[test]
fn serialize_is_newline_terminated() {
    let m = Matrix::from_shape_vec((2, 3), vec![0.0, 0.1, 0.2, 1.0, 1.1, 1.2]).unwrap();
    assert_eq!(to_text(&m), "0\t0.1\t0.2\n1\t1.1\t1.2\n");
}

#[test]
fn parse_serialize_round_trip() {
    let m = Matrix::from_shape_vec((2, 3), vec![0.0, 0.1, 0.2, 1.0, 1.1, 1.2]).unwrap();
    let parsed = Matrix::<f64>::from_reader(Cursor::new(to_text(&m)), '\t').unwrap();
    assert_eq!(parsed, m);
}

#[test]
fn parse_round_trip_beyond_initial_capacity() {
    // 400 elements forces the ingestion buffer to double past its
    // 256-element start.
    let values: Vec<i64> = (0..400).collect();
    let m = Matrix::from_shape_vec((20, 20), values).unwrap();
    let parsed = Matrix::<i64>::from_reader(Cursor::new(to_text(&m)), '\t').unwrap();
    assert_eq!(parsed, m);
}

#[test]
fn parse_respects_custom_delimiter() {
    let m = Matrix::<f64>::from_reader(Cursor::new("1,2\n3,4\n"), ',').unwrap();
    assert_eq!(m.shape(), (2, 2));
    assert_eq!(m[(1, 1)], 4.0);
}

#[test]
fn parse_reports_offending_row_on_column_mismatch() {
    let err = Matrix::<f64>::from_reader(Cursor::new("1\t2\t3\n4\t5\n"), '\t').unwrap_err();
    match err {
        MrmrError::ColumnCount {
            row,
            expected,
            found,
        } => {
            assert_eq!(row, 2);
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn parse_rejects_non_numeric_tokens() {
    let err = Matrix::<f64>::from_reader(Cursor::new("1\tx\n"), '\t').unwrap_err();
    assert!(matches!(err, MrmrError::InvalidValue { row: 1, .. }));
}

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

#[test]
fn equality_requires_matching_shape_and_elements() {
    let a = Matrix::from_shape_vec((2, 2), vec![1, 2, 3, 4]).unwrap();
    let b = Matrix::from_shape_vec((2, 2), vec![1, 2, 3, 4]).unwrap();
    let c = Matrix::from_shape_vec((2, 2), vec![1, 2, 3, 5]).unwrap();
    let d = Matrix::from_shape_vec((4, 1), vec![1, 2, 3, 4]).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
}
