use std::fmt;
use std::io::{BufRead, Write};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use num_traits::Zero;

use crate::error::{MrmrError, Result};

/// Initial element capacity of the ingestion buffer; doubled whenever
/// the next write would overflow it.
const PARSE_INITIAL_CAPACITY: usize = 256;

/// Rectangular dense matrix with flat row-major storage.
///
/// The shape is fixed at construction; `storage.len() == rows * cols`
/// always holds. Indexing is bounds-checked in debug builds only, since
/// out-of-range access is a programming error, not a recoverable one.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    /// Build a matrix from a flat row-major buffer.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(MrmrError::Construction {
                expected: rows * cols,
                found: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows, "row index out of bounds");
        debug_assert!(col < self.cols, "column index out of bounds");
        row * self.cols + col
    }

    /// Contiguous view of one row.
    pub fn row_slice(&self, row: usize) -> &[T] {
        debug_assert!(row < self.rows, "row index out of bounds");
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }
}

impl<T: Clone + Zero> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }
}

impl<T: Copy> Matrix<T> {
    /// New matrix with swapped dimensions; element (r, c) maps to (c, r).
    pub fn transpose(&self) -> Matrix<T> {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self[(row, col)]);
            }
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }
}

impl<T: FromStr> Matrix<T> {
    /// Parse delimiter-separated numeric rows from a reader.
    ///
    /// The column count is fixed by the first row; any later row with a
    /// different token count fails with a column-count error naming the
    /// offending (1-based) row. Storage starts at a small capacity and
    /// doubles as rows arrive, then is trimmed to exactly rows * cols.
    pub fn from_reader<R: BufRead>(reader: R, delimiter: char) -> Result<Self> {
        let mut data: Vec<T> = Vec::with_capacity(PARSE_INITIAL_CAPACITY);
        let mut rows = 0usize;
        let mut cols = 0usize;
        for line in reader.lines() {
            let line = line?;
            let row = rows + 1;
            let mut count = 0usize;
            for token in line.split(delimiter) {
                let value = token.parse::<T>().map_err(|_| MrmrError::InvalidValue {
                    row,
                    token: token.to_string(),
                })?;
                if data.len() == data.capacity() {
                    data.reserve_exact(data.capacity());
                }
                data.push(value);
                count += 1;
            }
            if rows == 0 {
                cols = count;
            } else if count != cols {
                return Err(MrmrError::ColumnCount {
                    row,
                    expected: cols,
                    found: count,
                });
            }
            rows += 1;
        }
        data.shrink_to_fit();
        Ok(Self { data, rows, cols })
    }
}

impl<T: fmt::Display> Matrix<T> {
    /// Write the matrix as `rows` delimiter-joined, newline-terminated lines.
    pub fn write_to<W: Write>(&self, writer: &mut W, delimiter: char) -> Result<()> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(writer, "{}", delimiter)?;
                }
                write!(writer, "{}", self[(row, col)])?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}
