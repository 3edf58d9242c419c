//! Discretized dataset: attribute names, per-attribute distributions,
//! and the column-major code matrix they were computed from.

use std::fmt::Display;
use std::io::{BufRead, Write};

use num_traits::{AsPrimitive, NumCast, PrimInt, Unsigned};

use crate::attribute::AttributeInformation;
use crate::config::Discretization;
use crate::error::{MrmrError, Result};
use crate::math::Matrix;

/// Unsigned fixed-width code storage. The type's maximum value is the
/// code capacity: the number of representable buckets per attribute.
pub trait Code: PrimInt + Unsigned + AsPrimitive<usize> + Display {}

impl<T> Code for T where T: PrimInt + Unsigned + AsPrimitive<usize> + Display {}

/// An ingested, discretized dataset.
///
/// Codes are stored attribute-major (one contiguous run per attribute)
/// so per-attribute scans and pairwise joint histograms stay cache
/// friendly. Every stored code for attribute `i` lies in
/// `[0, histogram(i).num_values() - 1]`. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Dataset<C: Code = u8> {
    names: Vec<String>,
    info: Vec<AttributeInformation>,
    data: Matrix<C>,
}

impl<C: Code> Dataset<C> {
    /// Read a header line of attribute names followed by rows of raw
    /// numeric values, then discretize.
    ///
    /// The header must be terminated by a newline; every data row must
    /// have as many fields as the header's first data row.
    pub fn from_reader<R: BufRead>(
        mut reader: R,
        delimiter: char,
        method: Discretization,
    ) -> Result<Self> {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        if !header.ends_with('\n') {
            return Err(MrmrError::MissingHeaderNewline);
        }
        let names: Vec<String> = header
            .trim_end_matches('\n')
            .split(delimiter)
            .map(str::to_string)
            .collect();
        let raw = Matrix::<f64>::from_reader(reader, delimiter)?;
        Self::from_raw(raw, names, method)
    }

    /// Discretize a raw instance-major matrix into codes.
    ///
    /// Four passes, deliberately separated so that discretization
    /// policies needing whole-attribute context (e.g. normalization)
    /// can slot in without restructuring:
    /// 1. transform each cell to a signed integer, tracking the
    ///    per-attribute minimum and maximum;
    /// 2. reject any attribute whose (max - min) range exceeds the
    ///    code capacity;
    /// 3. translate each attribute by its minimum so codes start at 0,
    ///    storing attribute-major;
    /// 4. build one histogram per attribute.
    pub fn from_raw(raw: Matrix<f64>, names: Vec<String>, method: Discretization) -> Result<Self> {
        let num_attributes = names.len();
        let num_instances = raw.nrows();
        if num_instances > 0 && raw.ncols() != num_attributes {
            return Err(MrmrError::Construction {
                expected: num_attributes,
                found: raw.ncols(),
            });
        }
        let capacity = code_capacity::<C>();

        // Transform pass. The transposition into attribute-major
        // storage happens here as well.
        let mut transformed = Matrix::<i64>::zeros(num_attributes, num_instances);
        // Extrema are seeded at 0, so an attribute whose values are all
        // non-negative keeps its codes unshifted and the echo output
        // preserves the user's own coding.
        let mut minima = vec![0i64; num_attributes];
        let mut maxima = vec![0i64; num_attributes];
        for instance in 0..num_instances {
            for attribute in 0..num_attributes {
                // The float-to-int cast saturates, so extreme inputs
                // land on i64::MIN/MAX and fail the magnitude check.
                let value = method.apply(raw[(instance, attribute)]) as i64;
                if value.unsigned_abs() > capacity as u64 {
                    // Line numbering counts the header as line 1.
                    return Err(MrmrError::Overflow {
                        line: instance + 2,
                        column: attribute + 1,
                    });
                }
                if value < minima[attribute] {
                    minima[attribute] = value;
                }
                if value > maxima[attribute] {
                    maxima[attribute] = value;
                }
                transformed[(attribute, instance)] = value;
            }
        }

        // Representability check, before anything is narrowed.
        for attribute in 0..num_attributes {
            if maxima[attribute] - minima[attribute] > capacity {
                return Err(MrmrError::Representation {
                    attribute: names[attribute].clone(),
                    capacity,
                });
            }
        }

        // Translate pass: shift each attribute so its minimum is 0 and
        // narrow to the code type.
        let mut data = Matrix::<C>::zeros(num_attributes, num_instances);
        for attribute in 0..num_attributes {
            let translation = minima[attribute];
            for instance in 0..num_instances {
                let shifted = transformed[(attribute, instance)] - translation;
                data[(attribute, instance)] =
                    NumCast::from(shifted).expect("translated code fits the code type");
            }
        }

        Self::from_parts(names, data)
    }

    /// Build a dataset from already-discretized codes, instance-major.
    pub fn from_codes(names: Vec<String>, codes: Matrix<C>) -> Result<Self> {
        if codes.ncols() != names.len() {
            return Err(MrmrError::Construction {
                expected: names.len(),
                found: codes.ncols(),
            });
        }
        Self::from_parts(names, codes.transpose())
    }

    /// Histogram pass over attribute-major codes.
    fn from_parts(names: Vec<String>, data: Matrix<C>) -> Result<Self> {
        let mut info = Vec::with_capacity(names.len());
        for attribute in 0..names.len() {
            info.push(AttributeInformation::from_codes(
                data.row_slice(attribute).iter().map(|code| code.as_()),
            ));
        }
        log::debug!(
            "dataset ready: {} attributes x {} instances",
            names.len(),
            data.ncols()
        );
        Ok(Self { names, info, data })
    }

    pub fn num_attributes(&self) -> usize {
        self.names.len()
    }

    pub fn num_instances(&self) -> usize {
        self.data.ncols()
    }

    pub fn attribute_name(&self, attribute: usize) -> &str {
        &self.names[attribute]
    }

    /// Cached Shannon entropy of one attribute, in bits.
    pub fn attribute_entropy(&self, attribute: usize) -> f64 {
        self.info[attribute].entropy()
    }

    /// Mutual information in bits between two attributes.
    ///
    /// Builds the joint histogram in one linear scan over the
    /// instances and sums only the non-zero joint cells. Deliberately
    /// uncached: the selector calls this in a tight loop and the
    /// per-call joint histogram is the dominating cost by design.
    pub fn mutual_information(&self, a: usize, b: usize) -> f64 {
        let a_values = self.info[a].num_values();
        let b_values = self.info[b].num_values();
        // A constant attribute carries no information about anything;
        // bailing out also avoids degenerate log evaluation.
        if a_values == 1 || b_values == 1 {
            return 0.0;
        }
        let a_codes = self.data.row_slice(a);
        let b_codes = self.data.row_slice(b);
        let mut joint = vec![0u64; a_values * b_values];
        for instance in 0..self.num_instances() {
            joint[a_codes[instance].as_() * b_values + b_codes[instance].as_()] += 1;
        }
        let total = self.num_instances() as f64;
        let mut mutual_information = 0.0;
        for i in 0..a_values {
            for j in 0..b_values {
                let count = joint[i * b_values + j];
                if count > 0 {
                    let joint_p = count as f64 / total;
                    let marginal_i = self.info[a].marginal_probability(i);
                    let marginal_j = self.info[b].marginal_probability(j);
                    mutual_information += joint_p * (joint_p / (marginal_i * marginal_j)).log2();
                }
            }
        }
        mutual_information
    }

    /// Echo the discretized dataset: header line of names, then one
    /// line of codes per instance in original column order.
    pub fn write_to<W: Write>(&self, writer: &mut W, delimiter: char) -> Result<()> {
        if self.names.is_empty() {
            return Ok(());
        }
        write!(writer, "{}", self.names[0])?;
        for name in &self.names[1..] {
            write!(writer, "{}{}", delimiter, name)?;
        }
        writeln!(writer)?;
        self.data.transpose().write_to(writer, delimiter)
    }
}

fn code_capacity<C: Code>() -> i64 {
    <i64 as NumCast>::from(C::max_value()).expect("code capacity fits in i64")
}
