//! Cached per-attribute probability mass function and entropy.

/// Probability of a discrete code value.
pub type Probability = f64;

/// Discrete distribution of one attribute's codes.
///
/// The pdf is indexed by code value `0..num_values`, where `num_values`
/// is one past the largest observed code: trailing unused codes are
/// trimmed, but gaps below the maximum are kept as zero-probability
/// bins. Built once at dataset construction and immutable afterwards.
#[derive(Debug, Clone)]
pub struct AttributeInformation {
    pdf: Vec<Probability>,
    entropy: f64,
}

impl AttributeInformation {
    /// Build counts over `0..=max(codes)`, normalize to a pdf, and
    /// cache the Shannon entropy in bits.
    ///
    /// Zero-probability bins contribute exactly 0 to the entropy; they
    /// are skipped rather than evaluated through `log2`, which would
    /// produce an indeterminate `0 * -inf` product.
    pub fn from_codes<I>(codes: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut counts: Vec<u64> = Vec::new();
        let mut total = 0u64;
        for code in codes {
            if code >= counts.len() {
                counts.resize(code + 1, 0);
            }
            counts[code] += 1;
            total += 1;
        }
        if total == 0 {
            return Self {
                pdf: Vec::new(),
                entropy: 0.0,
            };
        }
        let pdf: Vec<Probability> = counts
            .iter()
            .map(|&count| count as f64 / total as f64)
            .collect();
        let entropy = -pdf
            .iter()
            .filter(|&&p| p > 0.0)
            .map(|&p| p * p.log2())
            .sum::<f64>();
        Self { pdf, entropy }
    }

    /// Number of representable code values (max observed code + 1).
    pub fn num_values(&self) -> usize {
        self.pdf.len()
    }

    /// Shannon entropy of the distribution, in bits.
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Probability of one code value. Addressing a code at or above
    /// `num_values()` is a contract violation.
    pub fn marginal_probability(&self, code: usize) -> Probability {
        assert!(
            code < self.num_values(),
            "code {} out of range for attribute with {} values",
            code,
            self.num_values()
        );
        self.pdf[code]
    }
}
