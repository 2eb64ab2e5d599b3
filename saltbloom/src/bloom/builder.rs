// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::f64::consts::LN_2;

use super::BloomFilter;
use crate::error::Error;

/// Number of bits per storage word.
pub(super) const WORD_BITS: u64 = 32;

/// Largest supported capacity: the word count must fit in the `u32` stored by the encoding.
pub const MAX_NUM_BITS: u64 = u32::MAX as u64 * WORD_BITS;
/// Largest supported number of hash functions.
pub const MAX_NUM_HASHES: u32 = u16::MAX as u32;

/// Builder for creating [`BloomFilter`] instances.
///
/// Provides two construction modes:
/// - [`with_accuracy()`](Self::with_accuracy): Specify expected items and false positive rate
///   (recommended)
/// - [`with_size()`](Self::with_size): Specify bit count and hash functions (manual)
///
/// Parameters are validated when the builder is created, so [`build()`](Self::build) cannot
/// fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilterBuilder {
    num_bits: u64,
    num_hashes: u32,
}

impl BloomFilterBuilder {
    /// Creates a builder with optimal parameters for a target accuracy.
    ///
    /// # Arguments
    ///
    /// - `expected_items`: Expected number of items to be added
    /// - `fpp`: Target false positive probability (e.g., 0.01 for 1%)
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `expected_items` is 0, `fpp` is not in the open interval
    /// (0.0, 1.0), or the resulting filter would exceed [`MAX_NUM_BITS`] or
    /// [`MAX_NUM_HASHES`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_accuracy(1000, 0.01).unwrap().build();
    /// assert_eq!(filter.capacity(), 9600);
    /// assert_eq!(filter.num_hashes(), 6);
    /// ```
    pub fn with_accuracy(expected_items: u64, fpp: f64) -> Result<Self, Error> {
        let num_bits = Self::suggest_num_bits(expected_items, fpp)?;
        let num_hashes = Self::suggest_num_hashes(expected_items, num_bits);
        log::debug!(
            "sized bloom filter for {expected_items} items at fpp {fpp}: \
             num_bits={num_bits}, num_hashes={num_hashes}"
        );
        Self::with_size(num_bits, num_hashes)
    }

    /// Creates a builder with manual size specification.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `num_bits` is 0, not a multiple of 32 or above
    /// [`MAX_NUM_BITS`], or if `num_hashes` is 0 or above [`MAX_NUM_HASHES`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(1024, 5).unwrap().build();
    /// assert_eq!(filter.capacity(), 1024);
    ///
    /// assert!(BloomFilterBuilder::with_size(1000, 5).is_err());
    /// ```
    pub fn with_size(num_bits: u64, num_hashes: u32) -> Result<Self, Error> {
        validate_params(num_bits, num_hashes)?;
        Ok(BloomFilterBuilder {
            num_bits,
            num_hashes,
        })
    }

    /// Builds the Bloom filter.
    pub fn build(self) -> BloomFilter {
        BloomFilter::allocate(self.num_bits, self.num_hashes)
    }

    /// Suggests the number of bits for the expected items and target FPP.
    ///
    /// Formula: `m = -n * ln(p) / (ln(2)^2)`, rounded up to a whole number of bits and then
    /// up to the next multiple of 32.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `expected_items` is 0, `fpp` is not in (0.0, 1.0), or the
    /// result exceeds [`MAX_NUM_BITS`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::BloomFilterBuilder;
    /// let bits = BloomFilterBuilder::suggest_num_bits(1000, 0.01).unwrap();
    /// assert_eq!(bits, 9600); // 9586 rounded up to a multiple of 32
    /// ```
    pub fn suggest_num_bits(expected_items: u64, fpp: f64) -> Result<u64, Error> {
        if expected_items == 0 {
            return Err(Error::invalid_parameter(
                "expected_items",
                expected_items,
                "must be greater than 0",
            ));
        }
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(Error::invalid_parameter(
                "fpp",
                fpp,
                "must be between 0.0 and 1.0 (exclusive)",
            ));
        }

        let n = expected_items as f64;
        let bits = (-n * fpp.ln() / (LN_2 * LN_2)).ceil();
        if !bits.is_finite() || bits > MAX_NUM_BITS as f64 {
            return Err(Error::invalid_parameter(
                "num_bits",
                bits,
                format!("must not exceed {MAX_NUM_BITS}"),
            ));
        }

        // Round up to the next multiple of the word size.
        let bits = (bits as u64 + (WORD_BITS - 1)) & !(WORD_BITS - 1);
        if bits > MAX_NUM_BITS {
            return Err(Error::invalid_parameter(
                "num_bits",
                bits,
                format!("must not exceed {MAX_NUM_BITS}"),
            ));
        }
        Ok(bits)
    }

    /// Suggests the number of hash functions for the expected items and bit count.
    ///
    /// Formula: `k = floor((m / n) * ln(2))`, never less than 1. Rounding down keeps the
    /// filter's per-key work bounded; results above `u32::MAX` saturate.
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::BloomFilterBuilder;
    /// assert_eq!(BloomFilterBuilder::suggest_num_hashes(1000, 9600), 6); // 6.65
    /// assert_eq!(BloomFilterBuilder::suggest_num_hashes(1000, 32), 1);
    /// ```
    pub fn suggest_num_hashes(expected_items: u64, num_bits: u64) -> u32 {
        let m = num_bits as f64;
        let n = expected_items.max(1) as f64;
        let k = (LN_2 * m / n).floor();
        k.max(1.0) as u32
    }
}

/// Creates a Bloom filter sized for `expected_items` at the target false positive rate.
///
/// Shorthand for [`BloomFilterBuilder::with_accuracy`] followed by
/// [`build`](BloomFilterBuilder::build).
///
/// # Errors
///
/// Returns `InvalidParameter` if `expected_items` is 0 or `fpp` is not in (0.0, 1.0).
///
/// # Examples
///
/// ```
/// # use saltbloom::bloom::optimal_bloom;
/// let filter = optimal_bloom(0.01, 1000).unwrap();
/// assert_eq!(filter.capacity() % 32, 0);
/// assert!(filter.num_hashes() >= 1);
/// ```
pub fn optimal_bloom(fpp: f64, expected_items: u64) -> Result<BloomFilter, Error> {
    Ok(BloomFilterBuilder::with_accuracy(expected_items, fpp)?.build())
}

/// Validates the shape of a filter.
pub(super) fn validate_params(num_bits: u64, num_hashes: u32) -> Result<(), Error> {
    if num_bits == 0 {
        return Err(Error::invalid_parameter(
            "num_bits",
            num_bits,
            "must be greater than 0",
        ));
    }
    if num_bits % WORD_BITS != 0 {
        return Err(Error::invalid_parameter(
            "num_bits",
            num_bits,
            format!("must be a multiple of {WORD_BITS}"),
        ));
    }
    if num_bits > MAX_NUM_BITS {
        return Err(Error::invalid_parameter(
            "num_bits",
            num_bits,
            format!("must not exceed {MAX_NUM_BITS}"),
        ));
    }
    if num_hashes == 0 {
        return Err(Error::invalid_parameter(
            "num_hashes",
            num_hashes,
            "must be at least 1",
        ));
    }
    if num_hashes > MAX_NUM_HASHES {
        return Err(Error::invalid_parameter(
            "num_hashes",
            num_hashes,
            format!("must not exceed {MAX_NUM_HASHES}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_suggest_num_bits() {
        assert_eq!(BloomFilterBuilder::suggest_num_bits(1000, 0.01).unwrap(), 9600);
        assert_eq!(BloomFilterBuilder::suggest_num_bits(5000, 0.001).unwrap(), 71904);
        // A fraction of a bit still needs one whole word.
        assert_eq!(BloomFilterBuilder::suggest_num_bits(1, 0.99).unwrap(), 32);
    }

    #[test]
    fn test_with_accuracy_parameters() {
        let builder = BloomFilterBuilder::with_accuracy(5000, 0.001).unwrap();
        assert_eq!(builder, BloomFilterBuilder::with_size(71904, 9).unwrap());

        let builder = BloomFilterBuilder::with_accuracy(10, 0.5).unwrap();
        assert_eq!(builder, BloomFilterBuilder::with_size(32, 2).unwrap());

        let builder = BloomFilterBuilder::with_accuracy(1, 0.99).unwrap();
        assert_eq!(builder, BloomFilterBuilder::with_size(32, 22).unwrap());
    }

    #[test]
    fn test_invalid_expected_items() {
        let err = BloomFilterBuilder::with_accuracy(0, 0.01).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(err.context("expected_items"), Some("0"));
    }

    #[test]
    fn test_invalid_fpp() {
        for fpp in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let err = BloomFilterBuilder::with_accuracy(100, fpp).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
            assert!(err.context("fpp").is_some(), "fpp {fpp} accepted");
        }
    }

    #[test]
    fn test_oversized_filter_rejected() {
        let err = BloomFilterBuilder::with_accuracy(u64::MAX, 1e-300).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(err.context("num_bits").is_some());
    }

    #[test]
    fn test_validate_params() {
        assert!(validate_params(32, 1).is_ok());
        assert!(validate_params(MAX_NUM_BITS, MAX_NUM_HASHES).is_ok());

        let err = validate_params(31, 1).unwrap_err();
        assert_eq!(err.message(), "num_bits must be a multiple of 32");
        let err = validate_params(0, 1).unwrap_err();
        assert_eq!(err.message(), "num_bits must be greater than 0");
        let err = validate_params(MAX_NUM_BITS + 32, 1).unwrap_err();
        assert_eq!(err.context("num_bits"), Some((MAX_NUM_BITS + 32).to_string().as_str()));
        let err = validate_params(32, 0).unwrap_err();
        assert_eq!(err.message(), "num_hashes must be at least 1");
        let err = validate_params(32, MAX_NUM_HASHES + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }
}
