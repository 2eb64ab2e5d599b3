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

use super::builder::WORD_BITS;
use super::builder::validate_params;
use super::serialization::BloomState;
use super::serialization::EMPTY_FLAG_MASK;
use super::serialization::FAMILY_ID;
use super::serialization::MAX_EMPTY_FORM_WORDS;
use super::serialization::PREAMBLE_LONGS_EMPTY;
use super::serialization::PREAMBLE_LONGS_STANDARD;
use super::serialization::SERIAL_VERSION;
use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash::SaltedHash;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides fast membership queries with:
/// - No false negatives (added items always return `true`)
/// - Tunable false positive rate
/// - Constant space usage
///
/// Use [`BloomFilter::new`], [`BloomFilterBuilder`](super::BloomFilterBuilder) or
/// [`optimal_bloom`](super::optimal_bloom) to construct instances.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    /// Number of hash functions (k)
    num_hashes: u32,
    /// Number of `add` calls since creation or the last `clear` (n)
    num_items: u64,
    /// Bit array packed into u32 words; capacity m = 32 * len
    bit_array: Vec<u32>,
    /// Hash functions with salts `0..k`, derived from `(m, k)`
    hashes: Vec<SaltedHash>,
}

impl BloomFilter {
    /// Creates an empty filter with `num_bits` bits and `num_hashes` hash functions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `num_bits` is 0 or not a multiple of 32, or if
    /// `num_hashes` is 0. The error names the offending parameter and carries its value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::BloomFilter;
    /// let filter = BloomFilter::new(32, 1).unwrap();
    /// assert_eq!(filter.capacity(), 32);
    ///
    /// let err = BloomFilter::new(31, 1).unwrap_err();
    /// assert_eq!(err.context("num_bits"), Some("31"));
    /// ```
    pub fn new(num_bits: u64, num_hashes: u32) -> Result<Self, Error> {
        validate_params(num_bits, num_hashes)?;
        Ok(Self::allocate(num_bits, num_hashes))
    }

    /// Allocates a zeroed filter. Parameters must already be validated.
    pub(super) fn allocate(num_bits: u64, num_hashes: u32) -> Self {
        log::debug!("creating bloom filter: num_bits={num_bits}, num_hashes={num_hashes}");

        let num_words = (num_bits / WORD_BITS) as usize;
        BloomFilter {
            num_hashes,
            num_items: 0,
            bit_array: vec![0u32; num_words],
            hashes: salted_hashes(num_bits, num_hashes),
        }
    }

    // ========================================================================
    // Query Operations
    // ========================================================================

    /// Tests whether an item is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** added (or false positive)
    /// - `false`: Item was **definitely not** added
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::optimal_bloom;
    /// let mut filter = optimal_bloom(0.01, 100).unwrap();
    /// filter.add("apple");
    ///
    /// assert!(filter.may_contain("apple"));
    /// ```
    pub fn may_contain(&self, item: impl AsRef<[u8]>) -> bool {
        let item = item.as_ref();
        self.hashes.iter().all(|hash| {
            let (word, mask) = locate(hash.hash(item));
            self.bit_array[word] & mask != 0
        })
    }

    /// Tests and adds an item in a single hashing pass.
    ///
    /// Returns whether the item was possibly present before this call. Like [`add`](Self::add),
    /// it counts towards [`num_items`](Self::num_items).
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::optimal_bloom;
    /// let mut filter = optimal_bloom(0.01, 100).unwrap();
    ///
    /// assert!(!filter.contains_and_add("apple"));
    /// assert!(filter.contains_and_add("apple"));
    /// assert_eq!(filter.num_items(), 2);
    /// ```
    pub fn contains_and_add(&mut self, item: impl AsRef<[u8]>) -> bool {
        let item = item.as_ref();
        let mut was_present = true;
        for hash in &self.hashes {
            let (word, mask) = locate(hash.hash(item));
            if self.bit_array[word] & mask == 0 {
                was_present = false;
                self.bit_array[word] |= mask;
            }
        }
        self.num_items = self.num_items.saturating_add(1);
        was_present
    }

    // ========================================================================
    // Update Operations
    // ========================================================================

    /// Adds an item to the filter.
    ///
    /// After this call `may_contain(item)` always returns `true`. The item count is incremented
    /// even if the item was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::optimal_bloom;
    /// let mut filter = optimal_bloom(0.01, 100).unwrap();
    ///
    /// filter.add("apple");
    /// filter.add("apple");
    /// filter.add([1u8, 2, 3]);
    ///
    /// assert!(filter.may_contain("apple"));
    /// assert_eq!(filter.num_items(), 3);
    /// ```
    pub fn add(&mut self, item: impl AsRef<[u8]>) {
        let item = item.as_ref();
        for hash in &self.hashes {
            let (word, mask) = locate(hash.hash(item));
            self.bit_array[word] |= mask;
        }
        self.num_items = self.num_items.saturating_add(1);
    }

    /// Resets the filter to its initial empty state.
    ///
    /// Clears all bits and the item count while preserving capacity and hash functions.
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::optimal_bloom;
    /// let mut filter = optimal_bloom(0.01, 100).unwrap();
    /// filter.add("apple");
    ///
    /// filter.clear();
    /// assert!(filter.is_empty());
    /// assert_eq!(filter.num_items(), 0);
    /// assert!(!filter.may_contain("apple"));
    /// ```
    pub fn clear(&mut self) {
        self.bit_array.fill(0);
        self.num_items = 0;
    }

    /// Merges another filter into this one via bitwise OR.
    ///
    /// Afterwards this filter recognizes items from either filter, and its item count is the
    /// sum of both counts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the filters differ in capacity or number of hashes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::optimal_bloom;
    /// let mut f1 = optimal_bloom(0.01, 100).unwrap();
    /// let mut f2 = optimal_bloom(0.01, 100).unwrap();
    ///
    /// f1.add("a");
    /// f2.add("b");
    ///
    /// f1.union(&f2).unwrap();
    /// assert!(f1.may_contain("a"));
    /// assert!(f1.may_contain("b"));
    /// ```
    pub fn union(&mut self, other: &BloomFilter) -> Result<(), Error> {
        if !self.is_compatible(other) {
            return Err(
                Error::new(ErrorKind::InvalidParameter, "cannot union incompatible Bloom filters")
                    .with_context("num_bits", self.capacity())
                    .with_context("num_hashes", self.num_hashes)
                    .with_context("other_num_bits", other.capacity())
                    .with_context("other_num_hashes", other.num_hashes),
            );
        }

        for (word, other_word) in self.bit_array.iter_mut().zip(&other.bit_array) {
            *word |= *other_word;
        }
        self.num_items = self.num_items.saturating_add(other.num_items);
        Ok(())
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns whether no bit is set.
    pub fn is_empty(&self) -> bool {
        self.bit_array.iter().all(|&word| word == 0)
    }

    /// Returns the number of bits set to 1.
    pub fn bits_used(&self) -> u64 {
        self.bit_array
            .iter()
            .map(|word| u64::from(word.count_ones()))
            .sum()
    }

    /// Returns the total number of bits in the filter (m).
    pub fn capacity(&self) -> u64 {
        self.bit_array.len() as u64 * WORD_BITS
    }

    /// Returns the number of hash functions (k).
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Returns the number of `add` calls since creation or the last `clear` (n).
    pub fn num_items(&self) -> u64 {
        self.num_items
    }

    /// Returns the fraction of bits set.
    pub fn load_factor(&self) -> f64 {
        self.bits_used() as f64 / self.capacity() as f64
    }

    /// Returns the raw bit array.
    pub fn as_words(&self) -> &[u32] {
        &self.bit_array
    }

    /// Estimates the current false positive probability.
    ///
    /// Based on the formula: `(1 - e^(-k*n/m))^k`
    /// where:
    /// - k = num_hashes
    /// - n = num_items
    /// - m = capacity
    ///
    /// This assumes the hash outputs are independent and uniform. It overestimates when many
    /// added items are duplicates, since those count towards n without setting new bits.
    pub fn false_positive_rate(&self) -> f64 {
        let k = f64::from(self.num_hashes);
        let n = self.num_items as f64;
        let m = self.capacity() as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// Checks if two filters can be merged.
    ///
    /// Filters are compatible if they have the same capacity and number of hash functions,
    /// which implies identical hash functions.
    pub fn is_compatible(&self, other: &BloomFilter) -> bool {
        self.bit_array.len() == other.bit_array.len() && self.num_hashes == other.num_hashes
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Captures the minimal state `(k, n, bits)` needed to rebuild this filter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(64, 3).unwrap();
    /// filter.add("test");
    ///
    /// let state = filter.to_state();
    /// assert_eq!(state.num_hashes, 3);
    /// assert_eq!(state.num_items, 1);
    /// assert_eq!(state.bits.len(), 2);
    /// ```
    pub fn to_state(&self) -> BloomState {
        BloomState {
            num_hashes: self.num_hashes,
            num_items: self.num_items,
            bits: self.bit_array.clone(),
        }
    }

    /// Rebuilds a filter from a [`BloomState`].
    ///
    /// The capacity is `32 * state.bits.len()` and the hash functions are regenerated from the
    /// capacity and `state.num_hashes`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `state.bits` is empty or too long, or if
    /// `state.num_hashes` is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(256, 4).unwrap();
    /// filter.add("test");
    ///
    /// let restored = BloomFilter::from_state(filter.to_state()).unwrap();
    /// assert!(restored.may_contain("test"));
    /// assert_eq!(restored, filter);
    /// ```
    pub fn from_state(state: BloomState) -> Result<Self, Error> {
        let BloomState {
            num_hashes,
            num_items,
            bits,
        } = state;

        let num_bits = (bits.len() as u64).saturating_mul(WORD_BITS);
        validate_params(num_bits, num_hashes)?;

        Ok(BloomFilter {
            num_hashes,
            num_items,
            bit_array: bits,
            hashes: salted_hashes(num_bits, num_hashes),
        })
    }

    /// Serializes the filter to a byte vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::BloomFilter;
    /// # use saltbloom::bloom::optimal_bloom;
    /// let mut filter = optimal_bloom(0.01, 100).unwrap();
    /// filter.add("test");
    ///
    /// let bytes = filter.serialize();
    /// let restored = BloomFilter::deserialize(&bytes).unwrap();
    /// assert!(restored.may_contain("test"));
    /// ```
    pub fn serialize(&self) -> Vec<u8> {
        let is_empty = self.num_items == 0 && self.is_empty();
        let preamble_longs = if is_empty {
            PREAMBLE_LONGS_EMPTY
        } else {
            PREAMBLE_LONGS_STANDARD
        };

        let capacity = 8 * preamble_longs as usize
            + if is_empty {
                0
            } else {
                self.bit_array.len() * 4
            };
        let mut bytes = SketchBytes::with_capacity(capacity);

        // Preamble
        bytes.write_u8(preamble_longs);
        bytes.write_u8(SERIAL_VERSION);
        bytes.write_u8(FAMILY_ID);
        bytes.write_u8(if is_empty { EMPTY_FLAG_MASK } else { 0 });
        bytes.write_u32_le(self.bit_array.len() as u32);

        bytes.write_u32_le(self.num_hashes);
        bytes.write_u32_le(0); // reserved

        if !is_empty {
            bytes.write_u64_le(self.num_items);
            bytes.write_u32_slice_le(&self.bit_array);
        }

        bytes.into_bytes()
    }

    /// Deserializes a filter from bytes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if:
    /// - The data is truncated or corrupted
    /// - The family ID doesn't match (not a filter of this crate)
    /// - The serial version is unsupported
    /// - The recorded shape is not a valid filter
    ///
    /// # Examples
    ///
    /// ```
    /// # use saltbloom::bloom::BloomFilter;
    /// let original = BloomFilter::new(1024, 5).unwrap();
    /// let bytes = original.serialize();
    ///
    /// let restored = BloomFilter::deserialize(&bytes).unwrap();
    /// assert_eq!(original, restored);
    /// ```
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let mut cursor = SketchSlice::new(bytes);

        // Read preamble
        let preamble_longs = cursor
            .read_u8()
            .map_err(|e| Error::insufficient_data("preamble_longs", e))?;
        let serial_version = cursor
            .read_u8()
            .map_err(|e| Error::insufficient_data("serial_version", e))?;
        let family_id = cursor
            .read_u8()
            .map_err(|e| Error::insufficient_data("family_id", e))?;
        let flags = cursor
            .read_u8()
            .map_err(|e| Error::insufficient_data("flags", e))?;

        // Validate
        if family_id != FAMILY_ID {
            return Err(Error::invalid_family(FAMILY_ID, family_id, "BloomFilter"));
        }
        if serial_version != SERIAL_VERSION {
            return Err(Error::unsupported_serial_version(
                SERIAL_VERSION,
                serial_version,
            ));
        }
        let is_empty = (flags & EMPTY_FLAG_MASK) != 0;
        let expected_preamble_longs = if is_empty {
            PREAMBLE_LONGS_EMPTY
        } else {
            PREAMBLE_LONGS_STANDARD
        };
        if preamble_longs != expected_preamble_longs {
            return Err(Error::invalid_preamble_longs(
                expected_preamble_longs,
                preamble_longs,
            ));
        }

        let num_words = cursor
            .read_u32_le()
            .map_err(|e| Error::insufficient_data("num_words", e))?;
        let num_hashes = cursor
            .read_u32_le()
            .map_err(|e| Error::insufficient_data("num_hashes", e))?;
        let mut reserved = [0u8; 4];
        cursor
            .read_exact(&mut reserved)
            .map_err(|e| Error::insufficient_data("reserved", e))?;

        if num_words == 0 {
            return Err(Error::deserial("num_words must be greater than 0"));
        }
        let num_words = num_words as usize;

        let mut bits = vec![];
        let num_items = if is_empty {
            // Nothing backs the word count of the empty form, so bound it before allocating.
            if num_words > MAX_EMPTY_FORM_WORDS {
                return Err(Error::deserial(format!(
                    "num_words must not exceed {MAX_EMPTY_FORM_WORDS} for an empty filter"
                ))
                .with_context("num_words", num_words));
            }
            bits.try_reserve_exact(num_words).map_err(|e| {
                Error::deserial("cannot allocate bit_array")
                    .with_context("num_words", num_words)
                    .set_source(e)
            })?;
            bits.resize(num_words, 0);
            0
        } else {
            let num_items = cursor
                .read_u64_le()
                .map_err(|e| Error::insufficient_data("num_items", e))?;

            // Check the length up front so a corrupt word count cannot force a huge allocation.
            let expected = num_words * 4;
            if cursor.remaining() < expected {
                return Err(Error::deserial(format!(
                    "insufficient data: bit_array, expected {expected} bytes, got {}",
                    cursor.remaining()
                )));
            }
            bits.resize(num_words, 0);
            cursor
                .read_u32_slice_le(&mut bits)
                .map_err(|e| Error::insufficient_data("bit_array", e))?;
            num_items
        };

        log::debug!(
            "decoded bloom filter: num_words={num_words}, num_hashes={num_hashes}, \
             num_items={num_items}"
        );

        let state = BloomState {
            num_hashes,
            num_items,
            bits,
        };
        Self::from_state(state)
            .map_err(|err| Error::deserial("invalid bloom filter state").set_source(err))
    }
}

impl PartialEq for BloomFilter {
    fn eq(&self, other: &Self) -> bool {
        // Hash functions are a function of (m, k), so they need no comparison.
        self.num_hashes == other.num_hashes
            && self.num_items == other.num_items
            && self.bit_array == other.bit_array
    }
}

/// Builds the hash functions with salts `0..num_hashes` over `[0, num_bits)`.
fn salted_hashes(num_bits: u64, num_hashes: u32) -> Vec<SaltedHash> {
    (0..num_hashes)
        .map(|salt| SaltedHash::from_parts(num_bits, salt))
        .collect()
}

/// Maps a bit index to its word index and the mask within that word.
fn locate(bit_index: u64) -> (usize, u32) {
    let word = (bit_index / WORD_BITS) as usize;
    let mask = 1u32 << (bit_index % WORD_BITS);
    (word, mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bloom::optimal_bloom;

    #[test]
    fn test_new_validates() {
        assert!(BloomFilter::new(32, 1).is_ok());

        for (num_bits, num_hashes, key) in [
            (31, 1, "num_bits"),
            (0, 1, "num_bits"),
            (33, 1, "num_bits"),
            (32, 0, "num_hashes"),
        ] {
            let err = BloomFilter::new(num_bits, num_hashes).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
            assert!(err.context(key).is_some(), "{num_bits}/{num_hashes}: {err}");
        }
    }

    #[test]
    fn test_new_builds_salted_hashes() {
        let filter = BloomFilter::new(128, 3).unwrap();
        assert_eq!(filter.capacity(), 128);
        assert_eq!(filter.as_words().len(), 4);
        let salts: Vec<_> = filter.hashes.iter().map(|h| h.salt()).collect();
        assert_eq!(salts, vec!["0", "1", "2"]);
        assert!(filter.hashes.iter().all(|h| h.num_bits() == 128));
    }

    #[test]
    fn test_add_sets_hashed_bits() {
        let mut filter = BloomFilter::new(1024, 2).unwrap();
        filter.add(b"hello");

        // Salt 0 maps "hello" to bit 883, salt 1 to bit 209.
        let mut expected = vec![0u32; 32];
        expected[883 / 32] |= 1 << (883 % 32);
        expected[209 / 32] |= 1 << (209 % 32);
        assert_eq!(filter.as_words(), expected.as_slice());
        assert_eq!(filter.bits_used(), 2);
    }

    #[test]
    fn test_add_and_may_contain() {
        let mut filter = optimal_bloom(0.01, 100).unwrap();
        assert!(!filter.may_contain("apple"));

        filter.add("apple");
        assert!(filter.may_contain("apple"));
        assert!(!filter.is_empty());
        assert_eq!(filter.num_items(), 1);
    }

    #[test]
    fn test_duplicate_adds_count() {
        let mut filter = BloomFilter::new(256, 3).unwrap();
        filter.add("x");
        let words = filter.as_words().to_vec();
        filter.add("x");
        assert_eq!(filter.as_words(), words.as_slice());
        assert_eq!(filter.num_items(), 2);
    }

    #[test]
    fn test_contains_and_add() {
        let mut filter = optimal_bloom(0.01, 100).unwrap();
        assert!(!filter.contains_and_add(42_u64.to_le_bytes()));
        assert!(filter.contains_and_add(42_u64.to_le_bytes()));
        assert!(filter.may_contain(42_u64.to_le_bytes()));
    }

    #[test]
    fn test_clear() {
        let mut filter = optimal_bloom(0.01, 100).unwrap();
        filter.add("test");
        let capacity = filter.capacity();

        filter.clear();
        assert!(filter.is_empty());
        assert_eq!(filter.num_items(), 0);
        assert_eq!(filter.bits_used(), 0);
        assert_eq!(filter.capacity(), capacity);
        assert!(!filter.may_contain("test"));
        assert_eq!(filter.false_positive_rate(), 0.0);
    }

    #[test]
    fn test_union() {
        let mut f1 = BloomFilter::new(512, 4).unwrap();
        let mut f2 = BloomFilter::new(512, 4).unwrap();
        f1.add("a");
        f2.add("b");
        f2.add("c");

        f1.union(&f2).unwrap();
        assert!(f1.may_contain("a"));
        assert!(f1.may_contain("b"));
        assert!(f1.may_contain("c"));
        assert_eq!(f1.num_items(), 3);
    }

    #[test]
    fn test_union_incompatible() {
        let mut f1 = BloomFilter::new(512, 4).unwrap();
        let f2 = BloomFilter::new(512, 3).unwrap();
        let f3 = BloomFilter::new(1024, 4).unwrap();
        assert!(!f1.is_compatible(&f2));
        assert!(!f1.is_compatible(&f3));

        let err = f1.union(&f2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(err.context("other_num_hashes"), Some("3"));
    }

    #[test]
    fn test_statistics() {
        let mut filter = BloomFilter::new(64, 1).unwrap();
        assert_eq!(filter.load_factor(), 0.0);
        filter.add("only");
        assert_eq!(filter.bits_used(), 1);
        assert_eq!(filter.load_factor(), 1.0 / 64.0);
    }

    #[test]
    fn test_false_positive_rate() {
        let mut filter = BloomFilter::new(320, 3).unwrap();
        let mut last = filter.false_positive_rate();
        assert_eq!(last, 0.0);
        for i in 0..50u32 {
            filter.add(i.to_le_bytes());
            let rate = filter.false_positive_rate();
            assert!(rate > last && rate <= 1.0, "rate {rate} after {last}");
            last = rate;
        }

        // (1 - e^(-3*50/320))^3
        let expected = (1.0 - (-150.0_f64 / 320.0).exp()).powi(3);
        assert!((last - expected).abs() < 1e-12);
    }

    #[test]
    fn test_serialize_empty() {
        let filter = BloomFilter::new(96, 2).unwrap();
        let bytes = filter.serialize();
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[0], PREAMBLE_LONGS_EMPTY);
        assert_eq!(bytes[3], EMPTY_FLAG_MASK);

        let restored = BloomFilter::deserialize(&bytes).unwrap();
        assert_eq!(restored, filter);
        assert_eq!(restored.capacity(), 96);
    }

    #[test]
    fn test_serialize_with_data() {
        let mut filter = BloomFilter::new(96, 2).unwrap();
        filter.add("a");
        let bytes = filter.serialize();
        assert_eq!(bytes.len(), 24 + 3 * 4);
        assert_eq!(bytes[0], PREAMBLE_LONGS_STANDARD);

        let restored = BloomFilter::deserialize(&bytes).unwrap();
        assert_eq!(restored, filter);
        assert!(restored.may_contain("a"));
    }

    #[test]
    fn test_serialize_cleared_keeps_count() {
        // A zeroed bit array with items counted must not use the empty form.
        let filter = BloomFilter::from_state(BloomState {
            num_hashes: 1,
            num_items: 5,
            bits: vec![0; 2],
        })
        .unwrap();
        let restored = BloomFilter::deserialize(&filter.serialize()).unwrap();
        assert_eq!(restored.num_items(), 5);
    }

    #[test]
    fn test_add_saturates_item_count() {
        let mut filter = BloomFilter::from_state(BloomState {
            num_hashes: 1,
            num_items: u64::MAX,
            bits: vec![0; 1],
        })
        .unwrap();

        filter.add("x");
        assert_eq!(filter.num_items(), u64::MAX);
        assert!(filter.may_contain("x"));

        assert!(filter.contains_and_add("x"));
        assert_eq!(filter.num_items(), u64::MAX);
        assert_eq!(filter.false_positive_rate(), 1.0);
    }

    #[test]
    fn test_from_state_keeps_words() {
        let bits = vec![0xdead_beef, 0, 1];
        let ptr = bits.as_ptr();
        let filter = BloomFilter::from_state(BloomState {
            num_hashes: 2,
            num_items: 7,
            bits,
        })
        .unwrap();

        // The caller's buffer is moved in, not copied.
        assert_eq!(filter.as_words().as_ptr(), ptr);
        assert_eq!(filter.as_words(), &[0xdead_beef, 0, 1]);
        assert_eq!(filter.capacity(), 96);
        let salts: Vec<_> = filter.hashes.iter().map(|h| h.salt()).collect();
        assert_eq!(salts, vec!["0", "1"]);
        assert!(filter.hashes.iter().all(|h| h.num_bits() == 96));
    }

    #[test]
    fn test_from_state_validates() {
        let err = BloomFilter::from_state(BloomState {
            num_hashes: 3,
            num_items: 0,
            bits: vec![],
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);

        let err = BloomFilter::from_state(BloomState {
            num_hashes: 0,
            num_items: 0,
            bits: vec![0; 4],
        })
        .unwrap_err();
        assert_eq!(err.context("num_hashes"), Some("0"));
    }
}
