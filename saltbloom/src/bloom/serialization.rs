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

// Serialization constants
pub(super) const PREAMBLE_LONGS_EMPTY: u8 = 2;
pub(super) const PREAMBLE_LONGS_STANDARD: u8 = 3;
pub(super) const FAMILY_ID: u8 = 22;
pub(super) const SERIAL_VERSION: u8 = 1;
pub(super) const EMPTY_FLAG_MASK: u8 = 1 << 2;
/// Largest word count accepted for the empty form (2^31 bits).
pub(super) const MAX_EMPTY_FORM_WORDS: usize = 1 << 26;

/// The minimal persisted form of a [`BloomFilter`](super::BloomFilter).
///
/// Holds `(k, n, bits)` and nothing else: the capacity is `32 * bits.len()` and the hash
/// functions are regenerated from it on
/// [`BloomFilter::from_state`](super::BloomFilter::from_state).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BloomState {
    /// Number of hash functions (k).
    pub num_hashes: u32,
    /// Number of `add` calls recorded by the filter (n).
    pub num_items: u64,
    /// The bit array as 32-bit words.
    pub bits: Vec<u32>,
}
