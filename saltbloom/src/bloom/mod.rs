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

//! Bloom filter for probabilistic set membership testing.
//!
//! A Bloom filter answers "might this key be in the set?" using a fixed array of `m` bits and
//! `k` hash functions. Adding a key sets the `k` bits its hashes select; a query reports a key
//! as possibly present only when all of those bits are set. A negative answer is always
//! correct, so the filter is useful in front of an expensive backing store: any key the filter
//! rejects never needs to be looked up.
//!
//! # Properties
//!
//! - **No false negatives**: after `add(x)`, `may_contain(x)` is always `true`
//! - **Possible false positives**: `may_contain` may return `true` for keys never added
//! - **Fixed size**: the bit array never grows; bits are only cleared by [`BloomFilter::clear`]
//!
//! # Usage
//!
//! ```rust
//! use saltbloom::bloom::optimal_bloom;
//!
//! // Sized for 1000 keys at a 1% false positive rate
//! let mut filter = optimal_bloom(0.01, 1000).unwrap();
//!
//! filter.add("apple");
//! filter.add(b"banana");
//!
//! assert!(filter.may_contain("apple"));
//! assert!(filter.may_contain(b"banana"));
//!
//! println!("Capacity: {} bits, {} hashes", filter.capacity(), filter.num_hashes());
//! println!("Est. FPP: {:.4}%", filter.false_positive_rate() * 100.0);
//! ```
//!
//! # Creating Filters
//!
//! ## By Accuracy (Recommended)
//!
//! ```rust
//! # use saltbloom::bloom::BloomFilterBuilder;
//! let filter = BloomFilterBuilder::with_accuracy(
//!     10_000, // Expected items
//!     0.01,   // Target false positive probability (1%)
//! )
//! .unwrap()
//! .build();
//! ```
//!
//! ## By Size (Manual)
//!
//! The bit count must be a positive multiple of 32:
//!
//! ```rust
//! # use saltbloom::bloom::BloomFilter;
//! let filter = BloomFilter::new(95_872, 6).unwrap();
//! assert_eq!(filter.capacity(), 95_872);
//! ```
//!
//! # Persistence
//!
//! A filter is fully described by `(k, n, bits)`. The hash functions are regenerated from the
//! bit count and `k` whenever a filter is rebuilt, either from a [`BloomState`] record or from
//! the bytes produced by [`BloomFilter::serialize`].
//!
//! # Implementation Details
//!
//! - Hash function `i` is SHA-1 salted with the decimal string of `i` (see
//!   [`SaltedHash`](crate::hash::SaltedHash))
//! - Bits packed in `u32` words
//! - Sizing follows `m = -n ln p / (ln 2)^2` and `k = (ln 2) m / n`
//!
//! # Concurrency
//!
//! The filter holds no interior mutability. `add` and `clear` take `&mut self`; callers that
//! share a filter across threads wrap it in their own lock.

mod builder;
mod serialization;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::builder::MAX_NUM_BITS;
pub use self::builder::MAX_NUM_HASHES;
pub use self::builder::optimal_bloom;
pub use self::serialization::BloomState;
pub use self::sketch::BloomFilter;
