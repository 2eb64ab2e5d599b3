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

//! A Bloom filter built on salted SHA-1 hash functions.
//!
//! The crate provides a fixed-size probabilistic membership filter with no false negatives,
//! closed-form sizing from a target false positive rate, and a compact persisted form from
//! which the filter's hash functions are regenerated.
//!
//! - [`bloom`]: the filter, its builder and the sizing helpers
//! - [`hash`]: the salted hash family the filter draws its `k` functions from
//! - [`error`]: the error type returned by fallible operations
//!
//! ```rust
//! use saltbloom::bloom::BloomFilter;
//! use saltbloom::bloom::optimal_bloom;
//!
//! let mut filter = optimal_bloom(0.01, 1000).unwrap();
//! filter.add("user:42");
//! assert!(filter.may_contain("user:42"));
//!
//! let restored = BloomFilter::deserialize(&filter.serialize()).unwrap();
//! assert!(restored.may_contain("user:42"));
//! ```

#![deny(missing_docs)]

pub mod bloom;
pub mod error;
pub mod hash;

mod codec;
