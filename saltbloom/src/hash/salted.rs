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

use std::fmt;

use sha1::Digest;
use sha1::Sha1;

use crate::error::Error;

/// One member of a family of hash functions derived from SHA-1 by salting.
///
/// A `SaltedHash` maps arbitrary byte strings to an index in `[0, num_bits)`. The digest is
/// taken over the textual form of the salt followed by the input, and the 20 digest bytes are
/// folded into an integer as `v = (v + byte * scale) mod num_bits` with `scale` starting at 1
/// and multiplied by 8 after each byte.
///
/// The factor of 8 (rather than 256) mixes fewer bits per digest byte than a byte-radix fold
/// would. It is kept as is: changing it would move every index and break filters that have
/// already been persisted.
///
/// Distinct salts over the same `num_bits` behave as independent functions, which is how a
/// [`BloomFilter`](crate::bloom::BloomFilter) obtains its `k` hash functions.
///
/// # Examples
///
/// ```
/// # use saltbloom::hash::SaltedHash;
/// let h = SaltedHash::new(1024, 0).unwrap();
/// let idx = h.hash(b"hello");
/// assert!(idx < 1024);
/// assert_eq!(idx, h.hash(b"hello"));
/// ```
#[derive(Clone)]
pub struct SaltedHash {
    num_bits: u64,
    salt: String,
    /// SHA-1 state with the salt already absorbed.
    prefix: Sha1,
}

impl SaltedHash {
    /// Creates the hash function for range `[0, num_bits)` and the given salt.
    ///
    /// The salt is rendered with its `Display` implementation, so the salt `3_u32` and the salt
    /// `"3"` describe the same function.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter) if
    /// `num_bits` is zero.
    pub fn new(num_bits: u64, salt: impl fmt::Display) -> Result<Self, Error> {
        if num_bits == 0 {
            return Err(Error::invalid_parameter(
                "num_bits",
                num_bits,
                "must be greater than 0",
            ));
        }

        Ok(Self::from_parts(num_bits, salt))
    }

    /// Creates the hash function without checking `num_bits`, which must be non-zero.
    pub(crate) fn from_parts(num_bits: u64, salt: impl fmt::Display) -> Self {
        let salt = salt.to_string();
        let mut prefix = Sha1::new();
        prefix.update(salt.as_bytes());

        SaltedHash {
            num_bits,
            salt,
            prefix,
        }
    }

    /// Hashes `item` to an index in `[0, num_bits)`.
    pub fn hash(&self, item: &[u8]) -> u64 {
        let mut hasher = self.prefix.clone();
        hasher.update(item);
        fold_digest(&hasher.finalize(), self.num_bits)
    }

    /// Returns the size of the output range.
    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    /// Returns the textual salt mixed into every digest.
    pub fn salt(&self) -> &str {
        &self.salt
    }
}

impl fmt::Debug for SaltedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltedHash")
            .field("num_bits", &self.num_bits)
            .field("salt", &self.salt)
            .finish()
    }
}

impl PartialEq for SaltedHash {
    fn eq(&self, other: &Self) -> bool {
        self.num_bits == other.num_bits && self.salt == other.salt
    }
}

impl Eq for SaltedHash {}

/// Folds a digest into `[0, modulus)` using the base-8 positional sum.
///
/// 20 bytes scale up to 8^19 * 255 < 2^66, so `u128` never overflows.
fn fold_digest(digest: &[u8], modulus: u64) -> u64 {
    let modulus = u128::from(modulus);
    let mut value = 0u128;
    let mut scale = 1u128;
    for &byte in digest {
        value = (value + u128::from(byte) * scale) % modulus;
        scale *= 8;
    }
    value as u64
}
