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

//! Little-endian byte buffers used by the filter's binary encoding.

use std::io;
use std::io::Cursor;
use std::io::Read;

use byteorder::ByteOrder;
use byteorder::LittleEndian;
use byteorder::ReadBytesExt;

/// A growable byte buffer with little-endian primitive writers.
pub(crate) struct SketchBytes {
    bytes: Vec<u8>,
}

impl SketchBytes {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn write(&mut self, buf: &[u8]) {
        self.bytes.extend_from_slice(buf);
    }

    pub fn write_u8(&mut self, n: u8) {
        self.bytes.push(n);
    }

    pub fn write_u32_le(&mut self, n: u32) {
        self.write(&n.to_le_bytes());
    }

    pub fn write_u64_le(&mut self, n: u64) {
        self.write(&n.to_le_bytes());
    }

    /// Writes a run of 32-bit words in little-endian byte order.
    pub fn write_u32_slice_le(&mut self, words: &[u32]) {
        let start = self.bytes.len();
        self.bytes.resize(start + words.len() * 4, 0);
        LittleEndian::write_u32_into(words, &mut self.bytes[start..]);
    }
}

/// A read cursor over a byte slice with little-endian primitive readers.
pub(crate) struct SketchSlice<'a> {
    slice: Cursor<&'a [u8]>,
}

impl SketchSlice<'_> {
    pub fn new(slice: &[u8]) -> SketchSlice<'_> {
        SketchSlice {
            slice: Cursor::new(slice),
        }
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.slice.read_exact(buf)
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.slice.read_u8()
    }

    pub fn read_u32_le(&mut self) -> io::Result<u32> {
        self.slice.read_u32::<LittleEndian>()
    }

    pub fn read_u64_le(&mut self) -> io::Result<u64> {
        self.slice.read_u64::<LittleEndian>()
    }

    /// Fills `dst` with 32-bit little-endian words.
    pub fn read_u32_slice_le(&mut self, dst: &mut [u32]) -> io::Result<()> {
        self.slice.read_u32_into::<LittleEndian>(dst)
    }

    /// Returns the number of unread bytes.
    pub fn remaining(&self) -> usize {
        let len = self.slice.get_ref().len();
        len.saturating_sub(self.slice.position() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_little_endian() {
        let mut bytes = SketchBytes::with_capacity(9);
        bytes.write_u8(7);
        bytes.write_u32_slice_le(&[0x0403_0201, 0x0807_0605]);
        let bytes = bytes.into_bytes();
        assert_eq!(bytes, vec![7, 1, 2, 3, 4, 5, 6, 7, 8]);

        let mut slice = SketchSlice::new(&bytes);
        assert_eq!(slice.read_u8().unwrap(), 7);
        assert_eq!(slice.remaining(), 8);
        let mut words = [0u32; 2];
        slice.read_u32_slice_le(&mut words).unwrap();
        assert_eq!(words, [0x0403_0201, 0x0807_0605]);
        assert_eq!(slice.remaining(), 0);
    }

    #[test]
    fn test_short_read_fails() {
        let mut slice = SketchSlice::new(&[1, 2, 3]);
        let err = slice.read_u32_le().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
