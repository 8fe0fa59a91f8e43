// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use crate::traits::Encodable;

/// Single byte values below this are their own encoding.
pub(crate) const SINGLE_BYTE_LIMIT: u8 = 0x80;
pub(crate) const SHORT_STRING_OFFSET: u8 = 0x80;
pub(crate) const LONG_STRING_OFFSET: u8 = 0xb7;
pub(crate) const SHORT_LIST_OFFSET: u8 = 0xc0;
pub(crate) const LONG_LIST_OFFSET: u8 = 0xf7;
/// Longest payload that still fits the one byte prefix form.
pub(crate) const MAX_SHORT_LENGTH: usize = 55;

/// Growable RLP output buffer.
///
/// List lengths are only known once every child has been written, so
/// `start_list` records where the list payload begins and `end_list` splices
/// the computed prefix in front of the buffered children.
#[derive(Debug, Default, Clone)]
pub struct RlpOutput {
    buffer: Vec<u8>,
    open_lists: Vec<usize>,
}

impl RlpOutput {
    pub fn new() -> Self {
        RlpOutput {
            buffer: Vec::new(),
            open_lists: Vec::new(),
        }
    }

    /// Appends `payload` as a byte string.
    pub fn write_bytes(&mut self, payload: &[u8]) -> &mut Self {
        if payload.len() == 1 && payload[0] < SINGLE_BYTE_LIMIT {
            self.buffer.push(payload[0]);
        } else {
            let prefix = length_prefix(payload.len(), SHORT_STRING_OFFSET, LONG_STRING_OFFSET);
            self.buffer.extend_from_slice(&prefix);
            self.buffer.extend_from_slice(payload);
        }
        self
    }

    /// Appends an unsigned big-endian integer. Leading zero bytes are
    /// dropped, so zero becomes the empty string.
    pub fn write_scalar(&mut self, big_endian: &[u8]) -> &mut Self {
        let first = big_endian
            .iter()
            .position(|b| *b != 0)
            .unwrap_or(big_endian.len());
        self.write_bytes(&big_endian[first..])
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.write_scalar(&value.to_be_bytes())
    }

    /// Appends the empty byte string (`0x80`).
    pub fn write_empty(&mut self) -> &mut Self {
        self.buffer.push(SHORT_STRING_OFFSET);
        self
    }

    /// Appends an already encoded item verbatim.
    pub fn write_raw(&mut self, encoded: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(encoded);
        self
    }

    pub fn write<T: Encodable + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.rlp_append(self);
        self
    }

    pub fn start_list(&mut self) -> &mut Self {
        self.open_lists.push(self.buffer.len());
        self
    }

    /// Closes the innermost open list.
    ///
    /// # Panics
    ///
    /// Panics if there is no open list.
    pub fn end_list(&mut self) -> &mut Self {
        let start = match self.open_lists.pop() {
            Some(start) => start,
            None => panic!("end_list called without a matching start_list"),
        };
        let payload_len = self.buffer.len() - start;
        let prefix = length_prefix(payload_len, SHORT_LIST_OFFSET, LONG_LIST_OFFSET);
        let children = self.buffer.split_off(start);
        self.buffer.extend_from_slice(&prefix);
        self.buffer.extend_from_slice(&children);
        self
    }

    pub fn write_list<T: Encodable>(&mut self, items: &[T]) -> &mut Self {
        self.write_list_with(items, |item, out| item.rlp_append(out))
    }

    /// Writes `items` as a list using `writer` for every element.
    pub fn write_list_with<T, F>(&mut self, items: &[T], mut writer: F) -> &mut Self
    where
        F: FnMut(&T, &mut RlpOutput),
    {
        self.start_list();
        for item in items {
            writer(item, self);
        }
        self.end_list()
    }

    pub fn open_lists(&self) -> usize {
        self.open_lists.len()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the encoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if a list is still open.
    pub fn finalize(self) -> Vec<u8> {
        assert!(
            self.open_lists.is_empty(),
            "finalize called with {} unclosed list(s)",
            self.open_lists.len()
        );
        self.buffer
    }
}

/// Minimal big-endian representation of `len`.
pub(crate) fn minimal_be(len: usize) -> Vec<u8> {
    let bytes = len.to_be_bytes();
    let first = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len());
    bytes[first..].to_vec()
}

fn length_prefix(len: usize, short_offset: u8, long_offset: u8) -> Vec<u8> {
    if len <= MAX_SHORT_LENGTH {
        vec![short_offset + len as u8]
    } else {
        let len_bytes = minimal_be(len);
        let mut prefix = Vec::with_capacity(1 + len_bytes.len());
        prefix.push(long_offset + len_bytes.len() as u8);
        prefix.extend_from_slice(&len_bytes);
        prefix
    }
}

/// Encodes a single item.
pub fn encode<T: Encodable + ?Sized>(value: &T) -> Vec<u8> {
    let mut out = RlpOutput::new();
    value.rlp_append(&mut out);
    out.finalize()
}

pub fn encode_list<T: Encodable>(items: &[T]) -> Vec<u8> {
    let mut out = RlpOutput::new();
    out.write_list(items);
    out.finalize()
}

/// Runs `writer` against a fresh output and returns what it wrote.
pub fn encode_with<F>(writer: F) -> Vec<u8>
where
    F: FnOnce(&mut RlpOutput),
{
    let mut out = RlpOutput::new();
    writer(&mut out);
    out.finalize()
}
