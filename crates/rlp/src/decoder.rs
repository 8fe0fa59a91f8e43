// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    config::DecoderConfig,
    encoder::{
        LONG_LIST_OFFSET, LONG_STRING_OFFSET, MAX_SHORT_LENGTH, SHORT_LIST_OFFSET,
        SHORT_STRING_OFFSET, SINGLE_BYTE_LIMIT,
    },
    error::{DecoderError, ItemKind, Result},
    traits::Decodable,
};
use std::mem;

/// Location and shape of the next item, as read from its prefix.
#[derive(Debug, Clone, Copy)]
struct ItemHeader {
    kind: ItemKind,
    offset: usize,
    header_len: usize,
    payload_len: usize,
}

impl ItemHeader {
    fn payload_start(&self) -> usize {
        self.offset + self.header_len
    }

    fn end(&self) -> usize {
        self.payload_start() + self.payload_len
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenList {
    offset: usize,
    payload_start: usize,
    end: usize,
}

/// Cursor based RLP reader over a borrowed buffer.
///
/// Every open list is tracked by the offset its payload ends at; no item may
/// read past the end of the innermost open list and `leave_list` insists
/// that the list was consumed exactly.
#[derive(Debug, Clone)]
pub struct RlpInput<'a> {
    data: &'a [u8],
    position: usize,
    lists: Vec<OpenList>,
    config: DecoderConfig,
}

impl<'a> RlpInput<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, DecoderConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: DecoderConfig) -> Self {
        RlpInput {
            data,
            position: 0,
            lists: Vec::new(),
            config,
        }
    }

    /// Offset of the cursor from the start of the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of lists entered and not yet left.
    pub fn depth(&self) -> usize {
        self.lists.len()
    }

    /// True once the whole buffer was consumed and every list was left.
    pub fn is_done(&self) -> bool {
        self.lists.is_empty() && self.position == self.data.len()
    }

    /// True if the cursor sits at the end of the innermost open list, or at
    /// the end of the buffer when no list is open.
    pub fn is_end_of_current_list(&self) -> bool {
        self.position >= self.limit()
    }

    pub fn next_is_list(&self) -> Result<bool> {
        Ok(self.peek_header()?.kind == ItemKind::List)
    }

    /// Reads a byte string and returns its payload.
    pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let header = self.peek_header()?;
        if header.kind != ItemKind::Scalar {
            return Err(DecoderError::UnexpectedItemKind {
                offset: header.offset,
                expected: ItemKind::Scalar,
            });
        }
        self.position = header.end();
        Ok(&self.data[header.payload_start()..header.end()])
    }

    /// Reads a byte string holding an unsigned big-endian integer. Zero is
    /// the empty string, so a leading zero byte is never canonical.
    pub fn read_scalar_bytes(&mut self) -> Result<&'a [u8]> {
        let offset = self.position;
        let bytes = self.read_bytes()?;
        if bytes.first() == Some(&0) {
            return Err(DecoderError::NonCanonicalEncoding {
                offset,
                reason: "integer has leading zero bytes",
            });
        }
        Ok(bytes)
    }

    /// Reads an integer that must fit into `max_width` bytes.
    pub fn read_uint_bytes(&mut self, max_width: usize) -> Result<&'a [u8]> {
        let offset = self.position;
        let bytes = self.read_scalar_bytes()?;
        if bytes.len() > max_width {
            return Err(DecoderError::IntegerOverflow {
                offset,
                max: max_width,
                actual: bytes.len(),
            });
        }
        Ok(bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_uint_bytes(mem::size_of::<u64>())?;
        Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
    }

    /// Reads a byte string of exactly `N` bytes.
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        let offset = self.position;
        let bytes = self.read_bytes()?;
        if bytes.len() != N {
            return Err(DecoderError::InvalidLength {
                offset,
                expected: N,
                actual: bytes.len(),
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read<T: Decodable>(&mut self) -> Result<T> {
        T::decode(self)
    }

    /// Enters the list at the cursor and returns its declared payload length.
    pub fn enter_list(&mut self) -> Result<usize> {
        if self.lists.len() >= self.config.max_depth {
            return Err(DecoderError::DepthLimitExceeded {
                offset: self.position,
                max: self.config.max_depth,
            });
        }
        let header = self.peek_header()?;
        if header.kind != ItemKind::List {
            return Err(DecoderError::UnexpectedItemKind {
                offset: header.offset,
                expected: ItemKind::List,
            });
        }
        self.position = header.payload_start();
        self.lists.push(OpenList {
            offset: header.offset,
            payload_start: header.payload_start(),
            end: header.end(),
        });
        Ok(header.payload_len)
    }

    /// Leaves the innermost list. Fails unless its payload was consumed
    /// exactly.
    pub fn leave_list(&mut self) -> Result<()> {
        let list = self.lists.pop().ok_or(DecoderError::NoOpenList)?;
        if self.position != list.end {
            return Err(DecoderError::TrailingData {
                offset: list.offset,
                expected: list.end - list.payload_start,
                actual: self.position - list.payload_start,
            });
        }
        Ok(())
    }

    /// Decodes a list by calling `item` until the list's declared byte
    /// budget is used up.
    pub fn read_list<T, F>(&mut self, mut item: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut RlpInput<'a>) -> Result<T>,
    {
        self.enter_list()?;
        let mut items = Vec::new();
        while !self.is_end_of_current_list() {
            items.push(item(self)?);
        }
        self.leave_list()?;
        Ok(items)
    }

    pub fn read_list_of<T: Decodable>(&mut self) -> Result<Vec<T>> {
        self.read_list(|input| T::decode(input))
    }

    /// Complete encoding (prefix and payload) of the next item. The cursor
    /// does not move.
    pub fn current_item_raw(&self) -> Result<&'a [u8]> {
        let header = self.peek_header()?;
        Ok(&self.data[header.offset..header.end()])
    }

    /// Consumes the next item and returns its complete encoding.
    pub fn read_raw(&mut self) -> Result<&'a [u8]> {
        let raw = self.current_item_raw()?;
        self.position += raw.len();
        Ok(raw)
    }

    pub fn skip_next(&mut self) -> Result<()> {
        self.read_raw().map(|_| ())
    }

    /// Verifies that the whole buffer was consumed and every list left.
    pub fn finish(&self) -> Result<()> {
        if let Some(list) = self.lists.last() {
            return Err(DecoderError::TrailingData {
                offset: list.offset,
                expected: list.end - list.payload_start,
                actual: self.position - list.payload_start,
            });
        }
        if self.position != self.data.len() {
            return Err(DecoderError::TrailingData {
                offset: self.position,
                expected: self.position,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    fn limit(&self) -> usize {
        self.lists
            .last()
            .map(|list| list.end)
            .unwrap_or(self.data.len())
    }

    /// Fails if `[offset, end)` runs past the innermost open list or, at the
    /// top level, past the buffer. Open lists never extend past the buffer,
    /// so inside a list an overrun is always reported against the list.
    fn check_bounds(&self, offset: usize, end: usize) -> Result<()> {
        if let Some(list) = self.lists.last() {
            if end > list.end {
                return Err(DecoderError::TrailingData {
                    offset: list.offset,
                    expected: list.end - list.payload_start,
                    actual: end - list.payload_start,
                });
            }
        }
        if end > self.data.len() {
            return Err(DecoderError::TruncatedInput {
                offset,
                expected: end - offset,
                actual: self.data.len().saturating_sub(offset),
            });
        }
        Ok(())
    }

    fn peek_header(&self) -> Result<ItemHeader> {
        let offset = self.position;
        self.check_bounds(offset, offset + 1)?;
        let prefix = self.data[offset];

        let (kind, header_len, payload_len) = match prefix {
            b if b < SINGLE_BYTE_LIMIT => (ItemKind::Scalar, 0, 1),
            b if b <= LONG_STRING_OFFSET => {
                (ItemKind::Scalar, 1, usize::from(b - SHORT_STRING_OFFSET))
            }
            b if b < SHORT_LIST_OFFSET => {
                let len_of_len = usize::from(b - LONG_STRING_OFFSET);
                let len = self.read_long_length(offset, len_of_len)?;
                (ItemKind::Scalar, 1 + len_of_len, len)
            }
            b if b <= LONG_LIST_OFFSET => (ItemKind::List, 1, usize::from(b - SHORT_LIST_OFFSET)),
            b => {
                let len_of_len = usize::from(b - LONG_LIST_OFFSET);
                let len = self.read_long_length(offset, len_of_len)?;
                (ItemKind::List, 1 + len_of_len, len)
            }
        };

        let end = (offset + header_len)
            .checked_add(payload_len)
            .ok_or(DecoderError::MalformedPrefix {
                offset,
                reason: "declared length overflows",
            })?;
        self.check_bounds(offset, end)?;

        if kind == ItemKind::Scalar
            && header_len == 1
            && payload_len == 1
            && self.data[offset + 1] < SINGLE_BYTE_LIMIT
        {
            return Err(DecoderError::NonCanonicalEncoding {
                offset,
                reason: "single byte below 0x80 must be encoded as itself",
            });
        }

        Ok(ItemHeader {
            kind,
            offset,
            header_len,
            payload_len,
        })
    }

    /// Reads the big-endian length that follows a long form prefix.
    fn read_long_length(&self, offset: usize, len_of_len: usize) -> Result<usize> {
        let start = offset + 1;
        self.check_bounds(offset, start + len_of_len)?;
        let len_bytes = &self.data[start..start + len_of_len];
        if len_bytes[0] == 0 {
            return Err(DecoderError::MalformedPrefix {
                offset,
                reason: "length of length has a leading zero byte",
            });
        }
        if len_of_len > mem::size_of::<usize>() {
            return Err(DecoderError::MalformedPrefix {
                offset,
                reason: "declared length overflows",
            });
        }
        let len = len_bytes
            .iter()
            .fold(0usize, |acc, b| (acc << 8) | usize::from(*b));
        if len <= MAX_SHORT_LENGTH {
            return Err(DecoderError::NonCanonicalEncoding {
                offset,
                reason: "long form prefix used for a short payload",
            });
        }
        Ok(len)
    }
}

/// Decodes one item from `bytes`, which must hold nothing else.
pub fn decode<T: Decodable>(bytes: &[u8]) -> Result<T> {
    decode_with_config(bytes, DecoderConfig::default())
}

pub fn decode_with_config<T: Decodable>(bytes: &[u8], config: DecoderConfig) -> Result<T> {
    let mut input = RlpInput::with_config(bytes, config);
    let value = T::decode(&mut input)?;
    input.finish()?;
    Ok(value)
}

pub fn decode_list<T: Decodable>(bytes: &[u8]) -> Result<Vec<T>> {
    let mut input = RlpInput::new(bytes);
    let items = input.read_list_of()?;
    input.finish()?;
    Ok(items)
}
