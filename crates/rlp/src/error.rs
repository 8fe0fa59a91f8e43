// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use thiserror::Error;

/// The two shapes an RLP item can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Scalar,
    List,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Scalar => f.write_str("byte string"),
            ItemKind::List => f.write_str("list"),
        }
    }
}

/// Errors raised while decoding RLP input.
///
/// Every variant that can be attributed to a location carries the byte
/// offset (from the start of the decoded buffer) of the item prefix that
/// triggered it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecoderError {
    /// Length-of-length bytes start with zero, or the declared length does
    /// not fit into the address space.
    #[error("malformed prefix at offset {offset}: {reason}")]
    MalformedPrefix { offset: usize, reason: &'static str },

    /// A top level item whose declared length runs past the end of the input.
    #[error("truncated input at offset {offset}: item needs {expected} bytes, only {actual} remain")]
    TruncatedInput {
        offset: usize,
        expected: usize,
        actual: usize,
    },

    /// A list's declared byte budget was not consumed exactly by its children
    /// (including a child that claims more than the list has left), or bytes
    /// remain after the top level item.
    #[error("trailing data in list at offset {offset}: declared {expected} bytes, consumed {actual}")]
    TrailingData {
        offset: usize,
        expected: usize,
        actual: usize,
    },

    /// The item has a valid but longer than minimal encoding.
    #[error("non-canonical encoding at offset {offset}: {reason}")]
    NonCanonicalEncoding { offset: usize, reason: &'static str },

    #[error("expected a {expected} at offset {offset}")]
    UnexpectedItemKind { offset: usize, expected: ItemKind },

    #[error("integer at offset {offset} is {actual} bytes wide, at most {max} fit")]
    IntegerOverflow {
        offset: usize,
        max: usize,
        actual: usize,
    },

    /// Fixed width value (hash, address, nonce) with the wrong payload size.
    #[error("fixed-width value at offset {offset} must be {expected} bytes, found {actual}")]
    InvalidLength {
        offset: usize,
        expected: usize,
        actual: usize,
    },

    #[error("list nesting at offset {offset} exceeds the maximum depth of {max}")]
    DepthLimitExceeded { offset: usize, max: usize },

    #[error("leave_list called with no open list")]
    NoOpenList,

    /// Raised by item decoders for domain specific violations.
    #[error("{0}")]
    Custom(String),
}

impl DecoderError {
    /// Byte offset the error refers to, if any.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            DecoderError::MalformedPrefix { offset, .. }
            | DecoderError::TruncatedInput { offset, .. }
            | DecoderError::TrailingData { offset, .. }
            | DecoderError::NonCanonicalEncoding { offset, .. }
            | DecoderError::UnexpectedItemKind { offset, .. }
            | DecoderError::IntegerOverflow { offset, .. }
            | DecoderError::InvalidLength { offset, .. }
            | DecoderError::DepthLimitExceeded { offset, .. } => Some(offset),
            DecoderError::NoOpenList | DecoderError::Custom(_) => None,
        }
    }
}

/// Result of decoding operations
pub type Result<T> = std::result::Result<T, DecoderError>;
