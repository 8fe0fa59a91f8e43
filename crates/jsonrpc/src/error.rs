// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

/// Rejections of hex strings received from API clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Hex value '{0}' does not start with 0x.")]
    MissingPrefix(String),
    #[error("Hex value has no digits after 0x.")]
    Empty,
    #[error("Quantity '{0}' has leading zero digits.")]
    LeadingZero(String),
    #[error("Quantity has {0} hex digits, at most 64 fit in 256 bits.")]
    TooLong(usize),
    #[error("Invalid hex character '{character}' at index {index}.")]
    InvalidCharacter { character: char, index: usize },
    #[error("Data '{0}' must hold an even number of hex digits.")]
    OddLength(String),
    #[error("Data is {actual} bytes long, expected {expected}.")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Invalid number '{0}'.")]
    InvalidNumber(String),
}
