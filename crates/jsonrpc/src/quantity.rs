// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

//! Hex text forms of the query API.
//!
//! Quantities are minimal length hex strings with no zero padding, except
//! that zero is `0x0`. Fixed width fields (a header nonce) are padded to
//! their byte width, and data (hashes, addresses, byte strings) is written
//! two digits per byte.

use crate::error::QuantityError;
use ethereum_types::U256;
use num::BigUint;
use rustc_hex::{FromHex, FromHexError, ToHex};

const HEX_PREFIX: &str = "0x";
const HEX_ZERO: &str = "0x0";

/// Values that have a quantity representation.
pub trait ToQuantity {
    fn to_quantity(&self) -> String;
}

macro_rules! impl_to_quantity {
    ($($t:ty),*) => {
        $(
            impl ToQuantity for $t {
                fn to_quantity(&self) -> String {
                    format!("{}{:x}", HEX_PREFIX, self)
                }
            }
        )*
    };
}

impl_to_quantity!(u8, u16, u32, u64, u128, usize, U256, BigUint);

impl<T: ToQuantity + ?Sized> ToQuantity for &T {
    fn to_quantity(&self) -> String {
        (**self).to_quantity()
    }
}

pub fn format<T: ToQuantity + ?Sized>(value: &T) -> String {
    value.to_quantity()
}

pub fn create<T: Into<U256>>(value: T) -> String {
    format(&value.into())
}

/// An absent value stays absent.
pub fn create_opt<T: ToQuantity>(value: Option<T>) -> Option<String> {
    value.as_ref().map(format)
}

/// Minimal form of a big-endian unsigned integer of any width.
pub fn from_be_bytes(bytes: &[u8]) -> String {
    let significant = match bytes.iter().position(|b| *b != 0) {
        Some(first) => &bytes[first..],
        None => return HEX_ZERO.to_owned(),
    };
    let digits: String = significant.to_hex();
    format!("{}{}", HEX_PREFIX, digits.trim_start_matches('0'))
}

/// `value` zero padded to exactly `byte_length * 2` digits. A value wider
/// than `byte_length` is written in full rather than truncated. Zero has no
/// significant digits, so `long_to_padded_hex(0, 0)` is the bare `0x`.
pub fn long_to_padded_hex(value: u64, byte_length: usize) -> String {
    let digits = match value {
        0 => String::new(),
        _ => format!("{:x}", value),
    };
    format!(
        "{}{:0>width$}",
        HEX_PREFIX,
        digits,
        width = byte_length * 2
    )
}

/// Fixed width data, two digits per byte.
pub fn data_to_hex(bytes: &[u8]) -> String {
    let digits: String = bytes.to_hex();
    format!("{}{}", HEX_PREFIX, digits)
}

/// Strict inverse of [`format`] for values up to 256 bits.
pub fn parse(text: &str) -> Result<U256, QuantityError> {
    let digits = strip_prefix(text)?;
    if digits.is_empty() {
        return Err(QuantityError::Empty);
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(QuantityError::LeadingZero(text.to_owned()));
    }
    if digits.len() > 64 {
        return Err(QuantityError::TooLong(digits.len()));
    }
    if let Some((index, character)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(QuantityError::InvalidCharacter {
            character,
            index: index + HEX_PREFIX.len(),
        });
    }
    U256::from_str_radix(digits, 16).map_err(|_| QuantityError::InvalidNumber(text.to_owned()))
}

/// Parses `0x` prefixed data with an even number of digits.
pub fn parse_data(text: &str) -> Result<Vec<u8>, QuantityError> {
    let digits = strip_prefix(text)?;
    digits.from_hex().map_err(|e| match e {
        FromHexError::InvalidHexCharacter(character, index) => QuantityError::InvalidCharacter {
            character,
            index: index + HEX_PREFIX.len(),
        },
        FromHexError::InvalidHexLength => QuantityError::OddLength(text.to_owned()),
    })
}

/// Like [`parse_data`], but the value must be exactly `N` bytes.
pub fn parse_fixed<const N: usize>(text: &str) -> Result<[u8; N], QuantityError> {
    let bytes = parse_data(text)?;
    if bytes.len() != N {
        return Err(QuantityError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

fn strip_prefix(text: &str) -> Result<&str, QuantityError> {
    text.strip_prefix(HEX_PREFIX)
        .ok_or_else(|| QuantityError::MissingPrefix(text.to_owned()))
}
