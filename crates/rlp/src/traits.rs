// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    decoder::RlpInput,
    encoder::{encode, RlpOutput},
    error::{DecoderError, Result},
};
use bytes::Bytes;
use ethereum_types::{Bloom, H160, H256, H64, U256};
use std::mem;

/// Types that know how to append their own RLP encoding.
pub trait Encodable {
    fn rlp_append(&self, out: &mut RlpOutput);

    fn rlp_bytes(&self) -> Vec<u8> {
        encode(self)
    }
}

/// Types that can be read back from an RLP cursor.
pub trait Decodable: Sized {
    fn decode(input: &mut RlpInput<'_>) -> Result<Self>;
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn rlp_append(&self, out: &mut RlpOutput) {
        (**self).rlp_append(out)
    }
}

macro_rules! impl_uint {
    ($($t:ty),*) => {$(
        impl Encodable for $t {
            fn rlp_append(&self, out: &mut RlpOutput) {
                out.write_scalar(&self.to_be_bytes());
            }
        }

        impl Decodable for $t {
            fn decode(input: &mut RlpInput<'_>) -> Result<Self> {
                let bytes = input.read_uint_bytes(mem::size_of::<$t>())?;
                let value = bytes.iter().fold(0u128, |acc, b| (acc << 8) | u128::from(*b));
                Ok(value as $t)
            }
        }
    )*};
}

impl_uint!(u8, u16, u32, u64, usize);

impl Encodable for bool {
    fn rlp_append(&self, out: &mut RlpOutput) {
        if *self {
            out.write_bytes(&[1]);
        } else {
            out.write_empty();
        }
    }
}

impl Decodable for bool {
    fn decode(input: &mut RlpInput<'_>) -> Result<Self> {
        let offset = input.position();
        match input.read_scalar_bytes()? {
            [] => Ok(false),
            [1] => Ok(true),
            other => Err(DecoderError::Custom(format!(
                "invalid boolean {:?} at offset {}",
                other, offset
            ))),
        }
    }
}

impl Encodable for str {
    fn rlp_append(&self, out: &mut RlpOutput) {
        out.write_bytes(self.as_bytes());
    }
}

impl Encodable for String {
    fn rlp_append(&self, out: &mut RlpOutput) {
        out.write_bytes(self.as_bytes());
    }
}

impl Decodable for String {
    fn decode(input: &mut RlpInput<'_>) -> Result<Self> {
        let offset = input.position();
        let bytes = input.read_bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            DecoderError::Custom(format!("invalid utf-8 string at offset {}: {}", offset, e))
        })
    }
}

impl Encodable for Bytes {
    fn rlp_append(&self, out: &mut RlpOutput) {
        out.write_bytes(self);
    }
}

impl Decodable for Bytes {
    fn decode(input: &mut RlpInput<'_>) -> Result<Self> {
        Ok(Bytes::copy_from_slice(input.read_bytes()?))
    }
}

impl Encodable for U256 {
    fn rlp_append(&self, out: &mut RlpOutput) {
        let mut buf = [0u8; 32];
        self.to_big_endian(&mut buf);
        out.write_scalar(&buf);
    }
}

impl Decodable for U256 {
    fn decode(input: &mut RlpInput<'_>) -> Result<Self> {
        Ok(U256::from_big_endian(input.read_uint_bytes(32)?))
    }
}

macro_rules! impl_fixed_hash {
    ($($t:ident: $n:expr),*) => {$(
        impl Encodable for $t {
            fn rlp_append(&self, out: &mut RlpOutput) {
                out.write_bytes(self.as_bytes());
            }
        }

        impl Decodable for $t {
            fn decode(input: &mut RlpInput<'_>) -> Result<Self> {
                input.read_fixed::<{ $n }>().map($t::from)
            }
        }
    )*};
}

impl_fixed_hash!(H64: 8, H160: 20, H256: 32, Bloom: 256);

/// Vectors are lists of their elements.
impl<T: Encodable> Encodable for Vec<T> {
    fn rlp_append(&self, out: &mut RlpOutput) {
        out.write_list(self);
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn decode(input: &mut RlpInput<'_>) -> Result<Self> {
        input.read_list_of()
    }
}
