// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

//! Canonical recursive length prefix (RLP) encoding.
//!
//! Every value has exactly one accepted encoding: the decoder rejects
//! longer than minimal prefixes, prefixed single bytes below `0x80`,
//! integers with leading zeros and lists whose declared length is not
//! consumed exactly.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod traits;

pub use config::{DecoderConfig, DEFAULT_MAX_DEPTH};
pub use decoder::{decode, decode_list, decode_with_config, RlpInput};
pub use encoder::{encode, encode_list, encode_with, RlpOutput};
pub use error::{DecoderError, ItemKind, Result};
pub use traits::{Decodable, Encodable};
