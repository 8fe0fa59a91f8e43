// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use crate::{header::HeaderFields, Hash};
use bytes::Bytes;
use log::warn;
use serde::Deserialize;
use std::{fmt, str::FromStr, sync::Arc};

/// Size of the signer seal clique appends to the header extra data.
pub const CLIQUE_SEAL_LENGTH: usize = 65;

pub fn keccak256(bytes: &[u8]) -> Hash {
    Hash::from(keccak_hash::keccak(bytes).to_fixed_bytes())
}

/// Maps the canonical encoding of a header to the digest that identifies it.
///
/// Chains disagree on what a header hash covers, so the function is chosen
/// by configuration and handed to every header decode.
pub trait BlockHashFunction: Send + Sync {
    fn hash(&self, header_rlp: &[u8]) -> Hash;
}

impl<F> BlockHashFunction for F
where
    F: Fn(&[u8]) -> Hash + Send + Sync,
{
    fn hash(&self, header_rlp: &[u8]) -> Hash {
        self(header_rlp)
    }
}

/// Mainnet rule: keccak256 over the full header encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256HeaderHash;

impl BlockHashFunction for Keccak256HeaderHash {
    fn hash(&self, header_rlp: &[u8]) -> Hash {
        keccak256(header_rlp)
    }
}

/// Clique proof of authority: the header is hashed without the signer seal
/// at the end of its extra data, so the signature does not cover itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliqueSealHash;

impl BlockHashFunction for CliqueSealHash {
    fn hash(&self, header_rlp: &[u8]) -> Hash {
        let mut fields: HeaderFields = match rlp::decode(header_rlp) {
            Ok(fields) => fields,
            Err(e) => {
                warn!("clique hash over undecodable header, hashing raw bytes: {}", e);
                return keccak256(header_rlp);
            }
        };
        let extra_len = fields.extra_data.len();
        if extra_len < CLIQUE_SEAL_LENGTH {
            warn!(
                "header #{} carries {} bytes of extra data, too short for a clique seal",
                fields.number, extra_len
            );
            return keccak256(header_rlp);
        }
        fields.extra_data = Bytes::copy_from_slice(&fields.extra_data[..extra_len - CLIQUE_SEAL_LENGTH]);
        keccak256(&rlp::encode(&fields))
    }
}

/// Configurable selection of a header hash function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashFunctionKind {
    Keccak256,
    Clique,
}

impl Default for HashFunctionKind {
    fn default() -> Self {
        HashFunctionKind::Keccak256
    }
}

impl HashFunctionKind {
    pub fn hash_function(&self) -> Arc<dyn BlockHashFunction> {
        match self {
            HashFunctionKind::Keccak256 => Arc::new(Keccak256HeaderHash),
            HashFunctionKind::Clique => Arc::new(CliqueSealHash),
        }
    }
}

impl FromStr for HashFunctionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keccak256" => Ok(HashFunctionKind::Keccak256),
            "clique" => Ok(HashFunctionKind::Clique),
            other => Err(format!(
                "unknown header hash function '{}', expected keccak256 or clique",
                other
            )),
        }
    }
}

impl fmt::Display for HashFunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashFunctionKind::Keccak256 => f.write_str("keccak256"),
            HashFunctionKind::Clique => f.write_str("clique"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use hex_literal::hex;

    #[test]
    fn keccak_of_empty_list() {
        // the ommers hash of every block without ommers
        assert_eq!(
            keccak256(&hex!("c0")),
            Hash::from(hex!(
                "1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347"
            ))
        );
    }

    #[test]
    fn closures_are_hash_functions() {
        let constant = |_: &[u8]| Hash::repeat_byte(7);
        let hash_function: &dyn BlockHashFunction = &constant;
        assert_eq!(hash_function.hash(b"anything"), Hash::repeat_byte(7));
    }

    #[test]
    fn clique_ignores_the_seal() {
        let mut fields = test_utils::genesis_fields();
        let mut extra = vec![0u8; 32];
        extra.extend_from_slice(&[0xaa; CLIQUE_SEAL_LENGTH]);
        fields.extra_data = Bytes::from(extra.clone());
        let sealed_a = rlp::encode(&fields);

        extra[40] = 0xbb;
        fields.extra_data = Bytes::from(extra);
        let sealed_b = rlp::encode(&fields);

        assert_ne!(keccak256(&sealed_a), keccak256(&sealed_b));
        assert_eq!(CliqueSealHash.hash(&sealed_a), CliqueSealHash.hash(&sealed_b));

        fields.extra_data = Bytes::from(vec![0u8; 32]);
        assert_eq!(
            CliqueSealHash.hash(&sealed_a),
            keccak256(&rlp::encode(&fields))
        );
    }

    #[test]
    fn clique_falls_back_for_short_extra_data() {
        let encoded = rlp::encode(&test_utils::genesis_fields());
        assert_eq!(CliqueSealHash.hash(&encoded), keccak256(&encoded));
    }

    #[test]
    fn kind_from_config() {
        #[derive(Deserialize)]
        struct Chain {
            header_hash: HashFunctionKind,
        }
        let chain: Chain = toml::from_str("header_hash = \"clique\"").unwrap();
        assert_eq!(chain.header_hash, HashFunctionKind::Clique);
        assert_eq!("keccak256".parse(), Ok(HashFunctionKind::Keccak256));
        assert!("sha256".parse::<HashFunctionKind>().is_err());
        assert_eq!(HashFunctionKind::Clique.to_string(), "clique");
    }
}
