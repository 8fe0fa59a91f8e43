// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use super::{replay_protection, ChainId};
use crate::U256;
use rlp::RlpOutput;

/// Components that constitute transaction signature
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SignatureComponents {
    /// The V field as it appears on the wire; for replay protected
    /// transactions it also carries the chain id.
    pub v: u64,
    /// The R field of the signature; helps describe the point on the curve.
    pub r: U256,
    /// The S field of the signature; helps describe the point on the curve.
    pub s: U256,
}

impl SignatureComponents {
    /// Returns `None` when `chain_id` cannot be folded into a 64-bit `v`.
    pub fn new(standard_v: u8, r: U256, s: U256, chain_id: Option<ChainId>) -> Option<Self> {
        Some(SignatureComponents {
            v: replay_protection::encode_v(standard_v, chain_id)?,
            r,
            s,
        })
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        replay_protection::decode_chain_id(self.v)
    }

    /// Which half of the curve the point falls in, if `v` is well formed.
    pub fn standard_v(&self) -> Option<u8> {
        replay_protection::decode_v(self.v)
    }

    pub(crate) fn rlp_append(&self, out: &mut RlpOutput) {
        out.write(&self.v).write(&self.r).write(&self.s);
    }
}
