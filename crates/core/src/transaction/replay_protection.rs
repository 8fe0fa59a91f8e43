// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

//! EIP-155 replay protection folds the chain id into the signature `v`.

use super::ChainId;

/// Merge chain_id and the standard (0 or 1) signature v. `None` when the
/// chain id is too large for the result to fit a `u64`.
pub fn encode_v(standard_v: u8, chain_id: Option<ChainId>) -> Option<u64> {
    let replay: u64 = match chain_id {
        Some(n) => n.checked_mul(2)?.checked_add(35)?,
        None => 27,
    };
    replay.checked_add(u64::from(standard_v))
}

/// Returns the standard v from a replay protected legacy v, `None` when the
/// value is neither pre-EIP-155 (27, 28) nor protected (35 and above).
pub fn decode_v(v: u64) -> Option<u8> {
    match v {
        27 => Some(0),
        28 => Some(1),
        v if v >= 35 => Some(((v - 35) % 2) as u8),
        _ => None,
    }
}

/// Returns chain id from a replay protected legacy v.
pub fn decode_chain_id(v: u64) -> Option<ChainId> {
    if v >= 35 {
        Some((v - 35) / 2)
    } else {
        None
    }
}
