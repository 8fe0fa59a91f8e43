// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use crate::quantity;
use ledger_core::{keccak256, Block};
use rlp::Encodable;
use serde::Serialize;

/// A block as returned by `eth_getBlockByHash` and `eth_getBlockByNumber`
/// with transaction hashes only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockResult {
    pub number: String,
    pub hash: String,
    pub parent_hash: String,
    pub nonce: String,
    pub sha3_uncles: String,
    pub logs_bloom: String,
    pub transactions_root: String,
    pub state_root: String,
    pub receipts_root: String,
    pub miner: String,
    pub mix_hash: String,
    pub difficulty: String,
    pub extra_data: String,
    pub size: String,
    pub gas_limit: String,
    pub gas_used: String,
    pub timestamp: String,
    pub transactions: Vec<String>,
    pub uncles: Vec<String>,
}

impl<T: Encodable> From<&Block<T>> for BlockResult {
    fn from(block: &Block<T>) -> Self {
        let header = block.header();
        BlockResult {
            number: quantity::format(&header.number()),
            hash: quantity::data_to_hex(block.hash().as_bytes()),
            parent_hash: quantity::data_to_hex(header.parent_hash().as_bytes()),
            nonce: quantity::long_to_padded_hex(header.nonce(), 8),
            sha3_uncles: quantity::data_to_hex(header.ommers_hash().as_bytes()),
            logs_bloom: quantity::data_to_hex(header.logs_bloom().as_bytes()),
            transactions_root: quantity::data_to_hex(header.transactions_root().as_bytes()),
            state_root: quantity::data_to_hex(header.state_root().as_bytes()),
            receipts_root: quantity::data_to_hex(header.receipts_root().as_bytes()),
            miner: quantity::data_to_hex(header.beneficiary().as_bytes()),
            mix_hash: quantity::data_to_hex(header.mix_hash().as_bytes()),
            difficulty: quantity::format(header.difficulty()),
            extra_data: quantity::data_to_hex(header.extra_data()),
            size: quantity::format(&block.calculate_size()),
            gas_limit: quantity::format(&header.gas_limit()),
            gas_used: quantity::format(&header.gas_used()),
            timestamp: quantity::format(&header.timestamp()),
            transactions: block
                .transactions()
                .iter()
                .map(|tx| quantity::data_to_hex(keccak256(&rlp::encode(tx)).as_bytes()))
                .collect(),
            uncles: block
                .ommers()
                .iter()
                .map(|ommer| quantity::data_to_hex(ommer.hash().as_bytes()))
                .collect(),
        }
    }
}
