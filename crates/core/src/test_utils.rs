// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

//! Known chain data shared by tests across the workspace.

use crate::{
    Action, Address, Block, BlockBody, BlockHeader, Bloom, Hash, HeaderFields,
    Keccak256HeaderHash, SignatureComponents, Transaction, TransactionData, U256,
};
use bytes::Bytes;
use hex_literal::hex;

/// Hash of the mainnet genesis block.
pub const GENESIS_HASH: [u8; 32] =
    hex!("d4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3");

/// Signed transaction from the EIP-155 example: nonce 9, 20 gwei, 21000 gas,
/// one ether to 0x3535...35 on chain 1.
pub const EIP155_TRANSACTION_RLP: [u8; 110] = hex!(
    "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
);

/// Keccak of the empty trie root, used for empty transaction and receipt tries.
pub const EMPTY_TRIE_ROOT: [u8; 32] =
    hex!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");

/// Keccak of the empty list, the ommers hash of a block without ommers.
pub const EMPTY_OMMERS_HASH: [u8; 32] =
    hex!("1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347");

pub fn genesis_fields() -> HeaderFields {
    HeaderFields {
        parent_hash: Hash::zero(),
        ommers_hash: Hash::from(EMPTY_OMMERS_HASH),
        beneficiary: Address::zero(),
        state_root: Hash::from(hex!(
            "d7f8974fb5ac78d9ac099b9ad5018bedc2ce0a72dad1827a1709da30580f0544"
        )),
        transactions_root: Hash::from(EMPTY_TRIE_ROOT),
        receipts_root: Hash::from(EMPTY_TRIE_ROOT),
        logs_bloom: Bloom::zero(),
        difficulty: U256::from(0x4_0000_0000u64),
        number: 0,
        gas_limit: 5000,
        gas_used: 0,
        timestamp: 0,
        extra_data: Bytes::from_static(&hex!(
            "11bbe8db4e347b4e8c937c1c8370e4b5ed33adb3db69cbdb7a38e1e50b1b82fa"
        )),
        mix_hash: Hash::zero(),
        nonce: 0x42,
    }
}

pub fn genesis_header() -> BlockHeader {
    BlockHeader::new(genesis_fields(), &Keccak256HeaderHash)
}

pub fn genesis_block() -> Block {
    Block::new(genesis_header(), BlockBody::default())
}

pub fn eip155_transaction() -> Transaction {
    Transaction::new(
        TransactionData {
            nonce: U256::from(9u64),
            gas_price: U256::from(20_000_000_000u64),
            gas_limit: U256::from(21_000u64),
            action: Action::Call(Address::repeat_byte(0x35)),
            value: U256::from(1_000_000_000_000_000_000u64),
            data: Bytes::new(),
        },
        SignatureComponents {
            v: 37,
            r: U256::from_big_endian(&hex!(
                "28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276"
            )),
            s: U256::from_big_endian(&hex!(
                "67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
            )),
        },
    )
}

/// Block #1 on top of genesis with one transaction and genesis as its ommer.
pub fn sample_block() -> Block {
    let genesis = genesis_header();
    let fields = HeaderFields {
        parent_hash: genesis.hash(),
        ommers_hash: Hash::repeat_byte(0x0e),
        beneficiary: Address::repeat_byte(0xbe),
        transactions_root: Hash::repeat_byte(0x17),
        difficulty: U256::from(0x3_ff80_0000u64),
        number: 1,
        gas_limit: 5000,
        gas_used: 21000,
        timestamp: 1_438_269_988,
        extra_data: Bytes::from_static(b"rlpdump"),
        nonce: 0x539b_d4f3_f1fa_5e0d,
        ..genesis_fields()
    };
    Block::new(
        BlockHeader::new(fields, &Keccak256HeaderHash),
        BlockBody::new(vec![eip155_transaction()], vec![genesis]),
    )
}
