// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use bytes::Bytes;
use hex_literal::hex;
use ledger_core::{
    keccak256, Action, Address, Block, BlockBody, BlockHeader, Bloom, CliqueSealHash, Hash,
    HashFunctionKind, HeaderFields, Keccak256HeaderHash, SignatureComponents, Transaction,
    TransactionData, U256,
};
use proptest::prelude::*;

const EMPTY_TRIE_ROOT: [u8; 32] =
    hex!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");

fn mainnet_genesis() -> HeaderFields {
    HeaderFields {
        parent_hash: Hash::zero(),
        ommers_hash: keccak256(&hex!("c0")),
        beneficiary: Address::zero(),
        state_root: Hash::from(hex!(
            "d7f8974fb5ac78d9ac099b9ad5018bedc2ce0a72dad1827a1709da30580f0544"
        )),
        transactions_root: Hash::from(EMPTY_TRIE_ROOT),
        receipts_root: Hash::from(EMPTY_TRIE_ROOT),
        logs_bloom: Bloom::zero(),
        difficulty: U256::from(17_179_869_184u64),
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

#[test]
fn mainnet_genesis_hash() {
    let header = BlockHeader::new(mainnet_genesis(), &Keccak256HeaderHash);
    assert_eq!(
        header.hash(),
        Hash::from(hex!(
            "d4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3"
        ))
    );

    let encoded = rlp::encode(&header);
    assert_eq!(encoded.len(), 535);
    assert_eq!(&encoded[..3], &hex!("f90214"));
}

#[test]
fn mainnet_genesis_block_encoding() {
    let block: Block = Block::new(
        BlockHeader::new(mainnet_genesis(), &Keccak256HeaderHash),
        BlockBody::default(),
    );
    let encoded = block.to_rlp();
    assert_eq!(encoded.len(), 540);
    assert_eq!(block.calculate_size(), 540);
    assert_eq!(&encoded[..6], &hex!("f90219f90214"));
    assert_eq!(&encoded[encoded.len() - 2..], &hex!("c0c0"));

    let decoded = Block::<Transaction>::from_rlp(&encoded, &Keccak256HeaderHash).unwrap();
    assert_eq!(decoded, block);
    assert_eq!(decoded.hash(), block.hash());
    assert!(decoded.transactions().is_empty());
    assert!(decoded.ommers().is_empty());
}

#[test]
fn empty_ommer_list() {
    let ommers: Vec<BlockHeader> = vec![];
    assert_eq!(rlp::encode_list(&ommers), hex!("c0"));
}

#[test]
fn eip155_transaction_in_block() {
    let raw = hex!("f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83");
    let tx: Transaction = rlp::decode(&raw).unwrap();
    assert_eq!(
        tx.hash(),
        Hash::from(hex!(
            "33469b22e9f636356c4160a87eb19df52b7412e8eac32a4a55ffe88ea8350788"
        ))
    );
    assert_eq!(tx.data().action, Action::Call(Address::repeat_byte(0x35)));
    assert_eq!(tx.chain_id(), Some(1));

    let block = Block::new(
        BlockHeader::new(mainnet_genesis(), &Keccak256HeaderHash),
        BlockBody::new(vec![tx], vec![]),
    );
    let encoded = block.to_rlp();
    // the transaction is carried verbatim
    assert!(encoded.windows(raw.len()).any(|w| w == &raw[..]));
    let decoded: Block = Block::from_rlp(&encoded, &Keccak256HeaderHash).unwrap();
    assert_eq!(decoded, block);
}

#[test]
fn hash_strategies_coexist() {
    let mut fields = mainnet_genesis();
    let mut extra = vec![0x11; 32];
    extra.extend_from_slice(&[0x5e; 65]);
    fields.extra_data = Bytes::from(extra);
    let block: Block = Block::new(
        BlockHeader::new(fields.clone(), &Keccak256HeaderHash),
        BlockBody::default(),
    );
    let encoded = block.to_rlp();

    let mainnet: Block = Block::from_rlp(&encoded, &Keccak256HeaderHash).unwrap();
    let clique: Block = Block::from_rlp(&encoded, &CliqueSealHash).unwrap();
    let configured = HashFunctionKind::Clique.hash_function();
    let from_config: Block = Block::from_rlp(&encoded, configured.as_ref()).unwrap();

    assert_eq!(mainnet.hash(), block.hash());
    assert_ne!(clique.hash(), mainnet.hash());
    assert_eq!(from_config.hash(), clique.hash());

    fields.extra_data = Bytes::from(vec![0x11; 32]);
    assert_eq!(clique.hash(), keccak256(&rlp::encode(&fields)));
}

fn hash_strategy() -> impl Strategy<Value = Hash> {
    any::<[u8; 32]>().prop_map(Hash::from)
}

fn header_fields_strategy() -> impl Strategy<Value = HeaderFields> {
    (
        (hash_strategy(), hash_strategy(), any::<[u8; 20]>(), hash_strategy()),
        (any::<[u8; 32]>(), any::<u64>(), any::<u64>(), any::<u64>()),
        (
            any::<u64>(),
            proptest::collection::vec(any::<u8>(), 0..100),
            hash_strategy(),
            any::<u64>(),
        ),
    )
        .prop_map(
            |(
                (parent_hash, state_root, beneficiary, mix_hash),
                (difficulty, number, gas_limit, gas_used),
                (timestamp, extra_data, receipts_root, nonce),
            )| HeaderFields {
                parent_hash,
                ommers_hash: keccak256(&[0xc0]),
                beneficiary: Address::from(beneficiary),
                state_root,
                transactions_root: Hash::from(EMPTY_TRIE_ROOT),
                receipts_root,
                logs_bloom: Bloom::zero(),
                difficulty: U256::from_big_endian(&difficulty),
                number,
                gas_limit,
                gas_used,
                timestamp,
                extra_data: Bytes::from(extra_data),
                mix_hash,
                nonce,
            },
        )
}

fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (
        any::<u64>(),
        any::<u64>(),
        proptest::option::of(any::<[u8; 20]>()),
        proptest::collection::vec(any::<u8>(), 0..64),
        0u8..2,
        proptest::option::of(1u64..10_000),
        any::<[u8; 32]>(),
    )
        .prop_map(|(nonce, gas_price, to, data, v, chain_id, rs)| {
            Transaction::new(
                TransactionData {
                    nonce: U256::from(nonce),
                    gas_price: U256::from(gas_price),
                    gas_limit: U256::from(21_000u64),
                    action: to.map_or(Action::Create, |to| Action::Call(Address::from(to))),
                    value: U256::from(nonce ^ gas_price),
                    data: Bytes::from(data),
                },
                SignatureComponents::new(
                    v,
                    U256::from_big_endian(&rs),
                    U256::from_big_endian(&rs[16..]),
                    chain_id,
                )
                .unwrap(),
            )
        })
}

proptest! {
    #[test]
    fn block_roundtrip(
        fields in header_fields_strategy(),
        ommers in proptest::collection::vec(header_fields_strategy(), 0..3),
        transactions in proptest::collection::vec(transaction_strategy(), 0..4),
    ) {
        let ommers = ommers
            .into_iter()
            .map(|fields| BlockHeader::new(fields, &Keccak256HeaderHash))
            .collect();
        let block = Block::new(
            BlockHeader::new(fields, &Keccak256HeaderHash),
            BlockBody::new(transactions, ommers),
        );
        let encoded = block.to_rlp();
        prop_assert_eq!(encoded.len(), block.calculate_size());

        let decoded: Block = Block::from_rlp(&encoded, &Keccak256HeaderHash).unwrap();
        prop_assert_eq!(decoded.hash(), block.hash());
        prop_assert_eq!(decoded.to_rlp(), encoded);
        prop_assert_eq!(decoded, block);
    }

    #[test]
    fn truncated_block_is_rejected(fields in header_fields_strategy(), cut in 1usize..50) {
        let block: Block = Block::new(
            BlockHeader::new(fields, &Keccak256HeaderHash),
            BlockBody::default(),
        );
        let encoded = block.to_rlp();
        let cut = cut.min(encoded.len());
        prop_assert!(Block::<Transaction>::from_rlp(&encoded[..encoded.len() - cut], &Keccak256HeaderHash).is_err());
    }
}
