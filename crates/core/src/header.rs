// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use crate::{hash::BlockHashFunction, Address, BlockNumber, Bloom, Hash, U256};
use bytes::Bytes;
use log::*;
use rlp::{Decodable, Encodable, RlpInput, RlpOutput};

/// Header fields in wire order.
///
/// https://ethereum.stackexchange.com/questions/268/ethereum-block-architecture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub parent_hash: Hash,
    pub ommers_hash: Hash,
    pub beneficiary: Address,
    pub state_root: Hash,
    pub transactions_root: Hash,
    pub receipts_root: Hash,
    pub logs_bloom: Bloom,
    pub difficulty: U256,
    pub number: BlockNumber,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: Bytes,
    pub mix_hash: Hash,
    /// Written as a fixed eight byte string, not as an integer.
    pub nonce: u64,
}

impl Encodable for HeaderFields {
    fn rlp_append(&self, out: &mut RlpOutput) {
        out.start_list()
            .write(&self.parent_hash)
            .write(&self.ommers_hash)
            .write(&self.beneficiary)
            .write(&self.state_root)
            .write(&self.transactions_root)
            .write(&self.receipts_root)
            .write(&self.logs_bloom)
            .write(&self.difficulty)
            .write(&self.number)
            .write(&self.gas_limit)
            .write(&self.gas_used)
            .write(&self.timestamp)
            .write(&self.extra_data)
            .write(&self.mix_hash)
            .write_bytes(&self.nonce.to_be_bytes())
            .end_list();
    }
}

impl Decodable for HeaderFields {
    fn decode(input: &mut RlpInput<'_>) -> rlp::Result<Self> {
        input.enter_list()?;
        let fields = HeaderFields {
            parent_hash: input.read()?,
            ommers_hash: input.read()?,
            beneficiary: input.read()?,
            state_root: input.read()?,
            transactions_root: input.read()?,
            receipts_root: input.read()?,
            logs_bloom: input.read()?,
            difficulty: input.read()?,
            number: input.read()?,
            gas_limit: input.read()?,
            gas_used: input.read()?,
            timestamp: input.read()?,
            extra_data: input.read()?,
            mix_hash: input.read()?,
            nonce: u64::from_be_bytes(input.read_fixed::<8>()?),
        };
        input.leave_list()?;
        Ok(fields)
    }
}

/// Immutable block header together with its hash.
///
/// The hash is computed once, either when the header is assembled or when
/// it is decoded, and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    fields: HeaderFields,
    hash: Hash,
}

impl BlockHeader {
    pub fn new(fields: HeaderFields, hash_function: &dyn BlockHashFunction) -> BlockHeader {
        let hash = hash_function.hash(&rlp::encode(&fields));
        BlockHeader { fields, hash }
    }

    /// Decodes a header and hashes exactly the bytes it was decoded from.
    pub fn read_from(
        input: &mut RlpInput<'_>,
        hash_function: &dyn BlockHashFunction,
    ) -> rlp::Result<BlockHeader> {
        let raw = input.current_item_raw()?;
        let fields = HeaderFields::decode(input)?;
        let hash = hash_function.hash(raw);
        trace!("Header #{} {:?} from {} bytes", fields.number, hash, raw.len());
        Ok(BlockHeader { fields, hash })
    }

    pub fn write_to(&self, out: &mut RlpOutput) {
        self.fields.rlp_append(out);
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn fields(&self) -> &HeaderFields {
        &self.fields
    }

    pub fn into_fields(self) -> HeaderFields {
        self.fields
    }

    pub fn parent_hash(&self) -> &Hash {
        &self.fields.parent_hash
    }

    pub fn ommers_hash(&self) -> &Hash {
        &self.fields.ommers_hash
    }

    pub fn beneficiary(&self) -> &Address {
        &self.fields.beneficiary
    }

    pub fn state_root(&self) -> &Hash {
        &self.fields.state_root
    }

    pub fn transactions_root(&self) -> &Hash {
        &self.fields.transactions_root
    }

    pub fn receipts_root(&self) -> &Hash {
        &self.fields.receipts_root
    }

    pub fn logs_bloom(&self) -> &Bloom {
        &self.fields.logs_bloom
    }

    pub fn difficulty(&self) -> &U256 {
        &self.fields.difficulty
    }

    pub fn number(&self) -> BlockNumber {
        self.fields.number
    }

    pub fn gas_limit(&self) -> u64 {
        self.fields.gas_limit
    }

    pub fn gas_used(&self) -> u64 {
        self.fields.gas_used
    }

    pub fn timestamp(&self) -> u64 {
        self.fields.timestamp
    }

    pub fn extra_data(&self) -> &Bytes {
        &self.fields.extra_data
    }

    pub fn mix_hash(&self) -> &Hash {
        &self.fields.mix_hash
    }

    pub fn nonce(&self) -> u64 {
        self.fields.nonce
    }
}

impl Encodable for BlockHeader {
    fn rlp_append(&self, out: &mut RlpOutput) {
        self.write_to(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hash::keccak256, test_utils, Keccak256HeaderHash};
    use rlp::DecoderError;

    #[test]
    fn nonce_is_fixed_width() {
        let fields = HeaderFields {
            nonce: 0x42,
            ..Default::default()
        };
        let encoded = rlp::encode(&fields);
        assert_eq!(&encoded[encoded.len() - 9..], &[0x88, 0, 0, 0, 0, 0, 0, 0, 0x42]);

        let zero = rlp::encode(&HeaderFields::default());
        assert_eq!(&zero[zero.len() - 9..], &[0x88, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn decoded_hash_matches_constructed_hash() {
        let header = test_utils::genesis_header();
        let encoded = rlp::encode(&header);
        let mut input = RlpInput::new(&encoded);
        let decoded = BlockHeader::read_from(&mut input, &Keccak256HeaderHash).unwrap();
        assert!(input.is_done());
        assert_eq!(decoded, header);
        assert_eq!(decoded.hash(), keccak256(&encoded));
    }

    #[test]
    fn header_with_missing_field_is_rejected() {
        let mut encoded = rlp::encode(&test_utils::genesis_fields());
        // drop the nonce and shrink the two byte list length to match
        encoded.truncate(encoded.len() - 9);
        let len = u16::from_be_bytes([encoded[1], encoded[2]]) - 9;
        encoded[1..3].copy_from_slice(&len.to_be_bytes());

        let mut input = RlpInput::new(&encoded);
        let alone = BlockHeader::read_from(&mut input, &Keccak256HeaderHash).unwrap_err();
        assert_eq!(
            alone,
            DecoderError::TrailingData {
                offset: 0,
                expected: 523,
                actual: 524
            }
        );

        // the same header inside a block fails the same way, at its own offset
        let block = rlp::encode_with(|out| {
            out.start_list()
                .write_raw(&encoded)
                .start_list()
                .end_list()
                .start_list()
                .end_list()
                .end_list();
        });
        let mut input = RlpInput::new(&block);
        input.enter_list().unwrap();
        let embedded = BlockHeader::read_from(&mut input, &Keccak256HeaderHash).unwrap_err();
        assert_eq!(
            embedded,
            DecoderError::TrailingData {
                offset: 3,
                expected: 523,
                actual: 524
            }
        );
    }

    #[test]
    fn header_with_short_hash_is_rejected() {
        let encoded = rlp::encode_with(|out| {
            out.start_list();
            for _ in 0..15 {
                out.write_empty();
            }
            out.end_list();
        });
        let mut input = RlpInput::new(&encoded);
        let err = BlockHeader::read_from(&mut input, &Keccak256HeaderHash).unwrap_err();
        assert_eq!(
            err,
            DecoderError::InvalidLength {
                offset: 1,
                expected: 32,
                actual: 0
            }
        );
    }

    #[test]
    fn header_with_extra_field_is_rejected() {
        let mut fields_only = rlp::encode(&test_utils::genesis_fields());
        // splice one more byte into the list and fix up the two byte length
        fields_only.push(0x01);
        let len = u16::from_be_bytes([fields_only[1], fields_only[2]]) + 1;
        fields_only[1..3].copy_from_slice(&len.to_be_bytes());

        let mut input = RlpInput::new(&fields_only);
        let err = BlockHeader::read_from(&mut input, &Keccak256HeaderHash).unwrap_err();
        assert!(matches!(err, DecoderError::TrailingData { offset: 0, .. }));
    }
}
