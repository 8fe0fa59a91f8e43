// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::HashMismatch, hash::BlockHashFunction, header::BlockHeader, Hash, Transaction,
};
use log::debug;
use rlp::{Decodable, DecoderConfig, Encodable, RlpInput, RlpOutput};

/// Transactions and ommer headers carried by a block, both in block order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockBody<T = Transaction> {
    transactions: Vec<T>,
    ommers: Vec<BlockHeader>,
}

impl<T> Default for BlockBody<T> {
    fn default() -> Self {
        BlockBody {
            transactions: Vec::new(),
            ommers: Vec::new(),
        }
    }
}

impl<T> BlockBody<T> {
    pub fn new(transactions: Vec<T>, ommers: Vec<BlockHeader>) -> Self {
        BlockBody {
            transactions,
            ommers,
        }
    }

    pub fn transactions(&self) -> &[T] {
        &self.transactions
    }

    pub fn ommers(&self) -> &[BlockHeader] {
        &self.ommers
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<BlockHeader>) {
        (self.transactions, self.ommers)
    }
}

impl<T: Encodable> BlockBody<T> {
    /// Writes the transaction list followed by the ommer list.
    pub fn write_to(&self, out: &mut RlpOutput) {
        out.write_list(&self.transactions);
        out.write_list_with(&self.ommers, |ommer, out| ommer.write_to(out));
    }
}

impl<T: Decodable> BlockBody<T> {
    /// Ommers are decoded with the same hash function as the block header.
    pub fn read_from(
        input: &mut RlpInput<'_>,
        hash_function: &dyn BlockHashFunction,
    ) -> rlp::Result<Self> {
        let transactions = input.read_list_of::<T>()?;
        let ommers = input.read_list(|input| BlockHeader::read_from(input, hash_function))?;
        Ok(BlockBody {
            transactions,
            ommers,
        })
    }
}

/// A header and the body it commits to.
///
/// Equality is structural. The block hash is the header's cached hash and is
/// never derived from the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<T = Transaction> {
    header: BlockHeader,
    body: BlockBody<T>,
}

impl<T> Block<T> {
    pub fn new(header: BlockHeader, body: BlockBody<T>) -> Self {
        Block { header, body }
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn body(&self) -> &BlockBody<T> {
        &self.body
    }

    pub fn transactions(&self) -> &[T] {
        self.body.transactions()
    }

    pub fn ommers(&self) -> &[BlockHeader] {
        self.body.ommers()
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    pub fn into_parts(self) -> (BlockHeader, BlockBody<T>) {
        (self.header, self.body)
    }

    /// Checks the cached header hash against a hash received from elsewhere,
    /// e.g. the announcement the block was requested for.
    pub fn verify_hash(&self, expected: &Hash) -> Result<(), HashMismatch> {
        let actual = self.hash();
        if actual != *expected {
            return Err(HashMismatch {
                expected: *expected,
                actual,
            });
        }
        Ok(())
    }
}

impl<T: Encodable> Block<T> {
    /// `[header, [transactions...], [ommers...]]`
    pub fn write_to(&self, out: &mut RlpOutput) {
        out.start_list();
        self.header.write_to(out);
        self.body.write_to(out);
        out.end_list();
    }

    pub fn to_rlp(&self) -> Vec<u8> {
        rlp::encode(self)
    }

    /// Size of the block's canonical encoding in bytes.
    pub fn calculate_size(&self) -> usize {
        let mut out = RlpOutput::new();
        self.write_to(&mut out);
        out.len()
    }
}

impl<T: Decodable> Block<T> {
    pub fn read_from(
        input: &mut RlpInput<'_>,
        hash_function: &dyn BlockHashFunction,
    ) -> rlp::Result<Self> {
        input.enter_list()?;
        let header = BlockHeader::read_from(input, hash_function)?;
        let body = BlockBody::read_from(input, hash_function)?;
        input.leave_list()?;
        Ok(Block { header, body })
    }

    /// Decodes a block that must span all of `bytes`.
    pub fn from_rlp(bytes: &[u8], hash_function: &dyn BlockHashFunction) -> rlp::Result<Self> {
        Self::from_rlp_with_config(bytes, hash_function, DecoderConfig::default())
    }

    pub fn from_rlp_with_config(
        bytes: &[u8],
        hash_function: &dyn BlockHashFunction,
        config: DecoderConfig,
    ) -> rlp::Result<Self> {
        let mut input = RlpInput::with_config(bytes, config);
        let block = Self::read_from(&mut input, hash_function)?;
        input.finish()?;
        debug!(
            "Decoded block #{} {:?}: {} transactions, {} ommers, {} bytes",
            block.header.number(),
            block.hash(),
            block.body.transactions.len(),
            block.body.ommers.len(),
            bytes.len()
        );
        Ok(block)
    }
}

impl<T: Encodable> Encodable for Block<T> {
    fn rlp_append(&self, out: &mut RlpOutput) {
        self.write_to(out);
    }
}
