// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

pub mod replay_protection;
mod signature;

pub use signature::SignatureComponents;

use crate::{hash::keccak256, Address, Hash, U256};
use bytes::Bytes;
use rlp::{Decodable, DecoderError, Encodable, RlpInput, RlpOutput};

pub type ChainId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create creates new contract.
    Create,
    /// Calls contract at given address.
    /// In the case of a transfer, this is the receiver's address.
    Call(Address),
}

impl Default for Action {
    fn default() -> Action {
        Action::Create
    }
}

impl Encodable for Action {
    fn rlp_append(&self, out: &mut RlpOutput) {
        match self {
            Action::Create => out.write_empty(),
            Action::Call(address) => out.write(address),
        };
    }
}

impl Decodable for Action {
    fn decode(input: &mut RlpInput<'_>) -> rlp::Result<Self> {
        let offset = input.position();
        let bytes = input.read_bytes()?;
        match bytes.len() {
            0 => Ok(Action::Create),
            20 => Ok(Action::Call(Address::from_slice(bytes))),
            actual => Err(DecoderError::InvalidLength {
                offset,
                expected: 20,
                actual,
            }),
        }
    }
}

/// Unsigned part of a legacy transaction.
///
/// A transaction (formally, T) is a single cryptographically-signed
/// instruction constructed by an actor externally to the scope of Ethereum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionData {
    pub nonce: U256,
    /// The number of Wei to pay the network for unit of gas.
    pub gas_price: U256,
    pub gas_limit: U256,
    pub action: Action,
    pub value: U256,
    pub data: Bytes,
}

impl TransactionData {
    fn rlp_append_fields(&self, out: &mut RlpOutput) {
        out.write(&self.nonce)
            .write(&self.gas_price)
            .write(&self.gas_limit)
            .write(&self.action)
            .write(&self.value)
            .write(&self.data);
    }
}

/// Signed legacy transaction with its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    data: TransactionData,
    signature: SignatureComponents,
    hash: Hash,
}

impl Transaction {
    pub fn new(data: TransactionData, signature: SignatureComponents) -> Transaction {
        let mut tx = Transaction {
            data,
            signature,
            hash: Hash::zero(),
        };
        tx.hash = keccak256(&rlp::encode(&tx));
        tx
    }

    pub fn data(&self) -> &TransactionData {
        &self.data
    }

    pub fn signature(&self) -> &SignatureComponents {
        &self.signature
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        self.signature.chain_id()
    }

    pub fn standard_v(&self) -> Option<u8> {
        self.signature.standard_v()
    }

    /// The list that gets signed: the six data fields, followed by
    /// `chain_id, 0, 0` when the transaction is replay protected.
    pub fn signing_payload(&self) -> Vec<u8> {
        rlp::encode_with(|out| {
            out.start_list();
            self.data.rlp_append_fields(out);
            if let Some(chain_id) = self.chain_id() {
                out.write(&chain_id).write_empty().write_empty();
            }
            out.end_list();
        })
    }

    pub fn signing_hash(&self) -> Hash {
        keccak256(&self.signing_payload())
    }
}

impl Encodable for Transaction {
    fn rlp_append(&self, out: &mut RlpOutput) {
        out.start_list();
        self.data.rlp_append_fields(out);
        self.signature.rlp_append(out);
        out.end_list();
    }
}

impl Decodable for Transaction {
    fn decode(input: &mut RlpInput<'_>) -> rlp::Result<Self> {
        let raw = input.current_item_raw()?;
        input.enter_list()?;
        let data = TransactionData {
            nonce: input.read()?,
            gas_price: input.read()?,
            gas_limit: input.read()?,
            action: input.read()?,
            value: input.read()?,
            data: input.read()?,
        };
        let signature = SignatureComponents {
            v: input.read()?,
            r: input.read()?,
            s: input.read()?,
        };
        input.leave_list()?;
        Ok(Transaction {
            data,
            signature,
            hash: keccak256(raw),
        })
    }
}
