// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

mod block;
mod error;
mod hash;
mod header;
mod transaction;

#[cfg(any(test, feature = "test_only"))]
pub mod test_utils;

// large integers
pub use ethereum_types::U256;

// fixed width values
pub use ethereum_types::{Address, Bloom, H256 as Hash};

pub type BlockNumber = u64;

// domain types
pub use block::{Block, BlockBody};
pub use error::HashMismatch;
pub use hash::{keccak256, BlockHashFunction, CliqueSealHash, HashFunctionKind, Keccak256HeaderHash};
pub use header::{BlockHeader, HeaderFields};
pub use transaction::{
    replay_protection, Action, ChainId, SignatureComponents, Transaction, TransactionData,
};
