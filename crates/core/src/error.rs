// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0
use crate::Hash;
use thiserror::Error;

/// A block's cached header hash differs from the hash it was claimed to have.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Block hash mismatch. Expected {expected:?}, header hashes to {actual:?}")]
pub struct HashMismatch {
    pub expected: Hash,
    pub actual: Hash,
}
