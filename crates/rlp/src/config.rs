// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

/// Deepest list nesting accepted from untrusted input. A block with ommers
/// needs three levels, transactions a few more.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> DecoderConfig {
        DecoderConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
