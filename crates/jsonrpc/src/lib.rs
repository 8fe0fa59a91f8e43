// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

mod block_result;
mod call_parameter;
mod error;
pub mod quantity;

pub use block_result::BlockResult;
pub use call_parameter::CallParameter;
pub use error::QuantityError;
