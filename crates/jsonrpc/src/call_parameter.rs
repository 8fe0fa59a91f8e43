// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use crate::{error::QuantityError, quantity};
use bytes::Bytes;
use ethereum_types::{Address, U256};
use serde::{de, Deserialize, Deserializer};

/// Parameters of `eth_call` and `eth_estimateGas`.
///
/// Every field is optional, and an omitted field is kept apart from a field
/// set to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallParameter {
    #[serde(default, deserialize_with = "address")]
    pub from: Option<Address>,
    #[serde(default, deserialize_with = "address")]
    pub to: Option<Address>,
    #[serde(default, rename = "gas", deserialize_with = "gas_limit")]
    pub gas_limit: Option<u64>,
    #[serde(default, deserialize_with = "amount")]
    pub gas_price: Option<U256>,
    #[serde(default, deserialize_with = "amount")]
    pub value: Option<U256>,
    #[serde(default, rename = "data", deserialize_with = "payload")]
    pub payload: Option<Bytes>,
}

fn parse_optional<'de, D, T, F>(deserializer: D, parse: F) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    F: FnOnce(&str) -> Result<T, QuantityError>,
{
    let text: Option<String> = Option::deserialize(deserializer)?;
    text.map(|text| parse(&text))
        .transpose()
        .map_err(de::Error::custom)
}

fn address<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Address>, D::Error> {
    parse_optional(deserializer, |text| {
        quantity::parse_fixed::<20>(text).map(Address::from)
    })
}

fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<U256>, D::Error> {
    parse_optional(deserializer, quantity::parse)
}

fn payload<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Bytes>, D::Error> {
    parse_optional(deserializer, |text| quantity::parse_data(text).map(Bytes::from))
}

/// Gas is accepted as a decimal number or as `0x` prefixed hex.
fn gas_limit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    parse_optional(deserializer, |text| {
        let parsed = match text.strip_prefix("0x") {
            Some(digits) => u64::from_str_radix(digits, 16),
            None => text.parse::<u64>(),
        };
        parsed.map_err(|_| QuantityError::InvalidNumber(text.to_owned()))
    })
}
