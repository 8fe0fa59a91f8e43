// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context, Result};
use clap::Parser;
use ledger_core::Block;
use ledger_jsonrpc::BlockResult;
use log::*;
use rustc_hex::FromHex;
use simple_logger::SimpleLogger;

use crate::config::{Config, Opts};

mod config;

/// Raw block bytes from `--file` or from the positional hex argument.
fn read_input(opts: &Opts) -> Result<Vec<u8>> {
    if let Some(path) = &opts.file {
        return std::fs::read(path).with_context(|| format!("reading {}", path.display()));
    }
    match &opts.hex {
        Some(text) => parse_hex(text),
        None => bail!("no block given, pass it as hex or with --file"),
    }
}

fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    let digits = text.strip_prefix("0x").unwrap_or(text);
    digits
        .from_hex()
        .map_err(|e| anyhow::anyhow!("invalid hex input: {}", e))
}

fn run(opts: Opts) -> Result<BlockResult> {
    let mut config = Config::load(&opts.config)?;
    config.apply(&opts);
    debug!("Config: {:?}", config);

    let bytes = read_input(&opts)?;
    info!(
        "Decoding {} bytes with the {} header hash",
        bytes.len(),
        config.chain.header_hash
    );

    let hash_function = config.chain.header_hash.hash_function();
    let block: Block =
        Block::from_rlp_with_config(&bytes, hash_function.as_ref(), config.decoder)
            .with_context(|| format!("decoding {} bytes as a block", bytes.len()))?;
    info!(
        "Block #{} {:?} with {} transactions and {} ommers",
        block.header().number(),
        block.hash(),
        block.transactions().len(),
        block.ommers().len()
    );
    Ok(BlockResult::from(&block))
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    SimpleLogger::new().with_level(opts.log_level).init()?;

    let result = run(opts)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
