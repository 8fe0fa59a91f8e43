// Copyright 2021 Gnosis Ltd.
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use ledger_core::HashFunctionKind;
use log::LevelFilter;
use rlp::DecoderConfig;
use serde::Deserialize;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Decodes an RLP encoded block and prints it the way the JSON-RPC API
/// returns it.
#[derive(Parser, Clone, Debug)]
#[clap(version = "1.0", author = "Gnosis Devs")]
pub struct Opts {
    /// Sets a custom config file. A missing file means default settings.
    #[clap(short, long, default_value = "rlpdump.toml")]
    pub config: PathBuf,
    /// Header hash function (keccak256 or clique), overrides the config file.
    #[clap(long)]
    pub hash: Option<HashFunctionKind>,
    /// Reads the raw block bytes from a file.
    #[clap(short, long, conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Log level: off, error, warn, info, debug or trace.
    #[clap(short, long, default_value = "info")]
    pub log_level: LevelFilter,
    /// The block as hex, with or without the 0x prefix.
    pub hex: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ChainConfig {
    pub header_hash: HashFunctionKind,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub decoder: DecoderConfig,
    pub chain: ChainConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading config {}", path.display()))
            }
        };
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Command line flags take precedence over the file.
    pub fn apply(&mut self, opts: &Opts) {
        if let Some(kind) = opts.hash {
            self.chain.header_hash = kind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let config: Config = toml::from_str(
            r#"
            [decoder]
            max_depth = 16

            [chain]
            header_hash = "clique"
            "#,
        )
        .unwrap();
        assert_eq!(config.decoder.max_depth, 16);
        assert_eq!(config.chain.header_hash, HashFunctionKind::Clique);
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.decoder.max_depth, rlp::DEFAULT_MAX_DEPTH);
        assert_eq!(config.chain.header_hash, HashFunctionKind::Keccak256);
    }

    #[test]
    fn missing_file_is_default() {
        let config = Config::load(Path::new("/nonexistent/rlpdump.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn flags_override_file() {
        let opts = Opts::parse_from(&["rlpdump", "--hash", "clique", "c0"]);
        let mut config = Config::default();
        config.apply(&opts);
        assert_eq!(config.chain.header_hash, HashFunctionKind::Clique);
        assert_eq!(opts.hex.as_deref(), Some("c0"));
        assert_eq!(opts.log_level, LevelFilter::Info);
    }

    #[test]
    fn unknown_hash_is_rejected() {
        assert!(Opts::try_parse_from(&["rlpdump", "--hash", "sha256", "c0"]).is_err());
    }
}
