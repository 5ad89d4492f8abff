//! View settings and configuration errors.

use thiserror::Error;

use crate::disasm::Bitness;
use crate::dump::DumpMode;
use crate::render::ColorTable;
use crate::tokenizer::TokenizerOptions;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown token type: {0}")]
    UnknownTokenType(String),

    #[error("Invalid color '{0}' (expected #RRGGBB, #RRGGBBAA or 'transparent')")]
    InvalidColor(String),

    #[error("Unknown dump mode: {0}")]
    UnknownDumpMode(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Unsupported bitness: {0} (expected 16, 32 or 64)")]
    InvalidBitness(u32),
}

/// Everything a CPU view needs to know about how to display things
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub bitness: Bitness,
    pub tokenizer: TokenizerOptions,
    pub dump_mode: DumpMode,
    pub colors: ColorTable,
}

/// Parse an address string (supports 0x prefix and decimal)
pub fn parse_address(s: &str) -> Result<u64, ConfigError> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|_| ConfigError::InvalidAddress(s.to_string()))
}
