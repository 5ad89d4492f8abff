//! Token types and token sequences.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Classification of one piece of instruction text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenType {
    // filling
    Comma,
    Space,
    ArgumentSpace,
    MemoryOperatorSpace,
    // general instruction parts
    Prefix,
    Uncategorized,
    /// Jump/call destinations and displacements inside memory operands
    Address,
    Value,
    // mnemonics
    MnemonicNormal,
    MnemonicPushPop,
    MnemonicCallRet,
    MnemonicCondJump,
    MnemonicUncondJump,
    MnemonicNop,
    // memory
    MemorySize,
    MemorySegment,
    MemoryBrackets,
    MemoryStackBrackets,
    MemoryBaseRegister,
    MemoryIndexRegister,
    MemoryScale,
    /// '+', '-' and '*'
    MemoryOperator,
    // registers
    GeneralRegister,
    FpuRegister,
    MmxRegister,
    SseRegister,
}

impl TokenType {
    pub const ALL: [TokenType; 26] = [
        TokenType::Comma,
        TokenType::Space,
        TokenType::ArgumentSpace,
        TokenType::MemoryOperatorSpace,
        TokenType::Prefix,
        TokenType::Uncategorized,
        TokenType::Address,
        TokenType::Value,
        TokenType::MnemonicNormal,
        TokenType::MnemonicPushPop,
        TokenType::MnemonicCallRet,
        TokenType::MnemonicCondJump,
        TokenType::MnemonicUncondJump,
        TokenType::MnemonicNop,
        TokenType::MemorySize,
        TokenType::MemorySegment,
        TokenType::MemoryBrackets,
        TokenType::MemoryStackBrackets,
        TokenType::MemoryBaseRegister,
        TokenType::MemoryIndexRegister,
        TokenType::MemoryScale,
        TokenType::MemoryOperator,
        TokenType::GeneralRegister,
        TokenType::FpuRegister,
        TokenType::MmxRegister,
        TokenType::SseRegister,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TokenType::Comma => "Comma",
            TokenType::Space => "Space",
            TokenType::ArgumentSpace => "ArgumentSpace",
            TokenType::MemoryOperatorSpace => "MemoryOperatorSpace",
            TokenType::Prefix => "Prefix",
            TokenType::Uncategorized => "Uncategorized",
            TokenType::Address => "Address",
            TokenType::Value => "Value",
            TokenType::MnemonicNormal => "MnemonicNormal",
            TokenType::MnemonicPushPop => "MnemonicPushPop",
            TokenType::MnemonicCallRet => "MnemonicCallRet",
            TokenType::MnemonicCondJump => "MnemonicCondJump",
            TokenType::MnemonicUncondJump => "MnemonicUncondJump",
            TokenType::MnemonicNop => "MnemonicNop",
            TokenType::MemorySize => "MemorySize",
            TokenType::MemorySegment => "MemorySegment",
            TokenType::MemoryBrackets => "MemoryBrackets",
            TokenType::MemoryStackBrackets => "MemoryStackBrackets",
            TokenType::MemoryBaseRegister => "MemoryBaseRegister",
            TokenType::MemoryIndexRegister => "MemoryIndexRegister",
            TokenType::MemoryScale => "MemoryScale",
            TokenType::MemoryOperator => "MemoryOperator",
            TokenType::GeneralRegister => "GeneralRegister",
            TokenType::FpuRegister => "FpuRegister",
            TokenType::MmxRegister => "MmxRegister",
            TokenType::SseRegister => "SseRegister",
        }
    }

    pub fn is_mnemonic(self) -> bool {
        matches!(
            self,
            TokenType::MnemonicNormal
                | TokenType::MnemonicPushPop
                | TokenType::MnemonicCallRet
                | TokenType::MnemonicCondJump
                | TokenType::MnemonicUncondJump
                | TokenType::MnemonicNop
        )
    }

    /// Stable tag fed into the sequence hash
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenType {
    type Err = ConfigError;

    /// Case-insensitive, with or without a leading "Token"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let wanted = wanted
            .strip_prefix("Token")
            .or_else(|| wanted.strip_prefix("token"))
            .unwrap_or(wanted);
        TokenType::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownTokenType(s.to_string()))
    }
}

/// Numeric payload of address/value tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenValue {
    /// Size of the value in bytes
    pub size: u8,
    pub value: u64,
}

/// A single classified piece of instruction text.
///
/// Text and value are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenType,
    text: String,
    value: Option<TokenValue>,
}

impl Token {
    pub fn new(kind: TokenType, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            value: None,
        }
    }

    pub fn with_value(kind: TokenType, text: impl Into<String>, value: TokenValue) -> Self {
        Self {
            kind,
            text: text.into(),
            value: Some(value),
        }
    }

    pub fn kind(&self) -> TokenType {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Jump destination, displacement or immediate, when the token carries one
    pub fn value(&self) -> Option<TokenValue> {
        self.value
    }
}

/// All tokens of one instruction plus its checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionTokens {
    tokens: Vec<Token>,
    hash: u64,
    /// x of the first character, set by the caller after layout
    pub x: i32,
}

impl InstructionTokens {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        let hash = super::hash::hash_tokens(&tokens);
        Self { tokens, hash, x: 0 }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Checksum over (type, text) of all tokens
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// The mnemonic token; every tokenized instruction has exactly one
    pub fn mnemonic(&self) -> Option<&Token> {
        self.tokens.iter().find(|t| t.kind().is_mnemonic())
    }
}

impl<'a> IntoIterator for &'a InstructionTokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Plain text, as copied to the clipboard
impl fmt::Display for InstructionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token.text())?;
        }
        Ok(())
    }
}
