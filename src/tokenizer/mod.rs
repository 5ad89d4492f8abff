//! Instruction tokenizer
//!
//! Turns a decoded instruction into a flat list of typed tokens: prefixes,
//! the mnemonic, then each operand split into registers, brackets, operators
//! and values. A renderer colors the tokens by type without having to parse
//! any text.
//!
//! ```text
//! lock add dword ptr [rsp+8], 01
//!
//! Prefix "lock", Space, MnemonicNormal "add", Space, MemorySize "dword ptr",
//! Space, MemoryStackBrackets "[", MemoryBaseRegister "rsp",
//! MemoryOperator "+", Address "8", MemoryStackBrackets "]", Comma,
//! ArgumentSpace, Value "01"
//! ```

pub mod argument;
pub mod hash;
pub mod mnemonic;
pub mod tables;
pub mod token;


pub use argument::{classify_argument, ArgumentShape, ARGUMENT_RULES, REGISTER_PLACEHOLDER};
pub use hash::hash_tokens;
pub use mnemonic::{classify_mnemonic, MNEMONIC_RULES};
pub use tables::NameTables;
pub use token::{InstructionTokens, Token, TokenType, TokenValue};

use crate::core::symbols::SymbolSource;
use crate::disasm::DecodedInstruction;
use argument::ArgumentContext;

/// Display options that change token text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Upper case mnemonics, prefixes, registers and size names.
    /// Hex digits are always upper case.
    pub uppercase: bool,
    /// Emit "dword ptr" style size tags on memory operands
    pub memory_sizes: bool,
    /// Space after the comma between arguments
    pub argument_spaces: bool,
    /// Spaces around '+' and '-' inside memory operands
    pub memory_spaces: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            uppercase: false,
            memory_sizes: true,
            argument_spaces: true,
            memory_spaces: false,
        }
    }
}

/// Stateless tokenizer over shared naming tables.
///
/// Cheap to construct; holds only borrows, so one instance per view or one
/// per call are both fine.
#[derive(Clone, Copy)]
pub struct Tokenizer<'a> {
    tables: &'a NameTables,
    options: TokenizerOptions,
    symbols: Option<&'a dyn SymbolSource>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(tables: &'a NameTables, options: TokenizerOptions) -> Self {
        Self {
            tables,
            options,
            symbols: None,
        }
    }

    /// Resolve branch targets and absolute addresses to labels
    pub fn with_symbols(mut self, symbols: &'a dyn SymbolSource) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Tokenize one decoded instruction.
    ///
    /// Never fails: unknown registers, sizes or operand shapes degrade to
    /// placeholders or are skipped.
    pub fn tokenize(&self, insn: &DecodedInstruction) -> InstructionTokens {
        let mut tokens = Vec::with_capacity(16);

        for prefix in &insn.prefixes {
            tokens.push(Token::new(TokenType::Prefix, self.case(prefix.name())));
            tokens.push(Token::new(TokenType::Space, " "));
        }

        let kind = classify_mnemonic(insn);
        let string_op = mnemonic::string_operation(insn);
        let text = match &string_op {
            Some(op) => self.case(op.mnemonic),
            None => self.case(insn.mnemonic.trim()),
        };
        tokens.push(Token::new(kind, text));

        let ctx = ArgumentContext {
            bitness: insn.bitness,
            has_target: mnemonic::has_code_target(insn, kind),
            force_segment: string_op.is_some(),
        };
        let arguments = match &string_op {
            Some(op) => op.arguments.as_slice(),
            None => insn.arguments.as_slice(),
        };

        let mut hadarg = false;
        for argument in arguments {
            self.argument(&mut tokens, &ctx, argument, &mut hadarg);
        }

        InstructionTokens::new(tokens)
    }

    fn case(&self, text: &str) -> String {
        if self.options.uppercase {
            text.to_ascii_uppercase()
        } else {
            text.to_ascii_lowercase()
        }
    }
}

/// Tokenize with the shared tables and default options
pub fn tokenize(insn: &DecodedInstruction) -> InstructionTokens {
    Tokenizer::new(NameTables::shared(), TokenizerOptions::default()).tokenize(insn)
}
