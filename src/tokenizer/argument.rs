//! Argument classification and operand token emission.

use super::token::{Token, TokenType, TokenValue};
use super::Tokenizer;
use crate::disasm::{Argument, Bitness, Register, RegisterClass};

/// Text emitted for a register the naming table doesn't know
pub const REGISTER_PLACEHOLDER: &str = "reg?";

/// How an argument record ends up being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentShape {
    Memory,
    Register,
    Immediate,
    /// Only the decoder's own text is usable
    Uncategorized,
    /// Nothing to show
    Empty,
}

/// One step of the argument classification cascade
pub struct ArgumentRule {
    pub name: &'static str,
    matches: fn(&Argument) -> bool,
    pub shape: ArgumentShape,
}

impl ArgumentRule {
    pub fn matches(&self, argument: &Argument) -> bool {
        (self.matches)(argument)
    }
}

/// Most specific shape first. Contradictory flags resolve to the first rule
/// that can actually be rendered.
pub const ARGUMENT_RULES: [ArgumentRule; 4] = [
    ArgumentRule {
        name: "memory",
        matches: is_memory,
        shape: ArgumentShape::Memory,
    },
    ArgumentRule {
        name: "register",
        matches: is_register,
        shape: ArgumentShape::Register,
    },
    ArgumentRule {
        name: "immediate",
        matches: is_immediate,
        shape: ArgumentShape::Immediate,
    },
    ArgumentRule {
        name: "text",
        matches: has_text,
        shape: ArgumentShape::Uncategorized,
    },
];

pub fn classify_argument(argument: &Argument) -> ArgumentShape {
    ARGUMENT_RULES
        .iter()
        .find(|rule| rule.matches(argument))
        .map(|rule| rule.shape)
        .unwrap_or(ArgumentShape::Empty)
}

fn is_memory(argument: &Argument) -> bool {
    argument.flags.memory
}

fn is_register(argument: &Argument) -> bool {
    argument.flags.register && argument.register.is_some()
}

fn is_immediate(argument: &Argument) -> bool {
    argument.flags.immediate
}

fn has_text(argument: &Argument) -> bool {
    !argument.text.trim().is_empty()
}

/// Token type used for a register operand of the given register file
pub fn register_token_type(class: RegisterClass) -> TokenType {
    match class {
        RegisterClass::Fpu => TokenType::FpuRegister,
        RegisterClass::Mmx => TokenType::MmxRegister,
        RegisterClass::Sse => TokenType::SseRegister,
        RegisterClass::General | RegisterClass::Segment | RegisterClass::Control | RegisterClass::Debug => {
            TokenType::GeneralRegister
        }
    }
}

/// Keep the low `size` bytes of `value`
pub(crate) fn mask_value(value: u64, size: u8) -> u64 {
    if size == 0 || size >= 8 {
        value
    } else {
        value & ((1u64 << (u32::from(size) * 8)) - 1)
    }
}

/// Uppercase hex, zero-padded to two digits per byte of `size`
pub(crate) fn hex_padded(value: u64, size: u8) -> String {
    if size == 0 {
        return format!("{:X}", value);
    }
    let width = usize::from(size.min(8)) * 2;
    format!("{:0width$X}", mask_value(value, size), width = width)
}

/// Per-instruction facts the argument emitters need
pub(crate) struct ArgumentContext {
    pub bitness: Bitness,
    /// Immediates are jump/call destinations
    pub has_target: bool,
    /// Show memory segments even when they are the default one
    pub force_segment: bool,
}

impl Tokenizer<'_> {
    /// Append the tokens of one argument, preceded by the right separator.
    /// Sets `hadarg` if anything was emitted.
    pub(crate) fn argument(
        &self,
        tokens: &mut Vec<Token>,
        ctx: &ArgumentContext,
        argument: &Argument,
        hadarg: &mut bool,
    ) {
        let mut operand = Vec::new();
        match classify_argument(argument) {
            ArgumentShape::Memory => self.memory_operand(&mut operand, ctx, argument),
            ArgumentShape::Register => self.register_operand(&mut operand, ctx, argument),
            ArgumentShape::Immediate => self.immediate_operand(&mut operand, ctx, argument),
            ArgumentShape::Uncategorized => {
                operand.push(Token::new(TokenType::Uncategorized, argument.text.trim()));
            }
            ArgumentShape::Empty => {
                log::trace!("skipping empty argument {:?}", argument);
            }
        }
        if operand.is_empty() {
            return;
        }

        if *hadarg {
            tokens.push(Token::new(TokenType::Comma, ","));
            if self.options.argument_spaces {
                tokens.push(Token::new(TokenType::ArgumentSpace, " "));
            }
        } else {
            tokens.push(Token::new(TokenType::Space, " "));
        }
        tokens.append(&mut operand);
        *hadarg = true;
    }

    fn register_operand(&self, out: &mut Vec<Token>, ctx: &ArgumentContext, argument: &Argument) {
        let Some(register) = argument.register else {
            return;
        };
        let text = self.register_text(ctx.bitness, argument.size, register);
        out.push(Token::new(register_token_type(register.class), text));
    }

    fn immediate_operand(&self, out: &mut Vec<Token>, ctx: &ArgumentContext, argument: &Argument) {
        if ctx.has_target {
            let size = ctx.bitness.pointer_size();
            let value = argument.immediate & ctx.bitness.address_mask();
            let text = self.print_value(value, Some(size), true);
            out.push(Token::with_value(TokenType::Address, text, TokenValue { size, value }));
        } else {
            let size = argument.size;
            let value = mask_value(argument.immediate, size);
            out.push(Token::with_value(
                TokenType::Value,
                hex_padded(value, size),
                TokenValue { size, value },
            ));
        }
    }

    fn memory_operand(&self, out: &mut Vec<Token>, ctx: &ArgumentContext, argument: &Argument) {
        let memory = &argument.memory;
        let address_size = ctx.bitness.pointer_size();

        if self.options.memory_sizes {
            if let Some(name) = self.tables.memory_size_name(argument.size) {
                out.push(Token::new(TokenType::MemorySize, self.case(name)));
                out.push(Token::new(TokenType::Space, " "));
            }
        }

        let segment = argument
            .segment
            .filter(|segment| ctx.force_segment || *segment != memory.default_segment());
        if let Some(segment) = segment {
            let name = self.case(self.tables.segment_name(segment));
            out.push(Token::new(TokenType::MemorySegment, format!("{}:", name)));
        }

        let stack = [memory.base, memory.index]
            .iter()
            .flatten()
            .any(Register::is_stack_pointer);
        let brackets = if stack {
            TokenType::MemoryStackBrackets
        } else {
            TokenType::MemoryBrackets
        };
        out.push(Token::new(brackets, "["));

        if let Some(base) = memory.base {
            out.push(Token::new(
                TokenType::MemoryBaseRegister,
                self.register_text(ctx.bitness, address_size, base),
            ));
        }
        if let Some(index) = memory.index {
            if memory.base.is_some() {
                self.memory_operator(out, "+");
            }
            out.push(Token::new(
                TokenType::MemoryIndexRegister,
                self.register_text(ctx.bitness, address_size, index),
            ));
            if memory.scale > 1 {
                out.push(Token::new(TokenType::MemoryOperator, "*"));
                out.push(Token::new(TokenType::MemoryScale, memory.scale.to_string()));
            }
        }

        let displacement = memory.displacement;
        if !memory.has_registers() {
            // absolute address, always shown
            let value = (displacement as u64) & ctx.bitness.address_mask();
            out.push(Token::with_value(
                TokenType::Address,
                self.print_value(value, None, true),
                TokenValue {
                    size: address_size,
                    value,
                },
            ));
        } else if displacement != 0 {
            let operator = if displacement < 0 { "-" } else { "+" };
            self.memory_operator(out, operator);
            out.push(Token::with_value(
                TokenType::Address,
                format!("{:X}", displacement.unsigned_abs()),
                TokenValue {
                    size: address_size,
                    value: displacement as u64,
                },
            ));
        }

        out.push(Token::new(brackets, "]"));
    }

    /// '+' or '-' between memory operand parts
    fn memory_operator(&self, out: &mut Vec<Token>, operator: &str) {
        if self.options.memory_spaces {
            out.push(Token::new(TokenType::MemoryOperatorSpace, " "));
        }
        out.push(Token::new(TokenType::MemoryOperator, operator));
        if self.options.memory_spaces {
            out.push(Token::new(TokenType::MemoryOperatorSpace, " "));
        }
    }

    pub(crate) fn register_text(&self, bitness: Bitness, size: u8, register: Register) -> String {
        match self.tables.register_name(bitness, size, register) {
            Some(name) => self.case(name),
            None => {
                log::debug!("no register name for {:?} (size {}, {:?})", register, size, bitness);
                REGISTER_PLACEHOLDER.to_string()
            }
        }
    }

    /// Address text, optionally resolved through the symbol source:
    /// `<module.label>`, `module.ADDR`, `<label>` or `ADDR`.
    pub(crate) fn print_value(&self, value: u64, size: Option<u8>, resolve: bool) -> String {
        let address = match size {
            Some(size) => hex_padded(value, size),
            None => format!("{:X}", value),
        };
        let Some(symbols) = self.symbols.filter(|_| resolve) else {
            return address;
        };
        match (symbols.module_at(value), symbols.label_at(value)) {
            (Some(module), Some(label)) => format!("<{}.{}>", module, label),
            (Some(module), None) => format!("{}.{}", module, address),
            (None, Some(label)) => format!("<{}>", label),
            (None, None) => address,
        }
    }
}
