//! Disassembler interface
//!
//! Decoding itself is done by an external engine. This module defines the
//! decoded-instruction record the tokenizer consumes, plus a small decoded
//! sample listing.

pub mod record;
pub mod samples;

pub use record::{
    gpr, Argument, ArgumentFlags, Bitness, DecodedInstruction, InstructionFlags, MemoryOperand, Prefix,
    Register, RegisterClass, Segment,
};
