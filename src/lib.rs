//! cpuview - CPU view core for a debugger front-end
//!
//! Tokenizes decoded x86/x64 instructions into typed, colorable tokens,
//! renders them as rich text and formats memory dump rows.
//!
//! ```
//! use cpuview::disasm::{gpr, Argument, Bitness, DecodedInstruction, Register};
//! use cpuview::tokenizer::tokenize;
//!
//! let insn = DecodedInstruction::new(0x401000, Bitness::Bit32, "mov")
//!     .with_argument(Argument::register(Register::gpr(gpr::AX), 4))
//!     .with_argument(Argument::register(Register::gpr(gpr::CX), 4));
//! assert_eq!(tokenize(&insn).to_string(), "mov eax, ecx");
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod disasm;
pub mod dump;
pub mod render;
pub mod tokenizer;
pub mod ui;
