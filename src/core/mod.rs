//! Core module - Debugger engine interfaces
//!
//! The views consume memory and symbol services from the debugger engine.
//! This module defines those narrow interfaces and simple in-memory
//! implementations of them.

pub mod memory;
pub mod symbols;

// Re-export common types
pub use memory::{MemoryError, MemoryImage, MemorySource};
pub use symbols::{SymbolMap, SymbolSource};
