//! Symbol queries
//!
//! The debugger engine owns labels and the module list; the views only ask
//! "what is at this address". `SymbolMap` is a plain in-memory answer to
//! those questions for the CLI and tests.

use std::collections::BTreeMap;

/// Label and module lookups answered by the debugger engine
pub trait SymbolSource {
    /// Label defined exactly at `address`
    fn label_at(&self, address: u64) -> Option<String>;

    /// Name of the module whose image contains `address`
    fn module_at(&self, address: u64) -> Option<String>;
}

/// A loaded module's address range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRange {
    pub name: String,
    pub base: u64,
    pub size: u64,
}

impl ModuleRange {
    pub fn contains(&self, address: u64) -> bool {
        address >= self.base && address - self.base < self.size
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolMap {
    labels: BTreeMap<u64, String>,
    modules: Vec<ModuleRange>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_label(&mut self, address: u64, name: impl Into<String>) {
        self.labels.insert(address, name.into());
    }

    pub fn add_module(&mut self, name: impl Into<String>, base: u64, size: u64) {
        self.modules.push(ModuleRange {
            name: name.into(),
            base,
            size,
        });
    }

    pub fn labels(&self) -> impl Iterator<Item = (u64, &str)> {
        self.labels.iter().map(|(addr, name)| (*addr, name.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.modules.is_empty()
    }
}

impl SymbolSource for SymbolMap {
    fn label_at(&self, address: u64) -> Option<String> {
        self.labels.get(&address).cloned()
    }

    fn module_at(&self, address: u64) -> Option<String> {
        self.modules
            .iter()
            .find(|module| module.contains(address))
            .map(|module| module.name.clone())
    }
}
