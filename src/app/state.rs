//! Session state
//!
//! Everything the CLI front-end works on: the loaded memory image, labels,
//! the dump view position and the display settings.

use crate::config::Settings;
use crate::core::memory::{MemoryError, MemoryImage, MemorySource};
use crate::core::symbols::{SymbolMap, SymbolSource};
use crate::disasm::DecodedInstruction;
use crate::dump::{DumpRow, DumpView};
use crate::tokenizer::{InstructionTokens, NameTables, Tokenizer};

/// State of one interactive session
pub struct Session {
    pub settings: Settings,
    pub symbols: SymbolMap,
    image: Option<MemoryImage>,
    view: DumpView,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let view = DumpView::new(settings.bitness, settings.dump_mode);
        Self {
            settings,
            symbols: SymbolMap::new(),
            image: None,
            view,
        }
    }

    /// Replace the memory image and move the view to its base
    pub fn load_image(&mut self, image: MemoryImage) {
        log::info!("Loaded {} bytes at {:#x}", image.size(), image.base());
        self.view.seek(image.base());
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&MemoryImage> {
        self.image.as_ref()
    }

    pub fn view(&self) -> &DumpView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut DumpView {
        &mut self.view
    }

    /// Current dump address
    pub fn address(&self) -> u64 {
        self.view.top()
    }

    /// Dump `count` rows from the current address
    pub fn dump_rows(&self, count: usize) -> Result<Vec<DumpRow>, MemoryError> {
        let image = self.image.as_ref().ok_or(MemoryError::NoImage)?;
        Ok(self.view.rows(image, Some(&self.symbols as &dyn SymbolSource), count))
    }

    pub fn write_memory(&mut self, address: u64, bytes: &[u8]) -> Result<usize, MemoryError> {
        let image = self.image.as_mut().ok_or(MemoryError::NoImage)?;
        image.write(address, bytes)
    }

    /// Tokenize with the session's options and labels
    pub fn tokenize(&self, insn: &DecodedInstruction) -> InstructionTokens {
        Tokenizer::new(NameTables::shared(), self.settings.tokenizer)
            .with_symbols(&self.symbols)
            .tokenize(insn)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
