//! Dump view state and row rendering.

use super::format::{format_item, printable, unreadable_item};
use super::layout::{ColumnDescriptor, DataKind, DumpMode};
use crate::core::memory::MemorySource;
use crate::core::symbols::SymbolSource;
use crate::disasm::Bitness;
use crate::render::{plain_text, RichTextRun, TokenColor};
use crate::ui::theme::dump;

const COLUMN_GAP: &str = "  ";

/// One rendered dump row
#[derive(Debug, Clone, PartialEq)]
pub struct DumpRow {
    pub address: u64,
    /// Address column run
    pub address_run: RichTextRun,
    /// Runs of each visible column, in layout order
    pub columns: Vec<Vec<RichTextRun>>,
}

impl DumpRow {
    /// All runs of the row with the column gaps in between
    pub fn runs(&self) -> Vec<RichTextRun> {
        let gap = RichTextRun::new(COLUMN_GAP, TokenColor::fg(dump::COMMENT));
        let mut runs = vec![self.address_run.clone()];
        for column in &self.columns {
            runs.push(gap.clone());
            runs.extend(column.iter().cloned());
        }
        runs
    }

    pub fn text(&self) -> String {
        plain_text(&self.runs())
    }

    /// Plain text of a single column
    pub fn column_text(&self, column: usize) -> Option<String> {
        self.columns.get(column).map(|runs| plain_text(runs))
    }
}

/// Scroll position and layout of a memory dump pane
#[derive(Debug, Clone)]
pub struct DumpView {
    mode: DumpMode,
    bitness: Bitness,
    top: u64,
}

impl DumpView {
    pub fn new(bitness: Bitness, mode: DumpMode) -> Self {
        Self { mode, bitness, top: 0 }
    }

    pub fn mode(&self) -> DumpMode {
        self.mode
    }

    /// Switch display mode; the top address stays where it is
    pub fn set_mode(&mut self, mode: DumpMode) {
        log::debug!("dump mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    pub fn bitness(&self) -> Bitness {
        self.bitness
    }

    pub fn top(&self) -> u64 {
        self.top
    }

    pub fn bytes_per_row(&self) -> usize {
        self.mode.bytes_per_row(self.bitness)
    }

    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        self.mode.columns()
    }

    /// Put `address` at the top of the view
    pub fn seek(&mut self, address: u64) {
        self.top = address & self.bitness.address_mask();
    }

    /// Scroll by whole rows, wrapping around the address space
    pub fn scroll(&mut self, rows: i64) {
        let delta = rows.wrapping_mul(self.bytes_per_row() as i64) as u64;
        self.top = self.top.wrapping_add(delta) & self.bitness.address_mask();
    }

    /// Address of the first byte of the given visible row
    pub fn row_address(&self, row: usize) -> u64 {
        let offset = (row as u64).wrapping_mul(self.bytes_per_row() as u64);
        self.top.wrapping_add(offset) & self.bitness.address_mask()
    }

    /// Render `count` rows starting at the top address
    pub fn rows(&self, memory: &dyn MemorySource, symbols: Option<&dyn SymbolSource>, count: usize) -> Vec<DumpRow> {
        (0..count)
            .map(|row| self.row(memory, symbols, self.row_address(row)))
            .collect()
    }

    /// Render the row starting at `address`. Never fails: bytes that can't
    /// be read show as '?'.
    pub fn row(&self, memory: &dyn MemorySource, symbols: Option<&dyn SymbolSource>, address: u64) -> DumpRow {
        let mut buffer = vec![0u8; self.bytes_per_row()];
        let readable = match memory.read(address, &mut buffer) {
            Ok(count) => count,
            Err(err) => {
                log::trace!("dump row {:#x} unreadable: {}", address, err);
                0
            }
        };

        let mut columns = Vec::new();
        for column in self.columns() {
            if column.item_count == 0 {
                continue;
            }
            let runs = if column.is_data {
                self.data_column(&column, &buffer[..readable])
            } else {
                self.comment_column(&buffer[..readable], symbols)
            };
            columns.push(runs);
        }

        DumpRow {
            address,
            address_run: self.address_run(address, symbols),
            columns,
        }
    }

    fn address_run(&self, address: u64, symbols: Option<&dyn SymbolSource>) -> RichTextRun {
        let width = usize::from(self.bitness.pointer_size()) * 2;
        let text = format!("{:0width$X}", address, width = width);
        let labeled = symbols.and_then(|s| s.label_at(address)).is_some();
        let color = if labeled {
            TokenColor::new(dump::LABEL, dump::LABEL_BACKGROUND)
        } else {
            TokenColor::fg(dump::ADDRESS)
        };
        RichTextRun::new(text, color)
    }

    fn data_column(&self, column: &ColumnDescriptor, bytes: &[u8]) -> Vec<RichTextRun> {
        let size = column.kind.item_size(self.bitness);
        let spaced = !matches!(column.kind, DataKind::AsciiByte | DataKind::UnicodeWord);
        let mut runs = Vec::with_capacity(column.item_count * 2);

        for item in 0..column.item_count {
            if item > 0 {
                if spaced {
                    runs.push(spacing(" "));
                }
                if column.separator > 0 && item % column.separator == 0 {
                    runs.push(spacing(" "));
                }
            }
            let start = item * size;
            let run = match bytes.get(start..start + size) {
                Some(item_bytes) => {
                    let text = format_item(column.kind, item_bytes, self.bitness);
                    RichTextRun::new(text, item_color(column.kind, item_bytes))
                }
                None => RichTextRun::new(
                    unreadable_item(column.kind, self.bitness),
                    TokenColor::fg(dump::UNREADABLE),
                ),
            };
            runs.push(run);
        }
        runs
    }

    /// Symbol of the pointer stored at the start of the row
    fn comment_column(&self, bytes: &[u8], symbols: Option<&dyn SymbolSource>) -> Vec<RichTextRun> {
        let size = usize::from(self.bitness.pointer_size());
        let (Some(symbols), Some(raw)) = (symbols, bytes.get(..size)) else {
            return Vec::new();
        };
        let pointer = raw
            .iter()
            .rev()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));

        let text = match (symbols.module_at(pointer), symbols.label_at(pointer)) {
            (Some(module), Some(label)) => format!("{}.{}", module, label),
            (None, Some(label)) => label,
            (Some(module), None) => format!("{}.{:0width$X}", module, pointer, width = size * 2),
            (None, None) => return Vec::new(),
        };
        vec![RichTextRun::new(text, TokenColor::fg(dump::COMMENT))]
    }
}

impl Default for DumpView {
    fn default() -> Self {
        Self::new(Bitness::default(), DumpMode::default())
    }
}

fn spacing(text: &str) -> RichTextRun {
    RichTextRun::new(text, TokenColor::fg(dump::HEX_BYTE))
}

fn item_color(kind: DataKind, bytes: &[u8]) -> TokenColor {
    match kind {
        DataKind::HexByte if bytes[0] == 0 => TokenColor::fg(dump::ZERO_BYTE),
        DataKind::HexByte => TokenColor::fg(dump::HEX_BYTE),
        DataKind::AsciiByte => text_color(char::from(bytes[0])),
        DataKind::UnicodeWord => {
            let unit = u16::from_le_bytes([bytes[0], bytes[1]]);
            text_color(char::from_u32(u32::from(unit)).unwrap_or('\0'))
        }
        _ => TokenColor::fg(dump::NUMBER),
    }
}

fn text_color(c: char) -> TokenColor {
    if printable(c) == c {
        TokenColor::fg(dump::ASCII_PRINTABLE)
    } else {
        TokenColor::fg(dump::ASCII_OTHER)
    }
}
