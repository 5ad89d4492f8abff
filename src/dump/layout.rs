//! Dump view modes and their column layouts.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::disasm::Bitness;

/// Width of an integer item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    Byte = 1,
    Word = 2,
    Dword = 4,
    Qword = 8,
}

impl IntWidth {
    pub fn bytes(self) -> usize {
        self as usize
    }

    fn suffix(self) -> &'static str {
        match self {
            IntWidth::Byte => "8",
            IntWidth::Word => "16",
            IntWidth::Dword => "32",
            IntWidth::Qword => "64",
        }
    }
}

/// How one item of a data column is decoded and printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    HexByte,
    AsciiByte,
    /// UTF-16LE code unit
    UnicodeWord,
    SignedDec(IntWidth),
    UnsignedDec(IntWidth),
    Hex(IntWidth),
    Float32,
    Float64,
    /// x87 80-bit extended precision
    Float80,
    /// Pointer-sized hex value
    Pointer,
}

impl DataKind {
    /// Bytes consumed by one item
    pub fn item_size(self, bitness: Bitness) -> usize {
        match self {
            DataKind::HexByte | DataKind::AsciiByte => 1,
            DataKind::UnicodeWord => 2,
            DataKind::SignedDec(width) | DataKind::UnsignedDec(width) | DataKind::Hex(width) => width.bytes(),
            DataKind::Float32 => 4,
            DataKind::Float64 => 8,
            DataKind::Float80 => 10,
            DataKind::Pointer => usize::from(bitness.pointer_size()),
        }
    }
}

/// One column of a dump row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub title: &'static str,
    pub kind: DataKind,
    /// Items per row; 0 hides the column
    pub item_count: usize,
    /// Extra space after every `separator` items, 0 for none
    pub separator: usize,
    /// Data columns show memory; the other kind shows comments about it
    pub is_data: bool,
}

impl ColumnDescriptor {
    const fn data(title: &'static str, kind: DataKind, item_count: usize, separator: usize) -> Self {
        Self {
            title,
            kind,
            item_count,
            separator,
            is_data: true,
        }
    }

    const fn comments(item_count: usize) -> Self {
        Self {
            title: "Comments",
            kind: DataKind::AsciiByte,
            item_count,
            separator: 0,
            is_data: false,
        }
    }

    /// Bytes of memory this column covers per row
    pub fn byte_span(&self, bitness: Bitness) -> usize {
        if self.is_data {
            self.item_count * self.kind.item_size(bitness)
        } else {
            0
        }
    }
}

/// Dump display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DumpMode {
    #[default]
    HexAscii,
    HexUnicode,
    TextAscii,
    TextUnicode,
    SignedInt(IntWidth),
    UnsignedInt(IntWidth),
    HexInt(IntWidth),
    Float,
    Double,
    LongDouble,
    Address,
}

const INT_WIDTHS: [IntWidth; 4] = [IntWidth::Byte, IntWidth::Word, IntWidth::Dword, IntWidth::Qword];

impl DumpMode {
    pub fn all() -> Vec<DumpMode> {
        let mut modes = vec![
            DumpMode::HexAscii,
            DumpMode::HexUnicode,
            DumpMode::TextAscii,
            DumpMode::TextUnicode,
        ];
        modes.extend(INT_WIDTHS.iter().map(|w| DumpMode::SignedInt(*w)));
        modes.extend(INT_WIDTHS.iter().map(|w| DumpMode::UnsignedInt(*w)));
        modes.extend(INT_WIDTHS[1..].iter().map(|w| DumpMode::HexInt(*w)));
        modes.extend([DumpMode::Float, DumpMode::Double, DumpMode::LongDouble, DumpMode::Address]);
        modes
    }

    /// Short name used on the command line
    pub fn name(self) -> String {
        match self {
            DumpMode::HexAscii => "hex".into(),
            DumpMode::HexUnicode => "hexu".into(),
            DumpMode::TextAscii => "text".into(),
            DumpMode::TextUnicode => "textu".into(),
            DumpMode::SignedInt(width) => format!("i{}", width.suffix()),
            DumpMode::UnsignedInt(width) => format!("u{}", width.suffix()),
            DumpMode::HexInt(width) => format!("x{}", width.suffix()),
            DumpMode::Float => "f32".into(),
            DumpMode::Double => "f64".into(),
            DumpMode::LongDouble => "f80".into(),
            DumpMode::Address => "addr".into(),
        }
    }

    /// Column layout of this mode
    pub fn columns(self) -> Vec<ColumnDescriptor> {
        use DataKind::*;

        let integer = |title, kind: fn(IntWidth) -> DataKind, width: IntWidth| {
            let count = 16 / width.bytes();
            vec![ColumnDescriptor::data(title, kind(width), count, 0), ColumnDescriptor::comments(0)]
        };

        match self {
            DumpMode::HexAscii => vec![
                ColumnDescriptor::data("Hex", HexByte, 16, 4),
                ColumnDescriptor::data("ASCII", AsciiByte, 16, 0),
                ColumnDescriptor::comments(0),
            ],
            DumpMode::HexUnicode => vec![
                ColumnDescriptor::data("Hex", HexByte, 16, 4),
                ColumnDescriptor::data("UNICODE", UnicodeWord, 8, 0),
                ColumnDescriptor::comments(0),
            ],
            DumpMode::TextAscii => vec![
                ColumnDescriptor::data("ASCII", AsciiByte, 64, 0),
                ColumnDescriptor::comments(0),
            ],
            DumpMode::TextUnicode => vec![
                ColumnDescriptor::data("UNICODE", UnicodeWord, 64, 0),
                ColumnDescriptor::comments(0),
            ],
            DumpMode::SignedInt(width) => integer("Signed", SignedDec, width),
            DumpMode::UnsignedInt(width) => integer("Unsigned", UnsignedDec, width),
            DumpMode::HexInt(width) => integer("Hex", Hex, width),
            DumpMode::Float => vec![
                ColumnDescriptor::data("Float (32-bit)", Float32, 4, 0),
                ColumnDescriptor::comments(0),
            ],
            DumpMode::Double => vec![
                ColumnDescriptor::data("Double (64-bit)", Float64, 2, 0),
                ColumnDescriptor::comments(0),
            ],
            DumpMode::LongDouble => vec![
                ColumnDescriptor::data("Long double (80-bit)", Float80, 2, 0),
                ColumnDescriptor::comments(0),
            ],
            DumpMode::Address => vec![
                ColumnDescriptor::data("Address", Pointer, 1, 0),
                ColumnDescriptor::comments(1),
            ],
        }
    }

    /// Memory covered by one row: the widest data column
    pub fn bytes_per_row(self, bitness: Bitness) -> usize {
        self.columns()
            .iter()
            .map(|column| column.byte_span(bitness))
            .max()
            .unwrap_or(16)
            .max(1)
    }
}

impl fmt::Display for DumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for DumpMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DumpMode::all()
            .into_iter()
            .find(|mode| mode.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownDumpMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_row() {
        let b64 = Bitness::Bit64;
        assert_eq!(DumpMode::HexAscii.bytes_per_row(b64), 16);
        assert_eq!(DumpMode::HexUnicode.bytes_per_row(b64), 16);
        assert_eq!(DumpMode::TextAscii.bytes_per_row(b64), 64);
        assert_eq!(DumpMode::TextUnicode.bytes_per_row(b64), 128);
        assert_eq!(DumpMode::SignedInt(IntWidth::Word).bytes_per_row(b64), 16);
        assert_eq!(DumpMode::LongDouble.bytes_per_row(b64), 20);
        assert_eq!(DumpMode::Address.bytes_per_row(b64), 8);
        assert_eq!(DumpMode::Address.bytes_per_row(Bitness::Bit32), 4);
    }

    #[test]
    fn test_names_round_trip() {
        for mode in DumpMode::all() {
            assert_eq!(mode.name().parse::<DumpMode>(), Ok(mode));
        }
        assert!("x8".parse::<DumpMode>().is_err());
        assert_eq!("I32".parse::<DumpMode>(), Ok(DumpMode::SignedInt(IntWidth::Dword)));
    }
}
