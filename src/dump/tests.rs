use super::*;
use crate::core::memory::MemoryImage;
use crate::core::symbols::SymbolMap;
use crate::disasm::Bitness;
use crate::ui::theme::dump;

fn image() -> MemoryImage {
    let mut data: Vec<u8> = b"Hello, dump!\0\0\x01\x02".to_vec();
    data.extend_from_slice(&0x1000u64.to_le_bytes());
    data.extend_from_slice(&0x2000u64.to_le_bytes());
    MemoryImage::new(0x1000, data)
}

#[test]
fn test_hex_ascii_row() {
    let view = {
        let mut view = DumpView::new(Bitness::Bit64, DumpMode::HexAscii);
        view.seek(0x1000);
        view
    };
    let rows = view.rows(&image(), None, 1);
    let row = &rows[0];

    assert_eq!(row.address, 0x1000);
    assert_eq!(row.address_run.text, "0000000000001000");
    assert_eq!(
        row.column_text(0).as_deref(),
        Some("48 65 6C 6C  6F 2C 20 64  75 6D 70 21  00 00 01 02")
    );
    assert_eq!(row.column_text(1).as_deref(), Some("Hello, dump!...."));
    assert_eq!(row.columns.len(), 2);
}

#[test]
fn test_zero_bytes_are_muted() {
    let mut view = DumpView::new(Bitness::Bit64, DumpMode::HexAscii);
    view.seek(0x1000);
    let row = view.row(&image(), None, 0x1000);

    let zero = row.columns[0].iter().find(|run| run.text == "00").expect("zero byte run");
    assert_eq!(zero.color, dump::ZERO_BYTE);
    let nonzero = row.columns[0].iter().find(|run| run.text == "48").expect("byte run");
    assert_eq!(nonzero.color, dump::HEX_BYTE);

    let dot = row.columns[1].iter().find(|run| run.text == ".").expect("dot run");
    assert_eq!(dot.color, dump::ASCII_OTHER);
}

#[test]
fn test_unreadable_tail() {
    let view = DumpView::new(Bitness::Bit64, DumpMode::HexAscii);
    let row = view.row(&image(), None, 0x1020);

    let hex = row.column_text(0).expect("hex column");
    assert!(hex.starts_with("?? ?? ?? ??"));
    assert_eq!(row.column_text(1).as_deref(), Some("????????????????"));

    // half readable
    let row = view.row(&image(), None, 0x1018);
    let hex = row.column_text(0).expect("hex column");
    assert!(hex.starts_with("00 20 00 00"));
    assert!(hex.ends_with("?? ?? ?? ??"));
}

#[test]
fn test_integer_modes() {
    let memory = MemoryImage::new(0, vec![0xff, 0xff, 0x01, 0x00]);
    let mut view = DumpView::new(Bitness::Bit32, DumpMode::SignedInt(IntWidth::Word));
    let row = view.row(&memory, None, 0);
    let text = row.column_text(0).expect("data column");
    assert!(text.starts_with("    -1      1"));

    view.set_mode(DumpMode::UnsignedInt(IntWidth::Word));
    let row = view.row(&memory, None, 0);
    assert!(row.column_text(0).expect("data column").starts_with("65535     1"));

    view.set_mode(DumpMode::HexInt(IntWidth::Dword));
    let row = view.row(&memory, None, 0);
    assert!(row.column_text(0).expect("data column").starts_with("0001FFFF ????????"));
}

#[test]
fn test_address_mode_comments() {
    let mut symbols = SymbolMap::new();
    symbols.add_module("app", 0x1000, 0x100);
    symbols.add_label(0x1000, "start");

    let view = DumpView::new(Bitness::Bit64, DumpMode::Address);
    let row = view.row(&image(), Some(&symbols), 0x1010);
    assert_eq!(row.column_text(0).as_deref(), Some("0000000000001000"));
    assert_eq!(row.column_text(1).as_deref(), Some("app.start"));

    let row = view.row(&image(), Some(&symbols), 0x1018);
    assert_eq!(row.column_text(1).as_deref(), Some(""));

    // label at the row address colors the address column
    let row = view.row(&image(), Some(&symbols), 0x1000);
    assert_eq!(row.address_run.color, dump::LABEL);
    assert_eq!(row.address_run.background, dump::LABEL_BACKGROUND);
}

#[test]
fn test_scroll_wraps() {
    let mut view = DumpView::new(Bitness::Bit32, DumpMode::HexAscii);
    view.seek(0x10);
    view.scroll(-2);
    assert_eq!(view.top(), 0xFFFF_FFF0);
    view.scroll(1);
    assert_eq!(view.top(), 0);

    view.seek(0x1_0000_0020);
    assert_eq!(view.top(), 0x20);

    let mut view = DumpView::new(Bitness::Bit64, DumpMode::TextAscii);
    view.seek(u64::MAX - 0x3f);
    assert_eq!(view.row_address(1), 0);
}

#[test]
fn test_float_row() {
    let mut data = 1.5f64.to_le_bytes().to_vec();
    data.extend_from_slice(&f64::INFINITY.to_le_bytes());
    let memory = MemoryImage::new(0x2000, data);

    let view = DumpView::new(Bitness::Bit64, DumpMode::Double);
    let row = view.row(&memory, None, 0x2000);
    let text = row.column_text(0).expect("data column");
    let values: Vec<_> = text.split_whitespace().collect();
    assert_eq!(values, ["1.5", "inf"]);
}
