//! Integration tests for the dump view and the command layer
//!
//! Run with: cargo test --test dump_test

#[cfg(test)]
mod tests {
    use cpuview::app::{execute_command, parse_command, Session};
    use cpuview::core::{MemoryImage, MemorySource, SymbolMap};
    use cpuview::disasm::Bitness;
    use cpuview::dump::{DumpMode, DumpView, IntWidth};

    fn image() -> MemoryImage {
        MemoryImage::new(0x40_0000, (0u8..=0xff).collect())
    }

    #[test]
    fn test_every_mode_renders_full_rows() {
        let memory = image();
        for mode in DumpMode::all() {
            let mut view = DumpView::new(Bitness::Bit64, mode);
            view.seek(0x40_0000);
            let rows = view.rows(&memory, None, 3);
            assert_eq!(rows.len(), 3, "{}", mode);
            assert_eq!(rows[1].address, 0x40_0000 + view.bytes_per_row() as u64, "{}", mode);
            assert!(rows.iter().all(|row| !row.columns.is_empty()), "{}", mode);
        }
    }

    #[test]
    fn test_rows_past_the_end() {
        let memory = image();
        let mut view = DumpView::new(Bitness::Bit32, DumpMode::UnsignedInt(IntWidth::Byte));
        view.seek(0x40_00F8);
        let rows = view.rows(&memory, None, 2);

        let first = rows[0].column_text(0).expect("data column");
        assert!(first.starts_with("248 249 250 251 252 253 254 255 ???"));
        let second = rows[1].column_text(0).expect("data column");
        assert!(second.chars().all(|c| c == '?' || c == ' '));
    }

    #[test]
    fn test_text_mode_row() {
        let memory = MemoryImage::new(0, b"The quick brown fox\n".to_vec());
        let view = DumpView::new(Bitness::Bit64, DumpMode::TextAscii);
        let row = view.row(&memory, None, 0);
        let text = row.column_text(0).expect("text column");
        assert!(text.starts_with("The quick brown fox."));
        assert!(text.ends_with('?'));
    }

    #[test]
    fn test_unicode_row() {
        let bytes: Vec<u8> = "Hi!".encode_utf16().flat_map(u16::to_le_bytes).collect();
        let memory = MemoryImage::new(0x100, bytes);
        let view = DumpView::new(Bitness::Bit64, DumpMode::HexUnicode);
        let row = view.row(&memory, None, 0x100);
        assert!(row.column_text(1).expect("unicode column").starts_with("Hi!?"));
    }

    #[test]
    fn test_write_then_read_through_session() {
        colored::control::set_override(false);
        let mut session = Session::default();
        session.load_image(image());
        session.symbols = SymbolMap::new();

        let mut out = Vec::new();
        for line in ["w 0x400000 deadbeef", "mode x32", "s 0x400000"] {
            execute_command(&mut session, parse_command(line), &mut out).expect("command runs");
        }
        let rows = session.dump_rows(1).expect("image loaded");
        assert!(rows[0].text().contains("EFBEADDE"));

        let mut buffer = [0u8; 4];
        let image = session.image().expect("image loaded");
        assert_eq!(image.read(0x40_0000, &mut buffer), Ok(4));
        assert_eq!(buffer, [0xde, 0xad, 0xbe, 0xef]);
    }
}
