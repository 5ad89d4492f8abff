//! Integration tests for the tokenizer and rich text output
//!
//! Run with: cargo test --test tokenizer_test

#[cfg(test)]
mod tests {
    use cpuview::core::SymbolMap;
    use cpuview::disasm::samples::sample_listing;
    use cpuview::render::{layout_job, plain_text, to_rich_text, ColorTable};
    use cpuview::tokenizer::{tokenize, NameTables, TokenType, Tokenizer, TokenizerOptions};

    const BASE: u64 = 0x1_4000_1000;

    #[test]
    fn test_sample_listing_text() {
        let lines: Vec<String> = sample_listing(BASE)
            .iter()
            .map(|insn| tokenize(insn).to_string())
            .collect();

        assert_eq!(lines[0], "push rbp");
        assert_eq!(lines[1], "mov rbp, rsp");
        assert_eq!(lines[2], "sub rsp, 20");
        assert_eq!(lines[3], "mov rax, qword ptr [rsp+28]");
        assert_eq!(lines[4], "mov ecx, dword ptr [rax+rcx*4]");
        assert_eq!(lines[5], "mov edx, dword ptr [1000]");
        assert_eq!(lines[9], "rep movs byte ptr es:[rdi], byte ptr ds:[rsi]");
        assert_eq!(lines[10], "nop dword ptr [rax+rax]");
        assert_eq!(lines.last().map(String::as_str), Some("ret"));
    }

    #[test]
    fn test_every_line_has_one_mnemonic() {
        for insn in sample_listing(BASE) {
            let tokens = tokenize(&insn);
            let mnemonics = tokens.iter().filter(|t| t.kind().is_mnemonic()).count();
            assert_eq!(mnemonics, 1, "{}", tokens);
            assert!(!tokens.iter().any(|t| t.text().is_empty()), "{}", tokens);
        }
    }

    #[test]
    fn test_mnemonic_kinds() {
        let kinds: Vec<TokenType> = sample_listing(BASE)
            .iter()
            .map(|insn| tokenize(insn).tokens()[0].kind())
            .collect();
        assert_eq!(kinds[0], TokenType::MnemonicPushPop);
        assert_eq!(kinds[7], TokenType::MnemonicCondJump);
        assert_eq!(kinds[8], TokenType::MnemonicCallRet);
        assert_eq!(kinds[9], TokenType::Prefix);
        assert_eq!(kinds[10], TokenType::MnemonicNop);
    }

    #[test]
    fn test_hash_matches_for_identical_listings() {
        let first: Vec<u64> = sample_listing(BASE).iter().map(|i| tokenize(i).hash()).collect();
        let moved: Vec<u64> = sample_listing(BASE).iter().map(|i| tokenize(i).hash()).collect();
        assert_eq!(first, moved);

        // relocated branch targets change the text and so the hash
        let relocated: Vec<u64> = sample_listing(BASE + 0x1000).iter().map(|i| tokenize(i).hash()).collect();
        assert_eq!(first[0], relocated[0]);
        assert_ne!(first[8], relocated[8]);
    }

    #[test]
    fn test_symbols_and_rich_text() {
        let listing = sample_listing(BASE);
        let call = &listing[8];
        let target = call.arguments[0].immediate;

        let mut symbols = SymbolMap::new();
        symbols.add_module("app", BASE & !0xFFFF, 0x10000);
        symbols.add_label(target, "helper");

        let options = TokenizerOptions {
            uppercase: true,
            ..Default::default()
        };
        let tokens = Tokenizer::new(NameTables::shared(), options)
            .with_symbols(&symbols)
            .tokenize(call);
        assert_eq!(tokens.to_string(), "CALL <app.helper>");

        let colors = ColorTable::default();
        let runs = to_rich_text(&tokens, &colors);
        assert_eq!(plain_text(&runs), tokens.to_string());
        assert_eq!(runs[0].color, colors.color(TokenType::MnemonicCallRet).foreground);

        let job = layout_job(&runs, egui::FontId::monospace(12.0));
        assert_eq!(job.text, "CALL <app.helper>");
    }
}
