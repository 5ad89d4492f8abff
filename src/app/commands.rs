//! Command processing
//!
//! Command definitions and their execution against a `Session`. The REPL and
//! `--command` both go through here.

use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;

use super::state::Session;
use crate::config::parse_address;
use crate::core::memory::MemoryImage;
use crate::disasm::samples::sample_listing;
use crate::dump::DumpMode;
use crate::render::{ansi_text, format_color, to_rich_text, RichTextRun};
use crate::tokenizer::TokenType;

/// Rows printed by `x` without a count
pub const DEFAULT_DUMP_ROWS: usize = 8;

/// Command parsing result
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCommand {
    /// Load a raw memory image: o <path> [base]
    Open { path: String, base: Option<u64> },
    /// Move the dump view: s <addr>
    Seek(u64),
    /// Dump rows: x [rows]
    Dump(usize),
    /// Show or switch the dump mode: mode [name]
    Mode(Option<DumpMode>),
    /// Patch memory: w <addr> <hex>
    Write { address: u64, bytes: Vec<u8> },
    /// Tokenize the sample listing: pd
    PrintDisasm,
    /// Set a token color: color <type> <fg> [bg]
    Color {
        kind: TokenType,
        foreground: String,
        background: Option<String>,
    },
    /// List the color table: colors
    Colors,
    /// Add a label: label <addr> <name>
    Label { address: u64, name: String },
    /// Help: ? or help
    Help,
    /// Quit: q or exit
    Quit,
    /// Unknown or malformed command
    Unknown(String),
}

/// What the caller should do after a command ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse a command string into a structured command
pub fn parse_command(input: &str) -> ParsedCommand {
    let input = input.trim();
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("");
    let args: Vec<&str> = parts.collect();
    let unknown = || ParsedCommand::Unknown(input.to_string());

    match cmd {
        "o" | "open" | "load" => match args.as_slice() {
            [path] => ParsedCommand::Open {
                path: path.to_string(),
                base: None,
            },
            [path, base] => match parse_address(base) {
                Ok(base) => ParsedCommand::Open {
                    path: path.to_string(),
                    base: Some(base),
                },
                Err(_) => unknown(),
            },
            _ => unknown(),
        },
        "s" | "seek" => match args.as_slice() {
            [addr] => parse_address(addr).map(ParsedCommand::Seek).unwrap_or_else(|_| unknown()),
            _ => unknown(),
        },
        "x" => match args.as_slice() {
            [] => ParsedCommand::Dump(DEFAULT_DUMP_ROWS),
            [rows] => rows.parse().map(ParsedCommand::Dump).unwrap_or_else(|_| unknown()),
            _ => unknown(),
        },
        "mode" => match args.as_slice() {
            [] => ParsedCommand::Mode(None),
            [name] => name
                .parse()
                .map(|mode| ParsedCommand::Mode(Some(mode)))
                .unwrap_or_else(|_| unknown()),
            _ => unknown(),
        },
        "w" => match args.as_slice() {
            [addr, data] => match (parse_address(addr), hex::decode(data)) {
                (Ok(address), Ok(bytes)) if !bytes.is_empty() => ParsedCommand::Write { address, bytes },
                _ => unknown(),
            },
            _ => unknown(),
        },
        "pd" => ParsedCommand::PrintDisasm,
        "color" => match args.as_slice() {
            [kind, fg, rest @ ..] if rest.len() <= 1 => match kind.parse() {
                Ok(kind) => ParsedCommand::Color {
                    kind,
                    foreground: fg.to_string(),
                    background: rest.first().map(|bg| bg.to_string()),
                },
                Err(_) => unknown(),
            },
            _ => unknown(),
        },
        "colors" => ParsedCommand::Colors,
        "label" => match args.as_slice() {
            [addr, name] => match parse_address(addr) {
                Ok(address) => ParsedCommand::Label {
                    address,
                    name: name.to_string(),
                },
                Err(_) => unknown(),
            },
            _ => unknown(),
        },
        "?" | "help" => ParsedCommand::Help,
        "q" | "quit" | "exit" => ParsedCommand::Quit,
        _ => unknown(),
    }
}

/// Execute a parsed command, writing its output to `out`
pub fn execute_command(session: &mut Session, cmd: ParsedCommand, out: &mut dyn Write) -> Result<Flow> {
    match cmd {
        ParsedCommand::Open { path, base } => {
            let base = base.unwrap_or(0);
            let image = MemoryImage::from_file(&path, base).with_context(|| format!("Failed to read {}", path))?;
            writeln!(out, "[*] Loaded {} ({} bytes) at {:#x}", path, image.size(), base)?;
            session.load_image(image);
        }
        ParsedCommand::Seek(address) => {
            session.view_mut().seek(address);
            writeln!(out, "[*] Seeking to {:#x}", session.address())?;
        }
        ParsedCommand::Dump(rows) => {
            for row in session.dump_rows(rows)? {
                writeln!(out, "{}", ansi_text(&row.runs()))?;
            }
            session.view_mut().scroll(rows as i64);
        }
        ParsedCommand::Mode(None) => {
            let names: Vec<String> = DumpMode::all().into_iter().map(|mode| mode.name()).collect();
            writeln!(out, "[*] Dump mode: {}", session.view().mode().to_string().green())?;
            writeln!(out, "    Available: {}", names.join(" "))?;
        }
        ParsedCommand::Mode(Some(mode)) => {
            session.view_mut().set_mode(mode);
            session.settings.dump_mode = mode;
            writeln!(out, "[*] Dump mode: {}", mode.to_string().green())?;
        }
        ParsedCommand::Write { address, bytes } => {
            let written = session.write_memory(address, &bytes)?;
            writeln!(out, "[*] Wrote {} bytes at {:#x}", written, address)?;
        }
        ParsedCommand::PrintDisasm => {
            let base = session.image().map(|image| image.base()).unwrap_or(0x1_4000_1000);
            for insn in sample_listing(base) {
                let tokens = session.tokenize(&insn);
                let runs = to_rich_text(&tokens, &session.settings.colors);
                writeln!(
                    out,
                    "{:016X}  {:<24}{}",
                    insn.address,
                    hex::encode_upper(&insn.bytes),
                    ansi_text(&runs)
                )?;
            }
        }
        ParsedCommand::Color {
            kind,
            foreground,
            background,
        } => {
            let background = background.as_deref().unwrap_or("transparent");
            session
                .settings
                .colors
                .set_color_spec(kind, &foreground, background)?;
            writeln!(out, "[*] {} set", kind)?;
        }
        ParsedCommand::Colors => {
            for kind in TokenType::ALL {
                let color = session.settings.colors.color(kind);
                let sample = RichTextRun::new(kind.name(), color);
                writeln!(
                    out,
                    "  {:<28} {:<12} {:<12}",
                    ansi_text(&[sample]),
                    format_color(color.foreground),
                    format_color(color.background)
                )?;
            }
        }
        ParsedCommand::Label { address, name } => {
            writeln!(out, "[*] Label {} at {:#x}", name, address)?;
            session.symbols.add_label(address, name);
        }
        ParsedCommand::Help => print_help(out)?,
        ParsedCommand::Quit => return Ok(Flow::Quit),
        ParsedCommand::Unknown(input) => {
            writeln!(out, "{} Unknown command: '{}'", "[!]".red(), input)?;
            writeln!(out, "    Type '?' for help")?;
        }
    }
    Ok(Flow::Continue)
}

/// Print the help message
pub fn print_help(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", "cpuview commands".bold().cyan())?;
    writeln!(out, "{}", "═".repeat(50).cyan())?;

    writeln!(out, "\n{}", "Memory:".bold().yellow())?;
    writeln!(out, "  {}  Open a raw memory image", "o <path> [base]".green())?;
    writeln!(out, "  {}         Seek to address", "s <addr>".green())?;
    writeln!(out, "  {}         Dump rows and advance", "x [rows]".green())?;
    writeln!(out, "  {}      Show or set the dump mode", "mode [name]".green())?;
    writeln!(out, "  {}   Write hex bytes", "w <addr> <hex>".green())?;

    writeln!(out, "\n{}", "Disassembly:".bold().yellow())?;
    writeln!(out, "  {}               Tokenize the sample listing", "pd".green())?;
    writeln!(out, "  {} Add a label", "label <addr> <name>".green())?;

    writeln!(out, "\n{}", "Colors:".bold().yellow())?;
    writeln!(out, "  {}  Set a token color", "color <type> <fg> [bg]".green())?;
    writeln!(out, "  {}           Show the color table", "colors".green())?;

    writeln!(out, "\n{}", "Other:".bold().yellow())?;
    writeln!(out, "  {}                Show this help", "?".green())?;
    writeln!(out, "  {}                Quit", "q".green())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::IntWidth;

    fn run(session: &mut Session, line: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        execute_command(session, parse_command(line), &mut out).expect("command runs");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("s 0x401000"), ParsedCommand::Seek(0x401000));
        assert_eq!(parse_command("x"), ParsedCommand::Dump(DEFAULT_DUMP_ROWS));
        assert_eq!(parse_command("x 3"), ParsedCommand::Dump(3));
        assert_eq!(
            parse_command("mode i16"),
            ParsedCommand::Mode(Some(DumpMode::SignedInt(IntWidth::Word)))
        );
        assert_eq!(
            parse_command("w 0x10 9090"),
            ParsedCommand::Write {
                address: 0x10,
                bytes: vec![0x90, 0x90]
            }
        );
        assert_eq!(
            parse_command("color MnemonicNop #ff0000"),
            ParsedCommand::Color {
                kind: TokenType::MnemonicNop,
                foreground: "#ff0000".into(),
                background: None
            }
        );
        assert_eq!(
            parse_command("o dump.bin 0x1000"),
            ParsedCommand::Open {
                path: "dump.bin".into(),
                base: Some(0x1000)
            }
        );
        assert_eq!(parse_command("q"), ParsedCommand::Quit);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_command("s"), ParsedCommand::Unknown(_)));
        assert!(matches!(parse_command("w 0x10 zz"), ParsedCommand::Unknown(_)));
        assert!(matches!(parse_command("mode nope"), ParsedCommand::Unknown(_)));
        assert!(matches!(parse_command("color Bogus #000000"), ParsedCommand::Unknown(_)));
        assert!(matches!(parse_command("frobnicate"), ParsedCommand::Unknown(_)));
    }

    #[test]
    fn test_dump_and_write() {
        let mut session = Session::default();
        session.load_image(MemoryImage::new(0x1000, vec![0; 32]));

        run(&mut session, "w 0x1000 41424344");
        let output = run(&mut session, "x 1");
        assert!(output.starts_with("0000000000001000  41 42 43 44  00 00"));
        assert!(output.contains("ABCD............"));
        assert_eq!(session.address(), 0x1010);
    }

    #[test]
    fn test_dump_without_image_fails() {
        let mut session = Session::default();
        let mut out = Vec::new();
        assert!(execute_command(&mut session, ParsedCommand::Dump(1), &mut out).is_err());
    }

    #[test]
    fn test_disasm_uses_labels() {
        let mut session = Session::default();
        let listing = sample_listing(0x1_4000_1000);
        let call = listing
            .iter()
            .find(|insn| insn.mnemonic == "call")
            .expect("sample has a call");
        let target = call.arguments[0].immediate;

        run(&mut session, &format!("label {:#x} helper", target));
        let output = run(&mut session, "pd");
        assert!(output.contains("call <helper>"));
        assert!(output.contains("push rbp"));
    }

    #[test]
    fn test_color_command() {
        let mut session = Session::default();
        run(&mut session, "color Value #010203");
        assert_eq!(
            session.settings.colors.color(TokenType::Value).foreground,
            egui::Color32::from_rgb(1, 2, 3)
        );

        let mut out = Vec::new();
        let bad = execute_command(
            &mut session,
            parse_command("color Value #zz0000"),
            &mut out,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_quit() {
        let mut session = Session::default();
        let mut out = Vec::new();
        assert_eq!(
            execute_command(&mut session, ParsedCommand::Quit, &mut out).expect("quit"),
            Flow::Quit
        );
    }
}
