//! cpuview - CPU view front-end
//!
//! Entry point that handles argument parsing, loads an optional memory
//! image and runs either the given commands or the interactive REPL.

use anyhow::Context;
use clap::Parser;

use cpuview::app::Session;
use cpuview::config::{parse_address, ConfigError, Settings};
use cpuview::core::MemoryImage;
use cpuview::disasm::Bitness;
use cpuview::dump::DumpMode;
use cpuview::ui::cli::{run_cli, run_commands};

/// cpuview: instruction tokens and memory dumps in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw memory image to load
    #[arg(short, long)]
    file: Option<String>,

    /// Load address of the image (hex with 0x, or decimal)
    #[arg(short, long, default_value = "0", value_parser = parse_address)]
    base: u64,

    /// Architecture bitness: 16, 32 or 64
    #[arg(long, default_value_t = 64, value_parser = parse_bits)]
    bits: u32,

    /// Dump mode (hex, hexu, text, textu, i8..i64, u8..u64, x16..x64, f32, f64, f80, addr)
    #[arg(short, long, default_value = "hex")]
    mode: DumpMode,

    /// Upper case mnemonics and registers
    #[arg(long, default_value_t = false)]
    uppercase: bool,

    /// Don't print "dword ptr" style size tags
    #[arg(long, default_value_t = false)]
    no_sizes: bool,

    /// Run commands and exit instead of starting the REPL
    #[arg(short, long)]
    command: Vec<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_bits(s: &str) -> Result<u32, ConfigError> {
    let bits: u32 = s.trim().parse().map_err(|_| ConfigError::InvalidBitness(0))?;
    Bitness::from_bits(bits)
        .map(|_| bits)
        .ok_or(ConfigError::InvalidBitness(bits))
}

fn main() -> anyhow::Result<()> {
    // 1. Parse command line arguments
    let args = Args::parse();

    // 2. Initialize logger with verbosity level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }))
    .init();

    log::debug!("Args: {:?}", args);

    // 3. Build the session
    let mut settings = Settings {
        bitness: Bitness::from_bits(args.bits).unwrap_or_default(),
        dump_mode: args.mode,
        ..Default::default()
    };
    settings.tokenizer.uppercase = args.uppercase;
    settings.tokenizer.memory_sizes = !args.no_sizes;

    let mut session = Session::new(settings);
    if let Some(path) = &args.file {
        let image = MemoryImage::from_file(path, args.base).with_context(|| format!("Failed to read {}", path))?;
        session.load_image(image);
    }

    // 4. One-shot commands or the REPL
    if args.command.is_empty() {
        println!("[*] cpuview v{}", env!("CARGO_PKG_VERSION"));
        run_cli(&mut session)?;
    } else {
        run_commands(&mut session, &args.command)?;
    }

    Ok(())
}
