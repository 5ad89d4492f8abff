//! Rich text rendering
//!
//! Converts token sequences into colored text runs, and runs into whatever
//! the painting surface wants: an egui `LayoutJob`, ANSI text or plain text.

pub mod colors;

pub use colors::{format_color, parse_color, ColorTable, TokenColor};

use colored::Colorize;
use egui::text::LayoutJob;
use egui::{Color32, FontId, TextFormat};

use crate::tokenizer::InstructionTokens;

/// A contiguous span of text with a single style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichTextRun {
    pub text: String,
    pub color: Color32,
    pub background: Color32,
}

impl RichTextRun {
    pub fn new(text: impl Into<String>, color: TokenColor) -> Self {
        Self {
            text: text.into(),
            color: color.foreground,
            background: color.background,
        }
    }
}

/// One run per token, in token order, colored by token type
pub fn to_rich_text(tokens: &InstructionTokens, colors: &ColorTable) -> Vec<RichTextRun> {
    tokens
        .iter()
        .map(|token| RichTextRun::new(token.text(), colors.color(token.kind())))
        .collect()
}

/// Concatenated text of all runs (clipboard copy)
pub fn plain_text(runs: &[RichTextRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}

/// Lay the runs out as a single egui text job
pub fn layout_job(runs: &[RichTextRun], font_id: FontId) -> LayoutJob {
    let mut job = LayoutJob::default();
    for run in runs {
        job.append(
            &run.text,
            0.0,
            TextFormat {
                font_id: font_id.clone(),
                color: run.color,
                background: run.background,
                ..Default::default()
            },
        );
    }
    job
}

/// 24-bit ANSI colored text for terminals
pub fn ansi_text(runs: &[RichTextRun]) -> String {
    let mut output = String::new();
    for run in runs {
        let mut text = run.text.truecolor(run.color.r(), run.color.g(), run.color.b());
        if run.background.a() > 0 {
            text = text.on_truecolor(run.background.r(), run.background.g(), run.background.b());
        }
        output.push_str(&text.to_string());
    }
    output
}
