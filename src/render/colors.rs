//! Token color table.

use std::collections::BTreeMap;

use egui::Color32;

use crate::config::ConfigError;
use crate::tokenizer::TokenType;
use crate::ui::theme::code;

/// Foreground/background pair for one token type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenColor {
    pub foreground: Color32,
    pub background: Color32,
}

impl TokenColor {
    pub const fn new(foreground: Color32, background: Color32) -> Self {
        Self { foreground, background }
    }

    /// Foreground only, transparent background
    pub const fn fg(foreground: Color32) -> Self {
        Self::new(foreground, Color32::TRANSPARENT)
    }
}

/// Token type to color mapping.
///
/// Lookups never fail: types without an entry get the fallback pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    colors: BTreeMap<TokenType, TokenColor>,
    fallback: TokenColor,
}

impl ColorTable {
    /// Empty table; everything renders with the fallback pair
    pub fn new() -> Self {
        Self {
            colors: BTreeMap::new(),
            fallback: TokenColor::fg(code::TEXT_DEFAULT),
        }
    }

    pub fn set_color(&mut self, kind: TokenType, foreground: Color32, background: Color32) {
        self.colors.insert(kind, TokenColor::new(foreground, background));
    }

    /// Set a color from text specs such as `#89b4fa` and `transparent`
    pub fn set_color_spec(&mut self, kind: TokenType, foreground: &str, background: &str) -> Result<(), ConfigError> {
        let foreground = parse_color(foreground)?;
        let background = parse_color(background)?;
        self.set_color(kind, foreground, background);
        Ok(())
    }

    pub fn remove_color(&mut self, kind: TokenType) -> Option<TokenColor> {
        self.colors.remove(&kind)
    }

    pub fn color(&self, kind: TokenType) -> TokenColor {
        self.colors.get(&kind).copied().unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> TokenColor {
        self.fallback
    }

    /// Explicit entries, in token type order
    pub fn iter(&self) -> impl Iterator<Item = (TokenType, TokenColor)> + '_ {
        self.colors.iter().map(|(kind, color)| (*kind, *color))
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        use TokenType::*;

        let mut table = Self::new();
        let transparent = Color32::TRANSPARENT;
        let defaults = [
            (Comma, code::TEXT_DEFAULT, transparent),
            (Space, code::TEXT_DEFAULT, transparent),
            (ArgumentSpace, code::TEXT_DEFAULT, transparent),
            (MemoryOperatorSpace, code::TEXT_DEFAULT, transparent),
            (Prefix, code::PREFIX, transparent),
            (Uncategorized, code::TEXT_DEFAULT, transparent),
            (Address, code::JUMP_TARGET, transparent),
            (Value, code::NUMBER, transparent),
            (MnemonicNormal, code::MNEMONIC_NORMAL, transparent),
            (MnemonicPushPop, code::MNEMONIC_STACK, transparent),
            (MnemonicCallRet, code::MNEMONIC_CALL, transparent),
            (MnemonicCondJump, code::MNEMONIC_COND_JUMP, transparent),
            (MnemonicUncondJump, code::MNEMONIC_JUMP, transparent),
            (MnemonicNop, code::MNEMONIC_NOP, code::NOP_BACKGROUND),
            (MemorySize, code::SIZE, transparent),
            (MemorySegment, code::SEGMENT, transparent),
            (MemoryBrackets, code::OPERATOR, transparent),
            (MemoryStackBrackets, code::OPERATOR, code::STACK_BACKGROUND),
            (MemoryBaseRegister, code::REGISTER, transparent),
            (MemoryIndexRegister, code::REGISTER, transparent),
            (MemoryScale, code::NUMBER, transparent),
            (MemoryOperator, code::OPERATOR, transparent),
            (GeneralRegister, code::REGISTER, transparent),
            (FpuRegister, code::REGISTER_FPU, transparent),
            (MmxRegister, code::REGISTER_MMX, transparent),
            (SseRegister, code::REGISTER_SSE, transparent),
        ];
        for (kind, foreground, background) in defaults {
            table.set_color(kind, foreground, background);
        }
        table
    }
}

/// Parse `#RRGGBB`, `#RRGGBBAA` (unmultiplied alpha) or `transparent`
pub fn parse_color(spec: &str) -> Result<Color32, ConfigError> {
    let trimmed = spec.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("transparent") {
        return Ok(Color32::TRANSPARENT);
    }
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|_| ConfigError::InvalidColor(spec.to_string()))?;
    match bytes.as_slice() {
        [r, g, b] => Ok(Color32::from_rgb(*r, *g, *b)),
        [r, g, b, a] => Ok(Color32::from_rgba_unmultiplied(*r, *g, *b, *a)),
        _ => Err(ConfigError::InvalidColor(spec.to_string())),
    }
}

/// Inverse of `parse_color`
pub fn format_color(color: Color32) -> String {
    if color == Color32::TRANSPARENT {
        return "transparent".to_string();
    }
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{}", hex::encode([r, g, b]))
    } else {
        format!("#{}", hex::encode([r, g, b, a]))
    }
}
