//! Catppuccin-inspired palette for the CPU views.
//!
//! Provides the default token colors and dump view colors.

use egui::Color32;

/// Catppuccin Mocha palette
pub mod catppuccin {
    use super::Color32;

    // Base colors
    pub const MANTLE: Color32 = Color32::from_rgb(24, 24, 37); // #181825
    pub const SURFACE0: Color32 = Color32::from_rgb(49, 50, 68); // #313244
    pub const SURFACE1: Color32 = Color32::from_rgb(69, 71, 90); // #45475a

    // Text colors
    pub const TEXT: Color32 = Color32::from_rgb(205, 214, 244); // #cdd6f4
    pub const SUBTEXT1: Color32 = Color32::from_rgb(186, 194, 222); // #bac2de
    pub const SUBTEXT0: Color32 = Color32::from_rgb(166, 173, 200); // #a6adc8
    pub const OVERLAY2: Color32 = Color32::from_rgb(147, 153, 178); // #9399b2
    pub const OVERLAY1: Color32 = Color32::from_rgb(127, 132, 156); // #7f849c
    pub const OVERLAY0: Color32 = Color32::from_rgb(108, 112, 134); // #6c7086

    // Accent colors
    pub const ROSEWATER: Color32 = Color32::from_rgb(245, 224, 220); // #f5e0dc
    pub const PINK: Color32 = Color32::from_rgb(245, 194, 231); // #f5c2e7
    pub const MAUVE: Color32 = Color32::from_rgb(203, 166, 247); // #cba6f7
    pub const RED: Color32 = Color32::from_rgb(243, 139, 168); // #f38ba8
    pub const MAROON: Color32 = Color32::from_rgb(235, 160, 172); // #eba0ac
    pub const PEACH: Color32 = Color32::from_rgb(250, 179, 135); // #fab387
    pub const YELLOW: Color32 = Color32::from_rgb(249, 226, 175); // #f9e2af
    pub const GREEN: Color32 = Color32::from_rgb(166, 227, 161); // #a6e3a1
    pub const TEAL: Color32 = Color32::from_rgb(148, 226, 213); // #94e2d5
    pub const SKY: Color32 = Color32::from_rgb(137, 220, 235); // #89dceb
    pub const SAPPHIRE: Color32 = Color32::from_rgb(116, 199, 236); // #74c7ec
    pub const BLUE: Color32 = Color32::from_rgb(137, 180, 250); // #89b4fa
    pub const LAVENDER: Color32 = Color32::from_rgb(180, 190, 254); // #b4befe
}

/// Semantic colors for instruction highlighting
pub mod code {
    use super::catppuccin::*;
    use super::Color32;

    pub const TEXT_DEFAULT: Color32 = TEXT;
    pub const NUMBER: Color32 = PEACH;
    pub const OPERATOR: Color32 = SKY;
    pub const SIZE: Color32 = YELLOW;
    pub const SEGMENT: Color32 = ROSEWATER;
    pub const REGISTER: Color32 = RED;
    pub const REGISTER_FPU: Color32 = MAROON;
    pub const REGISTER_MMX: Color32 = PINK;
    pub const REGISTER_SSE: Color32 = MAUVE;
    pub const JUMP_TARGET: Color32 = SAPPHIRE;
    pub const PREFIX: Color32 = TEAL;
    pub const MNEMONIC_NORMAL: Color32 = BLUE; // mov, add, etc.
    pub const MNEMONIC_STACK: Color32 = LAVENDER; // push, pop
    pub const MNEMONIC_CALL: Color32 = RED; // call, ret
    pub const MNEMONIC_COND_JUMP: Color32 = YELLOW;
    pub const MNEMONIC_JUMP: Color32 = PEACH;
    pub const MNEMONIC_NOP: Color32 = OVERLAY0;
    pub const STACK_BACKGROUND: Color32 = SURFACE0;
    pub const NOP_BACKGROUND: Color32 = MANTLE;
}

/// Dump view colors
pub mod dump {
    use super::catppuccin::*;
    use super::Color32;

    pub const ADDRESS: Color32 = OVERLAY1;
    pub const LABEL: Color32 = LAVENDER;
    pub const LABEL_BACKGROUND: Color32 = SURFACE1;
    pub const HEX_BYTE: Color32 = SUBTEXT0;
    pub const ZERO_BYTE: Color32 = OVERLAY0;
    pub const ASCII_PRINTABLE: Color32 = GREEN;
    pub const ASCII_OTHER: Color32 = OVERLAY0;
    pub const NUMBER: Color32 = PEACH;
    pub const COMMENT: Color32 = SUBTEXT1;
    pub const UNREADABLE: Color32 = OVERLAY2;
}
