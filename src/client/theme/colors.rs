//! Color Palettes
//!
//! One palette per visual variant. The feature set is identical across
//! variants; only these values differ.

use super::{Palette, Rgb};

/// Neutral greens on white
pub const PLAIN: Palette = Palette {
    accent: Rgb(0x16, 0xA3, 0x4A),
    success: Rgb(0x15, 0x80, 0x3D),
    warning: Rgb(0xCA, 0x8A, 0x04),
    error: Rgb(0xDC, 0x26, 0x26),
    muted: Rgb(0x6B, 0x72, 0x80),
};

/// Earthy moss and clay
pub const ECO: Palette = Palette {
    accent: Rgb(0x4D, 0x7C, 0x0F),
    success: Rgb(0x65, 0xA3, 0x0D),
    warning: Rgb(0xB4, 0x53, 0x09),
    error: Rgb(0x9F, 0x12, 0x39),
    muted: Rgb(0x78, 0x71, 0x6C),
};

/// Neon on dark
pub const CYBER: Palette = Palette {
    accent: Rgb(0x22, 0xD3, 0xEE),
    success: Rgb(0x39, 0xFF, 0x14),
    warning: Rgb(0xFA, 0xCC, 0x15),
    error: Rgb(0xFF, 0x2E, 0x88),
    muted: Rgb(0x94, 0xA3, 0xB8),
};
