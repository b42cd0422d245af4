//! Theme Module
//!
//! The marketplace ships in three looks (plain, eco, cyber) over one feature
//! set. A `Theme` picks the palette and brand label; nothing else varies.
//!
//! # Usage
//!
//! ```rust
//! use rewear::client::theme::Theme;
//!
//! let theme: Theme = "eco".parse().unwrap();
//! let accent = theme.palette().accent;
//! assert_eq!(theme.brand(), "ReWear Eco");
//! # let _ = accent;
//! ```

pub mod colors;

use std::fmt;
use std::str::FromStr;

use crate::shared::ConfigError;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Semantic colors used by every view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Headings, prices, primary actions
    pub accent: Rgb,
    pub success: Rgb,
    /// Pending states and blocked submissions
    pub warning: Rgb,
    pub error: Rgb,
    /// Secondary text
    pub muted: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Plain,
    Eco,
    Cyber,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Plain, Theme::Eco, Theme::Cyber];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Plain => "plain",
            Theme::Eco => "eco",
            Theme::Cyber => "cyber",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Plain => colors::PLAIN,
            Theme::Eco => colors::ECO,
            Theme::Cyber => colors::CYBER,
        }
    }

    pub fn brand(&self) -> &'static str {
        match self {
            Theme::Plain => "ReWear",
            Theme::Eco => "ReWear Eco",
            Theme::Cyber => "REWEAR//CYBER",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownTheme(s.to_string()))
    }
}
