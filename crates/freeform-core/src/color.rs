#![forbid(unsafe_code)]

//! Surface backgrounds.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Dark translucent fill used behind panels by default.
    pub const PANEL: Self = Self::new(0x24, 0x28, 0x2e, 0xe6);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }

    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// What a surface paints behind its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Background {
    /// Nothing is painted; surfaces below show through.
    Clear,
    Color(Rgba),
}

impl Background {
    /// Whether anything is painted at all.
    #[must_use]
    pub const fn is_clear(self) -> bool {
        match self {
            Self::Clear => true,
            Self::Color(color) => color.is_transparent(),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::Color(Rgba::PANEL)
    }
}

impl From<Rgba> for Background {
    fn from(color: Rgba) -> Self {
        Self::Color(color)
    }
}
