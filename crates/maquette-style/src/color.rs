#![forbid(unsafe_code)]

//! Color parsing.
//!
//! Color-valued properties carry hex expressions; the compiler parses
//! them into [`Rgba`]. Anything unparsable is treated as "field absent"
//! by the caller, never as an error.

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color expression.
    ///
    /// Accepted grammars (leading `#` optional):
    /// - `#RGB` — shorthand, each nibble doubled
    /// - `#RRGGBB` — opaque
    /// - `#AARRGGBB` — alpha first
    ///
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let hex = input.trim().strip_prefix('#').unwrap_or(input.trim());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let mut nibbles = hex.chars().map(|c| c.to_digit(16).unwrap_or(0) as u8);
                let r = nibbles.next()?;
                let g = nibbles.next()?;
                let b = nibbles.next()?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                Some(Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8))
            }
            8 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                Some(Self::new(
                    (v >> 16) as u8,
                    (v >> 8) as u8,
                    v as u8,
                    (v >> 24) as u8,
                ))
            }
            _ => None,
        }
    }

    /// Whether the color is fully opaque.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }
}
