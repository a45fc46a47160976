use crate::Data;
use std::{fmt, marker::PhantomData, str::FromStr};
use thiserror::Error;

/// 8-bit non-linear sRGB color with alpha.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub palette::Srgba<u8>);

impl Data for Color {
    fn same(&self, other: &Self) -> bool {
        self.eq(other)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("invalid hex color string")]
pub struct ColorParseError;

const fn nibble_from_ascii(b: u8) -> Result<u8, ColorParseError> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        _ => Err(ColorParseError),
    }
}

const fn byte_from_ascii(b0: u8, b1: u8) -> Result<u8, ColorParseError> {
    match (nibble_from_ascii(b0), nibble_from_ascii(b1)) {
        (Ok(a), Ok(b)) => Ok((a << 4) + b),
        _ => Err(ColorParseError),
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_rgba_u8(0, 0, 0, 0);
    pub const BLACK: Color = Color::from_rgb_u8(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb_u8(255, 255, 255);

    pub const fn from_rgba_u8(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
        Color(palette::Srgba {
            color: palette::Srgb {
                red,
                green,
                blue,
                standard: PhantomData,
            },
            alpha,
        })
    }

    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Color {
        Color::from_rgba_u8(red, green, blue, 255)
    }

    pub const fn to_rgba_u8(&self) -> (u8, u8, u8, u8) {
        (self.0.color.red, self.0.color.green, self.0.color.blue, self.0.alpha)
    }

    /// Replaces alpha value.
    pub const fn with_alpha(self, alpha: u8) -> Color {
        Color(palette::Srgba {
            color: self.0.color,
            alpha,
        })
    }

    /// Returns the color as floating-point RGBA components in `0.0..=1.0`.
    pub fn to_rgba_f32(&self) -> (f32, f32, f32, f32) {
        let (r, g, b, a) = self.to_rgba_u8();
        (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    pub fn to_hex(&self) -> String {
        match self.to_rgba_u8() {
            (r, g, b, 255) => format!("#{r:02x}{g:02x}{b:02x}"),
            (r, g, b, a) => format!("#{r:02x}{g:02x}{b:02x}{a:02x}"),
        }
    }

    /// Creates a new color from an hex code (`#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`, `#` optional).
    pub const fn try_from_hex(hex: &str) -> Result<Color, ColorParseError> {
        match hex.as_bytes() {
            // #RRGGBB, RRGGBB
            &[b'#', r0, r1, g0, g1, b0, b1] | &[r0, r1, g0, g1, b0, b1] => {
                match (
                    byte_from_ascii(r0, r1),
                    byte_from_ascii(g0, g1),
                    byte_from_ascii(b0, b1),
                ) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Color::from_rgb_u8(r, g, b)),
                    _ => Err(ColorParseError),
                }
            }
            // #RRGGBBAA, RRGGBBAA
            &[b'#', r0, r1, g0, g1, b0, b1, a0, a1] | &[r0, r1, g0, g1, b0, b1, a0, a1] => {
                match (
                    byte_from_ascii(r0, r1),
                    byte_from_ascii(g0, g1),
                    byte_from_ascii(b0, b1),
                    byte_from_ascii(a0, a1),
                ) {
                    (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Color::from_rgba_u8(r, g, b, a)),
                    _ => Err(ColorParseError),
                }
            }
            // #RGB, RGB: each digit is repeated (#f80 == #ff8800)
            &[b'#', r, g, b] | &[r, g, b] => match (nibble_from_ascii(r), nibble_from_ascii(g), nibble_from_ascii(b)) {
                (Ok(r), Ok(g), Ok(b)) => Ok(Color::from_rgb_u8(r * 17, g * 17, b * 17)),
                _ => Err(ColorParseError),
            },
            // #RGBA, RGBA
            &[b'#', r, g, b, a] | &[r, g, b, a] => {
                match (
                    nibble_from_ascii(r),
                    nibble_from_ascii(g),
                    nibble_from_ascii(b),
                    nibble_from_ascii(a),
                ) {
                    (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Color::from_rgba_u8(r * 17, g * 17, b * 17, a * 17)),
                    _ => Err(ColorParseError),
                }
            }
            _ => Err(ColorParseError),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::try_from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex() {
        assert_eq!(Color::try_from_hex("#ff8000"), Ok(Color::from_rgb_u8(255, 128, 0)));
        assert_eq!(Color::try_from_hex("f80"), Ok(Color::from_rgb_u8(255, 136, 0)));
        assert_eq!("#00000080".parse::<Color>(), Ok(Color::from_rgba_u8(0, 0, 0, 128)));
        assert_eq!(Color::try_from_hex("#zz0000"), Err(ColorParseError));
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
        assert_eq!(Color::BLACK.with_alpha(0x80).to_string(), "#00000080");
    }
}
