use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error produced when a `#rrggbb` color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("expected 3 or 6 hex digits, got {0} characters")]
    Length(usize),
    #[error("invalid hex digit in {0:?}")]
    Digit(String),
}

/// 8-bit sRGB color, authored the way the panel shows it (`#rrggbb`).
///
/// Serializes as a hex string so reports stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_array([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels in linear light, as the shader consumes them.
    pub fn to_linear(self) -> Vec3 {
        Vec3::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let digits = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| ColorParseError::Digit(s.to_string()))?;

        match digits.as_slice() {
            // Short form: each digit is doubled (#f00 == #ff0000).
            [r, g, b] => Ok(Rgb::new(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Rgb::new(
                r1 * 16 + r0,
                g1 * 16 + g0,
                b1 * 16 + b0,
            )),
            other => Err(ColorParseError::Length(other.len())),
        }
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One of the three cartesian axes; the panel edits vectors one axis at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Read this axis' component of `v`.
    pub fn get(self, v: Vec3) -> f32 {
        v[self.index()]
    }

    /// Return `v` with this axis' component replaced.
    pub fn with(self, mut v: Vec3, value: f32) -> Vec3 {
        v[self.index()] = value;
        v
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_long_and_short_hex() {
        assert_eq!("#ff0000".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("00004c".parse::<Rgb>().unwrap(), Rgb::new(0, 0, 0x4c));
        assert_eq!("#f80".parse::<Rgb>().unwrap(), Rgb::new(0xff, 0x88, 0x00));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!("#ff00".parse::<Rgb>(), Err(ColorParseError::Length(4)));
        assert!(matches!(
            "#gg0000".parse::<Rgb>(),
            Err(ColorParseError::Digit(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        let c = Rgb::new(0x12, 0xab, 0x00);
        assert_eq!(c.to_string(), "#12ab00");
        assert_eq!(c.to_string().parse::<Rgb>().unwrap(), c);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let back: Rgb = serde_json::from_str("\"#00004c\"").unwrap();
        assert_eq!(back, Rgb::new(0, 0, 0x4c));
    }

    #[test]
    fn linear_conversion_endpoints() {
        assert_eq!(Rgb::BLACK.to_linear(), Vec3::ZERO);
        let white = Rgb::new(255, 255, 255).to_linear();
        assert!((white - Vec3::ONE).abs().max_element() < 1e-6);
        // Mid grey is darker in linear light.
        assert!(Rgb::new(128, 128, 128).to_linear().x < 0.25);
    }

    #[test]
    fn axis_get_and_with() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::Y.get(v), 2.0);
        assert_eq!(Axis::Z.with(v, 9.0), Vec3::new(1.0, 2.0, 9.0));
        assert_eq!(Axis::ALL.map(Axis::index), [0, 1, 2]);
    }
}
