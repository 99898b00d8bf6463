use crate::error::StageError;

/// RGB color with components in \[0, 1\].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` sRGB value; components are stored
    /// linear so lighting and bloom blend them correctly.
    pub fn hex(rgb: u32) -> Self {
        let c = |shift: u32| srgb_to_linear(((rgb >> shift) & 0xff) as f32 / 255.0);
        Self::new(c(16), c(8), c(0))
    }

    /// Parse a `#rrggbb` literal (the leading `#` is optional).
    pub fn parse(s: &str) -> Result<Self, StageError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let rgb = match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok(),
            _ => None,
        };
        match rgb {
            Some(rgb) => Ok(Self::hex(rgb)),
            None => {
                log::warn!("[stage] bad colour literal {s:?}");
                Err(StageError::InvalidColor(s.to_string()))
            }
        }
    }

    /// Component-wise linear interpolation; `t` is not clamped.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> [f32; 4] {
        [self.r, self.g, self.b, a]
    }
}

/// sRGB transfer curve inverted, for a component in \[0, 1\].
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl std::str::FromStr for Color {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_literals() {
        let c = Color::parse("#ffb3c6").unwrap();
        assert_eq!(c, Color::hex(0xffb3c6));
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 0.451).abs() < 1e-3);
        assert!((c.b - 0.564).abs() < 1e-3);
        assert_eq!(Color::parse("120012").unwrap(), Color::hex(0x120012));
    }

    #[test]
    fn rejects_malformed_literals() {
        assert!(matches!(Color::parse("#fff"), Err(StageError::InvalidColor(_))));
        assert!(matches!(Color::parse("#gg0000"), Err(StageError::InvalidColor(_))));
    }

    #[test]
    fn hex_components_are_linearised() {
        assert_eq!(Color::hex(0x000000), Color::new(0.0, 0.0, 0.0));
        assert!((Color::hex(0xffffff).r - 1.0).abs() < 1e-6);
        // the linear segment near black
        assert!((Color::hex(0x0a0000).r - 10.0 / 255.0 / 12.92).abs() < 1e-7);
        let mid = Color::hex(0x808080);
        assert!((mid.r - 0.2159).abs() < 1e-3);
        assert_eq!("#808080".parse::<Color>().unwrap(), mid);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Color::new(0.0, 0.5, 1.0);
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }
}
