//! Colors and materials

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 24-bit RGB color, serialized as its integer value (`0x4682b4`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const STEEL_BLUE: Color = Color(0x4682b4);
    pub const ORANGE: Color = Color(0xff7f0e);
    pub const LIGHT_GRAY: Color = Color(0xbbbbbb);
    pub const WHITE: Color = Color(0xffffff);

    pub fn rgb(self) -> [u8; 3] {
        let [_, r, g, b] = self.0.to_be_bytes();
        [r, g, b]
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value & 0x00ff_ffff)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Surface appearance shared by every scene object kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f64,
    pub line_width: f64,
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            line_width: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_components() {
        assert_eq!(Color::STEEL_BLUE.rgb(), [0x46, 0x82, 0xb4]);
        assert_eq!(Color::ORANGE.to_string(), "#ff7f0e");
        assert_eq!(Color::from(0xff00_0000 | 0x12), Color(0x12));
    }

    #[test]
    fn test_color_serializes_as_integer() {
        let json = serde_json::to_string(&Color::LIGHT_GRAY).unwrap();
        assert_eq!(json, "12303291");
        let color: Color = serde_json::from_str("4620980").unwrap();
        assert_eq!(color, Color::STEEL_BLUE);
    }

    #[test]
    fn test_material_opacity() {
        let material = Material::new(Color::ORANGE);
        assert!(!material.is_transparent());
        assert!(material.with_opacity(0.5).is_transparent());
    }
}
