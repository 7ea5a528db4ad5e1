use serde::Deserialize;

/// 8-bit RGBA color. Stage files spell it as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const GREEN: Color = Color::rgba(0, 228, 48, 255);
    pub const MAGENTA: Color = Color::rgba(255, 0, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scales the alpha channel by `factor` (clamped to 0..=1).
    pub fn fade(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn to_array_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl From<[u8; 4]> for Color {
    fn from(value: [u8; 4]) -> Self {
        Color::rgba(value[0], value[1], value[2], value[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_scales_alpha_only() {
        let faded = Color::GREEN.fade(0.5);
        assert_eq!(faded.r, 0);
        assert_eq!(faded.g, 228);
        assert_eq!(faded.b, 48);
        assert_eq!(faded.a, 128);
        assert_eq!(Color::WHITE.fade(1.0), Color::WHITE);
        assert_eq!(Color::WHITE.fade(4.0).a, 255);
    }

    #[test]
    fn to_array_f32_normalizes() {
        assert_eq!(Color::WHITE.to_array_f32(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Color::BLACK.to_array_f32(), [0.0, 0.0, 0.0, 1.0]);
    }
}
