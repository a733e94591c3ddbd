use palette::{Hsl, IntoColor, Srgb};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::resolution::Resolution;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Spectrum,
    Fire,
    Ocean,
    Monochrome,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spectrum" => Ok(Self::Spectrum),
            "fire" => Ok(Self::Fire),
            "ocean" => Ok(Self::Ocean),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

impl ColorScheme {
    /// Color for a position along the scheme, 0.0 to 1.0.
    pub fn get_color(&self, position: f32) -> (u8, u8, u8) {
        let position = position.clamp(0.0, 1.0);
        let (h, s, l) = match self {
            // Blue -> green -> red
            ColorScheme::Spectrum => (240.0 - position * 240.0, 0.85, 0.55),
            ColorScheme::Fire => (position * 60.0, 0.95, 0.45 + position * 0.15),
            ColorScheme::Ocean => (180.0 + position * 60.0, 0.8, 0.4 + position * 0.2),
            ColorScheme::Monochrome => (0.0, 0.0, 0.4 + position * 0.5),
        };

        let rgb: Srgb = Hsl::new(h, s, l).into_color();
        (
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }

    /// Badge color for a resolution; higher formats sit further along.
    pub fn resolution_color(&self, resolution: Resolution) -> Color {
        let last = Resolution::all().len().saturating_sub(1).max(1);
        let (r, g, b) = self.get_color(resolution.tier() as f32 / last as f32);
        Color::Rgb(r, g, b)
    }

    pub fn accent(&self) -> Color {
        let (r, g, b) = self.get_color(0.5);
        Color::Rgb(r, g, b)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Spectrum => "spectrum",
            ColorScheme::Fire => "fire",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Monochrome => "monochrome",
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Spectrum,
            ColorScheme::Fire,
            ColorScheme::Ocean,
            ColorScheme::Monochrome,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monochrome_brightens_with_tier() {
        let low = ColorScheme::Monochrome.get_color(0.0);
        let high = ColorScheme::Monochrome.get_color(1.0);
        assert_eq!(low.0, low.1);
        assert!(high.0 > low.0);
    }

    #[test]
    fn test_tiers_get_distinct_colors() {
        let scheme = ColorScheme::Spectrum;
        let lo = scheme.resolution_color(Resolution::P480);
        let hi = scheme.resolution_color(Resolution::K8);
        assert_ne!(lo, hi);
    }

    #[test]
    fn test_parse_and_cycle() {
        assert_eq!("MONO".parse::<ColorScheme>().unwrap(), ColorScheme::Monochrome);
        assert!("plaid".parse::<ColorScheme>().is_err());
        assert_eq!(ColorScheme::Monochrome.next(), ColorScheme::Spectrum);
    }
}
