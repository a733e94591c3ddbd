use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pixels a viewer can resolve per degree of view (1/60 degree each).
pub const PIXELS_PER_DEGREE: f64 = 60.0;

/// Recommended video resolution, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resolution {
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "4k")]
    K4,
    #[serde(rename = "8k")]
    K8,
}

impl Resolution {
    pub fn all() -> &'static [Resolution] {
        &[
            Resolution::P480,
            Resolution::P720,
            Resolution::P1080,
            Resolution::K4,
            Resolution::K8,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::P480 => "480p",
            Resolution::P720 => "720p",
            Resolution::P1080 => "1080p",
            Resolution::K4 => "4k",
            Resolution::K8 => "8k",
        }
    }

    /// Nominal horizontal pixel count of the format.
    pub fn horizontal_pixels(&self) -> u32 {
        match self {
            Resolution::P480 => 640,
            Resolution::P720 => 1280,
            Resolution::P1080 => 1920,
            Resolution::K4 => 3840,
            Resolution::K8 => 7680,
        }
    }

    /// Position in the ordered label set, 0 for 480p.
    pub fn tier(&self) -> usize {
        *self as usize
    }

    /// Smallest format whose width covers `pixels`. Bounds are inclusive and
    /// anything above 4k lands on 8k.
    pub fn for_pixel_count(pixels: f64) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|r| *r != Resolution::K8 && pixels <= f64::from(r.horizontal_pixels()))
            .unwrap_or(Resolution::K8)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "480p" => Ok(Resolution::P480),
            "720p" => Ok(Resolution::P720),
            "1080p" => Ok(Resolution::P1080),
            "4k" => Ok(Resolution::K4),
            "8k" => Ok(Resolution::K8),
            _ => Err(format!("Unknown resolution: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_inclusive() {
        assert_eq!(Resolution::for_pixel_count(0.0), Resolution::P480);
        assert_eq!(Resolution::for_pixel_count(640.0), Resolution::P480);
        assert_eq!(Resolution::for_pixel_count(640.001), Resolution::P720);
        assert_eq!(Resolution::for_pixel_count(1280.0), Resolution::P720);
        assert_eq!(Resolution::for_pixel_count(1920.0), Resolution::P1080);
        assert_eq!(Resolution::for_pixel_count(1920.5), Resolution::K4);
        assert_eq!(Resolution::for_pixel_count(3840.0), Resolution::K4);
        assert_eq!(Resolution::for_pixel_count(3841.0), Resolution::K8);
        assert_eq!(Resolution::for_pixel_count(10_800.0), Resolution::K8);
    }

    #[test]
    fn test_labels_parse_back() {
        for r in Resolution::all() {
            assert_eq!(r.label().parse::<Resolution>().unwrap(), *r);
        }
        assert_eq!("4K".parse::<Resolution>().unwrap(), Resolution::K4);
        assert!("1440p".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_ordering_and_tier() {
        assert!(Resolution::P480 < Resolution::K8);
        assert_eq!(Resolution::P1080.tier(), 2);
    }
}
