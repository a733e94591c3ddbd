//! Aspect ratio labels and the diagonal/width conversion.
//!
//! Screens are measured corner to corner, but every angle computation works
//! on the physical width. With `height = width / ratio` the diagonal follows
//! from Pythagoras, which gives the two conversions below.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GeometryError;

/// Width divided by height. Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Build a ratio from its two sides.
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        let label = format!("{}:{}", width, height);
        if !width.is_finite() || !height.is_finite() {
            return Err(GeometryError::aspect(label, "sides must be finite numbers"));
        }
        if height == 0.0 {
            return Err(GeometryError::aspect(label, "height is zero"));
        }
        if width <= 0.0 || height < 0.0 {
            return Err(GeometryError::aspect(label, "sides must be positive"));
        }
        Ok(Self(width / height))
    }

    /// Parse a `"W:H"` label such as `"16:9"` or `"2.391:1"`.
    pub fn parse(label: &str) -> Result<Self, GeometryError> {
        let trimmed = label.trim();
        let (w, h) = trimmed
            .split_once(':')
            .ok_or_else(|| GeometryError::aspect(trimmed, "expected W:H"))?;
        let width: f64 = w
            .trim()
            .parse()
            .map_err(|_| GeometryError::aspect(trimmed, "width is not a number"))?;
        let height: f64 = h
            .trim()
            .parse()
            .map_err(|_| GeometryError::aspect(trimmed, "height is not a number"))?;
        Self::new(width, height).map_err(|e| match e {
            GeometryError::InvalidAspectRatio { reason, .. } => {
                GeometryError::aspect(trimmed, reason)
            }
            other => other,
        })
    }

    /// Resolve the currently selected label. A missing or blank selection is
    /// an error rather than a silent default.
    pub fn resolve(selection: Option<&str>) -> Result<Self, GeometryError> {
        match selection.map(str::trim) {
            Some(label) if !label.is_empty() => Self::parse(label),
            _ => Err(GeometryError::aspect("", "no aspect ratio selected")),
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Physical width of a screen with the given diagonal.
    pub fn diagonal_to_width(&self, diagonal: f64) -> f64 {
        diagonal * self.0 / (self.0 * self.0 + 1.0).sqrt()
    }

    /// Diagonal of a screen with the given physical width.
    pub fn width_to_diagonal(&self, width: f64) -> f64 {
        width / self.0 * (self.0 * self.0 + 1.0).sqrt()
    }
}

impl FromStr for AspectRatio {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}:1", self.0)
    }
}

pub fn diagonal_to_width(diagonal: f64, ratio: AspectRatio) -> f64 {
    ratio.diagonal_to_width(diagonal)
}

pub fn width_to_diagonal(width: f64, ratio: AspectRatio) -> f64 {
    ratio.width_to_diagonal(width)
}

/// The aspect ratios offered by the form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq, Eq)]
pub enum AspectPreset {
    #[serde(rename = "4:3")]
    #[value(name = "4:3", alias = "standard")]
    Standard,
    #[default]
    #[serde(rename = "16:9")]
    #[value(name = "16:9", alias = "widescreen")]
    Widescreen,
    #[serde(rename = "2.391:1")]
    #[value(name = "2.391:1", alias = "scope")]
    Scope,
}

impl AspectPreset {
    pub fn all() -> &'static [AspectPreset] {
        &[
            AspectPreset::Standard,
            AspectPreset::Widescreen,
            AspectPreset::Scope,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AspectPreset::Standard => "4:3",
            AspectPreset::Widescreen => "16:9",
            AspectPreset::Scope => "2.391:1",
        }
    }

    pub fn ratio(&self) -> AspectRatio {
        match self {
            AspectPreset::Standard => AspectRatio(4.0 / 3.0),
            AspectPreset::Widescreen => AspectRatio(16.0 / 9.0),
            AspectPreset::Scope => AspectRatio(2.391),
        }
    }

    /// Find the preset whose label matches, ignoring surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::all().iter().copied().find(|p| p.label() == label)
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|p| p == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|p| p == self).unwrap_or(0);
        all[(current + all.len() - 1) % all.len()]
    }
}

impl fmt::Display for AspectPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
