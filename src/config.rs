use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::aspect::AspectPreset;
use crate::cli::Args;
use crate::display::DisplayMode;
use crate::geometry;
use crate::theme::ColorScheme;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Starting values for the form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub viewing_angle: f64,
    pub aspect_ratio: AspectPreset,
    pub screen_size: Option<f64>,
    pub viewing_distance: Option<f64>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            viewing_angle: 30.0,
            aspect_ratio: AspectPreset::Widescreen,
            screen_size: None,
            viewing_distance: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    pub unit: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Terminal,
            unit: "in".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub color_scheme: ColorScheme,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the form could never compute with.
    pub fn validate(&self) -> Result<()> {
        geometry::validate_angle(self.form.viewing_angle).context("Invalid [form] viewing_angle")?;
        if let Some(size) = self.form.screen_size {
            geometry::validate_magnitude("screen size", size)
                .context("Invalid [form] screen_size")?;
        }
        if let Some(distance) = self.form.viewing_distance {
            geometry::validate_magnitude("viewing distance", distance)
                .context("Invalid [form] viewing_distance")?;
        }
        Ok(())
    }

    /// Get the default XDG config path (~/.config/htcalc/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("htcalc").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Returns None if the file doesn't exist, warns on parse errors.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("{:#}. Using defaults.", e);
                None
            }
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::write_template(&path)?;
        Ok(path)
    }

    fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::generate_config_template())
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        info!("Created config file at {}", path.display());
        Ok(())
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# htcalc configuration
# This file is auto-generated. Edit as needed.

[form]
# Horizontal viewing angle in degrees (0-180 exclusive).
# 30 is the common cinema recommendation, 40 is more immersive.
viewing_angle = 30.0
# Aspect ratio: "4:3", "16:9" or "2.391:1"
aspect_ratio = "16:9"
# Optional starting values, in the display unit
# screen_size = 100.0
# viewing_distance = 163.0

[display]
# Display mode: "terminal" (interactive form) or "print" (one-shot)
mode = "terminal"
# Unit label shown next to sizes and distances
unit = "in"

[theme]
# Color scheme: "spectrum", "fire", "ocean", "monochrome"
color_scheme = "spectrum"
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &Args) {
        if let Some(angle) = args.angle {
            self.form.viewing_angle = angle;
        }
        if let Some(aspect) = args.aspect {
            self.form.aspect_ratio = aspect;
        }
        if args.size.is_some() || args.distance.is_some() {
            // Values given on the command line replace both configured ones
            self.form.screen_size = args.size;
            self.form.viewing_distance = args.distance;
        }

        // Size or distance alone asks for a one-shot answer
        match args.mode {
            Some(mode) => self.display.mode = mode,
            None if args.size.is_some() || args.distance.is_some() => {
                self.display.mode = DisplayMode::Print;
            }
            None => {}
        }
        if let Some(ref unit) = args.unit {
            self.display.unit = unit.clone();
        }

        if let Some(ref colors) = args.colors {
            match colors.parse() {
                Ok(scheme) => self.theme.color_scheme = scheme,
                Err(e) => warn!("{}", e),
            }
        }
    }

    /// Write the form defaults back to `path`, keeping the rest of the file
    /// and its comments. The file is created from the template if missing.
    pub fn save_form_defaults(path: &Path, viewing_angle: f64, aspect: AspectPreset) -> Result<()> {
        geometry::validate_angle(viewing_angle).context("Refusing to save viewing_angle")?;
        if !path.exists() {
            Self::write_template(path)?;
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut doc = content
            .parse::<toml_edit::DocumentMut>()
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        if !doc.contains_key("form") {
            doc.insert("form", toml_edit::table());
        }
        let form = doc
            .get_mut("form")
            .and_then(toml_edit::Item::as_table_like_mut)
            .ok_or_else(|| anyhow::anyhow!("'form' in {} is not a table", path.display()))?;
        form.insert("viewing_angle", toml_edit::value(viewing_angle));
        form.insert("aspect_ratio", toml_edit::value(aspect.label()));

        std::fs::write(path, doc.to_string())
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        info!(
            "Saved viewing_angle={} aspect_ratio={} to {}",
            viewing_angle,
            aspect,
            path.display()
        );
        Ok(())
    }
}
