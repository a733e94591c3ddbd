pub mod print;
pub mod terminal;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::GeometryError;
use crate::form::{FormState, Outcome};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Terminal,
    Print,
}

/// Build the starting form from config.
///
/// A configured screen size is applied before a configured distance, so
/// when both are set the distance counts as the most recent edit.
pub fn seed_form(config: &Config) -> (FormState, Result<Option<Outcome>, GeometryError>) {
    let mut form = FormState::new(
        config.form.viewing_angle,
        Some(config.form.aspect_ratio.label()),
    );

    let result = apply_seed(&mut form, config);
    debug!(?result, "seeded form");

    (form, result)
}

fn apply_seed(form: &mut FormState, config: &Config) -> Result<Option<Outcome>, GeometryError> {
    let mut last = None;
    if let Some(size) = config.form.screen_size {
        last = Some(form.edit_screen_size(size)?);
    }
    if let Some(distance) = config.form.viewing_distance {
        last = Some(form.edit_viewing_distance(distance)?);
    }
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Field, LastChanged};

    #[test]
    fn test_seed_empty_form() {
        let (form, result) = seed_form(&Config::default());
        assert_eq!(result, Ok(None));
        assert_eq!(form.screen_size(), None);
        assert_eq!(form.aspect_label(), Some("16:9"));
    }

    #[test]
    fn test_seed_distance_wins_over_size() {
        let mut config = Config::default();
        config.form.screen_size = Some(50.0);
        config.form.viewing_distance = Some(163.0);
        let (form, result) = seed_form(&config);
        match result {
            Ok(Some(Outcome::Recomputed { field, value, .. })) => {
                assert_eq!(field, Field::ScreenSize);
                assert_eq!(value, 100.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(form.last_changed(), LastChanged::ViewingDistance);
    }

    #[test]
    fn test_seed_reports_bad_size() {
        let mut config = Config::default();
        config.form.screen_size = Some(0.0);
        let (_, result) = seed_form(&config);
        assert!(matches!(result, Err(GeometryError::InvalidMagnitude { .. })));
    }
}
