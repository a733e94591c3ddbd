//! Form state and the recompute policy.
//!
//! The form holds a viewing angle, a screen size, a viewing distance and an
//! aspect-ratio selection. Whenever one of them is edited exactly one of
//! size/distance is recomputed from the other, then the resolution label is
//! refreshed. `LastChanged` remembers which of size/distance the user typed
//! most recently so that an angle or aspect edit never overwrites it.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::aspect::AspectRatio;
use crate::error::GeometryError;
use crate::geometry;
use crate::resolution::Resolution;

/// An editable field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ViewingAngle,
    ScreenSize,
    ViewingDistance,
    AspectRatio,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Field::ViewingAngle,
            Field::ScreenSize,
            Field::ViewingDistance,
            Field::AspectRatio,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::ViewingAngle => "Viewing angle",
            Field::ScreenSize => "Screen size",
            Field::ViewingDistance => "Viewing distance",
            Field::AspectRatio => "Aspect ratio",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which of size/distance the user edited most recently.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LastChanged {
    #[default]
    None,
    ViewingDistance,
    ScreenSize,
}

/// What an edit should recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    RecomputeScreenSize,
    RecomputeViewingDistance,
    Nothing,
}

/// Result of a successful edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Recomputed {
        field: Field,
        value: f64,
        resolution: Resolution,
    },
    /// Neither size nor distance is known yet.
    InsufficientInput,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Recomputed {
                field,
                value,
                resolution,
            } => write!(f, "{} set to {} ({})", field, value, resolution),
            Outcome::InsufficientInput => {
                write!(f, "Enter a screen size or viewing distance")
            }
        }
    }
}

/// Snapshot of one form session.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    viewing_angle: f64,
    screen_size: Option<f64>,
    viewing_distance: Option<f64>,
    aspect_label: Option<String>,
    last_changed: LastChanged,
    resolution: Option<Resolution>,
}

impl FormState {
    pub fn new(viewing_angle: f64, aspect_label: Option<&str>) -> Self {
        Self {
            viewing_angle,
            screen_size: None,
            viewing_distance: None,
            aspect_label: aspect_label.map(str::to_string),
            last_changed: LastChanged::None,
            resolution: None,
        }
    }

    pub fn viewing_angle(&self) -> f64 {
        self.viewing_angle
    }

    pub fn screen_size(&self) -> Option<f64> {
        self.screen_size
    }

    pub fn viewing_distance(&self) -> Option<f64> {
        self.viewing_distance
    }

    pub fn aspect_label(&self) -> Option<&str> {
        self.aspect_label.as_deref()
    }

    pub fn last_changed(&self) -> LastChanged {
        self.last_changed
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Decide which field an edit of `edited` makes stale.
    pub fn plan(&self, edited: Field) -> Plan {
        match edited {
            Field::ScreenSize => Plan::RecomputeViewingDistance,
            Field::ViewingDistance => Plan::RecomputeScreenSize,
            Field::ViewingAngle | Field::AspectRatio => {
                match (self.screen_size.is_some(), self.viewing_distance.is_some()) {
                    (true, true) => {
                        if self.last_changed == LastChanged::ViewingDistance {
                            Plan::RecomputeScreenSize
                        } else {
                            Plan::RecomputeViewingDistance
                        }
                    }
                    (false, true) => Plan::RecomputeScreenSize,
                    (true, false) => Plan::RecomputeViewingDistance,
                    (false, false) => Plan::Nothing,
                }
            }
        }
    }

    /// An angle outside (0, 180) is rejected before anything is stored.
    pub fn edit_viewing_angle(&mut self, degrees: f64) -> Result<Outcome, GeometryError> {
        self.viewing_angle = geometry::validate_angle(degrees)?;
        self.recompute(Field::ViewingAngle)
    }

    pub fn edit_screen_size(&mut self, size: f64) -> Result<Outcome, GeometryError> {
        self.screen_size = Some(size);
        self.last_changed = LastChanged::ScreenSize;
        self.recompute_or_unset(Field::ScreenSize)
    }

    pub fn edit_viewing_distance(&mut self, distance: f64) -> Result<Outcome, GeometryError> {
        self.viewing_distance = Some(distance);
        self.last_changed = LastChanged::ViewingDistance;
        self.recompute_or_unset(Field::ViewingDistance)
    }

    pub fn select_aspect_ratio(&mut self, label: Option<&str>) -> Result<Outcome, GeometryError> {
        self.aspect_label = label.map(str::to_string);
        self.recompute_or_unset(Field::AspectRatio)
    }

    /// Empty the size or distance field. The resolution goes with it.
    pub fn clear(&mut self, field: Field) {
        let cleared = match field {
            Field::ScreenSize => {
                self.screen_size = None;
                LastChanged::ScreenSize
            }
            Field::ViewingDistance => {
                self.viewing_distance = None;
                LastChanged::ViewingDistance
            }
            Field::ViewingAngle | Field::AspectRatio => return,
        };
        if self.last_changed == cleared {
            self.last_changed = LastChanged::None;
        }
        self.resolution = None;
    }

    /// Recompute after an edit that changed an input of the resolution. On
    /// failure the old label no longer describes the form, so it is dropped.
    fn recompute_or_unset(&mut self, edited: Field) -> Result<Outcome, GeometryError> {
        let result = self.recompute(edited);
        if result.is_err() {
            self.resolution = None;
        }
        result
    }

    /// Run the plan for `edited`. Derived values are only written once every
    /// computation has succeeded.
    fn recompute(&mut self, edited: Field) -> Result<Outcome, GeometryError> {
        let plan = self.plan(edited);
        debug!(?edited, ?plan, last_changed = ?self.last_changed, "recompute");

        if plan == Plan::Nothing {
            self.resolution = None;
            return Ok(Outcome::InsufficientInput);
        }

        let ratio = AspectRatio::resolve(self.aspect_label())?;
        let (field, size, distance, value) = match plan {
            Plan::RecomputeScreenSize => {
                let Some(distance) = self.viewing_distance else {
                    return Ok(Outcome::InsufficientInput);
                };
                let size = geometry::screen_size(self.viewing_angle, distance, ratio)?;
                (Field::ScreenSize, size, distance, size)
            }
            Plan::RecomputeViewingDistance => {
                let Some(size) = self.screen_size else {
                    return Ok(Outcome::InsufficientInput);
                };
                let distance = geometry::viewing_distance(self.viewing_angle, size, ratio)?;
                (Field::ViewingDistance, size, distance, distance)
            }
            Plan::Nothing => return Ok(Outcome::InsufficientInput),
        };
        let resolution = geometry::optimal_resolution(size, distance, ratio)?;

        self.screen_size = Some(size);
        self.viewing_distance = Some(distance);
        self.resolution = Some(resolution);
        debug!(%field, value, %resolution, "recomputed");

        Ok(Outcome::Recomputed {
            field,
            value,
            resolution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(last: LastChanged) -> FormState {
        FormState {
            viewing_angle: 30.0,
            screen_size: Some(100.0),
            viewing_distance: Some(163.0),
            aspect_label: Some("16:9".to_string()),
            last_changed: last,
            resolution: Some(Resolution::P1080),
        }
    }

    #[test]
    fn test_plan_both_present_follows_marker() {
        let form = filled(LastChanged::ViewingDistance);
        assert_eq!(form.plan(Field::ViewingAngle), Plan::RecomputeScreenSize);
        assert_eq!(form.plan(Field::AspectRatio), Plan::RecomputeScreenSize);

        for last in [LastChanged::ScreenSize, LastChanged::None] {
            let form = filled(last);
            assert_eq!(form.plan(Field::ViewingAngle), Plan::RecomputeViewingDistance);
        }
    }

    #[test]
    fn test_plan_single_field_present() {
        let mut form = FormState::new(30.0, Some("16:9"));
        assert_eq!(form.plan(Field::ViewingAngle), Plan::Nothing);

        form.viewing_distance = Some(120.0);
        assert_eq!(form.plan(Field::ViewingAngle), Plan::RecomputeScreenSize);

        form.viewing_distance = None;
        form.screen_size = Some(80.0);
        assert_eq!(form.plan(Field::AspectRatio), Plan::RecomputeViewingDistance);
    }

    #[test]
    fn test_direct_edits_always_recompute_the_other_field() {
        let form = FormState::new(30.0, None);
        assert_eq!(form.plan(Field::ScreenSize), Plan::RecomputeViewingDistance);
        assert_eq!(form.plan(Field::ViewingDistance), Plan::RecomputeScreenSize);
    }

    #[test]
    fn test_edit_size_sets_distance_and_marker() {
        let mut form = FormState::new(30.0, Some("16:9"));
        let outcome = form.edit_screen_size(100.0).unwrap();
        assert_eq!(
            outcome,
            Outcome::Recomputed {
                field: Field::ViewingDistance,
                value: 163.0,
                resolution: Resolution::P1080,
            }
        );
        assert_eq!(form.viewing_distance(), Some(163.0));
        assert_eq!(form.last_changed(), LastChanged::ScreenSize);
        assert_eq!(form.resolution(), Some(Resolution::P1080));
    }

    #[test]
    fn test_edit_distance_sets_size_and_marker() {
        let mut form = FormState::new(30.0, Some("16:9"));
        form.edit_viewing_distance(163.0).unwrap();
        assert_eq!(form.screen_size(), Some(100.0));
        assert_eq!(form.last_changed(), LastChanged::ViewingDistance);
    }

    #[test]
    fn test_angle_edit_keeps_last_edited_field() {
        let mut form = filled(LastChanged::ScreenSize);
        form.edit_viewing_angle(40.0).unwrap();
        assert_eq!(form.screen_size(), Some(100.0));
        assert_ne!(form.viewing_distance(), Some(163.0));
        assert_eq!(form.last_changed(), LastChanged::ScreenSize);

        let mut form = filled(LastChanged::ViewingDistance);
        form.edit_viewing_angle(40.0).unwrap();
        assert_eq!(form.viewing_distance(), Some(163.0));
        assert_ne!(form.screen_size(), Some(100.0));
        assert_eq!(form.last_changed(), LastChanged::ViewingDistance);
    }

    #[test]
    fn test_empty_form_is_noop() {
        let mut form = FormState::new(30.0, Some("16:9"));
        assert_eq!(
            form.edit_viewing_angle(45.0).unwrap(),
            Outcome::InsufficientInput
        );
        assert_eq!(form.resolution(), None);
        assert_eq!(form.viewing_angle(), 45.0);
    }

    #[test]
    fn test_empty_form_ignores_missing_aspect() {
        let mut form = FormState::new(30.0, None);
        assert_eq!(
            form.select_aspect_ratio(None).unwrap(),
            Outcome::InsufficientInput
        );
    }

    #[test]
    fn test_invalid_angle_leaves_derived_fields() {
        let mut form = filled(LastChanged::ScreenSize);
        for angle in [0.0, 180.0] {
            assert_eq!(
                form.edit_viewing_angle(angle),
                Err(GeometryError::InvalidAngle(angle))
            );
            assert_eq!(form.screen_size(), Some(100.0));
            assert_eq!(form.viewing_distance(), Some(163.0));
            assert_eq!(form.resolution(), Some(Resolution::P1080));
            assert_eq!(form.viewing_angle(), 30.0);
        }
    }

    #[test]
    fn test_invalid_angle_rejected_on_empty_form() {
        let mut form = FormState::new(30.0, Some("16:9"));
        assert_eq!(
            form.edit_viewing_angle(180.0),
            Err(GeometryError::InvalidAngle(180.0))
        );
        assert_eq!(form.viewing_angle(), 30.0);
    }

    #[test]
    fn test_missing_aspect_is_error() {
        let mut form = filled(LastChanged::ScreenSize);
        assert!(matches!(
            form.select_aspect_ratio(None),
            Err(GeometryError::InvalidAspectRatio { .. })
        ));
        assert_eq!(form.viewing_distance(), Some(163.0));
        assert_eq!(form.resolution(), None);
    }

    #[test]
    fn test_aspect_change_recomputes_unmarked_field() {
        let mut form = filled(LastChanged::ScreenSize);
        form.select_aspect_ratio(Some("4:3")).unwrap();
        assert_eq!(form.screen_size(), Some(100.0));
        // 4:3 at 100 is 80 wide
        assert_eq!(form.viewing_distance(), Some(149.0));
    }

    #[test]
    fn test_invalid_size_keeps_distance() {
        let mut form = filled(LastChanged::ViewingDistance);
        assert!(form.edit_screen_size(-3.0).is_err());
        assert_eq!(form.viewing_distance(), Some(163.0));
        assert_eq!(form.last_changed(), LastChanged::ScreenSize);
        assert_eq!(form.screen_size(), Some(-3.0));
        assert_eq!(form.resolution(), None);
    }

    #[test]
    fn test_size_rounding_distance_to_zero_unsets_resolution() {
        let mut form = FormState::new(170.0, Some("16:9"));
        form.edit_viewing_distance(20.0).unwrap();
        assert_eq!(form.screen_size(), Some(525.0));

        assert_eq!(
            form.edit_screen_size(1.0),
            Err(GeometryError::InvalidMagnitude {
                field: "viewing distance",
                value: 0.0
            })
        );
        assert_eq!(form.screen_size(), Some(1.0));
        assert_eq!(form.viewing_distance(), Some(20.0));
        assert_eq!(form.resolution(), None);
    }

    #[test]
    fn test_clear_resets_marker_and_resolution() {
        let mut form = filled(LastChanged::ScreenSize);
        form.clear(Field::ViewingDistance);
        assert_eq!(form.last_changed(), LastChanged::ScreenSize);
        assert_eq!(form.resolution(), None);

        form.clear(Field::ScreenSize);
        assert_eq!(form.last_changed(), LastChanged::None);
        assert_eq!(
            form.edit_viewing_angle(35.0).unwrap(),
            Outcome::InsufficientInput
        );
    }

    #[test]
    fn test_last_changed_serde_labels() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            marker: LastChanged,
        }
        let text = toml::to_string(&Wrapper {
            marker: LastChanged::ViewingDistance,
        })
        .unwrap();
        assert_eq!(text.trim(), "marker = \"viewingDistance\"");
        let back: Wrapper = toml::from_str("marker = \"screenSize\"").unwrap();
        assert_eq!(back.marker, LastChanged::ScreenSize);
    }
}
