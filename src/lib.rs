//! Home theater layout calculator.
//!
//! Given a viewing angle and either a screen size or a viewing distance,
//! derives the other one and recommends a video resolution.

pub mod aspect;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod geometry;
pub mod resolution;
pub mod theme;

pub use aspect::{AspectPreset, AspectRatio};
pub use error::GeometryError;
pub use form::{Field, FormState, LastChanged, Outcome, Plan};
pub use resolution::Resolution;
