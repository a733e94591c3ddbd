//! One-shot output: solve the form from config/CLI values and print it.

use anyhow::Result;
use std::io::Write;
use tracing::info;

use crate::config::Config;
use crate::form::{FormState, Outcome};

pub fn run(config: Config) -> Result<()> {
    let (form, result) = super::seed_form(&config);
    let outcome = result?;
    info!(?outcome, "solved form");

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(render(&form, &config.display.unit, outcome.as_ref()).as_bytes())?;
    Ok(())
}

fn format_length(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v, unit),
        None => "-".to_string(),
    }
}

/// Plain-text summary of the form, one field per line.
pub fn render(form: &FormState, unit: &str, outcome: Option<&Outcome>) -> String {
    let mut out = String::new();
    let rows = [
        ("Viewing angle", format!("{}°", form.viewing_angle())),
        ("Aspect ratio", form.aspect_label().unwrap_or("-").to_string()),
        ("Screen size", format_length(form.screen_size(), unit)),
        ("Viewing distance", format_length(form.viewing_distance(), unit)),
        (
            "Resolution",
            form.resolution()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ];
    for (name, value) in rows {
        out.push_str(&format!("{:<18}{}\n", name, value));
    }
    match outcome {
        Some(Outcome::InsufficientInput) | None => {
            out.push_str(&format!("\n{}\n", Outcome::InsufficientInput));
        }
        Some(Outcome::Recomputed { .. }) => {}
    }
    out
}
