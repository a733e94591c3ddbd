use anyhow::Result;
use clap::Parser;
use tracing::info;

use htcalc::cli::Args;
use htcalc::config::Config;
use htcalc::display::{self, DisplayMode};

fn main() -> Result<()> {
    // Logs go to stderr so printed results stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("htcalc=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);
    config.validate()?;

    info!("Starting htcalc in {:?} mode", config.display.mode);

    match config.display.mode {
        DisplayMode::Terminal => display::terminal::run(config, args.config.clone())?,
        DisplayMode::Print => display::print::run(config)?,
    }

    Ok(())
}
