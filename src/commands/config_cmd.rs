use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use crate::config::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

pub fn execute(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show(),
        ConfigAction::Init { force } => init(force),
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;

    println!(
        "{}",
        format!("Configuration ({})", Config::config_file()?.display()).bold()
    );
    print!("{rendered}");
    Ok(())
}

fn init(force: bool) -> Result<()> {
    let path = Config::config_file()?;

    if path.exists() && !force {
        println!(
            "{} Config file already exists at {} (use --force to overwrite)",
            "✗".red(),
            path.display()
        );
        return Ok(());
    }

    Config::default().save()?;
    println!(
        "{} Wrote default configuration to {}",
        "✓".green(),
        path.display()
    );
    Ok(())
}
