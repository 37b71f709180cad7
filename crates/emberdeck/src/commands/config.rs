use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("  {}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    println!("{}", "defaults".cyan().bold());
    print_value("theme", config.default_theme().unwrap_or("dark (built-in)"));
    print_value(
        "start_slide",
        &config
            .start_slide()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "1 (built-in)".to_string()),
    );
    print_value("windowed", &config.windowed().to_string());

    println!("{}", "prompts".cyan().bold());
    print_value(
        "fullscreen_delay_ms",
        &config.fullscreen_delay().as_millis().to_string(),
    );
    print_value(
        "orientation_settle_ms",
        &config.orientation_settle().as_millis().to_string(),
    );

    println!("{}", "gate".cyan().bold());
    print_value("hint", config.gate_hint().unwrap_or("(none)"));
    Ok(())
}

fn print_value(key: &str, value: &str) {
    println!("  {:<24}{}", key.dimmed(), value);
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {} = {} ({})",
        "Saved".green().bold(),
        key.bold(),
        value,
        path.display()
    );
    Ok(())
}
