use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::PasswordCommands;
use crate::controller::auth::{AuthGate, configured_secret};
use crate::store::FileStore;

pub fn run(command: PasswordCommands) -> Result<()> {
    match command {
        PasswordCommands::Set { value } => set(value),
        PasswordCommands::Clear => clear(),
    }
}

fn set(value: Option<String>) -> Result<()> {
    let secret = match value {
        Some(v) => v,
        None => inquire::Password::new("New password:")
            .with_display_toggle_enabled()
            .with_custom_confirmation_message("Confirm password:")
            .prompt()
            .context("Password prompt cancelled")?,
    };
    let mut store = FileStore::open()?;
    let mut gate = AuthGate::load(&store);
    if !gate.set_password(&mut store, &secret) {
        anyhow::bail!("Password cannot be empty");
    }
    store.persist()?;

    println!(
        "{} The next launch will ask for the password.",
        "Password set.".green().bold()
    );
    Ok(())
}

fn clear() -> Result<()> {
    let mut store = FileStore::open()?;
    if configured_secret(&store).is_none() {
        println!("{}", "No password is set.".dimmed());
        return Ok(());
    }
    AuthGate::load(&store).clear_password(&mut store);
    store.persist()?;
    println!("{}", "Password removed.".green().bold());
    Ok(())
}
