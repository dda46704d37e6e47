//! Ships subcommands handler

use std::path::Path;

use anyhow::{Context, Result};

use seapay::{Config, ShipReference};

/// Load the reference named on the command line, the configured one, or the
/// built-in list, in that order.
pub fn load_reference(path: Option<&Path>, config: &Config) -> Result<ShipReference> {
    match path.or(config.ships.reference.as_deref()) {
        Some(path) => ShipReference::load(path)
            .with_context(|| format!("Cannot use ship reference {}", path.display())),
        None => ShipReference::builtin().context("Built-in ship list is inconsistent"),
    }
}

/// Validate a reference file.
#[cfg(not(tarpaulin_include))]
pub fn handle_check(path: &Path) -> Result<()> {
    let reference = ShipReference::load(path)
        .with_context(|| format!("Cannot use ship reference {}", path.display()))?;
    println!(
        "{}: {} ships, {} aliases",
        path.display(),
        reference.len(),
        reference.alias_count()
    );
    Ok(())
}

/// List canonical ships and their aliases.
#[cfg(not(tarpaulin_include))]
pub fn handle_list(path: Option<&Path>) -> Result<()> {
    let config = Config::load()?;
    let reference = load_reference(path, &config)?;
    for ship in reference.ships() {
        let aliases: Vec<&str> = ship
            .aliases
            .iter()
            .filter(|alias| **alias != ship.name)
            .map(String::as_str)
            .collect();
        if aliases.is_empty() {
            println!("{}", ship.name);
        } else {
            println!("{} | {}", ship.name, aliases.join(" | "));
        }
    }
    Ok(())
}
