//! List local kits.

use anyhow::Result;
use colored::Colorize;
use uxkit_core::ToolkitConfig;
use uxkit_kit::{KitRegistry, LocalRegistry};

pub async fn kits(config: &ToolkitConfig) -> Result<()> {
    let registry = LocalRegistry::new(config.kits_dir());
    println!(
        "{} kits in {}",
        "Listing".green().bold(),
        registry.kits_dir().display()
    );

    let names = registry.available_kit_names()?;
    if names.is_empty() {
        println!("  {} No kits found", "!".yellow());
        return Ok(());
    }

    for name in names {
        match registry.get_kit(&name).await {
            Ok(kit) => println!(
                "  {} {} ({} recipes)",
                name.cyan(),
                kit.name(),
                kit.recipes(None).len()
            ),
            Err(e) => println!("  {} {}", name.cyan(), format!("invalid: {}", e).red()),
        }
    }

    Ok(())
}
