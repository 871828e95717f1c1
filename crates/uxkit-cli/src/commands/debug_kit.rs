//! Inspect a kit directory.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use uxkit_kit::{Kit, KitFactory, TemplateFinderCache};

pub fn execute(path: &Path) -> Result<()> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let path = path
        .canonicalize()
        .with_context(|| format!("Path \"{}\" does not exist", path.display()))?;

    let kit = KitFactory::new().create_kit_from_absolute_path(&path)?;

    print_kit(&kit);
    print_recipes(&kit);

    let mut finders = TemplateFinderCache::new();
    let finder = finders.finder_for(&kit)?;
    let components: Vec<String> = finder.component_names().map(ToString::to_string).collect();

    println!("\n{}", "Components".bold());
    if components.is_empty() {
        println!("  {} No component templates", "!".yellow());
    }
    for name in components {
        println!("  * {}", name);
    }

    Ok(())
}

fn print_kit(kit: &Kit) {
    println!("{}", "Kit".bold());
    println!("  Name:        {}", kit.name().cyan());
    println!("  Description: {}", kit.manifest.description);
    println!("  License:     {}", kit.manifest.license);
    println!("  Homepage:    {}", kit.manifest.homepage);
    println!("  Path:        {}", kit.path().display());
}

fn print_recipes(kit: &Kit) {
    println!("\n{}", "Recipes".bold());
    for recipe in kit.recipes(None) {
        println!("\n  {} ({})", recipe.name.cyan().bold(), recipe.recipe_type());
        println!("    {}", recipe.manifest.description);

        match recipe.files() {
            Ok(files) => {
                println!("    Files:");
                for file in files {
                    println!("      {} -> {}", file.source.display(), file.destination.display());
                }
            }
            Err(e) => println!("    {}", format!("Unable to list files: {}", e).red()),
        }

        if !recipe.manifest.dependencies.is_empty() {
            println!("    Dependencies:");
            for dependency in &recipe.manifest.dependencies {
                println!("      {}", dependency.to_debug());
            }
        }
    }
}
