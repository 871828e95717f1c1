//! Install a recipe into a project.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use uxkit_core::ToolkitConfig;
use uxkit_installer::{InstallationReport, Installer};
use uxkit_kit::{Kit, KitRegistry, LocalRegistry, Recipe, RegistryFactory};

use crate::ui::{progress, prompt};

/// Insertion, replacement and deletion costs when suggesting recipe names.
const INSERT_COST: usize = 2;
const REPLACE_COST: usize = 5;
const DELETE_COST: usize = 10;
const MAX_SUGGESTION_COST: usize = 8;

pub async fn execute(
    config: &ToolkitConfig,
    recipe_name: Option<&str>,
    kit_name: Option<&str>,
    destination: &Path,
    force: bool,
    interactive: bool,
) -> Result<()> {
    let kit = match kit_name {
        Some(kit_name) => fetch_kit(config, kit_name).await?,
        None => pick_local_kit(config, recipe_name, interactive).await?,
    };

    let recipe = match recipe_name {
        None => {
            if !interactive {
                bail!("A recipe name is required when running non-interactively.");
            }
            let recipes = kit.recipes(None);
            let labels: Vec<&str> = recipes.iter().map(|r| r.manifest.name.as_str()).collect();
            let index = prompt::choose("Which recipe do you want to install?", &labels)?;
            recipes[index]
        }
        Some(name) => match kit.recipe(name, None) {
            Some(recipe) => recipe,
            None => pick_alternative(&kit, name, interactive)?,
        },
    };

    println!(
        "Installing recipe \"{}\" from the {} kit...",
        recipe.name.green(),
        kit.name().green()
    );

    let mut installer = Installer::new(|question: &str| prompt::confirm_or_decline(question, interactive));
    let report = installer
        .install_recipe(&kit, recipe, destination, force)
        .with_context(|| format!("Failed to install recipe \"{}\"", recipe.name))?;

    print_report(&report, destination);
    Ok(())
}

async fn fetch_kit(config: &ToolkitConfig, kit_name: &str) -> Result<Kit> {
    let factory = RegistryFactory::from_config(config)?;
    let registry = factory.for_kit(kit_name)?;

    let spinner = progress::spinner(format!("Loading kit {}", kit_name));
    let kit = registry.get_kit(kit_name).await;
    spinner.finish_and_clear();

    Ok(kit?)
}

/// Find the local kits providing `recipe_name`, asking when several do.
async fn pick_local_kit(config: &ToolkitConfig, recipe_name: Option<&str>, interactive: bool) -> Result<Kit> {
    let registry = LocalRegistry::new(config.kits_dir());

    let mut kits = Vec::new();
    for name in registry.available_kit_names()? {
        let kit = registry.get_kit(&name).await?;
        if recipe_name.map_or(true, |recipe| kit.recipe(recipe, None).is_some()) {
            kits.push(kit);
        }
    }

    match kits.len() {
        0 => match recipe_name {
            Some(recipe) => bail!("The recipe \"{}\" does not exist in any local kit.", recipe),
            None => bail!("No kits are available in \"{}\".", registry.kits_dir().display()),
        },
        1 => Ok(kits.remove(0)),
        _ => {
            if !interactive {
                bail!("Several kits are available, use --kit to pick one.");
            }
            let question = match recipe_name {
                Some(recipe) => format!("The recipe \"{}\" exists in multiple kits. Which one do you want to use?", recipe),
                None => "Which kit do you want to use?".to_string(),
            };
            let labels: Vec<&str> = kits.iter().map(Kit::name).collect();
            let index = prompt::choose(&question, &labels)?;
            Ok(kits.swap_remove(index))
        }
    }
}

fn pick_alternative<'k>(kit: &'k Kit, name: &str, interactive: bool) -> Result<&'k Recipe> {
    let message = format!("The recipe \"{}\" does not exist.", name);
    let alternatives = alternative_recipes(kit, name);

    match alternatives.as_slice() {
        [only] if interactive => {
            println!("{} {}", "Warning:".yellow().bold(), message);
            let question = format!("Do you want to install the recipe \"{}\" instead?", only.name);
            if prompt::confirm(&question, true, interactive)? {
                Ok(*only)
            } else {
                bail!(message)
            }
        }
        [] => bail!(message),
        _ => {
            let names: Vec<&str> = alternatives.iter().map(|r| r.name.as_str()).collect();
            bail!("{}\nPossible alternatives: \"{}\"", message, names.join("\", \""))
        }
    }
}

/// Recipes whose name is close to `name`, sorted by name.
fn alternative_recipes<'k>(kit: &'k Kit, name: &str) -> Vec<&'k Recipe> {
    let mut alternatives: Vec<&Recipe> = kit
        .recipes(None)
        .into_iter()
        .filter(|recipe| {
            recipe.name.contains(name) || weighted_levenshtein(name, &recipe.name) <= MAX_SUGGESTION_COST
        })
        .collect();
    alternatives.sort_by(|a, b| a.name.cmp(&b.name));
    alternatives
}

/// Cost of editing `from` into `to`.
fn weighted_levenshtein(from: &str, to: &str) -> usize {
    let from: Vec<char> = from.chars().collect();
    let to: Vec<char> = to.chars().collect();

    let mut previous: Vec<usize> = (0..=to.len()).map(|j| j * INSERT_COST).collect();
    for i in 1..=from.len() {
        let mut current = vec![i * DELETE_COST; to.len() + 1];
        for j in 1..=to.len() {
            let replace = previous[j - 1] + if from[i - 1] == to[j - 1] { 0 } else { REPLACE_COST };
            current[j] = replace
                .min(previous[j] + DELETE_COST)
                .min(current[j - 1] + INSERT_COST);
        }
        previous = current;
    }

    previous[to.len()]
}

fn print_report(report: &InstallationReport, destination: &Path) {
    if !report.has_changes() {
        println!("{} The recipe has not been installed.", "!".yellow().bold());
        return;
    }

    println!("{} The recipe has been installed.", "✓".green().bold());

    println!("\n{}", "Installed files".bold());
    for file in &report.new_files {
        println!("  * {}", destination.join(&file.destination).display());
    }

    if report.has_suggestions() {
        println!("\n{}", "Next steps".bold());
    }

    for (index, step) in next_steps(report).iter().enumerate() {
        println!("{}. {}\n", index + 1, step);
    }
}

/// Commands the user still has to run, one entry per step.
fn next_steps(report: &InstallationReport) -> Vec<String> {
    let join = |items: Vec<String>| items.join(" ");
    let php = join(report.suggested_php_packages.iter().map(ToString::to_string).collect());
    let npm = join(report.suggested_npm_packages.iter().map(ToString::to_string).collect());
    let importmap = join(
        report
            .suggested_importmap_packages
            .iter()
            .map(|d| d.package.clone())
            .collect(),
    );

    let mut steps = Vec::new();

    if !php.is_empty() {
        steps.push(format!(
            "Install suggested PHP package(s) with the command:\n\n $ {}",
            format!("composer require {}", php).green()
        ));
    }

    match (npm.is_empty(), importmap.is_empty()) {
        (false, false) => steps.push(format!(
            "Install suggested front-end packages with one of the following commands:\n\n # with npm/pnpm/yarn\n $ {}\n\n # or with Importmap\n $ {}",
            format!("npm install --save {}", npm).green(),
            format!("php bin/console importmap:install {}", importmap).green()
        )),
        (false, true) => steps.push(format!(
            "Install suggested front-end package(s) with the command:\n\n $ {}",
            format!("npm install --save {}", npm).green()
        )),
        (true, false) => steps.push(format!(
            "Install suggested front-end package(s) with the command:\n\n $ {}",
            format!("php bin/console importmap:install {}", importmap).green()
        )),
        (true, true) => {}
    }

    steps
}
