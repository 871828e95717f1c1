//! CLI structure and command definitions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uxkit_core::ToolkitConfig;
use uxkit_types::LogLevel;

#[derive(Parser)]
#[command(name = "uxkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Install UI component recipes from kits into your project", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install a recipe in your project
    #[command(after_help = "Examples:\n  \
        uxkit install button\n  \
        uxkit install button --kit shadcn\n  \
        uxkit install button --kit https://github.com/user/my-kit\n  \
        uxkit install button --kit https://github.com/user/my-kit:branch")]
    Install {
        /// Recipe name (ex: "button")
        recipe: Option<String>,

        /// Kit name (ex: "shadcn", or "github.com/user/my-kit")
        #[arg(short, long)]
        kit: Option<String>,

        /// Destination directory (defaults to the current directory)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Overwrite existing files without asking
        #[arg(short, long)]
        force: bool,

        /// Never prompt; existing files are kept
        #[arg(short = 'n', long)]
        no_interaction: bool,
    },

    /// Show a kit's metadata, recipes and components
    #[command(name = "debug-kit")]
    DebugKit {
        /// Kit directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List the kits available locally
    #[command(name = "list-kits")]
    ListKits,
}

impl Cli {
    /// Log level requested by flags, if any.
    pub fn log_level(&self) -> Option<LogLevel> {
        if self.debug {
            Some(LogLevel::Debug)
        } else if self.verbose {
            Some(LogLevel::Info)
        } else if self.quiet {
            Some(LogLevel::Error)
        } else {
            None
        }
    }

    pub async fn execute(&self, config: &ToolkitConfig) -> Result<()> {
        use crate::commands::*;

        match &self.command {
            Commands::Install {
                recipe,
                kit,
                destination,
                force,
                no_interaction,
            } => {
                let destination = match destination {
                    Some(dir) => dir.clone(),
                    None => std::env::current_dir()?,
                };
                install::execute(
                    config,
                    recipe.as_deref(),
                    kit.as_deref(),
                    &destination,
                    *force,
                    !*no_interaction && crate::ui::prompt::is_interactive(),
                )
                .await
            }
            Commands::DebugKit { path } => debug_kit::execute(path),
            Commands::ListKits => list::kits(config).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_install_arguments() {
        let cli = Cli::parse_from(["uxkit", "install", "button", "-k", "shadcn", "-d", "/tmp/app", "-f"]);
        match cli.command {
            Commands::Install {
                recipe,
                kit,
                destination,
                force,
                no_interaction,
            } => {
                assert_eq!(recipe.as_deref(), Some("button"));
                assert_eq!(kit.as_deref(), Some("shadcn"));
                assert_eq!(destination, Some(PathBuf::from("/tmp/app")));
                assert!(force);
                assert!(!no_interaction);
            }
            _ => panic!("expected install"),
        }
    }

    #[test]
    fn test_log_level_flags() {
        assert_eq!(Cli::parse_from(["uxkit", "list-kits"]).log_level(), None);
        assert_eq!(Cli::parse_from(["uxkit", "--debug", "list-kits"]).log_level(), Some(LogLevel::Debug));
        assert_eq!(Cli::parse_from(["uxkit", "list-kits", "-v"]).log_level(), Some(LogLevel::Info));
        assert_eq!(Cli::parse_from(["uxkit", "-q", "list-kits"]).log_level(), Some(LogLevel::Error));
    }

    #[test]
    fn test_debug_kit_default_path() {
        match Cli::parse_from(["uxkit", "debug-kit"]).command {
            Commands::DebugKit { path } => assert_eq!(path, PathBuf::from(".")),
            _ => panic!("expected debug-kit"),
        }
    }
}
