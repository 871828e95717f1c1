//! Copying a resolved recipe into a project.

use std::path::Path;
use tracing::{debug, info, warn};
use uxkit_core::util::copy_file;
use uxkit_kit::{File, ImportmapPackageDependency, Kit, NpmPackageDependency, PhpPackageDependency, Recipe};
use uxkit_types::Result;

use crate::pool::Pool;
use crate::resolver::PoolResolver;

/// Outcome of installing one recipe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstallationReport {
    /// Files written to the destination
    pub new_files: Vec<File>,
    /// Composer packages the installed recipes need
    pub suggested_php_packages: Vec<PhpPackageDependency>,
    /// npm packages the installed recipes need
    pub suggested_npm_packages: Vec<NpmPackageDependency>,
    /// Importmap packages the installed recipes need
    pub suggested_importmap_packages: Vec<ImportmapPackageDependency>,
}

impl InstallationReport {
    /// Whether at least one file was written.
    pub fn has_changes(&self) -> bool {
        !self.new_files.is_empty()
    }

    /// Whether any package needs to be installed by hand.
    pub fn has_suggestions(&self) -> bool {
        !(self.suggested_php_packages.is_empty()
            && self.suggested_npm_packages.is_empty()
            && self.suggested_importmap_packages.is_empty())
    }

    fn from_pool(pool: &Pool, new_files: Vec<File>) -> Self {
        Self {
            new_files,
            suggested_php_packages: pool.php_package_dependencies().into_iter().cloned().collect(),
            suggested_npm_packages: pool.npm_package_dependencies().into_iter().cloned().collect(),
            suggested_importmap_packages: pool.importmap_package_dependencies().into_iter().cloned().collect(),
        }
    }
}

/// Installs recipes, asking before overwriting existing files.
///
/// `confirm` receives the question and answers it; `false` skips that
/// file only.
pub struct Installer<F>
where
    F: FnMut(&str) -> bool,
{
    confirm: F,
    resolver: PoolResolver,
}

impl<F> Installer<F>
where
    F: FnMut(&str) -> bool,
{
    /// Create an installer with an overwrite confirmation callback.
    pub fn new(confirm: F) -> Self {
        Self {
            confirm,
            resolver: PoolResolver::new(),
        }
    }

    /// Install `recipe` and everything it depends on under `destination`.
    ///
    /// With `force`, existing files are overwritten without asking.
    pub fn install_recipe(
        &mut self,
        kit: &Kit,
        recipe: &Recipe,
        destination: impl AsRef<Path>,
        force: bool,
    ) -> Result<InstallationReport> {
        let destination = destination.as_ref();
        info!("Installing recipe \"{}\" into {:?}", recipe.name, destination);

        let pool = self.resolver.resolve_for_recipe(kit, recipe)?;
        let mut new_files = Vec::new();

        for (recipe_path, files) in pool.files() {
            for file in files.values() {
                let source = recipe_path.join(&file.source);
                let target = destination.join(&file.destination);

                if self.copy(&source, &target, force)? {
                    new_files.push(file.clone());
                }
            }
        }

        Ok(InstallationReport::from_pool(&pool, new_files))
    }

    fn copy(&mut self, source: &Path, target: &Path, force: bool) -> Result<bool> {
        if target.exists() && !force {
            let question = format!(
                "File \"{}\" already exists. Do you want to overwrite it?",
                target.display()
            );
            if !(self.confirm)(&question) {
                warn!("Skipped {:?}", target);
                return Ok(false);
            }
        }

        debug!("Copying {:?} to {:?}", source, target);
        copy_file(source, target)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_kit;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::fs;
    use tempfile::TempDir;

    fn never_asked(question: &str) -> bool {
        panic!("no confirmation expected, got: {}", question);
    }

    #[test]
    fn test_install_component() {
        let temp_dir = TempDir::new().unwrap();
        let kit = fixture_kit("shadcn");
        let button = kit.recipe("button", None).unwrap();
        let mut installer = Installer::new(never_asked);

        let report = installer.install_recipe(&kit, button, temp_dir.path(), false).unwrap();

        let installed = temp_dir.path().join("templates/components/Button.html.twig");
        assert!(installed.is_file());
        assert_eq!(
            fs::read_to_string(&installed).unwrap(),
            fs::read_to_string(button.path().join("templates/components/Button.html.twig")).unwrap()
        );
        assert!(report.has_changes());
        assert_eq!(report.new_files.len(), 1);
        assert_eq!(report.suggested_php_packages.len(), 3);
        assert!(report.suggested_npm_packages.is_empty());
    }

    #[test]
    fn test_asks_before_overwriting() {
        let temp_dir = TempDir::new().unwrap();
        let kit = fixture_kit("shadcn");
        let button = kit.recipe("button", None).unwrap();
        let questions = RefCell::new(Vec::new());
        let mut installer = Installer::new(|question: &str| {
            questions.borrow_mut().push(question.to_string());
            true
        });

        installer.install_recipe(&kit, button, temp_dir.path(), false).unwrap();
        assert!(questions.borrow().is_empty());

        let report = installer.install_recipe(&kit, button, temp_dir.path(), false).unwrap();
        assert_eq!(
            *questions.borrow(),
            vec![format!(
                "File \"{}\" already exists. Do you want to overwrite it?",
                temp_dir.path().join("templates/components/Button.html.twig").display()
            )]
        );
        assert_eq!(report.new_files.len(), 1);
    }

    #[test]
    fn test_declined_overwrite_keeps_file() {
        let temp_dir = TempDir::new().unwrap();
        let kit = fixture_kit("shadcn");
        let button = kit.recipe("button", None).unwrap();
        let target = temp_dir.path().join("templates/components/Button.html.twig");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "custom").unwrap();

        let asked = Cell::new(0);
        let mut installer = Installer::new(|_: &str| {
            asked.set(asked.get() + 1);
            false
        });

        let report = installer.install_recipe(&kit, button, temp_dir.path(), false).unwrap();

        assert_eq!(asked.get(), 1);
        assert!(!report.has_changes());
        assert_eq!(report.suggested_php_packages.len(), 3);
        assert_eq!(fs::read_to_string(&target).unwrap(), "custom");
    }

    #[test]
    fn test_force_overwrites_without_asking() {
        let temp_dir = TempDir::new().unwrap();
        let kit = fixture_kit("shadcn");
        let button = kit.recipe("button", None).unwrap();
        let target = temp_dir.path().join("templates/components/Button.html.twig");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "custom").unwrap();

        let mut installer = Installer::new(never_asked);
        let report = installer.install_recipe(&kit, button, temp_dir.path(), true).unwrap();

        assert_eq!(report.new_files.len(), 1);
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            fs::read_to_string(button.path().join("templates/components/Button.html.twig")).unwrap()
        );
    }

    #[test]
    fn test_install_several_recipes() {
        let temp_dir = TempDir::new().unwrap();
        let kit = fixture_kit("shadcn");
        let mut installer = Installer::new(never_asked);

        for name in ["table", "input"] {
            let recipe = kit.recipe(name, None).unwrap();
            installer.install_recipe(&kit, recipe, temp_dir.path(), false).unwrap();
        }

        for file in [
            "Table.html.twig",
            "Table/Body.html.twig",
            "Table/Caption.html.twig",
            "Table/Cell.html.twig",
            "Table/Footer.html.twig",
            "Table/Head.html.twig",
            "Table/Header.html.twig",
            "Table/Row.html.twig",
            "Input.html.twig",
        ] {
            assert!(temp_dir.path().join("templates/components").join(file).is_file(), "{}", file);
        }
    }

    #[test]
    fn test_install_with_recipe_dependencies() {
        let temp_dir = TempDir::new().unwrap();
        let kit = fixture_kit("shadcn");
        let card = kit.recipe("card", None).unwrap();
        let mut installer = Installer::new(never_asked);

        let report = installer.install_recipe(&kit, card, temp_dir.path(), false).unwrap();

        assert_eq!(report.new_files.len(), 4);
        assert!(temp_dir.path().join("templates/components/Button.html.twig").is_file());
        assert!(temp_dir.path().join("assets/controllers/card_controller.js").is_file());
        assert_eq!(
            report
                .suggested_npm_packages
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["@hotwired/stimulus@^3.2.0"]
        );
        assert_eq!(report.suggested_importmap_packages.len(), 1);
    }

    #[test]
    fn test_nothing_to_copy_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let kit = fixture_kit("with-many-dependencies");
        let alert = kit.recipe("alert", None).unwrap();
        let mut installer = Installer::new(never_asked);

        let report = installer.install_recipe(&kit, alert, temp_dir.path(), false).unwrap();

        assert!(!report.has_changes());
        assert!(report.has_suggestions());
        assert_eq!(report.suggested_php_packages.len(), 3);
    }
}
