//! Kit registries: where kits come from.
//!
//! A kit identifier is either a plain directory name looked up in the local
//! kits directory (`shadcn`), or a GitHub repository reference
//! (`github.com/user/repo`, `https://github.com/user/repo:2.x`).

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use uxkit_core::util::scratch_dir;
use uxkit_core::ToolkitConfig;
use uxkit_services::{ArchiveFetcher, GithubClient, GithubConfig};
use uxkit_types::{bail, RegistryType, Result, ToolkitError};

use crate::factory::KitFactory;
use crate::kit::Kit;

static LOCAL_KIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid local kit regex"));

static GITHUB_KIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https://)?github\.com/(?<author>[\w-]+)/(?<repository>[\w-]+)(?::(?<version>[\w._-]+))?$")
        .expect("valid GitHub kit regex")
});

/// Git ref used when a GitHub identifier names none.
pub const DEFAULT_GITHUB_REF: &str = "main";

/// A source of kits.
#[async_trait]
pub trait KitRegistry: Send + Sync {
    /// Which kind of registry this is.
    fn registry_type(&self) -> RegistryType;

    /// Materialize the kit named by `kit`.
    async fn get_kit(&self, kit: &str) -> Result<Kit>;
}

/// Kits stored as subdirectories of a local directory.
#[derive(Debug, Clone)]
pub struct LocalRegistry {
    kits_dir: PathBuf,
    factory: KitFactory,
}

impl LocalRegistry {
    /// Create a registry over `kits_dir`.
    pub fn new(kits_dir: impl Into<PathBuf>) -> Self {
        Self {
            kits_dir: kits_dir.into(),
            factory: KitFactory::new(),
        }
    }

    /// Whether `kit` looks like a local kit name.
    pub fn supports(kit: &str) -> bool {
        LOCAL_KIT_RE.is_match(kit)
    }

    /// Directory the registry reads from.
    pub fn kits_dir(&self) -> &Path {
        &self.kits_dir
    }

    /// Names of the kits available locally, sorted.
    ///
    /// A missing kits directory yields no kits.
    pub fn available_kit_names(&self) -> Result<Vec<String>> {
        if !self.kits_dir.is_dir() {
            debug!("Kits directory {:?} does not exist", self.kits_dir);
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.kits_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if Self::supports(&name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    fn kit_dir(&self, kit: &str) -> Result<PathBuf> {
        let dir = self.kits_dir.join(kit);
        if dir.is_absolute() {
            return Ok(dir);
        }
        Ok(std::env::current_dir()?.join(dir))
    }
}

#[async_trait]
impl KitRegistry for LocalRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::Local
    }

    async fn get_kit(&self, kit: &str) -> Result<Kit> {
        if !Self::supports(kit) {
            bail!(Validation, "The kit \"{}\" is not a valid local kit name.", kit);
        }

        let dir = self.kit_dir(kit)?;
        if !dir.exists() {
            bail!(NotFound, "Kit \"{}\" does not exist.", kit);
        }

        info!("Loading local kit {:?}", dir);
        self.factory.create_kit_from_absolute_path(dir)
    }
}

/// The repository a GitHub kit identifier points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubIdentity {
    /// Repository owner
    pub author: String,
    /// Repository name
    pub repository: String,
    /// Branch, tag or commit
    pub version: String,
}

impl GithubIdentity {
    /// Parse a GitHub kit identifier.
    pub fn parse(kit: &str) -> Result<Self> {
        let captures = GITHUB_KIT_RE.captures(kit).ok_or_else(|| {
            ToolkitError::Validation("The kit name is invalid, it must be a valid GitHub kit name.".to_string())
        })?;

        Ok(Self {
            author: captures["author"].to_string(),
            repository: captures["repository"].to_string(),
            version: captures
                .name("version")
                .map_or(DEFAULT_GITHUB_REF, |m| m.as_str())
                .to_string(),
        })
    }

    /// Name of the top-level folder inside the repository archive.
    pub fn archive_folder(&self) -> String {
        format!("{}-{}", self.repository, self.version)
    }
}

/// Kits downloaded as GitHub repository archives.
///
/// Every fetch unpacks into a fresh temporary directory owned by the
/// returned [`Kit`].
#[derive(Clone)]
pub struct GithubRegistry {
    fetcher: Arc<dyn ArchiveFetcher>,
    factory: KitFactory,
}

impl GithubRegistry {
    /// Create a registry downloading through `fetcher`.
    pub fn new(fetcher: Arc<dyn ArchiveFetcher>) -> Self {
        Self {
            fetcher,
            factory: KitFactory::new(),
        }
    }

    /// Whether `kit` looks like a GitHub kit identifier.
    pub fn supports(kit: &str) -> bool {
        GITHUB_KIT_RE.is_match(kit)
    }
}

#[async_trait]
impl KitRegistry for GithubRegistry {
    fn registry_type(&self) -> RegistryType {
        RegistryType::GitHub
    }

    async fn get_kit(&self, kit: &str) -> Result<Kit> {
        let identity = GithubIdentity::parse(kit)?;
        let url = self
            .fetcher
            .archive_url(&identity.author, &identity.repository, &identity.version);

        let scratch = scratch_dir("uxkit_github_")?;
        let folder = identity.archive_folder();
        let archive_path = scratch.path().join(format!("{}.zip", folder));

        info!("Fetching kit {} from {}", kit, url);
        let size = self.fetcher.download(&url, &archive_path).await?;
        debug!("Downloaded {} bytes to {:?}", size, archive_path);

        extract_archive(&archive_path, scratch.path(), &url)?;

        let kit_dir = scratch.path().join(&folder);
        if !kit_dir.is_dir() {
            bail!(
                Archive,
                "Unable to extract the archive from \"{}\", ensure the repository exists and the version is valid.",
                url
            );
        }

        let kit = self.factory.create_kit_from_absolute_path(&kit_dir)?;
        Ok(kit.with_scratch(scratch))
    }
}

fn extract_archive(archive_path: &Path, destination: &Path, url: &str) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        ToolkitError::Archive(format!(
            "Unable to extract the archive from \"{}\", ensure the repository exists and the version is valid. ({})",
            url, e
        ))
    })?;

    debug!("Extracting {} entries into {:?}", archive.len(), destination);
    archive
        .extract(destination)
        .map_err(|e| ToolkitError::Archive(format!("Failed to extract \"{}\": {}", archive_path.display(), e)))
}

/// Picks the registry responsible for a kit identifier.
#[derive(Default, Clone)]
pub struct RegistryFactory {
    registries: HashMap<RegistryType, Arc<dyn KitRegistry>>,
}

impl RegistryFactory {
    /// Create a factory with no registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory with the local and GitHub registries wired from
    /// configuration.
    pub fn from_config(config: &ToolkitConfig) -> Result<Self> {
        let client = GithubClient::new(GithubConfig::from(&config.github))?;

        let mut factory = Self::new();
        factory.register(Arc::new(LocalRegistry::new(config.kits_dir())));
        factory.register(Arc::new(GithubRegistry::new(Arc::new(client))));
        Ok(factory)
    }

    /// Register a registry, replacing any previous one of the same type.
    pub fn register(&mut self, registry: Arc<dyn KitRegistry>) {
        self.registries.insert(registry.registry_type(), registry);
    }

    /// The registry responsible for `kit`.
    ///
    /// GitHub identifiers are recognized first, then local names.
    pub fn for_kit(&self, kit: &str) -> Result<Arc<dyn KitRegistry>> {
        let registry_type = if GithubRegistry::supports(kit) {
            RegistryType::GitHub
        } else if LocalRegistry::supports(kit) {
            RegistryType::Local
        } else {
            bail!(Validation, "The kit \"{}\" is not valid.", kit);
        };

        self.registries.get(&registry_type).cloned().ok_or_else(|| {
            ToolkitError::Integrity(format!("The registry for the kit \"{}\" is not registered.", kit))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    /// Serves a zip of a fixture kit, nested under `<folder>/`.
    struct FakeFetcher {
        archive: Option<Vec<u8>>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn serving(kit: &str, folder: &str) -> Self {
            Self {
                archive: Some(zip_fixture(kit, folder)),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                archive: None,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ArchiveFetcher for FakeFetcher {
        fn archive_url(&self, author: &str, repository: &str, reference: &str) -> String {
            format!("https://github.com/{}/{}/archive/{}.zip", author, repository, reference)
        }

        async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
            self.requested.lock().unwrap().push(url.to_string());
            match &self.archive {
                Some(bytes) => {
                    fs::write(destination, bytes)?;
                    Ok(bytes.len() as u64)
                }
                None => Err(ToolkitError::Download(format!(
                    "Unable to download the archive from \"{}\", ensure the repository exists and the version is valid.",
                    url
                ))),
            }
        }
    }

    fn zip_fixture(kit: &str, folder: &str) -> Vec<u8> {
        let root = fixture(kit);
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.unwrap();
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&root).unwrap();
            let name = format!("{}/{}", folder, relative.to_string_lossy());
            writer.start_file(name, options).unwrap();
            writer.write_all(&fs::read(entry.path()).unwrap()).unwrap();
        }

        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_local_supports() {
        assert!(LocalRegistry::supports("shadcn"));
        assert!(LocalRegistry::supports("my_kit-2"));
        assert!(!LocalRegistry::supports("github.com/user/repo"));
        assert!(!LocalRegistry::supports("my kit"));
        assert!(!LocalRegistry::supports(""));
    }

    #[test]
    fn test_github_supports() {
        assert!(GithubRegistry::supports("github.com/user/repo"));
        assert!(GithubRegistry::supports("https://github.com/user/repo"));
        assert!(GithubRegistry::supports("github.com/user/repo:2.x"));
        assert!(GithubRegistry::supports("github.com/user/repo:v1.0.0"));
        assert!(!GithubRegistry::supports("http://github.com/user/repo"));
        assert!(!GithubRegistry::supports("github.com/user"));
        assert!(!GithubRegistry::supports("gitlab.com/user/repo"));
    }

    #[test]
    fn test_github_identity() {
        assert_eq!(
            GithubIdentity::parse("github.com/user/repo:2.x").unwrap(),
            GithubIdentity {
                author: "user".to_string(),
                repository: "repo".to_string(),
                version: "2.x".to_string(),
            }
        );

        let identity = GithubIdentity::parse("https://github.com/user/repo").unwrap();
        assert_eq!(identity.version, "main");
        assert_eq!(identity.archive_folder(), "repo-main");

        assert!(GithubIdentity::parse("github.com/user/repo@2.1").is_err());
    }

    #[tokio::test]
    async fn test_local_get_kit() {
        let registry = LocalRegistry::new(fixture(""));
        let kit = registry.get_kit("shadcn").await.unwrap();
        assert_eq!(kit.name(), "Shadcn UI");
        assert_eq!(registry.registry_type(), RegistryType::Local);
    }

    #[tokio::test]
    async fn test_local_missing_kit() {
        let temp_dir = TempDir::new().unwrap();
        let registry = LocalRegistry::new(temp_dir.path());

        let err = registry.get_kit("shadcn").await.unwrap_err();
        assert_eq!(err.to_string(), "Not found: Kit \"shadcn\" does not exist.");
    }

    #[tokio::test]
    async fn test_local_rejects_paths_outside_kits_dir() {
        let registry = LocalRegistry::new(fixture("shadcn"));

        for kit in ["../shadcn", "..", "/tmp", "shadcn/button"] {
            let err = registry.get_kit(kit).await.unwrap_err();
            assert!(matches!(err, ToolkitError::Validation(_)), "{}", kit);
        }
    }

    #[test]
    fn test_local_available_kit_names() {
        let registry = LocalRegistry::new(fixture(""));
        assert_eq!(
            registry.available_kit_names().unwrap(),
            vec![
                "shadcn",
                "with-circular-components-dependencies",
                "with-many-dependencies",
                "with-missing-recipe-dependency",
            ]
        );

        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("not a kit")).unwrap();
        fs::write(temp_dir.path().join("file"), "").unwrap();
        let registry = LocalRegistry::new(temp_dir.path());
        assert!(registry.available_kit_names().unwrap().is_empty());

        let registry = LocalRegistry::new(temp_dir.path().join("missing"));
        assert!(registry.available_kit_names().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_github_get_kit() {
        let fetcher = Arc::new(FakeFetcher::serving("shadcn", "ui-kit-2.x"));
        let registry = GithubRegistry::new(fetcher.clone());

        let kit = registry.get_kit("github.com/acme/ui-kit:2.x").await.unwrap();
        assert_eq!(kit.name(), "Shadcn UI");
        assert!(kit.path().ends_with("ui-kit-2.x"));
        assert!(kit.recipe("table", None).is_some());
        assert_eq!(
            *fetcher.requested.lock().unwrap(),
            vec!["https://github.com/acme/ui-kit/archive/2.x.zip".to_string()]
        );

        let scratch = kit.path().parent().unwrap().to_path_buf();
        assert!(scratch.exists());
        drop(kit);
        assert!(!scratch.exists());
    }

    #[tokio::test]
    async fn test_github_download_failure() {
        let registry = GithubRegistry::new(Arc::new(FakeFetcher::failing()));

        let err = registry.get_kit("github.com/acme/missing").await.unwrap_err();
        assert!(matches!(err, ToolkitError::Download(_)));
        assert!(err
            .to_string()
            .contains("https://github.com/acme/missing/archive/main.zip"));
    }

    #[tokio::test]
    async fn test_github_unexpected_archive_layout() {
        let fetcher = Arc::new(FakeFetcher::serving("shadcn", "something-else"));
        let registry = GithubRegistry::new(fetcher);

        let err = registry.get_kit("github.com/acme/ui-kit").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Archive error: Unable to extract the archive from \"https://github.com/acme/ui-kit/archive/main.zip\", ensure the repository exists and the version is valid."
        );
    }

    #[tokio::test]
    async fn test_factory_dispatch() {
        let mut factory = RegistryFactory::new();
        factory.register(Arc::new(LocalRegistry::new(fixture(""))));

        let registry = factory.for_kit("shadcn").unwrap();
        assert_eq!(registry.registry_type(), RegistryType::Local);

        let err = factory.for_kit("github.com/user/repo").err().unwrap();
        assert_eq!(
            err.to_string(),
            "Integrity error: The registry for the kit \"github.com/user/repo\" is not registered."
        );

        factory.register(Arc::new(GithubRegistry::new(Arc::new(FakeFetcher::failing()))));
        let registry = factory.for_kit("github.com/user/repo").unwrap();
        assert_eq!(registry.registry_type(), RegistryType::GitHub);
    }

    #[test]
    fn test_factory_invalid_kits() {
        let factory = RegistryFactory::new();
        for kit in [
            "",
            "httpppps://github.com/user/repo@kit-name:2.x",
            "github.com/user/repo:kit-name@1.0.0",
            "github.com/user/repo@2.1",
        ] {
            let err = factory.for_kit(kit).err().unwrap();
            assert_eq!(err.to_string(), format!("Validation error: The kit \"{}\" is not valid.", kit));
        }
    }

    #[test]
    fn test_factory_from_config() {
        let config = ToolkitConfig {
            kits_dir: Some(fixture("")),
            ..Default::default()
        };
        let factory = RegistryFactory::from_config(&config).unwrap();

        assert_eq!(factory.for_kit("shadcn").unwrap().registry_type(), RegistryType::Local);
        assert_eq!(
            factory.for_kit("github.com/user/repo").unwrap().registry_type(),
            RegistryType::GitHub
        );
    }
}
