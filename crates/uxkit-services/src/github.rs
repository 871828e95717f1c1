//! GitHub archive client implementation.

use async_trait::async_trait;
use reqwest::{header, Client};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;
use uxkit_core::GithubSettings;
use uxkit_types::{Result, ToolkitError};

/// Source of repository archives.
///
/// Implemented by [`GithubClient`]; tests substitute their own.
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// URL of the zip archive for a repository at a given ref.
    fn archive_url(&self, author: &str, repository: &str, reference: &str) -> String;

    /// Download `url` into `destination`, returning the number of bytes written.
    ///
    /// Any non-success response is an error; nothing is retried.
    async fn download(&self, url: &str, destination: &Path) -> Result<u64>;
}

/// GitHub client configuration.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Base URL archives are served from
    pub archive_url: String,
    /// Personal access token (optional, for private repositories)
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            archive_url: "https://github.com".to_string(),
            token: None,
        }
    }
}

impl From<&GithubSettings> for GithubConfig {
    fn from(settings: &GithubSettings) -> Self {
        Self {
            archive_url: settings.archive_url.clone(),
            token: settings.token.clone(),
        }
    }
}

/// GitHub client for downloading repository archives.
pub struct GithubClient {
    config: GithubConfig,
    client: Client,
}

impl GithubClient {
    /// Create a new GitHub client.
    pub fn new(config: GithubConfig) -> Result<Self> {
        Url::parse(&config.archive_url).map_err(|e| {
            ToolkitError::Config(format!(
                "Invalid GitHub archive URL \"{}\": {}",
                config.archive_url, e
            ))
        })?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("uxkit/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ToolkitError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl ArchiveFetcher for GithubClient {
    fn archive_url(&self, author: &str, repository: &str, reference: &str) -> String {
        format!(
            "{}/{}/{}/archive/{}.zip",
            self.config.archive_url.trim_end_matches('/'),
            author,
            repository,
            reference
        )
    }

    async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        info!("Downloading {}", url);

        let mut req = self.client.get(url);
        if let Some(token) = &self.config.token {
            req = req.header(header::AUTHORIZATION, format!("token {}", token));
        }

        let mut response = req
            .send()
            .await
            .map_err(|e| ToolkitError::Download(format!("Failed to download \"{}\": {}", url, e)))?;

        if !response.status().is_success() {
            debug!("GET {} returned {}", url, response.status());
            return Err(ToolkitError::Download(format!(
                "Unable to download the archive from \"{}\", ensure the repository exists and the version is valid.",
                url
            )));
        }

        let mut file = tokio::fs::File::create(destination).await?;
        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ToolkitError::Download(format!("Failed to read \"{}\": {}", url, e)))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!("Wrote {} bytes to {:?}", written, destination);
        Ok(written)
    }
}
