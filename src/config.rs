//! Site configuration: where the digests and releases live.
//!
//! Values come from three layers, later ones winning:
//! 1. Built-in defaults (the upstream project's placeholder repository)
//! 2. An optional YAML file (`-c site.yaml`)
//! 3. Command-line flags / environment variables
//!
//! ```yaml
//! data_base_url: https://octocat.github.io/AI_news/data
//! github_api_base: https://api.github.com
//! repo_owner: octocat
//! repo_name: AI_news
//! user_agent: ai_news_site
//! request_timeout_secs: 30
//! releases_per_page: 100
//! ```

use crate::cli::Cli;
use crate::models::Language;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use tracing::{debug, info, instrument};
use url::Url;

pub const DEFAULT_REPO_OWNER: &str = "your-username";
pub const DEFAULT_REPO_NAME: &str = "AI_news";

/// A GitHub repository, `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath {
    pub owner: String,
    pub name: String,
}

impl RepoPath {
    /// Parse `OWNER/NAME`.
    pub fn parse(s: &str) -> Result<Self, Box<dyn Error>> {
        match s.trim().trim_matches('/').split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(format!("invalid repository '{s}', expected OWNER/NAME").into()),
        }
    }

    /// Derive the repository from the URL a GitHub Pages site is served at.
    ///
    /// `https://octocat.github.io/AI_news/` maps to `octocat/AI_news`: the
    /// first host label is the owner and the first path segment the name.
    /// A `localhost` host falls back to the placeholder owner and a bare
    /// host to the default repository name.
    pub fn from_site_url(site_url: &Url) -> Self {
        let name = site_url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .filter(|segment| !segment.is_empty())
            .unwrap_or(DEFAULT_REPO_NAME)
            .to_string();

        let host = site_url.host_str().unwrap_or_default();
        let owner = if host == "localhost" || host.is_empty() {
            DEFAULT_REPO_OWNER.to_string()
        } else {
            host.split('.').next().unwrap_or(DEFAULT_REPO_OWNER).to_string()
        };

        Self { owner, name }
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Resolved configuration for fetching site data.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory URL holding `latest.json` and `latest_cn.json`.
    pub data_base_url: String,
    pub github_api_base: String,
    pub repo_owner: String,
    pub repo_name: String,
    /// GitHub rejects API requests without a User-Agent.
    pub user_agent: String,
    pub request_timeout_secs: Option<u64>,
    pub releases_per_page: Option<u32>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_base_url: format!("https://{DEFAULT_REPO_OWNER}.github.io/{DEFAULT_REPO_NAME}/data"),
            github_api_base: "https://api.github.com".to_string(),
            repo_owner: DEFAULT_REPO_OWNER.to_string(),
            repo_name: DEFAULT_REPO_NAME.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: None,
            releases_per_page: None,
        }
    }
}

impl SiteConfig {
    /// Parse a YAML document; missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Layer command-line values over this configuration.
    ///
    /// `--site-url` fills in the repository and data URL; an explicit
    /// `--repo` or `--data-url` takes precedence over what it derives.
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), Box<dyn Error>> {
        if let Some(site_url) = &cli.site_url {
            let mut site_url = Url::parse(site_url)?;
            // A bare directory like `/AI_news` gets its slash; a page like
            // `/AI_news/index.html` is joined as given.
            let last = site_url.path().rsplit('/').next().unwrap_or_default();
            if !last.is_empty() && !last.contains('.') {
                let path = format!("{}/", site_url.path());
                site_url.set_path(&path);
            }
            let repo = RepoPath::from_site_url(&site_url);
            debug!(%site_url, %repo, "Derived repository from site URL");
            self.set_repo(repo);
            self.data_base_url = site_url.join("data")?.to_string();
        }
        if let Some(repo) = &cli.repo {
            self.set_repo(RepoPath::parse(repo)?);
        }
        if let Some(data_url) = &cli.data_url {
            self.data_base_url = data_url.clone();
        }
        Ok(())
    }

    pub fn repo(&self) -> RepoPath {
        RepoPath {
            owner: self.repo_owner.clone(),
            name: self.repo_name.clone(),
        }
    }

    fn set_repo(&mut self, repo: RepoPath) {
        self.repo_owner = repo.owner;
        self.repo_name = repo.name;
    }

    /// URL of the digest for `language`.
    pub fn digest_url(&self, language: Language) -> String {
        let suffix = match language {
            Language::En => "",
            Language::Zh => "_cn",
        };
        format!("{}/latest{suffix}.json", self.data_base_url.trim_end_matches('/'))
    }

    fn releases_base(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.github_api_base.trim_end_matches('/'),
            self.repo_owner,
            self.repo_name
        )
    }

    pub fn releases_url(&self) -> String {
        match self.releases_per_page {
            Some(per_page) => format!("{}?per_page={per_page}", self.releases_base()),
            None => self.releases_base(),
        }
    }

    pub fn latest_release_url(&self) -> String {
        format!("{}/latest", self.releases_base())
    }
}

/// Load the config file (if any) and apply command-line overrides.
#[instrument(level = "info", skip_all, fields(config = ?cli.config))]
pub async fn load_config(cli: &Cli) -> Result<SiteConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            let yaml = tokio::fs::read_to_string(path).await?;
            SiteConfig::from_yaml(&yaml)?
        }
        None => SiteConfig::default(),
    };
    config.apply_cli(cli)?;
    info!(
        repo = %config.repo(),
        data_base_url = %config.data_base_url,
        "Loaded site configuration"
    );
    Ok(config)
}
