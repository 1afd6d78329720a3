//! Data models for news digests and GitHub releases.
//!
//! This module defines the payloads consumed by the site:
//! - [`NewsDigest`] / [`Article`]: the day's articles for one language, as
//!   written to `latest.json` and `latest_cn.json` by the publishing pipeline
//! - [`Release`] / [`ReleaseAsset`]: the subset of a GitHub Release the
//!   site needs to build download links
//! - [`Language`]: the two display languages of the site
//!
//! Article fields are all optional because the upstream pipeline passes
//! NewsAPI records through untouched; the renderers supply fallback text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display language of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// Both languages, English first.
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    /// The short code used in element ids and file names (`en` / `zh`).
    pub const fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// The value for the `lang` attribute of the page.
    pub const fn html_lang(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh-CN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The news outlet an article came from.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ArticleSource {
    pub name: Option<String>,
}

/// A single news article from a digest.
///
/// Field names follow the NewsAPI record layout (`publishedAt`), which the
/// publishing pipeline writes verbatim.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Article {
    /// The outlet name, if the record carries a non-empty one.
    pub fn source_name(&self) -> Option<&str> {
        self.source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// The day's collection of articles for one language.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct NewsDigest {
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl NewsDigest {
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Both language digests as loaded; `None` means the fetch failed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DigestSet {
    pub en: Option<NewsDigest>,
    pub zh: Option<NewsDigest>,
}

impl DigestSet {
    pub fn get(&self, language: Language) -> Option<&NewsDigest> {
        match language {
            Language::En => self.en.as_ref(),
            Language::Zh => self.zh.as_ref(),
        }
    }

    /// `true` when at least one language has articles to show.
    pub fn has_articles(&self) -> bool {
        Language::ALL
            .iter()
            .any(|lang| self.get(*lang).is_some_and(|d| !d.is_empty()))
    }
}

/// A downloadable file attached to a release. Does not contain all fields.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// A GitHub release. Does not contain all fields.
///
/// See the GitHub [docs](https://docs.github.com/en/rest/releases/releases)
/// for the full object.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Look up the download URL of the asset whose name is exactly `file_name`.
    pub fn asset_url(&self, file_name: &str) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| asset.name == file_name)
            .map(|asset| asset.browser_download_url.as_str())
    }
}
