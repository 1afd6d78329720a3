//! Command-line interface definitions for the AI News site renderer.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Source locations can also be provided via environment variables; anything
//! given here overrides the optional YAML config file.

use crate::models::Language;
use clap::{Parser, ValueEnum};

/// Which page(s) to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageSelection {
    Home,
    Archive,
    All,
}

impl PageSelection {
    pub fn includes_home(self) -> bool {
        matches!(self, PageSelection::Home | PageSelection::All)
    }

    pub fn includes_archive(self) -> bool {
        matches!(self, PageSelection::Archive | PageSelection::All)
    }
}

/// Which language variant(s) to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageSelection {
    En,
    Zh,
    All,
}

impl LanguageSelection {
    pub fn languages(self) -> Vec<Language> {
        match self {
            LanguageSelection::En => vec![Language::En],
            LanguageSelection::Zh => vec![Language::Zh],
            LanguageSelection::All => Language::ALL.to_vec(),
        }
    }
}

/// Output formats to write for each rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
    All,
}

impl OutputFormat {
    pub fn html(self) -> bool {
        matches!(self, OutputFormat::Html | OutputFormat::All)
    }

    pub fn json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::All)
    }
}

/// Command-line arguments for the AI News site renderer.
///
/// # Examples
///
/// ```sh
/// # Render both pages in both languages
/// ai_news_site -o ./public
///
/// # Only the archive, Chinese, as view-model JSON
/// ai_news_site -o ./public --page archive --lang zh --format json
///
/// # Derive the GitHub repository from the published site URL
/// ai_news_site -o ./public --site-url https://octocat.github.io/AI_news/
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the rendered pages
    #[arg(short, long)]
    pub output_dir: String,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base URL of the directory holding latest.json and latest_cn.json
    #[arg(long, env = "AI_NEWS_DATA_URL")]
    pub data_url: Option<String>,

    /// GitHub repository hosting the releases, as OWNER/NAME
    #[arg(long, env = "AI_NEWS_REPO")]
    pub repo: Option<String>,

    /// Public URL of the site; used to derive the repository and data URL
    #[arg(long, env = "AI_NEWS_SITE_URL")]
    pub site_url: Option<String>,

    /// Page(s) to render
    #[arg(long, value_enum, default_value_t = PageSelection::All)]
    pub page: PageSelection,

    /// Language variant(s) to render
    #[arg(long, value_enum, default_value_t = LanguageSelection::All)]
    pub lang: LanguageSelection,

    /// Output format(s)
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,
}
