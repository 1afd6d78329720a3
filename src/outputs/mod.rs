//! Output generation for rendered pages.
//!
//! # Submodules
//!
//! - [`html`]: Complete static HTML pages built with Maud
//! - [`json`]: The view models themselves, for a client-side front end
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── index.html        # Home, English
//! ├── index.zh.html     # Home, Chinese
//! ├── archive.html      # Archive, English
//! ├── archive.zh.html   # Archive, Chinese
//! └── *.json            # Same stems, with --format json|all
//! ```

use crate::cli::OutputFormat;
use crate::models::Language;
use crate::pages::PageKind;
use crate::pages::archive::ArchiveView;
use crate::pages::home::HomeView;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

pub mod html;
pub mod json;

/// File name without extension for a page in one language.
pub fn file_stem(page: PageKind, language: Language) -> String {
    let base = match page {
        PageKind::Home => "index",
        PageKind::Archive => "archive",
    };
    match language {
        Language::En => base.to_string(),
        Language::Zh => format!("{base}.{}", language.code()),
    }
}

/// Relative link to a page's HTML file.
pub fn page_href(page: PageKind, language: Language) -> String {
    format!("{}.html", file_stem(page, language))
}

/// A view ready to be written out.
#[derive(Debug, Clone)]
pub enum RenderedPage {
    Home(HomeView),
    Archive(ArchiveView),
}

impl RenderedPage {
    pub fn kind(&self) -> PageKind {
        match self {
            RenderedPage::Home(_) => PageKind::Home,
            RenderedPage::Archive(_) => PageKind::Archive,
        }
    }

    pub fn language(&self) -> Language {
        match self {
            RenderedPage::Home(view) => view.language,
            RenderedPage::Archive(view) => view.language,
        }
    }
}

/// Write `page` into `output_dir` in the requested format(s).
///
/// Returns the paths written.
#[instrument(level = "info", skip_all, fields(page = ?page.kind(), language = %page.language()))]
pub async fn write_page(
    page: &RenderedPage,
    output_dir: &str,
    format: OutputFormat,
) -> Result<Vec<String>, Box<dyn Error>> {
    let stem = file_stem(page.kind(), page.language());
    let dir = output_dir.trim_end_matches('/');
    let mut written = Vec::new();

    if format.html() {
        let markup = match page {
            RenderedPage::Home(view) => html::render_home_page(view),
            RenderedPage::Archive(view) => html::render_archive_page(view),
        };
        let path = format!("{dir}/{stem}.html");
        fs::write(&path, markup.into_string()).await?;
        info!(path = %path, "Wrote HTML page");
        written.push(path);
    }

    if format.json() {
        let path = format!("{dir}/{stem}.json");
        match page {
            RenderedPage::Home(view) => json::write_view(view, &path).await?,
            RenderedPage::Archive(view) => json::write_view(view, &path).await?,
        }
        written.push(path);
    }

    Ok(written)
}
