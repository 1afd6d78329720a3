//! Archive page: one row per dated release.
//!
//! Only releases named `AI News YYYY-MM-DD` are listed; anything else is
//! skipped without complaint. Rows are ordered newest first by the release's
//! `published_at`, while each row's label and asset file names use the date
//! embedded in the name. The two can disagree for a release that was
//! republished later; the row then sits at its publish position but still
//! links the files of its named day.

use crate::api::{FetchOutcome, fetch_releases};
use crate::config::SiteConfig;
use crate::dates::{DateStyle, format_date, parse_timestamp};
use crate::downloads::resolve_download_links;
use crate::i18n::{self, ARCHIVE_TEXTS, BoundText, bind_texts, document_title};
use crate::models::{Language, Release};
use crate::pages::{LanguageSelector, language_selectors};
use crate::state::{PageState, Store};
use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use std::cmp::Reverse;
use tracing::{debug, error, info, instrument};

// ASCII digits only; `\d` would also accept full-width numerals.
static RELEASE_NAME_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"AI News ([0-9]{4}-[0-9]{2}-[0-9]{2})").expect("valid release name regex")
});

/// The releases list as fetched; `None` when the fetch failed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArchiveData {
    pub releases: Option<Vec<Release>>,
}

/// A release that made it into the archive, with its name date.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry<'a> {
    pub date: &'a str,
    pub release: &'a Release,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveLink {
    pub key: String,
    pub label: &'static str,
    pub icon: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveRow {
    /// `YYYY-MM-DD` from the release name.
    pub date: String,
    pub date_label: String,
    pub links: Vec<ArchiveLink>,
}

/// Everything needed to draw the archive page in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveView {
    pub language: Language,
    pub title: &'static str,
    pub texts: Vec<BoundText>,
    pub selectors: Vec<LanguageSelector>,
    pub copyright: String,
    pub loading_visible: bool,
    pub no_archive_visible: bool,
    pub rows: Vec<ArchiveRow>,
}

/// The `YYYY-MM-DD` embedded in an `AI News YYYY-MM-DD` release name.
pub fn release_date(name: &str) -> Option<&str> {
    RELEASE_NAME_DATE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Dated releases, newest `published_at` first.
///
/// The sort is stable; releases with a missing or unparseable timestamp go
/// last in input order.
pub fn archive_entries(releases: &[Release]) -> Vec<ArchiveEntry<'_>> {
    releases
        .iter()
        .sorted_by_key(|release| {
            Reverse(release.published_at.as_deref().and_then(parse_timestamp))
        })
        .filter_map(|release| {
            let name = release.name.as_deref().unwrap_or_default();
            match release_date(name) {
                Some(date) => Some(ArchiveEntry { date, release }),
                None => {
                    debug!(name, "Skipping release without an AI News date");
                    None
                }
            }
        })
        .collect()
}

/// Render one archive row.
pub fn render_row(entry: &ArchiveEntry<'_>, language: Language) -> ArchiveRow {
    let links = resolve_download_links(entry.release, entry.date)
        .into_iter()
        .map(|link| ArchiveLink {
            key: link.file_type.key(),
            label: link.file_type.archive_label(language),
            icon: link.file_type.format.icon(),
            url: link.url,
        })
        .collect();

    ArchiveRow {
        date: entry.date.to_string(),
        date_label: format_date(entry.date, language, DateStyle::Date),
        links,
    }
}

/// Render the whole archive page from a state snapshot.
pub fn render_archive(state: &PageState<ArchiveData>, today: NaiveDate) -> ArchiveView {
    let language = state.language;
    let (loading_visible, rows) = match state.data.data() {
        None => (true, Vec::new()),
        Some(data) => {
            let releases = data.releases.as_deref().unwrap_or_default();
            let rows = archive_entries(releases)
                .iter()
                .map(|entry| render_row(entry, language))
                .collect();
            (false, rows)
        }
    };
    let no_archive_visible = !loading_visible && rows.is_empty();

    ArchiveView {
        language,
        title: document_title(ARCHIVE_TEXTS, language),
        texts: bind_texts(ARCHIVE_TEXTS, language),
        selectors: language_selectors(language),
        copyright: i18n::copyright(today.year()),
        loading_visible,
        no_archive_visible,
        rows,
    }
}

/// Fetch the releases list once.
#[instrument(level = "info", skip_all, fields(repo = %config.repo()))]
pub async fn load_archive(client: &Client, config: &SiteConfig) -> ArchiveData {
    match fetch_releases(client, config).await {
        FetchOutcome::Loaded(releases) => {
            info!(count = releases.len(), "Loaded releases");
            ArchiveData {
                releases: Some(releases),
            }
        }
        FetchOutcome::Failed(e) => {
            error!(url = e.url(), error = %e, "Error fetching releases");
            ArchiveData { releases: None }
        }
    }
}

/// Controller for the archive page.
pub struct ArchivePage {
    store: Store<PageState<ArchiveData>>,
    today: NaiveDate,
}

impl ArchivePage {
    pub fn new(language: Language, today: NaiveDate) -> Self {
        Self {
            store: Store::new(PageState {
                language,
                ..PageState::default()
            }),
            today,
        }
    }

    /// Receive a freshly rendered view after every state change.
    pub fn subscribe<F>(&mut self, mut on_render: F)
    where
        F: FnMut(ArchiveView) + Send + 'static,
    {
        let today = self.today;
        self.store.subscribe(move |state: &PageState<ArchiveData>| {
            on_render(render_archive(state, today))
        });
    }

    pub async fn load(&mut self, client: &Client, config: &SiteConfig) {
        let data = load_archive(client, config).await;
        self.store.finish_loading(data);
    }

    pub fn set_language(&mut self, language: Language) -> bool {
        self.store.set_language(language)
    }

    pub fn view(&self) -> ArchiveView {
        render_archive(self.store.snapshot(), self.today)
    }
}
