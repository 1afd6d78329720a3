//! Home page: today's digest and the download menu.
//!
//! On load both digests are fetched concurrently; a failure on one language
//! never blocks the other. If either language has articles, the latest
//! release is fetched (best effort) to fill the download menu, otherwise the
//! "no news" state is shown and the release is never requested.
//!
//! Download file names are keyed by the *effective date*: the UTC date of
//! the first article's `publishedAt` (English digest first, then Chinese),
//! or today when neither has one.

use crate::api::{FetchOutcome, fetch_digest, fetch_latest_release};
use crate::config::SiteConfig;
use crate::dates::{DateStyle, format_date, format_naive_date, utc_date};
use crate::downloads::resolve_download_links;
use crate::i18n::{
    self, BoundText, HOME_TEXTS, NO_DESCRIPTION, NO_TITLE, UNKNOWN_SOURCE, bind_texts,
    document_title,
};
use crate::models::{DigestSet, Language, NewsDigest, Release};
use crate::pages::{LanguageSelector, language_selectors};
use crate::state::{PageState, Store};
use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Everything the home page fetched, cached for the page's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeData {
    pub digests: DigestSet,
    pub latest_release: Option<Release>,
    pub effective_date: NaiveDate,
}

/// One rendered news card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsCard {
    pub title: String,
    pub source: String,
    pub date: String,
    pub description: String,
    pub url: String,
    pub read_more: &'static str,
}

/// The news container and its two placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsSection {
    pub loading_visible: bool,
    pub no_news_visible: bool,
    pub cards: Vec<NewsCard>,
}

/// One entry of the download dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadMenuEntry {
    pub label: &'static str,
    pub file_name: String,
    pub url: String,
}

/// Everything needed to draw the home page in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeView {
    pub language: Language,
    pub title: &'static str,
    pub texts: Vec<BoundText>,
    pub selectors: Vec<LanguageSelector>,
    pub date_display: String,
    pub copyright: String,
    pub news: NewsSection,
    pub downloads: Vec<DownloadMenuEntry>,
}

/// The date release assets are expected to carry.
pub fn effective_date(digests: &DigestSet, today: NaiveDate) -> NaiveDate {
    Language::ALL
        .iter()
        .filter_map(|&lang| digests.get(lang))
        .filter_map(|digest| digest.articles.first())
        .filter_map(|article| article.published_at.as_deref())
        .find_map(utc_date)
        .unwrap_or(today)
}

fn digest_or_log(outcome: FetchOutcome<NewsDigest>, language: Language) -> Option<NewsDigest> {
    match outcome {
        FetchOutcome::Loaded(digest) => {
            info!(%language, count = digest.articles.len(), "Loaded news digest");
            Some(digest)
        }
        FetchOutcome::Failed(e) => {
            error!(%language, url = e.url(), error = %e, "Error fetching news digest");
            None
        }
    }
}

/// Fetch both digests and, if there is news, the latest release.
#[instrument(level = "info", skip_all, fields(repo = %config.repo()))]
pub async fn load_home(client: &Client, config: &SiteConfig, today: NaiveDate) -> HomeData {
    let (en, zh) = futures::join!(
        fetch_digest(client, config, Language::En),
        fetch_digest(client, config, Language::Zh),
    );
    let digests = DigestSet {
        en: digest_or_log(en, Language::En),
        zh: digest_or_log(zh, Language::Zh),
    };

    let latest_release = if digests.has_articles() {
        match fetch_latest_release(client, config).await {
            FetchOutcome::Loaded(release) => {
                info!(
                    name = release.name.as_deref().unwrap_or_default(),
                    assets = release.assets.len(),
                    "Loaded latest release"
                );
                Some(release)
            }
            FetchOutcome::Failed(e) => {
                warn!(error = %e, "Failed to fetch release data for download links");
                None
            }
        }
    } else {
        info!("No news in either language; skipping release lookup");
        None
    };

    let effective_date = effective_date(&digests, today);
    HomeData {
        digests,
        latest_release,
        effective_date,
    }
}

/// Empty strings count as missing.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Render the news container for one digest.
///
/// Articles keep their input order. Missing fields get fallback text.
pub fn render_news(digest: Option<&NewsDigest>, language: Language) -> NewsSection {
    let articles = digest.map(|d| d.articles.as_slice()).unwrap_or_default();
    if articles.is_empty() {
        return NewsSection {
            loading_visible: false,
            no_news_visible: true,
            cards: Vec::new(),
        };
    }

    let cards = articles
        .iter()
        .map(|article| NewsCard {
            title: non_empty(&article.title).unwrap_or(NO_TITLE).to_string(),
            source: article
                .source_name()
                .unwrap_or(UNKNOWN_SOURCE)
                .to_string(),
            date: format_date(
                non_empty(&article.published_at).unwrap_or_default(),
                language,
                DateStyle::DateTime,
            ),
            description: non_empty(&article.description)
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            url: non_empty(&article.url).unwrap_or("#").to_string(),
            read_more: i18n::read_more(language),
        })
        .collect();

    NewsSection {
        loading_visible: false,
        no_news_visible: false,
        cards,
    }
}

/// Menu entries for the release assets matching `date`.
pub fn download_menu(release: Option<&Release>, date: NaiveDate) -> Vec<DownloadMenuEntry> {
    let Some(release) = release else {
        return Vec::new();
    };
    resolve_download_links(release, &date.format("%Y-%m-%d").to_string())
        .into_iter()
        .map(|link| DownloadMenuEntry {
            label: link.file_type.menu_label,
            file_name: link.file_name,
            url: link.url,
        })
        .collect()
}

/// Render the whole home page from a state snapshot.
pub fn render_home(state: &PageState<HomeData>, today: NaiveDate) -> HomeView {
    let language = state.language;
    let (news, downloads) = match state.data.data() {
        None => (
            NewsSection {
                loading_visible: true,
                no_news_visible: false,
                cards: Vec::new(),
            },
            Vec::new(),
        ),
        Some(data) => (
            render_news(data.digests.get(language), language),
            download_menu(data.latest_release.as_ref(), data.effective_date),
        ),
    };

    HomeView {
        language,
        title: document_title(HOME_TEXTS, language),
        texts: bind_texts(HOME_TEXTS, language),
        selectors: language_selectors(language),
        date_display: format_naive_date(today, language, DateStyle::Long),
        copyright: i18n::copyright(today.year()),
        news,
        downloads,
    }
}

/// Controller for the home page.
pub struct HomePage {
    store: Store<PageState<HomeData>>,
    today: NaiveDate,
}

impl HomePage {
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
        F: FnMut(HomeView) + Send + 'static,
    {
        let today = self.today;
        self.store
            .subscribe(move |state: &PageState<HomeData>| on_render(render_home(state, today)));
    }

    pub async fn load(&mut self, client: &Client, config: &SiteConfig) {
        let data = load_home(client, config, self.today).await;
        self.store.finish_loading(data);
    }

    pub fn set_language(&mut self, language: Language) -> bool {
        self.store.set_language(language)
    }

    pub fn view(&self) -> HomeView {
        render_home(self.store.snapshot(), self.today)
    }
}
