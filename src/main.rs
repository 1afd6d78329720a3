//! # AI News Site
//!
//! Renders the bilingual (English/Chinese) AI News daily digest and its
//! release archive as static pages.
//!
//! ## Features
//!
//! - Loads today's digests (`latest.json`, `latest_cn.json`) concurrently,
//!   tolerating either one being missing
//! - Resolves the latest GitHub release into a per-format download menu
//! - Lists every `AI News YYYY-MM-DD` release as an archive row, newest first
//! - Renders each page in English and Chinese, as HTML and/or view-model JSON
//!
//! ## Usage
//!
//! ```sh
//! ai_news_site -o ./public --site-url https://octocat.github.io/AI_news/
//! ```
//!
//! ## Architecture
//!
//! 1. **Load**: fetch digests and releases once per page
//! 2. **State**: a store per page holds the language and fetched data
//! 3. **Render**: pure functions turn state snapshots into view models
//! 4. **Output**: subscribers collect each rendered view; views are
//!    written as HTML / JSON

use clap::Parser;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod dates;
mod downloads;
mod error;
mod i18n;
mod models;
mod outputs;
mod pages;
mod state;
mod utils;

use cli::Cli;
use models::Language;
use outputs::{RenderedPage, write_page};
use pages::archive::ArchivePage;
use pages::home::HomePage;
use utils::{ensure_writable_dir, local_today};

type RenderSink = Arc<Mutex<Vec<RenderedPage>>>;

fn push_rendered(sink: &RenderSink, page: RenderedPage) {
    match sink.lock() {
        Ok(mut pages) => pages.push(page),
        Err(e) => error!(error = %e, "Render sink poisoned; dropping page"),
    }
}

/// Load a page once, then render it in every requested language.
///
/// The page starts in the first language so that the load itself produces
/// that variant; each further language is one toggle.
#[instrument(level = "info", skip_all)]
async fn render_home(
    client: &reqwest::Client,
    config: &config::SiteConfig,
    languages: &[Language],
    sink: &RenderSink,
) {
    let Some((&first, rest)) = languages.split_first() else {
        return;
    };
    let mut page = HomePage::new(first, local_today());
    let out = Arc::clone(sink);
    page.subscribe(move |view| push_rendered(&out, RenderedPage::Home(view)));

    page.load(client, config).await;
    for &language in rest {
        if !page.set_language(language) {
            debug!(%language, "Language already active");
        }
    }
    info!(cards = page.view().news.cards.len(), "Home page ready");
}

#[instrument(level = "info", skip_all)]
async fn render_archive(
    client: &reqwest::Client,
    config: &config::SiteConfig,
    languages: &[Language],
    sink: &RenderSink,
) {
    let Some((&first, rest)) = languages.split_first() else {
        return;
    };
    let mut page = ArchivePage::new(first, local_today());
    let out = Arc::clone(sink);
    page.subscribe(move |view| push_rendered(&out, RenderedPage::Archive(view)));

    page.load(client, config).await;
    for &language in rest {
        if !page.set_language(language) {
            debug!(%language, "Language already active");
        }
    }
    info!(rows = page.view().rows.len(), "Archive page ready");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ai_news_site starting up");

    let args = Cli::parse();
    debug!(?args.output_dir, ?args.page, ?args.lang, ?args.format, "Parsed CLI arguments");

    // Early check: ensure output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let config = config::load_config(&args).await?;
    let client = api::build_client(&config)?;
    let languages = args.lang.languages();

    let sink: RenderSink = Arc::new(Mutex::new(Vec::new()));
    if args.page.includes_home() {
        render_home(&client, &config, &languages, &sink).await;
    }
    if args.page.includes_archive() {
        render_archive(&client, &config, &languages, &sink).await;
    }

    let rendered = match sink.lock() {
        Ok(mut pages) => std::mem::take(&mut *pages),
        Err(e) => return Err(format!("render sink poisoned: {e}").into()),
    };
    info!(count = rendered.len(), "Rendered pages");

    let mut failed = 0usize;
    let mut files = 0usize;
    for page in &rendered {
        match write_page(page, &args.output_dir, args.format).await {
            Ok(paths) => files += paths.len(),
            Err(e) => {
                failed += 1;
                error!(page = ?page.kind(), language = %page.language(), error = %e, "Failed to write page");
            }
        }
    }
    info!(files, output_dir = %args.output_dir, "Wrote output files");
    if failed > 0 {
        warn!(failed, "Some pages could not be written");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
