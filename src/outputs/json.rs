//! JSON output of page view models.
//!
//! The same view model the HTML writer consumes is serialized as-is, so a
//! client-side front end can draw the page without re-implementing the
//! filtering, sorting, and fallback rules.

use serde::Serialize;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `view` as pretty JSON to `path`.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_view<V>(view: &V, path: &str) -> Result<(), Box<dyn Error>>
where
    V: Serialize,
{
    let json = serde_json::to_string_pretty(view)?;
    if let Err(e) = fs::write(path, json).await {
        error!(error = %e, "Failed to write view JSON");
        return Err(e.into());
    }
    info!("Wrote view JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, DigestSet, Language, NewsDigest};
    use crate::pages::home::{HomeData, render_home};
    use crate::state::{PageState, Store};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_home_view_json_shape() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut store = Store::new(PageState::default());
        store.finish_loading(HomeData {
            digests: DigestSet {
                en: Some(NewsDigest {
                    articles: vec![Article {
                        title: Some("Hello".to_string()),
                        ..Article::default()
                    }],
                }),
                zh: None,
            },
            latest_release: None,
            effective_date: today,
        });
        let view = render_home(store.snapshot(), today);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        write_view(&view, path.to_str().unwrap()).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["language"], "en");
        assert_eq!(value["title"], "AI News Daily Digest");
        assert_eq!(value["news"]["cards"][0]["title"], "Hello");
        assert_eq!(value["news"]["cards"][0]["source"], "Unknown Source");
        assert_eq!(value["news"]["no_news_visible"], false);
        assert_eq!(value["downloads"].as_array().map(Vec::len), Some(0));
        assert_eq!(value["selectors"][0]["id"], "lang-en");
        assert_eq!(value["selectors"][0]["active"], true);
    }

    #[tokio::test]
    async fn test_write_view_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/index.json");
        assert!(write_view(&Language::En, path.to_str().unwrap()).await.is_err());
    }
}
