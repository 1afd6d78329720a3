//! HTML page generation with Maud.
//!
//! Turns [`HomeView`] and [`ArchiveView`] into complete static pages. The
//! markup keeps the element ids the site's stylesheet and scripts rely on
//! (`news-container`, `download-options`, `archive-container`, ...).
//! Plain text is escaped; only text entries flagged `rich` are emitted as-is.
//!
//! Placeholders are hidden with Bootstrap's `d-none` class rather than
//! omitted, so the page shell is identical in every state.

use crate::i18n::BoundText;
use crate::models::Language;
use crate::outputs::page_href;
use crate::pages::archive::ArchiveView;
use crate::pages::home::HomeView;
use crate::pages::{LanguageSelector, PageKind};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";
const BOOTSTRAP_ICONS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.10.5/font/bootstrap-icons.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js";

fn classes(base: &str, hidden: bool) -> String {
    if hidden {
        format!("{base} d-none")
    } else {
        base.to_string()
    }
}

/// Content of the bound element `id`; nothing if the table has no entry.
fn bound(texts: &[BoundText], id: &str) -> Markup {
    match texts.iter().find(|t| t.id == id) {
        Some(text) if text.rich => html! { (PreEscaped(text.content.as_str())) },
        Some(text) => html! { (text.content) },
        None => html! {},
    }
}

fn head(title: &str, stylesheet: &str) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            title { (title) }
            link rel="stylesheet" href=(BOOTSTRAP_CSS);
            link rel="stylesheet" href=(BOOTSTRAP_ICONS);
            link rel="stylesheet" href=(stylesheet);
        }
    }
}

fn navbar(selectors: &[LanguageSelector], page: PageKind, language: Language) -> Markup {
    html! {
        nav class="navbar navbar-expand-lg navbar-dark bg-dark" {
            div class="container" {
                a class="navbar-brand" href=(page_href(PageKind::Home, language)) {
                    i class="bi bi-robot" {} " AI News"
                }
                ul class="navbar-nav ms-auto" {
                    @for selector in selectors {
                        li class="nav-item" {
                            a id=(selector.id)
                                class=(if selector.active { "nav-link active" } else { "nav-link" })
                                href=(page_href(page, selector.language)) {
                                (selector.label)
                            }
                        }
                    }
                }
            }
        }
    }
}

fn hero(texts: &[BoundText], date_display: Option<&str>) -> Markup {
    html! {
        header class="hero py-5 bg-light" {
            div class="container text-center" {
                h1 id="main-title" { (bound(texts, "main-title")) }
                p id="main-subtitle" class="lead" { (bound(texts, "main-subtitle")) }
                @if let Some(date) = date_display {
                    p id="date-display" class="text-muted" { (date) }
                }
            }
        }
    }
}

fn footer(texts: &[BoundText], copyright: &str) -> Markup {
    html! {
        footer class="footer mt-5 py-4 bg-dark text-light" {
            div class="container text-center" {
                p id="footer-text" { (bound(texts, "footer-text")) }
                p id="current-year" class="mb-0" { (copyright) }
            }
        }
    }
}

fn loading(id: &str, texts: &[BoundText], visible: bool) -> Markup {
    html! {
        div id=(id) class=(classes("text-center my-5", !visible)) {
            div class="spinner-border text-primary" role="status" {}
            p id="loading-text" class="mt-2" { (bound(texts, "loading-text")) }
        }
    }
}

/// The complete home page.
pub fn render_home_page(view: &HomeView) -> Markup {
    let texts = view.texts.as_slice();
    html! {
        (DOCTYPE)
        html lang=(view.language.html_lang()) {
            (head(view.title, "styles.css"))
            body {
                (navbar(&view.selectors, PageKind::Home, view.language))
                (hero(texts, Some(&view.date_display)))
                main class="container my-4" {
                    div class="d-flex justify-content-between align-items-center mb-3" {
                        h2 id="news-section-title" { (bound(texts, "news-section-title")) }
                        div class="d-flex gap-2" {
                            div class="dropdown" {
                                button class="btn btn-primary dropdown-toggle" type="button"
                                    data-bs-toggle="dropdown" aria-expanded="false" {
                                    i class="bi bi-download" {} " "
                                    span id="download-text" { (bound(texts, "download-text")) }
                                }
                                ul id="download-options" class="dropdown-menu" {
                                    @for entry in &view.downloads {
                                        li {
                                            a class="dropdown-item" href=(entry.url) target="_blank" {
                                                (entry.label)
                                            }
                                        }
                                    }
                                }
                            }
                            a id="archive-button" class="btn btn-outline-secondary"
                                href=(page_href(PageKind::Archive, view.language)) {
                                (bound(texts, "archive-button"))
                            }
                        }
                    }
                    (loading("news-loading", texts, view.news.loading_visible))
                    div id="no-news" class=(classes("alert alert-info", !view.news.no_news_visible)) {
                        p id="no-news-text" class="mb-0" { (bound(texts, "no-news-text")) }
                    }
                    div id="news-container" {
                        @for card in &view.news.cards {
                            div class="news-card" {
                                h3 class="news-title" { (card.title) }
                                div class="news-meta" {
                                    div class="news-source" {
                                        i class="bi bi-newspaper" {} " " (card.source)
                                    }
                                    div class="news-date" {
                                        i class="bi bi-clock" {} " " (card.date)
                                    }
                                }
                                div class="news-content" { (card.description) }
                                a href=(card.url) target="_blank" class="read-more" {
                                    (card.read_more) " "
                                    i class="bi bi-arrow-right" {}
                                }
                            }
                        }
                    }
                }
                (footer(texts, &view.copyright))
                script src=(BOOTSTRAP_JS) {}
            }
        }
    }
}

/// The complete archive page.
pub fn render_archive_page(view: &ArchiveView) -> Markup {
    let texts = view.texts.as_slice();
    html! {
        (DOCTYPE)
        html lang=(view.language.html_lang()) {
            (head(view.title, "styles.css"))
            body {
                (navbar(&view.selectors, PageKind::Archive, view.language))
                (hero(texts, None))
                main class="container my-4" {
                    div class="d-flex justify-content-between align-items-center mb-3" {
                        h2 id="archive-section-title" { (bound(texts, "archive-section-title")) }
                        a id="back-to-latest" class="btn btn-outline-primary"
                            href=(page_href(PageKind::Home, view.language)) {
                            (bound(texts, "back-to-latest"))
                        }
                    }
                    (loading("archive-loading", texts, view.loading_visible))
                    div id="no-archive" class=(classes("alert alert-info", !view.no_archive_visible)) {
                        p id="no-archive-text" class="mb-0" { (bound(texts, "no-archive-text")) }
                    }
                    div id="archive-container" {
                        @for row in &view.rows {
                            div class="archive-item" data-date=(row.date) {
                                div class="archive-date" { (row.date_label) }
                                div class="archive-links" {
                                    @for link in &row.links {
                                        a href=(link.url) target="_blank"
                                            class="btn btn-sm btn-outline-secondary" title=(link.label) {
                                            i class=(link.icon) {}
                                            span class="d-none d-md-inline" { (link.label) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                (footer(texts, &view.copyright))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloads::tests::full_release;
    use crate::models::{Article, DigestSet, NewsDigest};
    use crate::pages::archive::{ArchiveData, render_archive};
    use crate::pages::home::{HomeData, render_home};
    use crate::state::{PageState, Store};
    use chrono::NaiveDate;
    use scraper::{Html, Selector};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn select_text(doc: &Html, css: &str) -> Vec<String> {
        let selector = Selector::parse(css).unwrap();
        doc.select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect()
    }

    fn class_of(doc: &Html, css: &str) -> String {
        let selector = Selector::parse(css).unwrap();
        doc.select(&selector)
            .next()
            .and_then(|el| el.value().attr("class"))
            .unwrap_or_default()
            .to_string()
    }

    fn home_state(language: Language, articles: Vec<Article>) -> PageState<HomeData> {
        let mut store = Store::new(PageState {
            language,
            ..PageState::default()
        });
        store.finish_loading(HomeData {
            digests: DigestSet {
                en: Some(NewsDigest {
                    articles: articles.clone(),
                }),
                zh: Some(NewsDigest { articles }),
            },
            latest_release: Some(full_release(
                "AI News 2024-01-15",
                "2024-01-15",
                "2024-01-15T08:00:00Z",
            )),
            effective_date: today(),
        });
        store.snapshot().clone()
    }

    #[test]
    fn test_home_page_escapes_plain_text_but_not_rich() {
        let article = Article {
            title: Some("<script>alert(1)</script>".to_string()),
            ..Article::default()
        };
        let markup = render_home_page(&render_home(&home_state(Language::En, vec![article]), today()))
            .into_string();

        assert!(markup.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!markup.contains("<script>alert(1)</script>"));
        assert!(markup.contains(r#"<a href="https://newsapi.org/" target="_blank">NewsAPI</a>"#));
        assert!(markup.contains(r#"<i class="bi bi-archive"></i> News Archive"#));
    }

    #[test]
    fn test_home_page_structure() {
        let articles = vec![
            Article {
                title: Some("First".to_string()),
                ..Article::default()
            },
            Article {
                title: Some("Second".to_string()),
                ..Article::default()
            },
        ];
        let view = render_home(&home_state(Language::Zh, articles), today());
        let doc = Html::parse_document(&render_home_page(&view).into_string());

        assert_eq!(select_text(&doc, "title"), vec!["AI新闻每日简报"]);
        assert_eq!(
            select_text(&doc, "#news-container .news-title"),
            vec!["First", "Second"]
        );
        assert_eq!(select_text(&doc, "#download-options a").len(), 6);
        assert!(class_of(&doc, "#no-news").contains("d-none"));
        assert!(class_of(&doc, "#news-loading").contains("d-none"));
        assert!(class_of(&doc, "#lang-zh").contains("active"));
        assert!(!class_of(&doc, "#lang-en").contains("active"));
        assert_eq!(select_text(&doc, "#current-year"), vec!["© 2024"]);

        let archive_href = Selector::parse("#archive-button").unwrap();
        let href = doc
            .select(&archive_href)
            .next()
            .and_then(|el| el.value().attr("href"));
        assert_eq!(href, Some("archive.zh.html"));
    }

    #[test]
    fn test_home_page_empty_state() {
        let view = render_home(&home_state(Language::En, vec![]), today());
        let doc = Html::parse_document(&render_home_page(&view).into_string());

        assert!(!class_of(&doc, "#no-news").contains("d-none"));
        assert!(class_of(&doc, "#news-loading").contains("d-none"));
        assert!(select_text(&doc, "#news-container .news-card").is_empty());
    }

    #[test]
    fn test_archive_page_rows_and_links() {
        let mut store = Store::new(PageState::default());
        store.finish_loading(ArchiveData {
            releases: Some(vec![full_release(
                "AI News 2024-01-15",
                "2024-01-15",
                "2024-01-15T08:00:00Z",
            )]),
        });
        let view = render_archive(store.snapshot(), today());
        let doc = Html::parse_document(&render_archive_page(&view).into_string());

        assert_eq!(select_text(&doc, ".archive-date"), vec!["January 15, 2024"]);
        let links = Selector::parse(".archive-links a").unwrap();
        let hrefs: Vec<&str> = doc
            .select(&links)
            .filter_map(|el| el.value().attr("href"))
            .collect();
        assert_eq!(hrefs.len(), 6);
        assert_eq!(hrefs[0], "https://dl/ai_news_2024-01-15.pdf");
        assert!(class_of(&doc, "#no-archive").contains("d-none"));
        assert_eq!(select_text(&doc, "#back-to-latest"), vec!["Back to Latest News"]);
    }
}
