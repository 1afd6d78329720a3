//! Bilingual text tables for the two pages.
//!
//! Each page shell has a fixed set of element ids whose text depends on the
//! current [`Language`]. The tables below map those ids to their English and
//! Chinese strings; [`bind_texts`] resolves a table for one language.
//!
//! Entries flagged `rich` carry markup (links, icons) and are emitted
//! pre-escaped. Everything else is treated as plain text.

use crate::models::Language;
use serde::Serialize;

/// One bindable element of a page shell.
#[derive(Debug, Clone, Copy)]
pub struct TextEntry {
    pub id: &'static str,
    pub en: &'static str,
    pub zh: &'static str,
    pub rich: bool,
}

impl TextEntry {
    const fn plain(id: &'static str, en: &'static str, zh: &'static str) -> Self {
        Self { id, en, zh, rich: false }
    }

    const fn rich(id: &'static str, en: &'static str, zh: &'static str) -> Self {
        Self { id, en, zh, rich: true }
    }

    pub fn text(&self, language: Language) -> &'static str {
        pick(language, self.en, self.zh)
    }
}

/// A text entry resolved for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundText {
    pub id: &'static str,
    pub content: String,
    pub rich: bool,
}

const FOOTER_TEXT: TextEntry = TextEntry::rich(
    "footer-text",
    "This site automatically fetches and displays the latest AI news daily. Powered by <a href=\"https://newsapi.org/\" target=\"_blank\">NewsAPI</a> and <a href=\"https://open.bigmodel.cn/\" target=\"_blank\">Zhipu AI</a> for translations.",
    "本站每日自动获取并展示最新的AI新闻。数据来源：<a href=\"https://newsapi.org/\" target=\"_blank\">NewsAPI</a>，中文翻译由<a href=\"https://open.bigmodel.cn/\" target=\"_blank\">智谱AI</a>提供。",
);

pub const HOME_TEXTS: &[TextEntry] = &[
    TextEntry::plain("main-title", "AI News Daily Digest", "AI新闻每日简报"),
    TextEntry::plain(
        "main-subtitle",
        "Get the latest AI news, curated and updated daily",
        "获取每日精选的AI领域最新资讯",
    ),
    TextEntry::plain("news-section-title", "Today's Top AI News", "今日AI头条新闻"),
    TextEntry::plain("download-text", "Download", "下载"),
    TextEntry::plain(
        "loading-text",
        "Loading the latest AI news...",
        "正在加载最新AI新闻...",
    ),
    TextEntry::plain(
        "no-news-text",
        "No news articles available for today. Please check back later.",
        "今日暂无新闻文章。请稍后再查看。",
    ),
    TextEntry::rich(
        "archive-button",
        "<i class=\"bi bi-archive\"></i> News Archive",
        "<i class=\"bi bi-archive\"></i> 新闻存档",
    ),
    FOOTER_TEXT,
];

pub const ARCHIVE_TEXTS: &[TextEntry] = &[
    TextEntry::plain("main-title", "AI News Archive", "AI新闻存档"),
    TextEntry::plain(
        "main-subtitle",
        "Browse through past AI news collections",
        "浏览过往的AI新闻集合",
    ),
    TextEntry::plain("archive-section-title", "News Archive", "新闻存档"),
    TextEntry::plain("back-to-latest", "Back to Latest News", "返回最新新闻"),
    TextEntry::plain("loading-text", "Loading news archive...", "正在加载新闻存档..."),
    TextEntry::plain("no-archive-text", "No archived news available.", "没有可用的新闻存档。"),
    FOOTER_TEXT,
];

/// Fallback shown for an article without a title.
pub const NO_TITLE: &str = "No Title";
/// Fallback shown for an article without a source name.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";
/// Fallback shown for an article without a description.
pub const NO_DESCRIPTION: &str = "No description available.";

pub fn pick<'a>(language: Language, english: &'a str, chinese: &'a str) -> &'a str {
    match language {
        Language::En => english,
        Language::Zh => chinese,
    }
}

/// Resolve every entry of `table` for `language`, in table order.
pub fn bind_texts(table: &[TextEntry], language: Language) -> Vec<BoundText> {
    table
        .iter()
        .map(|entry| BoundText {
            id: entry.id,
            content: entry.text(language).to_string(),
            rich: entry.rich,
        })
        .collect()
}

/// The document title: the localized `main-title` of the table.
pub fn document_title(table: &[TextEntry], language: Language) -> &'static str {
    table
        .iter()
        .find(|entry| entry.id == "main-title")
        .map(|entry| entry.text(language))
        .unwrap_or_default()
}

pub fn read_more(language: Language) -> &'static str {
    pick(language, "Read more", "阅读原文")
}

/// Label of a language selector, always shown in its own language.
pub fn language_selector_label(language: Language) -> &'static str {
    match language {
        Language::En => "English",
        Language::Zh => "中文",
    }
}

pub fn copyright(year: i32) -> String {
    format!("© {year}")
}
