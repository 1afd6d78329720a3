//! Mapping from release assets to download links.
//!
//! The publishing pipeline attaches six files to each dated release, named
//! `ai_news[_cn]_{YYYY-MM-DD}.{pdf|md|json}`. [`FILE_TYPES`] lists them in
//! display order and [`resolve_download_links`] keeps only those the release
//! actually carries.

use crate::models::{Language, Release};
use serde::Serialize;

/// Content format of a published file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Pdf,
    Markdown,
    Json,
}

impl FileFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            FileFormat::Pdf => "pdf",
            FileFormat::Markdown => "md",
            FileFormat::Json => "json",
        }
    }

    /// Bootstrap icon class used on archive rows.
    pub const fn icon(self) -> &'static str {
        match self {
            FileFormat::Pdf => "bi-file-earmark-pdf",
            FileFormat::Markdown => "bi-file-earmark-text",
            FileFormat::Json => "bi-file-earmark-code",
        }
    }
}

/// One of the six logical files published per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTypeDescriptor {
    pub format: FileFormat,
    /// Language of the file's content (not of the page).
    pub content: Language,
    /// Label in the home page download menu.
    pub menu_label: &'static str,
    pub archive_label_en: &'static str,
    pub archive_label_zh: &'static str,
}

impl FileTypeDescriptor {
    /// Asset file name for `date` (`YYYY-MM-DD`).
    pub fn file_name(&self, date: &str) -> String {
        let suffix = match self.content {
            Language::En => "",
            Language::Zh => "_cn",
        };
        format!("ai_news{suffix}_{date}.{}", self.format.extension())
    }

    pub fn archive_label(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.archive_label_en,
            Language::Zh => self.archive_label_zh,
        }
    }

    /// Short key such as `pdf-en`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.format.extension(), self.content.code())
    }
}

pub const FILE_TYPES: [FileTypeDescriptor; 6] = [
    FileTypeDescriptor {
        format: FileFormat::Pdf,
        content: Language::En,
        menu_label: "PDF (English)",
        archive_label_en: "PDF (EN)",
        archive_label_zh: "PDF (英)",
    },
    FileTypeDescriptor {
        format: FileFormat::Pdf,
        content: Language::Zh,
        menu_label: "PDF (中文)",
        archive_label_en: "PDF (ZH)",
        archive_label_zh: "PDF (中)",
    },
    FileTypeDescriptor {
        format: FileFormat::Markdown,
        content: Language::En,
        menu_label: "Markdown (English)",
        archive_label_en: "MD (EN)",
        archive_label_zh: "MD (英)",
    },
    FileTypeDescriptor {
        format: FileFormat::Markdown,
        content: Language::Zh,
        menu_label: "Markdown (中文)",
        archive_label_en: "MD (ZH)",
        archive_label_zh: "MD (中)",
    },
    FileTypeDescriptor {
        format: FileFormat::Json,
        content: Language::En,
        menu_label: "JSON (English)",
        archive_label_en: "JSON (EN)",
        archive_label_zh: "JSON (英)",
    },
    FileTypeDescriptor {
        format: FileFormat::Json,
        content: Language::Zh,
        menu_label: "JSON (中文)",
        archive_label_en: "JSON (ZH)",
        archive_label_zh: "JSON (中)",
    },
];

/// A file type that the release actually carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDownload {
    pub file_type: FileTypeDescriptor,
    pub file_name: String,
    pub url: String,
}

/// Match each of the six file types against the release's assets for `date`.
///
/// Order follows [`FILE_TYPES`]; types without an exactly-named asset are
/// left out.
pub fn resolve_download_links(release: &Release, date: &str) -> Vec<ResolvedDownload> {
    FILE_TYPES
        .iter()
        .filter_map(|file_type| {
            let file_name = file_type.file_name(date);
            release.asset_url(&file_name).map(|url| ResolvedDownload {
                file_type: *file_type,
                url: url.to_string(),
                file_name,
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::ReleaseAsset;

    /// A release carrying every file for `date`, with URLs `https://dl/{file}`.
    pub(crate) fn full_release(name: &str, date: &str, published_at: &str) -> Release {
        Release {
            name: Some(name.to_string()),
            published_at: Some(published_at.to_string()),
            assets: FILE_TYPES
                .iter()
                .map(|t| {
                    let file = t.file_name(date);
                    ReleaseAsset {
                        browser_download_url: format!("https://dl/{file}"),
                        name: file,
                    }
                })
                .collect(),
        }
    }

    #[test]
    fn test_file_names() {
        let names: Vec<String> = FILE_TYPES.iter().map(|t| t.file_name("2024-01-15")).collect();
        assert_eq!(
            names,
            vec![
                "ai_news_2024-01-15.pdf",
                "ai_news_cn_2024-01-15.pdf",
                "ai_news_2024-01-15.md",
                "ai_news_cn_2024-01-15.md",
                "ai_news_2024-01-15.json",
                "ai_news_cn_2024-01-15.json",
            ]
        );
        assert_eq!(FILE_TYPES[3].key(), "md-zh");
    }

    #[test]
    fn test_resolve_all_links() {
        let release = full_release("AI News 2024-01-15", "2024-01-15", "2024-01-15T08:00:00Z");
        let links = resolve_download_links(&release, "2024-01-15");
        assert_eq!(links.len(), 6);
        assert_eq!(links[0].url, "https://dl/ai_news_2024-01-15.pdf");
        assert_eq!(links[5].url, "https://dl/ai_news_cn_2024-01-15.json");
    }

    #[test]
    fn test_missing_assets_are_omitted() {
        let release = Release {
            name: Some("AI News 2024-01-15".to_string()),
            published_at: None,
            assets: vec![
                ReleaseAsset {
                    name: "ai_news_cn_2024-01-15.md".to_string(),
                    browser_download_url: "https://dl/md-zh".to_string(),
                },
                ReleaseAsset {
                    name: "ai_news_2024-01-14.pdf".to_string(),
                    browser_download_url: "https://dl/old".to_string(),
                },
            ],
        };

        let links = resolve_download_links(&release, "2024-01-15");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].file_type.menu_label, "Markdown (中文)");
        assert_eq!(links[0].url, "https://dl/md-zh");
    }

    #[test]
    fn test_wrong_date_yields_nothing() {
        let release = full_release("AI News 2024-01-15", "2024-01-15", "2024-01-15T08:00:00Z");
        assert!(resolve_download_links(&release, "2024-01-16").is_empty());
    }
}
