//! Page controllers for the site.
//!
//! Both pages follow the same shape:
//!
//! 1. **Load**: fetch remote JSON once and store it in a [`Store`]
//! 2. **Render**: a pure function turns a [`PageState`] snapshot into a
//!    serializable view model
//! 3. **Toggle**: `set_language` re-renders for subscribers, or does nothing
//!    if the language is already active
//!
//! # Pages
//!
//! | Page | Module | Data | View |
//! |------|--------|------|------|
//! | Home | [`home`] | both digests + latest release | [`home::HomeView`] |
//! | Archive | [`archive`] | full releases list | [`archive::ArchiveView`] |
//!
//! [`Store`]: crate::state::Store
//! [`PageState`]: crate::state::PageState

use crate::i18n::language_selector_label;
use crate::models::Language;
use serde::Serialize;

pub mod archive;
pub mod home;

/// Which page a view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Home,
    Archive,
}

/// One of the two language selector controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSelector {
    pub id: String,
    pub language: Language,
    pub label: &'static str,
    pub active: bool,
}

/// Both selectors; exactly one is marked active.
pub fn language_selectors(active: Language) -> Vec<LanguageSelector> {
    Language::ALL
        .iter()
        .map(|&language| LanguageSelector {
            id: format!("lang-{}", language.code()),
            language,
            label: language_selector_label(language),
            active: language == active,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_selector_active() {
        for lang in Language::ALL {
            let selectors = language_selectors(lang);
            assert_eq!(selectors.len(), 2);
            let active: Vec<&LanguageSelector> = selectors.iter().filter(|s| s.active).collect();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].language, lang);
            assert_eq!(active[0].id, format!("lang-{lang}"));
        }
    }
}
