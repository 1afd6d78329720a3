//! Page state container with change subscribers.
//!
//! A [`Store`] owns the current state of one page and notifies subscribers
//! with an immutable snapshot whenever the state actually changes. Renderers
//! never read ambient globals; they are handed a snapshot.

use crate::models::Language;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type Subscriber<S> = Box<dyn FnMut(&S) + Send>;

/// Where a page's data is in its lifecycle.
///
/// Payloads are fetched once and cached for the life of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<D> {
    Loading,
    Ready(Arc<D>),
}

impl<D> LoadState<D> {
    pub fn data(&self) -> Option<&D> {
        match self {
            LoadState::Loading => None,
            LoadState::Ready(data) => Some(data.as_ref()),
        }
    }
}

/// The full state a page renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<D> {
    pub language: Language,
    pub data: LoadState<D>,
}

impl<D> Default for PageState<D> {
    fn default() -> Self {
        Self {
            language: Language::default(),
            data: LoadState::Loading,
        }
    }
}

/// State container that dispatches snapshots to subscribers.
pub struct Store<S> {
    state: S,
    subscribers: Vec<Subscriber<S>>,
}

impl<S> fmt::Debug for Store<S>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<S> Store<S>
where
    S: Clone + PartialEq,
{
    pub fn new(state: S) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> &S {
        &self.state
    }

    /// Register a callback invoked after every effective state change.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&S) + Send + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply `change` to a copy of the state.
    ///
    /// Subscribers are only notified when the result differs from the current
    /// state; the return value says whether that happened.
    pub fn update<F>(&mut self, change: F) -> bool
    where
        F: FnOnce(&mut S),
    {
        let mut next = self.state.clone();
        change(&mut next);
        if next == self.state {
            return false;
        }
        self.state = next;
        debug!(subscribers = self.subscribers.len(), "Dispatching state change");
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
        true
    }
}

impl<D> Store<PageState<D>>
where
    D: Clone + PartialEq,
{
    /// Switch the page language. A no-op when `language` is already active.
    pub fn set_language(&mut self, language: Language) -> bool {
        self.update(|state| state.language = language)
    }

    /// Store fetched data; the page leaves its loading state.
    pub fn finish_loading(&mut self, data: D) -> bool {
        self.update(|state| state.data = LoadState::Ready(Arc::new(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn counting_store() -> (Store<PageState<Vec<u32>>>, Arc<Mutex<Vec<Language>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = Store::new(PageState::default());
        let sink = Arc::clone(&seen);
        store.subscribe(move |state: &PageState<Vec<u32>>| {
            sink.lock().unwrap().push(state.language);
        });
        (store, seen)
    }

    #[test]
    fn test_set_language_is_idempotent() {
        let (mut store, seen) = counting_store();

        assert!(store.set_language(Language::Zh));
        assert!(!store.set_language(Language::Zh));
        assert!(!store.set_language(Language::Zh));

        assert_eq!(*seen.lock().unwrap(), vec![Language::Zh]);
        assert_eq!(store.snapshot().language, Language::Zh);
    }

    #[test]
    fn test_setting_default_language_is_noop() {
        let (mut store, seen) = counting_store();
        assert!(!store.set_language(Language::En));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_back_and_forth_notifies_each_time() {
        let (mut store, seen) = counting_store();
        store.set_language(Language::Zh);
        store.set_language(Language::En);
        assert_eq!(*seen.lock().unwrap(), vec![Language::Zh, Language::En]);
    }

    #[test]
    fn test_finish_loading() {
        let (mut store, seen) = counting_store();
        assert!(store.snapshot().data.data().is_none());

        assert!(store.finish_loading(vec![1, 2]));
        assert_eq!(store.snapshot().data.data(), Some(&vec![1, 2]));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
