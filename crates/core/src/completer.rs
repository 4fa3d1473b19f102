//! The public completion read API.

use std::sync::Arc;

use crate::index::PrefixIndex;
use crate::models::Completion;
use crate::source::RefreshingSource;

/// Interface for getting ticker completions.
pub trait Completer: Send + Sync {
    /// All completions whose symbol or name starts with `prompt`, up to
    /// `limit` (all when `None`).
    fn get_completions(&self, prompt: &str, limit: Option<usize>) -> Vec<Completion>;

    /// Every completion in the catalog.
    fn get_all(&self) -> Vec<Completion>;
}

impl Completer for PrefixIndex {
    fn get_completions(&self, prompt: &str, limit: Option<usize>) -> Vec<Completion> {
        self.search(prompt, limit)
            .into_iter()
            .map(Completion::from)
            .collect()
    }

    fn get_all(&self) -> Vec<Completion> {
        PrefixIndex::get_all(self).iter().map(Completion::from).collect()
    }
}

/// [`Completer`] facade over whichever snapshot a [`RefreshingSource`]
/// currently publishes.
///
/// Before the first successful build there is nothing to search, so both
/// operations return an empty vec; they never block waiting for a build
/// and never surface refresh failures (those are queryable through
/// [`RefreshingSource::last_error`]).
pub struct CompletionService {
    source: Arc<RefreshingSource>,
}

impl CompletionService {
    /// Wrap a source.
    pub fn new(source: Arc<RefreshingSource>) -> Self {
        Self { source }
    }
}

impl Completer for CompletionService {
    fn get_completions(&self, prompt: &str, limit: Option<usize>) -> Vec<Completion> {
        match self.source.current() {
            Some(index) => index.get_completions(prompt, limit),
            None => Vec::new(),
        }
    }

    fn get_all(&self) -> Vec<Completion> {
        match self.source.current() {
            Some(index) => Completer::get_all(index.as_ref()),
            None => Vec::new(),
        }
    }
}
