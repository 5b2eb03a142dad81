use std::time::Duration;

use tracing::error;

use crate::core::{model::file::FileRef, repo::file::FileRepo};

/// Quiet interval a query must survive unchanged before a lookup is
/// dispatched.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this never trigger a lookup.
pub const MIN_QUERY_LEN: usize = 2;

/// Incremental search selector for files.
///
/// Resolves free-text operator input into a concrete [FileRef] via a
/// debounced lookup against the file store. Every instance owns its state in
/// full and instantiations are independent.
pub struct FileSearch<R> {
    repo: R,
    placeholder: String,
    query: String,
    results: Vec<FileRef>,
    selected: Option<FileRef>,
    open: bool,
    loading: bool,
    generation: u64,
}

/// A scheduled lookup produced by [FileSearch::input]. Carries the query
/// generation that produced it, so both lookups cancelled by further typing
/// and replies that arrive after a newer one has settled get discarded.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    query: String,
    generation: u64,
}

impl<R> FileSearch<R>
where
    R: FileRepo + Send + Sync,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            placeholder: "Search for a file...".to_string(),
            query: String::new(),
            results: Vec::new(),
            selected: None,
            open: false,
            loading: false,
            generation: 0,
        }
    }

    pub fn with_placeholder(mut self, text: &str) -> Self {
        self.placeholder = text.to_string();
        self
    }

    /// Register a keystroke. Every edit supersedes any previously scheduled
    /// lookup. Returns the ticket for the lookup this edit schedules, or
    /// `None` when the query is too short to trigger one; results and
    /// dropdown are cleared immediately in that case.
    pub fn input(&mut self, text: &str) -> Option<SearchTicket> {
        self.query = text.to_string();
        self.generation += 1;

        if self.query.chars().count() < MIN_QUERY_LEN {
            // No lookup will settle this edit, so the in-flight flag clears
            // here.
            self.results.clear();
            self.open = false;
            self.loading = false;
            return None;
        }

        Some(SearchTicket {
            query: self.query.clone(),
            generation: self.generation,
        })
    }

    /// Wait out the quiet interval, then dispatch the lookup and apply its
    /// results. Combines [Self::fetch] and [Self::apply] for drivers that
    /// process events one at a time.
    pub async fn run(&mut self, ticket: SearchTicket) {
        tokio::time::sleep(DEBOUNCE).await;

        if self.superseded(&ticket) {
            return;
        }

        let results = self.fetch(&ticket).await;
        self.apply(ticket, results);
    }

    /// Dispatch the lookup for `ticket`. A failed lookup is logged and
    /// treated as "no results" for that query.
    pub async fn fetch(&mut self, ticket: &SearchTicket) -> Vec<FileRef> {
        self.loading = true;

        match self.repo.search_files(&ticket.query).await {
            Ok(results) => results,
            Err(e) => {
                error!("Search failed; {e}");
                Vec::new()
            }
        }
    }

    /// Apply fetched results. Replies whose generation is no longer current
    /// arrived too late to matter and are discarded without touching the
    /// in-flight flag; a newer lookup may still be settling.
    pub fn apply(&mut self, ticket: SearchTicket, results: Vec<FileRef>) {
        if self.superseded(&ticket) {
            return;
        }

        self.loading = false;

        // Store order is preserved verbatim. The dropdown stays open on an
        // empty settled result so the "no results" state is visible.
        self.results = results;
        self.open = true;
    }

    /// Pick a result. Replaces the visible query with the fixed rendering of
    /// the chosen file, records the selection and closes the dropdown.
    ///
    /// There is no way to clear a selection from inside the component; the
    /// owner resets it externally via [Self::reset].
    pub fn select(&mut self, hit: FileRef) -> FileRef {
        self.query = format!("{} - {}", hit.reference_code, hit.name);
        self.generation += 1;
        self.open = false;
        self.selected = Some(hit.clone());
        hit
    }

    /// A pointer interaction outside the component closes the dropdown.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Input focus reopens the dropdown, but only when the current query
    /// meets the length threshold and previously produced results.
    pub fn focus(&mut self) {
        if self.query.chars().count() >= MIN_QUERY_LEN && !self.results.is_empty() {
            self.open = true;
        }
    }

    /// Clear the selection and all query state.
    pub fn reset(&mut self) {
        self.query.clear();
        self.results.clear();
        self.selected = None;
        self.open = false;
        self.loading = false;
        self.generation += 1;
    }

    fn superseded(&self, ticket: &SearchTicket) -> bool {
        ticket.generation != self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn results(&self) -> &[FileRef] {
        &self.results
    }

    pub fn selected(&self) -> Option<&FileRef> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
