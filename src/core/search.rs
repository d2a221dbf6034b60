//! Search-as-you-type for the explore page.
//!
//! Keystrokes go through a [`DebouncedFn`]. When typing pauses, the settled
//! text becomes the `query` parameter, the page resets to 1, and the
//! navigator is asked to replace the current URL.

use crate::core::debounce::lock;
use crate::core::debounce_fn::DebouncedFn;
use crate::domain::ports::QueryNavigator;
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::form_urlencoded;

pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(400);

/// Query-string state of the explore page (`?query=...&page=N`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreQuery {
    pub page: u32,
    pub query: Option<String>,
    /// Parameters this type does not own, passed through untouched.
    extra: Vec<(String, String)>,
}

impl Default for ExploreQuery {
    fn default() -> Self {
        Self {
            page: 1,
            query: None,
            extra: Vec::new(),
        }
    }
}

impl ExploreQuery {
    pub fn parse(query_string: &str) -> Self {
        let raw = query_string.strip_prefix('?').unwrap_or(query_string);
        let mut parsed = Self::default();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "page" => parsed.page = value.trim().parse::<u32>().unwrap_or(1).max(1),
                "query" => {
                    parsed.query = Some(value.into_owned()).filter(|q| !q.trim().is_empty())
                }
                _ => parsed.extra.push((key.into_owned(), value.into_owned())),
            }
        }
        parsed
    }

    /// A new search always starts from page 1. Blank text clears the query.
    pub fn with_search(&self, text: &str) -> Self {
        Self {
            page: 1,
            query: Some(text.to_string()).filter(|q| !q.trim().is_empty()),
            extra: self.extra.clone(),
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            query: self.query.clone(),
            extra: self.extra.clone(),
        }
    }

    pub fn extra(&self) -> &[(String, String)] {
        &self.extra
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(query) = &self.query {
            serializer.append_pair("query", query);
        }
        serializer.append_pair("page", &self.page.to_string());
        for (key, value) in &self.extra {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    pub fn href(&self, path: &str) -> String {
        format!("{}?{}", path, self.to_query_string())
    }
}

pub struct SearchController<N> {
    path: String,
    navigator: Arc<N>,
    current: Arc<Mutex<ExploreQuery>>,
    dispatched: Arc<AtomicU64>,
    debounced: DebouncedFn<String>,
}

impl<N> SearchController<N>
where
    N: QueryNavigator + 'static,
{
    pub fn new(
        navigator: Arc<N>,
        path: impl Into<String>,
        initial: ExploreQuery,
        delay: Duration,
    ) -> Result<Self> {
        let path = path.into();
        let current = Arc::new(Mutex::new(initial));
        let dispatched = Arc::new(AtomicU64::new(0));

        let debounced = {
            let navigator = Arc::clone(&navigator);
            let current = Arc::clone(&current);
            let dispatched = Arc::clone(&dispatched);
            let path = path.clone();
            DebouncedFn::new_async(
                move |text: String| {
                    dispatched.fetch_add(1, Ordering::SeqCst);
                    let navigator = Arc::clone(&navigator);
                    let current = Arc::clone(&current);
                    let path = path.clone();
                    async move {
                        let next = {
                            let mut current = lock(&current);
                            *current = current.with_search(&text);
                            current.clone()
                        };
                        let href = next.href(&path);
                        match navigator.replace(href.clone()).await {
                            Ok(()) => tracing::debug!("Search navigated to {}", href),
                            Err(e) => tracing::warn!("Search navigation to {} failed: {}", href, e),
                        }
                    }
                },
                delay,
            )?
        };

        Ok(Self {
            path,
            navigator,
            current,
            dispatched,
            debounced,
        })
    }

    /// Feeds one keystroke's worth of input text.
    pub fn input(&self, text: impl Into<String>) {
        self.debounced.call(text.into());
    }

    /// Page changes are not debounced.
    pub async fn change_page(&self, page: u32) -> Result<String> {
        let next = {
            let mut current = lock(&self.current);
            *current = current.with_page(page);
            current.clone()
        };
        let href = next.href(&self.path);
        self.navigator.replace(href.clone()).await?;
        Ok(href)
    }

    pub fn current(&self) -> ExploreQuery {
        lock(&self.current).clone()
    }

    pub fn is_pending(&self) -> bool {
        self.debounced.is_pending()
    }

    /// Settled searches handed to the navigator so far. Page changes are not counted.
    ///
    /// Navigation runs detached; a navigator that counts its own completions
    /// can compare against this once `is_pending` is false.
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::SeqCst)
    }

    /// Stops any pending search and ignores further input.
    pub fn dispose(&self) {
        self.debounced.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let query = ExploreQuery::parse("");
        assert_eq!(query.page, 1);
        assert_eq!(query.query, None);
    }

    #[test]
    fn test_parse_page_and_query() {
        let query = ExploreQuery::parse("?page=3&query=rust%20books&sort=new");
        assert_eq!(query.page, 3);
        assert_eq!(query.query.as_deref(), Some("rust books"));
        assert_eq!(query.extra(), &[("sort".to_string(), "new".to_string())]);
    }

    #[test]
    fn test_parse_bad_page_falls_back() {
        assert_eq!(ExploreQuery::parse("page=abc").page, 1);
        assert_eq!(ExploreQuery::parse("page=0").page, 1);
        assert_eq!(ExploreQuery::parse("page=-2").page, 1);
        assert_eq!(ExploreQuery::parse("query=%20%20").query, None);
    }

    #[test]
    fn test_with_search_resets_page() {
        let query = ExploreQuery::parse("page=4&query=old");
        let searched = query.with_search("cooking");
        assert_eq!(searched.page, 1);
        assert_eq!(searched.to_query_string(), "query=cooking&page=1");

        let cleared = searched.with_page(3).with_search("   ");
        assert_eq!(cleared.page, 1);
        assert_eq!(cleared.query, None);
        assert_eq!(cleared.href("/explore"), "/explore?page=1");
    }

    #[test]
    fn test_with_page_keeps_query_and_extras() {
        let query = ExploreQuery::parse("query=art&page=1&category=Art");
        assert_eq!(
            query.with_page(2).to_query_string(),
            "query=art&page=2&category=Art"
        );
    }

    #[test]
    fn test_query_string_encoding() {
        let query = ExploreQuery::default().with_search("fish & chips");
        assert_eq!(query.to_query_string(), "query=fish+%26+chips&page=1");
        assert_eq!(
            ExploreQuery::parse(&query.to_query_string()).query.as_deref(),
            Some("fish & chips")
        );
    }
}
