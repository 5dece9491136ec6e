//! Streaming iterator over scroll hits
//!
//! `ScrollResultIterator` resolves one record per hit with a single-record
//! fetch, in hit order. Nothing is batched or cached: iterating the same
//! hits again fetches every record again.
//!
//! Unlike `PagedSearchResult::objects`, a hit the store cannot resolve is an
//! error (`RecordNotFound`), not a `None` placeholder. The iterator is fused
//! after the first error.

use hitview_core::{RawHit, RawSearchResponse, SearchError, SearchQuery, SearchResult, Store, StoreId};
use std::fmt;
use std::iter::FusedIterator;
use tracing::trace;

/// Lazily resolves scroll hits into domain records
///
/// # Examples
///
/// ```
/// use hitview_core::{InMemoryStore, ModelAdapter, RawHit, SearchQuery};
/// use hitview_search::ScrollResultIterator;
/// use std::sync::Arc;
///
/// let store = InMemoryStore::new()
///     .with_record(1u64, "one")
///     .with_record(2u64, "two");
/// let query = SearchQuery::new(Arc::new(ModelAdapter::new("Number", store)));
/// let hits = vec![RawHit::with_id("2"), RawHit::with_id("1")];
///
/// let records: Vec<_> = ScrollResultIterator::new(&query, Some(hits))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(records, vec!["two", "one"]);
/// ```
pub struct ScrollResultIterator<'q, S: Store> {
    query: &'q SearchQuery<S>,
    hits: Box<dyn Iterator<Item = RawHit> + Send + 'q>,
    position: usize,
    done: bool,
}

impl<'q, S: Store> ScrollResultIterator<'q, S> {
    /// Iterate `hits`; `None` is treated as no hits
    pub fn new<I>(query: &'q SearchQuery<S>, hits: Option<I>) -> Self
    where
        I: IntoIterator<Item = RawHit>,
        I::IntoIter: Send + 'q,
    {
        let hits: Box<dyn Iterator<Item = RawHit> + Send + 'q> = match hits {
            Some(hits) => Box::new(hits.into_iter()),
            None => Box::new(std::iter::empty()),
        };
        ScrollResultIterator {
            query,
            hits,
            position: 0,
            done: false,
        }
    }

    /// Iterate the hits of one scroll page
    pub fn from_response(query: &'q SearchQuery<S>, response: RawSearchResponse) -> Self {
        let hits = response.hits.and_then(|h| h.hits);
        Self::new(query, hits)
    }

    /// Iterator over no hits
    pub fn empty(query: &'q SearchQuery<S>) -> Self {
        Self::new(query, None::<Vec<RawHit>>)
    }

    /// Number of hits consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    fn resolve(&self, hit: &RawHit) -> SearchResult<S::Record> {
        let raw = hit.id().ok_or_else(|| {
            SearchError::malformed(format!("scroll hit at position {} has no _id", self.position))
        })?;
        let id = <S::Id as StoreId>::parse_id(raw)?;

        trace!(
            target: "hitview::search",
            model = self.query.adapter().model_name(),
            id = raw,
            "Fetching scroll hit"
        );

        self.query
            .adapter()
            .store()
            .fetch_one(&id)?
            .ok_or_else(|| SearchError::not_found(raw))
    }
}

impl<'q, S: Store> Iterator for ScrollResultIterator<'q, S> {
    type Item = SearchResult<S::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let Some(hit) = self.hits.next() else {
            self.done = true;
            return None;
        };

        let result = self.resolve(&hit);
        self.position += 1;
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

impl<'q, S: Store> FusedIterator for ScrollResultIterator<'q, S> {}

impl<'q, S: Store> fmt::Debug for ScrollResultIterator<'q, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollResultIterator")
            .field("model", &self.query.adapter().model_name())
            .field("position", &self.position)
            .field("done", &self.done)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitview_core::{InMemoryStore, ModelAdapter};
    use std::sync::Arc;

    type TestStore = InMemoryStore<String, String>;

    fn query() -> SearchQuery<TestStore> {
        let store = InMemoryStore::new()
            .with_record("1".to_string(), "first".to_string())
            .with_record("2".to_string(), "second".to_string());
        SearchQuery::new(Arc::new(ModelAdapter::new("Post", store)))
    }

    fn hits(ids: &[&str]) -> Vec<RawHit> {
        ids.iter().map(|id| RawHit::with_id(*id)).collect()
    }

    #[test]
    fn test_yields_records_in_hit_order() {
        let query = query();
        let records: Vec<String> = ScrollResultIterator::new(&query, Some(hits(&["1", "2"])))
            .collect::<SearchResult<_>>()
            .unwrap();
        assert_eq!(records, vec!["first", "second"]);
        assert_eq!(query.adapter().store().single_fetches(), 2);
        assert_eq!(query.adapter().store().batch_fetches(), 0);
    }

    #[test]
    fn test_absent_hits_is_empty() {
        let query = query();
        assert_eq!(ScrollResultIterator::new(&query, None::<Vec<RawHit>>).count(), 0);
        assert_eq!(ScrollResultIterator::empty(&query).count(), 0);
        assert_eq!(query.adapter().store().single_fetches(), 0);
    }

    #[test]
    fn test_missing_record_fails_without_placeholder() {
        let query = query();
        let mut iter = ScrollResultIterator::new(&query, Some(hits(&["1", "9", "2"])));

        assert_eq!(iter.next().unwrap().unwrap(), "first");
        let err = iter.next().unwrap().unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains('9'));
        assert!(iter.next().is_none());
        assert_eq!(iter.position(), 2);
    }

    #[test]
    fn test_hit_without_id_is_malformed() {
        let query = query();
        let mut iter = ScrollResultIterator::new(&query, Some(vec![RawHit::default()]));
        assert!(iter.next().unwrap().unwrap_err().is_malformed());
        assert_eq!(query.adapter().store().single_fetches(), 0);
    }

    #[test]
    fn test_store_error_propagates() {
        let query = query();
        query.adapter().store().set_offline(true);
        let mut iter = ScrollResultIterator::new(&query, Some(hits(&["1"])));
        assert!(iter.next().unwrap().unwrap_err().is_store());
    }

    #[test]
    fn test_lazy_until_polled() {
        let query = query();
        let mut iter = ScrollResultIterator::new(&query, Some(hits(&["1", "2"])));
        assert_eq!(query.adapter().store().single_fetches(), 0);
        iter.next();
        assert_eq!(query.adapter().store().single_fetches(), 1);
    }

    #[test]
    fn test_reiterating_refetches() {
        let query = query();
        let page = hits(&["1", "2"]);
        for _ in 0..2 {
            let n = ScrollResultIterator::new(&query, Some(page.iter().cloned()))
                .filter(Result::is_ok)
                .count();
            assert_eq!(n, 2);
        }
        assert_eq!(query.adapter().store().single_fetches(), 4);
    }

    #[test]
    fn test_consumed_on_worker_thread() {
        let query = query();
        let iter = ScrollResultIterator::new(&query, Some(hits(&["2", "1"])));
        let records: Vec<String> = std::thread::scope(|scope| {
            scope
                .spawn(move || iter.collect::<SearchResult<Vec<String>>>())
                .join()
                .unwrap()
        })
        .unwrap();
        assert_eq!(records, vec!["second", "first"]);
        assert_eq!(query.adapter().store().single_fetches(), 2);
    }

    #[test]
    fn test_from_response() {
        let query = query();
        let raw = RawSearchResponse::new().with_ids(["2"]);
        let records: Vec<String> = ScrollResultIterator::from_response(&query, raw)
            .collect::<SearchResult<_>>()
            .unwrap();
        assert_eq!(records, vec!["second"]);
    }
}
