//! Property tests for hydration and pagination invariants

use hitview_core::{InMemoryStore, ModelAdapter, RawSearchResponse, SearchQuery};
use hitview_search::PagedSearchResult;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Hit ids drawn from a small alphabet so duplicates are common
fn hit_ids_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-f]").unwrap(), 0..20)
}

/// Subset of the alphabet present in the store
fn stored_ids_strategy() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set(prop::string::string_regex("[a-f]").unwrap(), 0..6)
}

fn query_with(stored: &HashSet<String>, page: Option<u32>) -> SearchQuery<InMemoryStore<String, String>> {
    let store = InMemoryStore::new();
    for id in stored {
        store.insert(id.clone(), format!("record-{}", id));
    }
    let query = SearchQuery::new(Arc::new(ModelAdapter::new("Letter", store)));
    match page {
        Some(page) => query.with_page(page),
        None => query,
    }
}

proptest! {
    /// Resolution is positional: same length, same order, None exactly where
    /// the store lacks the id
    #[test]
    fn prop_resolution_is_positional(
        ids in hit_ids_strategy(),
        stored in stored_ids_strategy(),
    ) {
        let query = query_with(&stored, None);
        let raw = RawSearchResponse::new().with_ids(ids.iter().cloned());
        let result = PagedSearchResult::new(&query, Some(raw));

        let objects = result.objects().unwrap();
        prop_assert_eq!(objects.len(), ids.len());
        for (id, object) in ids.iter().zip(objects) {
            match object {
                Some(record) => prop_assert_eq!(record.as_str(), format!("record-{}", id)),
                None => prop_assert!(!stored.contains(id)),
            }
        }
    }

    /// Any number of accesses costs at most one batch fetch
    #[test]
    fn prop_fetch_at_most_once(
        ids in hit_ids_strategy(),
        accesses in 1usize..6,
    ) {
        let stored: HashSet<String> = ids.iter().cloned().collect();
        let query = query_with(&stored, None);
        let raw = RawSearchResponse::new().with_ids(ids.iter().cloned());
        let result = PagedSearchResult::new(&query, Some(raw));

        for i in 0..accesses {
            match i % 3 {
                0 => { result.objects().unwrap(); }
                1 => { result.iter().unwrap().count(); }
                _ => { result.at(i).unwrap(); }
            }
        }
        prop_assert!(query.adapter().store().batch_fetches() <= 1);
        prop_assert_eq!(result.count(), ids.len());
    }

    /// Current page follows the query only when there are hits
    #[test]
    fn prop_current_page(
        ids in hit_ids_strategy(),
        total in 0u64..1000,
        page in prop::option::of(0u32..50),
    ) {
        let query = query_with(&HashSet::new(), page);
        let raw = RawSearchResponse::new().with_total(total).with_ids(ids.iter().cloned());
        let result = PagedSearchResult::new(&query, Some(raw));

        let expected = match page {
            Some(p) if p > 0 && !ids.is_empty() => p,
            _ => 1,
        };
        prop_assert_eq!(result.current_page(), expected);
        prop_assert_eq!(result.total(), total);
    }
}
