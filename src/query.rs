//! Free-text filtering over a collection.

use crate::collection::Collection;
use crate::domain::Record;
use crate::pagination::{PageState, Paginated};

/// Case-insensitive substring match of `term` against the record's search
/// fields. An empty term matches everything.
pub fn matches<T: Record>(record: &T, term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Records of the collection matching `term`, in collection order.
pub fn filter_records<'a, T: Record>(collection: &'a Collection<T>, term: &str) -> Vec<&'a T> {
    collection
        .items()
        .iter()
        .filter(|record| matches(*record, term))
        .collect()
}

/// Filters the collection and cuts out the page described by `page`.
pub fn query_page<T>(collection: &Collection<T>, term: &str, page: &PageState) -> Paginated<T>
where
    T: Record + Clone,
{
    let filtered = filter_records(collection, term);
    let total_pages = page.total_pages(filtered.len());
    let items = page
        .window(&filtered)
        .iter()
        .map(|record| (*record).clone())
        .collect();

    Paginated::new(items, page.current(), total_pages)
}
