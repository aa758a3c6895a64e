//! Content index - the ordered listing of all posts

use super::{ContentStore, IndexEntry};
use crate::error::{Error, Result};

/// Project the store into listing entries, newest first
///
/// The sort is stable, so posts sharing a date keep their file order. At most
/// `limit` entries are returned. A slug claimed by several posts fails the
/// whole index: the listing would otherwise link to an ambiguous route.
pub fn build_index(store: &ContentStore, limit: usize) -> Result<Vec<IndexEntry>> {
    if let Some((slug, sources)) = store.duplicate_slugs().into_iter().next() {
        return Err(Error::AmbiguousSlug { slug, sources });
    }

    let mut entries: Vec<IndexEntry> = store.posts().iter().map(|p| p.index_entry()).collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries.truncate(limit);

    Ok(entries)
}
