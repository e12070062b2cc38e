//! Case-insensitive search over titles, descriptions and tags.

use crate::types::DreamRecord;

/// Records whose title, description or any tag contains `query`
/// (case-insensitive), in input order. An empty query matches nothing.
pub fn search<'a>(records: &'a [DreamRecord], query: &str) -> Vec<&'a DreamRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| matches(r, &query))
        .collect()
}

fn matches(record: &DreamRecord, query: &str) -> bool {
    record.title().to_lowercase().contains(query)
        || record.description().to_lowercase().contains(query)
        || record.tags().iter().any(|t| t.contains(query))
}
