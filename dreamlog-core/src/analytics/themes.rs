//! Word weights for a word-cloud renderer.
//!
//! Titles, descriptions and tags all count; each field is tokenized on its
//! own. Rasterization is the presentation layer's job.

use super::frequency::FrequencyTable;
use super::tokenize::Tokenizer;
use crate::types::DreamRecord;

/// Top `limit` theme words across all records.
pub fn theme_weights(records: &[DreamRecord], limit: usize) -> Vec<(String, u64)> {
    theme_weights_with(records, limit, Tokenizer::shared())
}

pub fn theme_weights_with(
    records: &[DreamRecord],
    limit: usize,
    tokenizer: &Tokenizer,
) -> Vec<(String, u64)> {
    let mut table: FrequencyTable<String> = FrequencyTable::new();
    for record in records {
        table.extend(tokenizer.tokenize(record.title()));
        table.extend(tokenizer.tokenize(record.description()));
        for tag in record.tags() {
            table.extend(tokenizer.tokenize(tag));
        }
    }
    table.top_n(limit)
}
