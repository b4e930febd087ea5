use common::declare_reducer;
use common::{Reducer, Result};
use itertools::Itertools;

/// Inverted index: values are the documents a word occurs in.
#[derive(Debug, Default)]
struct IndexerReducer;

impl Reducer for IndexerReducer {
    fn reduce(&self, _word: String, filenames: Vec<String>) -> Result<String> {
        let filenames = filenames.into_iter().sorted().dedup().collect_vec();
        Ok(format!("{} {}", filenames.len(), filenames.join(",")))
    }
}

declare_reducer!(IndexerReducer::default);
