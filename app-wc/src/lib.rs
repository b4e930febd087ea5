use common::declare_reducer;
use common::{Reducer, Result};

/// Word count: every value is one occurrence of the key.
#[derive(Debug, Default)]
struct WcReducer;

impl Reducer for WcReducer {
    fn reduce(&self, _word: String, counts: Vec<String>) -> Result<String> {
        Ok(counts.len().to_string())
    }
}

declare_reducer!(WcReducer::default);
