use common::declare_reducer;
use common::{Reducer, Result};

/// Concatenates the values with commas, in the order they arrived.
#[derive(Debug, Default)]
struct JoinReducer;

impl Reducer for JoinReducer {
    fn reduce(&self, _key: String, values: Vec<String>) -> Result<String> {
        Ok(values.join(","))
    }
}

declare_reducer!(JoinReducer::default);

#[cfg(test)]
mod tests {
    use super::JoinReducer;
    use common::Reducer;

    #[test]
    fn keeps_arrival_order() {
        let values = vec!["1".to_owned(), "3".to_owned()];
        assert_eq!(JoinReducer.reduce("a".to_owned(), values).unwrap(), "1,3");
    }
}
