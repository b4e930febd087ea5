use itertools::Itertools;

/// Ascending by bytes.
pub fn sorted_keys<I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    keys.into_iter().sorted().collect_vec()
}

#[cfg(test)]
mod tests {
    use super::sorted_keys;

    #[test]
    fn bytewise_order() {
        let keys = vec!["b", "B", "a", "ab", "", "é", "Z", "10", "9"]
            .into_iter()
            .map(String::from);
        assert_eq!(
            sorted_keys(keys),
            vec!["", "10", "9", "B", "Z", "a", "ab", "b", "é"]
        );
    }

    #[test]
    fn empty() {
        assert!(sorted_keys(Vec::new()).is_empty());
    }
}
