/// Split a comma-separated list into trimmed, non-empty city names.
///
/// Order and duplicates are preserved; blank entries are dropped silently.
pub fn parse_cities(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        assert_eq!(
            parse_cities("New York, London ,Tokyo"),
            vec!["New York", "London", "Tokyo"]
        );
    }

    #[test]
    fn drops_blank_tokens() {
        assert_eq!(parse_cities(" , Paris,,  ,Rome, "), vec!["Paris", "Rome"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        assert_eq!(parse_cities("Oslo, Oslo, Bergen"), vec!["Oslo", "Oslo", "Bergen"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_cities("").is_empty());
        assert!(parse_cities("   ").is_empty());
        assert!(parse_cities(",,,").is_empty());
    }

    #[test]
    fn count_matches_non_empty_tokens() {
        let inputs = ["a", "a,b", " a , , b ,c", ",x,", "Sao Paulo,  ,Lima,Quito,"];
        for input in inputs {
            let expected = input.split(',').filter(|t| !t.trim().is_empty()).count();
            assert_eq!(parse_cities(input).len(), expected, "input: {input:?}");
        }
    }
}
