//! Property-based tests for record normalization.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::normalize::{GenreField, normalize_genres, normalize_records};
    use crate::repository::{ContentRepository, InMemoryRepository};
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn genre_token() -> impl Strategy<Value = String> {
        "[A-Z][a-z]{1,8}(-[A-Z][a-z]{1,5})?"
    }

    fn padding() -> impl Strategy<Value = String> {
        "[ \t]{0,3}"
    }

    proptest! {
        #[test]
        fn test_joined_genres_ignore_whitespace_and_trailing_commas(
            tokens in prop::collection::vec((genre_token(), padding(), padding()), 1..6),
            trailing in ",{0,3}",
        ) {
            let joined = tokens
                .iter()
                .map(|(t, l, r)| format!("{l}{t}{r}"))
                .collect::<Vec<_>>()
                .join(",")
                + &trailing;

            let expected: BTreeSet<String> = tokens.iter().map(|(t, _, _)| t.clone()).collect();
            prop_assert_eq!(normalize_genres(&joined), expected);
        }

        #[test]
        fn test_normalized_tokens_are_trimmed_and_non_empty(s in "[A-Za-z ,\t-]{0,40}") {
            for token in normalize_genres(&s) {
                prop_assert!(!token.is_empty());
                prop_assert_eq!(token.trim(), token.as_str());
                prop_assert!(!token.contains(','));
            }
        }

        #[test]
        fn test_list_and_joined_forms_agree(tokens in prop::collection::vec(genre_token(), 0..6)) {
            let joined = GenreField::Joined(tokens.join(", ")).into_set();
            let list = GenreField::List(tokens.clone()).into_set();
            prop_assert_eq!(joined, list);
        }

        #[test]
        fn test_load_report_accounts_for_every_record(valid in 0usize..8, invalid in 0usize..8) {
            let mut records = Vec::new();
            for i in 0..valid {
                records.push(json!({
                    "Id": i,
                    "title": format!("Title {i}"),
                    "type": "movie",
                    "year": 2020,
                    "rating": 5.0,
                    "popularity": 1.0
                }));
            }
            for _ in 0..invalid {
                records.push(json!({"title": "no id"}));
            }

            let (items, report) = normalize_records(records.clone());
            prop_assert_eq!(items.len(), valid);
            prop_assert_eq!(report.loaded, valid);
            prop_assert_eq!(report.skipped, invalid);

            let (repo, _) = InMemoryRepository::from_records(records);
            let fetched = tokio_test::block_on(repo.get_all()).unwrap();
            prop_assert_eq!(fetched.len(), valid);
        }
    }
}
