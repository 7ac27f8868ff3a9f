use tracing::debug;

use crate::error::GridcastError;
use crate::model::ReferenceTable;

/// Default similarity ratio below which a table entry is never suggested.
pub const DEFAULT_CUTOFF: f64 = 0.5;

/// Default cap on the number of suggestions offered at once.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Question shown above the suggestion list.
const SUGGEST_MESSAGE: &str = "Did you mean one of these cities?";

/// Terminal interaction the resolver and pipeline need: one free-text
/// question and one single-choice selection. The CLI backs this with
/// `inquire`; tests supply scripted implementations.
pub trait Prompter {
    /// Asks a free-text question and returns the typed line.
    fn input(&self, message: &str) -> Result<String, GridcastError>;

    /// Presents `options` for single-choice selection and returns the pick.
    fn pick(&self, message: &str, options: Vec<String>) -> Result<String, GridcastError>;
}

/// Knobs for the similarity search.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    /// Entries scoring below this ratio (0..=1) are ignored.
    pub cutoff: f64,
    /// At most this many candidates are offered.
    pub max_suggestions: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

/// Resolves free-text input to a display key present in the table.
///
/// An exact, case-sensitive display-key match resolves immediately without
/// touching the prompter. Otherwise the closest entries at or above the
/// cutoff are offered for selection, and when nothing comes close the run
/// fails with `NotFound` before any weather request is made.
pub fn resolve_location(
    query: &str,
    table: &ReferenceTable,
    prompter: &dyn Prompter,
    options: &MatchOptions,
) -> Result<String, GridcastError> {
    if table.contains_key(query) {
        debug!("exact match for {query:?}");
        return Ok(query.to_owned());
    }

    let candidates = closest_matches(query, table.display_keys(), options);
    if candidates.is_empty() {
        return Err(GridcastError::NotFound {
            query: query.to_owned(),
        });
    }

    debug!("{} suggestions for {query:?}", candidates.len());
    prompter.pick(SUGGEST_MESSAGE, candidates)
}

/// Entries most similar to `query`, best first, filtered at the cutoff and
/// capped at `max_suggestions`. Similarity is the character-bigram
/// Sorensen-Dice ratio (2 * common / total); ties keep table order.
fn closest_matches(query: &str, keys: &[String], options: &MatchOptions) -> Vec<String> {
    let mut scored: Vec<(f64, &String)> = keys
        .iter()
        .map(|key| (strsim::sorensen_dice(query, key), key))
        .filter(|(score, _)| *score >= options.cutoff)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(options.max_suggestions)
        .map(|(_, key)| key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocationRecord;

    /// Fails the test if any interaction is requested.
    struct NoPrompt;

    impl Prompter for NoPrompt {
        fn input(&self, _message: &str) -> Result<String, GridcastError> {
            panic!("unexpected free-text prompt")
        }

        fn pick(&self, _message: &str, _options: Vec<String>) -> Result<String, GridcastError> {
            panic!("unexpected selection prompt")
        }
    }

    /// Always selects the first offered candidate.
    struct PickFirst;

    impl Prompter for PickFirst {
        fn input(&self, _message: &str) -> Result<String, GridcastError> {
            panic!("unexpected free-text prompt")
        }

        fn pick(&self, _message: &str, options: Vec<String>) -> Result<String, GridcastError> {
            Ok(options[0].clone())
        }
    }

    fn table_of(pairs: &[(&str, &str)]) -> ReferenceTable {
        ReferenceTable::from_records(
            pairs
                .iter()
                .map(|(city, state)| LocationRecord::new(*city, *state, 0.0, 0.0))
                .collect(),
        )
    }

    fn keys_of(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_skips_the_prompter() {
        let table = table_of(&[("Chicago", "Illinois"), ("Boston", "Massachusetts")]);
        let got = resolve_location(
            "Chicago, Illinois",
            &table,
            &NoPrompt,
            &MatchOptions::default(),
        )
        .unwrap();
        assert_eq!(got, "Chicago, Illinois");
    }

    #[test]
    fn near_miss_offers_candidates() {
        let table = table_of(&[("Chicago", "Illinois"), ("Boston", "Massachusetts")]);
        let got = resolve_location(
            "chicago illinois",
            &table,
            &PickFirst,
            &MatchOptions::default(),
        )
        .unwrap();
        assert_eq!(got, "Chicago, Illinois");
    }

    #[test]
    fn hopeless_query_is_not_found() {
        let table = table_of(&[("Chicago", "Illinois"), ("Boston", "Massachusetts")]);
        let err = resolve_location(
            "Llanfairpwllgwyngyll",
            &table,
            &NoPrompt,
            &MatchOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GridcastError::NotFound { .. }));
    }

    #[test]
    fn canceled_selection_propagates() {
        struct Cancels;

        impl Prompter for Cancels {
            fn input(&self, _message: &str) -> Result<String, GridcastError> {
                panic!("unexpected free-text prompt")
            }

            fn pick(
                &self,
                _message: &str,
                _options: Vec<String>,
            ) -> Result<String, GridcastError> {
                Err(GridcastError::Prompt("canceled".to_string()))
            }
        }

        let table = table_of(&[("Chicago", "Illinois")]);
        let err = resolve_location(
            "chicago illinois",
            &table,
            &Cancels,
            &MatchOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GridcastError::Prompt(_)));
    }

    #[test]
    fn closest_matches_orders_best_first() {
        let keys = keys_of(&["New York, New York", "Buffalo, New York"]);
        let got = closest_matches("Bufalo, New York", &keys, &MatchOptions::default());
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], "Buffalo, New York");
    }

    #[test]
    fn closest_matches_filters_below_cutoff() {
        let keys = keys_of(&["Portland, Oregon"]);
        let got = closest_matches("zzz", &keys, &MatchOptions::default());
        assert!(got.is_empty());
    }

    #[test]
    fn closest_matches_caps_suggestions() {
        let keys = keys_of(&[
            "Springfield, Illinois",
            "Springfield, Missouri",
            "Springfield, Massachusetts",
            "Springfield, Ohio",
        ]);
        let got = closest_matches("Springfield, Ill", &keys, &MatchOptions::default());
        assert_eq!(got.len(), 3);
        assert_eq!(got[0], "Springfield, Illinois");
        assert!(!got.contains(&"Springfield, Massachusetts".to_string()));
    }

    #[test]
    fn cutoff_and_cap_are_tunable() {
        let keys = keys_of(&[
            "Springfield, Illinois",
            "Springfield, Missouri",
            "Springfield, Ohio",
        ]);
        let options = MatchOptions {
            cutoff: 0.0,
            max_suggestions: 1,
        };
        let got = closest_matches("Springfield", &keys, &options);
        assert_eq!(got.len(), 1);
    }
}
