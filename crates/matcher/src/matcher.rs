//! Best-category selection over the whole taxonomy.

use crate::config::MatcherConfig;
use crate::error::{MatchError, Result};
use crate::index::TaxonomyIndex;
use crate::normalize::{EnglishStemmer, Stemmer};
use crate::score::{Query, Scorer, Scratch};
use catmatch_taxonomy::{Category, Taxonomy, TaxonomyError};
use serde::{Deserialize, Serialize};

/// Best category for a query and its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Matched category, [`Category::UNKNOWN`] when nothing scored
    pub category: Category,
    /// Score in `[0, 1]`
    pub score: f32,
}

impl MatchOutcome {
    /// Outcome of a query that matched nothing.
    pub const UNKNOWN: MatchOutcome = MatchOutcome {
        category: Category::UNKNOWN,
        score: 0.0,
    };

    /// Returns true if no category was matched.
    pub fn is_unknown(&self) -> bool {
        self.category.is_unknown()
    }
}

/// Finds the closest taxonomy category for a noisy category path.
///
/// The matcher tolerates typos, plurals and missing path levels: a query
/// may name only a leaf ("Oranges") or a differently worded path
/// ("Food & Grocery > Produce > Citrus Fruit > Oranges").
///
/// The matcher is immutable and can be shared between threads; each thread
/// brings its own [`Scratch`].
pub struct Matcher {
    index: TaxonomyIndex,
    config: MatcherConfig,
    stemmer: Box<dyn Stemmer>,
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("categories", &self.index.len())
            .field("parts", &self.index.part_count())
            .field("config", &self.config)
            .finish()
    }
}

impl Matcher {
    /// Create a matcher from a prebuilt index.
    ///
    /// `stemmer` must be the stemmer the index was built with. Zero config
    /// values are replaced by defaults.
    pub fn new(
        index: TaxonomyIndex,
        config: MatcherConfig,
        stemmer: Box<dyn Stemmer>,
    ) -> Result<Self> {
        let config = config.with_defaults();
        config.validate()?;
        Ok(Self {
            index,
            config,
            stemmer,
        })
    }

    /// Create an English matcher for a taxonomy.
    pub fn from_taxonomy(taxonomy: &Taxonomy, config: MatcherConfig) -> Result<Self> {
        Self::with_stemmer(taxonomy, config, EnglishStemmer::new())
    }

    /// Create a matcher for a taxonomy with a custom stemmer.
    pub fn with_stemmer<S>(taxonomy: &Taxonomy, config: MatcherConfig, stemmer: S) -> Result<Self>
    where
        S: Stemmer + 'static,
    {
        let index = TaxonomyIndex::from_taxonomy(taxonomy, &stemmer);
        Self::new(index, config, Box::new(stemmer))
    }

    /// Effective configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Underlying index.
    pub fn index(&self) -> &TaxonomyIndex {
        &self.index
    }

    /// Match a query to a category.
    ///
    /// Returns [`Category::UNKNOWN`] when no category scores above zero.
    pub fn match_category(&self, query: &str) -> Result<Category> {
        self.match_category_with(query, &mut Scratch::new())
    }

    /// Like [`Matcher::match_category`], reusing caller-owned scratch space.
    pub fn match_category_with(&self, query: &str, scratch: &mut Scratch) -> Result<Category> {
        self.best_match(query, scratch).map(|outcome| outcome.category)
    }

    /// Best category and its score.
    ///
    /// Equal scores go to the category with the shorter path, then to the
    /// lowest id, so an exact path beats a deeper path that contains all of
    /// its segments.
    ///
    /// # Errors
    /// * [`MatchError::EmptyInput`] - the query has no non-empty segment
    /// * [`MatchError::NoMatch`] - the index is empty
    pub fn best_match(&self, query: &str, scratch: &mut Scratch) -> Result<MatchOutcome> {
        let parsed = Query::parse(query, self.stemmer.as_ref())?;

        if self.index.is_empty() {
            return Err(MatchError::NoMatch);
        }

        let scorer = Scorer::new(&self.index, &self.config);
        let mut best = MatchOutcome::UNKNOWN;
        let mut best_depth = usize::MAX;

        // ascending id: equal score and depth keeps the lower id
        for (category, slots) in self.index.categories() {
            let score = scorer.score(&parsed, slots, scratch);
            if score <= 0.0 {
                continue;
            }
            if score > best.score || (score == best.score && slots.len() < best_depth) {
                best = MatchOutcome { category, score };
                best_depth = slots.len();
            }
        }

        tracing::trace!(
            query,
            category = %best.category,
            score = best.score,
            "Category matched"
        );

        Ok(best)
    }

    /// Score of a query against one given category.
    ///
    /// Useful to see how far an expected category is from the best match.
    ///
    /// # Errors
    /// * [`MatchError::EmptyInput`] - the query has no non-empty segment
    /// * [`MatchError::Taxonomy`] - `category` is not in the index
    pub fn score_category(
        &self,
        query: &str,
        category: Category,
        scratch: &mut Scratch,
    ) -> Result<f32> {
        let parsed = Query::parse(query, self.stemmer.as_ref())?;
        let slots = self
            .index
            .category_parts(category)
            .ok_or(TaxonomyError::UnknownCategoryId(category.id()))?;
        Ok(Scorer::new(&self.index, &self.config).score(&parsed, slots, scratch))
    }

    /// Best match, rejected unless it reaches `min_score`.
    ///
    /// # Errors
    /// [`MatchError::NoMatch`] when the best score is below the configured
    /// `min_score` or nothing matched, in addition to the errors of
    /// [`Matcher::best_match`].
    pub fn match_strict(&self, query: &str, scratch: &mut Scratch) -> Result<MatchOutcome> {
        let outcome = self.best_match(query, scratch)?;
        if outcome.is_unknown() || outcome.score < self.config.min_score {
            return Err(MatchError::NoMatch);
        }
        Ok(outcome)
    }

    /// Match many queries, in parallel when the `parallel` feature is on.
    ///
    /// Results are returned in input order.
    pub fn match_batch<S>(&self, queries: &[S]) -> Vec<Result<MatchOutcome>>
    where
        S: AsRef<str> + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            queries
                .par_iter()
                .map_init(Scratch::new, |scratch, query| {
                    self.best_match(query.as_ref(), scratch)
                })
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            let mut scratch = Scratch::new();
            queries
                .iter()
                .map(|query| self.best_match(query.as_ref(), &mut scratch))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::IdentityStemmer;

    fn matcher(source: &str) -> Matcher {
        let taxonomy = Taxonomy::parse(source).unwrap();
        Matcher::from_taxonomy(&taxonomy, MatcherConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let matcher = matcher("1 - Apparel & Accessories\n");
        assert!(matches!(matcher.match_category(""), Err(MatchError::EmptyInput)));
        assert!(matches!(matcher.match_category("   "), Err(MatchError::EmptyInput)));
        assert!(matches!(matcher.match_category(" > "), Err(MatchError::EmptyInput)));
    }

    #[test]
    fn test_empty_index() {
        let matcher = matcher("# nothing here\n");
        assert!(matches!(matcher.match_category("Shorts"), Err(MatchError::NoMatch)));
    }

    #[test]
    fn test_tie_goes_to_lowest_id() {
        let matcher = matcher("30 - Garden > Widgets\n20 - Office > Widgets\n25 - Office\n");
        let outcome = matcher.best_match("Widgets", &mut Scratch::new()).unwrap();
        assert_eq!(outcome.category, Category::new(20));
        assert_eq!(outcome.score, 1.0);
    }

    #[test]
    fn test_tie_goes_to_shorter_path() {
        let matcher = matcher("1 - Food > Dairy > Milk\n2 - Food > Milk\n");
        let outcome = matcher.best_match("Food > Milk", &mut Scratch::new()).unwrap();
        assert_eq!(outcome.category, Category::new(2));
        assert_eq!(outcome.score, 1.0);

        // the deeper path still wins on its own exact path
        let outcome = matcher
            .best_match("Food > Dairy > Milk", &mut Scratch::new())
            .unwrap();
        assert_eq!(outcome.category, Category::new(1));
    }

    #[test]
    fn test_unknown_when_nothing_scores() {
        let matcher = matcher("1 - Beverages > Beer\n");
        let outcome = matcher.best_match("Beef", &mut Scratch::new()).unwrap();
        assert_eq!(outcome, MatchOutcome::UNKNOWN);
        assert!(outcome.is_unknown());
    }

    #[test]
    fn test_score_category() {
        let matcher = matcher("1 - Food > Dairy > Milk\n2 - Food > Milk\n");
        let mut scratch = Scratch::new();

        let score = matcher
            .score_category("Food > Dairy > Milk", Category::new(2), &mut scratch)
            .unwrap();
        assert!((score - 2.0 / 3.0).abs() < 1e-6, "score {score}");

        let err = matcher
            .score_category("Milk", Category::new(99), &mut scratch)
            .unwrap_err();
        assert!(matches!(
            err,
            MatchError::Taxonomy(TaxonomyError::UnknownCategoryId(99))
        ));
        assert_eq!(err.code(), crate::error::MatchErrorCode::Taxonomy);
    }

    #[test]
    fn test_outcome_json() {
        let outcome = MatchOutcome {
            category: Category::new(6697),
            score: 0.5,
        };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json, serde_json::json!({ "category": 6697, "score": 0.5 }));

        let back: MatchOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(back, outcome);
    }

    #[test]
    fn test_match_strict_rejects_weak() {
        let matcher = matcher("1 - Food > Beverages > Juice\n");
        let mut scratch = Scratch::new();

        // 1 of 2 segments matched: 0.5 < 0.75
        let weak = matcher.best_match("Drinks > Juice", &mut scratch).unwrap();
        assert_eq!(weak.category, Category::new(1));
        assert_eq!(weak.score, 0.5);
        assert!(matches!(
            matcher.match_strict("Drinks > Juice", &mut scratch),
            Err(MatchError::NoMatch)
        ));

        let strong = matcher.match_strict("Beverages > Juice", &mut scratch).unwrap();
        assert_eq!(strong.category, Category::new(1));
    }

    #[test]
    fn test_config_defaults_applied() {
        let matcher = matcher("1 - Shorts\n");
        assert_eq!(*matcher.config(), MatcherConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let taxonomy = Taxonomy::parse("1 - Shorts\n").unwrap();
        let config = MatcherConfig {
            min_score: 2.0,
            ..MatcherConfig::ZERO
        };
        assert!(matches!(
            Matcher::from_taxonomy(&taxonomy, config),
            Err(MatchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_custom_stemmer() {
        let taxonomy = Taxonomy::parse("1 - Produce > Potatoes\n").unwrap();
        let matcher =
            Matcher::with_stemmer(&taxonomy, MatcherConfig::default(), IdentityStemmer).unwrap();
        let outcome = matcher.best_match("potatoes", &mut Scratch::new()).unwrap();
        // no stemming, but lowercased stems still agree
        assert_eq!(outcome.category, Category::new(1));
        assert_eq!(outcome.score, 1.0);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let matcher = matcher("1 - Beverages > Juice\n2 - Beverages > Milk\n3 - Beverages\n");
        let queries = ["Milk", "Juice", "", "Beverages > Juices"];

        let batch = matcher.match_batch(&queries);
        assert_eq!(batch.len(), queries.len());

        for (query, result) in queries.iter().zip(&batch) {
            let sequential = matcher.best_match(query, &mut Scratch::new());
            match (result, sequential) {
                (Ok(a), Ok(b)) => assert_eq!(*a, b),
                (Err(MatchError::EmptyInput), Err(MatchError::EmptyInput)) => {}
                other => panic!("batch and sequential disagree for {query:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_matcher_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matcher>();
    }
}
