//! Approximate taxonomy matching for catmatch.
//!
//! Maps noisy, truncated or misspelled category paths (typically produced by
//! an LLM or typed by a user) to the closest node of a fixed product
//! taxonomy, in a few milliseconds and without per-category allocation.
//!
//! This crate provides:
//! - Bounded Levenshtein distance with reusable buffers
//! - Phrase normalization with pluggable stemming
//! - A build-once taxonomy index
//! - Exact / stem / fuzzy segment scoring and best-category selection
//!
//! # Example
//!
//! ```
//! use catmatch_matcher::{Matcher, MatcherConfig};
//! use catmatch_taxonomy::{Category, Taxonomy};
//!
//! let taxonomy = Taxonomy::parse(
//!     "6658 - Food Items > Citrus Fruits\n6697 - Food Items > Citrus Fruits > Oranges\n",
//! )
//! .unwrap();
//! let matcher = Matcher::from_taxonomy(&taxonomy, MatcherConfig::default()).unwrap();
//!
//! let category = matcher
//!     .match_category("Food & Grocery > Produce > Citrus Fruit > Oranges")
//!     .unwrap();
//! assert_eq!(category, Category::new(6697));
//! ```

pub mod distance;
mod config;
mod error;
mod index;
mod matcher;
mod normalize;
mod score;

pub use config::{
    MatcherConfig, DEFAULT_MAX_NODE_DISTANCE, DEFAULT_MIN_NODE_LENGTH, DEFAULT_MIN_SCORE,
};
pub use distance::{bounded_distance, levenshtein_distance, DistanceBuffer};
pub use error::{MatchError, MatchErrorCode, Result};
pub use index::{Part, PartSlot, TaxonomyIndex};
pub use matcher::{MatchOutcome, Matcher};
pub use normalize::{normalize_phrase, EnglishStemmer, IdentityStemmer, Stemmer};
pub use score::{Query, Scorer, Scratch, Segment, MAX_COMPARE_LEN};
