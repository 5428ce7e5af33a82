//! CLI command implementations

pub mod bench;
pub mod check;
pub mod matching;
pub mod resolve;
pub mod stats;

use catmatch_matcher::Matcher;
use catmatch_taxonomy::Taxonomy;
use std::path::PathBuf;

/// Loaded taxonomy and matcher shared by every command
pub struct Context {
    pub taxonomy: Taxonomy,
    pub matcher: Matcher,
    pub taxonomy_path: PathBuf,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Context;
    use catmatch_matcher::{Matcher, MatcherConfig};
    use catmatch_taxonomy::Taxonomy;
    use std::path::PathBuf;

    pub const TAXONOMY: &str = "\
# test taxonomy
412 - Food, Beverages & Tobacco
413 - Food, Beverages & Tobacco > Beverages
2887 - Food, Beverages & Tobacco > Beverages > Juice
418 - Food, Beverages & Tobacco > Beverages > Milk
422 - Food, Beverages & Tobacco > Food Items
6697 - Food, Beverages & Tobacco > Food Items > Citrus Fruits > Oranges
";

    pub fn context() -> Context {
        let taxonomy = Taxonomy::parse(TAXONOMY).unwrap();
        let matcher = Matcher::from_taxonomy(&taxonomy, MatcherConfig::default()).unwrap();
        Context {
            taxonomy,
            matcher,
            taxonomy_path: PathBuf::from("test-taxonomy.txt"),
        }
    }
}
