//! Stats command - taxonomy and index sizes

use super::Context;
use crate::exit_codes;
use crate::output::{field, print_json, Status};
use anyhow::Result;
use catmatch_matcher::MatcherConfig;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TaxonomyStats {
    taxonomy: String,
    categories: usize,
    parts: usize,
    max_depth: usize,
    config: MatcherConfig,
}

impl TaxonomyStats {
    fn collect(ctx: &Context) -> Self {
        let index = ctx.matcher.index();
        Self {
            taxonomy: ctx.taxonomy_path.display().to_string(),
            categories: index.len(),
            parts: index.part_count(),
            max_depth: index.max_depth(),
            config: *ctx.matcher.config(),
        }
    }
}

/// Run stats
pub fn run(ctx: &Context, json: bool) -> Result<u8> {
    let stats = TaxonomyStats::collect(ctx);

    if json {
        print_json(&stats)?;
        return Ok(exit_codes::SUCCESS);
    }

    Status::header("Taxonomy");
    println!("{}", field("File", &stats.taxonomy));
    println!("{}", field("Categories", stats.categories));
    println!("{}", field("Unique parts", stats.parts));
    println!("{}", field("Max depth", stats.max_depth));

    Status::header("Matcher");
    println!("{}", field("Max distance", stats.config.max_node_distance));
    println!("{}", field("Min length", stats.config.min_node_length));
    println!("{}", field("Min score", stats.config.min_score));

    if stats.categories == 0 {
        Status::warning("Taxonomy is empty, every match will fail");
    }
    Ok(exit_codes::SUCCESS)
}
