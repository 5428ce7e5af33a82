//! Resolve command - look up a category by id or display path

use super::Context;
use crate::exit_codes;
use crate::output::{print_json, Status};
use anyhow::Result;
use catmatch_taxonomy::Category;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Resolved<'a> {
    category: Category,
    path: &'a str,
}

/// Run resolve
pub fn run(ctx: &Context, id_or_path: &str, json: bool) -> Result<u8> {
    let category = match ctx.taxonomy.resolve(id_or_path) {
        Ok(category) => category,
        Err(e) => {
            tracing::debug!(input = id_or_path, code = e.code() as u32, "Resolve failed");
            Status::error(&e.to_string());
            return Ok(exit_codes::NO_MATCH);
        }
    };

    // resolve only returns known ids
    let path = ctx.taxonomy.path(category).unwrap_or_default();

    if json {
        print_json(&Resolved { category, path })?;
    } else {
        println!("{}  {}", category.bold(), path);
    }
    Ok(exit_codes::SUCCESS)
}
