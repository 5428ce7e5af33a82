//! Match command - map queries to categories

use super::Context;
use crate::exit_codes;
use crate::output::{print_json, Status};
use anyhow::Result;
use catmatch_matcher::{MatchError, Scratch};
use catmatch_taxonomy::Category;
use catmatch_telemetry::{metrics, Timer};
use owo_colors::OwoColorize;
use serde::Serialize;

/// One query's result
#[derive(Debug, Serialize)]
struct MatchRow<'a> {
    query: &'a str,
    category: Option<Category>,
    score: f32,
    path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl MatchRow<'_> {
    fn matched(&self) -> bool {
        self.category.is_some()
    }
}

/// Run match
pub fn run(ctx: &Context, queries: &[String], strict: bool, json: bool) -> Result<u8> {
    let rows = match_rows(ctx, queries, strict);

    if json {
        print_json(&rows)?;
    } else {
        for row in &rows {
            print_row(row);
        }
    }

    let code = if rows.iter().all(MatchRow::matched) {
        exit_codes::SUCCESS
    } else {
        exit_codes::NO_MATCH
    };
    Ok(code)
}

fn match_rows<'a>(ctx: &'a Context, queries: &'a [String], strict: bool) -> Vec<MatchRow<'a>> {
    let mut scratch = Scratch::new();

    queries
        .iter()
        .map(|query| {
            let timer = Timer::start("match.latency_ms");
            let result = if strict {
                ctx.matcher.match_strict(query, &mut scratch)
            } else {
                ctx.matcher.best_match(query, &mut scratch)
            };
            timer.stop();

            match result {
                Ok(outcome) if !outcome.is_unknown() => {
                    metrics().increment("match.ok");
                    MatchRow {
                        query,
                        category: Some(outcome.category),
                        score: outcome.score,
                        path: ctx.taxonomy.path(outcome.category),
                        error: None,
                    }
                }
                Ok(outcome) => {
                    metrics().increment("match.unknown");
                    MatchRow {
                        query,
                        category: None,
                        score: outcome.score,
                        path: None,
                        error: Some(MatchError::NoMatch.to_string()),
                    }
                }
                Err(e) => {
                    metrics().increment("match.error");
                    tracing::debug!(query = %query, code = e.code() as u32, "Match failed");
                    MatchRow {
                        query,
                        category: None,
                        score: 0.0,
                        path: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect()
}

fn print_row(row: &MatchRow<'_>) {
    match (row.category, row.path) {
        (Some(category), Some(path)) => Status::success(&format!(
            "{:>8}  {:.2}  {}",
            category.bold(),
            row.score,
            path
        )),
        _ => Status::error(&format!(
            "{:?}: {}",
            row.query,
            row.error.as_deref().unwrap_or("no match")
        )),
    }
}
