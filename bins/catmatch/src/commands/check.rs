//! Check command - every category's own path must match back to it

use super::Context;
use crate::exit_codes;
use crate::output::{field, print_json, Status};
use anyhow::Result;
use catmatch_matcher::Scratch;
use catmatch_taxonomy::Category;
use catmatch_telemetry::Timer;
use serde::Serialize;

/// JSON output for check
#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    categories: usize,
    mismatches: Vec<Mismatch<'a>>,
    elapsed_ms: f64,
}

#[derive(Debug, Serialize)]
struct Mismatch<'a> {
    expected: Category,
    path: &'a str,
    got: Option<Category>,
    score: f32,
    expected_score: f32,
}

/// Run check
pub fn run(ctx: &Context, json: bool) -> Result<u8> {
    let timer = Timer::start("check.duration_ms");
    let mismatches = find_mismatches(ctx);
    let elapsed = timer.stop();

    let report = CheckReport {
        categories: ctx.taxonomy.len(),
        mismatches,
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
    };

    if json {
        print_json(&report)?;
    } else {
        print_report(&report);
    }

    if report.mismatches.is_empty() {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::NO_MATCH)
    }
}

fn find_mismatches(ctx: &Context) -> Vec<Mismatch<'_>> {
    let entries: Vec<(Category, &str)> = ctx.taxonomy.iter().collect();
    let paths: Vec<&str> = entries.iter().map(|(_, path)| *path).collect();
    let results = ctx.matcher.match_batch(paths.as_slice());
    let mut scratch = Scratch::new();

    entries
        .into_iter()
        .zip(results)
        .filter_map(|((expected, path), result)| {
            let (got, score) = match result {
                Ok(outcome) if outcome.category == expected => return None,
                Ok(outcome) => (Some(outcome.category), outcome.score),
                Err(_) => (None, 0.0),
            };
            let expected_score = ctx
                .matcher
                .score_category(path, expected, &mut scratch)
                .unwrap_or(0.0);
            Some(Mismatch {
                expected,
                path,
                got,
                score,
                expected_score,
            })
        })
        .collect()
}

fn print_report(report: &CheckReport<'_>) {
    Status::header("Round-trip check");
    println!("{}", field("Categories", report.categories));
    println!("{}", field("Mismatches", report.mismatches.len()));
    println!("{}", field("Elapsed", format!("{:.1}ms", report.elapsed_ms)));
    println!();

    for m in &report.mismatches {
        let got = m
            .got
            .map_or_else(|| "error".to_string(), |c| format!("{c} ({:.2})", m.score));
        Status::error(&format!(
            "{} ({:.2}) {:?} matched {}",
            m.expected, m.expected_score, m.path, got
        ));
    }

    if report.mismatches.is_empty() {
        Status::success("Every category matches its own path");
    }
}
