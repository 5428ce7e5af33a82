//! Bench command - match latency for a single query

use super::Context;
use crate::exit_codes;
use crate::output::{field, print_json, Status};
use anyhow::{bail, Result};
use catmatch_matcher::{MatchOutcome, Scratch};
use catmatch_telemetry::{metrics, HistogramStats, Timer};
use owo_colors::OwoColorize;
use serde::Serialize;

const METRIC: &str = "bench.match_ms";
const WARMUP: usize = 10;

/// JSON output for bench
#[derive(Debug, Serialize)]
struct BenchOutput<'a> {
    query: &'a str,
    iterations: usize,
    outcome: MatchOutcome,
    latency_ms: HistogramStats,
}

/// Run bench
pub fn run(ctx: &Context, query: &str, iterations: usize, json: bool) -> Result<u8> {
    if iterations == 0 {
        bail!("--iterations must be at least 1");
    }

    let mut scratch = Scratch::new();
    let outcome = ctx.matcher.best_match(query, &mut scratch)?;

    for _ in 0..WARMUP {
        ctx.matcher.best_match(query, &mut scratch)?;
    }

    for _ in 0..iterations {
        let _timer = Timer::start(METRIC);
        ctx.matcher.best_match(query, &mut scratch)?;
    }

    let Some(latency_ms) = metrics().histogram_stats(METRIC) else {
        bail!("No latency samples recorded");
    };

    let output = BenchOutput {
        query,
        iterations,
        outcome,
        latency_ms,
    };

    if json {
        print_json(&output)?;
    } else {
        print_stats(ctx, &output);
    }
    Ok(exit_codes::SUCCESS)
}

fn print_stats(ctx: &Context, output: &BenchOutput<'_>) {
    Status::header(&format!("Benchmark: {} iterations", output.iterations));

    let matched = ctx
        .taxonomy
        .path(output.outcome.category)
        .unwrap_or("unknown");
    println!("{}", field("Query", format!("{:?}", output.query)));
    println!(
        "{}",
        field("Match", format!("{} ({:.2})", matched, output.outcome.score))
    );
    println!();

    let stats = &output.latency_ms;
    println!("{}", field("Min", format_ms(stats.min)));
    println!("{}", field("Mean", format_ms(stats.mean)));
    println!("{}", field("p50", format_ms(stats.p50).green()));
    println!("{}", field("p95", format_ms(stats.p95).yellow()));
    println!("{}", field("p99", format_ms(stats.p99).red()));
    println!("{}", field("Max", format_ms(stats.max)));
}

fn format_ms(ms: f64) -> String {
    if ms < 1.0 {
        format!("{:.1}µs", ms * 1000.0)
    } else {
        format!("{ms:.3}ms")
    }
}
