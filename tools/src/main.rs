//! score-runner: headless scoring report over a complaint export.
//!
//! Usage:
//!   score-runner --input complaints.json
//!   score-runner --input complaints.json --config scoring.json --now 2024-06-01T00:00:00Z
//!   score-runner --input complaints.json --track 2024-01-01 2024-12-01

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use scorecard_core::{
    rank_stations, Clock, Complaint, FixedClock, ScoringConfig, ScoringEngine, StationScores,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let input = flag_value(&args, "--input").context("--input <complaints.json> is required")?;
    let config_path = flag_value(&args, "--config");
    let now = flag_value(&args, "--now").map(parse_now).transpose()?;
    let track = track_range(&args)?;

    let config = match config_path {
        Some(path) => ScoringConfig::load(path)?,
        None => ScoringConfig::default(),
    };
    let engine = match now {
        Some(instant) => ScoringEngine::new(config, Box::new(FixedClock::new(instant))),
        None => ScoringEngine::with_system_clock(config),
    };

    let content =
        std::fs::read_to_string(input).with_context(|| format!("Cannot read {input}"))?;
    let complaints: Vec<Complaint> =
        serde_json::from_str(&content).with_context(|| format!("Cannot parse {input}"))?;
    log::info!("loaded {} complaints from {input}", complaints.len());

    match track {
        Some((start, end)) => {
            let series = engine.track_scores(&complaints, start, end)?;
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
        None => {
            let scores = engine.calculate_scores(&complaints)?;
            print_summary(&engine, &scores, complaints.len());
        }
    }

    Ok(())
}

fn print_summary(engine: &ScoringEngine, scores: &StationScores, complaint_count: usize) {
    println!("=== STATION SCORES ===");
    println!("  scored at:   {}", engine.clock().now().to_rfc3339());
    println!("  complaints:  {complaint_count}");
    println!("  stations:    {}", scores.len());
    println!();

    if scores.is_empty() {
        println!("  (No complaints to score)");
        return;
    }

    for (rank, s) in rank_stations(scores).into_iter().enumerate() {
        println!(
            "  {:>3}. {:<24} {:>6.2} | open {:>5} | attended {:>5} | resolved in {}",
            rank + 1,
            s.station,
            s.final_score,
            s.percentage_unaddressed,
            s.percentage_attended_to,
            s.average_case_duration.as_deref().unwrap_or("-"),
        );
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_now(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .with_context(|| format!("--now must be RFC 3339, got {value}"))
}

/// `--track START END`, if present.
fn track_range(args: &[String]) -> Result<Option<(NaiveDate, NaiveDate)>> {
    args.windows(3)
        .find(|w| w[0] == "--track")
        .map(|w| parse_range(&w[1], &w[2]))
        .transpose()
}

fn parse_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate)> {
    let parse = |s: &str| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("--track dates must be YYYY-MM-DD, got {s}"))
    };
    Ok((parse(start)?, parse(end)?))
}
