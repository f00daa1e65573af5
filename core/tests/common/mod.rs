//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use scorecard_core::{Clock, Complaint, ComplaintStatus, IncidentType, ScoringEngine};
use std::sync::atomic::{AtomicI64, Ordering};

pub const STATION: &str = "Station";

/// Midnight UTC, `n` days after 2000-01-01.
pub fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
}

/// Engine with default constants and the clock frozen at `day(now)`.
pub fn engine_at(now: i64) -> ScoringEngine {
    init_logging();
    ScoringEngine::build_test(day(now))
}

/// Route `log` output through the test harness. Set RUST_LOG to see it.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A clock that jumps `step` days forward after every read, starting at
/// `day(start)`.
pub struct SteppingClock {
    next_day: AtomicI64,
    step: i64,
}

impl SteppingClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next_day: AtomicI64::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        day(self.next_day.fetch_add(self.step, Ordering::SeqCst))
    }
}

pub fn unaddressed(id: usize, incident: IncidentType, made: i64) -> Complaint {
    Complaint::unaddressed(format!("c-{id}"), STATION, incident, day(made))
}

pub fn investigating(id: usize, incident: IncidentType, made: i64, investigated: i64) -> Complaint {
    unaddressed(id, incident, made).investigating(day(investigated))
}

pub fn resolved(
    id: usize,
    incident: IncidentType,
    made: i64,
    investigated: i64,
    closed: i64,
) -> Complaint {
    investigating(id, incident, made, investigated).resolved(day(closed))
}

/// `n` copies of a complaint shape with distinct ids.
pub fn batch(n: usize, make: impl Fn(usize) -> Complaint) -> Vec<Complaint> {
    (0..n).map(make).collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Parse a percentage string such as `33.3%`.
pub fn percent(value: &str) -> f64 {
    value
        .trim_end_matches('%')
        .parse()
        .unwrap_or_else(|_| panic!("not a percentage: {value}"))
}

/// Well-formed random complaints spread over a few stations and the
/// first `span_days` days of 2000. All timestamps stay at or before
/// `day(span_days)`.
pub fn random_complaints(seed: u64, count: usize, span_days: i64) -> Vec<Complaint> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let stations = ["Central", "Harbour", "North Gate", "Old Town"];

    (0..count)
        .map(|i| {
            let station = stations[rng.gen_range(0..stations.len())];
            let incident = IncidentType::ALL[rng.gen_range(0..IncidentType::ALL.len())];
            let made = rng.gen_range(0..=span_days);
            let complaint =
                Complaint::unaddressed(format!("rnd-{seed}-{i}"), station, incident, day(made));

            let status = match rng.gen_range(0..3) {
                0 => ComplaintStatus::Unaddressed,
                1 => ComplaintStatus::Investigating,
                _ => ComplaintStatus::Resolved,
            };
            match status {
                ComplaintStatus::Unaddressed => complaint,
                ComplaintStatus::Investigating => {
                    let investigated = rng.gen_range(made..=span_days);
                    complaint.investigating(day(investigated))
                }
                ComplaintStatus::Resolved => {
                    let investigated = rng.gen_range(made..=span_days);
                    let closed = rng.gen_range(investigated..=span_days);
                    complaint
                        .investigating(day(investigated))
                        .resolved(day(closed))
                }
            }
        })
        .collect()
}
