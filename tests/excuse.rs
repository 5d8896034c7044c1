use std::thread;
use std::time::{Duration, Instant};

use budget_run::error::ExcuseError;
use budget_run::excuse::{CannedExcuses, ExcuseLookup, ExcuseSource, CANNED_EXCUSES, FALLBACK_EXCUSE};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

struct Fixed(&'static str);

impl ExcuseSource for Fixed {
    fn lookup(&self, _final_score: u32) -> Result<String, ExcuseError> {
        Ok(self.0.to_string())
    }
}

struct Failing;

impl ExcuseSource for Failing {
    fn lookup(&self, _final_score: u32) -> Result<String, ExcuseError> {
        Err(ExcuseError::LookupFailed("service unavailable".to_string()))
    }
}

struct Slow(Duration);

impl ExcuseSource for Slow {
    fn lookup(&self, _final_score: u32) -> Result<String, ExcuseError> {
        thread::sleep(self.0);
        Ok("Too late to matter.".to_string())
    }
}

struct Panicking;

impl ExcuseSource for Panicking {
    fn lookup(&self, _final_score: u32) -> Result<String, ExcuseError> {
        panic!("excuse generator exploded");
    }
}

struct EchoScore;

impl ExcuseSource for EchoScore {
    fn lookup(&self, final_score: u32) -> Result<String, ExcuseError> {
        Ok(format!("Spent {final_score} on vibes."))
    }
}

const TIMEOUT: Duration = Duration::from_secs(2);

#[test]
fn test_successful_lookup() {
    let excuse = ExcuseLookup::spawn(Fixed("Synergy happened."), 1200, TIMEOUT).wait();
    assert_eq!(excuse, "Synergy happened.");
}

#[test]
fn test_lookup_receives_final_score() {
    let excuse = ExcuseLookup::spawn(EchoScore, 4300, TIMEOUT).wait();
    assert_eq!(excuse, "Spent 4300 on vibes.");
}

#[test]
fn test_failing_source_falls_back() {
    let excuse = ExcuseLookup::spawn(Failing, 0, TIMEOUT).wait();
    assert_eq!(excuse, FALLBACK_EXCUSE);
}

#[test]
fn test_empty_answer_falls_back() {
    let excuse = ExcuseLookup::spawn(Fixed("   "), 0, TIMEOUT).wait();
    assert_eq!(excuse, FALLBACK_EXCUSE);
}

#[test]
fn test_panicking_source_falls_back() {
    let excuse = ExcuseLookup::spawn(Panicking, 0, TIMEOUT).wait();
    assert_eq!(excuse, FALLBACK_EXCUSE);
}

#[test]
fn test_slow_source_times_out() {
    let started = Instant::now();
    let excuse = ExcuseLookup::spawn(Slow(Duration::from_secs(5)), 0, Duration::from_millis(50)).wait();

    assert_eq!(excuse, FALLBACK_EXCUSE);
    assert_that(&(started.elapsed() < Duration::from_secs(4))).is_true();
}

#[test]
fn test_poll_pending_then_resolved() {
    let mut lookup = ExcuseLookup::spawn(Slow(Duration::from_millis(100)), 0, TIMEOUT);
    assert_that(&lookup.poll()).is_none();
    assert_that(&lookup.is_resolved()).is_false();

    let deadline = Instant::now() + TIMEOUT;
    let excuse = loop {
        if let Some(excuse) = lookup.poll() {
            break excuse.to_string();
        }
        assert!(Instant::now() < deadline, "lookup never resolved");
        thread::sleep(Duration::from_millis(5));
    };

    assert_eq!(excuse, "Too late to matter.");
    assert_that(&lookup.is_resolved()).is_true();
    // Later polls keep returning the same answer
    assert_that(&lookup.poll().map(str::to_string)).is_equal_to(Some(excuse));
}

#[test]
fn test_poll_after_deadline_falls_back() {
    let mut lookup = ExcuseLookup::spawn(Slow(Duration::from_secs(5)), 0, Duration::from_millis(20));
    thread::sleep(Duration::from_millis(60));
    assert_that(&lookup.poll()).is_equal_to(Some(FALLBACK_EXCUSE));
}

#[test]
fn test_canned_source() {
    let excuse = ExcuseLookup::spawn(CannedExcuses::with_delay(Duration::ZERO), 800, TIMEOUT).wait();
    assert_that(&CANNED_EXCUSES.contains(&excuse.as_str())).is_true();
}
