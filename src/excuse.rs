//! Post-game excuse lookup.
//!
//! The lookup runs on its own thread and is polled from the frame loop. Whatever goes
//! wrong (an error, a timeout, a panicking source) the caller gets [`FALLBACK_EXCUSE`].

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, warn};

use crate::error::ExcuseError;

/// Shown whenever no excuse could be produced in time.
pub const FALLBACK_EXCUSE: &str = "The budget just... disappeared into the cloud.";

/// How long a lookup may take before the fallback is used.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

pub const CANNED_EXCUSES: [&str; 13] = [
    "We're pivoting to an organic-only growth strategy.",
    "It's not a loss, it's a brand awareness investment.",
    "The ROI is intangible but spiritual.",
    "We optimized for engagement, not revenue.",
    "It's a strategic burn to capture market share.",
    "The algorithm ate my homework.",
    "We are A/B testing bankruptcy.",
    "Let's circle back on the budget variance next quarter.",
    "It's a loss leader for a product we haven't invented yet.",
    "The synergy wasn't synergistic enough.",
    "We invested in 'thought leadership' instead of profits.",
    "It's a paradigm shift, you wouldn't understand.",
    "Disrupting the market requires breaking the bank.",
];

/// Anything that can turn a final score into a short excuse.
pub trait ExcuseSource: Send + 'static {
    fn lookup(&self, final_score: u32) -> Result<String, ExcuseError>;
}

/// Picks a random canned excuse after a short pause.
#[derive(Debug, Clone)]
pub struct CannedExcuses {
    delay: Duration,
}

impl CannedExcuses {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(600);

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for CannedExcuses {
    fn default() -> Self {
        Self::with_delay(Self::DEFAULT_DELAY)
    }
}

impl ExcuseSource for CannedExcuses {
    fn lookup(&self, _final_score: u32) -> Result<String, ExcuseError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let index = rand::rng().random_range(0..CANNED_EXCUSES.len());
        Ok(CANNED_EXCUSES[index].to_string())
    }
}

/// An excuse lookup in flight.
pub struct ExcuseLookup {
    receiver: Option<Receiver<Result<String, ExcuseError>>>,
    deadline: Instant,
    timeout: Duration,
    resolved: Option<String>,
}

impl ExcuseLookup {
    /// Starts looking up an excuse for `final_score` on a background thread.
    pub fn spawn<S: ExcuseSource>(source: S, final_score: u32, timeout: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let spawned = thread::Builder::new().name("excuse-lookup".to_string()).spawn(move || {
            // The receiver may have given up already.
            let _ = sender.send(source.lookup(final_score));
        });

        let mut lookup = Self {
            receiver: None,
            deadline: Instant::now() + timeout,
            timeout,
            resolved: None,
        };

        match spawned {
            Ok(_) => {
                debug!(final_score, timeout_ms = timeout.as_millis() as u64, "Excuse lookup started");
                lookup.receiver = Some(receiver);
            }
            Err(e) => lookup.finish(Err(ExcuseError::LookupFailed(e.to_string()))),
        }

        lookup
    }

    /// Checks for an answer without blocking.
    ///
    /// Returns the excuse once known; after the deadline this is the fallback.
    pub fn poll(&mut self) -> Option<&str> {
        let outcome = match &self.receiver {
            Some(receiver) if self.resolved.is_none() => match receiver.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Disconnected) => Some(Err(ExcuseError::Disconnected)),
                Err(TryRecvError::Empty) if Instant::now() >= self.deadline => {
                    Some(Err(ExcuseError::TimedOut(self.timeout.as_millis())))
                }
                Err(TryRecvError::Empty) => None,
            },
            _ => None,
        };
        if let Some(outcome) = outcome {
            self.finish(outcome);
        }

        self.resolved.as_deref()
    }

    /// Blocks until an answer arrives or the deadline passes.
    pub fn wait(mut self) -> String {
        if self.resolved.is_none() {
            if let Some(receiver) = self.receiver.take() {
                let remaining = self.deadline.saturating_duration_since(Instant::now());
                match receiver.recv_timeout(remaining) {
                    Ok(result) => self.finish(result),
                    Err(RecvTimeoutError::Timeout) => self.finish(Err(ExcuseError::TimedOut(self.timeout.as_millis()))),
                    Err(RecvTimeoutError::Disconnected) => self.finish(Err(ExcuseError::Disconnected)),
                }
            }
        }

        self.resolved.unwrap_or_else(|| FALLBACK_EXCUSE.to_string())
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    fn finish(&mut self, result: Result<String, ExcuseError>) {
        let excuse = match result {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Excuse source returned nothing, using fallback");
                FALLBACK_EXCUSE.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Excuse lookup failed, using fallback");
                FALLBACK_EXCUSE.to_string()
            }
        };

        self.receiver = None;
        self.resolved = Some(excuse);
    }
}
