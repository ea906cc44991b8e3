//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration test files.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dead_air::adapters::speakers::ScriptedSpeaker;
use dead_air::domain::models::{CaseFile, DialogueConfig, Evidence, HighlightConfig};
use dead_air::domain::ports::{Sleeper, SpeakerAgent};
use dead_air::services::{DialogueGenerator, RetryController, RetryPolicy};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A realistic case file with evidence.
pub fn sample_case() -> CaseFile {
    CaseFile::new(
        "case-1994-lr",
        "The Lantern Road Disappearance",
        "Asheville, NC",
        "On June 11, 1994, a 24-year-old hiker left the Lantern Road trailhead at 7am. \
         Her car was found two miles away that evening, unlocked, keys in the ignition.",
    )
    .with_date("1994-06-11")
    .with_evidence(Evidence::new(
        "ev-1",
        "physical",
        "Car found unlocked with keys in the ignition",
    ))
    .with_evidence(Evidence::new(
        "ev-2",
        "testimonial",
        "Ranger reports a second vehicle at the trailhead",
    ))
}

/// Sleeper that records requested delays and returns immediately.
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// Controller with the given policy that never actually sleeps.
pub fn instant_retry(policy: RetryPolicy) -> (RetryController, Arc<RecordingSleeper>) {
    let sleeper = Arc::new(RecordingSleeper::default());
    (RetryController::with_sleeper(policy, sleeper.clone()), sleeper)
}

/// Generator over two arbitrary speakers with default dialogue settings.
pub fn generator_with(
    host_a: Arc<dyn SpeakerAgent>,
    host_b: Arc<dyn SpeakerAgent>,
    retry: RetryController,
) -> DialogueGenerator {
    DialogueGenerator::new(
        host_a,
        host_b,
        retry,
        DialogueConfig::default(),
        HighlightConfig::default(),
    )
}

/// Generator over two fresh scripted hosts.
pub fn scripted_generator() -> DialogueGenerator {
    let (retry, _) = instant_retry(RetryPolicy::default());
    generator_with(
        Arc::new(ScriptedSpeaker::new("Maya")),
        Arc::new(ScriptedSpeaker::new("Dr. Thorne")),
        retry,
    )
}
