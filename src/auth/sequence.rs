use std::time::Duration;

use tracing::{debug, info};

use crate::config::GestureConfig;

/// Finger counts that unlock the first phase, in order
pub const TARGET_SEQUENCE: [u8; 4] = [3, 2, 1, 5];

/// What a single observation did to the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEvent {
    /// Nothing accepted this frame (no hand, unstable, cooling down, or a repeat)
    Unchanged,
    /// Accepted and still a prefix of the target; holds the new length
    Progress(usize),
    /// Accepted value broke the prefix; sequence is empty again
    Reset,
    /// Full target entered; sequence is empty again
    Complete,
}

/// Requires a value to stay the same for a while before it is accepted
#[derive(Debug, Clone, Default)]
pub struct StabilityTimer {
    last: Option<u8>,
    since: Duration,
}

impl StabilityTimer {
    /// Feed the current value; true once it has been stable for `stability`
    pub fn observe(&mut self, value: u8, now: Duration, stability: Duration) -> bool {
        if self.last != Some(value) {
            self.last = Some(value);
            self.since = now;
            return false;
        }
        now >= self.since + stability
    }

    /// Push the start of the stability window to `at` (may lie in the future)
    pub fn restart_at(&mut self, at: Duration) {
        self.since = at;
    }
}

/// Debounced matcher for the finger-count unlock sequence
#[derive(Debug, Clone, Default)]
pub struct GestureSequenceMatcher {
    sequence: Vec<u8>,
    timer: StabilityTimer,
    config: GestureConfig,
}

impl GestureSequenceMatcher {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            sequence: Vec::with_capacity(TARGET_SEQUENCE.len()),
            timer: StabilityTimer::default(),
            config,
        }
    }

    /// Counts accepted so far
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// Feed this frame's finger count (`None` when no hand was seen)
    pub fn observe(&mut self, count: Option<u8>, now: Duration) -> SequenceEvent {
        let Some(count) = count else {
            return SequenceEvent::Unchanged;
        };
        if !self.timer.observe(count, now, self.config.stability) {
            return SequenceEvent::Unchanged;
        }

        let event = self.accept(count);
        // Every accepted observation starts a cooldown, resets included.
        self.timer.restart_at(now + self.config.cooldown);
        event
    }

    fn accept(&mut self, value: u8) -> SequenceEvent {
        if self.sequence.last() == Some(&value) {
            return SequenceEvent::Unchanged;
        }
        self.sequence.push(value);

        if self.sequence == TARGET_SEQUENCE {
            info!("gesture sequence complete");
            self.sequence.clear();
            return SequenceEvent::Complete;
        }

        let position = self.sequence.len() - 1;
        if self.sequence[position] != TARGET_SEQUENCE[position] {
            debug!(expected = TARGET_SEQUENCE[position], got = value, "wrong gesture, sequence reset");
            self.sequence.clear();
            return SequenceEvent::Reset;
        }

        debug!(progress = ?self.sequence, "gesture accepted");
        SequenceEvent::Progress(self.sequence.len())
    }

    /// Sequence text for the on-screen caption
    pub fn progress_text(&self) -> String {
        if self.sequence.is_empty() {
            return "Waiting for start...".to_string();
        }
        let parts: Vec<String> = self.sequence.iter().map(|n| n.to_string()).collect();
        format!("Sequence: {}", parts.join(" - "))
    }
}
