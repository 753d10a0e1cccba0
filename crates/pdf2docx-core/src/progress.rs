//! Progress reporting for conversion runs.
//!
//! The original design pushed progress into module-level mutable UI
//! state; here it is an injected sink interface instead, so the pipeline
//! and batch converter stay free of UI concerns. The two channels map
//! onto the two pieces of user-visible state: a human-readable status
//! message and an overall percentage.

use serde::{Deserialize, Serialize};

/// Snapshot of the process-wide progress state.
///
/// Overwritten continuously during a batch run and reset at the start of
/// each run; carries no meaning after the run beyond the final message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Human-readable description of the current step.
    pub message: String,
    /// Overall completion, 0..=100.
    pub percent: u8,
}

impl ProgressState {
    /// Reset to the initial state for a new run.
    #[inline]
    pub fn reset(&mut self) {
        self.message.clear();
        self.percent = 0;
    }
}

/// Receiver for progress updates emitted by the pipeline and the batch
/// converter.
///
/// Implementations must be cheap: updates are emitted from the hot page
/// loop, including fractional OCR progress.
pub trait ProgressSink {
    /// A new status message, replacing the previous one.
    fn message(&self, message: &str);

    /// A new overall completion percentage, 0..=100.
    fn percent(&self, percent: u8);
}

/// Sink that discards all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    #[inline]
    fn message(&self, _message: &str) {}

    #[inline]
    fn percent(&self, _percent: u8) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_reset() {
        let mut state = ProgressState {
            message: "Processing a.pdf (1/2)".to_string(),
            percent: 50,
        };
        state.reset();
        assert_eq!(state, ProgressState::default());
    }

    #[test]
    fn test_null_sink_accepts_updates() {
        let sink = NullProgress;
        sink.message("Reading page 1/3 of a.pdf");
        sink.percent(100);
    }
}
