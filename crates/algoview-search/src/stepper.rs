//! Cursor over a recorded trace.
//!
//! Stepping only moves an index; the trace itself is never consumed. The
//! cursor is clamped to `0..=len-1` and never wraps.

use serde::{Deserialize, Serialize};

use crate::snapshot::{Snapshot, Trace};

/// Steps through the snapshots of a [`Trace`].
#[derive(Debug, Clone)]
pub struct Stepper {
    trace: Trace,
    position: usize,
}

impl Stepper {
    /// Create a cursor at the first snapshot.
    pub fn new(trace: Trace) -> Self {
        Self { trace, position: 0 }
    }

    /// The underlying trace.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Current index.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// True if the trace holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    fn last_index(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&Snapshot> {
        self.trace.get(self.position)
    }

    /// Jump to `index`, clamped to the last snapshot.
    pub fn seek(&mut self, index: usize) -> Option<&Snapshot> {
        self.position = index.min(self.last_index());
        self.current()
    }

    /// Move by `delta`, clamped at both ends.
    pub fn step(&mut self, delta: isize) -> Option<&Snapshot> {
        let target = self.position.saturating_add_signed(delta);
        self.seek(target)
    }

    /// Move forward one snapshot.
    pub fn step_forward(&mut self) -> Option<&Snapshot> {
        self.step(1)
    }

    /// Move back one snapshot.
    pub fn step_backward(&mut self) -> Option<&Snapshot> {
        self.step(-1)
    }

    /// Return to the first snapshot.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// At the first snapshot.
    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    /// At the last snapshot.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.last_index()
    }

    /// Progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        let last = self.last_index();
        if last == 0 {
            0.0
        } else {
            self.position as f64 / last as f64
        }
    }
}

/// Cursor status for a host display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepperStatus {
    pub position: usize,
    pub total: usize,
    pub progress: f64,
    pub at_start: bool,
    pub at_end: bool,
}

impl From<&Stepper> for StepperStatus {
    fn from(stepper: &Stepper) -> Self {
        Self {
            position: stepper.position,
            total: stepper.len(),
            progress: stepper.progress(),
            at_start: stepper.is_at_start(),
            at_end: stepper.is_at_end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_trace(count: usize) -> Trace {
        let snapshots = (0..count)
            .map(|i| Snapshot {
                visited: (0..i).map(|n| n.to_string()).collect(),
                frontier: Vec::new(),
                tree_edges: Vec::new(),
                active: None,
                highlighted_edge: None,
                distances: None,
            })
            .collect();
        Trace::new("0", snapshots)
    }

    #[test]
    fn starts_at_zero() {
        let stepper = Stepper::new(make_trace(5));
        assert_eq!(stepper.position(), 0);
        assert!(stepper.is_at_start());
        assert!(!stepper.is_at_end());
    }

    #[test]
    fn seek_clamps_to_last() {
        let mut stepper = Stepper::new(make_trace(10));
        stepper.seek(5);
        assert_eq!(stepper.position(), 5);
        stepper.seek(100);
        assert_eq!(stepper.position(), 9);
        assert!(stepper.current().is_some());
    }

    #[test]
    fn step_does_not_wrap() {
        let mut stepper = Stepper::new(make_trace(3));
        stepper.step_backward();
        assert_eq!(stepper.position(), 0);

        stepper.step_forward();
        stepper.step_forward();
        stepper.step_forward();
        assert_eq!(stepper.position(), 2);
        assert!(stepper.is_at_end());

        stepper.step(-10);
        assert_eq!(stepper.position(), 0);
    }

    #[test]
    fn reading_does_not_consume() {
        let mut stepper = Stepper::new(make_trace(4));
        stepper.seek(3);
        let forward = stepper.current().cloned();
        stepper.rewind();
        stepper.seek(3);
        assert_eq!(stepper.current().cloned(), forward);
        assert_eq!(stepper.trace().len(), 4);
    }

    #[test]
    fn progress_calculation() {
        let mut stepper = Stepper::new(make_trace(5));
        assert_eq!(stepper.progress(), 0.0);
        stepper.seek(2);
        assert_eq!(stepper.progress(), 0.5);
        stepper.seek(4);
        assert_eq!(stepper.progress(), 1.0);
    }

    #[test]
    fn status_conversion() {
        let mut stepper = Stepper::new(make_trace(10));
        stepper.seek(3);
        let status: StepperStatus = (&stepper).into();
        assert_eq!(status.position, 3);
        assert_eq!(status.total, 10);
        assert!(!status.at_start);
        assert!(!status.at_end);
    }
}
