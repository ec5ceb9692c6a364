//! Deferred tooltip transitions.
//!
//! Each target has at most one pending transition. Scheduling replaces
//! whatever was pending, so the most recent request always wins. Targets are
//! plain ids: the queue never keeps a control alive, and the caller checks
//! liveness when a timer comes due.

use std::collections::HashMap;

use crate::control::ControlId;

/// What to do when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerAction {
    /// Make the tooltip visible.
    Show,
    /// Hide the tooltip.
    Hide,
}

/// A pending transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// Due time in host milliseconds.
    pub due_ms: u64,
    /// Transition to apply.
    pub action: TimerAction,
}

/// Pending transitions keyed by target.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: HashMap<ControlId, Timer>,
}

impl TimerQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` for `target`, replacing any pending transition.
    pub fn schedule(&mut self, target: ControlId, action: TimerAction, due_ms: u64) {
        if let Some(old) = self.pending.insert(target, Timer { due_ms, action }) {
            tracing::trace!(?target, previous = ?old.action, ?action, "timer replaced");
        }
    }

    /// Cancels the pending transition for `target`.
    pub fn cancel(&mut self, target: ControlId) -> Option<Timer> {
        self.pending.remove(&target)
    }

    /// Pending transition for `target`.
    #[must_use]
    pub fn pending(&self, target: ControlId) -> Option<Timer> {
        self.pending.get(&target).copied()
    }

    /// Number of pending transitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every transition due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<(ControlId, TimerAction)> {
        let mut due: Vec<(u64, ControlId, TimerAction)> = self
            .pending
            .iter()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .map(|(&id, t)| (t.due_ms, id, t.action))
            .collect();
        due.sort_unstable_by_key(|&(at, id, _)| (at, id));
        for (_, id, _) in &due {
            self.pending.remove(id);
        }
        due.into_iter().map(|(_, id, action)| (id, action)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_schedule_wins() {
        let mut q = TimerQueue::new();
        let tip = ControlId(4);
        q.schedule(tip, TimerAction::Show, 400);
        q.schedule(tip, TimerAction::Hide, 100);
        assert_eq!(q.len(), 1);
        assert_eq!(q.take_due(1000), vec![(tip, TimerAction::Hide)]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_due_order_and_cancel() {
        let mut q = TimerQueue::new();
        q.schedule(ControlId(1), TimerAction::Show, 300);
        q.schedule(ControlId(2), TimerAction::Show, 200);
        q.schedule(ControlId(3), TimerAction::Show, 900);
        assert!(q.cancel(ControlId(1)).is_some());
        assert_eq!(q.take_due(500), vec![(ControlId(2), TimerAction::Show)]);
        assert_eq!(q.pending(ControlId(3)).map(|t| t.due_ms), Some(900));
    }
}
