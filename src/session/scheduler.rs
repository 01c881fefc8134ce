//! Virtual-clock timer queue.
//!
//! The session never sleeps or spawns. Timers are entries in this queue,
//! ordered by due time and then by the order they were scheduled, and the
//! host advances the clock with `tick`. Every entry carries the generation
//! it was scheduled in; `cancel_all` starts a new generation and drops
//! every entry of the old one.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use crate::core::CardId;
use crate::opponent::ChainPlan;

use super::notices::NoticeId;

/// Shortest delay a task can be scheduled with.
///
/// A zero cadence would otherwise re-arm the automated loop at the same
/// instant forever within one tick.
pub const MIN_DELAY: Duration = Duration::from_millis(1);

/// Unique identifier for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// Work the session performs when a timer fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    /// One automated opponent cycle.
    AutomatedCycle,
    /// The follow-up move of the cycle that produced this plan.
    AutomatedChain(ChainPlan),
    /// Clear the provenance tag left by one placement of `card`.
    ///
    /// `sequence` is the placement's position in the game history, so a
    /// reset left over from an earlier placement of the same card does
    /// nothing.
    ResetProvenance { card: CardId, sequence: u32 },
    /// Move a notice from active to fading.
    DismissNotice(NoticeId),
    /// Drop a faded notice.
    RemoveNotice(NoticeId),
}

impl Task {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Task::AutomatedCycle => "automated_cycle",
            Task::AutomatedChain(_) => "automated_chain",
            Task::ResetProvenance { .. } => "reset_provenance",
            Task::DismissNotice(_) => "dismiss_notice",
            Task::RemoveNotice(_) => "remove_notice",
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    generation: u64,
    task: Task,
}

/// Timer queue driven by an explicit clock.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    generation: u64,
    next_id: u64,
    /// Keyed by (due, id) so equal due times fire in scheduling order.
    queue: BTreeMap<(Duration, TaskId), Entry>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedule `task` to fire `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let due = self.now.saturating_add(delay.max(MIN_DELAY));
        debug!(task = task.name(), %id, due_ms = due.as_millis() as u64, "scheduled task");
        self.queue.insert(
            (due, id),
            Entry {
                generation: self.generation,
                task,
            },
        );
        id
    }

    /// Invalidate every pending task and start a new generation.
    pub fn cancel_all(&mut self) {
        let before = self.queue.len();
        self.generation += 1;
        let generation = self.generation;
        self.queue.retain(|_, entry| entry.generation == generation);
        debug!(generation, dropped = before - self.queue.len(), "cancelled pending tasks");
    }

    /// Pop the next task due at or before `until`, moving the clock to its
    /// due time. Tasks of older generations are discarded along the way.
    pub fn pop_due(&mut self, until: Duration) -> Option<Task> {
        loop {
            let (&(due, id), _) = self.queue.first_key_value()?;
            if due > until {
                return None;
            }
            let entry = self.queue.remove(&(due, id))?;
            self.now = self.now.max(due);
            if entry.generation == self.generation {
                debug!(task = entry.task.name(), %id, "firing task");
                return Some(entry.task);
            }
        }
    }

    /// Move the clock forward to `to` without firing anything.
    pub fn advance_to(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    /// Tasks of the current generation still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue
            .values()
            .filter(|e| e.generation == self.generation)
            .count()
    }

    /// Pending tasks of the current generation, in firing order.
    pub fn iter_pending(&self) -> impl Iterator<Item = (Duration, &Task)> + '_ {
        self.queue
            .iter()
            .filter(|(_, e)| e.generation == self.generation)
            .map(|(&(due, _), e)| (due, &e.task))
    }

    /// Due time of the next pending task of the current generation.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.iter_pending().next().map(|(due, _)| due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn reset(card: u32) -> Task {
        Task::ResetProvenance {
            card: CardId(card),
            sequence: 0,
        }
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(30), reset(3));
        scheduler.schedule(ms(10), reset(1));
        scheduler.schedule(ms(20), reset(2));

        let fired: Vec<Task> = std::iter::from_fn(|| scheduler.pop_due(ms(100))).collect();
        assert_eq!(
            fired,
            vec![
                reset(1),
                reset(2),
                reset(3),
            ]
        );
        assert_eq!(scheduler.now(), ms(30));
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(5), Task::AutomatedCycle);
        scheduler.schedule(ms(5), reset(9));

        assert_eq!(scheduler.pop_due(ms(5)), Some(Task::AutomatedCycle));
        assert_eq!(scheduler.pop_due(ms(5)), Some(reset(9)));
        assert_eq!(scheduler.pop_due(ms(5)), None);
    }

    #[test]
    fn test_not_yet_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(50), Task::AutomatedCycle);

        assert_eq!(scheduler.pop_due(ms(49)), None);
        scheduler.advance_to(ms(49));
        assert_eq!(scheduler.now(), ms(49));
        assert_eq!(scheduler.next_due(), Some(ms(50)));
    }

    #[test]
    fn test_cancel_all_discards_old_generation() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(10), Task::AutomatedCycle);
        scheduler.schedule(ms(20), reset(1));
        assert_eq!(scheduler.pending(), 2);

        scheduler.cancel_all();
        assert_eq!(scheduler.pending(), 0);
        scheduler.schedule(ms(15), reset(2));

        let fired: Vec<Task> = std::iter::from_fn(|| scheduler.pop_due(ms(100))).collect();
        assert_eq!(fired, vec![reset(2)]);
    }

    #[test]
    fn test_cancel_all_drops_entries_at_once() {
        let mut scheduler = Scheduler::new();
        for _ in 0..100 {
            scheduler.schedule(ms(60_000), Task::AutomatedCycle);
            scheduler.cancel_all();
        }
        scheduler.schedule(ms(10), Task::AutomatedCycle);

        assert_eq!(scheduler.queue.len(), 1);
        assert_eq!(scheduler.iter_pending().count(), 1);
    }

    #[test]
    fn test_huge_delay_saturates() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(ms(500));
        scheduler.schedule(Duration::MAX, reset(4));

        assert_eq!(scheduler.next_due(), Some(Duration::MAX));
        assert_eq!(scheduler.pop_due(ms(10_000)), None);
    }

    #[test]
    fn test_zero_delay_is_clamped() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::ZERO, Task::AutomatedCycle);

        assert_eq!(scheduler.pop_due(Duration::ZERO), None);
        assert_eq!(scheduler.pop_due(MIN_DELAY), Some(Task::AutomatedCycle));
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(ms(100));
        scheduler.advance_to(ms(40));
        assert_eq!(scheduler.now(), ms(100));
    }
}
