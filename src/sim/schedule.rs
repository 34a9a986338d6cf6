//! Delayed actions
//!
//! Effects that finish "a little later" (a defeated hawk disappearing, the
//! damage flash wearing off) are queued with a tick deadline and applied by
//! the tick loop, in deadline order.

use super::entity::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Remove a hawk whose defeat animation has finished
    RemoveDefeated(EntityId),
    /// End the player's damage flash
    ClearTint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    due: u64,
    action: Action,
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pending: Vec<Pending>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run `delay` ticks after `now`
    pub fn after(&mut self, now: u64, delay: u64, action: Action) {
        self.pending.push(Pending {
            due: now + delay,
            action,
        });
    }

    /// Remove and return every action due at or before `now`.
    /// Actions with equal deadlines keep their queueing order.
    pub fn take_due(&mut self, now: u64) -> Vec<Action> {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| p.due);
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_due_early() {
        let mut schedule = Schedule::new();
        schedule.after(10, 5, Action::ClearTint);
        assert!(schedule.take_due(14).is_empty());
        assert_eq!(schedule.take_due(15), vec![Action::ClearTint]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn due_actions_come_out_in_deadline_order() {
        let mut schedule = Schedule::new();
        schedule.after(0, 20, Action::RemoveDefeated(2));
        schedule.after(0, 10, Action::RemoveDefeated(1));
        schedule.after(0, 10, Action::ClearTint);
        assert_eq!(
            schedule.take_due(30),
            vec![
                Action::RemoveDefeated(1),
                Action::ClearTint,
                Action::RemoveDefeated(2)
            ]
        );
    }
}
