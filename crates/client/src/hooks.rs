//! Notification hooks for UI side effects.
//!
//! A small named-callback registry: subscribers register closures that are
//! invoked synchronously after the corresponding state mutation, outside
//! the state lock. The ordering guarantee is only "after the mutation";
//! no event bus or pub/sub machinery is warranted at this scale.

use std::sync::Mutex;

use wonderland_protocol::{ExplorationEvent, ExplorationGoal};

use crate::session::phase::SessionPhase;

/// A state change the reducer wants announced once the lock is released.
#[derive(Debug, Clone)]
pub enum Notification {
    PhaseChanged(SessionPhase),
    EventAppended(ExplorationEvent),
    GoalCompleted(ExplorationGoal),
    ConversationChanged,
}

type PhaseCallback = Box<dyn FnMut(SessionPhase) + Send>;
type EventCallback = Box<dyn FnMut(&ExplorationEvent) + Send>;
type GoalCallback = Box<dyn FnMut(&ExplorationGoal) + Send>;
type ConversationCallback = Box<dyn FnMut() + Send>;

/// Registry of notification hooks.
///
/// Callbacks persist until the registry is dropped; registration from any
/// thread is fine, invocation happens on the dispatcher task.
#[derive(Default)]
pub struct SessionHooks {
    phase: Mutex<Vec<PhaseCallback>>,
    event: Mutex<Vec<EventCallback>>,
    goal: Mutex<Vec<GoalCallback>>,
    conversation: Mutex<Vec<ConversationCallback>>,
}

impl SessionHooks {
    /// Invoked after every phase transition.
    pub fn on_phase_change(&self, callback: impl FnMut(SessionPhase) + Send + 'static) {
        lock(&self.phase).push(Box::new(callback));
    }

    /// Invoked after an event is appended to the log (e.g. auto-scroll).
    pub fn on_event(&self, callback: impl FnMut(&ExplorationEvent) + Send + 'static) {
        lock(&self.event).push(Box::new(callback));
    }

    /// Invoked when a goal completion message replaces the current goal.
    pub fn on_goal_completed(&self, callback: impl FnMut(&ExplorationGoal) + Send + 'static) {
        lock(&self.goal).push(Box::new(callback));
    }

    /// Invoked when the conversation tracker changes (start, line, end).
    pub fn on_conversation_change(&self, callback: impl FnMut() + Send + 'static) {
        lock(&self.conversation).push(Box::new(callback));
    }

    /// Dispatch one notification to its hook list.
    pub(crate) fn notify(&self, notification: &Notification) {
        match notification {
            Notification::PhaseChanged(phase) => {
                for callback in lock(&self.phase).iter_mut() {
                    callback(*phase);
                }
            }
            Notification::EventAppended(event) => {
                for callback in lock(&self.event).iter_mut() {
                    callback(event);
                }
            }
            Notification::GoalCompleted(goal) => {
                for callback in lock(&self.goal).iter_mut() {
                    callback(goal);
                }
            }
            Notification::ConversationChanged => {
                for callback in lock(&self.conversation).iter_mut() {
                    callback();
                }
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_notify_reaches_registered_hooks() {
        let hooks = SessionHooks::default();
        let count = Arc::new(AtomicU32::new(0));

        let count_clone = Arc::clone(&count);
        hooks.on_phase_change(move |_phase| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        hooks.notify(&Notification::PhaseChanged(SessionPhase::Active));
        hooks.notify(&Notification::PhaseChanged(SessionPhase::Ended));

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_notification_routed_to_matching_list() {
        let hooks = SessionHooks::default();
        let conversation_count = Arc::new(AtomicU32::new(0));

        let conversation_clone = Arc::clone(&conversation_count);
        hooks.on_conversation_change(move || {
            conversation_clone.fetch_add(1, Ordering::SeqCst);
        });

        hooks.notify(&Notification::PhaseChanged(SessionPhase::Active));
        assert_eq!(conversation_count.load(Ordering::SeqCst), 0);

        hooks.notify(&Notification::ConversationChanged);
        assert_eq!(conversation_count.load(Ordering::SeqCst), 1);
    }
}
