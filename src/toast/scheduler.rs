//! Timer Scheduling
//!
//! Abstraction over "cancellable scheduled callback". A scheduled callback is
//! a [`ToastEvent`]; when its delay elapses the scheduler hands it back to the
//! manager as a [`Fired`] carrying the token it was issued under. The manager
//! ignores firings whose token it no longer holds, so a cancelled timer can
//! never act even if the runtime delivered it anyway.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::types::ToastHandle;

/// Token identifying one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub(crate) u64);

/// Callbacks a toast schedules on itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastEvent {
    /// First frame after insertion: triggers the entrance transition
    Frame(ToastHandle),
    /// Auto-dismiss countdown ran out
    Expire(ToastHandle),
    /// Exit animation finished: detach from the container
    Detach(ToastHandle),
}

impl ToastEvent {
    pub fn toast(&self) -> ToastHandle {
        match self {
            ToastEvent::Frame(h) | ToastEvent::Expire(h) | ToastEvent::Detach(h) => *h,
        }
    }
}

/// A callback whose delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub token: TimerToken,
    pub event: ToastEvent,
}

/// Source of time and cancellable timers
pub trait Scheduler {
    /// Time elapsed since the scheduler's origin
    fn now(&self) -> Duration;

    /// Schedule `event` to fire after `delay`
    fn schedule(&mut self, delay: Duration, event: ToastEvent) -> TimerToken;

    /// Cancel a scheduled event. Returns false if it already fired or was
    /// never scheduled.
    fn cancel(&mut self, token: TimerToken) -> bool;

    /// Run `event` on the next rendering frame
    fn request_frame(&mut self, event: ToastEvent) -> TimerToken {
        self.schedule(Duration::ZERO, event)
    }
}

/// Virtual-clock scheduler driven by explicit `advance` calls.
///
/// Events fire in due order; events due at the same instant fire in the
/// order they were scheduled.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_token: u64,
    queue: BTreeMap<(Duration, TimerToken), ToastEvent>,
    due: HashMap<TimerToken, Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scheduled, not yet fired events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether `token` is still scheduled
    pub fn is_scheduled(&self, token: TimerToken) -> bool {
        self.due.contains_key(&token)
    }

    /// Scheduled events for `toast`, in due order
    pub fn scheduled_for(&self, toast: ToastHandle) -> Vec<(Duration, ToastEvent)> {
        self.queue
            .iter()
            .filter(|(_, event)| event.toast() == toast)
            .map(|((at, _), event)| (*at, *event))
            .collect()
    }

    /// Pop the earliest event due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        let (&(at, token), _) = self.queue.iter().next()?;
        if at > until {
            return None;
        }
        let event = self.queue.remove(&(at, token))?;
        self.due.remove(&token);
        self.now = self.now.max(at);
        Some(Fired { token, event })
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration, event: ToastEvent) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let at = self.now + delay;
        self.queue.insert((at, token), event);
        self.due.insert(token, at);
        token
    }

    fn cancel(&mut self, token: TimerToken) -> bool {
        match self.due.remove(&token) {
            Some(at) => self.queue.remove(&(at, token)).is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut sched = ManualScheduler::new();
        let a = ToastHandle(1);
        let b = ToastHandle(2);

        sched.schedule(ms(300), ToastEvent::Detach(a));
        sched.schedule(ms(100), ToastEvent::Expire(b));
        sched.request_frame(ToastEvent::Frame(a));

        let order: Vec<ToastEvent> = std::iter::from_fn(|| sched.pop_due(ms(1000)))
            .map(|f| f.event)
            .collect();

        assert_eq!(
            order,
            vec![
                ToastEvent::Frame(a),
                ToastEvent::Expire(b),
                ToastEvent::Detach(a)
            ]
        );
        assert_eq!(sched.now(), ms(300));
    }

    #[test]
    fn test_pop_due_respects_limit() {
        let mut sched = ManualScheduler::new();
        sched.schedule(ms(500), ToastEvent::Expire(ToastHandle(1)));

        assert!(sched.pop_due(ms(499)).is_none());
        assert_eq!(sched.pending(), 1);
        assert!(sched.pop_due(ms(500)).is_some());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_cancel() {
        let mut sched = ManualScheduler::new();
        let token = sched.schedule(ms(100), ToastEvent::Expire(ToastHandle(1)));

        assert!(sched.is_scheduled(token));
        assert!(sched.cancel(token));
        assert!(!sched.is_scheduled(token));
        assert!(!sched.cancel(token));
        assert!(sched.pop_due(ms(1000)).is_none());
    }

    #[test]
    fn test_same_instant_keeps_schedule_order() {
        let mut sched = ManualScheduler::new();
        let first = sched.schedule(ms(10), ToastEvent::Expire(ToastHandle(1)));
        let second = sched.schedule(ms(10), ToastEvent::Expire(ToastHandle(2)));

        assert_eq!(sched.pop_due(ms(10)).unwrap().token, first);
        assert_eq!(sched.pop_due(ms(10)).unwrap().token, second);
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut sched = ManualScheduler::new();
        sched.set_now(ms(1000));
        let toast = ToastHandle(3);
        sched.schedule(ms(250), ToastEvent::Expire(toast));

        assert_eq!(
            sched.scheduled_for(toast),
            vec![(ms(1250), ToastEvent::Expire(toast))]
        );
    }
}
