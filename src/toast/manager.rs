//! Toast Lifecycle Manager
//!
//! Owns the container of displayed toasts and drives each one through
//! `pending -> shown <-> paused -> dismissing -> removed` using a
//! [`Scheduler`] for its timers.
//!
//! Every operation runs to completion on the caller's thread. A toast holds
//! at most one auto-dismiss timer: `pause` cancels it before `resume` can
//! schedule a replacement, and `fire` drops any expiry whose token is not
//! the one the toast currently holds.

use std::time::Duration;

use super::scheduler::{Fired, ManualScheduler, Scheduler, ToastEvent};
use super::types::{
    Toast, ToastChange, ToastHandle, ToastKind, ToastState, DEFAULT_DURATION, EXIT_ANIMATION,
};
use super::view;
use crate::view::Node;

/// Timing settings for a manager
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToastSettings {
    /// Lifetime used by `notify` when no duration is given
    pub default_duration: Duration,
    /// Exit animation delay before a dismissed toast is detached
    pub exit_animation: Duration,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            default_duration: DEFAULT_DURATION,
            exit_animation: EXIT_ANIMATION,
        }
    }
}

type Listener = Box<dyn FnMut(&ToastChange) + Send>;

/// Manages active toasts, their countdowns, and their timers
pub struct ToastManager<S> {
    scheduler: S,
    settings: ToastSettings,
    /// Container contents in insertion order
    toasts: Vec<Toast>,
    next_id: u64,
    listener: Option<Listener>,
}

impl<S: Scheduler> ToastManager<S> {
    /// Create a manager with default timings
    pub fn new(scheduler: S) -> Self {
        Self::with_settings(scheduler, ToastSettings::default())
    }

    pub fn with_settings(scheduler: S, settings: ToastSettings) -> Self {
        Self {
            scheduler,
            settings,
            toasts: Vec::new(),
            next_id: 1,
            listener: None,
        }
    }

    /// Register a callback invoked on every lifecycle transition
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&ToastChange) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn settings(&self) -> &ToastSettings {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Show a toast for the default duration
    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) -> ToastHandle {
        let duration = self.settings.default_duration;
        self.notify_for(message, kind, duration)
    }

    /// Show a toast that auto-dismisses after `duration`
    pub fn notify_for(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
    ) -> ToastHandle {
        let handle = ToastHandle(self.next_id);
        self.next_id += 1;

        let now = self.scheduler.now();
        let mut toast = Toast::new(handle, message.into(), kind, duration, now);
        toast.timer = Some(self.scheduler.schedule(duration, ToastEvent::Expire(handle)));
        self.scheduler.request_frame(ToastEvent::Frame(handle));

        tracing::debug!(
            toast = %handle,
            kind = %kind,
            duration_ms = duration.as_millis() as u64,
            "Toast created"
        );

        self.toasts.push(toast);
        self.emit(handle);
        handle
    }

    /// Start the exit animation and detach after the exit delay.
    ///
    /// Returns false if the toast is already dismissing or removed.
    pub fn dismiss(&mut self, handle: ToastHandle) -> bool {
        let now = self.scheduler.now();
        let exit = self.settings.exit_animation;
        let Some(idx) = self.index_of(handle) else {
            return false;
        };
        if !self.toasts[idx].state.is_live() {
            return false;
        }

        if let Some(token) = self.toasts[idx].timer.take() {
            self.scheduler.cancel(token);
        }
        let toast = &mut self.toasts[idx];
        toast.countdown.freeze(now);
        toast.state = ToastState::Dismissing;
        self.scheduler.schedule(exit, ToastEvent::Detach(handle));

        tracing::debug!(toast = %handle, "Toast dismissing");
        self.emit(handle);
        true
    }

    /// Freeze the countdown while the pointer is over the toast.
    ///
    /// Returns false if the toast is not pending or shown.
    pub fn pause(&mut self, handle: ToastHandle) -> bool {
        let now = self.scheduler.now();
        let Some(idx) = self.index_of(handle) else {
            return false;
        };
        if !matches!(
            self.toasts[idx].state,
            ToastState::Pending | ToastState::Shown
        ) {
            return false;
        }

        if let Some(token) = self.toasts[idx].timer.take() {
            self.scheduler.cancel(token);
        }
        let toast = &mut self.toasts[idx];
        toast.countdown.freeze(now);
        toast.state = ToastState::Paused;

        tracing::trace!(
            toast = %handle,
            width = toast.countdown.width_at(now),
            "Toast paused"
        );
        self.emit(handle);
        true
    }

    /// Restart the countdown from the frozen indicator position.
    ///
    /// The remaining time is read back from the rendered width of the bar,
    /// rounded to whole milliseconds. Returns false unless paused.
    pub fn resume(&mut self, handle: ToastHandle) -> bool {
        let now = self.scheduler.now();
        let Some(idx) = self.index_of(handle) else {
            return false;
        };
        if self.toasts[idx].state != ToastState::Paused {
            return false;
        }

        let toast = &mut self.toasts[idx];
        let fraction = toast.countdown.fraction_remaining(now);
        let remaining =
            Duration::from_millis((fraction * toast.duration.as_millis() as f64).round() as u64);
        toast.remaining = remaining;
        toast.countdown.start(now, remaining);
        toast.state = ToastState::Shown;
        debug_assert!(toast.timer.is_none());
        toast.timer = Some(self.scheduler.schedule(remaining, ToastEvent::Expire(handle)));

        tracing::trace!(
            toast = %handle,
            remaining_ms = remaining.as_millis() as u64,
            "Toast resumed"
        );
        self.emit(handle);
        true
    }

    /// Apply a fired timer.
    ///
    /// Firings for removed toasts, and expiries whose token the toast no
    /// longer holds, are ignored.
    pub fn fire(&mut self, fired: Fired) {
        let now = self.scheduler.now();
        let handle = fired.event.toast();
        let Some(idx) = self.index_of(handle) else {
            return;
        };

        match fired.event {
            ToastEvent::Frame(_) => {
                let toast = &mut self.toasts[idx];
                if toast.entered || !toast.state.is_live() {
                    return;
                }
                toast.entered = true;
                if toast.state == ToastState::Pending {
                    toast.countdown.start(now, toast.remaining);
                    toast.state = ToastState::Shown;
                    tracing::trace!(toast = %handle, "Toast shown");
                    self.emit(handle);
                }
            }
            ToastEvent::Expire(_) => {
                if self.toasts[idx].timer != Some(fired.token) {
                    tracing::trace!(toast = %handle, "Ignoring stale expiry");
                    return;
                }
                self.toasts[idx].timer = None;
                self.dismiss(handle);
            }
            ToastEvent::Detach(_) => {
                if self.toasts[idx].state != ToastState::Dismissing {
                    return;
                }
                let mut toast = self.toasts.remove(idx);
                toast.state = ToastState::Removed;
                tracing::debug!(toast = %handle, "Toast removed");
                if let Some(listener) = self.listener.as_mut() {
                    listener(&ToastChange::of(&toast));
                }
            }
        }
    }

    /// Current state. Handles issued by this manager that are no longer in
    /// the container report `Removed`.
    pub fn state(&self, handle: ToastHandle) -> ToastState {
        self.get(handle)
            .map(Toast::state)
            .unwrap_or(ToastState::Removed)
    }

    pub fn get(&self, handle: ToastHandle) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.handle == handle)
    }

    /// Toasts in the container, oldest first
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Render the toast container at the scheduler's current time
    pub fn render(&self) -> Node {
        view::container(&self.toasts, self.scheduler.now())
    }

    fn index_of(&self, handle: ToastHandle) -> Option<usize> {
        self.toasts.iter().position(|t| t.handle == handle)
    }

    fn emit(&mut self, handle: ToastHandle) {
        let Some(listener) = self.listener.as_mut() else {
            return;
        };
        if let Some(toast) = self.toasts.iter().find(|t| t.handle == handle) {
            listener(&ToastChange::of(toast));
        }
    }
}

impl ToastManager<ManualScheduler> {
    /// Advance the virtual clock by `by`, firing every timer that falls due,
    /// including timers scheduled by earlier firings within the window.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.fire(fired);
        }
        self.scheduler.set_now(until);
    }

    /// Advance the virtual clock to an absolute time
    pub fn advance_to(&mut self, at: Duration) {
        let now = self.scheduler.now();
        self.advance(at.saturating_sub(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn manager() -> ToastManager<ManualScheduler> {
        ToastManager::new(ManualScheduler::new())
    }

    #[test]
    fn test_notify_appends_pending_then_shown() {
        let mut toasts = manager();
        let first = toasts.notify("Saved", ToastKind::Success);
        let second = toasts.notify("Saved", ToastKind::Success);

        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts.toasts()[0].handle(), first);
        assert_eq!(toasts.toasts()[1].handle(), second);
        assert_eq!(toasts.state(first), ToastState::Pending);

        toasts.advance(Duration::ZERO);
        assert_eq!(toasts.state(first), ToastState::Shown);
        assert!(toasts.get(first).unwrap().is_visible());
        assert!(toasts.get(first).unwrap().countdown().is_running());
    }

    #[test]
    fn test_auto_dismiss_window() {
        for d in [0u64, 1, 1000, 3000] {
            let mut toasts = manager();
            let h = toasts.notify_for("msg", ToastKind::Info, ms(d));

            if d > 0 {
                toasts.advance_to(ms(d - 1));
                assert!(toasts.state(h).is_live(), "d={d}: dismissed early");
            }
            toasts.advance_to(ms(d));
            assert_eq!(toasts.state(h), ToastState::Dismissing, "d={d}");
            toasts.advance_to(ms(d + 299));
            assert_eq!(toasts.state(h), ToastState::Dismissing, "d={d}");
            toasts.advance_to(ms(d + 300));
            assert_eq!(toasts.state(h), ToastState::Removed, "d={d}");
            assert!(toasts.is_empty());
        }
    }

    #[test]
    fn test_saved_scenario() {
        let mut toasts = manager();
        let h = toasts.notify_for("Saved", ToastKind::Success, ms(1000));
        toasts.advance(Duration::ZERO);

        let html = toasts.render().render_html();
        assert!(html.contains(ToastKind::Success.icon_path()));
        assert!(html.contains("Saved"));

        toasts.advance(ms(1300));
        assert_eq!(toasts.state(h), ToastState::Removed);
        assert!(!toasts.render().render_html().contains("Saved"));
    }

    #[test]
    fn test_paused_toast_never_dismisses() {
        let mut toasts = manager();
        let h = toasts.notify("Error", ToastKind::Error);
        toasts.advance(ms(500));

        assert!(toasts.pause(h));
        assert!(!toasts.get(h).unwrap().has_timer());
        assert_eq!(toasts.scheduler().pending(), 0);

        toasts.advance(ms(60_000));
        assert_eq!(toasts.state(h), ToastState::Paused);
    }

    #[test]
    fn test_resume_uses_remaining_fraction() {
        let mut toasts = manager();
        let h = toasts.notify_for("Working", ToastKind::Info, ms(3000));
        toasts.advance(ms(2000));
        assert!(toasts.pause(h));

        toasts.advance(ms(10_000));
        assert!(toasts.resume(h));
        assert_eq!(toasts.get(h).unwrap().remaining(), ms(1000));

        toasts.advance(ms(999));
        assert_eq!(toasts.state(h), ToastState::Shown);
        toasts.advance(ms(1));
        assert_eq!(toasts.state(h), ToastState::Dismissing);
    }

    #[test]
    fn test_hover_scenario() {
        let mut toasts = manager();
        let h = toasts.notify("Error", ToastKind::Error);

        toasts.advance_to(ms(1000));
        assert!(toasts.pause(h));
        toasts.advance_to(ms(1500));
        assert!(toasts.resume(h));
        assert_eq!(toasts.get(h).unwrap().remaining(), ms(2000));

        // Not at the original deadline
        toasts.advance_to(ms(3000));
        assert_eq!(toasts.state(h), ToastState::Shown);
        toasts.advance_to(ms(3499));
        assert_eq!(toasts.state(h), ToastState::Shown);
        toasts.advance_to(ms(3500));
        assert_eq!(toasts.state(h), ToastState::Dismissing);
        toasts.advance_to(ms(3800));
        assert_eq!(toasts.state(h), ToastState::Removed);
    }

    #[test]
    fn test_pause_and_resume_are_guarded() {
        let mut toasts = manager();
        let h = toasts.notify("x", ToastKind::Info);
        toasts.advance(Duration::ZERO);

        assert!(!toasts.resume(h), "resume while shown");
        assert!(toasts.pause(h));
        assert!(!toasts.pause(h), "pause twice");
        assert_eq!(toasts.scheduler().pending(), 0);
        assert!(toasts.resume(h));
        assert!(!toasts.resume(h), "resume twice");
        assert_eq!(toasts.scheduler().scheduled_for(h).len(), 1);
    }

    #[test]
    fn test_repeated_hover_keeps_one_timer() {
        let mut toasts = manager();
        let h = toasts.notify("x", ToastKind::Info);

        for _ in 0..5 {
            toasts.advance(ms(100));
            toasts.pause(h);
            toasts.advance(ms(50));
            toasts.resume(h);
            let expiries = toasts
                .scheduler()
                .scheduled_for(h)
                .into_iter()
                .filter(|(_, e)| matches!(e, ToastEvent::Expire(_)))
                .count();
            assert_eq!(expiries, 1);
        }
    }

    #[test]
    fn test_dismiss_from_every_live_state() {
        // pending
        let mut toasts = manager();
        let h = toasts.notify("x", ToastKind::Info);
        assert!(toasts.dismiss(h));
        toasts.advance(ms(300));
        assert_eq!(toasts.state(h), ToastState::Removed);

        // shown
        let mut toasts = manager();
        let h = toasts.notify("x", ToastKind::Info);
        toasts.advance(ms(100));
        assert!(toasts.dismiss(h));
        toasts.advance(ms(299));
        assert_eq!(toasts.state(h), ToastState::Dismissing);
        toasts.advance(ms(1));
        assert_eq!(toasts.state(h), ToastState::Removed);

        // paused
        let mut toasts = manager();
        let h = toasts.notify("x", ToastKind::Info);
        toasts.advance(ms(100));
        toasts.pause(h);
        assert!(toasts.dismiss(h));
        toasts.advance(ms(300));
        assert_eq!(toasts.state(h), ToastState::Removed);
    }

    #[test]
    fn test_manual_dismiss_cancels_expiry() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);

        let mut toasts = manager();
        toasts.set_listener(move |c| sink.lock().unwrap().push(c.state));
        let h = toasts.notify_for("x", ToastKind::Info, ms(1000));
        toasts.advance(ms(900));
        toasts.dismiss(h);
        assert_eq!(toasts.scheduler().scheduled_for(h).len(), 1, "only detach");

        toasts.advance(ms(5000));
        let dismissals = changes
            .lock()
            .unwrap()
            .iter()
            .filter(|s| **s == ToastState::Dismissing)
            .count();
        assert_eq!(dismissals, 1);
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut toasts = manager();
        let h = toasts.notify("x", ToastKind::Info);

        assert!(toasts.dismiss(h));
        assert!(!toasts.dismiss(h), "already dismissing");
        toasts.advance(ms(300));
        assert!(!toasts.dismiss(h), "already removed");
        assert!(!toasts.pause(h));
        assert!(!toasts.resume(h));
        assert_eq!(toasts.scheduler().pending(), 0);
    }

    #[test]
    fn test_stale_expiry_is_ignored() {
        let mut toasts = manager();
        let h = toasts.notify_for("x", ToastKind::Info, ms(1000));
        let stale = toasts.get(h).unwrap().timer.unwrap();

        toasts.advance(ms(100));
        toasts.pause(h);
        toasts.resume(h);

        // A runtime that failed to abort delivers the old timer anyway
        toasts.fire(Fired {
            token: stale,
            event: ToastEvent::Expire(h),
        });
        assert_eq!(toasts.state(h), ToastState::Shown);
    }

    #[test]
    fn test_pause_before_entrance_frame() {
        let mut toasts = manager();
        let h = toasts.notify_for("x", ToastKind::Info, ms(1000));

        assert!(toasts.pause(h));
        toasts.advance(Duration::ZERO);
        let toast = toasts.get(h).unwrap();
        assert_eq!(toast.state(), ToastState::Paused);
        assert!(toast.is_visible());
        assert!(!toast.countdown().is_running());

        toasts.advance(ms(400));
        assert!(toasts.resume(h));
        assert_eq!(toasts.get(h).unwrap().remaining(), ms(1000));
    }

    #[test]
    fn test_independent_toasts() {
        let mut toasts = manager();
        let a = toasts.notify_for("a", ToastKind::Info, ms(1000));
        let b = toasts.notify_for("b", ToastKind::Info, ms(2000));

        toasts.advance(ms(500));
        toasts.pause(b);
        toasts.advance(ms(1000));

        assert_eq!(toasts.state(a), ToastState::Removed);
        assert_eq!(toasts.state(b), ToastState::Paused);
        assert_eq!(toasts.len(), 1);
    }

    #[test]
    fn test_listener_sees_full_lifecycle() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);

        let mut toasts = manager();
        toasts.set_listener(move |c| sink.lock().unwrap().push(c.state));
        let h = toasts.notify_for("x", ToastKind::Warning, ms(1000));
        toasts.advance(ms(200));
        toasts.pause(h);
        toasts.resume(h);
        toasts.advance(ms(2000));

        assert_eq!(
            *changes.lock().unwrap(),
            vec![
                ToastState::Pending,
                ToastState::Shown,
                ToastState::Paused,
                ToastState::Shown,
                ToastState::Dismissing,
                ToastState::Removed,
            ]
        );
    }

    #[test]
    fn test_custom_settings() {
        let settings = ToastSettings {
            default_duration: ms(500),
            exit_animation: ms(50),
        };
        let mut toasts = ToastManager::with_settings(ManualScheduler::new(), settings);
        let h = toasts.notify("x", ToastKind::Info);

        toasts.advance(ms(549));
        assert_eq!(toasts.state(h), ToastState::Dismissing);
        toasts.advance(ms(1));
        assert_eq!(toasts.state(h), ToastState::Removed);
    }
}
