//! Countdown Indicator
//!
//! Models the `.toast-progress` bar: a linear width transition from its
//! current width down to 0%. The rendered width is the source of truth for
//! how much time a paused toast has left, so pausing samples the running
//! transition and writes the sampled width back as a static style.

use std::time::Duration;

/// Running linear transition towards 0%
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    started_at: Duration,
    span: Duration,
}

/// Visual countdown indicator of a toast
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownBar {
    /// Width in percent when the current transition started, or the frozen
    /// width when no transition is running.
    width: f64,
    transition: Option<Transition>,
}

impl CountdownBar {
    /// A full bar with no transition
    pub fn full() -> Self {
        Self {
            width: 100.0,
            transition: None,
        }
    }

    /// Start decaying from the current rendered width to 0% over `span`
    pub fn start(&mut self, now: Duration, span: Duration) {
        self.width = self.width_at(now);
        self.transition = Some(Transition {
            started_at: now,
            span,
        });
    }

    /// Stop the transition, keeping the width rendered at `now`
    pub fn freeze(&mut self, now: Duration) {
        self.width = self.width_at(now);
        self.transition = None;
    }

    pub fn is_running(&self) -> bool {
        self.transition.is_some()
    }

    /// Rendered width in percent at `now`
    pub fn width_at(&self, now: Duration) -> f64 {
        match self.transition {
            None => self.width,
            Some(t) => {
                if t.span.is_zero() {
                    return 0.0;
                }
                let elapsed = now.saturating_sub(t.started_at).as_secs_f64();
                let progress = (elapsed / t.span.as_secs_f64()).min(1.0);
                (self.width * (1.0 - progress)).max(0.0)
            }
        }
    }

    /// Fraction of the bar still rendered at `now`, in `0.0..=1.0`
    pub fn fraction_remaining(&self, now: Duration) -> f64 {
        (self.width_at(now) / 100.0).clamp(0.0, 1.0)
    }

    /// Inline style for the bar element.
    ///
    /// A running bar is described by its start width and the CSS transition
    /// that carries it to 0%. A frozen bar disables the transition.
    pub fn style(&self, now: Duration) -> String {
        match self.transition {
            Some(t) if self.width_at(now) > 0.0 => format!(
                "width: {}; transition: width {}ms linear",
                percent(self.width_at(now)),
                remaining_ms(t, now)
            ),
            Some(_) => "width: 0%".to_string(),
            None => format!("width: {}; transition: none", percent(self.width)),
        }
    }
}

impl Default for CountdownBar {
    fn default() -> Self {
        Self::full()
    }
}

fn remaining_ms(t: Transition, now: Duration) -> u128 {
    (t.started_at + t.span).saturating_sub(now).as_millis()
}

fn percent(width: f64) -> String {
    let rounded = (width * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}%", rounded as i64)
    } else {
        format!("{:.2}%", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_full_bar_is_static() {
        let bar = CountdownBar::full();
        assert!(!bar.is_running());
        assert_eq!(bar.width_at(ms(5000)), 100.0);
        assert_eq!(bar.style(ms(0)), "width: 100%; transition: none");
    }

    #[test]
    fn test_linear_decay() {
        let mut bar = CountdownBar::full();
        bar.start(ms(0), ms(1000));

        assert_eq!(bar.width_at(ms(0)), 100.0);
        assert!((bar.width_at(ms(250)) - 75.0).abs() < 1e-9);
        assert!((bar.width_at(ms(500)) - 50.0).abs() < 1e-9);
        assert_eq!(bar.width_at(ms(1000)), 0.0);
        assert_eq!(bar.width_at(ms(4000)), 0.0);
    }

    #[test]
    fn test_freeze_keeps_rendered_width() {
        let mut bar = CountdownBar::full();
        bar.start(ms(0), ms(3000));
        bar.freeze(ms(1000));

        assert!(!bar.is_running());
        let frozen = bar.width_at(ms(1000));
        assert!((frozen - 66.666_666).abs() < 1e-3);
        // Time passing does not move a frozen bar
        assert_eq!(bar.width_at(ms(9000)), frozen);
        assert_eq!(bar.style(ms(9000)), "width: 66.67%; transition: none");
    }

    #[test]
    fn test_restart_from_frozen_width() {
        let mut bar = CountdownBar::full();
        bar.start(ms(0), ms(3000));
        bar.freeze(ms(1500));
        bar.start(ms(2000), ms(1500));

        assert!((bar.width_at(ms(2000)) - 50.0).abs() < 1e-9);
        assert!((bar.width_at(ms(2750)) - 25.0).abs() < 1e-9);
        assert_eq!(bar.width_at(ms(3500)), 0.0);
    }

    #[test]
    fn test_zero_span_is_empty() {
        let mut bar = CountdownBar::full();
        bar.start(ms(10), Duration::ZERO);
        assert_eq!(bar.width_at(ms(10)), 0.0);
        assert_eq!(bar.style(ms(10)), "width: 0%");
    }

    #[test]
    fn test_running_style() {
        let mut bar = CountdownBar::full();
        bar.start(ms(0), ms(3000));
        assert_eq!(bar.style(ms(0)), "width: 100%; transition: width 3000ms linear");
        assert_eq!(bar.style(ms(1500)), "width: 50%; transition: width 1500ms linear");
    }
}
