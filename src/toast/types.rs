//! Toast data types
//!
//! The toast entity, its kind and lifecycle state, and the handle used to
//! address it after creation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::countdown::CountdownBar;
use super::scheduler::TimerToken;

/// Default lifetime of a toast before it auto-dismisses
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// Delay between starting the exit animation and detaching the toast
pub const EXIT_ANIMATION: Duration = Duration::from_millis(300);

/// Opaque reference to a toast issued by `notify`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastHandle(pub(crate) u64);

impl ToastHandle {
    /// Numeric id, as rendered in `data-toast-id`
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Kind of toast, determines icon and styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    #[serde(other)]
    Info,
}

impl ToastKind {
    /// Parse a kind name. Unknown names fall back to `Info`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        }
    }

    /// CSS class applied to the toast element
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }

    /// SVG path of the toast icon (24x24 viewBox)
    pub fn icon_path(&self) -> &'static str {
        match self {
            ToastKind::Success => "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z",
            ToastKind::Error => "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
            ToastKind::Warning => {
                "M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z"
            }
            ToastKind::Info => "M13 16h-1v-4h-1m1-4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
        }
    }

    /// Single glyph for text-only surfaces (terminal output)
    pub fn glyph(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
            ToastKind::Warning => "⚠",
            ToastKind::Info => "ℹ",
        }
    }
}

impl From<&str> for ToastKind {
    fn from(name: &str) -> Self {
        ToastKind::parse(name)
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastState {
    /// Inserted, waiting for the entrance frame
    Pending,
    /// Visible and counting down
    Shown,
    /// Countdown frozen while the pointer is over the toast
    Paused,
    /// Exit animation running, detach scheduled
    Dismissing,
    /// Detached from the container. Terminal.
    Removed,
}

impl ToastState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastState::Pending => "pending",
            ToastState::Shown => "shown",
            ToastState::Paused => "paused",
            ToastState::Dismissing => "dismissing",
            ToastState::Removed => "removed",
        }
    }

    /// Whether the toast can still be paused, resumed, or dismissed
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            ToastState::Pending | ToastState::Shown | ToastState::Paused
        )
    }
}

impl fmt::Display for ToastState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub(crate) handle: ToastHandle,
    pub(crate) message: String,
    pub(crate) kind: ToastKind,
    pub(crate) duration: Duration,
    pub(crate) remaining: Duration,
    pub(crate) state: ToastState,
    /// Pending auto-dismiss timer. At most one per toast.
    pub(crate) timer: Option<TimerToken>,
    /// Set once the entrance frame has run
    pub(crate) entered: bool,
    pub(crate) countdown: CountdownBar,
    pub(crate) created_at: Duration,
}

impl Toast {
    pub(crate) fn new(
        handle: ToastHandle,
        message: String,
        kind: ToastKind,
        duration: Duration,
        created_at: Duration,
    ) -> Self {
        Self {
            handle,
            message,
            kind,
            duration,
            remaining: duration,
            state: ToastState::Pending,
            timer: None,
            entered: false,
            countdown: CountdownBar::full(),
            created_at,
        }
    }

    pub fn handle(&self) -> ToastHandle {
        self.handle
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    /// Total lifetime requested at creation
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time left on the countdown as of the last schedule
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn state(&self) -> ToastState {
        self.state
    }

    /// Whether an auto-dismiss timer is currently held
    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether the `show` class is applied
    pub fn is_visible(&self) -> bool {
        self.entered && matches!(self.state, ToastState::Shown | ToastState::Paused)
    }

    pub fn countdown(&self) -> &CountdownBar {
        &self.countdown
    }

    /// Scheduler time at which the toast was created
    pub fn created_at(&self) -> Duration {
        self.created_at
    }
}

/// Lifecycle transition reported to listeners
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToastChange {
    pub toast: ToastHandle,
    pub kind: ToastKind,
    pub message: String,
    pub state: ToastState,
}

impl ToastChange {
    pub(crate) fn of(toast: &Toast) -> Self {
        Self {
            toast: toast.handle,
            kind: toast.kind,
            message: toast.message.clone(),
            state: toast.state,
        }
    }
}
