//! Toast Notifications
//!
//! Transient user-facing messages with auto-dismiss, hover-to-pause, and
//! manual dismissal.
//!
//! ## Architecture
//!
//! - **Types**: `Toast`, `ToastKind`, `ToastState`, `ToastHandle`
//! - **CountdownBar**: the visual countdown, authoritative for remaining time
//! - **Scheduler**: cancellable scheduled callbacks (`ManualScheduler` for a
//!   virtual clock, `TokioScheduler` for real timers)
//! - **ToastManager**: lifecycle and timer ownership for every toast
//! - **ToastService**: the manager on a tokio task behind a `Toaster` handle
//!
//! ## Lifecycle
//!
//! 1. `notify` appends a `pending` toast and schedules its expiry
//! 2. The next frame shows it and starts the countdown
//! 3. Pointer-enter pauses (timer cancelled), pointer-leave resumes with the
//!    time left on the bar
//! 4. Expiry or the close button starts the exit animation; 300ms later the
//!    toast is detached and `removed`

mod countdown;
mod manager;
mod scheduler;
mod service;
mod types;
pub mod view;

pub use countdown::CountdownBar;
pub use manager::{ToastManager, ToastSettings};
pub use scheduler::{Fired, ManualScheduler, Scheduler, TimerToken, ToastEvent};
pub use service::{ToastError, ToastResult, ToastService, ToastSnapshot, Toaster, TokioScheduler};
pub use types::{
    Toast, ToastChange, ToastHandle, ToastKind, ToastState, DEFAULT_DURATION, EXIT_ANIMATION,
};
