//! Toast Service
//!
//! Runs a [`ToastManager`] on a single tokio task. Commands from any number
//! of [`Toaster`] handles and timer firings from the [`TokioScheduler`] are
//! processed one at a time, so the manager keeps its single-threaded event
//! semantics while callers live on other tasks.

use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::manager::{ToastManager, ToastSettings};
use super::scheduler::{Fired, Scheduler, TimerToken, ToastEvent};
use super::types::{ToastChange, ToastHandle, ToastKind, ToastState};
use crate::view::Node;

/// Capacity of the change broadcast channel
const CHANGE_CAPACITY: usize = 256;

/// Scheduler backed by tokio timers.
///
/// Each scheduled event is a task that sleeps for the delay and then sends a
/// [`Fired`] to the service. Cancelling aborts the task.
pub struct TokioScheduler {
    origin: Instant,
    next_token: u64,
    tasks: HashMap<TimerToken, JoinHandle<()>>,
    fired_tx: mpsc::UnboundedSender<Fired>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its firings are delivered to
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Fired>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            origin: Instant::now(),
            next_token: 0,
            tasks: HashMap::new(),
            fired_tx,
        };
        (scheduler, fired_rx)
    }

    /// Forget a timer that has fired
    pub fn retire(&mut self, token: TimerToken) {
        self.tasks.remove(&token);
    }

    /// Number of timers not yet fired or cancelled
    pub fn active_timers(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule(&mut self, delay: Duration, event: ToastEvent) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;

        let tx = self.fired_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Fired { token, event });
        });
        self.tasks.insert(token, task);
        token
    }

    fn cancel(&mut self, token: TimerToken) -> bool {
        match self.tasks.remove(&token) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Errors returned by a [`Toaster`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToastError {
    #[error("Toast service has stopped")]
    ServiceStopped,
}

/// Result type for toast service calls
pub type ToastResult<T> = Result<T, ToastError>;

/// Point-in-time view of one toast
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ToastSnapshot {
    pub toast: ToastHandle,
    pub kind: ToastKind,
    pub message: String,
    pub state: ToastState,
    pub remaining_ms: u64,
}

enum Command {
    Notify {
        message: String,
        kind: ToastKind,
        duration: Option<Duration>,
        reply: oneshot::Sender<ToastHandle>,
    },
    Dismiss(ToastHandle),
    PointerEnter(ToastHandle),
    PointerLeave(ToastHandle),
    Snapshot(oneshot::Sender<Vec<ToastSnapshot>>),
    Render(oneshot::Sender<Node>),
    Shutdown,
}

/// Cloneable handle to a running toast service
#[derive(Clone)]
pub struct Toaster {
    commands: mpsc::UnboundedSender<Command>,
    changes: broadcast::Sender<ToastChange>,
}

impl Toaster {
    /// Show a toast for the service's default duration
    pub async fn notify(
        &self,
        message: impl Into<String>,
        kind: ToastKind,
    ) -> ToastResult<ToastHandle> {
        self.request(message.into(), kind, None).await
    }

    /// Show a toast that auto-dismisses after `duration`
    pub async fn notify_for(
        &self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
    ) -> ToastResult<ToastHandle> {
        self.request(message.into(), kind, Some(duration)).await
    }

    pub async fn success(&self, message: impl Into<String>) -> ToastResult<ToastHandle> {
        self.notify(message, ToastKind::Success).await
    }

    pub async fn error(&self, message: impl Into<String>) -> ToastResult<ToastHandle> {
        self.notify(message, ToastKind::Error).await
    }

    pub async fn warning(&self, message: impl Into<String>) -> ToastResult<ToastHandle> {
        self.notify(message, ToastKind::Warning).await
    }

    pub async fn info(&self, message: impl Into<String>) -> ToastResult<ToastHandle> {
        self.notify(message, ToastKind::Info).await
    }

    /// Close-button click
    pub fn dismiss(&self, toast: ToastHandle) -> ToastResult<()> {
        self.send(Command::Dismiss(toast))
    }

    /// Pointer entered the toast: pause its countdown
    pub fn pointer_enter(&self, toast: ToastHandle) -> ToastResult<()> {
        self.send(Command::PointerEnter(toast))
    }

    /// Pointer left the toast: resume its countdown
    pub fn pointer_leave(&self, toast: ToastHandle) -> ToastResult<()> {
        self.send(Command::PointerLeave(toast))
    }

    /// Current toasts, oldest first
    pub async fn snapshot(&self) -> ToastResult<Vec<ToastSnapshot>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply))?;
        rx.await.map_err(|_| ToastError::ServiceStopped)
    }

    /// Render tree of the toast container
    pub async fn render(&self) -> ToastResult<Node> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Render(reply))?;
        rx.await.map_err(|_| ToastError::ServiceStopped)
    }

    /// Rendered HTML of the toast container
    pub async fn render_html(&self) -> ToastResult<String> {
        Ok(self.render().await?.render_html())
    }

    /// Receive every lifecycle transition from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ToastChange> {
        self.changes.subscribe()
    }

    /// Stop the service immediately, dropping live toasts
    pub fn shutdown(&self) -> ToastResult<()> {
        self.send(Command::Shutdown)
    }

    async fn request(
        &self,
        message: String,
        kind: ToastKind,
        duration: Option<Duration>,
    ) -> ToastResult<ToastHandle> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Notify {
            message,
            kind,
            duration,
            reply,
        })?;
        rx.await.map_err(|_| ToastError::ServiceStopped)
    }

    fn send(&self, command: Command) -> ToastResult<()> {
        self.commands
            .send(command)
            .map_err(|_| ToastError::ServiceStopped)
    }
}

/// Spawns the task that owns the toast manager
pub struct ToastService;

impl ToastService {
    /// Start the service on the current tokio runtime.
    ///
    /// The task ends on [`Toaster::shutdown`], or once every `Toaster` is
    /// dropped and the remaining toasts have been removed.
    pub fn spawn(settings: ToastSettings) -> (Toaster, JoinHandle<()>) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (changes_tx, _) = broadcast::channel(CHANGE_CAPACITY);

        let (scheduler, fired_rx) = TokioScheduler::new();
        let mut manager = ToastManager::with_settings(scheduler, settings);
        let listener_tx = changes_tx.clone();
        manager.set_listener(move |change| {
            let _ = listener_tx.send(change.clone());
        });

        let task = tokio::spawn(run(manager, commands_rx, fired_rx));
        let toaster = Toaster {
            commands: commands_tx,
            changes: changes_tx,
        };
        (toaster, task)
    }
}

async fn run(
    mut manager: ToastManager<TokioScheduler>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    mut fired: mpsc::UnboundedReceiver<Fired>,
) {
    tracing::debug!("Toast service started");
    let mut open = true;

    loop {
        tokio::select! {
            biased;

            Some(f) = fired.recv() => {
                manager.scheduler_mut().retire(f.token);
                manager.fire(f);
            }

            cmd = commands.recv(), if open => match cmd {
                Some(Command::Shutdown) => break,
                Some(cmd) => apply(&mut manager, cmd),
                None => {
                    tracing::debug!(live = manager.len(), "All toasters dropped, draining");
                    open = false;
                    resume_paused(&mut manager);
                }
            },
        }

        if !open && manager.is_empty() {
            break;
        }
    }

    tracing::debug!("Toast service stopped");
}

/// No pointer can leave a paused toast once every handle is gone
fn resume_paused(manager: &mut ToastManager<TokioScheduler>) {
    let paused: Vec<ToastHandle> = manager
        .toasts()
        .iter()
        .filter(|t| t.state() == ToastState::Paused)
        .map(|t| t.handle())
        .collect();
    for handle in paused {
        if manager.resume(handle) {
            tracing::debug!(toast = handle.id(), "Resumed paused toast for drain");
        }
    }
}

fn apply(manager: &mut ToastManager<TokioScheduler>, command: Command) {
    match command {
        Command::Notify {
            message,
            kind,
            duration,
            reply,
        } => {
            let handle = match duration {
                Some(d) => manager.notify_for(message, kind, d),
                None => manager.notify(message, kind),
            };
            let _ = reply.send(handle);
        }
        Command::Dismiss(h) => {
            manager.dismiss(h);
        }
        Command::PointerEnter(h) => {
            manager.pause(h);
        }
        Command::PointerLeave(h) => {
            manager.resume(h);
        }
        Command::Snapshot(reply) => {
            let snapshot = manager
                .toasts()
                .iter()
                .map(|t| ToastSnapshot {
                    toast: t.handle(),
                    kind: t.kind(),
                    message: t.message().to_string(),
                    state: t.state(),
                    remaining_ms: t.remaining().as_millis() as u64,
                })
                .collect();
            let _ = reply.send(snapshot);
        }
        Command::Render(reply) => {
            let _ = reply.send(manager.render());
        }
        Command::Shutdown => {}
    }
}
