//! # Finboard
//!
//! Personal finance dashboard - the client-side presentation layer that
//! authenticates a user, loads transactions and spending analysis from a
//! backend, builds chart and list views, and shows toast notifications.
//!
//! ## Features
//!
//! - **Toasts**: auto-dismiss with a visual countdown, hover-to-pause, and
//!   manual dismissal, on a virtual or tokio clock
//! - **Typed backend client**: reqwest with cookies and lenient amount coercion
//! - **Dashboard controller**: owned state, concurrent loads, error toasts
//! - **Render tree**: escaped HTML output for every view
//!
//! ## Modules
//!
//! - [`toast`]: Toast lifecycle, scheduler, and async service
//! - [`api`]: Backend DTOs and client
//! - [`dashboard`]: Controller, charts, formatting, and views
//! - [`view`]: Render tree nodes
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use finboard::api::{ClientConfig, FinanceClient};
//! use finboard::dashboard::Dashboard;
//! use finboard::toast::{ToastService, ToastSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (toaster, _service) = ToastService::spawn(ToastSettings::default());
//!     let client = FinanceClient::new(ClientConfig::default())?;
//!
//!     let mut dashboard = Dashboard::new(client, toaster);
//!     dashboard.init().await;
//!
//!     println!("{}", dashboard.render().await.render_html());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod toast;
pub mod view;

// Re-export top-level types for convenience
pub use toast::{
    ManualScheduler, Scheduler, ToastChange, ToastHandle, ToastKind, ToastManager, ToastService,
    ToastSettings, ToastState, Toaster,
};

pub use api::{ClientConfig, ClientError, ClientResult, FinanceApi, FinanceClient, Period};

pub use dashboard::{Dashboard, DashboardState, Page, TransactionForm};

pub use config::{Config, ConfigError, LoggingConfig};
