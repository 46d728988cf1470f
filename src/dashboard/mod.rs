//! Finance Dashboard
//!
//! The dashboard controller and everything it renders.
//!
//! ## Architecture
//!
//! - **Dashboard**: owns the page state, talks to a [`FinanceApi`], and
//!   reports failures through a [`Toaster`]
//! - **Charts**: spending trend line and category doughnut, serialised as
//!   Chart.js configs
//! - **Views**: render-tree builders for nav, stat cards, lists and the modal
//!
//! [`FinanceApi`]: crate::api::FinanceApi
//! [`Toaster`]: crate::toast::Toaster

pub mod charts;
mod controller;
pub mod format;
mod state;
pub mod views;

pub use charts::{DoughnutChart, LineChart};
pub use controller::{
    Dashboard, ANALYSIS_LOAD_FAILED, LOGIN_FAILED, STATS_LOAD_FAILED, TRANSACTIONS_LOAD_FAILED,
    TRANSACTION_ADDED, TRANSACTION_ADD_FAILED, USER_LOAD_FAILED,
};
pub use format::{chart_date_label, format_currency, list_date};
pub use state::{DashboardState, Page, TransactionForm, TransactionModal};
