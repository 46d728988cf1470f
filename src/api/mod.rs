//! Finance Backend API
//!
//! Typed client for the dashboard's backend.
//!
//! # Endpoints
//!
//! ## Data
//! - `GET /api/user` - Signed-in user
//! - `GET /api/quick-stats` - Stat card numbers
//! - `GET /api/transactions` - Transaction list
//! - `POST /api/transactions` - Record a transaction
//! - `GET /api/analysis?period=week|month|year` - Spending trends and category totals
//!
//! ## Auth
//! - `GET /api/check-auth` - Session probe (2xx means authenticated)
//! - `POST /auth/login` - Email/password login
//!
//! # Example
//!
//! ```rust,no_run
//! use finboard::api::{ClientConfig, FinanceApi, FinanceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FinanceClient::new(ClientConfig::default())?;
//!     let stats = client.quick_stats().await?;
//!     println!("{} transactions", stats.transaction_count);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dto;
pub mod error;

pub use client::{
    ClientConfig, FinanceApi, FinanceClient, DASHBOARD_PATH, GITHUB_LOGIN_PATH,
    GOOGLE_LOGIN_PATH, LOGIN_PATH, LOGOUT_PATH,
};
pub use dto::{
    AuthStatus, Credentials, NewTransaction, Period, QuickStats, SpendingAnalysis,
    SpendingTrends, Transaction, User,
};
pub use error::{ClientError, ClientResult};
