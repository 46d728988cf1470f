//! Dashboard Controller
//!
//! Owns the dashboard state and drives it from backend responses. Failures
//! never propagate out of the controller: each is logged and surfaced to the
//! user as an error toast.

use futures_util::future::join4;

use super::state::{DashboardState, Page, TransactionForm};
use super::views;
use crate::api::{
    AuthStatus, ClientError, ClientResult, Credentials, FinanceApi, Period, QuickStats,
    SpendingAnalysis, Transaction, User, DASHBOARD_PATH, GITHUB_LOGIN_PATH, GOOGLE_LOGIN_PATH,
    LOGIN_PATH, LOGOUT_PATH,
};
use crate::toast::{view as toast_view, Toaster};
use crate::view::Node;

pub const USER_LOAD_FAILED: &str = "Failed to load user information";
pub const STATS_LOAD_FAILED: &str = "Failed to load statistics";
pub const TRANSACTIONS_LOAD_FAILED: &str = "Failed to load transactions";
pub const ANALYSIS_LOAD_FAILED: &str = "Failed to load analysis";
pub const TRANSACTION_ADDED: &str = "Transaction added successfully";
pub const TRANSACTION_ADD_FAILED: &str = "Failed to add transaction";
pub const LOGIN_FAILED: &str = "Failed to login. Please try again.";

/// The finance dashboard
pub struct Dashboard<A> {
    api: A,
    toaster: Toaster,
    state: DashboardState,
}

impl<A: FinanceApi> Dashboard<A> {
    pub fn new(api: A, toaster: Toaster) -> Self {
        Self {
            api,
            toaster,
            state: DashboardState::default(),
        }
    }

    /// Start with a different analysis period selected
    pub fn with_period(mut self, period: Period) -> Self {
        self.state.period = period;
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    /// Pending navigation, if any. Taking it clears it.
    pub fn take_redirect(&mut self) -> Option<String> {
        self.state.redirect.take()
    }

    /// Initial page load: all dashboard data concurrently, then the auth probe
    pub async fn init(&mut self) {
        tracing::debug!(period = %self.state.period, "Initializing dashboard");

        let (user, stats, recent, analysis) = join4(
            self.api.user(),
            self.api.quick_stats(),
            self.api.transactions(),
            self.api.spending_analysis(self.state.period),
        )
        .await;

        self.apply_user(user).await;
        self.apply_stats(stats).await;
        self.apply_recent(recent).await;
        self.apply_analysis(self.state.period, analysis).await;

        self.check_auth().await;
    }

    pub async fn load_user_info(&mut self) -> bool {
        let result = self.api.user().await;
        self.apply_user(result).await
    }

    pub async fn load_quick_stats(&mut self) -> bool {
        let result = self.api.quick_stats().await;
        self.apply_stats(result).await
    }

    /// Recent transactions on the dashboard page
    pub async fn load_transactions(&mut self) -> bool {
        let result = self.api.transactions().await;
        self.apply_recent(result).await
    }

    /// Full list on the transactions page
    pub async fn load_all_transactions(&mut self) -> bool {
        match self.api.transactions().await {
            Ok(transactions) => {
                tracing::debug!(count = transactions.len(), "Loaded all transactions");
                self.state.all_transactions = Some(transactions);
                true
            }
            Err(e) => {
                self.fail(TRANSACTIONS_LOAD_FAILED, &e).await;
                false
            }
        }
    }

    pub async fn load_spending_analysis(&mut self, period: Period) -> bool {
        let result = self.api.spending_analysis(period).await;
        self.apply_analysis(period, result).await
    }

    /// Period button click
    pub async fn select_period(&mut self, period: Period) -> bool {
        self.state.period = period;
        self.load_spending_analysis(period).await
    }

    /// Submit the add-transaction form.
    ///
    /// On success the modal is closed and reset and the dependent data is
    /// reloaded. On failure the form keeps its values.
    pub async fn submit_transaction(&mut self, form: TransactionForm) -> bool {
        let request = form.to_request();
        tracing::debug!(
            amount = request.amount,
            category = %request.category,
            "Submitting transaction"
        );

        match self.api.add_transaction(&request).await {
            Ok(()) => {
                self.notify_success(TRANSACTION_ADDED).await;
                self.close_add_transaction();

                let period = self.state.period;
                self.load_quick_stats().await;
                self.load_transactions().await;
                self.load_spending_analysis(period).await;
                true
            }
            Err(e) => {
                self.state.modal.form = form;
                self.fail(TRANSACTION_ADD_FAILED, &e).await;
                false
            }
        }
    }

    /// Nav click: activate the page and load what it shows
    pub async fn switch_page(&mut self, page: Page) {
        tracing::debug!(page = %page, "Switching page");
        self.state.page = page;

        let period = self.state.period;
        match page {
            Page::Dashboard => {
                self.load_quick_stats().await;
                self.load_transactions().await;
                self.load_spending_analysis(period).await;
            }
            Page::Transactions => {
                self.load_all_transactions().await;
            }
            Page::Analytics => {
                self.load_spending_analysis(period).await;
            }
        }
    }

    /// Redirect to the login page unless the session is valid
    pub async fn check_auth(&mut self) -> AuthStatus {
        let status = match self.api.check_auth().await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "Auth check failed");
                AuthStatus::Unauthenticated
            }
        };

        if status == AuthStatus::Unauthenticated {
            self.state.redirect = Some(LOGIN_PATH.to_string());
        }
        status
    }

    /// Email/password login. The backend's `detail` is shown on rejection.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&credentials).await {
            Ok(()) => {
                tracing::info!(email = %email, "Logged in");
                self.state.redirect = Some(DASHBOARD_PATH.to_string());
                true
            }
            Err(ClientError::Api { status, message }) if !message.is_empty() => {
                tracing::warn!(status, "Login rejected");
                self.notify_error(&message).await;
                false
            }
            Err(e) => {
                self.fail(LOGIN_FAILED, &e).await;
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.state.redirect = Some(LOGOUT_PATH.to_string());
    }

    pub fn sign_in_with_google(&mut self) {
        self.state.redirect = Some(GOOGLE_LOGIN_PATH.to_string());
    }

    pub fn sign_in_with_github(&mut self) {
        self.state.redirect = Some(GITHUB_LOGIN_PATH.to_string());
    }

    pub fn open_add_transaction(&mut self) {
        self.state.modal.open = true;
    }

    pub fn close_add_transaction(&mut self) {
        self.state.modal.open = false;
        self.state.modal.form.reset();
    }

    /// Render tree of the whole dashboard, including live toasts
    pub async fn render(&self) -> Node {
        let toasts = match self.toaster.render().await {
            Ok(node) => node,
            Err(e) => {
                tracing::warn!(error = %e, "Rendering without toasts");
                toast_view::container(&[], Default::default())
            }
        };
        views::dashboard(&self.state, toasts)
    }

    async fn apply_user(&mut self, result: ClientResult<User>) -> bool {
        match result {
            Ok(user) => {
                self.state.user = Some(user);
                true
            }
            Err(e) => {
                self.fail(USER_LOAD_FAILED, &e).await;
                false
            }
        }
    }

    async fn apply_stats(&mut self, result: ClientResult<QuickStats>) -> bool {
        match result {
            Ok(stats) => {
                self.state.stats = Some(stats);
                true
            }
            Err(e) => {
                self.fail(STATS_LOAD_FAILED, &e).await;
                false
            }
        }
    }

    async fn apply_recent(&mut self, result: ClientResult<Vec<Transaction>>) -> bool {
        match result {
            Ok(transactions) => {
                self.state.recent = Some(transactions);
                true
            }
            Err(e) => {
                self.fail(TRANSACTIONS_LOAD_FAILED, &e).await;
                false
            }
        }
    }

    async fn apply_analysis(
        &mut self,
        period: Period,
        result: ClientResult<SpendingAnalysis>,
    ) -> bool {
        match result {
            Ok(analysis) => {
                tracing::debug!(
                    period = %period,
                    points = analysis.spending_trends.dates.len(),
                    categories = analysis.category_totals.len(),
                    "Loaded spending analysis"
                );
                self.state.trend_chart.update(&analysis.spending_trends);
                self.state.category_chart.update(&analysis);
                true
            }
            Err(e) => {
                self.fail(ANALYSIS_LOAD_FAILED, &e).await;
                false
            }
        }
    }

    async fn fail(&self, message: &str, error: &ClientError) {
        tracing::error!(error = %error, "{}", message);
        self.notify_error(message).await;
    }

    async fn notify_error(&self, message: &str) {
        if let Err(e) = self.toaster.error(message).await {
            tracing::warn!(error = %e, toast_message = message, "Toast dropped");
        }
    }

    async fn notify_success(&self, message: &str) {
        if let Err(e) = self.toaster.success(message).await {
            tracing::warn!(error = %e, toast_message = message, "Toast dropped");
        }
    }
}
