//! Dashboard State
//!
//! Plain state owned by the dashboard controller and read by the views.

use std::fmt;
use std::str::FromStr;

use super::charts::{DoughnutChart, LineChart};
use crate::api::{NewTransaction, Period, QuickStats, Transaction, User};

/// Top-level pages reachable from the nav bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Transactions,
    Analytics,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Dashboard, Page::Transactions, Page::Analytics];

    /// Value of the nav item's `data-page` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Transactions => "transactions",
            Page::Analytics => "analytics",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Transactions => "Transactions",
            Page::Analytics => "Analytics",
        }
    }

    /// Id of the page's section element
    pub fn section_id(&self) -> String {
        format!("{}-page", self.as_str())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Page::Dashboard),
            "transactions" => Ok(Page::Transactions),
            "analytics" => Ok(Page::Analytics),
            other => Err(format!("Unknown page: {}", other)),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw values of the add-transaction form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub amount: String,
    pub description: String,
    pub category: String,
}

impl TransactionForm {
    pub fn new(
        amount: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            description: description.into(),
            category: category.into(),
        }
    }

    /// Request body with the amount coerced
    pub fn to_request(&self) -> NewTransaction {
        NewTransaction::from_form(&self.amount, &self.description, &self.category)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Add-transaction modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionModal {
    pub open: bool,
    pub form: TransactionForm,
}

/// Everything the dashboard views render from
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub page: Page,
    pub period: Period,
    pub user: Option<User>,
    /// `None` until the first successful load
    pub stats: Option<QuickStats>,
    pub recent: Option<Vec<Transaction>>,
    pub all_transactions: Option<Vec<Transaction>>,
    pub trend_chart: LineChart,
    pub category_chart: DoughnutChart,
    pub modal: TransactionModal,
    /// Set when the host should navigate away
    pub redirect: Option<String>,
}
