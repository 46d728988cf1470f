//! Dashboard Views
//!
//! Render-tree builders for each part of the dashboard page. Ids and class
//! names match the dashboard stylesheet and the host script's selectors.

use super::format::{format_currency, list_date};
use super::state::{DashboardState, Page, TransactionModal};
use crate::api::{Period, QuickStats, Transaction, User};
use crate::view::{Element, Node};

/// Recent transactions list on the dashboard page
pub const RECENT_LIST_ID: &str = "recentTransactions";
/// Full list on the transactions page
pub const ALL_LIST_ID: &str = "allTransactions";
pub const TREND_CHART_ID: &str = "spendingTrendsChart";
pub const CATEGORY_CHART_ID: &str = "categoryChart";
pub const MODAL_ID: &str = "addTransactionModal";

const EMPTY_ICON_PATH: &str = "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z";
const LOGOUT_ICON_PATH: &str =
    "M17 16l4-4m0 0l-4-4m4 4H7m6 4v1a3 3 0 01-3 3H6a3 3 0 01-3-3V7a3 3 0 013-3h4a3 3 0 013 3v1";

/// Stat cards in display order: (id, label, is currency)
const STAT_CARDS: [(&str, &str, bool); 4] = [
    ("totalSpending", "Total Spending", true),
    ("monthlyAverage", "Monthly Average", true),
    ("largestExpense", "Largest Expense", true),
    ("transactionCount", "Total Transactions", false),
];

/// Expense categories offered by the form
pub const CATEGORIES: [&str; 8] = [
    "Food",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills",
    "Healthcare",
    "Income",
    "Other",
];

/// Whole dashboard: nav, the three pages, the modal and the toast container
pub fn dashboard(state: &DashboardState, toasts: Node) -> Node {
    Element::new("div")
        .class("app")
        .child(nav(state.page, state.user.as_ref()))
        .child(
            Element::new("main")
                .class("content")
                .child(dashboard_page(state))
                .child(transactions_page(state))
                .child(analytics_page(state)),
        )
        .child(modal(&state.modal))
        .child(toasts)
        .into()
}

/// Navigation bar with page links, user info and logout
pub fn nav(active: Page, user: Option<&User>) -> Element {
    let links = Page::ALL.iter().map(|page| {
        Element::new("li")
            .class_if("active", *page == active)
            .attr("data-page", page.as_str())
            .attr("data-action", "switch-page")
            .text(page.label())
    });

    Element::new("nav")
        .class("navbar")
        .child(Element::new("ul").class("nav-links").children(links))
        .child(user_info(user))
        .child(
            Element::new("button")
                .class("logout-btn")
                .attr("type", "button")
                .attr("data-action", "logout")
                .child(icon("icon", LOGOUT_ICON_PATH))
                .text("Logout"),
        )
}

pub fn user_info(user: Option<&User>) -> Element {
    let (name, email) = user
        .map(|u| (u.name.as_str(), u.email.as_str()))
        .unwrap_or(("", ""));

    Element::new("div")
        .class("user-info")
        .child(Element::new("span").class("user-name").text(name))
        .child(Element::new("span").class("user-email").text(email))
}

/// The four quick-stat cards. A zero (or not yet loaded) value shows the
/// empty state instead of a number.
pub fn stat_cards(stats: Option<&QuickStats>) -> Element {
    let values = stats.map(|s| {
        [
            s.total_spending,
            s.monthly_average,
            s.largest_expense,
            s.transaction_count as f64,
        ]
    });

    let cards = STAT_CARDS.iter().enumerate().map(|(i, (id, label, currency))| {
        let value = values.map(|v| v[i]).unwrap_or(0.0);
        let shown: Node = if value == 0.0 {
            Element::new("span").class("empty-state").text("No data yet").into()
        } else if *currency {
            Node::Text(format_currency(value))
        } else {
            Node::Text(format!("{}", value))
        };

        Element::new("div")
            .class("stat-card")
            .attr("id", *id)
            .child(Element::new("span").class("label").text(*label))
            .child(Element::new("div").class("value").child(shown))
    });

    Element::new("div").class("stats-grid").children(cards)
}

/// Week / Month / Year selector
pub fn period_buttons(active: Period) -> Element {
    let buttons = Period::ALL.iter().map(|period| {
        Element::new("button")
            .class("period-btn")
            .class_if("active", *period == active)
            .attr("type", "button")
            .attr("data-period", period.as_str())
            .text(period.label())
    });

    Element::new("div").class("period-selector").children(buttons)
}

/// A transaction list. `None` renders an empty container (not yet loaded),
/// an empty slice renders the empty state.
pub fn transaction_list(
    id: &str,
    transactions: Option<&[Transaction]>,
    with_dates: bool,
) -> Element {
    let list = Element::new("div").class("transactions-list").attr("id", id);

    match transactions {
        None => list,
        Some([]) => list.child(empty_transactions()),
        Some(items) => list.children(items.iter().map(|t| transaction_row(t, with_dates))),
    }
}

pub fn transaction_row(transaction: &Transaction, with_date: bool) -> Element {
    let mut info = Element::new("div")
        .class("transaction-info")
        .child(
            Element::new("span")
                .class("description")
                .text(transaction.description.as_str()),
        )
        .child(
            Element::new("span")
                .class("category")
                .text(transaction.category.as_str()),
        );
    if with_date {
        let date = list_date(transaction.date.as_deref().unwrap_or_default());
        info = info.child(Element::new("span").class("date").text(date));
    }

    Element::new("div")
        .class("transaction-item")
        .class(if transaction.is_expense() { "expense" } else { "income" })
        .child(info)
        .child(
            Element::new("span")
                .class("amount")
                .text(format_currency(transaction.amount.abs())),
        )
}

fn empty_transactions() -> Element {
    Element::new("div")
        .class("empty-state")
        .child(icon("empty-icon", EMPTY_ICON_PATH))
        .child(Element::new("p").text("No transactions yet"))
        .child(
            Element::new("button")
                .class("add-transaction-btn")
                .attr("type", "button")
                .attr("data-action", "open-modal")
                .text("Add Your First Transaction"),
        )
}

/// Canvas carrying its Chart.js config
pub fn chart_canvas(id: &str, config: &serde_json::Value) -> Element {
    Element::new("div")
        .class("chart-container")
        .child(
            Element::new("canvas")
                .attr("id", id)
                .attr("data-chart", config.to_string()),
        )
}

/// Add-transaction modal. Hidden unless open.
pub fn modal(modal: &TransactionModal) -> Element {
    let form = &modal.form;
    let options = CATEGORIES.iter().map(|c| {
        let option = Element::new("option").attr("value", *c).text(*c);
        if form.category == *c {
            option.attr("selected", "selected")
        } else {
            option
        }
    });

    Element::new("div")
        .class("modal")
        .attr("id", MODAL_ID)
        .attr("style", if modal.open { "display: flex" } else { "display: none" })
        .child(
            Element::new("form")
                .class("modal-content")
                .attr("id", "transactionForm")
                .child(Element::new("h2").text("Add Transaction"))
                .child(
                    Element::new("input")
                        .attr("id", "amount")
                        .attr("type", "number")
                        .attr("step", "0.01")
                        .attr("value", form.amount.as_str()),
                )
                .child(
                    Element::new("input")
                        .attr("id", "description")
                        .attr("type", "text")
                        .attr("value", form.description.as_str()),
                )
                .child(
                    Element::new("select")
                        .attr("id", "category")
                        .children(options),
                )
                .child(
                    Element::new("button")
                        .attr("type", "button")
                        .attr("data-action", "close-modal")
                        .text("Cancel"),
                )
                .child(Element::new("button").attr("type", "submit").text("Add")),
        )
}

fn dashboard_page(state: &DashboardState) -> Element {
    page_section(Page::Dashboard, state.page)
        .child(stat_cards(state.stats.as_ref()))
        .child(period_buttons(state.period))
        .child(chart_canvas(TREND_CHART_ID, &state.trend_chart.to_config()))
        .child(
            Element::new("section")
                .class("recent-transactions")
                .child(Element::new("h2").text("Recent Transactions"))
                .child(transaction_list(RECENT_LIST_ID, state.recent.as_deref(), false)),
        )
}

fn transactions_page(state: &DashboardState) -> Element {
    page_section(Page::Transactions, state.page)
        .child(Element::new("h2").text("All Transactions"))
        .child(transaction_list(
            ALL_LIST_ID,
            state.all_transactions.as_deref(),
            true,
        ))
}

fn analytics_page(state: &DashboardState) -> Element {
    page_section(Page::Analytics, state.page)
        .child(period_buttons(state.period))
        .child(chart_canvas(
            CATEGORY_CHART_ID,
            &state.category_chart.to_config(),
        ))
}

fn page_section(page: Page, active: Page) -> Element {
    Element::new("section")
        .class("page")
        .class_if("active", page == active)
        .attr("id", page.section_id())
}

fn icon(class: &str, path: &str) -> Element {
    Element::new("svg")
        .class(class)
        .attr("viewBox", "0 0 24 24")
        .attr("fill", "none")
        .attr("stroke", "currentColor")
        .child(Element::new("path").attr("d", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(amount: f64, description: &str) -> Transaction {
        Transaction {
            id: None,
            amount,
            description: description.to_string(),
            category: "Food".to_string(),
            date: Some("2024-01-05T12:00:00".to_string()),
        }
    }

    #[test]
    fn test_stat_card_empty_state() {
        let stats = QuickStats {
            total_spending: 1234.5,
            monthly_average: 0.0,
            largest_expense: 99.0,
            transaction_count: 7,
        };
        let cards = stat_cards(Some(&stats));

        let total = cards.find_by_id("totalSpending").unwrap();
        assert_eq!(total.find_by_class("value").unwrap().text_content(), "$1,234.50");

        let average = cards.find_by_id("monthlyAverage").unwrap();
        assert!(average.find_by_class("empty-state").is_some());
        assert_eq!(average.find_by_class("value").unwrap().text_content(), "No data yet");

        let count = cards.find_by_id("transactionCount").unwrap();
        assert_eq!(count.find_by_class("value").unwrap().text_content(), "7");
    }

    #[test]
    fn test_unloaded_stats_show_empty_state() {
        let cards = stat_cards(None);
        assert_eq!(cards.find_all_by_class("empty-state").len(), 4);
    }

    #[test]
    fn test_empty_transaction_list() {
        let list = transaction_list(RECENT_LIST_ID, Some(&[][..]), false);
        let text = list.text_content();
        assert!(text.contains("No transactions yet"));
        assert!(text.contains("Add Your First Transaction"));
        assert!(list.find_by_class("add-transaction-btn").is_some());
    }

    #[test]
    fn test_transaction_rows() {
        let items = vec![tx(-12.5, "Lunch"), tx(2000.0, "Salary")];
        let list = transaction_list(ALL_LIST_ID, Some(items.as_slice()), true);
        let rows = list.find_all_by_class("transaction-item");

        assert_eq!(rows.len(), 2);
        assert!(rows[0].has_class("expense"));
        assert_eq!(rows[0].find_by_class("amount").unwrap().text_content(), "$12.50");
        assert_eq!(rows[0].find_by_class("date").unwrap().text_content(), "1/5/2024");
        assert!(rows[1].has_class("income"));
        assert_eq!(rows[1].find_by_class("amount").unwrap().text_content(), "$2,000.00");
    }

    #[test]
    fn test_recent_rows_have_no_date() {
        let items = vec![tx(-3.0, "Coffee")];
        let list = transaction_list(RECENT_LIST_ID, Some(items.as_slice()), false);
        assert!(list.find_by_class("date").is_none());
    }

    #[test]
    fn test_description_is_escaped() {
        let items = vec![tx(-1.0, "<script>alert(1)</script>")];
        let list = transaction_list(RECENT_LIST_ID, Some(items.as_slice()), false);
        let html = Node::from(list).render_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_nav_marks_active_page() {
        let nav = nav(Page::Analytics, None);
        let items: Vec<_> = nav
            .find_all_by_class("active")
            .into_iter()
            .filter_map(|el| el.get_attr("data-page"))
            .collect();
        assert_eq!(items, vec!["analytics"]);
        assert!(nav.find_by_class("logout-btn").is_some());
    }

    #[test]
    fn test_period_buttons() {
        let buttons = period_buttons(Period::Week);
        let active = buttons.find_all_by_class("active");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].text_content(), "Week");
    }

    #[test]
    fn test_modal_visibility() {
        let mut state = TransactionModal::default();
        assert_eq!(modal(&state).get_attr("style"), Some("display: none"));

        state.open = true;
        state.form.category = "Bills".to_string();
        let el = modal(&state);
        assert_eq!(el.get_attr("style"), Some("display: flex"));
        let selected: Vec<_> = el
            .find_by_id("category")
            .unwrap()
            .children
            .iter()
            .filter_map(Node::as_element)
            .filter(|o| o.get_attr("selected").is_some())
            .map(|o| o.text_content())
            .collect();
        assert_eq!(selected, vec!["Bills"]);
    }
}
