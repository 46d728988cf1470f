//! Finboard CLI
//!
//! Command-line front end for the finance dashboard:
//! - Render the dashboard
//! - List transactions and spending analysis
//! - Add transactions
//! - Log in

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use finboard::api::{FinanceClient, Period};
use finboard::config::{generate_default_config, Config, LoggingConfig};
use finboard::dashboard::{format_currency, list_date, Dashboard, TransactionForm};
use finboard::toast::{ToastChange, ToastService, ToastState};

#[derive(Parser)]
#[command(name = "finboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal finance dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/finboard/config.toml, then ./finboard.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load everything and render the dashboard as HTML
    Dashboard {
        /// Analysis period (week, month, year)
        #[arg(short, long)]
        period: Option<Period>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List all transactions
    Transactions,

    /// Show spending trends and category totals
    Analysis {
        /// Analysis period (week, month, year)
        #[arg(short, long)]
        period: Option<Period>,
    },

    /// Add a transaction
    Add {
        /// Amount (negative for expenses)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        #[arg(short, long)]
        description: String,
        #[arg(short, long)]
        category: String,
    },

    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    fn period(&self) -> Option<Period> {
        match self {
            Commands::Dashboard { period, .. } | Commands::Analysis { period } => *period,
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    init_logging(&config.logging);

    let (toaster, service) = ToastService::spawn(config.toasts.settings());
    let printer = spawn_toast_printer(toaster.subscribe());

    let client = FinanceClient::new(config.api.client_config())?;
    tracing::debug!(base_url = %client.config().base_url, "Using backend");

    let period = cli
        .command
        .period()
        .unwrap_or(config.dashboard.default_period);
    let mut dashboard = Dashboard::new(client, toaster.clone()).with_period(period);

    let ok = run(cli.command, &mut dashboard).await?;

    if let Some(target) = dashboard.take_redirect() {
        eprintln!("-> {}", dashboard.api().url(&target));
    }

    // Close the service so the printer sees every toast, then drain it
    drop(dashboard);
    let _ = toaster.shutdown();
    drop(toaster);
    let _ = service.await;
    let _ = printer.await;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Commands, dashboard: &mut Dashboard<FinanceClient>) -> anyhow::Result<bool> {
    match command {
        Commands::Dashboard { output, .. } => {
            dashboard.init().await;
            let html = dashboard.render().await.render_html();
            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    println!("Dashboard written to {:?}", path);
                }
                None => println!("{}", html),
            }
            Ok(true)
        }

        Commands::Transactions => {
            if !dashboard.load_all_transactions().await {
                return Ok(false);
            }
            let transactions = dashboard
                .state()
                .all_transactions
                .as_deref()
                .unwrap_or_default();

            if transactions.is_empty() {
                println!("No transactions yet.");
                println!();
                println!("Add your first transaction with:");
                println!("  finboard add --amount -12.50 --description Lunch --category Food");
                return Ok(true);
            }

            println!(
                "{:<12} {:<30} {:<16} {:>12}",
                "Date", "Description", "Category", "Amount"
            );
            println!("{}", "-".repeat(73));
            for t in transactions {
                println!(
                    "{:<12} {:<30} {:<16} {:>12}",
                    t.date.as_deref().map(list_date).unwrap_or_else(|| "-".to_string()),
                    truncate(&t.description, 30),
                    truncate(&t.category, 16),
                    format_currency(t.amount)
                );
            }
            Ok(true)
        }

        Commands::Analysis { .. } => {
            let period = dashboard.state().period;
            if !dashboard.select_period(period).await {
                return Ok(false);
            }
            let state = dashboard.state();

            println!("Spending ({})", period.label());
            println!();
            let trend = &state.trend_chart;
            if trend.labels().is_empty() {
                println!("  No data yet");
            }
            for (label, amount) in trend.labels().iter().zip(trend.data()) {
                println!("  {:<8} {:>12}", label, format_currency(*amount));
            }

            println!();
            println!("By category");
            println!();
            let categories = &state.category_chart;
            if categories.labels().is_empty() {
                println!("  No data yet");
            }
            for (name, amount) in categories.labels().iter().zip(categories.data()) {
                println!("  {:<20} {:>12}", name, format_currency(*amount));
            }
            Ok(true)
        }

        Commands::Add {
            amount,
            description,
            category,
        } => {
            let form = TransactionForm::new(amount, description, category);
            Ok(dashboard.submit_transaction(form).await)
        }

        Commands::Login { email, password } => Ok(dashboard.login(&email, &password).await),

        Commands::Config { .. } => Ok(true),
    }
}

/// Print each new toast to stderr until the service stops
fn spawn_toast_printer(mut changes: broadcast::Receiver<ToastChange>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) if change.state == ToastState::Pending => {
                    eprintln!("{} {}", change.kind.glyph(), change.message);
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Toast printer fell behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("finboard={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so rendered output on stdout stays clean
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
