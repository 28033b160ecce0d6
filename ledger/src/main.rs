//! Ledger entry-point: wires configuration, logging, and the webhook sync client.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]
#![expect(clippy::print_stdout, reason = "command results are written to stdout")]

use std::ffi::OsString;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ledger::config::LedgerSettings;
use ledger::domain::{
    BudgetKey, Category, LedgerSyncService, MonthlyBudget, PeriodKey, SummaryResult, Transaction,
    TransactionDraft, TransactionKind, percentage_breakdown, today,
};
use ledger::outbound::webhook::HttpLedgerWebhook;

/// `ledger` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "ledger",
    about = "Record income and expenses to a spreadsheet webhook",
    version
)]
struct Cli {
    /// Webhook endpoint. Falls back to `LEDGER_WEBHOOK_URL` when omitted.
    #[arg(long = "webhook-url", value_name = "url", global = true)]
    webhook_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a transaction and append it to its month sheet.
    Add(AddArgs),
    /// Show totals for one month sheet.
    Summary {
        /// Month as `MM/YYYY`; defaults to the current month.
        #[arg(long, value_name = "MM/YYYY")]
        period: Option<PeriodKey>,
    },
    /// Check that the webhook answers.
    TestConnection,
    /// List the categories offered for a transaction type.
    Categories {
        /// Transaction type.
        #[arg(long = "type", value_enum)]
        kind: KindArg,
    },
    /// Project the saving rate of a monthly budget.
    Budget(BudgetArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Income => Self::Income,
            KindArg::Expense => Self::Expense,
        }
    }
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Transaction type.
    #[arg(long = "type", value_enum)]
    kind: KindArg,
    /// Category slug (`food`) or spreadsheet label (`Ăn uống`).
    #[arg(long)]
    category: String,
    /// Optional subcategory.
    #[arg(long)]
    subcategory: Option<String>,
    /// Amount in whole currency units.
    #[arg(long, allow_negative_numbers = true)]
    amount: i64,
    /// Calendar day as `YYYY-MM-DD`; defaults to today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,
    /// Optional note.
    #[arg(long, default_value = "")]
    note: String,
}

impl AddArgs {
    fn into_transaction(self, today: NaiveDate) -> Result<Transaction> {
        let category = Category::parse(self.kind.into(), &self.category)?;
        let draft = TransactionDraft {
            date: self.date.unwrap_or(today),
            category,
            subcategory: self.subcategory,
            amount: self.amount,
            note: self.note,
        };
        Ok(Transaction::try_new(draft, today)?)
    }
}

#[derive(Debug, Args)]
struct BudgetArgs {
    /// Expected salary.
    #[arg(long, default_value_t = 0)]
    salary: u64,
    /// Food and drink.
    #[arg(long, default_value_t = 0)]
    food: u64,
    /// Getting around.
    #[arg(long, default_value_t = 0)]
    transport: u64,
    /// Rent and housing.
    #[arg(long, default_value_t = 0)]
    accommodation: u64,
    /// Electricity, water, internet.
    #[arg(long, default_value_t = 0)]
    utilities: u64,
    /// Everything else.
    #[arg(long, default_value_t = 0)]
    miscellaneous: u64,
}

impl BudgetArgs {
    fn into_budget(self) -> MonthlyBudget {
        let mut budget = MonthlyBudget::default();
        for (key, amount) in [
            (BudgetKey::Salary, self.salary),
            (BudgetKey::Food, self.food),
            (BudgetKey::Transport, self.transport),
            (BudgetKey::Accommodation, self.accommodation),
            (BudgetKey::Utilities, self.utilities),
            (BudgetKey::Miscellaneous, self.miscellaneous),
        ] {
            budget.set(key, amount);
        }
        budget
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build ledger runtime")?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let override_url = cli.webhook_url.as_deref();

    match cli.command {
        Command::Add(args) => {
            let transaction = args.into_transaction(today(clock.as_ref()))?;
            let service = connect(override_url, clock)?;
            let outcome = service.record_transaction(&transaction).await?;
            println!(
                "Recorded {} {} in {} ({})",
                transaction.kind(),
                format_amount(transaction.amount().value()),
                transaction.category(),
                transaction.period()
            );
            if let Some(message) = outcome.message {
                println!("{message}");
            }
        }
        Command::Summary { period } => {
            let period = period.unwrap_or_else(|| PeriodKey::from_date(today(clock.as_ref())));
            let service = connect(override_url, clock)?;
            let summary = service.get_summary(period).await?;
            print_summary(period, &summary);
        }
        Command::TestConnection => {
            let service = connect(override_url, clock)?;
            let outcome = service.test_connection().await?;
            println!(
                "{}",
                outcome
                    .message
                    .unwrap_or_else(|| "Webhook connection OK".to_owned())
            );
        }
        Command::Categories { kind } => {
            for category in Category::all(kind.into()) {
                match category {
                    Category::Expense(expense) => println!(
                        "{category}: {}",
                        expense.suggested_subcategories().join(", ")
                    ),
                    Category::Income(_) => println!("{category}"),
                }
            }
        }
        Command::Budget(args) => {
            let budget = args.into_budget();
            println!(
                "Planned spending: {}",
                format_amount(budget.total_spending())
            );
            match budget.projected_saving_rate() {
                Some(rate) => println!("Projected saving rate: {rate:.1}%"),
                None => println!("Projected saving rate: set a salary to compute it"),
            }
        }
    }
    Ok(())
}

fn connect(override_url: Option<&str>, clock: Arc<dyn Clock>) -> Result<LedgerSyncService> {
    let settings = LedgerSettings::load_from_iter([OsString::from("ledger")])
        .map_err(|error| eyre!("failed to load ledger settings: {error}"))?;
    let endpoint = settings.webhook_url(override_url)?;
    info!(endpoint = %endpoint, "connecting to webhook");
    let webhook = HttpLedgerWebhook::new(endpoint, settings.request_timeout())
        .wrap_err("failed to build webhook client")?;
    Ok(LedgerSyncService::new(
        Arc::new(webhook),
        clock,
        settings.sync_config(),
    ))
}

fn print_summary(period: PeriodKey, summary: &SummaryResult) {
    println!("Summary for {period}");
    println!("  Income:  {}", format_amount(summary.total_income));
    println!("  Expense: {}", format_amount(summary.total_expense));
    println!("  Balance: {}", format_signed(summary.balance()));
    let Some(shares) = percentage_breakdown(&summary.expense_by_category, summary.total_expense)
    else {
        return;
    };
    for (category, amount) in &summary.expense_by_category {
        let share = shares.get(category).copied().unwrap_or_default();
        println!("  {category}: {} ({share:.1}%)", format_amount(*amount));
    }
}

fn format_amount(amount: u64) -> String {
    let reversed: Vec<char> = amount.to_string().chars().rev().collect();
    let groups: Vec<String> = reversed
        .chunks(3)
        .rev()
        .map(|group| group.iter().rev().collect())
        .collect();
    format!("{} VNĐ", groups.join(","))
}

fn format_signed(amount: i64) -> String {
    let magnitude = format_amount(amount.unsigned_abs());
    if amount < 0 {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}
