//! CLI for tracking income, expenses, investments and savings goals.

use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, Table};
use fintrack::models::{
    Decimal, Goal, GoalDraft, Investment, InvestmentDraft, NaiveDate, Transaction,
    TransactionDraft, TransactionKind,
};
use fintrack::storage::{BlobStore, FileStorage};
use fintrack::store::{KindFilter, RECENT_TRANSACTIONS, RecordStore};
use fintrack::summary::{self, CategoryBreakdown, GoalProgress, GoalStatus, SavingsTier, Tone};
use owo_colors::OwoColorize;
use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::ToPrimitive as _;

/// Environment variable overriding the data directory.
const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

/// Number of goals shown on the dashboard.
const DASHBOARD_GOALS: usize = 2;

/// Number of cells in a rendered progress bar.
const BAR_CELLS: usize = 20;

/// Personal finance tracker: transactions, investments and savings goals.
#[derive(Debug, Parser)]
#[command(name = "fintrack", version, about)]
struct Cli {
    /// Override the storage directory (default: XDG data dir).
    #[arg(long, global = true, value_name = "DIR", env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Balance, totals, spending by category, goals and recent activity.
    Dashboard,
    /// List transactions, newest first.
    Transactions {
        /// Which transactions to list.
        #[arg(long, value_enum, default_value_t = KindArg::All)]
        kind: KindArg,
    },
    /// List investment holdings with their returns.
    Investments,
    /// List savings goals with their progress.
    Goals,
    /// Savings rate and expense distribution.
    Report,
    /// Record a new transaction, investment or goal.
    #[command(subcommand)]
    Add(AddCommand),
}

/// Transaction listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Every transaction.
    All,
    /// Income only.
    Income,
    /// Expenses only.
    Expense,
}

impl From<KindArg> for KindFilter {
    #[inline]
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::All => Self::All,
            KindArg::Income => Self::Income,
            KindArg::Expense => Self::Expense,
        }
    }
}

/// Kind of a new transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EntryKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl From<EntryKind> for TransactionKind {
    #[inline]
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Income => Self::Income,
            EntryKind::Expense => Self::Expense,
        }
    }
}

/// Entities that can be recorded.
#[derive(Debug, Subcommand)]
enum AddCommand {
    /// Record an income or expense.
    Transaction(AddTransactionArgs),
    /// Record an investment holding.
    Investment(AddInvestmentArgs),
    /// Record a savings goal.
    Goal(AddGoalArgs),
}

/// Arguments for `add transaction`.
#[derive(Debug, Args)]
struct AddTransactionArgs {
    /// Income or expense.
    #[arg(long, value_enum)]
    kind: EntryKind,
    /// What the money was for.
    #[arg(long)]
    description: String,
    /// Category label, e.g. "Salário" or "Alimentação".
    #[arg(long)]
    category: String,
    /// Amount, e.g. 1234.56.
    #[arg(long, allow_negative_numbers = true)]
    amount: String,
    /// Date (YYYY-MM-DD, default: today).
    #[arg(long)]
    date: Option<String>,
}

/// Arguments for `add investment`.
#[derive(Debug, Args)]
struct AddInvestmentArgs {
    /// Name of the holding.
    #[arg(long)]
    name: String,
    /// Investment type label, e.g. "Renda Fixa" or "Ações".
    #[arg(long = "type")]
    kind: String,
    /// Amount invested.
    #[arg(long, allow_negative_numbers = true)]
    amount: String,
    /// Current market value.
    #[arg(long, allow_negative_numbers = true)]
    current_value: String,
}

/// Arguments for `add goal`.
#[derive(Debug, Args)]
struct AddGoalArgs {
    /// Name of the goal.
    #[arg(long)]
    name: String,
    /// Amount to reach.
    #[arg(long, allow_negative_numbers = true)]
    target: String,
    /// Amount already saved (default: 0).
    #[arg(long, allow_negative_numbers = true)]
    current: Option<String>,
    /// Deadline (YYYY-MM-DD).
    #[arg(long)]
    deadline: String,
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let storage = match create_storage(cli.data_dir) {
        Ok(storage) => storage,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to initialize storage: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut store = RecordStore::open(storage);
    let code = dispatch(&mut store, cli.command)?;

    if let Err(err) = store.close() {
        writeln!(
            io::stderr().lock(),
            "{} failed to save data: {err}",
            "error:".red().bold()
        )?;
        return Ok(ExitCode::FAILURE);
    }
    Ok(code)
}

/// Creates the storage backend, using `data_dir` if provided or the
/// default XDG data directory otherwise.
fn create_storage(data_dir: Option<PathBuf>) -> fintrack::error::Result<FileStorage> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => FileStorage::default_dir()?,
    };
    FileStorage::new(dir)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<S: BlobStore>(store: &mut RecordStore<S>, command: Command) -> io::Result<ExitCode> {
    match command {
        Command::Dashboard => cmd_dashboard(store),
        Command::Transactions { kind } => cmd_transactions(store, kind.into()),
        Command::Investments => cmd_investments(store),
        Command::Goals => cmd_goals(store),
        Command::Report => cmd_report(store),
        Command::Add(add) => cmd_add(store, add),
    }
}

/// Executes the `dashboard` subcommand.
fn cmd_dashboard<S: BlobStore>(store: &RecordStore<S>) -> io::Result<ExitCode> {
    let overview = store.overview();
    let mut out = io::stdout().lock();

    writeln!(out, "{}", "Dashboard".green().bold())?;
    writeln!(out)?;

    let mut cards = Table::new();
    _ = cards.load_preset(UTF8_FULL);
    _ = cards.set_header(vec![
        Cell::new("Balance").fg(Color::Cyan),
        Cell::new("Income").fg(Color::Cyan),
        Cell::new("Expenses").fg(Color::Cyan),
        Cell::new("Investments").fg(Color::Cyan),
        Cell::new("Savings rate").fg(Color::Cyan),
    ]);
    _ = cards.add_row(vec![
        money_cell(overview.balance).fg(tone_color(overview.balance_tone)),
        money_cell(overview.total_income).fg(Color::Green),
        money_cell(overview.total_expense).fg(Color::Red),
        money_cell(overview.total_investment_value),
        Cell::new(format_percent(overview.savings_rate, 0))
            .fg(tier_color(overview.savings_tier))
            .set_alignment(CellAlignment::Right),
    ]);
    writeln!(out, "{cards}")?;
    writeln!(out)?;

    writeln!(out, "{}", "Expenses by category".bold())?;
    writeln!(out, "{}", category_table(&overview.expense_by_category))?;
    writeln!(out)?;

    let goals: Vec<(&Goal, GoalProgress)> = store
        .goals()
        .iter()
        .zip(overview.goals.iter().copied())
        .take(DASHBOARD_GOALS)
        .collect();
    writeln!(out, "{}", "Goals".bold())?;
    writeln!(out, "{}", goals_table(&goals))?;
    writeln!(out)?;

    writeln!(out, "{}", "Recent transactions".bold())?;
    writeln!(
        out,
        "{}",
        transactions_table(store.recent_transactions(RECENT_TRANSACTIONS))
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `transactions` subcommand.
fn cmd_transactions<S: BlobStore>(
    store: &RecordStore<S>,
    filter: KindFilter,
) -> io::Result<ExitCode> {
    let txs: Vec<Transaction> = store.transactions_of(filter).cloned().collect();
    let mut out = io::stdout().lock();
    if txs.is_empty() {
        writeln!(out, "{}", "No transactions found.".dimmed())?;
        return Ok(ExitCode::SUCCESS);
    }
    writeln!(
        out,
        "{} {}",
        "Transactions".green().bold(),
        format_args!("({})", txs.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", transactions_table(&txs))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `investments` subcommand.
fn cmd_investments<S: BlobStore>(store: &RecordStore<S>) -> io::Result<ExitCode> {
    let investments = store.investments();
    let mut out = io::stdout().lock();
    if investments.is_empty() {
        writeln!(out, "{}", "No investments found.".dimmed())?;
        return Ok(ExitCode::SUCCESS);
    }

    let total_value = summary::total_investment_value(investments);
    let total_return = summary::investment_total_return(investments);
    writeln!(
        out,
        "{} {}",
        "Investments".green().bold(),
        format_args!("({})", investments.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "  {} {}", "Total value:".bold(), format_brl(total_value))?;
    let return_text = format_signed_brl(total_return);
    match Tone::for_amount(total_return) {
        Tone::Success => writeln!(out, "  {} {}", "Total return:".bold(), return_text.green())?,
        Tone::Danger => writeln!(out, "  {} {}", "Total return:".bold(), return_text.red())?,
    }
    writeln!(out)?;
    writeln!(out, "{}", investments_table(investments))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `goals` subcommand.
fn cmd_goals<S: BlobStore>(store: &RecordStore<S>) -> io::Result<ExitCode> {
    let goals: Vec<(&Goal, GoalProgress)> = store
        .goals()
        .iter()
        .map(|goal| (goal, GoalProgress::of(goal)))
        .collect();
    let mut out = io::stdout().lock();
    if goals.is_empty() {
        writeln!(out, "{}", "No goals found.".dimmed())?;
        return Ok(ExitCode::SUCCESS);
    }
    writeln!(
        out,
        "{} {}",
        "Goals".green().bold(),
        format_args!("({})", goals.len()).dimmed()
    )?;
    writeln!(
        out,
        "  {} {}",
        "Saved so far:".bold(),
        format_brl(summary::total_goal_savings(store.goals()))
    )?;
    writeln!(out)?;
    writeln!(out, "{}", goals_table(&goals))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `report` subcommand.
fn cmd_report<S: BlobStore>(store: &RecordStore<S>) -> io::Result<ExitCode> {
    let overview = store.overview();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", "Report".green().bold())?;
    writeln!(out)?;

    let rate = format_percent(overview.savings_rate, 1);
    let rate_text = match overview.savings_tier {
        SavingsTier::Healthy => rate.green().to_string(),
        SavingsTier::Moderate => rate.yellow().to_string(),
        SavingsTier::Low => rate.red().to_string(),
    };
    writeln!(out, "  {} {rate_text}", "Savings rate:".bold())?;
    writeln!(
        out,
        "  {} {}",
        "Total income:".bold(),
        format_brl(overview.total_income).green()
    )?;
    writeln!(
        out,
        "  {} {}",
        "Total expenses:".bold(),
        format_brl(overview.total_expense).red()
    )?;
    writeln!(out, "  {} {}", "Savings:".bold(), format_brl(overview.balance))?;
    writeln!(out)?;

    writeln!(out, "{}", "Expense distribution".bold())?;
    writeln!(out, "{}", category_table(&overview.expense_by_category))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `add` subcommand family.
fn cmd_add<S: BlobStore>(store: &mut RecordStore<S>, command: AddCommand) -> io::Result<ExitCode> {
    let added = match command {
        AddCommand::Transaction(args) => store
            .add_transaction(&transaction_draft(args))
            .map(|tx| transactions_table(&[tx])),
        AddCommand::Investment(args) => store
            .add_investment(&InvestmentDraft {
                name: args.name,
                kind: args.kind,
                amount: args.amount,
                current_value: args.current_value,
            })
            .map(|investment| investments_table(&[investment])),
        AddCommand::Goal(args) => store
            .add_goal(&GoalDraft {
                name: args.name,
                target: args.target,
                current: args.current,
                deadline: args.deadline,
            })
            .map(|goal| {
                let progress = GoalProgress::of(&goal);
                goals_table(&[(&goal, progress)])
            }),
    };

    match added {
        Ok(table) => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", "Saved.".green().bold())?;
            writeln!(out, "{table}")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(io::stderr().lock(), "{} {err}", "error:".red().bold())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Builds a transaction draft, dating it today when no date was given.
fn transaction_draft(args: AddTransactionArgs) -> TransactionDraft {
    TransactionDraft {
        kind: args.kind.into(),
        description: args.description,
        category: args.category,
        amount: args.amount,
        date: args
            .date
            .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string()),
    }
}

// ── Tables ──────────────────────────────────────────────────────────────

/// Renders transactions as a table.
fn transactions_table(txs: &[Transaction]) -> Table {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Description").fg(Color::Cyan),
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
    ]);

    for tx in txs {
        let amount_cell = if tx.is_income() {
            Cell::new(format!("+{}", format_brl(tx.amount))).fg(Color::Green)
        } else {
            Cell::new(format!("-{}", format_brl(tx.amount))).fg(Color::Red)
        };
        _ = table.add_row(vec![
            Cell::new(format_date(tx.date)),
            Cell::new(&tx.description),
            Cell::new(tx.category),
            amount_cell.set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Renders investment holdings as a table.
fn investments_table(investments: &[Investment]) -> Table {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Type").fg(Color::Cyan),
        Cell::new("Invested").fg(Color::Cyan),
        Cell::new("Current").fg(Color::Cyan),
        Cell::new("Return").fg(Color::Cyan),
    ]);

    for inv in investments {
        let sign = if inv.return_rate.is_sign_negative() { "" } else { "+" };
        _ = table.add_row(vec![
            Cell::new(&inv.name),
            Cell::new(inv.kind),
            money_cell(inv.amount),
            money_cell(inv.current_value),
            Cell::new(format!("{sign}{}", format_percent(inv.return_rate, 1)))
                .fg(tone_color(Tone::for_amount(inv.return_rate)))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Renders goals with their progress as a table.
fn goals_table(goals: &[(&Goal, GoalProgress)]) -> Table {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Saved").fg(Color::Cyan),
        Cell::new("Target").fg(Color::Cyan),
        Cell::new("Progress").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Remaining").fg(Color::Cyan),
        Cell::new("Deadline").fg(Color::Cyan),
    ]);

    for &(goal, progress) in goals {
        _ = table.add_row(vec![
            Cell::new(&goal.name),
            money_cell(goal.current),
            money_cell(goal.target),
            Cell::new(format!(
                "{} {}",
                progress_bar(progress.width),
                format_percent(progress.percent, 0)
            )),
            Cell::new(status_label(progress.status)).fg(status_color(progress.status)),
            money_cell(progress.remaining),
            Cell::new(format_date(goal.deadline)),
        ]);
    }
    table
}

/// Renders a per-category expense breakdown with each category's share.
fn category_table(breakdown: &CategoryBreakdown) -> Table {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Spent").fg(Color::Cyan),
        Cell::new("Share").fg(Color::Cyan),
    ]);

    for (category, value) in breakdown.iter() {
        _ = table.add_row(vec![
            Cell::new(category),
            money_cell(value),
            Cell::new(format_percent(breakdown.share_of(category), 1))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Right-aligned cell holding a BRL amount.
fn money_cell(amount: Decimal) -> Cell {
    Cell::new(format_brl(amount)).set_alignment(CellAlignment::Right)
}

/// Table colour of a tone.
const fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Danger => Color::Red,
    }
}

/// Table colour of a savings tier.
const fn tier_color(tier: SavingsTier) -> Color {
    match tier {
        SavingsTier::Healthy => Color::Green,
        SavingsTier::Moderate => Color::Yellow,
        SavingsTier::Low => Color::Red,
    }
}

/// Display label of a goal status.
const fn status_label(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::Reached => "Reached",
        GoalStatus::Close => "Almost there",
        GoalStatus::InProgress => "In progress",
    }
}

/// Table colour of a goal status.
const fn status_color(status: GoalStatus) -> Color {
    match status {
        GoalStatus::Reached => Color::Green,
        GoalStatus::Close => Color::Yellow,
        GoalStatus::InProgress => Color::Cyan,
    }
}

// ── Formatting ──────────────────────────────────────────────────────────

/// Formats an amount in the pt-BR currency style, e.g. `R$ 1.234,56`.
fn format_brl(amount: Decimal) -> String {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    let sign = if cents.is_sign_negative() && !cents.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = cents.abs().to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{sign}R$ {},{fraction}", group_thousands(whole))
}

/// Formats an amount with an explicit `+` for non-negative values.
fn format_signed_brl(amount: Decimal) -> String {
    match Tone::for_amount(amount) {
        Tone::Success => format!("+{}", format_brl(amount)),
        Tone::Danger => format_brl(amount),
    }
}

/// Inserts `.` between groups of three digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len.saturating_mul(2));
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

/// Formats a percentage rounded to a fixed number of decimal places.
fn format_percent(percent: Decimal, decimal_places: u32) -> String {
    let mut shown = summary::round_percent(percent, decimal_places);
    shown.rescale(decimal_places);
    format!("{shown}%")
}

/// Formats a date as `dd/mm/yyyy`.
fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Draws a progress bar for a width already clamped into `[0, 100]`.
fn progress_bar(width: Decimal) -> String {
    let filled = width
        .checked_div(Decimal::from(5_u8))
        .and_then(|cells| cells.round().to_usize())
        .unwrap_or(0)
        .min(BAR_CELLS);
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(BAR_CELLS - filled)
    )
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // If stderr itself failed there is nothing left to report to.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
