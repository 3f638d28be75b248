use anyhow::Result;
use chrono::{Duration, Local};
use std::path::Path;

use super::args::*;
use crate::format::{format_amount, format_percent, truncate};
use crate::ledger::Ledger;
use crate::models::TransactionType;
use crate::report::{Dashboard, MonthlyReport};

const DASHBOARD_DAYS: i64 = 30;

pub(crate) fn as_cli(args: &[String], ledger: &Ledger) -> Result<()> {
    let Some(command) = args.get(1) else {
        return cli_dashboard(&[], ledger);
    };
    let rest = &args[2..];
    match command.as_str() {
        "dashboard" | "d" => cli_dashboard(rest, ledger),
        "add" | "a" => cli_add(rest, ledger),
        "delete" | "rm" => cli_delete(rest, ledger),
        "list" | "ls" => cli_list(rest, ledger),
        "export" => cli_export(rest, ledger),
        "budget" | "b" => cli_budget(rest, ledger),
        "budgets" => cli_budgets(rest, ledger),
        "report" | "r" => cli_report(rest, ledger),
        "categories" => cli_categories(ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("fintrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("fintrack — local-only personal finance ledger");
    println!();
    println!("Usage: fintrack [command]");
    println!();
    println!("Commands:");
    println!("  (none), dashboard             Summary, monthly trend and spending by category");
    println!("    --from <YYYY-MM-DD>         Start date (default: 30 days ago)");
    println!("    --to <YYYY-MM-DD>           End date (default: today)");
    println!("  add <income|expense> <category> <amount>");
    println!("    --date <YYYY-MM-DD>         Transaction date (default: today)");
    println!("    --desc <text>               Optional description");
    println!("  delete <id>                   Delete a transaction");
    println!("  list                          List transactions, newest first");
    println!("    --from, --to                Inclusive date range");
    println!("    --category <name|All>       Category filter");
    println!("    --type <income|expense|All> Type filter");
    println!("  export [path]                 Export transactions to CSV (same filters as list)");
    println!("  budget <category> <amount>    Set a monthly expense budget");
    println!("    --month <YYYY-MM>           Month (default: current)");
    println!("  budgets [YYYY-MM]             Show budgets for a month");
    println!("  report [YYYY-MM]              Monthly report with budget vs actual");
    println!("  categories                    List allowed categories");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_dashboard(args: &[String], ledger: &Ledger) -> Result<()> {
    let today = Local::now().date_naive();
    let end = match flag_value(args, "--to") {
        Some(s) => parse_date(s)?,
        None => today,
    };
    let start = match flag_value(args, "--from") {
        Some(s) => parse_date(s)?,
        None => end - Duration::days(DASHBOARD_DAYS),
    };

    let dash = ledger.dashboard(start, end)?;
    print_dashboard(&dash);
    Ok(())
}

fn print_dashboard(dash: &Dashboard) {
    println!("Dashboard — {} to {}", dash.start, dash.end);
    println!("{}", "─".repeat(48));
    if dash.transaction_count == 0 {
        println!("No transactions found for the selected period.");
        return;
    }
    println!("  Total Income:    {}", format_amount(dash.summary.income));
    println!("  Total Expenses:  {}", format_amount(dash.summary.expenses));
    println!("  Balance:         {}", format_amount(dash.summary.balance));

    println!();
    println!("Monthly Trends:");
    println!("  {:<8} {:>14} {:>14} {:>14}", "Month", "Income", "Expense", "Balance");
    for m in &dash.monthly_trend {
        println!(
            "  {:<8} {:>14} {:>14} {:>14}",
            m.month.to_string(),
            format_amount(m.income),
            format_amount(m.expense),
            format_amount(m.balance),
        );
    }

    if !dash.expense_breakdown.is_empty() {
        println!();
        println!("Expenses by Category:");
        let mut rows: Vec<_> = dash.expense_breakdown.iter().collect();
        rows.sort_by(|a, b| a.1.cmp(b.1));
        for (name, amount) in rows {
            println!("  {name:<16} {:>14}", format_amount(*amount));
        }
    }
}

fn cli_add(args: &[String], ledger: &Ledger) -> Result<()> {
    let pos = positionals(args);
    let [kind, category, amount] = pos.as_slice() else {
        anyhow::bail!(
            "Usage: fintrack add <income|expense> <category> <amount> [--date YYYY-MM-DD] [--desc text]"
        );
    };
    let kind = parse_type(kind)?;
    let amount = parse_amount(amount)?;
    let date = match flag_value(args, "--date") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let description = flag_value(args, "--desc").unwrap_or("");

    let id = ledger.add_transaction(kind, category, amount, date, description)?;
    println!("Transaction {id} added successfully!");
    Ok(())
}

fn cli_delete(args: &[String], ledger: &Ledger) -> Result<()> {
    let Some(raw) = args.first() else {
        anyhow::bail!("Usage: fintrack delete <id>");
    };
    let id: i64 = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid transaction id: {raw}"))?;
    ledger.delete_transaction(id)?;
    println!("Transaction {id} deleted");
    Ok(())
}

fn cli_list(args: &[String], ledger: &Ledger) -> Result<()> {
    let filter = filter_from_args(args)?;
    let txns = ledger.list_transactions(&filter)?;
    if txns.is_empty() {
        println!("No transactions found matching your filters.");
        return Ok(());
    }

    println!(
        "{:<6} {:<10} {:<8} {:<14} {:>14}  Description",
        "ID", "Date", "Type", "Category", "Amount"
    );
    println!("{}", "─".repeat(72));
    for t in &txns {
        println!(
            "{:<6} {:<10} {:<8} {:<14} {:>14}  {}",
            t.id.unwrap_or(0),
            t.date.to_string(),
            t.kind.as_str(),
            truncate(&t.category, 14),
            format_amount(t.amount),
            truncate(&t.description, 30),
        );
    }
    println!("{} of {} transactions", txns.len(), ledger.transaction_count()?);
    Ok(())
}

fn cli_export(args: &[String], ledger: &Ledger) -> Result<()> {
    let filter = filter_from_args(args)?;
    let output_path = positionals(args)
        .first()
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| "transactions.csv".to_string());

    let txns = ledger.list_transactions(&filter)?;
    let count = crate::export::export_to_csv(Path::new(&output_path), &txns)?;
    println!("Exported {count} transactions to {output_path}");
    Ok(())
}

fn cli_budget(args: &[String], ledger: &Ledger) -> Result<()> {
    let pos = positionals(args);
    let [category, amount] = pos.as_slice() else {
        anyhow::bail!("Usage: fintrack budget <category> <amount> [--month YYYY-MM]");
    };
    let amount = parse_amount(amount)?;
    let month = month_or_current(flag_value(args, "--month"))?;

    ledger.set_budget(category, amount, month)?;
    println!("Budget saved successfully!");
    Ok(())
}

fn cli_budgets(args: &[String], ledger: &Ledger) -> Result<()> {
    let month = month_or_current(positionals(args).first().copied())?;
    let budgets = ledger.get_budgets(month)?;

    println!("Budgets — {month}");
    println!("{}", "─".repeat(32));
    if budgets.is_empty() {
        println!("No budgets set for this month.");
        return Ok(());
    }
    for (category, amount) in &budgets {
        println!("  {category:<16} {:>12}", format_amount(*amount));
    }
    Ok(())
}

fn cli_report(args: &[String], ledger: &Ledger) -> Result<()> {
    let month = month_or_current(positionals(args).first().copied())?;
    let report = ledger.get_report(month)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &MonthlyReport) {
    println!("Report — {}", report.month);
    println!("{}", "─".repeat(64));
    if report.transaction_count == 0 {
        println!("No transactions found for the selected month.");
    } else {
        print_report_body(report);
    }

    let nav: Vec<String> = [("prev", report.month.prev()), ("next", report.month.next())]
        .into_iter()
        .filter_map(|(label, m)| m.map(|m| format!("{label}: fintrack report {m}")))
        .collect();
    println!();
    println!("{}", nav.join("   "));
}

fn print_report_body(report: &MonthlyReport) {
    println!("  Total Income:    {}", format_amount(report.summary.income));
    println!("  Total Expenses:  {}", format_amount(report.summary.expenses));
    println!("  Balance:         {}", format_amount(report.summary.balance));

    if !report.budget_comparison.is_empty() {
        println!();
        println!("Budget vs Actual Spending:");
        println!(
            "  {:<14} {:>12} {:>12} {:>12} {:>9}",
            "Category", "Budget", "Actual", "Remaining", "Used (%)"
        );
        for line in &report.budget_comparison {
            println!(
                "  {:<14} {:>12} {:>12} {:>12} {:>9}",
                truncate(&line.category, 14),
                format_amount(line.budget),
                format_amount(line.actual),
                format_amount(line.remaining),
                format_percent(line.used_percent),
            );
        }
    }

    if !report.daily_spending.is_empty() {
        println!();
        println!("Daily Spending:");
        for day in &report.daily_spending {
            println!("  {}  {:>12}", day.date, format_amount(day.amount));
        }
    }

    for (title, breakdown) in [
        ("Income Sources", &report.income_breakdown),
        ("Expense Categories", &report.expense_breakdown),
    ] {
        if breakdown.is_empty() {
            continue;
        }
        println!();
        println!("{title}:");
        for (name, amount) in breakdown {
            println!("  {name:<16} {:>12}", format_amount(*amount));
        }
    }
}

fn cli_categories(ledger: &Ledger) -> Result<()> {
    for kind in TransactionType::all() {
        println!("{kind}: {}", ledger.categories().allowed(*kind).join(", "));
    }
    Ok(())
}
