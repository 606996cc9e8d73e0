use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::Config;
use crate::goals::progress_percentage;
use crate::models::{parse_amount, Filter};
use crate::session::{Intent, Outcome};
use crate::ui::util::{format_amount, format_signed, progress_bar, truncate};
use crate::AppSession;

const TREND_WIDTH: usize = 30;

pub(crate) fn as_cli(args: &[String], session: &mut AppSession, config: &Config) -> Result<()> {
    let cur = config.currency.as_str();
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], session, cur),
        "delete" | "rm" => cli_delete(&args[2..], session),
        "list" | "ls" => cli_list(&args[2..], session, cur),
        "summary" | "s" => cli_summary(&args[2..], session, cur),
        "trend" => cli_trend(session, cur),
        "goals" | "g" => cli_goals(session, cur),
        "goal-add" => cli_goal_add(&args[2..], session, cur),
        "goal-progress" => cli_goal_progress(&args[2..], session, cur),
        "goal-delete" => cli_goal_delete(&args[2..], session),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("pesowise {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("PesoWise: local-only personal finance tracker");
    println!();
    println!("Usage: pesowise [command]");
    println!();
    println!("Commands:");
    println!("  (none)                           Launch interactive TUI");
    println!("  add <amount> <category> <desc>   Record a transaction (negative = expense)");
    println!("  delete <id>                      Delete a transaction");
    println!("  list [all|income|expenses]       Show transaction history");
    println!("  summary [--budget <n>]           Totals, budget, categories and months");
    println!("  trend                            Income vs expenses per month");
    println!("  goals                            List savings goals");
    println!("  goal-add <target> <name>         Create a savings goal");
    println!("  goal-progress <id> <amount>      Add (or remove) progress on a goal");
    println!("  goal-delete <id>                 Delete a savings goal");
    println!("  --help, -h                       Show this help");
    println!("  --version, -V                    Show version");
}

/// `add <amount> <category> <description...>`
pub(crate) fn parse_add(args: &[String]) -> Result<Intent> {
    if args.len() < 3 {
        anyhow::bail!("Usage: pesowise add <amount> <category> <description>");
    }
    Ok(Intent::AddTransaction {
        amount: args[0].clone(),
        category: args[1].clone(),
        description: args[2..].join(" "),
    })
}

/// `goal-add <target> <name...>`
pub(crate) fn parse_goal_add(args: &[String]) -> Result<Intent> {
    if args.len() < 2 {
        anyhow::bail!("Usage: pesowise goal-add <target> <name>");
    }
    Ok(Intent::AddGoal {
        target: args[0].clone(),
        name: args[1..].join(" "),
    })
}

/// `goal-progress <id> <delta>`
pub(crate) fn parse_goal_progress(args: &[String]) -> Result<Intent> {
    let [id, delta] = args else {
        anyhow::bail!("Usage: pesowise goal-progress <id> <amount>");
    };
    let id = parse_id(id)?;
    let delta = parse_amount(delta).ok_or_else(|| anyhow::anyhow!("Invalid amount: {delta}"))?;
    Ok(Intent::AdjustGoal { id, delta })
}

/// `--budget <n>` anywhere in the argument list.
pub(crate) fn budget_flag(args: &[String]) -> Option<&str> {
    args.windows(2)
        .find(|w| w[0] == "--budget")
        .map(|w| w[1].as_str())
}

pub(crate) fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid id: {raw}"))
}

fn single_id(args: &[String], usage: &str) -> Result<i64> {
    match args.first() {
        Some(raw) => parse_id(raw),
        None => anyhow::bail!("Usage: {usage}"),
    }
}

fn cli_add(args: &[String], session: &mut AppSession, cur: &str) -> Result<()> {
    if let Outcome::TransactionAdded(txn) = session.apply(parse_add(args)?)? {
        let kind = if txn.is_income() { "income" } else { "expense" };
        println!(
            "Added #{}: {} {} {kind} [{}]",
            txn.id,
            txn.description,
            format_amount(txn.abs_amount(), cur),
            txn.category
        );
    }
    Ok(())
}

fn cli_delete(args: &[String], session: &mut AppSession) -> Result<()> {
    let id = single_id(args, "pesowise delete <id>")?;
    match session.apply(Intent::DeleteTransaction(id))? {
        Outcome::TransactionDeleted(Some(txn)) => println!("Deleted: {}", txn.description),
        _ => println!("No transaction with id {id}"),
    }
    Ok(())
}

fn cli_list(args: &[String], session: &mut AppSession, cur: &str) -> Result<()> {
    let filter = match args.first() {
        Some(raw) => Filter::parse(raw).ok_or_else(|| {
            let names: Vec<&str> = Filter::all().iter().map(Filter::as_str).collect();
            anyhow::anyhow!("Unknown filter '{raw}'. Use one of: {}", names.join(", "))
        })?,
        None => Filter::All,
    };
    session.apply(Intent::SetFilter(filter))?;

    let rows = session.visible_transactions();
    if rows.is_empty() {
        println!("No transactions ({filter})");
        return Ok(());
    }

    println!("{:<15} {:<28} {:<16} {:>14}", "ID", "Description", "Category", "Amount");
    println!("{}", "─".repeat(76));
    for txn in &rows {
        println!(
            "{:<15} {:<28} {:<16} {:>14}",
            txn.id,
            truncate(&txn.description, 28),
            truncate(&txn.category, 16),
            format_signed(txn.amount, cur),
        );
    }
    if filter != Filter::All {
        println!("{} of {} shown", rows.len(), session.transactions().len());
    }
    Ok(())
}

fn cli_summary(args: &[String], session: &mut AppSession, cur: &str) -> Result<()> {
    if let Some(budget) = budget_flag(args) {
        session.apply(Intent::SetBudget(budget.to_string()))?;
    }
    let overview = session.overview();

    println!("PesoWise");
    println!("{}", "─".repeat(40));
    println!("  Balance:    {}", format_amount(overview.balance, cur));
    println!("  Income:     {}", format_amount(overview.income, cur));
    println!("  Expenses:   {}", format_amount(overview.expenses.abs(), cur));
    println!("  Total Txns: {}", session.transaction_count());
    let budget = session.budget();
    if budget.limit() > 0 {
        let status = if overview.is_over_budget() { "over" } else { "left" };
        println!(
            "  Budget:     {} ({} {status})",
            format_amount(budget.as_decimal(), cur),
            format_amount(overview.remaining_budget.abs(), cur),
        );
    }

    if !overview.category_totals.is_empty() {
        println!();
        println!("By Category:");
        for (name, total) in &overview.category_totals {
            println!("  {:<24} {}", truncate(name, 24), format_signed(*total, cur));
        }
    }

    if !overview.monthly.is_empty() {
        println!();
        println!("By Month:");
        for (month, entry) in &overview.monthly {
            println!(
                "  {:<16} in {:>14}  out {:>14}  net {:>14}",
                month,
                format_amount(entry.income, cur),
                format_amount(entry.expenses.abs(), cur),
                format_amount(entry.balance(), cur),
            );
        }
    }
    Ok(())
}

fn cli_trend(session: &mut AppSession, cur: &str) -> Result<()> {
    let trend = session.overview().trend;
    if trend.is_empty() {
        println!("No monthly data available.");
        return Ok(());
    }
    let peak = trend
        .iter()
        .map(|p| p.income.max(p.expenses))
        .max()
        .unwrap_or(Decimal::ZERO);
    let scale = |v: Decimal| -> f64 {
        if peak.is_zero() {
            0.0
        } else {
            decimal_to_f64(v / peak) * 100.0
        }
    };
    for point in &trend {
        println!("{}", point.label);
        println!(
            "  in  {} {}",
            progress_bar(scale(point.income), TREND_WIDTH),
            format_amount(point.income, cur)
        );
        println!(
            "  out {} {}",
            progress_bar(scale(point.expenses), TREND_WIDTH),
            format_amount(point.expenses, cur)
        );
    }
    Ok(())
}

fn cli_goals(session: &mut AppSession, cur: &str) -> Result<()> {
    let goals = session.goals();
    if goals.is_empty() {
        println!("No savings goals");
        return Ok(());
    }
    for goal in goals {
        let pct = progress_percentage(goal);
        println!(
            "{:<15} {:<20} {} / {} {} {:.0}%",
            goal.id,
            truncate(&goal.name, 20),
            format_amount(goal.current, cur),
            format_amount(goal.target, cur),
            progress_bar(decimal_to_f64(pct), 20),
            pct,
        );
    }
    Ok(())
}

fn cli_goal_add(args: &[String], session: &mut AppSession, cur: &str) -> Result<()> {
    if let Outcome::GoalAdded(goal) = session.apply(parse_goal_add(args)?)? {
        println!(
            "Added goal #{}: {} ({})",
            goal.id,
            goal.name,
            format_amount(goal.target, cur)
        );
    }
    Ok(())
}

fn cli_goal_progress(args: &[String], session: &mut AppSession, cur: &str) -> Result<()> {
    let intent = parse_goal_progress(args)?;
    match session.apply(intent)? {
        Outcome::GoalAdjusted(Some(goal)) => println!(
            "{}: {} / {} ({:.0}%)",
            goal.name,
            format_amount(goal.current, cur),
            format_amount(goal.target, cur),
            progress_percentage(&goal)
        ),
        _ => println!("No goal with that id"),
    }
    Ok(())
}

fn cli_goal_delete(args: &[String], session: &mut AppSession) -> Result<()> {
    let id = single_id(args, "pesowise goal-delete <id>")?;
    match session.apply(Intent::DeleteGoal(id))? {
        Outcome::GoalDeleted(Some(goal)) => println!("Deleted goal: {}", goal.name),
        _ => println!("No goal with id {id}"),
    }
    Ok(())
}

fn decimal_to_f64(val: Decimal) -> f64 {
    val.to_f64().unwrap_or(0.0)
}
