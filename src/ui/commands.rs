use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, PendingAction, Screen};
use crate::error::Error;
use crate::models::{parse_amount, Filter};
use crate::session::{Intent, Outcome};
use crate::ui::util::{format_amount, format_signed};
use crate::AppSession;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut AppSession) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit PesoWise", cmd_quit, r);
    register_command!("quit", "Quit PesoWise", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("m", "Go to Monthly", cmd_monthly, r);
    register_command!("monthly", "Go to Monthly", cmd_monthly, r);
    register_command!("g", "Go to Goals", cmd_goals, r);
    register_command!("goals", "Go to Goals", cmd_goals, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add -150 Food Iced coffee)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add transaction (e.g. :a 5000 Salary Payday)",
        cmd_add,
        r
    );
    register_command!(
        "delete",
        "Delete selected transaction (or :delete <id>)",
        cmd_delete,
        r
    );
    register_command!(
        "filter",
        "Show all, income or expenses (e.g. :filter income)",
        cmd_filter,
        r
    );
    register_command!("f", "Cycle or set the transaction filter", cmd_filter, r);
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget 20000)",
        cmd_budget,
        r
    );
    register_command!(
        "goal",
        "Create savings goal (e.g. :goal 15000 Beach trip)",
        cmd_goal,
        r
    );
    register_command!(
        "progress",
        "Add to selected goal (e.g. :progress 250, or -250)",
        cmd_progress,
        r
    );
    register_command!("p", "Add to selected goal", cmd_progress, r);
    register_command!(
        "step",
        "Set the +/- goal step (20, 50, 100, 500, 1000)",
        cmd_step,
        r
    );
    register_command!(
        "delete-goal",
        "Delete selected savings goal",
        cmd_delete_goal,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    session: &mut AppSession,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, session)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

/// Forward an intent to the session and refresh the view.
///
/// Validation failures become the status line. A storage failure still
/// refreshes, since the change stays in memory for the rest of the run.
pub(crate) fn apply_intent(
    intent: Intent,
    app: &mut App,
    session: &mut AppSession,
) -> Option<Outcome> {
    match session.apply(intent) {
        Ok(outcome) => {
            app.refresh(session);
            Some(outcome)
        }
        Err(e @ Error::Storage(_)) => {
            tracing::error!(error = %e, "change applied but not saved");
            app.refresh(session);
            app.set_status(format!("Not saved: {e}"));
            None
        }
        Err(e) => {
            app.set_status(e.to_string());
            None
        }
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _session: &mut AppSession) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _session: &mut AppSession) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _session: &mut AppSession) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_monthly(_args: &str, app: &mut App, _session: &mut AppSession) -> anyhow::Result<()> {
    app.screen = Screen::Monthly;
    Ok(())
}

fn cmd_goals(_args: &str, app: &mut App, _session: &mut AppSession) -> anyhow::Result<()> {
    app.screen = Screen::Goals;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _session: &mut AppSession) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, session: &mut AppSession) -> anyhow::Result<()> {
    let mut parts = args.splitn(3, ' ');
    let (Some(amount), Some(category), Some(description)) =
        (parts.next(), parts.next(), parts.next())
    else {
        app.set_status("Usage: :add <amount> <category> <description>. Example: :add -150 Food Iced coffee");
        return Ok(());
    };

    let intent = Intent::AddTransaction {
        description: description.to_string(),
        amount: amount.to_string(),
        category: category.to_string(),
    };
    if let Some(Outcome::TransactionAdded(txn)) = apply_intent(intent, app, session) {
        let amount = format_signed(txn.amount, &app.currency);
        app.set_status(format!(
            "Added: {} {amount} [{}]",
            txn.description, txn.category
        ));
    }
    Ok(())
}

fn cmd_delete(args: &str, app: &mut App, _session: &mut AppSession) -> anyhow::Result<()> {
    let target = if args.is_empty() {
        if app.screen != Screen::Transactions {
            app.set_status("Navigate to Transactions and select one first");
            return Ok(());
        }
        app.selected_transaction()
    } else {
        match args.parse::<i64>() {
            Ok(id) => app.transactions.iter().find(|t| t.id == id),
            Err(_) => {
                app.set_status(format!("Invalid id: {args}"));
                return Ok(());
            }
        }
    };

    match target {
        Some(txn) => {
            let action = PendingAction::DeleteTransaction {
                id: txn.id,
                description: txn.description.clone(),
            };
            app.request_confirm(action);
        }
        None => app.set_status("No matching transaction"),
    }
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App, session: &mut AppSession) -> anyhow::Result<()> {
    let filter = if args.is_empty() {
        app.filter.next()
    } else {
        match Filter::parse(args) {
            Some(f) => f,
            None => {
                app.set_status(format!("Unknown filter '{args}'. Use all, income or expenses"));
                return Ok(());
            }
        }
    };

    if apply_intent(Intent::SetFilter(filter), app, session).is_some() {
        app.screen = Screen::Transactions;
        app.transaction_index = 0;
        app.transaction_scroll = 0;
        app.set_status(format!("Showing: {filter}"));
    }
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, session: &mut AppSession) -> anyhow::Result<()> {
    if let Some(Outcome::BudgetChanged(budget)) =
        apply_intent(Intent::SetBudget(args.to_string()), app, session)
    {
        if budget.limit() == 0 {
            app.set_status("Budget cleared");
        } else {
            let limit = format_amount(budget.as_decimal(), &app.currency);
            app.set_status(format!("Budget set to {limit}"));
        }
    }
    Ok(())
}

fn cmd_goal(args: &str, app: &mut App, session: &mut AppSession) -> anyhow::Result<()> {
    let Some((target, name)) = args.split_once(' ') else {
        app.set_status("Usage: :goal <target> <name>. Example: :goal 15000 Beach trip");
        return Ok(());
    };

    let intent = Intent::AddGoal {
        name: name.to_string(),
        target: target.to_string(),
    };
    if let Some(Outcome::GoalAdded(goal)) = apply_intent(intent, app, session) {
        app.screen = Screen::Goals;
        app.goal_index = app.goals.len().saturating_sub(1);
        let target = format_amount(goal.target, &app.currency);
        app.set_status(format!("Added goal: {} ({target})", goal.name));
    }
    Ok(())
}

fn cmd_progress(args: &str, app: &mut App, session: &mut AppSession) -> anyhow::Result<()> {
    let Some(delta) = parse_amount(args) else {
        app.set_status("Usage: :progress <amount>. Negative amounts withdraw");
        return Ok(());
    };
    let Some(id) = app.selected_goal().map(|g| g.id) else {
        app.set_status("No goal selected. Create one with :goal <target> <name>");
        return Ok(());
    };
    adjust_goal(id, delta, app, session);
    Ok(())
}

/// Shared by `:progress` and the Goals screen's `+`/`-` keys.
pub(crate) fn adjust_goal(
    id: i64,
    delta: rust_decimal::Decimal,
    app: &mut App,
    session: &mut AppSession,
) {
    if let Some(Outcome::GoalAdjusted(Some(goal))) =
        apply_intent(Intent::AdjustGoal { id, delta }, app, session)
    {
        let current = format_amount(goal.current, &app.currency);
        let target = format_amount(goal.target, &app.currency);
        let done = if goal.is_reached() { " (reached)" } else { "" };
        app.set_status(format!("{}: {current} / {target}{done}", goal.name));
    }
}

fn cmd_step(args: &str, app: &mut App, _session: &mut AppSession) -> anyhow::Result<()> {
    match args.parse::<i64>() {
        Ok(amount) if app.set_step(amount) => {
            let step = format_amount(app.step(), &app.currency);
            app.set_status(format!("Goal step: {step}"));
        }
        _ => app.set_status("Step must be one of 20, 50, 100, 500, 1000"),
    }
    Ok(())
}

fn cmd_delete_goal(_args: &str, app: &mut App, _session: &mut AppSession) -> anyhow::Result<()> {
    if app.screen != Screen::Goals {
        app.set_status("Navigate to Goals and select one first");
        return Ok(());
    }
    match app.selected_goal() {
        Some(goal) => {
            let action = PendingAction::DeleteGoal {
                id: goal.id,
                name: goal.name.clone(),
            };
            app.request_confirm(action);
        }
        None => app.set_status("No goal selected"),
    }
    Ok(())
}

/// Carry out a confirmed action.
pub(crate) fn confirm_pending(action: PendingAction, app: &mut App, session: &mut AppSession) {
    match action {
        PendingAction::DeleteTransaction { id, description } => {
            if apply_intent(Intent::DeleteTransaction(id), app, session).is_some() {
                app.set_status(format!("Deleted: {description}"));
            }
        }
        PendingAction::DeleteGoal { id, name } => {
            if apply_intent(Intent::DeleteGoal(id), app, session).is_some() {
                app.set_status(format!("Deleted goal: {name}"));
            }
        }
    }
}
