#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::rc::Rc;

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands::*;
use crate::models::Filter;
use crate::session::Session;
use crate::store::MemoryStore;
use crate::{AppSession, SharedStore};

fn frozen_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

fn setup() -> (Rc<MemoryStore>, App, AppSession) {
    let mem = Rc::new(MemoryStore::default());
    let store: SharedStore = mem.clone();
    let session = Session::load_with_clock(store, frozen_clock).unwrap();
    let mut app = App::new("₱");
    app.refresh(&session);
    (mem, app, session)
}

fn run(input: &str, app: &mut App, session: &mut AppSession) {
    handle_command(input, app, session).unwrap();
}

#[test]
fn test_registry_has_core_commands() {
    for name in [
        "add", "delete", "filter", "budget", "goal", "progress", "delete-goal", "quit",
    ] {
        assert!(COMMANDS.contains_key(name), "missing :{name}");
    }
}

#[test]
fn test_unknown_command_suggests_closest() {
    let (_, mut app, mut session) = setup();
    run("buget 100", &mut app, &mut session);
    assert!(app.status_message.contains("Did you mean :budget?"));
}

#[test]
fn test_add_refreshes_view() {
    let (mem, mut app, mut session) = setup();
    run("add -150 Food Iced coffee", &mut app, &mut session);

    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.transactions[0].description, "Iced coffee");
    assert_eq!(app.overview.expenses, dec!(-150));
    assert_eq!(app.status_message, "Added: Iced coffee -₱150.00 [Food]");
    assert_eq!(mem.write_count(), 1);
}

#[test]
fn test_add_validation_shows_status_without_write() {
    let (mem, mut app, mut session) = setup();
    run("add abc Food Lunch", &mut app, &mut session);

    assert!(app.transactions.is_empty());
    assert!(app.status_message.contains("not a valid amount"));
    assert_eq!(mem.write_count(), 0);
}

#[test]
fn test_add_usage_when_incomplete() {
    let (_, mut app, mut session) = setup();
    run("add -150 Food", &mut app, &mut session);
    assert!(app.status_message.starts_with("Usage: :add"));
}

#[test]
fn test_storage_failure_keeps_change_on_screen() {
    let (mem, mut app, mut session) = setup();
    mem.set_fail_writes(true);
    run("add 5000 Salary Payday", &mut app, &mut session);

    assert_eq!(app.transactions.len(), 1);
    assert!(app.status_message.starts_with("Not saved"));
}

#[test]
fn test_delete_asks_for_confirmation() {
    let (mem, mut app, mut session) = setup();
    run("add -150 Food Coffee", &mut app, &mut session);
    app.screen = Screen::Transactions;

    run("delete", &mut app, &mut session);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(app.confirm_message, "Delete 'Coffee'?");
    assert_eq!(mem.write_count(), 1);

    let action = app.pending_action.take().unwrap();
    app.clear_confirm();
    confirm_pending(action, &mut app, &mut session);
    assert!(app.transactions.is_empty());
    assert_eq!(app.status_message, "Deleted: Coffee");
    assert_eq!(mem.write_count(), 2);
}

#[test]
fn test_delete_outside_transactions_screen() {
    let (_, mut app, mut session) = setup();
    run("add -150 Food Coffee", &mut app, &mut session);
    app.screen = Screen::Dashboard;
    run("delete", &mut app, &mut session);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
}

#[test]
fn test_delete_by_id() {
    let (_, mut app, mut session) = setup();
    run("add -150 Food Coffee", &mut app, &mut session);
    let id = app.transactions[0].id;
    run(&format!("delete {id}"), &mut app, &mut session);
    assert_eq!(
        app.pending_action,
        Some(PendingAction::DeleteTransaction {
            id,
            description: "Coffee".into()
        })
    );
}

#[test]
fn test_filter_cycles_and_sets() {
    let (_, mut app, mut session) = setup();
    run("add -150 Food Coffee", &mut app, &mut session);
    run("add 5000 Salary Payday", &mut app, &mut session);

    run("filter income", &mut app, &mut session);
    assert_eq!(app.filter, Filter::Income);
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.screen, Screen::Transactions);

    run("f", &mut app, &mut session);
    assert_eq!(app.filter, Filter::Expenses);
    assert_eq!(app.transactions[0].description, "Coffee");

    // Totals ignore the filter.
    assert_eq!(app.overview.balance, dec!(4850));

    run("filter nope", &mut app, &mut session);
    assert_eq!(app.filter, Filter::Expenses);
}

#[test]
fn test_budget_sets_remaining() {
    let (mem, mut app, mut session) = setup();
    run("add -300 Food Groceries", &mut app, &mut session);
    run("budget 1000", &mut app, &mut session);

    assert_eq!(app.overview.remaining_budget, dec!(700));
    assert_eq!(app.status_message, "Budget set to ₱1,000.00");
    assert_eq!(mem.write_count(), 1);

    run("budget 12x", &mut app, &mut session);
    assert_eq!(app.overview.budget.limit(), 1000);
}

#[test]
fn test_goal_and_progress() {
    let (_, mut app, mut session) = setup();
    run("goal 1000 Trip", &mut app, &mut session);
    assert_eq!(app.screen, Screen::Goals);
    assert_eq!(app.goals.len(), 1);

    run("progress 500", &mut app, &mut session);
    run("p 1000", &mut app, &mut session);
    assert_eq!(app.goals[0].current, dec!(1500));
    assert_eq!(app.status_message, "Trip: ₱1,500.00 / ₱1,000.00 (reached)");

    run("progress -5000", &mut app, &mut session);
    assert_eq!(app.goals[0].current, dec!(0));
}

#[test]
fn test_goal_rejects_non_positive_target() {
    let (mem, mut app, mut session) = setup();
    run("goal 0 Nothing", &mut app, &mut session);
    assert!(app.goals.is_empty());
    assert_eq!(mem.write_count(), 0);
}

#[test]
fn test_progress_without_goal() {
    let (_, mut app, mut session) = setup();
    run("progress 100", &mut app, &mut session);
    assert!(app.status_message.starts_with("No goal selected"));
}

#[test]
fn test_step_only_accepts_offered_denominations() {
    let (_, mut app, mut session) = setup();
    run("step 500", &mut app, &mut session);
    assert_eq!(app.step(), dec!(500));
    run("step 75", &mut app, &mut session);
    assert_eq!(app.step(), dec!(500));
}

#[test]
fn test_delete_goal_confirmation() {
    let (_, mut app, mut session) = setup();
    run("goal 1000 Trip", &mut app, &mut session);
    run("delete-goal", &mut app, &mut session);
    assert_eq!(app.confirm_message, "Delete goal 'Trip'?");

    let action = app.pending_action.take().unwrap();
    app.clear_confirm();
    confirm_pending(action, &mut app, &mut session);
    assert!(app.goals.is_empty());
}

#[test]
fn test_quit() {
    let (_, mut app, mut session) = setup();
    run("q", &mut app, &mut session);
    assert!(!app.running);
}
