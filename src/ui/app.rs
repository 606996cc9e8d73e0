use rust_decimal::Decimal;

use crate::aggregate::Overview;
use crate::models::{Filter, SavingsGoal, Transaction, PROGRESS_STEPS};
use crate::session::Session;
use crate::store::PersistentStore;
use crate::ui::util::clamp_index;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Monthly,
    Goals,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Monthly,
            Self::Goals,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Goals => write!(f, "Goals"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
    DeleteGoal { id: i64, name: String },
}

/// View state for the TUI. Everything financial here is a copy taken from the
/// session by [`App::refresh`]; nothing is edited in place.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) currency: String,

    // Snapshot
    pub(crate) overview: Overview,
    pub(crate) filter: Filter,
    pub(crate) transaction_count: usize,

    // Transactions
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Monthly
    pub(crate) month_index: usize,
    pub(crate) month_scroll: usize,

    // Goals
    pub(crate) goals: Vec<SavingsGoal>,
    pub(crate) goal_index: usize,
    pub(crate) goal_scroll: usize,
    pub(crate) step_index: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(currency: impl Into<String>) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            currency: currency.into(),

            overview: Overview::default(),
            filter: Filter::default(),
            transaction_count: 0,

            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,

            month_index: 0,
            month_scroll: 0,

            goals: Vec::new(),
            goal_index: 0,
            goal_scroll: 0,
            step_index: 2,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Re-read every figure the screens show. Called after each applied intent.
    pub(crate) fn refresh<S: PersistentStore>(&mut self, session: &Session<S>) {
        self.overview = session.overview();
        self.filter = session.filter();
        self.transaction_count = session.transaction_count();
        self.transactions = session
            .visible_transactions()
            .into_iter()
            .cloned()
            .collect();
        self.goals = session.goals().to_vec();

        clamp_index(
            &mut self.transaction_index,
            &mut self.transaction_scroll,
            self.transactions.len(),
        );
        clamp_index(
            &mut self.month_index,
            &mut self.month_scroll,
            self.overview.monthly.len(),
        );
        clamp_index(&mut self.goal_index, &mut self.goal_scroll, self.goals.len());
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn selected_goal(&self) -> Option<&SavingsGoal> {
        self.goals.get(self.goal_index)
    }

    /// The denomination the Goals screen's `+`/`-` keys apply.
    pub(crate) fn step(&self) -> Decimal {
        let idx = self.step_index.min(PROGRESS_STEPS.len() - 1);
        Decimal::from(PROGRESS_STEPS[idx])
    }

    pub(crate) fn next_step(&mut self) {
        if self.step_index + 1 < PROGRESS_STEPS.len() {
            self.step_index += 1;
        }
    }

    pub(crate) fn prev_step(&mut self) {
        self.step_index = self.step_index.saturating_sub(1);
    }

    /// Select the step matching `amount`, if it is one of the offered denominations.
    pub(crate) fn set_step(&mut self, amount: i64) -> bool {
        match PROGRESS_STEPS.iter().position(|s| *s == amount) {
            Some(idx) => {
                self.step_index = idx;
                true
            }
            None => false,
        }
    }

    pub(crate) fn request_confirm(&mut self, action: PendingAction) {
        self.confirm_message = match &action {
            PendingAction::DeleteTransaction { description, .. } => {
                format!("Delete '{description}'?")
            }
            PendingAction::DeleteGoal { name, .. } => format!("Delete goal '{name}'?"),
        };
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn clear_confirm(&mut self) {
        self.pending_action = None;
        self.confirm_message.clear();
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
