use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};
use crate::AppSession;

pub(crate) fn as_tui(session: &mut AppSession, config: &Config) -> Result<()> {
    let mut app = App::new(config.currency.clone());
    app.refresh(session);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = ?e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut AppSession,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Tab, status and command bars, two borders and a table header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, session)?,
                InputMode::Command => handle_command_input(key, app, session)?,
                InputMode::Confirm => handle_confirm_input(key, app, session),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, session: &mut AppSession) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Transactions,
        KeyCode::Char('3') => app.screen = Screen::Monthly,
        KeyCode::Char('4') => app.screen = Screen::Goals,
        KeyCode::Tab => app.screen = cycle_screen(app.screen, true),
        KeyCode::BackTab => app.screen = cycle_screen(app.screen, false),
        KeyCode::Char('f') => commands::handle_command("filter", app, session)?,
        KeyCode::Char('D') => match app.screen {
            Screen::Transactions => commands::handle_command("delete", app, session)?,
            Screen::Goals => commands::handle_command("delete-goal", app, session)?,
            _ => {}
        },
        KeyCode::Char('+') | KeyCode::Char('=') if app.screen == Screen::Goals => {
            adjust_selected_goal(app, session, false);
        }
        KeyCode::Char('-') if app.screen == Screen::Goals => {
            adjust_selected_goal(app, session, true);
        }
        KeyCode::Char(']') if app.screen == Screen::Goals => app.next_step(),
        KeyCode::Char('[') if app.screen == Screen::Goals => app.prev_step(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, session: &mut AppSession) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, session)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, session: &mut AppSession) {
    let action = app.pending_action.take();
    app.clear_confirm();
    match (key.code, action) {
        (KeyCode::Char('y') | KeyCode::Char('Y'), Some(action)) => {
            commands::confirm_pending(action, app, session);
        }
        _ => app.set_status("Cancelled"),
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn cycle_screen(current: Screen, forward: bool) -> Screen {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % screens.len()
    } else {
        (idx + screens.len() - 1) % screens.len()
    };
    screens[next]
}

fn adjust_selected_goal(app: &mut App, session: &mut AppSession, withdraw: bool) {
    let Some(id) = app.selected_goal().map(|g| g.id) else {
        app.set_status("No goal selected. Create one with :goal <target> <name>");
        return;
    };
    let step = app.step();
    let delta = if withdraw { -step } else { step };
    commands::adjust_goal(id, delta, app, session);
}

/// Cursor and scroll offset of the list on the current screen, plus its length.
fn cursor(app: &mut App) -> Option<(&mut usize, &mut usize, usize)> {
    match app.screen {
        Screen::Transactions => Some((
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
        )),
        Screen::Monthly => Some((
            &mut app.month_index,
            &mut app.month_scroll,
            app.overview.monthly.len(),
        )),
        Screen::Goals => Some((&mut app.goal_index, &mut app.goal_scroll, app.goals.len())),
        Screen::Dashboard => None,
    }
}

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows.max(1);
    if let Some((index, scroll, len)) = cursor(app) {
        scroll_down(index, scroll, len, page);
    }
}

fn handle_move_up(app: &mut App) {
    if let Some((index, scroll, _)) = cursor(app) {
        scroll_up(index, scroll);
    }
}

fn handle_goto_top(app: &mut App) {
    if let Some((index, scroll, _)) = cursor(app) {
        scroll_to_top(index, scroll);
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows.max(1);
    if let Some((index, scroll, len)) = cursor(app) {
        scroll_to_bottom(index, scroll, len, page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::app::PendingAction;

    #[test]
    fn test_cycle_screen_wraps() {
        assert_eq!(cycle_screen(Screen::Goals, true), Screen::Dashboard);
        assert_eq!(cycle_screen(Screen::Dashboard, false), Screen::Goals);
        assert_eq!(cycle_screen(Screen::Transactions, true), Screen::Monthly);
    }

    #[test]
    fn test_cursor_follows_screen() {
        let mut app = App::new("₱");
        app.screen = Screen::Dashboard;
        assert!(cursor(&mut app).is_none());
        app.screen = Screen::Goals;
        assert!(matches!(cursor(&mut app), Some((_, _, 0))));
    }

    #[test]
    fn test_clear_confirm_resets_mode() {
        let mut app = App::new("₱");
        app.request_confirm(PendingAction::DeleteGoal {
            id: 1,
            name: "Trip".into(),
        });
        assert_eq!(app.input_mode, InputMode::Confirm);
        app.clear_confirm();
        assert!(app.pending_action.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
