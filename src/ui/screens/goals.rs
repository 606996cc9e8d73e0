use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::goals::progress_percentage;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = format!("Savings Goals ({}) step {}", app.goals.len(), app.step());

    if app.goals.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No savings goals yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Create one with :goal <target> <name>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(theme::panel(title));
        f.render_widget(msg, area);
        return;
    }

    let cur = app.currency.as_str();
    let items: Vec<ListItem> = app
        .goals
        .iter()
        .enumerate()
        .skip(app.goal_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, goal)| {
            let percent = progress_percentage(goal).to_f64().unwrap_or(0.0);
            let color = theme::progress_color(percent);
            let name_style = if i == app.goal_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<20}", truncate(&goal.name, 19)), name_style),
                Span::styled(
                    format!(
                        " {} / {} ",
                        format_amount(goal.current, cur),
                        format_amount(goal.target, cur)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(percent, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {percent:.0}%"),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    if goal.is_reached() {
                        "  reached".to_string()
                    } else {
                        format!("  {} to go", format_amount(goal.remaining(), cur))
                    },
                    theme::dim_style(),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(theme::panel(title)), area);
}
