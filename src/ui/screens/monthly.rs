use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_signed};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let monthly = &app.overview.monthly;
    let title = format!("Monthly Summary ({})", monthly.len());

    if monthly.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No monthly data yet", theme::dim_style())),
        ])
        .centered()
        .block(theme::panel(title));
        f.render_widget(msg, area);
        return;
    }

    let cur = app.currency.as_str();
    let header = Row::new(
        ["Month", "Income", "Expenses", "Balance"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let rows: Vec<Row> = monthly
        .iter()
        .enumerate()
        .skip(app.month_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, (label, entry))| {
            let style = if i == app.month_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let balance = entry.balance();
            Row::new(vec![
                Cell::from(label.clone()),
                Cell::from(Span::styled(
                    format_amount(entry.income, cur),
                    theme::amount_style(entry.income),
                )),
                Cell::from(Span::styled(
                    format_amount(entry.expenses.abs(), cur),
                    theme::amount_style(entry.expenses),
                )),
                Cell::from(Span::styled(
                    format_signed(balance, cur),
                    theme::amount_style(balance),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(title));
    f.render_widget(table, area);
}
