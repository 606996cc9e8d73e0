use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use chrono::Local;

use crate::models::Filter;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_signed, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.filter {
        Filter::All => format!("Transactions ({})", app.transactions.len()),
        other => format!(
            "Transactions ({} of {}) filter: {other}",
            app.transactions.len(),
            app.transaction_count
        ),
    };

    if app.transactions.is_empty() {
        let hint = if app.filter == Filter::All {
            "Add one with :add <amount> <category> <description>"
        } else {
            "Press f to change the filter"
        };
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions to show", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim_style())),
        ];
        f.render_widget(
            Paragraph::new(msg).centered().block(theme::panel(title)),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let date = txn
                .created_at()
                .with_timezone(&Local)
                .format("%Y-%m-%d")
                .to_string();

            Row::new(vec![
                Cell::from(date),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(truncate(&txn.category, 18)),
                Cell::from(Span::styled(
                    format_signed(txn.amount, &app.currency),
                    theme::amount_style(txn.amount),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(title));

    f.render_widget(table, area);
}
