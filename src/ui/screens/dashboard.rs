use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),      // Summary cards
            Constraint::Percentage(50), // Category totals
            Constraint::Min(8),         // Monthly trend
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_category_chart(f, chunks[1], app);
    render_trend_chart(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let o = &app.overview;
    let cur = app.currency.as_str();
    let income_count = app.transactions.iter().filter(|t| t.is_income()).count();
    let expense_count = app.transactions.iter().filter(|t| t.is_expense()).count();

    render_card(
        f,
        cards[0],
        "Balance",
        format_amount(o.balance, cur),
        theme::amount_color(o.balance),
        format!("{} txns", app.transaction_count),
    );
    render_card(
        f,
        cards[1],
        "Income",
        format_amount(o.income, cur),
        theme::GREEN,
        format!("{income_count} shown"),
    );
    render_card(
        f,
        cards[2],
        "Expenses",
        format_amount(o.expenses.abs(), cur),
        theme::RED,
        format!("{expense_count} shown"),
    );

    if o.budget.limit() == 0 {
        render_card(
            f,
            cards[3],
            "Budget",
            "not set".into(),
            theme::TEXT_DIM,
            ":budget <amount>".into(),
        );
    } else {
        let (color, note) = if o.is_over_budget() {
            (theme::RED, "over budget")
        } else {
            (theme::GREEN, "remaining")
        };
        render_card(
            f,
            cards[3],
            "Budget",
            format_amount(o.remaining_budget, cur),
            color,
            format!("{note} of {}", format_amount(o.budget.as_decimal(), cur)),
        );
    }
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: Color,
    subtitle: String,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(theme::panel(title));

    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = theme::panel("By Category");
    if app.overview.category_totals.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No transactions yet. Add one with :add <amount> <category> <description>",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .overview
        .category_totals
        .iter()
        .take(12)
        .map(|(name, total)| {
            Bar::default()
                .value(magnitude(*total))
                .label(Line::from(truncate(name, 10)))
                .style(theme::amount_style(*total))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::amount_color(*total))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_trend_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = theme::panel("Income vs Expenses");
    if app.overview.trend.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No monthly data yet",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    // Most recent months that fit, two bars plus a gap each
    let fit = (area.width.saturating_sub(2) / 9).max(1) as usize;
    let skip = app.overview.trend.len().saturating_sub(fit);

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(3)
        .bar_gap(1)
        .group_gap(2);

    for point in app.overview.trend.iter().skip(skip) {
        let bars = [
            Bar::default()
                .value(magnitude(point.income))
                .text_value(String::new())
                .style(Style::default().fg(theme::GREEN)),
            Bar::default()
                .value(magnitude(point.expenses))
                .text_value(String::new())
                .style(Style::default().fg(theme::RED)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(truncate(&point.label, 7)))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}

fn magnitude(amount: Decimal) -> u64 {
    amount.abs().round().to_u64().unwrap_or(u64::MAX)
}
