use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{FundingLimits, Tranche};
use crate::summary::AtlSummary;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_inr, format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let summary = app.summary();
    let limits = FundingLimits::for_account(app.account_type);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(6), // Summary cards
            Constraint::Min(8),    // Chart + tranche table
            Constraint::Length(1), // TDS note
        ])
        .split(area);

    render_header(f, chunks[0], app, &summary);
    render_summary_cards(f, chunks[1], &summary);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);
    render_split_chart(f, middle[0], &summary, limits);
    render_tranche_table(f, middle[1], &summary);

    let note = Paragraph::new(Line::from(Span::styled(
        format!(
            " TDS (2%) is deducted from the non-recurring portion only. {} cap: {}",
            limits.name,
            format_inr(limits.t1_non_recurring)
        ),
        theme::dim_style(),
    )));
    f.render_widget(note, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App, summary: &AtlSummary) {
    let risk = summary.risk;
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", truncate(&app.school_name, 40)),
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| {} | {} mode | {} ", app.account_type.display_label(), app.mode, app.financial_year),
            theme::dim_style(),
        ),
        Span::styled(format!(" RISK: {risk} "), theme::risk_badge_style(risk)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_summary_cards(f: &mut Frame, area: Rect, summary: &AtlSummary) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_card(
        f,
        cards[0],
        "Total Sanctioned",
        summary.total_sanctioned,
        theme::TEXT,
        None,
    );
    render_card(
        f,
        cards[1],
        "Total Utilized",
        summary.total_utilized,
        theme::ACCENT,
        None,
    );
    render_card(
        f,
        cards[2],
        "Current Balance",
        summary.balance,
        if summary.balance >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        Some(format!("incl. {} interest", format_inr(summary.interest_earned))),
    );
    render_utilization_card(f, cards[3], summary);
}

fn card_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: Color,
    subtitle: Option<String>,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_inr(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(card_block(title));

    f.render_widget(text, area);
}

fn render_utilization_card(f: &mut Frame, area: Rect, summary: &AtlSummary) {
    let percent = summary.utilization_percent();
    let block = card_block("Utilization Rate");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let text = Paragraph::new(Line::from(Span::styled(
        format_percent(percent),
        Style::default()
            .fg(theme::TEXT)
            .add_modifier(Modifier::BOLD),
    )))
    .centered();
    f.render_widget(text, rows[1]);

    let ratio = (percent / Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme::ACCENT).bg(theme::SURFACE))
        .ratio(ratio)
        .label("");
    f.render_widget(gauge, rows[2]);
}

/// Tranche-1 spend against its caps. The non-recurring bar turns red once it
/// passes the cap for the selected account type.
fn render_split_chart(f: &mut Frame, area: Rect, summary: &AtlSummary, limits: &FundingLimits) {
    let over_cap = summary.non_recurring_utilized > limits.t1_non_recurring;
    let spent_color = if over_cap { theme::RED } else { theme::ACCENT };
    let rec_over = summary.recurring_utilized > limits.t1_recurring;
    let rec_color = if rec_over { theme::RED } else { theme::GREEN };

    let bar = |label: &'static str, value: Decimal, color: Color| {
        Bar::default()
            .value(value.max(Decimal::ZERO).to_u64().unwrap_or(0))
            .text_value(format_inr(value))
            .label(Line::from(label))
            .style(Style::default().fg(color))
            .value_style(
                Style::default()
                    .fg(theme::HEADER_BG)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            )
    };

    let bars = [
        bar("NR spent", summary.non_recurring_utilized, spent_color),
        bar("NR cap", limits.t1_non_recurring, theme::OVERLAY),
        bar("Rec spent", summary.recurring_utilized, rec_color),
        bar("Rec cap", limits.t1_recurring, theme::OVERLAY),
    ];

    let title = if over_cap {
        " Tranche 1 Split: NON-RECURRING OVER CAP ".to_string()
    } else {
        " Tranche 1 Split ".to_string()
    };
    let title_style = if over_cap {
        Style::default().fg(theme::RED).add_modifier(Modifier::BOLD)
    } else {
        theme::title_style()
    };

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(title, title_style)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(11)
        .bar_gap(2)
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_tranche_table(f: &mut Frame, area: Rect, summary: &AtlSummary) {
    let header = Row::new(
        ["Tranche", "Received", "Spent", "Remaining"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = Tranche::all()
        .iter()
        .enumerate()
        .map(|(i, tranche)| {
            let usage = summary.tranche(*tranche);
            let remaining = usage.received - usage.spent;
            let remaining_style = if remaining < Decimal::ZERO {
                theme::debit_style()
            } else {
                theme::credit_style()
            };
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(tranche.as_str()),
                Cell::from(format_inr(usage.received)),
                Cell::from(format_inr(usage.spent)),
                Cell::from(Span::styled(format_inr(remaining), remaining_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(13),
        Constraint::Length(13),
        Constraint::Min(12),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Tranche Breakdown ", theme::title_style())),
    );
    f.render_widget(table, area);
}
