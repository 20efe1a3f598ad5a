use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::FundingLimits;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_inr, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let filtered = app.filtered_transactions();

    if filtered.is_empty() {
        let msg = if !app.search_input.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No transactions matching '{}'", app.search_input),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to clear the search",
                    theme::dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No transactions analyzed yet",
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Open the Analyze tab (2) to read a statement or passbook",
                    theme::dim_style(),
                )),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Transactions (0) ", theme::title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date (FY)", "Narration", "Amount", "Category", "Tranche", "Status", "Risk"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let txns = app.session.transactions();
    let rows: Vec<Row> = filtered
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, &idx)| {
            let txn = &txns[idx];
            let is_cursor = i == app.transaction_index;

            let date_cell = if txn.financial_year.is_empty() {
                txn.date.clone()
            } else {
                format!("{} ({})", txn.date, txn.financial_year)
            };

            let narration = match (&txn.flag_reason, txn.is_flagged) {
                (Some(reason), _) => format!("⚑ {} ({reason})", txn.narration),
                (None, true) => format!("⚑ {}", txn.narration),
                (None, false) => txn.narration.clone(),
            };

            let amount_style = if txn.is_debit() {
                theme::debit_style()
            } else {
                theme::credit_style()
            };
            let amount_str = format!("{}{}", txn.sign(), format_inr(txn.amount));

            let style = if is_cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let (amount_cell, status_cell, risk_cell) = if is_cursor {
                (
                    Cell::from(amount_str),
                    Cell::from(txn.verification.as_str()),
                    Cell::from(txn.risk.as_str()),
                )
            } else {
                (
                    Cell::from(Span::styled(amount_str, amount_style)),
                    Cell::from(Span::styled(
                        txn.verification.as_str(),
                        theme::verification_style(txn.verification),
                    )),
                    Cell::from(Span::styled(
                        txn.risk.as_str(),
                        Style::default()
                            .fg(theme::risk_color(txn.risk))
                            .add_modifier(Modifier::BOLD),
                    )),
                )
            };

            Row::new(vec![
                Cell::from(date_cell),
                Cell::from(truncate(&narration, 48)),
                amount_cell,
                Cell::from(txn.category.as_str()),
                Cell::from(txn.tranche_label().to_string()),
                status_cell,
                risk_cell,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(21),
        Constraint::Min(24),
        Constraint::Length(13),
        Constraint::Length(15),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(6),
    ];

    let summary = app.summary();
    let cap = FundingLimits::for_account(app.account_type).t1_non_recurring;
    let (cap_text, cap_style) = if summary.non_recurring_utilized > cap {
        (
            format!("NR {} over cap {}", format_inr(summary.non_recurring_utilized), format_inr(cap)),
            Style::default().fg(theme::RED).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            format!("NR within cap {}", format_inr(cap)),
            Style::default().fg(theme::GREEN),
        )
    };

    let title = Line::from(vec![
        Span::styled(
            format!(
                " Transactions ({}{}) ",
                filtered.len(),
                if app.search_input.is_empty() {
                    String::new()
                } else {
                    format!(" of {}, search: '{}'", txns.len(), app.search_input)
                }
            ),
            theme::title_style(),
        ),
        Span::styled(format!("{cap_text} "), cap_style),
    ]);

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(title),
    );

    f.render_widget(table, area);
}
