use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{ComplianceStatus, RiskLevel};
use crate::report;
use crate::ui::app::App;
use crate::ui::theme;

/// Both reports as display lines, shared with scroll bounds in the event loop.
pub(crate) fn report_lines(app: &App) -> Vec<String> {
    report::full_report(
        &app.summary(),
        &app.school_name,
        &app.financial_year,
        app.session.transactions(),
        app.session.observations(),
        app.session.checklist(),
    )
    .lines()
    .map(str::to_string)
    .collect()
}

fn line_style(line: &str) -> Style {
    let trimmed = line.trim_start();
    let heading = [
        "FORM GFR 12-A",
        "AUDIT INTELLIGENCE SUMMARY",
        "COMPLIANCE CHECKLIST",
        "RISK OBSERVATIONS",
        "EVIDENCE & TRACEABILITY MAP",
    ];
    if heading.iter().any(|h| trimmed.starts_with(h)) {
        return theme::section_style();
    }
    if trimmed.starts_with(report::BRAND_HEADER)
        || trimmed.starts_with(&report::BRAND_FOOTER.to_uppercase())
    {
        return theme::dim_style().add_modifier(Modifier::ITALIC);
    }
    for status in [
        ComplianceStatus::Compliant,
        ComplianceStatus::Warning,
        ComplianceStatus::NonCompliant,
    ] {
        if trimmed.starts_with(status.mark()) {
            return theme::compliance_style(status);
        }
    }
    for risk in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
        if trimmed.starts_with(&format!("[{risk}]")) {
            return Style::default()
                .fg(theme::risk_color(risk))
                .add_modifier(Modifier::BOLD);
        }
    }
    theme::normal_style()
}

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = report_lines(app)
        .into_iter()
        .map(|l| {
            let style = line_style(&l);
            Line::from(Span::styled(l, style))
        })
        .collect();
    let total = lines.len();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(
                " Utilisation Certificate & Audit Report ({}/{}) ",
                (app.report_scroll + 1).min(total),
                total
            ),
            theme::title_style(),
        ));

    let scroll = u16::try_from(app.report_scroll).unwrap_or(u16::MAX);
    f.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}
