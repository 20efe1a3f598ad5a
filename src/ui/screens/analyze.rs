use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::extract::{DocumentKind, MIN_USABLE_TEXT_LEN};
use crate::ui::app::{App, InputMode};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_file_browser(f, columns[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(columns[1]);
    render_settings(f, right[0], app);
    render_paste_buffer(f, right[1], app);
}

fn render_file_browser(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let path_display = Paragraph::new(Line::from(vec![
        Span::styled(" Path: ", Style::default().fg(theme::TEXT_DIM)),
        Span::styled(
            app.file_browser_path.display().to_string(),
            Style::default().fg(theme::ACCENT),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Bank Statement / Passbook ",
                theme::title_style(),
            )),
    );
    f.render_widget(path_display, chunks[0]);

    let filtered = app.file_browser_filtered();
    let page = chunks[1].height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = filtered
        .iter()
        .enumerate()
        .skip(app.file_browser_scroll)
        .take(page)
        .map(|(i, &idx)| {
            let path = &app.file_browser_entries[idx];
            let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("?");
            let name = if Some(path.as_path()) == app.file_browser_path.parent() {
                "📁 ..".to_string()
            } else if path.is_dir() {
                format!("📁 {file_name}")
            } else {
                let icon = match DocumentKind::from_path(path) {
                    Some(DocumentKind::Image) => "🖼",
                    Some(DocumentKind::Pdf) => "📕",
                    _ => "📄",
                };
                format!("{icon} {file_name}")
            };

            let style = if i == app.file_browser_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(Span::styled(name, style)))
        })
        .collect();

    let hint = if app.search_input.is_empty() {
        " j/k navigate, Enter open/analyze, / filter ".to_string()
    } else {
        format!(" filter: {} ", app.search_input)
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(hint, theme::dim_style())),
    );
    f.render_widget(list, chunks[1]);
}

fn render_settings(f: &mut Frame, area: Rect, app: &App) {
    let label = |s: &'static str| Span::styled(format!(" {s:<10}"), theme::dim_style());
    let value_style = Style::default()
        .fg(theme::TEXT)
        .add_modifier(Modifier::BOLD);

    let status = if app.pipeline.is_busy() {
        Span::styled("Analyzing…", Style::default().fg(theme::YELLOW))
    } else {
        match &app.last_submission {
            Some(src) => Span::styled(format!("Last: {src}"), theme::dim_style()),
            None => Span::styled("Ready", Style::default().fg(theme::GREEN)),
        }
    };

    let lines = vec![
        Line::from(vec![
            label("Mode"),
            Span::styled(app.mode.to_string(), value_style),
            Span::styled("  (m)", theme::dim_style()),
        ]),
        Line::from(vec![
            label("Account"),
            Span::styled(app.account_type.display_label(), value_style),
            Span::styled("  (a)", theme::dim_style()),
        ]),
        Line::from(vec![
            label("School"),
            Span::styled(app.school_name.clone(), value_style),
        ]),
        Line::from(vec![label("Status"), status]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Analysis Settings ", theme::title_style()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_paste_buffer(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Paste;
    let border = if editing { theme::GREEN } else { theme::OVERLAY };
    let title = format!(
        " Pasted Text ({} chars{}) ",
        app.paste_buffer.chars().count(),
        if editing { ", editing" } else { "" }
    );

    let body: Vec<Line> = if app.paste_buffer.is_empty() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Press p or :paste to paste statement text,",
                theme::dim_style(),
            )),
            Line::from(Span::styled(
                "then :submit to analyze it.",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Documents need at least {MIN_USABLE_TEXT_LEN} readable characters."),
                theme::dim_style(),
            )),
        ]
    } else {
        let inner_height = area.height.saturating_sub(2) as usize;
        let lines: Vec<&str> = app.paste_buffer.lines().collect();
        let start = lines.len().saturating_sub(inner_height.max(1));
        lines[start..]
            .iter()
            .map(|l| Line::from(Span::styled(l.to_string(), theme::normal_style())))
            .collect()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(title, theme::title_style()));
    f.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
