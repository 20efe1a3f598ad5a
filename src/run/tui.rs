use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands::{self, switch_screen};
use crate::ui::screens::reports::report_lines;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(config: &Config, pipeline: Pipeline) -> Result<()> {
    let mut app = App::new(config, pipeline);
    app.refresh_file_browser();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        // A staged submission runs only after the busy indicator has been drawn.
        if app.run_pending_submission() {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if app.show_help {
                    app.show_help = false;
                    continue;
                }
                match app.input_mode {
                    InputMode::Normal => handle_normal_input(key, app),
                    InputMode::Command => handle_command_input(key, app),
                    InputMode::Search => handle_search_input(key, app),
                    InputMode::Paste => handle_paste_input(key, app),
                    InputMode::Confirm => handle_confirm_input(key, app),
                }
            }
            Event::Paste(text) => handle_paste_event(&text, app),
            _ => {}
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
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
        KeyCode::Char('1') => switch_screen(app, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, Screen::Analyze),
        KeyCode::Char('3') => switch_screen(app, Screen::Transactions),
        KeyCode::Char('4') => switch_screen(app, Screen::Reports),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Char('a') => app.toggle_account_type(),
        KeyCode::Char('m') => app.toggle_mode(),
        KeyCode::Char('p') if app.screen == Screen::Analyze => {
            run_command("paste", app);
        }
        KeyCode::Char('.') if app.screen == Screen::Analyze => {
            app.file_browser_show_hidden = !app.file_browser_show_hidden;
            app.refresh_file_browser();
        }
        KeyCode::Enter if app.screen == Screen::Analyze => app.open_selected_entry(),
        KeyCode::Esc => handle_escape(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => {}
    }
}

fn handle_command_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            run_command(&input, app);
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
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

/// Live search: filters the file browser on Analyze, transactions elsewhere.
fn handle_search_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            reset_search_cursor(app);
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            reset_search_cursor(app);
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            reset_search_cursor(app);
        }
        _ => {}
    }
}

fn reset_search_cursor(app: &mut App) {
    if app.screen == Screen::Analyze {
        app.file_browser_index = 0;
        app.file_browser_scroll = 0;
    } else {
        app.screen = Screen::Transactions;
        app.transaction_index = 0;
        app.transaction_scroll = 0;
    }
}

fn handle_paste_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_mode = InputMode::Normal;
            app.submit_pasted_text();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.paste_buffer.clear();
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_status(format!(
                "{} chars pasted. :submit to analyze",
                app.paste_buffer.chars().count()
            ));
        }
        KeyCode::Enter => app.paste_buffer.push('\n'),
        KeyCode::Tab => app.paste_buffer.push('\t'),
        KeyCode::Backspace => {
            app.paste_buffer.pop();
        }
        KeyCode::Char(c) => app.paste_buffer.push(c),
        _ => {}
    }
}

/// Bracketed paste from the terminal. Outside the command line it always
/// lands in the statement buffer.
fn handle_paste_event(text: &str, app: &mut App) {
    match app.input_mode {
        InputMode::Command => {
            app.command_input.push_str(&text.replace(['\r', '\n'], " "));
        }
        InputMode::Search => {
            app.search_input.push_str(&text.replace(['\r', '\n'], " "));
            reset_search_cursor(app);
        }
        InputMode::Confirm => {}
        InputMode::Normal | InputMode::Paste => {
            app.screen = Screen::Analyze;
            app.input_mode = InputMode::Paste;
            app.paste_buffer.push_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
        }
    }
}

fn handle_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(PendingAction::Purge { .. }) = app.pending_action.take() {
                let removed = app.purge();
                app.set_status(format!("Purged {removed} transaction(s)"));
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
}

fn run_command(input: &str, app: &mut App) {
    if let Err(e) = commands::handle_command(input, app) {
        tracing::warn!(command = input, error = %e, "command failed");
        app.set_status(format!("Error: {e:#}"));
    }
}

// ── Navigation ───────────────────────────────────────────────

fn file_browser_page(app: &App) -> usize {
    app.visible_rows.saturating_sub(2).max(1)
}

fn report_max_scroll(app: &App) -> usize {
    let page = app.visible_rows + 1;
    report_lines(app).len().saturating_sub(page)
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            let len = app.filtered_transactions().len();
            let page = app.visible_rows;
            scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                len,
                page,
            );
        }
        Screen::Analyze => {
            let len = app.file_browser_filtered().len();
            let page = file_browser_page(app);
            scroll_down(
                &mut app.file_browser_index,
                &mut app.file_browser_scroll,
                len,
                page,
            );
        }
        Screen::Reports => {
            if app.report_scroll < report_max_scroll(app) {
                app.report_scroll += 1;
            }
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Analyze => {
            scroll_up(&mut app.file_browser_index, &mut app.file_browser_scroll);
        }
        Screen::Reports => {
            app.report_scroll = app.report_scroll.saturating_sub(1);
        }
        Screen::Dashboard => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Analyze => {
            scroll_to_top(&mut app.file_browser_index, &mut app.file_browser_scroll);
        }
        Screen::Reports => app.report_scroll = 0,
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            let len = app.filtered_transactions().len();
            let page = app.visible_rows;
            scroll_to_bottom(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                len,
                page,
            );
        }
        Screen::Analyze => {
            let len = app.file_browser_filtered().len();
            let page = file_browser_page(app);
            scroll_to_bottom(
                &mut app.file_browser_index,
                &mut app.file_browser_scroll,
                len,
                page,
            );
        }
        Screen::Reports => app.report_scroll = report_max_scroll(app),
        Screen::Dashboard => {}
    }
}

fn handle_escape(app: &mut App) {
    if !app.search_input.is_empty() {
        app.search_input.clear();
        reset_search_cursor(app);
        app.set_status("Search cleared");
    } else if app.screen == Screen::Analyze {
        switch_screen(app, Screen::Dashboard);
    } else {
        app.status_message.clear();
    }
}
