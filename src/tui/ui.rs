//! Panel run loop and top-level rendering.

use super::app::PanelApp;
use super::events::{handle_key_event, Event, EventHandler};
use super::theme::{colors, render_footer_hints, FooterHints, Styles};
use super::views;
use super::widgets::{
    check_terminal_size, render_empty_state, render_loading_modal, render_size_warning,
    truncate_str, MIN_HEIGHT, MIN_WIDTH,
};
use crate::bridge::HostBridge;
use crate::report::Category;
use crate::session::PanelSession;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::io::{self, stdout};

/// Run the panel TUI until the user quits.
///
/// Each pass drains host navigations into the session, folds finished
/// fetches into the screen state, then waits for the next terminal
/// event or tick.
pub fn run_panel_tui<B: HostBridge>(bridge: &mut B, session: &mut PanelSession) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = PanelApp::new();
    app.sync(session.state());

    let events = EventHandler::default();

    // Main loop
    loop {
        terminal.draw(|frame| render(frame, &app, session))?;

        let mut dirty = false;
        for page in bridge.poll_navigation() {
            session.start_cycle(page);
            dirty = true;
        }
        if session.poll_outcomes() {
            dirty = true;
        }
        if dirty {
            app.sync(session.state());
        }

        match events.next()? {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Resize(_, _) => {}
            Event::Tick => {
                app.tick += 1;
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Main render function.
fn render(frame: &mut Frame, app: &PanelApp, session: &PanelSession) {
    let area = frame.area();

    // Check minimum terminal size
    if check_terminal_size(area.width, area.height).is_err() {
        render_size_warning(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    // Main layout: header, content, status bar, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0], app, session);

    if let Some(failure) = &app.failure {
        views::render_failure_panel(frame, chunks[1], failure);
    } else if app.report.is_some() {
        views::render_results(frame, chunks[1], app);
    } else {
        render_empty_state(
            frame,
            chunks[1],
            "Waiting for a page",
            "Navigate in the editor to audit the published page",
        );
    }

    render_status_bar(frame, chunks[2], app, session);
    render_footer(frame, chunks[3], app);

    // Overlays
    if app.loading {
        let target = session.target_url().unwrap_or("");
        render_loading_modal(frame, area, target, app.tick);
        return;
    }

    if app.show_info {
        views::render_detail_popup(frame, area, app);
    }

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &PanelApp, session: &PanelSession) {
    let page = session
        .page()
        .map(|p| {
            if p.path.is_empty() {
                p.url.clone()
            } else {
                p.path.clone()
            }
        })
        .unwrap_or_else(|| "no page".to_string());

    let mut spans = vec![
        Span::styled("sitemorse", Styles::header_title()),
        Span::styled(" │ ", Style::default().fg(colors().muted)),
        Span::styled(
            truncate_str(&page, area.width.saturating_sub(40) as usize),
            Styles::text().bold(),
        ),
    ];
    if let Some(updated) = app.last_updated {
        spans.push(Span::styled(" │ ", Style::default().fg(colors().muted)));
        spans.push(Span::styled(
            format!("updated {}", updated.format("%H:%M:%S")),
            Styles::text_muted(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &PanelApp, session: &PanelSession) {
    let mut spans = vec![Span::styled(" Target: ", Styles::text_muted())];
    let target = session.target_url().unwrap_or("-");
    spans.push(Span::styled(
        truncate_str(target, area.width.saturating_sub(40) as usize),
        Style::default().fg(colors().primary).bold(),
    ));

    if let Some(report) = &app.report {
        for category in Category::ALL {
            let count = report.group(category).len();
            let style = if count == 0 {
                Styles::success()
            } else {
                Styles::warning().bold()
            };
            spans.push(Span::styled(" │ ", Style::default().fg(colors().muted)));
            spans.push(Span::styled(format!("{} {count}", category.label()), style));
        }
        if app.smartview_url().is_some() || app.report_url().is_some() {
            spans.push(Span::styled(" │ ", Style::default().fg(colors().muted)));
            spans.push(Span::styled("[s]martview [r]eport", Styles::shortcut_key()));
        }
    }

    let status = Paragraph::new(Line::from(spans)).style(Styles::status_bar());
    frame.render_widget(status, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &PanelApp) {
    // Show the status message if set, otherwise context hints
    if let Some(msg) = &app.status_message {
        let line = Line::from(vec![
            Span::styled("ℹ ", Styles::shortcut_key()),
            Span::styled(msg.as_str(), Styles::shortcut_key().bold()),
        ]);
        let footer = Paragraph::new(line).alignment(Alignment::Center);
        frame.render_widget(footer, area);
        return;
    }

    let hints = if app.loading {
        FooterHints::loading()
    } else if app.report.is_some() {
        FooterHints::results()
    } else {
        FooterHints::idle()
    };

    let footer = Paragraph::new(Line::from(render_footer_hints(&hints)))
        .alignment(Alignment::Center)
        .style(Styles::text_muted());
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = super::widgets::centered_rect(55, 65, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::styled("━━━ Panel Help ━━━", Styles::shortcut_key().bold()),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation", Styles::header_title())]),
        help_line("↑/↓ or j/k", "Move between findings"),
        help_line("1 / 2 / 3", "Toggle the SEO / GRC / UX section"),
        Line::from(""),
        Line::from(vec![Span::styled("Actions", Styles::header_title())]),
        help_line("i / Enter", "Show details for the selected finding"),
        help_line("v", "Play the finding's help video (browser)"),
        help_line("s", "Open SMARTVIEW for this page (browser)"),
        help_line("r", "Open the full report (browser)"),
        Line::from(""),
        Line::from(vec![Span::styled("General", Styles::header_title())]),
        help_line("T", "Toggle theme (dark/light/high-contrast)"),
        help_line("?", "Toggle this help"),
        help_line("q / Ctrl+C", "Quit"),
        Line::from(""),
        Line::styled("Press Esc to close", Styles::text_muted()),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(Styles::shortcut_key().bold())
            .borders(Borders::ALL)
            .border_style(Styles::shortcut_key()),
    );

    frame.render_widget(help, popup_area);
}

fn help_line(keys: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {keys:<14} "), Styles::shortcut_key()),
        Span::styled(desc.to_string(), Styles::text()),
    ])
}
