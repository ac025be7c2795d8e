//! Shared rendering primitives for the panel TUI.

use super::theme::{colors, Styles};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Minimum terminal width for usable rendering
pub const MIN_WIDTH: u16 = 80;
/// Minimum terminal height for usable rendering
pub const MIN_HEIGHT: u16 = 24;

/// Braille spinner frames for in-flight states
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Check whether the terminal meets the minimum size requirements.
pub fn check_terminal_size(width: u16, height: u16) -> Result<(), String> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        Err(format!(
            "Terminal too small: {width}x{height} (minimum: {MIN_WIDTH}x{MIN_HEIGHT})"
        ))
    } else {
        Ok(())
    }
}

/// Render a full-screen warning when the terminal is below the minimum size.
pub fn render_size_warning(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    let lines = vec![
        Line::from(""),
        Line::styled("⚠ Terminal Too Small", Styles::warning().bold()),
        Line::from(""),
        Line::styled(
            format!("Current: {}x{}", area.width, area.height),
            Styles::text_muted(),
        ),
        Line::styled(
            format!("Minimum: {min_width}x{min_height}"),
            Styles::text_muted(),
        ),
        Line::from(""),
        Line::styled("Please resize your terminal", Styles::text()),
    ];

    let warning = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(warning, area);
}

/// Compute a centered rectangle occupying the given percentages of `r`.
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Truncate a string to a maximum display width, appending an ellipsis.
///
/// Width-aware so double-width characters do not overflow table cells.
#[must_use]
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Render the blocking fetch modal over the current content.
///
/// The modal stays up until the fetch resolves; it offers no dismiss
/// action because the in-flight request cannot be cancelled.
pub fn render_loading_modal(frame: &mut Frame, area: Rect, target_url: &str, tick: u64) {
    let spinner = SPINNER_FRAMES[(tick / 2) as usize % SPINNER_FRAMES.len()];
    let popup_area = centered_rect(60, 25, area);
    frame.render_widget(Clear, popup_area);

    let max_url = popup_area.width.saturating_sub(6) as usize;
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{spinner} "), Style::default().fg(colors().accent)),
            Span::styled("Analyzing page…", Styles::text().bold()),
        ]),
        Line::from(""),
        Line::styled(truncate_str(target_url, max_url), Styles::text_muted()),
    ];

    let modal = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Sitemorse ")
                .title_style(Styles::header_title())
                .borders(Borders::ALL)
                .border_style(Styles::border_focused()),
        );

    frame.render_widget(modal, popup_area);
}

/// Render a terminal error panel filling the content area.
pub fn render_error_state(frame: &mut Frame, area: Rect, title: &str, message: &str, hint: &str) {
    let lines = vec![
        Line::from(""),
        Line::styled(format!("✗ {title}"), Styles::error().bold()),
        Line::from(""),
        Line::styled(message.to_string(), Styles::text()),
        Line::from(""),
        Line::styled(hint.to_string(), Styles::text_muted()),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors().error)),
        );

    frame.render_widget(panel, area);
}

/// Render a placeholder panel while nothing is on screen yet.
pub fn render_empty_state(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let lines = vec![
        Line::from(""),
        Line::styled(title.to_string(), Styles::text_muted().bold()),
        Line::from(""),
        Line::styled(subtitle.to_string(), Styles::text_muted()),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border()),
        );

    frame.render_widget(panel, area);
}
