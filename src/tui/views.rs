//! Rendering for the panel's category sections and overlays.

use super::app::PanelApp;
use super::theme::{category_badge, clean_badge, colors, findings_badge, Styles};
use super::widgets::{centered_rect, render_error_state, truncate_str};
use crate::report::{AnalysisReport, Category};
use crate::session::{CycleFailure, FailureKind};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};

/// Render the three category sections in fixed display order.
///
/// Expanded sections share the free space; collapsed ones shrink to a
/// single title bar. Sections are independent, collapsing one never
/// expands another.
pub fn render_results(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let Some(report) = &app.report else {
        return;
    };

    let any_expanded = Category::ALL
        .iter()
        .any(|category| app.expanded[category.idx()]);

    let mut constraints: Vec<Constraint> = Category::ALL
        .iter()
        .map(|category| {
            if app.expanded[category.idx()] {
                Constraint::Fill(1)
            } else {
                Constraint::Length(3)
            }
        })
        .collect();
    if !any_expanded {
        constraints.push(Constraint::Fill(1));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for category in Category::ALL {
        render_section(frame, chunks[category.idx()], app, report, category);
    }

    if !any_expanded && report.is_clean() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::styled("✓ No issues found on this page", Styles::success().bold()),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[Category::ALL.len()]);
    }
}

fn render_section(
    frame: &mut Frame,
    area: Rect,
    app: &PanelApp,
    report: &AnalysisReport,
    category: Category,
) {
    let diags = report.group(category);
    let expanded = app.expanded[category.idx()];
    let focused = app.selected_row_in(category).is_some();

    let marker = if expanded { "▾" } else { "▸" };
    let badge = if diags.is_empty() {
        clean_badge()
    } else {
        findings_badge(diags.len())
    };
    let title = Line::from(vec![
        Span::styled(format!(" {marker} "), Styles::text_muted()),
        category_badge(category),
        Span::raw(" "),
        badge,
        Span::styled(format!(" [{}] ", category.idx() + 1), Styles::shortcut_key()),
    ]);

    let border = if focused {
        Styles::border_focused()
    } else {
        Styles::border()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border);

    if !expanded {
        let summary = if diags.is_empty() {
            Line::styled(" nothing flagged", Styles::text_muted())
        } else {
            Line::styled(
                format!(" {} finding(s) hidden", diags.len()),
                Styles::text_muted(),
            )
        };
        frame.render_widget(Paragraph::new(summary).block(block), area);
        return;
    }

    let title_width = area.width.saturating_sub(36) as usize;
    let rows: Vec<Row> = diags
        .iter()
        .map(|diag| {
            let links = match (&diag.info, &diag.video) {
                (Some(_), Some(_)) => "ⓘ ▶",
                (Some(_), None) => "ⓘ",
                (None, Some(_)) => "▶",
                (None, None) => "",
            };
            Row::new(vec![
                Cell::from(truncate_str(&diag.title, title_width)),
                Cell::from(Span::styled(
                    truncate_str(&diag.category, 14),
                    Styles::text_muted(),
                )),
                Cell::from(Line::from(diag.total.to_string()).right_aligned()),
                Cell::from(Span::styled(links, Styles::shortcut_key())),
            ])
        })
        .collect();

    let header = Row::new(vec!["finding", "area", "count", "links"])
        .style(Styles::text_muted().bold());
    let widths = [
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Length(6),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(colors().selection))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(app.selected_row_in(category));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the detail popup for the selected finding.
pub fn render_detail_popup(frame: &mut Frame, area: Rect, app: &PanelApp) {
    let Some(diag) = app.selected_diagnostic() else {
        return;
    };
    let Some(info) = &diag.info else {
        return;
    };

    let popup_area = centered_rect(60, 45, area);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(""),
        Line::styled(info.clone(), Styles::text()),
        Line::from(""),
        Line::from(vec![
            Span::styled("occurrences: ", Styles::text_muted()),
            Span::styled(diag.total.to_string(), Styles::text().bold()),
        ]),
    ];
    if diag.video.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[v] ", Styles::shortcut_key()),
            Span::styled(
                format!(
                    "play help video for '{}' (opens in new window)",
                    diag.title
                ),
                Styles::text_muted(),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled("Press Esc to close", Styles::text_muted()));

    let max_title = popup_area.width.saturating_sub(4) as usize;
    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {} ", truncate_str(&diag.title, max_title)))
                .title_style(Styles::header_title())
                .borders(Borders::ALL)
                .border_style(Styles::border_focused()),
        );

    frame.render_widget(popup, popup_area);
}

/// Render the terminal failure panel replacing the results.
pub fn render_failure_panel(frame: &mut Frame, area: Rect, failure: &CycleFailure) {
    let (title, hint) = match failure.kind {
        FailureKind::Config => (
            "Configuration required",
            "Set the Sitemorse token in the extension configuration, then navigate again.",
        ),
        FailureKind::Network => (
            "Sitemorse unavailable",
            "Check your network connection; navigating to another page retries.",
        ),
    };
    render_error_state(frame, area, title, &failure.message, hint);
}
