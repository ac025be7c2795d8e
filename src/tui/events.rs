//! Terminal event pump and key bindings for the panel.

use super::app::PanelApp;
use super::open::open_in_browser;
use super::theme::toggle_theme;
use crate::report::Category;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Terminal events.
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Event handler.
///
/// A background thread polls the terminal and forwards events over a
/// channel; with no input it emits [`Event::Tick`] at the tick rate so
/// the draw loop keeps animating and polling the host bridge.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    _tx: mpsc::Sender<Event>,
}

impl EventHandler {
    #[must_use]
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        let event_tx = tx.clone();
        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if event_tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => {
                            if event_tx.send(Event::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        _ => {}
                    }
                } else if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}

/// Handle key events for the panel.
pub fn handle_key_event(app: &mut PanelApp, key: KeyEvent) {
    // Quit always works, even under the fetch modal
    if key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        app.should_quit = true;
        return;
    }

    // The fetch modal swallows everything else until the cycle resolves
    if app.loading {
        return;
    }

    app.clear_status();

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return;
    }

    if app.show_info {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('i') | KeyCode::Enter) {
            app.show_info = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('T') => {
            let name = toggle_theme();
            app.set_status(format!("theme: {name}"));
        }
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('1') => app.toggle_section(Category::Seo),
        KeyCode::Char('2') => app.toggle_section(Category::Grc),
        KeyCode::Char('3') => app.toggle_section(Category::Ux),
        KeyCode::Char('i') | KeyCode::Enter => app.open_info(),
        KeyCode::Char('v') => {
            let url = app.selected_video_url();
            open_action(app, "help video", url);
        }
        KeyCode::Char('s') => {
            let url = app.smartview_url();
            open_action(app, "SMARTVIEW", url);
        }
        KeyCode::Char('r') => {
            let url = app.report_url();
            open_action(app, "full report", url);
        }
        _ => {}
    }
}

/// Open a service link in the browser and report the outcome in the footer.
fn open_action(app: &mut PanelApp, label: &str, url: Option<String>) {
    let Some(url) = url else {
        app.set_status(format!("no {label} link available"));
        return;
    };
    match open_in_browser(&url) {
        Ok(()) => app.set_status(format!("opened {label} in browser")),
        Err(err) => app.set_status(format!("could not open {label}: {err}")),
    }
}
