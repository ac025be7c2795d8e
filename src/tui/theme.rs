//! Centralized theme and color scheme for the panel TUI.
//!
//! All views pull their colors from the global theme so that runtime
//! theme switching restyles the whole panel at once.

use crate::report::Category;
use ratatui::prelude::*;
use std::sync::RwLock;

/// Semantic colors used across the panel.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    // Audit categories
    pub seo: Color,
    pub grc: Color,
    pub ux: Color,

    // UI element colors
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub background_alt: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Badge foreground colors (for text on colored backgrounds)
    pub badge_fg_dark: Color,
    pub badge_fg_light: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Const dark scheme for static initialization
    const fn dark_const() -> Self {
        Self {
            seo: Color::Cyan,
            grc: Color::Magenta,
            ux: Color::Blue,

            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            background_alt: Color::Rgb(30, 30, 40),
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::DarkGray,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            badge_fg_dark: Color::Black,
            badge_fg_light: Color::White,
        }
    }

    /// Dark scheme (default)
    pub fn dark() -> Self {
        Self::dark_const()
    }

    /// Light scheme
    pub fn light() -> Self {
        Self {
            seo: Color::Rgb(0, 100, 150),
            grc: Color::Rgb(128, 0, 128),
            ux: Color::Rgb(0, 0, 200),

            primary: Color::Rgb(0, 100, 150),
            accent: Color::Rgb(180, 140, 0),
            muted: Color::Rgb(150, 150, 150),
            border: Color::Rgb(180, 180, 180),
            border_focused: Color::Rgb(0, 100, 150),
            background_alt: Color::Rgb(240, 240, 245),
            text: Color::Rgb(30, 30, 30),
            text_muted: Color::Rgb(100, 100, 100),
            selection: Color::Rgb(200, 220, 240),

            success: Color::Rgb(0, 128, 0),
            warning: Color::Rgb(180, 140, 0),
            error: Color::Rgb(200, 0, 0),

            badge_fg_dark: Color::Rgb(30, 30, 30),
            badge_fg_light: Color::White,
        }
    }

    /// High contrast scheme (accessibility)
    pub fn high_contrast() -> Self {
        Self {
            seo: Color::LightCyan,
            grc: Color::LightMagenta,
            ux: Color::LightBlue,

            primary: Color::LightCyan,
            accent: Color::LightYellow,
            muted: Color::Gray,
            border: Color::White,
            border_focused: Color::LightCyan,
            background_alt: Color::Rgb(20, 20, 20),
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::White,

            success: Color::LightGreen,
            warning: Color::LightYellow,
            error: Color::LightRed,

            badge_fg_dark: Color::Black,
            badge_fg_light: Color::White,
        }
    }

    /// Accent color for an audit category
    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Seo => self.seo,
            Category::Grc => self.grc,
            Category::Ux => self.ux,
        }
    }
}

/// Global theme instance (runtime switchable)
static THEME: RwLock<Theme> = RwLock::new(Theme::dark_const());

/// Theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Const dark theme for static initialization
    const fn dark_const() -> Self {
        Self {
            colors: ColorScheme::dark_const(),
            name: "dark",
        }
    }

    pub fn dark() -> Self {
        Self {
            colors: ColorScheme::dark(),
            name: "dark",
        }
    }

    pub fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            colors: ColorScheme::high_contrast(),
            name: "high-contrast",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "high-contrast" | "highcontrast" | "hc" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }

    /// Get the next theme in the rotation
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}

/// Set the current theme
pub fn set_theme(theme: Theme) {
    *THEME.write().expect("THEME lock not poisoned") = theme;
}

/// Toggle to the next theme in rotation (dark -> light -> high-contrast -> dark)
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().expect("THEME lock not poisoned");
    *theme = theme.next();
    theme.name
}

/// Convenience function to get current colors
pub fn colors() -> ColorScheme {
    THEME.read().expect("THEME lock not poisoned").colors
}

// ============================================================================
// Style Helpers
// ============================================================================

/// Common style presets for consistent UI elements
pub struct Styles;

impl Styles {
    /// Header title style
    pub fn header_title() -> Style {
        Style::default().fg(colors().primary).bold()
    }

    /// Normal text style
    pub fn text() -> Style {
        Style::default().fg(colors().text)
    }

    /// Muted/secondary text style
    pub fn text_muted() -> Style {
        Style::default().fg(colors().text_muted)
    }

    /// Selection style (for selected rows)
    pub fn selected() -> Style {
        Style::default()
            .bg(colors().selection)
            .fg(colors().text)
            .bold()
    }

    /// Border style (unfocused)
    pub fn border() -> Style {
        Style::default().fg(colors().border)
    }

    /// Border style (focused)
    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    /// Status bar background style
    pub fn status_bar() -> Style {
        Style::default().bg(colors().background_alt)
    }

    /// Keyboard shortcut style
    pub fn shortcut_key() -> Style {
        Style::default().fg(colors().accent)
    }

    /// Shortcut description style
    pub fn shortcut_desc() -> Style {
        Style::default().fg(colors().text_muted)
    }

    /// Success style
    pub fn success() -> Style {
        Style::default().fg(colors().success)
    }

    /// Warning style
    pub fn warning() -> Style {
        Style::default().fg(colors().warning)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default().fg(colors().error)
    }
}

// ============================================================================
// Badge Rendering Helpers
// ============================================================================

/// Badge for a category with no findings (the check mark state)
pub fn clean_badge() -> Span<'static> {
    let scheme = colors();
    Span::styled(
        " ✓ clean ",
        Style::default()
            .fg(scheme.badge_fg_dark)
            .bg(scheme.success)
            .bold(),
    )
}

/// Badge for a category with findings (the warning state)
pub fn findings_badge(count: usize) -> Span<'static> {
    let scheme = colors();
    Span::styled(
        format!(" ⚠ {count} "),
        Style::default()
            .fg(scheme.badge_fg_dark)
            .bg(scheme.warning)
            .bold(),
    )
}

/// Category label badge colored by category
pub fn category_badge(category: Category) -> Span<'static> {
    let scheme = colors();
    let fg = match category {
        Category::Seo => scheme.badge_fg_dark,
        Category::Grc | Category::Ux => scheme.badge_fg_light,
    };
    Span::styled(
        format!(" {} ", category.label()),
        Style::default()
            .fg(fg)
            .bg(scheme.category_color(category))
            .bold(),
    )
}

// ============================================================================
// Footer Hints
// ============================================================================

/// Context-specific footer hints
pub struct FooterHints;

impl FooterHints {
    /// Hints for the main results view
    pub fn results() -> Vec<(&'static str, &'static str)> {
        vec![
            ("↑↓/jk", "navigate"),
            ("1-3", "toggle section"),
            ("i", "details"),
            ("v", "video"),
            ("s", "smartview"),
            ("r", "report"),
            ("T", "theme"),
            ("?", "help"),
            ("q", "quit"),
        ]
    }

    /// Hints while a report is being fetched
    pub fn loading() -> Vec<(&'static str, &'static str)> {
        vec![("q", "quit")]
    }

    /// Hints when no report is on screen (waiting or failed)
    pub fn idle() -> Vec<(&'static str, &'static str)> {
        vec![("T", "theme"), ("?", "help"), ("q", "quit")]
    }
}

/// Render footer hints as spans
pub fn render_footer_hints(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{key}]"), Styles::shortcut_key()));
        spans.push(Span::styled((*desc).to_string(), Styles::shortcut_desc()));
    }

    spans
}
