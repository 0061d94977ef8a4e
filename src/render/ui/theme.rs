//! Color theme and styling definitions using ratatui colors

use crate::config::ThemeChoice;
use crate::highlight::Emphasis;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Normal text color (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Whole line containing a launch path
    pub path_line: Style,

    /// Quoted or `<string>` value holding a launch path
    pub path_value: Style,

    /// Border of the focused pane
    pub focused_border: Style,

    /// Border of other panes
    pub border: Style,

    /// Cursor row in lists
    pub selection: Style,

    /// Files marked for deletion
    pub marked: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Warning dialogs and error placeholders
    pub error_text: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None,
            path_line: Style::default().fg(Color::Black).bg(Color::LightYellow),
            path_value: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            focused_border: Style::default().fg(Color::Cyan),
            border: Style::default().fg(Color::DarkGray),
            selection: Style::default().fg(Color::White).bg(Color::Blue),
            marked: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_text: Color::Red,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            path_line: Style::default().add_modifier(Modifier::BOLD),
            path_value: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            focused_border: Style::default().add_modifier(Modifier::BOLD),
            border: Style::default(),
            selection: Style::default().add_modifier(Modifier::REVERSED),
            marked: Style::default().add_modifier(Modifier::UNDERLINED),
            status_bg: Color::Black,
            status_fg: Color::White,
            error_text: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            normal_text: Some(Color::White),
            path_line: Style::default().fg(Color::Black).bg(Color::LightYellow),
            path_value: Style::default()
                .fg(Color::LightYellow)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
            focused_border: Style::default().fg(Color::LightGreen),
            border: Style::default().fg(Color::White),
            selection: Style::default().fg(Color::White).bg(Color::LightBlue),
            marked: Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            status_bg: Color::White,
            status_fg: Color::Black,
            error_text: Color::LightRed,
        }
    }

    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Default => Self::default(),
            ThemeChoice::Monochrome => Self::monochrome(),
            ThemeChoice::HighContrast => Self::high_contrast(),
        }
    }

    pub fn emphasis(&self, emphasis: Emphasis) -> Style {
        match emphasis {
            Emphasis::Line => self.path_line,
            Emphasis::Value => self.path_value,
        }
    }

    pub fn text(&self) -> Style {
        match self.normal_text {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        }
    }
}
