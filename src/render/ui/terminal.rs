//! Terminal UI implementation using ratatui
//!
//! Draws the search bar, results list, the folder/file/preview panes and the status line,
//! then overlays the viewer and any dialog. Holds no application data of its own.

use crate::app::messages::{Dialog, NoticeKind, Preview};
use crate::error::{LaunchmanError, Result};
use crate::highlight::HighlightSpan;
use crate::render::ui::state::{Pane, ScrollView, ViewState};
use crate::render::ui::{ColorTheme, UIRenderer};
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    fn pane_block<'a>(title: impl Into<Line<'a>>, focused: bool, theme: &ColorTheme) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if focused {
                theme.focused_border
            } else {
                theme.border
            })
    }

    fn render_search_bar(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let mut text = vec![Span::styled(view_state.search_input.as_str(), theme.text())];
        if view_state.editing_search {
            text.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
        } else if view_state.search_input.is_empty() {
            text.push(Span::styled(
                "press / to search all folders",
                theme.border,
            ));
        }
        let focused = view_state.focus == Pane::Search || view_state.editing_search;
        let paragraph =
            Paragraph::new(Line::from(text)).block(Self::pane_block("Search", focused, theme));
        frame.render_widget(paragraph, area);
    }

    fn render_list(
        frame: &mut Frame,
        area: Rect,
        title: String,
        items: Vec<ListItem>,
        cursor: Option<usize>,
        focused: bool,
        theme: &ColorTheme,
    ) {
        let list = List::new(items)
            .block(Self::pane_block(title, focused, theme))
            .highlight_style(theme.selection);
        let mut state = ListState::default().with_selected(cursor);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_results(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let items: Vec<ListItem> = view_state
            .results
            .items()
            .iter()
            .map(|result| ListItem::new(result.to_string()))
            .collect();
        let title = format!("Search results ({})", items.len());
        Self::render_list(
            frame,
            area,
            title,
            items,
            view_state.results.cursor(),
            view_state.focus == Pane::Results,
            theme,
        );
    }

    fn render_folders(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let items: Vec<ListItem> = view_state
            .folders
            .items()
            .iter()
            .map(|folder| ListItem::new(folder.as_str()))
            .collect();
        Self::render_list(
            frame,
            area,
            "Folders".to_string(),
            items,
            view_state.folders.cursor(),
            view_state.focus == Pane::Folders,
            theme,
        );
    }

    fn render_files(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let items: Vec<ListItem> = view_state
            .files
            .items()
            .iter()
            .map(|name| {
                if view_state.marked.contains(name) {
                    ListItem::new(format!("* {}", name)).style(theme.marked)
                } else {
                    ListItem::new(format!("  {}", name))
                }
            })
            .collect();
        Self::render_list(
            frame,
            area,
            "Files".to_string(),
            items,
            view_state.files.cursor(),
            view_state.focus == Pane::Files,
            theme,
        );
    }

    /// Visible lines of a scroll view, styled with their highlight spans.
    fn document_lines<'a>(view: &'a ScrollView, height: usize, theme: &ColorTheme) -> Vec<Line<'a>> {
        let Some(preview) = view.preview.as_ref() else {
            return Vec::new();
        };
        let base = if preview.document.source.is_error() {
            Style::default().fg(theme.error_text)
        } else {
            theme.text()
        };

        preview
            .lines()
            .enumerate()
            .skip(view.scroll)
            .take(height)
            .map(|(idx, line)| {
                Self::create_highlighted_line_with_theme(line, preview.spans(idx), base, theme)
            })
            .collect()
    }

    /// Split a line into plain and emphasized spans.
    fn create_highlighted_line_with_theme<'a>(
        content: &'a str,
        highlights: &[HighlightSpan],
        base: Style,
        theme: &ColorTheme,
    ) -> Line<'a> {
        if highlights.is_empty() {
            return Line::styled(content, base);
        }

        let mut spans = Vec::new();
        let mut last_end = 0;

        for span in highlights {
            let (start, end) = (span.start.min(content.len()), span.end().min(content.len()));
            if start > last_end {
                spans.push(Span::styled(&content[last_end..start], base));
            }
            if end > start {
                spans.push(Span::styled(&content[start..end], theme.emphasis(span.emphasis)));
            }
            last_end = last_end.max(end);
        }

        if last_end < content.len() {
            spans.push(Span::styled(&content[last_end..], base));
        }

        Line::from(spans)
    }

    fn preview_title(preview: Option<&Preview>, prefix: &str) -> String {
        match preview {
            Some(p) => format!("{}: {}", prefix, p.document.file_name()),
            None => prefix.to_string(),
        }
    }

    fn render_preview(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let height = area.height.saturating_sub(2) as usize;
        let lines = Self::document_lines(&view_state.preview, height, theme);
        let title = Self::preview_title(view_state.preview.preview.as_ref(), "Preview");
        let paragraph = Paragraph::new(lines).block(Self::pane_block(
            title,
            view_state.focus == Pane::Preview,
            theme,
        ));
        frame.render_widget(paragraph, area);
    }

    fn render_viewer(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let area = centered_rect(90, 90, area);
        let height = area.height.saturating_sub(2) as usize;
        let lines = Self::document_lines(&view_state.viewer, height, theme);
        let title = Self::preview_title(view_state.viewer.preview.as_ref(), "File content");
        let block = Self::pane_block(title, true, theme).title_bottom(" Esc/q close ");

        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_dialog(frame: &mut Frame, area: Rect, dialog: &Dialog, theme: &ColorTheme) {
        let area = centered_rect(60, 40, area);
        let (border, footer) = match dialog {
            Dialog::Confirm { .. } => (theme.focused_border, " [y] Yes  [n] No "),
            Dialog::Notice {
                kind: NoticeKind::Warning,
                ..
            } => (Style::default().fg(theme.error_text), " press any key "),
            Dialog::Notice { .. } => (theme.focused_border, " press any key "),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(dialog.title().to_string())
            .title_bottom(footer);
        let paragraph = Paragraph::new(dialog.message().to_string())
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }

    fn render_status_with_data(
        frame: &mut Frame,
        area: Rect,
        view_state: &ViewState,
        theme: &ColorTheme,
    ) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view_state.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }

    fn draw(frame: &mut Frame, view_state: &ViewState, theme: &ColorTheme) {
        let size = frame.size();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(25),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(size);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(25),
                Constraint::Percentage(55),
            ])
            .split(rows[2]);

        Self::render_search_bar(frame, rows[0], view_state, theme);
        Self::render_results(frame, rows[1], view_state, theme);
        Self::render_folders(frame, panes[0], view_state, theme);
        Self::render_files(frame, panes[1], view_state, theme);
        Self::render_preview(frame, panes[2], view_state, theme);
        Self::render_status_with_data(frame, rows[3], view_state, theme);

        if view_state.viewer.is_open() {
            Self::render_viewer(frame, size, view_state, theme);
        }
        if let Some(dialog) = view_state.dialog.as_ref() {
            Self::render_dialog(frame, size, dialog, theme);
        }
    }
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;
            terminal.draw(move |frame| Self::draw(frame, view_state, theme))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        ratatui::crossterm::terminal::size()
            .map_err(|e| LaunchmanError::ui(format!("Failed to query terminal size: {}", e)))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
