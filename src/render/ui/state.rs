//! UI state management structures
//!
//! `ViewState` is everything the terminal renderer draws. It is changed only by applying
//! controller [`ViewUpdate`]s and by cursor/scroll movement.

use crate::app::messages::{Dialog, Preview, PreviewUpdate, ViewUpdate};
use crate::input::InputState;
use crate::search::SearchResult;
use std::collections::BTreeSet;

/// Lines kept visible above an auto-scroll target.
pub const SCROLL_CONTEXT_LINES: usize = 3;

/// Focusable areas, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    Search,
    Results,
    #[default]
    Folders,
    Files,
    Preview,
}

impl Pane {
    const ORDER: [Pane; 5] = [
        Pane::Search,
        Pane::Results,
        Pane::Folders,
        Pane::Files,
        Pane::Preview,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn next(self) -> Pane {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Pane {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            Pane::Search => "Search",
            Pane::Results => "Search results",
            Pane::Folders => "Folders",
            Pane::Files => "Files",
            Pane::Preview => "Preview",
        }
    }
}

/// A list with an optional cursor.
#[derive(Debug, Clone)]
pub struct ListPane<T> {
    items: Vec<T>,
    cursor: Option<usize>,
}

impl<T> Default for ListPane<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
        }
    }
}

impl<T> ListPane<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            cursor: None,
        }
    }

    /// Replace the items; the cursor is dropped.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.cursor = None;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn selected(&self) -> Option<&T> {
        self.cursor.and_then(|i| self.items.get(i))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() || self.cursor == Some(index) {
            return false;
        }
        self.cursor = Some(index);
        true
    }

    /// Move by `delta` rows, clamped to the list. Returns whether the cursor changed.
    /// Without a cursor any movement lands on the first row.
    pub fn move_by(&mut self, delta: isize) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let last = self.items.len() - 1;
        let target = match self.cursor {
            None => 0,
            Some(current) => current.saturating_add_signed(delta).min(last),
        };
        let changed = self.cursor != Some(target);
        self.cursor = Some(target);
        changed
    }

    pub fn move_to_start(&mut self) -> bool {
        !self.items.is_empty() && self.select(0)
    }

    pub fn move_to_end(&mut self) -> bool {
        !self.items.is_empty() && self.select(self.items.len() - 1)
    }
}

/// A scrollable, highlighted document (preview pane or viewer).
#[derive(Debug, Clone, Default)]
pub struct ScrollView {
    pub preview: Option<Preview>,
    pub scroll: usize,
}

impl ScrollView {
    /// Show a document, scrolled to its highlight target.
    pub fn show(&mut self, preview: Preview) {
        self.scroll = preview
            .scroll_to_line
            .map(|line| line.saturating_sub(SCROLL_CONTEXT_LINES))
            .unwrap_or(0);
        self.preview = Some(preview);
    }

    pub fn clear(&mut self) {
        self.preview = None;
        self.scroll = 0;
    }

    pub fn is_open(&self) -> bool {
        self.preview.is_some()
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self
            .preview
            .as_ref()
            .map(|p| p.line_count().saturating_sub(1))
            .unwrap_or(0);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    pub fn scroll_to_start(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll_by(isize::MAX);
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn format_status_line(&self, focus: Pane, folder: &str, files: usize, marked: usize) -> String {
        let mut status = format!("{} | {} | {} file(s)", focus.title(), folder, files);
        if marked > 0 {
            status.push_str(&format!(" | {} marked", marked));
        }
        if let Some(ref message) = self.message {
            status.push_str(" | ");
            status.push_str(message);
        }
        status
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug)]
pub struct ViewState {
    pub folders: ListPane<String>,
    pub files: ListPane<String>,
    /// File names marked for deletion in the current folder
    pub marked: BTreeSet<String>,
    pub results: ListPane<SearchResult>,
    pub search_input: String,
    pub editing_search: bool,
    pub preview: ScrollView,
    pub viewer: ScrollView,
    pub dialog: Option<Dialog>,
    pub focus: Pane,
    pub status_line: StatusLine,
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(folders: Vec<String>, viewport_width: u16, viewport_height: u16) -> Self {
        let mut folder_pane = ListPane::new(folders);
        folder_pane.move_to_start();
        Self {
            folders: folder_pane,
            files: ListPane::default(),
            marked: BTreeSet::new(),
            results: ListPane::default(),
            search_input: String::new(),
            editing_search: false,
            preview: ScrollView::default(),
            viewer: ScrollView::default(),
            dialog: None,
            focus: Pane::default(),
            status_line: StatusLine::new(),
            viewport_width,
            viewport_height,
        }
    }

    pub fn current_folder(&self) -> usize {
        self.folders.cursor().unwrap_or(0)
    }

    pub fn current_folder_name(&self) -> &str {
        self.folders.selected().map(String::as_str).unwrap_or("")
    }

    pub fn current_file(&self) -> Option<&String> {
        self.files.selected()
    }

    /// Files to delete: the marked ones in list order, else the one under the cursor.
    pub fn delete_targets(&self) -> Vec<String> {
        if self.marked.is_empty() {
            return self.current_file().cloned().into_iter().collect();
        }
        self.files
            .items()
            .iter()
            .filter(|name| self.marked.contains(*name))
            .cloned()
            .collect()
    }

    pub fn toggle_mark(&mut self) {
        if let Some(name) = self.files.selected().cloned() {
            if !self.marked.remove(&name) {
                self.marked.insert(name);
            }
        }
    }

    /// The input mode implied by what is currently on screen.
    pub fn input_state(&self) -> InputState {
        match &self.dialog {
            Some(Dialog::Confirm { .. }) => InputState::Confirm,
            Some(Dialog::Notice { .. }) => InputState::Notice,
            None if self.viewer.is_open() => InputState::Viewer,
            None if self.editing_search => InputState::SearchInput,
            None => InputState::Browse,
        }
    }

    /// Apply a controller update.
    pub fn apply(&mut self, update: ViewUpdate) {
        if let Some(index) = update.folder_selection {
            self.folders.select(index);
        }
        if let Some(names) = update.file_list {
            self.files.set_items(names);
            self.marked.clear();
        }
        if let Some(name) = update.file_selection {
            if let Some(index) = self.files.items().iter().position(|n| *n == name) {
                self.files.select(index);
            }
        }
        match update.preview {
            PreviewUpdate::Keep => {}
            PreviewUpdate::Clear => self.preview.clear(),
            PreviewUpdate::Show(preview) => self.preview.show(preview),
        }
        if let Some(results) = update.search_results {
            self.results.set_items(results);
        }
        if update.clear_search_input {
            self.search_input.clear();
        }
        if let Some(viewer) = update.viewer {
            self.viewer.show(viewer);
        }
        if let Some(dialog) = update.dialog {
            self.dialog = Some(dialog);
        }
    }

    /// Rows of document text visible in the preview pane (rough, for paging).
    pub fn lines_per_page(&self) -> usize {
        (self.viewport_height as usize / 2).max(1)
    }

    /// Update terminal dimensions. Returns true if they actually changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        self.viewport_width = width;
        self.viewport_height = height;
        changed
    }

    pub fn format_status_line(&self) -> String {
        self.status_line.format_status_line(
            self.focus,
            self.current_folder_name(),
            self.files.items().len(),
            self.marked.len(),
        )
    }
}
