//! Values exchanged between the interaction controller and the view.
//!
//! Controller handlers never touch widgets. Each one returns a [`ViewUpdate`] describing what
//! the view should change; the view applies it.

use crate::content::RenderedDocument;
use crate::highlight::{highlight_text, HighlightSpan};
use crate::search::SearchResult;

/// Rendered text plus its emphasis spans and the line to scroll to.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub document: RenderedDocument,
    /// One entry per line of `document.text`
    pub highlights: Vec<Vec<HighlightSpan>>,
    pub scroll_to_line: Option<usize>,
}

impl Preview {
    pub fn new(document: RenderedDocument) -> Self {
        let highlights = highlight_text(&document.text);
        let scroll_to_line = document.highlight_line();
        Self {
            document,
            highlights,
            scroll_to_line,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.document.text.lines()
    }

    pub fn line_count(&self) -> usize {
        self.highlights.len()
    }

    pub fn spans(&self, line: usize) -> &[HighlightSpan] {
        self.highlights.get(line).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Severity of a notice dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// Work that waits for a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Delete {
        folder_index: usize,
        file_names: Vec<String>,
    },
}

/// Modal dialogs the view must show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Notice {
        kind: NoticeKind,
        title: String,
        message: String,
    },
    Confirm {
        title: String,
        message: String,
        action: PendingAction,
    },
}

impl Dialog {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Notice {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Notice {
            kind: NoticeKind::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Dialog::Notice { title, .. } | Dialog::Confirm { title, .. } => title,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Dialog::Notice { message, .. } | Dialog::Confirm { message, .. } => message,
        }
    }
}

/// What to do with the preview pane.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PreviewUpdate {
    #[default]
    Keep,
    Clear,
    Show(Preview),
}

/// A set of view changes produced by one controller handler. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewUpdate {
    pub folder_selection: Option<usize>,
    /// Replaces the file pane contents
    pub file_list: Option<Vec<String>>,
    /// File to put the cursor on after `file_list` is applied
    pub file_selection: Option<String>,
    pub preview: PreviewUpdate,
    pub search_results: Option<Vec<SearchResult>>,
    pub clear_search_input: bool,
    /// Opens the full-content viewer
    pub viewer: Option<Preview>,
    pub dialog: Option<Dialog>,
}

impl ViewUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_dialog(dialog: Dialog) -> Self {
        Self {
            dialog: Some(dialog),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Which list had focus when "open" was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFocus {
    SearchResults,
    Files,
    Other,
}

/// Selection state handed to the controller's open handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub focus: ListFocus,
    pub search_result: Option<SearchResult>,
    /// `(folder_index, file_name)` under the file cursor
    pub file: Option<(usize, String)>,
}
