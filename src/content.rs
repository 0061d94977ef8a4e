//! Content rendering for the preview pane and the viewer.
//!
//! Rendering never fails: the result is converted text, the raw file decoded as UTF-8, or a
//! readable placeholder explaining what went wrong. [`locate_highlight_target`] finds where
//! the view should scroll to on first display.

pub mod converter;

pub use converter::{Converter, PlutilConverter};

use std::path::{Path, PathBuf};

/// Application paths that mark the interesting part of a launch item, highest priority first.
pub const HIGHLIGHT_TARGETS: [&str; 2] = ["/Applications/", "/Application Support/"];

/// Fallback scroll target when no application path is present.
pub const WORKING_DIRECTORY_KEY: &str = "<key>WorkingDirectory</key>";

/// Where the text of a [`RenderedDocument`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// Output of the external converter
    Converted,
    /// The converter failed; file read directly as UTF-8
    RawText,
    /// The file no longer exists
    Missing,
    /// Neither conversion nor direct read worked; text is an error message
    Unreadable,
}

impl ContentSource {
    pub fn is_error(self) -> bool {
        matches!(self, ContentSource::Missing | ContentSource::Unreadable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub source_path: PathBuf,
    pub text: String,
    pub source: ContentSource,
}

impl RenderedDocument {
    /// Byte offset of the first highlight target, if any.
    pub fn highlight_target(&self) -> Option<usize> {
        locate_highlight_target(&self.text)
    }

    /// Zero-based line holding the highlight target.
    pub fn highlight_line(&self) -> Option<usize> {
        self.highlight_target()
            .map(|offset| line_of_offset(&self.text, offset))
    }

    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string()
    }
}

/// Converts files to text through a [`Converter`], falling back to a direct read.
pub struct ContentRenderer {
    converter: Box<dyn Converter>,
}

impl ContentRenderer {
    pub fn new(converter: Box<dyn Converter>) -> Self {
        Self { converter }
    }

    /// Renderer backed by the system `plutil`.
    pub fn plutil() -> Self {
        Self::new(Box::new(PlutilConverter::default()))
    }

    /// Produce display text for `path`. Never returns an error.
    pub async fn render(&self, path: &Path) -> RenderedDocument {
        let (text, source) = self.render_text(path).await;
        RenderedDocument {
            source_path: path.to_path_buf(),
            text,
            source,
        }
    }

    async fn render_text(&self, path: &Path) -> (String, ContentSource) {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return (
                format!("File does not exist: {}", path.display()),
                ContentSource::Missing,
            );
        }

        match self.converter.convert(path).await {
            Ok(text) => return (text, ContentSource::Converted),
            Err(err) => log::debug!("falling back to raw read for {}: {}", path.display(), err),
        }

        match tokio::fs::read_to_string(path).await {
            Ok(text) => (text, ContentSource::RawText),
            Err(err) => (
                format!("Unable to read file content: {}", err),
                ContentSource::Unreadable,
            ),
        }
    }
}

/// Offset of the first application path in priority order, else of the working directory key.
pub fn locate_highlight_target(text: &str) -> Option<usize> {
    HIGHLIGHT_TARGETS
        .iter()
        .find_map(|target| text.find(target))
        .or_else(|| text.find(WORKING_DIRECTORY_KEY))
}

/// Zero-based line number containing byte `offset`.
pub fn line_of_offset(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count()
}
