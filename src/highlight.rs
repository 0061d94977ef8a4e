//! Line-by-line emphasis of launch paths.
//!
//! [`highlight_line`] is a pure function of one line plus a single line of carried state, so
//! the UI can style text without the highlighter knowing anything about widgets.

use crate::content::WORKING_DIRECTORY_KEY;

/// Path fragments that get a line emphasized, highest priority first.
pub const PATH_MARKERS: [&str; 3] = ["/Applications/", "/Application Support/", "/Library/"];

const STRING_OPEN: &str = "<string>";
const STRING_CLOSE: &str = "</string>";

/// Which rule produced a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// No enclosing value was found, the whole line is emphasized
    Line,
    /// Narrowed to the quoted string or `<string>` element around the path
    Value,
}

/// Byte range `[start, start + len)` within one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub len: usize,
    pub emphasis: Emphasis,
}

impl HighlightSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// State carried from one line to the next.
///
/// Records whether the previous line held the working-directory key. Nothing is styled from
/// it. Lines without a path marker reset it; path lines pass it through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarriedState {
    pub after_working_directory_key: bool,
}

/// Compute emphasis spans for `line` and the state to carry into the next line.
///
/// Only the first matching marker (in [`PATH_MARKERS`] order) is considered per line.
pub fn highlight_line(line: &str, carried: CarriedState) -> (Vec<HighlightSpan>, CarriedState) {
    let Some(start) = PATH_MARKERS.iter().find_map(|marker| line.find(marker)) else {
        let next = CarriedState {
            after_working_directory_key: line.contains(WORKING_DIRECTORY_KEY),
        };
        return (Vec::new(), next);
    };

    let span = enclosing_quotes(line, start)
        .or_else(|| enclosing_string_tag(line, start))
        .map(|(from, to)| HighlightSpan {
            start: from,
            len: to - from,
            emphasis: Emphasis::Value,
        })
        .unwrap_or(HighlightSpan {
            start: 0,
            len: line.len(),
            emphasis: Emphasis::Line,
        });

    (vec![span], carried)
}

/// Spans for every line of `text`, threading the carried state through.
pub fn highlight_text(text: &str) -> Vec<Vec<HighlightSpan>> {
    let mut state = CarriedState::default();
    text.lines()
        .map(|line| {
            let (spans, next) = highlight_line(line, state);
            state = next;
            spans
        })
        .collect()
}

/// Quoted span around `at`, both quotes included.
fn enclosing_quotes(line: &str, at: usize) -> Option<(usize, usize)> {
    let open = line[..at].rfind('"')?;
    let close = at + line[at..].find('"')?;
    Some((open, close + 1))
}

/// `<string>...</string>` element around `at`, both tags included.
fn enclosing_string_tag(line: &str, at: usize) -> Option<(usize, usize)> {
    let open = line[..at].rfind(STRING_OPEN)?;
    let close = at + line[at..].find(STRING_CLOSE)?;
    Some((open, close + STRING_CLOSE.len()))
}
