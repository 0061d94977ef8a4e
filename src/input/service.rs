//! High-level input service.
//!
//! Reads terminal events, runs the key-binding state machine, and yields domain-level
//! `InputAction`s for the application loop.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Current input mode. The application keeps this in sync with what is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// Moving around the panes
    #[default]
    Browse,
    /// Typing into the search box
    SearchInput,
    /// Full-content viewer is open
    Viewer,
    /// Yes/no dialog is open
    Confirm,
    /// Informational dialog is open
    Notice,
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToStart,
    GoToEnd,
    FocusNext,
    FocusPrevious,
    /// Enter on the focused list item
    Activate,
    /// Mark or unmark the file under the cursor for deletion
    ToggleMark,
    StartSearch,
    UpdateSearchBuffer(String),
    SubmitSearch(String),
    CancelSearch,
    Open,
    Delete,
    Refresh,
    Confirm(bool),
    Dismiss,
    Quit,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
    InvalidInput,
}

/// Key-binding state machine.
pub struct InputStateMachine {
    state: InputState,
    search_buffer: String,
}

fn plain(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Browse,
            search_buffer: String::new(),
        }
    }

    /// Adopt the mode the view is actually in (a dialog may have opened, etc.).
    pub fn sync_state(&mut self, state: InputState) {
        if state != InputState::SearchInput {
            self.search_buffer.clear();
        }
        self.state = state;
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        let (code, modifiers) = (key_event.code, key_event.modifiers);
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return match self.state {
                InputState::SearchInput => {
                    self.state = InputState::Browse;
                    self.search_buffer.clear();
                    InputAction::CancelSearch
                }
                _ => InputAction::Quit,
            };
        }

        match self.state {
            InputState::Browse => self.browse_key(code, modifiers),
            InputState::SearchInput => self.search_key(code, modifiers),
            InputState::Viewer => match code {
                KeyCode::Esc | KeyCode::Char('q') => InputAction::Dismiss,
                _ => Self::scroll_key(code, modifiers),
            },
            InputState::Confirm => match code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    InputAction::Confirm(true)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    InputAction::Confirm(false)
                }
                _ => InputAction::InvalidInput,
            },
            InputState::Notice => InputAction::Dismiss,
        }
    }

    fn scroll_key(code: KeyCode, modifiers: KeyModifiers) -> InputAction {
        match code {
            KeyCode::Char('j') | KeyCode::Down if plain(modifiers) => InputAction::MoveDown,
            KeyCode::Char('k') | KeyCode::Up if plain(modifiers) => InputAction::MoveUp,
            KeyCode::Char('f') | KeyCode::PageDown => InputAction::PageDown,
            KeyCode::Char('b') | KeyCode::PageUp => InputAction::PageUp,
            KeyCode::Char('g') | KeyCode::Home => InputAction::GoToStart,
            KeyCode::Char('G') | KeyCode::End => InputAction::GoToEnd,
            _ => InputAction::InvalidInput,
        }
    }

    fn browse_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputAction {
        match code {
            KeyCode::Tab => InputAction::FocusNext,
            KeyCode::BackTab => InputAction::FocusPrevious,
            KeyCode::Enter => InputAction::Activate,
            KeyCode::Delete => InputAction::Delete,
            KeyCode::Char(' ') if plain(modifiers) => InputAction::ToggleMark,
            KeyCode::Char('/') if plain(modifiers) => {
                self.state = InputState::SearchInput;
                self.search_buffer.clear();
                InputAction::StartSearch
            }
            KeyCode::Char('o') if plain(modifiers) => InputAction::Open,
            KeyCode::Char('d') if plain(modifiers) => InputAction::Delete,
            KeyCode::Char('r') if plain(modifiers) => InputAction::Refresh,
            KeyCode::Char('q') if plain(modifiers) => InputAction::Quit,
            _ => Self::scroll_key(code, modifiers),
        }
    }

    fn search_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputAction {
        match code {
            KeyCode::Char(ch) if plain(modifiers) => {
                self.search_buffer.push(ch);
                InputAction::UpdateSearchBuffer(self.search_buffer.clone())
            }
            KeyCode::Backspace => {
                self.search_buffer.pop();
                InputAction::UpdateSearchBuffer(self.search_buffer.clone())
            }
            KeyCode::Enter => {
                self.state = InputState::Browse;
                InputAction::SubmitSearch(std::mem::take(&mut self.search_buffer))
            }
            KeyCode::Esc => {
                self.state = InputState::Browse;
                self.search_buffer.clear();
                InputAction::CancelSearch
            }
            _ => InputAction::InvalidInput,
        }
    }

    pub fn get_search_buffer(&self) -> &str {
        &self.search_buffer
    }

    pub fn get_state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            state_machine: InputStateMachine::new(),
        }
    }

    pub fn sync_state(&mut self, state: InputState) {
        self.state_machine.sync_state(state);
    }

    /// Wait up to `timeout` for one terminal event and translate it.
    pub fn poll_action(&mut self, timeout: Option<Duration>) -> Result<Option<InputAction>> {
        let timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(self.process_event(event::read()?))
    }

    pub fn process_event(&mut self, event: Event) -> Option<InputAction> {
        let action = match event {
            Event::Key(key_event) => self.state_machine.handle_key_event(key_event),
            Event::Resize(width, height) => InputAction::Resize { width, height },
            _ => InputAction::NoAction,
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event(code: KeyCode) -> Event {
        Event::Key(key(code))
    }

    #[test]
    fn test_browse_bindings() {
        let mut sm = InputStateMachine::new();
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('j'))), InputAction::MoveDown);
        assert_eq!(sm.handle_key_event(key(KeyCode::Up)), InputAction::MoveUp);
        assert_eq!(sm.handle_key_event(key(KeyCode::Tab)), InputAction::FocusNext);
        assert_eq!(sm.handle_key_event(key(KeyCode::Char(' '))), InputAction::ToggleMark);
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('o'))), InputAction::Open);
        assert_eq!(sm.handle_key_event(key(KeyCode::Delete)), InputAction::Delete);
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('r'))), InputAction::Refresh);
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('q'))), InputAction::Quit);
        assert_eq!(
            sm.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
    }

    #[test]
    fn test_search_typing_and_submit() {
        let mut sm = InputStateMachine::new();
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('/'))), InputAction::StartSearch);
        assert_eq!(sm.get_state(), InputState::SearchInput);

        // 'q' is text while typing, not quit
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('q'))),
            InputAction::UpdateSearchBuffer("q".to_string())
        );
        sm.handle_key_event(key(KeyCode::Char('x')));
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Backspace)),
            InputAction::UpdateSearchBuffer("q".to_string())
        );
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Enter)),
            InputAction::SubmitSearch("q".to_string())
        );
        assert_eq!(sm.get_state(), InputState::Browse);
        assert_eq!(sm.get_search_buffer(), "");
    }

    #[test]
    fn test_search_cancel() {
        let mut sm = InputStateMachine::new();
        sm.handle_key_event(key(KeyCode::Char('/')));
        sm.handle_key_event(key(KeyCode::Char('a')));
        assert_eq!(sm.handle_key_event(key(KeyCode::Esc)), InputAction::CancelSearch);
        assert_eq!(sm.get_state(), InputState::Browse);
    }

    #[test]
    fn test_confirm_and_notice_modes() {
        let mut sm = InputStateMachine::new();
        sm.sync_state(InputState::Confirm);
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('y'))), InputAction::Confirm(true));
        assert_eq!(sm.handle_key_event(key(KeyCode::Esc)), InputAction::Confirm(false));
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('x'))), InputAction::InvalidInput);

        sm.sync_state(InputState::Notice);
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('x'))), InputAction::Dismiss);
    }

    #[test]
    fn test_viewer_mode() {
        let mut sm = InputStateMachine::new();
        sm.sync_state(InputState::Viewer);
        assert_eq!(sm.handle_key_event(key(KeyCode::PageDown)), InputAction::PageDown);
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('o'))), InputAction::InvalidInput);
        assert_eq!(sm.handle_key_event(key(KeyCode::Esc)), InputAction::Dismiss);
    }

    #[test]
    fn test_sync_state_clears_search_buffer() {
        let mut sm = InputStateMachine::new();
        sm.handle_key_event(key(KeyCode::Char('/')));
        sm.handle_key_event(key(KeyCode::Char('a')));
        sm.sync_state(InputState::Notice);
        assert_eq!(sm.get_search_buffer(), "");
    }

    #[test]
    fn test_service_filters_invalid_input() {
        let mut service = InputService::new();
        assert_eq!(service.process_event(key_event(KeyCode::F(5))), None);
        assert_eq!(
            service.process_event(key_event(KeyCode::Char('j'))),
            Some(InputAction::MoveDown)
        );
        assert_eq!(
            service.process_event(Event::Resize(100, 40)),
            Some(InputAction::Resize {
                width: 100,
                height: 40
            })
        );
        assert_eq!(service.process_event(Event::FocusGained), None);
    }
}
