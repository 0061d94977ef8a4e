//! Application orchestration layer
//!
//! Owns the view state and translates input actions into controller calls. The controller
//! decides what changes; this layer only tracks cursors, focus and scrolling, and applies
//! the returned [`ViewUpdate`]s.

pub mod controller;
pub mod messages;

use crate::app::controller::InteractionController;
use crate::app::messages::{Dialog, ListFocus, OpenRequest, ViewUpdate};
use crate::config::{Settings, DEFAULT_POLL_INTERVAL_MS};
use crate::error::Result;
use crate::input::{InputAction, InputService};
use crate::render::ui::{ListPane, Pane, ScrollView, UIRenderer, ViewState};
use std::time::Duration;

/// Application orchestrator
pub struct Application {
    controller: InteractionController,
    ui_renderer: Box<dyn UIRenderer>,
    view_state: ViewState,
    poll_interval: Duration,
}

impl Application {
    /// Wire the controller to a renderer and show the first folder.
    pub fn new(controller: InteractionController, ui_renderer: Box<dyn UIRenderer>) -> Result<Self> {
        let (width, height) = ui_renderer.get_terminal_size()?;
        let folders = controller
            .directories()
            .iter()
            .map(|path| Settings::display_directory(path))
            .collect();

        let mut view_state = ViewState::new(folders, width, height);
        if !controller.directories().is_empty() {
            view_state.apply(controller.select_folder(0));
        }

        Ok(Self {
            controller,
            ui_renderer,
            view_state,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        })
    }

    pub fn from_settings(settings: &Settings, ui_renderer: Box<dyn UIRenderer>) -> Result<Self> {
        let mut app = Self::new(InteractionController::from_settings(settings), ui_renderer)?;
        app.poll_interval = settings.poll_interval();
        Ok(app)
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Run the event loop until the user quits.
    pub async fn run(&mut self, input: &mut InputService) -> Result<()> {
        self.ui_renderer.initialize()?;
        let outcome = self.event_loop(input).await;
        self.ui_renderer.cleanup()?;
        outcome
    }

    async fn event_loop(&mut self, input: &mut InputService) -> Result<()> {
        loop {
            self.ui_renderer.render(&self.view_state)?;
            input.sync_state(self.view_state.input_state());

            let Some(action) = input.poll_action(Some(self.poll_interval))? else {
                continue;
            };
            log::trace!("input action: {:?}", action);

            if !self.handle_action(action).await {
                return Ok(());
            }
        }
    }

    /// Handle one input action. Returns false when the application should quit.
    pub async fn handle_action(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::Quit => return false,
            InputAction::Resize { width, height } => {
                self.view_state.update_terminal_size(width, height);
            }
            InputAction::Dismiss => {
                if self.view_state.dialog.take().is_none() {
                    self.view_state.viewer.clear();
                }
            }
            InputAction::Confirm(accepted) => {
                if let Some(Dialog::Confirm { action, .. }) = self.view_state.dialog.take() {
                    if accepted {
                        let update = self.controller.execute(action);
                        self.apply(update);
                    }
                }
            }
            InputAction::StartSearch => self.start_search(),
            InputAction::UpdateSearchBuffer(buffer) => self.view_state.search_input = buffer,
            InputAction::SubmitSearch(term) => self.submit_search(term),
            InputAction::CancelSearch => {
                self.view_state.editing_search = false;
                self.view_state.search_input.clear();
            }
            InputAction::FocusNext => self.view_state.focus = self.view_state.focus.next(),
            InputAction::FocusPrevious => self.view_state.focus = self.view_state.focus.previous(),
            InputAction::ToggleMark => {
                if self.view_state.focus == Pane::Files {
                    self.view_state.toggle_mark();
                }
            }
            InputAction::Activate => self.activate().await,
            InputAction::Open => self.open().await,
            InputAction::Delete => {
                let update = self.controller.request_delete(
                    self.view_state.current_folder(),
                    self.view_state.delete_targets(),
                );
                self.apply(update);
            }
            InputAction::Refresh => {
                let update = self.controller.refresh(self.view_state.current_folder());
                self.apply(update);
                self.view_state.status_line.set_message("Refreshed".to_string());
            }
            InputAction::MoveUp
            | InputAction::MoveDown
            | InputAction::PageUp
            | InputAction::PageDown
            | InputAction::GoToStart
            | InputAction::GoToEnd => self.navigate(action).await,
            InputAction::NoAction | InputAction::InvalidInput => {}
        }
        true
    }

    fn apply(&mut self, update: ViewUpdate) {
        if !update.is_empty() {
            self.view_state.apply(update);
        }
    }

    fn start_search(&mut self) {
        self.view_state.editing_search = true;
        self.view_state.search_input.clear();
        self.view_state.focus = Pane::Search;
    }

    fn submit_search(&mut self, term: String) {
        self.view_state.editing_search = false;
        let update = self.controller.submit_search(&term);
        self.view_state.search_input = term;
        self.apply(update);

        let found = self.view_state.results.items().len();
        self.view_state
            .status_line
            .set_message(format!("{} match(es)", found));
        if found > 0 {
            self.view_state.focus = Pane::Results;
        }
    }

    async fn activate(&mut self) {
        match self.view_state.focus {
            Pane::Search => self.start_search(),
            Pane::Folders => {
                let update = self.controller.select_folder(self.view_state.current_folder());
                self.apply(update);
            }
            Pane::Results => {
                if let Some(result) = self.view_state.results.selected().cloned() {
                    let update = self.controller.select_search_result(&result).await;
                    self.apply(update);
                    self.view_state.focus = Pane::Files;
                }
            }
            Pane::Files => self.open().await,
            Pane::Preview => {}
        }
    }

    async fn open(&mut self) {
        let focus = match self.view_state.focus {
            Pane::Results => ListFocus::SearchResults,
            Pane::Files => ListFocus::Files,
            _ => ListFocus::Other,
        };
        let request = OpenRequest {
            focus,
            search_result: self.view_state.results.selected().cloned(),
            file: self
                .view_state
                .current_file()
                .map(|name| (self.view_state.current_folder(), name.clone())),
        };
        let update = self.controller.open(request).await;
        self.apply(update);
    }

    async fn navigate(&mut self, action: InputAction) {
        let page = self.view_state.lines_per_page();
        self.view_state.status_line.clear_message();

        if self.view_state.viewer.is_open() {
            scroll(&mut self.view_state.viewer, &action, page);
            return;
        }

        match self.view_state.focus {
            Pane::Search => {}
            Pane::Preview => scroll(&mut self.view_state.preview, &action, page),
            Pane::Folders => {
                if move_cursor(&mut self.view_state.folders, &action, page) {
                    let update = self.controller.select_folder(self.view_state.current_folder());
                    self.apply(update);
                }
            }
            Pane::Files => {
                if move_cursor(&mut self.view_state.files, &action, page) {
                    if let Some(name) = self.view_state.current_file().cloned() {
                        let update = self
                            .controller
                            .select_file(self.view_state.current_folder(), &name)
                            .await;
                        self.apply(update);
                    }
                }
            }
            Pane::Results => {
                if move_cursor(&mut self.view_state.results, &action, page) {
                    if let Some(result) = self.view_state.results.selected().cloned() {
                        let update = self.controller.select_search_result(&result).await;
                        self.apply(update);
                    }
                }
            }
        }
    }
}

/// Move a list cursor. Returns whether the selection changed.
fn move_cursor<T>(pane: &mut ListPane<T>, action: &InputAction, page: usize) -> bool {
    let page = page as isize;
    match action {
        InputAction::MoveUp => pane.move_by(-1),
        InputAction::MoveDown => pane.move_by(1),
        InputAction::PageUp => pane.move_by(-page),
        InputAction::PageDown => pane.move_by(page),
        InputAction::GoToStart => pane.move_to_start(),
        InputAction::GoToEnd => pane.move_to_end(),
        _ => false,
    }
}

fn scroll(view: &mut ScrollView, action: &InputAction, page: usize) {
    let page = page as isize;
    match action {
        InputAction::MoveUp => view.scroll_by(-1),
        InputAction::MoveDown => view.scroll_by(1),
        InputAction::PageUp => view.scroll_by(-page),
        InputAction::PageDown => view.scroll_by(page),
        InputAction::GoToStart => view.scroll_to_start(),
        InputAction::GoToEnd => view.scroll_to_end(),
        _ => {}
    }
}
