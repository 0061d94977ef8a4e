//! Interaction controller.
//!
//! Owns the directory catalog, the current catalog snapshot, its search index and the
//! content renderer. Every handler takes the selection it needs as arguments and returns a
//! [`ViewUpdate`]; no error escapes a handler.

use crate::app::messages::{
    Dialog, ListFocus, OpenRequest, PendingAction, Preview, PreviewUpdate, ViewUpdate,
};
use crate::catalog::{delete_files, Catalog, DirectoryCatalog};
use crate::config::Settings;
use crate::content::{ContentRenderer, PlutilConverter};
use crate::error::LaunchmanError;
use crate::search::{SearchIndex, SearchResult};
use std::path::{Path, PathBuf};

pub struct InteractionController {
    directories: DirectoryCatalog,
    catalog: Catalog,
    index: SearchIndex,
    renderer: ContentRenderer,
}

impl InteractionController {
    /// Build the controller and take the first catalog snapshot.
    pub fn new(directories: DirectoryCatalog, renderer: ContentRenderer) -> Self {
        let mut controller = Self {
            directories,
            catalog: Catalog::default(),
            index: SearchIndex::default(),
            renderer,
        };
        controller.load_all();
        controller
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            DirectoryCatalog::new(settings.directories.clone()),
            ContentRenderer::new(Box::new(PlutilConverter::new(&settings.converter))),
        )
    }

    pub fn directories(&self) -> &[PathBuf] {
        self.directories.list_directories()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace the catalog snapshot and its index.
    pub fn load_all(&mut self) {
        self.catalog = self.directories.load_all();
        self.index = SearchIndex::build(&self.catalog);
        log::debug!(
            "catalog loaded: {} files in {} folders",
            self.catalog.len(),
            self.catalog.folder_count()
        );
    }

    pub fn search(&self, term: &str) -> Vec<SearchResult> {
        self.index.search(term)
    }

    /// Re-list one folder and clear the preview.
    pub fn select_folder(&self, folder_index: usize) -> ViewUpdate {
        let mut update = ViewUpdate {
            folder_selection: Some(folder_index),
            preview: PreviewUpdate::Clear,
            ..ViewUpdate::default()
        };

        match self.directories.list_files(folder_index) {
            Ok(names) => update.file_list = Some(names),
            Err(err) => {
                update.file_list = Some(Vec::new());
                update.dialog = Some(listing_warning(err));
            }
        }
        update
    }

    /// Preview one file of a folder.
    pub async fn select_file(&self, folder_index: usize, file_name: &str) -> ViewUpdate {
        let Some(folder) = self.directories.directory(folder_index) else {
            return ViewUpdate::none();
        };
        let preview = self.preview(&folder.join(file_name)).await;
        ViewUpdate {
            preview: PreviewUpdate::Show(preview),
            ..ViewUpdate::default()
        }
    }

    pub fn submit_search(&self, term: &str) -> ViewUpdate {
        ViewUpdate {
            search_results: Some(self.search(term)),
            ..ViewUpdate::default()
        }
    }

    /// Jump to a search result: reselect its folder and file and preview it.
    pub async fn select_search_result(&self, result: &SearchResult) -> ViewUpdate {
        let mut update = self.select_folder(result.folder_index);

        let listed = update
            .file_list
            .as_ref()
            .is_some_and(|names| names.iter().any(|name| *name == result.file_name));
        if listed {
            update.file_selection = Some(result.file_name.clone());
            update.preview = PreviewUpdate::Show(self.preview(&result.file_path()).await);
        }
        update
    }

    /// Open the full viewer for whichever list the user was working in.
    pub async fn open(&self, request: OpenRequest) -> ViewUpdate {
        let path = match (&request.focus, &request.search_result, &request.file) {
            (ListFocus::SearchResults, Some(result), _) => result.file_path(),
            (_, _, Some((folder_index, file_name))) => {
                match self.directories.directory(*folder_index) {
                    Some(folder) => folder.join(file_name),
                    None => return ViewUpdate::none(),
                }
            }
            _ => {
                return ViewUpdate::with_dialog(Dialog::info(
                    "Notice",
                    "Please select a file to open first.",
                ))
            }
        };

        if !path.exists() {
            return ViewUpdate::with_dialog(Dialog::warning(
                "Warning",
                format!("File does not exist: {}", path.display()),
            ));
        }

        ViewUpdate {
            viewer: Some(self.preview(&path).await),
            ..ViewUpdate::default()
        }
    }

    /// Ask for confirmation before deleting.
    pub fn request_delete(&self, folder_index: usize, file_names: Vec<String>) -> ViewUpdate {
        if file_names.is_empty() {
            return ViewUpdate::with_dialog(Dialog::info(
                "Notice",
                "Please select files to delete first.",
            ));
        }

        ViewUpdate::with_dialog(Dialog::Confirm {
            title: "Confirm deletion".to_string(),
            message: format!("Delete the {} selected file(s)?", file_names.len()),
            action: PendingAction::Delete {
                folder_index,
                file_names,
            },
        })
    }

    /// Run a confirmed action.
    pub fn execute(&mut self, action: PendingAction) -> ViewUpdate {
        match action {
            PendingAction::Delete {
                folder_index,
                file_names,
            } => self.delete(folder_index, &file_names),
        }
    }

    /// Delete files from a folder, refresh everything, and report the outcome.
    pub fn delete(&mut self, folder_index: usize, file_names: &[String]) -> ViewUpdate {
        let Some(folder) = self.directories.directory(folder_index).map(Path::to_path_buf) else {
            return ViewUpdate::with_dialog(Dialog::warning(
                "Delete failed",
                format!("Unknown folder index {}", folder_index),
            ));
        };

        let report = delete_files(&folder, file_names);
        let mut update = self.refresh(folder_index);

        if report.any_deleted() {
            let mut message = format!("Deleted {} file(s).", report.deleted_count());
            if !report.failures.is_empty() {
                message.push_str("\n\nFailed to delete:\n");
                message.push_str(&report.failure_lines().join("\n"));
            }
            update.dialog = Some(Dialog::info("Delete result", message));
        } else {
            let message = format!(
                "No files were deleted.\n\n{}",
                report.failure_lines().join("\n")
            );
            update.dialog = Some(Dialog::warning("Delete failed", message));
        }
        update
    }

    /// Reload the catalog, re-list the current folder and clear the search.
    pub fn refresh(&mut self, current_folder: usize) -> ViewUpdate {
        self.load_all();
        let mut update = self.select_folder(current_folder);
        update.search_results = Some(Vec::new());
        update.clear_search_input = true;
        update
    }

    async fn preview(&self, path: &Path) -> Preview {
        Preview::new(self.renderer.render(path).await)
    }
}

fn listing_warning(err: LaunchmanError) -> Dialog {
    match err {
        LaunchmanError::DirectoryNotFound { path } => Dialog::warning(
            "Warning",
            format!("Folder does not exist: {}", path.display()),
        ),
        LaunchmanError::PermissionDenied { path } => Dialog::warning(
            "Permission denied",
            format!(
                "No permission to access: {}\nRun launchman with elevated privileges to view it.",
                path.display()
            ),
        ),
        other => Dialog::warning("Warning", other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::messages::NoticeKind;
    use crate::content::Converter;
    use crate::error::Result;
    use async_trait::async_trait;
    use std::fs;
    use tempfile::TempDir;

    struct NoConverter;

    #[async_trait]
    impl Converter for NoConverter {
        async fn convert(&self, _path: &Path) -> Result<String> {
            Err(LaunchmanError::conversion("not available"))
        }
    }

    fn controller_for(dirs: Vec<PathBuf>) -> InteractionController {
        InteractionController::new(
            DirectoryCatalog::new(dirs),
            ContentRenderer::new(Box::new(NoConverter)),
        )
    }

    #[test]
    fn test_select_missing_folder_warns() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("LaunchDaemons");
        let controller = controller_for(vec![missing.clone()]);

        let update = controller.select_folder(0);
        assert_eq!(update.folder_selection, Some(0));
        assert_eq!(update.file_list, Some(Vec::new()));
        assert_eq!(update.preview, PreviewUpdate::Clear);
        match update.dialog {
            Some(Dialog::Notice { kind, message, .. }) => {
                assert_eq!(kind, NoticeKind::Warning);
                assert_eq!(message, format!("Folder does not exist: {}", missing.display()));
            }
            other => panic!("expected warning, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_open_without_selection_is_informational() {
        let controller = controller_for(Vec::new());
        let update = controller
            .open(OpenRequest {
                focus: ListFocus::Other,
                search_result: None,
                file: None,
            })
            .await;
        assert!(update.viewer.is_none());
        assert!(matches!(
            update.dialog,
            Some(Dialog::Notice {
                kind: NoticeKind::Info,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_open_prefers_search_result_when_focused() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        fs::write(a.path().join("file.plist"), "from a").unwrap();
        fs::write(b.path().join("hit.plist"), "from b").unwrap();
        let controller = controller_for(vec![a.path().to_path_buf(), b.path().to_path_buf()]);

        let result = controller.search("hit").remove(0);
        let request = OpenRequest {
            focus: ListFocus::SearchResults,
            search_result: Some(result.clone()),
            file: Some((0, "file.plist".to_string())),
        };
        let viewer = controller.open(request.clone()).await.viewer.unwrap();
        assert_eq!(viewer.document.text, "from b");

        let request = OpenRequest {
            focus: ListFocus::Files,
            ..request
        };
        let viewer = controller.open(request).await.viewer.unwrap();
        assert_eq!(viewer.document.text, "from a");
    }

    #[test]
    fn test_request_delete_needs_selection() {
        let controller = controller_for(Vec::new());
        let update = controller.request_delete(0, Vec::new());
        assert!(matches!(update.dialog, Some(Dialog::Notice { .. })));

        let update = controller.request_delete(0, vec!["a.plist".into(), "b.plist".into()]);
        match update.dialog {
            Some(Dialog::Confirm { message, action, .. }) => {
                assert_eq!(message, "Delete the 2 selected file(s)?");
                assert_eq!(
                    action,
                    PendingAction::Delete {
                        folder_index: 0,
                        file_names: vec!["a.plist".into(), "b.plist".into()],
                    }
                );
            }
            other => panic!("expected confirmation, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_with_nothing_removed_reports_failure() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_for(vec![dir.path().to_path_buf()]);

        let update = controller.delete(0, &["ghost.plist".to_string()]);
        match update.dialog {
            Some(Dialog::Notice { kind, message, .. }) => {
                assert_eq!(kind, NoticeKind::Warning);
                assert_eq!(
                    message,
                    "No files were deleted.\n\nghost.plist: file does not exist"
                );
            }
            other => panic!("expected failure notice, got {other:?}"),
        }
        assert!(update.clear_search_input);
    }
}
