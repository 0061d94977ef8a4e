//! # launchman - Terminal Launch Item Manager
//!
//! Browse, search, preview and delete macOS launch-item definitions (`.plist` files) across
//! the user and system launch-agent and launch-daemon folders.
//!
//! ## Features
//!
//! - **Folder Catalog**: Snapshot of every launch item in the five standard folders
//! - **Search**: Case-insensitive filename search across all folders at once
//! - **Preview**: Binary property lists converted to XML via `plutil`, with raw-text fallback
//! - **Highlighting**: Application paths emphasized and scrolled into view
//! - **Deletion**: Confirmed, per-file reporting of what was removed and what was not
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Directory list, converter program and theme
//! - [`catalog`] - Directory enumeration and file removal
//! - [`search`] - Filename index over a catalog snapshot
//! - [`content`] - Converter boundary and document rendering
//! - [`highlight`] - Per-line emphasis spans
//! - [`input`] - Key bindings to input actions
//! - [`render::ui`](crate::render::ui) - Terminal user interface components
//! - [`app`] - Interaction controller and event loop

// Core modules
pub mod config;
pub mod error;

// Domain components
pub mod catalog;
pub mod content;
pub mod highlight;
pub mod search;

// Front end
pub mod app;
pub mod input;
pub mod render;

// Re-export commonly used types for convenience
pub use error::{LaunchmanError, Result};

// Public API surface for external usage
pub use app::controller::InteractionController;
pub use app::Application;
pub use catalog::{Catalog, DirectoryCatalog};
pub use config::{Settings, ThemeChoice};
pub use content::{ContentRenderer, Converter, PlutilConverter, RenderedDocument};
pub use search::{SearchIndex, SearchResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
