//! Runtime settings.
//!
//! Settings come from the command line. With the `config` feature enabled they can also be
//! loaded from an explicitly named TOML file; nothing is ever read implicitly.

use crate::error::{LaunchmanError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::Deserialize;

/// Program used to turn binary property lists into XML text.
pub const DEFAULT_CONVERTER: &str = "plutil";

/// Per-user launch agents folder, relative to the home directory.
pub const USER_LAUNCH_AGENTS: &str = "Library/LaunchAgents";

/// System-wide launch folders, in display order after the per-user one.
pub const SYSTEM_LAUNCH_DIRECTORIES: [&str; 4] = [
    "/System/Library/LaunchAgents",
    "/System/Library/LaunchDaemons",
    "/Library/LaunchAgents",
    "/Library/LaunchDaemons",
];

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Color theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum ThemeChoice {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl FromStr for ThemeChoice {
    type Err = LaunchmanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "monochrome" | "mono" => Ok(Self::Monochrome),
            "high-contrast" | "high_contrast" => Ok(Self::HighContrast),
            other => Err(LaunchmanError::invalid_argument(format!(
                "unknown theme '{}'",
                other
            ))),
        }
    }
}

/// Everything the application needs to start.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct Settings {
    /// Launch directories in display order. Fixed for the whole session.
    pub directories: Vec<PathBuf>,
    /// External converter program
    pub converter: PathBuf,
    pub theme: ThemeChoice,
    /// How long the input service waits for a terminal event per tick
    pub poll_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directories: Self::standard_directories(),
            converter: PathBuf::from(DEFAULT_CONVERTER),
            theme: ThemeChoice::default(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// The five well-known launch directories: the user's own agents first, then the
    /// system-wide agent and daemon folders.
    pub fn standard_directories() -> Vec<PathBuf> {
        let home = dirs::home_dir().unwrap_or_else(|| {
            log::warn!("home directory could not be resolved; using a relative path");
            PathBuf::new()
        });

        std::iter::once(home.join(USER_LAUNCH_AGENTS))
            .chain(SYSTEM_LAUNCH_DIRECTORIES.iter().map(PathBuf::from))
            .collect()
    }

    /// Replace the directory list. An empty list keeps the standard directories.
    pub fn with_directories(mut self, directories: Vec<PathBuf>) -> Self {
        if !directories.is_empty() {
            self.directories = directories;
        }
        self
    }

    pub fn with_converter(mut self, converter: impl Into<PathBuf>) -> Self {
        self.converter = converter.into();
        self
    }

    pub fn with_theme(mut self, theme: ThemeChoice) -> Self {
        self.theme = theme;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check the settings before the UI takes over the terminal.
    pub fn validate(&self) -> Result<()> {
        if self.directories.is_empty() {
            return Err(LaunchmanError::config("at least one directory is required"));
        }
        if self.converter.as_os_str().is_empty() {
            return Err(LaunchmanError::config("converter program must not be empty"));
        }
        Ok(())
    }

    /// Load settings from a TOML file. Missing keys fall back to the defaults.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LaunchmanError::file_error(format!("Failed to read {}", path.display()), e)
        })?;
        let settings: Settings = toml::from_str(&raw)
            .map_err(|e| LaunchmanError::config(format!("{}: {}", path.display(), e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Display form of a directory for list panes.
    pub fn display_directory(path: &Path) -> String {
        path.display().to_string()
    }
}
