//! External property-list converter.
//!
//! The converter is treated as a black box: given a path it either yields UTF-8 text or fails.
//! Failures are never shown to the user; the renderer falls back to reading the file directly.

use crate::error::{LaunchmanError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Turns a launch-item file into displayable text.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(&self, path: &Path) -> Result<String>;
}

/// Runs `<program> -convert xml1 -o - <path>` and captures its standard output.
#[derive(Debug, Clone)]
pub struct PlutilConverter {
    program: PathBuf,
}

impl PlutilConverter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PlutilConverter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CONVERTER)
    }
}

#[async_trait]
impl Converter for PlutilConverter {
    async fn convert(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.program)
            .args(["-convert", "xml1", "-o", "-"])
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                LaunchmanError::conversion(format!(
                    "could not launch {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(LaunchmanError::conversion(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| LaunchmanError::conversion(format!("output is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_conversion_error() {
        let converter = PlutilConverter::new("/nonexistent/launchman-converter");
        let err = converter.convert(Path::new("/tmp/x.plist")).await.unwrap_err();
        assert!(matches!(err, LaunchmanError::ConversionFailed { .. }));
        assert!(err.to_string().contains("could not launch"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_conversion_error() {
        let converter = PlutilConverter::new("false");
        let err = converter.convert(Path::new("/tmp/x.plist")).await.unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_arguments_are_passed_in_order() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("fake-plutil");
        // Echo the argument list and the converted file, so both are checked at once.
        std::fs::write(&script, "#!/bin/sh\necho \"$1 $2 $3 $4\"\ncat \"$5\"\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let plist = dir.path().join("com.example.plist");
        std::fs::write(&plist, "<plist/>\n").unwrap();

        let text = PlutilConverter::new(&script).convert(&plist).await.unwrap();
        assert_eq!(text, "-convert xml1 -o -\n<plist/>\n");
    }
}
