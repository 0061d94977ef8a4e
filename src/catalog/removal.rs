//! Batch deletion of launch-item files.
//!
//! Every requested file is attempted; a failure is recorded and the batch moves on.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Why a single file could not be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    NotFound,
    PermissionDenied,
    Io(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NotFound => f.write_str("file does not exist"),
            FailureReason::PermissionDenied => f.write_str("permission denied"),
            FailureReason::Io(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub file_name: String,
    pub reason: FailureReason,
}

impl fmt::Display for DeleteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file_name, self.reason)
    }
}

/// Outcome of a delete batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    pub failures: Vec<DeleteFailure>,
}

impl DeleteReport {
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    pub fn any_deleted(&self) -> bool {
        !self.deleted.is_empty()
    }

    /// One `name: reason` line per failure.
    pub fn failure_lines(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }
}

/// Remove `file_names` from `folder`.
///
/// Each file must exist and be writable before removal is attempted.
pub fn delete_files<S: AsRef<str>>(folder: &Path, file_names: &[S]) -> DeleteReport {
    let mut report = DeleteReport::default();

    for name in file_names {
        let name = name.as_ref();
        match delete_one(&folder.join(name)) {
            Ok(()) => {
                log::info!("deleted {}", folder.join(name).display());
                report.deleted.push(name.to_string());
            }
            Err(reason) => {
                log::warn!("could not delete {}: {}", folder.join(name).display(), reason);
                report.failures.push(DeleteFailure {
                    file_name: name.to_string(),
                    reason,
                });
            }
        }
    }

    report
}

fn delete_one(path: &Path) -> Result<(), FailureReason> {
    // Follows symlinks, so a dangling link counts as missing.
    fs::metadata(path).map_err(classify)?;
    check_writable(path)?;
    fs::remove_file(path).map_err(classify)
}

/// Whether this process may write `path`, as decided by `access(2)`.
#[cfg(unix)]
fn check_writable(path: &Path) -> Result<(), FailureReason> {
    use nix::unistd::{access, AccessFlags};

    access(path, AccessFlags::W_OK).map_err(|errno| classify(std::io::Error::from(errno)))
}

#[cfg(not(unix))]
fn check_writable(path: &Path) -> Result<(), FailureReason> {
    let metadata = fs::metadata(path).map_err(classify)?;
    if metadata.permissions().readonly() {
        return Err(FailureReason::PermissionDenied);
    }
    Ok(())
}

fn classify(err: std::io::Error) -> FailureReason {
    match err.kind() {
        ErrorKind::NotFound => FailureReason::NotFound,
        ErrorKind::PermissionDenied => FailureReason::PermissionDenied,
        _ => FailureReason::Io(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_delete_continues_after_failures() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.plist"), b"a").unwrap();
        fs::write(dir.path().join("c.plist"), b"c").unwrap();

        let report = delete_files(dir.path(), &["a.plist", "missing.plist", "c.plist"]);

        assert_eq!(report.deleted, vec!["a.plist", "c.plist"]);
        assert_eq!(
            report.failures,
            vec![DeleteFailure {
                file_name: "missing.plist".to_string(),
                reason: FailureReason::NotFound,
            }]
        );
        assert!(!dir.path().join("a.plist").exists());
        assert!(!dir.path().join("c.plist").exists());
    }

    #[cfg(unix)]
    fn lock(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o444)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_readonly_file_follows_process_access() {
        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked.plist");
        fs::write(&locked, b"x").unwrap();
        lock(&locked);

        let report = delete_files(dir.path(), &["locked.plist"]);

        if nix::unistd::geteuid().is_root() {
            assert_eq!(report.deleted, vec!["locked.plist"]);
            assert!(report.failures.is_empty());
            assert!(!locked.exists());
        } else {
            assert!(!report.any_deleted());
            assert_eq!(report.failures[0].reason, FailureReason::PermissionDenied);
            assert!(locked.exists());
            assert_eq!(report.failure_lines(), vec!["locked.plist: permission denied"]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_failures_mid_batch_do_not_stop_later_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("first.plist"), b"1").unwrap();
        fs::write(dir.path().join("locked.plist"), b"2").unwrap();
        fs::create_dir(dir.path().join("folder.plist")).unwrap();
        fs::write(dir.path().join("last.plist"), b"3").unwrap();
        lock(&dir.path().join("locked.plist"));

        let report = delete_files(
            dir.path(),
            &["first.plist", "locked.plist", "folder.plist", "last.plist"],
        );

        assert!(report.deleted.contains(&"first.plist".to_string()));
        assert!(report.deleted.contains(&"last.plist".to_string()));
        assert!(!dir.path().join("first.plist").exists());
        assert!(!dir.path().join("last.plist").exists());

        assert!(report
            .failures
            .iter()
            .any(|failure| failure.file_name == "folder.plist"));
        assert!(dir.path().join("folder.plist").is_dir());
        if !nix::unistd::geteuid().is_root() {
            assert!(report.failures.contains(&DeleteFailure {
                file_name: "locked.plist".to_string(),
                reason: FailureReason::PermissionDenied,
            }));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_reported_missing() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("dangling.plist");
        std::os::unix::fs::symlink(dir.path().join("gone.plist"), &link).unwrap();

        let report = delete_files(dir.path(), &["dangling.plist"]);

        assert!(!report.any_deleted());
        assert_eq!(report.failure_lines(), vec!["dangling.plist: file does not exist"]);
        assert!(fs::symlink_metadata(&link).is_ok());
    }

    #[test]
    fn test_failure_reason_display() {
        assert_eq!(FailureReason::NotFound.to_string(), "file does not exist");
        assert_eq!(FailureReason::Io("disk full".into()).to_string(), "disk full");
    }
}
