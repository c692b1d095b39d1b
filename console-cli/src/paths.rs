//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "directory-admin";
const APPLICATION: &str = "admin-console";

/// Name of the log file the running process writes to.
const LATEST_LOG: &str = "latest.log";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Data directory for persistent application data.
///
/// - Linux: `$XDG_DATA_HOME/admin-console` or `~/.local/share/admin-console`
/// - macOS: `~/Library/Application Support/org.directory-admin.admin-console`
/// - Windows: `C:\Users\<User>\AppData\Roaming\directory-admin\admin-console\data`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Cache directory, home of the log files.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the settings database.
pub fn settings_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("settings.db"))
}

/// Path to the log file of the current run.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive the previous `latest.log` under a timestamped name and drop the
/// oldest archives.
///
/// Call at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache, MAX_OLD_LOGS);
}

fn rotate_logs_in(dir: &Path, keep: usize) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archived = dir.join(format!("{timestamp}.log"));
        // Runs before the logger exists
        if let Err(e) = fs::rename(&latest, &archived) {
            eprintln!("Failed to archive {}: {e}", latest.display());
        }
    }
    cleanup_old_logs(dir, keep);
}

/// Remove archived logs, keeping only the `keep` most recent.
fn cleanup_old_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Oldest first
    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_archives_latest_and_prunes() {
        let dir = std::env::temp_dir().join(format!("admin-console-logs-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        for name in ["a.log", "b.log", "c.log"] {
            fs::write(dir.join(name), name).unwrap();
        }
        fs::write(dir.join(LATEST_LOG), "current").unwrap();

        rotate_logs_in(&dir, 2);

        let remaining: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert!(!remaining.contains(&LATEST_LOG.to_string()));
        assert_eq!(remaining.len(), 2);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_paths_are_namespaced_by_application() {
        let Some(db) = settings_db() else { return };
        assert!(db.ends_with("admin-console/settings.db"));
        let Some(log) = log_file() else { return };
        assert!(log.ends_with("admin-console/latest.log"));
    }
}
