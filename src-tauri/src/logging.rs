use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Local;

const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogScope {
    Startup,
    Desktop,
    Window,
    Session,
    Api,
}

impl LogScope {
    fn tag(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Desktop => "desktop",
            Self::Window => "window",
            Self::Session => "session",
            Self::Api => "api",
        }
    }
}

pub(crate) fn resolve_desktop_log_path(root_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    match root_dir {
        Some(root) => root.join("logs").join(file_name),
        None => std::env::temp_dir().join("auditoria-desktop").join(file_name),
    }
}

pub(crate) fn format_log_line(scope: LogScope, message: &str) -> String {
    format!(
        "[{}] [{}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        scope.tag(),
        message
    )
}

fn rotate_if_needed(path: &Path) {
    let Ok(metadata) = fs::metadata(path) else {
        return;
    };
    if metadata.len() < MAX_LOG_BYTES {
        return;
    }

    let rotated = path.with_extension("log.1");
    let _ = fs::remove_file(&rotated);
    let _ = fs::rename(path, rotated);
}

pub(crate) fn append_log_line(path: &Path, scope: LogScope, message: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            format!("Failed to create log directory {}: {}", parent.display(), error)
        })?;
    }
    rotate_if_needed(path);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log {}: {}", path.display(), error))?;
    writeln!(file, "{}", format_log_line(scope, message))
        .map_err(|error| format!("Failed to write log {}: {}", path.display(), error))
}

fn append_scoped_log(scope: LogScope, message: &str) {
    if cfg!(debug_assertions) {
        eprintln!("[{}] {}", scope.tag(), message);
    }

    let path = resolve_desktop_log_path(
        crate::runtime_paths::default_desktop_root_dir(),
        crate::DESKTOP_LOG_FILE,
    );
    let _ = append_log_line(&path, scope, message);
}

pub(crate) fn append_startup_log(message: &str) {
    append_scoped_log(LogScope::Startup, message);
}

pub(crate) fn append_desktop_log(message: &str) {
    append_scoped_log(LogScope::Desktop, message);
}

pub(crate) fn append_window_log(message: &str) {
    append_scoped_log(LogScope::Window, message);
}

pub(crate) fn append_session_log(message: &str) {
    append_scoped_log(LogScope::Session, message);
}

pub(crate) fn append_api_log(message: &str) {
    append_scoped_log(LogScope::Api, message);
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::*;

    #[test]
    fn resolve_desktop_log_path_uses_logs_dir_under_root() {
        let path = resolve_desktop_log_path(Some(PathBuf::from("/opt/audit")), "desktop.log");
        assert_eq!(path, PathBuf::from("/opt/audit").join("logs").join("desktop.log"));
    }

    #[test]
    fn format_log_line_includes_scope_tag() {
        let line = format_log_line(LogScope::Window, "child-1 clamped");
        assert!(line.ends_with("[window] child-1 clamped"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn append_log_line_creates_parent_and_appends() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join("logs").join("desktop.log");

        append_log_line(&path, LogScope::Startup, "first").expect("first write");
        append_log_line(&path, LogScope::Session, "second").expect("second write");

        let contents = fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[startup] first"));
        assert!(lines[1].ends_with("[session] second"));
    }

    #[test]
    fn append_log_line_rotates_oversized_file() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join("desktop.log");
        fs::write(&path, vec![b'x'; MAX_LOG_BYTES as usize]).expect("seed log");

        append_log_line(&path, LogScope::Desktop, "fresh").expect("write after rotation");

        assert!(temp_dir.path().join("desktop.log.1").is_file());
        let contents = fs::read_to_string(&path).expect("read log");
        assert_eq!(contents.lines().count(), 1);
    }
}
