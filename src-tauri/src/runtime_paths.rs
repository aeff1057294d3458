use std::{env, path::PathBuf};

use crate::DESKTOP_ROOT_ENV;

const DEFAULT_ROOT_DIR_NAME: &str = ".auditoria-desktop";

pub(crate) fn default_desktop_root_dir() -> Option<PathBuf> {
    desktop_root_dir_from(env::var(DESKTOP_ROOT_ENV).ok(), home::home_dir())
}

fn desktop_root_dir_from(
    override_dir: Option<String>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(raw) = override_dir {
        let path = PathBuf::from(raw.trim());
        if !path.as_os_str().is_empty() {
            return Some(path);
        }
    }

    home_dir.map(|home| home.join(DEFAULT_ROOT_DIR_NAME))
}
