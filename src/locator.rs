//! Resolves an executable name to a file on the search path, like UNIX `which`.
//!
//! The search path is passed in explicitly so lookups can be tested without
//! touching the process environment. `which` is the thin wrapper that reads `PATH`.

use std::env;
use std::path::{Path, PathBuf};

/// Returns the directories listed in the `PATH` environment variable, in order.
pub fn search_path_from_env() -> Vec<PathBuf> {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).collect())
        .unwrap_or_default()
}

/// Looks up `program` using the process `PATH`.
pub fn which(program: &str) -> Option<PathBuf> {
    find_executable(program, &search_path_from_env())
}

/// Finds an executable named `program`.
///
/// If `program` has a directory component it is checked as given and never
/// searched for. Otherwise each directory in `search_path` is tried in order
/// and the first executable match wins.
///
/// # Returns
///
/// The path of the executable, or `None` if there is no match.
pub fn find_executable(program: &str, search_path: &[PathBuf]) -> Option<PathBuf> {
    let candidate = Path::new(program);
    let has_dir = candidate
        .parent()
        .map_or(false, |parent| !parent.as_os_str().is_empty());

    if has_dir {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    search_path
        .iter()
        .map(|dir| dir.join(program))
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
