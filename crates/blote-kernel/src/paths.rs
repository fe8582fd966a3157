//! Per-user locations for blote.
//!
//! Built on [`directories::ProjectDirs`], so they follow each platform's
//! conventions (`~/.local/share/blote` on Linux).

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "blote")
}

/// Directory searched for world data when none is given on the command line.
///
/// `None` when the platform has no notion of a home directory.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// File the line editor persists its history to.
pub fn history_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("history.txt"))
}
