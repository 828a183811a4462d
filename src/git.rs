//! Commit hash lookup for build profiles.

use std::path::Path;
use std::sync::OnceLock;

use log::debug;

use crate::constants::UNKNOWN_GIT_HASH;

static GIT_HASH: OnceLock<String> = OnceLock::new();

/// Reads the HEAD commit of the repository containing `dir`.
pub fn head_commit(dir: &Path) -> Result<String, git2::Error> {
    let repo = git2::Repository::discover(dir)?;
    let commit = repo.head()?.peel_to_commit()?;
    Ok(commit.id().to_string())
}

/// HEAD commit hash of the repository containing `dir`, or `N/A`.
///
/// The first lookup is cached for the rest of the process; later calls
/// return it whatever `dir` they pass.
pub fn git_hash(dir: &Path) -> &'static str {
    GIT_HASH.get_or_init(|| {
        head_commit(dir).unwrap_or_else(|e| {
            debug!("Unable to read commit hash from {}: {}", dir.display(), e.message());
            UNKNOWN_GIT_HASH.to_string()
        })
    })
}
