//! Git repository access for history scanning.

mod walker;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use gix::ThreadSafeRepository;

/// Default object cache size for tree diffs (64 MB).
const DEFAULT_CACHE_SIZE: usize = 64 * 1024 * 1024;

/// Directory remote repositories are cloned into.
const CLONE_BASE_DIR: &str = "scanned_repos";

/// Wrapper around a raw git object ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(gix::ObjectId);

/// Thread-safe handle to an opened (or freshly cloned) git repository.
#[derive(Debug)]
pub struct Repo {
    inner: ThreadSafeRepository,
    cache_size: usize,
}

impl Repo {
    /// Opens a local repository or clones a remote one.
    ///
    /// A remote `source` (`http://`, `https://`, or `git@`) is cloned into
    /// [`CLONE_BASE_DIR`] under the final path component of the URL, unless
    /// a repository already exists there. Failure to open or clone is fatal.
    pub fn prepare(source: &str) -> anyhow::Result<Self> {
        let local_path = derive_local_path(source, Path::new(CLONE_BASE_DIR));

        let repo = match gix::discover(&local_path) {
            Ok(repo) => repo,
            Err(_) if is_remote(source) => clone_remote(source, &local_path)?,
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to open repository at {}", local_path.display())
                });
            }
        };

        Ok(Self::from_thread_local(repo))
    }

    fn from_thread_local(mut repo: gix::Repository) -> Self {
        let cache_size = compute_cache_size(&repo);
        configure_cache(&mut repo, cache_size);
        Self {
            inner: repo.into_sync(),
            cache_size,
        }
    }

    /// Creates a thread-local repository handle for use within a rayon task.
    #[must_use]
    pub fn thread_local(&self) -> LocalRepo {
        let mut repo = self.inner.to_thread_local();
        configure_cache(&mut repo, self.cache_size);
        LocalRepo { inner: repo }
    }

    /// Returns `true` if this is a shallow clone with truncated history.
    #[must_use]
    pub fn is_shallow(&self) -> bool {
        self.inner.to_thread_local().is_shallow()
    }

    /// Collects up to `limit` commit IDs from first-parent history at HEAD.
    pub fn collect_commits(&self, limit: usize) -> anyhow::Result<Vec<ObjectId>> {
        self.thread_local().collect_commits(limit)
    }
}

/// Non-`Send` repository handle for single-threaded git operations.
#[derive(Debug)]
pub struct LocalRepo {
    pub(super) inner: gix::Repository,
}

fn clone_remote(url: &str, dest: &Path) -> anyhow::Result<gix::Repository> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut prepared = gix::prepare_clone(url, dest)
        .with_context(|| format!("failed to prepare clone of {url}"))?;

    let (mut checkout, _fetch_outcome) = prepared
        .fetch_then_checkout(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
        .with_context(|| format!("failed to fetch {url}"))?;

    let (repo, _checkout_outcome) = checkout
        .main_worktree(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
        .context("failed to check out main worktree")?;

    Ok(repo)
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://") || source.starts_with("git@")
}

/// Maps a remote URL to its clone directory; local paths pass through.
fn derive_local_path(source: &str, base_dir: &Path) -> PathBuf {
    if !is_remote(source) {
        return PathBuf::from(source);
    }

    let trimmed = source.trim_end_matches('/');
    let name = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let name = name.strip_suffix(".git").unwrap_or(name);

    base_dir.join(name)
}

fn compute_cache_size(repo: &gix::Repository) -> usize {
    repo.index_or_empty()
        .map(|idx| repo.compute_object_cache_size_for_tree_diffs(&idx))
        .unwrap_or(DEFAULT_CACHE_SIZE)
}

fn configure_cache(repo: &mut gix::Repository, size: usize) {
    repo.object_cache_size_if_unset(size);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_paths_are_not_remote() {
        assert!(!is_remote("/tmp/some/repo"));
        assert!(!is_remote("./relative/repo"));
        assert!(!is_remote("repo"));
    }

    #[test]
    fn url_schemes_are_remote() {
        assert!(is_remote("https://github.com/acme/widgets.git"));
        assert!(is_remote("http://example.com/repo"));
        assert!(is_remote("git@github.com:acme/widgets.git"));
    }

    #[test]
    fn local_path_passes_through_unchanged() {
        let path = derive_local_path("/tmp/repo", Path::new("scanned_repos"));
        assert_eq!(path, PathBuf::from("/tmp/repo"));
    }

    #[test]
    fn url_maps_to_named_clone_dir() {
        let path = derive_local_path(
            "https://github.com/acme/widgets.git",
            Path::new("scanned_repos"),
        );
        assert_eq!(path, PathBuf::from("scanned_repos/widgets"));
    }

    #[test]
    fn trailing_slash_and_git_suffix_are_stripped() {
        let path = derive_local_path("https://github.com/acme/widgets/", Path::new("base"));
        assert_eq!(path, PathBuf::from("base/widgets"));
    }
}
