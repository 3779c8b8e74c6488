//! First-parent commit traversal and per-file diff extraction.

use anyhow::Context as _;
use gix::bstr::ByteSlice as _;
use gix::diff::blob::intern::InternedInput;
use gix::diff::blob::unified_diff::{ConsumeBinaryHunk, ContextSize};
use gix::diff::blob::{Algorithm, UnifiedDiff};

use leakscope_core::{Commit, FileChange};

use super::{LocalRepo, ObjectId};

const DIFF_CONTEXT_LINES: u32 = 3;

struct DiffEntry {
    path: String,
    old_blob: Option<gix::ObjectId>,
    new_blob: Option<gix::ObjectId>,
}

impl LocalRepo {
    /// Walks first-parent history from HEAD, newest first, collecting up to
    /// `limit` commit IDs.
    #[expect(
        clippy::default_trait_access,
        reason = "CommitTimeOrder is a private type in gix; cannot name it explicitly"
    )]
    pub fn collect_commits(&self, limit: usize) -> anyhow::Result<Vec<ObjectId>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let head = self
            .inner
            .head_id()
            .context("repository has no commits at HEAD")?;

        let walk = self
            .inner
            .rev_walk([head.detach()])
            .sorting(gix::revision::walk::Sorting::ByCommitTime(Default::default()))
            .first_parent_only();

        let mut commits = Vec::with_capacity(limit.min(1024));

        for info in walk.all().context("failed to start revision walk")?.flatten() {
            commits.push(ObjectId(info.id));

            if commits.len() >= limit {
                break;
            }
        }

        Ok(commits)
    }

    /// Extracts the commit metadata record, decoding the message lossily.
    #[must_use]
    pub fn commit_record(&self, oid: ObjectId) -> Option<Commit> {
        let commit = self.inner.find_commit(oid.0).ok()?;

        let message = commit
            .message_raw()
            .map(|m| m.to_str_lossy().into_owned())
            .unwrap_or_default();
        let author = commit
            .author()
            .map_or_else(|_| "unknown".to_owned(), |sig| sig.name.to_string());

        Some(Commit {
            commit_hash: commit.id().to_string(),
            message,
            author,
        })
    }

    /// Produces one [`FileChange`] per blob touched by the commit, diffed
    /// against its first parent (or the empty tree for root commits).
    ///
    /// Merge commits yield no changes: their diffs are ambiguous and the
    /// same content arrives via the first-parent chain. A commit that cannot
    /// be diffed yields no changes either; the walk itself carries on.
    #[must_use]
    pub fn commit_changes(&self, oid: ObjectId) -> Vec<FileChange> {
        let Ok(commit) = self.inner.find_commit(oid.0) else {
            return Vec::new();
        };

        if commit.parent_ids().count() > 1 {
            return Vec::new();
        }

        let Ok(tree) = commit.tree() else {
            return Vec::new();
        };

        let from_tree = match self.first_parent_tree(&commit) {
            Some(parent_tree) => parent_tree,
            None => self.inner.empty_tree(),
        };

        let commit_hash = commit.id().to_string();

        Self::diff_trees(&from_tree, &tree)
            .into_iter()
            .filter_map(|entry| {
                let old_text = entry.old_blob.map_or_else(String::new, |id| self.blob_text(id));
                let new_text = entry.new_blob.map_or_else(String::new, |id| self.blob_text(id));
                let diff_content = render_unified(&old_text, &new_text)?;

                Some(FileChange {
                    file_path: entry.path,
                    commit_hash: commit_hash.clone(),
                    diff_content,
                })
            })
            .collect()
    }

    fn first_parent_tree(&self, commit: &gix::Commit<'_>) -> Option<gix::Tree<'_>> {
        commit
            .parent_ids()
            .next()
            .and_then(|pid| self.inner.find_commit(pid).ok())
            .and_then(|pc| pc.tree().ok())
    }

    /// Reads a blob's content as text, replacing undecodable bytes.
    fn blob_text(&self, oid: gix::ObjectId) -> String {
        self.inner
            .find_blob(oid)
            .map(|blob| String::from_utf8_lossy(&blob.data).into_owned())
            .unwrap_or_default()
    }

    fn diff_trees(from: &gix::Tree<'_>, to: &gix::Tree<'_>) -> Vec<DiffEntry> {
        let Ok(mut changes) = from.changes() else {
            return Vec::new();
        };

        let mut entries = Vec::new();

        let _ = changes.for_each_to_obtain_tree(to, |change| {
            use gix::object::tree::diff::Change;

            match change {
                Change::Addition {
                    location,
                    id,
                    entry_mode,
                    ..
                } if entry_mode.is_blob() => {
                    entries.push(DiffEntry {
                        path: location.to_str_lossy().into_owned(),
                        old_blob: None,
                        new_blob: Some(id.detach()),
                    });
                }
                Change::Deletion {
                    location,
                    id,
                    entry_mode,
                    ..
                } if entry_mode.is_blob() => {
                    entries.push(DiffEntry {
                        path: location.to_str_lossy().into_owned(),
                        old_blob: Some(id.detach()),
                        new_blob: None,
                    });
                }
                Change::Modification {
                    location,
                    previous_id,
                    id,
                    entry_mode,
                    ..
                } if entry_mode.is_blob() => {
                    entries.push(DiffEntry {
                        path: location.to_str_lossy().into_owned(),
                        old_blob: Some(previous_id.detach()),
                        new_blob: Some(id.detach()),
                    });
                }
                Change::Rewrite {
                    location,
                    source_id,
                    id,
                    entry_mode,
                    ..
                } if entry_mode.is_blob() => {
                    // A rename is reported once, keyed by its destination path.
                    entries.push(DiffEntry {
                        path: location.to_str_lossy().into_owned(),
                        old_blob: Some(source_id.detach()),
                        new_blob: Some(id.detach()),
                    });
                }
                _ => {}
            }

            Ok::<_, std::convert::Infallible>(std::ops::ControlFlow::Continue(()))
        });

        entries
    }
}

/// Renders a unified diff (3 context lines) between two blob texts.
///
/// Hunks are collected into a string through [`ConsumeBinaryHunk`], which
/// prefixes each line with `+`, `-`, or a space below its `@@` header.
fn render_unified(old: &str, new: &str) -> Option<String> {
    let input = InternedInput::new(old, new);

    gix::diff::blob::diff(
        Algorithm::Histogram,
        &input,
        UnifiedDiff::new(
            &input,
            ConsumeBinaryHunk::new(String::new(), "\n"),
            ContextSize::symmetrical(DIFF_CONTEXT_LINES),
        ),
    )
    .ok()
}
