use ignore::{Walk, WalkBuilder};
use log::warn;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Lazily yields files under a root whose names end with one of the given suffixes.
pub struct CandidateFiles {
    inner: Walk,
    extensions: Vec<String>,
}

/// Walks `root` depth-first in file-name order, never descending into a
/// directory whose name is listed in `ignore_folders`.
///
/// Files and subdirectories share one sorted order per directory, so `a/x.py`
/// is yielded before `b.py`. A directory's own files do not come first. This
/// order decides which copy wins when snippets are deduplicated across
/// directories.
///
/// Hidden files and VCS ignore rules are not consulted.
pub fn walk_dir(root: &Path, extensions: &[String], ignore_folders: &[String]) -> CandidateFiles {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    let ignored: HashSet<String> = ignore_folders.iter().cloned().collect();

    let inner = WalkBuilder::new(&root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir
                && entry.depth() > 0
                && ignored.contains(entry.file_name().to_string_lossy().as_ref()))
        })
        .build();

    CandidateFiles {
        inner,
        extensions: extensions.to_vec(),
    }
}

impl CandidateFiles {
    fn accepts(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy())
            .is_some_and(|name| self.extensions.iter().any(|ext| name.ends_with(ext.as_str())))
    }
}

impl Iterator for CandidateFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    let is_file = entry.file_type().is_some_and(|t| t.is_file());
                    if is_file && self.accepts(entry.path()) {
                        return Some(entry.into_path());
                    }
                }
                Err(err) => warn!("Skipping unreadable entry: {err}"),
            }
        }
    }
}
