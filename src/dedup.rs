use std::collections::HashSet;
use std::path::Path;

/// Identity of a snippet within one search: file base name plus description.
///
/// Two files sharing a base name (`cache.h` and `cache.c`, or the same name in
/// different directories) share keys on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub unit: String,
    pub description: String,
}

impl DedupKey {
    pub fn new(path: &Path, description: &str) -> Self {
        let unit = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            unit,
            description: description.to_string(),
        }
    }
}

/// Admits each key once per search.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<DedupKey>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `key` is offered.
    pub fn offer(&mut self, key: DedupKey) -> bool {
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
