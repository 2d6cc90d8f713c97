//! Lazy snippet search over a directory tree
use crate::config::Config;
use crate::dedup::{DedupKey, Deduplicator};
use crate::error::{EchosnipError, Result as EchosnipResult};
use crate::extract::{BlockExtractor, extractor_for};
use crate::matcher::MarkerMatcher;
use crate::profile::{BlockType, LanguageProfile};
use crate::snippet::Snippet;
use crate::walker::{CandidateFiles, walk_dir};
use crossbeam_channel::{Receiver, bounded};
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

/// Keywords (lowercase, deduplicated, in order) and the language to search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    keywords: Vec<String>,
    language: String,
}

impl SearchRequest {
    pub fn new<I, S>(keywords: I, language: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !unique.contains(&keyword) {
                unique.push(keyword);
            }
        }
        Self {
            keywords: unique,
            language: language.to_string(),
        }
    }

    /// Splits a free-text description on whitespace.
    pub fn from_description(description: &str, language: &str) -> Self {
        Self::new(description.split_whitespace(), language)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// Something the search noticed but did not treat as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    FileSkipped { path: PathBuf, reason: String },
    EmptyBlock { path: PathBuf, line: usize },
    UnknownBlockType { path: PathBuf, line: usize, block_type: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Running,
    Exhausted,
}

/// Outcome of one [`SnippetStream::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Snippet(Snippet),
    /// A file was scanned (or skipped) without producing a snippet.
    Pending,
    Done,
}

struct OpenFile {
    path: PathBuf,
    lines: Vec<String>,
    cursor: usize,
}

/// A started search.
///
/// [`advance`](SnippetStream::advance) reads at most one more file per call.
/// The `Iterator` impl keeps advancing until a snippet turns up or the tree is done.
pub struct SnippetStream {
    language: String,
    block_type: BlockType,
    files: CandidateFiles,
    matcher: MarkerMatcher,
    extractor: Option<Box<dyn BlockExtractor>>,
    dedup: Deduplicator,
    current: Option<OpenFile>,
    diagnostics: Vec<Diagnostic>,
    state: SearchState,
}

/// Validates `request` against `config` and starts a search.
///
/// Nothing is read from disk until the returned stream is advanced.
pub fn run_search(config: &Config, request: &SearchRequest) -> EchosnipResult<SnippetStream> {
    let (language, profile) = resolve(config, request)?;
    info!(
        "Searching {} files under '{}' for {:?}",
        language,
        config.folder_path.display(),
        request.keywords()
    );
    Ok(SnippetStream::new(config, language, profile, request.keywords()))
}

/// Configured language names, in the order they were written.
pub fn describe_languages(config: &Config) -> Vec<String> {
    config.language_names()
}

fn resolve<'c>(
    config: &'c Config,
    request: &SearchRequest,
) -> EchosnipResult<(&'c str, &'c LanguageProfile)> {
    if request.keywords().is_empty() {
        return Err(EchosnipError::EmptyQuery);
    }
    config.language(request.language())
}

fn read_lines(path: &Path) -> EchosnipResult<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| EchosnipError::FileProcessing {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}

impl SnippetStream {
    fn new(config: &Config, language: &str, profile: &LanguageProfile, keywords: &[String]) -> Self {
        let extractor = extractor_for(profile);
        if extractor.is_none() {
            warn!(
                "Language '{}' has unknown block_type '{}'; its markers will be skipped",
                language, profile.block_type
            );
        }
        Self {
            language: language.to_string(),
            block_type: profile.block_type.clone(),
            files: walk_dir(&config.folder_path, &profile.extensions, &config.ignore_folders),
            matcher: MarkerMatcher::new(profile, keywords),
            extractor,
            dedup: Deduplicator::new(),
            current: None,
            diagnostics: Vec::new(),
            state: SearchState::Running,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn open_next_file(&mut self) -> bool {
        let Some(path) = self.files.next() else {
            return false;
        };
        debug!("Scanning file: {}", path.display());
        match read_lines(&path) {
            Ok(lines) => {
                self.current = Some(OpenFile {
                    path,
                    lines,
                    cursor: 0,
                })
            }
            Err(err) => {
                warn!("Could not process {}: {err}", path.display());
                self.diagnostics.push(Diagnostic::FileSkipped {
                    path,
                    reason: err.to_string(),
                });
            }
        }
        true
    }

    /// Scans the open file from its cursor up to the next admitted marker.
    fn scan_current(&mut self) -> Option<Snippet> {
        let file = self.current.as_mut()?;
        while let Some(found) = self.matcher.next_match(&file.path, &file.lines, file.cursor) {
            file.cursor = found.line_index + 1;

            let key = DedupKey::new(&found.path, &found.description);
            if !self.dedup.offer(key) {
                debug!(
                    "Duplicate snippet for ('{}', '{}') in {}. Skipping.",
                    found.path.file_stem().unwrap_or_default().to_string_lossy(),
                    found.description,
                    found.path.display()
                );
                continue;
            }
            debug!(
                "MATCH FOUND on line {}: '{}'",
                found.line_number(),
                found.line.trim()
            );

            let Some(extractor) = self.extractor.as_deref() else {
                error!(
                    "Unknown block_type '{}' for language '{}'. Skipping marker at {}:{}",
                    self.block_type,
                    self.language,
                    found.path.display(),
                    found.line_number()
                );
                self.diagnostics.push(Diagnostic::UnknownBlockType {
                    path: found.path.clone(),
                    line: found.line_number(),
                    block_type: self.block_type.to_string(),
                });
                continue;
            };

            match extractor.extract(&file.lines, found.line_index) {
                Ok(extraction) => {
                    if extraction.is_empty() {
                        debug!(
                            "No {} block after marker at {}:{}",
                            extractor.name(),
                            found.path.display(),
                            found.line_number()
                        );
                        self.diagnostics.push(Diagnostic::EmptyBlock {
                            path: found.path.clone(),
                            line: found.line_number(),
                        });
                    }
                    return Some(Snippet::assemble(found, extraction));
                }
                Err(err) => {
                    warn!("Could not process {}: {err}", found.path.display());
                    self.diagnostics.push(Diagnostic::FileSkipped {
                        path: found.path,
                        reason: err.to_string(),
                    });
                    self.current = None;
                    return None;
                }
            }
        }
        self.current = None;
        None
    }
}

impl SnippetStream {
    /// Continues the open file, or opens the next candidate, and scans up to the
    /// next snippet or the end of that file.
    pub fn advance(&mut self) -> Step {
        if self.state == SearchState::Exhausted {
            return Step::Done;
        }
        if self.current.is_none() && !self.open_next_file() {
            debug!("Search for {} snippets exhausted", self.language);
            self.state = SearchState::Exhausted;
            return Step::Done;
        }
        match self.scan_current() {
            Some(snippet) => Step::Snippet(snippet),
            None => Step::Pending,
        }
    }
}

impl Iterator for SnippetStream {
    type Item = Snippet;

    fn next(&mut self) -> Option<Snippet> {
        loop {
            match self.advance() {
                Step::Snippet(snippet) => return Some(snippet),
                Step::Pending => continue,
                Step::Done => return None,
            }
        }
    }
}

/// A search running on its own thread.
pub struct SearchWorker {
    pub receiver: Receiver<Snippet>,
    handle: JoinHandle<Vec<Diagnostic>>,
}

impl SearchWorker {
    /// Waits for the worker and returns what it noticed along the way.
    pub fn join(self) -> EchosnipResult<Vec<Diagnostic>> {
        drop(self.receiver);
        self.handle
            .join()
            .map_err(|_| EchosnipError::Other("search worker panicked".to_string()))
    }
}

/// Runs the search on a worker thread, pushing snippets through a bounded channel.
///
/// The request is validated before the thread starts. Dropping the receiver
/// stops the worker at its next send.
pub fn spawn_search(
    config: Config,
    request: SearchRequest,
    capacity: usize,
) -> EchosnipResult<SearchWorker> {
    resolve(&config, &request)?;
    let (tx, receiver) = bounded(capacity);
    let handle = thread::spawn(move || {
        let mut stream = match run_search(&config, &request) {
            Ok(stream) => stream,
            Err(err) => {
                error!("Search worker could not start: {err}");
                return Vec::new();
            }
        };
        for snippet in stream.by_ref() {
            if tx.send(snippet).is_err() {
                debug!("Receiver dropped, stopping search worker");
                break;
            }
        }
        stream.diagnostics
    });
    Ok(SearchWorker { receiver, handle })
}
