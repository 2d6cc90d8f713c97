pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod output_formats;
pub mod profile;
pub mod search;
pub mod snippet;
pub mod walker;

pub use crate::config::Config;
pub use crate::error::{EchosnipError, Result};
pub use clap::Parser;
pub use cli::{Cli, Commands};
pub use dedup::{DedupKey, Deduplicator};
pub use extract::{BlockExtractor, Extraction, extractor_for};
pub use matcher::{MarkerMatch, MarkerMatcher};
pub use output_formats::Report;
pub use profile::{BlockType, LanguageProfile};
pub use search::{
    Diagnostic, SearchRequest, SearchState, SearchWorker, SnippetStream, Step, describe_languages,
    run_search, spawn_search,
};
pub use snippet::Snippet;
pub use walker::walk_dir;
