use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::fmt;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (YAML or TOML). Searched for when omitted.
    #[clap(long, global = true, value_parser)]
    pub config: Option<PathBuf>,

    /// Root folder to search, overriding `folder_path` from the config.
    #[clap(long, global = true, value_parser)]
    pub path: Option<PathBuf>,

    /// Extra directory names to skip, added to `ignore_folders`.
    #[clap(long, global = true, value_parser, use_value_delimiter = true)]
    pub ignore: Vec<String>,

    #[clap(long, global = true, value_parser, default_value_t = false)]
    pub verbose: bool,

    #[clap(long, global = true, value_parser)]
    pub log: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find snippets whose marker mentions every word of the description.
    Search {
        #[clap(required = true, num_args = 1..)]
        description: Vec<String>,

        #[clap(short, long, value_parser)]
        language: String,

        #[clap(long, value_parser, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the report to this file instead of stdout.
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,

        /// Write the report to `output_path` from the config.
        #[clap(long, value_parser, default_value_t = false, conflicts_with = "output")]
        save: bool,
    },
    /// List the configured languages.
    Languages,
    /// Generate shell completions.
    Completions {
        #[clap(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl From<OutputFormat> for crate::output_formats::OutputFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Text => crate::output_formats::OutputFormat::Text,
            OutputFormat::Json => crate::output_formats::OutputFormat::Json,
        }
    }
}
