use clap::{CommandFactory, Parser};
use colored::*;
use echosnip::cli::{Cli, Commands};
use echosnip::error::{EchosnipError, Result as EchosnipResult};
use echosnip::output_formats::{OutputFormat, Report};
use echosnip::{Config, SearchRequest, Step, describe_languages, run_search};
use env_logger::{Builder, Env, Target};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use log::{LevelFilter, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {e}").red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> EchosnipResult<()> {
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "echosnip", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(cli)?;
    setup_logging(cli, &config)?;

    match &cli.command {
        Commands::Search {
            description,
            language,
            format,
            output,
            save,
        } => {
            let request = SearchRequest::from_description(&description.join(" "), language);
            let destination = if *save {
                Some(config.output_path.clone().ok_or_else(|| {
                    EchosnipError::Config("--save requires `output_path` in the config".to_string())
                })?)
            } else {
                output.clone()
            };
            search(&config, &request, (*format).into(), destination.as_deref())
        }
        Commands::Languages => {
            for name in describe_languages(&config) {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn load_config(cli: &Cli) -> EchosnipResult<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = &cli.path {
        config.folder_path = path.clone();
    }
    for name in &cli.ignore {
        if !config.ignore_folders.contains(name) {
            config.ignore_folders.push(name.clone());
        }
    }
    Ok(config)
}

fn search(
    config: &Config,
    request: &SearchRequest,
    format: OutputFormat,
    destination: Option<&Path>,
) -> EchosnipResult<()> {
    let start_time = Instant::now();
    let mut stream = run_search(config, request)?;

    let pb = ProgressBar::new_spinner().with_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .map_err(|e| EchosnipError::Other(e.to_string()))?
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Searching {} snippets...", stream.language()));

    let mut snippets = Vec::new();
    let mut files_done = 0usize;
    loop {
        match stream.advance() {
            Step::Snippet(snippet) => snippets.push(snippet),
            Step::Pending => files_done += 1,
            Step::Done => break,
        }
        pb.set_message(format!(
            "Found {} snippet(s) in {} file(s)...",
            snippets.len(),
            files_done
        ));
    }
    pb.finish_and_clear();

    let report = Report {
        language: stream.language().to_string(),
        keywords: request.keywords().to_vec(),
        snippets,
        elapsed: start_time.elapsed(),
    };
    info!(
        "Search completed in {:.2} seconds with {} snippet(s) and {} diagnostic(s)",
        report.elapsed.as_secs_f64(),
        report.snippets.len(),
        stream.diagnostics().len()
    );

    match destination {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, report.format(format, false) + "\n")?;
            println!(
                "{} '{}'",
                "Results successfully written to".green(),
                path.display()
            );
        }
        None => {
            let color = std::io::stdout().is_terminal();
            println!("{}", report.format(format, color));
        }
    }
    Ok(())
}

fn setup_logging(cli: &Cli, config: &Config) -> EchosnipResult<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if cli.verbose || config.debug {
        builder.filter_level(LevelFilter::Debug);
    }

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    let log_path: Option<PathBuf> = cli
        .log
        .clone()
        .or_else(|| config.debug.then(|| config.debug_log_path.clone()));

    if let Some(log_path) = log_path {
        if let Some(parent_dir) = log_path.parent()
            && !parent_dir.as_os_str().is_empty()
            && !parent_dir.exists()
        {
            fs::create_dir_all(parent_dir)?;
        }
        let log_file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| EchosnipError::Other(e.to_string()))?;
    Ok(())
}
