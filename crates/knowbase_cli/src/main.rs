//! `knowbase` command-line entry point.
//!
//! # Responsibility
//! - Map subcommands onto explicit knowledge store and extractor calls.
//! - Translate core errors into user-facing messages and exit codes.

use clap::{Parser, Subcommand};
use knowbase_core::{
    core_version, default_log_level, derive_preview, extract_text, faq_items, init_logging,
    DocumentKind, Entry, JsonFileEntryRepository, KnowledgeStore, SearchQuery, StoreConfig,
    StoreError, DEFAULT_BACKING_FILE,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

const STDERR_LOG_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(name = "knowbase")]
#[command(about = "Store notes, search them, and extract text from documents", long_about = None)]
struct Cli {
    /// Backing file holding all knowledge entries
    #[arg(long, global = true, default_value = DEFAULT_BACKING_FILE)]
    data_file: PathBuf,

    /// Log level: off|trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; warnings go to stderr when unset
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a knowledge entry
    Add {
        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,
    },
    /// Search entries by keyword (case-insensitive)
    Search {
        query: String,

        /// Maximum number of results to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List all entries
    List {
        /// Print a one-line preview instead of the full content
        #[arg(long)]
        preview: bool,
    },
    /// Extract and print text from a PDF or TXT file
    Extract {
        file: PathBuf,

        /// Declared MIME type; inferred from the file extension when omitted
        #[arg(long)]
        mime: Option<String>,
    },
    /// Show frequently asked questions
    Faq,
    /// Show version
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.as_deref();
    let level = cli.log_level.as_deref().unwrap_or(if log_dir.is_some() {
        default_log_level()
    } else {
        STDERR_LOG_LEVEL
    });
    if let Err(err) = init_logging(level, log_dir) {
        eprintln!("logging disabled: {err}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = StoreConfig::new(cli.data_file);
    match cli.command {
        Commands::Add { title, content } => {
            let mut store = open_store(&config)?;
            match store.add(title, content) {
                Ok(_) => {
                    println!("Entry added successfully!");
                    Ok(())
                }
                Err(StoreError::Validation(_)) => {
                    Err("Please provide both title and content.".to_string())
                }
                Err(err) => {
                    error!("event=cli_add module=cli status=error error={err}");
                    Err(err.to_string())
                }
            }
        }
        Commands::Search { query, limit } => {
            let store = open_store(&config)?;
            let mut search = SearchQuery::new(query.as_str());
            search.limit = limit;
            let results = store.search_with(&search);
            println!("Search Results for '{query}':");
            if results.is_empty() {
                println!("No matching entries found.");
            }
            print_entries(&results, false);
            Ok(())
        }
        Commands::List { preview } => {
            let store = open_store(&config)?;
            print_entries(&store.list_all(), preview);
            Ok(())
        }
        Commands::Extract { file, mime } => {
            let kind = match mime {
                Some(mime) => DocumentKind::from_mime(&mime),
                None => DocumentKind::from_path(&file),
            }
            .map_err(|err| err.to_string())?;
            let bytes = std::fs::read(&file)
                .map_err(|err| format!("failed to read `{}`: {err}", file.display()))?;
            let text = extract_text(&bytes, kind).map_err(|err| err.to_string())?;
            println!("{text}");
            Ok(())
        }
        Commands::Faq => {
            for item in faq_items() {
                println!("Q: {}", item.question);
                println!("A: {}", item.answer);
                println!("---");
            }
            Ok(())
        }
        Commands::Version => {
            println!("knowbase {}", core_version());
            Ok(())
        }
    }
}

fn open_store(
    config: &StoreConfig,
) -> Result<KnowledgeStore<JsonFileEntryRepository>, String> {
    KnowledgeStore::open(config).map_err(|err| match err {
        StoreError::CorruptState(_) => format!(
            "{err}\nrefusing to start; fix or move `{}` and retry",
            config.backing_path.display()
        ),
        other => other.to_string(),
    })
}

fn print_entries(entries: &[Entry], preview: bool) {
    for entry in entries {
        println!("### {}", entry.title);
        if preview {
            println!("{}", derive_preview(&entry.content).unwrap_or_default());
        } else {
            println!("{}", entry.content);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn search_accepts_global_data_file_after_subcommand() {
        let cli = Cli::try_parse_from([
            "knowbase",
            "search",
            "python",
            "--data-file",
            "/tmp/kb.json",
        ])
        .expect("global flag after subcommand should parse");
        assert_eq!(cli.data_file.to_str(), Some("/tmp/kb.json"));
        assert!(matches!(cli.command, Commands::Search { ref query, limit: None } if query == "python"));
    }

    #[test]
    fn add_defaults_missing_fields_to_empty() {
        let cli = Cli::try_parse_from(["knowbase", "add", "--title", "only"])
            .expect("content is optional at parse time");
        match cli.command {
            Commands::Add { title, content } => {
                assert_eq!(title, "only");
                assert!(content.is_empty());
            }
            _ => panic!("expected add command"),
        }
    }
}
