use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pattern_core::CategoryFilter;
use pattern_core::model::{PatternId, Section};
use services::AppServices;
use tracing_subscriber::EnvFilter;

mod commands;
mod db_url;
mod quiz_cli;

use db_url::{DEFAULT_DB_URL, normalize_sqlite_url, prepare_sqlite_file};

/// Browse design patterns, track what you've studied and quiz yourself.
#[derive(Debug, Parser)]
#[command(name = "patterns", version, about)]
struct Cli {
    /// SQLite database URL
    #[arg(long = "db", global = true, env = "PATTERNS_DB_URL", default_value = DEFAULT_DB_URL)]
    db_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the catalogue, marking studied patterns
    List {
        /// all, creational, structural or behavioral
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
    },
    /// Print one section of a pattern and record it as opened
    Show {
        id: PatternId,
        #[arg(long, default_value = "description")]
        section: Section,
    },
    /// Record several sections as opened at once
    Open {
        id: PatternId,
        #[arg(required = true)]
        sections: Vec<Section>,
    },
    /// Studied count per category and the studied list
    Progress,
    /// Run a quiz from a JSON file, reading answers from stdin
    Quiz { file: PathBuf },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn open_services(raw_url: &str) -> Result<AppServices, Box<dyn Error>> {
    let db_url = normalize_sqlite_url(raw_url)?;
    prepare_sqlite_file(&db_url)?;
    tracing::debug!(db_url = %db_url, "opening database");
    Ok(AppServices::new_sqlite(&db_url).await?)
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Quiz { file } => {
            let quiz = quiz_cli::load_quiz(&file)?;
            let stdin = io::stdin();
            quiz_cli::run_quiz(quiz, stdin.lock(), &mut out)?;
        }
        command => {
            let services = open_services(&cli.db_url).await?;
            match command {
                Command::List { category } => {
                    commands::list(&services, category, &mut out).await?;
                }
                Command::Show { id, section } => {
                    commands::show(&services, id, section, &mut out).await?;
                }
                Command::Open { id, sections } => {
                    commands::open(&services, id, &sections, &mut out).await?;
                }
                Command::Progress => commands::progress(&services, &mut out).await?,
                Command::Quiz { .. } => {}
            }
        }
    }

    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;
    use pattern_core::model::PatternCategory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_section_alias() {
        let cli = Cli::try_parse_from(["patterns", "show", "7", "--section", "pros & cons"]).unwrap();
        match cli.command {
            Command::Show { id, section } => {
                assert_eq!(id, PatternId::new(7));
                assert_eq!(section, Section::ProsAndCons);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_list_category_and_global_db() {
        let cli = Cli::try_parse_from([
            "patterns",
            "list",
            "--category",
            "Structural",
            "--db",
            "sqlite::memory:",
        ])
        .unwrap();
        assert_eq!(cli.db_url, "sqlite::memory:");
        match cli.command {
            Command::List { category } => {
                assert_eq!(category, CategoryFilter::Only(PatternCategory::Structural));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn open_requires_sections() {
        assert!(Cli::try_parse_from(["patterns", "open", "3"]).is_err());
        let cli = Cli::try_parse_from(["patterns", "open", "3", "case:code", "result"]).unwrap();
        match cli.command {
            Command::Open { sections, .. } => {
                assert_eq!(sections, vec![Section::Code, Section::Result]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_ids_and_sections() {
        assert!(Cli::try_parse_from(["patterns", "show", "bridge"]).is_err());
        assert!(Cli::try_parse_from(["patterns", "show", "7", "--section", "diagram"]).is_err());
    }
}
