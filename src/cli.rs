//! Command-line surface: argument definitions and command handlers.
//!
//! The CLI is a thin wrapper: it parses intent, forwards it to the
//! mutation operations, and renders the derived views. Destructive-action
//! confirmation lives here, not in the core.

use std::io::{self, Write as _};
use std::sync::Arc;

use anyhow::Context as _;
use chrono::{Local, NaiveDate};
use clap::{CommandFactory as _, Parser, Subcommand};
use clap_complete::Shell;

use crate::case::{CaseDraft, CaseType};
use crate::config::DocketConfig;
use crate::ops;
use crate::render;
use crate::storage::FsBackend;
use crate::store::CaseStore;
use crate::views::{self, CaseFilter};

/// Local-first court-case docket tracker.
#[derive(Debug, Parser)]
#[command(name = "docket", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new case on the docket.
    Add {
        /// Court-assigned case number, e.g. CV-2026-0142.
        #[arg(long = "number")]
        case_number: String,
        /// Court the case is filed in.
        #[arg(long)]
        court: String,
        /// Case category: civil, criminal, family, or property.
        #[arg(long = "type", default_value = "civil")]
        case_type: CaseType,
        /// Client represented in the case.
        #[arg(long)]
        client: String,
        /// Opposing party, if known.
        #[arg(long, default_value = "")]
        opponent: String,
        /// Next hearing date (YYYY-MM-DD).
        #[arg(long)]
        hearing: NaiveDate,
        /// Free-form notes.
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List cases, optionally filtered.
    List {
        /// Case-insensitive substring match on case number or client.
        #[arg(long)]
        search: Option<String>,
        /// Exact court name (see `docket courts`).
        #[arg(long)]
        court: Option<String>,
        /// Exact case category.
        #[arg(long = "type")]
        case_type: Option<CaseType>,
    },

    /// Show hearings from today onward, soonest first.
    Upcoming,

    /// List the courts appearing on the docket.
    Courts,

    /// Adjourn a case: push its hearing one month out.
    Advance {
        /// Case ID as shown in `docket list`.
        id: i64,
    },

    /// Remove a case from the docket.
    Delete {
        /// Case ID as shown in `docket list`.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

pub fn run(cli: Cli, config: &DocketConfig) -> anyhow::Result<()> {
    // Completions need no store and must not take the data-directory lock.
    if let Command::Completions { shell } = cli.command {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "docket", &mut io::stdout());
        return Ok(());
    }

    let backend = FsBackend::open(&config.data_dir).with_context(|| {
        format!("opening data directory {}", config.data_dir.display())
    })?;
    let mut store = CaseStore::new(Arc::new(backend));
    store.initialize();
    let today = Local::now().date_naive();

    match cli.command {
        Command::Add {
            case_number,
            court,
            case_type,
            client,
            opponent,
            hearing,
            notes,
        } => {
            let draft = CaseDraft {
                case_number,
                court_name: court,
                case_type,
                client_name: client,
                opponent_name: opponent,
                hearing_date: Some(hearing),
                notes,
            };
            let case = ops::create_case(&mut store, draft)?;
            println!(
                "Recorded case {} (id {}), hearing {}.",
                case.case_number, case.id, case.hearing_date
            );
        }

        Command::List {
            search,
            court,
            case_type,
        } => {
            let filter = CaseFilter {
                search,
                court,
                case_type,
            };
            let cases = views::filtered_cases(store.cases(), &filter);
            if cases.is_empty() {
                println!("No cases on the docket.");
            } else {
                termimad::print_text(&render::case_table(&cases));
            }
        }

        Command::Upcoming => {
            let upcoming = views::upcoming_hearings(store.cases(), today);
            if upcoming.is_empty() {
                println!("No upcoming hearings.");
            } else {
                termimad::print_text(&render::upcoming_table(&upcoming, today));
            }
        }

        Command::Courts => {
            let courts = views::distinct_courts(store.cases());
            if courts.is_empty() {
                println!("No cases on the docket.");
            } else {
                termimad::print_text(&render::court_list(&courts));
            }
        }

        Command::Advance { id } => match ops::advance_hearing(&mut store, id) {
            Some(case) => println!(
                "Case {} adjourned; next hearing {}.",
                case.case_number, case.hearing_date
            ),
            None => println!("No case with id {id}."),
        },

        Command::Delete { id, yes } => {
            let target = store.cases().iter().find(|case| case.id == id).cloned();
            match target {
                None => println!("No case with id {id}."),
                Some(case) => {
                    let confirmed = yes
                        || confirm(&format!(
                            "Delete case {} ({})?",
                            case.case_number, case.client_name
                        ))?;
                    if confirmed {
                        ops::delete_case(&mut store, id);
                        println!("Deleted case {}.", case.case_number);
                    } else {
                        println!("Kept case {}.", case.case_number);
                    }
                }
            }
        }

        // Handled before the store was opened.
        Command::Completions { .. } => {}
    }

    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush().context("flushing confirmation prompt")?;
    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("reading confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
