//! CLI argument parsing and validation module
//!
//! Handles command-line interface using clap, including:
//! - `scan` with set selection, ingest filter and worker options
//! - `sets list|reconcile` and `filters list` for store inspection
//! - Output format selection (human/JSON)

use anyhow::{anyhow, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};

use triageset::constants::{WORKER_THREADS_MAX, WORKER_THREADS_MIN};
use triageset::ingest::selection::validate_selection;
use triageset::models::ScanConfig;

/// Parsed top-level command
#[derive(Debug, Clone)]
pub enum CliCommand {
    Scan(ScanConfig),
    ListSets { json_output: bool },
    ReconcileSets,
    ListFilters { json_output: bool },
}

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub command: CliCommand,
}

fn json_flag() -> Arg {
    Arg::new("json")
        .short('j')
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

pub fn build_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("TRIAGESET_VERSION"))
        .long_version(concat!(env!("TRIAGESET_VERSION"), " (", env!("GIT_HASH"), ")"))
        .about("Flag interesting files using user-defined rule sets")
        .long_about(
            "Evaluate files against named sets of rules, reconcile bundled standard sets \
             with user definitions, and report every file that belongs to an enabled set.",
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file (defaults to the user config directory)")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .subcommand(
            Command::new("scan")
                .about("Scan files and report members of the enabled sets")
                .arg(
                    Arg::new("path")
                        .value_name("PATH")
                        .help("Files or directories to scan (defaults to the current directory)")
                        .action(ArgAction::Append)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("set")
                        .short('s')
                        .long("set")
                        .value_name("PATTERN")
                        .help("Enable only sets matching the name or glob (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("filter")
                        .short('f')
                        .long("filter")
                        .value_name("NAME")
                        .help("File ingest filter to apply"),
                )
                .arg(
                    Arg::new("threads")
                        .short('t')
                        .long("threads")
                        .value_name("N")
                        .help("Number of worker threads")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(json_flag())
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("Suppress progress messages")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("sets")
                .about("Inspect interesting files sets")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List interesting files sets").arg(json_flag()))
                .subcommand(
                    Command::new("reconcile")
                        .about("Merge the bundled standard sets into the user store"),
                ),
        )
        .subcommand(
            Command::new("filters")
                .about("Inspect file ingest filters")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List file ingest filters").arg(json_flag())),
        )
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    parse_from(build_command().get_matches())
}

fn parse_from(matches: ArgMatches) -> Result<CliArgs> {
    let config_path = matches.get_one::<PathBuf>("config").cloned();

    let command = match matches.subcommand() {
        Some(("scan", scan)) => CliCommand::Scan(parse_scan(scan)?),
        Some(("sets", sets)) => match sets.subcommand() {
            Some(("list", list)) => CliCommand::ListSets {
                json_output: list.get_flag("json"),
            },
            Some(("reconcile", _)) => CliCommand::ReconcileSets,
            _ => return Err(anyhow!("Unknown sets subcommand")),
        },
        Some(("filters", filters)) => match filters.subcommand() {
            Some(("list", list)) => CliCommand::ListFilters {
                json_output: list.get_flag("json"),
            },
            _ => return Err(anyhow!("Unknown filters subcommand")),
        },
        _ => return Err(anyhow!("No subcommand given")),
    };

    Ok(CliArgs { config_path, command })
}

fn parse_scan(matches: &ArgMatches) -> Result<ScanConfig> {
    let mut roots = Vec::new();
    if let Some(paths) = matches.get_many::<PathBuf>("path") {
        for path in paths {
            if !path.exists() {
                return Err(anyhow!("Path does not exist: {}", path.display()));
            }
            roots.push(path.clone());
        }
    } else {
        roots.push(Path::new(".").to_path_buf());
    }

    let set_selections: Vec<String> = matches
        .get_many::<String>("set")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    validate_selection(&set_selections)?;

    let worker_threads = matches.get_one::<usize>("threads").copied();
    if let Some(threads) = worker_threads {
        if !(WORKER_THREADS_MIN..=WORKER_THREADS_MAX).contains(&threads) {
            return Err(anyhow!(
                "--threads must be between {} and {}",
                WORKER_THREADS_MIN,
                WORKER_THREADS_MAX
            ));
        }
    }

    Ok(ScanConfig {
        roots,
        set_selections,
        ingest_filter: matches.get_one::<String>("filter").cloned(),
        worker_threads,
        json_output: matches.get_flag("json"),
        quiet_mode: matches.get_flag("quiet"),
    })
}
