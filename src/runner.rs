// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use crate::config::{display_label, find_config, DomainDir, IndexConfig};
use crate::errors::IndexError;
use crate::index::ResultIndex;
use crate::query::{FileView, Selection};
use crate::report::{GroupReport, SummaryReport, ViewReport};
use crate::scan::{format_timestamp, SequenceGroup};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
struct Cli {
    /// Configuration file (default: .mgeviewconfig in $HOME, then in the current directory)
    #[arg(short, long = "config")]
    config: Option<PathBuf>,

    /// Result directory as LABEL=DIR; may be repeated, replaces the configured directories
    #[arg(short, long = "domain")]
    domains: Vec<DomainDir>,

    /// Print JSON instead of text
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sequences, islands and time of last change, per domain
    Summary,

    /// List sequences and their result files
    List {
        /// Only this domain (case-insensitive)
        #[arg(short, long)]
        domain: Option<String>,
    },

    /// Show one sequence
    Show { seq_id: String },

    /// Print a result file, or one island of it
    View {
        seq_id: String,

        filename: String,

        /// Island id, e.g. GI:001
        #[arg(short, long)]
        gi: Option<String>,

        /// Island coordinates as START-END
        #[arg(short = 'x', long)]
        coordinates: Option<String>,

        /// Show the whole file, ignoring --gi and --coordinates
        #[arg(short, long)]
        reset: bool,
    },
}

fn configured_domains(cli: &Cli) -> Result<Vec<DomainDir>, IndexError> {
    if !cli.domains.is_empty() {
        return Ok(cli.domains.clone());
    }
    let domains = match cli.config.clone().or_else(find_config) {
        Some(path) => {
            info!("Reading configuration from {}", path.display());
            IndexConfig::from_file(&path)?.domains
        }
        None => Vec::new(),
    };
    if domains.is_empty() {
        return Err(IndexError::Config(String::from(
            "no result directories; use --domain LABEL=DIR or a .mgeviewconfig file",
        )));
    }
    Ok(domains)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), IndexError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_group(group: &SequenceGroup) {
    println!(
        "{}\t{}\t{}\t{} islands\tupdated: {}",
        group.seq_id,
        group.organism,
        display_label(&group.domain),
        group.island_count,
        group.last_updated_text()
    );
    for fname in &group.files {
        println!("    {}", fname);
    }
}

fn print_groups(groups: &[SequenceGroup], json: bool) -> Result<(), IndexError> {
    if json {
        let reports: Vec<GroupReport> = groups.iter().map(GroupReport::from).collect();
        return print_json(&reports);
    }
    for group in groups {
        print_group(group);
    }
    Ok(())
}

pub fn run() -> Result<(), IndexError> {
    env_logger::init();
    info!("Starting log");

    let cli = Cli::parse();
    let index = ResultIndex::new(configured_domains(&cli)?);

    match &cli.command {
        Command::Summary => {
            let summary = index.summary();
            if cli.json {
                let reports: Vec<SummaryReport> =
                    summary.iter().map(SummaryReport::from).collect();
                return print_json(&reports);
            }
            for dom in &summary {
                println!(
                    "{}: {} sequences, {} islands (updated: {})",
                    display_label(&dom.label),
                    dom.sequence_count,
                    dom.island_total,
                    format_timestamp(dom.updated_at.as_ref())
                );
            }
        }
        Command::List { domain } => {
            let groups = match domain {
                Some(label) => index.groups_in_domain(label),
                None => index.groups(),
            };
            print_groups(&groups, cli.json)?;
        }
        Command::Show { seq_id } => {
            let group = index.group(seq_id)?;
            print_groups(std::slice::from_ref(&group), cli.json)?;
        }
        Command::View {
            seq_id,
            filename,
            gi,
            coordinates,
            reset,
        } => {
            let selection = Selection {
                reset: *reset,
                record_id: gi.clone(),
                coordinates: coordinates.clone(),
            };
            let view = index.view_file(seq_id, filename, &selection)?;
            if cli.json {
                return print_json(&ViewReport::from(view));
            }
            if let FileView::Records(records) = &view {
                info!(
                    "{}: {} records ({})",
                    records.filename,
                    records.record_ids.len(),
                    records.record_ids.join(", ")
                );
            }
            println!("{}", view.text());
        }
    }

    Ok(())
}
