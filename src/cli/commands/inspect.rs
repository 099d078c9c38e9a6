//! Inspect command - Summarise a persisted snapshot history

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    adapters::json_snapshot_repository::load_document,
    cli::output::{print_kv, print_section, print_subsection},
    q_learning::TableSnapshot,
};

#[derive(Parser, Debug)]
#[command(about = "Show the greedy spacing per pair in a snapshot history")]
pub struct InspectArgs {
    /// Snapshot history file
    #[arg(default_value = "Data/data_Q.json")]
    pub snapshot: PathBuf,

    /// Update counter of the entry to show (defaults to the latest)
    #[arg(long)]
    pub entry: Option<u64>,

    /// Also print every option estimate
    #[arg(long)]
    pub all: bool,
}

fn print_table(snapshot: &TableSnapshot, all: bool) {
    for agent in snapshot.agents() {
        print_subsection(&format!("Agent {agent}"));
        for neighbour in snapshot.neighbours(agent) {
            let label = format!("Neighbour {neighbour}");
            match snapshot.greedy(agent, neighbour) {
                Some((value, estimate)) => {
                    print_kv(&label, &format!("{value} (Q = {estimate:.6})"));
                }
                None => print_kv(&label, "-"),
            }
            if !all {
                continue;
            }
            for (option, estimate) in snapshot.options(agent, neighbour).into_iter().flatten() {
                println!("    {:>8}  {estimate:.6}", option.to_string());
            }
        }
    }
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let document = load_document(&args.snapshot)?;

    let (key, snapshot) = match args.entry {
        Some(key) => (
            key,
            document
                .get(key)
                .ok_or_else(|| anyhow!("No entry {key} in {}", args.snapshot.display()))?,
        ),
        None => document
            .latest()
            .ok_or_else(|| anyhow!("{} holds no entries", args.snapshot.display()))?,
    };

    print_section("Snapshot History");
    print_kv("File", &args.snapshot.display().to_string());
    print_kv("Entries", &document.len().to_string());
    if let (Some(first), Some(last)) = (document.keys().next(), document.keys().last()) {
        print_kv("Updates", &format!("{first}..={last}"));
    }
    print_kv("Showing", &key.to_string());

    print_table(snapshot, args.all);
    Ok(())
}
