use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dna_fmindex::FmIndex;

#[derive(Parser, Debug)]
#[command(name = "dna-fmindex", about = "FM-index builder and search tool for DNA sequences")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build an index from a FASTA file, writing `<fasta>.{bwt,occ,sa}`.
    Index {
        /// Path to a FASTA file holding a single record over {A,C,G,T}.
        fasta: PathBuf,
    },
    /// Load a previously built index and search it for one or more patterns.
    Search {
        /// Path prefix passed to `index` (without the `.bwt`/`.occ`/`.sa` suffix).
        prefix: PathBuf,
        /// Patterns to search for, each over {A,C,G,T}.
        patterns: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Index { fasta } => run_index(fasta)?,
        Commands::Search { prefix, patterns } => run_search(prefix, patterns)?,
    }

    Ok(())
}

fn run_index(fasta_path: PathBuf) -> Result<()> {
    let text = read_fasta_sequence(&fasta_path)
        .with_context(|| format!("failed to read FASTA file {}", fasta_path.display()))?;

    let index = FmIndex::build(&text)
        .with_context(|| format!("failed to build index from {}", fasta_path.display()))?;

    index
        .save(&fasta_path)
        .with_context(|| format!("failed to write index files for {}", fasta_path.display()))?;

    println!(
        "indexed {} ({} bytes including sentinel)",
        fasta_path.display(),
        index.len()
    );
    Ok(())
}

fn run_search(prefix: PathBuf, patterns: Vec<String>) -> Result<()> {
    let index = FmIndex::load(&prefix)
        .with_context(|| format!("failed to load index at {}", prefix.display()))?;

    for pattern in &patterns {
        match index.search_range(pattern.as_bytes()) {
            Ok(range) => {
                let mut positions = index.locate_range(range);
                positions.sort_unstable();
                println!(
                    "{pattern}\tinterval=({}, {})\tcount={}\tpositions={:?}",
                    range.bot,
                    range.top,
                    positions.len(),
                    positions
                );
            }
            Err(err) => {
                println!("{pattern}\terror={err}");
            }
        }
    }

    Ok(())
}

/// Reads a single-record FASTA file, dropping the header line and any
/// newlines, upper-casing the sequence, and resolving ambiguity codes
/// (N, R, Y, ...) by cycling through A/C/G/T, per the text-ingestion
/// contract: the core consumes bytes restricted to {A,C,G,T} and expects
/// this collaborator to have already resolved anything else.
fn read_fasta_sequence(path: &PathBuf) -> Result<Vec<u8>> {
    let contents = fs::read_to_string(path)?;
    let mut sequence = Vec::with_capacity(contents.len());
    const CYCLE: [u8; 4] = *b"ACGT";
    let mut cycle_pos = 0usize;

    for line in contents.lines() {
        if line.starts_with('>') {
            continue;
        }
        for byte in line.trim().bytes().map(|b| b.to_ascii_uppercase()) {
            let resolved = if matches!(byte, b'A' | b'C' | b'G' | b'T') {
                byte
            } else {
                let replacement = CYCLE[cycle_pos % CYCLE.len()];
                cycle_pos += 1;
                replacement
            };
            sequence.push(resolved);
        }
    }

    Ok(sequence)
}
