//! Stowage CLI: inventory a file tree, pack manifests into capacity-bounded
//! buckets, and verify manifests against their asset folders.

use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;

use stowage_core::config::ArchiveConfig;
use stowage_core::record::MANIFEST_HEADER;
use stowage_exec::Materializer;

#[derive(Parser)]
#[command(name = "stowage")]
#[command(about = "Inventory, bucket, and verify archival file trees", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a file manifest for an asset tree
    Manifest {
        /// Asset tree to inventory; the manifest lands in its parent directory
        #[arg(required = true)]
        root: PathBuf,
    },

    /// Verify a manifest against its sibling assets folder
    Verify {
        /// Path to a file_manifest.csv
        #[arg(required = true)]
        manifest: PathBuf,

        /// Require the standard four-column header, byte for byte
        #[arg(long)]
        strict_header: bool,
    },

    /// Pack one or more manifests into capacity-bounded buckets
    Pack {
        /// Manifest files to pack, in order
        manifests: Vec<PathBuf>,

        /// Directory holding one subdirectory per source manifest
        /// (alternative to listing manifests explicitly)
        #[arg(long)]
        input_root: Option<PathBuf>,

        /// Output directory for buckets
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Bucket capacity in bytes (overrides env)
        #[arg(long)]
        capacity: Option<u64>,

        /// Flag duplicate digests instead of packing them again
        #[arg(long)]
        dedupe: bool,

        /// Seen-digest set to load before the run and save after it
        #[arg(long)]
        seen: Option<PathBuf>,

        /// Bucket directory prefix (overrides env)
        #[arg(long)]
        prefix: Option<String>,

        /// First bucket sequence number (overrides env)
        #[arg(long)]
        start: Option<u32>,

        /// move, copy, or plan-only (overrides env)
        #[arg(long)]
        mode: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose { "debug" } else { "info" })
        .init();

    match cli.command {
        Commands::Manifest { root } => match stowage_io::generate_manifest(&root) {
            Ok(path) => println!("✓ Manifest written: {}", path.display()),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Verify {
            manifest,
            strict_header,
        } => {
            let expected: Option<&[&str]> = if strict_header {
                Some(&MANIFEST_HEADER)
            } else {
                None
            };
            match stowage_exec::verify_manifest(&manifest, expected) {
                Ok(true) => println!("✓ Manifest valid"),
                Ok(false) => {
                    println!("✗ Manifest invalid");
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Pack {
            manifests,
            input_root,
            output,
            capacity,
            dedupe,
            seen,
            prefix,
            start,
            mode,
        } => {
            if let Err(e) = run_pack(
                manifests, input_root, output, capacity, dedupe, seen, prefix, start, mode,
            ) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run_pack(
    mut manifests: Vec<PathBuf>,
    input_root: Option<PathBuf>,
    output: PathBuf,
    capacity: Option<u64>,
    dedupe: bool,
    seen: Option<PathBuf>,
    prefix: Option<String>,
    start: Option<u32>,
    mode: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Env fills the gaps the flags leave; flags win.
    let mut config = ArchiveConfig::from_env();
    if let Some(v) = capacity {
        config.bucket_capacity_bytes = v;
    }
    if dedupe {
        config.dedupe_enabled = true;
    }
    if let Some(p) = prefix {
        config.bucket_prefix = p;
    }
    if let Some(s) = start {
        config.start_sequence = s;
    }
    if let Some(m) = mode {
        config.mode = m.parse()?;
    }
    config.validate()?;

    if let Some(root) = input_root {
        manifests.extend(stowage_io::discover_manifests(&root)?);
    }
    if manifests.is_empty() {
        return Err("no manifests to pack (list paths or pass --input-root)".into());
    }

    let mut seen_set = match &seen {
        Some(path) if path.exists() => stowage_io::load_digest_set(path)?,
        _ => BTreeSet::new(),
    };

    let outcome = stowage_planner::plan(
        &manifests,
        config.bucket_capacity_bytes,
        config.dedupe_enabled,
        &mut seen_set,
    )?;

    let materializer = Materializer::new(
        &output,
        config.bucket_prefix.as_str(),
        config.start_sequence,
        config.mode,
    );
    let report = materializer.materialize(&outcome)?;

    if let Some(path) = &seen {
        stowage_io::save_digest_set(&seen_set, path)?;
    }

    println!(
        "✓ Packed {} buckets ({} duplicates, {} oversized)",
        outcome.buckets.len(),
        outcome.duplicates.len(),
        outcome.oversized.len()
    );
    println!(
        "  Relocated {} files, {:.2} GB",
        report.files_relocated,
        report.bytes_relocated as f64 / 1e9
    );
    Ok(())
}
