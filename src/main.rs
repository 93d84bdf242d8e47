use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use rsna_miccai::{RsnaMiccai, CITATION, MODALITIES};

/// Index an RSNA-MICCAI challenge download and report what was found.
#[derive(Debug, Parser)]
#[command(name = "rsna-miccai", version)]
struct Args {
    /// Dataset root (the folder holding train_labels.csv, train/ and test/).
    root: PathBuf,

    /// Index the unlabelled test split instead of train.
    #[arg(long)]
    test: bool,

    /// Print the subject records as JSON instead of a summary.
    #[arg(long)]
    json: bool,

    /// Print the summary counts as JSON.
    #[arg(long, conflicts_with = "json")]
    stats: bool,

    /// Only print the first N subjects (JSON output).
    #[arg(long)]
    limit: Option<usize>,

    /// Print the dataset citation and exit.
    #[arg(long)]
    cite: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.cite {
        println!("{CITATION}");
        return Ok(());
    }

    let dataset = RsnaMiccai::new(&args.root, !args.test)
        .with_context(|| format!("indexing {}", args.root.display()))?;

    if args.json {
        let limit = args.limit.unwrap_or(usize::MAX);
        let subjects: Vec<_> = dataset.iter().take(limit).collect();
        let out = serde_json::to_string_pretty(&subjects).context("serializing subjects")?;
        println!("{out}");
        return Ok(());
    }

    let summary = dataset.summary();
    if args.stats {
        let out = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        println!("{out}");
        return Ok(());
    }

    let split = if dataset.is_train() { "train" } else { "test" };
    println!(
        "{} subjects in {} split of {}",
        summary.subjects,
        split,
        dataset.root_dir().display()
    );
    for (label, count) in &summary.labels {
        println!("  label {label}: {count}");
    }
    for modality in MODALITIES {
        let counts = summary.modality(modality);
        println!(
            "  {:<6} {} single file, {} series",
            modality.as_str(),
            counts.single_file,
            counts.series
        );
    }
    Ok(())
}
