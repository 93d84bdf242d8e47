use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use rsna_miccai::{ID_KEY, LABELS_FILE, LABEL_KEY, MODALITIES, TEST_DIR, TRAIN_DIR};

/// Write a small synthetic challenge layout for trying out the indexer.
///
/// Image files are placeholders: the indexer never opens them.
#[derive(Debug, Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Output root directory.
    #[arg(default_value = "sample_rsna")]
    out: PathBuf,

    /// Number of labelled training subjects.
    #[arg(long, default_value_t = 12)]
    train: usize,

    /// Number of test subjects.
    #[arg(long, default_value_t = 4)]
    test: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Populate one modality folder: either a single volume or a slice series.
fn write_modality(dir: &Path, rng: &mut SmallRng) -> Result<usize> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    // Roughly a third of the modalities come as a single file.
    let n_files = if rng.gen_bool(1.0 / 3.0) {
        1
    } else {
        rng.gen_range(2..=8)
    };
    for k in 1..=n_files {
        let path = dir.join(format!("Image-{k}.dcm"));
        fs::write(&path, b"DICM").with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(n_files)
}

fn write_split(split_dir: &Path, ids: &[u32], rng: &mut SmallRng) -> Result<usize> {
    let mut files = 0;
    for id in ids {
        let subject_dir = split_dir.join(format!("{id:05}"));
        for modality in MODALITIES {
            files += write_modality(&subject_dir.join(modality.as_str()), rng)?;
        }
    }

    // Non-numeric artifacts the indexer must skip.
    fs::create_dir_all(split_dir.join(".cache"))?;
    fs::write(split_dir.join("README.txt"), b"synthetic sample\n")?;
    Ok(files)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SmallRng::seed_from_u64(args.seed);

    // Identifiers skip values like the real challenge does, and are
    // interleaved between the two splits.
    let mut ids: Vec<u32> = Vec::with_capacity(args.train + args.test);
    let mut next = 0u32;
    while ids.len() < args.train + args.test {
        ids.push(next);
        next += rng.gen_range(1..=3);
    }
    let (train_ids, test_ids): (Vec<u32>, Vec<u32>) = {
        let mut train = Vec::new();
        let mut test = Vec::new();
        for (i, id) in ids.into_iter().enumerate() {
            if test.len() < args.test && (i % 4 == 3 || train.len() == args.train) {
                test.push(id);
            } else {
                train.push(id);
            }
        }
        (train, test)
    };

    fs::create_dir_all(&args.out).with_context(|| format!("creating {}", args.out.display()))?;

    let labels_path = args.out.join(LABELS_FILE);
    let mut writer = csv::Writer::from_path(&labels_path)
        .with_context(|| format!("creating {}", labels_path.display()))?;
    writer.write_record([ID_KEY, LABEL_KEY])?;
    for id in &train_ids {
        let label: u8 = rng.gen_range(0..=1);
        writer.write_record([format!("{id:05}"), label.to_string()])?;
    }
    writer.flush().context("flushing label file")?;

    let train_files = write_split(&args.out.join(TRAIN_DIR), &train_ids, &mut rng)?;
    let test_files = write_split(&args.out.join(TEST_DIR), &test_ids, &mut rng)?;

    log::info!("Seed {}", args.seed);
    println!(
        "Wrote {} train subjects ({train_files} files) and {} test subjects ({test_files} files) to {}",
        train_ids.len(),
        test_ids.len(),
        args.out.display()
    );
    Ok(())
}
