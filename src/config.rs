//! Startup configuration. Everything that touches the environment or the
//! terminal lives here, resolved once, so the generator and the upload
//! planner stay free of globals.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const BUCKET_ENV: &str = "FIREBOLT_S3_BUCKET";

/// Command-line args: local data directory, bucket, output script path.
#[derive(Parser, Debug)]
#[command(about = "Upload F1 CSVs to S3 and emit the Firebolt setup script")]
pub struct Args {
    /// Directory holding the F1 CSV exports
    #[arg(long, default_value = "data/f1-data/F1-World-Championship-Data")]
    pub data_dir: PathBuf,

    /// S3 bucket; falls back to FIREBOLT_S3_BUCKET, then a prompt
    #[arg(long)]
    pub bucket: Option<String>,

    /// Where to write the generated SQL script
    #[arg(long, default_value = "f1_firebolt_setup.sql")]
    pub output: PathBuf,
}

/// Settled once at startup; the prefix in particular is never recomputed,
/// so the uploaded objects and the generated script always agree on it.
#[derive(Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub bucket: String,
    pub prefix: String,
    pub output: PathBuf,
}

pub fn resolve(args: Args) -> Result<Config> {
    let bucket = match args.bucket {
        Some(bucket) => bucket,
        None => match std::env::var(BUCKET_ENV) {
            Ok(bucket) if !bucket.trim().is_empty() => bucket,
            _ => prompt("Enter your S3 bucket name (e.g., my-firebolt-data): ")?,
        },
    };
    Ok(Config {
        data_dir: args.data_dir,
        bucket,
        prefix: date_prefix(Local::now().date_naive()),
        output: args.output,
    })
}

/// `f1-data/YYYYMMDD` for the given run date.
pub fn date_prefix(date: NaiveDate) -> String {
    format!("f1-data/{}", date.format("%Y%m%d"))
}

/// Ask a yes/no question on stdin; only a `y` answer counts as yes.
pub fn confirm(question: &str) -> Result<bool> {
    Ok(prompt(question)?.to_lowercase() == "y")
}

fn prompt(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush().context("flushing prompt")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading stdin")?;
    Ok(line.trim().to_string())
}
