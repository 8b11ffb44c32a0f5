use anyhow::{bail, Context, Result};
use clap::Parser;
use f1ingest::{config, script, upload};
use std::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();
    info!("F1 data ingestion for Firebolt geospatial analytics");

    // ─── 2) resolve configuration ────────────────────────────────────
    let args = config::Args::parse();
    if !args.data_dir.exists() {
        bail!(
            "data directory not found at {}; download the F1 dataset and place it there",
            args.data_dir.display()
        );
    }
    let cfg = config::resolve(args)?;
    info!(
        data_dir = %cfg.data_dir.display(),
        bucket = %cfg.bucket,
        prefix = %cfg.prefix,
        "configuration"
    );

    // ─── 3) upload to S3, behind a confirmation ──────────────────────
    if config::confirm("Proceed with S3 upload? (y/n): ")? {
        let client = upload::make_s3_client().await;
        let uploaded = upload::upload_all(&client, &cfg.bucket, &cfg.data_dir, &cfg.prefix).await;
        info!(count = uploaded.len(), "files uploaded to S3");
    } else {
        info!("skipping S3 upload");
    }

    // ─── 4) generate and save the Firebolt script ────────────────────
    let sql = script::generate(&cfg.bucket, &cfg.prefix);
    fs::write(&cfg.output, sql)
        .with_context(|| format!("writing {}", cfg.output.display()))?;
    info!(path = %cfg.output.display(), "SQL script saved");

    println!("Next steps:");
    println!("  1. Log into your Firebolt account and create an engine (S size is sufficient)");
    println!("  2. Run the generated script: {}", cfg.output.display());
    println!("  3. Explore the data with your own geospatial queries");

    Ok(())
}
