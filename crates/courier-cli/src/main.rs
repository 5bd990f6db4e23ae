mod agent;
mod report;
mod transfer;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use courier_manifest::{load_manifest, Transfer};
use report::BatchReport;
use transfer::TransferRunner;

/// Retrieve assets from local or remote sources into the assets directory.
#[derive(Parser, Debug)]
#[command(name = "courier")]
struct Args {
    /// JSON manifest listing the assets to retrieve
    manifest: PathBuf,

    /// Directory the assets are copied into
    #[arg(long, default_value = "assets")]
    assets_dir: PathBuf,

    /// Seconds to allow each copy before giving up on it
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let manifest = load_manifest(&args.manifest)
        .with_context(|| format!("failed to load manifest {}", args.manifest.display()))?;

    if manifest.has_remote() {
        println!("Remote files detected. Checking SSH agent...");
        agent::report_loaded_keys().await;
        println!();
    }

    let runner = TransferRunner::new(args.assets_dir, Duration::from_secs(args.timeout_secs));
    let mut report = BatchReport::default();

    for entry in &manifest.entries {
        let (source, destination) = match entry.require_paths() {
            Ok(paths) => paths,
            Err(reason) => {
                println!(
                    "Skipping invalid entry ({}): {}",
                    reason,
                    serde_json::to_string(entry)?
                );
                report.failure();
                continue;
            }
        };

        let dest = runner.destination(destination);
        let outcome = match entry.transfer() {
            Transfer::Remote { user, host } => {
                println!(
                    "Copying (remote): {}@{}:{} -> {}",
                    user,
                    host,
                    source,
                    dest.display()
                );
                runner.copy_remote(source, &dest, &user, &host).await
            }
            Transfer::Local => {
                println!("Copying (local): {} -> {}", source, dest.display());
                runner.copy_local(source, &dest).await
            }
        };

        match outcome {
            Ok(()) => {
                println!("  Done");
                report.success();
            }
            Err(message) => {
                println!("  Error: {}", message);
                report.failure();
            }
        }
    }

    println!();
    println!("{}", report.summary());

    if report.failed() > 0 {
        std::process::exit(1);
    }
    Ok(())
}
