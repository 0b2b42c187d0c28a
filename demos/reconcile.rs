//! Command line reconciliation example
//!
//! ```text
//! RUST_LOG=debug cargo run --example reconcile -- \
//!     --system system.csv --bank bank_BCA.csv --bank bank_BNI.csv \
//!     --start 2024-01-01 --end 2024-01-31
//! ```

use clap::Parser;
use reconciliation_core::utils::{validate_date_range, validate_feed_file_name, CsvFileSource};
use reconciliation_core::{
    render_summary, ApiResponse, BoundaryMode, ReconcileConfig, Reconciler, RowPolicy,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reconcile")]
#[command(about = "Reconcile system transactions against bank statements", long_about = None)]
struct Args {
    /// System transactions CSV
    #[arg(long)]
    system: PathBuf,

    /// Bank statement CSV (repeatable)
    #[arg(long, required = true)]
    bank: Vec<PathBuf>,

    /// First day of the window, YYYY-MM-DD
    #[arg(long)]
    start: String,

    /// Last day of the window, YYYY-MM-DD
    #[arg(long)]
    end: String,

    /// Exclude records sitting exactly on a bound
    #[arg(long)]
    exclusive: bool,

    /// Abort on the first malformed field instead of warning
    #[arg(long)]
    strict: bool,

    /// Print the JSON envelope instead of the text summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = ReconcileConfig::default();
    if args.exclusive {
        config = config.with_boundary(BoundaryMode::Exclusive);
    }
    if args.strict {
        config = config.with_row_policy(RowPolicy::Strict);
    }

    let range = validate_date_range(&args.start, &args.end, config.boundary)?;
    for path in &args.bank {
        validate_feed_file_name(&path.to_string_lossy())?;
    }

    let source = CsvFileSource::new(&args.system, config.clone()).statements(args.bank.clone());
    let result = Reconciler::new(config).run(&source, &range).await;

    if args.json {
        let response = ApiResponse::from(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let report = result?;
    print!("{}", render_summary(&report));
    Ok(())
}
