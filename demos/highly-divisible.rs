//! Print the first triangular number with more than 500 divisors.

use anyhow::Context;
use clap::Parser;
use exercises::{highly_divisible, Config};

#[derive(Parser, Debug)]
#[command(about = "Find the first triangular number with more than N divisors")]
struct Args {
    /// JSON config file; flags below override it.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Divisor count the answer must exceed.
    #[arg(long)]
    threshold: Option<u64>,

    /// Only look at even triangular numbers (fast for 500, wrong in general).
    #[arg(long)]
    even_only: bool,

    /// Give up after this triangle index.
    #[arg(long)]
    max_index: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut search = match &args.config {
        Some(path) => Config::load(path)?.search,
        None => Config::default().search,
    };
    if let Some(threshold) = args.threshold {
        search.threshold = threshold;
    }
    search.even_only |= args.even_only;
    if args.max_index.is_some() {
        search.max_index = args.max_index;
    }
    log::debug!("search settings: {search:?}");

    let found = highly_divisible::search(search.threshold, &search.options())
        .with_context(|| format!("searching for more than {} divisors", search.threshold))?;
    println!("{}", found.value);

    Ok(())
}
