//! airscope - terminal summary for air-quality CSV datasets
//!
//! Loads a CSV (explicit path, or the first one found under the working
//! directory), cleans it and prints the dataset report.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

use airscope::data::{find_csv_files, CleanCache, DatasetSource};
use airscope::report::DatasetReport;

fn print_usage() {
    println!("usage: airscope [PATH] [--json]");
    println!();
    println!("  PATH    CSV dataset to summarize; defaults to the first");
    println!("          *.csv found under the current directory");
    println!("  --json  emit the report as JSON instead of text");
}

fn main() -> Result<()> {
    env_logger::init();

    let mut json = false;
    let mut path: Option<PathBuf> = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other if path.is_none() => path = Some(PathBuf::from(other)),
            other => bail!("unexpected argument: {}", other),
        }
    }

    let path = match path {
        Some(path) => path,
        None => find_csv_files(".")
            .context("scanning for CSV files")?
            .into_iter()
            .next()
            .context("no CSV file found under the current directory; pass a path")?,
    };

    let mut cache = CleanCache::new();
    let table = cache
        .get_or_clean(&DatasetSource::path(&path))
        .with_context(|| format!("loading {}", path.display()))?;

    let report = DatasetReport::build(&path.display().to_string(), &table)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
