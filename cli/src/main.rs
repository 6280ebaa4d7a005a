//! posreport CLI - POS module feature report generator

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use posreport::font::{init_global, FontConfig};
use posreport::{catalog, ReportBuilder};

/// Renders the fixed module catalog to
/// `./docs/POS_Core_Module_Features_<date>.pdf` using the font at
/// `/Library/Fonts/Arial Unicode.ttf`.
#[derive(Parser)]
#[command(name = "posreport")]
#[command(version)]
#[command(about = "Generate the POS core module feature report as PDF", long_about = None)]
struct Cli {}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .init();

    Cli::parse();

    match run(Path::new(".")) {
        Ok(path) => println!("{} {}", "PDF generated:".green(), path.display()),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run(base: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Fonts first: a missing font must fail before anything touches the disk.
    let registry = init_global(&FontConfig::default())?;

    let rows = catalog::module_rows();
    let meta = catalog::default_meta(rows.len(), catalog::catalog_date());
    let path = ReportBuilder::new(registry).build(posreport::default_output_path(base), &rows, &meta)?;

    log::debug!("Wrote {}", path.display());
    Ok(resolved(path))
}

/// Absolute form of a path that was just written.
fn resolved(path: PathBuf) -> PathBuf {
    fs::canonicalize(&path).unwrap_or(path)
}
