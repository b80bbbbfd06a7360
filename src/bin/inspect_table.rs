use anyhow::{Context, Result};
use oceantemp::{logging, render, table::parse_markup};
use std::{env, fs, path::Path, process::exit};

fn main() {
    // Expect one HTML file, optionally followed by `--table` for the console view.
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 || (args.len() == 3 && args[2] != "--table") {
        eprintln!("Usage: {} <HTML_FILE> [--table]", args[0]);
        exit(1);
    }
    logging::init(env::var("DEBUG").as_deref() == Ok("1"));

    if let Err(e) = inspect(Path::new(&args[1]), args.len() == 3) {
        eprintln!("Error: {:#}", e);
        exit(oceantemp::FATAL_EXIT_CODE);
    }
}

/// Parse a saved page offline and print what the extractor makes of it.
fn inspect(path: &Path, as_table: bool) -> Result<()> {
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let table = parse_markup(&raw).with_context(|| format!("parsing {}", path.display()))?;

    if as_table {
        render::print_table(&table)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&table)?);
    }
    eprintln!("{}: {}", path.display(), table);
    Ok(())
}
