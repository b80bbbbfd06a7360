use anyhow::{Context, Result};
use oceantemp::{
    fetch::HttpSource, logging, render, Config, Error, Workflow, FATAL_EXIT_CODE,
};
use colored::Colorize;
use tracing::{debug, info};

fn run(config: Config) -> Result<()> {
    let source = HttpSource::new(config.timeout)?;
    let workflow = Workflow::new(config, source);
    let table = workflow.extract_data()?;
    render::print_table(&table).context("writing table to stdout")?;
    Ok(())
}

/// One labeled line for the user, whatever the log filter says.
fn fatal_line(err: &anyhow::Error) -> String {
    let label = err
        .downcast_ref::<Error>()
        .map(Error::label)
        .unwrap_or("Error");
    format!("[{}] {:#}", label.red(), err)
}

fn fatal(err: &anyhow::Error, exit_code: i32) -> ! {
    debug!(error = ?err, "fatal");
    eprintln!("{}", fatal_line(err));
    std::process::exit(exit_code)
}

fn main() {
    // ─── 1) configuration + logging ──────────────────────────────────
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            logging::init(false);
            fatal(&anyhow::Error::new(e), FATAL_EXIT_CODE);
        }
    };
    logging::init(config.verbose);
    info!("starting");

    // ─── 2) fetch/parse/cache + print ────────────────────────────────
    if let Err(e) = run(config) {
        fatal(&e, FATAL_EXIT_CODE);
    }
}
