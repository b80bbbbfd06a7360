// src/render.rs

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use crate::table::{ColorClass, ExtractedTable, Observation};

const VSEP: &str = "|";
const YEAR_SIZE: usize = 6;
const DATA_SIZE: usize = 7;

fn paint(obs: &Observation) -> ColoredString {
    let cell = format!("{:^width$}", obs.value, width = DATA_SIZE);
    match obs.color {
        ColorClass::Neutral => cell.normal(),
        ColorClass::Negative => cell.red(),
        ColorClass::Positive => cell.blue(),
    }
}

/// Width of the dashed line under the header: every column plus every separator.
pub fn separator_len(data_columns: usize) -> usize {
    YEAR_SIZE + data_columns * DATA_SIZE + (data_columns + 1)
}

/// Fixed-width, pipe-separated rendering. Year column is 6 wide, data columns 7.
pub fn render_table(table: &ExtractedTable) -> String {
    let mut out = String::new();

    if let Some((first, rest)) = table.headers.split_first() {
        out.push_str(&format!("{:^width$}{}", first, VSEP, width = YEAR_SIZE));
        for h in rest {
            out.push_str(&format!("{:^width$}{}", h, VSEP, width = DATA_SIZE));
        }
        out.push('\n');
        out.push_str(&"-".repeat(separator_len(rest.len())));
        out.push('\n');
    }

    for row in &table.body {
        let label = format!("{:<width$}", format!("{}:", row.year), width = YEAR_SIZE);
        out.push_str(&format!("{}{}", label.yellow(), VSEP));
        for obs in &row.observations {
            out.push_str(&format!("{}{}", paint(obs), VSEP));
        }
        out.push('\n');
    }

    out
}

pub fn write_table<W: Write>(mut w: W, table: &ExtractedTable) -> io::Result<()> {
    w.write_all(render_table(table).as_bytes())?;
    w.flush()
}

pub fn print_table(table: &ExtractedTable) -> io::Result<()> {
    write_table(io::stdout().lock(), table)
}
