// src/table/extract.rs

use std::collections::HashSet;

use once_cell::sync::Lazy;
use scraper::Selector;
use tracing::{debug, trace};

use super::cell::{classify, Cell, HtmlCell};
use super::locate::TableNode;
use super::types::{ExtractedTable, HeaderList, Observation, TableBody, YearRow};

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector"));
static DATA_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("td selector"));

/// State threaded through the cell walk.
///
/// `current` indexes the row opened by the most recent year marker. It is
/// positional: a repeated year label opens a new row rather than reusing the
/// old one.
#[derive(Debug, Default)]
struct Traversal {
    headers: Vec<String>,
    body: TableBody,
    current: Option<usize>,
}

impl Traversal {
    fn absorb(mut self, cell: Cell) -> Self {
        match cell {
            Cell::Header(text) => self.headers.push(text),
            Cell::Year(label) => {
                trace!(year = %label, "year marker");
                self.body.push(YearRow::new(label));
                self.current = Some(self.body.len() - 1);
            }
            Cell::Data(obs) => self.push_value(obs),
        }
        self
    }

    fn push_value(&mut self, obs: Observation) {
        let idx = match self.current {
            Some(idx) => idx,
            None => {
                // values before any year marker collect under an empty label
                self.body.push(YearRow::new(""));
                let idx = self.body.len() - 1;
                self.current = Some(idx);
                idx
            }
        };
        self.body[idx].push(obs);
    }

    fn finish(self) -> ExtractedTable {
        ExtractedTable::new(dedup_headers(self.headers), self.body)
    }
}

/// Drop repeated headers, keeping the first occurrence of each in place.
pub fn dedup_headers(headers: Vec<String>) -> HeaderList {
    let mut seen = HashSet::with_capacity(headers.len());
    headers
        .into_iter()
        .filter(|h| seen.insert(h.clone()))
        .collect()
}

/// Fold already-classified cells into a table. Order matters: rows
/// top-to-bottom, cells left-to-right.
pub fn extract_cells<I>(cells: I) -> ExtractedTable
where
    I: IntoIterator<Item = Cell>,
{
    cells
        .into_iter()
        .fold(Traversal::default(), Traversal::absorb)
        .finish()
}

/// Walk the located table body and build the header list and year series.
pub fn extract(table: TableNode<'_>) -> ExtractedTable {
    let cells = table
        .select(&ROW)
        .flat_map(|row| row.select(&DATA_CELL))
        .map(HtmlCell)
        .filter_map(|cell| classify(&cell));
    let out = extract_cells(cells);
    debug!(
        headers = out.headers.len(),
        years = out.body.len(),
        values = out.observation_count(),
        "extracted table"
    );
    out
}
