pub mod cell;
pub mod extract;
pub mod locate;
pub mod types;

pub use extract::{dedup_headers, extract, extract_cells};
pub use locate::{TableDocument, TableNode};
pub use types::{ColorClass, ExtractedTable, HeaderList, Observation, TableBody, YearRow};

use crate::error::Result;

/// Locate and extract the table in one step.
pub fn parse_markup(raw: &[u8]) -> Result<ExtractedTable> {
    let doc = TableDocument::parse(raw);
    let body = doc.locate()?;
    Ok(extract(body))
}
