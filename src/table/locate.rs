// src/table/locate.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{ParseFailure, Result};

static TARGET_TABLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"table[border="1"][align="center"]"#).expect("table selector should parse")
});
static TBODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody").expect("tbody selector should parse"));

/// Body section of the located table.
pub type TableNode<'a> = ElementRef<'a>;

/// A parsed page. Owns the tree that located nodes borrow from.
pub struct TableDocument {
    html: Html,
}

impl TableDocument {
    /// Parse raw page bytes. Invalid UTF-8 is replaced, never rejected.
    pub fn parse(raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        Self {
            html: Html::parse_document(&text),
        }
    }

    /// First `<table border="1" align="center">` and its `<tbody>`.
    ///
    /// Any further matching tables are ignored.
    pub fn locate(&self) -> Result<TableNode<'_>> {
        let table = self
            .html
            .select(&TARGET_TABLE)
            .next()
            .ok_or(ParseFailure::TableNotFound)?;
        let body = table
            .select(&TBODY)
            .next()
            .ok_or(ParseFailure::MissingBody)?;
        debug!(
            rows = body.children().filter(|n| n.value().is_element()).count(),
            "located table body"
        );
        Ok(body)
    }
}
