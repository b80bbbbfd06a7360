// src/table/cell.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::types::{ColorClass, Observation};

static FONT: Lazy<Selector> = Lazy::new(|| Selector::parse("font").expect("font selector"));
static STRONG: Lazy<Selector> = Lazy::new(|| Selector::parse("strong").expect("strong selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("p selector"));
static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").expect("span selector"));

/// Structural questions the extractor asks about a single `<td>`.
pub trait CellView {
    /// Cell wraps its content in a styled text element (`<font>`).
    fn has_styled_child(&self) -> bool;
    /// The styled text element contains bold text.
    fn is_bold(&self) -> bool;
    /// Cell has a paragraph wrapper.
    fn has_paragraph(&self) -> bool;
    /// Serialized markup of the first `<span>`, or empty.
    fn style_text(&self) -> String;
    /// All text in the cell, trimmed.
    fn text(&self) -> String;
}

/// What a qualifying cell contributes to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Header(String),
    Year(String),
    Data(Observation),
}

/// Sort a cell into header, year marker or data. `None` means the cell is ignored.
pub fn classify<C: CellView + ?Sized>(cell: &C) -> Option<Cell> {
    if !cell.has_styled_child() {
        return None;
    }
    match (cell.has_paragraph(), cell.is_bold()) {
        (true, true) => Some(Cell::Header(cell.text())),
        (false, true) => Some(Cell::Year(cell.text())),
        (false, false) => Some(Cell::Data(Observation::new(
            cell.text(),
            ColorClass::from_style(&cell.style_text()),
        ))),
        // plain paragraph text is neither a header nor a value
        (true, false) => None,
    }
}

/// A `<td>` from a parsed document.
#[derive(Clone, Copy)]
pub struct HtmlCell<'a>(pub ElementRef<'a>);

impl<'a> HtmlCell<'a> {
    fn styled(&self) -> Option<ElementRef<'a>> {
        self.0.select(&FONT).next()
    }
}

impl CellView for HtmlCell<'_> {
    fn has_styled_child(&self) -> bool {
        self.styled().is_some()
    }

    fn is_bold(&self) -> bool {
        self.styled()
            .map(|font| font.select(&STRONG).next().is_some())
            .unwrap_or(false)
    }

    fn has_paragraph(&self) -> bool {
        self.0.select(&PARAGRAPH).next().is_some()
    }

    fn style_text(&self) -> String {
        self.0
            .select(&SPAN)
            .next()
            .map(|span| span.html())
            .unwrap_or_default()
    }

    fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }
}
