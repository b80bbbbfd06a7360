// src/table/types.rs

use std::{collections::BTreeMap, fmt};

use serde::{
    de::{self, Deserializer},
    ser::{SerializeMap, Serializer},
    Deserialize, Serialize,
};

/// Ordered, de-duplicated column headers.
pub type HeaderList = Vec<String>;

/// One entry per year marker, in source order. Repeated labels are kept.
pub type TableBody = Vec<YearRow>;

/// Display class of a value, taken from the cell's style.
///
/// Persisted as a plain word. The ANSI escapes written by older caches are
/// still accepted when reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    #[default]
    #[serde(alias = "\u{1b}[00m")]
    Neutral,
    #[serde(alias = "\u{1b}[31m")]
    Negative,
    #[serde(alias = "\u{1b}[34m")]
    Positive,
}

impl ColorClass {
    /// Classify by substring on the serialized style markup. Red wins over blue.
    pub fn from_style(style: &str) -> Self {
        if style.contains("red") {
            ColorClass::Negative
        } else if style.contains("blue") {
            ColorClass::Positive
        } else {
            ColorClass::Neutral
        }
    }

    /// Escape sequence the legacy cache format stored for this class.
    pub fn ansi_code(&self) -> &'static str {
        match self {
            ColorClass::Neutral => "\x1b[00m",
            ColorClass::Negative => "\x1b[31m",
            ColorClass::Positive => "\x1b[34m",
        }
    }
}

/// A single cell value. Kept verbatim; may be blank or non-numeric.
// field order matches the sorted-key JSON layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub color: ColorClass,
    pub value: String,
}

impl Observation {
    pub fn new(value: impl Into<String>, color: ColorClass) -> Self {
        Self {
            value: value.into(),
            color,
        }
    }
}

/// A year label and the values that followed its marker.
///
/// Serialized as a single-key object: `{"1950": [ ... ]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearRow {
    pub year: String,
    pub observations: Vec<Observation>,
}

impl YearRow {
    pub fn new(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            observations: Vec::new(),
        }
    }

    pub fn push(&mut self, obs: Observation) {
        self.observations.push(obs);
    }
}

impl Serialize for YearRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.year, &self.observations)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for YearRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, Vec<Observation>>::deserialize(deserializer)?;
        if map.len() != 1 {
            return Err(de::Error::invalid_length(
                map.len(),
                &"an object with exactly one year key",
            ));
        }
        let (year, observations) = map
            .into_iter()
            .next()
            .ok_or_else(|| de::Error::custom("empty year row"))?;
        Ok(Self { year, observations })
    }
}

/// Headers plus body. Serialized as the two-element array `[headers, body]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedTable {
    pub headers: HeaderList,
    pub body: TableBody,
}

impl ExtractedTable {
    pub fn new(headers: HeaderList, body: TableBody) -> Self {
        Self { headers, body }
    }

    /// Number of data cells across all rows.
    pub fn observation_count(&self) -> usize {
        self.body.iter().map(|r| r.observations.len()).sum()
    }
}

impl Serialize for ExtractedTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.headers, &self.body).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExtractedTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (headers, body) = <(HeaderList, TableBody)>::deserialize(deserializer)?;
        Ok(Self { headers, body })
    }
}

impl fmt::Display for ExtractedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} headers, {} year rows, {} values",
            self.headers.len(),
            self.body.len(),
            self.observation_count()
        )
    }
}
