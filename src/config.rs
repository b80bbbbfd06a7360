// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use url::Url;

use crate::error::{Error, Result};

/// NOAA CPC Oceanic Niño Index (v5) table.
pub const DEFAULT_SOURCE_URL: &str =
    "https://origin.cpc.ncep.noaa.gov/products/analysis_monitoring/ensostuff/ONI_v5.php";
pub const DEFAULT_INSTANCE_DIR: &str = "instance";
pub const DEFAULT_MAX_AGE_DAYS: u32 = 1;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const RAW_FILE_NAME: &str = "noaa-oni.html";
const DATA_FILE_NAME: &str = "data.json";

/// Runtime settings, built once in `main` and handed to the workflow.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_url: Url,
    pub instance_dir: PathBuf,
    pub max_age_days: u32,
    pub timeout: Duration,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: Url::parse(DEFAULT_SOURCE_URL).expect("default source URL should parse"),
            instance_dir: PathBuf::from(DEFAULT_INSTANCE_DIR),
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            timeout: DEFAULT_TIMEOUT,
            verbose: false,
        }
    }
}

impl Config {
    /// Read overrides from the process environment.
    ///
    /// `DEBUG=1` turns on verbose logging, `OCEANTEMP_SOURCE_URL`,
    /// `OCEANTEMP_INSTANCE_DIR` and `OCEANTEMP_MAX_AGE_DAYS` replace the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(raw) = lookup("OCEANTEMP_SOURCE_URL") {
            cfg.source_url = Url::parse(raw.trim())
                .map_err(|e| Error::Config(format!("OCEANTEMP_SOURCE_URL '{}': {}", raw, e)))?;
        }
        if let Some(dir) = lookup("OCEANTEMP_INSTANCE_DIR").filter(|d| !d.trim().is_empty()) {
            cfg.instance_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("OCEANTEMP_MAX_AGE_DAYS") {
            cfg.max_age_days = raw.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "OCEANTEMP_MAX_AGE_DAYS must be a non-negative integer, got '{}'",
                    raw
                ))
            })?;
        }
        cfg.verbose = lookup("DEBUG").as_deref() == Some("1");

        Ok(cfg)
    }

    /// Byte-for-byte copy of the last fetched page.
    pub fn raw_markup_path(&self) -> PathBuf {
        self.instance_dir.join(RAW_FILE_NAME)
    }

    /// JSON cache of the extracted table.
    pub fn data_path(&self) -> PathBuf {
        self.instance_dir.join(DATA_FILE_NAME)
    }
}
