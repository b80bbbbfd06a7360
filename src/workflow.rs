// src/workflow.rs

use std::fs;

use tracing::{debug, info, instrument};

use crate::cache::{CacheState, CacheStore};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::{download, Source};
use crate::table::{parse_markup, ExtractedTable};

/// Decides between the JSON cache, the saved page and the network.
pub struct Workflow<S> {
    config: Config,
    source: S,
    store: CacheStore,
}

impl<S: Source> Workflow<S> {
    pub fn new(config: Config, source: S) -> Self {
        let store = CacheStore::new(config.data_path());
        Self {
            config,
            source,
            store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return the table, from the JSON cache when it is fresh and decodes,
    /// otherwise by re-parsing the page and rewriting the cache.
    #[instrument(level = "info", skip(self))]
    pub fn extract_data(&self) -> Result<ExtractedTable> {
        info!("extracting data");
        match self.store.load(self.config.max_age_days)? {
            CacheState::Fresh(table) => {
                debug!(%table, "using cached data");
                Ok(table)
            }
            state => {
                debug!(?state, "refreshing data");
                self.download_and_parse()
            }
        }
    }

    /// Get the page (saved copy first, network only if there is none),
    /// parse it and persist the result.
    #[instrument(level = "debug", skip(self))]
    pub fn download_and_parse(&self) -> Result<ExtractedTable> {
        let raw = self.acquire_markup()?;
        info!("parsing data");
        let table = parse_markup(&raw)?;
        self.store.save(&table)?;
        info!(%table, path = %self.store.path().display(), "data file updated");
        Ok(table)
    }

    fn acquire_markup(&self) -> Result<Vec<u8>> {
        let raw_path = self.config.raw_markup_path();
        if raw_path.exists() {
            debug!(path = %raw_path.display(), "HTML file already present, reading");
            return fs::read(&raw_path).map_err(|e| Error::fs(&raw_path, e));
        }
        download(&self.source, self.config.source_url.as_str(), Some(&raw_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColorClass;
    use std::cell::Cell;
    use std::path::Path;
    use tempfile::tempdir;

    const PAGE: &[u8] = br#"<html><body><table border="1" align="center">
        <tr><td><p><font><strong>Year</strong></font></p></td>
            <td><p><font><strong>DJF</strong></font></p></td></tr>
        <tr><td><font><strong>1950</strong></font></td>
            <td><font><span style="color:blue">-1.5</span></font></td></tr>
        </table></body></html>"#;

    struct FakeSource {
        body: &'static [u8],
        calls: Cell<usize>,
    }

    impl FakeSource {
        fn new(body: &'static [u8]) -> Self {
            Self {
                body,
                calls: Cell::new(0),
            }
        }
    }

    impl Source for &FakeSource {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.body.to_vec())
        }
    }

    struct FailingSource;

    impl Source for FailingSource {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            Err(Error::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            })
        }
    }

    fn config(dir: &Path) -> Config {
        Config {
            instance_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_cold_start_fetches_and_caches() {
        let tmp = tempdir().unwrap();
        let source = FakeSource::new(PAGE);
        let wf = Workflow::new(config(tmp.path()), &source);

        let table = wf.extract_data().unwrap();
        assert_eq!(table.headers, vec!["Year", "DJF"]);
        assert_eq!(table.body[0].observations[0].color, ColorClass::Positive);
        assert_eq!(source.calls.get(), 1);

        assert_eq!(fs::read(wf.config().raw_markup_path()).unwrap(), PAGE);
        assert!(wf.config().data_path().exists());
    }

    #[test]
    fn test_fresh_cache_skips_network_and_html() {
        let tmp = tempdir().unwrap();
        let source = FakeSource::new(PAGE);
        let wf = Workflow::new(config(tmp.path()), &source);
        let first = wf.extract_data().unwrap();

        // a fresh, valid cache is returned as-is even if the page would disagree
        fs::write(wf.config().raw_markup_path(), b"<p>garbage</p>").unwrap();
        let second = wf.extract_data().unwrap();
        assert_eq!(first, second);
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn test_outdated_cache_reuses_saved_page() {
        let tmp = tempdir().unwrap();
        let source = FakeSource::new(PAGE);
        let cfg = Config {
            max_age_days: 0,
            ..config(tmp.path())
        };
        let wf = Workflow::new(cfg, &source);

        wf.extract_data().unwrap();
        wf.extract_data().unwrap();
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn test_corrupt_cache_is_rebuilt() {
        let tmp = tempdir().unwrap();
        let source = FakeSource::new(PAGE);
        let wf = Workflow::new(config(tmp.path()), &source);
        fs::write(wf.config().data_path(), "[[\"Year\"], {").unwrap();

        let table = wf.extract_data().unwrap();
        assert_eq!(table.body.len(), 1);
        let rewritten = fs::read_to_string(wf.config().data_path()).unwrap();
        assert!(rewritten.contains("\"1950\""));
    }

    #[test]
    fn test_transport_failure_is_fatal() {
        let tmp = tempdir().unwrap();
        let wf = Workflow::new(config(tmp.path()), FailingSource);
        let err = wf.extract_data().unwrap_err();
        assert_eq!(err.label(), "TransportError");
        assert!(err.is_fatal());
        assert!(!wf.config().data_path().exists());
    }

    #[test]
    fn test_page_without_table_is_parse_error() {
        let tmp = tempdir().unwrap();
        let source = FakeSource::new(b"<html><body>maintenance</body></html>");
        let wf = Workflow::new(config(tmp.path()), &source);
        let err = wf.extract_data().unwrap_err();
        assert_eq!(err.label(), "ParseError");
        assert!(!wf.config().data_path().exists());
    }
}
