// src/fetch/mod.rs

use std::{fs, path::Path, time::Duration};

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{Error, Result};

/// Anything that can hand back the bytes behind a URL.
pub trait Source {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP GET with a fixed deadline. No retries.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("oceantemp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }
}

impl Source for HttpSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let transport = |source| Error::Transport {
            url: url.to_string(),
            source,
        };
        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(resp.bytes().map_err(transport)?.to_vec())
    }
}

/// Fetch `url` and, when `dest` is given, keep a verbatim copy there.
pub fn download(source: &dyn Source, url: &str, dest: Option<&Path>) -> Result<Vec<u8>> {
    debug!(%url, "downloading");
    let bytes = source.fetch(url)?;

    if let Some(dest) = dest {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::fs(parent, e))?;
        }
        fs::write(dest, &bytes).map_err(|e| Error::fs(dest, e))?;
        debug!(path = %dest.display(), size = bytes.len(), "saved raw page");
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use tempfile::tempdir;

    /// Answer exactly one request on localhost with `status` and `body`.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let resp = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(resp.as_bytes());
        });
        format!("http://{}/ONI_v5.php", addr)
    }

    // same settings as `HttpSource::new`, minus any proxy from the environment
    fn http() -> HttpSource {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .no_proxy()
            .build()
            .unwrap();
        HttpSource { client }
    }

    struct Fixed(&'static [u8]);

    impl Source for Fixed {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.0.to_vec())
        }
    }

    #[test]
    fn test_download_without_dest() {
        let bytes = download(&Fixed(b"<html/>"), "http://example.invalid/", None).unwrap();
        assert_eq!(bytes, b"<html/>");
    }

    #[test]
    fn test_download_creates_parent_and_writes() {
        let tmp = tempdir().unwrap();
        let dest = tmp.path().join("nested").join("deeper").join("page.html");
        let bytes = download(&Fixed(b"\xffraw"), "http://example.invalid/", Some(&dest)).unwrap();
        assert_eq!(bytes, b"\xffraw");
        assert_eq!(fs::read(&dest).unwrap(), b"\xffraw");
    }

    #[test]
    fn test_download_reports_unwritable_dest() {
        let tmp = tempdir().unwrap();
        // a regular file where a directory is expected
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let dest = blocker.join("page.html");
        let err = download(&Fixed(b"abc"), "http://example.invalid/", Some(&dest)).unwrap_err();
        assert_eq!(err.label(), "FileSystemError");
    }

    #[test]
    fn test_http_success_returns_body() {
        let url = serve_once("200 OK", "<table></table>");
        assert_eq!(http().fetch(&url).unwrap(), b"<table></table>");
    }

    #[test]
    fn test_http_2xx_upper_range_is_success() {
        let url = serve_once("299 Whatever", "ok");
        assert_eq!(http().fetch(&url).unwrap(), b"ok");
    }

    #[test]
    fn test_http_non_2xx_is_status_error() {
        for status in ["404 Not Found", "500 Internal Server Error", "300 Multiple Choices"] {
            let url = serve_once(status, "nope");
            match http().fetch(&url) {
                Err(Error::Status { url: u, status: code }) => {
                    assert_eq!(u, url);
                    assert!(!code.is_success());
                }
                other => panic!("expected status error for {status}, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_http_status_error_skips_saving() {
        let tmp = tempdir().unwrap();
        let dest = tmp.path().join("noaa-oni.html");
        let url = serve_once("503 Service Unavailable", "busy");
        let err = download(&http(), &url, Some(&dest)).unwrap_err();
        assert_eq!(err.label(), "TransportError");
        assert!(!dest.exists());
    }

    #[test]
    fn test_http_connection_refused_is_transport_error() {
        // bind then drop to get a port nobody listens on
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let err = http().fetch(&format!("http://{}/", addr)).unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }
}
