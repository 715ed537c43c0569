//! Record feeds.
//!
//! A feed is either a JSON file on disk (a JSON array or one record per
//! line) or the HTTP API of a running monitor. Feeds are polled from a
//! background thread and delivered over a channel so the UI never blocks on
//! I/O.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use procmon_common::constants::{INSTANCES_ENDPOINT, OPERATIONS_ENDPOINT};
use procmon_common::error::{ProcmonError, Result};
use procmon_common::types::{InstanceDirectory, Record};
use serde_json::Value;

/// Where records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// JSON or JSONL file, re-read on every refresh.
    File(PathBuf),
    /// Base URL of a running monitor.
    Http(String),
}

impl FeedSource {
    /// Interprets a command-line source argument.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Http(source.trim_end_matches('/').to_owned())
        } else {
            Self::File(PathBuf::from(source))
        }
    }

    /// Human-readable name for logs and errors.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Http(url) => url.clone(),
        }
    }

    /// Loads the current records, and the instance directory when the
    /// source provides one.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or is not JSON.
    pub fn fetch(&self) -> Result<FeedUpdate> {
        match self {
            Self::File(path) => Ok(FeedUpdate {
                records: parse_records(&read_file(path)?)?,
                instances: None,
            }),
            Self::Http(base) => {
                let records = parse_records(&http_get(base, OPERATIONS_ENDPOINT)?)?;
                let instances: Value = serde_json::from_str(&http_get(base, INSTANCES_ENDPOINT)?)?;
                Ok(FeedUpdate {
                    records,
                    instances: Some(InstanceDirectory::from_value(&instances)),
                })
            }
        }
    }
}

/// One snapshot of a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUpdate {
    /// Records in stream order.
    pub records: Vec<Record>,
    /// Instance directory, if the source carries one.
    pub instances: Option<InstanceDirectory>,
}

/// Message sent from the polling thread.
#[derive(Debug)]
pub enum FeedMessage {
    /// A fresh snapshot.
    Update(FeedUpdate),
    /// The last poll failed.
    Failed(String),
}

/// Parses a record file: a JSON array, or one JSON value per line.
///
/// Individual records are normalized and never rejected; only text that is
/// not JSON at all is an error.
///
/// # Errors
///
/// Returns an error if the array or any non-blank line is not valid JSON.
pub fn parse_records(text: &str) -> Result<Vec<Record>> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    trimmed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<Record>(line).map_err(ProcmonError::from))
        .collect()
}

/// Loads an instance directory file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not JSON.
pub fn load_instances(path: &Path) -> Result<InstanceDirectory> {
    Ok(serde_json::from_str(&read_file(path)?)?)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ProcmonError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn http_get(base: &str, endpoint: &str) -> Result<String> {
    let url = format!("{base}{endpoint}");
    let feed_error = |message: String| ProcmonError::Feed {
        source_name: url.clone(),
        message,
    };
    let response = reqwest::blocking::get(&url).map_err(|e| feed_error(e.to_string()))?;
    if !response.status().is_success() {
        return Err(feed_error(format!("HTTP {}", response.status())));
    }
    response.text().map_err(|e| feed_error(e.to_string()))
}

/// Polls `source` every `interval` until the receiving side hangs up.
pub fn spawn(source: FeedSource, interval: Duration, tx: Sender<FeedMessage>) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            let message = match source.fetch() {
                Ok(update) => {
                    tracing::debug!(
                        source = %source.name(),
                        records = update.records.len(),
                        "feed refreshed"
                    );
                    FeedMessage::Update(update)
                }
                Err(e) => {
                    tracing::warn!(source = %source.name(), error = %e, "feed refresh failed");
                    FeedMessage::Failed(e.to_string())
                }
            };
            if tx.send(message).is_err() {
                break;
            }
            thread::sleep(interval);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_source_kinds() {
        assert_eq!(
            FeedSource::parse("http://localhost:8080/"),
            FeedSource::Http("http://localhost:8080".into())
        );
        assert_eq!(
            FeedSource::parse("capture.jsonl"),
            FeedSource::File(PathBuf::from("capture.jsonl"))
        );
    }

    #[test]
    fn parse_json_array() {
        let text = r#"[{"index": 0, "display": {"type": "spawn", "summary": "x"}}]"#;
        let records = parse_records(text).expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].type_tag, "spawn");
    }

    #[test]
    fn parse_json_lines_skips_blanks() {
        let text = "{\"index\": 0}\n\n{\"index\": 1, \"severe\": true}\n";
        let records = parse_records(text).expect("parse");
        assert_eq!(records.len(), 2);
        assert!(records[1].severe);
    }

    #[test]
    fn empty_text_is_no_records() {
        assert!(parse_records("  \n").expect("parse").is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = parse_records("{\"index\": 0}\nnot json").expect_err("should fail");
        assert!(matches!(err, ProcmonError::Serialization { .. }));
    }

    #[test]
    fn file_source_fetches_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("capture.json");
        let capture = r#"[{"index": 0, "pid": 4}, {"index": 1, "pid": 4}]"#;
        std::fs::write(&path, capture).expect("write");

        let update = FeedSource::File(path).fetch().expect("fetch");
        assert_eq!(update.records.len(), 2);
        assert!(update.instances.is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = FeedSource::File(dir.path().join("absent.json"))
            .fetch()
            .expect_err("should fail");
        assert!(matches!(err, ProcmonError::Io { .. }));
    }

    #[test]
    fn instances_file_accepts_both_shapes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let map = dir.path().join("map.json");
        std::fs::write(&map, r#"{"4": "svchost.exe"}"#).expect("write");
        let list = dir.path().join("list.json");
        std::fs::write(&list, r#"[{"pid": 4, "name": "svchost.exe"}]"#).expect("write");

        assert_eq!(load_instances(&map).expect("map").describe(4), Some("svchost.exe"));
        assert_eq!(load_instances(&list).expect("list").describe(4), Some("svchost.exe"));
    }

    #[test]
    fn polling_thread_stops_when_receiver_drops() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("capture.json");
        std::fs::write(&path, "[]").expect("write");

        let (tx, rx) = std::sync::mpsc::channel();
        let handle = spawn(FeedSource::File(path), Duration::from_millis(5), tx);
        let first = rx.recv().expect("first update");
        assert!(matches!(
            first,
            FeedMessage::Update(FeedUpdate { ref records, .. }) if records.is_empty()
        ));
        drop(rx);
        handle.join().expect("thread exits");
    }
}
