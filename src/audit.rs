// src/audit.rs
// =============================================================================
// The crawl log: one CSV row for every URL the crawler dealt with.
//
//   url,status_code,content_type,saved_file
//   http://example.com/,200,text/html,tor_output/example.com_index.html
//   http://example.com/secret,robots_blocked,,
//   http://example.com/slow,error:Timeout,,
//
// Rows are only ever appended, and each one is flushed before append()
// returns. If the process is killed mid-crawl the file still holds every
// completed row and is still valid CSV.
//
// The header is written only when the file is new (or empty), so running
// the crawler again with the same output directory extends the same log.
// =============================================================================

use crate::crawl::FetchOutcome;
use crate::error::AuditError;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 4] = ["url", "status_code", "content_type", "saved_file"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub url: String,
    pub outcome: FetchOutcome,
}

impl AuditRecord {
    pub fn new(url: impl Into<String>, outcome: FetchOutcome) -> Self {
        Self {
            url: url.into(),
            outcome,
        }
    }

    // The four CSV columns for this record
    pub fn to_row(&self) -> [String; 4] {
        let (status, content_type, saved_file) = match &self.outcome {
            FetchOutcome::Fetched {
                status,
                content_type,
                stored_path,
            } => (status.to_string(), content_type.clone(), stored_path.clone()),
            FetchOutcome::Blocked => ("robots_blocked".to_string(), String::new(), String::new()),
            FetchOutcome::Error { kind } => (format!("error:{}", kind), String::new(), String::new()),
        };
        [self.url.clone(), status, content_type, saved_file]
    }
}

pub trait AuditSink: Send {
    fn append(&mut self, record: &AuditRecord) -> Result<(), AuditError>;
}

pub struct AuditLog {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl AuditLog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();
        let open_err = |source: std::io::Error| AuditError::Open {
            path: path.clone(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(open_err)?;
        let is_new = file.metadata().map_err(open_err)?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(HEADER)?;
            writer.flush()?;
        }

        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for AuditLog {
    fn append(&mut self, record: &AuditRecord) -> Result<(), AuditError> {
        self.writer.write_record(record.to_row())?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::ErrorKind;

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_rows_for_each_outcome() {
        let fetched = AuditRecord::new(
            "http://example.com/",
            FetchOutcome::Fetched {
                status: 200,
                content_type: "text/html".into(),
                stored_path: "out/example.com_index.html".into(),
            },
        );
        assert_eq!(
            fetched.to_row(),
            ["http://example.com/", "200", "text/html", "out/example.com_index.html"]
        );

        let blocked = AuditRecord::new("http://example.com/secret", FetchOutcome::Blocked);
        assert_eq!(blocked.to_row(), ["http://example.com/secret", "robots_blocked", "", ""]);

        let failed = AuditRecord::new(
            "http://example.com/slow",
            FetchOutcome::Error { kind: ErrorKind::Timeout },
        );
        assert_eq!(failed.to_row(), ["http://example.com/slow", "error:Timeout", "", ""]);
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl_log.csv");

        {
            let mut log = AuditLog::open(&path).unwrap();
            log.append(&AuditRecord::new("http://a.com/", FetchOutcome::Blocked)).unwrap();
        }
        {
            let mut log = AuditLog::open(&path).unwrap();
            log.append(&AuditRecord::new("http://b.com/", FetchOutcome::Blocked)).unwrap();
        }

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], HEADER);
        assert_eq!(rows[1][0], "http://a.com/");
        assert_eq!(rows[2][0], "http://b.com/");
    }

    #[test]
    fn test_rows_visible_before_log_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl_log.csv");
        let mut log = AuditLog::open(&path).unwrap();

        log.append(&AuditRecord::new("http://a.com/", FetchOutcome::Blocked)).unwrap();

        // log is still open: the row must already be on disk
        let rows = read_rows(log.path());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], ["http://a.com/", "robots_blocked", "", ""]);
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl_log.csv");
        let mut log = AuditLog::open(&path).unwrap();

        let record = AuditRecord::new(
            "http://a.com/x,y",
            FetchOutcome::Fetched {
                status: 200,
                content_type: "text/html; charset=\"utf-8\"".into(),
                stored_path: String::new(),
            },
        );
        log.append(&record).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows[1][0], "http://a.com/x,y");
        assert_eq!(rows[1][2], "text/html; charset=\"utf-8\"");
    }
}
