// src/sink/record.rs

use std::fmt;
use std::io::BufRead;

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, RunlogError};

/// Which output stream of the supervised process a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured description of a single write from the process.
///
/// Built, serialized and dropped inside one `write_chunk` call. Keys are
/// emitted in declaration order.
#[derive(Debug, Serialize)]
pub struct LogRecord<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(rename = "Time")]
    pub time: DateTime<Local>,
    #[serde(rename = "Stream")]
    pub stream: Stream,
    #[serde(rename = "Message")]
    pub message: String,
}

impl<'a> LogRecord<'a> {
    /// Build a record stamped with the current wall-clock time.
    ///
    /// `chunk` is decoded as UTF-8 (invalid sequences are replaced) and
    /// trimmed of surrounding whitespace.
    pub fn capture(name: &'a str, stream: Stream, chunk: &[u8]) -> Self {
        Self {
            name,
            time: Local::now(),
            stream,
            message: String::from_utf8_lossy(chunk).trim().to_string(),
        }
    }

    /// Compact JSON followed by a single `\n`.
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self).map_err(RunlogError::Serialization)?;
        line.push('\n');
        Ok(line)
    }
}

/// Owned form of a record, as read back from a log file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogLine {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Time")]
    pub time: DateTime<FixedOffset>,
    #[serde(rename = "Stream")]
    pub stream: Stream,
    #[serde(rename = "Message")]
    pub message: String,
}

impl LogLine {
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line).map_err(RunlogError::Serialization)
    }
}

/// Read every record from a newline-delimited log. Blank lines are skipped.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<LogLine>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(LogLine::parse(&line)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_trimmed() {
        let record = LogRecord::capture("echo hi", Stream::Stdout, b"  hi there\r\n\n");
        assert_eq!(record.message, "hi there");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let record = LogRecord::capture("x", Stream::Stderr, b"ok \xff\n");
        assert_eq!(record.message, "ok \u{fffd}");
    }

    #[test]
    fn line_has_fixed_key_order_and_one_newline() {
        let record = LogRecord::capture("ls -l", Stream::Stderr, b"boom\n");
        let line = record.to_line().unwrap();

        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);

        let name = line.find("\"Name\"").unwrap();
        let time = line.find("\"Time\"").unwrap();
        let stream = line.find("\"Stream\"").unwrap();
        let message = line.find("\"Message\"").unwrap();
        assert!(name < time && time < stream && stream < message);
        assert!(line.contains(r#""Stream":"stderr""#));
    }

    #[test]
    fn embedded_newlines_stay_inside_one_line() {
        let record = LogRecord::capture("cat", Stream::Stdout, b"a\nb\n");
        let line = record.to_line().unwrap();
        assert_eq!(line.matches('\n').count(), 1);

        let back = LogLine::parse(line.trim_end()).unwrap();
        assert_eq!(back.message, "a\nb");
    }

    #[test]
    fn time_is_rfc3339() {
        let record = LogRecord::capture("date", Stream::Stdout, b"x");
        let line = record.to_line().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        let time = value["Time"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(time).is_ok(), "not RFC 3339: {time}");
    }

    #[test]
    fn read_records_skips_blank_lines() {
        let a = LogRecord::capture("n", Stream::Stdout, b"one").to_line().unwrap();
        let b = LogRecord::capture("n", Stream::Stderr, b"two").to_line().unwrap();
        let data = format!("{a}\n{b}");

        let records = read_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stream, Stream::Stdout);
        assert_eq!(records[1].message, "two");
    }

    #[test]
    fn read_records_rejects_garbage() {
        assert!(matches!(
            read_records("not json\n".as_bytes()),
            Err(RunlogError::Serialization(_))
        ));
    }
}
