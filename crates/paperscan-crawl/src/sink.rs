//! Result records and the JSON Lines sink

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::matcher::MatchResult;

/// One retrieved document and the vocabulary terms found in it.
///
/// Serialized flat: `{"venue", "year", "submission_type",
/// "sequence_number", "url", "matched_terms"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub url: String,
    pub matched_terms: MatchResult,
}

/// Buffered JSON Lines writer with atomic tmp→rename
pub struct JsonlSink {
    writer: BufWriter<File>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    record_count: usize,
}

impl std::fmt::Debug for JsonlSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlSink")
            .field("final_path", &self.final_path)
            .field("record_count", &self.record_count)
            .finish_non_exhaustive()
    }
}

impl JsonlSink {
    /// Create a sink writing to `<path>.tmp` until finalized
    pub fn new(path: &Path) -> std::io::Result<Self> {
        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        // Clean up stale tmp file
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }

        let writer = BufWriter::new(File::create(&tmp_path)?);
        Ok(Self {
            writer,
            tmp_path,
            final_path: path.to_path_buf(),
            record_count: 0,
        })
    }

    /// Append one record as a single line
    pub fn write_record(&mut self, record: &ResultRecord) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, record).map_err(std::io::Error::other)?;
        self.writer.write_all(b"\n")?;
        self.record_count += 1;
        Ok(())
    }

    /// Flush and atomically rename tmp → final
    pub fn finalize(mut self) -> std::io::Result<usize> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        fs::rename(&self.tmp_path, &self.final_path)?;
        Ok(self.record_count)
    }
}

/// Write all records to `path` (one JSON object per line)
pub fn write_jsonl(path: &Path, records: &[ResultRecord]) -> Result<usize> {
    let mut sink = JsonlSink::new(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for record in records {
        sink.write_record(record)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    let count = sink
        .finalize()
        .with_context(|| format!("Failed to finalize {}", path.display()))?;
    log::info!("Saved {} records to {}", count, path.display());
    Ok(count)
}

/// Read records back from a JSON Lines file, skipping blank lines
pub fn read_jsonl(path: &Path) -> Result<Vec<ResultRecord>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ResultRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid record", path.display(), idx + 1))?;
        records.push(record);
    }
    Ok(records)
}
