// Newline-delimited JSON reading and writing.
//
// One compact JSON object per line. Reading never stops at a bad line:
// each line gets its own result so callers can report and move on.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::FeedbackRecord;

/// The outcome of parsing one non-blank line.
#[derive(Debug)]
pub struct ParsedLine {
    /// 1-based line number in the source text
    pub line_number: usize,
    pub result: Result<FeedbackRecord, serde_json::Error>,
}

/// Write records to `path`, one per line, replacing any existing file.
pub fn write_records(path: impl AsRef<Path>, records: &[FeedbackRecord]) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record)
            .with_context(|| format!("Failed to serialize record {}", record.record_id))?;
        writer.write_all(b"\n")?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(path = %path.display(), count = records.len(), "Wrote JSONL records");
    Ok(())
}

/// Iterate over the non-blank lines of `text` with their 1-based line numbers.
pub fn non_blank_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Parse every non-blank line of `text` as a feedback record.
pub fn parse_records(text: &str) -> Vec<ParsedLine> {
    non_blank_lines(text)
        .map(|(line_number, line)| ParsedLine {
            line_number,
            result: serde_json::from_str(line),
        })
        .collect()
}

/// Read and parse a JSONL file.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<ParsedLine>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(parse_records(&text))
}
