//! Flat JSONL record logs, the system's only persistence. One JSON object
//! per line; blank lines are tolerated on read.

use crate::model::{GoldCase, JudgedRecord, Pair};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub fn read_gold(path: &Path) -> anyhow::Result<Vec<GoldCase>> {
    read_jsonl(path)
}

pub fn read_pairs(path: &Path) -> anyhow::Result<Vec<Pair>> {
    read_jsonl(path)
}

pub fn read_judged(path: &Path) -> anyhow::Result<Vec<JudgedRecord>> {
    read_jsonl(path)
}

pub fn write_pairs(path: &Path, pairs: &[Pair]) -> anyhow::Result<()> {
    write_jsonl(path, pairs)
}

pub fn write_judged(path: &Path, records: &[JudgedRecord]) -> anyhow::Result<()> {
    write_jsonl(path, records)
}

/// Append records to an existing judged log (creating it if absent), so
/// successive runs against the same file accumulate rather than clobber.
pub fn append_judged(path: &Path, records: &[JudgedRecord]) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {} for append", path.display()))?;
    write_records(BufWriter::new(file), records)
}

fn read_jsonl<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut rows = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line).map_err(|e| {
            anyhow::anyhow!(
                "line {}: invalid record, expected one JSON object per line.\n  Error: {}\n  Content: {}",
                idx + 1,
                e,
                line.chars().take(50).collect::<String>()
            )
        })?;
        rows.push(row);
    }
    tracing::debug!(rows = rows.len(), path = %path.display(), "read record log");
    Ok(rows)
}

fn write_jsonl<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_records(BufWriter::new(file), rows)
}

fn write_records<T: Serialize, W: Write>(mut writer: W, rows: &[T]) -> anyhow::Result<()> {
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
