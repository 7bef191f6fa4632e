//! # Heap Store
//!
//! Append-only row files. A row is its fields encoded back-to-back per
//! the table's catalog-declared column order; a row's identity is the
//! byte offset of its first field. Rows are never updated or deleted, so
//! the only mutations are appends at end-of-file.
//!
//! Files are opened, used, and closed within a single call; handles never
//! outlive a request.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::Result;
use crate::types::{codec, ColumnType, Value};

/// Appends one encoded row and returns the byte offset it was written at.
/// The row is buffered and written with a single `write_all`, so a
/// validation failure upstream can never leave a half-encoded row behind.
pub fn append_row(path: &Path, values: &[Value]) -> Result<u64> {
    let mut buf = Vec::new();
    codec::encode_row(values, &mut buf)?;

    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    let offset = file.seek(SeekFrom::End(0))?;
    file.write_all(&buf)?;
    Ok(offset)
}

/// Current heap length, which is also the offset the next row will get.
pub fn end_offset(path: &Path) -> Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

/// Decodes one full row at the given offset.
pub fn read_row_at(path: &Path, offset: u64, types: &[ColumnType]) -> Result<Vec<Value>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    reader.seek(SeekFrom::Start(offset))?;
    codec::decode_row(types, &mut reader)
}

/// Decodes one full row per offset, preserving the offsets' order. Opens
/// the heap once for the whole batch.
pub fn read_rows_at(path: &Path, offsets: &[u64], types: &[ColumnType]) -> Result<Vec<Vec<Value>>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut rows = Vec::with_capacity(offsets.len());
    for &offset in offsets {
        reader.seek(SeekFrom::Start(offset))?;
        rows.push(codec::decode_row(types, &mut reader)?);
    }
    Ok(rows)
}

/// Sequentially decodes `row_count` rows from the start of the heap, in
/// physical insertion order.
pub fn scan_rows(path: &Path, types: &[ColumnType], row_count: u64) -> Result<Vec<Vec<Value>>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut rows = Vec::with_capacity(row_count.min(1024) as usize);
    for _ in 0..row_count {
        rows.push(codec::decode_row(types, &mut reader)?);
    }
    Ok(rows)
}
