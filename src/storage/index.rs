//! # Index Store
//!
//! One sorted-map file per column. On disk, an index is a sequence of
//! entries in ascending key order:
//!
//! ```text
//! [key (per Type Codec)] [posting count: u32 BE] [offset: u32 BE] ...
//! ```
//!
//! repeated until end-of-file. A posting list holds the heap byte offsets
//! of every row carrying that key, in insertion order, never deduplicated
//! and never removed.
//!
//! Maintenance is read-modify-write-whole-file: `load` the entire map,
//! mutate it in memory, `save` it back in key order, fully replacing the
//! file. That trades write amplification for implementation simplicity
//! and a single atomic-enough write per operation; the interface hides
//! the choice so an incremental on-disk structure could replace it
//! without touching the query executor.
//!
//! `range_scan` is a linear predicate filter over the sorted
//! representation, not a logarithmic seek: every key is compared against
//! the literal and matching posting lists are concatenated in key order.

use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::types::{codec, ColumnType, FilterOp, Value};

/// Heap offsets for one key. Most keys reference a handful of rows, so
/// short lists stay inline.
pub type Postings = SmallVec<[u32; 4]>;

/// In-memory form of one column's index file.
#[derive(Debug)]
pub struct ColumnIndex {
    key_type: ColumnType,
    entries: BTreeMap<Value, Postings>,
}

impl ColumnIndex {
    pub fn new(key_type: ColumnType) -> Self {
        Self {
            key_type,
            entries: BTreeMap::new(),
        }
    }

    /// Reads the whole index file sequentially: key, posting count, then
    /// that many offsets, until end-of-file.
    pub fn load(path: &Path, key_type: ColumnType) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(format!(
                "index file '{}'",
                path.display()
            )));
        }
        let bytes = fs::read(path)?;
        let len = bytes.len() as u64;
        let mut cursor = Cursor::new(bytes);

        let mut entries = BTreeMap::new();
        while cursor.position() < len {
            let key = codec::decode(key_type, &mut cursor)?;
            let count = read_u32(&mut cursor)?;
            let mut postings = Postings::new();
            for _ in 0..count {
                postings.push(read_u32(&mut cursor)?);
            }
            entries.insert(key, postings);
        }

        Ok(Self { key_type, entries })
    }

    /// Serializes the map back in key order, fully replacing the file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        for (key, postings) in &self.entries {
            codec::encode(key, &mut buf)?;
            buf.extend_from_slice(&(postings.len() as u32).to_be_bytes());
            for offset in postings {
                buf.extend_from_slice(&offset.to_be_bytes());
            }
        }
        fs::write(path, buf)?;
        Ok(())
    }

    pub fn key_type(&self) -> ColumnType {
        self.key_type
    }

    /// True if any row already carries this key. Primary-key columns use
    /// this as their uniqueness check.
    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(key)
    }

    /// Appends a heap offset to the key's posting list, creating the
    /// entry if the key is new.
    pub fn add_posting(&mut self, key: Value, offset: u32) {
        self.entries.entry(key).or_default().push(offset);
    }

    /// Collects the postings of every key satisfying `op` against the
    /// literal, scanning keys in ascending order. Postings keep their
    /// insertion order within a key, so the result is key order first,
    /// insertion order second.
    pub fn range_scan(&self, op: FilterOp, literal: &Value) -> Vec<u32> {
        let mut offsets = Vec::new();
        for (key, postings) in &self.entries {
            if op.matches(key.compare(literal)) {
                offsets.extend_from_slice(postings);
            }
        }
        offsets
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Convenience for the read path: load the file and filter in one step.
pub fn range_scan_file(
    path: &Path,
    key_type: ColumnType,
    op: FilterOp,
    literal: &Value,
) -> Result<Vec<u32>> {
    Ok(ColumnIndex::load(path, key_type)?.range_scan(op, literal))
}

fn read_u32(cursor: &mut Cursor<Vec<u8>>) -> Result<u32> {
    let mut buf = [0u8; 4];
    std::io::Read::read_exact(cursor, &mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Layout;

    fn sample_index() -> ColumnIndex {
        let mut index = ColumnIndex::new(ColumnType::Int);
        index.add_posting(Value::Int(5), 40);
        index.add_posting(Value::Int(1), 0);
        index.add_posting(Value::Int(3), 20);
        index.add_posting(Value::Int(7), 60);
        index.add_posting(Value::Int(3), 80);
        index
    }

    #[test]
    fn save_then_load_round_trips_in_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.ndx");

        sample_index().save(&path).unwrap();
        let loaded = ColumnIndex::load(&path, ColumnType::Int).unwrap();

        assert_eq!(loaded.entry_count(), 4);
        assert_eq!(loaded.range_scan(FilterOp::Eq, &Value::Int(3)), vec![20, 80]);
    }

    #[test]
    fn range_scan_collects_postings_in_key_order() {
        let index = sample_index();
        assert_eq!(
            index.range_scan(FilterOp::Ge, &Value::Int(3)),
            vec![20, 80, 40, 60]
        );
        assert_eq!(index.range_scan(FilterOp::Lt, &Value::Int(3)), vec![0]);
        assert_eq!(
            index.range_scan(FilterOp::Ne, &Value::Int(5)),
            vec![0, 20, 80, 60]
        );
        assert!(index.range_scan(FilterOp::Gt, &Value::Int(7)).is_empty());
    }

    #[test]
    fn postings_keep_insertion_order_within_a_key() {
        let mut index = ColumnIndex::new(ColumnType::Varchar(8));
        index.add_posting(Value::Varchar("x".into()), 90);
        index.add_posting(Value::Varchar("x".into()), 10);
        index.add_posting(Value::Varchar("x".into()), 50);

        assert_eq!(
            index.range_scan(FilterOp::Eq, &Value::Varchar("x".into())),
            vec![90, 10, 50]
        );
    }

    #[test]
    fn empty_file_loads_as_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.ndx");
        Layout::create_empty_file(&path).unwrap();

        let index = ColumnIndex::load(&path, ColumnType::Double).unwrap();
        assert_eq!(index.entry_count(), 0);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ColumnIndex::load(&dir.path().join("gone.ndx"), ColumnType::Int).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn varchar_keys_round_trip_with_length_prefixes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.ndx");

        let mut index = ColumnIndex::new(ColumnType::Varchar(16));
        index.add_posting(Value::Varchar("pear".into()), 0);
        index.add_posting(Value::Varchar("apple".into()), 12);
        index.save(&path).unwrap();

        let loaded = ColumnIndex::load(&path, ColumnType::Varchar(16)).unwrap();
        assert_eq!(
            loaded.range_scan(FilterOp::Ge, &Value::Varchar("a".into())),
            vec![12, 0]
        );
    }
}
