//! Anchor index: per-record window start positions
//!
//! The anchor file is BED-like: one anchor per line, `record<TAB>offset`, with
//! any further columns (end, name, strand, ...) ignored. Offsets are 0-based.
//! Blank lines, `#` comments and `track`/`browser` lines are skipped.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{WindowError, WindowResult};
use crate::types::SeqPos;

/// Distinct anchor offsets grouped by record name
#[derive(Debug, Clone, Default)]
pub struct AnchorIndex {
    anchors: HashMap<String, BTreeSet<SeqPos>>,
    /// Record names in order of first appearance
    order: Vec<String>,
}

impl AnchorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> WindowResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let index = Self::from_reader(BufReader::new(file))?;
        log::debug!(
            "Loaded {} anchors for {} records from {}",
            index.total_anchors(),
            index.len(),
            path.display()
        );
        Ok(index)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> WindowResult<Self> {
        let mut index = Self::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }

            let (record, offset) = Self::parse_line(line, i + 1)?;
            index.add_anchor(record, offset);
        }

        Ok(index)
    }

    fn parse_line(line: &str, line_no: usize) -> WindowResult<(&str, SeqPos)> {
        let mut fields = line.split_whitespace();
        let (record, offset) = match (fields.next(), fields.next()) {
            (Some(record), Some(offset)) => (record, offset),
            _ => {
                return Err(WindowError::mismatch(format!(
                    "anchor line {} needs a record name and an offset: {}",
                    line_no, line
                )))
            }
        };
        let offset = offset.parse::<SeqPos>().map_err(|_| {
            WindowError::mismatch(format!("invalid anchor offset '{}' on line {}", offset, line_no))
        })?;
        Ok((record, offset))
    }

    pub fn add_anchor(&mut self, record: &str, offset: SeqPos) {
        match self.anchors.get_mut(record) {
            Some(offsets) => {
                offsets.insert(offset);
            }
            None => {
                self.order.push(record.to_string());
                self.anchors.insert(record.to_string(), BTreeSet::from([offset]));
            }
        }
    }

    /// Ascending, distinct anchors of a record
    pub fn anchors_for(&self, record: &str) -> Option<&BTreeSet<SeqPos>> {
        self.anchors.get(record)
    }

    /// Record names in order of first appearance
    pub fn record_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of records with at least one anchor
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total_anchors(&self) -> usize {
        self.anchors.values().map(BTreeSet::len).sum()
    }
}
