//! FAI layout of a FASTA file
//!
//! noodles indexes the file (the five samtools `.fai` columns per record) and
//! a header-only needletail pass adds each record's description. The layout
//! is handed to bio's `IndexedReader` for random access, so the sequence
//! itself is never held in memory.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs::File;
use std::path::{Path, PathBuf};

use bio::io::fasta as bio_fasta;
use noodles::fasta::{self, fai};

use crate::error::{WindowError, WindowResult};
use crate::source::RecordSource;

/// Layout of one FASTA record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaiRecord {
    pub name: String,
    pub description: Option<String>,
    pub length: u64,
    /// Byte offset of the first base
    pub offset: u64,
    pub line_bases: u64,
    pub line_bytes: u64,
}

impl FaiRecord {
    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }
}

/// Layout of every record in a FASTA file, in file order
#[derive(Debug, Clone)]
pub struct FaiLayout {
    pub path: PathBuf,
    pub records: Vec<FaiRecord>,
    name_map: HashMap<String, usize>,
}

impl FaiLayout {
    /// Index `path` and build its layout
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> WindowResult<Self> {
        let path = path.as_ref().to_path_buf();
        if File::open(&path)?.metadata()?.len() == 0 {
            return Err(WindowError::malformed(format!("FASTA file is empty: {}", path.display())));
        }

        let index = fasta::index(&path)
            .map_err(|e| WindowError::malformed(format!("{}: {}", path.display(), e)))?;
        let entries: &[fai::Record] = index.as_ref();
        if entries.is_empty() {
            return Err(WindowError::malformed(format!("no FASTA records found in {}", path.display())));
        }

        let mut headers = RecordSource::open(&path)?;
        let mut records = Vec::with_capacity(entries.len());
        let mut name_map = HashMap::with_capacity(entries.len());

        for (rid, entry) in entries.iter().enumerate() {
            let name = String::from_utf8_lossy(entry.name().as_ref()).into_owned();
            let (id, description) = match headers.next_header() {
                Some(header) => header?,
                None => return Err(WindowError::malformed(format!("record '{}' missing from header pass", name))),
            };
            if id != name {
                return Err(WindowError::malformed(format!(
                    "header pass found '{}' where the index has '{}'",
                    id, name
                )));
            }
            if name_map.insert(name.clone(), rid).is_some() {
                return Err(WindowError::malformed(format!(
                    "duplicate record name '{}' in {}",
                    name,
                    path.display()
                )));
            }

            records.push(FaiRecord {
                name,
                description,
                length: entry.length(),
                offset: entry.offset(),
                line_bases: entry.line_bases(),
                line_bytes: entry.line_width(),
            });
        }

        log::debug!("Indexed {} records from {}", records.len(), path.display());
        Ok(Self {
            path,
            records,
            name_map,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record id (file position) of a record name
    pub fn rid(&self, name: &str) -> Option<usize> {
        self.name_map.get(name).copied()
    }

    pub fn get(&self, rid: usize) -> Option<&FaiRecord> {
        self.records.get(rid)
    }

    /// Render the layout in samtools `.fai` format
    pub fn to_fai_string(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                record.name, record.length, record.offset, record.line_bases, record.line_bytes
            );
        }
        out
    }

    /// Convert to bio's index type for use with `IndexedReader`
    pub fn to_bio_index(&self) -> WindowResult<bio_fasta::Index> {
        bio_fasta::Index::new(self.to_fai_string().as_bytes())
            .map_err(|e| WindowError::malformed(format!("{}: {}", self.path.display(), e)))
    }
}
