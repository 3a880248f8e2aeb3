//! Indexed window sampler
//!
//! Pairs every qualifying FASTA record with `samples_per_record` anchors and
//! numbers the resulting (record, anchor) pairs with a dense global ordinal.
//! Lookups fetch just the window's bytes through bio's `IndexedReader`; the
//! sampler itself keeps only record metadata.

use std::fs::File;
use std::io::BufReader;
use std::iter::FusedIterator;
use std::path::Path;

use bio::io::fasta;

use crate::anchors::AnchorIndex;
use crate::config::WindowConfig;
use crate::encoding::encode;
use crate::error::{WindowError, WindowResult};
use crate::faidx::FaiLayout;
use crate::filter::qualifies_with;
use crate::types::{IndexEntry, SeqPos, WindowSample};
use crate::window::window_spans;

/// Metadata kept per qualifying record
#[derive(Debug, Clone)]
struct IndexedRecord {
    rid: usize,
    length: usize,
    label: String,
}

/// Random-access collection of encoded windows keyed by sample ordinal
pub struct IndexedSampler {
    reader: fasta::IndexedReader<BufReader<File>>,
    /// Qualifying records in file order; record `k` owns ordinals `k*n..(k+1)*n`
    records: Vec<IndexedRecord>,
    entries: Vec<IndexEntry>,
    config: WindowConfig,
    buffer: Vec<u8>,
}

impl IndexedSampler {
    /// Scan `fasta_path`, load anchors from `anchors_path` and build the index
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        fasta_path: P,
        anchors_path: Q,
        config: WindowConfig,
    ) -> WindowResult<Self> {
        config.validate_sampling()?;
        let layout = FaiLayout::from_fasta(&fasta_path)?;
        let anchors = AnchorIndex::from_file(anchors_path)?;
        Self::with_layout(layout, &anchors, config)
    }

    /// Build the index from an already scanned layout and loaded anchors
    pub fn with_layout(layout: FaiLayout, anchors: &AnchorIndex, config: WindowConfig) -> WindowResult<Self> {
        config.validate_sampling()?;
        let (records, entries) = build_index(&layout, anchors, &config)?;

        let file = File::open(&layout.path)?;
        let reader = fasta::IndexedReader::with_index(BufReader::new(file), layout.to_bio_index()?);

        log::info!(
            "Indexed {} windows over {} of {} records in {} (window {}, {} per record)",
            entries.len(),
            records.len(),
            layout.len(),
            layout.path.display(),
            config.window_length,
            config.samples_per_record
        );

        Ok(Self {
            reader,
            records,
            entries,
            config,
            buffer: Vec::new(),
        })
    }

    /// Total number of index entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of qualifying records present in the index
    pub fn records_len(&self) -> usize {
        self.records.len()
    }

    pub fn samples_per_record(&self) -> usize {
        self.config.samples_per_record
    }

    pub fn window_length(&self) -> usize {
        self.config.window_length
    }

    pub fn is_cyclic(&self) -> bool {
        self.config.cyclic
    }

    /// Index entry stored at `ordinal`, without cyclic wrapping
    pub fn entry(&self, ordinal: usize) -> Option<IndexEntry> {
        self.entries.get(ordinal).copied()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    fn resolve(&self, ordinal: usize) -> WindowResult<usize> {
        let len = self.entries.len();
        if len > 0 && self.config.cyclic {
            Ok(ordinal % len)
        } else if ordinal < len {
            Ok(ordinal)
        } else {
            Err(WindowError::IndexOutOfRange { ordinal, len })
        }
    }

    /// Encoded window and record description for `ordinal`
    pub fn get_idx(&mut self, ordinal: usize) -> WindowResult<WindowSample> {
        let slot = self.resolve(ordinal)?;
        let entry = self.entries[slot];
        let record = &self.records[slot / self.config.samples_per_record];
        let length = window_len_at(&self.config, record.length, entry.anchor_offset);
        let spans = window_spans(record.length, entry.anchor_offset, length, self.config.circular)?;

        let mut symbols = Vec::with_capacity(length);
        for span in spans {
            self.reader
                .fetch_by_rid(record.rid, span.start as u64, span.end as u64)?;
            self.buffer.clear();
            self.reader.read(&mut self.buffer)?;
            symbols.extend_from_slice(&self.buffer);
        }
        if symbols.len() != length {
            return Err(WindowError::malformed(format!(
                "read {} of {} bases for record '{}' at {}",
                symbols.len(),
                length,
                record.label,
                entry.anchor_offset
            )));
        }

        Ok(WindowSample::new(encode(&symbols)?, record.label.clone()))
    }

    /// Iterate in ascending ordinal order; endless when the sampler is cyclic
    pub fn iter(&mut self) -> IndexedIter<'_> {
        IndexedIter {
            sampler: self,
            next: 0,
            done: false,
        }
    }
}

impl<'a> IntoIterator for &'a mut IndexedSampler {
    type Item = WindowResult<WindowSample>;
    type IntoIter = IndexedIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Window length drawn at `anchor`; 0 means the remainder of the record,
/// or a full rotation when circular
fn window_len_at(config: &WindowConfig, record_len: usize, anchor: SeqPos) -> usize {
    match (config.window_length, config.circular) {
        (0, true) => record_len,
        (0, false) => record_len.saturating_sub(anchor),
        (window, _) => window,
    }
}

/// Records the sampler can index; an empty record has no valid anchor
fn indexable(record_len: usize, config: &WindowConfig) -> bool {
    record_len > 0 && qualifies_with(record_len, config.window_length, config.circular)
}

fn build_index(
    layout: &FaiLayout,
    anchors: &AnchorIndex,
    config: &WindowConfig,
) -> WindowResult<(Vec<IndexedRecord>, Vec<IndexEntry>)> {
    let window = config.window_length;
    let samples = config.samples_per_record;

    // Every anchored record must exist and qualify
    for name in anchors.record_names() {
        let rid = layout
            .rid(name)
            .ok_or_else(|| WindowError::mismatch(format!("anchors reference unknown record '{}'", name)))?;
        let length = layout.records[rid].length as usize;
        if !indexable(length, config) {
            return Err(WindowError::mismatch(format!(
                "anchors reference record '{}' ({} bp) which does not qualify for window {}",
                name, length, window
            )));
        }
    }

    let mut records = Vec::new();
    let mut entries = Vec::new();

    for (rid, fai) in layout.records.iter().enumerate() {
        let length = fai.length as usize;
        if !indexable(length, config) {
            log::debug!("Record {} ({} bp) does not qualify for window {}", fai.name, length, window);
            continue;
        }

        let offsets = anchors
            .anchors_for(&fai.name)
            .ok_or_else(|| WindowError::mismatch(format!("qualifying record '{}' has no anchors", fai.name)))?;
        if offsets.len() < samples {
            return Err(WindowError::mismatch(format!(
                "record '{}' has {} anchors, {} required",
                fai.name,
                offsets.len(),
                samples
            )));
        }

        // Offsets are ascending, so the last one bounds them all
        if let Some(&offset) = offsets.last().filter(|&&offset| offset >= length) {
            return Err(WindowError::mismatch(format!(
                "anchor {} lies outside record '{}' ({} bp)",
                offset, fai.name, length
            )));
        }

        for &offset in offsets.iter().take(samples) {
            if !config.circular && offset + window_len_at(config, length, offset) > length {
                return Err(WindowError::mismatch(format!(
                    "window of {} at anchor {} overruns record '{}' ({} bp)",
                    window, offset, fai.name, length
                )));
            }
            entries.push(IndexEntry {
                record_id: rid,
                anchor_offset: offset,
                sample_ordinal: entries.len(),
            });
        }

        records.push(IndexedRecord {
            rid,
            length,
            label: fai.label().to_string(),
        });
    }

    Ok((records, entries))
}

/// Iterator over an [`IndexedSampler`] in ordinal order
pub struct IndexedIter<'a> {
    sampler: &'a mut IndexedSampler,
    next: usize,
    done: bool,
}

impl Iterator for IndexedIter<'_> {
    type Item = WindowResult<WindowSample>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.sampler.len();
        if self.done || len == 0 || (!self.sampler.is_cyclic() && self.next >= len) {
            self.done = true;
            return None;
        }

        let result = self.sampler.get_idx(self.next);
        self.next = if self.sampler.is_cyclic() { (self.next + 1) % len } else { self.next + 1 };
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.sampler.len();
        if self.done || len == 0 {
            (0, Some(0))
        } else if self.sampler.is_cyclic() {
            (usize::MAX, None)
        } else {
            let left = len.saturating_sub(self.next);
            (left, Some(left))
        }
    }
}

impl FusedIterator for IndexedIter<'_> {}
