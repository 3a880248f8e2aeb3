//! Random window resampling
//!
//! Draws `samples_per_record` windows at uniformly random offsets from every
//! qualifying record and yields them together, one batch per record. Records
//! must be strictly longer than the window so that a record is never
//! represented by `n` copies of the same window.

use std::iter::FusedIterator;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::WindowConfig;
use crate::encoding::encode;
use crate::error::{WindowError, WindowResult};
use crate::sequential::RecordCursor;
use crate::types::{Record, WindowSample};
use crate::window::extract;

/// Lazy stream of per-record batches of randomly placed windows
pub struct ResamplingWindows {
    cursor: RecordCursor,
    config: WindowConfig,
    rng: StdRng,
}

impl ResamplingWindows {
    pub fn new<P: AsRef<Path>>(path: P, config: WindowConfig) -> WindowResult<Self> {
        config.validate_sampling()?;
        if config.window_length == 0 {
            return Err(WindowError::InvalidParams(
                "resampling needs a window length of at least 1".to_string(),
            ));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let cursor = RecordCursor::open(&path, config.cyclic)?;
        log::debug!(
            "Resampling {} windows of {} per record from {}",
            config.samples_per_record,
            config.window_length,
            cursor.path().display()
        );

        Ok(Self { cursor, config, rng })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn passes(&self) -> usize {
        self.cursor.passes()
    }

    fn qualifies(record: &Record, window: usize, circular: bool) -> bool {
        if circular {
            !record.is_empty()
        } else {
            record.len() > window
        }
    }

    fn draw(&mut self, record: &Record) -> WindowResult<Vec<WindowSample>> {
        let window = self.config.window_length;
        let circular = self.config.circular;
        // Exclusive upper bound on start offsets
        let starts = if circular { record.len() } else { record.len() - window + 1 };

        (0..self.config.samples_per_record)
            .map(|_| -> WindowResult<WindowSample> {
                let start = self.rng.gen_range(0..starts);
                let symbols = extract(&record.sequence, start, window, circular)?;
                Ok(WindowSample::new(encode(&symbols)?, record.label()))
            })
            .collect()
    }
}

impl Iterator for ResamplingWindows {
    type Item = WindowResult<Vec<WindowSample>>;

    fn next(&mut self) -> Option<Self::Item> {
        let (window, circular) = (self.config.window_length, self.config.circular);
        let record = match self.cursor.next_qualifying(|r| Self::qualifies(r, window, circular))? {
            Ok(record) => record,
            Err(e) => return Some(Err(e)),
        };
        match self.draw(&record) {
            Ok(batch) => Some(Ok(batch)),
            Err(e) => self.cursor.fail(e),
        }
    }
}

impl FusedIterator for ResamplingWindows {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_fasta(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_batches_per_record() {
        let file = write_fasta(">a\nACGTACGTACGT\n>b\nACGT\n>c\nTTGGCCAATTGG\n");
        let config = WindowConfig::new(4).samples_per_record(3).seed(11);
        let batches: Vec<_> = ResamplingWindows::new(file.path(), config)
            .unwrap()
            .collect::<WindowResult<_>>()
            .unwrap();

        // "b" is exactly window-sized and therefore skipped
        assert_eq!(batches.len(), 2);
        for batch in &batches {
            assert_eq!(batch.len(), 3);
            assert!(batch.iter().all(|s| s.window.len() == 4));
        }
        assert_eq!(batches[1][0].description, "c");
    }

    #[test]
    fn test_windows_are_substrings() {
        let sequence = "ACGTTGCAACGGTTCA";
        let file = write_fasta(&format!(">a\n{}\n", sequence));
        let config = WindowConfig::new(5).samples_per_record(20).seed(3);
        let batch = ResamplingWindows::new(file.path(), config).unwrap().next().unwrap().unwrap();
        for sample in batch {
            let decoded = String::from_utf8(sample.window.decode().unwrap()).unwrap();
            assert!(sequence.contains(&decoded), "{} not in {}", decoded, sequence);
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let file = write_fasta(">a\nACGTTGCAACGGTTCAGGCA\n");
        let config = WindowConfig::new(6).samples_per_record(8).seed(42);
        let first = ResamplingWindows::new(file.path(), config.clone()).unwrap().next().unwrap().unwrap();
        let second = ResamplingWindows::new(file.path(), config).unwrap().next().unwrap().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cyclic_resampling() {
        let file = write_fasta(">a\nACGTACGTAC\n");
        let config = WindowConfig::new(4).cyclic(true).seed(1);
        let mut iter = ResamplingWindows::new(file.path(), config).unwrap();
        assert_eq!(iter.by_ref().take(10).count(), 10);
        assert_eq!(iter.passes(), 9);
    }

    #[test]
    fn test_zero_window_rejected() {
        let file = write_fasta(">a\nACGT\n");
        assert!(matches!(
            ResamplingWindows::new(file.path(), WindowConfig::new(0)),
            Err(WindowError::InvalidParams(_))
        ));
    }
}
