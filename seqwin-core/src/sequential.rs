//! Sequential window iterator
//!
//! Walks a FASTA file in order and yields the encoded leading window of each
//! qualifying record. In cyclic mode the file is reopened after the last
//! record and iteration never ends on its own.

use std::iter::FusedIterator;
use std::path::Path;

use crate::config::WindowConfig;
use crate::encoding::encode;
use crate::error::{WindowError, WindowResult};
use crate::filter::qualifies_with;
use crate::source::RecordSource;
use crate::types::{Record, WindowSample};
use crate::window::{effective_length, extract};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Next record to read, counted from the start of the current pass
    Positioned(usize),
    Exhausted,
}

/// Cursor over the qualifying records of a file
///
/// Non-cyclic cursors end after the last record. Cyclic cursors reopen the
/// file and start over, unless a whole pass found nothing that qualified.
/// Any error moves the cursor to `Exhausted`.
pub(crate) struct RecordCursor {
    source: RecordSource,
    cyclic: bool,
    state: State,
    produced_in_pass: usize,
    passes: usize,
}

impl RecordCursor {
    pub(crate) fn open<P: AsRef<Path>>(path: P, cyclic: bool) -> WindowResult<Self> {
        Ok(Self {
            source: RecordSource::open(path)?,
            cyclic,
            state: State::Positioned(0),
            produced_in_pass: 0,
            passes: 0,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        self.source.path()
    }

    pub(crate) fn passes(&self) -> usize {
        self.passes
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Move to `Exhausted`, passing `err` through
    pub(crate) fn fail<T>(&mut self, err: WindowError) -> Option<WindowResult<T>> {
        self.state = State::Exhausted;
        Some(Err(err))
    }

    /// Next record accepted by `qualifies`, in file order
    pub(crate) fn next_qualifying<F>(&mut self, qualifies: F) -> Option<WindowResult<Record>>
    where
        F: Fn(&Record) -> bool,
    {
        loop {
            let index = match self.state {
                State::Exhausted => return None,
                State::Positioned(index) => index,
            };

            match self.source.next_record() {
                Some(Ok(record)) => {
                    self.state = State::Positioned(index + 1);
                    if qualifies(&record) {
                        self.produced_in_pass += 1;
                        return Some(Ok(record));
                    }
                    log::debug!("Skipping record {} ({} bp)", record.id, record.len());
                }
                Some(Err(e)) => return self.fail(e),
                None if !self.cyclic => {
                    self.state = State::Exhausted;
                    return None;
                }
                None => {
                    self.passes += 1;
                    if self.produced_in_pass == 0 {
                        log::warn!(
                            "No record in {} qualifies; stopping cyclic iteration",
                            self.source.path().display()
                        );
                        self.state = State::Exhausted;
                        return None;
                    }
                    if let Err(e) = self.source.reopen() {
                        return self.fail(e);
                    }
                    self.produced_in_pass = 0;
                    self.state = State::Positioned(0);
                }
            }
        }
    }
}

/// Lazy stream of `(window, description)` samples in file order
pub struct SequentialWindows {
    cursor: RecordCursor,
    config: WindowConfig,
}

impl SequentialWindows {
    pub fn new<P: AsRef<Path>>(path: P, config: WindowConfig) -> WindowResult<Self> {
        let cursor = RecordCursor::open(&path, config.cyclic)?;
        log::debug!(
            "Sequential windows over {} (window {}, cyclic {}, circular {})",
            cursor.path().display(),
            config.window_length,
            config.cyclic,
            config.circular
        );
        Ok(Self { cursor, config })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Completed passes over the file
    pub fn passes(&self) -> usize {
        self.cursor.passes()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted()
    }

    fn sample(&self, record: &Record) -> WindowResult<WindowSample> {
        let symbols = if record.is_empty() {
            Vec::new()
        } else {
            let length = effective_length(self.config.window_length, record.len());
            extract(&record.sequence, 0, length, self.config.circular)?
        };
        Ok(WindowSample::new(encode(&symbols)?, record.label()))
    }
}

impl Iterator for SequentialWindows {
    type Item = WindowResult<WindowSample>;

    fn next(&mut self) -> Option<Self::Item> {
        let (window, circular) = (self.config.window_length, self.config.circular);
        let record = match self.cursor.next_qualifying(|r| qualifies_with(r.len(), window, circular))? {
            Ok(record) => record,
            Err(e) => return Some(Err(e)),
        };
        match self.sample(&record) {
            Ok(sample) => Some(Ok(sample)),
            Err(e) => self.cursor.fail(e),
        }
    }
}

impl FusedIterator for SequentialWindows {}
