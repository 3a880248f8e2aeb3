//! FASTA record source
//!
//! Streams records from a file with needletail, one at a time. Compressed
//! input is detected by needletail. The source can be reopened to start a
//! new pass over the same file.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use needletail::{parse_fastx_reader, FastxReader};

use crate::error::{WindowError, WindowResult};
use crate::types::{split_header, Record};

/// Forward-only reader over the records of one FASTA file
pub struct RecordSource {
    path: PathBuf,
    reader: Box<dyn FastxReader>,
    records_read: usize,
}

impl RecordSource {
    /// Open `path` positioned at its first record
    pub fn open<P: AsRef<Path>>(path: P) -> WindowResult<Self> {
        let path = path.as_ref().to_path_buf();
        let reader = Self::open_reader(&path)?;
        Ok(Self {
            path,
            reader,
            records_read: 0,
        })
    }

    /// Read records from an arbitrary byte stream; `path` is only used for
    /// messages and must not be reopened
    #[cfg(test)]
    pub(crate) fn from_reader<R: Read + Send + 'static>(path: &Path, reader: R) -> WindowResult<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            reader: Self::parse(path, reader)?,
            records_read: 0,
        })
    }

    fn open_reader(path: &Path) -> WindowResult<Box<dyn FastxReader>> {
        let file = File::open(path)?;
        Self::parse(path, file)
    }

    fn parse<R: Read + Send + 'static>(path: &Path, reader: R) -> WindowResult<Box<dyn FastxReader>> {
        parse_fastx_reader(reader).map_err(|e| {
            WindowError::malformed(format!("{}: {}", path.display(), e))
        })
    }

    /// Start over from the first record
    pub fn reopen(&mut self) -> WindowResult<()> {
        self.reader = Self::open_reader(&self.path)?;
        self.records_read = 0;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records read since the last (re)open
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Read the next record in full
    pub fn next_record(&mut self) -> Option<WindowResult<Record>> {
        let record = match self.reader.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        self.records_read += 1;

        let header = String::from_utf8_lossy(record.id());
        let sequence = record.seq().into_owned();
        Some(Ok(Record::from_header(&header, sequence)))
    }

    /// Read only the length of the next record
    pub fn next_length(&mut self) -> Option<WindowResult<usize>> {
        let record = match self.reader.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        self.records_read += 1;
        Some(Ok(record.num_bases()))
    }

    /// Read only the header of the next record, split into id and description
    pub fn next_header(&mut self) -> Option<WindowResult<(String, Option<String>)>> {
        let record = match self.reader.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        self.records_read += 1;
        Some(Ok(split_header(&String::from_utf8_lossy(record.id()))))
    }
}

impl Iterator for RecordSource {
    type Item = WindowResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}
