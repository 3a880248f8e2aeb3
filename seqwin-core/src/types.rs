use serde::{Deserialize, Serialize};

use crate::encoding::EncodedWindow;

/// Zero-based position inside a record
pub type SeqPos = usize;

/// One FASTA entry as handed out by the record source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub description: Option<String>,
    pub sequence: Vec<u8>,
}

impl Record {
    /// Build a record from a raw header line (without the leading `>`)
    pub fn from_header(header: &str, sequence: Vec<u8>) -> Self {
        let (id, description) = split_header(header);
        Self {
            id,
            description,
            sequence,
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Label attached to every window drawn from this record
    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.id)
    }
}

/// Split a header into its id and the optional free-text description
pub(crate) fn split_header(header: &str) -> (String, Option<String>) {
    let header = header.trim();
    match header.split_once(char::is_whitespace) {
        Some((id, rest)) => {
            let rest = rest.trim();
            let description = (!rest.is_empty()).then(|| rest.to_string());
            (id.to_string(), description)
        }
        None => (header.to_string(), None),
    }
}

/// An encoded window paired with the description of its record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSample {
    pub window: EncodedWindow,
    pub description: String,
}

impl WindowSample {
    pub fn new(window: EncodedWindow, description: impl Into<String>) -> Self {
        Self {
            window,
            description: description.into(),
        }
    }

    pub fn into_parts(self) -> (EncodedWindow, String) {
        (self.window, self.description)
    }
}

/// One (qualifying record, anchor) pair of the sample index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Position of the record in the FASTA file
    pub record_id: usize,
    pub anchor_offset: SeqPos,
    pub sample_ordinal: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_split() {
        let record = Record::from_header("NC_000913.3 Escherichia coli K-12", b"ACGT".to_vec());
        assert_eq!(record.id, "NC_000913.3");
        assert_eq!(record.description.as_deref(), Some("Escherichia coli K-12"));
        assert_eq!(record.label(), "Escherichia coli K-12");
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let record = Record::from_header("plasmid_1  ", b"ACGT".to_vec());
        assert_eq!(record.description, None);
        assert_eq!(record.label(), "plasmid_1");
    }
}
