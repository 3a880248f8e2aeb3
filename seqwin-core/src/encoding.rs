//! One-hot encoding over the nucleotide alphabet
//!
//! Every symbol maps to a 4-slot indicator vector in the canonical order
//! A, C, G, T. Soft-masked (lowercase) bases encode like their uppercase
//! counterparts; anything else is rejected.

use std::ops::Deref;

use crate::error::{WindowError, WindowResult};

/// One-hot vector for a single nucleotide
pub type OneHot = [u8; 4];

/// Canonical alphabet, in vector slot order
pub const ALPHABET: [u8; 4] = *b"ACGT";

/// Lookup table from symbol to one-hot vector, shared by every encoder
pub const ONE_HOT: [OneHot; 4] = [
    [1, 0, 0, 0], // A
    [0, 1, 0, 0], // C
    [0, 0, 1, 0], // G
    [0, 0, 0, 1], // T
];

/// Slot of a nucleotide in [`ALPHABET`]
#[inline]
pub fn symbol_slot(symbol: u8) -> Option<usize> {
    match symbol.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Encode a single symbol
#[inline]
pub fn encode_symbol(symbol: u8) -> Option<OneHot> {
    symbol_slot(symbol).map(|slot| ONE_HOT[slot])
}

/// Encode a symbol sequence, failing on the first symbol outside the alphabet
pub fn encode(symbols: &[u8]) -> WindowResult<EncodedWindow> {
    symbols
        .iter()
        .enumerate()
        .map(|(position, &symbol)| {
            encode_symbol(symbol).ok_or(WindowError::UnknownSymbol {
                symbol: symbol as char,
                position,
            })
        })
        .collect::<WindowResult<Vec<_>>>()
        .map(EncodedWindow)
}

/// Map one-hot vectors back to uppercase symbols
///
/// Returns `None` if any vector is not one of the four canonical vectors.
pub fn decode(vectors: &[OneHot]) -> Option<Vec<u8>> {
    vectors
        .iter()
        .map(|vector| {
            ONE_HOT
                .iter()
                .position(|canonical| canonical == vector)
                .map(|slot| ALPHABET[slot])
        })
        .collect()
}

/// Encoded window: one one-hot vector per symbol
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EncodedWindow(Vec<OneHot>);

impl EncodedWindow {
    pub fn into_inner(self) -> Vec<OneHot> {
        self.0
    }

    /// Decode back to the symbol sequence this window was built from
    pub fn decode(&self) -> Option<Vec<u8>> {
        decode(&self.0)
    }

    /// Per-symbol counts in alphabet order
    pub fn composition(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for vector in &self.0 {
            for (count, &bit) in counts.iter_mut().zip(vector) {
                *count += bit as usize;
            }
        }
        counts
    }

    /// Whether every canonical vector occurs at least once
    pub fn covers_alphabet(&self) -> bool {
        self.composition().iter().all(|&count| count > 0)
    }
}

impl Deref for EncodedWindow {
    type Target = [OneHot];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<EncodedWindow> for Vec<OneHot> {
    fn from(window: EncodedWindow) -> Self {
        window.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_canonical_order() {
        let window = encode(b"ACGT").unwrap();
        assert_eq!(&*window, &ONE_HOT[..]);
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        assert_eq!(encode(b"acgt").unwrap(), encode(b"ACGT").unwrap());
    }

    #[test]
    fn test_unknown_symbol_reports_position() {
        match encode(b"ACGNT") {
            Err(WindowError::UnknownSymbol { symbol, position }) => {
                assert_eq!(symbol, 'N');
                assert_eq!(position, 3);
            }
            other => panic!("expected UnknownSymbol, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sequence() {
        let window = encode(b"").unwrap();
        assert!(window.is_empty());
        assert!(!window.covers_alphabet());
    }

    #[test]
    fn test_decode_rejects_non_canonical() {
        assert_eq!(decode(&[[1, 1, 0, 0]]), None);
        assert_eq!(decode(&[[0, 0, 0, 0]]), None);
    }

    #[test]
    fn test_composition() {
        let window = encode(b"AACGTTT").unwrap();
        assert_eq!(window.composition(), [2, 1, 1, 3]);
        assert!(window.covers_alphabet());
    }

    proptest! {
        #[test]
        fn prop_roundtrip(seq in "[ACGT]{0,200}") {
            let window = encode(seq.as_bytes()).unwrap();
            prop_assert_eq!(window.len(), seq.len());
            prop_assert_eq!(window.decode().unwrap(), seq.as_bytes().to_vec());
        }

        #[test]
        fn prop_each_vector_is_one_hot(seq in "[ACGTacgt]{1,100}") {
            let window = encode(seq.as_bytes()).unwrap();
            for vector in window.iter() {
                prop_assert_eq!(vector.iter().map(|&b| b as u32).sum::<u32>(), 1);
            }
        }
    }
}
