use seqwin_core::{
    count_qualifying, open_indexed, open_resampling, open_sequential, WindowError, ONE_HOT,
};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn fasta() -> PathBuf {
    data("three_cds.fna")
}

fn anchors() -> PathBuf {
    data("three_cds.anchors.bed")
}

/// Sequences of the fixture, joined across lines, in file order
fn fixture_sequences() -> Vec<String> {
    let text = std::fs::read_to_string(fasta()).expect("read fixture");
    let mut sequences: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.starts_with('>') {
            sequences.push(String::new());
        } else if let Some(seq) = sequences.last_mut() {
            seq.push_str(line.trim());
        }
    }
    sequences
}

#[test]
fn count_is_monotonic_in_window_length() {
    assert_eq!(count_qualifying(fasta(), 10).unwrap(), 3);
    assert_eq!(count_qualifying(fasta(), 90).unwrap(), 2);
    assert_eq!(count_qualifying(fasta(), 10_000_000).unwrap(), 0);

    let mut previous = usize::MAX;
    for window in [0, 1, 65, 80, 81, 120, 121, 150, 151] {
        let count = count_qualifying(fasta(), window).unwrap();
        assert!(count <= previous, "count rose at window {}", window);
        previous = count;
    }
}

#[test]
fn sequential_yields_every_qualifying_record_once() {
    let windows: Vec<_> = open_sequential(fasta(), 65, false)
        .expect("open fixture")
        .collect::<Result<_, _>>()
        .expect("encode windows");

    assert_eq!(windows.len(), 3);
    for sample in &windows {
        assert_eq!(sample.window.len(), 65);
        assert!(sample.window.iter().all(|v| ONE_HOT.contains(v)));
        assert!(sample.window.covers_alphabet());
    }
    assert_eq!(windows[1].description, "ribosomal protein L7");
}

#[test]
fn sequential_skips_short_records() {
    let windows: Vec<_> = open_sequential(fasta(), 90, false)
        .unwrap()
        .map(|r| r.unwrap().description)
        .collect();
    assert_eq!(windows, vec!["ribosomal protein L7", "membrane transporter subunit"]);
}

#[test]
fn cyclic_sequential_never_exhausts() {
    let mut iter = open_sequential(fasta(), 65, true).unwrap();
    let mut last = None;
    for (i, sample) in iter.by_ref().enumerate().take(32) {
        sample.expect("cyclic window");
        last = Some(i);
    }
    assert_eq!(last, Some(31));
    assert!(!iter.is_exhausted());
}

#[test]
fn decoded_window_reproduces_prefix() {
    let sequences = fixture_sequences();
    let windows = open_sequential(fasta(), 65, false).unwrap();
    for (sample, sequence) in windows.zip(&sequences) {
        let decoded = sample.unwrap().window.decode().expect("canonical vectors");
        assert_eq!(decoded, sequence.as_bytes()[..65].to_vec());
    }
}

#[test]
fn indexed_whole_record_windows() {
    let mut sampler = open_indexed(fasta(), anchors(), 0, 5, false).expect("build index");
    assert_eq!(sampler.records_len(), 3);
    assert_eq!(sampler.len(), 15);
    assert_eq!(sampler.get_idx(sampler.len() - 1).unwrap(), sampler.get_idx(3 * 5 - 1).unwrap());

    // Window 0 runs from the anchor to the end of the record
    let sequences = fixture_sequences();
    let sample = sampler.get_idx(6).unwrap();
    assert_eq!(sample.window.decode().unwrap(), sequences[1].as_bytes()[10..].to_vec());

    assert!(matches!(
        sampler.get_idx(15),
        Err(WindowError::IndexOutOfRange { ordinal: 15, len: 15 })
    ));
}

#[test]
fn indexed_lookup_is_idempotent() {
    let mut sampler = open_indexed(fasta(), anchors(), 68, 5, false).unwrap();
    for ordinal in 0..sampler.len() {
        let first = sampler.get_idx(ordinal).unwrap();
        let second = sampler.get_idx(ordinal).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.window.len(), 68);
    }
}

#[test]
fn indexed_windows_match_fixture_offsets() {
    let sequences = fixture_sequences();
    let mut sampler = open_indexed(fasta(), anchors(), 68, 5, false).unwrap();
    for ordinal in 0..sampler.len() {
        let entry = sampler.entry(ordinal).unwrap();
        let sequence = sequences[entry.record_id].as_bytes();
        let expected = &sequence[entry.anchor_offset..entry.anchor_offset + 68];
        assert_eq!(sampler.get_idx(ordinal).unwrap().window.decode().unwrap(), expected);
    }
}

#[test]
fn cyclic_indexed_lookup_wraps() {
    let mut sampler = open_indexed(fasta(), anchors(), 68, 5, true).unwrap();
    let len = sampler.len();
    for ordinal in [0, 7, 15, 22, 1000] {
        assert_eq!(sampler.get_idx(ordinal).unwrap(), sampler.get_idx(ordinal % len).unwrap());
    }
    assert_eq!(sampler.iter().take(40).filter(Result::is_ok).count(), 40);
}

#[test]
fn anchors_for_disqualified_record_are_rejected() {
    // cds_alpha (80 bp) is anchored but does not qualify for a 90 bp window
    assert!(matches!(
        open_indexed(fasta(), anchors(), 90, 5, false),
        Err(WindowError::IndexMismatch(_))
    ));
}

#[test]
fn anchors_must_cover_every_qualifying_record() {
    let mut partial = NamedTempFile::new().expect("create temp anchors");
    for offset in [0, 3, 6, 9, 12] {
        writeln!(partial, "cds_alpha\t{}", offset).unwrap();
    }
    partial.flush().unwrap();

    assert!(matches!(
        open_indexed(fasta(), partial.path(), 0, 5, false),
        Err(WindowError::IndexMismatch(_))
    ));
}

#[test]
fn resampling_draws_from_every_record() {
    let sequences = fixture_sequences();
    let batches: Vec<_> = open_resampling(fasta(), 30, 4, false, Some(2024))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(batches.len(), 3);
    for (batch, sequence) in batches.iter().zip(&sequences) {
        assert_eq!(batch.len(), 4);
        for sample in batch {
            let decoded = String::from_utf8(sample.window.decode().unwrap()).unwrap();
            assert!(sequence.contains(&decoded));
        }
    }
}
