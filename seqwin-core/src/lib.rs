//! seqwin core library
//!
//! Turns FASTA records into fixed-length, one-hot encoded windows, either as a
//! forward-only stream ([`open_sequential`]) or as a randomly addressable
//! collection keyed by external anchors ([`open_indexed`]).

pub mod types;
pub mod error;
pub mod config;
pub mod source;
pub mod filter;
pub mod encoding;
pub mod window;
pub mod sequential;
pub mod faidx;
pub mod anchors;
pub mod indexed;
pub mod resample;

use std::path::Path;

// Re-export commonly used types and functions
pub use types::{IndexEntry, Record, WindowSample};
pub use error::{WindowError, WindowResult};
pub use config::WindowConfig;
pub use encoding::{decode, encode, EncodedWindow, OneHot, ONE_HOT};
pub use window::{extract, window_spans};
pub use filter::{count_qualifying, qualifies, qualifies_circular};
pub use sequential::SequentialWindows;
pub use indexed::{IndexedIter, IndexedSampler};
pub use resample::ResamplingWindows;
pub use anchors::AnchorIndex;

/// Version information for the seqwin core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stream the leading window of every qualifying record in file order
///
/// With `cyclic`, the stream restarts at the first record after the last one
/// and never ends on its own.
pub fn open_sequential<P: AsRef<Path>>(
    path: P,
    window_length: usize,
    cyclic: bool,
) -> WindowResult<SequentialWindows> {
    SequentialWindows::new(path, WindowConfig::new(window_length).cyclic(cyclic))
}

/// Index `samples_per_record` anchored windows for every qualifying record
pub fn open_indexed<P: AsRef<Path>, Q: AsRef<Path>>(
    path: P,
    index_path: Q,
    window_length: usize,
    samples_per_record: usize,
    cyclic: bool,
) -> WindowResult<IndexedSampler> {
    let config = WindowConfig::new(window_length)
        .samples_per_record(samples_per_record)
        .cyclic(cyclic);
    IndexedSampler::new(path, index_path, config)
}

/// Draw `samples_per_record` randomly placed windows from every record
/// strictly longer than `window_length`
pub fn open_resampling<P: AsRef<Path>>(
    path: P,
    window_length: usize,
    samples_per_record: usize,
    cyclic: bool,
    seed: Option<u64>,
) -> WindowResult<ResamplingWindows> {
    let mut config = WindowConfig::new(window_length)
        .samples_per_record(samples_per_record)
        .cyclic(cyclic);
    config.seed = seed;
    ResamplingWindows::new(path, config)
}
