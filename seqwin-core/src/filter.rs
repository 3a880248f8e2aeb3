//! Record-length qualification

use std::path::Path;

use crate::error::WindowResult;
use crate::source::RecordSource;

/// Whether a record of `sequence_length` can yield a linear window
#[inline]
pub fn qualifies(sequence_length: usize, window_length: usize) -> bool {
    window_length == 0 || sequence_length >= window_length
}

/// Circular wraparound can supply any window from a non-empty record
#[inline]
pub fn qualifies_circular(sequence_length: usize, window_length: usize) -> bool {
    window_length == 0 || sequence_length > 0
}

#[inline]
pub(crate) fn qualifies_with(sequence_length: usize, window_length: usize, circular: bool) -> bool {
    if circular {
        qualifies_circular(sequence_length, window_length)
    } else {
        qualifies(sequence_length, window_length)
    }
}

/// Count records long enough for `window_length` without encoding anything
pub fn count_qualifying<P: AsRef<Path>>(path: P, window_length: usize) -> WindowResult<usize> {
    let mut source = RecordSource::open(&path)?;
    let mut count = 0;
    while let Some(length) = source.next_length() {
        if qualifies(length?, window_length) {
            count += 1;
        }
    }
    log::debug!(
        "{} records of {} qualify for window {}",
        count,
        source.records_read(),
        window_length
    );
    Ok(count)
}
