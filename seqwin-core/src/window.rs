//! Window extraction, linear or circular
//!
//! A circular record is treated as if its last base were followed by its
//! first, so a window starting near the end wraps back to the start. Windows
//! longer than the record wrap as many times as needed.

use std::ops::Range;

use crate::error::{WindowError, WindowResult};
use crate::types::SeqPos;

/// Contiguous in-record ranges that make up a window, in window order
///
/// Concatenating `sequence[range]` for every returned range yields the window.
pub fn window_spans(
    len: usize,
    start: SeqPos,
    window: usize,
    circular: bool,
) -> WindowResult<Vec<Range<SeqPos>>> {
    if start >= len {
        return Err(WindowError::InvalidOffset { offset: start, len });
    }

    if !circular {
        let end = start
            .checked_add(window)
            .filter(|&end| end <= len)
            .ok_or(WindowError::OutOfRange { start, window, len })?;
        return Ok(if window == 0 { Vec::new() } else { vec![start..end] });
    }

    // Walk (start + i) mod len in whole runs instead of symbol by symbol
    let mut spans = Vec::with_capacity(window / len + 2);
    let mut remaining = window;
    let mut cursor = start;
    while remaining > 0 {
        let run = remaining.min(len - cursor);
        spans.push(cursor..cursor + run);
        remaining -= run;
        cursor = (cursor + run) % len;
    }
    Ok(spans)
}

/// Extract `window` symbols starting at `start`
pub fn extract(sequence: &[u8], start: SeqPos, window: usize, circular: bool) -> WindowResult<Vec<u8>> {
    let spans = window_spans(sequence.len(), start, window, circular)?;
    let mut out = Vec::with_capacity(window);
    for span in spans {
        out.extend_from_slice(&sequence[span]);
    }
    Ok(out)
}

/// Effective window length for a record: `0` requests the whole record
#[inline]
pub(crate) fn effective_length(window: usize, len: usize) -> usize {
    if window == 0 { len } else { window }
}
