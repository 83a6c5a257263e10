//! Window preprocessing - offset derivation and neighbor stitching
//!
//! Windows are ordered by position. Two consecutive windows of the same file
//! should cover contiguous intervals; upstream tokenization sometimes drops or
//! duplicates tokens at the boundary. The shorter window of the pair borrows
//! tokens from its neighbor:
//!
//! - gap: it takes up to `gap` tokens from the neighbor's facing token list;
//! - overlap: it absorbs the neighbor's tokens lying past its own edge, up to
//!   the neighbor's occurrence or outer edge. A window lying wholly inside
//!   the neighbor's `before` or `after` tokens is widened the same way.
//!
//! Token lists and `start_offset`/`end_offset` stay consistent throughout.

use crate::logging::Logger;
use crate::model::ContextWindow;

/// Counters collected while preparing windows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareStats {
    pub offset_fallbacks: usize,
    pub stitched: usize,
}

/// Sort, derive offsets and (optionally) stitch same-file neighbors
pub fn prepare_windows(
    windows: &mut [ContextWindow],
    stitch: bool,
    logger: &dyn Logger,
) -> PrepareStats {
    let mut stats = PrepareStats::default();

    windows.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then_with(|| a.file_id.cmp(&b.file_id))
            .then_with(|| a.file_offset.cmp(&b.file_offset))
    });

    for window in windows.iter_mut() {
        if window.needs_offset_fallback() {
            stats.offset_fallbacks += 1;
            logger.info(&format!(
                "window {} in '{}' has no file offset, using its position",
                window.position, window.file_id
            ));
        }
        window.derive_offsets();
    }

    if !stitch {
        return stats;
    }

    for idx in 1..windows.len() {
        let (left, right) = windows.split_at_mut(idx);
        let (a, b) = (&mut left[idx - 1], &mut right[0]);
        if a.file_id != b.file_id {
            continue;
        }
        if stitch_pair(a, b) {
            stats.stitched += 1;
            logger.debug(&format!(
                "stitched windows {} and {} in '{}'",
                a.position, b.position, a.file_id
            ));
        }
    }

    stats
}

/// Repair the boundary between two consecutive windows of one file.
///
/// Returns true if either window changed.
pub fn stitch_pair(a: &mut ContextWindow, b: &mut ContextWindow) -> bool {
    let gap = b.start_offset - (a.end_offset + 1);
    if gap > 0 {
        close_gap(a, b, gap as usize)
    } else if gap < 0 {
        absorb_overlap(a, b)
    } else {
        false
    }
}

fn close_gap(a: &mut ContextWindow, b: &mut ContextWindow, gap: usize) -> bool {
    if a.span() <= b.span() {
        let n = gap.min(b.before.len());
        if n == 0 {
            return false;
        }
        a.after.extend(b.before[..n].iter().cloned());
        a.end_offset += n as i64;
    } else {
        let n = gap.min(a.after.len());
        if n == 0 {
            return false;
        }
        let borrowed = a.after[a.after.len() - n..].to_vec();
        b.before.splice(0..0, borrowed);
        b.start_offset -= n as i64;
    }
    true
}

fn absorb_overlap(a: &mut ContextWindow, b: &mut ContextWindow) -> bool {
    if a.span() <= b.span() {
        let b_offset = b.effective_offset();
        let b_occurrence_end = b.occurrence_end();

        if a.end_offset < b_offset {
            // a ends inside b.before
            let skip = (a.end_offset - b.start_offset + 1) as usize;
            if skip >= b.before.len() {
                return false;
            }
            a.after.extend(b.before[skip..].iter().cloned());
            a.end_offset = b_offset - 1;
        } else if a.end_offset >= b_occurrence_end && a.end_offset < b.end_offset {
            // a ends inside b.after
            let skip = (a.end_offset - b_occurrence_end) as usize;
            a.after.extend(b.after[skip..].iter().cloned());
            a.end_offset = b.end_offset;
        } else {
            return false;
        }
    } else {
        let a_offset = a.effective_offset();
        let a_occurrence_end = a.occurrence_end();

        if b.start_offset > a_occurrence_end {
            // b starts inside a.after
            let take = (b.start_offset - a_occurrence_end - 1) as usize;
            if take == 0 {
                return false;
            }
            let borrowed = a.after[..take].to_vec();
            b.before.splice(0..0, borrowed);
            b.start_offset = a_occurrence_end + 1;
        } else if b.start_offset <= a_offset && b.start_offset > a.start_offset {
            // b starts inside a.before
            let take = (b.start_offset - a.start_offset) as usize;
            let borrowed = a.before[..take].to_vec();
            b.before.splice(0..0, borrowed);
            b.start_offset = a.start_offset;
        } else {
            return false;
        }
    }
    true
}
