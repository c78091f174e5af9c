//! Code useful for multiple backends

use std::ops::{Bound, Range, RangeBounds};

use crate::kurbo::Rect;

/// The unit a backend text engine indexes its strings in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexUnit {
    /// Bytes of the UTF-8 encoding.
    Utf8,
    /// UTF-16 code units.
    Utf16,
    /// Unicode scalar values, i.e. `char`s.
    Char,
}

/// Counts the number of utf-16 code units in the given string.
/// from xi-editor
pub fn count_utf16(s: &str) -> usize {
    let mut utf16_count = 0;
    for &b in s.as_bytes() {
        if (b as i8) >= -0x40 {
            utf16_count += 1;
        }
        if b >= 0xf0 {
            utf16_count += 1;
        }
    }
    utf16_count
}

/// Resolves a `RangeBounds` into a range in the range 0..len.
pub fn resolve_range(range: impl RangeBounds<usize>, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(n) => *n,
        Bound::Excluded(n) => *n + 1,
    };

    let end = match range.end_bound() {
        Bound::Unbounded => len,
        Bound::Included(n) => *n + 1,
        Bound::Excluded(n) => *n,
    };

    start.min(len)..end.min(len)
}

/// Returns `true` if `range` starts at zero and is unbounded above, which
/// is how "the whole string" is spelled.
pub fn is_whole_range(range: &impl RangeBounds<usize>) -> bool {
    matches!(range.start_bound(), Bound::Unbounded | Bound::Included(0))
        && matches!(range.end_bound(), Bound::Unbounded)
}

/// Translate a character range over `text` into `unit` offsets.
///
/// Ends past the end of the text are clamped to it, and a start past the
/// end produces an empty range at the end.
pub fn translate_range(text: &str, range: Range<usize>, unit: IndexUnit) -> Range<usize> {
    let start = char_to_unit(text, range.start, unit);
    let end = char_to_unit(text, range.end.max(range.start), unit);
    start..end
}

fn char_to_unit(text: &str, index: usize, unit: IndexUnit) -> usize {
    let byte = text
        .char_indices()
        .nth(index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len());
    match unit {
        IndexUnit::Utf8 => byte,
        IndexUnit::Utf16 => count_utf16(&text[..byte]),
        IndexUnit::Char => index.min(text.chars().count()),
    }
}

/// Resolve a style range in characters into backend units.
///
/// Returns `None` for the whole string, without walking the text at all.
pub fn layout_range(
    text: &str,
    range: impl RangeBounds<usize>,
    unit: IndexUnit,
) -> Option<Range<usize>> {
    if is_whole_range(&range) {
        return None;
    }
    let len = text.chars().count();
    Some(translate_range(text, resolve_range(range, len), unit))
}

/// How many of the lines, given their heights in order, fit into
/// `max_height` under the layout's wrap and ellipsis settings.
///
/// Lines are only dropped when both wrapping and ellipsis are enabled, and
/// at least one line is always kept.
pub fn visible_line_count(
    line_heights: &[f64],
    max_height: f64,
    wrap: bool,
    ellipsis: bool,
) -> usize {
    let total = line_heights.len();
    if !(wrap && ellipsis) || !max_height.is_finite() {
        return total;
    }
    let mut used = 0.0;
    let fitting = line_heights
        .iter()
        .take_while(|h| {
            used += **h;
            used <= max_height + 1e-9
        })
        .count();
    total.min(fitting.max(1))
}

/// Clip a source rectangle to the drawable's bounds, shrinking the
/// destination by the same proportion.
///
/// Returns `None` when nothing of the source remains.
pub fn clip_source_rect(src: Rect, bounds: Rect, dest: Rect) -> Option<(Rect, Rect)> {
    let clipped = src.intersect(bounds);
    if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
        return None;
    }
    if src.width() <= 0.0 || src.height() <= 0.0 {
        return None;
    }
    let sx = dest.width() / src.width();
    let sy = dest.height() / src.height();
    let dest = Rect::new(
        dest.x0 + (clipped.x0 - src.x0) * sx,
        dest.y0 + (clipped.y0 - src.y0) * sy,
        dest.x0 + (clipped.x1 - src.x0) * sx,
        dest.y0 + (clipped.y1 - src.y0) * sy,
    );
    Some((clipped, dest))
}
