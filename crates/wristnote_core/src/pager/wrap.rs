//! Line-breaking oracle boundary.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Produces line-start offsets for text rendered at a pixel width.
///
/// Implementations return byte offsets into `text`, non-decreasing, starting
/// at `0`; the final entry marks the end of the last line.
pub trait WrapOracle {
    fn wrap(&self, text: &str, width_px: u32) -> Vec<usize>;
}

/// Greedy word wrap for fixed-advance fonts.
///
/// Breaks after whitespace when possible, mid-word otherwise, and always
/// after `\n`. Empty text yields `[0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceWrap {
    advance_px: u32,
}

impl MonospaceWrap {
    /// Glyph advance of the 24px sans font used by the notification views.
    pub const DEFAULT_ADVANCE_PX: u32 = 12;

    pub fn new(advance_px: u32) -> Self {
        Self {
            advance_px: advance_px.max(1),
        }
    }

    fn columns(&self, width_px: u32) -> usize {
        usize::try_from((width_px / self.advance_px).max(1)).unwrap_or(usize::MAX)
    }
}

impl Default for MonospaceWrap {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ADVANCE_PX)
    }
}

impl WrapOracle for MonospaceWrap {
    fn wrap(&self, text: &str, width_px: u32) -> Vec<usize> {
        let columns = self.columns(width_px);
        let mut breakpoints = vec![0];
        let mut line_start = 0;
        let mut line_width = 0;
        let mut word_start: Option<usize> = None;

        for (offset, ch) in text.char_indices() {
            let next = offset + ch.len_utf8();
            if ch == '\n' {
                breakpoints.push(next);
                line_start = next;
                line_width = 0;
                word_start = None;
                continue;
            }

            let width = ch.width().unwrap_or(0);
            if ch.is_whitespace() {
                // Trailing whitespace may hang past the edge; it is stripped
                // when the line is drawn.
                line_width += width;
                word_start = Some(next);
                continue;
            }

            if line_width + width > columns && offset > line_start {
                let split = match word_start {
                    Some(start) if start > line_start && start <= offset => start,
                    _ => offset,
                };
                breakpoints.push(split);
                line_start = split;
                line_width = UnicodeWidthStr::width(&text[split..offset]);
                word_start = None;
            }
            line_width += width;
        }

        if breakpoints.last() != Some(&text.len()) {
            breakpoints.push(text.len());
        }
        breakpoints
    }
}
