//! Generic text pager.
//!
//! # Responsibility
//! - Own the text, its breakpoints and the current page for one view.
//! - Navigate pages and hand each page window to a [`PageLayout`].
//!
//! # Invariants
//! - `page <= page_count` at all times.
//! - `page_count` is the index of the page holding the last wrapped line,
//!   or `0` when wrapping produced fewer than two breakpoints.
//! - A page window carries two breakpoints of look-ahead, so a page may show
//!   one more line than its capacity.

use crate::display::{Canvas, ScrollIndicator, WHITE};
use crate::pager::wrap::WrapOracle;
use log::debug;

/// Lines owned by one page of the plain layout.
pub const LINES_PER_PAGE: usize = 9;
/// Vertical distance between text lines, in pixels.
pub const LINE_HEIGHT_PX: u32 = 24;
/// Wrap width of the reference display, in pixels.
pub const DISPLAY_WIDTH_PX: u32 = 240;

const LOOK_AHEAD_BREAKPOINTS: usize = 2;

/// Fixed geometry shared by a pager and its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMetrics {
    pub width_px: u32,
    pub lines_per_page: usize,
    pub line_height_px: u32,
}

impl PageMetrics {
    /// Top of line `index` relative to `origin`.
    pub fn line_y(&self, origin: i32, index: usize) -> i32 {
        let step = i64::from(self.line_height_px);
        let offset = i64::try_from(index).unwrap_or(i64::MAX).saturating_mul(step);
        i32::try_from(i64::from(origin).saturating_add(offset)).unwrap_or(i32::MAX)
    }
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self {
            width_px: DISPLAY_WIDTH_PX,
            lines_per_page: LINES_PER_PAGE,
            line_height_px: LINE_HEIGHT_PX,
        }
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerSignal {
    /// The page changed and was redrawn.
    Moved,
    /// Swiped up past the last page; the caller should navigate back.
    Exit,
    /// Swiped down on the first page; the caller should give haptic feedback.
    AtTop,
}

/// Text handed to a layout for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    pub page: usize,
    /// Wrapped lines with trailing whitespace stripped, look-ahead included.
    pub lines: Vec<&'a str>,
    pub scroll: ScrollIndicator,
}

/// Rendering strategy plugged into a [`TextPager`].
pub trait PageLayout {
    /// Number of wrapped lines page `page` owns before the next page starts.
    fn page_capacity(&self, _page: usize, metrics: &PageMetrics) -> usize {
        metrics.lines_per_page
    }

    /// Draws one page onto an already cleared canvas.
    fn draw_page(&self, canvas: &mut dyn Canvas, view: &PageView<'_>, metrics: &PageMetrics);
}

/// Left-aligned text, one wrapped line every `line_height_px` from the top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainTextLayout;

impl PageLayout for PlainTextLayout {
    fn draw_page(&self, canvas: &mut dyn Canvas, view: &PageView<'_>, metrics: &PageMetrics) {
        for (index, line) in view.lines.iter().enumerate() {
            canvas.draw_text(line, 0, metrics.line_y(0, index), None);
        }
    }
}

/// Paginated view over one string.
#[derive(Debug, Clone)]
pub struct TextPager<L: PageLayout> {
    layout: L,
    metrics: PageMetrics,
    text: String,
    breakpoints: Vec<usize>,
    page: usize,
    page_count: usize,
}

impl<L: PageLayout> TextPager<L> {
    pub fn new(layout: L, metrics: PageMetrics) -> Self {
        Self {
            layout,
            metrics,
            text: String::new(),
            breakpoints: Vec::new(),
            page: 0,
            page_count: 0,
        }
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Mutable layout access; call [`TextPager::reset`] afterwards if the
    /// change affects page capacities.
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    pub fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn breakpoints(&self) -> &[usize] {
        &self.breakpoints
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of wrapped lines in the current text.
    pub fn line_count(&self) -> usize {
        self.breakpoints.len().saturating_sub(1)
    }

    /// Replaces the text, re-wraps it and jumps to the first page.
    pub fn reset(&mut self, text: impl Into<String>, oracle: &dyn WrapOracle) {
        self.text = text.into();
        self.breakpoints = oracle.wrap(&self.text, self.metrics.width_px);
        self.page = 0;
        self.page_count = self.compute_page_count();
        debug!(
            "event=pager_reset module=pager status=ok chars={} lines={} page_count={}",
            self.text.chars().count(),
            self.line_count(),
            self.page_count
        );
    }

    /// Drops text and layout data; used when the owning app is backgrounded.
    pub fn release(&mut self) {
        self.text = String::new();
        self.breakpoints = Vec::new();
        self.page = 0;
        self.page_count = 0;
    }

    pub fn scroll_indicator(&self) -> ScrollIndicator {
        ScrollIndicator {
            up: self.page > 0,
            down: self.page < self.page_count,
        }
    }

    /// Index of the first wrapped line shown on `page`.
    pub fn first_line(&self, page: usize) -> usize {
        (0..page).fold(0usize, |line, index| {
            line.saturating_add(self.capacity(index))
        })
    }

    /// Lines of `page`, look-ahead included, trailing whitespace stripped.
    ///
    /// Slices the oracle reported outside the text or off a char boundary
    /// come back empty.
    pub fn page_lines(&self, page: usize) -> Vec<&str> {
        let start = self.first_line(page);
        if start >= self.breakpoints.len() {
            return Vec::new();
        }
        let end = start
            .saturating_add(self.capacity(page))
            .saturating_add(LOOK_AHEAD_BREAKPOINTS)
            .min(self.breakpoints.len());

        self.breakpoints[start..end]
            .windows(2)
            .map(|pair| {
                self.text
                    .get(pair[0]..pair[1])
                    .map(str::trim_end)
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Draws the current page from scratch.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        let view = PageView {
            page: self.page,
            lines: self.page_lines(self.page),
            scroll: self.scroll_indicator(),
        };

        canvas.mute(true);
        canvas.fill(WHITE);
        self.layout.draw_page(canvas, &view, &self.metrics);
        canvas.draw_scroll_indicator(view.scroll);
        canvas.mute(false);
    }

    /// Advances one page, or signals [`PagerSignal::Exit`] on the last one.
    pub fn swipe_up(&mut self, canvas: &mut dyn Canvas) -> PagerSignal {
        if self.page >= self.page_count {
            return PagerSignal::Exit;
        }
        self.page += 1;
        self.render(canvas);
        PagerSignal::Moved
    }

    /// Goes back one page, or signals [`PagerSignal::AtTop`] on the first.
    pub fn swipe_down(&mut self, canvas: &mut dyn Canvas) -> PagerSignal {
        if self.page == 0 {
            return PagerSignal::AtTop;
        }
        self.page -= 1;
        self.render(canvas);
        PagerSignal::Moved
    }

    fn capacity(&self, page: usize) -> usize {
        self.layout.page_capacity(page, &self.metrics).max(1)
    }

    fn compute_page_count(&self) -> usize {
        let lines = self.line_count();
        if lines == 0 {
            return 0;
        }
        let last_line = lines - 1;
        let mut page = 0;
        let mut next_start = self.capacity(0);
        while next_start <= last_line {
            page += 1;
            next_start = next_start.saturating_add(self.capacity(page));
        }
        page
    }
}
