//! Plain text pager application (long messages, crash reports).

use crate::device::{Haptics, SystemScheduler, DEFAULT_PULSE_MS};
use crate::display::{Canvas, SwipeDirection};
use crate::pager::text_pager::{PageMetrics, PagerSignal, PlainTextLayout, TextPager};
use crate::pager::wrap::WrapOracle;
use std::sync::Arc;

/// Shows one string across as many pages as it needs.
pub struct PagerApp {
    message: String,
    pager: TextPager<PlainTextLayout>,
    oracle: Arc<dyn WrapOracle>,
    haptics: Arc<dyn Haptics>,
    scheduler: Arc<dyn SystemScheduler>,
}

impl PagerApp {
    pub fn new(
        message: impl Into<String>,
        metrics: PageMetrics,
        oracle: Arc<dyn WrapOracle>,
        haptics: Arc<dyn Haptics>,
        scheduler: Arc<dyn SystemScheduler>,
    ) -> Self {
        Self {
            message: message.into(),
            pager: TextPager::new(PlainTextLayout, metrics),
            oracle,
            haptics,
            scheduler,
        }
    }

    pub fn pager(&self) -> &TextPager<PlainTextLayout> {
        &self.pager
    }

    /// Wraps the message and draws the first page.
    pub fn foreground(&mut self, canvas: &mut dyn Canvas) {
        self.pager.reset(self.message.clone(), self.oracle.as_ref());
        self.pager.render(canvas);
    }

    pub fn background(&mut self) {
        self.pager.release();
    }

    /// Up pages forward (leaving after the last page), down pages back.
    pub fn swipe(&mut self, direction: SwipeDirection, canvas: &mut dyn Canvas) {
        let signal = match direction {
            SwipeDirection::Up => self.pager.swipe_up(canvas),
            SwipeDirection::Down => self.pager.swipe_down(canvas),
            SwipeDirection::Left | SwipeDirection::Right => return,
        };
        match signal {
            PagerSignal::Moved => {}
            PagerSignal::Exit => self.scheduler.navigate_back(),
            PagerSignal::AtTop => self.haptics.pulse(DEFAULT_PULSE_MS),
        }
    }
}
