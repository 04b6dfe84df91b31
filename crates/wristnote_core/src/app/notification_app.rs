//! Notification presentation.
//!
//! # Responsibility
//! - Pull the oldest pending notification and page through its body.
//! - Run the clear-all confirmation flow and the incoming-call ringing.
//!
//! # Invariants
//! - The pager is the only source of truth for the body page/offset.
//! - Every exit path and `background()` cancels a running ring tick.
//! - The store is mutated only by the "yes" answer (clear) and by
//!   `foreground()` (pop).

use crate::app::confirmation::ConfirmationView;
use crate::config::NotifyConfig;
use crate::device::{DeviceHandles, DEFAULT_PULSE_MS};
use crate::display::{Canvas, Icon, SwipeDirection, TouchPoint};
use crate::model::notification::NotificationRecord;
use crate::pager::text_pager::{PageLayout, PageMetrics, PageView, PagerSignal, TextPager};
use crate::pager::wrap::WrapOracle;
use crate::repo::notification_store::{NotificationStore, StoreResult};
use log::{debug, error, info};
use std::sync::Arc;

pub const CLEAR_PROMPT: &str = "Clear notifications?";

const PHONE_ICON_X: i32 = 94;
const PHONE_ICON_Y: i32 = 10;
const HEADER_TOP_PX: i32 = 10;
const CALL_HEADER_TOP_PX: i32 = 70;
const TITLE_OFFSET_PX: i32 = 30;
const BODY_OFFSET_PX: i32 = 80;
/// Lowest first-page body origin (call layout); bottom margins must not be
/// above it.
pub const CALL_BODY_TOP_PX: i32 = CALL_HEADER_TOP_PX + BODY_OFFSET_PX;

/// Presentation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationState {
    Idle,
    ShowingBody,
    ConfirmingClear,
}

/// First wrapped line of the source tag and title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationHeader {
    pub src_line: String,
    pub title_line: String,
    pub is_call: bool,
}

impl NotificationHeader {
    fn top(&self) -> i32 {
        if self.is_call {
            CALL_HEADER_TOP_PX
        } else {
            HEADER_TOP_PX
        }
    }

    fn body_top(&self) -> i32 {
        self.top() + BODY_OFFSET_PX
    }
}

/// Header on the first page, body-only continuation pages after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationLayout {
    header: Option<NotificationHeader>,
    bottom_margin_px: u32,
}

impl NotificationLayout {
    pub fn new(bottom_margin_px: u32) -> Self {
        Self {
            header: None,
            bottom_margin_px,
        }
    }

    pub fn header(&self) -> Option<&NotificationHeader> {
        self.header.as_ref()
    }

    pub fn set_header(&mut self, header: Option<NotificationHeader>) {
        self.header = header;
    }

    fn margin(&self) -> i32 {
        i32::try_from(self.bottom_margin_px).unwrap_or(i32::MAX)
    }
}

impl PageLayout for NotificationLayout {
    fn page_capacity(&self, page: usize, metrics: &PageMetrics) -> usize {
        match (&self.header, page) {
            (Some(header), 0) => {
                let room = i64::from(self.margin()) - i64::from(header.body_top());
                if room < 0 {
                    return 0;
                }
                let fitting = room / i64::from(metrics.line_height_px.max(1)) + 1;
                usize::try_from(fitting).unwrap_or(usize::MAX)
            }
            _ => metrics.lines_per_page,
        }
    }

    fn draw_page(&self, canvas: &mut dyn Canvas, view: &PageView<'_>, metrics: &PageMetrics) {
        let width = Some(metrics.width_px);
        match (&self.header, view.page) {
            (Some(header), 0) => {
                let top = header.top();
                if header.is_call {
                    canvas.blit(Icon::Phone, PHONE_ICON_X, PHONE_ICON_Y);
                }
                canvas.draw_text(&header.src_line, 0, top, width);
                canvas.draw_text(&header.title_line, 0, top + TITLE_OFFSET_PX, width);
                for (index, line) in view.lines.iter().enumerate() {
                    let y = metrics.line_y(header.body_top(), index);
                    if y > self.margin() {
                        break;
                    }
                    canvas.draw_text(line, 0, y, width);
                }
            }
            _ => {
                for (index, line) in view.lines.iter().enumerate() {
                    canvas.draw_text(line, 0, metrics.line_y(0, index), width);
                }
            }
        }
    }
}

/// Foreground app that shows pending notifications one at a time.
pub struct NotificationApp<S: NotificationStore> {
    store: S,
    device: DeviceHandles,
    oracle: Arc<dyn WrapOracle>,
    config: NotifyConfig,
    pager: TextPager<NotificationLayout>,
    confirmation: ConfirmationView,
    current: Option<NotificationRecord>,
    ringing: bool,
    state: PresentationState,
}

impl<S: NotificationStore> NotificationApp<S> {
    pub fn new(
        store: S,
        device: DeviceHandles,
        oracle: Arc<dyn WrapOracle>,
        config: NotifyConfig,
    ) -> Self {
        let pager = TextPager::new(
            NotificationLayout::new(config.bottom_margin_px),
            config.page_metrics(),
        );
        Self {
            store,
            device,
            oracle,
            config,
            pager,
            confirmation: ConfirmationView::new(),
            current: None,
            ringing: false,
            state: PresentationState::Idle,
        }
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// Notification currently on screen.
    pub fn current(&self) -> Option<&NotificationRecord> {
        self.current.as_ref()
    }

    pub fn pager(&self) -> &TextPager<NotificationLayout> {
        &self.pager
    }

    pub fn is_ringing(&self) -> bool {
        self.ringing
    }

    /// Pops the oldest notification and draws its first page.
    ///
    /// # Errors
    /// - Returns `StoreError::Empty` when nothing is pending; callers must
    ///   only foreground this app after checking the store.
    pub fn foreground(&mut self, canvas: &mut dyn Canvas) -> StoreResult<()> {
        if self.state != PresentationState::Idle {
            self.background();
        }

        let record = self.store.pop_oldest().map_err(|err| {
            error!("event=notification_foreground module=presentation status=error error={err}");
            err
        })?;

        let header = NotificationHeader {
            src_line: self.first_wrapped_line(record.src()),
            title_line: self.first_wrapped_line(record.title()),
            is_call: record.is_call(),
        };
        if header.is_call {
            self.device
                .scheduler
                .request_tick(self.config.ring_interval_ms);
            self.ringing = true;
        }

        self.pager.layout_mut().set_header(Some(header));
        self.pager.reset(record.body(), self.oracle.as_ref());
        info!(
            "event=notification_foreground module=presentation status=ok id={} call={} page_count={}",
            record.id(),
            record.is_call(),
            self.pager.page_count()
        );
        self.current = Some(record);
        self.state = PresentationState::ShowingBody;
        self.pager.render(canvas);
        Ok(())
    }

    /// Periodic tick; rings while an incoming call is on screen.
    pub fn tick(&self) {
        if self.ringing {
            self.device.haptics.pulse(self.config.notify_duration_ms);
        }
    }

    pub fn swipe(&mut self, direction: SwipeDirection, canvas: &mut dyn Canvas) {
        match (self.state, direction) {
            (PresentationState::Idle, _) => {}
            (_, SwipeDirection::Left | SwipeDirection::Right) => {}
            (PresentationState::ConfirmingClear, SwipeDirection::Up) => {
                self.confirmation.dismiss();
                self.state = PresentationState::ShowingBody;
                self.pager.render(canvas);
            }
            (PresentationState::ShowingBody, SwipeDirection::Down) if self.pager.page() == 0 => {
                self.confirmation.draw(canvas, CLEAR_PROMPT);
                self.state = PresentationState::ConfirmingClear;
            }
            (_, SwipeDirection::Up) => {
                if self.pager.swipe_up(canvas) == PagerSignal::Exit {
                    self.exit();
                }
            }
            (_, SwipeDirection::Down) => {
                if self.pager.swipe_down(canvas) == PagerSignal::AtTop {
                    self.device.haptics.pulse(DEFAULT_PULSE_MS);
                }
            }
        }
    }

    /// Resolves the confirmation prompt; ignored in every other state.
    pub fn touch(&mut self, point: TouchPoint, canvas: &mut dyn Canvas) {
        if self.state != PresentationState::ConfirmingClear || !self.confirmation.touch(point) {
            return;
        }
        if self.confirmation.value() {
            self.store.clear();
            info!("event=notifications_cleared module=presentation status=ok");
            self.exit();
        } else {
            self.state = PresentationState::ShowingBody;
            self.pager.render(canvas);
        }
    }

    /// Leaves the view: stops ringing and drops all pagination state.
    pub fn background(&mut self) {
        self.stop_ringing();
        self.confirmation.dismiss();
        self.pager.layout_mut().set_header(None);
        self.pager.release();
        self.current = None;
        self.state = PresentationState::Idle;
        debug!("event=notification_background module=presentation status=ok");
    }

    fn exit(&mut self) {
        self.background();
        self.device.scheduler.navigate_back();
    }

    fn stop_ringing(&mut self) {
        if self.ringing {
            self.device.scheduler.cancel_tick();
            self.ringing = false;
        }
    }

    fn first_wrapped_line(&self, text: &str) -> String {
        let breakpoints = self.oracle.wrap(text, self.config.display_width_px);
        match breakpoints.as_slice() {
            [start, end, ..] => text
                .get(*start..*end)
                .map(str::trim_end)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        }
    }
}
