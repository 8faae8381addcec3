//! The carousel component: index, auto-advance timer and scroll surface.
//!
//! All methods are synchronous and take the current time explicitly. The
//! host calls them from a single event loop, applies the returned
//! [`ScrollTo`] and wakes the component at [`Carousel::next_deadline`].

mod index;
mod timer;

pub use index::CarouselIndex;
pub use timer::{AutoAdvanceTimer, TimerId};

use tokio::time::Instant;
use tracing::{debug, info};

use crate::binding::{BannerBinding, BannerContent};
use crate::config::CarouselConfig;
use crate::events::{NavControl, ScrollCause, ScrollTo};
use crate::render::{
    CarouselLayout, ItemFrame, ScrollState, center_offset, content_width, control_layout,
    measure_strip,
};

/// Viewport width used until the host reports its geometry.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 390.0;

pub struct Carousel<B> {
    config: CarouselConfig,
    banners: BannerBinding<B>,
    index: CarouselIndex,
    timer: AutoAdvanceTimer,
    scroll: ScrollState,
    viewport_width: f32,
    mounted: bool,
}

impl<B: BannerContent> Carousel<B> {
    pub fn new(config: CarouselConfig, banners: BannerBinding<B>) -> Self {
        let timer = AutoAdvanceTimer::new(config.auto_scroll_interval);
        Self {
            config,
            banners,
            index: CarouselIndex::new(),
            timer,
            scroll: ScrollState::default(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            mounted: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.index.current()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn timer(&self) -> &AutoAdvanceTimer {
        &self.timer
    }

    /// Step to the previous banner, wrapping to the last one.
    fn move_left(&mut self) -> bool {
        let count = self.banners.len();
        self.index.move_left(count)
    }

    /// Step to the next banner, wrapping to the first one.
    fn move_right(&mut self) -> bool {
        let count = self.banners.len();
        self.index.move_right(count)
    }

    /// Start auto-advancing. Mounting twice keeps a single timer.
    pub fn mount(&mut self, now: Instant) {
        self.mounted = true;
        self.timer.start(now);
        info!(
            banners = self.banners.len(),
            interval = %humantime::format_duration(self.timer.interval()),
            "carousel mounted"
        );
    }

    /// Stop the timer. No tick fires after this returns.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.timer.stop();
        info!(index = self.index.current(), "carousel unmounted");
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Handle a tap on a navigation control: move, scroll, then reset the
    /// timer so the next auto-advance is a full interval away.
    pub fn tap(&mut self, control: NavControl, now: Instant) -> Option<ScrollTo> {
        let before = self.index.current();
        match control {
            NavControl::Left => self.move_left(),
            NavControl::Right => self.move_right(),
        };
        let scroll = self.scroll_if_moved(before, ScrollCause::Tap(control), now);
        if self.mounted {
            self.timer.reset(now);
        }
        debug!(?control, index = self.index.current(), "navigation tap");
        scroll
    }

    /// Run the auto-advance if its deadline has passed.
    pub fn on_timer(&mut self, now: Instant) -> Option<ScrollTo> {
        if !self.timer.fire_due(now) {
            return None;
        }
        let before = self.index.current();
        self.move_right();
        debug!(index = self.index.current(), "auto-advance");
        self.scroll_if_moved(before, ScrollCause::AutoAdvance, now)
    }

    /// Re-validate the index after the bound list was replaced.
    pub fn on_banners_changed(&mut self, now: Instant) -> Option<ScrollTo> {
        let before = self.index.current();
        let count = self.banners.len();
        if self.index.clamp_to(count) {
            debug!(count, index = self.index.current(), "banner list shrank; index clamped");
        }
        let scroll = self.scroll_if_moved(before, ScrollCause::ListChanged, now);
        if scroll.is_none() {
            // Item widths may differ; keep the active banner centered.
            let target = center_offset(&self.measure(), self.index.current(), self.viewport_width);
            if (target - self.scroll.target()).abs() > f32::EPSILON {
                self.scroll
                    .animate_to(target, now, self.config.scroll_animation);
            }
        }
        scroll
    }

    /// New viewport width from the host; re-centers without animating.
    pub fn resize(&mut self, width: f32) {
        self.viewport_width = width.max(0.0);
        let target = center_offset(&self.measure(), self.index.current(), self.viewport_width);
        self.scroll.jump_to(target);
    }

    pub fn render(&mut self, now: Instant) -> CarouselLayout {
        self.scroll.settle(now);
        let items = self.measure();
        let active = (!items.is_empty()).then(|| self.index.current());
        CarouselLayout {
            width: self.viewport_width,
            height: self.config.height,
            content_offset: self.scroll.offset_at(now),
            content_width: content_width(&items),
            items,
            active,
            left: control_layout(
                NavControl::Left,
                self.config.left_icon(),
                &self.config,
                self.viewport_width,
            ),
            right: control_layout(
                NavControl::Right,
                self.config.right_icon(),
                &self.config,
                self.viewport_width,
            ),
            animating: self.scroll.is_animating(now),
        }
    }

    fn measure(&self) -> Vec<ItemFrame> {
        let banners = self.banners.borrow();
        measure_strip(
            banners.as_slice(),
            self.viewport_width,
            self.config.height,
            self.config.item_spacing,
        )
    }

    fn scroll_if_moved(
        &mut self,
        before: usize,
        cause: ScrollCause,
        now: Instant,
    ) -> Option<ScrollTo> {
        let index = self.index.current();
        if index == before {
            return None;
        }
        let target_offset = center_offset(&self.measure(), index, self.viewport_width);
        self.scroll
            .animate_to(target_offset, now, self.config.scroll_animation);
        Some(ScrollTo {
            index,
            cause,
            target_offset,
        })
    }
}
