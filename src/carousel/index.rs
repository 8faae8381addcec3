//! Circular index over the bound banner list.
//!
//! The list length is owned by the caller and may change between calls, so
//! every operation takes the current `count` instead of caching it.

/// Position of the active banner. Always `< count` whenever `count > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarouselIndex {
    current: usize,
}

impl CarouselIndex {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: 0 }
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Step backwards, wrapping from the first item to the last.
    ///
    /// Returns `false` without touching the index when the list is empty.
    pub fn move_left(&mut self, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        self.current = if self.current == 0 || self.current >= count {
            count - 1
        } else {
            self.current - 1
        };
        true
    }

    /// Step forwards, wrapping from the last item to the first.
    ///
    /// Returns `false` without touching the index when the list is empty.
    pub fn move_right(&mut self, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        self.current = if self.current + 1 >= count {
            0
        } else {
            self.current + 1
        };
        true
    }

    /// Pull the index back inside `[0, count - 1]` after the list shrank.
    ///
    /// Returns `true` if the index moved.
    pub fn clamp_to(&mut self, count: usize) -> bool {
        let clamped = self.current.min(count.saturating_sub(1));
        let moved = clamped != self.current;
        self.current = clamped;
        moved
    }
}
