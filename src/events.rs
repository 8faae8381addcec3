use tokio::sync::oneshot;

use crate::render::CarouselLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavControl {
    Left,
    Right,
}

/// Why the active banner changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCause {
    Tap(NavControl),
    AutoAdvance,
    ListChanged,
}

/// Emitted once per index change; the host animates its scroll view to
/// center `index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTo {
    pub index: usize,
    pub cause: ScrollCause,
    /// Content offset the animation settles on.
    pub target_offset: f32,
}

/// Input from the host into a mounted carousel.
#[derive(Debug)]
pub enum CarouselCommand {
    Tap(NavControl),
    /// Viewport width changed (geometry reader).
    Resize { width: f32 },
    /// Ask for the current layout.
    Render(oneshot::Sender<CarouselLayout>),
}
