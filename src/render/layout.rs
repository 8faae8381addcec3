use crate::binding::BannerContent;
use crate::config::{CarouselConfig, Icon};
use crate::events::NavControl;

/// Size of the invisible control drawn when no icon is configured.
pub const BLANK_CONTROL_WIDTH: f32 = 11.0;
pub const BLANK_CONTROL_HEIGHT: f32 = 22.0;

/// Icons are tinted black.
pub const ICON_TINT: [u8; 3] = [0, 0, 0];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.max_x() && y >= self.y && y < self.y + self.height
    }
}

/// One banner positioned in content coordinates (before scrolling).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemFrame {
    pub index: usize,
    pub frame: Rect,
}

#[derive(Debug, Clone)]
pub enum ControlGlyph {
    Icon { icon: Icon, tint: [u8; 3] },
    /// Transparent hit target that keeps the tap geometry.
    Blank,
}

#[derive(Debug, Clone)]
pub struct ControlLayout {
    pub control: NavControl,
    /// Frame in viewport coordinates.
    pub frame: Rect,
    pub glyph: ControlGlyph,
}

/// Everything a host needs to draw one frame of the carousel.
#[derive(Debug, Clone)]
pub struct CarouselLayout {
    pub width: f32,
    pub height: f32,
    /// Current horizontal scroll offset of the strip.
    pub content_offset: f32,
    pub content_width: f32,
    pub items: Vec<ItemFrame>,
    pub active: Option<usize>,
    pub left: ControlLayout,
    pub right: ControlLayout,
    pub animating: bool,
}

impl CarouselLayout {
    /// Which control, if any, sits under a point in viewport coordinates.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<NavControl> {
        [&self.left, &self.right]
            .into_iter()
            .find(|c| c.frame.contains(x, y))
            .map(|c| c.control)
    }

    /// Items intersecting the viewport at the current offset.
    pub fn visible_items(&self) -> impl Iterator<Item = &ItemFrame> + '_ {
        let lo = self.content_offset;
        let hi = self.content_offset + self.width;
        self.items
            .iter()
            .filter(move |item| item.frame.max_x() > lo && item.frame.x < hi)
    }
}

/// Lay banners out left to right, `spacing` apart, each `height` tall.
pub fn measure_strip<B: BannerContent>(
    banners: &[B],
    viewport_width: f32,
    height: f32,
    spacing: f32,
) -> Vec<ItemFrame> {
    let mut x = 0.0;
    banners
        .iter()
        .enumerate()
        .map(|(index, banner)| {
            let width = banner.preferred_width(viewport_width, height).max(0.0);
            let frame = Rect::new(x, 0.0, width, height);
            x += width + spacing;
            ItemFrame { index, frame }
        })
        .collect()
}

pub fn content_width(items: &[ItemFrame]) -> f32 {
    items.last().map_or(0.0, |item| item.frame.max_x())
}

/// Offset that puts item `index` in the middle of the viewport, clamped to
/// the scrollable range.
pub fn center_offset(items: &[ItemFrame], index: usize, viewport_width: f32) -> f32 {
    let Some(item) = items.get(index) else {
        return 0.0;
    };
    let max_offset = (content_width(items) - viewport_width).max(0.0);
    (item.frame.center_x() - viewport_width / 2.0).clamp(0.0, max_offset)
}

pub fn control_layout(
    control: NavControl,
    icon: Option<&Icon>,
    config: &CarouselConfig,
    viewport_width: f32,
) -> ControlLayout {
    let (glyph, width, height) = match icon {
        Some(icon) => (
            ControlGlyph::Icon {
                icon: icon.clone(),
                tint: ICON_TINT,
            },
            icon.width() + config.icon_padding * 2.0,
            icon.height() + config.icon_padding * 2.0,
        ),
        None => (
            ControlGlyph::Blank,
            BLANK_CONTROL_WIDTH,
            BLANK_CONTROL_HEIGHT,
        ),
    };
    let x = match control {
        NavControl::Left => config.control_inset,
        NavControl::Right => viewport_width - config.control_inset - width,
    };
    let y = (config.height - height) / 2.0;
    ControlLayout {
        control,
        frame: Rect::new(x, y, width, height),
        glyph,
    }
}
