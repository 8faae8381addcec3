mod layout;
mod scroll;

pub use layout::{
    BLANK_CONTROL_HEIGHT, BLANK_CONTROL_WIDTH, CarouselLayout, ControlGlyph, ControlLayout,
    ICON_TINT, ItemFrame, Rect, center_offset, content_width, control_layout, measure_strip,
};
pub use scroll::{ScrollAnimation, ScrollState, ease_in_out};
