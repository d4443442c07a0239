//! Default sizes and settings (all in pixels unless noted)

/// Smallest base font size the text group fitting pass will shrink to (points)
pub const MIN_FONT_SIZE: u32 = 8;
/// Arrowhead length along the line
pub const ARROW_LENGTH: i32 = 7;
/// Arrowhead width across the line
pub const ARROW_WIDTH: i32 = 3;
/// Max-length hint for texts that don't set one
pub const TEXT_MAX_LENGTH: i32 = -1;
