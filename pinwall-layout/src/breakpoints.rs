//! Responsive column-count breakpoints.

/// The widest breakpoint yields this many columns, which bounds the column
/// arena used during a layout pass.
pub const MAX_COLUMNS: usize = 5;

/// Returns the column count for a measured container width.
///
/// Uses fixed breakpoints: below 640 px a single column, then 2, 3, 4 and
/// finally 5 columns from 1280 px upward. The value is derived on demand and
/// never cached, so a resized container always reflows with the right count.
pub fn column_count_for_width(container_width: f32) -> usize {
    if container_width < 640.0 {
        1
    } else if container_width < 768.0 {
        2
    } else if container_width < 1024.0 {
        3
    } else if container_width < 1280.0 {
        4
    } else {
        5
    }
}
