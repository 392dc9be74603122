/// Horizontal spacing between columns
///
/// The gap between two neighbouring columns is split across the right
/// padding of the left column and the left padding of the right one, so each
/// boundary sums to `columns_gap` and outer edges get no padding. Three
/// columns use an asymmetric thirds split (0 | 2g/3 · g/3 | g/3 · 2g/3 | 0);
/// rendered templates depend on these exact values.

use crate::config::LayoutConfig;
use crate::schema::ColumnsCount;

/// Left/right padding of one column cell, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnPadding {
    pub left: f64,
    pub right: f64,
}

/// Padding on the leading (left) side of column `index`
pub fn padding_before(index: usize, count: ColumnsCount, gap: f64) -> f64 {
    if index == 0 {
        return 0.0;
    }
    match count {
        ColumnsCount::Two => gap / 2.0,
        ColumnsCount::Three if index == 1 => gap / 3.0,
        ColumnsCount::Three => (2.0 * gap) / 3.0,
    }
}

/// Padding on the trailing (right) side of column `index`
pub fn padding_after(index: usize, count: ColumnsCount, gap: f64) -> f64 {
    match (count, index) {
        (ColumnsCount::Two, 0) => gap / 2.0,
        (ColumnsCount::Two, _) => 0.0,
        (ColumnsCount::Three, 0) => (2.0 * gap) / 3.0,
        (ColumnsCount::Three, 1) => gap / 3.0,
        (ColumnsCount::Three, _) => 0.0,
    }
}

pub fn distribute(index: usize, layout: &LayoutConfig) -> ColumnPadding {
    debug_assert!(index < 3, "column index out of range: {}", index);
    ColumnPadding {
        left: padding_before(index, layout.columns_count, layout.columns_gap),
        right: padding_after(index, layout.columns_count, layout.columns_gap),
    }
}
