//! Columns container rendering
//!
//! [`layout::render_columns`] drives the whole render: it asks
//! [`padding`] for per-column spacing, builds each cell via [`cell`], wraps
//! content through the selected [`target`], and scopes the [`responsive`]
//! stacking rule with an id from [`scope`].

pub mod cell;
pub mod layout;
pub mod padding;
pub mod responsive;
pub mod scope;
pub mod target;

pub use layout::render_columns;
pub use padding::ColumnPadding;
pub use target::LegacyCompat;
