//! Configuration normalization and render options

use crate::error::{Error, Result};
use crate::schema::{ColumnsContainerProps, ColumnsCount, ContentAlignment, FixedWidths, Padding};

/// Default narrow-viewport threshold for stacking columns
pub const DEFAULT_BREAKPOINT_PX: u32 = 600;

/// Fully resolved columns container configuration.
///
/// Produced by [`LayoutConfig::resolve`]; every defaulted field is populated
/// while background, padding and fixed widths pass through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub background_color: Option<String>,
    pub padding: Option<Padding>,
    pub columns_count: ColumnsCount,
    pub columns_gap: f64,
    pub content_alignment: ContentAlignment,
    pub fixed_widths: FixedWidths,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            padding: None,
            columns_count: ColumnsCount::Two,
            columns_gap: 0.0,
            content_alignment: ContentAlignment::Middle,
            fixed_widths: FixedWidths::default(),
        }
    }
}

impl LayoutConfig {
    /// Substitute defaults for absent fields. Never fails.
    pub fn resolve(input: &ColumnsContainerProps) -> Self {
        let style = input.style.as_ref();
        let props = input.props.as_ref();
        Self {
            background_color: style.and_then(|s| s.background_color.clone()),
            padding: style.and_then(|s| s.padding),
            columns_count: props.and_then(|p| p.columns_count).unwrap_or_default(),
            columns_gap: props.and_then(|p| p.columns_gap).unwrap_or(0.0),
            content_alignment: props.and_then(|p| p.content_alignment).unwrap_or_default(),
            fixed_widths: props.and_then(|p| p.fixed_widths).unwrap_or_default(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns_count.get()
    }
}

/// Which markup flavours a render emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderTarget {
    /// Standard markup plus `mso` conditional wrapping for Outlook
    #[default]
    Universal,
    /// Standard markup only
    Standard,
}

/// Options for a single render call
///
/// # Examples
///
/// ```
/// let opts = rfmail::RenderOptions::default();
/// assert_eq!(opts.breakpoint_px, 600);
/// assert!(opts.scope_key.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Legacy-compatibility capability flag
    pub target: RenderTarget,
    /// Viewport width (px) at or below which columns stack vertically
    pub breakpoint_px: u32,
    /// Caller-supplied scope for the responsive style rule; generated when `None`
    pub scope_key: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            target: RenderTarget::Universal,
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            scope_key: None,
        }
    }
}

impl RenderOptions {
    /// Reject settings that would produce a broken style rule
    pub fn check(&self) -> Result<()> {
        if self.breakpoint_px == 0 {
            return Err(Error::ConfigError("breakpoint must be greater than 0px".into()));
        }
        Ok(())
    }
}
