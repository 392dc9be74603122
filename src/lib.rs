//! RFox Mail blocks
//!
//! Email-client-safe rendering of the "columns container" block used by
//! visual email template builders. A layout description (column count, gap,
//! fixed widths, alignment, padding, background) plus per-column content is
//! rendered into table-based HTML that survives both standards-compliant
//! clients and Outlook's legacy engine.
//!
//! # Features
//!
//! - **Validation**: structured schema checks with per-field paths ([`schema`])
//! - **Legacy targets**: `mso` conditional wrapping selected by [`RenderTarget`]
//! - **Responsive**: a scoped media rule stacks columns on narrow viewports
//! - **Documents**: whole builder documents via [`document::EmailDocument`]
//! - **Inspection** (`inspect` feature): parse rendered HTML back with `scraper`
//!
//! # Example
//!
//! ```
//! use rfmail::{markup::Node, schema, RenderOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let props = schema::parse_props(r#"{ "props": { "columnsCount": 3, "columnsGap": 30 } }"#)?;
//! let columns = vec![
//!     vec![Node::text("left")],
//!     vec![Node::text("middle")],
//!     vec![Node::text("right")],
//! ];
//! let html = rfmail::render_columns_container(&props, columns, &RenderOptions::default()).to_html();
//! assert!(html.contains("padding-left:10px;padding-right:10px"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod markup;
pub mod rendering;
pub mod schema;

// HTML read-back via scraper
#[cfg(feature = "inspect")]
pub mod inspect;

pub use config::{LayoutConfig, RenderOptions, RenderTarget};
pub use error::{Error, Result, ValidationIssue};
pub use markup::{Element, Node, Style};
pub use schema::{ColumnsContainerProps, ColumnsCount, ContentAlignment};

/// Normalize `props` and render the container with its column slots.
///
/// Never fails: absent settings take their defaults, and content for columns
/// the layout does not show is discarded.
pub fn render_columns_container(
    props: &ColumnsContainerProps,
    columns: Vec<Vec<Node>>,
    options: &RenderOptions,
) -> Node {
    let layout = LayoutConfig::resolve(props);
    rendering::render_columns(&layout, columns, options)
}

/// Validate JSON props and render them to an HTML string with empty columns
pub fn render_props_json(json: &str, options: &RenderOptions) -> Result<String> {
    options.check()?;
    let props = schema::parse_props(json)?;
    Ok(render_columns_container(&props, Vec::new(), options).to_html())
}
