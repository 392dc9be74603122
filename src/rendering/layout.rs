/// Columns container layout: wrapper, scoped responsive rule, and the
/// fixed-layout table holding the column cells.

use crate::config::{LayoutConfig, RenderOptions};
use crate::markup::{Element, Node, Style};
use crate::rendering::{cell, responsive, scope};

/// Number of candidate cells; the last is dropped for two-column layouts
pub const MAX_COLUMNS: usize = 3;

/// Outer wrapper style: background and padding, both optional
pub fn wrapper_style(layout: &LayoutConfig) -> Style {
    let mut style = Style::new();
    style
        .set_opt("background-color", layout.background_color.clone())
        .set_opt("padding", layout.padding.map(|p| p.to_css()));
    style
}

fn table_style() -> Style {
    Style::new()
        .with("table-layout", "fixed")
        .with("border-collapse", "collapse")
        .with("mso-table-lspace", "0pt")
        .with("mso-table-rspace", "0pt")
}

/// Render a resolved layout with its column slots.
///
/// `columns` holds content per column index; missing slots render empty and
/// slots past the third are ignored.
pub fn render_columns(
    layout: &LayoutConfig,
    columns: Vec<Vec<Node>>,
    options: &RenderOptions,
) -> Node {
    if columns.len() > MAX_COLUMNS {
        log::debug!("ignoring {} column slot(s) past the third", columns.len() - MAX_COLUMNS);
    }

    let compat = options.target.compat();
    let scope_id = scope::scope_id(options.scope_key.as_deref());
    log::debug!(
        "rendering {} columns (gap {}, target {}) as #{}",
        layout.column_count(),
        layout.columns_gap,
        compat.name(),
        scope_id
    );

    let mut slots = columns.into_iter();
    let cells: Vec<Node> = (0..MAX_COLUMNS)
        .filter_map(|index| {
            let content = slots.next().unwrap_or_default();
            cell::render_cell(index, layout, content, compat)
        })
        .collect();

    let row = Element::new("tr")
        .style(Style::new().with("width", "100%"))
        .children(cells);
    let body = Element::new("tbody")
        .style(Style::new().with("width", "100%"))
        .child(row);
    let table = Element::new("table")
        .attr("align", "center")
        .attr("width", "100%")
        .attr("cellpadding", "0")
        .attr("cellspacing", "0")
        .attr("border", "0")
        .style(table_style())
        .child(body);

    Element::new("div")
        .style(wrapper_style(layout))
        .child(responsive::style_element(
            &scope_id,
            layout.columns_gap,
            options.breakpoint_px,
        ))
        .child(Element::new("div").attr("id", scope_id).child(table))
        .into()
}
