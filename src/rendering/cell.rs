/// Single column cell

use crate::config::LayoutConfig;
use crate::markup::{px, Element, Node, Style};
use crate::rendering::padding;
use crate::rendering::target::LegacyCompat;
use crate::schema::ColumnsCount;

/// Render column `index`, or `None` when the layout has no such column.
///
/// With two columns the third candidate cell is omitted entirely; any
/// content supplied for it is dropped.
pub fn render_cell(
    index: usize,
    layout: &LayoutConfig,
    content: Vec<Node>,
    compat: &dyn LegacyCompat,
) -> Option<Node> {
    if layout.columns_count == ColumnsCount::Two && index == 2 {
        if !content.is_empty() {
            log::debug!("dropping {} node(s) for column 2 of a two-column layout", content.len());
        }
        return None;
    }

    let pad = padding::distribute(index, layout);
    let mut style = Style::new();
    style
        .set("box-sizing", "content-box")
        .set("vertical-align", layout.content_alignment.as_str())
        .set("padding-left", px(pad.left))
        .set("padding-right", px(pad.right))
        .set_opt("width", layout.fixed_widths.get(index).map(px));

    let inner: Node = Element::new("div")
        .style(Style::new().with("max-width", "100%"))
        .children(content)
        .into();

    Some(
        Element::new("td")
            .attr("class", "column")
            .style(style)
            .children(compat.wrap_cell(layout.content_alignment, inner))
            .into(),
    )
}
