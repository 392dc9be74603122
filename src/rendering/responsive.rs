/// Narrow-viewport style rule: stack the column table and turn the
/// horizontal gap into vertical spacing between stacked cells.

use crate::markup::{css_number, Element, Node};

pub fn responsive_rule(scope_id: &str, gap: f64, breakpoint_px: u32) -> String {
    let s = format!("#{}", scope_id);
    [
        format!("@media screen and (max-width: {}px) {{", breakpoint_px),
        format!("  {s} table,"),
        format!("  {s} tbody,"),
        format!("  {s} tr,"),
        format!("  {s} td {{"),
        "    display: block !important;".to_string(),
        "    width: 100% !important;".to_string(),
        "    max-width: 100% !important;".to_string(),
        "  }".to_string(),
        format!("  {s} td {{"),
        format!("    margin-bottom: {}px !important;", css_number(gap)),
        "    padding-left: 0 !important;".to_string(),
        "    padding-right: 0 !important;".to_string(),
        "  }".to_string(),
        format!("  {s} td:last-child {{"),
        "    margin-bottom: 0 !important;".to_string(),
        "  }".to_string(),
        "}".to_string(),
    ]
    .join("\n")
}

/// `<style>` element carrying [`responsive_rule`]
pub fn style_element(scope_id: &str, gap: f64, breakpoint_px: u32) -> Node {
    Element::new("style")
        .child(Node::raw(responsive_rule(scope_id, gap, breakpoint_px)))
        .into()
}
