//! Renderable markup tree and HTML serialization
//!
//! Blocks render into a [`Node`] tree rather than a string so callers can
//! compose column content from other blocks before serializing the whole
//! document once with [`Node::to_html`].

use std::fmt::Write as _;

/// Ordered list of CSS declarations, serialized into a `style` attribute.
///
/// Setting a property that already exists replaces its value in place, so
/// declaration order is the order in which properties were first set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    decls: Vec<(String, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.decls.iter_mut().find(|(p, _)| p == property) {
            Some(slot) => slot.1 = value,
            None => self.decls.push((property.to_string(), value)),
        }
        self
    }

    /// Set the property only when a value is present
    pub fn set_opt(&mut self, property: &str, value: Option<String>) -> &mut Self {
        if let Some(v) = value {
            self.set(property, v);
        }
        self
    }

    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// `prop:value;prop:value`
    pub fn to_css(&self) -> String {
        self.decls
            .iter()
            .map(|(p, v)| format!("{}:{}", p, v))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Format a number the way a JavaScript template literal does.
///
/// `-0` prints as `0`; magnitudes at or above `1e21` or below `1e-6` use
/// exponent form (`1e+21`, `5e-7`).
pub fn css_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let name = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return name.to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", value);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
            _ => exp,
        }
    } else {
        format!("{}", value)
    }
}

/// Format a length the way builder style objects do: bare `0`, else `<n>px`.
pub fn px(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}px", css_number(value))
    }
}

/// An HTML element with ordered attributes and an inline style
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub style: Style,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            style: Style::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.children.extend(nodes);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// A node of the rendered tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text content, escaped on output
    Text(String),
    /// Trusted HTML emitted verbatim (style sheets, HTML blocks)
    Raw(String),
    /// Conditional comment, e.g. `<!--[if mso]>…<![endif]-->`.
    /// `html` may be unbalanced; only the matching legacy engine parses it.
    Conditional { expr: String, html: String },
    Fragment(Vec<Node>),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Node::Raw(s.into())
    }

    pub fn conditional(expr: &str, html: impl Into<String>) -> Self {
        Node::Conditional {
            expr: expr.to_string(),
            html: html.into(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => write_element(el, out),
            Node::Text(t) => out.push_str(&escape_text(t)),
            Node::Raw(html) => out.push_str(html),
            Node::Conditional { expr, html } => {
                let _ = write!(out, "<!--[if {}]>{}<![endif]-->", expr, html);
            }
            Node::Fragment(nodes) => {
                for n in nodes {
                    n.write_html(out);
                }
            }
        }
    }

    /// All elements in document order (depth first, pre-order)
    pub fn elements(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_elements(self, &mut found);
        found
    }

    /// Elements with the given tag, in document order
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        self.elements().into_iter().filter(|e| e.tag == tag).collect()
    }

    /// Concatenated text of all `Text` nodes
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
            Node::Fragment(nodes) => nodes.iter().map(Node::text_content).collect(),
            Node::Raw(_) | Node::Conditional { .. } => String::new(),
        }
    }
}

fn collect_elements<'a>(node: &'a Node, found: &mut Vec<&'a Element>) {
    match node {
        Node::Element(el) => {
            found.push(el);
            for c in &el.children {
                collect_elements(c, found);
            }
        }
        Node::Fragment(nodes) => {
            for n in nodes {
                collect_elements(n, found);
            }
        }
        _ => {}
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
    }
    if !el.style.is_empty() {
        let _ = write!(out, " style=\"{}\"", escape_attr(&el.style.to_css()));
    }
    out.push('>');
    for c in &el.children {
        c.write_html(out);
    }
    let _ = write!(out, "</{}>", el.tag);
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_formats_like_style_objects() {
        assert_eq!(px(0.0), "0");
        assert_eq!(px(-0.0), "0");
        assert_eq!(px(10.0), "10px");
        assert_eq!(px(2.5), "2.5px");
        assert_eq!(px(20.0 / 3.0), "6.666666666666667px");
    }

    #[test]
    fn numbers_print_like_template_literals() {
        assert_eq!(css_number(-0.0), "0");
        assert_eq!(css_number(12.5), "12.5");
        assert_eq!(css_number(-4.0), "-4");
        assert_eq!(css_number(123456.0), "123456");
        assert_eq!(css_number(1e21), "1e+21");
        assert_eq!(css_number(1.5e22), "1.5e+22");
        assert_eq!(css_number(1e20), "100000000000000000000");
        assert_eq!(css_number(0.000001), "0.000001");
        assert_eq!(css_number(5e-7), "5e-7");
        assert_eq!(px(1e-7), "1e-7px");
    }

    #[test]
    fn style_keeps_first_set_order() {
        let mut s = Style::new();
        s.set("a", "1").set("b", "2").set("a", "3");
        s.set_opt("c", None);
        assert_eq!(s.to_css(), "a:3;b:2");
        assert_eq!(s.get("a"), Some("3"));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn element_serializes_attrs_then_style() {
        let el = Element::new("td")
            .attr("class", "column")
            .style(Style::new().with("width", "10px"))
            .child(Node::text("a < b & c"));
        assert_eq!(
            Node::from(el).to_html(),
            "<td class=\"column\" style=\"width:10px\">a &lt; b &amp; c</td>"
        );
    }

    #[test]
    fn empty_style_is_omitted() {
        let html = Node::from(Element::new("div")).to_html();
        assert_eq!(html, "<div></div>");
    }

    #[test]
    fn attribute_values_are_escaped() {
        let html = Node::from(Element::new("div").attr("title", "\"x\" <y>")).to_html();
        assert_eq!(html, "<div title=\"&quot;x&quot; &lt;y&gt;\"></div>");
    }

    #[test]
    fn conditional_and_raw_are_verbatim() {
        let frag = Node::Fragment(vec![
            Node::conditional("mso", "<table><tr><td>"),
            Node::raw("<b>hi</b>"),
        ]);
        assert_eq!(
            frag.to_html(),
            "<!--[if mso]><table><tr><td><![endif]--><b>hi</b>"
        );
    }

    #[test]
    fn find_all_walks_fragments_and_children() {
        let tree = Node::Fragment(vec![
            Element::new("tr")
                .child(Element::new("td").child(Node::text("x")))
                .child(Element::new("td"))
                .into(),
            Element::new("td").into(),
        ]);
        assert_eq!(tree.find_all("td").len(), 3);
        assert_eq!(tree.text_content(), "x");
    }
}
