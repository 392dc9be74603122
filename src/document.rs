//! Block documents: a map of block id to block, rendered from a root id.
//!
//! This is the builder's storage format. Container-like blocks reference
//! their children by id; a columns container lists children per column, and
//! those rendered children become its column slots.
//!
//! ```
//! use rfmail::{document::EmailDocument, RenderOptions};
//!
//! let doc = EmailDocument::from_json(r#"{
//!     "root": { "type": "EmailLayout", "data": { "childrenIds": ["cols"] } },
//!     "cols": { "type": "ColumnsContainer", "data": { "props": {
//!         "columnsGap": 16,
//!         "columns": [ { "childrenIds": ["a"] }, { "childrenIds": [] }, { "childrenIds": [] } ]
//!     } } },
//!     "a": { "type": "Html", "data": { "props": { "contents": "<b>Hi</b>" } } }
//! }"#).unwrap();
//! let html = doc.render_html("root", &RenderOptions::default()).unwrap();
//! assert!(html.contains("<b>Hi</b>"));
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{LayoutConfig, RenderOptions};
use crate::error::{Error, Result, ValidationIssue};
use crate::markup::{Element, Node, Style};
use crate::rendering::layout::{render_columns, wrapper_style, MAX_COLUMNS};
use crate::rendering::scope;
use crate::schema::{self, join_path, BlockStyle, ColumnsContainerProps};

/// Root id used when none is given
pub const DEFAULT_ROOT: &str = "root";

/// Deepest chain of nested blocks a render will follow
pub const MAX_DEPTH: usize = 128;

pub const DEFAULT_BACKDROP_COLOR: &str = "#F5F5F5";
pub const DEFAULT_CANVAS_COLOR: &str = "#FFFFFF";
pub const DEFAULT_TEXT_COLOR: &str = "#262626";
pub const DEFAULT_FONT_FAMILY: &str =
    "\"Helvetica Neue\", \"Arial Nova\", \"Nimbus Sans\", Arial, sans-serif";

/// A stored block: type tag plus untyped data, validated on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EmailLayoutData {
    backdrop_color: Option<String>,
    canvas_color: Option<String>,
    text_color: Option<String>,
    font_family: Option<String>,
    children_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ChildrenProps {
    children_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ContainerData {
    style: Option<BlockStyle>,
    props: Option<ChildrenProps>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct HtmlProps {
    contents: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct HtmlData {
    style: Option<BlockStyle>,
    props: Option<HtmlProps>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ColumnRef {
    children_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ColumnRefs {
    columns: Option<Vec<ColumnRef>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ColumnsData {
    props: Option<ColumnRefs>,
}

/// Block types this crate knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    EmailLayout,
    Container,
    ColumnsContainer,
    Html,
}

impl BlockKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "EmailLayout" => Some(BlockKind::EmailLayout),
            "Container" => Some(BlockKind::Container),
            "ColumnsContainer" => Some(BlockKind::ColumnsContainer),
            "Html" => Some(BlockKind::Html),
            _ => None,
        }
    }
}

/// A builder document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailDocument {
    blocks: BTreeMap<String, BlockEntry>,
}

impl EmailDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, id: impl Into<String>, kind: &str, data: Value) {
        self.blocks.insert(
            id.into(),
            BlockEntry {
                kind: kind.to_string(),
                data,
            },
        );
    }

    pub fn get(&self, id: &str) -> Option<&BlockEntry> {
        self.blocks.get(id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Check every block's data against its type's schema.
    ///
    /// Issue paths are prefixed with the block id (`cols.data.props.columnsGap`).
    /// Blocks of unknown type are not checked.
    pub fn validate(&self) -> Result<()> {
        let mut issues = Vec::new();
        for (id, block) in &self.blocks {
            let path = join_path(id, "data");
            match BlockKind::parse(&block.kind) {
                Some(kind) => check_block(kind, &block.data, &path, &mut issues),
                None => log::debug!("not validating block {:?} of unknown type {:?}", id, block.kind),
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(issues))
        }
    }

    /// Validate, then render the tree under `root`
    pub fn render(&self, root: &str, options: &RenderOptions) -> Result<Node> {
        options.check()?;
        self.validate()?;
        let mut renderer = DocumentRenderer {
            doc: self,
            options,
            stack: Vec::new(),
            active: HashSet::new(),
        };
        renderer
            .render_block(root)?
            .ok_or_else(|| Error::Document(format!("root block {:?} not found", root)))
    }

    /// Render a complete HTML page
    pub fn render_html(&self, root: &str, options: &RenderOptions) -> Result<String> {
        let body = self.render(root, options)?;
        Ok(wrap_page(&body))
    }
}

/// `<!DOCTYPE html>` page around a rendered body
pub fn wrap_page(body: &Node) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"UTF-8\"></head><body>{}</body></html>",
        body.to_html()
    )
}

fn issue(path: &str, message: impl Into<String>) -> ValidationIssue {
    ValidationIssue::new(path, message)
}

fn check_children_ids(value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    match value.as_array() {
        Some(ids) => {
            for (i, id) in ids.iter().enumerate() {
                if !id.is_string() {
                    issues.push(issue(&join_path(path, &i.to_string()), "expected string id"));
                }
            }
        }
        None => issues.push(issue(path, "expected array of ids")),
    }
}

fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

fn check_block(kind: BlockKind, data: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    if !data.is_object() {
        issues.push(issue(path, "expected object"));
        return;
    }
    match kind {
        BlockKind::EmailLayout => {
            for key in ["backdropColor", "canvasColor", "textColor"] {
                if let Some(color) = field(data, key) {
                    if !color.as_str().map(schema::is_valid_color).unwrap_or(false) {
                        issues.push(issue(&join_path(path, key), "expected #rrggbb color"));
                    }
                }
            }
            if let Some(font) = field(data, "fontFamily") {
                if !font.is_string() {
                    issues.push(issue(&join_path(path, "fontFamily"), "expected string"));
                }
            }
            if let Some(ids) = field(data, "childrenIds") {
                check_children_ids(ids, &join_path(path, "childrenIds"), issues);
            }
        }
        BlockKind::Container | BlockKind::Html => {
            if let Some(style) = field(data, "style") {
                schema::check_block_style(style, &join_path(path, "style"), issues);
            }
            let props_path = join_path(path, "props");
            if let Some(props) = field(data, "props") {
                if !props.is_object() {
                    issues.push(issue(&props_path, "expected object"));
                } else if kind == BlockKind::Container {
                    if let Some(ids) = field(props, "childrenIds") {
                        check_children_ids(ids, &join_path(&props_path, "childrenIds"), issues);
                    }
                } else if let Some(contents) = field(props, "contents") {
                    if !contents.is_string() {
                        issues.push(issue(&join_path(&props_path, "contents"), "expected string"));
                    }
                }
            }
        }
        BlockKind::ColumnsContainer => {
            schema::check_columns_container(data, path, issues);
            let columns_path = join_path(path, "props.columns");
            if let Some(columns) = field(data, "props").and_then(|p| field(p, "columns")) {
                match columns.as_array() {
                    Some(cols) if cols.len() > MAX_COLUMNS => issues.push(issue(
                        &columns_path,
                        format!("expected at most {} columns", MAX_COLUMNS),
                    )),
                    Some(cols) => {
                        for (i, col) in cols.iter().enumerate() {
                            let col_path = join_path(&columns_path, &i.to_string());
                            match col.get("childrenIds") {
                                Some(ids) => check_children_ids(
                                    ids,
                                    &join_path(&col_path, "childrenIds"),
                                    issues,
                                ),
                                None => issues.push(issue(&join_path(&col_path, "childrenIds"), "required")),
                            }
                        }
                    }
                    None => issues.push(issue(&columns_path, "expected array")),
                }
            }
        }
    }
}

struct DocumentRenderer<'a> {
    doc: &'a EmailDocument,
    options: &'a RenderOptions,
    /// Ids of blocks currently being rendered, outermost first
    stack: Vec<String>,
    /// Same ids as `stack`, for membership checks
    active: HashSet<String>,
}

impl DocumentRenderer<'_> {
    fn render_block(&mut self, id: &str) -> Result<Option<Node>> {
        if self.active.contains(id) {
            return Err(Error::Document(format!(
                "block {:?} contains itself (via {})",
                id,
                self.stack.join(" -> ")
            )));
        }
        let doc = self.doc;
        let Some(block) = doc.get(id) else {
            log::warn!("skipping missing block {:?}", id);
            return Ok(None);
        };
        let Some(kind) = BlockKind::parse(&block.kind) else {
            log::warn!("skipping block {:?} of unsupported type {:?}", id, block.kind);
            return Ok(None);
        };

        if self.stack.len() >= MAX_DEPTH {
            return Err(Error::Document(format!(
                "nesting too deep at block {:?} (limit {})",
                id, MAX_DEPTH
            )));
        }

        self.stack.push(id.to_string());
        self.active.insert(id.to_string());
        let rendered = self.render_kind(id, kind, &block.data);
        self.active.remove(id);
        self.stack.pop();
        rendered.map(Some)
    }

    fn render_children(&mut self, ids: &[String]) -> Result<Vec<Node>> {
        let mut nodes = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(node) = self.render_block(id)? {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    fn render_kind(&mut self, id: &str, kind: BlockKind, data: &Value) -> Result<Node> {
        match kind {
            BlockKind::EmailLayout => {
                let d: EmailLayoutData = serde_json::from_value(data.clone())?;
                let children = self.render_children(d.children_ids.as_deref().unwrap_or_default())?;
                Ok(email_layout(&d, children))
            }
            BlockKind::Container => {
                let d: ContainerData = serde_json::from_value(data.clone())?;
                let ids = d.props.and_then(|p| p.children_ids).unwrap_or_default();
                let children = self.render_children(&ids)?;
                Ok(Element::new("div")
                    .style(box_style(d.style.as_ref()))
                    .children(children)
                    .into())
            }
            BlockKind::Html => {
                let d: HtmlData = serde_json::from_value(data.clone())?;
                let contents = d.props.and_then(|p| p.contents).unwrap_or_default();
                Ok(Element::new("div")
                    .style(box_style(d.style.as_ref()))
                    .child(Node::raw(contents))
                    .into())
            }
            BlockKind::ColumnsContainer => {
                let props: ColumnsContainerProps = serde_json::from_value(data.clone())?;
                let refs: ColumnsData = serde_json::from_value(data.clone())?;
                let columns = refs.props.and_then(|p| p.columns).unwrap_or_default();
                let mut slots = Vec::with_capacity(columns.len());
                for column in &columns {
                    slots.push(self.render_children(&column.children_ids)?);
                }
                let options = RenderOptions {
                    scope_key: self
                        .options
                        .scope_key
                        .as_ref()
                        .map(|k| format!("{}-{}", k, scope::escape_key(id))),
                    ..self.options.clone()
                };
                Ok(render_columns(&LayoutConfig::resolve(&props), slots, &options))
            }
        }
    }
}

fn box_style(style: Option<&BlockStyle>) -> Style {
    let layout = LayoutConfig {
        background_color: style.and_then(|s| s.background_color.clone()),
        padding: style.and_then(|s| s.padding),
        ..Default::default()
    };
    wrapper_style(&layout)
}

fn email_layout(d: &EmailLayoutData, children: Vec<Node>) -> Node {
    let backdrop = Style::new()
        .with("background-color", d.backdrop_color.as_deref().unwrap_or(DEFAULT_BACKDROP_COLOR))
        .with("color", d.text_color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR))
        .with("font-family", d.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY))
        .with("font-size", "16px")
        .with("font-weight", "400")
        .with("line-height", "1.5")
        .with("margin", "0")
        .with("padding", "32px 0")
        .with("min-height", "100%")
        .with("width", "100%");
    let canvas = Style::new()
        .with("margin", "0 auto")
        .with("max-width", "600px")
        .with("background-color", d.canvas_color.as_deref().unwrap_or(DEFAULT_CANVAS_COLOR));

    let table = Element::new("table")
        .attr("align", "center")
        .attr("width", "100%")
        .attr("role", "presentation")
        .attr("cellspacing", "0")
        .attr("cellpadding", "0")
        .attr("border", "0")
        .style(canvas)
        .child(
            Element::new("tbody").child(
                Element::new("tr")
                    .style(Style::new().with("width", "100%"))
                    .child(Element::new("td").children(children)),
            ),
        );
    Element::new("div").style(backdrop).child(table).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> RenderOptions {
        RenderOptions {
            scope_key: Some("doc".into()),
            ..Default::default()
        }
    }

    fn html(contents: &str) -> Value {
        json!({ "props": { "contents": contents } })
    }

    #[test]
    fn columns_slots_come_from_children() {
        let mut doc = EmailDocument::new();
        doc.insert(
            "cols",
            "ColumnsContainer",
            json!({ "props": {
                "columnsCount": 2,
                "columns": [
                    { "childrenIds": ["a", "b"] },
                    { "childrenIds": ["c"] },
                    { "childrenIds": ["d"] }
                ]
            } }),
        );
        for id in ["a", "b", "c", "d"] {
            doc.insert(id, "Html", html(&format!("<i>{}</i>", id)));
        }
        let out = doc.render("cols", &options()).unwrap().to_html();
        assert!(out.contains("<i>a</i></div><div><i>b</i>"));
        assert!(out.contains("<i>c</i>"));
        assert!(!out.contains("<i>d</i>"));
        assert!(out.contains("id=\"columns-container-doc-cols\""));
    }

    #[test]
    fn missing_children_and_unknown_types_are_skipped() {
        let mut doc = EmailDocument::new();
        doc.insert("root", "Container", json!({ "props": { "childrenIds": ["gone", "img", "ok"] } }));
        doc.insert("img", "Image", json!({ "props": { "url": "x.png" } }));
        doc.insert("ok", "Html", html("fine"));
        let out = doc.render(DEFAULT_ROOT, &options()).unwrap().to_html();
        assert_eq!(out, "<div><div>fine</div></div>");
    }

    #[test]
    fn self_containing_blocks_are_rejected() {
        let mut doc = EmailDocument::new();
        doc.insert("root", "Container", json!({ "props": { "childrenIds": ["inner"] } }));
        doc.insert("inner", "Container", json!({ "props": { "childrenIds": ["root"] } }));
        let err = doc.render("root", &options()).unwrap_err();
        assert!(matches!(err, Error::Document(ref m) if m.contains("root -> inner")));
    }

    fn container_chain(depth: usize) -> EmailDocument {
        let mut doc = EmailDocument::new();
        doc.insert("root", "Container", json!({ "props": { "childrenIds": ["b1"] } }));
        for i in 1..depth {
            doc.insert(
                format!("b{}", i),
                "Container",
                json!({ "props": { "childrenIds": [format!("b{}", i + 1)] } }),
            );
        }
        doc.insert(format!("b{}", depth), "Html", html("leaf"));
        doc
    }

    #[test]
    fn deep_nesting_within_limit_renders() {
        let doc = container_chain(MAX_DEPTH - 1);
        let out = doc.render("root", &options()).unwrap().to_html();
        assert!(out.contains("leaf"));
    }

    #[test]
    fn nesting_past_limit_is_an_error() {
        let doc = container_chain(10_000);
        let err = doc.render("root", &options()).unwrap_err();
        assert!(matches!(err, Error::Document(ref m) if m.contains("nesting too deep")));
    }

    #[test]
    fn similar_block_ids_get_distinct_scopes() {
        let mut doc = EmailDocument::new();
        doc.insert("root", "Container", json!({ "props": { "childrenIds": ["a b", "a-b"] } }));
        for id in ["a b", "a-b"] {
            doc.insert(id, "ColumnsContainer", json!({ "props": { "columnsGap": 8 } }));
        }
        let out = doc.render("root", &options()).unwrap().to_html();
        assert!(out.contains("id=\"columns-container-doc-a_20b\""));
        assert!(out.contains("id=\"columns-container-doc-a-b\""));
    }

    #[test]
    fn shared_children_are_not_cycles() {
        let mut doc = EmailDocument::new();
        doc.insert("root", "Container", json!({ "props": { "childrenIds": ["x", "x"] } }));
        doc.insert("x", "Html", html("x"));
        let out = doc.render("root", &options()).unwrap();
        assert_eq!(out.to_html(), "<div><div>x</div><div>x</div></div>");
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let err = EmailDocument::from_path("does/not/exist.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn missing_root_is_an_error() {
        let doc = EmailDocument::new();
        assert!(matches!(doc.render("root", &options()), Err(Error::Document(_))));
    }

    #[test]
    fn invalid_block_data_reports_prefixed_paths() {
        let mut doc = EmailDocument::new();
        doc.insert(
            "cols",
            "ColumnsContainer",
            json!({ "props": { "columnsCount": 5, "columns": [ { "childrenIds": [1] }, {} ] } }),
        );
        doc.insert("root", "EmailLayout", json!({ "backdropColor": "blue" }));
        let err = doc.validate().unwrap_err();
        let paths: Vec<&str> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "cols.data.props.columnsCount",
                "cols.data.props.columns.0.childrenIds.0",
                "cols.data.props.columns.1.childrenIds",
                "root.data.backdropColor",
            ]
        );
    }

    #[test]
    fn email_layout_uses_defaults_and_centers_canvas() {
        let mut doc = EmailDocument::new();
        doc.insert("root", "EmailLayout", json!({ "canvasColor": "#EEEEEE", "childrenIds": [] }));
        let out = doc.render_html("root", &options()).unwrap();
        assert!(out.starts_with("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"></head><body><div style=\"background-color:#F5F5F5;color:#262626;"));
        assert!(out.contains("max-width:600px;background-color:#EEEEEE"));
        assert!(out.ends_with("</body></html>"));
    }

    #[test]
    fn document_round_trips_through_json() {
        let json = r#"{"root":{"type":"Html","data":{"props":{"contents":"hi"}}}}"#;
        let doc = EmailDocument::from_json(json).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(serde_json::to_string(&doc).unwrap(), json);
    }
}
