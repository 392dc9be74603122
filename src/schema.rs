//! Block input schema: typed models plus a validation stage
//!
//! Input arrives as loosely-shaped JSON from the template builder. Every field
//! is optional and nullable; unknown keys are ignored. [`validate`] walks a
//! `serde_json::Value`, collects *all* problems with their paths, and only
//! then converts into the typed [`ColumnsContainerProps`].

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result, ValidationIssue};
use crate::markup::css_number;

/// Number of visible columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub enum ColumnsCount {
    #[default]
    Two,
    Three,
}

impl ColumnsCount {
    pub fn get(self) -> usize {
        match self {
            ColumnsCount::Two => 2,
            ColumnsCount::Three => 3,
        }
    }
}

impl TryFrom<f64> for ColumnsCount {
    type Error = String;

    fn try_from(value: f64) -> std::result::Result<Self, Self::Error> {
        if value == 2.0 {
            Ok(ColumnsCount::Two)
        } else if value == 3.0 {
            Ok(ColumnsCount::Three)
        } else {
            Err(format!("columns count must be 2 or 3, got {}", value))
        }
    }
}

impl From<ColumnsCount> for u8 {
    fn from(c: ColumnsCount) -> u8 {
        c.get() as u8
    }
}

/// Vertical alignment of content inside a column cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl ContentAlignment {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentAlignment::Top => "top",
            ContentAlignment::Middle => "middle",
            ContentAlignment::Bottom => "bottom",
        }
    }
}

/// Box padding in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub right: f64,
    pub left: f64,
}

impl Padding {
    /// CSS shorthand `top right bottom left`, each side in `px`
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            css_number(self.top),
            css_number(self.right),
            css_number(self.bottom),
            css_number(self.left)
        )
    }
}

/// Up to three optional per-column widths.
///
/// Shorter arrays are padded with `None`; more than three entries is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<f64>>", into = "Vec<Option<f64>>")]
pub struct FixedWidths(pub [Option<f64>; 3]);

impl FixedWidths {
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }
}

impl TryFrom<Vec<Option<f64>>> for FixedWidths {
    type Error = String;

    fn try_from(values: Vec<Option<f64>>) -> std::result::Result<Self, Self::Error> {
        if values.len() > 3 {
            return Err(format!("expected at most 3 fixed widths, got {}", values.len()));
        }
        let mut widths = [None; 3];
        for (slot, v) in widths.iter_mut().zip(values) {
            *slot = v;
        }
        Ok(FixedWidths(widths))
    }
}

impl From<FixedWidths> for Vec<Option<f64>> {
    fn from(w: FixedWidths) -> Self {
        w.0.to_vec()
    }
}

/// Outer box style shared by container-like blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
}

/// Column layout settings as supplied by the builder
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnsProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_widths: Option<FixedWidths>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns_count: Option<ColumnsCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns_gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_alignment: Option<ContentAlignment>,
}

/// Raw input of a columns container block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsContainerProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<BlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<ColumnsProps>,
}

fn color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("color pattern is valid"))
}

/// `#rrggbb`
pub fn is_valid_color(s: &str) -> bool {
    color_regex().is_match(s)
}

pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Field lookup treating a missing key and `null` alike
fn present<'a>(obj: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn check_number(value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    if !value.is_number() {
        issues.push(ValidationIssue::new(
            path,
            format!("expected number, received {}", type_name(value)),
        ));
    }
}

/// Validate `{ backgroundColor?, padding? }`
pub(crate) fn check_block_style(value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = value.as_object() else {
        issues.push(ValidationIssue::new(
            path,
            format!("expected object, received {}", type_name(value)),
        ));
        return;
    };

    if let Some(color) = present(obj, "backgroundColor") {
        let p = join_path(path, "backgroundColor");
        match color.as_str() {
            Some(s) if is_valid_color(s) => {}
            Some(s) => issues.push(ValidationIssue::new(
                p,
                format!("invalid color {:?}, expected #rrggbb", s),
            )),
            None => issues.push(ValidationIssue::new(
                p,
                format!("expected string, received {}", type_name(color)),
            )),
        }
    }

    if let Some(padding) = present(obj, "padding") {
        let p = join_path(path, "padding");
        match padding.as_object() {
            Some(sides) => {
                for side in ["top", "bottom", "right", "left"] {
                    let sp = join_path(&p, side);
                    match sides.get(side) {
                        Some(v) => check_number(v, &sp, issues),
                        None => issues.push(ValidationIssue::new(sp, "required")),
                    }
                }
            }
            None => issues.push(ValidationIssue::new(
                p,
                format!("expected object, received {}", type_name(padding)),
            )),
        }
    }
}

/// Validate the layout settings object of a columns container
pub(crate) fn check_columns_props(value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = value.as_object() else {
        issues.push(ValidationIssue::new(
            path,
            format!("expected object, received {}", type_name(value)),
        ));
        return;
    };

    if let Some(widths) = present(obj, "fixedWidths") {
        let p = join_path(path, "fixedWidths");
        match widths.as_array() {
            Some(items) if items.len() > 3 => issues.push(ValidationIssue::new(
                p,
                format!("expected at most 3 entries, received {}", items.len()),
            )),
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_null() {
                        check_number(item, &join_path(&p, &i.to_string()), issues);
                    }
                }
            }
            None => issues.push(ValidationIssue::new(
                p,
                format!("expected array, received {}", type_name(widths)),
            )),
        }
    }

    if let Some(count) = present(obj, "columnsCount") {
        let ok = count
            .as_f64()
            .map(|n| ColumnsCount::try_from(n).is_ok())
            .unwrap_or(false);
        if !ok {
            issues.push(ValidationIssue::new(
                join_path(path, "columnsCount"),
                format!("expected 2 or 3, received {}", count),
            ));
        }
    }

    if let Some(gap) = present(obj, "columnsGap") {
        check_number(gap, &join_path(path, "columnsGap"), issues);
    }

    if let Some(align) = present(obj, "contentAlignment") {
        if !matches!(align.as_str(), Some("top" | "middle" | "bottom")) {
            issues.push(ValidationIssue::new(
                join_path(path, "contentAlignment"),
                format!("expected one of top, middle, bottom, received {}", align),
            ));
        }
    }
}

/// Validate a whole columns container input (`{ style?, props? }`)
pub(crate) fn check_columns_container(
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(obj) = value.as_object() else {
        issues.push(ValidationIssue::new(
            path,
            format!("expected object, received {}", type_name(value)),
        ));
        return;
    };
    if let Some(style) = present(obj, "style") {
        check_block_style(style, &join_path(path, "style"), issues);
    }
    if let Some(props) = present(obj, "props") {
        check_columns_props(props, &join_path(path, "props"), issues);
    }
}

/// Validate a JSON value and convert it into typed props
pub fn validate(value: &Value) -> Result<ColumnsContainerProps> {
    let mut issues = Vec::new();
    check_columns_container(value, "", &mut issues);
    if !issues.is_empty() {
        log::debug!("columns container input rejected with {} issue(s)", issues.len());
        return Err(Error::Validation(issues));
    }
    Ok(serde_json::from_value(value.clone())?)
}

/// Parse JSON text and validate it
pub fn parse_props(json: &str) -> Result<ColumnsContainerProps> {
    let value: Value = serde_json::from_str(json)?;
    validate(&value)
}
