//! Read rendered markup back and summarize the column layout.
//!
//! Used by the CLI `inspect` command and by tests that check rendered HTML
//! the way an email client's parser would see it.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::rendering::scope::SCOPE_PREFIX;

/// One visible column cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellSummary {
    pub vertical_align: Option<String>,
    pub padding_left: Option<String>,
    pub padding_right: Option<String>,
    pub width: Option<String>,
    /// Trimmed text content of the cell
    pub text: String,
}

/// Summary of the first columns container found in a document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSummary {
    pub scope_id: String,
    pub background_color: Option<String>,
    pub cells: Vec<CellSummary>,
    pub has_media_rule: bool,
    pub breakpoint_px: Option<u32>,
    /// `<!--[if mso]>` comments inside the container
    pub mso_blocks: usize,
}

fn selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| Error::Inspect(format!("bad selector {:?}: {:?}", s, e)))
}

/// Parse an inline `style` attribute into `(property, value)` pairs
pub fn parse_inline_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim();
            if prop.is_empty() {
                return None;
            }
            Some((prop.to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}

fn style_value(el: &ElementRef<'_>, property: &str) -> Option<String> {
    let style = el.value().attr("style")?;
    parse_inline_style(style)
        .into_iter()
        .find(|(p, _)| p == property)
        .map(|(_, v)| v)
}

fn media_breakpoint(css: &str) -> Option<u32> {
    let rest = css.split("(max-width:").nth(1)?;
    rest.trim_start().split("px").next()?.trim().parse().ok()
}

/// Summarize the first columns container in `html`
pub fn summarize(html: &str) -> Result<LayoutSummary> {
    let document = Html::parse_document(html);
    let container_sel = selector(&format!("div[id^=\"{}\"]", SCOPE_PREFIX))?;
    let container = document
        .select(&container_sel)
        .next()
        .ok_or_else(|| Error::Inspect("no columns container found".into()))?;
    let scope_id = container.value().attr("id").unwrap_or_default().to_string();

    let cell_sel = selector(&format!(
        "div[id=\"{}\"] > table > tbody > tr > td.column",
        scope_id
    ))?;
    let cells = document
        .select(&cell_sel)
        .map(|td| CellSummary {
            vertical_align: style_value(&td, "vertical-align"),
            padding_left: style_value(&td, "padding-left"),
            padding_right: style_value(&td, "padding-right"),
            width: style_value(&td, "width"),
            text: td.text().collect::<String>().trim().to_string(),
        })
        .collect();

    let background_color = container
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(|wrapper| style_value(&wrapper, "background-color"));

    let style_sel = selector("style")?;
    let scope_ref = format!("#{}", scope_id);
    let rule = document
        .select(&style_sel)
        .map(|s| s.text().collect::<String>())
        .find(|css| css.contains("@media") && css.contains(&scope_ref));

    let mso_blocks = container
        .descendants()
        .filter(|n| matches!(n.value(), scraper::Node::Comment(c) if c.trim_start().starts_with("[if mso]")))
        .count();

    log::debug!("inspected #{}: {} mso block(s)", scope_id, mso_blocks);

    Ok(LayoutSummary {
        scope_id,
        background_color,
        cells,
        has_media_rule: rule.is_some(),
        breakpoint_px: rule.as_deref().and_then(media_breakpoint),
        mso_blocks,
    })
}
