//! Builder documents rendered end to end

use std::fs;

use rfmail::document::{EmailDocument, DEFAULT_ROOT};
use rfmail::{Error, RenderOptions};

fn load(name: &str) -> EmailDocument {
    let json = fs::read_to_string(format!("tests/fixtures/{}", name)).expect("read fixture");
    EmailDocument::from_json(&json).expect("parse fixture")
}

fn options() -> RenderOptions {
    RenderOptions {
        scope_key: Some("news".into()),
        ..Default::default()
    }
}

#[test]
fn newsletter_renders_full_page() {
    let doc = load("newsletter.json");
    doc.validate().expect("fixture is valid");
    let html = doc.render_html(DEFAULT_ROOT, &options()).expect("render");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1>Spring update</h1>"));
    assert!(html.contains("<p>Faster sync</p>"));
    assert!(html.contains("<p>Offline drafts</p>"));
    // unsupported Text block is skipped
    assert!(!html.contains("Unsubscribe"));
    assert!(html.contains("id=\"columns-container-news-features\""));
    assert!(html.contains("background-color:#F2F5F7"));
}

#[cfg(feature = "inspect")]
#[test]
fn newsletter_columns_layout() {
    let doc = load("newsletter.json");
    let html = doc.render_html(DEFAULT_ROOT, &options()).expect("render");
    let s = rfmail::inspect::summarize(&html).expect("summarize");

    assert_eq!(s.scope_id, "columns-container-news-features");
    assert_eq!(s.background_color.as_deref(), Some("#FAFAFA"));
    let texts: Vec<&str> = s.cells.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Faster sync", "Dark mode", "Offline drafts"]);
    let pads: Vec<(Option<&str>, Option<&str>)> = s
        .cells
        .iter()
        .map(|c| (c.padding_left.as_deref(), c.padding_right.as_deref()))
        .collect();
    assert_eq!(
        pads,
        vec![
            (Some("0"), Some("8px")),
            (Some("4px"), Some("4px")),
            (Some("8px"), Some("0")),
        ]
    );
    assert_eq!(s.cells[1].width.as_deref(), Some("180px"));
    assert!(s.cells.iter().all(|c| c.vertical_align.as_deref() == Some("top")));
}

#[test]
fn invalid_document_is_rejected_before_rendering() {
    let mut doc = load("newsletter.json");
    doc.insert(
        "features",
        "ColumnsContainer",
        serde_json::json!({ "props": { "contentAlignment": "center" } }),
    );
    let err = doc.render(DEFAULT_ROOT, &options()).unwrap_err();
    match err {
        Error::Validation(issues) => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].path, "features.data.props.contentAlignment");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn rendering_other_roots() {
    let doc = load("newsletter.json");
    let node = doc.render("footer", &options()).expect("render footer");
    assert_eq!(node.to_html(), "<div style=\"background-color:#EEEEEE\"></div>");
}
