use std::fs;
use std::path::PathBuf;

use rfmail::{RenderOptions, RenderTarget};

fn golden_path(dir: &str, name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens");
    p.push(dir);
    p.push(name);
    p
}

fn check_golden(name: &str) {
    let input = fs::read_to_string(golden_path("inputs", &format!("{}.json", name)))
        .expect("read fixture");
    let options = RenderOptions {
        target: RenderTarget::Universal,
        scope_key: Some("golden".into()),
        ..Default::default()
    };
    let html = rfmail::render_props_json(&input, &options).expect("render fixture");

    let expected_path = golden_path("expected", &format!("{}.html", name));
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, format!("{}\n", html)).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(html, exp.trim_end(), "golden mismatch for {}", name);
}

#[test]
fn golden_two_columns_matches_fixture() {
    check_golden("two_columns");
}

#[test]
fn golden_three_columns_matches_fixture() {
    check_golden("three_columns");
}
