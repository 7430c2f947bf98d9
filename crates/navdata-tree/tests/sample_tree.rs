//! Tests against the C coding standards navigation tree.

use std::path::PathBuf;

use navdata_tree::codec::{self, EncodeOptions, Format};
use navdata_tree::{NavEntry, NavTree, Target};
use pretty_assertions::assert_eq;

const SAMPLE: &str = include_str!("fixtures/_ccoding_stds_main.js");

fn sample() -> NavTree {
    NavTree::from_navtree(SAMPLE).unwrap()
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/_ccoding_stds_main.js")
}

#[test]
fn test_sample_shape() {
    let tree = sample();

    assert_eq!(tree.name(), Some("_ccoding_stds_main"));
    assert_eq!(tree.entries().len(), 28);
    assert_eq!(tree.len(), 40);
    assert_eq!(tree.depth(), 2);
}

#[test]
fn test_cyclomatic_complexity_entry() {
    let tree = sample();

    let entry = &tree.entries()[0];

    assert_eq!(entry.label(), "Cyclomatic Complexity");
    assert_eq!(
        entry.target().unwrap().to_string(),
        "_ccoding_stds_main.html#cstdsCyclomatic"
    );
    assert!(entry.children().is_empty());
}

#[test]
fn test_c_standard_parameters_entry() {
    let tree = sample();

    let entry = tree.find("C Standard Parameters").unwrap();
    let target = entry.target().unwrap();

    assert_eq!(target.to_string(), "_c_standards_parameters.html");
    assert_eq!(target.fragment(), None);

    let children = entry.children();
    assert_eq!(children.len(), 12);
    let first = children.first().unwrap();
    let last = children.last().unwrap();
    assert_eq!(first.label(), "Camel Case");
    assert_eq!(
        first.target().unwrap().to_string(),
        "_c_standards_parameters.html#cstdsparamCamelCase"
    );
    assert_eq!(last.label(), "Tabs");
    assert_eq!(
        last.target().unwrap().to_string(),
        "_c_standards_parameters.html#cstdsparamTabs"
    );
}

#[test]
fn test_traversal_matches_declared_order() {
    let tree = sample();

    let labels: Vec<_> = tree.iter().map(NavEntry::label).collect();

    assert_eq!(&labels[..3], &["Cyclomatic Complexity", "Fan Out", "Recursion"]);
    assert_eq!(labels[26], "C Standard Abbreviations");
    assert_eq!(labels[27], "C Standard Parameters");
    assert_eq!(labels[28], "Camel Case");
    assert_eq!(labels[39], "Tabs");
    assert_eq!(labels, tree.iter().map(NavEntry::label).collect::<Vec<_>>());
}

#[test]
fn test_duplicate_labels_resolve_by_position() {
    let tree = sample();

    let top_prefix = tree.find("Prefix").unwrap();
    let param_prefix = tree.get(&[27, 1]).unwrap();

    assert_eq!(
        top_prefix.target().unwrap().to_string(),
        "_ccoding_stds_main.html#cstdsPrefix"
    );
    assert_eq!(
        param_prefix.target().unwrap().to_string(),
        "_c_standards_parameters.html#cstdsparamPrefix"
    );
}

#[test]
fn test_breadcrumbs_for_nested_target() {
    let tree = sample();
    let target = Target::parse("_c_standards_parameters.html#cstdsparamTabs").unwrap();

    let labels: Vec<_> = tree
        .breadcrumbs(&target)
        .into_iter()
        .map(NavEntry::label)
        .collect();

    assert_eq!(labels, ["C Standard Parameters", "Tabs"]);
}

#[test]
fn test_pages() {
    assert_eq!(
        sample().pages(),
        [
            "_ccoding_stds_main.html",
            "_c_standards_abbreviations.html",
            "_c_standards_parameters.html",
        ]
    );
}

#[test]
fn test_navtree_encoding_reproduces_generator_output() {
    let tree = sample();

    let text = tree.to_navtree().unwrap();

    assert_eq!(text.trim_end(), SAMPLE.trim_end());
}

#[test]
fn test_round_trip_every_format() {
    let tree = sample();

    for format in [Format::Json, Format::Yaml, Format::Navtree] {
        let text = codec::encode(&tree, format, &EncodeOptions::default()).unwrap();
        let decoded = codec::decode(format, &text).unwrap();
        assert_eq!(decoded.entries(), tree.entries(), "round trip through {format}");
    }
}

#[test]
fn test_compact_json_round_trip() {
    let tree = sample();

    let decoded = NavTree::from_json(&tree.to_json(false).unwrap()).unwrap();

    assert_eq!(decoded.entries(), tree.entries());
}

#[test]
fn test_json_always_carries_three_fields() {
    let value: serde_json::Value = serde_json::from_str(&sample().to_json(true).unwrap()).unwrap();

    let mut stack: Vec<&serde_json::Value> = value.as_array().unwrap().iter().collect();
    while let Some(entry) = stack.pop() {
        let object = entry.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object["label"].is_string());
        assert!(object["target"].is_string() || object["target"].is_null());
        stack.extend(object["children"].as_array().unwrap());
    }
}

#[test]
fn test_load_detects_format_from_extension() {
    let tree = codec::load(&fixture_path()).unwrap();

    assert_eq!(tree, sample());
}
