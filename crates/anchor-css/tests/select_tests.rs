//! Integration tests for anchor selection by name.

use anchor_css::{AnchorName, StaticDocument, anchor_candidates, select_anchor, select_from};
use anchor_dom::NodeId;
use serde_json::{Value, json};

fn page(body: Value) -> StaticDocument {
    let fixture = json!({
        "root": { "tag": "html", "children": [{ "tag": "body", "children": body }] }
    });
    StaticDocument::from_json(&fixture.to_string()).unwrap()
}

fn node(document: &StaticDocument, id: &str) -> NodeId {
    document.element_by_id(id).unwrap()
}

fn name(text: &str) -> AnchorName {
    AnchorName::new(text).unwrap()
}

/// WPT css-anchor-position/anchor-name-001: every target finds the first
/// anchor in pre-order from the positioned ancestor, whatever its size.
fn same_name_page() -> StaticDocument {
    page(json!([
        { "tag": "div", "style": "position: relative", "children": [
            { "tag": "div", "id": "target1", "style": "position: absolute" },
            { "tag": "div", "id": "first", "style": "anchor-name: --a1", "rect": [0, 0, 10, 10], "children": [
                { "tag": "div", "id": "second", "style": "anchor-name: --a1", "rect": [0, 0, 20, 10] },
                { "tag": "div", "id": "target2", "style": "position: absolute" }
            ]},
            { "tag": "div", "id": "third", "style": "anchor-name: --a1", "rect": [0, 10, 30, 10] },
            { "tag": "div", "id": "target3", "style": "position: absolute" }
        ]}
    ]))
}

#[test]
fn test_candidates_are_in_tree_order() {
    let document = same_name_page();
    let a1 = name("--a1");
    let candidates: Vec<_> = anchor_candidates(&document, &a1).collect();
    assert_eq!(
        candidates,
        vec![
            node(&document, "first"),
            node(&document, "second"),
            node(&document, "third")
        ]
    );
}

#[test]
fn test_first_valid_anchor_in_pre_order_wins() {
    let document = same_name_page();
    let first = node(&document, "first");
    for target in ["target1", "target2", "target3"] {
        assert_eq!(
            select_anchor(&document, node(&document, target), &name("--a1")),
            Some(first),
            "{target}"
        );
    }
}

#[test]
fn test_invalid_candidates_are_skipped() {
    let document = page(json!([
        { "tag": "div", "style": "position: relative", "children": [
            { "tag": "div", "id": "hidden", "style": "anchor-name: --a; display: none" },
            { "tag": "div", "id": "positioned", "style": "anchor-name: --a; position: absolute" },
            { "tag": "div", "id": "usable", "style": "anchor-name: --a" },
            { "tag": "div", "id": "target", "style": "position: absolute" }
        ]}
    ]));
    assert_eq!(
        select_anchor(&document, node(&document, "target"), &name("--a")),
        Some(node(&document, "usable"))
    );
}

#[test]
fn test_no_candidate_selects_nothing() {
    let document = page(json!([
        { "tag": "div", "style": "position: relative", "children": [
            { "tag": "div", "style": "anchor-name: --other" },
            { "tag": "div", "id": "target", "style": "position: absolute" }
        ]},
        { "tag": "div", "style": "position: relative", "children": [
            { "tag": "div", "style": "anchor-name: --a" }
        ]}
    ]));
    assert_eq!(select_anchor(&document, node(&document, "target"), &name("--a")), None);
}

#[test]
fn test_anchor_name_list_matches_any_entry() {
    let document = page(json!([
        { "tag": "div", "id": "anchor", "style": "anchor-name: --one, --two" },
        { "tag": "div", "id": "target", "style": "position: fixed" }
    ]));
    let anchor = node(&document, "anchor");
    let target = node(&document, "target");
    assert_eq!(select_anchor(&document, target, &name("--one")), Some(anchor));
    assert_eq!(select_anchor(&document, target, &name("--two")), Some(anchor));
    assert_eq!(select_anchor(&document, target, &name("--three")), None);
}

#[test]
fn test_select_from_respects_given_order() {
    let document = same_name_page();
    let target = node(&document, "target1");
    let third = node(&document, "third");
    assert_eq!(
        select_from(&document, target, [third, node(&document, "first")]),
        Some(third)
    );
    assert_eq!(select_from(&document, target, []), None);
}
