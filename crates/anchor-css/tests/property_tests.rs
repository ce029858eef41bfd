//! Property tests over randomly shaped documents.

use anchor_css::{
    InsetSide, LayoutHost, Polyfill, Rect, StaticDocument, containing_block, is_valid_anchor,
};
use anchor_dom::{DomTree, ElementData, NodeId};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

/// Build `<html><body>` followed by one `<div>` per entry of `shape`, each
/// appended under an earlier element picked by the entry. Every div gets
/// `style` from `style_for(index)`.
fn build(shape: &[u8], style_for: impl Fn(usize) -> &'static str) -> (StaticDocument, Vec<NodeId>) {
    let mut tree = DomTree::new();
    let html = tree.append_element(tree.root(), ElementData::new("html"));
    let body = tree.append_element(html, ElementData::new("body"));
    let mut divs: Vec<NodeId> = Vec::new();
    for (index, &pick) in shape.iter().enumerate() {
        let parent = if divs.is_empty() || pick % 3 == 0 {
            body
        } else {
            divs[usize::from(pick) % divs.len()]
        };
        let data = ElementData::new("div").with_attr("style", style_for(index));
        divs.push(tree.append_element(parent, data));
    }
    let document = StaticDocument::new(tree, Rect::new(0.0, 0.0, 800.0, 600.0));
    (document, divs)
}

#[quickcheck]
fn static_anchor_is_valid_exactly_inside_target_containing_block(
    shape: Vec<u8>,
    a: usize,
    t: usize,
) -> TestResult {
    if shape.is_empty() {
        return TestResult::discard();
    }
    let (document, divs) = build(&shape, |_| "");
    let anchor = divs[a % divs.len()];
    let target = divs[t % divs.len()];
    if anchor == target {
        return TestResult::discard();
    }
    let inside = containing_block(&document, target)
        .element()
        .is_some_and(|cb| document.tree().is_descendant_of(anchor, cb));
    TestResult::from_bool(is_valid_anchor(&document, anchor, target) == inside)
}

#[quickcheck]
fn fixed_target_accepts_any_static_anchor(shape: Vec<u8>, a: usize) -> TestResult {
    if shape.len() < 2 {
        return TestResult::discard();
    }
    let last = shape.len() - 1;
    let (document, divs) = build(&shape, |index| {
        if index == last { "position: fixed" } else { "" }
    });
    let target = divs[last];
    let anchor = divs[a % last];
    TestResult::from_bool(is_valid_anchor(&document, anchor, target))
}

#[quickcheck]
fn display_none_anchor_is_never_valid(shape: Vec<u8>, a: usize, t: usize) -> TestResult {
    if shape.len() < 2 {
        return TestResult::discard();
    }
    let hidden = a % shape.len();
    let (document, divs) = build(&shape, |index| {
        if index == hidden { "display: none; position: relative" } else { "position: relative" }
    });
    let target = divs[t % divs.len()];
    TestResult::from_bool(!is_valid_anchor(&document, divs[hidden], target))
}

#[quickcheck]
fn reapplying_without_changes_is_stable(x: u16, y: u16, width: u16, height: u16) -> bool {
    let mut tree = DomTree::new();
    let html = tree.append_element(tree.root(), ElementData::new("html"));
    let body = tree.append_element(html, ElementData::new("body"));
    let anchor = tree.append_element(
        body,
        ElementData::new("div").with_attr("style", "anchor-name: --a"),
    );
    let target = tree.append_element(
        body,
        ElementData::new("div").with_attr(
            "style",
            "position: absolute; top: anchor(--a bottom); left: anchor(--a center); right: anchor(--a 25%)",
        ),
    );
    let mut document = StaticDocument::new(tree, Rect::new(0.0, 0.0, 800.0, 600.0));
    document.set_rect(body, Rect::new(0.0, 0.0, 800.0, 600.0));
    document.set_rect(
        anchor,
        Rect::new(f32::from(x), f32::from(y), f32::from(width), f32::from(height)),
    );

    let mut polyfill = Polyfill::default();
    let _ = polyfill.apply(&mut document);
    let first = document.inline_insets(target);
    let _ = polyfill.apply(&mut document);
    let outcome = polyfill.pump(&mut document);

    first == document.inline_insets(target)
        && outcome.updated == 0
        && first.get(InsetSide::Top) == Some(f32::from(y) + f32::from(height))
}
