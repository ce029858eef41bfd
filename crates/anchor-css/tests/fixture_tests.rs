//! End-to-end run over the demo page fixture.

use anchor_css::{InsetSide, LayoutHost, Polyfill, Rect, StaticDocument};

const DEMO: &str = include_str!("../../../res/anchor-demo.json");

#[test]
fn test_demo_page_is_positioned_against_offset_parent_padding_box() {
    let mut document = StaticDocument::from_json(DEMO).unwrap();
    let demo = document.element_by_id("demo").unwrap();
    let anchor = document.element_by_id("my-anchor-positioning").unwrap();
    let parent = document.client_rect(demo);
    let anchor_width = document.bounding_rect(anchor).width;

    let report = Polyfill::default().apply(&mut document);
    assert_eq!(report.positioned.len(), 2);
    assert_eq!(report.unresolved.len(), 1);

    for id in ["my-target-positioning", "my-target-inline"] {
        let target = document.element_by_id(id).unwrap();
        assert_eq!(document.offset_parent(target), Some(demo));
        assert_eq!(
            document.computed_inset(target, InsetSide::Top),
            Some(parent.height),
            "{id}"
        );
        assert_eq!(
            document.computed_inset(target, InsetSide::Right),
            Some(parent.width - anchor_width),
            "{id}"
        );
    }

    let fallback = document.element_by_id("my-target-fallback").unwrap();
    assert_eq!(document.computed_inset(fallback, InsetSide::Left), Some(4.0));
}

#[test]
fn test_demo_page_follows_anchor_resize() {
    let mut document = StaticDocument::from_json(DEMO).unwrap();
    let mut polyfill = Polyfill::default();
    let _ = polyfill.apply(&mut document);

    let anchor = document.element_by_id("my-anchor-positioning").unwrap();
    let target = document.element_by_id("my-target-positioning").unwrap();
    document.set_rect(anchor, Rect::new(10.0, 10.0, 50.0, 116.0));
    let outcome = polyfill.pump(&mut document);

    assert_eq!(outcome.updated, 2);
    assert_eq!(document.computed_inset(target, InsetSide::Right), Some(246.0));
    assert_eq!(document.computed_inset(target, InsetSide::Top), Some(116.0));
}
