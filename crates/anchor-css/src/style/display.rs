//! The `display` property, reduced to what containing-block resolution needs.
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)

use strum_macros::{Display as DisplayName, EnumString, IntoStaticStr};

/// A resolved `display` keyword.
///
/// Only the single-keyword forms are modelled; the polyfill needs to know
/// whether a box exists at all and whether it can act as the containing
/// block of in-flow descendants, not how it lays out its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DisplayName, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Display {
    /// `display: block`
    Block,
    /// `display: inline`
    Inline,
    /// `display: inline-block`
    InlineBlock,
    /// `display: flow-root`
    FlowRoot,
    /// `display: list-item`
    ListItem,
    /// `display: flex`
    Flex,
    /// `display: inline-flex`
    InlineFlex,
    /// `display: grid`
    Grid,
    /// `display: inline-grid`
    InlineGrid,
    /// `display: table`
    Table,
    /// `display: inline-table`
    InlineTable,
    /// [§ 2.5 Box Generation](https://www.w3.org/TR/css-display-3/#valdef-display-contents)
    ///
    /// "The element itself does not generate any boxes, but its children and
    /// pseudo-elements still generate boxes as normal."
    Contents,
    /// [§ 2.5 Box Generation](https://www.w3.org/TR/css-display-3/#valdef-display-none)
    ///
    /// "The element and its descendants generate no boxes or text runs."
    None,
}

impl Display {
    /// Whether the element generates a principal box.
    #[must_use]
    pub const fn generates_box(self) -> bool {
        !matches!(self, Self::None | Self::Contents)
    }

    /// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// "For other elements, if the element's position is 'relative' or
    /// 'static', the containing block is formed by the content edge of the
    /// nearest ancestor box that is a block container or which establishes a
    /// formatting context."
    ///
    /// Every box-generating value except plain `inline` qualifies.
    #[must_use]
    pub const fn is_block_container(self) -> bool {
        self.generates_box() && !matches!(self, Self::Inline)
    }
}

/// [HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
///
/// The user-agent default `display` for an element with the given local name.
#[must_use]
pub fn default_display_for_element(tag_name: &str) -> Display {
    // [§ 15.3.1 Hidden elements]
    // "The following elements must have their display set to none"
    const HIDDEN: &[&str] = &[
        "area", "base", "basefont", "datalist", "head", "link", "meta", "noembed", "noframes",
        "param", "rp", "script", "style", "template", "title",
    ];
    // [§ 15.3.3 Flow content]
    const BLOCK: &[&str] = &[
        "address", "article", "aside", "blockquote", "body", "center", "dd", "details",
        "dialog", "dir", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer",
        "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "html",
        "legend", "listing", "main", "menu", "nav", "ol", "p", "plaintext", "pre", "search",
        "section", "summary", "ul", "xmp",
    ];

    let tag = tag_name.to_ascii_lowercase();
    let tag = tag.as_str();
    if HIDDEN.contains(&tag) {
        Display::None
    } else if BLOCK.contains(&tag) {
        Display::Block
    } else {
        match tag {
            "li" => Display::ListItem,
            "table" => Display::Table,
            _ => Display::Inline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_keywords() {
        assert_eq!("inline-block".parse::<Display>(), Ok(Display::InlineBlock));
        assert_eq!("None".parse::<Display>(), Ok(Display::None));
        assert!("ruby".parse::<Display>().is_err());
    }

    #[test]
    fn test_block_container() {
        assert!(Display::Block.is_block_container());
        assert!(Display::InlineBlock.is_block_container());
        assert!(Display::Flex.is_block_container());
        assert!(!Display::Inline.is_block_container());
        assert!(!Display::Contents.is_block_container());
        assert!(!Display::None.is_block_container());
    }

    #[test]
    fn test_default_display() {
        assert_eq!(default_display_for_element("div"), Display::Block);
        assert_eq!(default_display_for_element("SPAN"), Display::Inline);
        assert_eq!(default_display_for_element("li"), Display::ListItem);
        assert_eq!(default_display_for_element("script"), Display::None);
    }
}
