//! Inline style parsing for the properties the polyfill reads.
//!
//! [CSS Style Attributes § 3](https://www.w3.org/TR/css-style-attr/#syntax)
//!
//! "The value of the style attribute must match the syntax of the contents
//! of a CSS declaration block."
//!
//! Declarations are parsed one at a time with `cssparser`. An invalid
//! declaration is dropped on its own and reported; the rest of the block
//! still applies.

use std::num::FpCategory;

use anchor_common::warning::warn_once;
use cssparser::{
    BasicParseError, Delimiter, ParseError, ParseErrorKind, Parser, ParserInput, Token,
};
use thiserror::Error;

use super::{AnchorFunction, AnchorName, AnchorSide, Display, ElementStyle, InsetValue, PositionType};

/// Why a single declaration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleParseError {
    /// The property is not one the polyfill reads.
    #[error("unknown property '{0}'")]
    UnknownProperty(String),
    /// A keyword that is not valid for the property.
    #[error("invalid value '{value}' for '{property}'")]
    InvalidKeyword {
        /// The property being parsed.
        property: &'static str,
        /// The rejected keyword.
        value: String,
    },
    /// An anchor name that is not a `<dashed-ident>`.
    #[error("'{0}' is not a <dashed-ident> anchor name")]
    InvalidAnchorName(String),
    /// An `anchor()` side keyword that does not exist.
    #[error("unknown anchor side '{0}'")]
    UnknownAnchorSide(String),
}

/// A rejected declaration and where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleIssue {
    /// 1-based line of the declaration.
    pub line: u32,
    /// 1-based column of the declaration.
    pub column: u32,
    /// Human-readable reason.
    pub message: String,
}

type DeclResult<'i, T> = Result<T, ParseError<'i, StyleParseError>>;

/// Parse the contents of a `style` attribute, warning about (and skipping)
/// every declaration that cannot be used.
#[must_use]
pub fn parse_inline_style(text: &str) -> ElementStyle {
    let (style, issues) = parse_inline_style_with_issues(text);
    for issue in issues {
        warn_once("css", &issue.message);
    }
    style
}

/// Parse the contents of a `style` attribute, returning the rejected
/// declarations instead of logging them.
#[must_use]
pub fn parse_inline_style_with_issues(text: &str) -> (ElementStyle, Vec<StyleIssue>) {
    let mut style = ElementStyle::default();
    let mut issues = Vec::new();
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);

    while !parser.is_exhausted() {
        if parser.try_parse(|p| p.expect_semicolon()).is_ok() {
            continue;
        }
        let start = parser.current_source_location();
        let result = parser.parse_until_after(Delimiter::Semicolon, |p| {
            parse_declaration(p, &mut style)
        });
        if let Err(error) = result {
            let message = match error.kind {
                ParseErrorKind::Custom(custom) => custom.to_string(),
                ParseErrorKind::Basic(basic) => format!("malformed declaration: {basic:?}"),
            };
            issues.push(StyleIssue {
                line: start.line + 1,
                column: start.column,
                message,
            });
        }
    }

    (style, issues)
}

fn parse_declaration<'i>(
    p: &mut Parser<'i, '_>,
    committed: &mut ElementStyle,
) -> DeclResult<'i, ()> {
    let name = p.expect_ident_cloned()?;
    p.expect_colon()?;

    // Nothing is committed until the whole declaration has parsed.
    let mut style = committed.clone();

    match name.to_ascii_lowercase().as_str() {
        // [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
        "display" => style.display = Some(parse_keyword::<Display>(p, "display")?),
        // [§ 2.1 'position'](https://www.w3.org/TR/css-position-3/#position-property)
        "position" => style.position = parse_keyword::<PositionType>(p, "position")?,
        // [§ 3.1 Box Insets](https://www.w3.org/TR/css-position-3/#inset-properties)
        "top" => style.top = parse_inset(p)?,
        "right" => style.right = parse_inset(p)?,
        "bottom" => style.bottom = parse_inset(p)?,
        "left" => style.left = parse_inset(p)?,
        // [§ 2.1 'anchor-name'](https://drafts.csswg.org/css-anchor-position-1/#name)
        //
        // "none | <dashed-ident>#"
        "anchor-name" => {
            style.anchor_names = if p.try_parse(|p| p.expect_ident_matching("none")).is_ok() {
                Vec::new()
            } else {
                p.parse_comma_separated(|p| parse_anchor_name(p))?
            };
        }
        // [§ 2.3 'position-anchor'](https://drafts.csswg.org/css-anchor-position-1/#position-anchor)
        //
        // "auto | <anchor-name>"
        "position-anchor" => {
            style.position_anchor = if p.try_parse(|p| p.expect_ident_matching("auto")).is_ok() {
                None
            } else {
                Some(parse_anchor_name(p)?)
            };
        }
        "transform" => style.has_transform = parse_not_none(p)?,
        "filter" => style.has_filter = parse_not_none(p)?,
        "perspective" => style.has_perspective = parse_not_none(p)?,
        // [CSS Will Change § 2](https://www.w3.org/TR/css-will-change-1/#will-change)
        //
        // "If any non-initial value of a property would cause the element to
        // generate a containing block for fixed positioned elements,
        // specifying that property in will-change must cause the element to
        // generate a containing block for fixed positioned elements."
        "will-change" => {
            let idents = p.parse_comma_separated(|p| -> DeclResult<'i, _> {
                Ok(p.expect_ident_cloned()?)
            })?;
            style.will_change_containing_block = idents.iter().any(|ident| {
                ["transform", "filter", "perspective"]
                    .iter()
                    .any(|prop| ident.eq_ignore_ascii_case(prop))
            });
        }
        // [CSS Containment § 3](https://www.w3.org/TR/css-contain-2/#contain-property)
        //
        // Layout and paint containment make the element "act as a containing
        // block for absolutely positioned and fixed positioned descendants."
        "contain" => {
            let mut contains = false;
            while let Ok(ident) = p.try_parse(|p| p.expect_ident_cloned()) {
                contains |= ["layout", "paint", "strict", "content"]
                    .iter()
                    .any(|kw| ident.eq_ignore_ascii_case(kw));
            }
            style.contains_layout_or_paint = contains;
        }
        other => {
            let location = p.current_source_location();
            return Err(location.new_custom_error(StyleParseError::UnknownProperty(other.to_string())));
        }
    }

    // Priority is irrelevant to a single inline block.
    let _ = p.try_parse(|p| -> Result<(), BasicParseError<'i>> {
        p.expect_delim('!')?;
        p.expect_ident_matching("important")
    });
    p.expect_exhausted()?;
    *committed = style;
    Ok(())
}

/// Parse a single keyword through the enum's `FromStr` implementation.
fn parse_keyword<'i, T: std::str::FromStr>(
    p: &mut Parser<'i, '_>,
    property: &'static str,
) -> DeclResult<'i, T> {
    let location = p.current_source_location();
    let ident = p.expect_ident_cloned()?;
    ident.parse::<T>().map_err(|_| {
        location.new_custom_error(StyleParseError::InvalidKeyword {
            property,
            value: ident.to_string(),
        })
    })
}

/// `none` yields `false`; any other value yields `true`. The value itself
/// is consumed without interpretation.
fn parse_not_none<'i>(p: &mut Parser<'i, '_>) -> DeclResult<'i, bool> {
    if p.try_parse(|p| p.expect_ident_matching("none")).is_ok() {
        return Ok(false);
    }
    let mut consumed = false;
    while p.next().is_ok() {
        consumed = true;
    }
    if consumed {
        Ok(true)
    } else {
        Err(p.new_error_for_next_token())
    }
}

/// `auto | <length> | anchor()`
fn parse_inset<'i>(p: &mut Parser<'i, '_>) -> DeclResult<'i, InsetValue> {
    if p.try_parse(|p| p.expect_ident_matching("auto")).is_ok() {
        return Ok(InsetValue::Auto);
    }
    if p.try_parse(|p| p.expect_function_matching("anchor")).is_ok() {
        return p
            .parse_nested_block(|p| parse_anchor_function(p))
            .map(InsetValue::Anchor);
    }
    parse_px(p).map(InsetValue::Px)
}

/// A `<length>` in `px`, or a unitless zero.
fn parse_px<'i>(p: &mut Parser<'i, '_>) -> DeclResult<'i, f32> {
    let location = p.current_source_location();
    match p.next()? {
        Token::Dimension { value, unit, .. } if unit.eq_ignore_ascii_case("px") => Ok(*value),
        Token::Number { value, .. } if value.classify() == FpCategory::Zero => Ok(0.0),
        token => Err(location.new_unexpected_token_error(token.clone())),
    }
}

fn parse_anchor_name<'i>(p: &mut Parser<'i, '_>) -> DeclResult<'i, AnchorName> {
    let location = p.current_source_location();
    let ident = p.expect_ident()?;
    AnchorName::new(ident).ok_or_else(|| {
        location.new_custom_error(StyleParseError::InvalidAnchorName(ident.to_string()))
    })
}

fn parse_anchor_side<'i>(p: &mut Parser<'i, '_>) -> DeclResult<'i, AnchorSide> {
    let location = p.current_source_location();
    match p.next()? {
        Token::Ident(ident) => AnchorSide::from_keyword(ident).ok_or_else(|| {
            location.new_custom_error(StyleParseError::UnknownAnchorSide(ident.to_string()))
        }),
        Token::Percentage { unit_value, .. } => Ok(AnchorSide::Percentage(*unit_value)),
        token => Err(location.new_unexpected_token_error(token.clone())),
    }
}

/// [§ 3.2.1 The anchor() function](https://drafts.csswg.org/css-anchor-position-1/#anchor-pos)
///
/// `anchor( <anchor-name>? && <anchor-side>, <length-percentage>? )`
///
/// Only pixel fallbacks are supported.
fn parse_anchor_function<'i>(p: &mut Parser<'i, '_>) -> DeclResult<'i, AnchorFunction> {
    let mut name = p.try_parse(|p| parse_anchor_name(p)).ok();
    let side = parse_anchor_side(p)?;
    if name.is_none() {
        name = p.try_parse(|p| parse_anchor_name(p)).ok();
    }
    let fallback = if p.try_parse(|p| p.expect_comma()).is_ok() {
        Some(parse_px(p)?)
    } else {
        None
    };
    p.expect_exhausted()?;
    Ok(AnchorFunction {
        name,
        side,
        fallback,
    })
}
