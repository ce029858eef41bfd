//! CSS positioning schemes.
//!
//! [CSS Positioned Layout Module Level 3 § 2](https://www.w3.org/TR/css-position-3/#position-property)

use strum_macros::{Display, EnumString, IntoStaticStr};

/// [§ 2.1 Choosing A Positioning Scheme: the position property](https://www.w3.org/TR/css-position-3/#position-property)
///
/// "The position property determines which of the positioning schemes is
/// used to calculate the position of a box."
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PositionType {
    /// "The box is not a positioned box, and is laid out according to the
    /// rules of its parent formatting context."
    #[default]
    Static,
    /// "The box is laid out as for static, then offset from the resulting
    /// position."
    Relative,
    /// "The box is laid out as for static, then offset from the resulting
    /// position, with the offset computed relative to the nearest scrollport."
    Sticky,
    /// "The box is taken out of flow such that it has no impact on the size or
    /// position of its siblings and ancestors."
    Absolute,
    /// "Same as absolute, except the box is positioned and sized relative to
    /// a fixed positioning containing block."
    Fixed,
}

impl PositionType {
    /// [§ 2](https://www.w3.org/TR/css-position-3/#positioned-box)
    ///
    /// "An element whose computed position value is anything other than
    /// static is called a positioned box."
    #[must_use]
    pub const fn is_positioned(self) -> bool {
        !matches!(self, Self::Static)
    }

    /// [§ 2](https://www.w3.org/TR/css-position-3/#absolute-position)
    ///
    /// "absolutely positioned box: a box whose position value is absolute or
    /// fixed."
    #[must_use]
    pub const fn is_absolutely_positioned(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position_keywords() {
        assert_eq!("absolute".parse::<PositionType>(), Ok(PositionType::Absolute));
        assert_eq!("STICKY".parse::<PositionType>(), Ok(PositionType::Sticky));
        assert!("float".parse::<PositionType>().is_err());
        assert_eq!(PositionType::Fixed.to_string(), "fixed");
    }

    #[test]
    fn test_absolutely_positioned_is_absolute_or_fixed() {
        assert!(PositionType::Absolute.is_absolutely_positioned());
        assert!(PositionType::Fixed.is_absolutely_positioned());
        assert!(!PositionType::Relative.is_absolutely_positioned());
        assert!(!PositionType::Sticky.is_absolutely_positioned());
        assert!(!PositionType::Static.is_absolutely_positioned());
        assert!(!PositionType::Static.is_positioned());
        assert!(PositionType::Sticky.is_positioned());
    }
}
