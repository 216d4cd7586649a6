#![forbid(unsafe_code)]

//! Abstract sheet sizes and the tokens they parse from.
//!
//! The embedding layer describes each resting height of a sheet with a
//! [`SizeSpec`]. Specs arrive as loosely typed prop values, so they parse
//! from the same tokens the declarative wrapper accepts:
//!
//! | Token | Spec |
//! |-------|------|
//! | `"auto"` | [`SizeSpec::Auto`] |
//! | `480`, `"480"`, `480.5` | [`SizeSpec::Fixed`] |
//! | `"60%"` | [`SizeSpec::Percent`] |
//! | `"small"`, `"medium"`, `"large"` | [`SizeSpec::Named`] |
//!
//! # Invariants
//!
//! - Fixed heights are finite and non-negative.
//! - Percentages are finite and within `0..=100`.
//! - `Display` output parses back to an equal spec.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SheetError;

/// Named size tokens and the fraction of the available height they stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamedSize {
    /// A quarter of the available height.
    Small,
    /// Half of the available height.
    Medium,
    /// The full available height.
    Large,
}

impl NamedSize {
    /// All named sizes in ascending order.
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Fraction of the available height this token maps to when the
    /// platform has no native detent for it.
    pub const fn fraction(self) -> f64 {
        match self {
            Self::Small => 0.25,
            Self::Medium => 0.5,
            Self::Large => 1.0,
        }
    }

    /// The prop token for this size.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.as_str() == token)
    }
}

impl fmt::Display for NamedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Named sizes the platform can present with its own built-in detents.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NativeDetents: u8 {
        /// Platform has a native small detent.
        const SMALL = 0b001;
        /// Platform has a native medium detent.
        const MEDIUM = 0b010;
        /// Platform has a native large detent.
        const LARGE = 0b100;
    }
}

impl NativeDetents {
    /// Whether the platform has a built-in detent for `size`.
    pub const fn supports(self, size: NamedSize) -> bool {
        let flag = match size {
            NamedSize::Small => Self::SMALL,
            NamedSize::Medium => Self::MEDIUM,
            NamedSize::Large => Self::LARGE,
        };
        self.contains(flag)
    }
}

/// Abstract description of one resting height of a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeSpec {
    /// Fit the content plus footer.
    Auto,
    /// A fixed height in points.
    Fixed(f64),
    /// A percentage (`0..=100`) of the available height.
    Percent(f64),
    /// A named token.
    Named(NamedSize),
}

impl SizeSpec {
    /// Build a fixed-height spec, rejecting negative or non-finite values.
    pub fn fixed(height: f64) -> Result<Self, SheetError> {
        let spec = Self::Fixed(height);
        spec.validate()?;
        Ok(spec)
    }

    /// Build a percentage spec, rejecting values outside `0..=100`.
    pub fn percent(percent: f64) -> Result<Self, SheetError> {
        let spec = Self::Percent(percent);
        spec.validate()?;
        Ok(spec)
    }

    /// Check the numeric payload of this spec.
    ///
    /// # Errors
    ///
    /// [`SheetError::Configuration`] for negative or non-finite heights and
    /// for percentages outside `0..=100`.
    pub fn validate(&self) -> Result<(), SheetError> {
        match *self {
            Self::Fixed(height) if !height.is_finite() || height < 0.0 => Err(
                SheetError::config(format!("fixed size must be a non-negative number, got {height}")),
            ),
            Self::Percent(percent) if !percent.is_finite() || !(0.0..=100.0).contains(&percent) => {
                Err(SheetError::config(format!(
                    "percentage size must be within 0..=100, got {percent}"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// The size list used when the embedding layer does not provide one.
pub fn default_sizes() -> Vec<SizeSpec> {
    vec![
        SizeSpec::Named(NamedSize::Medium),
        SizeSpec::Named(NamedSize::Large),
    ]
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(height) => write!(f, "{height}"),
            Self::Percent(percent) => write!(f, "{percent}%"),
            Self::Named(size) => f.write_str(size.as_str()),
        }
    }
}

impl FromStr for SizeSpec {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token == "auto" {
            return Ok(Self::Auto);
        }
        if let Some(size) = NamedSize::from_token(token) {
            return Ok(Self::Named(size));
        }
        if let Some(number) = token.strip_suffix('%') {
            let percent = number
                .trim()
                .parse::<f64>()
                .map_err(|_| SheetError::config(format!("invalid percentage size {s:?}")))?;
            return Self::percent(percent);
        }
        let height = token
            .parse::<f64>()
            .map_err(|_| SheetError::config(format!("unknown size token {s:?}")))?;
        Self::fixed(height)
    }
}

impl Serialize for SizeSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Fixed(height) => serializer.serialize_f64(*height),
            other => serializer.collect_str(other),
        }
    }
}

struct SizeSpecVisitor;

impl Visitor<'_> for SizeSpecVisitor {
    type Value = SizeSpec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a height number, a percentage string, \"auto\", or a size name")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        SizeSpec::fixed(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        self.visit_f64(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        self.visit_f64(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for SizeSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SizeSpecVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_every_token_kind() {
        assert_eq!("auto".parse::<SizeSpec>(), Ok(SizeSpec::Auto));
        assert_eq!("480".parse::<SizeSpec>(), Ok(SizeSpec::Fixed(480.0)));
        assert_eq!(" 60% ".parse::<SizeSpec>(), Ok(SizeSpec::Percent(60.0)));
        assert_eq!(
            "small".parse::<SizeSpec>(),
            Ok(SizeSpec::Named(NamedSize::Small))
        );
        assert_eq!(
            "large".parse::<SizeSpec>(),
            Ok(SizeSpec::Named(NamedSize::Large))
        );
    }

    #[test]
    fn rejects_bad_tokens() {
        assert!(matches!(
            "huge".parse::<SizeSpec>(),
            Err(SheetError::Configuration(_))
        ));
        assert!("120%".parse::<SizeSpec>().is_err());
        assert!("-5".parse::<SizeSpec>().is_err());
        assert!("%".parse::<SizeSpec>().is_err());
        assert!("NaN".parse::<SizeSpec>().is_err());
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let sizes: Vec<SizeSpec> = serde_json::from_str(r#"["auto", 320, "45%", "medium"]"#)
            .expect("valid size list");
        assert_eq!(
            sizes,
            vec![
                SizeSpec::Auto,
                SizeSpec::Fixed(320.0),
                SizeSpec::Percent(45.0),
                SizeSpec::Named(NamedSize::Medium),
            ]
        );
    }

    #[test]
    fn deserialize_error_mentions_token() {
        let err = serde_json::from_str::<SizeSpec>(r#""gigantic""#).unwrap_err();
        assert!(err.to_string().contains("gigantic"), "{err}");
    }

    #[test]
    fn serializes_back_to_tokens() {
        let json = serde_json::to_string(&vec![
            SizeSpec::Auto,
            SizeSpec::Fixed(200.5),
            SizeSpec::Percent(30.0),
            SizeSpec::Named(NamedSize::Small),
        ])
        .expect("serializable");
        assert_eq!(json, r#"["auto",200.5,"30%","small"]"#);
    }

    #[test]
    fn named_fractions() {
        assert_eq!(NamedSize::Small.fraction(), 0.25);
        assert_eq!(NamedSize::Medium.fraction(), 0.5);
        assert_eq!(NamedSize::Large.fraction(), 1.0);
    }

    #[test]
    fn native_detent_flags() {
        let ios15 = NativeDetents::MEDIUM | NativeDetents::LARGE;
        assert!(!ios15.supports(NamedSize::Small));
        assert!(ios15.supports(NamedSize::Medium));
        assert!(ios15.supports(NamedSize::Large));
        assert!(!NativeDetents::empty().supports(NamedSize::Large));
    }

    #[test]
    fn default_sizes_are_medium_then_large() {
        assert_eq!(
            default_sizes(),
            vec![
                SizeSpec::Named(NamedSize::Medium),
                SizeSpec::Named(NamedSize::Large)
            ]
        );
    }

    proptest! {
        #[test]
        fn percent_display_parses_back(p in 0.0f64..=100.0) {
            let spec = SizeSpec::percent(p).unwrap();
            let parsed: SizeSpec = spec.to_string().parse().unwrap();
            prop_assert_eq!(parsed, spec);
        }

        #[test]
        fn fixed_display_parses_back(h in 0.0f64..10_000.0) {
            let spec = SizeSpec::fixed(h).unwrap();
            let parsed: SizeSpec = spec.to_string().parse().unwrap();
            prop_assert_eq!(parsed, spec);
        }
    }
}
