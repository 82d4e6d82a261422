//! I define the [`LanguageTag`] type,
//! which satisfies the `LANGTAG` rule in [Turtle](https://www.w3.org/TR/turtle/#grammar-production-LANGTAG)
//! (without the leading `@`).
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::{Result, TermError};

lazy_static! {
    static ref LANG_TAG: Regex = Regex::new(r"^[A-Za-z]+(-[A-Za-z0-9]+)*$").unwrap();
}

/// A language tag.
///
/// Language tags are case-insensitive,
/// so they are normalized to lowercase on construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageTag(Arc<str>);

impl LanguageTag {
    /// Build a new [`LanguageTag`] from `tag`,
    /// returning an error if it is not a valid `LANGTAG`.
    pub fn new<T: AsRef<str>>(tag: T) -> Result<Self> {
        let tag = tag.as_ref();
        if LANG_TAG.is_match(tag) {
            Ok(Self::new_unchecked(tag))
        } else {
            Err(TermError::InvalidLanguageTag(tag.to_string()))
        }
    }

    /// Build a new [`LanguageTag`] from `tag`, without checking its validity.
    pub fn new_unchecked<T: AsRef<str>>(tag: T) -> Self {
        let tag = tag.as_ref();
        if tag.bytes().any(|b| b.is_ascii_uppercase()) {
            LanguageTag(Arc::from(tag.to_ascii_lowercase()))
        } else {
            LanguageTag(Arc::from(tag))
        }
    }

    /// Gets a reference to the underlying `str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `self` and `other` share the same storage.
    pub fn same_as(&self, other: &LanguageTag) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("en")]
    #[test_case("en-US")]
    #[test_case("zh-Hant-TW")]
    #[test_case("x-private-1"; "private use")]
    fn valid(tag: &str) {
        assert!(LanguageTag::new(tag).is_ok());
    }

    #[test_case(""; "empty")]
    #[test_case("en_US"; "underscore")]
    #[test_case("-en"; "leading dash")]
    #[test_case("en-"; "trailing dash")]
    #[test_case("42"; "digits first")]
    fn invalid(tag: &str) {
        assert_eq!(
            LanguageTag::new(tag),
            Err(TermError::InvalidLanguageTag(tag.to_string()))
        );
    }

    #[test]
    fn case_insensitive() -> Result<()> {
        assert_eq!(LanguageTag::new("EN-us")?, LanguageTag::new("en-US")?);
        assert_eq!(LanguageTag::new("EN-us")?.as_str(), "en-us");
        Ok(())
    }
}
