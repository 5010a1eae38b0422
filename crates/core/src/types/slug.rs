//! URL slug type for products and categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("slug may only contain lowercase letters, digits, and hyphens")]
    InvalidCharacter,
    /// The input starts or ends with a hyphen.
    #[error("slug cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A URL path segment identifying a product or category.
///
/// Slugs come from the backend catalog and also appear in user-supplied
/// URLs, so they are validated before being interpolated into backend API
/// paths or sitemap entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 128;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, contains a
    /// character outside `[a-z0-9-]`, or starts/ends with a hyphen.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(SlugError::InvalidCharacter);
        }

        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let slug = Slug::parse("organic-wild-honey-500g").expect("valid slug");
        assert_eq!(slug.as_str(), "organic-wild-honey-500g");
    }

    #[test]
    fn test_parse_rejects_uppercase() {
        assert!(matches!(
            Slug::parse("Organic-Honey"),
            Err(SlugError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_parse_rejects_path_traversal() {
        assert!(Slug::parse("../etc/passwd").is_err());
        assert!(Slug::parse("a/b").is_err());
    }

    #[test]
    fn test_parse_rejects_edge_hyphen() {
        assert!(matches!(Slug::parse("-honey"), Err(SlugError::EdgeHyphen)));
        assert!(matches!(Slug::parse("honey-"), Err(SlugError::EdgeHyphen)));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Slug::parse(""), Err(SlugError::Empty)));
    }
}
