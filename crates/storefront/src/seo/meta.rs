//! Per-page meta tags (title, description, canonical, Open Graph).
//!
//! Template-facing fields are plain strings; an empty string means the tag
//! is omitted. Keeping Options out of templates keeps them trivial.

use crate::backend::types::{Category, Product};

/// Site name appended to every page title.
const SITE_NAME: &str = "Azlok";

/// Maximum meta description length before truncation.
const MAX_DESCRIPTION_LENGTH: usize = 160;

/// Meta tags rendered in the page `<head>`.
#[derive(Debug, Clone)]
pub struct PageMeta {
    /// Full `<title>` content, site name included.
    pub title: String,
    /// Meta description (truncated to 160 chars).
    pub description: String,
    /// Canonical absolute URL.
    pub canonical_url: String,
    /// Open Graph type ("website" or "product").
    pub og_type: String,
    /// Open Graph image URL; empty when the page has none.
    pub og_image: String,
}

impl PageMeta {
    /// Generic page meta.
    #[must_use]
    pub fn page(title: &str, description: &str, canonical_url: String) -> Self {
        Self {
            title: format!("{title} | {SITE_NAME}"),
            description: truncate_description(description),
            canonical_url,
            og_type: "website".to_string(),
            og_image: String::new(),
        }
    }

    /// Home page meta; the title leads with the site name.
    #[must_use]
    pub fn home(base_url: &str) -> Self {
        Self {
            title: format!("{SITE_NAME} - Online Marketplace for Quality Products"),
            description: truncate_description(
                "Shop electronics, fashion, groceries and more from trusted sellers \
                 across India. Secure payments, fast delivery.",
            ),
            canonical_url: base_url.to_string(),
            og_type: "website".to_string(),
            og_image: String::new(),
        }
    }

    /// Product page meta built from catalog data.
    #[must_use]
    pub fn product(product: &Product, base_url: &str) -> Self {
        Self {
            title: format!("{} | {SITE_NAME}", product.title),
            description: truncate_description(&product.description),
            canonical_url: format!("{base_url}/products/{}", product.slug),
            og_type: "product".to_string(),
            og_image: product.image_url.clone().unwrap_or_default(),
        }
    }

    /// Category page meta built from catalog data.
    #[must_use]
    pub fn category(category: &Category, base_url: &str) -> Self {
        let description = category
            .description
            .clone()
            .unwrap_or_else(|| format!("Browse {} on {SITE_NAME}.", category.name));
        Self {
            title: format!("{} | {SITE_NAME}", category.name),
            description: truncate_description(&description),
            canonical_url: format!("{base_url}/categories/{}", category.slug),
            og_type: "website".to_string(),
            og_image: String::new(),
        }
    }
}

/// Truncate a description at a char boundary, appending an ellipsis.
fn truncate_description(s: &str) -> String {
    let s = s.trim();
    if s.chars().count() <= MAX_DESCRIPTION_LENGTH {
        return s.to_string();
    }
    let truncated: String = s.chars().take(MAX_DESCRIPTION_LENGTH - 1).collect();
    format!("{}\u{2026}", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_meta_appends_site_name() {
        let meta = PageMeta::page("Cart", "Your cart", "https://azlok.com/cart".to_string());
        assert_eq!(meta.title, "Cart | Azlok");
        assert_eq!(meta.og_type, "website");
        assert!(meta.og_image.is_empty());
    }

    #[test]
    fn test_truncate_description_short_passthrough() {
        assert_eq!(truncate_description("short"), "short");
    }

    #[test]
    fn test_truncate_description_long() {
        let long = "x".repeat(400);
        let truncated = truncate_description(&long);
        assert!(truncated.chars().count() <= MAX_DESCRIPTION_LENGTH);
        assert!(truncated.ends_with('\u{2026}'));
    }

    #[test]
    fn test_truncate_description_multibyte_safe() {
        let long = "\u{20b9}".repeat(300);
        let truncated = truncate_description(&long);
        assert!(truncated.chars().count() <= MAX_DESCRIPTION_LENGTH);
    }
}
