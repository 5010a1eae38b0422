//! Sitemap and robots.txt generation.
//!
//! The sitemap covers static routes plus every product and category slug
//! the backend reports. URLs are XML-escaped; `<lastmod>` comes from the
//! entity's `updated_at`.

use chrono::{DateTime, Utc};

use crate::backend::types::{Category, Product};

/// One `<url>` entry in the sitemap.
#[derive(Debug, Clone)]
pub struct SitemapEntry {
    /// Absolute URL.
    pub loc: String,
    /// Last modification date (`YYYY-MM-DD`), if known.
    pub lastmod: Option<String>,
    /// Suggested crawl frequency.
    pub changefreq: Option<&'static str>,
    /// Relative priority ("0.0" - "1.0").
    pub priority: Option<&'static str>,
}

impl SitemapEntry {
    fn new(loc: String) -> Self {
        Self {
            loc,
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }
}

/// Escape a string for inclusion in XML text content or attribute values.
#[must_use]
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn format_lastmod(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Build the full sitemap from catalog data.
///
/// `base_url` must not end with a slash.
#[must_use]
pub fn build_sitemap(base_url: &str, products: &[Product], categories: &[Category]) -> String {
    let mut entries = Vec::with_capacity(products.len() + categories.len() + 4);

    // Static routes first
    let mut home = SitemapEntry::new(base_url.to_string());
    home.changefreq = Some("daily");
    home.priority = Some("1.0");
    entries.push(home);

    for path in ["/products", "/categories", "/search"] {
        let mut entry = SitemapEntry::new(format!("{base_url}{path}"));
        entry.changefreq = Some("daily");
        entry.priority = Some("0.8");
        entries.push(entry);
    }

    for category in categories {
        let mut entry = SitemapEntry::new(format!("{base_url}/categories/{}", category.slug));
        entry.lastmod = Some(format_lastmod(category.updated_at));
        entry.changefreq = Some("weekly");
        entry.priority = Some("0.7");
        entries.push(entry);
    }

    for product in products {
        let mut entry = SitemapEntry::new(format!("{base_url}/products/{}", product.slug));
        entry.lastmod = Some(format_lastmod(product.updated_at));
        entry.changefreq = Some("weekly");
        entry.priority = Some("0.6");
        entries.push(entry);
    }

    render(&entries)
}

/// Render sitemap entries as a `urlset` document.
#[must_use]
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(entries.len() * 128 + 128);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&entry.loc)));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", xml_escape(lastmod)));
        }
        if let Some(changefreq) = entry.changefreq {
            xml.push_str(&format!("    <changefreq>{changefreq}</changefreq>\n"));
        }
        if let Some(priority) = entry.priority {
            xml.push_str(&format!("    <priority>{priority}</priority>\n"));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Render robots.txt, naming the sitemap and disallowing private routes.
#[must_use]
pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\n\
         Disallow: /account\n\
         Disallow: /cart\n\
         Disallow: /checkout\n\
         Disallow: /auth\n\
         Disallow: /api/\n\
         \n\
         Sitemap: {base_url}/sitemap.xml\n"
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use azlok_core::{CategoryId, CurrencyCode, ProductId, Slug};

    use super::*;

    fn product(slug: &str, updated: DateTime<Utc>) -> Product {
        Product {
            id: ProductId::new(1),
            slug: Slug::parse(slug).expect("valid slug"),
            title: "Test".to_string(),
            description: String::new(),
            price: Decimal::new(49_900, 2),
            currency: CurrencyCode::INR,
            compare_at_price: None,
            image_url: None,
            images: Vec::new(),
            category: None,
            in_stock: true,
            stock_quantity: 5,
            updated_at: updated,
        }
    }

    fn category(slug: &str, updated: DateTime<Utc>) -> Category {
        Category {
            id: CategoryId::new(1),
            slug: Slug::parse(slug).expect("valid slug"),
            name: "Test".to_string(),
            description: None,
            product_count: 0,
            updated_at: updated,
        }
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(
            xml_escape("a&b<c>d\"e'f"),
            "a&amp;b&lt;c&gt;d&quot;e&apos;f"
        );
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn test_build_sitemap_contains_all_urls() {
        let updated = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).single().expect("valid ts");
        let products = vec![product("organic-wild-honey-500g", updated)];
        let categories = vec![category("pantry", updated)];

        let xml = build_sitemap("https://azlok.com", &products, &categories);

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<loc>https://azlok.com</loc>"));
        assert!(xml.contains("<loc>https://azlok.com/products</loc>"));
        assert!(xml.contains("<loc>https://azlok.com/products/organic-wild-honey-500g</loc>"));
        assert!(xml.contains("<loc>https://azlok.com/categories/pantry</loc>"));
        assert!(xml.contains("<lastmod>2026-03-02</lastmod>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_build_sitemap_empty_catalog_still_lists_static_routes() {
        let xml = build_sitemap("https://azlok.com", &[], &[]);
        assert!(xml.contains("<loc>https://azlok.com/categories</loc>"));
        assert_eq!(xml.matches("<url>").count(), 4);
    }

    #[test]
    fn test_robots_txt() {
        let robots = robots_txt("https://azlok.com");
        assert!(robots.contains("User-agent: *"));
        assert!(robots.contains("Disallow: /account"));
        assert!(robots.contains("Disallow: /api/"));
        assert!(robots.contains("Sitemap: https://azlok.com/sitemap.xml"));
    }
}
