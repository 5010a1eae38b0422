//! JSON-LD structured data blocks.
//!
//! Built as `serde_json` values and embedded in pages as
//! `application/ld+json` scripts. Shapes follow schema.org's `Product`,
//! `BreadcrumbList`, `Organization`, and `WebSite` types.

use serde_json::{Value, json};

use crate::backend::types::Product;

/// Schema.org context used by every block.
const CONTEXT: &str = "https://schema.org";

/// `Product` structured data with an `Offer` for the product page.
#[must_use]
pub fn product(product: &Product, base_url: &str) -> Value {
    let url = format!("{base_url}/products/{}", product.slug);
    let availability = if product.in_stock {
        "https://schema.org/InStock"
    } else {
        "https://schema.org/OutOfStock"
    };

    let mut value = json!({
        "@context": CONTEXT,
        "@type": "Product",
        "name": product.title,
        "description": product.description,
        "url": url,
        "offers": {
            "@type": "Offer",
            "url": url,
            "price": product.price.to_string(),
            "priceCurrency": product.currency.code(),
            "availability": availability,
        },
    });

    if let Some(image_url) = &product.image_url
        && let Some(obj) = value.as_object_mut()
    {
        obj.insert("image".to_string(), json!([image_url]));
    }

    value
}

/// `BreadcrumbList` structured data from (name, absolute URL) pairs.
#[must_use]
pub fn breadcrumbs(items: &[(String, String)]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, (name, url))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": url,
            })
        })
        .collect();

    json!({
        "@context": CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

/// `Organization` structured data for the home page.
#[must_use]
pub fn organization(base_url: &str) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "Organization",
        "name": "Azlok",
        "url": base_url,
        "logo": format!("{base_url}/static/img/logo.png"),
    })
}

/// `WebSite` structured data with a `SearchAction` for the home page.
#[must_use]
pub fn website(base_url: &str) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "WebSite",
        "name": "Azlok",
        "url": base_url,
        "potentialAction": {
            "@type": "SearchAction",
            "target": format!("{base_url}/search?q={{search_term_string}}"),
            "query-input": "required name=search_term_string",
        },
    })
}

/// Serialize a block for embedding in a template.
///
/// Falls back to an empty object on serialization failure, which cannot
/// happen for the shapes above but keeps templates infallible.
#[must_use]
pub fn to_script_content(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use azlok_core::{CurrencyCode, ProductId, Slug};

    use super::*;

    fn sample_product(in_stock: bool) -> Product {
        Product {
            id: ProductId::new(41),
            slug: Slug::parse("organic-wild-honey-500g").expect("valid slug"),
            title: "Organic Wild Honey 500g".to_string(),
            description: "Raw honey from the Nilgiris.".to_string(),
            price: Decimal::new(49_900, 2),
            currency: CurrencyCode::INR,
            compare_at_price: None,
            image_url: Some("https://cdn.azlok.com/p/41/main.jpg".to_string()),
            images: Vec::new(),
            category: None,
            in_stock,
            stock_quantity: 112,
            updated_at: Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).single().expect("valid ts"),
        }
    }

    #[test]
    fn test_product_block() {
        let value = product(&sample_product(true), "https://azlok.com");

        assert_eq!(value["@type"], "Product");
        assert_eq!(value["name"], "Organic Wild Honey 500g");
        assert_eq!(value["offers"]["price"], "499.00");
        assert_eq!(value["offers"]["priceCurrency"], "INR");
        assert_eq!(value["offers"]["availability"], "https://schema.org/InStock");
        assert_eq!(value["image"][0], "https://cdn.azlok.com/p/41/main.jpg");
    }

    #[test]
    fn test_product_block_out_of_stock() {
        let value = product(&sample_product(false), "https://azlok.com");
        assert_eq!(
            value["offers"]["availability"],
            "https://schema.org/OutOfStock"
        );
    }

    #[test]
    fn test_breadcrumbs_block() {
        let value = breadcrumbs(&[
            ("Home".to_string(), "https://azlok.com".to_string()),
            ("Pantry".to_string(), "https://azlok.com/categories/pantry".to_string()),
        ]);

        assert_eq!(value["@type"], "BreadcrumbList");
        assert_eq!(value["itemListElement"][0]["position"], 1);
        assert_eq!(value["itemListElement"][1]["name"], "Pantry");
    }

    #[test]
    fn test_website_block_has_search_action() {
        let value = website("https://azlok.com");
        assert_eq!(value["@type"], "WebSite");
        assert_eq!(
            value["potentialAction"]["target"],
            "https://azlok.com/search?q={search_term_string}"
        );
    }

    #[test]
    fn test_to_script_content_is_compact_json() {
        let value = organization("https://azlok.com");
        let script = to_script_content(&value);
        assert!(script.starts_with('{'));
        assert!(script.contains("\"@type\":\"Organization\""));
    }
}
