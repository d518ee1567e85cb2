//! Page Rendering
//!
//! Builds the static product markup. The buy-now control is rendered
//! disabled; the WASM bundle mounts the live control into `#buy-now`.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use shop_payments::Product;

use crate::pages::FallbackReason;

/// Product image size on the page
pub const IMAGE_WIDTH: u32 = 520;
pub const IMAGE_HEIGHT: u32 = 480;

/// Seconds before the loading placeholder reloads itself
pub const FALLBACK_REFRESH_SECS: u64 = 5;

const BUY_NOW_LABEL: &str = "Comprar agora";
const WASM_ENTRY: &str = "/pkg/shop_web.js";

/// Renders product and fallback pages for one shop
#[derive(Clone, Debug)]
pub struct PageRenderer {
    shop_name: String,
}

impl PageRenderer {
    pub fn new(shop_name: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
        }
    }

    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }

    /// `"<product name> | <shop name>"`
    pub fn title(&self, heading: &str) -> String {
        format!("{heading} | {}", self.shop_name)
    }

    /// Full product page
    pub fn product_page(&self, product: &Product) -> String {
        let body = format!(
            r#"<main class="product" data-state="ready" data-product-id="{id}">
  <div class="image-container">
    <img src="{image}" width="{IMAGE_WIDTH}" height="{IMAGE_HEIGHT}" alt="{alt}">
  </div>
  <div class="product-details">
    <h1>{name}</h1>
    <span class="price">{price}</span>
    <p>{description}</p>
    <div id="buy-now" data-price-id="{price_id}">
      <button type="button" disabled>{BUY_NOW_LABEL}</button>
    </div>
  </div>
</main>
<script type="module">import init from "{WASM_ENTRY}"; init();</script>"#,
            id = attr(product.id()),
            image = attr(product.image_url()),
            alt = attr(product.name()),
            name = text(product.name()),
            price = text(product.price()),
            description = text(product.description()),
            price_id = attr(product.default_price_id()),
        );

        Self::document(&self.title(product.name()), "", &body)
    }

    /// Placeholder shown when no generated page can be served
    pub fn fallback_page(&self, reason: FallbackReason) -> String {
        match reason {
            FallbackReason::Unavailable => {
                let head =
                    format!(r#"<meta http-equiv="refresh" content="{FALLBACK_REFRESH_SECS}">"#);
                let body = r#"<main class="product" data-state="fallback" data-reason="unavailable">
  <p>loading...</p>
</main>"#;
                Self::document(self.shop_name(), &head, body)
            }
            FallbackReason::NotFound => {
                let body = r#"<main class="product" data-state="fallback" data-reason="not-found">
  <p>Produto não encontrado.</p>
</main>"#;
                Self::document(&self.title("Produto não encontrado"), "", body)
            }
        }
    }

    fn document(title: &str, extra_head: &str, body: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{extra_head}
</head>
<body>
{body}
</body>
</html>
"#,
            title = text(title),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_payments::{sample_record, CatalogRecord};

    fn product(record: CatalogRecord) -> Product {
        Product::from_record(record).unwrap()
    }

    #[test]
    fn test_product_page_contents() {
        let renderer = PageRenderer::new("Ignite Shop");
        let html = renderer.product_page(&product(sample_record("prod_1", "Camiseta X", 9990)));

        assert!(html.contains("<title>Camiseta X | Ignite Shop</title>"));
        assert!(html.contains(r#"width="520" height="480""#));
        assert!(html.contains("R$\u{a0}99,90"));
        assert!(html.contains(r#"data-price-id="price_1""#));
        assert!(html.contains("Comprar agora"));
        assert_eq!(html.matches("<img").count(), 1);
    }

    #[test]
    fn test_escapes_catalog_text() {
        let mut record = sample_record("prod_1", "Caneca <b>&</b>", 100);
        record.description = Some(r#"Diz "olá" <script>"#.into());
        let html = PageRenderer::new("Ignite Shop").product_page(&product(record));

        assert!(!html.contains("<b>&</b>"));
        assert!(html.contains("Caneca &lt;b&gt;&amp;&lt;/b&gt;"));
        assert!(!html.contains("\"olá\" <script>"));
    }

    #[test]
    fn test_loading_placeholder() {
        let html = PageRenderer::new("Ignite Shop").fallback_page(FallbackReason::Unavailable);
        assert!(html.contains("loading..."));
        assert!(html.contains(r#"http-equiv="refresh""#));
        assert!(!html.contains("Comprar agora"));
    }

    #[test]
    fn test_not_found_placeholder() {
        let html = PageRenderer::new("Ignite Shop").fallback_page(FallbackReason::NotFound);
        assert!(html.contains(r#"data-reason="not-found""#));
        assert!(html.contains("<title>Produto não encontrado | Ignite Shop</title>"));
        assert!(!html.contains("refresh"));
    }
}
