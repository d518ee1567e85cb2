//! # shop-payments
//!
//! Catalog lookup and hosted checkout for the Ignite Shop product page.
//!
//! Stripe owns the catalog, the prices, and the checkout flow. This crate
//! only reads one product at a time and asks Stripe for a checkout URL.
//!
//! ```text
//! ┌─────────────┐  retrieve(prod, expand=default_price)  ┌──────────────┐
//! │ Page render │───────────────────────────────────────▶│ Stripe       │
//! └─────────────┘                                        │ Catalog      │
//! ┌─────────────┐  checkout.sessions.create(price)       ├──────────────┤
//! │ Buy now     │───────────────────────────────────────▶│ Hosted       │
//! └─────────────┘◀────────────── checkout URL ───────────│ Checkout     │
//!                                                        └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shop_payments::{Catalog, CheckoutProvider, StripeClient};
//!
//! let stripe = StripeClient::new("sk_test_xxx", "https://shop.example.com");
//!
//! let product = stripe.fetch_product("prod_PWIWALdwPZE9QO").await?;
//! println!("{} - {}", product.name(), product.price());
//!
//! let session = stripe.create_checkout_session(product.default_price_id()).await?;
//! // Redirect user to: session.checkout_url
//! ```

mod catalog;
mod checkout;
mod error;
mod mock;
mod price;
mod product;

pub use catalog::Catalog;
pub use checkout::{CheckoutProvider, CheckoutSession, StripeClient};
pub use error::{PaymentError, Result};
pub use mock::{sample_record, MockCatalog, MockCheckout};
pub use price::{format_brl, to_major_units, CURRENCY, CURRENCY_SYMBOL};
pub use product::{CatalogRecord, PriceRecord, Product};
