//! Ignite Shop Web Island
//!
//! Leptos-based WASM bundle for the product page's "buy now" control.

mod api;
mod app;
mod checkout;
mod components;

pub use api::{parse_checkout_url, HttpCheckoutApi};
pub use app::{mount_buy_now, WindowBrowser};
pub use checkout::{
    complete_checkout, Browser, CheckoutApi, CheckoutFailure, CheckoutState, FAILURE_NOTICE,
};
pub use components::BuyNowButton;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_buy_now();
}
