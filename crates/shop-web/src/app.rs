//! Island Mounting
//!
//! The product page is rendered by the server. This module finds the
//! `#buy-now` placeholder and replaces it with the live control.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::checkout::Browser;
use crate::components::BuyNowButton;

/// Id of the element the control is mounted into
pub const MOUNT_ID: &str = "buy-now";

/// Attribute carrying the product's default price id
pub const PRICE_ATTRIBUTE: &str = "data-price-id";

/// The current browser window
pub struct WindowBrowser;

impl Browser for WindowBrowser {
    fn redirect(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

/// Mount the buy-now control, if this page has one
pub fn mount_buy_now() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(element) = document.get_element_by_id(MOUNT_ID) else {
        return;
    };
    let Some(price_id) = element
        .get_attribute(PRICE_ATTRIBUTE)
        .filter(|id| !id.trim().is_empty())
    else {
        return;
    };
    let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
        return;
    };

    element.set_inner_html("");
    leptos::mount::mount_to(element, move || view! { <BuyNowButton price_id=price_id /> })
        .forget();
}
