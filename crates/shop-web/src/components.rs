//! UI Components

use leptos::prelude::*;

use crate::api::HttpCheckoutApi;
use crate::app::WindowBrowser;
use crate::checkout::{complete_checkout, CheckoutState};

/// The "buy now" control for one price
#[component]
pub fn BuyNowButton(price_id: String) -> impl IntoView {
    let (state, set_state) = signal(CheckoutState::Idle);

    let buy = move |_| {
        if !set_state.try_update(CheckoutState::start).unwrap_or(false) {
            return;
        }

        let price_id = price_id.clone();
        leptos::task::spawn_local(async move {
            let api = HttpCheckoutApi::from_window();
            let next = complete_checkout(&api, &WindowBrowser, &price_id).await;
            set_state.set(next);
        });
    };

    view! {
        <button
            type="button"
            on:click=buy
            disabled=move || !state.get().is_enabled()
            aria-busy=move || (state.get() == CheckoutState::Pending).to_string()
        >
            "Comprar agora"
        </button>
    }
}
