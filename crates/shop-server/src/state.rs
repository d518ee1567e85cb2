//! Application State

use std::sync::Arc;

use shop_payments::CheckoutProvider;

use crate::pages::ProductPages;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Generated product pages
    pub pages: Arc<ProductPages>,

    /// Checkout provider (optional - None if Stripe is not configured)
    pub checkout: Option<Arc<dyn CheckoutProvider>>,
}
