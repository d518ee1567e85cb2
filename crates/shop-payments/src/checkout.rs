//! Stripe Checkout Integration
//!
//! Implements the "Stripe Checkout (Hosted)" approach: the shop asks Stripe
//! for a session bound to one price and sends the browser to the returned URL.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
};

use crate::error::{PaymentError, Result};

/// Placeholder Stripe substitutes with the session id on the success URL
const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Creates hosted checkout sessions
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Start a checkout for a single unit of `price_id`
    async fn create_checkout_session(&self, price_id: &str) -> Result<CheckoutSession>;
}

/// Stripe client wrapper
pub struct StripeClient {
    client: Client,
    success_url: String,
    cancel_url: String,
}

impl StripeClient {
    /// Create a new Stripe client
    ///
    /// `app_url` is the public origin of the shop; customers come back to
    /// `<app_url>/success` after paying and to `<app_url>/` if they cancel.
    pub fn new(secret_key: &str, app_url: &str) -> Self {
        let app_url = app_url.trim_end_matches('/');
        Self {
            client: Client::new(secret_key),
            success_url: format!("{app_url}/success?session_id={SESSION_ID_PLACEHOLDER}"),
            cancel_url: format!("{app_url}/"),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))?;
        let app_url =
            std::env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        Ok(Self::new(&secret_key, &app_url))
    }

    /// URL Stripe redirects to after a successful payment
    pub fn success_url(&self) -> &str {
        &self.success_url
    }

    /// URL Stripe redirects to when the customer backs out
    pub fn cancel_url(&self) -> &str {
        &self.cancel_url
    }

    /// Get the underlying Stripe client
    pub const fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl CheckoutProvider for StripeClient {
    async fn create_checkout_session(&self, price_id: &str) -> Result<CheckoutSession> {
        let price_id = price_id.trim();
        if price_id.is_empty() {
            return Err(PaymentError::InvalidPriceId("price id is empty".into()));
        }

        let mut params = CreateCheckoutSession::new();
        params.mode = Some(CheckoutSessionMode::Payment);
        params.success_url = Some(self.success_url.as_str());
        params.cancel_url = Some(self.cancel_url.as_str());
        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price: Some(price_id.to_string()),
            quantity: Some(1),
            ..Default::default()
        }]);

        let session = StripeCheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let checkout_url = session
            .url
            .ok_or_else(|| PaymentError::Stripe("No checkout URL returned".into()))?;

        tracing::info!(session_id = %session.id, price_id, "Created checkout session");

        Ok(CheckoutSession {
            id: session.id.to_string(),
            checkout_url,
            price_id: price_id.to_string(),
        })
    }
}

/// Result of creating a checkout session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Stripe session ID
    pub id: String,

    /// URL to redirect user to
    pub checkout_url: String,

    /// Price being purchased
    pub price_id: String,
}
