//! API Client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::checkout::{CheckoutApi, CheckoutFailure};

const CHECKOUT_PATH: &str = "/api/checkout";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutRequest<'a> {
    price_id: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutResponse {
    checkout_url: String,
}

/// Calls the shop's checkout endpoint over HTTP
pub struct HttpCheckoutApi {
    endpoint: String,
}

impl HttpCheckoutApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint on the origin the page was served from
    pub fn from_window() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "http://localhost:3000".into());

        Self::new(format!("{origin}{CHECKOUT_PATH}"))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl CheckoutApi for HttpCheckoutApi {
    async fn create_checkout(&self, price_id: &str) -> Result<String, CheckoutFailure> {
        let response = reqwest::Client::new()
            .post(self.endpoint())
            .json(&CheckoutRequest { price_id })
            .send()
            .await
            .map_err(|e| CheckoutFailure::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutFailure::Network(e.to_string()))?;
        checkout_outcome(status, &body)
    }
}

/// Interpret the endpoint's answer: a 2xx status with a checkout URL succeeds
pub fn checkout_outcome(status: u16, body: &str) -> Result<String, CheckoutFailure> {
    if !(200..300).contains(&status) {
        return Err(CheckoutFailure::Status(status));
    }
    parse_checkout_url(body)
}

/// Extract `checkoutUrl` from the endpoint's response body
pub fn parse_checkout_url(body: &str) -> Result<String, CheckoutFailure> {
    let response: CheckoutResponse = serde_json::from_str(body)
        .map_err(|e| CheckoutFailure::MalformedResponse(e.to_string()))?;

    let url = response.checkout_url.trim();
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(url.to_string())
    } else {
        Err(CheckoutFailure::MalformedResponse(format!(
            "not an absolute URL: {url:?}"
        )))
    }
}
