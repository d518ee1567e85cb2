//! HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use shop_payments::PaymentError;

use crate::pages::{FallbackReason, PageView};
use crate::render::FALLBACK_REFRESH_SECS;
use crate::state::AppState;

/// Header naming where a product page came from (`HIT`, `STALE`, `MISS`)
pub const CACHE_STATUS_HEADER: &str = "x-shop-cache";

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
    pub cached_pages: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub price_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: state.checkout.is_some(),
        cached_pages: state.pages.len(),
    })
}

/// Product page
pub async fn product_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.pages.serve(&id).await {
        PageView::Ready { page, cache } => {
            tracing::debug!(
                product_id = page.product.id(),
                cache = cache.as_str(),
                "Serving product page"
            );

            let cache_control = format!(
                "s-maxage={}, stale-while-revalidate",
                state.pages.revalidate_after().as_secs()
            );
            let last_modified = page
                .generated_at
                .format("%a, %d %b %Y %H:%M:%S GMT")
                .to_string();

            let mut response = Html(page.html.clone()).into_response();
            let headers = response.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&cache_control) {
                headers.insert(header::CACHE_CONTROL, value);
            }
            if let Ok(value) = HeaderValue::from_str(&last_modified) {
                headers.insert(header::LAST_MODIFIED, value);
            }
            headers.insert(CACHE_STATUS_HEADER, HeaderValue::from_static(cache.as_str()));
            response
        }
        PageView::Fallback(reason) => {
            let html = state.pages.renderer().fallback_page(reason);
            let mut response = Html(html).into_response();
            *response.status_mut() = match reason {
                FallbackReason::NotFound => StatusCode::NOT_FOUND,
                FallbackReason::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            };

            let headers = response.headers_mut();
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
            if reason == FallbackReason::Unavailable {
                headers.insert(header::RETRY_AFTER, HeaderValue::from(FALLBACK_REFRESH_SECS));
            }
            response
        }
    }
}

/// Create Stripe checkout session
pub async fn create_checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError> {
    let checkout = state.checkout.as_ref().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Payments not configured",
            "PAYMENTS_DISABLED",
        )
    })?;

    let Json(payload) =
        payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text(), "INVALID_BODY"))?;

    let price_id = payload
        .price_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Price not found", "MISSING_PRICE"))?;

    let session = checkout
        .create_checkout_session(&price_id)
        .await
        .map_err(|e| {
            tracing::error!(price_id = %price_id, error = %e, "Checkout error");
            let status = match e {
                PaymentError::InvalidPriceId(_) => StatusCode::BAD_REQUEST,
                PaymentError::Stripe(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            api_error(status, e.user_message(), "CHECKOUT_ERROR")
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            checkout_url: session.checkout_url,
        }),
    ))
}
