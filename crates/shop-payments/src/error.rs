//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Catalog and checkout errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Product id unknown to the catalog, malformed, or deleted
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but lacks a field the page needs
    #[error("Product {id} is missing {field}")]
    IncompleteProduct { id: String, field: &'static str },

    /// Price id rejected before reaching Stripe
    #[error("Invalid price id: {0}")]
    InvalidPriceId(String),

    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Whether the catalog simply does not know this product
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ProductNotFound(_))
    }

    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Stripe(_))
    }

    /// Get user-friendly message
    pub const fn user_message(&self) -> &str {
        match self {
            Self::ProductNotFound(_) => "Product not found.",
            Self::IncompleteProduct { .. } => "Product is not available for sale.",
            Self::InvalidPriceId(_) => "Invalid price.",
            Self::Stripe(_) => "Payment processing failed. Please try again.",
            Self::Config(_) => "Service configuration error.",
        }
    }
}
