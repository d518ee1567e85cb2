//! Product Model
//!
//! `CatalogRecord` is what the catalog hands back; `Product` is the
//! display-ready shape the page renders. The only way to build a `Product`
//! is from a record, so the price string always comes from the provider's
//! integer amount.

use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, Result};
use crate::price::{format_brl, CURRENCY};

/// Raw product as stored in the provider catalog
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub default_price: Option<PriceRecord>,
}

/// Raw price attached to a catalog product
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub id: String,
    /// Amount in minor currency units (centavos)
    pub unit_amount: Option<i64>,
    pub currency: Option<String>,
}

/// Display-ready product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: String,
    name: String,
    description: String,
    url: Option<String>,
    image_url: String,
    price: String,
    default_price_id: String,
}

impl Product {
    /// Map a catalog record into a display-ready product
    ///
    /// Fails with `IncompleteProduct` unless name, description, an image,
    /// and a default price with an amount are all present.
    pub fn from_record(record: CatalogRecord) -> Result<Self> {
        let CatalogRecord {
            id,
            name,
            description,
            url,
            images,
            default_price,
        } = record;

        let missing = |field| PaymentError::IncompleteProduct {
            id: id.clone(),
            field,
        };

        let name = non_empty(name).ok_or_else(|| missing("name"))?;
        let description = non_empty(description).ok_or_else(|| missing("description"))?;
        let image_url = non_empty(images.into_iter().next()).ok_or_else(|| missing("image"))?;
        let price = default_price.ok_or_else(|| missing("default_price"))?;
        let unit_amount = price.unit_amount.ok_or_else(|| missing("unit_amount"))?;
        let default_price_id = non_empty(Some(price.id)).ok_or_else(|| missing("default_price"))?;

        if let Some(currency) = price.currency.as_deref() {
            if !currency.eq_ignore_ascii_case(CURRENCY) {
                tracing::warn!(
                    product_id = %id,
                    price_id = %default_price_id,
                    currency,
                    "Price currency is not BRL; rendering as BRL anyway"
                );
            }
        }

        Ok(Self {
            name,
            description,
            url: non_empty(url),
            image_url,
            price: format_brl(unit_amount),
            default_price_id,
            id,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// External reference link, when the catalog has one
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// First image in the catalog's image list
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Localized BRL price
    pub fn price(&self) -> &str {
        &self.price
    }

    /// Price id to send when starting a checkout
    pub fn default_price_id(&self) -> &str {
        &self.default_price_id
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
