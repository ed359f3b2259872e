//! Purchasable Item Model

use super::price::Price;
use serde::{Deserialize, Serialize};

/// Catalog and pricing facts about the item being priced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchasableItem {
    pub variation_id: String,
    pub variation_type: String,
    pub product_id: String,
    pub product_type: String,
    /// Regular selling price
    pub price: Price,
    /// Reference price, if the item has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_price: Option<Price>,
    /// Store types the product is sold in
    #[serde(default)]
    pub stores: Vec<String>,
}
