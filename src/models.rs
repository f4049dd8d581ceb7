//! Frontend Models
//!
//! Response shapes of the cart endpoints, as the server renders them.
//! Amounts arrive as JSON floats and are held as `Decimal`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cart line item id (the server's `ItemCarrinho` primary key)
pub type ItemId = u32;

/// Product id used by the add-to-cart endpoint
pub type ProductId = u32;

/// Reply to "add item"
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddItemResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub total_itens: u32,
}

/// Reply to "update quantity"
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateQuantityResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub totals: CartTotals,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub item_total: Option<Decimal>,
    #[serde(default)]
    pub removed: bool,
}

/// Reply to "remove item"
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoveItemResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub totals: CartTotals,
}

/// Reply to "clear cart"
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClearCartResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Reply to "compute shipping"
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShippingResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub frete: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,
}

/// Reply to "finalize checkout"
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckoutResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// Cart-wide numbers carried by update/remove replies
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct CartTotals {
    #[serde(default)]
    pub total_itens: u32,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Address as returned by the postal code lookup service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
    /// Set by the lookup service for unknown codes, as `true` or `"true"`
    #[serde(default, deserialize_with = "flag")]
    pub erro: bool,
}

/// Options sent with "add item"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddItemRequest {
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    #[serde(rename = "tamanho")]
    pub size: String,
    #[serde(rename = "cor")]
    pub color: String,
}

impl Default for AddItemRequest {
    fn default() -> Self {
        Self { quantity: 1, size: String::new(), color: String::new() }
    }
}

fn flag<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(t) => t == "true",
    })
}
