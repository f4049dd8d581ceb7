//! Cart Endpoint Clients
//!
//! The cart manager talks to the server through these traits. The HTTP
//! implementations post form-encoded requests the way the storefront's
//! templates expect; tests substitute in-memory fakes.

mod address;
mod cart;

use async_trait::async_trait;

use crate::checkout::FormField;
use crate::error::{UiError, UiResult};
use crate::mask::PostalCode;
use crate::models::{
    AddItemRequest, AddItemResponse, Address, CheckoutResponse, ClearCartResponse, ItemId, ProductId,
    RemoveItemResponse, ShippingResponse, UpdateQuantityResponse,
};

pub use address::ViaCepLookup;
pub use cart::HttpCartApi;

/// Server-side cart operations
#[async_trait(?Send)]
pub trait CartApi {
    async fn add_item(&self, product: ProductId, request: &AddItemRequest) -> UiResult<AddItemResponse>;
    async fn update_quantity(&self, item: ItemId, quantity: u32) -> UiResult<UpdateQuantityResponse>;
    async fn remove_item(&self, item: ItemId) -> UiResult<RemoveItemResponse>;
    async fn clear(&self) -> UiResult<ClearCartResponse>;
    async fn shipping(&self, cep: &PostalCode) -> UiResult<ShippingResponse>;
    async fn finalize(&self, fields: &[FormField]) -> UiResult<CheckoutResponse>;
}

/// Postal code to address
#[async_trait(?Send)]
pub trait AddressLookup {
    /// `Ok(None)` when the service does not know the code
    async fn lookup(&self, cep: &PostalCode) -> UiResult<Option<Address>>;
}

/// Replies carrying the server's `success` / `message` pair
pub trait ServerReply: Sized {
    fn success(&self) -> bool;
    fn message(&self) -> &str;

    /// `success: false` becomes `UiError::Rejected` with the server's message
    fn accepted(self) -> UiResult<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(UiError::Rejected(self.message().to_string()))
        }
    }
}

macro_rules! server_reply {
    ($($ty:ty),*) => {
        $(impl ServerReply for $ty {
            fn success(&self) -> bool {
                self.success
            }

            fn message(&self) -> &str {
                &self.message
            }
        })*
    };
}

server_reply!(
    AddItemResponse,
    UpdateQuantityResponse,
    RemoveItemResponse,
    ClearCartResponse,
    ShippingResponse,
    CheckoutResponse
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_passes_success_through() {
        let reply = ClearCartResponse { success: true, message: String::new() };
        assert!(reply.accepted().is_ok());
    }

    #[test]
    fn test_rejection_carries_server_message() {
        let reply: RemoveItemResponse =
            serde_json::from_str(r#"{"success": false, "message": "Item não encontrado"}"#).unwrap();
        assert_eq!(reply.accepted().unwrap_err(), UiError::Rejected("Item não encontrado".into()));
    }
}
