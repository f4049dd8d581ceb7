//! HTTP Cart Client
//!
//! POSTs form-encoded requests with the page's CSRF token and the
//! `X-Requested-With` header the server uses to answer with JSON.

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::CartApi;
use crate::checkout::FormField;
use crate::config::EndpointUrls;
use crate::error::{UiError, UiResult};
use crate::mask::PostalCode;
use crate::models::{
    AddItemRequest, AddItemResponse, CheckoutResponse, ClearCartResponse, ItemId, ProductId, RemoveItemResponse,
    ShippingResponse, UpdateQuantityResponse,
};

const CSRF_FIELD: &str = "csrfmiddlewaretoken";

pub struct HttpCartApi {
    client: reqwest::Client,
    urls: EndpointUrls,
    csrf_token: String,
    /// Page origin that relative endpoint paths resolve against
    base: Option<Url>,
}

impl HttpCartApi {
    pub fn new(urls: EndpointUrls, csrf_token: impl Into<String>, base: Option<&str>) -> Self {
        let base = base.and_then(|b| match Url::parse(b) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("[CART] ignoring base url {}: {}", b, e);
                None
            }
        });
        Self {
            client: reqwest::Client::new(),
            urls,
            csrf_token: csrf_token.into(),
            base,
        }
    }

    /// Endpoint URL, resolving `/path/` forms against the page
    pub fn resolve(&self, endpoint: &str) -> UiResult<Url> {
        match Url::parse(endpoint) {
            Ok(url) => Ok(url),
            Err(_) => self
                .base
                .as_ref()
                .ok_or_else(|| UiError::Network(format!("no base url for {}", endpoint)))?
                .join(endpoint)
                .map_err(|e| UiError::Network(format!("{}: {}", endpoint, e))),
        }
    }

    /// Form body with the CSRF token appended unless the form already has one
    pub fn form_body(&self, mut fields: Vec<(String, String)>) -> Vec<(String, String)> {
        if !fields.iter().any(|(name, _)| name == CSRF_FIELD) {
            fields.push((CSRF_FIELD.to_string(), self.csrf_token.clone()));
        }
        fields
    }

    async fn post_form<T: DeserializeOwned>(&self, endpoint: &str, fields: Vec<(String, String)>) -> UiResult<T> {
        let url = self.resolve(endpoint)?;
        log::debug!("[CART] POST {}", url);
        let response = self
            .client
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&self.form_body(fields))
            .send()
            .await?;
        Ok(response.json::<T>().await?)
    }
}

fn field(name: &str, value: impl ToString) -> (String, String) {
    (name.to_string(), value.to_string())
}

#[async_trait(?Send)]
impl CartApi for HttpCartApi {
    async fn add_item(&self, product: ProductId, request: &AddItemRequest) -> UiResult<AddItemResponse> {
        let fields = vec![
            field("quantidade", request.quantity),
            field("tamanho", &request.size),
            field("cor", &request.color),
        ];
        self.post_form(&self.urls.add_item(product), fields).await
    }

    async fn update_quantity(&self, item: ItemId, quantity: u32) -> UiResult<UpdateQuantityResponse> {
        self.post_form(&self.urls.update_item(item), vec![field("quantidade", quantity)])
            .await
    }

    async fn remove_item(&self, item: ItemId) -> UiResult<RemoveItemResponse> {
        self.post_form(&self.urls.remove_item(item), Vec::new()).await
    }

    async fn clear(&self) -> UiResult<ClearCartResponse> {
        self.post_form(&self.urls.limpar_carrinho, Vec::new()).await
    }

    async fn shipping(&self, cep: &PostalCode) -> UiResult<ShippingResponse> {
        self.post_form(&self.urls.calcular_frete, vec![field("cep", cep.as_str())])
            .await
    }

    async fn finalize(&self, fields: &[FormField]) -> UiResult<CheckoutResponse> {
        let fields = fields.iter().map(|f| (f.name.clone(), f.value.clone())).collect();
        self.post_form(&self.urls.finalizar_compra, fields).await
    }
}
