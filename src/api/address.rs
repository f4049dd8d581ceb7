//! Postal Code Lookup

use async_trait::async_trait;

use super::AddressLookup;
use crate::config::EndpointUrls;
use crate::error::UiResult;
use crate::mask::PostalCode;
use crate::models::Address;

/// ViaCEP-style JSON service at `EndpointUrls::busca_cep`
pub struct ViaCepLookup {
    client: reqwest::Client,
    urls: EndpointUrls,
}

impl ViaCepLookup {
    pub fn new(urls: EndpointUrls) -> Self {
        Self { client: reqwest::Client::new(), urls }
    }
}

/// Unknown codes come back as `{"erro": true}`
pub fn known_address(address: Address) -> Option<Address> {
    (!address.erro).then_some(address)
}

#[async_trait(?Send)]
impl AddressLookup for ViaCepLookup {
    async fn lookup(&self, cep: &PostalCode) -> UiResult<Option<Address>> {
        let address: Address = self.client.get(self.urls.address_lookup(cep)).send().await?.json().await?;
        Ok(known_address(address))
    }
}
