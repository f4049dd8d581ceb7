//! Page Configuration
//!
//! Templates publish endpoint URLs in `window.urls` and checkout numbers in
//! `window.checkoutData`. Anything missing falls back to the defaults below.

use rust_decimal::Decimal;
use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::mask::PostalCode;
use crate::models::{ItemId, ProductId};

/// Cart endpoint URLs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EndpointUrls {
    /// Template with `{id}` placeholder
    pub adicionar: String,
    /// Template with `{id}` placeholder
    pub atualizar: String,
    /// Template with `{id}` placeholder
    pub remover: String,
    pub limpar_carrinho: String,
    pub calcular_frete: String,
    pub finalizar_compra: String,
    /// Template with `{cep}` placeholder
    pub busca_cep: String,
}

impl Default for EndpointUrls {
    fn default() -> Self {
        Self {
            adicionar: "/carrinho/adicionar/{id}/".to_string(),
            atualizar: "/carrinho/atualizar/{id}/".to_string(),
            remover: "/carrinho/remover/{id}/".to_string(),
            limpar_carrinho: "/carrinho/limpar/".to_string(),
            calcular_frete: "/carrinho/calcular-frete/".to_string(),
            finalizar_compra: "/carrinho/finalizar/".to_string(),
            busca_cep: "https://viacep.com.br/ws/{cep}/json/".to_string(),
        }
    }
}

impl EndpointUrls {
    pub fn add_item(&self, product: ProductId) -> String {
        self.adicionar.replace("{id}", &product.to_string())
    }

    pub fn update_item(&self, item: ItemId) -> String {
        self.atualizar.replace("{id}", &item.to_string())
    }

    pub fn remove_item(&self, item: ItemId) -> String {
        self.remover.replace("{id}", &item.to_string())
    }

    pub fn address_lookup(&self, cep: &PostalCode) -> String {
        self.busca_cep.replace("{cep}", cep.as_str())
    }
}

/// Numbers the checkout page renders for client-side totals
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CheckoutData {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}

/// Delays and thresholds, in milliseconds unless noted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    /// Pause between disabling the checkout button and posting the form
    pub checkout_delay_ms: u32,
    pub notice_dismiss_ms: u32,
    /// Idle time after the last keystroke before a draft is written
    pub draft_idle_ms: u32,
    pub save_indicator_fade_in_ms: u32,
    pub save_indicator_visible_ms: u32,
    pub fade_out_ms: u32,
    pub counter_duration_ms: u32,
    pub counter_tick_ms: u32,
    pub stat_delay_ms: u32,
    pub stat_duration_ms: u32,
    pub entrance_stagger_ms: u32,
    pub message_stagger_ms: u32,
    pub message_dismiss_ms: u32,
    pub search_debounce_ms: u32,
    /// Characters needed before live search submits (zero always submits)
    pub search_min_chars: usize,
    pub resize_debounce_ms: u32,
    /// Widest viewport, in px, that gets the mobile nav toggle
    pub nav_breakpoint_px: f64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            checkout_delay_ms: 2000,
            notice_dismiss_ms: 5000,
            draft_idle_ms: 2000,
            save_indicator_fade_in_ms: 100,
            save_indicator_visible_ms: 3000,
            fade_out_ms: 300,
            counter_duration_ms: 1000,
            counter_tick_ms: 16,
            stat_delay_ms: 300,
            stat_duration_ms: 2000,
            entrance_stagger_ms: 100,
            message_stagger_ms: 200,
            message_dismiss_ms: 5000,
            search_debounce_ms: 500,
            search_min_chars: 3,
            resize_debounce_ms: 250,
            nav_breakpoint_px: 768.0,
        }
    }
}

/// Everything the enhancers read from the page at boot
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub urls: EndpointUrls,
    pub checkout: Option<CheckoutData>,
    pub timings: Timings,
    pub csrf_token: String,
    /// Admin landing page for the home shortcut
    pub admin_home: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            urls: EndpointUrls::default(),
            checkout: None,
            timings: Timings::default(),
            csrf_token: String::new(),
            admin_home: "/admin/".to_string(),
        }
    }
}

impl PageConfig {
    /// Build from the already-extracted page globals
    pub fn from_globals(urls: JsValue, checkout: JsValue, csrf_token: String) -> Self {
        let urls = if urls.is_undefined() || urls.is_null() {
            EndpointUrls::default()
        } else {
            serde_wasm_bindgen::from_value(urls).unwrap_or_else(|e| {
                log::warn!("[CONFIG] window.urls unreadable, using defaults: {}", e);
                EndpointUrls::default()
            })
        };
        let checkout = if checkout.is_undefined() || checkout.is_null() {
            None
        } else {
            match serde_wasm_bindgen::from_value::<CheckoutData>(checkout) {
                Ok(data) => Some(data),
                Err(e) => {
                    log::warn!("[CONFIG] window.checkoutData unreadable: {}", e);
                    None
                }
            }
        };
        Self { urls, checkout, csrf_token, ..Self::default() }
    }

    /// Read `window.urls`, `window.checkoutData` and the CSRF input
    pub fn load() -> Self {
        let Some(win) = web_sys::window() else {
            return Self::default();
        };
        let urls = js_sys::Reflect::get(&win, &JsValue::from_str("urls")).unwrap_or(JsValue::UNDEFINED);
        let checkout = js_sys::Reflect::get(&win, &JsValue::from_str("checkoutData")).unwrap_or(JsValue::UNDEFINED);
        let csrf_token = crate::dom::input_value("[name=csrfmiddlewaretoken]").unwrap_or_default();
        Self::from_globals(urls, checkout, csrf_token)
    }
}
