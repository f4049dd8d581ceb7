//! Browser Cart View
//!
//! `CartView` over the storefront templates' markup.

use std::cell::RefCell;

use async_trait::async_trait;
use rust_decimal::Decimal;
use wasm_bindgen::JsCast;

use super::{CartView, NoticeKind, Pause};
use crate::checkout::{CheckoutTotals, PaymentMethod};
use crate::components::show_notice;
use crate::config::Timings;
use crate::dom;
use crate::models::{Address, CartTotals, ItemId};
use crate::money::{format_brl, format_discount};

const SUBMIT_BUTTON: &str = "#checkout-form button[type=\"submit\"]";
const BUSY_LABEL: &str = "<i class=\"fas fa-spinner fa-spin\"></i> Processando...";

pub struct DomCartView {
    timings: Timings,
    /// Submit button markup saved while the checkout is in flight
    submit_label: RefCell<Option<String>>,
}

impl DomCartView {
    pub fn new(timings: Timings) -> Self {
        Self { timings, submit_label: RefCell::new(None) }
    }

    fn submit_button() -> Option<web_sys::HtmlButtonElement> {
        dom::query(SUBMIT_BUTTON).and_then(|el| el.dyn_into().ok())
    }
}

fn item_selector(class: &str, item: ItemId) -> String {
    format!("{}[data-item-id=\"{}\"]", class, item)
}

impl CartView for DomCartView {
    fn confirm(&self, message: &str) -> bool {
        dom::confirm(message)
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        show_notice(kind, message, self.timings.notice_dismiss_ms);
    }

    fn set_quantity(&self, item: ItemId, quantity: u32) {
        dom::set_input_value(&item_selector(".quantity-input", item), &quantity.to_string());
    }

    fn set_item_total(&self, item: ItemId, total: Decimal) {
        dom::set_text_all(&item_selector(".item-total", item), &format_brl(total));
    }

    fn remove_row(&self, item: ItemId) {
        dom::remove_all(&item_selector(".cart-item", item));
    }

    fn row_count(&self) -> usize {
        dom::query_all(".cart-item").len()
    }

    fn set_totals(&self, totals: &CartTotals) {
        dom::set_text_all(".subtotal", &format_brl(totals.subtotal));
        dom::set_text_all(".total", &format_brl(totals.total));
        self.set_item_count(totals.total_itens);
    }

    fn set_item_count(&self, count: u32) {
        if count > 0 {
            dom::set_text_all(".carrinho-contador", &count.to_string());
            dom::set_display_all(".carrinho-contador", None);
        } else {
            dom::set_display_all(".carrinho-contador", Some("none"));
        }
    }

    fn reload(&self) {
        dom::reload();
    }

    fn shipping_result(&self, kind: NoticeKind, message: &str) {
        let Some(target) = dom::query("#resultado-frete") else {
            return;
        };
        target.set_inner_html("");
        if let Some(alert) = dom::create("div", Some(&format!("alert alert-{} py-2", kind.css()))) {
            alert.set_text_content(Some(message));
            let _ = target.append_child(&alert);
        }
    }

    fn set_cart_shipping(&self, fee: Option<Decimal>, total: Option<Decimal>) {
        if let Some(fee) = fee {
            dom::set_text_all(".frete", &format_brl(fee));
        }
        if let Some(total) = total {
            dom::set_text_all(".total", &format_brl(total));
        }
    }

    fn fill_address(&self, address: &Address) {
        dom::set_input_value("#endereco", &address.logradouro);
        dom::set_input_value("#bairro", &address.bairro);
        dom::set_input_value("#cidade", &address.localidade);
        dom::set_input_value("#estado", &address.uf);
    }

    fn checkout_shipping_text(&self) -> String {
        dom::text_of(".frete-valor").unwrap_or_default()
    }

    fn set_checkout_shipping(&self, fee: Decimal) {
        dom::set_text_all(".frete-valor", &format_brl(fee));
    }

    fn selected_payment(&self) -> Option<PaymentMethod> {
        dom::input_value("input[name=\"forma_pagamento\"]:checked").map(|v| PaymentMethod::from_value(&v))
    }

    fn show_checkout_totals(&self, totals: &CheckoutTotals) {
        match totals.discount {
            Some(discount) => {
                dom::set_display_all(".desconto-pix", None);
                dom::set_text_all(".desconto-valor", &format_discount(discount));
            }
            None => dom::set_display_all(".desconto-pix", Some("none")),
        }
        dom::set_text_all(".total-valor", &format_brl(totals.total));
    }

    fn mark_invalid(&self, field: &str, invalid: bool) {
        for el in dom::query_all(&format!("#checkout-form [name=\"{}\"]", field)) {
            dom::set_class(&el, "is-invalid", invalid);
        }
    }

    fn focus_postal_code(&self) {
        dom::focus("#cep");
    }

    fn set_submit_busy(&self, busy: bool) {
        let Some(button) = Self::submit_button() else {
            return;
        };
        if busy {
            self.submit_label.replace(Some(button.inner_html()));
            button.set_disabled(true);
            button.set_inner_html(BUSY_LABEL);
        } else {
            if let Some(label) = self.submit_label.take() {
                button.set_inner_html(&label);
            }
            button.set_disabled(false);
        }
    }

    fn navigate(&self, url: &str) {
        dom::navigate(url);
    }
}

/// Browser timer pause
pub struct TimerPause;

#[async_trait(?Send)]
impl Pause for TimerPause {
    async fn pause(&self, ms: u32) {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_selector() {
        assert_eq!(item_selector(".cart-item", 12), ".cart-item[data-item-id=\"12\"]");
    }
}
