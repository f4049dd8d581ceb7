//! Checkout Rules
//!
//! Client-side gating and totals for the checkout page. The server recomputes
//! everything on submit; these numbers are for display only.

use rust_decimal::Decimal;

use crate::error::{UiError, UiResult};
use crate::money::{parse_brl, PIX_DISCOUNT_RATE};

/// Shipping display text before a quote exists
pub const SHIPPING_PLACEHOLDER: &str = "A calcular";

/// Payment options offered at checkout (radio `forma_pagamento`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    Stripe,
    MercadoPago,
    Pix,
    Boleto,
    Other(String),
}

impl PaymentMethod {
    pub fn from_value(value: &str) -> Self {
        match value {
            "stripe" => PaymentMethod::Stripe,
            "mercadopago" => PaymentMethod::MercadoPago,
            "pix" => PaymentMethod::Pix,
            "boleto" => PaymentMethod::Boleto,
            other => PaymentMethod::Other(other.to_string()),
        }
    }

    pub fn has_pix_discount(&self) -> bool {
        matches!(self, PaymentMethod::Pix)
    }
}

/// Whether shipping has been quoted, read back from its display text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingState {
    Pending,
    Quoted(Decimal),
}

impl ShippingState {
    pub fn from_display(text: &str) -> Self {
        if is_placeholder(text) {
            return ShippingState::Pending;
        }
        parse_brl(text).map_or(ShippingState::Pending, ShippingState::Quoted)
    }

    pub fn amount(&self) -> Decimal {
        match self {
            ShippingState::Pending => Decimal::ZERO,
            ShippingState::Quoted(fee) => *fee,
        }
    }
}

pub fn is_placeholder(text: &str) -> bool {
    text.trim() == SHIPPING_PLACEHOLDER
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    /// Present only for PIX
    pub discount: Option<Decimal>,
    pub total: Decimal,
}

pub fn compute_totals(subtotal: Decimal, shipping: ShippingState, method: Option<&PaymentMethod>) -> CheckoutTotals {
    let shipping = shipping.amount();
    let gross = subtotal + shipping;
    let discount = method
        .filter(|m| m.has_pix_discount())
        .map(|_| gross * PIX_DISCOUNT_RATE);
    CheckoutTotals {
        subtotal,
        shipping,
        discount,
        total: gross - discount.unwrap_or(Decimal::ZERO),
    }
}

/// A named form control with its current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub required: bool,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>, required: bool) -> Self {
        Self { name: name.into(), value: value.into(), required }
    }

    pub fn is_missing(&self) -> bool {
        self.required && self.value.is_empty()
    }
}

pub fn missing_required(fields: &[FormField]) -> Vec<String> {
    fields.iter().filter(|f| f.is_missing()).map(|f| f.name.clone()).collect()
}

/// Gate a checkout submission: required fields first, then the shipping quote
pub fn validate_submission(fields: &[FormField], shipping_text: &str) -> UiResult<()> {
    let missing = missing_required(fields);
    if !missing.is_empty() {
        return Err(UiError::MissingFields(missing));
    }
    if is_placeholder(shipping_text) {
        return Err(UiError::ShippingNotCalculated);
    }
    Ok(())
}
