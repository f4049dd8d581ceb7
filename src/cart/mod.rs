//! Cart Interaction
//!
//! `CartManager` turns storefront events into cart requests and reconciles the
//! page with the replies. Network, page and timing are injected through the
//! traits below so the manager runs the same against the browser and in tests.

mod bindings;
mod manager;
mod view;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::checkout::{CheckoutTotals, PaymentMethod};
use crate::models::{Address, CartTotals, ItemId};

pub use bindings::install;
pub use manager::CartManager;
pub use view::{DomCartView, TimerPause};

/// Bootstrap alert flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Danger,
}

impl NoticeKind {
    pub fn css(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Danger => "danger",
        }
    }
}

/// Everything the cart manager does to the page
pub trait CartView {
    fn confirm(&self, message: &str) -> bool;
    /// Page-level dismissible notice
    fn notify(&self, kind: NoticeKind, message: &str);

    fn set_quantity(&self, item: ItemId, quantity: u32);
    fn set_item_total(&self, item: ItemId, total: Decimal);
    fn remove_row(&self, item: ItemId);
    fn row_count(&self) -> usize;
    /// Subtotal, total and header counter
    fn set_totals(&self, totals: &CartTotals);
    /// Header counter only
    fn set_item_count(&self, count: u32);
    fn reload(&self);

    /// Inline result under the cart page shipping form
    fn shipping_result(&self, kind: NoticeKind, message: &str);
    fn set_cart_shipping(&self, fee: Option<Decimal>, total: Option<Decimal>);

    fn fill_address(&self, address: &Address);
    /// Current text of the checkout shipping line
    fn checkout_shipping_text(&self) -> String;
    fn set_checkout_shipping(&self, fee: Decimal);
    fn selected_payment(&self) -> Option<PaymentMethod>;
    fn show_checkout_totals(&self, totals: &CheckoutTotals);
    fn mark_invalid(&self, field: &str, invalid: bool);
    fn focus_postal_code(&self);
    /// Busy disables the submit control and swaps its label; not busy restores it
    fn set_submit_busy(&self, busy: bool);
    fn navigate(&self, url: &str);
}

/// Delay source for the checkout pause
#[async_trait(?Send)]
pub trait Pause {
    async fn pause(&self, ms: u32);
}
