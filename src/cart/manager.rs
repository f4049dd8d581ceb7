//! Cart Manager Service

use std::cell::RefCell;
use std::collections::HashMap;

use crate::api::{AddressLookup, CartApi, ServerReply};
use crate::checkout::{compute_totals, validate_submission, FormField, ShippingState};
use crate::config::{CheckoutData, Timings};
use crate::error::{UiError, UiResult};
use crate::mask::PostalCode;
use crate::models::{AddItemRequest, ItemId, ProductId, UpdateQuantityResponse};
use crate::quantity::{QuantityChange, QuantityInput};

use super::{CartView, NoticeKind, Pause};

pub const CONFIRM_REMOVE: &str = "Tem certeza que deseja remover este item?";
pub const CONFIRM_CLEAR: &str = "Tem certeza que deseja limpar o carrinho?";
pub const UPDATE_FAILED: &str = "Erro ao atualizar carrinho";
pub const REMOVE_FAILED: &str = "Erro ao remover item";
pub const CLEAR_FAILED: &str = "Erro ao limpar carrinho";
pub const ADD_FAILED: &str = "Erro ao adicionar produto ao carrinho";
pub const SHIPPING_FAILED: &str = "Erro ao calcular frete";
pub const CHECKOUT_FAILED: &str = "Erro ao processar pedido. Tente novamente.";
pub const FILL_REQUIRED: &str = "Por favor, preencha todos os campos obrigatórios";
pub const SHIPPING_REQUIRED: &str = "Por favor, informe o CEP para calcular o frete";

pub struct CartManager<A, L, V, P> {
    api: A,
    lookup: L,
    view: V,
    pause: P,
    checkout: Option<CheckoutData>,
    timings: Timings,
    /// Latest quantity request issued per item
    sequence: RefCell<HashMap<ItemId, u64>>,
}

impl<A, L, V, P> CartManager<A, L, V, P>
where
    A: CartApi,
    L: AddressLookup,
    V: CartView,
    P: Pause,
{
    pub fn new(api: A, lookup: L, view: V, pause: P, checkout: Option<CheckoutData>, timings: Timings) -> Self {
        Self {
            api,
            lookup,
            view,
            pause,
            checkout,
            timings,
            sequence: RefCell::new(HashMap::new()),
        }
    }

    fn issue_ticket(&self, item: ItemId) -> u64 {
        let mut sequence = self.sequence.borrow_mut();
        let ticket = sequence.entry(item).or_insert(0);
        *ticket += 1;
        *ticket
    }

    fn is_latest(&self, item: ItemId, ticket: u64) -> bool {
        self.sequence.borrow().get(&item).copied() == Some(ticket)
    }

    /// Increase, decrease or set a line's quantity.
    ///
    /// Nothing is sent when the change is a no-op at a bound; the displayed
    /// quantity only changes once the server accepted it.
    pub async fn change_quantity(&self, item: ItemId, input: QuantityInput, change: QuantityChange) {
        let Some(quantity) = input.resolve(change) else {
            log::debug!("[CART] item {} already at bound ({:?})", item, change);
            return;
        };
        let ticket = self.issue_ticket(item);
        let result = self.api.update_quantity(item, quantity).await;
        self.finish_quantity(item, ticket, quantity, result);
    }

    fn finish_quantity(&self, item: ItemId, ticket: u64, quantity: u32, result: UiResult<UpdateQuantityResponse>) {
        if !self.is_latest(item, ticket) {
            log::debug!("[CART] dropping stale reply #{} for item {}", ticket, item);
            return;
        }
        match result.and_then(ServerReply::accepted) {
            Ok(reply) => {
                if reply.removed {
                    self.view.remove_row(item);
                } else {
                    self.view.set_quantity(item, quantity);
                    if let Some(total) = reply.item_total {
                        self.view.set_item_total(item, total);
                    }
                }
                self.view.set_totals(&reply.totals);
                self.view.notify(NoticeKind::Success, &reply.message);
                self.reload_if_empty();
            }
            Err(e) => {
                log::warn!("[CART] update item {} failed: {}", item, e);
                self.view.notify(NoticeKind::Danger, &e.user_message(UPDATE_FAILED));
            }
        }
    }

    fn reload_if_empty(&self) {
        if self.view.row_count() == 0 {
            log::info!("[CART] cart is empty, reloading");
            self.view.reload();
        }
    }

    pub async fn remove_item(&self, item: ItemId) {
        if !self.view.confirm(CONFIRM_REMOVE) {
            return;
        }
        match self.api.remove_item(item).await.and_then(ServerReply::accepted) {
            Ok(reply) => {
                self.view.remove_row(item);
                self.view.set_totals(&reply.totals);
                self.view.notify(NoticeKind::Success, &reply.message);
                self.reload_if_empty();
            }
            Err(e) => {
                log::warn!("[CART] remove item {} failed: {}", item, e);
                self.view.notify(NoticeKind::Danger, &e.user_message(REMOVE_FAILED));
            }
        }
    }

    pub async fn clear_cart(&self) {
        if !self.view.confirm(CONFIRM_CLEAR) {
            return;
        }
        match self.api.clear().await.and_then(ServerReply::accepted) {
            Ok(_) => self.view.reload(),
            Err(e) => {
                log::warn!("[CART] clear failed: {}", e);
                self.view.notify(NoticeKind::Danger, &e.user_message(CLEAR_FAILED));
            }
        }
    }

    /// Cart page shipping form
    pub async fn calculate_shipping(&self, raw_cep: &str) {
        let cep = match PostalCode::parse(raw_cep) {
            Ok(cep) => cep,
            Err(e) => {
                self.view.shipping_result(NoticeKind::Danger, &e.to_string());
                return;
            }
        };
        match self.api.shipping(&cep).await.and_then(ServerReply::accepted) {
            Ok(reply) => {
                self.view.set_cart_shipping(reply.frete, reply.total);
                self.view.shipping_result(NoticeKind::Success, &reply.message);
            }
            Err(e) => {
                log::warn!("[CART] shipping for {} failed: {}", cep, e);
                self.view.shipping_result(NoticeKind::Danger, &e.user_message(SHIPPING_FAILED));
            }
        }
    }

    /// Checkout postal code left: fill the address and quote shipping, both best effort
    pub async fn postal_code_left(&self, raw_cep: &str) {
        let Ok(cep) = PostalCode::parse(raw_cep) else {
            return;
        };
        match self.lookup.lookup(&cep).await {
            Ok(Some(address)) => self.view.fill_address(&address),
            Ok(None) => log::debug!("[CART] no address for {}", cep),
            Err(e) => log::debug!("[CART] address lookup for {} failed: {}", cep, e),
        }
        match self.api.shipping(&cep).await.and_then(ServerReply::accepted) {
            Ok(reply) => {
                if let Some(fee) = reply.frete {
                    self.view.set_checkout_shipping(fee);
                    self.recompute_checkout_total();
                }
            }
            Err(e) => log::debug!("[CART] checkout shipping for {} failed: {}", cep, e),
        }
    }

    /// Checkout total from the page subtotal, the shipping line and the chosen payment
    pub fn recompute_checkout_total(&self) {
        let Some(data) = self.checkout else {
            return;
        };
        let shipping = ShippingState::from_display(&self.view.checkout_shipping_text());
        let method = self.view.selected_payment();
        let totals = compute_totals(data.subtotal, shipping, method.as_ref());
        self.view.show_checkout_totals(&totals);
    }

    /// Validate, pause, then post the checkout form
    pub async fn submit_checkout(&self, fields: Vec<FormField>) {
        for field in fields.iter().filter(|f| f.required) {
            self.view.mark_invalid(&field.name, field.is_missing());
        }
        match validate_submission(&fields, &self.view.checkout_shipping_text()) {
            Ok(()) => {}
            Err(UiError::ShippingNotCalculated) => {
                self.view.notify(NoticeKind::Danger, SHIPPING_REQUIRED);
                self.view.focus_postal_code();
                return;
            }
            Err(e) => {
                log::debug!("[CART] checkout blocked: {}", e);
                self.view.notify(NoticeKind::Danger, FILL_REQUIRED);
                return;
            }
        }

        self.view.set_submit_busy(true);
        self.pause.pause(self.timings.checkout_delay_ms).await;
        match self.api.finalize(&fields).await.and_then(ServerReply::accepted) {
            Ok(reply) => match reply.redirect_url {
                Some(url) => self.view.navigate(&url),
                None => {
                    log::warn!("[CART] checkout accepted without redirect");
                    self.view.set_submit_busy(false);
                }
            },
            Err(e) => {
                log::warn!("[CART] checkout failed: {}", e);
                self.view.notify(NoticeKind::Danger, &e.user_message(CHECKOUT_FAILED));
                self.view.set_submit_busy(false);
            }
        }
    }

    pub async fn add_to_cart(&self, product: ProductId, request: AddItemRequest) {
        match self.api.add_item(product, &request).await.and_then(ServerReply::accepted) {
            Ok(reply) => {
                self.view.set_item_count(reply.total_itens);
                self.view.notify(NoticeKind::Success, &reply.message);
            }
            Err(e) => {
                log::warn!("[CART] add product {} failed: {}", product, e);
                self.view.notify(NoticeKind::Danger, &e.user_message(ADD_FAILED));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{CheckoutTotals, PaymentMethod};
    use crate::models::{
        AddItemResponse, Address, CartTotals, CheckoutResponse, ClearCartResponse, RemoveItemResponse,
        ShippingResponse,
    };
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::cell::Cell;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Sent {
        Add(ProductId, u32),
        Update(ItemId, u32),
        Remove(ItemId),
        Clear,
        Shipping(String),
        Finalize(usize),
    }

    #[derive(Default)]
    struct FakeApi {
        sent: RefCell<Vec<Sent>>,
        add: RefCell<Option<UiResult<AddItemResponse>>>,
        update: RefCell<Option<UiResult<UpdateQuantityResponse>>>,
        remove: RefCell<Option<UiResult<RemoveItemResponse>>>,
        clear: RefCell<Option<UiResult<ClearCartResponse>>>,
        shipping: RefCell<Option<UiResult<ShippingResponse>>>,
        finalize: RefCell<Option<UiResult<CheckoutResponse>>>,
    }

    fn take<T>(slot: &RefCell<Option<UiResult<T>>>) -> UiResult<T> {
        slot.borrow_mut().take().unwrap_or_else(|| Err(UiError::Network("no reply scripted".into())))
    }

    #[async_trait(?Send)]
    impl CartApi for FakeApi {
        async fn add_item(&self, product: ProductId, request: &AddItemRequest) -> UiResult<AddItemResponse> {
            self.sent.borrow_mut().push(Sent::Add(product, request.quantity));
            take(&self.add)
        }

        async fn update_quantity(&self, item: ItemId, quantity: u32) -> UiResult<UpdateQuantityResponse> {
            self.sent.borrow_mut().push(Sent::Update(item, quantity));
            take(&self.update)
        }

        async fn remove_item(&self, item: ItemId) -> UiResult<RemoveItemResponse> {
            self.sent.borrow_mut().push(Sent::Remove(item));
            take(&self.remove)
        }

        async fn clear(&self) -> UiResult<ClearCartResponse> {
            self.sent.borrow_mut().push(Sent::Clear);
            take(&self.clear)
        }

        async fn shipping(&self, cep: &PostalCode) -> UiResult<ShippingResponse> {
            self.sent.borrow_mut().push(Sent::Shipping(cep.as_str().to_string()));
            take(&self.shipping)
        }

        async fn finalize(&self, fields: &[FormField]) -> UiResult<CheckoutResponse> {
            self.sent.borrow_mut().push(Sent::Finalize(fields.len()));
            take(&self.finalize)
        }
    }

    #[derive(Default)]
    struct FakeLookup {
        address: Option<Address>,
    }

    #[async_trait(?Send)]
    impl AddressLookup for FakeLookup {
        async fn lookup(&self, _cep: &PostalCode) -> UiResult<Option<Address>> {
            match &self.address {
                Some(a) => Ok(Some(a.clone())),
                None => Err(UiError::Network("offline".into())),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Shown {
        Confirm(String),
        Notice(NoticeKind, String),
        Quantity(ItemId, u32),
        ItemTotal(ItemId, Decimal),
        RemovedRow(ItemId),
        Totals(CartTotals),
        ItemCount(u32),
        Reload,
        ShippingResult(NoticeKind, String),
        CartShipping(Option<Decimal>, Option<Decimal>),
        Address(String),
        CheckoutShipping(Decimal),
        CheckoutTotals(CheckoutTotals),
        Invalid(String, bool),
        FocusPostalCode,
        SubmitBusy(bool),
        Navigate(String),
    }

    struct FakeView {
        shown: RefCell<Vec<Shown>>,
        confirm_answer: Cell<bool>,
        rows: Cell<usize>,
        shipping_text: RefCell<String>,
        payment: RefCell<Option<PaymentMethod>>,
    }

    impl Default for FakeView {
        fn default() -> Self {
            Self {
                shown: RefCell::new(Vec::new()),
                confirm_answer: Cell::new(true),
                rows: Cell::new(2),
                shipping_text: RefCell::new("A calcular".into()),
                payment: RefCell::new(None),
            }
        }
    }

    impl FakeView {
        fn push(&self, shown: Shown) {
            self.shown.borrow_mut().push(shown);
        }

        fn shown(&self) -> Vec<Shown> {
            self.shown.borrow().clone()
        }
    }

    impl CartView for FakeView {
        fn confirm(&self, message: &str) -> bool {
            self.push(Shown::Confirm(message.into()));
            self.confirm_answer.get()
        }
        fn notify(&self, kind: NoticeKind, message: &str) {
            self.push(Shown::Notice(kind, message.into()));
        }
        fn set_quantity(&self, item: ItemId, quantity: u32) {
            self.push(Shown::Quantity(item, quantity));
        }
        fn set_item_total(&self, item: ItemId, total: Decimal) {
            self.push(Shown::ItemTotal(item, total));
        }
        fn remove_row(&self, item: ItemId) {
            self.rows.set(self.rows.get().saturating_sub(1));
            self.push(Shown::RemovedRow(item));
        }
        fn row_count(&self) -> usize {
            self.rows.get()
        }
        fn set_totals(&self, totals: &CartTotals) {
            self.push(Shown::Totals(*totals));
        }
        fn set_item_count(&self, count: u32) {
            self.push(Shown::ItemCount(count));
        }
        fn reload(&self) {
            self.push(Shown::Reload);
        }
        fn shipping_result(&self, kind: NoticeKind, message: &str) {
            self.push(Shown::ShippingResult(kind, message.into()));
        }
        fn set_cart_shipping(&self, fee: Option<Decimal>, total: Option<Decimal>) {
            self.push(Shown::CartShipping(fee, total));
        }
        fn fill_address(&self, address: &Address) {
            self.push(Shown::Address(address.logradouro.clone()));
        }
        fn checkout_shipping_text(&self) -> String {
            self.shipping_text.borrow().clone()
        }
        fn set_checkout_shipping(&self, fee: Decimal) {
            *self.shipping_text.borrow_mut() = crate::money::format_brl(fee);
            self.push(Shown::CheckoutShipping(fee));
        }
        fn selected_payment(&self) -> Option<PaymentMethod> {
            self.payment.borrow().clone()
        }
        fn show_checkout_totals(&self, totals: &CheckoutTotals) {
            self.push(Shown::CheckoutTotals(*totals));
        }
        fn mark_invalid(&self, field: &str, invalid: bool) {
            self.push(Shown::Invalid(field.into(), invalid));
        }
        fn focus_postal_code(&self) {
            self.push(Shown::FocusPostalCode);
        }
        fn set_submit_busy(&self, busy: bool) {
            self.push(Shown::SubmitBusy(busy));
        }
        fn navigate(&self, url: &str) {
            self.push(Shown::Navigate(url.into()));
        }
    }

    #[derive(Default)]
    struct FakePause {
        waited: RefCell<Vec<u32>>,
    }

    #[async_trait(?Send)]
    impl Pause for FakePause {
        async fn pause(&self, ms: u32) {
            self.waited.borrow_mut().push(ms);
        }
    }

    type Manager = CartManager<FakeApi, FakeLookup, FakeView, FakePause>;

    fn manager() -> Manager {
        CartManager::new(
            FakeApi::default(),
            FakeLookup::default(),
            FakeView::default(),
            FakePause::default(),
            None,
            Timings::default(),
        )
    }

    fn checkout_manager(subtotal: &str) -> Manager {
        CartManager::new(
            FakeApi::default(),
            FakeLookup::default(),
            FakeView::default(),
            FakePause::default(),
            Some(CheckoutData { subtotal: dec(subtotal) }),
            Timings::default(),
        )
    }

    fn update_reply(json: &str) -> UiResult<UpdateQuantityResponse> {
        Ok(serde_json::from_str(json).unwrap())
    }

    #[tokio::test]
    async fn test_decrease_sends_two_and_shows_it_after_success() {
        let m = manager();
        *m.api.update.borrow_mut() = update_reply(
            r#"{"success": true, "message": "Carrinho atualizado!", "total_itens": 2,
                "subtotal": 99.8, "total": 99.8, "item_total": 99.8}"#,
        )
        .into();

        m.change_quantity(7, QuantityInput::new(3, 5), QuantityChange::Decrease).await;

        assert_eq!(*m.api.sent.borrow(), vec![Sent::Update(7, 2)]);
        let shown = m.view.shown();
        assert_eq!(shown[0], Shown::Quantity(7, 2));
        assert_eq!(shown[1], Shown::ItemTotal(7, dec("99.8")));
        assert!(matches!(shown[2], Shown::Totals(CartTotals { total_itens: 2, .. })));
        assert_eq!(shown[3], Shown::Notice(NoticeKind::Success, "Carrinho atualizado!".into()));
    }

    #[tokio::test]
    async fn test_failed_update_keeps_displayed_quantity() {
        let m = manager();
        *m.api.update.borrow_mut() =
            Some(update_reply(r#"{"success": false, "message": "Estoque insuficiente"}"#).unwrap().accepted());

        m.change_quantity(7, QuantityInput::new(3, 5), QuantityChange::Increase).await;

        assert_eq!(*m.api.sent.borrow(), vec![Sent::Update(7, 4)]);
        assert_eq!(m.view.shown(), vec![Shown::Notice(NoticeKind::Danger, "Estoque insuficiente".into())]);
    }

    #[tokio::test]
    async fn test_transport_failure_uses_generic_message() {
        let m = manager();
        m.change_quantity(7, QuantityInput::new(3, 5), QuantityChange::Set(1)).await;
        assert_eq!(m.view.shown(), vec![Shown::Notice(NoticeKind::Danger, UPDATE_FAILED.into())]);
    }

    #[tokio::test]
    async fn test_bounds_send_nothing() {
        let m = manager();
        m.change_quantity(7, QuantityInput::new(5, 5), QuantityChange::Increase).await;
        m.change_quantity(7, QuantityInput::new(1, 5), QuantityChange::Decrease).await;
        assert!(m.api.sent.borrow().is_empty());
        assert!(m.view.shown().is_empty());
    }

    #[tokio::test]
    async fn test_typed_quantity_is_clamped() {
        let m = manager();
        m.change_quantity(7, QuantityInput::new(2, 5), QuantityChange::Set(40)).await;
        m.change_quantity(7, QuantityInput::new(2, 5), QuantityChange::Set(-3)).await;
        assert_eq!(*m.api.sent.borrow(), vec![Sent::Update(7, 5), Sent::Update(7, 1)]);
    }

    #[test]
    fn test_stale_reply_is_dropped() {
        let m = manager();
        let first = m.issue_ticket(7);
        let second = m.issue_ticket(7);
        let other_item = m.issue_ticket(8);

        // The older request completes last and must not overwrite the newer one
        let ok = || update_reply(r#"{"success": true, "message": "ok", "total_itens": 1, "subtotal": 1, "total": 1}"#);
        m.finish_quantity(7, second, 4, ok());
        m.finish_quantity(7, first, 3, ok());
        m.finish_quantity(8, other_item, 1, ok());

        let quantities: Vec<Shown> =
            m.view.shown().into_iter().filter(|s| matches!(s, Shown::Quantity(..))).collect();
        assert_eq!(quantities, vec![Shown::Quantity(7, 4), Shown::Quantity(8, 1)]);
    }

    #[tokio::test]
    async fn test_removed_by_update_reloads_when_empty() {
        let m = manager();
        m.view.rows.set(1);
        *m.api.update.borrow_mut() = update_reply(
            r#"{"success": true, "message": "Item removido do carrinho!", "total_itens": 0,
                "subtotal": 0, "total": 0, "removed": true}"#,
        )
        .into();

        m.change_quantity(7, QuantityInput::new(2, 5), QuantityChange::Decrease).await;

        let shown = m.view.shown();
        assert_eq!(shown[0], Shown::RemovedRow(7));
        assert_eq!(shown.last(), Some(&Shown::Reload));
        assert!(!shown.iter().any(|s| matches!(s, Shown::Quantity(..))));
    }

    #[tokio::test]
    async fn test_remove_requires_confirmation() {
        let m = manager();
        m.view.confirm_answer.set(false);
        m.remove_item(3).await;
        assert!(m.api.sent.borrow().is_empty());
        assert_eq!(m.view.shown(), vec![Shown::Confirm(CONFIRM_REMOVE.into())]);
    }

    #[tokio::test]
    async fn test_remove_last_item_reloads() {
        let m = manager();
        m.view.rows.set(1);
        *m.api.remove.borrow_mut() = Some(Ok(serde_json::from_str(
            r#"{"success": true, "message": "Item removido", "total_itens": 0, "subtotal": 0, "total": 0}"#,
        )
        .unwrap()));

        m.remove_item(3).await;

        assert_eq!(*m.api.sent.borrow(), vec![Sent::Remove(3)]);
        let shown = m.view.shown();
        assert!(shown.contains(&Shown::RemovedRow(3)));
        assert_eq!(shown.last(), Some(&Shown::Reload));
    }

    #[tokio::test]
    async fn test_remove_with_rows_left_does_not_reload() {
        let m = manager();
        *m.api.remove.borrow_mut() = Some(Ok(serde_json::from_str(
            r#"{"success": true, "message": "Item removido", "total_itens": 1, "subtotal": 10, "total": 10}"#,
        )
        .unwrap()));
        m.remove_item(3).await;
        assert!(!m.view.shown().contains(&Shown::Reload));
    }

    #[tokio::test]
    async fn test_remove_failure() {
        let m = manager();
        m.remove_item(3).await;
        assert_eq!(m.view.shown().last(), Some(&Shown::Notice(NoticeKind::Danger, REMOVE_FAILED.into())));
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let m = manager();
        m.view.confirm_answer.set(false);
        m.clear_cart().await;
        assert!(m.api.sent.borrow().is_empty());

        m.view.confirm_answer.set(true);
        *m.api.clear.borrow_mut() = Some(Ok(ClearCartResponse { success: true, message: String::new() }));
        m.clear_cart().await;
        assert_eq!(*m.api.sent.borrow(), vec![Sent::Clear]);
        assert_eq!(m.view.shown().last(), Some(&Shown::Reload));
    }

    #[tokio::test]
    async fn test_invalid_postal_code_sends_nothing() {
        let m = manager();
        m.calculate_shipping("0131-01").await;
        assert!(m.api.sent.borrow().is_empty());
        assert_eq!(m.view.shown(), vec![Shown::ShippingResult(NoticeKind::Danger, "CEP inválido".into())]);
    }

    #[tokio::test]
    async fn test_shipping_strips_non_digits() {
        let m = manager();
        *m.api.shipping.borrow_mut() = Some(Ok(serde_json::from_str(
            r#"{"success": true, "frete": 15.5, "total": 115.5, "message": "Frete calculado"}"#,
        )
        .unwrap()));

        m.calculate_shipping("01310-100").await;

        assert_eq!(*m.api.sent.borrow(), vec![Sent::Shipping("01310100".into())]);
        assert_eq!(
            m.view.shown(),
            vec![
                Shown::CartShipping(Some(dec("15.5")), Some(dec("115.5"))),
                Shown::ShippingResult(NoticeKind::Success, "Frete calculado".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_shipping_failures() {
        let m = manager();
        *m.api.shipping.borrow_mut() =
            Some(Ok(serde_json::from_str(r#"{"success": false, "message": "CEP não atendido"}"#).unwrap()));
        m.calculate_shipping("01310100").await;
        m.calculate_shipping("01310100").await;
        assert_eq!(
            m.view.shown(),
            vec![
                Shown::ShippingResult(NoticeKind::Danger, "CEP não atendido".into()),
                Shown::ShippingResult(NoticeKind::Danger, SHIPPING_FAILED.into()),
            ]
        );
    }

    fn checkout_fields() -> Vec<FormField> {
        vec![
            FormField::new("nome", "Ana", true),
            FormField::new("cep", "01310-100", true),
            FormField::new("forma_pagamento", "pix", true),
            FormField::new("complemento", "", false),
        ]
    }

    #[tokio::test]
    async fn test_checkout_blocked_by_empty_required_field() {
        let m = checkout_manager("100");
        *m.view.shipping_text.borrow_mut() = "R$ 10,00".into();
        let mut fields = checkout_fields();
        fields[0].value.clear();

        m.submit_checkout(fields).await;

        assert!(m.api.sent.borrow().is_empty());
        let shown = m.view.shown();
        assert!(shown.contains(&Shown::Invalid("nome".into(), true)));
        assert!(shown.contains(&Shown::Invalid("cep".into(), false)));
        assert!(!shown.iter().any(|s| matches!(s, Shown::Invalid(name, _) if name == "complemento")));
        assert_eq!(shown.last(), Some(&Shown::Notice(NoticeKind::Danger, FILL_REQUIRED.into())));
    }

    #[tokio::test]
    async fn test_checkout_blocked_until_shipping_quoted() {
        let m = checkout_manager("100");
        m.submit_checkout(checkout_fields()).await;

        assert!(m.api.sent.borrow().is_empty());
        assert!(m.pause.waited.borrow().is_empty());
        let shown = m.view.shown();
        assert!(shown.contains(&Shown::Notice(NoticeKind::Danger, SHIPPING_REQUIRED.into())));
        assert_eq!(shown.last(), Some(&Shown::FocusPostalCode));
    }

    #[tokio::test]
    async fn test_checkout_success_redirects_after_pause() {
        let m = checkout_manager("100");
        *m.view.shipping_text.borrow_mut() = "R$ 10,00".into();
        *m.api.finalize.borrow_mut() = Some(Ok(serde_json::from_str(
            r#"{"success": true, "redirect_url": "/pedidos/42/pagamento/"}"#,
        )
        .unwrap()));

        m.submit_checkout(checkout_fields()).await;

        assert_eq!(*m.pause.waited.borrow(), vec![2000]);
        assert_eq!(*m.api.sent.borrow(), vec![Sent::Finalize(4)]);
        let shown = m.view.shown();
        assert!(shown.contains(&Shown::SubmitBusy(true)));
        assert_eq!(shown.last(), Some(&Shown::Navigate("/pedidos/42/pagamento/".into())));
    }

    #[tokio::test]
    async fn test_checkout_failure_restores_button() {
        let m = checkout_manager("100");
        *m.view.shipping_text.borrow_mut() = "R$ 10,00".into();

        m.submit_checkout(checkout_fields()).await;

        let shown = m.view.shown();
        assert!(shown.contains(&Shown::Notice(NoticeKind::Danger, CHECKOUT_FAILED.into())));
        assert_eq!(shown.last(), Some(&Shown::SubmitBusy(false)));
    }

    #[test]
    fn test_pix_total() {
        let m = checkout_manager("180");
        *m.view.shipping_text.borrow_mut() = "R$ 20,00".into();
        *m.view.payment.borrow_mut() = Some(PaymentMethod::Pix);

        m.recompute_checkout_total();

        let Shown::CheckoutTotals(totals) = m.view.shown()[0].clone() else {
            panic!("no totals shown");
        };
        assert_eq!(totals.discount, Some(dec("10")));
        assert_eq!(totals.total, dec("190"));
    }

    #[test]
    fn test_no_checkout_data_no_recompute() {
        let m = manager();
        *m.view.payment.borrow_mut() = Some(PaymentMethod::Pix);
        m.recompute_checkout_total();
        assert!(m.view.shown().is_empty());
    }

    #[tokio::test]
    async fn test_postal_code_left_fills_address_and_quotes() {
        let mut m = checkout_manager("100");
        m.lookup.address = Some(Address { logradouro: "Avenida Paulista".into(), ..Address::default() });
        *m.api.shipping.borrow_mut() =
            Some(Ok(serde_json::from_str(r#"{"success": true, "frete": 12.0, "total": 112.0}"#).unwrap()));

        m.postal_code_left("01310-100").await;

        let shown = m.view.shown();
        assert_eq!(shown[0], Shown::Address("Avenida Paulista".into()));
        assert_eq!(shown[1], Shown::CheckoutShipping(dec("12")));
        let Shown::CheckoutTotals(totals) = shown[2].clone() else {
            panic!("no totals shown");
        };
        assert_eq!(totals.total, dec("112"));
    }

    #[tokio::test]
    async fn test_postal_code_left_is_best_effort() {
        let m = checkout_manager("100");
        m.postal_code_left("01310-100").await;
        m.postal_code_left("0131").await;
        assert_eq!(*m.api.sent.borrow(), vec![Sent::Shipping("01310100".into())]);
        assert!(m.view.shown().is_empty());
    }

    #[tokio::test]
    async fn test_add_to_cart() {
        let m = manager();
        *m.api.add.borrow_mut() = Some(Ok(serde_json::from_str(
            r#"{"success": true, "message": "Produto adicionado ao carrinho!", "total_itens": 4}"#,
        )
        .unwrap()));
        m.add_to_cart(11, AddItemRequest { quantity: 2, ..AddItemRequest::default() }).await;
        m.add_to_cart(11, AddItemRequest::default()).await;

        assert_eq!(*m.api.sent.borrow(), vec![Sent::Add(11, 2), Sent::Add(11, 1)]);
        assert_eq!(
            m.view.shown(),
            vec![
                Shown::ItemCount(4),
                Shown::Notice(NoticeKind::Success, "Produto adicionado ao carrinho!".into()),
                Shown::Notice(NoticeKind::Danger, ADD_FAILED.into()),
            ]
        );
    }
}
