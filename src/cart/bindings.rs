//! Storefront Event Routes

use std::rc::Rc;

use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use super::{CartManager, CartView, Pause};
use crate::api::{AddressLookup, CartApi};
use crate::checkout::FormField;
use crate::dom;
use crate::events::EventRegistry;
use crate::mask::{mask_cpf, mask_phone, mask_postal_code};
use crate::models::{AddItemRequest, ItemId, ProductId};
use crate::quantity::{parse_requested, QuantityChange, QuantityInput};

fn item_id(el: &Element) -> Option<ItemId> {
    el.get_attribute("data-item-id")?.trim().parse().ok()
}

/// Quantity input state from its value and `max` attribute; a missing `max` leaves it unbounded
pub fn read_quantity(value: &str, max: Option<&str>) -> QuantityInput {
    let value = parse_requested(value).clamp(1, i64::from(u32::MAX)) as u32;
    let max = max.and_then(|m| m.trim().parse().ok()).unwrap_or(u32::MAX);
    QuantityInput::new(value, max)
}

fn quantity_of(item: ItemId) -> Option<QuantityInput> {
    let input = dom::query(&format!(".quantity-input[data-item-id=\"{}\"]", item))?;
    let value = dom::control_value(&input)?;
    Some(read_quantity(&value, input.get_attribute("max").as_deref()))
}

/// `data-add-to-cart` plus optional `data-quantity`, `data-size`, `data-color`
pub fn add_request(product: Option<&str>, quantity: Option<&str>, size: Option<&str>, color: Option<&str>) -> Option<(ProductId, AddItemRequest)> {
    let product = product?.trim().parse().ok()?;
    let quantity = quantity.and_then(|q| q.trim().parse().ok()).filter(|q| *q > 0).unwrap_or(1);
    Some((
        product,
        AddItemRequest {
            quantity,
            size: size.unwrap_or_default().to_string(),
            color: color.unwrap_or_default().to_string(),
        },
    ))
}

fn masked(el: &Element, mask: fn(&str) -> String) {
    if let Some(value) = dom::control_value(el) {
        let next = mask(&value);
        if next != value {
            dom::set_control_value(el, &next);
        }
    }
}

/// Register the storefront routes.
///
/// The checkout-only postal code blur is bound only when the checkout form is on the page.
pub fn install<A, L, V, P>(registry: &mut EventRegistry, manager: Rc<CartManager<A, L, V, P>>, on_checkout: bool)
where
    A: CartApi + 'static,
    L: AddressLookup + 'static,
    V: CartView + 'static,
    P: Pause + 'static,
{
    registry
        .on("input", "#cep", |_: &Event, el: &Element| masked(el, mask_postal_code))
        .on("input", "#telefone", |_: &Event, el: &Element| masked(el, mask_phone))
        .on("input", "#cpf", |_: &Event, el: &Element| masked(el, mask_cpf));

    let m = Rc::clone(&manager);
    registry.on("submit", "#calcular-frete", move |ev: &Event, _: &Element| {
        ev.prevent_default();
        let cep = dom::input_value("#cep").unwrap_or_default();
        let m = Rc::clone(&m);
        spawn_local(async move { m.calculate_shipping(&cep).await });
    });

    for (selector, change) in [(".btn-increase", QuantityChange::Increase), (".btn-decrease", QuantityChange::Decrease)] {
        let m = Rc::clone(&manager);
        registry.on("click", selector, move |_: &Event, el: &Element| {
            let Some(item) = item_id(el) else { return };
            let Some(input) = quantity_of(item) else { return };
            let m = Rc::clone(&m);
            spawn_local(async move { m.change_quantity(item, input, change).await });
        });
    }

    let m = Rc::clone(&manager);
    registry.on("change", ".quantity-input", move |_: &Event, el: &Element| {
        let Some(item) = item_id(el) else { return };
        let typed = dom::control_value(el).unwrap_or_default();
        let input = read_quantity(&typed, el.get_attribute("max").as_deref());
        let change = QuantityChange::Set(parse_requested(&typed));
        let m = Rc::clone(&m);
        spawn_local(async move { m.change_quantity(item, input, change).await });
    });

    let m = Rc::clone(&manager);
    registry.on("click", ".btn-remove", move |_: &Event, el: &Element| {
        let Some(item) = item_id(el) else { return };
        let m = Rc::clone(&m);
        spawn_local(async move { m.remove_item(item).await });
    });

    let m = Rc::clone(&manager);
    registry.on("click", "#limpar-carrinho", move |_: &Event, _: &Element| {
        let m = Rc::clone(&m);
        spawn_local(async move { m.clear_cart().await });
    });

    let m = Rc::clone(&manager);
    registry.on("click", "[data-add-to-cart]", move |ev: &Event, el: &Element| {
        ev.prevent_default();
        let request = add_request(
            el.get_attribute("data-add-to-cart").as_deref(),
            el.get_attribute("data-quantity").as_deref(),
            el.get_attribute("data-size").as_deref(),
            el.get_attribute("data-color").as_deref(),
        );
        let Some((product, request)) = request else {
            log::warn!("[CART] add-to-cart control without a product id");
            return;
        };
        let m = Rc::clone(&m);
        spawn_local(async move { m.add_to_cart(product, request).await });
    });

    if !on_checkout {
        return;
    }

    let m = Rc::clone(&manager);
    registry.on("focusout", "#cep", move |_: &Event, el: &Element| {
        let cep = dom::control_value(el).unwrap_or_default();
        let m = Rc::clone(&m);
        spawn_local(async move { m.postal_code_left(&cep).await });
    });

    let m = Rc::clone(&manager);
    registry.on("click", ".payment-option", move |_: &Event, el: &Element| {
        for option in dom::query_all(".payment-option") {
            dom::set_class(&option, "selected", false);
        }
        dom::set_class(el, "selected", true);
        if let Some(radio) = dom::query_within(el, "input[type=\"radio\"]").into_iter().next() {
            if let Some(radio) = radio.dyn_ref::<web_sys::HtmlInputElement>() {
                radio.set_checked(true);
            }
        }
        m.recompute_checkout_total();
    });

    let m = manager;
    registry.on("submit", "#checkout-form", move |ev: &Event, form: &Element| {
        ev.prevent_default();
        let fields: Vec<FormField> = dom::form_controls(form)
            .into_iter()
            .map(|(name, value, required)| FormField::new(name, value, required))
            .collect();
        let m = Rc::clone(&m);
        spawn_local(async move { m.submit_checkout(fields).await });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_quantity() {
        assert_eq!(read_quantity("3", Some("5")), QuantityInput::new(3, 5));
        assert_eq!(read_quantity("abc", Some("5")), QuantityInput::new(1, 5));
        assert_eq!(read_quantity("0", Some("5")), QuantityInput::new(1, 5));
        assert_eq!(read_quantity("2", None), QuantityInput::new(2, u32::MAX));
    }

    #[test]
    fn test_add_request_defaults() {
        let (product, request) = add_request(Some("11"), None, None, None).unwrap();
        assert_eq!(product, 11);
        assert_eq!(request, AddItemRequest::default());

        let (_, request) = add_request(Some("11"), Some("3"), Some("M"), Some("preto")).unwrap();
        assert_eq!(request.quantity, 3);
        assert_eq!(request.size, "M");
        assert_eq!(request.color, "preto");

        assert_eq!(add_request(Some("11"), Some("0"), None, None).unwrap().1.quantity, 1);
        assert!(add_request(Some("x"), None, None, None).is_none());
        assert!(add_request(None, None, None, None).is_none());
    }
}
