//! Admin Dashboard Enhancer
//!
//! Counters, confirmations, tooltips, row selection, draft autosave, date
//! masks and quick filters for the back-office pages.

use std::collections::BTreeMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use crate::animation::{parse_leading_int, CounterAnimation};
use crate::components::{mount_host, show_save_indicator, Placement, QuickDateFilters, QuickStatusFilters};
use crate::config::Timings;
use crate::dom;
use crate::draft::{DraftAutosave, DraftStore};
use crate::error::UiError;
use crate::events::EventRegistry;
use crate::mask::mask_date;
use crate::storage::browser_storage;

pub const CONFIRM_DELETE_ACTION: &str =
    "⚠️ Tem certeza que deseja executar esta ação? Esta operação não pode ser desfeita.";
pub const CONFIRM_BULK_ACTION: &str = "⚠️ Confirma a execução desta ação em massa?";
pub const DATE_PLACEHOLDER: &str = "dd/mm/aaaa";
const DRAFT_FORMS: &str = "#changelist-form, .change-form";

pub const TOOLTIPS: [(&str, &str); 4] = [
    ("input[name=\"status\"]", "Altere o status do pedido aqui"),
    ("input[name=\"pagamento_confirmado\"]", "Marque quando o pagamento for confirmado"),
    ("input[name=\"ativo\"]", "Desative para ocultar o cliente/produto"),
    (".action-checkbox", "Selecione itens para ações em massa"),
];

/// Bulk actions that cancel or delete ask first
pub fn needs_bulk_confirmation(action: &str) -> bool {
    action.contains("cancelar") || action.contains("deletar")
}

/// Clicks on links and inputs keep their own meaning
pub fn row_click_toggles(target_tag: &str) -> bool {
    !target_tag.eq_ignore_ascii_case("a") && !target_tag.eq_ignore_ascii_case("input")
}

/// Form controls worth keeping in a draft
pub fn draft_fields(controls: Vec<(String, String, bool)>) -> BTreeMap<String, String> {
    controls
        .into_iter()
        .filter(|(name, _, _)| name != "csrfmiddlewaretoken")
        .map(|(name, value, _)| (name, value))
        .collect()
}

/// Identifier for this tab's draft writes
pub fn tab_id(now_ms: f64, random: f64) -> String {
    format!("tab-{:x}-{:06x}", now_ms as u64, (random * f64::from(0xff_ffff)) as u32)
}

fn start_counters(timings: &Timings) {
    for el in dom::query_all(".dashboard-number") {
        let Some(target) = el.text_content().as_deref().and_then(parse_leading_int) else {
            continue;
        };
        let frames = CounterAnimation::new(target, timings.counter_duration_ms, timings.counter_tick_ms);
        let tick = timings.counter_tick_ms;
        spawn_local(async move {
            for value in frames {
                TimeoutFuture::new(tick).await;
                el.set_text_content(Some(&value.to_string()));
            }
        });
    }
}

fn add_tooltips() {
    for (selector, text) in TOOLTIPS {
        for el in dom::query_all(selector) {
            el.set_attribute("title", text).ok();
            dom::set_style(&el, "cursor", Some("help"));
        }
    }
}

fn prepare_date_fields() {
    for el in dom::query_all("input[type=\"date\"], .vDateField") {
        if el.get_attribute("placeholder").map_or(true, |p| p.is_empty()) {
            el.set_attribute("placeholder", DATE_PLACEHOLDER).ok();
        }
    }
}

fn mount_quick_filters() {
    if !dom::exists("#changelist-filter") {
        return;
    }
    if let Some(host) = mount_host("#changelist-filter", "quick-filters-host", Placement::First) {
        mount_to(host, QuickStatusFilters).forget();
    }
    if let Some(host) = mount_host("#changelist-filter", "quick-date-filters-host", Placement::Last) {
        mount_to(host, QuickDateFilters).forget();
    }
}

fn register_confirmations(registry: &mut EventRegistry) {
    registry.on(
        "click",
        "input[value*=\"delete\"], input[value*=\"deletar\"]",
        |ev: &Event, _: &Element| {
            if !dom::confirm(CONFIRM_DELETE_ACTION) {
                ev.prevent_default();
            }
        },
    );
    registry.on("submit", "form", |ev: &Event, form: &Element| {
        let action = dom::query_within(form, "select[name=\"action\"]")
            .first()
            .and_then(dom::control_value)
            .unwrap_or_default();
        if needs_bulk_confirmation(&action) && !dom::confirm(CONFIRM_BULK_ACTION) {
            ev.prevent_default();
        }
    });
}

fn register_row_selection(registry: &mut EventRegistry) {
    registry.on("click", "#changelist-table tbody tr", |ev: &Event, row: &Element| {
        let tag = ev
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .map(|t| t.tag_name())
            .unwrap_or_default();
        if !row_click_toggles(&tag) {
            return;
        }
        let Some(checkbox) = dom::query_within(row, ".action-checkbox")
            .into_iter()
            .next()
            .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let checked = !checkbox.checked();
        checkbox.set_checked(checked);
        dom::set_class(row, "selected", checked);
    });
    registry.on("mouseover", "#changelist-table tbody tr", |_: &Event, row: &Element| {
        dom::set_style(row, "background-color", Some("#fef2f2"));
    });
    registry.on("mouseout", "#changelist-table tbody tr", |_: &Event, row: &Element| {
        if !row.class_list().contains("selected") {
            dom::set_style(row, "background-color", None);
        }
    });
}

fn register_date_mask(registry: &mut EventRegistry) {
    registry.on("input", ".vDateField", |_: &Event, el: &Element| {
        if let Some(value) = dom::control_value(el) {
            dom::set_control_value(el, &mask_date(&value));
        }
    });
}

fn register_autosave(registry: &mut EventRegistry, timings: &Timings) {
    if !dom::exists(DRAFT_FORMS) {
        return;
    }
    let path = dom::location_path().unwrap_or_default();
    let tab = tab_id(js_sys::Date::now(), js_sys::Math::random());
    let store = DraftStore::new(browser_storage(), &path, tab);
    match store.load() {
        Ok(Some(draft)) => log::info!("[DRAFT] {} has a draft v{} from {}", store.key(), draft.version, draft.saved_at),
        Ok(None) => {}
        Err(e) => log::warn!("[DRAFT] unreadable draft at {}: {}", store.key(), e),
    }
    let autosave = Rc::new(DraftAutosave::new(store));
    let timings = *timings;

    let on_input = Rc::clone(&autosave);
    registry.on("input", DRAFT_FORMS, move |_: &Event, form: &Element| {
        let ticket = on_input.on_input();
        let autosave = Rc::clone(&on_input);
        let form = form.clone();
        Timeout::new(timings.draft_idle_ms, move || {
            let fields = draft_fields(dom::form_controls(&form));
            match autosave.on_idle(ticket, fields, chrono::Utc::now()) {
                None => {}
                Some(Ok(_)) => show_save_indicator(&timings),
                Some(Err(UiError::DraftConflict { stored, expected })) => log::warn!(
                    "[DRAFT] another tab saved v{} over v{}; next save builds on it",
                    stored,
                    expected
                ),
                Some(Err(e)) => log::error!("[DRAFT] save failed: {}", e),
            }
        })
        .forget();
    });

    registry.on("submit", DRAFT_FORMS, move |ev: &Event, _: &Element| {
        if ev.default_prevented() {
            return;
        }
        if let Err(e) = autosave.store().clear() {
            log::warn!("[DRAFT] could not clear draft: {}", e);
        }
    });
}

/// Run the load-time effects and register the dashboard routes
pub fn install(registry: &mut EventRegistry, timings: &Timings) {
    start_counters(timings);
    add_tooltips();
    prepare_date_fields();
    mount_quick_filters();
    register_confirmations(registry);
    register_row_selection(registry);
    register_date_mask(registry);
    register_autosave(registry, timings);
    log::debug!("[ADMIN] dashboard enhancer ready");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_confirmation() {
        assert!(needs_bulk_confirmation("cancelar_pedidos"));
        assert!(needs_bulk_confirmation("deletar_selecionados"));
        assert!(!needs_bulk_confirmation("marcar_como_enviado"));
        assert!(!needs_bulk_confirmation(""));
    }

    #[test]
    fn test_row_click_toggles() {
        assert!(row_click_toggles("TD"));
        assert!(row_click_toggles("SPAN"));
        assert!(!row_click_toggles("A"));
        assert!(!row_click_toggles("INPUT"));
    }

    #[test]
    fn test_draft_fields_skip_csrf() {
        let fields = draft_fields(vec![
            ("csrfmiddlewaretoken".into(), "tok".into(), false),
            ("nome".into(), "Ana".into(), true),
            ("status".into(), "enviado".into(), false),
        ]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["nome"], "Ana");
        assert!(!fields.contains_key("csrfmiddlewaretoken"));
    }

    #[test]
    fn test_tab_id_shape() {
        let id = tab_id(1_700_000_000_000.0, 0.5);
        assert!(id.starts_with("tab-18bcfe56800-"));
        assert_ne!(id, tab_id(1_700_000_000_000.0, 0.25));
    }
}
