//! Admin Theme Enhancer
//!
//! Visual polish for the admin theme: animated statistics, the mobile nav
//! toggle, entrance animations, form hints, message handling, the stored
//! colour theme, live search and sort arrows.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event};

use crate::animation::{parse_leading_int, tween_value};
use crate::config::Timings;
use crate::dom;
use crate::events::EventRegistry;
use crate::money::format_grouped;
use crate::storage::{browser_storage, KeyValueStorage};

pub const THEME_KEY: &str = "admin-theme";
pub const SEARCH_PLACEHOLDER: &str = "Pesquisar... (Ctrl+F)";
pub const CONFIRM_DELETE_ITEM: &str = "⚠️ Tem certeza que deseja excluir este item? Esta ação não pode ser desfeita.";
const REQUIRED_FIELDS: &str = "input[required], textarea[required], select[required]";
const COUNTER_WARN_BELOW: i64 = 50;
const FRAME_MS: u32 = 16;

/// Toggle button shows at or below the breakpoint
pub fn nav_toggle_visible(width: f64, breakpoint: f64) -> bool {
    width <= breakpoint
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEvent {
    /// Click on the mobile menu button
    Toggle,
    Resize { width: f64 },
}

/// Whether `#nav-sidebar` carries `show` after `event`.
/// Growing past the breakpoint always closes it.
pub fn nav_shown(shown: bool, event: NavEvent, breakpoint: f64) -> bool {
    match event {
        NavEvent::Toggle => !shown,
        NavEvent::Resize { width } => shown && nav_toggle_visible(width, breakpoint),
    }
}

fn apply_nav_event(event: NavEvent, breakpoint: f64) {
    if let Some(nav) = dom::query("#nav-sidebar") {
        let shown = nav.class_list().contains("show");
        dom::set_class(&nav, "show", nav_shown(shown, event, breakpoint));
    }
}

/// Live search submits once the query is long enough, or cleared
pub fn should_submit_search(query: &str, min_chars: usize) -> bool {
    let len = query.chars().count();
    len == 0 || len >= min_chars
}

/// `"n/max caracteres"` and whether fewer than 50 remain
pub fn char_counter(len: usize, max: usize) -> (String, bool) {
    let remaining = max as i64 - len as i64;
    (format!("{}/{} caracteres", len, max), remaining < COUNTER_WARN_BELOW)
}

/// Arrow for a sortable header, unless the label already has one
pub fn sort_arrow(href: &str, label: &str) -> Option<&'static str> {
    if !href.contains("o=") || label.contains('↑') || label.contains('↓') {
        return None;
    }
    Some(if href.contains('-') { " ↓" } else { " ↑" })
}

pub fn button_title(text: &str) -> Option<&'static str> {
    if text.contains("Salvar") {
        Some("Salvar alterações (Ctrl+S)")
    } else if text.contains("Excluir") {
        Some("Excluir item selecionado")
    } else if text.contains("Adicionar") {
        Some("Adicionar novo item")
    } else {
        None
    }
}

/// Stored choice wins; otherwise dark follows the system
pub fn theme_preference(saved: Option<&str>, prefers_dark: bool) -> Option<String> {
    match saved {
        Some(theme) if !theme.is_empty() => Some(theme.to_string()),
        _ if prefers_dark => Some("dark".to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Valid,
    Invalid,
}

impl FieldState {
    pub fn of(value: &str) -> Self {
        if value.trim().is_empty() {
            FieldState::Invalid
        } else {
            FieldState::Valid
        }
    }

    /// `(border-color, box-shadow)`
    pub fn style(&self) -> (&'static str, &'static str) {
        match self {
            FieldState::Valid => ("#4CAF50", "0 0 0 3px rgba(76, 175, 80, 0.1)"),
            FieldState::Invalid => ("#F44336", "0 0 0 3px rgba(244, 67, 54, 0.1)"),
        }
    }
}

/// When a message shows and, unless it is an error, when it leaves
pub fn message_schedule(index: usize, is_error: bool, timings: &Timings) -> (u32, Option<u32>) {
    let show_at = index as u32 * timings.message_stagger_ms;
    (show_at, (!is_error).then_some(timings.message_dismiss_ms))
}

/// Call `on_visible` once per element the first time it scrolls into view.
/// The second argument is the element's position within its batch of entries.
fn observe_once<F>(elements: Vec<Element>, threshold: f64, root_margin: Option<&str>, on_visible: F)
where
    F: Fn(Element, usize) + 'static,
{
    if elements.is_empty() {
        return;
    }
    let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
            let visible = entries
                .iter()
                .filter_map(|e| e.dyn_into::<web_sys::IntersectionObserverEntry>().ok())
                .filter(|e| e.is_intersecting());
            for (index, entry) in visible.enumerate() {
                let target = entry.target();
                observer.unobserve(&target);
                on_visible(target, index);
            }
        },
    );
    let init = web_sys::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    match web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            for el in &elements {
                observer.observe(el);
            }
        }
        Err(e) => log::warn!("[THEME] IntersectionObserver unavailable: {:?}", e),
    }
    callback.forget();
}

fn animate_statistics(timings: &Timings) {
    let (delay, duration) = (timings.stat_delay_ms, timings.stat_duration_ms);
    observe_once(
        dom::query_all(".stat-card .number"),
        0.1,
        Some("0px 0px -50px 0px"),
        move |el, _| {
            let target = el.text_content().as_deref().and_then(parse_leading_int).unwrap_or(0);
            el.set_text_content(Some("0"));
            spawn_local(async move {
                TimeoutFuture::new(delay).await;
                let start = js_sys::Date::now();
                loop {
                    let (value, done) = tween_value(0, target, js_sys::Date::now() - start, f64::from(duration));
                    el.set_text_content(Some(&format_grouped(value)));
                    if done {
                        break;
                    }
                    TimeoutFuture::new(FRAME_MS).await;
                }
            });
        },
    );
}

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(f64::MAX)
}

fn install_mobile_nav(timings: &Timings) {
    let Some(header) = dom::query("#header") else {
        return;
    };
    if dom::exists(".mobile-menu-toggle") {
        return;
    }
    let Some(toggle) = dom::create("button", Some("mobile-menu-toggle")) else {
        return;
    };
    toggle.set_inner_html(
        r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><line x1="3" y1="6" x2="21" y2="6"></line><line x1="3" y1="12" x2="21" y2="12"></line><line x1="3" y1="18" x2="21" y2="18"></line></svg>"#,
    );
    toggle.set_attribute("type", "button").ok();
    toggle.set_attribute(
        "style",
        "display: none; background: transparent; border: none; color: #FFD700; padding: 8px; cursor: pointer; \
         position: absolute; right: 20px; top: 50%; transform: translateY(-50%); z-index: 1001;",
    )
    .ok();
    if header.append_child(&toggle).is_err() {
        return;
    }

    let breakpoint = timings.nav_breakpoint_px;
    let check = Rc::new(move || {
        let width = viewport_width();
        let visible = nav_toggle_visible(width, breakpoint);
        if let Some(toggle) = dom::query(".mobile-menu-toggle") {
            dom::set_style(&toggle, "display", Some(if visible { "block" } else { "none" }));
        }
        apply_nav_event(NavEvent::Resize { width }, breakpoint);
    });
    check();

    let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
    let debounce_ms = timings.resize_debounce_ms;
    dom_keybind::bind_window_listener("resize", move |_| {
        let check = Rc::clone(&check);
        // Replacing the pending timeout drops (cancels) it
        pending.replace(Some(Timeout::new(debounce_ms, move || check())));
    });
}

fn entrance_animations(timings: &Timings) {
    let elements = dom::query_all(".stat-card, .form-row, #result_list tbody tr");
    for el in &elements {
        dom::set_style(el, "opacity", Some("0"));
        dom::set_style(el, "transform", Some("translateY(20px)"));
        dom::set_style(el, "transition", Some("opacity 0.6s ease, transform 0.6s ease"));
    }
    let stagger = timings.entrance_stagger_ms;
    observe_once(elements, 0.1, None, move |el, index| {
        Timeout::new(index as u32 * stagger, move || {
            dom::set_style(&el, "opacity", Some("1"));
            dom::set_style(&el, "transform", Some("translateY(0)"));
        })
        .forget();
    });
}

fn enhance_forms() {
    if !dom::exists(".has-error") {
        dom::focus(
            "input[type=\"text\"]:not([readonly]), input[type=\"email\"]:not([readonly]), textarea:not([readonly])",
        );
    }

    for el in dom::query_all("input[type=\"date\"], input[type=\"datetime-local\"], input[type=\"time\"]") {
        dom::set_style(&el, "cursor", Some("pointer"));
    }

    for button in dom::query_all(".button, input[type=\"submit\"]") {
        if button.get_attribute("title").is_some_and(|t| !t.is_empty()) {
            continue;
        }
        let text = match button.dyn_ref::<web_sys::HtmlInputElement>() {
            Some(input) => input.value(),
            None => button.text_content().unwrap_or_default(),
        };
        if let Some(title) = button_title(text.trim()) {
            button.set_attribute("title", title).ok();
        }
    }

    for field in dom::query_all(REQUIRED_FIELDS) {
        let id = field.id();
        if id.is_empty() {
            continue;
        }
        let Some(label) = dom::query(&format!("label[for=\"{}\"]", id)) else {
            continue;
        };
        if !dom::query_within(&label, ".required-indicator").is_empty() {
            continue;
        }
        if let Some(marker) = dom::create("span", Some("required-indicator")) {
            marker.set_text_content(Some(" *"));
            marker.set_attribute("style", "color: #B71C1C; font-weight: bold;").ok();
            label.append_child(&marker).ok();
        }
    }

    for area in dom::query_all("textarea[maxlength]") {
        let Some(max) = area.get_attribute("maxlength").and_then(|m| m.parse::<usize>().ok()).filter(|m| *m > 0) else {
            continue;
        };
        let Some(counter) = dom::create("div", Some("char-counter")) else {
            continue;
        };
        counter.set_attribute("style", "text-align: right; font-size: 12px; color: #666; margin-top: 4px;").ok();
        if area.after_with_node_1(&counter).is_ok() {
            update_counter(&area, max);
        }
    }
}

fn update_counter(area: &Element, max: usize) {
    let Some(counter) = area.next_element_sibling().filter(|s| s.class_list().contains("char-counter")) else {
        return;
    };
    let len = dom::control_value(area).map_or(0, |v| v.chars().count());
    let (text, warn) = char_counter(len, max);
    counter.set_text_content(Some(&text));
    dom::set_style(&counter, "color", Some(if warn { "#F44336" } else { "#666" }));
}

fn mark_sortable_headers() {
    for link in dom::query_all("#result_list th a") {
        let href = link.get_attribute("href").unwrap_or_default();
        let label = link.text_content().unwrap_or_default();
        if let Some(arrow) = sort_arrow(&href, &label) {
            link.set_text_content(Some(&format!("{}{}", label, arrow)));
        }
    }
}

fn dismiss_message(message: &Element, fade_ms: u32) {
    dom::set_style(message, "transform", Some("translateX(100%)"));
    dom::set_style(message, "opacity", Some("0"));
    let message = message.clone();
    Timeout::new(fade_ms, move || message.remove()).forget();
}

fn stage_messages(timings: &Timings) {
    for (index, message) in dom::query_all(".messagelist li").into_iter().enumerate() {
        dom::set_style(&message, "transform", Some("translateX(100%)"));
        dom::set_style(&message, "opacity", Some("0"));
        dom::set_style(&message, "transition", Some("transform 0.3s ease, opacity 0.3s ease"));
        dom::set_style(&message, "cursor", Some("pointer"));

        let (show_at, dismiss_at) = message_schedule(index, message.class_list().contains("error"), timings);
        let shown = message.clone();
        Timeout::new(show_at, move || {
            dom::set_style(&shown, "transform", Some("translateX(0)"));
            dom::set_style(&shown, "opacity", Some("1"));
        })
        .forget();
        if let Some(dismiss_at) = dismiss_at {
            let fade_ms = timings.fade_out_ms;
            Timeout::new(dismiss_at, move || dismiss_message(&message, fade_ms)).forget();
        }
    }
}

fn apply_theme() {
    let saved = browser_storage().get(THEME_KEY).unwrap_or_else(|e| {
        log::warn!("[THEME] {}", e);
        None
    });
    let prefers_dark = web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|m| m.matches());
    if let Some(theme) = theme_preference(saved.as_deref(), prefers_dark) {
        if let Some(body) = dom::document().and_then(|d| d.body()) {
            body.set_attribute("data-theme", &theme).ok();
        }
    }
}

fn register_routes(registry: &mut EventRegistry, timings: &Timings) {
    registry.on("click", ".deletelink, a[href*=\"delete\"]", |ev: &Event, _: &Element| {
        if !dom::confirm(CONFIRM_DELETE_ITEM) {
            ev.prevent_default();
        }
    });

    let breakpoint = timings.nav_breakpoint_px;
    registry.on("click", ".mobile-menu-toggle", move |_: &Event, _: &Element| {
        apply_nav_event(NavEvent::Toggle, breakpoint);
    });

    registry.on("click", "#result_list tbody tr", |_: &Event, row: &Element| {
        for other in dom::query_all("#result_list tbody tr") {
            dom::set_style(&other, "background-color", None);
        }
        dom::set_style(row, "background-color", Some("rgba(183, 28, 28, 0.1)"));
    });

    registry.on("focusout", REQUIRED_FIELDS, |_: &Event, field: &Element| {
        let (border, shadow) = FieldState::of(&dom::control_value(field).unwrap_or_default()).style();
        dom::set_style(field, "border-color", Some(border));
        dom::set_style(field, "box-shadow", Some(shadow));
    });

    registry.on("input", "textarea[maxlength]", |_: &Event, area: &Element| {
        if let Some(max) = area.get_attribute("maxlength").and_then(|m| m.parse().ok()) {
            update_counter(area, max);
        }
    });

    let fade_ms = timings.fade_out_ms;
    registry.on("click", ".messagelist li", move |_: &Event, message: &Element| {
        dismiss_message(message, fade_ms);
    });

    if let Some(search) = dom::query("input[name=\"q\"]") {
        search.set_attribute("placeholder", SEARCH_PLACEHOLDER).ok();
        let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
        let (debounce_ms, min_chars) = (timings.search_debounce_ms, timings.search_min_chars);
        registry.on("input", "input[name=\"q\"]", move |_: &Event, input: &Element| {
            let input = input.clone();
            pending.replace(Some(Timeout::new(debounce_ms, move || {
                let query = dom::control_value(&input).unwrap_or_default();
                if !should_submit_search(&query, min_chars) {
                    return;
                }
                if let Some(form) = input.closest("form").ok().flatten() {
                    if let Ok(form) = form.dyn_into::<web_sys::HtmlFormElement>() {
                        form.submit().ok();
                    }
                }
            })));
        });
    }
}

pub fn install(registry: &mut EventRegistry, timings: &Timings) {
    log::info!("[THEME] admin theme loaded");
    animate_statistics(timings);
    install_mobile_nav(timings);
    entrance_animations(timings);
    enhance_forms();
    mark_sortable_headers();
    stage_messages(timings);
    apply_theme();
    register_routes(registry, timings);
}
