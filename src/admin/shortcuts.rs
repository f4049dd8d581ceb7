//! Admin Keyboard Shortcuts
//!
//! One table for every admin page. A combo is resolved against a snapshot of
//! what the page offers; only a resolved combo suppresses the browser default.

use dom_keybind::{Key, KeyCombo};
use wasm_bindgen::JsCast;

use crate::dom;

pub const SAVE_CONTROLS: [&str; 3] = [
    "input[type=\"submit\"][name=\"_save\"]",
    "input[type=\"submit\"][value*=\"Salvar\"]",
    ".button.default",
];
pub const SEARCH_INPUT: &str = "input[name=\"q\"]";
pub const MODAL: &str = ".modal, .popup";
pub const CANCEL_CONTROL: &str = ".cancel-link, input[name=\"_cancel\"]";
pub const ADD_LINK: &str = "a[href*=\"add/\"]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Save,
    SelectAll,
    Home,
    AddNew,
    FocusSearch,
    CloseModal,
    Cancel,
    Back,
}

/// What the current page offers, taken when a key is pressed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub path: String,
    pub has_save_control: bool,
    pub has_changelist_table: bool,
    pub has_add_link: bool,
    pub has_search: bool,
    pub has_modal: bool,
    pub has_cancel_control: bool,
}

impl PageContext {
    pub fn is_changelist(&self) -> bool {
        self.path.contains("changelist") || self.has_changelist_table
    }

    pub fn capture() -> Self {
        Self {
            path: dom::location_path().unwrap_or_default(),
            has_save_control: SAVE_CONTROLS.iter().any(|s| dom::exists(s)),
            has_changelist_table: dom::exists("#changelist-table"),
            has_add_link: dom::exists(ADD_LINK),
            has_search: dom::exists(SEARCH_INPUT),
            has_modal: dom::exists(MODAL),
            has_cancel_control: dom::exists(CANCEL_CONTROL),
        }
    }
}

pub fn resolve(combo: &KeyCombo, page: &PageContext) -> Option<ShortcutAction> {
    if combo.alt || combo.shift {
        return None;
    }
    match (combo.ctrl, combo.key) {
        (true, Key::Char('s')) if page.has_save_control => Some(ShortcutAction::Save),
        (true, Key::Char('a')) if page.has_changelist_table => Some(ShortcutAction::SelectAll),
        (true, Key::Char('h')) => Some(ShortcutAction::Home),
        (true, Key::Char('n')) if page.is_changelist() && page.has_add_link => Some(ShortcutAction::AddNew),
        (true, Key::Char('f')) if page.has_search => Some(ShortcutAction::FocusSearch),
        (false, Key::Escape) if page.has_modal => Some(ShortcutAction::CloseModal),
        (false, Key::Escape) if page.has_cancel_control => Some(ShortcutAction::Cancel),
        (false, Key::Escape) => Some(ShortcutAction::Back),
        _ => None,
    }
}

fn perform(action: ShortcutAction, admin_home: &str) {
    log::debug!("[ADMIN] shortcut {:?}", action);
    match action {
        ShortcutAction::Save => {
            if !SAVE_CONTROLS.iter().any(|s| dom::click(s)) {
                log::debug!("[ADMIN] save control vanished");
            }
        }
        ShortcutAction::SelectAll => {
            dom::click("#action-toggle");
        }
        ShortcutAction::Home => dom::navigate(admin_home),
        ShortcutAction::AddNew => {
            if let Some(href) = dom::query(ADD_LINK)
                .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok())
                .map(|a| a.href())
            {
                dom::navigate(&href);
            }
        }
        ShortcutAction::FocusSearch => {
            if let Some(input) = dom::query(SEARCH_INPUT).and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                let _ = input.focus();
                input.select();
            }
        }
        ShortcutAction::CloseModal => {
            if let Some(modal) = dom::query(MODAL) {
                dom::set_style(&modal, "display", Some("none"));
            }
        }
        ShortcutAction::Cancel => {
            dom::click(CANCEL_CONTROL);
        }
        ShortcutAction::Back => {
            if let Some(win) = web_sys::window() {
                let _ = win.history().and_then(|h| h.back());
            }
        }
    }
}

pub fn install(admin_home: String) {
    dom_keybind::bind_global_keydown(move |combo, _ev| match resolve(&combo, &PageContext::capture()) {
        Some(action) => {
            perform(action, &admin_home);
            true
        }
        None => false,
    });
}
