//! DOM Keybind Utilities
//!
//! Keyboard shortcut matching plus document/window listener binding.
//! Combos are plain data, so shortcut tables can be tested off the browser.

use std::fmt;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Keys a shortcut can be bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Single printable character, lowercased
    Char(char),
    Escape,
    Enter,
    /// Anything else (arrows, function keys, dead keys...)
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key_value(value: &str) -> Self {
        match value {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            _ => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// A key plus its modifier state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyCombo {
    /// Key with no modifiers
    pub const fn plain(key: Key) -> Self {
        Self { key, ctrl: false, shift: false, alt: false }
    }

    /// Ctrl + character
    pub const fn ctrl(c: char) -> Self {
        Self { key: Key::Char(c), ctrl: true, shift: false, alt: false }
    }

    pub fn from_parts(key: &str, ctrl: bool, shift: bool, alt: bool) -> Self {
        Self { key: Key::from_key_value(key), ctrl, shift, alt }
    }

    pub fn from_event(ev: &web_sys::KeyboardEvent) -> Self {
        Self::from_parts(&ev.key(), ev.ctrl_key(), ev.shift_key(), ev.alt_key())
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Key::Escape => f.write_str("Esc"),
            Key::Enter => f.write_str("Enter"),
            Key::Other => f.write_str("?"),
        }
    }
}

/// Bind a document-level keydown handler.
///
/// The handler returns `true` when it consumed the combo; the browser default
/// is prevented only in that case.
pub fn bind_global_keydown<F>(on_key: F)
where
    F: Fn(KeyCombo, &web_sys::KeyboardEvent) -> bool + 'static,
{
    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        let combo = KeyCombo::from_event(&ev);
        if on_key(combo, &ev) {
            ev.prevent_default();
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
    }
    on_keydown.forget();
}

/// Bind a document-level listener for any event type (delegation root)
pub fn bind_document_listener<F>(event_type: &str, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback(event_type, cb.as_ref().unchecked_ref());
        }
    }
    cb.forget();
}

/// Bind a window-level listener (resize, load...)
pub fn bind_window_listener<F>(event_type: &str, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback(event_type, cb.as_ref().unchecked_ref());
    }
    cb.forget();
}
