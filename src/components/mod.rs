//! UI Components
//!
//! Small Leptos components mounted into the server-rendered pages.

mod notice;
mod quick_filters;
mod save_indicator;

pub use notice::show_notice;
pub use quick_filters::{QuickDateFilters, QuickStatusFilters};
pub use save_indicator::show_save_indicator;

use wasm_bindgen::JsCast;

use crate::dom;

/// Where a mount host goes inside its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    First,
    Last,
}

/// Fresh `<div class=...>` inside the first element matching `parent`, for `mount_to`
pub fn mount_host(parent: &str, class: &str, placement: Placement) -> Option<web_sys::HtmlElement> {
    let parent = dom::query(parent)?;
    let host = dom::create("div", Some(class))?;
    let attached = match placement {
        Placement::First => parent.prepend_with_node_1(&host),
        Placement::Last => parent.append_child(&host).map(|_| ()),
    };
    if let Err(e) = attached {
        log::warn!("[UI] could not attach {}: {:?}", class, e);
        return None;
    }
    host.dyn_into().ok()
}
