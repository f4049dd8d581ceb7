//! Notice Component
//!
//! Dismissible page alert. Only one is shown at a time.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use super::{mount_host, Placement};
use crate::cart::NoticeKind;
use crate::dom;

const HOST_CLASS: &str = "notice-host";

#[component]
pub fn Notice(kind: NoticeKind, #[prop(into)] message: String) -> impl IntoView {
    let (open, set_open) = signal(true);
    let class = format!("alert alert-{} alert-dismissible fade show", kind.css());

    view! {
        <Show when=move || open.get()>
            <div class=class.clone() role="alert">
                {message.clone()}
                <button
                    type="button"
                    class="btn-close"
                    aria-label="Close"
                    on:click=move |_| set_open.set(false)
                ></button>
            </div>
        </Show>
    }
}

/// Replace any alert on the page with a new notice at the top of `main`
pub fn show_notice(kind: NoticeKind, message: &str, dismiss_ms: u32) {
    dom::remove_all(&format!(".alert, .{}", HOST_CLASS));
    let Some(host) = mount_host("main", HOST_CLASS, Placement::First) else {
        log::warn!("[UI] no <main> for notice: {}", message);
        return;
    };
    let message = message.to_string();
    mount_to(host.clone(), move || view! { <Notice kind=kind message=message /> }).forget();
    dom::scroll_to_top();
    Timeout::new(dismiss_ms, move || host.remove()).forget();
}
