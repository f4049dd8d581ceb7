//! Draft Save Indicator

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use super::{mount_host, Placement};
use crate::config::Timings;
use crate::dom;

const HOST_CLASS: &str = "save-indicator-host";
const BASE_STYLE: &str = "position: fixed; top: 20px; right: 20px; background: #22c55e; color: white; \
    padding: 8px 16px; border-radius: 6px; font-size: 14px; z-index: 9999; transition: opacity 0.3s ease;";

#[component]
pub fn SaveIndicator(visible: RwSignal<bool>) -> impl IntoView {
    let style = move || format!("{} opacity: {};", BASE_STYLE, if visible.get() { 1 } else { 0 });
    view! {
        <div class="save-indicator" style=style>
            "💾 Rascunho salvo automaticamente"
        </div>
    }
}

/// Fade the indicator in, hold it, fade it out and drop it
pub fn show_save_indicator(timings: &Timings) {
    dom::remove_all(&format!(".{}", HOST_CLASS));
    let Some(host) = mount_host("body", HOST_CLASS, Placement::Last) else {
        return;
    };
    let visible = RwSignal::new(false);
    mount_to(host.clone(), move || view! { <SaveIndicator visible=visible /> }).forget();

    Timeout::new(timings.save_indicator_fade_in_ms, move || visible.set(true)).forget();
    let fade_out_ms = timings.fade_out_ms;
    Timeout::new(timings.save_indicator_visible_ms, move || {
        visible.set(false);
        Timeout::new(fade_out_ms, move || host.remove()).forget();
    })
    .forget();
}
