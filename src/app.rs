//! Encanto Frontend Boot
//!
//! Reads the page configuration and installs the enhancers that apply to the
//! current page: the admin enhancers under the admin home, the cart manager
//! everywhere else.

use std::rc::Rc;

use crate::admin;
use crate::api::{HttpCartApi, ViaCepLookup};
use crate::cart::{self, CartManager, DomCartView, TimerPause};
use crate::config::PageConfig;
use crate::dom;
use crate::events::EventRegistry;

pub fn boot() {
    let config = PageConfig::load();
    let path = dom::location_path().unwrap_or_default();
    let mut registry = EventRegistry::new();

    if admin::is_admin_path(&path, &config.admin_home) {
        admin::install(&mut registry, &config);
    } else {
        let on_checkout = dom::exists("#checkout-form");
        let api = HttpCartApi::new(config.urls.clone(), config.csrf_token.clone(), dom::location_href().as_deref());
        let lookup = ViaCepLookup::new(config.urls.clone());
        let manager = CartManager::new(
            api,
            lookup,
            DomCartView::new(config.timings),
            TimerPause,
            config.checkout,
            config.timings,
        );
        cart::install(&mut registry, Rc::new(manager), on_checkout);
    }

    if registry.is_empty() {
        log::debug!("[APP] nothing to enhance on {}", path);
        return;
    }
    log::info!("[APP] {} routes on {}", registry.len(), path);
    registry.install();
}
