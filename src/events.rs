//! Event Handler Registry
//!
//! Handlers register `(event type, selector)` routes. One delegated listener per
//! event type sits on the document and hands each event to every route whose
//! selector matches the target (or one of its ancestors), in registration order.

use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;

/// Something that reacts to a delegated DOM event
pub trait EventHandler {
    /// `matched` is the element that matched the route's selector
    fn handle(&self, event: &web_sys::Event, matched: &web_sys::Element);
}

impl<F> EventHandler for F
where
    F: Fn(&web_sys::Event, &web_sys::Element),
{
    fn handle(&self, event: &web_sys::Event, matched: &web_sys::Element) {
        self(event, matched)
    }
}

pub struct Route {
    pub selector: String,
    pub handler: Rc<dyn EventHandler>,
}

#[derive(Default)]
pub struct EventRegistry {
    /// Event types in first-registration order
    order: Vec<String>,
    routes: HashMap<String, Vec<Route>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<H>(&mut self, event_type: &str, selector: &str, handler: H) -> &mut Self
    where
        H: EventHandler + 'static,
    {
        if !self.routes.contains_key(event_type) {
            self.order.push(event_type.to_string());
        }
        self.routes.entry(event_type.to_string()).or_default().push(Route {
            selector: selector.to_string(),
            handler: Rc::new(handler),
        });
        self
    }

    pub fn event_types(&self) -> &[String] {
        &self.order
    }

    pub fn routes_for(&self, event_type: &str) -> &[Route] {
        self.routes.get(event_type).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Attach one document listener per event type
    pub fn install(self) {
        let registry = Rc::new(self);
        for event_type in registry.event_types().to_vec() {
            let registry = Rc::clone(&registry);
            let kind = event_type.clone();
            dom_keybind::bind_document_listener(&event_type, move |ev: web_sys::Event| {
                registry.dispatch(&kind, &ev);
            });
        }
    }

    fn dispatch(&self, event_type: &str, ev: &web_sys::Event) {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
            return;
        };
        for route in self.routes_for(event_type) {
            if let Ok(Some(matched)) = target.closest(&route.selector) {
                route.handler.handle(ev, &matched);
            }
        }
    }
}
