//! Workout logging page client: background form submission, the recent
//! workouts list and the estimated 1RM field.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub mod api;
pub mod app;
pub mod calculator;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod logger;
pub mod recent;
pub mod submitter;
pub mod types;

#[cfg(test)]
mod testing;

pub use app::{init, PageHandle};
pub use config::{AfterSubmitConfig, PageConfig};
pub use error::ClientError;

thread_local! {
    static PAGE: RefCell<Option<PageHandle>> = const { RefCell::new(None) };
    static PENDING: RefCell<Option<dom::Listener>> = const { RefCell::new(None) };
}

/// Selectors only find anything once the document has been parsed.
fn must_wait_for_dom(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn mount(document: &web_sys::Document, config: &PageConfig) -> Result<(), JsValue> {
    // detach whatever a previous call attached before wiring again
    if let Some(old) = PAGE.with(|page| page.borrow_mut().take()) {
        old.dispose();
    }
    let handle = init(document, config).map_err(|e| JsValue::from(e.to_string()))?;
    PAGE.with(|page| *page.borrow_mut() = Some(handle));
    Ok(())
}

/// Mounts now, or on `DOMContentLoaded` while the document is still loading.
/// A later call replaces a mount that is still waiting.
fn mount_when_ready(config: PageConfig) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("document not available")?;
    PENDING.with(|pending| pending.borrow_mut().take());

    if !must_wait_for_dom(&document.ready_state()) {
        return mount(&document, &config);
    }
    let target = document.clone();
    let mut config = Some(config);
    let listener = dom::Listener::new(&target, "DOMContentLoaded", move |_| {
        if let Some(config) = config.take() {
            if let Err(e) = mount(&document, &config) {
                log::error!("[App] could not start: {}", error::describe_js(&e));
            }
        }
    })
    .map_err(|e| JsValue::from(e.to_string()))?;
    PENDING.with(|pending| *pending.borrow_mut() = Some(listener));
    Ok(())
}

#[wasm_bindgen(start)]
pub fn run_app() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = PageConfig::default();
    logger::init(config.level_filter());
    mount_when_ready(config)
}

/// Re-wires the page with overrides, e.g.
/// `init_with({ after_submit: { kind: "dismiss_overlay", close_selector: "#logModal .btn-close" } })`.
#[wasm_bindgen]
pub fn init_with(config: JsValue) -> Result<(), JsValue> {
    let config: PageConfig = if config.is_undefined() || config.is_null() {
        PageConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    logger::init(config.level_filter());
    mount_when_ready(config)
}

/// Detaches every listener this module added to the page.
#[wasm_bindgen]
pub fn dispose_workout_logger() {
    PENDING.with(|pending| pending.borrow_mut().take());
    if let Some(handle) = PAGE.with(|page| page.borrow_mut().take()) {
        handle.dispose();
    }
}
