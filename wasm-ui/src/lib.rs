//! Web UI for the OTTL playground
//!
//! A Yew front-end that mounts on every `<playground-stage>` element in the
//! page, loads the evaluator module, and wires the panels to the
//! controller from `ottl-playground`.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod host;
pub mod wasm;

use gloo::console;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::app::{Playground, PlaygroundProps};
use crate::host::{HOST_TAG, options_from_element};

/// Mount a playground on `element`, configured from its attributes.
#[wasm_bindgen]
pub fn mount_playground(element: web_sys::Element) {
    let options = options_from_element(&element);
    yew::Renderer::<Playground>::with_root_and_props(
        element.clone(),
        PlaygroundProps {
            options,
            host: Some(element),
        },
    )
    .render();
}

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let hosts = match document.query_selector_all(HOST_TAG) {
        Ok(hosts) => hosts,
        Err(e) => {
            console::error!("failed to look up playground hosts", e);
            return;
        }
    };
    for i in 0..hosts.length() {
        if let Some(element) = hosts.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
            mount_playground(element);
        }
    }
}
