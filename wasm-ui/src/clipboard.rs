//! Copying text to the system clipboard.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement, Window};

/// Copy `text`, using the async Clipboard API in secure contexts and a
/// hidden textarea with `execCommand("copy")` elsewhere.
pub async fn copy_text(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;

    if window.is_secure_context() && !clipboard.is_undefined() && !clipboard.is_null() {
        let write_text: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
            .dyn_into()?;
        let pending: Promise = write_text
            .call1(&clipboard, &JsValue::from_str(text))?
            .dyn_into()?;
        JsFuture::from(pending).await?;
        return Ok(());
    }

    copy_with_selection(&window, text)
}

/// Copy through a temporary off-screen textarea.
///
/// The textarea is removed again whether or not the browser accepts the
/// copy command.
pub fn copy_with_selection(window: &Window, text: &str) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let text_area: HtmlTextAreaElement = document.create_element("textarea")?.dyn_into()?;
    text_area.set_value(text);
    let style = text_area.style();
    style.set_property("position", "absolute")?;
    style.set_property("left", "-999999px")?;

    body.prepend_with_node_1(&text_area)?;
    text_area.select();
    let copied = document.unchecked_ref::<HtmlDocument>().exec_command("copy");
    text_area.remove();

    match copied {
        Ok(true) => Ok(()),
        Ok(false) => Err(JsValue::from_str("copy command was rejected")),
        Err(e) => Err(e),
    }
}
