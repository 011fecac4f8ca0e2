//! Copy-to-clipboard for bubble headers.

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::Element;

use crate::dom::{self, COPIED_BUTTON_HTML, COPY_BUTTON_HTML};

/// How long the "Copied!" / "Failed to copy" feedback stays up.
const FEEDBACK_MS: u32 = 2000;

/// Write `text` to the clipboard and flash feedback on `button`.
pub fn copy(text: String, button: Element) {
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            return;
        };
        let promise = window.navigator().clipboard().write_text(&text);

        match JsFuture::from(promise).await {
            Ok(_) => {
                if let Err(err) = button.class_list().add_1("copied") {
                    log::warn!("failed to mark copy button: {err:?}");
                }
                button.set_inner_html(COPIED_BUTTON_HTML);
                TimeoutFuture::new(FEEDBACK_MS).await;
                if let Err(err) = button.class_list().remove_1("copied") {
                    log::warn!("failed to reset copy button: {err:?}");
                }
                button.set_inner_html(COPY_BUTTON_HTML);
            }
            Err(err) => {
                log::error!("Failed to copy text: {err:?}");
                show_copy_error(&button).await;
            }
        }
    });
}

async fn show_copy_error(button: &Element) {
    let Some(parent) = button.parent_element() else {
        return;
    };
    let Ok(doc) = dom::document() else {
        return;
    };
    let Ok(note) = dom::element(&doc, "span", &["copy-error"]) else {
        return;
    };
    note.set_text_content(Some("Failed to copy"));
    if parent.append_child(&note).is_ok() {
        TimeoutFuture::new(FEEDBACK_MS).await;
        note.remove();
    }
}
