//! DOM builders for chat bubbles and indicators.

use echo_core::chat::{ChatMessage, RequestId};
use echo_core::persona::PersonaId;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

pub const COPY_BUTTON_HTML: &str = r#"<i class="fa-regular fa-copy"></i> Copy"#;
pub const COPIED_BUTTON_HTML: &str = r#"<i class="fa-solid fa-check"></i> Copied!"#;

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// `<tag class="...">`.
pub fn element(doc: &Document, tag: &str, classes: &[&str]) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    for class in classes {
        el.class_list().add_1(class)?;
    }
    Ok(el)
}

/// Element with the given id, as an error if it is missing from the page.
pub fn by_id(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

/// A rendered bubble. `copy_button` is set for persona and error bubbles.
pub struct Bubble {
    pub root: Element,
    pub copy_button: Option<Element>,
}

/// Build the bubble for `message`.
///
/// User text goes in as text content; everything else is rendered through
/// the markdown-lite renderer and inserted as HTML.
pub fn message_bubble(doc: &Document, message: &ChatMessage) -> Result<Bubble, JsValue> {
    let root = element(doc, "div", &["echo-bubble", message.role.class_name()])?;

    let (Some(label), Some(html)) = (message.role.label(), message.html()) else {
        root.set_text_content(Some(&message.text));
        return Ok(Bubble {
            root,
            copy_button: None,
        });
    };

    let header = element(doc, "div", &["persona-header"])?;
    let label_el = element(doc, "span", &["persona-label"])?;
    label_el.set_text_content(Some(label));
    header.append_child(&label_el)?;

    let copy_button = element(doc, "button", &["copy-btn"])?;
    copy_button.set_inner_html(COPY_BUTTON_HTML);
    header.append_child(&copy_button)?;
    root.append_child(&header)?;

    let content = element(doc, "div", &["message-content"])?;
    content.set_inner_html(&html);
    root.append_child(&content)?;

    Ok(Bubble {
        root,
        copy_button: Some(copy_button),
    })
}

/// Transient "typing" bubble tagged with the persona being asked.
///
/// Several may be on the page at once, one per request in flight, so the
/// request is recorded in `data-request` rather than an element id.
pub fn thinking_indicator(
    doc: &Document,
    id: RequestId,
    persona: PersonaId,
) -> Result<Element, JsValue> {
    let root = element(doc, "div", &["echo-bubble", "thinking", persona.as_str()])?;
    root.set_attribute("data-request", &id.0.to_string())?;

    let label = element(doc, "div", &["persona-label"])?;
    label.set_text_content(Some(persona.display_name()));
    root.append_child(&label)?;

    let dots = element(doc, "div", &["typing-dots"])?;
    dots.set_inner_html("<span>.</span><span>.</span><span>.</span>");
    root.append_child(&dots)?;

    Ok(root)
}
