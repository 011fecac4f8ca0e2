//! Browser frontend for Echo Chamber.
//!
//! Binds [`ChatController`] to the page: user events go into the controller
//! and the [`Effect`]s it returns are applied to the DOM here.
//!
//! The page must provide `#chatMessages`, `#userInput` (a textarea),
//! `#sendBtn`, a `.welcome-section` and one `.persona-card[data-persona]` per
//! persona. `<body data-backend-url="...">` overrides the proxy location.

mod api;
mod clipboard;
mod dom;
mod inflight;

use std::cell::RefCell;
use std::rc::Rc;

use echo_core::chat::{ChatController, ChatMessage, DEFAULT_BACKEND_URL, Effect, RequestId};
use echo_core::models::EchoRequest;
use echo_core::persona::PersonaId;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, HtmlTextAreaElement, KeyboardEvent};

use crate::inflight::InFlight;

/// Tallest the input box grows before it scrolls.
const MAX_INPUT_HEIGHT_PX: i32 = 120;

/// Returns the version of the echo_wasm package.
#[wasm_bindgen]
pub fn version() -> String {
    echo_core::version().to_string()
}

/// Render markdown-lite text to HTML.
#[wasm_bindgen(js_name = renderMarkdown)]
pub fn render_markdown(text: &str) -> String {
    echo_core::markdown::render(text)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let app = ChatApp::mount()?;
    app.bind()?;
    log::info!("echo chamber ready, backend at {}", app.controller.borrow().backend_url());
    Ok(())
}

struct Page {
    document: Document,
    chat_messages: Element,
    user_input: HtmlTextAreaElement,
    send_btn: Element,
    welcome: Option<HtmlElement>,
    persona_cards: Vec<Element>,
    choices: RefCell<Option<Element>>,
    thinking: RefCell<InFlight<Element>>,
}

#[derive(Clone)]
struct ChatApp {
    controller: Rc<RefCell<ChatController>>,
    page: Rc<Page>,
}

impl ChatApp {
    fn mount() -> Result<Self, JsValue> {
        let document = dom::document()?;

        let backend_url = document
            .body()
            .and_then(|body| body.get_attribute("data-backend-url"))
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let cards = document.query_selector_all(".persona-card")?;
        let persona_cards = (0..cards.length())
            .filter_map(|i| cards.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();

        let page = Page {
            chat_messages: dom::by_id(&document, "chatMessages")?,
            user_input: dom::by_id(&document, "userInput")?.dyn_into()?,
            send_btn: dom::by_id(&document, "sendBtn")?,
            welcome: document
                .query_selector(".welcome-section")?
                .and_then(|el| el.dyn_into().ok()),
            persona_cards,
            choices: RefCell::new(None),
            thinking: RefCell::new(InFlight::default()),
            document,
        };

        Ok(Self {
            controller: Rc::new(RefCell::new(ChatController::new(backend_url))),
            page: Rc::new(page),
        })
    }

    fn bind(&self) -> Result<(), JsValue> {
        let app = self.clone();
        listen(&self.page.send_btn, "click", move |_| app.on_submit())?;

        let app = self.clone();
        listen(&self.page.user_input, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if key.key() == "Enter" && !key.shift_key() {
                event.prevent_default();
                app.on_submit();
            }
        })?;

        let app = self.clone();
        listen(&self.page.user_input, "input", move |_| {
            if let Err(err) = app.grow_input() {
                log::warn!("failed to resize the input: {err:?}");
            }
        })?;

        for card in &self.page.persona_cards {
            self.bind_persona_card(card)?;
        }
        Ok(())
    }

    fn bind_persona_card(&self, card: &Element) -> Result<(), JsValue> {
        let Some(persona) = card
            .get_attribute("data-persona")
            .and_then(|p| p.parse::<PersonaId>().ok())
        else {
            log::warn!("persona card without a known data-persona");
            return Ok(());
        };
        let app = self.clone();
        let target = card.clone();
        listen(card, "click", move |_| {
            if let Err(err) = app.mark_active(&target) {
                log::warn!("failed to highlight the persona card: {err:?}");
            }
            app.on_persona(persona);
        })
    }

    /// Highlight `card` as the current pick, on the welcome grid and in
    /// every offered set of choices alike.
    fn mark_active(&self, card: &Element) -> Result<(), JsValue> {
        let cards = self.page.document.query_selector_all(".persona-card")?;
        for i in 0..cards.length() {
            if let Some(other) = cards.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                other.class_list().remove_1("active")?;
            }
        }
        card.class_list().add_1("active")
    }

    fn grow_input(&self) -> Result<(), JsValue> {
        let input = &self.page.user_input;
        let style = input.style();
        style.set_property("height", "auto")?;
        let height = input_height(input.scroll_height());
        style.set_property("height", &format!("{height}px"))
    }

    fn on_submit(&self) {
        let text = self.page.user_input.value();
        let effects = self.controller.borrow_mut().submit(&text);
        self.dispatch(effects);
    }

    fn on_persona(&self, persona: PersonaId) {
        let effects = self.controller.borrow_mut().choose_persona(persona);
        self.dispatch(effects);
    }

    fn dispatch(&self, effects: Vec<Effect>) {
        for effect in effects {
            if let Err(err) = self.apply(effect) {
                log::error!("failed to update the page: {err:?}");
            }
        }
    }

    fn apply(&self, effect: Effect) -> Result<(), JsValue> {
        let page = &self.page;
        match effect {
            Effect::HideWelcome => {
                if let Some(welcome) = &page.welcome {
                    welcome.style().set_property("display", "none")?;
                }
            }
            Effect::ClearInput => {
                page.user_input.set_value("");
                page.user_input.style().set_property("height", "auto")?;
            }
            Effect::ShowMessage(message) => self.show_message(message)?,
            Effect::ShowPersonaChoices => self.show_choices()?,
            Effect::HidePersonaChoices => {
                if let Some(choices) = page.choices.borrow_mut().take() {
                    choices.remove();
                }
            }
            Effect::ShowThinking { id, persona } => {
                let indicator = dom::thinking_indicator(&page.document, id, persona)?;
                self.append(&indicator)?;
                page.thinking.borrow_mut().insert(id, indicator);
            }
            Effect::HideThinking(id) => {
                if let Some(indicator) = page.thinking.borrow_mut().take(id) {
                    indicator.remove();
                }
            }
            Effect::SendRequest { id, request } => self.send(id, request),
        }
        Ok(())
    }

    fn show_message(&self, message: ChatMessage) -> Result<(), JsValue> {
        let bubble = dom::message_bubble(&self.page.document, &message)?;
        if let Some(button) = bubble.copy_button {
            let text = message.text;
            let target = button.clone();
            listen(&button, "click", move |_| {
                clipboard::copy(text.clone(), target.clone())
            })?;
        }
        self.append(&bubble.root)
    }

    /// Offer a fresh copy of every persona card below the user's bubble.
    fn show_choices(&self) -> Result<(), JsValue> {
        let container = dom::element(&self.page.document, "div", &["persona-card-container"])?;
        for card in &self.page.persona_cards {
            let clone: Element = card.clone_node_with_deep(true)?.dyn_into()?;
            clone.class_list().remove_1("active")?;
            self.bind_persona_card(&clone)?;
            container.append_child(&clone)?;
        }
        self.append(&container)?;
        *self.page.choices.borrow_mut() = Some(container);
        Ok(())
    }

    fn send(&self, id: RequestId, request: EchoRequest) {
        let app = self.clone();
        spawn_local(async move {
            let url = app.controller.borrow().backend_url().to_string();
            let outcome = api::post_echo(&url, &request).await;
            if let Err(failure) = &outcome {
                log::warn!("echo request failed: {failure}");
            }
            let effects = app
                .controller
                .borrow_mut()
                .complete(id, request.persona, outcome);
            app.dispatch(effects);
        });
    }

    fn append(&self, el: &Element) -> Result<(), JsValue> {
        let list = &self.page.chat_messages;
        list.append_child(el)?;
        list.set_scroll_top(list.scroll_height());
        Ok(())
    }
}

/// Attach `handler` to `event` on `target` for the lifetime of the page.
fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Height for the input box given the height its content needs.
fn input_height(scroll_height: i32) -> i32 {
    scroll_height.min(MAX_INPUT_HEIGHT_PX)
}
