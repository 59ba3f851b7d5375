//! Browser integration (wasm32 only)
//!
//! Wires the controller to the live page: `web_sys` document, `localStorage`
//! preference, console logging, and the page-level click listener.

mod console;

use crate::controller::Controller;
use crate::core::{Config, Error, Result};
use crate::dom::Document;
use crate::i18n::{HttpFetcher, LANGUAGES};
use crate::prefs::PreferenceStore;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

fn js_error(context: &str, value: JsValue) -> Error {
    Error::Dom(format!("{}: {:?}", context, value))
}

/// Live browser document
pub struct WebDocument {
    document: web_sys::Document,
    root: Element,
}

impl WebDocument {
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let root = document.document_element()?;
        Some(Self { document, root })
    }
}

impl Document for WebDocument {
    type Element = Element;

    fn root(&self) -> Element {
        self.root.clone()
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).unwrap_or_else(|e| {
            log::warn!("Invalid selector {}: {:?}", selector, e);
            None
        })
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.get(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(e) => {
                log::warn!("Invalid selector {}: {:?}", selector, e);
                Vec::new()
            }
        }
    }

    fn create_element(&self, tag: &str) -> Result<Element> {
        self.document
            .create_element(tag)
            .map_err(|e| js_error("createElement", e))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<()> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| js_error("appendChild", e))
    }

    fn remove_children(&self, element: &Element) {
        while let Some(child) = element.first_child() {
            if element.remove_child(&child).is_err() {
                break;
            }
        }
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<()> {
        element
            .set_attribute(name, value)
            .map_err(|e| js_error("setAttribute", e))
    }

    fn get_attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn text_content(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn add_class(&self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().add_1(class) {
            log::warn!("Failed to add class {}: {:?}", class, e);
        }
    }

    fn remove_class(&self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().remove_1(class) {
            log::warn!("Failed to remove class {}: {:?}", class, e);
        }
    }

    fn toggle_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().toggle(class).unwrap_or_else(|e| {
            log::warn!("Failed to toggle class {}: {:?}", class, e);
            self.has_class(element, class)
        })
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_display(&self, element: &Element, value: &str) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            if let Err(e) = html.style().set_property("display", value) {
                log::warn!("Failed to set display: {:?}", e);
            }
        }
    }

    fn closest(&self, element: &Element, selector: &str) -> Option<Element> {
        element.closest(selector).ok().flatten()
    }
}

/// Preference kept in `window.localStorage`
pub struct LocalStorage {
    key: String,
}

impl LocalStorage {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| Error::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| Error::Storage(format!("{:?}", e)))?
            .ok_or_else(|| Error::Storage("localStorage unavailable".to_string()))
    }
}

impl PreferenceStore for LocalStorage {
    fn load(&self) -> Result<Option<String>> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }

    fn save(&self, code: &str) -> Result<()> {
        Self::storage()?
            .set_item(&self.key, code)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}

type PageController = Controller<WebDocument, LocalStorage>;

/// Module entry point: start once the DOM is parsed
#[wasm_bindgen(start)]
pub fn start() {
    console::init(log::LevelFilter::Info);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document available");
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once(|| wasm_bindgen_futures::spawn_local(run()));
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        {
            log::error!("Failed to wait for DOMContentLoaded: {:?}", e);
        }
        on_ready.forget();
    } else {
        wasm_bindgen_futures::spawn_local(run());
    }
}

async fn run() {
    let config = Config::default();

    let mut translations = config.translations.clone();
    if translations.base_url.is_empty() {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            translations.base_url = origin;
        }
    }
    let fetcher = HttpFetcher::new(&translations);

    let Some(document) = WebDocument::from_window() else {
        log::error!("No document available");
        return;
    };
    let prefs = LocalStorage::new(&config.general.storage_key);

    let mut controller = match PageController::new(config, document, prefs, LANGUAGES) {
        Ok(controller) => controller,
        Err(e) => {
            log::error!("Language switcher disabled: {}", e);
            return;
        }
    };

    controller.start(&fetcher).await;

    if controller.switcher().is_some() {
        attach_click_handler(Rc::new(RefCell::new(controller)));
    }
}

/// One page-level listener; the controller classifies the target
fn attach_click_handler(controller: Rc<RefCell<PageController>>) {
    let page = controller.borrow().document().document.clone();

    let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        controller.borrow_mut().click(&target);
    });

    if let Err(e) = page.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref()) {
        log::error!("Failed to attach click handler: {:?}", e);
    }
    handler.forget();
}
