#![forbid(unsafe_code)]

//! `web-sys` bindings for the core document and listener traits.

use std::borrow::Cow;
use std::cell::RefCell;

use anchorscroll_core::{
    AnchorClickHandler, AnchorScrollError, ClickDispatch, ClickEvent, DocumentView,
    ListenerHost, ScrollBehavior,
};
use tracing::{trace, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent, ScrollToOptions, Window};

use crate::{button_from_dom, modifiers_from_flags};

/// Handle into the node table of one [`WebDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WebNode(usize);

/// Live browser document viewed through [`DocumentView`].
///
/// DOM nodes are interned on first use; a `WebDocument` is built per click
/// and dropped afterwards, so no node outlives the dispatch.
pub struct WebDocument {
    window: Window,
    document: Document,
    nodes: RefCell<Vec<web_sys::Node>>,
}

impl WebDocument {
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            nodes: RefCell::new(Vec::new()),
        }
    }

    /// Register a DOM node and return its handle.
    pub fn intern(&self, node: web_sys::Node) -> WebNode {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(idx) = nodes.iter().position(|known| known.is_same_node(Some(&node))) {
            return WebNode(idx);
        }
        nodes.push(node);
        WebNode(nodes.len() - 1)
    }

    fn node(&self, handle: WebNode) -> Option<web_sys::Node> {
        self.nodes.borrow().get(handle.0).cloned()
    }

    fn element(&self, handle: WebNode) -> Option<Element> {
        self.node(handle)?.dyn_into::<Element>().ok()
    }
}

impl DocumentView for WebDocument {
    type Node = WebNode;

    fn parent(&self, node: WebNode) -> Option<WebNode> {
        let parent = self.node(node)?.parent_node()?;
        Some(self.intern(parent))
    }

    fn tag_name(&self, node: WebNode) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.element(node)?.tag_name()))
    }

    fn attribute(&self, node: WebNode, name: &str) -> Option<Cow<'_, str>> {
        self.element(node)?.get_attribute(name).map(Cow::Owned)
    }

    fn element_by_id(&self, id: &str) -> Option<WebNode> {
        let element = self.document.get_element_by_id(id)?;
        Some(self.intern(element.into()))
    }

    fn document_top(&self, node: WebNode) -> Option<f64> {
        let rect = self.element(node)?.get_bounding_client_rect();
        let scroll_y = self.window.scroll_y().ok()?;
        Some(rect.top() + scroll_y)
    }
}

/// Registered `click` listener. Dropping it invalidates the JS callback.
pub struct WebListener {
    callback: Closure<dyn FnMut(MouseEvent)>,
}

/// Browser window/document pair that owns the document-level listener slot.
#[derive(Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// Host for the global `window` and its document.
    pub fn from_global() -> Result<Self, AnchorScrollError> {
        let window = web_sys::window().ok_or_else(|| {
            AnchorScrollError::ListenerRegistration("no global window".to_string())
        })?;
        let document = window.document().ok_or_else(|| {
            AnchorScrollError::ListenerRegistration("window has no document".to_string())
        })?;
        Ok(Self::new(window, document))
    }
}

impl ListenerHost for WebHost {
    type Registration = WebListener;

    fn register_click(
        &mut self,
        handler: AnchorClickHandler,
    ) -> Result<WebListener, AnchorScrollError> {
        let window = self.window.clone();
        let document = self.document.clone();
        let callback = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            dispatch_click(&window, &document, &handler, &event);
        });
        self.document
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
            .map_err(|err| AnchorScrollError::ListenerRegistration(js_error_message(&err)))?;
        trace!(target: "anchorscroll::web", "document click listener added");
        Ok(WebListener { callback })
    }

    fn unregister_click(&mut self, registration: WebListener) {
        if let Err(err) = self.document.remove_event_listener_with_callback(
            "click",
            registration.callback.as_ref().unchecked_ref(),
        ) {
            warn!(
                target: "anchorscroll::web",
                error = %js_error_message(&err),
                "failed to remove document click listener"
            );
        }
        trace!(target: "anchorscroll::web", "document click listener removed");
    }
}

/// Run the click decision for one DOM event and apply its effects.
fn dispatch_click(
    window: &Window,
    document: &Document,
    handler: &AnchorClickHandler,
    event: &MouseEvent,
) -> Option<ClickDispatch> {
    let target = event.target()?.dyn_into::<web_sys::Node>().ok()?;
    let view = WebDocument::new(window.clone(), document.clone());
    let click = ClickEvent {
        target: view.intern(target),
        button: button_from_dom(event.button()),
        modifiers: modifiers_from_flags(
            event.shift_key(),
            event.alt_key(),
            event.ctrl_key(),
            event.meta_key(),
        ),
    };
    let dispatch = handler.handle_click(&view, &click);
    if dispatch.prevent_default {
        event.prevent_default();
    }
    if let Some(scroll) = dispatch.scroll {
        let options = ScrollToOptions::new();
        options.set_top(scroll.top);
        options.set_behavior(match scroll.behavior {
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        window.scroll_to_with_scroll_to_options(&options);
    }
    Some(dispatch)
}

pub(crate) fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
