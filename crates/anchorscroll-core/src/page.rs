#![forbid(unsafe_code)]

//! Single-threaded in-memory page host.
//!
//! [`SimulatedPage`] plays the browser's role for native hosts and tests:
//! it owns an [`InMemoryDocument`], exposes the document-level listener slot
//! through [`ListenerHost`], dispatches clicks to every live listener, and
//! records the resulting scroll requests. Handles are cheap clones sharing
//! one page, so a controller and a test can hold the same page.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::click::{AnchorClickHandler, ClickDispatch, ClickEvent, ScrollRequest};
use crate::controller::ListenerHost;
use crate::dom::{InMemoryDocument, NodeId};
use crate::error::AnchorScrollError;

/// Registration token handed out by [`SimulatedPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Everything that happened while dispatching one click.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClickReport {
    /// At least one listener called `preventDefault()`.
    pub default_prevented: bool,
    /// One dispatch per listener that saw the click, in registration order.
    pub dispatches: Vec<ClickDispatch>,
}

impl ClickReport {
    /// Scroll requests issued for this click.
    pub fn scrolls(&self) -> impl Iterator<Item = ScrollRequest> + '_ {
        self.dispatches.iter().filter_map(|dispatch| dispatch.scroll)
    }

    /// Whether the click produced no observable effect at all.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        !self.default_prevented && self.scrolls().next().is_none()
    }
}

#[derive(Debug, Default)]
struct PageState {
    document: InMemoryDocument,
    listeners: Vec<(ListenerId, AnchorClickHandler)>,
    next_listener_id: u64,
    refuse_listeners: bool,
    scroll_log: Vec<ScrollRequest>,
    scroll_top: f64,
}

/// Shared handle to an in-memory page.
#[derive(Debug, Clone, Default)]
pub struct SimulatedPage {
    inner: Rc<RefCell<PageState>>,
}

impl SimulatedPage {
    /// Page showing `document`, scrolled to the top.
    #[must_use]
    pub fn new(document: InMemoryDocument) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PageState {
                document,
                ..PageState::default()
            })),
        }
    }

    /// Read the current document.
    pub fn with_document<R>(&self, f: impl FnOnce(&InMemoryDocument) -> R) -> R {
        f(&self.inner.borrow().document)
    }

    /// Mutate the document between clicks.
    pub fn update_document<R>(&self, f: impl FnOnce(&mut InMemoryDocument) -> R) -> R {
        f(&mut self.inner.borrow_mut().document)
    }

    /// Make subsequent listener registrations fail.
    pub fn refuse_listeners(&self, refuse: bool) {
        self.inner.borrow_mut().refuse_listeners = refuse;
    }

    /// Number of live document click listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Primary-button click on `target`.
    pub fn click(&self, target: NodeId) -> ClickReport {
        self.click_with(ClickEvent::primary(target))
    }

    /// Dispatch `event` to every live listener.
    pub fn click_with(&self, event: ClickEvent<NodeId>) -> ClickReport {
        let mut guard = self.inner.borrow_mut();
        let state = &mut *guard;
        let mut report = ClickReport::default();
        for (_, handler) in &state.listeners {
            let dispatch = handler.handle_click(&state.document, &event);
            report.default_prevented |= dispatch.prevent_default;
            if let Some(scroll) = dispatch.scroll {
                state.scroll_log.push(scroll);
                // The viewport cannot scroll above the document origin.
                state.scroll_top = scroll.top.max(0.0);
            }
            report.dispatches.push(dispatch);
        }
        report
    }

    /// All scroll requests issued so far, oldest first.
    #[must_use]
    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.inner.borrow().scroll_log.clone()
    }

    /// Drain recorded scroll requests.
    pub fn take_scroll_requests(&self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.inner.borrow_mut().scroll_log)
    }

    /// Viewport position after the most recent scroll.
    #[must_use]
    pub fn scroll_top(&self) -> f64 {
        self.inner.borrow().scroll_top
    }
}

impl ListenerHost for SimulatedPage {
    type Registration = ListenerId;

    fn register_click(
        &mut self,
        handler: AnchorClickHandler,
    ) -> Result<ListenerId, AnchorScrollError> {
        let mut state = self.inner.borrow_mut();
        if state.refuse_listeners {
            return Err(AnchorScrollError::ListenerRegistration(
                "page refused click listener".to_string(),
            ));
        }
        let id = ListenerId(state.next_listener_id);
        state.next_listener_id = state.next_listener_id.saturating_add(1);
        state.listeners.push((id, handler));
        trace!(
            target: "anchorscroll::page",
            listener = id.0,
            live = state.listeners.len(),
            "click listener registered"
        );
        Ok(id)
    }

    fn unregister_click(&mut self, registration: ListenerId) {
        let mut state = self.inner.borrow_mut();
        state.listeners.retain(|(id, _)| *id != registration);
        trace!(
            target: "anchorscroll::page",
            listener = registration.0,
            live = state.listeners.len(),
            "click listener removed"
        );
    }
}
