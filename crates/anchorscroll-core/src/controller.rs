#![forbid(unsafe_code)]

//! Listener lifecycle for the delegated anchor click handler.
//!
//! [`AnchorScrollController`] owns at most one registration on a
//! [`ListenerHost`]. The lifecycle is `Detached -> Attached -> Detached`;
//! clicks never touch controller state. Dropping the controller detaches.

use tracing::{debug, warn};

use crate::click::{AnchorClickHandler, ClickDispatch, ClickEvent};
use crate::config::AnchorScrollConfig;
use crate::dom::DocumentView;
use crate::error::AnchorScrollError;

/// Platform side of the document-level click listener slot.
pub trait ListenerHost {
    /// Token that identifies one registered listener.
    type Registration;

    /// Register `handler` as a delegated click listener on the document.
    fn register_click(
        &mut self,
        handler: AnchorClickHandler,
    ) -> Result<Self::Registration, AnchorScrollError>;

    /// Remove a listener previously returned by [`Self::register_click`].
    fn unregister_click(&mut self, registration: Self::Registration);
}

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Detached,
    Attached,
}

/// Attaches the anchor click handler to a host for the lifetime of a view.
pub struct AnchorScrollController<H: ListenerHost> {
    host: H,
    handler: AnchorClickHandler,
    registration: Option<H::Registration>,
}

impl<H: ListenerHost> AnchorScrollController<H> {
    /// Create a detached controller.
    pub fn new(host: H, config: AnchorScrollConfig) -> Self {
        Self {
            host,
            handler: AnchorClickHandler::new(config),
            registration: None,
        }
    }

    /// Register the delegated click listener.
    ///
    /// A second `attach()` without `detach()` is rejected with
    /// [`AnchorScrollError::AlreadyAttached`]; the existing registration is
    /// kept and no second listener is added.
    pub fn attach(&mut self) -> Result<(), AnchorScrollError> {
        if self.registration.is_some() {
            warn!(
                target: "anchorscroll::controller",
                "attach called on an attached controller"
            );
            return Err(AnchorScrollError::AlreadyAttached);
        }
        let registration = self.host.register_click(self.handler)?;
        self.registration = Some(registration);
        debug!(
            target: "anchorscroll::controller",
            header_offset = self.handler.config().header_offset,
            behavior = self.handler.config().behavior.as_str(),
            "anchor click listener attached"
        );
        Ok(())
    }

    /// Remove the listener. Returns `false` when nothing was attached.
    pub fn detach(&mut self) -> bool {
        let Some(registration) = self.registration.take() else {
            return false;
        };
        self.host.unregister_click(registration);
        debug!(
            target: "anchorscroll::controller",
            "anchor click listener detached"
        );
        true
    }

    /// Run the click decision directly, bypassing the host listener.
    pub fn handle_click<D>(&self, doc: &D, event: &ClickEvent<D::Node>) -> ClickDispatch
    where
        D: DocumentView + ?Sized,
    {
        self.handler.handle_click(doc, event)
    }

    #[must_use]
    pub fn state(&self) -> ListenerState {
        if self.registration.is_some() {
            ListenerState::Attached
        } else {
            ListenerState::Detached
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.registration.is_some()
    }

    #[must_use]
    pub const fn handler(&self) -> &AnchorClickHandler {
        &self.handler
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: ListenerHost> Drop for AnchorScrollController<H> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingHost {
        next: u32,
        live: Vec<u32>,
        refuse: bool,
    }

    impl ListenerHost for CountingHost {
        type Registration = u32;

        fn register_click(&mut self, _: AnchorClickHandler) -> Result<u32, AnchorScrollError> {
            if self.refuse {
                return Err(AnchorScrollError::ListenerRegistration("refused".into()));
            }
            self.next += 1;
            self.live.push(self.next);
            Ok(self.next)
        }

        fn unregister_click(&mut self, registration: u32) {
            self.live.retain(|&id| id != registration);
        }
    }

    fn controller() -> AnchorScrollController<CountingHost> {
        AnchorScrollController::new(CountingHost::default(), AnchorScrollConfig::default())
    }

    #[test]
    fn attach_then_detach_round_trips_state() {
        let mut controller = controller();
        assert_eq!(controller.state(), ListenerState::Detached);
        controller.attach().expect("first attach");
        assert_eq!(controller.state(), ListenerState::Attached);
        assert_eq!(controller.host().live, vec![1]);
        assert!(controller.detach());
        assert_eq!(controller.state(), ListenerState::Detached);
        assert!(controller.host().live.is_empty());
    }

    #[test]
    fn detach_without_attach_is_a_noop() {
        let mut controller = controller();
        assert!(!controller.detach());
        assert!(!controller.detach());
        assert!(controller.host().live.is_empty());
    }

    #[test]
    fn double_attach_keeps_single_registration() {
        let mut controller = controller();
        controller.attach().expect("first attach");
        let err = controller.attach().expect_err("second attach rejected");
        assert!(matches!(err, AnchorScrollError::AlreadyAttached));
        assert_eq!(controller.host().live, vec![1]);
    }

    #[test]
    fn reattach_after_detach_uses_fresh_registration() {
        let mut controller = controller();
        controller.attach().expect("attach");
        controller.detach();
        controller.attach().expect("reattach");
        assert_eq!(controller.host().live, vec![2]);
    }

    #[test]
    fn refused_registration_leaves_controller_detached() {
        let mut controller = controller();
        controller.host_mut().refuse = true;
        let err = controller.attach().expect_err("host refuses");
        assert!(matches!(err, AnchorScrollError::ListenerRegistration(_)));
        assert!(!controller.is_attached());
    }
}
