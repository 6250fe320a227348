#![forbid(unsafe_code)]

//! Pure click decision for in-page fragment links.
//!
//! [`AnchorClickHandler::handle_click`] maps a document snapshot plus one
//! click into a [`ClickDispatch`]: whether the host must suppress default
//! navigation, and which scroll request (if any) to issue. The handler keeps
//! no state between clicks, so replaying the same click against the same
//! document yields the same dispatch.
//!
//! Outcomes follow a two-tier policy:
//! - [`ClickOutcome::Ignored`]: the click is left entirely to the browser.
//! - [`ClickOutcome::Suppressed`]: a fragment link matched, default
//!   navigation is prevented, but nothing scrolls (stale or invalid link).

use bitflags::bitflags;
use tracing::{debug, trace};

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::config::AnchorScrollConfig;
use crate::dom::{DocumentView, closest_fragment_anchor};
use crate::fragment::{Fragment, FragmentError};

bitflags! {
    /// Modifier keys held during a click.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const META  = 0b1000;
    }
}

/// Pointer button that produced the click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub const fn from_dom_button(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            1 => Some(Self::Auxiliary),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// One click as seen by the delegated listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent<N> {
    pub target: N,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl<N> ClickEvent<N> {
    /// Unmodified primary-button click on `target`.
    #[must_use]
    pub const fn primary(target: N) -> Self {
        Self {
            target,
            button: PointerButton::Primary,
            modifiers: Modifiers::empty(),
        }
    }

    fn is_modified(&self) -> bool {
        !self.modifiers.is_empty() || self.button != PointerButton::Primary
    }
}

/// Animation style for the viewport scroll primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum ScrollBehavior {
    /// Instant jump.
    Auto,
    /// Animated scroll.
    #[default]
    Smooth,
}

impl ScrollBehavior {
    /// DOM `ScrollBehavior` string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Smooth => "smooth",
        }
    }
}

/// Viewport scroll the host should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    /// Target vertical scroll position, document-relative. May be negative;
    /// the platform clamps.
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// Why a click was left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoredReason {
    /// No `a[href^="#"]` at or above the click target.
    NoMatchingAnchor,
    /// The link is a bare `#`.
    EmptyFragment,
    /// Modifier key or non-primary button, with `ignore_modified_clicks` set.
    ModifiedClick,
}

/// Why an intercepted click did not scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuppressedReason {
    /// No element carries the fragment identifier.
    TargetNotFound,
    /// The fragment can never name an element.
    InvalidFragment,
    /// The element exists but has no finite position.
    UnmeasurableTarget,
}

/// Outcome category for one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickOutcome {
    Scrolled,
    Ignored(IgnoredReason),
    Suppressed(SuppressedReason),
}

impl ClickOutcome {
    /// Stable snake_case label for logs and JS hosts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scrolled => "scrolled",
            Self::Ignored(IgnoredReason::NoMatchingAnchor) => "no_matching_anchor",
            Self::Ignored(IgnoredReason::EmptyFragment) => "empty_fragment",
            Self::Ignored(IgnoredReason::ModifiedClick) => "modified_click",
            Self::Suppressed(SuppressedReason::TargetNotFound) => "target_not_found",
            Self::Suppressed(SuppressedReason::InvalidFragment) => "invalid_fragment",
            Self::Suppressed(SuppressedReason::UnmeasurableTarget) => "unmeasurable_target",
        }
    }
}

/// Result of handling one click.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickDispatch {
    /// Host must call `preventDefault()` on the event.
    pub prevent_default: bool,
    /// Host must issue exactly this scroll.
    pub scroll: Option<ScrollRequest>,
    pub outcome: ClickOutcome,
    /// Raw `href` of the matched anchor.
    pub fragment: Option<String>,
}

impl ClickDispatch {
    fn ignored(reason: IgnoredReason, fragment: Option<String>) -> Self {
        Self {
            prevent_default: false,
            scroll: None,
            outcome: ClickOutcome::Ignored(reason),
            fragment,
        }
    }

    fn suppressed(reason: SuppressedReason, fragment: String) -> Self {
        Self {
            prevent_default: true,
            scroll: None,
            outcome: ClickOutcome::Suppressed(reason),
            fragment: Some(fragment),
        }
    }

    fn scrolled(request: ScrollRequest, fragment: String) -> Self {
        Self {
            prevent_default: true,
            scroll: Some(request),
            outcome: ClickOutcome::Scrolled,
            fragment: Some(fragment),
        }
    }

    /// Whether the click was taken over from the browser.
    #[must_use]
    pub const fn intercepted(&self) -> bool {
        self.prevent_default
    }
}

/// Stateless click handler carrying only its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorClickHandler {
    config: AnchorScrollConfig,
}

impl AnchorClickHandler {
    #[must_use]
    pub const fn new(config: AnchorScrollConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &AnchorScrollConfig {
        &self.config
    }

    /// Decide what to do with one click.
    pub fn handle_click<D>(&self, doc: &D, event: &ClickEvent<D::Node>) -> ClickDispatch
    where
        D: DocumentView + ?Sized,
    {
        let dispatch = self.decide(doc, event);
        log_dispatch(&dispatch);
        dispatch
    }

    fn decide<D>(&self, doc: &D, event: &ClickEvent<D::Node>) -> ClickDispatch
    where
        D: DocumentView + ?Sized,
    {
        let Some(anchor) = closest_fragment_anchor(doc, event.target) else {
            return ClickDispatch::ignored(IgnoredReason::NoMatchingAnchor, None);
        };
        if self.config.ignore_modified_clicks && event.is_modified() {
            return ClickDispatch::ignored(IgnoredReason::ModifiedClick, Some(anchor.href));
        }
        let fragment = match Fragment::from_href(&anchor.href) {
            Ok(fragment) => fragment,
            Err(FragmentError::Empty) => {
                return ClickDispatch::ignored(IgnoredReason::EmptyFragment, Some(anchor.href));
            }
            Err(FragmentError::NotFragment) => {
                return ClickDispatch::ignored(IgnoredReason::NoMatchingAnchor, None);
            }
            // From here on default navigation stays suppressed.
            Err(FragmentError::Invalid) => {
                return ClickDispatch::suppressed(SuppressedReason::InvalidFragment, anchor.href);
            }
        };
        let Some(element) = doc.element_by_id(fragment.id()) else {
            return ClickDispatch::suppressed(SuppressedReason::TargetNotFound, anchor.href);
        };
        let Some(top) = doc.document_top(element).filter(|top| top.is_finite()) else {
            return ClickDispatch::suppressed(SuppressedReason::UnmeasurableTarget, anchor.href);
        };
        ClickDispatch::scrolled(
            ScrollRequest {
                top: top - self.config.header_offset,
                behavior: self.config.behavior,
            },
            anchor.href,
        )
    }
}

fn log_dispatch(dispatch: &ClickDispatch) {
    let fragment = dispatch.fragment.as_deref().unwrap_or("");
    match (dispatch.outcome, dispatch.scroll) {
        (ClickOutcome::Ignored(_), _) => trace!(
            target: "anchorscroll::click",
            outcome = dispatch.outcome.label(),
            fragment,
            "click left to browser"
        ),
        (_, Some(scroll)) => debug!(
            target: "anchorscroll::click",
            outcome = dispatch.outcome.label(),
            fragment,
            top = scroll.top,
            behavior = scroll.behavior.as_str(),
            "fragment link scrolled"
        ),
        (_, None) => debug!(
            target: "anchorscroll::click",
            outcome = dispatch.outcome.label(),
            fragment,
            "fragment link suppressed without scroll"
        ),
    }
}
