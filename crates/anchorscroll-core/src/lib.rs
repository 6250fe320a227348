#![forbid(unsafe_code)]

//! Platform-independent core for smooth in-page anchor navigation.
//!
//! A single delegated click listener on the document intercepts clicks on
//! `a[href^="#"]` links and replaces the instant fragment jump with a smooth
//! viewport scroll that leaves room for a sticky header.
//!
//! The crate is split along the host boundary:
//! - [`click`]: the pure decision `(document, click) -> ClickDispatch`.
//! - [`controller`]: attach/detach lifecycle over a [`ListenerHost`].
//! - [`dom`]: the read-only [`DocumentView`] the decision runs against.
//! - [`page`]: an in-memory host used by native embedders and tests.
//!
//! No JS/WASM types live here; `anchorscroll-web` binds these traits to
//! `web-sys`.

pub mod click;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod fragment;
pub mod page;

pub use click::{
    AnchorClickHandler, ClickDispatch, ClickEvent, ClickOutcome, IgnoredReason, Modifiers,
    PointerButton, ScrollBehavior, ScrollRequest, SuppressedReason,
};
pub use config::{AnchorScrollConfig, ConfigError, DEFAULT_HEADER_OFFSET};
pub use controller::{AnchorScrollController, ListenerHost, ListenerState};
pub use dom::{DocumentView, FragmentAnchor, InMemoryDocument, NodeId, closest_fragment_anchor};
pub use error::AnchorScrollError;
pub use fragment::{Fragment, FragmentError};
pub use page::{ClickReport, ListenerId, SimulatedPage};
