#![forbid(unsafe_code)]

//! Site root for the single-page marketing site.
//!
//! [`AppShell`] mounts the data-cache provider, the routed view
//! ([`Route::Home`], [`Route::Blog`], [`Route::NotFound`]) and the chatbot and
//! toast overlays, and keeps the anchor scroll listener attached for exactly
//! as long as the tree is mounted. It is generic over the listener host, so
//! the same shell runs in the browser (`anchorscroll-web`) and against
//! [`anchorscroll_core::SimulatedPage`] in tests.

pub mod route;
pub mod shell;

pub use route::Route;
pub use shell::{AppShell, DataCacheProvider, MountedTree, Slot, Widget};
