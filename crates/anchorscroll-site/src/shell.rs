#![forbid(unsafe_code)]

//! Application root.
//!
//! The mounted tree is fixed: a data-cache provider wraps the routed view and
//! two always-mounted overlays (chatbot, toast surface). The anchor scroll
//! listener lives exactly as long as the mount; navigating between routes
//! swaps the view without touching the listener.

use anchorscroll_core::{AnchorScrollConfig, AnchorScrollController, AnchorScrollError, ListenerHost};
use tracing::{debug, info};

use crate::route::Route;

/// Remote-data cache wrapping the whole application.
///
/// Pages reach it through their own data hooks; the shell only mounts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCacheProvider {
    name: String,
}

impl DataCacheProvider {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for DataCacheProvider {
    fn default() -> Self {
        Self::new("query-client")
    }
}

/// Always-mounted overlay widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    Chatbot,
    Toaster,
}

impl Widget {
    /// Overlays in mount order.
    pub const ALL: [Self; 2] = [Self::Chatbot, Self::Toaster];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chatbot => "chatbot",
            Self::Toaster => "toaster",
        }
    }
}

/// Child of the provider in the mounted tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    RoutedView(Route),
    Overlay(Widget),
}

/// Snapshot of what is currently mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedTree {
    pub provider: DataCacheProvider,
    pub children: Vec<Slot>,
}

/// Site root tying the anchor scroll listener to the view lifecycle.
pub struct AppShell<H: ListenerHost> {
    controller: AnchorScrollController<H>,
    provider: DataCacheProvider,
    route: Option<Route>,
}

impl<H: ListenerHost> AppShell<H> {
    /// Unmounted shell using the default data-cache provider.
    pub fn new(host: H, config: AnchorScrollConfig) -> Self {
        Self {
            controller: AnchorScrollController::new(host, config),
            provider: DataCacheProvider::default(),
            route: None,
        }
    }

    #[must_use]
    pub fn with_provider(mut self, provider: DataCacheProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Mount the tree at `path` and attach the anchor listener.
    ///
    /// Mounting an already-mounted shell keeps the current view.
    pub fn mount(&mut self, path: &str) -> Result<Route, AnchorScrollError> {
        if let Some(route) = self.route {
            return Ok(route);
        }
        self.controller.attach()?;
        let route = Route::match_path(path);
        self.route = Some(route);
        info!(
            target: "anchorscroll::shell",
            route = route.label(),
            provider = self.provider.name(),
            "site mounted"
        );
        Ok(route)
    }

    /// Switch the routed view. Returns `None` while unmounted.
    pub fn navigate(&mut self, path: &str) -> Option<Route> {
        let current = self.route.as_mut()?;
        let next = Route::match_path(path);
        debug!(
            target: "anchorscroll::shell",
            from = current.label(),
            to = next.label(),
            "route changed"
        );
        *current = next;
        Some(next)
    }

    /// Tear the tree down and detach the listener.
    pub fn unmount(&mut self) -> bool {
        let Some(route) = self.route.take() else {
            return false;
        };
        self.controller.detach();
        info!(
            target: "anchorscroll::shell",
            route = route.label(),
            "site unmounted"
        );
        true
    }

    #[must_use]
    pub fn route(&self) -> Option<Route> {
        self.route
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.route.is_some()
    }

    /// Current tree, or `None` while unmounted.
    #[must_use]
    pub fn tree(&self) -> Option<MountedTree> {
        let route = self.route?;
        let mut children = Vec::with_capacity(1 + Widget::ALL.len());
        children.push(Slot::RoutedView(route));
        children.extend(Widget::ALL.into_iter().map(Slot::Overlay));
        Some(MountedTree {
            provider: self.provider.clone(),
            children,
        })
    }

    #[must_use]
    pub fn controller(&self) -> &AnchorScrollController<H> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AnchorScrollController<H> {
        &mut self.controller
    }
}
