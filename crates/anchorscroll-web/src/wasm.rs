#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the site root.
//!
//! Only compiled on `wasm32` targets.

use anchorscroll_site::{AppShell, Route};
use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config_from_json;
use crate::host::WebHost;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                ),
                None => format!("panic: {info}"),
            };
            console_error(&msg);
        }));
    });
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn route_label(route: Route) -> String {
    route.label().to_string()
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

/// Site root exported to JavaScript.
///
/// The JS host constructs one per page, calls `mount` once the DOM is ready
/// and `unmount` (or `free`) when the page goes away.
#[wasm_bindgen]
pub struct SiteApp {
    shell: AppShell<WebHost>,
}

#[wasm_bindgen]
impl SiteApp {
    /// Create an unmounted app. `config_json` may be omitted for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<SiteApp, JsValue> {
        install_panic_hook();
        let config = config_from_json(config_json.as_deref()).map_err(to_js_error)?;
        let host = WebHost::from_global().map_err(to_js_error)?;
        Ok(Self {
            shell: AppShell::new(host, config),
        })
    }

    /// Mount at `path` and attach the anchor listener. Returns the route label.
    pub fn mount(&mut self, path: &str) -> Result<String, JsValue> {
        self.shell.mount(path).map(route_label).map_err(to_js_error)
    }

    pub fn navigate(&mut self, path: &str) -> Option<String> {
        self.shell.navigate(path).map(route_label)
    }

    pub fn unmount(&mut self) -> bool {
        self.shell.unmount()
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.shell.is_mounted()
    }

    #[wasm_bindgen(js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        self.shell.controller().is_attached()
    }

    pub fn route(&self) -> Option<String> {
        self.shell.route().map(route_label)
    }

    /// Active configuration as JSON.
    pub fn config(&self) -> String {
        self.shell.controller().handler().config().to_json()
    }
}
