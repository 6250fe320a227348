#![forbid(unsafe_code)]

//! WASM frontend for the anchorscroll site.
//!
//! This crate binds the platform-independent core to the browser:
//! - [`WebDocument`] implements `DocumentView` over `web_sys::Document`,
//! - [`WebHost`] implements `ListenerHost` with a delegated `click` listener,
//! - [`SiteApp`] is the `wasm-bindgen` export JS hosts mount and unmount.
//!
//! The DOM pieces only compile on `wasm32`; the event-decoding helpers below
//! are host-independent so native tests cover them.

use anchorscroll_core::{AnchorScrollConfig, AnchorScrollError, Modifiers, PointerButton};

#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use host::{WebDocument, WebHost, WebListener, WebNode};
#[cfg(target_arch = "wasm32")]
pub use wasm::SiteApp;

/// Modifier set from DOM `MouseEvent` key flags.
#[must_use]
pub fn modifiers_from_flags(shift: bool, alt: bool, ctrl: bool, meta: bool) -> Modifiers {
    let mut mods = Modifiers::empty();
    mods.set(Modifiers::SHIFT, shift);
    mods.set(Modifiers::ALT, alt);
    mods.set(Modifiers::CTRL, ctrl);
    mods.set(Modifiers::META, meta);
    mods
}

/// Pointer button from DOM `MouseEvent.button`. Back/forward and other
/// extra buttons count as auxiliary.
#[must_use]
pub fn button_from_dom(button: i16) -> PointerButton {
    PointerButton::from_dom_button(button).unwrap_or(PointerButton::Auxiliary)
}

/// Parse the optional JSON config handed in by the JS host.
///
/// `None` or a blank string selects the defaults.
pub fn config_from_json(json: Option<&str>) -> Result<AnchorScrollConfig, AnchorScrollError> {
    match json.map(str::trim) {
        None | Some("") => Ok(AnchorScrollConfig::default()),
        Some(json) => Ok(AnchorScrollConfig::from_json_str(json)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchorscroll_core::{ConfigError, ScrollBehavior};
    use pretty_assertions::assert_eq;

    #[test]
    fn modifier_flags_map_to_bits() {
        assert_eq!(modifiers_from_flags(false, false, false, false), Modifiers::empty());
        assert_eq!(
            modifiers_from_flags(true, false, true, false),
            Modifiers::SHIFT | Modifiers::CTRL
        );
        assert_eq!(
            modifiers_from_flags(true, true, true, true),
            Modifiers::all()
        );
    }

    #[test]
    fn extra_buttons_are_auxiliary() {
        assert_eq!(button_from_dom(0), PointerButton::Primary);
        assert_eq!(button_from_dom(2), PointerButton::Secondary);
        assert_eq!(button_from_dom(3), PointerButton::Auxiliary);
        assert_eq!(button_from_dom(-1), PointerButton::Auxiliary);
    }

    #[test]
    fn blank_config_uses_defaults() {
        assert_eq!(config_from_json(None).expect("default"), AnchorScrollConfig::default());
        assert_eq!(
            config_from_json(Some("  ")).expect("default"),
            AnchorScrollConfig::default()
        );
    }

    #[test]
    fn json_config_is_parsed_and_validated() {
        let config =
            config_from_json(Some(r#"{"behavior":"auto","header_offset":56}"#)).expect("valid");
        assert_eq!(config.behavior, ScrollBehavior::Auto);
        assert_eq!(config.header_offset, 56.0);

        let err = config_from_json(Some(r#"{"header_offset":-2}"#)).expect_err("invalid");
        assert!(matches!(
            err,
            AnchorScrollError::Config(ConfigError::Validation(_))
        ));
    }
}
