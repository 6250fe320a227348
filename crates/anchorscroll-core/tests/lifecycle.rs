#![forbid(unsafe_code)]

//! End-to-end listener lifecycle against an in-memory page.
//!
//! Run:
//!   cargo test -p anchorscroll-core --test lifecycle

use anchorscroll_core::{
    AnchorScrollConfig, AnchorScrollController, AnchorScrollError, ClickOutcome, DocumentView,
    InMemoryDocument, ListenerState, NodeId, ScrollBehavior, ScrollRequest, SimulatedPage,
    SuppressedReason,
};
use pretty_assertions::assert_eq;

struct Landing {
    page: SimulatedPage,
    pricing_link: NodeId,
    missing_link: NodeId,
    external_link: NodeId,
    hero_heading: NodeId,
}

/// Home page: nav with fragment links, a hero, and a pricing section.
fn landing() -> Landing {
    let mut doc = InMemoryDocument::new();
    let root = doc.root();
    let header = doc.append_element(root, "header");
    let nav = doc.append_element(header, "nav");
    let pricing_link = doc.append_element_with(nav, "a", &[("href", "#pricing")]);
    doc.append_text(pricing_link, "See pricing");
    let missing_link = doc.append_element_with(nav, "a", &[("href", "#missing-id")]);
    let external_link = doc.append_element_with(nav, "a", &[("href", "/blog")]);

    let main = doc.append_element(root, "main");
    let hero = doc.append_element_with(main, "section", &[("id", "hero")]);
    let hero_heading = doc.append_element(hero, "h1");
    let pricing = doc.append_element_with(main, "section", &[("id", "pricing")]);
    doc.set_document_top(pricing, 1200.0);

    Landing {
        page: SimulatedPage::new(doc),
        pricing_link,
        missing_link,
        external_link,
        hero_heading,
    }
}

fn attached(page: &SimulatedPage) -> AnchorScrollController<SimulatedPage> {
    let mut controller = AnchorScrollController::new(page.clone(), AnchorScrollConfig::default());
    controller.attach().expect("attach");
    controller
}

#[test]
fn pricing_link_scrolls_to_1120() {
    let landing = landing();
    let _controller = attached(&landing.page);

    let report = landing.page.click(landing.pricing_link);
    assert!(report.default_prevented);
    assert_eq!(
        landing.page.scroll_requests(),
        vec![ScrollRequest {
            top: 1120.0,
            behavior: ScrollBehavior::Smooth,
        }]
    );
    assert_eq!(landing.page.scroll_top(), 1120.0);
}

#[test]
fn non_anchor_clicks_leave_default_behavior() {
    let landing = landing();
    let _controller = attached(&landing.page);

    for target in [landing.hero_heading, landing.external_link] {
        let report = landing.page.click(target);
        assert!(report.is_inert(), "click on {target:?} should be inert");
    }
    assert!(landing.page.scroll_requests().is_empty());
}

#[test]
fn missing_target_prevents_default_without_scrolling() {
    let landing = landing();
    let _controller = attached(&landing.page);

    let report = landing.page.click(landing.missing_link);
    assert!(report.default_prevented);
    assert_eq!(report.scrolls().count(), 0);
    assert_eq!(
        report.dispatches[0].outcome,
        ClickOutcome::Suppressed(SuppressedReason::TargetNotFound)
    );
    assert!(landing.page.scroll_requests().is_empty());
}

#[test]
fn repeated_clicks_issue_identical_independent_scrolls() {
    let landing = landing();
    let _controller = attached(&landing.page);

    let first = landing.page.click(landing.pricing_link);
    let second = landing.page.click(landing.pricing_link);
    assert_eq!(first, second);
    let requests = landing.page.take_scroll_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
    assert!(landing.page.scroll_requests().is_empty());
}

#[test]
fn detach_removes_every_side_effect() {
    let landing = landing();
    let mut controller = attached(&landing.page);
    assert_eq!(landing.page.listener_count(), 1);

    assert!(controller.detach());
    assert_eq!(controller.state(), ListenerState::Detached);
    assert_eq!(landing.page.listener_count(), 0);

    for target in [landing.pricing_link, landing.missing_link] {
        assert!(landing.page.click(target).is_inert());
    }
    assert!(landing.page.scroll_requests().is_empty());
}

#[test]
fn dropping_controller_releases_listener() {
    let landing = landing();
    {
        let _controller = attached(&landing.page);
        assert_eq!(landing.page.listener_count(), 1);
    }
    assert_eq!(landing.page.listener_count(), 0);
    assert!(landing.page.click(landing.pricing_link).is_inert());
}

#[test]
fn double_attach_never_doubles_scrolls() {
    let landing = landing();
    let mut controller = attached(&landing.page);
    assert!(matches!(
        controller.attach(),
        Err(AnchorScrollError::AlreadyAttached)
    ));
    assert_eq!(landing.page.listener_count(), 1);

    let report = landing.page.click(landing.pricing_link);
    assert_eq!(report.scrolls().count(), 1);
}

#[test]
fn independent_controllers_on_separate_pages() {
    let left = landing();
    let right = landing();
    let _left_controller = attached(&left.page);
    let mut right_controller = attached(&right.page);
    right_controller.detach();

    assert_eq!(left.page.click(left.pricing_link).scrolls().count(), 1);
    assert!(right.page.click(right.pricing_link).is_inert());
}

#[test]
fn document_changes_between_clicks_are_observed() {
    let landing = landing();
    let _controller = attached(&landing.page);

    landing.page.update_document(|doc| {
        let pricing = doc.element_by_id("pricing").expect("pricing section");
        doc.set_document_top(pricing, 2400.0);
    });
    let report = landing.page.click(landing.pricing_link);
    assert_eq!(report.scrolls().map(|s| s.top).collect::<Vec<_>>(), vec![2320.0]);

    landing.page.update_document(|doc| {
        let root = doc.root();
        let target = doc.append_element_with(root, "section", &[("id", "missing-id")]);
        doc.set_document_top(target, 500.0);
    });
    let report = landing.page.click(landing.missing_link);
    assert_eq!(report.scrolls().map(|s| s.top).collect::<Vec<_>>(), vec![420.0]);
}

#[test]
fn refused_listener_surfaces_registration_error() {
    let landing = landing();
    landing.page.refuse_listeners(true);
    let mut controller =
        AnchorScrollController::new(landing.page.clone(), AnchorScrollConfig::default());
    let err = controller.attach().expect_err("page refuses listener");
    assert!(err.to_string().contains("refused"));
    assert_eq!(landing.page.listener_count(), 0);
}
