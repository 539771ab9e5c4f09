//! Contract Invariant Tests
//!
//! These tests verify the non-negotiable guarantees of the card lifecycle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use cardkit_core::{
    color::{hex_to_rgb, hex_to_rgba},
    generate_vcard, initials,
    sanitize_card_data, validate_card_data, ActionRequest, CardConfig, CardController, CardData,
    ContactEntry, ContactKind, DefaultActions, EventOutcome, NoIslands, RecordedActions,
    Renderable, SourceAttributes,
};

struct ProbeLayout;

impl Renderable for ProbeLayout {
    fn layout_id(&self) -> &'static str {
        "probe"
    }

    fn template(&self) -> String {
        "<div></div>".to_string()
    }

    fn render(&mut self, data: &CardData, _config: &CardConfig) -> String {
        data.full_name()
    }
}

fn ann_lee() -> CardData {
    CardData {
        first_name: Some("Ann".to_string()),
        last_name: Some("Lee".to_string()),
        email_v2: vec![ContactEntry::new("ann@x.com", "Work")],
        ..CardData::default()
    }
}

fn mounted_controller() -> CardController {
    let mut controller =
        CardController::new(Box::new(ProbeLayout), Box::<RecordedActions>::default());
    controller.mount(&SourceAttributes::default(), &NoIslands);
    controller
}

/// Shared recorder so tests can inspect default actions after handing the
/// actions box to the controller.
#[derive(Default)]
struct SharedActions(Rc<RefCell<RecordedActions>>);

impl cardkit_core::DefaultActions for SharedActions {
    fn navigate(&mut self, uri: &str) -> Result<(), cardkit_core::ActionError> {
        self.0.borrow_mut().navigate(uri)
    }

    fn open_in_new_tab(&mut self, url: &str) -> Result<(), cardkit_core::ActionError> {
        self.0.borrow_mut().open_in_new_tab(url)
    }

    fn download(
        &mut self,
        filename: &str,
        media_type: &str,
        body: &str,
    ) -> Result<(), cardkit_core::ActionError> {
        self.0.borrow_mut().download(filename, media_type, body)
    }

    fn share(
        &mut self,
        payload: &cardkit_core::SharePayload,
    ) -> Result<(), cardkit_core::ActionError> {
        self.0.borrow_mut().share(payload)
    }
}

fn controller_with_recorder() -> (CardController, Rc<RefCell<RecordedActions>>) {
    let recorder = Rc::new(RefCell::new(RecordedActions::default()));
    let actions = SharedActions(Rc::clone(&recorder));
    let mut controller = CardController::new(Box::new(ProbeLayout), Box::new(actions));
    controller.mount(&SourceAttributes::default(), &NoIslands);
    (controller, recorder)
}

#[test]
fn invariant_identical_data_renders_once() {
    let mut controller = mounted_controller();
    let baseline = controller.render_count();

    let data = ann_lee();
    controller.set_card_data(&data);
    controller.set_card_data(&data);
    controller.set_card_data(&data.clone());

    assert_eq!(controller.render_count(), baseline + 1);
}

#[test]
fn invariant_distinct_data_rerenders() {
    let mut controller = mounted_controller();
    let baseline = controller.render_count();

    controller.set_card_data(&ann_lee());
    let mut changed = ann_lee();
    changed.company = Some("Acme".to_string());
    controller.set_card_data(&changed);

    assert_eq!(controller.render_count(), baseline + 2);
}

#[test]
fn invariant_cancel_suppresses_default_action() {
    let (mut controller, recorder) = controller_with_recorder();
    controller.add_listener(|event| {
        if event.kind == cardkit_core::EventKind::ContactClick {
            EventOutcome::Cancelled
        } else {
            EventOutcome::Handled
        }
    });

    controller.contact_click(ContactKind::Email, "ann@x.com", "Work");
    assert!(recorder.borrow().requests.is_empty());
}

#[test]
fn invariant_uncancelled_click_runs_default_action() {
    let (mut controller, recorder) = controller_with_recorder();
    controller.add_listener(|_| EventOutcome::Handled);

    controller.contact_click(ContactKind::Email, "ann@x.com", "Work");
    controller.contact_click(ContactKind::Website, "example.com", "Site");

    let recorded = recorder.borrow();
    let requests = &recorded.requests;
    assert_eq!(
        requests[0],
        ActionRequest::Navigate("mailto:ann@x.com".to_string())
    );
    assert_eq!(
        requests[1],
        ActionRequest::OpenInNewTab("https://example.com".to_string())
    );
}

#[test]
fn invariant_save_contact_downloads_vcard() {
    let (mut controller, recorder) = controller_with_recorder();
    controller.set_card_data(&ann_lee());
    controller.save_contact();

    let requests = recorder.borrow();
    let Some(ActionRequest::Download {
        filename,
        media_type,
        body,
    }) = requests.requests.first()
    else {
        panic!("expected a download request");
    };
    assert_eq!(filename, "Ann_Lee.vcf");
    assert_eq!(media_type, "text/vcard;charset=utf-8");
    assert!(body.contains("FN:Ann Lee"));
}

#[test]
fn invariant_vcard_end_to_end() {
    let vcard = generate_vcard(&ann_lee());
    assert!(vcard.contains("FN:Ann Lee"));
    assert!(vcard.contains("N:Lee;Ann;;;"));
    assert!(vcard.contains("EMAIL;TYPE=INTERNET:ann@x.com"));
    assert!(vcard.ends_with("END:VCARD"));
}

#[test]
fn invariant_name_requirement() {
    let nameless = CardData::default();
    let report = validate_card_data(&nameless);
    assert!(!report.valid);
    assert!(report.errors.iter().any(|e| e.contains("name")));

    for field in ["first", "last"] {
        let mut named = CardData::default();
        match field {
            "first" => named.first_name = Some("Ann".to_string()),
            _ => named.last_name = Some("Lee".to_string()),
        }
        assert!(validate_card_data(&named).valid, "one {field} name suffices");
    }
}

#[test]
fn invariant_sanitize_preserves_other_fields() {
    let mut card = ann_lee();
    card.summary = Some("<script>alert(1)</script>".to_string());

    let clean = sanitize_card_data(&card);
    assert_eq!(clean.summary.as_deref(), Some(""));
    assert_eq!(clean.first_name, card.first_name);
    assert_eq!(clean.email_v2, card.email_v2);
}

#[test]
fn invariant_hex_rgba_roundtrip() {
    for hex in ["#000000", "#ffffff", "#007bff", "#a1b2c3", "#fff", "#1e9"] {
        let rgb = hex_to_rgb(hex);
        let rgba = hex_to_rgba(hex, 0.5);
        assert_eq!(
            rgba,
            format!("rgba({}, {}, {}, 0.5)", rgb.r, rgb.g, rgb.b),
            "mismatch for {hex}"
        );
    }
}

#[test]
fn invariant_initials_bounds() {
    for (first, last) in [("Ann", "Lee"), ("ann", ""), ("", ""), ("  ", " "), ("X", "Y")] {
        let result = initials::get_initials(first, last);
        assert!(result.chars().count() <= 2);
        assert!(result.chars().all(|c| c.is_uppercase()));
        let blank = first.trim().is_empty() && last.trim().is_empty();
        assert_eq!(result == initials::DEFAULT_INITIALS, blank, "({first:?}, {last:?})");
    }
}

#[test]
fn invariant_ingress_priority() {
    // Island beats attribute beats property.
    let mut controller =
        CardController::new(Box::new(ProbeLayout), Box::<RecordedActions>::default());
    let mut early = CardData::default();
    early.first_name = Some("Property".to_string());
    controller.set_card_data(&early);

    let mut islands = HashMap::new();
    islands.insert(
        "island".to_string(),
        r#"{"first_name":"Island"}"#.to_string(),
    );
    let attrs = SourceAttributes {
        card_data: Some(r#"{"first_name":"Attribute"}"#.to_string()),
        data_source: Some("island".to_string()),
        ..SourceAttributes::default()
    };
    controller.mount(&attrs, &islands);
    assert_eq!(controller.output(), "Island");
}

#[test_log::test]
fn invariant_malformed_json_keeps_prior_state() {
    let mut controller = mounted_controller();
    controller.set_card_data(&ann_lee());
    let renders = controller.render_count();

    controller.apply_attribute("card-data", "{definitely not json", &NoIslands);

    assert_eq!(controller.card_data().first_name.as_deref(), Some("Ann"));
    assert_eq!(controller.render_count(), renders);
}

#[test_log::test]
fn invariant_missing_island_falls_back() {
    let mut controller =
        CardController::new(Box::new(ProbeLayout), Box::<RecordedActions>::default());
    let attrs = SourceAttributes {
        card_data: Some(r#"{"first_name":"Fallback"}"#.to_string()),
        data_source: Some("missing-island".to_string()),
        ..SourceAttributes::default()
    };
    controller.mount(&attrs, &NoIslands);
    assert_eq!(controller.output(), "Fallback");
}

#[test]
fn invariant_no_listener_leak_across_remount() {
    let (mut controller, recorder) = controller_with_recorder();
    controller.add_listener(|_| EventOutcome::Cancelled);
    controller.unmount();

    // Fresh mount pass: the cancel listener must be gone, so the default
    // action fires again.
    controller.mount(&SourceAttributes::default(), &NoIslands);
    controller.contact_click(ContactKind::Phone, "+15550100", "Mobile");

    assert_eq!(
        recorder.borrow().requests,
        vec![ActionRequest::Navigate("tel:+15550100".to_string())]
    );
}

#[test]
fn invariant_data_egress_is_a_copy() {
    let mut controller = mounted_controller();
    controller.set_card_data(&ann_lee());

    let mut copy = controller.card_data();
    copy.first_name = Some("Mutated".to_string());

    assert_eq!(controller.card_data().first_name.as_deref(), Some("Ann"));
}
