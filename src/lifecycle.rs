//! Shared component lifecycle.
//!
//! [`CardController`] carries everything a layout does NOT have to care
//! about: data ingress from attributes, data islands, or direct assignment;
//! change detection; validation warnings; the cancelable event protocol with
//! default-action fallback; and listener cleanup on unmount. Layouts only
//! implement [`Renderable`] and are composed in by value — no inheritance.
//!
//! State machine per instance:
//! `constructed -> mounted <-> rendered -> disconnected`. Disconnecting is
//! terminal for the mounted pass; mounting again runs a fresh pass.

use std::collections::HashMap;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::card::CardData;
use crate::config::CardConfig;
use crate::event::{
    contact_uri, CardEvent, ContactKind, DefaultActions, EventKind, EventOutcome, SharePayload,
};
use crate::validation::validate_card_data;
use crate::vcard::{generate_vcard, vcard_filename, VCARD_MEDIA_TYPE};

/// Contract every layout must satisfy, independent of its visual output.
pub trait Renderable {
    /// Stable identifier of the layout (e.g. `"classic"`).
    fn layout_id(&self) -> &'static str;

    /// Static markup/style skeleton, produced once per mount.
    fn template(&self) -> String;

    /// Project the current data into the content region. The returned
    /// markup replaces the previous content entirely.
    fn render(&mut self, data: &CardData, config: &CardConfig) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Constructed,
    Mounted,
    Rendered,
    Disconnected,
}

/// The attribute surface of a card component.
#[derive(Debug, Clone, Default)]
pub struct SourceAttributes {
    /// Inline JSON card data (`card-data`).
    pub card_data: Option<String>,
    /// Inline JSON config (`config`).
    pub config: Option<String>,
    /// Id of a data island holding card data JSON (`data-source`).
    pub data_source: Option<String>,
    /// Id of a data island holding config JSON (`config-source`).
    pub config_source: Option<String>,
}

/// Resolves data-island references (ids of sibling elements whose text
/// content is JSON). Preferred ingress path for server-rendered contexts.
pub trait DataIslandSource {
    fn island_text(&self, id: &str) -> Option<String>;
}

impl DataIslandSource for HashMap<String, String> {
    fn island_text(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// An environment with no data islands at all.
pub struct NoIslands;

impl DataIslandSource for NoIslands {
    fn island_text(&self, _id: &str) -> Option<String> {
        None
    }
}

type Listener = Box<dyn FnMut(&CardEvent) -> EventOutcome>;

/// Lifecycle controller composing a [`Renderable`] layout with the shared
/// data/event machinery.
pub struct CardController {
    renderer: Box<dyn Renderable>,
    actions: Box<dyn DefaultActions>,
    instance_id: Uuid,
    data: CardData,
    config: CardConfig,
    // Serialized form of the last accepted payloads; identical payloads are
    // ignored so each distinct input renders at most once.
    last_data_json: String,
    last_config_json: String,
    state: LifecycleState,
    render_count: u64,
    skeleton: String,
    output: String,
    listeners: Vec<Listener>,
}

impl CardController {
    pub fn new(renderer: Box<dyn Renderable>, actions: Box<dyn DefaultActions>) -> Self {
        Self {
            renderer,
            actions,
            instance_id: Uuid::new_v4(),
            data: CardData::default(),
            config: CardConfig::default(),
            last_data_json: String::new(),
            last_config_json: String::new(),
            state: LifecycleState::Constructed,
            render_count: 0,
            skeleton: String::new(),
            output: String::new(),
            listeners: Vec::new(),
        }
    }

    pub fn layout_id(&self) -> &'static str {
        self.renderer.layout_id()
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Renders performed so far; observable for the
    /// at-most-one-render-per-distinct-input guarantee.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Markup produced by the last render.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Static skeleton captured at mount.
    pub fn skeleton(&self) -> &str {
        &self.skeleton
    }

    fn is_connected(&self) -> bool {
        matches!(self.state, LifecycleState::Mounted | LifecycleState::Rendered)
    }

    // ===== mount / unmount =====

    /// Run a mount pass: capture the skeleton, load data and config by
    /// priority (island, inline attribute, prior property assignment),
    /// render, and emit `card-ready`.
    pub fn mount(&mut self, attrs: &SourceAttributes, islands: &dyn DataIslandSource) {
        self.state = LifecycleState::Mounted;
        self.skeleton = self.renderer.template();

        self.load_data(attrs, islands);
        self.load_config(attrs, islands);
        self.render();

        let detail = json!({
            "has_data": !self.last_data_json.is_empty(),
            "has_config": !self.last_config_json.is_empty(),
            "instance": self.instance_id,
        });
        // card-ready is informational; there is no default action to cancel.
        self.emit(EventKind::CardReady, detail);
    }

    /// Disconnect: drop every listener registered on this pass. No listener
    /// survives across repeated mount/unmount cycles.
    pub fn unmount(&mut self) {
        self.listeners.clear();
        self.state = LifecycleState::Disconnected;
    }

    // ===== data ingress =====

    fn load_data(&mut self, attrs: &SourceAttributes, islands: &dyn DataIslandSource) {
        if let Some(id) = attrs.data_source.as_deref() {
            if self.ingest_data_island(id, islands) {
                return;
            }
        }
        if let Some(json) = attrs.card_data.as_deref() {
            if self.ingest_data_json(json) {
                return;
            }
        }
        if !self.last_data_json.is_empty() {
            // Priority 3: data was assigned through the property before mount.
            return;
        }
        tracing::warn!(
            layout = self.renderer.layout_id(),
            "no card data provided; use data-source, card-data, or assign card data"
        );
    }

    fn load_config(&mut self, attrs: &SourceAttributes, islands: &dyn DataIslandSource) {
        if let Some(id) = attrs.config_source.as_deref() {
            if self.ingest_config_island(id, islands) {
                return;
            }
        }
        if let Some(json) = attrs.config.as_deref() {
            let _ = self.ingest_config_json(json);
        }
        // Otherwise keep whatever the property assigned, or the defaults.
    }

    fn ingest_data_island(&mut self, id: &str, islands: &dyn DataIslandSource) -> bool {
        let Some(text) = islands.island_text(id) else {
            tracing::warn!(island = id, "data source element not found");
            return false;
        };
        self.ingest_data_json(text.trim())
    }

    fn ingest_config_island(&mut self, id: &str, islands: &dyn DataIslandSource) -> bool {
        let Some(text) = islands.island_text(id) else {
            tracing::warn!(island = id, "config source element not found");
            return false;
        };
        self.ingest_config_json(text.trim())
    }

    /// Accept serialized card data. Returns true when the payload was
    /// consumed (including the identical-payload no-op case); on malformed
    /// JSON the prior state is retained and false is returned so callers can
    /// fall through to the next ingress source.
    fn ingest_data_json(&mut self, payload: &str) -> bool {
        if payload.is_empty() {
            return false;
        }
        if payload == self.last_data_json {
            return true;
        }
        match serde_json::from_str::<CardData>(payload) {
            Ok(data) => {
                self.data = data;
                self.last_data_json = payload.to_string();
                if self.is_connected() {
                    self.render();
                }
                true
            }
            Err(err) => {
                tracing::error!(
                    layout = self.renderer.layout_id(),
                    error = %err,
                    "invalid card-data JSON; keeping previous data"
                );
                false
            }
        }
    }

    fn ingest_config_json(&mut self, payload: &str) -> bool {
        if payload.is_empty() {
            return false;
        }
        if payload == self.last_config_json {
            return true;
        }
        let overrides: Value = match serde_json::from_str(payload) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(
                    layout = self.renderer.layout_id(),
                    error = %err,
                    "invalid config JSON; keeping previous config"
                );
                return false;
            }
        };
        match CardConfig::merged_over_defaults(&overrides) {
            Ok(config) => {
                self.config = config;
                self.last_config_json = payload.to_string();
                if self.is_connected() {
                    self.render();
                }
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "config rejected; keeping previous config");
                false
            }
        }
    }

    /// Attribute-change entry point (the reactive counterpart of `mount`).
    pub fn apply_attribute(&mut self, name: &str, value: &str, islands: &dyn DataIslandSource) {
        match name {
            "card-data" => {
                let _ = self.ingest_data_json(value);
            }
            "config" => {
                let _ = self.ingest_config_json(value);
            }
            "data-source" => {
                let _ = self.ingest_data_island(value, islands);
            }
            "config-source" => {
                let _ = self.ingest_config_island(value, islands);
            }
            other => {
                tracing::debug!(attribute = other, "ignoring unobserved attribute");
            }
        }
    }

    /// Assign card data directly. Invalid data is logged as a warning but
    /// still accepted; identical payloads are ignored.
    pub fn set_card_data(&mut self, data: &CardData) {
        let report = validate_card_data(data);
        if !report.valid {
            tracing::warn!(
                layout = self.renderer.layout_id(),
                errors = ?report.errors,
                "card data failed validation; rendering anyway"
            );
        }

        let serialized = match serde_json::to_string(data) {
            Ok(s) => s,
            Err(err) => {
                tracing::error!(error = %err, "card data not serializable; ignoring assignment");
                return;
            }
        };
        if serialized == self.last_data_json {
            return;
        }

        self.data = data.clone();
        self.last_data_json = serialized;
        if self.is_connected() {
            self.render();
        }
    }

    /// Read-only copy of the current card data.
    pub fn card_data(&self) -> CardData {
        self.data.clone()
    }

    /// Merge a config object over the defaults and store it.
    pub fn set_config(&mut self, overrides: &Value) {
        let serialized = overrides.to_string();
        if serialized == self.last_config_json {
            return;
        }
        match CardConfig::merged_over_defaults(overrides) {
            Ok(config) => {
                self.config = config;
                self.last_config_json = serialized;
                if self.is_connected() {
                    self.render();
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "config rejected; keeping previous config");
            }
        }
    }

    /// Read-only copy of the current config.
    pub fn config(&self) -> CardConfig {
        self.config.clone()
    }

    fn render(&mut self) {
        self.output = self.renderer.render(&self.data, &self.config);
        self.render_count += 1;
        self.state = LifecycleState::Rendered;
    }

    // ===== event system =====

    /// Register an interaction listener. Returning
    /// [`EventOutcome::Cancelled`] suppresses the default action for that
    /// event, exactly like `preventDefault` on a DOM custom event.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&CardEvent) -> EventOutcome + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, kind: EventKind, detail: Value) -> EventOutcome {
        let event = CardEvent {
            kind,
            layout: self.renderer.layout_id().to_string(),
            timestamp: chrono::Utc::now(),
            detail,
        };
        let mut outcome = EventOutcome::Handled;
        // Every listener sees the event even after one cancels it.
        for listener in &mut self.listeners {
            if listener(&event) == EventOutcome::Cancelled {
                outcome = EventOutcome::Cancelled;
            }
        }
        outcome
    }

    // ===== interaction entry points =====

    /// Contact click (phone, email, website, address, custom). Unless a
    /// listener cancels, the matching default URI is opened.
    pub fn contact_click(&mut self, kind: ContactKind, value: &str, label: &str) {
        let detail = json!({ "type": kind, "value": value, "label": label });
        if self.emit(EventKind::ContactClick, detail) == EventOutcome::Cancelled {
            return;
        }

        let Some(uri) = contact_uri(kind, value) else {
            return;
        };
        let result = match kind {
            ContactKind::Email | ContactKind::Phone => self.actions.navigate(&uri),
            _ => self.actions.open_in_new_tab(&uri),
        };
        if let Err(err) = result {
            tracing::warn!(?kind, error = %err, "default contact action failed");
        }
    }

    /// Save-contact: generate a vCard and offer it as a download unless a
    /// listener cancels (e.g. to run a custom contact-sync integration).
    pub fn save_contact(&mut self) {
        let vcard = generate_vcard(&self.data);
        let detail = json!({ "vcard_data": &vcard, "card_data": self.data });
        if self.emit(EventKind::SaveContact, detail) == EventOutcome::Cancelled {
            return;
        }

        let filename = vcard_filename(&self.data);
        if let Err(err) = self.actions.download(&filename, VCARD_MEDIA_TYPE, &vcard) {
            tracing::warn!(error = %err, "vCard download failed");
        }
    }

    /// Share the card. `page_url` is the URL of the hosting page.
    pub fn share(&mut self, page_url: &str) {
        let payload = SharePayload {
            title: self.data.full_name(),
            text: "Check out my digital business card".to_string(),
            url: page_url.to_string(),
        };
        let detail = json!({ "share_data": &payload, "card_data": self.data });
        if self.emit(EventKind::Share, detail) == EventOutcome::Cancelled {
            return;
        }
        if let Err(err) = self.actions.share(&payload) {
            tracing::warn!(error = %err, "share action failed");
        }
    }

    /// Social link click; default opens the URL in a new tab.
    pub fn social_click(&mut self, platform: &str, url: &str) {
        let detail = json!({ "platform": platform, "url": url });
        if self.emit(EventKind::SocialClick, detail) == EventOutcome::Cancelled {
            return;
        }
        if let Err(err) = self.actions.open_in_new_tab(url) {
            tracing::warn!(platform, error = %err, "social link action failed");
        }
    }

    /// Lead collection. No default action: the consumer must handle it.
    pub fn lead_collect(&mut self, fields: Value) {
        let detail = json!({ "lead_data": fields, "card_data": self.data });
        self.emit(EventKind::LeadCollect, detail);
    }

    /// Custom field click. No default action.
    pub fn custom_field_click(&mut self, field_id: &str, field_value: &str) {
        let detail = json!({ "field_id": field_id, "field_value": field_value });
        self.emit(EventKind::CustomFieldClick, detail);
    }
}
