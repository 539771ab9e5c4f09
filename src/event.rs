//! Interaction events and default actions.
//!
//! Every user interaction follows the same two-phase contract: the
//! controller emits a cancelable [`CardEvent`]; unless a listener returns
//! [`EventOutcome::Cancelled`], the built-in default action runs through the
//! [`DefaultActions`] collaborator supplied at construction time. A host can
//! therefore observe interactions passively or replace default behavior
//! entirely without patching the component.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The fixed set of events a card component emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    CardReady,
    ContactClick,
    Share,
    SaveContact,
    LeadCollect,
    SocialClick,
    CustomFieldClick,
}

impl EventKind {
    /// DOM-style event name.
    pub fn name(self) -> &'static str {
        match self {
            Self::CardReady => "card-ready",
            Self::ContactClick => "contact-click",
            Self::Share => "share",
            Self::SaveContact => "save-contact",
            Self::LeadCollect => "lead-collect",
            Self::SocialClick => "social-click",
            Self::CustomFieldClick => "custom-field-click",
        }
    }
}

/// An emitted interaction event. `detail` carries the structured payload;
/// `layout` identifies the emitting layout and `timestamp` the emission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardEvent {
    pub kind: EventKind,
    pub layout: String,
    pub timestamp: DateTime<Utc>,
    pub detail: Value,
}

/// Listener verdict: `Cancelled` suppresses the built-in default action,
/// leaving the host solely responsible for the behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    Cancelled,
}

/// Contact value categories with distinct default actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Phone,
    Email,
    Website,
    Address,
    Custom,
}

// Same unreserved set as ECMAScript's encodeURIComponent, so the maps URL
// matches what a browser-side encoder would produce byte for byte.
fn encode_query_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'!' | b'*'
            | b'\'' | b'(' | b')' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Build the default URI for a contact click: `mailto:`/`tel:` for email and
/// phone, an https-prefixed URL for websites, a maps search for addresses.
/// Custom fields have no default URI.
pub fn contact_uri(kind: ContactKind, value: &str) -> Option<String> {
    match kind {
        ContactKind::Email => Some(format!("mailto:{}", value)),
        ContactKind::Phone => Some(format!("tel:{}", value)),
        ContactKind::Website => {
            if value.starts_with("http") {
                Some(value.to_string())
            } else {
                Some(format!("https://{}", value))
            }
        }
        ContactKind::Address => Some(format!(
            "https://www.google.com/maps/search/?api=1&query={}",
            encode_query_component(value)
        )),
        ContactKind::Custom => None,
    }
}

/// Payload handed to the share default action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action blocked by host environment: {0}")]
    Blocked(String),
    #[error("action not supported: {0}")]
    Unsupported(String),
}

/// Built-in default behaviors, injected at controller construction.
///
/// Implementations talk to whatever host environment embeds the component
/// (a browser bridge, a test recorder, a headless harness). Errors are
/// caught and logged by the controller, never propagated.
pub trait DefaultActions {
    /// Navigate the current context to a URI (`tel:`, `mailto:`).
    fn navigate(&mut self, uri: &str) -> Result<(), ActionError>;

    /// Open a URL in a new tab/window.
    fn open_in_new_tab(&mut self, url: &str) -> Result<(), ActionError>;

    /// Offer a file download to the user.
    fn download(&mut self, filename: &str, media_type: &str, body: &str)
        -> Result<(), ActionError>;

    /// Invoke the host share affordance.
    fn share(&mut self, payload: &SharePayload) -> Result<(), ActionError>;
}

/// What a default action was asked to do; recorded by [`RecordedActions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Navigate(String),
    OpenInNewTab(String),
    Download {
        filename: String,
        media_type: String,
        body: String,
    },
    Share(SharePayload),
}

/// Records every requested action. Used by tests and the CLI to observe
/// default behavior without a real host environment.
#[derive(Debug, Default)]
pub struct RecordedActions {
    pub requests: Vec<ActionRequest>,
}

impl DefaultActions for RecordedActions {
    fn navigate(&mut self, uri: &str) -> Result<(), ActionError> {
        self.requests.push(ActionRequest::Navigate(uri.to_string()));
        Ok(())
    }

    fn open_in_new_tab(&mut self, url: &str) -> Result<(), ActionError> {
        self.requests
            .push(ActionRequest::OpenInNewTab(url.to_string()));
        Ok(())
    }

    fn download(
        &mut self,
        filename: &str,
        media_type: &str,
        body: &str,
    ) -> Result<(), ActionError> {
        self.requests.push(ActionRequest::Download {
            filename: filename.to_string(),
            media_type: media_type.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }

    fn share(&mut self, payload: &SharePayload) -> Result<(), ActionError> {
        self.requests.push(ActionRequest::Share(payload.clone()));
        Ok(())
    }
}

/// Logs requested actions at debug level and drops them. The fallback for
/// hosts that wire no environment bridge at all.
#[derive(Debug, Default)]
pub struct DiscardActions;

impl DefaultActions for DiscardActions {
    fn navigate(&mut self, uri: &str) -> Result<(), ActionError> {
        tracing::debug!(uri, "discarding navigate action");
        Ok(())
    }

    fn open_in_new_tab(&mut self, url: &str) -> Result<(), ActionError> {
        tracing::debug!(url, "discarding open-in-new-tab action");
        Ok(())
    }

    fn download(
        &mut self,
        filename: &str,
        media_type: &str,
        _body: &str,
    ) -> Result<(), ActionError> {
        tracing::debug!(filename, media_type, "discarding download action");
        Ok(())
    }

    fn share(&mut self, payload: &SharePayload) -> Result<(), ActionError> {
        tracing::debug!(url = %payload.url, "discarding share action");
        Ok(())
    }
}
