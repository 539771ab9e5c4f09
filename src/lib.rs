//! cardkit-core - Digital Business Card Components
//!
//! # Ground Rules
//! 1. Every card field is optional; absence is normal, not an error.
//! 2. Validation warns, it never blocks rendering.
//! 3. Card data is cloned on ingress and egress; nothing aliases it.
//! 4. Identical payloads never re-render.
//! 5. Every default action can be cancelled by a listener.

pub mod card;
pub mod color;
pub mod config;
pub mod event;
pub mod initials;
pub mod layouts;
pub mod lifecycle;
pub mod registry;
pub mod validation;
pub mod vcard;

pub use card::{Background, BackgroundKind, CardData, ContactEntry, Customizations, SocialLinks};
pub use config::{CardConfig, Theme};
pub use event::{
    contact_uri, ActionError, ActionRequest, CardEvent, ContactKind, DefaultActions,
    DiscardActions, EventKind, EventOutcome, RecordedActions, SharePayload,
};
pub use lifecycle::{
    CardController, DataIslandSource, LifecycleState, NoIslands, Renderable, SourceAttributes,
};
pub use registry::LayoutRegistry;
pub use validation::{
    is_valid_color, is_valid_email, is_valid_phone, is_valid_url, sanitize_card_data,
    validate_card_data, validate_card_json, ValidationReport,
};
pub use vcard::{generate_vcard, vcard_filename, VCARD_MEDIA_TYPE};

pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
