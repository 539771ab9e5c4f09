//! Component behavior configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

/// Behavior switches shared by every layout. The wire format uses camelCase
/// keys (`showLogo`, `enableSharing`). Unknown host-supplied keys are
/// ignored; missing keys fall back to defaults (shallow merge).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CardConfig {
    pub show_profile_image: bool,
    pub show_logo: bool,
    pub show_social_links: bool,
    pub show_custom_fields: bool,
    pub enable_sharing: bool,
    pub enable_lead_collection: bool,
    pub compact_mode: bool,
    pub max_contact_fields: Option<usize>,
    pub theme: Theme,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            show_profile_image: true,
            show_logo: true,
            show_social_links: true,
            show_custom_fields: true,
            enable_sharing: true,
            enable_lead_collection: false,
            compact_mode: false,
            max_contact_fields: None,
            theme: Theme::Auto,
        }
    }
}

impl CardConfig {
    /// Merge a JSON object over the defaults. Keys absent from the object
    /// keep their default value; the merge is shallow by design.
    pub fn merged_over_defaults(overrides: &Value) -> Result<Self, serde_json::Error> {
        let mut base = serde_json::to_value(Self::default())?;
        if let (Value::Object(base), Value::Object(overrides)) = (&mut base, overrides) {
            for (key, value) in overrides {
                base.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(base)
    }
}
