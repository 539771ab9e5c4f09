//! Card data model.
//!
//! Every field is optional: consumers must treat absence as normal and fall
//! back to defaults. Unknown fields are preserved in `extra` so host pages
//! can round-trip template-specific data through the component untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single `{value, label}` contact entry (phone, email, website, custom).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactEntry {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

impl ContactEntry {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An entry only counts when its value is a non-empty trimmed string.
    pub fn is_meaningful(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

/// Null entries inside contact arrays are treated as absent, not as errors.
fn contact_entries<'de, D>(deserializer: D) -> Result<Vec<ContactEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<Option<ContactEntry>> = Vec::deserialize(deserializer)?;
    Ok(entries.into_iter().flatten().collect())
}

/// Legacy single-value phone record kept for backward compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegacyPhone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
}

macro_rules! social_links {
    ($($field:ident),* $(,)?) => {
        /// Social platform URLs. The key set is fixed; values are optional.
        #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
        pub struct SocialLinks {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )*
        }

        impl SocialLinks {
            /// Platform/URL pairs that actually carry a value, in declaration order.
            pub fn present(&self) -> Vec<(&'static str, &str)> {
                let mut links = Vec::new();
                $(
                    if let Some(url) = self.$field.as_deref() {
                        if !url.trim().is_empty() {
                            links.push((stringify!($field), url));
                        }
                    }
                )*
                links
            }

            pub fn is_empty(&self) -> bool {
                self.present().is_empty()
            }
        }
    };
}

social_links!(
    linkedin, twitter, github, instagram, facebook, youtube, whatsapp, telegram, tiktok, snapchat,
    vimeo, wistia, twitch, discord, pinterest, yelp, paypal, venmo, cashapp, calendly, shopify,
    dribbble, behance, custom_url,
);

/// Per-section font overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FontSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_font_colour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_font_size: Option<f64>,
}

/// Typography overrides per card section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Typography {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<FontSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_details: Option<FontSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<FontSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<FontSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<FontSpec>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Color,
    Gradient,
    Image,
}

/// Card background, tagged `color | gradient | image`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Background {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    #[serde(default)]
    pub value: String,
}

/// Visual customizations chosen by the card owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customizations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_font_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<Typography>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
}

pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_ICON_COLOR: &str = "#333333";
pub const DEFAULT_BUTTON_COLOR: &str = "#007bff";
pub const DEFAULT_FONT_STYLE: &str = "Work Sans";

impl Default for Customizations {
    fn default() -> Self {
        Self {
            background_color: Some(DEFAULT_BACKGROUND_COLOR.to_string()),
            user_info_color: None,
            secondary_color: None,
            button_color: Some(DEFAULT_BUTTON_COLOR.to_string()),
            icon_color: Some(DEFAULT_ICON_COLOR.to_string()),
            font_style: Some(DEFAULT_FONT_STYLE.to_string()),
            title_font_size: None,
            font_type: None,
            custom_font_url: None,
            custom_font_style: None,
            typography: None,
            background: None,
        }
    }
}

impl Customizations {
    fn pick<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
        match value.as_deref() {
            Some(v) if !v.trim().is_empty() => v,
            _ => fallback,
        }
    }

    pub fn background_color(&self) -> &str {
        Self::pick(&self.background_color, DEFAULT_BACKGROUND_COLOR)
    }

    pub fn icon_color(&self) -> &str {
        Self::pick(&self.icon_color, DEFAULT_ICON_COLOR)
    }

    pub fn button_color(&self) -> &str {
        Self::pick(&self.button_color, DEFAULT_BUTTON_COLOR)
    }

    pub fn font_style(&self) -> &str {
        Self::pick(&self.font_style, DEFAULT_FONT_STYLE)
    }
}

fn default_ordering() -> Vec<String> {
    ["phone_v2", "email_v2", "website_v2", "custom_fields"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// The card record every component renders from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronouns_v2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "contact_entries")]
    pub phone_v2: Vec<ContactEntry>,
    #[serde(default, deserialize_with = "contact_entries")]
    pub email_v2: Vec<ContactEntry>,
    #[serde(default, deserialize_with = "contact_entries")]
    pub website_v2: Vec<ContactEntry>,
    #[serde(default, deserialize_with = "contact_entries")]
    pub custom_fields: Vec<ContactEntry>,

    // Legacy scalar contact fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<LegacyPhone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_v2: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    #[serde(default)]
    pub social_links: SocialLinks,
    #[serde(default)]
    pub customizations: Customizations,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default = "default_ordering")]
    pub contact_info_ordering: Vec<String>,

    /// Unknown fields, preserved for template-specific consumers.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CardData {
    fn default() -> Self {
        Self {
            id: None,
            first_name: None,
            last_name: None,
            prefix: None,
            suffix: None,
            pronouns_v2: None,
            designation: None,
            company: None,
            department: None,
            summary: None,
            phone_v2: Vec::new(),
            email_v2: Vec::new(),
            website_v2: Vec::new(),
            custom_fields: Vec::new(),
            phone: None,
            email: None,
            website: None,
            address_v2: None,
            user_image_url: None,
            logo_url: None,
            social_links: SocialLinks::default(),
            customizations: Customizations::default(),
            layout: None,
            contact_info_ordering: default_ordering(),
            extra: Map::new(),
        }
    }
}

impl CardData {
    /// Formatted display name: `prefix first last, suffix`, with absent
    /// pieces skipped.
    pub fn full_name(&self) -> String {
        let mut name = String::new();
        if let Some(prefix) = self.non_blank(&self.prefix) {
            name.push_str(prefix);
            name.push(' ');
        }
        if let Some(first) = self.non_blank(&self.first_name) {
            name.push_str(first);
        }
        if let Some(last) = self.non_blank(&self.last_name) {
            if !name.is_empty() && !name.ends_with(' ') {
                name.push(' ');
            }
            name.push_str(last);
        }
        if let Some(suffix) = self.non_blank(&self.suffix) {
            name.push_str(", ");
            name.push_str(suffix);
        }
        name.trim().to_string()
    }

    /// Whether any name field is present (first, last, or the flattened
    /// legacy `name` field).
    pub fn has_any_name(&self) -> bool {
        self.non_blank(&self.first_name).is_some()
            || self.non_blank(&self.last_name).is_some()
            || self
                .extra
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|n| !n.trim().is_empty())
    }

    /// The contact collection for an ordering key, or `None` for unknown keys.
    pub fn contact_collection(&self, key: &str) -> Option<&[ContactEntry]> {
        match key {
            "phone_v2" => Some(&self.phone_v2),
            "email_v2" => Some(&self.email_v2),
            "website_v2" => Some(&self.website_v2),
            "custom_fields" => Some(&self.custom_fields),
            _ => None,
        }
    }

    fn non_blank<'a>(&self, field: &'a Option<String>) -> Option<&'a str> {
        field.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_assembly() {
        let card = CardData {
            prefix: Some("Dr.".to_string()),
            first_name: Some("Ann".to_string()),
            last_name: Some("Lee".to_string()),
            suffix: Some("PhD".to_string()),
            ..CardData::default()
        };
        assert_eq!(card.full_name(), "Dr. Ann Lee, PhD");

        let partial = CardData {
            last_name: Some("Lee".to_string()),
            ..CardData::default()
        };
        assert_eq!(partial.full_name(), "Lee");
        assert_eq!(CardData::default().full_name(), "");
    }

    #[test]
    fn test_null_contact_entries_dropped() {
        let card: CardData = serde_json::from_str(
            r#"{"first_name":"Ann","phone_v2":[null,{"value":"123","label":"Work"},null]}"#,
        )
        .expect("parse");
        assert_eq!(card.phone_v2.len(), 1);
        assert_eq!(card.phone_v2[0].value, "123");
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let card: CardData =
            serde_json::from_str(r#"{"first_name":"Ann","theme_hint":"dark"}"#).expect("parse");
        assert_eq!(
            card.extra.get("theme_hint").and_then(Value::as_str),
            Some("dark")
        );
        let back = serde_json::to_value(&card).expect("serialize");
        assert_eq!(back["theme_hint"], "dark");
    }

    #[test]
    fn test_default_palette() {
        let card = CardData::default();
        assert_eq!(card.customizations.background_color(), "#ffffff");
        assert_eq!(card.customizations.button_color(), "#007bff");
        assert_eq!(card.customizations.icon_color(), "#333333");
        assert_eq!(card.customizations.font_style(), "Work Sans");
        assert_eq!(
            card.contact_info_ordering,
            vec!["phone_v2", "email_v2", "website_v2", "custom_fields"]
        );
    }

    #[test]
    fn test_social_links_present_order() {
        let links = SocialLinks {
            github: Some("https://github.com/annlee".to_string()),
            linkedin: Some("https://linkedin.com/in/annlee".to_string()),
            twitter: Some("  ".to_string()),
            ..SocialLinks::default()
        };
        let present = links.present();
        assert_eq!(
            present,
            vec![
                ("linkedin", "https://linkedin.com/in/annlee"),
                ("github", "https://github.com/annlee"),
            ]
        );
    }
}
