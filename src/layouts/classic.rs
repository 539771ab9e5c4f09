//! The `classic` layout: a single-column card with an avatar header,
//! contact sections, social links, and a save-contact button.
//!
//! Interactive elements carry `data-action` attributes so a host bridge can
//! route clicks to the matching controller entry points.

use std::fmt::Write;

use crate::card::{CardData, ContactEntry};
use crate::color::{adjust_brightness, contrast_color, hex_to_rgba};
use crate::config::CardConfig;
use crate::initials::{initials_background_color, initials_with_fallback};
use crate::lifecycle::Renderable;

pub const LAYOUT_ID: &str = "classic";

/// Escape a string for interpolation into markup text or attribute values.
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub struct ClassicLayout;

impl ClassicLayout {
    fn avatar(data: &CardData, config: &CardConfig) -> String {
        if config.show_profile_image {
            if let Some(url) = data.user_image_url.as_deref().filter(|u| !u.trim().is_empty()) {
                return format!(
                    r#"<img class="avatar" src="{}" alt="profile">"#,
                    escape_html(url)
                );
            }
        }
        let seed = {
            let name = data.full_name();
            if name.is_empty() {
                data.company.clone().unwrap_or_default()
            } else {
                name
            }
        };
        format!(
            r#"<div class="avatar initials" style="background-color: {}">{}</div>"#,
            initials_background_color(&seed),
            escape_html(&initials_with_fallback(data))
        )
    }

    fn identity(data: &CardData) -> String {
        let mut block = String::new();
        let name = data.full_name();
        if !name.is_empty() {
            let _ = write!(block, r#"<h1 class="name">{}</h1>"#, escape_html(&name));
        }
        if let Some(pronouns) = data.pronouns_v2.as_deref().filter(|p| !p.trim().is_empty()) {
            let _ = write!(block, r#"<span class="pronouns">{}</span>"#, escape_html(pronouns));
        }
        if let Some(designation) = data.designation.as_deref().filter(|d| !d.trim().is_empty()) {
            let _ = write!(block, r#"<p class="designation">{}</p>"#, escape_html(designation));
        }
        let company_line: Vec<&str> = [data.company.as_deref(), data.department.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if !company_line.is_empty() {
            let _ = write!(
                block,
                r#"<p class="company">{}</p>"#,
                escape_html(&company_line.join(" · "))
            );
        }
        block
    }

    fn contact_item(kind: &str, entry: &ContactEntry) -> String {
        let label = if entry.label.trim().is_empty() {
            kind
        } else {
            entry.label.trim()
        };
        format!(
            r#"<li class="contact" data-action="contact" data-type="{}" data-value="{}"><span class="label">{}</span><span class="value">{}</span></li>"#,
            kind,
            escape_html(entry.value.trim()),
            escape_html(label),
            escape_html(entry.value.trim())
        )
    }

    fn contacts(data: &CardData, config: &CardConfig) -> String {
        let mut items = String::new();
        let mut remaining = config.max_contact_fields.unwrap_or(usize::MAX);

        for key in &data.contact_info_ordering {
            if key == "custom_fields" && !config.show_custom_fields {
                continue;
            }
            let Some(entries) = data.contact_collection(key) else {
                continue;
            };
            let kind = match key.as_str() {
                "phone_v2" => "phone",
                "email_v2" => "email",
                "website_v2" => "website",
                _ => "custom",
            };
            for entry in entries.iter().filter(|e| e.is_meaningful()) {
                if remaining == 0 {
                    break;
                }
                items.push_str(&Self::contact_item(kind, entry));
                remaining -= 1;
            }
        }

        if let Some(address) = data.address_v2.as_deref().filter(|a| !a.trim().is_empty()) {
            items.push_str(&Self::contact_item(
                "address",
                &ContactEntry::new(address.trim(), "Address"),
            ));
        }

        if items.is_empty() {
            String::new()
        } else {
            format!(r#"<ul class="contacts">{}</ul>"#, items)
        }
    }

    fn socials(data: &CardData, config: &CardConfig) -> String {
        if !config.show_social_links || data.social_links.is_empty() {
            return String::new();
        }
        let mut items = String::new();
        for (platform, url) in data.social_links.present() {
            let _ = write!(
                items,
                r#"<a class="social" data-action="social" data-platform="{}" href="{}">{}</a>"#,
                platform,
                escape_html(url),
                platform
            );
        }
        format!(r#"<nav class="socials">{}</nav>"#, items)
    }

    fn buttons(config: &CardConfig, button_color: &str) -> String {
        let text_color = contrast_color(button_color);
        let hover = adjust_brightness(button_color, -20);
        let mut block = format!(
            r#"<button class="save" data-action="save-contact" style="background-color: {}; color: {}" data-hover="{}">Save Contact</button>"#,
            button_color, text_color, hover
        );
        if config.enable_sharing {
            block.push_str(r#"<button class="share" data-action="share">Share</button>"#);
        }
        if config.enable_lead_collection {
            block.push_str(
                r#"<button class="lead" data-action="lead-collect">Stay in touch</button>"#,
            );
        }
        block
    }
}

impl Renderable for ClassicLayout {
    fn layout_id(&self) -> &'static str {
        LAYOUT_ID
    }

    fn template(&self) -> String {
        concat!(
            "<style>",
            ".card{border-radius:12px;padding:24px;max-width:420px}",
            ".card.compact{padding:12px}",
            ".avatar{width:96px;height:96px;border-radius:50%}",
            ".avatar.initials{display:flex;align-items:center;justify-content:center;",
            "color:#ffffff;font-size:32px}",
            ".contacts{list-style:none;padding:0}",
            ".contact{cursor:pointer;padding:8px 0}",
            "</style>",
            r#"<div class="card"><div class="content"></div></div>"#,
        )
        .to_string()
    }

    fn render(&mut self, data: &CardData, config: &CardConfig) -> String {
        let styling = &data.customizations;
        let background = styling.background_color();
        let button_color = styling.button_color();
        let accent = hex_to_rgba(button_color, 0.12);

        let mut markup = format!(
            r#"<div class="card{}" style="background-color: {}; --accent: {}; --icon: {}; font-family: {}">"#,
            if config.compact_mode { " compact" } else { "" },
            background,
            accent,
            styling.icon_color(),
            escape_html(styling.font_style()),
        );

        if config.show_logo {
            if let Some(logo) = data.logo_url.as_deref().filter(|l| !l.trim().is_empty()) {
                let _ = write!(
                    markup,
                    r#"<img class="logo" src="{}" alt="logo">"#,
                    escape_html(logo)
                );
            }
        }

        markup.push_str(&Self::avatar(data, config));
        markup.push_str(&Self::identity(data));

        if let Some(summary) = data.summary.as_deref().filter(|s| !s.trim().is_empty()) {
            let _ = write!(markup, r#"<p class="bio">{}</p>"#, escape_html(summary));
        }

        markup.push_str(&Self::contacts(data, config));
        markup.push_str(&Self::socials(data, config));
        markup.push_str(&Self::buttons(config, button_color));
        markup.push_str("</div>");
        markup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::SocialLinks;

    fn sample() -> CardData {
        CardData {
            first_name: Some("Ann".to_string()),
            last_name: Some("Lee".to_string()),
            designation: Some("CTO".to_string()),
            company: Some("Acme".to_string()),
            summary: Some("Builds things.".to_string()),
            phone_v2: vec![ContactEntry::new("+1 555 0100", "Mobile")],
            email_v2: vec![ContactEntry::new("ann@x.com", "Work")],
            social_links: SocialLinks {
                github: Some("https://github.com/annlee".to_string()),
                ..SocialLinks::default()
            },
            ..CardData::default()
        }
    }

    #[test]
    fn test_renders_identity_and_contacts() {
        let markup = ClassicLayout.render(&sample(), &CardConfig::default());
        assert!(markup.contains("Ann Lee"));
        assert!(markup.contains(r#"data-type="phone""#));
        assert!(markup.contains("ann@x.com"));
        assert!(markup.contains(r#"data-platform="github""#));
        assert!(markup.contains("Save Contact"));
    }

    #[test]
    fn test_initials_avatar_without_image() {
        let markup = ClassicLayout.render(&sample(), &CardConfig::default());
        assert!(markup.contains(r#"class="avatar initials""#));
        assert!(markup.contains(">AL<"));
    }

    #[test]
    fn test_ordering_respected() {
        let mut data = sample();
        data.contact_info_ordering = vec!["email_v2".to_string(), "phone_v2".to_string()];
        let markup = ClassicLayout.render(&data, &CardConfig::default());
        let email_at = markup.find("ann@x.com").expect("email rendered");
        let phone_at = markup.find("+1 555 0100").expect("phone rendered");
        assert!(email_at < phone_at);
    }

    #[test]
    fn test_max_contact_fields() {
        let config = CardConfig {
            max_contact_fields: Some(1),
            ..CardConfig::default()
        };
        let markup = ClassicLayout.render(&sample(), &config);
        assert!(markup.contains("+1 555 0100"));
        assert!(!markup.contains("ann@x.com"));
    }

    #[test]
    fn test_markup_escapes_user_strings() {
        let mut data = sample();
        data.summary = Some("<b>bold</b> & more".to_string());
        let markup = ClassicLayout.render(&data, &CardConfig::default());
        assert!(markup.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"));
    }

    #[test]
    fn test_default_palette_applied() {
        let markup = ClassicLayout.render(&sample(), &CardConfig::default());
        assert!(markup.contains("background-color: #ffffff"));
        assert!(markup.contains("rgba(0, 123, 255, 0.12)"));
    }
}
