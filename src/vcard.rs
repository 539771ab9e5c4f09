//! vCard 3.0 text generation.
//!
//! Field order is fixed: FN, N, ORG, TITLE, EMAIL*, TEL*, URL, ADR.
//! Values are emitted verbatim; commas, semicolons, and newlines inside
//! values are NOT escaped per RFC 2426. Hosts that need strict escaping
//! must intercept `save-contact` and supply their own vCard.

use crate::card::CardData;

/// Media type for vCard downloads.
pub const VCARD_MEDIA_TYPE: &str = "text/vcard;charset=utf-8";

fn field<'a>(value: &'a Option<String>) -> Option<&'a str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Generate vCard 3.0 text from a card record.
pub fn generate_vcard(card: &CardData) -> String {
    let first = field(&card.first_name).unwrap_or_default();
    let last = field(&card.last_name).unwrap_or_default();

    let mut vcard = String::from("BEGIN:VCARD\nVERSION:3.0\n");
    vcard.push_str(&format!("FN:{} {}\n", first, last));
    vcard.push_str(&format!("N:{};{};;;\n", last, first));

    if let Some(company) = field(&card.company) {
        vcard.push_str(&format!("ORG:{}\n", company));
    }
    if let Some(designation) = field(&card.designation) {
        vcard.push_str(&format!("TITLE:{}\n", designation));
    }

    for email in card.email_v2.iter().filter(|e| e.is_meaningful()) {
        vcard.push_str(&format!("EMAIL;TYPE=INTERNET:{}\n", email.value.trim()));
    }
    for phone in card.phone_v2.iter().filter(|p| p.is_meaningful()) {
        vcard.push_str(&format!("TEL;TYPE=VOICE:{}\n", phone.value.trim()));
    }

    if let Some(website) = card.website_v2.iter().find(|w| w.is_meaningful()) {
        vcard.push_str(&format!("URL:{}\n", website.value.trim()));
    }
    if let Some(address) = field(&card.address_v2) {
        vcard.push_str(&format!("ADR;TYPE=WORK:;;{};;;;\n", address));
    }

    vcard.push_str("END:VCARD");
    vcard
}

/// Download filename: `{first}_{last}.vcf` with placeholder fallbacks.
pub fn vcard_filename(card: &CardData) -> String {
    let first = field(&card.first_name).unwrap_or("contact");
    let last = field(&card.last_name).unwrap_or("card");
    format!("{}_{}.vcf", first, last)
}
