use serde::{Deserialize, Serialize};

use crate::models::order::OrderStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaqItem {
    pub id: i64,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub order_position: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFaqItem {
    pub question: String,
    pub answer: String,
    pub order_position: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqUpdate {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub order_position: i64,
}

// Not linked to `OrderStatus` upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusDefinition {
    pub id: i64,
    pub status_key: String,
    pub status_label: String,
    pub status_color: String,
    #[serde(default)]
    pub order_position: i64,
}

impl StatusDefinition {
    pub fn matches_order_status(&self) -> bool {
        OrderStatus::from_key(&self.status_key).is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStatusDefinition {
    pub status_key: String,
    pub status_label: String,
    pub status_color: String,
    pub order_position: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub company_name: String,
    pub support_phone: String,
    pub support_email: String,
    pub tariff_standard: String,
    pub tariff_optimal: String,
    pub chat_phone: String,
    pub chat_telegram: String,
    pub chat_whatsapp: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactLink {
    pub channel: &'static str,
    pub label: String,
    pub href: String,
}

impl Settings {
    pub fn contact_links(&self) -> Vec<ContactLink> {
        let mut links = Vec::new();

        if !self.chat_phone.trim().is_empty() {
            links.push(ContactLink {
                channel: "phone",
                label: self.chat_phone.trim().to_string(),
                href: format!("tel:{}", phone_digits(&self.chat_phone, true)),
            });
        }

        if !self.chat_telegram.trim().is_empty() {
            let handle = self.chat_telegram.trim().trim_start_matches('@');
            links.push(ContactLink {
                channel: "telegram",
                label: format!("@{handle}"),
                href: format!("https://t.me/{handle}"),
            });
        }

        if !self.chat_whatsapp.trim().is_empty() {
            links.push(ContactLink {
                channel: "whatsapp",
                label: self.chat_whatsapp.trim().to_string(),
                href: format!("https://wa.me/{}", phone_digits(&self.chat_whatsapp, false)),
            });
        }

        if !self.support_email.trim().is_empty() {
            links.push(ContactLink {
                channel: "email",
                label: self.support_email.trim().to_string(),
                href: format!("mailto:{}", self.support_email.trim()),
            });
        }

        links
    }
}

fn phone_digits(raw: &str, keep_plus: bool) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if keep_plus && raw.trim_start().starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}
