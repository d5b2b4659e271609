// ── Form drafts ──
//
// A draft is the form's editable value: plain text fields addressed by
// name, so one reducer can serve every vertical. Only field names listed
// in `FIELDS` are accepted.

use std::fmt;

use serde::Serialize;

use super::record::{RECORD_TYPES, RecordType};

/// Editable form contents for one vertical.
pub trait Draft: Clone + Default + PartialEq + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Field names in display order.
    const FIELDS: &'static [&'static str];

    /// Current text of a field.
    fn get(&self, field: &str) -> Option<&str>;

    /// Replace a field's text. Returns `false` for an unknown field or a
    /// value the field cannot hold.
    fn set(&mut self, field: &str, value: String) -> bool;

    /// Allowed values for a fixed-choice field; `None` for free text.
    fn choices(_field: &str) -> Option<&'static [&'static str]> {
        None
    }
}

// ── DNS ─────────────────────────────────────────────────────────────

/// Draft of a single-record rrset replacement.
///
/// TTL stays text; it is sent as a number when it parses as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsDraft {
    pub name: String,
    pub rtype: RecordType,
    pub content: String,
    pub ttl: String,
}

impl Default for DnsDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            rtype: RecordType::A,
            content: String::new(),
            ttl: "300".into(),
        }
    }
}

impl Draft for DnsDraft {
    const FIELDS: &'static [&'static str] = &["name", "type", "content", "ttl"];

    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "type" => Some(self.rtype.as_str()),
            "content" => Some(&self.content),
            "ttl" => Some(&self.ttl),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: String) -> bool {
        match field {
            "name" => self.name = value,
            "type" => match value.parse() {
                Ok(rtype) => self.rtype = rtype,
                Err(_) => return false,
            },
            "content" => self.content = value,
            "ttl" => self.ttl = value,
            _ => return false,
        }
        true
    }

    fn choices(field: &str) -> Option<&'static [&'static str]> {
        (field == "type").then_some(RECORD_TYPES)
    }
}

// ── Short URLs ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShorturlDraft {
    pub slug: String,
    pub target: String,
}

impl Draft for ShorturlDraft {
    const FIELDS: &'static [&'static str] = &["slug", "target"];

    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "slug" => Some(&self.slug),
            "target" => Some(&self.target),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: String) -> bool {
        match field {
            "slug" => self.slug = value,
            "target" => self.target = value,
            _ => return false,
        }
        true
    }
}
