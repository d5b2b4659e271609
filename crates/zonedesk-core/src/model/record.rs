// ── DNS domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Record types the form can write.
///
/// The list shows whatever the zone holds (SOA, NS, MX, ...); only these
/// four are offered when composing a change.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RecordType {
    #[default]
    A,
    Aaaa,
    Cname,
    Txt,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// [`RecordType`] strings in form order.
pub const RECORD_TYPES: &[&str] = &["A", "AAAA", "CNAME", "TXT"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValue {
    pub content: String,
    pub disabled: bool,
}

/// One rrset of the zone as the list shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub name: String,
    /// Raw type string from the server, not limited to [`RecordType`].
    pub rtype: String,
    pub ttl: u32,
    pub records: Vec<RecordValue>,
}

impl RecordSet {
    /// Natural key: name and type concatenated.
    pub fn key(&self) -> String {
        format!("{}{}", self.name, self.rtype)
    }

    /// Content of the first record, which is what the list displays.
    pub fn first_content(&self) -> Option<&str> {
        self.records.first().map(|r| r.content.as_str())
    }

    /// The type as a writable [`RecordType`], if it is one.
    pub fn record_type(&self) -> Option<RecordType> {
        self.rtype.parse().ok()
    }
}
