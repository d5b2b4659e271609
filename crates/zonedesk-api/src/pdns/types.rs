// Wire types for the PowerDNS-style zone API.
//
// Only the fields the console reads or writes are modelled; unknown
// fields in responses (comments, serial, kind, ...) are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `GET /servers/localhost/zones/{zone}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rrsets: Vec<RrSet>,
}

/// One resource-record set: a (name, type) pair with its records and TTL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RrSet {
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub content: String,
    #[serde(default)]
    pub disabled: bool,
}

impl Record {
    pub fn enabled(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Replace,
    Delete,
}

/// TTL as sent in a change.
///
/// The form's TTL is free text. It goes out as a number when it parses as
/// one and verbatim otherwise, leaving validation to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ttl {
    Seconds(u32),
    Raw(String),
}

impl Ttl {
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        trimmed
            .parse::<u32>()
            .map_or_else(|_| Self::Raw(input.to_owned()), Self::Seconds)
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds(s) => write!(f, "{s}"),
            Self::Raw(r) => f.write_str(r),
        }
    }
}

/// One entry of a `PATCH` change list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RrSetChange {
    pub changetype: ChangeType,
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Ttl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Record>,
}

impl RrSetChange {
    /// Replace the whole rrset with a single enabled record.
    pub fn replace(
        name: impl Into<String>,
        rtype: impl Into<String>,
        ttl: Ttl,
        content: impl Into<String>,
    ) -> Self {
        Self {
            changetype: ChangeType::Replace,
            name: name.into(),
            rtype: rtype.into(),
            ttl: Some(ttl),
            records: vec![Record::enabled(content)],
        }
    }

    /// Remove the rrset entirely.
    pub fn delete(name: impl Into<String>, rtype: impl Into<String>) -> Self {
        Self {
            changetype: ChangeType::Delete,
            name: name.into(),
            rtype: rtype.into(),
            ttl: None,
            records: Vec::new(),
        }
    }
}

/// `PATCH` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRequest {
    pub rrsets: Vec<RrSetChange>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn replace_change_wire_shape() {
        let body = PatchRequest {
            rrsets: vec![RrSetChange::replace("foo", "A", Ttl::from_input("300"), "1.2.3.4")],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "rrsets": [{
                    "changetype": "REPLACE",
                    "name": "foo",
                    "type": "A",
                    "ttl": 300,
                    "records": [{ "content": "1.2.3.4", "disabled": false }]
                }]
            })
        );
    }

    #[test]
    fn delete_change_omits_ttl_and_records() {
        let change = RrSetChange::delete("foo.c3.wtf.", "TXT");
        assert_eq!(
            serde_json::to_value(&change).unwrap(),
            json!({ "changetype": "DELETE", "name": "foo.c3.wtf.", "type": "TXT" })
        );
    }

    #[test]
    fn unparseable_ttl_is_sent_verbatim() {
        assert_eq!(Ttl::from_input(" 60 "), Ttl::Seconds(60));
        assert_eq!(Ttl::from_input("1h"), Ttl::Raw("1h".into()));
        assert_eq!(
            serde_json::to_value(Ttl::from_input("abc")).unwrap(),
            json!("abc")
        );
    }

    #[test]
    fn zone_ignores_unknown_fields() {
        let zone: Zone = serde_json::from_value(json!({
            "name": "c3.wtf.",
            "kind": "Native",
            "serial": 2024010101,
            "rrsets": [{
                "name": "c3.wtf.",
                "type": "SOA",
                "ttl": 3600,
                "comments": [],
                "records": [{ "content": "ns1 hostmaster 1 2 3 4 5", "disabled": false }]
            }]
        }))
        .unwrap();
        assert_eq!(zone.rrsets.len(), 1);
        assert_eq!(zone.rrsets[0].rtype, "SOA");
        assert_eq!(zone.rrsets[0].records[0].content, "ns1 hostmaster 1 2 3 4 5");
    }
}
