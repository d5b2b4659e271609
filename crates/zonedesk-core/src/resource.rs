// ── Resource descriptions ──
//
// Both verticals are the same machine over different data. A `Resource`
// names the item and draft types and says how to key, display and edit
// an item; everything else is generic.

use std::fmt;

use serde::Serialize;

use crate::console::ConsoleEvent;
use crate::model::{DnsDraft, Draft, RecordSet, ShortLink, ShorturlDraft};
use crate::state::VerticalAction;

/// Which vertical an event or view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum VerticalKind {
    #[strum(to_string = "DNS records")]
    Dns,
    #[strum(to_string = "Short URLs")]
    Shorturls,
}

pub trait Resource: fmt::Debug + Clone + Copy + Send + Sync + 'static {
    type Item: Clone + PartialEq + fmt::Debug + Serialize + Send + Sync + 'static;
    type Draft: Draft;

    const KIND: VerticalKind;

    /// Column headings for [`Resource::row`].
    const COLUMNS: &'static [&'static str];

    /// Natural key, unique within one list.
    fn key(item: &Self::Item) -> String;

    /// Display cells, one per column.
    fn row(item: &Self::Item) -> Vec<String>;

    /// Prefill a draft from a listed item. `None` when the form cannot
    /// express the item.
    fn draft_from(item: &Self::Item) -> Option<Self::Draft>;

    /// Wrap an action for delivery through the console's event channel.
    fn event(epoch: u64, action: VerticalAction<Self>) -> ConsoleEvent;
}

// ── DNS ─────────────────────────────────────────────────────────────

/// Records of the configured zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dns;

impl Resource for Dns {
    type Item = RecordSet;
    type Draft = DnsDraft;

    const KIND: VerticalKind = VerticalKind::Dns;
    const COLUMNS: &'static [&'static str] = &["Name", "Type", "Content", "TTL"];

    fn key(item: &RecordSet) -> String {
        item.key()
    }

    fn row(item: &RecordSet) -> Vec<String> {
        vec![
            item.name.clone(),
            item.rtype.clone(),
            item.first_content().unwrap_or_default().to_owned(),
            item.ttl.to_string(),
        ]
    }

    fn draft_from(item: &RecordSet) -> Option<DnsDraft> {
        Some(DnsDraft {
            name: item.name.clone(),
            rtype: item.record_type()?,
            content: item.first_content().unwrap_or_default().to_owned(),
            ttl: item.ttl.to_string(),
        })
    }

    fn event(epoch: u64, action: VerticalAction<Self>) -> ConsoleEvent {
        ConsoleEvent::Dns { epoch, action }
    }
}

// ── Short URLs ──────────────────────────────────────────────────────

/// The short-URL table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shorturls;

impl Resource for Shorturls {
    type Item = ShortLink;
    type Draft = ShorturlDraft;

    const KIND: VerticalKind = VerticalKind::Shorturls;
    const COLUMNS: &'static [&'static str] = &["Slug", "Target"];

    fn key(item: &ShortLink) -> String {
        item.slug.clone()
    }

    fn row(item: &ShortLink) -> Vec<String> {
        vec![item.slug.clone(), item.target.clone()]
    }

    fn draft_from(item: &ShortLink) -> Option<ShorturlDraft> {
        Some(ShorturlDraft {
            slug: item.slug.clone(),
            target: item.target.clone(),
        })
    }

    fn event(epoch: u64, action: VerticalAction<Self>) -> ConsoleEvent {
        ConsoleEvent::Shorturls { epoch, action }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{RecordType, RecordValue};

    fn rrset(rtype: &str) -> RecordSet {
        RecordSet {
            name: "foo.c3.wtf.".into(),
            rtype: rtype.into(),
            ttl: 300,
            records: vec![RecordValue {
                content: "1.2.3.4".into(),
                disabled: false,
            }],
        }
    }

    #[test]
    fn dns_row_shows_first_record() {
        assert_eq!(
            Dns::row(&rrset("A")),
            vec!["foo.c3.wtf.", "A", "1.2.3.4", "300"]
        );
        assert_eq!(Dns::row(&rrset("A")).len(), Dns::COLUMNS.len());
    }

    #[test]
    fn dns_draft_from_writable_type_only() {
        let draft = Dns::draft_from(&rrset("A")).unwrap();
        assert_eq!(draft.rtype, RecordType::A);
        assert_eq!(draft.content, "1.2.3.4");
        assert_eq!(Dns::draft_from(&rrset("SOA")), None);
    }

    #[test]
    fn shorturl_row_and_key() {
        let link = ShortLink {
            slug: "a".into(),
            target: "http://x".into(),
        };
        assert_eq!(Shorturls::row(&link), vec!["a", "http://x"]);
        assert_eq!(Shorturls::key(&link), "a");
    }
}
