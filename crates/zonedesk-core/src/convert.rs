// ── API → domain conversions ──
//
// Wire types from zonedesk-api become the items the lists display.
// Disabled records are kept; the list only shows the first record anyway.

use zonedesk_api::{Record, RrSet, Shorturl};

use crate::model::{RecordSet, RecordValue, ShortLink};

impl From<Record> for RecordValue {
    fn from(r: Record) -> Self {
        Self {
            content: r.content,
            disabled: r.disabled,
        }
    }
}

impl From<RrSet> for RecordSet {
    fn from(r: RrSet) -> Self {
        Self {
            name: r.name,
            rtype: r.rtype,
            ttl: r.ttl,
            records: r.records.into_iter().map(RecordValue::from).collect(),
        }
    }
}

impl From<Shorturl> for ShortLink {
    fn from(s: Shorturl) -> Self {
        Self {
            slug: s.slug,
            target: s.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rrset_keeps_record_order() {
        let rrset = RrSet {
            name: "c3.wtf.".into(),
            rtype: "A".into(),
            ttl: 60,
            records: vec![Record::enabled("1.2.3.4"), Record::enabled("1.2.3.5")],
        };
        let set = RecordSet::from(rrset);
        assert_eq!(set.first_content(), Some("1.2.3.4"));
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.ttl, 60);
    }
}
