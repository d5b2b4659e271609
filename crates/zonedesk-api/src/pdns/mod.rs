// PowerDNS-style zone API: one zone, read as a whole, changed via rrset PATCH.

mod client;
mod types;

pub use client::PdnsClient;
pub use types::{ChangeType, PatchRequest, Record, RrSet, RrSetChange, Ttl, Zone};
