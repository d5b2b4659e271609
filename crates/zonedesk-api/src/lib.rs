// zonedesk-api: Async Rust clients for the zone (PowerDNS-style) and short-URL APIs

pub mod auth;
pub mod error;
pub mod pdns;
pub mod surl;
pub mod transport;
pub mod write;

pub use auth::API_KEY_HEADER;
pub use error::Error;
pub use pdns::{ChangeType, PdnsClient, Record, RrSet, RrSetChange, Ttl, Zone};
pub use surl::{Shorturl, ShorturlClient};
pub use transport::TransportConfig;
pub use write::{Rejection, WriteOutcome};
