// Short-URL API: slug → target mappings under a single collection path.

mod client;
mod types;

pub use client::ShorturlClient;
pub use types::{PutShorturl, Shorturl};
