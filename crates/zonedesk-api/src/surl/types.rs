use serde::{Deserialize, Serialize};

/// One redirect: `slug` is the unique key, `target` the destination URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shorturl {
    pub slug: String,
    pub target: String,
}

/// `PUT /{slug}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutShorturl {
    pub target: String,
}
