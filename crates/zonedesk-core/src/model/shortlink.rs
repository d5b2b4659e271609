// ── Short-URL domain types ──

use serde::{Deserialize, Serialize};

/// A slug and the URL it redirects to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub slug: String,
    pub target: String,
}
