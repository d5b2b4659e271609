// ── Credential holder ──
//
// Two copies of the key: the one being typed and the one in effect.
// Only saving promotes the typed key, and only the saved key ever reaches
// a request. Neither is persisted or serialized.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

/// Character shown per hidden key character.
pub const MASK_CHAR: char = '\u{2022}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Replace the typed key.
    Edit(String),
    Push(char),
    Pop,
    ToggleMask,
    /// Promote the typed key to the saved key.
    Save,
}

/// What saving did to the key in effect.
#[derive(Debug, Clone)]
pub enum SessionEffect {
    /// First usable key: mount the verticals.
    Mount(SecretString),
    /// A different usable key: keep the verticals, refetch with this one.
    Rekey(SecretString),
    /// The saved key is now empty: tear the verticals down.
    Unmount,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    #[serde(skip)]
    pending: String,
    #[serde(skip)]
    saved: Option<SecretString>,
    masked: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            pending: String::new(),
            saved: None,
            masked: true,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// The typed key, unmasked. Only the credential panel should need this.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// The key in effect, if one has been saved and is non-empty.
    pub fn saved_key(&self) -> Option<&SecretString> {
        self.saved
            .as_ref()
            .filter(|k| !k.expose_secret().is_empty())
    }

    /// Whether the typed key differs from the one in effect.
    pub fn is_dirty(&self) -> bool {
        let saved = self.saved.as_ref().map_or("", |k| k.expose_secret());
        saved != self.pending
    }

    /// Typed key as the input field shows it.
    pub fn display(&self) -> String {
        if self.masked {
            MASK_CHAR.to_string().repeat(self.pending.chars().count())
        } else {
            self.pending.clone()
        }
    }

    pub fn apply(&mut self, action: SessionAction) -> Option<SessionEffect> {
        match action {
            SessionAction::Edit(value) => self.pending = value,
            SessionAction::Push(c) => self.pending.push(c),
            SessionAction::Pop => {
                self.pending.pop();
            }
            SessionAction::ToggleMask => self.masked = !self.masked,
            SessionAction::Save => return self.save(),
        }
        None
    }

    fn save(&mut self) -> Option<SessionEffect> {
        let had_key = self.saved_key().is_some();
        let unchanged = !self.is_dirty();
        self.saved = Some(SecretString::from(self.pending.clone()));

        if unchanged {
            return None;
        }

        let effect = match (had_key, self.pending.is_empty()) {
            (false, false) => Some(SessionEffect::Mount(SecretString::from(self.pending.clone()))),
            (true, false) => Some(SessionEffect::Rekey(SecretString::from(self.pending.clone()))),
            (true, true) => Some(SessionEffect::Unmount),
            (false, true) => None,
        };
        debug!(
            effect = ?effect.as_ref().map(SessionEffect::name),
            "credential saved"
        );
        effect
    }
}

impl SessionEffect {
    fn name(&self) -> &'static str {
        match self {
            Self::Mount(_) => "mount",
            Self::Rekey(_) => "rekey",
            Self::Unmount => "unmount",
        }
    }
}
