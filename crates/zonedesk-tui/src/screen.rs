//! Panel identifiers and focus order.

use std::fmt;

/// The three panels of the console, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Credential,
    Dns,
    Shorturls,
}

impl PanelId {
    pub const ALL: [PanelId; 3] = [Self::Credential, Self::Dns, Self::Shorturls];

    pub fn next(self) -> Self {
        match self {
            Self::Credential => Self::Dns,
            Self::Dns => Self::Shorturls,
            Self::Shorturls => Self::Credential,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Credential => Self::Shorturls,
            Self::Dns => Self::Credential,
            Self::Shorturls => Self::Dns,
        }
    }

    /// Shortcut key shown in the header.
    pub fn number(self) -> u8 {
        match self {
            Self::Credential => 1,
            Self::Dns => 2,
            Self::Shorturls => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.number() == n)
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credential => write!(f, "API Key"),
            Self::Dns => write!(f, "DNS"),
            Self::Shorturls => write!(f, "Short URLs"),
        }
    }
}
