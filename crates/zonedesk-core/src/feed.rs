// ── Change feed ──
//
// One per vertical. A successful write bumps the version; every
// subscriber sees the bump and refetches. `watch` coalesces bursts, so a
// subscriber that falls behind refetches once, not once per write.

use tokio::sync::watch;

#[derive(Debug)]
pub struct ChangeFeed {
    version: watch::Sender<u64>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        Self { version }
    }

    /// Notify subscribers that the remote collection changed.
    pub fn announce(&self) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.version.send_modify(|v| *v += 1);
    }

    /// Receiver that wakes on the next announcement.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}
