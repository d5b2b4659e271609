//! Terminal input as a stream of [`Event`]s, polled from the app's own
//! `select!` loop alongside console results.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::warn;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    /// Animation tick for loading indicators.
    Tick,
}

pub struct Events {
    stream: EventStream,
    tick: Interval,
}

impl Events {
    pub fn new(tick_rate: Duration) -> Self {
        let mut tick = tokio::time::interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            stream: EventStream::new(),
            tick,
        }
    }

    /// Next key press, resize or tick. `None` once the terminal input
    /// has closed. Cancel-safe.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                _ = self.tick.tick() => return Some(Event::Tick),
                polled = self.stream.next() => match polled? {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        return Some(Event::Key(key));
                    }
                    Ok(CrosstermEvent::Resize(w, h)) => return Some(Event::Resize(w, h)),
                    // Releases, repeats, focus, mouse and paste
                    Ok(_) => {}
                    Err(err) => {
                        warn!(error = %err, "terminal input failed");
                        return None;
                    }
                },
            }
        }
    }
}
