//! Component trait, the building block for every panel.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// Every panel implements Component.
///
/// Lifecycle: (`handle_key_event` | `update` | `render`)*
pub trait Component {
    /// Handle a keyboard event while focused. Return an Action to
    /// dispatch, or None.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect);

    fn set_focused(&mut self, focused: bool);

    /// Whether keys like `q` should reach the component as text.
    fn captures_text(&self) -> bool {
        false
    }
}
