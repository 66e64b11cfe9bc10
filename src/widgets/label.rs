use parking_lot::Mutex;

use super::ElementState;
use crate::display::{Display, ListElement};
use crate::event::Event;
use crate::triggers::TriggerOnClick;

/// A read-only text element.
///
/// The only interaction a [`TextDisplay`] reports is being clicked.
#[derive(Debug, Default)]
pub struct TextDisplay {
    state: Mutex<ElementState>,
    click: Event<()>,
}

impl TextDisplay {
    /// Returns a new, empty label.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text currently presented.
    #[must_use]
    pub fn text(&self) -> String {
        self.state.lock().text.clone()
    }

    /// Returns true if this label is shown.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }

    /// Returns the vertical position of this label's center.
    #[must_use]
    pub fn vertical_position(&self) -> f32 {
        self.state.lock().vertical_position
    }

    /// Clicks this label.
    pub fn click(&self) {
        self.click.notify();
    }
}

impl Display<String> for TextDisplay {
    fn display(&self, value: &String) {
        self.state.lock().text.clone_from(value);
    }
}

impl TriggerOnClick for TextDisplay {
    fn on_click(&self) -> &Event<()> {
        &self.click
    }
}

impl ListElement<String> for TextDisplay {
    fn set_active(&self, active: bool) {
        self.state.lock().active = active;
    }

    fn set_vertical_position(&self, y: f32) {
        self.state.lock().vertical_position = y;
    }

    fn as_clickable(&self) -> Option<&dyn TriggerOnClick> {
        Some(self)
    }
}
