use parking_lot::Mutex;

use super::ElementState;
use crate::display::{Display, ListElement};
use crate::event::Event;
use crate::triggers::{
    TriggerOnClick, TriggerOnHover, TriggerOnSelect, TriggerOnValueChange, TriggerOnValueEditEnd,
};

#[derive(Debug, Default)]
struct FieldState {
    element: ElementState,
    focused: bool,
}

/// An editable text element.
///
/// A [`TextIo`] reports every interaction a list element can: selection,
/// hovering, clicks, live edits and the end of an editing session.
/// Displaying a value replaces the text without reporting an edit.
#[derive(Debug, Default)]
pub struct TextIo {
    state: Mutex<FieldState>,
    select: Event<()>,
    pointer_enter: Event<()>,
    pointer_exit: Event<()>,
    click: Event<()>,
    value_changed: Event<String>,
    value_edit_end: Event<String>,
}

impl TextIo {
    /// Returns a new, empty text field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text currently in this field.
    #[must_use]
    pub fn text(&self) -> String {
        self.state.lock().element.text.clone()
    }

    /// Returns true if this field is shown.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.lock().element.active
    }

    /// Returns the vertical position of this field's center.
    #[must_use]
    pub fn vertical_position(&self) -> f32 {
        self.state.lock().element.vertical_position
    }

    /// Returns true if this field holds input focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.state.lock().focused
    }

    /// Focuses this field and reports it as selected.
    pub fn select(&self) {
        self.state.lock().focused = true;
        self.select.notify();
    }

    /// Removes input focus from this field without ending an edit.
    pub fn blur(&self) {
        self.state.lock().focused = false;
    }

    /// Replaces the text as if the user typed it, reporting the change.
    pub fn type_text(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut state = self.state.lock();
            state.focused = true;
            state.element.text.clone_from(&text);
        }
        self.value_changed.invoke(&text);
    }

    /// Ends the current editing session, reporting the field's text and
    /// releasing focus.
    pub fn end_edit(&self) {
        let text = {
            let mut state = self.state.lock();
            state.focused = false;
            state.element.text.clone()
        };
        self.value_edit_end.invoke(&text);
    }

    /// Clicks this field.
    pub fn click(&self) {
        self.click.notify();
    }

    /// Moves the pointer over this field.
    pub fn pointer_enter(&self) {
        self.pointer_enter.notify();
    }

    /// Moves the pointer off of this field.
    pub fn pointer_exit(&self) {
        self.pointer_exit.notify();
    }
}

impl Display<String> for TextIo {
    fn display(&self, value: &String) {
        self.state.lock().element.text.clone_from(value);
    }
}

impl TriggerOnSelect for TextIo {
    fn on_select(&self) -> &Event<()> {
        &self.select
    }
}

impl TriggerOnHover for TextIo {
    fn on_pointer_enter(&self) -> &Event<()> {
        &self.pointer_enter
    }

    fn on_pointer_exit(&self) -> &Event<()> {
        &self.pointer_exit
    }
}

impl TriggerOnClick for TextIo {
    fn on_click(&self) -> &Event<()> {
        &self.click
    }
}

impl TriggerOnValueChange<String> for TextIo {
    fn on_value_changed(&self) -> &Event<String> {
        &self.value_changed
    }
}

impl TriggerOnValueEditEnd<String> for TextIo {
    fn on_value_edit_end(&self) -> &Event<String> {
        &self.value_edit_end
    }
}

impl ListElement<String> for TextIo {
    fn set_active(&self, active: bool) {
        self.state.lock().element.active = active;
    }

    fn set_vertical_position(&self, y: f32) {
        self.state.lock().element.vertical_position = y;
    }

    fn as_selectable(&self) -> Option<&dyn TriggerOnSelect> {
        Some(self)
    }

    fn as_hoverable(&self) -> Option<&dyn TriggerOnHover> {
        Some(self)
    }

    fn as_clickable(&self) -> Option<&dyn TriggerOnClick> {
        Some(self)
    }

    fn as_value_changeable(&self) -> Option<&dyn TriggerOnValueChange<String>> {
        Some(self)
    }

    fn as_edit_endable(&self) -> Option<&dyn TriggerOnValueEditEnd<String>> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::TextIo;
    use crate::display::Display;
    use crate::triggers::{TriggerOnValueChange, TriggerOnValueEditEnd};

    #[test]
    fn displaying_does_not_report_an_edit() {
        let field = TextIo::new();
        let edits = Arc::new(Mutex::new(0));
        let _subscription = field.on_value_changed().subscribe({
            let edits = edits.clone();
            move |_| *edits.lock() += 1
        });

        field.display(&String::from("shown"));

        assert_eq!(field.text(), "shown");
        assert_eq!(*edits.lock(), 0);
    }

    #[test]
    fn typing_then_ending_an_edit() {
        let field = TextIo::new();
        let committed = Arc::new(Mutex::new(Vec::new()));
        let _subscription = field.on_value_edit_end().subscribe({
            let committed = committed.clone();
            move |text: &String| committed.lock().push(text.clone())
        });

        field.type_text("draft");
        assert!(field.is_focused());
        field.type_text("final");
        field.end_edit();

        assert!(!field.is_focused());
        assert_eq!(*committed.lock(), ["final"]);
    }
}
