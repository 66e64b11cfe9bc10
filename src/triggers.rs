//! Optional interaction capabilities of list elements.

use std::fmt::{self, Debug};

use crate::display::ListElement;
use crate::event::Event;

/// An element that reports becoming selected.
pub trait TriggerOnSelect {
    /// Fired when the element becomes selected.
    fn on_select(&self) -> &Event<()>;
}

/// An element that reports the pointer entering and leaving it.
pub trait TriggerOnHover {
    /// Fired when the pointer enters the element.
    fn on_pointer_enter(&self) -> &Event<()>;
    /// Fired when the pointer leaves the element.
    fn on_pointer_exit(&self) -> &Event<()>;
}

/// An element that reports being clicked.
pub trait TriggerOnClick {
    /// Fired when the element is clicked.
    fn on_click(&self) -> &Event<()>;
}

/// An element whose value can be edited, reporting every live change.
pub trait TriggerOnValueChange<T> {
    /// Fired with the new value on every edit.
    fn on_value_changed(&self) -> &Event<T>;
}

/// An element whose value can be edited, reporting when an editing session
/// ends.
pub trait TriggerOnValueEditEnd<T> {
    /// Fired once with the committed value when editing ends.
    fn on_value_edit_end(&self) -> &Event<T>;
}

/// The interaction events an element exposes, gathered by probing it once.
///
/// Each field holds a handle to the element's own channel, so subscribing
/// through a [`Triggers`] subscribes to the element directly.
pub struct Triggers<T> {
    /// The element's select event.
    pub select: Option<Event<()>>,
    /// The element's pointer-enter event.
    pub pointer_enter: Option<Event<()>>,
    /// The element's pointer-exit event.
    pub pointer_exit: Option<Event<()>>,
    /// The element's click event.
    pub click: Option<Event<()>>,
    /// The element's live value-changed event.
    pub value_changed: Option<Event<T>>,
    /// The element's edit-end event.
    pub value_edit_end: Option<Event<T>>,
}

impl<T> Triggers<T>
where
    T: 'static,
{
    /// Probes `element` for every interaction capability.
    pub fn probe<E>(element: &E) -> Self
    where
        E: ListElement<T> + ?Sized,
    {
        let hover = element.as_hoverable();
        Self {
            select: element.as_selectable().map(|s| s.on_select().clone()),
            pointer_enter: hover.map(|h| h.on_pointer_enter().clone()),
            pointer_exit: hover.map(|h| h.on_pointer_exit().clone()),
            click: element.as_clickable().map(|c| c.on_click().clone()),
            value_changed: element
                .as_value_changeable()
                .map(|c| c.on_value_changed().clone()),
            value_edit_end: element
                .as_edit_endable()
                .map(|e| e.on_value_edit_end().clone()),
        }
    }

    /// Returns the number of capabilities found.
    #[must_use]
    pub fn len(&self) -> usize {
        [
            self.select.is_some(),
            self.pointer_enter.is_some(),
            self.pointer_exit.is_some(),
            self.click.is_some(),
            self.value_changed.is_some(),
            self.value_edit_end.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Returns true if the element exposes no interaction capability.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Debug for Triggers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Triggers")
            .field("select", &self.select.is_some())
            .field("pointer_enter", &self.pointer_enter.is_some())
            .field("pointer_exit", &self.pointer_exit.is_some())
            .field("click", &self.click.is_some())
            .field("value_changed", &self.value_changed.is_some())
            .field("value_edit_end", &self.value_edit_end.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{TriggerOnClick, Triggers};
    use crate::widgets::{TextDisplay, TextIo};

    #[test]
    fn probing_a_label_finds_only_click() {
        let label = TextDisplay::new();

        let triggers = Triggers::<String>::probe(&label);

        assert_eq!(triggers.len(), 1);
        assert!(triggers.click.is_some());
        assert!(triggers.value_changed.is_none());
        assert!(triggers.select.is_none());
    }

    #[test]
    fn probing_a_text_field_finds_everything() {
        let field = TextIo::new();

        let triggers = Triggers::<String>::probe(&field);

        assert_eq!(triggers.len(), 6);
        assert!(!triggers.is_empty());
    }

    #[test]
    fn probed_events_share_the_elements_channel() {
        let field = TextIo::new();
        let triggers = Triggers::<String>::probe(&field);

        let _subscription = triggers
            .click
            .as_ref()
            .expect("text fields are clickable")
            .subscribe(|()| {});

        assert_eq!(field.on_click().subscribers(), 1);
    }
}
