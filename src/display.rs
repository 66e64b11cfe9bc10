//! The capabilities an element must provide to be pooled by a
//! [`RecyclingList`](crate::RecyclingList).

use crate::triggers::{
    TriggerOnClick, TriggerOnHover, TriggerOnSelect, TriggerOnValueChange, TriggerOnValueEditEnd,
};

/// A type that can present a value of type `T`.
///
/// Displaying takes `&self` so an element can be re-rendered from inside one
/// of its own event callbacks. Implementors use interior mutability for their
/// presented state.
///
/// Displaying must not fire any of the element's own events. A read-only list
/// reverts an edit by calling `display` from inside the element's
/// value-changed or edit-end callback, while that event's channel is locked;
/// firing it again from `display` deadlocks.
pub trait Display<T> {
    /// Presents `value`, replacing whatever was presented before.
    fn display(&self, value: &T);
}

/// An element that a [`RecyclingList`](crate::RecyclingList) can place,
/// show, hide and rebind.
///
/// The `as_*` methods probe for optional interaction capabilities. Each
/// returns `None` by default. An implementation may return itself or any
/// element it contains. The list probes each capability exactly once, when
/// the element is instantiated.
pub trait ListElement<T>: Display<T> + Send + Sync + 'static {
    /// Shows or hides this element.
    fn set_active(&self, active: bool);

    /// Moves this element so that its center sits at `y` within the list's
    /// content area. Rows extend downwards along negative `y`.
    fn set_vertical_position(&self, y: f32);

    /// Returns this element's select capability, if it has one.
    fn as_selectable(&self) -> Option<&dyn TriggerOnSelect> {
        None
    }

    /// Returns this element's hover capability, if it has one.
    fn as_hoverable(&self) -> Option<&dyn TriggerOnHover> {
        None
    }

    /// Returns this element's click capability, if it has one.
    fn as_clickable(&self) -> Option<&dyn TriggerOnClick> {
        None
    }

    /// Returns this element's value-changed capability, if it has one.
    fn as_value_changeable(&self) -> Option<&dyn TriggerOnValueChange<T>> {
        None
    }

    /// Returns this element's edit-end capability, if it has one.
    fn as_edit_endable(&self) -> Option<&dyn TriggerOnValueEditEnd<T>> {
        None
    }
}
