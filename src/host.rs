//! The layout and scroll services a [`RecyclingList`](crate::RecyclingList)
//! relies on.

use crate::display::ListElement;

/// The scroll container that hosts a [`RecyclingList`](crate::RecyclingList).
///
/// A host owns the scrollable content area, knows how tall its viewport is,
/// creates new elements inside the content area, and answers focus queries.
pub trait ScrollHost<T> {
    /// The element type used to display list entries.
    type Element: ListElement<T>;

    /// Returns the visible height of the viewport.
    fn viewport_height(&self) -> f32;

    /// Returns how far the content has been scrolled. Zero is the top of the
    /// list; scrolling down increases the offset.
    fn scroll_offset(&self) -> f32;

    /// Resizes the scrollable content area.
    fn set_content_height(&mut self, height: f32);

    /// Creates a new element inside the content area.
    ///
    /// The list calls this at most once per pool slot.
    fn instantiate(&mut self) -> Self::Element;

    /// Returns true if `element` currently holds input focus.
    fn is_focused(&self, element: &Self::Element) -> bool;
}
