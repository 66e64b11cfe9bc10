use std::fmt::{self, Debug};

use crate::display::ListElement;
use crate::host::ScrollHost;

/// A [`ScrollHost`] that keeps its viewport, scroll offset and content size in
/// memory.
///
/// Elements are created by a factory function. Scrolling is driven by
/// [`scroll_to`](Self::scroll_to) and is not clamped, so offsets past either
/// end of the content can be simulated.
pub struct HeadlessHost<E> {
    viewport_height: f32,
    scroll_offset: f32,
    content_height: f32,
    instantiated: usize,
    factory: Box<dyn FnMut() -> E + Send>,
    focus: fn(&E) -> bool,
}

impl<E> HeadlessHost<E> {
    /// Returns a host with a viewport of `viewport_height`, creating elements
    /// with `factory`.
    ///
    /// No element is ever considered focused until
    /// [`with_focus`](Self::with_focus) is used.
    pub fn new<F>(viewport_height: f32, factory: F) -> Self
    where
        F: FnMut() -> E + Send + 'static,
    {
        Self {
            viewport_height,
            scroll_offset: 0.,
            content_height: 0.,
            instantiated: 0,
            factory: Box::new(factory),
            focus: |_| false,
        }
    }

    /// Uses `focus` to decide whether an element holds input focus, and
    /// returns self.
    #[must_use]
    pub fn with_focus(mut self, focus: fn(&E) -> bool) -> Self {
        self.focus = focus;
        self
    }

    /// Scrolls the content to `offset`.
    pub fn scroll_to(&mut self, offset: f32) {
        self.scroll_offset = offset;
    }

    /// Scrolls the content by `delta`.
    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_offset += delta;
    }

    /// Resizes the viewport.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    /// Returns the content height last set by the list.
    #[must_use]
    pub const fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Returns the number of elements this host has created.
    #[must_use]
    pub const fn instantiated(&self) -> usize {
        self.instantiated
    }
}

impl<T, E> ScrollHost<T> for HeadlessHost<E>
where
    E: ListElement<T>,
{
    type Element = E;

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
    }

    fn instantiate(&mut self) -> E {
        self.instantiated += 1;
        (self.factory)()
    }

    fn is_focused(&self, element: &E) -> bool {
        (self.focus)(element)
    }
}

impl<E> Debug for HeadlessHost<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("viewport_height", &self.viewport_height)
            .field("scroll_offset", &self.scroll_offset)
            .field("content_height", &self.content_height)
            .field("instantiated", &self.instantiated)
            .finish_non_exhaustive()
    }
}
