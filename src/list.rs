//! A list that displays an unbounded number of entries using a small pool of
//! recycled elements.

use std::error::Error;
use std::fmt::{self, Debug, Display};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::display::{Display as _, ListElement};
use crate::event::{Event, Subscription};
use crate::host::ScrollHost;
use crate::triggers::Triggers;
use crate::viewport::{self, WindowState};

/// The row height used when none is configured.
pub const DEFAULT_ROW_HEIGHT: f32 = 40.;

/// Settings for a [`RecyclingList`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct ListConfig {
    row_height: f32,
    read_only: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            read_only: true,
        }
    }
}

impl ListConfig {
    /// Sets the height of every row, and returns self.
    ///
    /// # Panics
    ///
    /// Panics if `height` is not a positive, finite number.
    pub fn row_height(mut self, height: f32) -> Self {
        assert_valid_row_height(height);
        self.row_height = height;
        self
    }

    /// Sets whether edits made through the list's elements are rejected, and
    /// returns self.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

fn assert_valid_row_height(height: f32) {
    assert!(
        height.is_finite() && height > 0.,
        "row height must be positive and finite, got {height}"
    );
}

/// The notifications a [`RecyclingList`] forwards from its elements.
///
/// Every index is an index into the full list, never a pool slot.
#[derive(Debug)]
pub struct ListEvents<T> {
    /// An element was selected.
    pub select: Event<usize>,
    /// The pointer entered an element.
    pub pointer_enter: Event<usize>,
    /// The pointer left an element.
    pub pointer_exit: Event<usize>,
    /// An element was clicked.
    pub click: Event<usize>,
    /// An entry was bound to an element.
    pub element_in_view: Event<usize>,
    /// An entry was edited. Only fired when the list is writable.
    pub value_changed: Event<(usize, T)>,
    /// An edit of an entry was committed to the list. Only fired when the
    /// list is writable.
    pub value_edit_end: Event<(usize, T)>,
}

impl<T> Default for ListEvents<T>
where
    T: 'static,
{
    fn default() -> Self {
        Self {
            select: Event::new(),
            pointer_enter: Event::new(),
            pointer_exit: Event::new(),
            click: Event::new(),
            element_in_view: Event::new(),
            value_changed: Event::new(),
            value_edit_end: Event::new(),
        }
    }
}

/// An edit made through [`RecyclingList::set_value`] was rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EditError {
    /// The list is read-only.
    ReadOnly,
    /// The index is past the end of the list.
    OutOfBounds {
        /// The index that was edited.
        index: usize,
        /// The length of the list.
        len: usize,
    },
}

impl Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::ReadOnly => f.write_str("the list is read-only"),
            EditError::OutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds for a list of {len}")
            }
        }
    }
}

impl Error for EditError {}

struct SharedState<T> {
    list: Option<Vec<T>>,
    window: WindowState,
    // The list index each pool slot last displayed.
    bound: Vec<Option<usize>>,
}

// State reachable from the forwarders installed on pooled elements.
struct Shared<T> {
    state: Mutex<SharedState<T>>,
    read_only: AtomicBool,
    events: ListEvents<T>,
}

impl<T> Shared<T>
where
    T: Clone + Send + 'static,
{
    fn is_read_only(&self) -> bool {
        self.read_only.load(Ordering::Relaxed)
    }

    fn value(&self, index: usize) -> Option<T> {
        self.state.lock().list.as_ref()?.get(index).cloned()
    }

    // Records that `slot` displays the entry at `index`, returning the entry.
    fn bind(&self, slot: usize, index: usize) -> Option<T> {
        let mut state = self.state.lock();
        let value = state.list.as_ref()?.get(index).cloned()?;
        if state.bound.len() <= slot {
            state.bound.resize(slot + 1, None);
        }
        state.bound[slot] = Some(index);
        Some(value)
    }

    fn full_index(&self, slot: usize) -> Option<usize> {
        let state = self.state.lock();
        let index = state.window.start() + slot;
        let len = state.list.as_ref().map_or(0, Vec::len);
        if index < len {
            Some(index)
        } else {
            tracing::debug!(slot, index, len, "ignoring event from an unbound element");
            None
        }
    }

    // Displays the entry `slot` was last bound to, even if the slot is past
    // the end of the list.
    fn revert<E>(&self, slot: usize, element: &E)
    where
        E: ListElement<T>,
    {
        let value = {
            let state = self.state.lock();
            state
                .bound
                .get(slot)
                .copied()
                .flatten()
                .and_then(|index| state.list.as_ref()?.get(index).cloned())
        };
        if let Some(value) = value {
            tracing::trace!(slot, "reverting edit of a read-only list");
            element.display(&value);
        }
    }

    fn replace(&self, index: usize, value: T) {
        if let Some(entry) = self
            .state
            .lock()
            .list
            .as_mut()
            .and_then(|list| list.get_mut(index))
        {
            *entry = value;
        }
    }
}

struct Slot<E> {
    element: Arc<E>,
    active: bool,
    _subscriptions: Vec<Subscription>,
}

/// A scrollable list that only instantiates enough elements to fill its
/// viewport.
///
/// The full list is assigned with [`set_list`](Self::set_list). The list then
/// keeps a pool of at most `ceil(viewport_height / row_height) + 2` elements,
/// which [`update`](Self::update) repositions and rebinds as the host
/// scrolls. The pool never shrinks: elements that are no longer needed are
/// deactivated and reused by later calls.
///
/// Interaction events fired by pooled elements are forwarded through
/// [`ListEvents`] with the index of the entry the element displays at the
/// moment the event fires.
pub struct RecyclingList<T, H>
where
    H: ScrollHost<T>,
{
    host: H,
    row_height: f32,
    slots: Vec<Slot<H::Element>>,
    shared: Arc<Shared<T>>,
}

impl<T, H> RecyclingList<T, H>
where
    T: Clone + Send + 'static,
    H: ScrollHost<T>,
{
    /// Returns a new, empty list hosted by `host`, using the default
    /// [`ListConfig`].
    pub fn new(host: H) -> Self {
        Self::with_config(host, ListConfig::default())
    }

    /// Returns a new, empty list hosted by `host`.
    pub fn with_config(host: H, config: ListConfig) -> Self {
        Self {
            host,
            row_height: config.row_height,
            slots: Vec::new(),
            shared: Arc::new(Shared {
                state: Mutex::new(SharedState {
                    list: None,
                    window: WindowState::default(),
                    bound: Vec::new(),
                }),
                read_only: AtomicBool::new(config.read_only),
                events: ListEvents::default(),
            }),
        }
    }

    /// Replaces the full list and binds the first rows to the pool.
    ///
    /// The host's content area is resized to fit every entry, elements are
    /// instantiated for any pool slot that doesn't exist yet, and
    /// [`ListEvents::element_in_view`] fires for each bound entry. Slots left
    /// over from a previous, larger list are deactivated.
    pub fn set_list(&mut self, list: Vec<T>) {
        let count = list.len();
        let row_height = self.row_height;
        self.host
            .set_content_height(viewport::content_height(count, row_height));
        let capacity = viewport::pool_capacity(self.host.viewport_height(), row_height, count);

        {
            let mut state = self.shared.state.lock();
            state.list = Some(list);
            state.window.reset();
        }

        if capacity > self.slots.len() {
            tracing::debug!(
                from = self.slots.len(),
                to = capacity,
                "growing element pool"
            );
        }
        for index in 0..capacity {
            if index == self.slots.len() {
                let slot = self.instantiate_slot(index);
                self.slots.push(slot);
            }

            let slot = &mut self.slots[index];
            Self::set_slot_active(slot, true);
            slot.element
                .set_vertical_position(viewport::row_center(index, row_height));
            if let Some(value) = self.shared.bind(index, index) {
                slot.element.display(&value);
            }
            self.shared.events.element_in_view.invoke(&index);
        }

        let unused = &mut self.slots[capacity..];
        if !unused.is_empty() {
            tracing::debug!(count = unused.len(), "deactivating unused elements");
        }
        for slot in unused {
            Self::set_slot_active(slot, false);
        }
    }

    /// Rebinds the pool to the host's current scroll offset.
    ///
    /// This is meant to be called once per frame. Nothing happens until a
    /// list is assigned, while the list is empty, or while the offset stays
    /// within one row of the offset the pool was last bound at. Returns true
    /// if the pool was rebound.
    ///
    /// Active elements whose row would fall past the end of the list keep the
    /// entry they were last bound to.
    pub fn update(&mut self) -> bool {
        let offset = self.host.scroll_offset();
        let row_height = self.row_height;
        let start = {
            let mut state = self.shared.state.lock();
            if state.list.as_ref().map_or(true, Vec::is_empty) {
                return false;
            }
            let Some(start) = state.window.scroll_to(offset, row_height) else {
                return false;
            };
            start
        };

        tracing::trace!(offset, start, "rebinding element pool");
        for (slot_index, slot) in self.slots.iter().enumerate() {
            if !slot.active {
                continue;
            }
            let index = start + slot_index;
            let Some(value) = self.shared.bind(slot_index, index) else {
                break;
            };
            slot.element
                .set_vertical_position(viewport::row_center(index, row_height));
            slot.element.display(&value);
            self.shared.events.element_in_view.invoke(&index);
        }

        true
    }

    /// Returns the element currently bound to the entry at `index`, or `None`
    /// if the entry is outside of the pool's window.
    #[must_use]
    pub fn display_element(&self, index: usize) -> Option<&H::Element> {
        let slot = index.checked_sub(self.current_start_index())?;
        self.slots.get(slot).map(|slot| &*slot.element)
    }

    /// Returns true if any active element holds input focus.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.active && self.host.is_focused(&slot.element))
    }

    /// Returns true if edits made through elements are rejected.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.shared.is_read_only()
    }

    /// Sets whether edits made through elements are rejected.
    ///
    /// While read-only, an element reporting an edit is immediately
    /// redisplayed with the entry's unchanged value.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.shared.read_only.store(read_only, Ordering::Relaxed);
    }

    /// Returns the height of every row.
    #[must_use]
    pub const fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Sets the height of every row. The pool is resized by the next call to
    /// [`set_list`](Self::set_list).
    ///
    /// # Panics
    ///
    /// Panics if `height` is not a positive, finite number.
    pub fn set_row_height(&mut self, height: f32) {
        assert_valid_row_height(height);
        self.row_height = height;
    }

    /// Returns every notification channel of this list.
    #[must_use]
    pub fn events(&self) -> &ListEvents<T> {
        &self.shared.events
    }

    /// Fired with the entry's index when an element is selected.
    #[must_use]
    pub fn on_select(&self) -> &Event<usize> {
        &self.shared.events.select
    }

    /// Fired with the entry's index when the pointer enters an element.
    #[must_use]
    pub fn on_pointer_enter(&self) -> &Event<usize> {
        &self.shared.events.pointer_enter
    }

    /// Fired with the entry's index when the pointer leaves an element.
    #[must_use]
    pub fn on_pointer_exit(&self) -> &Event<usize> {
        &self.shared.events.pointer_exit
    }

    /// Fired with the entry's index when an element is clicked.
    #[must_use]
    pub fn on_click(&self) -> &Event<usize> {
        &self.shared.events.click
    }

    /// Fired with an entry's index each time it is bound to an element.
    #[must_use]
    pub fn on_element_in_view(&self) -> &Event<usize> {
        &self.shared.events.element_in_view
    }

    /// Fired with the entry's index and the edited value on every live edit
    /// of a writable list. The list itself is not modified.
    #[must_use]
    pub fn on_value_changed(&self) -> &Event<(usize, T)> {
        &self.shared.events.value_changed
    }

    /// Fired with the entry's index and the committed value after an edit has
    /// been written to a writable list.
    #[must_use]
    pub fn on_value_edit_end(&self) -> &Event<(usize, T)> {
        &self.shared.events.value_edit_end
    }

    /// Returns true once a list has been assigned.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.shared.state.lock().list.is_some()
    }

    /// Returns the number of entries in the full list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.state.lock().list.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if the full list has no entries, or no list is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a clone of the entry at `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<T> {
        self.shared.value(index)
    }

    /// Invokes `map` with the full list, which is empty until a list is
    /// assigned.
    ///
    /// The list is locked while `map` runs; calling back into this list from
    /// `map` will deadlock.
    pub fn map_list<R>(&self, map: impl FnOnce(&[T]) -> R) -> R {
        let state = self.shared.state.lock();
        map(state.list.as_deref().unwrap_or_default())
    }

    /// Replaces the entry at `index`, returning the previous value. If the
    /// entry is bound to an active element, the element is redisplayed.
    ///
    /// # Errors
    ///
    /// - [`EditError::ReadOnly`] if this list is read-only.
    /// - [`EditError::OutOfBounds`] if `index` is past the end of the list.
    pub fn set_value(&mut self, index: usize, value: T) -> Result<T, EditError> {
        if self.is_read_only() {
            return Err(EditError::ReadOnly);
        }

        let (previous, start) = {
            let mut state = self.shared.state.lock();
            let start = state.window.start();
            let Some(list) = state.list.as_mut() else {
                return Err(EditError::OutOfBounds { index, len: 0 });
            };
            let len = list.len();
            let Some(entry) = list.get_mut(index) else {
                return Err(EditError::OutOfBounds { index, len });
            };
            (std::mem::replace(entry, value.clone()), start)
        };

        if let Some(slot) = index
            .checked_sub(start)
            .and_then(|slot| self.slots.get(slot))
            .filter(|slot| slot.active)
        {
            slot.element.display(&value);
        }

        Ok(previous)
    }

    /// Returns the index of the entry bound to the pool's first slot.
    #[must_use]
    pub fn current_start_index(&self) -> usize {
        self.shared.state.lock().window.start()
    }

    /// Returns the number of elements instantiated, active or not.
    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of active elements.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    /// Returns the range of entries currently bound to active elements.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let active = self.active_len();
        let state = self.shared.state.lock();
        let len = state.list.as_ref().map_or(0, Vec::len);
        state.window.range(active, len)
    }

    /// Returns the host of this list.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Returns exclusive access to the host of this list.
    #[must_use]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn set_slot_active(slot: &mut Slot<H::Element>, active: bool) {
        slot.active = active;
        slot.element.set_active(active);
    }

    fn instantiate_slot(&mut self, slot: usize) -> Slot<H::Element> {
        let element = Arc::new(self.host.instantiate());
        let triggers = Triggers::<T>::probe(&*element);
        if triggers.is_empty() {
            tracing::trace!(slot, "element has no interaction capabilities");
        }

        let shared = Arc::downgrade(&self.shared);
        let mut subscriptions = Vec::with_capacity(triggers.len());
        if let Some(select) = &triggers.select {
            subscriptions.push(select.subscribe(forward_index(
                shared.clone(),
                slot,
                |events| &events.select,
            )));
        }
        if let Some(enter) = &triggers.pointer_enter {
            subscriptions.push(enter.subscribe(forward_index(
                shared.clone(),
                slot,
                |events| &events.pointer_enter,
            )));
        }
        if let Some(exit) = &triggers.pointer_exit {
            subscriptions.push(exit.subscribe(forward_index(
                shared.clone(),
                slot,
                |events| &events.pointer_exit,
            )));
        }
        if let Some(click) = &triggers.click {
            subscriptions.push(click.subscribe(forward_index(
                shared.clone(),
                slot,
                |events| &events.click,
            )));
        }
        if let Some(changed) = &triggers.value_changed {
            subscriptions.push(changed.subscribe(forward_value_changed(
                shared.clone(),
                slot,
                Arc::downgrade(&element),
            )));
        }
        if let Some(edit_end) = &triggers.value_edit_end {
            subscriptions.push(edit_end.subscribe(forward_value_edit_end(
                shared,
                slot,
                Arc::downgrade(&element),
            )));
        }

        Slot {
            element,
            active: false,
            _subscriptions: subscriptions,
        }
    }
}

impl<T, H> Debug for RecyclingList<T, H>
where
    H: ScrollHost<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclingList")
            .field("row_height", &self.row_height)
            .field("pool", &self.slots.len())
            .field("read_only", &self.shared.read_only.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

fn forward_index<T>(
    shared: Weak<Shared<T>>,
    slot: usize,
    channel: fn(&ListEvents<T>) -> &Event<usize>,
) -> impl FnMut(&()) + Send + 'static
where
    T: Clone + Send + 'static,
{
    move |_: &()| {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        if let Some(index) = shared.full_index(slot) {
            channel(&shared.events).invoke(&index);
        }
    }
}

fn forward_value_changed<T, E>(
    shared: Weak<Shared<T>>,
    slot: usize,
    element: Weak<E>,
) -> impl FnMut(&T) + Send + 'static
where
    T: Clone + Send + 'static,
    E: ListElement<T>,
{
    move |value: &T| {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        if shared.is_read_only() {
            if let Some(element) = element.upgrade() {
                shared.revert(slot, &*element);
            }
        } else if let Some(index) = shared.full_index(slot) {
            shared.events.value_changed.invoke(&(index, value.clone()));
        }
    }
}

fn forward_value_edit_end<T, E>(
    shared: Weak<Shared<T>>,
    slot: usize,
    element: Weak<E>,
) -> impl FnMut(&T) + Send + 'static
where
    T: Clone + Send + 'static,
    E: ListElement<T>,
{
    move |value: &T| {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        if shared.is_read_only() {
            if let Some(element) = element.upgrade() {
                shared.revert(slot, &*element);
            }
        } else if let Some(index) = shared.full_index(slot) {
            shared.replace(index, value.clone());
            shared.events.value_edit_end.invoke(&(index, value.clone()));
        }
    }
}
