//! Subscribable notification channels.

use std::fmt::{self, Debug};
use std::sync::{Arc, Weak};

use alot::{LotId, Lots};
use parking_lot::Mutex;

type BoxedCallback<T> = Box<dyn FnMut(&T) + Send + 'static>;

struct Callbacks<T> {
    active: Mutex<Lots<BoxedCallback<T>>>,
}

trait CallbackCollection: Send + Sync + 'static {
    fn remove(&self, id: LotId);
}

impl<T> CallbackCollection for Callbacks<T>
where
    T: 'static,
{
    fn remove(&self, id: LotId) {
        self.active.lock().remove(id);
    }
}

/// A notification channel that invokes every subscribed callback each time it
/// fires.
///
/// Cloning an [`Event`] returns another handle to the same channel: a callback
/// subscribed through one clone is invoked when any clone fires.
///
/// Callbacks are invoked while the channel is locked. Invoking, subscribing to,
/// or unsubscribing from the same channel from inside one of its callbacks
/// will deadlock.
pub struct Event<T>(Arc<Callbacks<T>>);

impl<T> Event<T>
where
    T: 'static,
{
    /// Returns a new channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(Callbacks {
            active: Mutex::new(Lots::new()),
        }))
    }

    /// Installs `callback`, which will be invoked each time this event fires.
    ///
    /// The callback stays installed until the returned [`Subscription`] is
    /// dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = self.0.active.lock().push(Box::new(callback));
        let callbacks = Arc::downgrade(&self.0);
        let callbacks: Weak<dyn CallbackCollection> = callbacks;
        Subscription {
            id: Some(id),
            callbacks,
        }
    }

    /// Invokes every subscribed callback with `value`.
    pub fn invoke(&self, value: &T) {
        let mut callbacks = self.0.active.lock();
        callbacks
            .drain_filter(|callback| {
                callback(value);
                false
            })
            .for_each(drop);
    }

    /// Returns the number of callbacks currently installed.
    #[must_use]
    pub fn subscribers(&self) -> usize {
        self.0.active.lock().len()
    }
}

impl Event<()> {
    /// Fires this event.
    pub fn notify(&self) {
        self.invoke(&());
    }
}

impl<T> Clone for Event<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for Event<T>
where
    T: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Event");
        match self.0.active.try_lock() {
            Some(callbacks) => debug.field("subscribers", &callbacks.len()),
            None => debug.field("subscribers", &"<invoking>"),
        };
        debug.finish()
    }
}

/// A handle to a callback installed on an [`Event`]. When dropped, the
/// callback will be uninstalled.
///
/// To prevent the callback from ever being uninstalled, use
/// [`Self::persist()`].
#[must_use = "Callbacks are uninstalled once the associated Subscription is dropped. Consider using `Subscription::persist()` to keep the callback installed."]
pub struct Subscription {
    id: Option<LotId>,
    callbacks: Weak<dyn CallbackCollection>,
}

impl Subscription {
    /// Keeps the callback installed for as long as the event exists.
    pub fn persist(mut self) {
        let _id = self.id.take();
    }

    /// Returns true if the event this subscription belongs to still exists
    /// and the callback has not been persisted.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.id.is_some() && self.callbacks.strong_count() > 0
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscription").field(&self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(callbacks) = self.callbacks.upgrade() {
                callbacks.remove(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::Event;

    #[test]
    fn invokes_every_subscriber() {
        let event = Event::<usize>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let first = event.subscribe({
            let received = received.clone();
            move |value| received.lock().push(*value)
        });
        let second = event.subscribe({
            let received = received.clone();
            move |value| received.lock().push(*value * 10)
        });

        event.invoke(&3);

        let mut received = received.lock().clone();
        received.sort_unstable();
        assert_eq!(received, [3, 30]);
        assert_eq!(event.subscribers(), 2);
        drop((first, second));
    }

    #[test]
    fn dropping_subscription_uninstalls() {
        let event = Event::<()>::new();
        let count = Arc::new(Mutex::new(0));
        let subscription = event.subscribe({
            let count = count.clone();
            move |()| *count.lock() += 1
        });

        event.notify();
        drop(subscription);
        event.notify();

        assert_eq!(*count.lock(), 1);
        assert_eq!(event.subscribers(), 0);
    }

    #[test]
    fn persisted_subscription_outlives_handle() {
        let event = Event::<()>::new();
        let count = Arc::new(Mutex::new(0));
        event
            .subscribe({
                let count = count.clone();
                move |()| *count.lock() += 1
            })
            .persist();

        event.clone().notify();
        event.notify();

        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn subscription_survives_dropped_event() {
        let event = Event::<()>::new();
        let subscription = event.subscribe(|()| {});
        assert!(subscription.is_connected());

        drop(event);

        assert!(!subscription.is_connected());
        drop(subscription);
    }
}
