//! Layout events and subscriptions
//!
//! `PanelTree` reports completed operations to the host through an
//! [`EventBus`]. Handlers run synchronously at the end of the triggering
//! operation, after the tree invariants have been restored. A handler only
//! sees the event, never the tree, so it cannot re-enter a mutation.
//!
//! Subscribing returns a [`Subscription`]; dropping it unsubscribes.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::types::{ContentId, GroupId, WindowId};

/// Notifications emitted by `PanelTree`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    /// A panel left the tree for a detached window.
    PanelDetached {
        /// Detached content.
        content: ContentId,
        /// Title carried over to the window.
        title: String,
        /// The new window.
        window: WindowId,
    },
    /// A drag-and-drop move finished.
    PanelMoveCompleted {
        /// Moved content.
        content: ContentId,
        /// Group the panel came from, `None` when it came from a window.
        source_group: Option<GroupId>,
        /// Group the panel landed in.
        target_group: GroupId,
    },
    /// A panel's pinned flag changed.
    PanelPinToggled {
        /// Affected content.
        content: ContentId,
        /// New pinned state.
        pinned: bool,
    },
    /// The layout was rebuilt from scratch.
    LayoutReset,
}

type Handler = Rc<RefCell<dyn FnMut(&LayoutEvent)>>;

#[derive(Default)]
struct Handlers {
    next_id: u64,
    entries: Vec<(u64, Handler)>,
}

/// Synchronous, single-threaded event dispatcher.
#[derive(Default)]
pub struct EventBus {
    handlers: Rc<RefCell<Handlers>>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` until the returned subscription is dropped.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&LayoutEvent) + 'static,
    {
        let mut handlers = self.handlers.borrow_mut();
        let id = handlers.next_id;
        handlers.next_id += 1;
        let handler: Handler = Rc::new(RefCell::new(handler));
        handlers.entries.push((id, handler));
        Subscription {
            id,
            handlers: Rc::downgrade(&self.handlers),
        }
    }

    /// Delivers `event` to every subscriber in subscription order.
    pub fn emit(&self, event: &LayoutEvent) {
        // Snapshot so handlers may drop subscriptions while we dispatch.
        let snapshot: Vec<Handler> = self
            .handlers
            .borrow()
            .entries
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        tracing::trace!(?event, subscribers = snapshot.len(), "emitting layout event");
        for handler in snapshot {
            if let Ok(mut callback) = handler.try_borrow_mut() {
                (&mut *callback)(event);
            }
        }
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().entries.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle keeping an event handler registered.
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    id: u64,
    handlers: Weak<RefCell<Handlers>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handlers) = self.handlers.upgrade() {
            if let Ok(mut handlers) = handlers.try_borrow_mut() {
                handlers.entries.retain(|(id, _)| *id != self.id);
            }
        }
    }
}
