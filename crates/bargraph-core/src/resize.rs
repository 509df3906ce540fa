// File: crates/bargraph-core/src/resize.rs
// Summary: Resize notification channel with drop-to-unsubscribe handles.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::types::Size;

type Handler = Rc<RefCell<dyn FnMut(Size)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Broadcasts window size changes to subscribed components.
///
/// Cloning yields another handle to the same channel. Hosts create one channel
/// and pass it to every graph they mount.
#[derive(Clone, Default)]
pub struct ResizeChannel {
    registry: Rc<RefCell<Registry>>,
}

impl ResizeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`; it stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    #[must_use = "dropping the subscription unregisters the handler immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(Size) + 'static,
    {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        let handler: Handler = Rc::new(RefCell::new(handler));
        reg.handlers.push((id, handler));
        trace!(id, listeners = reg.handlers.len(), "resize listener added");
        Subscription { id, registry: Rc::downgrade(&self.registry) }
    }

    /// Deliver `size` to every handler registered at the time of the call.
    ///
    /// Handlers removed by an earlier handler in the same pass are not called.
    /// A handler that triggers a nested notify of itself is skipped for that
    /// nested pass.
    pub fn notify(&self, size: Size) {
        let snapshot: Vec<(u64, Handler)> = self.registry.borrow().handlers.clone();
        for (id, handler) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(size),
                Err(_) => trace!(id, "resize listener busy; nested notify skipped"),
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    fn is_registered(&self, id: u64) -> bool {
        self.registry.borrow().handlers.iter().any(|(h, _)| *h == id)
    }
}

/// Registration handle returned by [`ResizeChannel::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Remove the handler now. Dropping the handle has the same effect.
    pub fn unsubscribe(self) {
        drop(self);
    }

    pub fn is_active(&self) -> bool {
        let Some(reg) = self.registry.upgrade() else {
            return false;
        };
        let active = reg.borrow().handlers.iter().any(|(h, _)| *h == self.id);
        active
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(reg) = self.registry.upgrade() {
            // Take the handler out before dropping it so a handler that owns
            // other subscriptions can release them without a double borrow.
            let removed = {
                let mut reg = reg.borrow_mut();
                let pos = reg.handlers.iter().position(|(h, _)| *h == self.id);
                pos.map(|p| reg.handlers.remove(p))
            };
            if removed.is_some() {
                trace!(id = self.id, "resize listener removed");
            }
        }
    }
}
