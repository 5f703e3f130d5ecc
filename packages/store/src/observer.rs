//! # Observer registry with cancellation handles
//!
//! [`Observers`] is a small listener registry for single-threaded, event-driven
//! code. Each call to [`Observers::subscribe`] returns a [`Subscription`] that
//! removes the handler again when cancelled or dropped.
//!
//! Dispatch works on a snapshot of the registered handlers, so a handler may
//! subscribe or unsubscribe others (or itself) while an event is being
//! delivered. A handler cancelled mid-dispatch is skipped for the rest of that
//! dispatch: once `unsubscribe` returns, the handler is never called again.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
}

impl<T> Registry<T> {
    fn contains(&self, id: u64) -> bool {
        self.handlers.iter().any(|(h, _)| *h == id)
    }
}

/// A set of handlers invoked, in registration order, for every emitted value.
pub struct Observers<T> {
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Observers<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Register `handler`. It stays registered until the returned handle is
    /// cancelled or dropped.
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut registry = self.inner.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.handlers.push((id, Rc::new(handler)));
            id
        };

        let registry: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().handlers.retain(|(h, _)| *h != id);
            }
        })
    }

    /// Deliver `value` to every live handler.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(u64, Handler<T>)> = self.inner.borrow().handlers.clone();
        for (id, handler) in snapshot {
            if self.inner.borrow().contains(id) {
                handler(value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Observers<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("handlers", &self.inner.borrow().handlers.len())
            .finish()
    }
}

/// Cancellation handle for a registered handler.
///
/// [`Subscription::unsubscribe`] is idempotent. Dropping the handle cancels it.
pub struct Subscription {
    cancel: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: RefCell::new(Some(Box::new(cancel))),
        }
    }

    /// A handle with nothing to cancel.
    pub fn empty() -> Self {
        Self {
            cancel: RefCell::new(None),
        }
    }

    pub fn unsubscribe(&self) {
        let cancel = self.cancel.borrow_mut().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.borrow().is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_handlers_run_in_registration_order() {
        let observers = Observers::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = {
            let seen = Rc::clone(&seen);
            observers.subscribe(move |v| seen.borrow_mut().push(("a", *v)))
        };
        let b = {
            let seen = Rc::clone(&seen);
            observers.subscribe(move |v| seen.borrow_mut().push(("b", *v)))
        };

        observers.emit(&1);
        observers.emit(&2);

        assert_eq!(*seen.borrow(), vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]);
        drop((a, b));
    }

    #[test]
    fn test_unsubscribe_is_idempotent_and_final() {
        let observers = Observers::<()>::new();
        let count = Rc::new(Cell::new(0));
        let sub = {
            let count = Rc::clone(&count);
            observers.subscribe(move |_| count.set(count.get() + 1))
        };

        observers.emit(&());
        sub.unsubscribe();
        sub.unsubscribe();
        observers.emit(&());

        assert_eq!(count.get(), 1);
        assert!(!sub.is_active());
        assert!(observers.is_empty());
    }

    #[test]
    fn test_drop_cancels() {
        let observers = Observers::<()>::new();
        let count = Rc::new(Cell::new(0));
        {
            let count = Rc::clone(&count);
            let _sub = observers.subscribe(move |_| count.set(count.get() + 1));
            observers.emit(&());
        }
        observers.emit(&());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_handler_cancelled_mid_dispatch_is_skipped() {
        let observers = Observers::<()>::new();
        let second_calls = Rc::new(Cell::new(0));
        let second: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let _first = {
            let second = Rc::clone(&second);
            observers.subscribe(move |_| {
                if let Some(sub) = second.borrow().as_ref() {
                    sub.unsubscribe();
                }
            })
        };
        let sub = {
            let calls = Rc::clone(&second_calls);
            observers.subscribe(move |_| calls.set(calls.get() + 1))
        };
        *second.borrow_mut() = Some(sub);

        observers.emit(&());
        assert_eq!(second_calls.get(), 0);
    }

    #[test]
    fn test_subscription_outliving_registry_is_harmless() {
        let observers = Observers::<()>::new();
        let sub = observers.subscribe(|_| {});
        drop(observers);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }
}
