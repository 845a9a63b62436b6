//! Observable state cells.
//!
//! A [`MutableState`] owns a value plus the list of callbacks interested in
//! it. Writes that notify also raise the redraw flag on the attached runtime,
//! which is how the host learns that it has to produce a new frame.

use crate::RuntimeHandle;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Observer<T> = Rc<dyn Fn(&T)>;

struct StateCell<T> {
    value: RefCell<T>,
    observers: RefCell<SmallVec<[(u64, Observer<T>); 2]>>,
    next_observer_id: Cell<u64>,
    /// Count of notifying writes.
    version: Cell<u64>,
    runtime: Option<RuntimeHandle>,
}

impl<T: 'static> StateCell<T> {
    fn notify(&self) {
        self.version.set(self.version.get() + 1);
        if let Some(runtime) = &self.runtime {
            runtime.request_redraw();
        }

        // Snapshot so observers may subscribe or unsubscribe while being called.
        let observers: SmallVec<[Observer<T>; 2]> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        if observers.is_empty() {
            return;
        }
        let value = self.value.borrow();
        for observer in observers {
            observer(&value);
        }
    }

    fn remove_observer(&self, id: u64) {
        self.observers
            .borrow_mut()
            .retain(|(candidate, _)| *candidate != id);
    }
}

/// Read-write observable value.
///
/// Observers run synchronously after each notifying write and receive the new
/// value. They must not write back into the same state from inside the
/// callback.
pub struct MutableState<T> {
    inner: Rc<StateCell<T>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> MutableState<T> {
    /// Creates a detached state; writes notify observers but request no redraw.
    pub fn new(value: T) -> Self {
        Self::build(value, None)
    }

    pub fn with_runtime(value: T, runtime: RuntimeHandle) -> Self {
        Self::build(value, Some(runtime))
    }

    fn build(value: T, runtime: Option<RuntimeHandle>) -> Self {
        Self {
            inner: Rc::new(StateCell {
                value: RefCell::new(value),
                observers: RefCell::new(SmallVec::new()),
                next_observer_id: Cell::new(0),
                version: Cell::new(0),
                runtime,
            }),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replaces the value and notifies unconditionally.
    pub fn set_value(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.inner.notify();
    }

    /// Registers `observer`; it stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_observer_id.get();
        self.inner.next_observer_id.set(id + 1);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Rc::new(observer)));

        let weak: Weak<StateCell<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(cell) = weak.upgrade() {
                cell.remove_observer(id);
            }
        })
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// Number of notifying writes so far.
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    pub fn as_state(&self) -> State<T> {
        State {
            inner: Rc::clone(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &MutableState<T>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + 'static> MutableState<T> {
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn value(&self) -> T {
        self.get()
    }
}

impl<T: PartialEq + 'static> MutableState<T> {
    /// Writes `value` only when it differs from the current one.
    ///
    /// Returns whether a write (and therefore a notification) happened.
    pub fn set_if_changed(&self, value: T) -> bool {
        if *self.inner.value.borrow() == value {
            return false;
        }
        self.set_value(value);
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableState")
            .field("value", &*self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

/// Read-only view of a [`MutableState`].
pub struct State<T> {
    inner: Rc<StateCell<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> State<T> {
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }
}

impl<T: Clone + 'static> State<T> {
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State")
            .field(&*self.inner.value.borrow())
            .finish()
    }
}

/// Keeps an observer registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
