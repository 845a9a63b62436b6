use crate::collections::map::HashSet;
use crate::FrameClock;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64)>;

struct RuntimeInner {
    next_callback_id: Cell<FrameCallbackId>,
    frame_callbacks: RefCell<Vec<(FrameCallbackId, FrameCallback)>>,
    /// Ids cancelled while their batch was already taken for draining.
    cancelled: RefCell<HashSet<FrameCallbackId>>,
    draining: Cell<bool>,
    redraw_requested: Cell<bool>,
    last_frame_nanos: Cell<Option<u64>>,
}

/// Shared handle to the single-threaded runtime.
///
/// The runtime owns pending frame callbacks and the redraw flag that state
/// writes raise. Everything runs on the thread that drives the frame loop.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Rc<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                next_callback_id: Cell::new(1),
                frame_callbacks: RefCell::new(Vec::new()),
                cancelled: RefCell::new(HashSet::default()),
                draining: Cell::new(false),
                redraw_requested: Cell::new(false),
                last_frame_nanos: Cell::new(None),
            }),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    /// Schedules `callback` for the next call to [`drain_frame_callbacks`].
    ///
    /// Callbacks registered while a frame is draining run on the following frame.
    ///
    /// [`drain_frame_callbacks`]: RuntimeHandle::drain_frame_callbacks
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        let id = self.inner.next_callback_id.get();
        self.inner.next_callback_id.set(id + 1);
        self.inner
            .frame_callbacks
            .borrow_mut()
            .push((id, Box::new(callback)));
        Some(id)
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.inner.frame_callbacks.borrow_mut();
        let before = callbacks.len();
        callbacks.retain(|(pending, _)| *pending != id);
        if callbacks.len() == before && self.inner.draining.get() {
            self.inner.cancelled.borrow_mut().insert(id);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        !self.inner.frame_callbacks.borrow().is_empty()
    }

    /// Runs every callback that was pending when the frame started.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let batch = std::mem::take(&mut *self.inner.frame_callbacks.borrow_mut());
        self.inner.last_frame_nanos.set(Some(frame_time_nanos));
        if batch.is_empty() {
            return;
        }
        log::trace!(
            "draining {} frame callbacks at {frame_time_nanos}ns",
            batch.len()
        );

        self.inner.draining.set(true);
        for (id, callback) in batch {
            if self.inner.cancelled.borrow_mut().remove(&id) {
                continue;
            }
            callback(frame_time_nanos);
        }
        self.inner.draining.set(false);
        self.inner.cancelled.borrow_mut().clear();
    }

    /// Timestamp of the most recently drained frame.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner.last_frame_nanos.get()
    }

    pub fn request_redraw(&self) {
        self.inner.redraw_requested.set(true);
    }

    pub fn needs_redraw(&self) -> bool {
        self.inner.redraw_requested.get()
    }

    /// Clears the redraw flag and returns whether it was set.
    pub fn take_redraw_request(&self) -> bool {
        self.inner.redraw_requested.replace(false)
    }

    /// True while anything still wants another frame: a pending callback or
    /// an unconsumed redraw request.
    pub fn should_render(&self) -> bool {
        self.has_frame_callbacks() || self.needs_redraw()
    }

    pub fn ptr_eq(&self, other: &RuntimeHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for RuntimeHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field(
                "frame_callbacks",
                &self.inner.frame_callbacks.borrow().len(),
            )
            .field("redraw_requested", &self.inner.redraw_requested.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
