use super::*;

#[test]
fn drain_runs_pending_callbacks_once() {
    let runtime = RuntimeHandle::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        runtime.register_frame_callback(move |time| seen.borrow_mut().push(time));
    }

    assert!(runtime.has_frame_callbacks());
    runtime.drain_frame_callbacks(16);
    runtime.drain_frame_callbacks(32);

    assert_eq!(*seen.borrow(), vec![16]);
    assert!(!runtime.has_frame_callbacks());
    assert_eq!(runtime.last_frame_nanos(), Some(32));
}

#[test]
fn callbacks_registered_while_draining_wait_for_next_frame() {
    let runtime = RuntimeHandle::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        let inner_runtime = runtime.clone();
        runtime.register_frame_callback(move |time| {
            seen.borrow_mut().push(("outer", time));
            let seen = Rc::clone(&seen);
            inner_runtime.register_frame_callback(move |time| {
                seen.borrow_mut().push(("inner", time));
            });
        });
    }

    runtime.drain_frame_callbacks(1);
    assert_eq!(*seen.borrow(), vec![("outer", 1)]);
    runtime.drain_frame_callbacks(2);
    assert_eq!(*seen.borrow(), vec![("outer", 1), ("inner", 2)]);
}

#[test]
fn cancelled_callback_never_runs() {
    let runtime = RuntimeHandle::new();
    let fired = Rc::new(Cell::new(false));
    let id = {
        let fired = Rc::clone(&fired);
        runtime
            .register_frame_callback(move |_| fired.set(true))
            .expect("registered")
    };

    runtime.cancel_frame_callback(id);
    runtime.drain_frame_callbacks(10);
    assert!(!fired.get());
}

#[test]
fn callback_cancelled_mid_drain_is_skipped() {
    let runtime = RuntimeHandle::new();
    let fired = Rc::new(Cell::new(false));
    let victim = Rc::new(Cell::new(None));
    {
        let runtime_for_first = runtime.clone();
        let victim = Rc::clone(&victim);
        runtime.register_frame_callback(move |_| {
            if let Some(id) = victim.get() {
                runtime_for_first.cancel_frame_callback(id);
            }
        });
    }
    {
        let fired = Rc::clone(&fired);
        let id = runtime.register_frame_callback(move |_| fired.set(true));
        victim.set(id);
    }

    runtime.drain_frame_callbacks(5);
    assert!(!fired.get());
}

#[test]
fn redraw_flag_is_consumed_by_take() {
    let runtime = RuntimeHandle::new();
    assert!(!runtime.should_render());
    runtime.request_redraw();
    assert!(runtime.needs_redraw());
    assert!(runtime.should_render());
    assert!(runtime.take_redraw_request());
    assert!(!runtime.take_redraw_request());
}

#[test]
fn frame_clock_registration_cancels_on_drop() {
    let runtime = RuntimeHandle::new();
    let clock = runtime.frame_clock();
    let fired = Rc::new(Cell::new(false));
    {
        let fired = Rc::clone(&fired);
        let registration = clock.with_frame_millis(move |_| fired.set(true));
        assert!(registration.is_active());
    }
    runtime.drain_frame_callbacks(1_000_000);
    assert!(!fired.get());

    let millis = Rc::new(Cell::new(0));
    let _registration = {
        let millis = Rc::clone(&millis);
        clock.with_frame_millis(move |time| millis.set(time))
    };
    runtime.drain_frame_callbacks(48_000_000);
    assert_eq!(millis.get(), 48);
}
