//! Toggles two bubbles a few times and logs every drawn frame.
//!
//! `MATCHFORM_SPEED` scales the animation speed (default `0.25`),
//! `MATCHFORM_TOGGLES` sets how many times the bubbles swap (default `2`).
//! Use `RUST_LOG=debug` to see transition bookkeeping as well.

mod app;

use anyhow::{bail, Context, Result};
use matchform_ui::{DrawOp, UiHost};

use crate::app::SCREEN as VIEWPORT;

const FRAME_NANOS: u64 = 16_666_667;
const MAX_FRAMES_PER_TOGGLE: usize = 600;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{name}={value:?} is not valid")),
        Err(_) => Ok(default),
    }
}

fn log_scene(frame: usize, ops: &[DrawOp]) {
    for op in ops {
        let DrawOp::Content { label, rect, alpha, .. } = op;
        log::info!(
            "frame {frame:>3}  {label:<10} x={:>7.2} y={:>7.2} w={:>7.2} h={:>7.2} alpha={alpha:.2}",
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let speed: f32 = env_or("MATCHFORM_SPEED", 0.25)?;
    let toggles: usize = env_or("MATCHFORM_TOGGLES", 2)?;
    if !(speed.is_finite() && speed > 0.0) {
        bail!("MATCHFORM_SPEED must be a positive number, got {speed}");
    }

    let mut host = UiHost::new();
    let namespace = host.namespace().clone();
    let animation = app::toggle_animation(speed);
    log::info!(
        "toggling {toggles} times, {}ms per transition",
        animation.duration_millis
    );

    let mut show_first = true;
    let mut now = 0;
    let mut frame = 0;
    host.render(app::bubbles(show_first, &namespace));
    let scene = host.frame(VIEWPORT, now)?;
    log_scene(frame, scene.ops());

    for _ in 0..toggles {
        show_first = !show_first;
        log::info!("toggle -> {}", if show_first { "bubble1" } else { "bubble2" });
        host.render_animated(animation, app::bubbles(show_first, &namespace));

        let mut frames_this_toggle = 0;
        while host.should_render() {
            if frames_this_toggle == MAX_FRAMES_PER_TOGGLE {
                bail!("transition did not settle within {MAX_FRAMES_PER_TOGGLE} frames");
            }
            now += FRAME_NANOS;
            frame += 1;
            frames_this_toggle += 1;
            let scene = host.frame(VIEWPORT, now)?;
            log_scene(frame, scene.ops());
        }
    }

    log::info!("done after {frame} frames");
    Ok(())
}
