//! Frame-driving harness around [`UiHost`].

use matchform_core::NodeError;
use matchform_ui::{AnimationSpec, Namespace, Node, Scene, Size, UiHost};

/// One frame at 60 Hz.
pub const FRAME_NANOS: u64 = 16_666_667;

/// A host with a fixed viewport and a virtual clock.
///
/// Each [`TestHost::pump`] advances the clock by one frame and draws.
pub struct TestHost {
    host: UiHost,
    viewport: Size,
    now: u64,
    last_scene: Scene,
}

impl TestHost {
    pub fn new(viewport: Size) -> Self {
        Self::with_host(UiHost::new(), viewport)
    }

    pub fn with_host(host: UiHost, viewport: Size) -> Self {
        Self {
            host,
            viewport,
            now: 0,
            last_scene: Scene::default(),
        }
    }

    pub fn host(&self) -> &UiHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut UiHost {
        &mut self.host
    }

    pub fn namespace(&self) -> Namespace {
        self.host.namespace().clone()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn scene(&self) -> &Scene {
        &self.last_scene
    }

    /// Renders `tree` and draws it at the current time.
    pub fn set_content(&mut self, tree: Node) -> Result<&Scene, NodeError> {
        self.host.render(tree);
        self.draw_now()
    }

    /// Renders `tree` as an animated update. Nothing is drawn until the next
    /// pump.
    pub fn animate_to(&mut self, spec: AnimationSpec, tree: Node) {
        self.host.render_animated(spec, tree);
    }

    pub fn draw_now(&mut self) -> Result<&Scene, NodeError> {
        self.last_scene = self.host.frame(self.viewport, self.now)?;
        Ok(&self.last_scene)
    }

    /// Advances the clock by `nanos` and draws.
    pub fn advance_by(&mut self, nanos: u64) -> Result<&Scene, NodeError> {
        self.now += nanos;
        self.draw_now()
    }

    pub fn pump(&mut self) -> Result<&Scene, NodeError> {
        self.advance_by(FRAME_NANOS)
    }

    /// Pumps frames until the host stops asking for more, at most `limit`.
    /// Returns how many frames were drawn.
    pub fn pump_until_idle(&mut self, limit: usize) -> Result<usize, NodeError> {
        let mut frames = 0;
        while frames < limit && self.host.should_render() {
            self.pump()?;
            frames += 1;
        }
        Ok(frames)
    }
}
