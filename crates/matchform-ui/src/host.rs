//! The retained host driving rebuilds, layout, size reports and drawing.

use indexmap::IndexMap;
use matchform_animation::AnimationSpec;
use matchform_core::collections::map::HashMap;
use matchform_core::{NodeError, RuntimeHandle};
use matchform_ui_graphics::{Rect, Size};

use crate::draw::draw_tree;
use crate::layout::{LayoutEngine, LayoutOutput, SizeObservation, SizeReport};
use crate::matched_transform::bind_matched_effects;
use crate::node::root_identity;
use crate::shared_transition::{collect_holders, SharedTransitionRegistry};
use crate::{LayoutTree, Namespace, Node, Scene, SharedKey};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostConfig {
    /// Fade the incoming view in and the outgoing view out during matched
    /// transitions. When off, only the incoming view is drawn.
    pub crossfade: bool,
    /// Animation used by [`UiHost::render_with_default_animation`].
    pub default_animation: AnimationSpec,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            crossfade: true,
            default_animation: AnimationSpec::default(),
        }
    }
}

/// Owns the current view tree and everything that has to survive rebuilds:
/// the runtime, matched transitions and the last reported sizes.
pub struct UiHost {
    runtime: RuntimeHandle,
    namespace: Namespace,
    config: HostConfig,
    tree: Option<Node>,
    shared: SharedTransitionRegistry,
    last_reports: HashMap<(u64, usize), Size>,
}

impl UiHost {
    pub fn new() -> Self {
        Self::with_config(HostConfig::default())
    }

    pub fn with_config(config: HostConfig) -> Self {
        let runtime = RuntimeHandle::new();
        Self {
            namespace: Namespace::with_runtime(runtime.clone()),
            runtime,
            config,
            tree: None,
            shared: SharedTransitionRegistry::default(),
            last_reports: HashMap::default(),
        }
    }

    pub fn runtime(&self) -> &RuntimeHandle {
        &self.runtime
    }

    /// Namespace whose remembered effect state requests redraws on this host.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn tree(&self) -> Option<&Node> {
        self.tree.as_ref()
    }

    /// Replaces the tree. Shared holders that changed identity swap at once.
    pub fn render(&mut self, tree: Node) {
        self.install(tree, None);
    }

    /// Replaces the tree, animating shared holders that changed identity
    /// with `spec`.
    pub fn render_animated(&mut self, spec: AnimationSpec, tree: Node) {
        self.install(tree, Some(spec));
    }

    pub fn render_with_default_animation(&mut self, tree: Node) {
        let spec = self.config.default_animation;
        self.install(tree, Some(spec));
    }

    fn install(&mut self, mut tree: Node, animation: Option<AnimationSpec>) {
        let root_id = root_identity(&tree);
        bind_matched_effects(&mut tree, root_id);
        let holders = collect_holders(&tree);
        log::trace!(
            "installing tree with {} shared holders, animated: {}",
            holders.len(),
            animation.is_some()
        );
        self.shared.reconcile(holders, animation, &self.runtime);
        self.tree = Some(tree);
        self.runtime.request_redraw();
    }

    /// Measures and places the current tree plus the exiting copies of any
    /// running matched transitions, then publishes observed sizes and delivers
    /// size reports that changed since the previous pass.
    pub fn compute_layout(&mut self, viewport: Size) -> Result<LayoutTree, NodeError> {
        if !(viewport.is_finite() && viewport.width >= 0.0 && viewport.height >= 0.0) {
            return Err(NodeError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let root = self.tree.as_ref().ok_or(NodeError::MissingRoot)?;
        let root_id = root_identity(root);

        let overrides = if self.shared.has_transitions() {
            let no_overrides = Default::default();
            let natural = LayoutEngine::new(&no_overrides);
            let natural_root = natural.layout_root(root, root_id, viewport);
            let natural = natural.finish(natural_root, Vec::new(), viewport);
            self.shared
                .overrides(&natural.shared_records, self.config.crossfade)
        } else {
            Default::default()
        };

        let engine = LayoutEngine::new(&overrides);
        let main = engine.layout_root(root, root_id, viewport);
        let exiting = self
            .shared
            .exiting()
            .filter(|(key, _, _)| overrides.contains_key(*key))
            .map(|(_, node, identity)| engine.layout_root(node, identity, viewport))
            .collect();
        let LayoutOutput {
            tree,
            reports,
            observations,
            shared_records,
        } = engine.finish(main, exiting, viewport);

        self.shared.record_layout(&shared_records);
        publish_observations(observations);
        self.dispatch_reports(reports);
        Ok(tree)
    }

    fn dispatch_reports(&mut self, reports: IndexMap<(u64, usize), SizeReport>) {
        let mut delivered = HashMap::default();
        for (slot, (size, callback)) in reports {
            if self.last_reports.get(&slot) != Some(&size) {
                callback(size);
            }
            delivered.insert(slot, size);
        }
        self.last_reports = delivered;
    }

    pub fn draw(&self, layout: &LayoutTree) -> Scene {
        draw_tree(layout)
    }

    /// Runs frame callbacks for `frame_time_nanos` and retires finished
    /// transitions.
    pub fn advance_frame(&mut self, frame_time_nanos: u64) {
        self.runtime.drain_frame_callbacks(frame_time_nanos);
        if self.shared.prune_finished() {
            self.runtime.request_redraw();
        }
    }

    /// Advances the clock, lays out and draws one frame.
    pub fn frame(&mut self, viewport: Size, frame_time_nanos: u64) -> Result<Scene, NodeError> {
        self.advance_frame(frame_time_nanos);
        self.runtime.take_redraw_request();
        let layout = self.compute_layout(viewport)?;
        Ok(self.draw(&layout))
    }

    /// True while a transition is running or state changed since the last
    /// frame.
    pub fn should_render(&self) -> bool {
        self.runtime.should_render()
    }

    pub fn active_transitions(&self) -> usize {
        self.shared.transition_count()
    }

    pub fn transition_progress(&self, key: &SharedKey) -> Option<f32> {
        self.shared.progress(key)
    }

    /// Where the current holder of `key` was last drawn.
    pub fn shared_rect(&self, key: &SharedKey) -> Option<Rect> {
        self.shared.visual_rect(key)
    }

    pub fn shared_holders(&self) -> usize {
        self.shared.holder_count()
    }
}

/// Writes every observed size into its slot. The slot itself drops writes of
/// an unchanged size, so a slot that is new in this tree is filled even when
/// its view measured the same as last pass.
fn publish_observations(observations: IndexMap<(u64, usize), SizeObservation>) {
    for ((identity, _), (size, slot)) in observations {
        if slot.set_if_changed(Some(size)) {
            log::trace!(
                "observed size {}x{} on view {identity:#x}",
                size.width,
                size.height
            );
        }
    }
}

impl Default for UiHost {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
