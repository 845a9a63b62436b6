//! Transition identities: a namespace plus an arbitrary hashable id.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use matchform_core::collections::map::HashMap;
use matchform_core::RuntimeHandle;

use crate::MatchedTransformEffect;

static NEXT_NAMESPACE: AtomicU64 = AtomicU64::new(1);

/// Scope inside which transition ids are matched against each other.
///
/// Cloning a namespace yields the same scope. The namespace also remembers
/// the per-view state of effects created through
/// [`apply_matched_transform_effect`](crate::apply_matched_transform_effect),
/// keyed by transition id and the structural identity of the view, for as
/// long as it lives.
#[derive(Clone)]
pub struct Namespace {
    inner: Rc<NamespaceInner>,
}

struct NamespaceInner {
    id: u64,
    runtime: Option<RuntimeHandle>,
    effects: RefCell<HashMap<(SharedKey, u64), MatchedTransformEffect>>,
}

impl Namespace {
    /// A fresh namespace whose effect state does not request redraws.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// A fresh namespace whose effect state requests redraws on `runtime`.
    pub fn with_runtime(runtime: RuntimeHandle) -> Self {
        Self::build(Some(runtime))
    }

    fn build(runtime: Option<RuntimeHandle>) -> Self {
        Self {
            inner: Rc::new(NamespaceInner {
                id: NEXT_NAMESPACE.fetch_add(1, Ordering::Relaxed),
                runtime,
                effects: RefCell::new(HashMap::default()),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn key<ID>(&self, id: ID) -> SharedKey
    where
        ID: Hash + Eq + fmt::Debug + 'static,
    {
        SharedKey::new(self.inner.id, id)
    }

    pub(crate) fn runtime(&self) -> Option<&RuntimeHandle> {
        self.inner.runtime.as_ref()
    }

    /// Returns the remembered effect for `key` on the view with `identity`,
    /// creating it on first use.
    pub(crate) fn remembered_effect(&self, key: SharedKey, identity: u64) -> MatchedTransformEffect {
        self.inner
            .effects
            .borrow_mut()
            .entry((key.clone(), identity))
            .or_insert_with(|| MatchedTransformEffect::for_key(key, self.runtime().cloned()))
            .clone()
    }

    pub fn remembered_effects(&self) -> usize {
        self.inner.effects.borrow().len()
    }

    /// Drops every remembered effect registered under `key`.
    pub fn forget(&self, key: &SharedKey) {
        self.inner
            .effects
            .borrow_mut()
            .retain(|(candidate, _), _| candidate != key);
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Namespace {}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("id", &self.inner.id)
            .field("remembered_effects", &self.inner.effects.borrow().len())
            .finish()
    }
}

trait DynKey: fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynKey) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T> DynKey for T
where
    T: Hash + Eq + fmt::Debug + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynKey) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

/// `(namespace, id)` pair naming one matched transition endpoint.
#[derive(Clone)]
pub struct SharedKey {
    namespace: u64,
    id: Rc<dyn DynKey>,
}

impl SharedKey {
    fn new<ID>(namespace: u64, id: ID) -> Self
    where
        ID: Hash + Eq + fmt::Debug + 'static,
    {
        Self {
            namespace,
            id: Rc::new(id),
        }
    }

    pub fn namespace_id(&self) -> u64 {
        self.namespace
    }
}

impl PartialEq for SharedKey {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.id.dyn_eq(other.id.as_ref())
    }
}

impl Eq for SharedKey {}

impl Hash for SharedKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.id.dyn_hash(state);
    }
}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedKey({}, {:?})", self.namespace, self.id)
    }
}

#[cfg(test)]
#[path = "tests/key_tests.rs"]
mod tests;
