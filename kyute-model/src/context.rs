use crate::Model;
use smallvec::SmallVec;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    rc::Rc,
};
use tracing::trace;

type Hook = Rc<dyn Fn(&dyn Any, &mut dyn Any)>;

/// Counters updated during create and apply.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyStats {
    /// Number of live objects created (elements and values).
    pub created: usize,
    /// Number of descriptions whose properties were written to a live object.
    pub applied: usize,
    /// Number of applies skipped because the description was unchanged.
    pub skipped: usize,
    /// Number of extension hooks invoked.
    pub hooks_run: usize,
    /// Number of child collections cleared and rebuilt.
    pub lists_rebuilt: usize,
}

/// State threaded through `create` and `apply`.
///
/// Holds the extension hooks run after a description has been applied, and statistics about the
/// work done.
#[derive(Default)]
pub struct ApplyCtx {
    hooks: HashMap<TypeId, SmallVec<[Hook; 1]>>,
    stats: ApplyStats,
}

impl ApplyCtx {
    pub fn new() -> ApplyCtx {
        ApplyCtx::default()
    }

    /// Registers a callback invoked each time a description of type `M` has been applied.
    ///
    /// The callback runs after all the properties of the description (including inherited ones)
    /// have been written. It is not called when the apply is skipped because the description
    /// didn't change.
    pub fn on_applied<M: Model>(&mut self, f: impl Fn(&M, &mut M::Target) + 'static) {
        let hook: Hook = Rc::new(move |model, target| {
            if let (Some(model), Some(target)) = (model.downcast_ref::<M>(), target.downcast_mut::<M::Target>()) {
                f(model, target)
            }
        });
        self.hooks.entry(TypeId::of::<M>()).or_default().push(hook);
    }

    /// Invokes the hooks registered for `M`.
    ///
    /// Called by the generated `apply_properties` implementations once all properties are set.
    pub fn run_hooks<M: Model>(&mut self, model: &M, target: &mut M::Target) {
        let Some(hooks) = self.hooks.get(&TypeId::of::<M>()) else {
            return;
        };
        for hook in hooks.iter() {
            trace!(kind = M::KIND.name, "running apply hook");
            hook(model, target);
            self.stats.hooks_run += 1;
        }
    }

    pub fn stats(&self) -> &ApplyStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut ApplyStats {
        &mut self.stats
    }

    /// Returns the statistics accumulated so far and resets them.
    pub fn take_stats(&mut self) -> ApplyStats {
        std::mem::take(&mut self.stats)
    }
}

impl fmt::Debug for ApplyCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplyCtx")
            .field("hooks", &self.hooks.values().map(SmallVec::len).sum::<usize>())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
