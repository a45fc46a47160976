//! Description models and the apply engine.
//!
//! A description model is an immutable value describing the desired state of a live object. Models
//! are usually generated by the [`model!`](crate::model) macro from a schema; this module holds the
//! traits they implement and the logic shared by all generated code.
//!
//! # Applying a model
//!
//! `apply` compares the model with the one last applied to the same live object. If they are the
//! same (as determined by [`Data::same`]), nothing happens. Otherwise the model is cached on the
//! live object and its properties are written:
//!
//! 1. inherited properties first, by applying the embedded base model,
//! 2. then the properties declared by the kind itself, in declaration order. Unset properties are
//!    never written,
//! 3. then the hooks registered with [`ApplyCtx::on_applied`] run.
use crate::{element::PreviousState, ApplyCtx, Data, ElementPod, ElementPtr, Error, KindInfo};
use std::{any::TypeId, cell::RefCell, fmt};
use tracing::{debug, trace};

/// Immutable description of a live object of a given kind.
pub trait Model: Data + fmt::Debug {
    /// Type of the live object.
    type Target: 'static;

    /// Descriptor of the kind.
    const KIND: &'static KindInfo;

    /// Creates a default instance of the live object.
    ///
    /// Returns `Error::NotConstructible` for abstract kinds.
    fn construct() -> Result<Self::Target, Error>;

    /// Writes the set properties of this model to `target`, including inherited ones.
    ///
    /// `previous` is the model last applied to `target`, if any.
    fn apply_properties(
        &self,
        cx: &mut ApplyCtx,
        previous: Option<&Self>,
        target: &mut Self::Target,
    ) -> Result<(), Error>;
}

/// Models of kinds that are materialized as values (assigned to properties of other objects).
///
/// Values are not reconciled in place: a changed value is created again and assigned.
pub trait ValueModel: Model {
    fn create(&self, cx: &mut ApplyCtx) -> Result<Self::Target, Error> {
        let mut value = Self::construct()?;
        trace!(kind = Self::KIND.name, "create value");
        cx.stats_mut().created += 1;
        self.apply_properties(cx, None, &mut value)?;
        Ok(value)
    }
}

/// Models of kinds that are materialized as elements of the live tree.
pub trait ElementModel: Model {
    /// Creates a new live element and applies this model to it.
    ///
    /// Fails without allocating anything if the kind cannot be constructed.
    fn create(&self, cx: &mut ApplyCtx) -> Result<ElementPtr<Self::Target>, Error> {
        let element = Self::construct()?;
        debug!(kind = Self::KIND.name, "create element");
        cx.stats_mut().created += 1;
        let pod = ElementPod::new(element);
        self.apply(cx, &pod)?;
        Ok(pod)
    }

    /// Reconciles an existing live element with this model.
    fn apply(&self, cx: &mut ApplyCtx, pod: &ElementPod<Self::Target>) -> Result<(), Error> {
        let mut element = pod.borrow_mut();
        apply_with_previous(self, cx, pod.previous(), &mut *element)
    }
}

/// Enumerations of description models. Converted to the live enum through `Repr`.
pub trait ModelEnum: Copy + fmt::Debug + 'static {
    /// Underlying representation shared with the live enum.
    type Repr: Copy + fmt::Display;
    const NAME: &'static str;
    fn to_repr(self) -> Self::Repr;
}

/// Types that can be turned into a fresh live object.
///
/// Used to materialize the items of child lists.
pub trait Materialize {
    type Output;
    fn materialize(&self, cx: &mut ApplyCtx) -> Result<Self::Output, Error>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Used by generated code

/// Applies `model` to `target` unless it's the same as the model cached in `previous`.
#[doc(hidden)]
pub fn apply_with_previous<M: Model>(
    model: &M,
    cx: &mut ApplyCtx,
    previous: &RefCell<PreviousState>,
    target: &mut M::Target,
) -> Result<(), Error> {
    let mut slot = previous.borrow_mut();
    if let Some(prev) = slot.get::<M>() {
        if prev.same(model) {
            trace!(kind = M::KIND.name, "unchanged, skipping");
            cx.stats_mut().skipped += 1;
            return Ok(());
        }
    }
    // update the cache before writing anything; a failure below leaves it pointing to `model`
    let prev = slot.replace(model.clone());
    drop(slot);

    trace!(kind = M::KIND.name, first = prev.is_none(), "apply");
    cx.stats_mut().applied += 1;
    model.apply_properties(cx, prev.as_deref(), target)
}

/// Applies the base part of a model.
///
/// Only called once the derived model is known to have changed: the inherited properties are
/// written again (and the hooks of the base kind run) even if the base part itself is unchanged, so
/// that inherited properties modified on the live object are restored.
#[doc(hidden)]
pub fn apply_inherited<B: Model>(
    cx: &mut ApplyCtx,
    base: &B,
    previous: Option<&B>,
    target: &mut B::Target,
) -> Result<(), Error> {
    trace!(kind = B::KIND.name, "apply inherited");
    base.apply_properties(cx, previous, target)
}

/// Applies `model` to a type-erased live element.
///
/// The live element matches if it is of the type targeted by the model, or embeds it as a base
/// (see [`Element::upcast_mut`](crate::Element::upcast_mut)). Otherwise nothing happens: live
/// elements are never replaced by apply.
#[doc(hidden)]
pub fn apply_dyn<M: Model>(model: &M, cx: &mut ApplyCtx, pod: &ElementPod) -> Result<(), Error> {
    let mut element = pod.borrow_mut();
    let live = element.type_name();
    let target = element
        .upcast_mut(TypeId::of::<M::Target>())
        .and_then(|target| target.downcast_mut::<M::Target>());
    let Some(target) = target else {
        debug!(kind = M::KIND.name, live, "live element type mismatch, ignoring");
        return Ok(());
    };
    apply_with_previous(model, cx, pod.previous(), target)
}

/// Converts a model enum value to the live enum through its underlying representation.
#[doc(hidden)]
pub fn convert_enum<E: ModelEnum, L: TryFrom<E::Repr>>(value: E) -> Result<L, Error> {
    let repr = value.to_repr();
    L::try_from(repr).map_err(|_| Error::Conversion {
        from: E::NAME,
        to: std::any::type_name::<L>(),
        value: repr.to_string(),
    })
}
