//! Live elements and the pods that hold them.
use smallvec::SmallVec;
use std::{
    any::{Any, TypeId},
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Live objects of the element tree.
///
/// Description models of element kinds materialize into an `ElementPod` holding a type that
/// implements this trait.
pub trait Element: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Name of the live type, for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the part of this element of type `type_id`: the element itself, or one of the base
    /// types it embeds.
    ///
    /// The default implementation only matches the element itself. `impl_element!(Derived => Base)`
    /// also walks the bases through `AsMut<Base>`.
    fn upcast_mut(&mut self, type_id: TypeId) -> Option<&mut dyn Any> {
        let this = self.as_any_mut();
        if (*this).type_id() == type_id {
            Some(this)
        } else {
            None
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// The descriptions last applied to a live object, keyed by the type of description.
///
/// A single live object can have more than one entry if it was reconciled by models of different
/// types (e.g. a `TextBlock` applied through both `TextBlockModel` and a user model targeting the
/// same live type). The state lives next to the live object and is dropped with it.
#[derive(Default)]
pub struct PreviousState {
    entries: SmallVec<[(TypeId, Box<dyn Any>); 1]>,
}

impl PreviousState {
    pub fn get<M: Any>(&self) -> Option<&M> {
        self.entries
            .iter()
            .find(|(id, _)| *id == TypeId::of::<M>())
            .and_then(|(_, value)| value.downcast_ref::<M>())
    }

    /// Stores `value` as the last applied description of type `M`, and returns the previous one.
    pub fn replace<M: Any>(&mut self, value: M) -> Option<Box<M>> {
        let type_id = TypeId::of::<M>();
        let value: Box<dyn Any> = Box::new(value);
        if let Some((_, slot)) = self.entries.iter_mut().find(|(id, _)| *id == type_id) {
            let previous = std::mem::replace(slot, value);
            previous.downcast::<M>().ok()
        } else {
            self.entries.push((type_id, value));
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for PreviousState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviousState").field("entries", &self.entries.len()).finish()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Holds a live element and the description last applied to it.
pub struct ElementPod<T: ?Sized = dyn Element> {
    previous: RefCell<PreviousState>,
    // must be the last field for unsizing
    element: RefCell<T>,
}

/// Shared pointer to an element pod. Can be unsized to `ElementPtr<dyn Element>`.
pub type ElementPtr<T = dyn Element> = Rc<ElementPod<T>>;

impl<T> ElementPod<T> {
    pub fn new(element: T) -> ElementPtr<T> {
        Rc::new(ElementPod {
            previous: RefCell::new(PreviousState::default()),
            element: RefCell::new(element),
        })
    }
}

impl<T: ?Sized> ElementPod<T> {
    /// Borrows the live element.
    ///
    /// # Panics
    ///
    /// If the element is currently being reconciled.
    pub fn borrow(&self) -> Ref<T> {
        self.element.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<T> {
        self.element.borrow_mut()
    }

    /// Drops the descriptions cached for this element.
    ///
    /// The next apply will write every set property, whatever was applied before. Use this after
    /// modifying the live element by other means.
    pub fn forget_previous(&self) {
        self.previous.borrow_mut().clear();
    }

    pub fn has_previous(&self) -> bool {
        !self.previous.borrow().is_empty()
    }

    pub(crate) fn previous(&self) -> &RefCell<PreviousState> {
        &self.previous
    }
}

impl ElementPod {
    pub fn downcast_ref<T: Element>(&self) -> Option<Ref<T>> {
        Ref::filter_map(self.element.borrow(), |e| e.as_any().downcast_ref::<T>()).ok()
    }

    pub fn downcast_mut<T: Element>(&self) -> Option<RefMut<T>> {
        RefMut::filter_map(self.element.borrow_mut(), |e| e.as_any_mut().downcast_mut::<T>()).ok()
    }

    pub fn is<T: Element>(&self) -> bool {
        self.element.borrow().as_any().is::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.element.borrow().type_name()
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for ElementPod<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.element.try_borrow() {
            Ok(element) => fmt::Debug::fmt(&*element, f),
            Err(_) => f.write_str("ElementPod { <borrowed> }"),
        }
    }
}

/// Implements `Element` for live types.
///
/// `Derived => Base` lets descriptions targeting `Base` apply to a `Derived` element. `Base` must
/// implement `Element` too, and `Derived` must implement `AsMut<Base>`.
#[macro_export]
macro_rules! impl_element {
    ($($t:ty $(=> $base:ty)?),* $(,)?) => {
        $(
        impl $crate::Element for $t {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
            $(
            fn upcast_mut(&mut self, type_id: ::std::any::TypeId) -> ::std::option::Option<&mut dyn ::std::any::Any> {
                if ::std::any::TypeId::of::<Self>() == type_id {
                    return ::std::option::Option::Some($crate::Element::as_any_mut(self));
                }
                $crate::Element::upcast_mut(::std::convert::AsMut::<$base>::as_mut(self), type_id)
            }
            )?
        }
        )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Leaf(i32);

    #[derive(Debug, Default)]
    struct Wrapper {
        base: Leaf,
    }

    impl AsMut<Leaf> for Wrapper {
        fn as_mut(&mut self) -> &mut Leaf {
            &mut self.base
        }
    }

    crate::impl_element!(Leaf, Wrapper => Leaf);

    #[test]
    fn previous_state_replace() {
        let mut state = PreviousState::default();
        assert!(state.get::<String>().is_none());
        assert!(state.replace(String::from("a")).is_none());
        assert!(state.replace(3u32).is_none());
        assert_eq!(state.replace(String::from("b")).as_deref().map(String::as_str), Some("a"));
        assert_eq!(state.get::<String>().map(String::as_str), Some("b"));
        assert_eq!(state.get::<u32>(), Some(&3));
        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn unsized_pod_downcast() {
        let pod: ElementPtr = ElementPod::new(Leaf(7));
        assert!(pod.is::<Leaf>());
        assert_eq!(pod.downcast_ref::<Leaf>().map(|leaf| leaf.0), Some(7));
        if let Some(mut leaf) = pod.downcast_mut::<Leaf>() {
            leaf.0 = 8;
        }
        assert_eq!(pod.downcast_ref::<Leaf>().map(|leaf| leaf.0), Some(8));
        assert!(pod.type_name().ends_with("Leaf"));
    }

    #[test]
    fn upcast_to_embedded_base() {
        let mut wrapper = Wrapper::default();
        assert!(wrapper.upcast_mut(TypeId::of::<Wrapper>()).is_some());
        if let Some(leaf) = wrapper.upcast_mut(TypeId::of::<Leaf>()).and_then(|e| e.downcast_mut::<Leaf>()) {
            leaf.0 = 3;
        }
        assert_eq!(wrapper.base.0, 3);
        assert!(wrapper.upcast_mut(TypeId::of::<String>()).is_none());

        let mut leaf = Leaf(1);
        assert!(leaf.upcast_mut(TypeId::of::<Leaf>()).is_some());
        assert!(leaf.upcast_mut(TypeId::of::<Wrapper>()).is_none());
    }

    #[test]
    fn dropping_the_pod_drops_the_previous_state() {
        let marker = Rc::new(());
        let pod = ElementPod::new(Leaf(0));
        pod.previous().borrow_mut().replace(marker.clone());
        assert_eq!(Rc::strong_count(&marker), 2);
        drop(pod);
        assert_eq!(Rc::strong_count(&marker), 1);
    }
}
