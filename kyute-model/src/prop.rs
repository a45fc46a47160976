//! Tri-state property values.
use crate::Data;

/// The value of a property in a description model.
///
/// A property that was never assigned in the builder is `Unset` and is never written to the live
/// object. `Set(None)` on an `Option<_>` property is an explicit null, which is a different thing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prop<T> {
    Unset,
    Set(T),
}

// not derived: that would require `T: Default`
impl<T> Default for Prop<T> {
    fn default() -> Self {
        Prop::Unset
    }
}

impl<T> Prop<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Prop::Set(_))
    }

    pub fn as_ref(&self) -> Prop<&T> {
        match self {
            Prop::Unset => Prop::Unset,
            Prop::Set(v) => Prop::Set(v),
        }
    }

    /// Returns the value if set.
    pub fn get(&self) -> Option<&T> {
        match self {
            Prop::Unset => None,
            Prop::Set(v) => Some(v),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Prop::Unset => None,
            Prop::Set(v) => Some(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Prop<U> {
        match self {
            Prop::Unset => Prop::Unset,
            Prop::Set(v) => Prop::Set(f(v)),
        }
    }

    /// Compares two property values with a custom comparer for the set values.
    ///
    /// Unset is only equal to unset.
    pub fn same_with(&self, other: &Self, same: impl FnOnce(&T, &T) -> bool) -> bool {
        match (self, other) {
            (Prop::Unset, Prop::Unset) => true,
            (Prop::Set(a), Prop::Set(b)) => same(a, b),
            _ => false,
        }
    }
}

impl<T: Data> Data for Prop<T> {
    fn same(&self, other: &Self) -> bool {
        self.same_with(other, T::same)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_vs_set() {
        let unset: Prop<i32> = Prop::default();
        assert!(unset.same(&Prop::Unset));
        assert!(!unset.same(&Prop::Set(0)));
        assert!(Prop::Set(3).same(&Prop::Set(3)));
    }

    #[test]
    fn explicit_null_is_set() {
        let null: Prop<Option<String>> = Prop::Set(None);
        assert!(null.is_set());
        assert!(!null.same(&Prop::Unset));
        assert_eq!(null.get(), Some(&None));
    }

    #[test]
    fn custom_comparer() {
        let a = Prop::Set(1.0f64);
        let b = Prop::Set(1.0000001f64);
        assert!(!a.same(&b));
        assert!(a.same_with(&b, |a, b| (a - b).abs() < 1e-3));
    }
}
