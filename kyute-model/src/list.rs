//! Lists of child descriptions and the child collection reconciler.
use crate::{data::same_slice, ApplyCtx, Data, Error, Materialize};
use std::{fmt, ops::Deref, sync::Arc};
use tracing::trace;

/// An immutable, shared list of descriptions.
///
/// Cloning a list is cheap. Two lists are the [`same`](Data::same) only if they share the same
/// allocation: a freshly built list is always considered changed, even if its items are equal to
/// the previous ones. Use [`ModelList::same_items`] as a property comparer to compare items.
///
/// A list can be null (`ModelList::null()`), which is reconciled like an empty list.
pub struct ModelList<M>(Option<Arc<[M]>>);

impl<M> ModelList<M> {
    /// The null list.
    pub fn null() -> ModelList<M> {
        ModelList(None)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    pub fn len(&self) -> usize {
        self.0.as_deref().map_or(0, <[M]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<M> {
        self.as_slice().iter()
    }

    pub fn as_slice(&self) -> &[M] {
        self.0.as_deref().unwrap_or(&[])
    }
}

impl<M: Data> ModelList<M> {
    /// Compares the items of two lists.
    ///
    /// Intended for `#[data(same_fn = "...")]` on list properties where rebuilding the child
    /// collection is more expensive than comparing the items.
    pub fn same_items(a: &ModelList<M>, b: &ModelList<M>) -> bool {
        a.is_null() == b.is_null() && same_slice(a.as_slice(), b.as_slice())
    }
}

// not derived: that would require `M: Clone`
impl<M> Clone for ModelList<M> {
    fn clone(&self) -> Self {
        ModelList(self.0.clone())
    }
}

impl<M> Default for ModelList<M> {
    fn default() -> Self {
        ModelList::null()
    }
}

impl<M> Deref for ModelList<M> {
    type Target = [M];

    fn deref(&self) -> &[M] {
        self.as_slice()
    }
}

impl<M: 'static> Data for ModelList<M> {
    fn same(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for ModelList<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ref items) => f.debug_list().entries(items.iter()).finish(),
            None => f.write_str("null"),
        }
    }
}

impl<M> From<Vec<M>> for ModelList<M> {
    fn from(items: Vec<M>) -> Self {
        ModelList(Some(items.into()))
    }
}

impl<M, const N: usize> From<[M; N]> for ModelList<M> {
    fn from(items: [M; N]) -> Self {
        ModelList(Some(Arc::from(Vec::from(items))))
    }
}

impl<M> FromIterator<M> for ModelList<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        ModelList(Some(iter.into_iter().collect()))
    }
}

impl<'a, M> IntoIterator for &'a ModelList<M> {
    type Item = &'a M;
    type IntoIter = std::slice::Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Child collections of live objects.
pub trait ChildCollection<T> {
    fn clear(&mut self);
    fn push(&mut self, child: T);
}

impl<T> ChildCollection<T> for Vec<T> {
    fn clear(&mut self) {
        Vec::clear(self)
    }

    fn push(&mut self, child: T) {
        Vec::push(self, child)
    }
}

/// Rebuilds a live child collection from a list of descriptions.
///
/// The collection is cleared, then each description is materialized and appended in order. Live
/// children are never reused, even if their description didn't change.
pub fn reconcile_list<M, C>(cx: &mut ApplyCtx, list: &ModelList<M>, children: &mut C) -> Result<(), Error>
where
    M: Materialize,
    C: ChildCollection<M::Output> + ?Sized,
{
    trace!(len = list.len(), null = list.is_null(), "rebuilding child list");
    cx.stats_mut().lists_rebuilt += 1;
    children.clear();
    for item in list {
        let child = item.materialize(cx)?;
        children.push(child);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Label(&'static str);

    impl Data for Label {
        fn same(&self, other: &Self) -> bool {
            self == other
        }
    }

    impl Materialize for Label {
        type Output = String;
        fn materialize(&self, _cx: &mut ApplyCtx) -> Result<String, Error> {
            Ok(self.0.to_uppercase())
        }
    }

    #[test]
    fn pointer_equality() {
        let a = ModelList::from(vec![Label("a")]);
        let b = ModelList::from(vec![Label("a")]);
        assert!(a.same(&a.clone()));
        assert!(!a.same(&b));
        assert!(ModelList::same_items(&a, &b));
        assert!(ModelList::<Label>::null().same(&ModelList::null()));
        assert!(!ModelList::<Label>::null().same(&ModelList::from(vec![])));
    }

    #[test]
    fn rebuild_replaces_all_children() {
        let mut cx = ApplyCtx::new();
        let mut children = vec![String::from("stale")];
        reconcile_list(&mut cx, &ModelList::from([Label("x"), Label("y")]), &mut children).unwrap();
        assert_eq!(children, ["X", "Y"]);
        reconcile_list(&mut cx, &ModelList::<Label>::null(), &mut children).unwrap();
        assert!(children.is_empty());
        assert_eq!(cx.stats().lists_rebuilt, 2);
    }
}
