// Copyright 2019 The Druid Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structural comparison of description values.
//!
//! Every property type that can appear in a description model implements [`Data`]. The apply engine
//! uses it to decide whether a description changed since it was last applied to a live object.

use std::{rc::Rc, sync::Arc};

/// Cheap structural comparison.
///
/// `same` must be conservative: returning `false` for equal values only costs a redundant
/// re-application, but returning `true` for different values means a live object is left stale.
pub trait Data: Clone + 'static {
    fn same(&self, other: &Self) -> bool;
}

/// An impl of `Data` suitable for simple types.
///
/// The `same` method is implemented with equality, so the type should
/// implement `Eq` at least.
macro_rules! impl_data_simple {
    ($($t:ty),* $(,)?) => {
        $(
        impl Data for $t {
            fn same(&self, other: &Self) -> bool {
                self == other
            }
        }
        )*
    };
}

impl_data_simple!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, bool);
impl_data_simple!(String, std::path::PathBuf, std::time::Duration);

impl Data for &'static str {
    fn same(&self, other: &Self) -> bool {
        // string literals are compared by content, interning is not guaranteed
        *self == *other
    }
}

impl Data for f32 {
    fn same(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Data for f64 {
    fn same(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl<T: ?Sized + 'static> Data for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized + 'static> Data for Rc<T> {
    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: Data> Data for Box<T> {
    fn same(&self, other: &Self) -> bool {
        (**self).same(&**other)
    }
}

impl<T: Data> Data for Option<T> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Data for () {
    fn same(&self, _other: &Self) -> bool {
        true
    }
}

impl<T0: Data, T1: Data> Data for (T0, T1) {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0) && self.1.same(&other.1)
    }
}

impl<T0: Data, T1: Data, T2: Data> Data for (T0, T1, T2) {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0) && self.1.same(&other.1) && self.2.same(&other.2)
    }
}

impl<T: 'static + ?Sized> Data for std::marker::PhantomData<T> {
    fn same(&self, _other: &Self) -> bool {
        true
    }
}

impl<T: Data, const N: usize> Data for [T; N] {
    fn same(&self, other: &Self) -> bool {
        self.iter().zip(other.iter()).all(|(a, b)| a.same(b))
    }
}

/// Compares two slices item by item.
pub fn same_slice<T: Data>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| a.same(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_compare_bits() {
        assert!(f64::NAN.same(&f64::NAN));
        assert!(!0.0f64.same(&-0.0f64));
        assert!(1.5f32.same(&1.5f32));
    }

    #[test]
    fn arcs_compare_by_pointer() {
        let a: Arc<[i32]> = vec![1, 2, 3].into();
        let b: Arc<[i32]> = vec![1, 2, 3].into();
        assert!(a.same(&a.clone()));
        assert!(!a.same(&b));
        assert!(same_slice(&a, &b));
    }

    #[test]
    fn options_and_tuples() {
        assert!(Some(String::from("x")).same(&Some("x".to_string())));
        assert!(!Some(1).same(&None));
        assert!(None::<i32>.same(&None));
        assert!((1, "a").same(&(1, "a")));
        assert!(!(1, 2.0f64).same(&(1, 3.0)));
    }

    #[test]
    fn array_data() {
        let input = [1u8, 0, 0, 1, 0];
        assert!(input.same(&[1u8, 0, 0, 1, 0]));
        assert!(!input.same(&[1u8, 1, 0, 1, 0]));
    }
}
