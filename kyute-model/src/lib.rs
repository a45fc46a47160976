//! Immutable UI descriptions, reconciled onto live element trees.
//!
//! Each state change of the application builds a tree of immutable description models (with the
//! generated builders). The tree is materialized once with `create`, then each new tree is
//! reconciled onto the live objects with `apply`. Every live object remembers the description last
//! applied to it, so re-applying an unchanged sub-description costs a single comparison.
//!
//! Description models are generated from a schema with the [`model!`] macro. A small set of
//! built-in controls and their models is available with the `controls` feature.
//!
//! # Example
//!
//! ```
//! use kyute_model::{models::*, ApplyCtx, ElementModel};
//!
//! let mut cx = ApplyCtx::new();
//! let label = TextBlockModel::builder().text("0").build();
//! let element = label.create(&mut cx).unwrap();
//! assert_eq!(element.borrow().text(), "0");
//!
//! TextBlockModel::builder().text("1").build().apply(&mut cx, &element).unwrap();
//! assert_eq!(element.borrow().text(), "1");
//! ```

// so that generated code can refer to `::kyute_model` inside this crate too
extern crate self as kyute_model;

mod context;
pub mod data;
mod element;
mod error;
mod kind;
mod list;
mod model;
mod prop;

#[cfg(feature = "controls")]
pub mod controls;
#[cfg(feature = "controls")]
pub mod models;

// Re-exports
pub use context::{ApplyCtx, ApplyStats};
pub use data::Data;
pub use element::{Element, ElementPod, ElementPtr, PreviousState};
pub use error::Error;
pub use kind::{KindCategory, KindInfo, PropertyCategory, PropertyInfo};
pub use list::{reconcile_list, ChildCollection, ModelList};
pub use model::{ElementModel, Materialize, Model, ModelEnum, ValueModel};
pub use prop::Prop;

pub use kyute_model_macros::{model, Data};

#[doc(hidden)]
pub mod __private {
    pub use crate::model::{apply_dyn, apply_inherited, apply_with_previous, convert_enum};
}
