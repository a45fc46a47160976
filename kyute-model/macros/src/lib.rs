extern crate proc_macro;
use proc_macro2::Span;
use quote::{ToTokens, TokenStreamExt};

mod data;
mod model;

//--------------------------------------------------------------------------------------------------
struct CrateName;
const CRATE: CrateName = CrateName;

impl ToTokens for CrateName {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        tokens.append(syn::Ident::new("kyute_model", Span::call_site()))
    }
}

//--------------------------------------------------------------------------------------------------

/// Derives `Data`, comparing every field with `Data::same`.
///
/// Fields can be excluded with `#[data(ignore)]`, or compared with another function with
/// `#[data(same_fn = "path::to::fn")]`.
#[proc_macro_derive(Data, attributes(data))]
pub fn derive_data(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    data::derive_data_impl(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Generates description models, builders and apply logic from a schema.
///
/// # Examples
///```ignore
/// model! {
///     pub enum Node;
///
///     pub enum Orientation: i32 {
///         Vertical = 0,
///         Horizontal = 1,
///     }
///
///     pub abstract element Panel => live::Panel {
///         children: list Node,
///     }
///
///     pub element StackPanel: Panel => live::StackPanel {
///         orientation: enum Orientation,
///         padding: nested Thickness,
///         spacing: f64,
///     }
///
///     pub value Thickness => live::Thickness {
///         left: f64, top: f64, right: f64, bottom: f64,
///     }
/// }
///```
///
/// For each kind `X`, this generates `XModel` (the immutable description) and `XModelBuilder`.
/// For each enum `E`, this generates `EModel`. `enum Node;` generates an enum over all the
/// kinds of the schema, used for heterogeneous child lists.
#[proc_macro]
pub fn model(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    model::model_impl(input)
}
