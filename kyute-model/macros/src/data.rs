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
//
// Adapted for use in kyute.
use crate::CRATE;
use proc_macro2::{Ident, Literal, Span, TokenStream, TokenTree};
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, Data, DataEnum, DataStruct, Error, ExprPath, LitStr};

const BASE_DATA_ATTR_PATH: &str = "data";
const IGNORE_ATTR_PATH: &str = "ignore";
const DATA_SAME_FN_ATTR_PATH: &str = "same_fn";

/// The fields for a struct or an enum variant.
pub struct Fields {
    pub kind: FieldKind,
    fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Named,
    // this also covers Unit; we determine 'unit-ness' based on the number
    // of fields.
    Unnamed,
}

pub enum FieldIdent {
    Named(String),
    Unnamed(usize),
}

pub struct Field {
    pub ident: FieldIdent,
    pub attrs: DataAttrs,
}

/// Contents of `#[data(...)]` attributes.
#[derive(Default)]
pub struct DataAttrs {
    /// `true` if this field should be ignored.
    pub ignore: bool,
    pub same_fn: Option<ExprPath>,
}

impl DataAttrs {
    /// Parses all `#[data(...)]` attributes in the list, ignoring the others.
    pub fn parse(attrs: &[syn::Attribute]) -> Result<DataAttrs, Error> {
        let mut result = DataAttrs::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident(BASE_DATA_ATTR_PATH)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(IGNORE_ATTR_PATH) {
                    if result.ignore {
                        return Err(meta.error("duplicate attribute"));
                    }
                    result.ignore = true;
                    Ok(())
                } else if meta.path.is_ident(DATA_SAME_FN_ATTR_PATH) {
                    if result.same_fn.is_some() {
                        return Err(meta.error("duplicate attribute"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    result.same_fn = Some(lit.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown attribute, expected `ignore` or `same_fn = \"path\"`"))
                }
            })?;
        }
        Ok(result)
    }

    /// The tokens to be used as the function for 'same'.
    pub fn same_fn_path_tokens(&self) -> TokenStream {
        match self.same_fn {
            Some(ref f) => quote!(#f),
            None => {
                let span = Span::call_site();
                quote_spanned!(span=> ::#CRATE::Data::same)
            }
        }
    }
}

impl Fields {
    pub fn parse_ast(fields: &syn::Fields) -> Result<Self, Error> {
        let kind = match fields {
            syn::Fields::Named(_) => FieldKind::Named,
            syn::Fields::Unnamed(_) | syn::Fields::Unit => FieldKind::Unnamed,
        };

        let fields = fields
            .iter()
            .enumerate()
            .map(|(i, field)| Field::parse_ast(field, i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Fields { kind, fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }
}

impl Field {
    pub fn parse_ast(field: &syn::Field, index: usize) -> Result<Self, Error> {
        let ident = match field.ident.as_ref() {
            Some(ident) => FieldIdent::Named(ident.to_string().trim_start_matches("r#").to_owned()),
            None => FieldIdent::Unnamed(index),
        };
        let attrs = DataAttrs::parse(&field.attrs)?;
        Ok(Field { ident, attrs })
    }

    pub fn ident_tokens(&self) -> TokenTree {
        match self.ident {
            FieldIdent::Named(ref s) => Ident::new(s, Span::call_site()).into(),
            FieldIdent::Unnamed(num) => Literal::usize_unsuffixed(num).into(),
        }
    }

    pub fn ident_string(&self) -> String {
        match self.ident {
            FieldIdent::Named(ref s) => s.clone(),
            FieldIdent::Unnamed(num) => num.to_string(),
        }
    }
}

pub(crate) fn derive_data_impl(input: syn::DeriveInput) -> Result<TokenStream, Error> {
    match &input.data {
        Data::Struct(s) => derive_struct(&input, s),
        Data::Enum(e) => derive_enum(&input, e),
        Data::Union(u) => Err(Error::new(
            u.union_token.span(),
            "Data implementations cannot be derived from unions",
        )),
    }
}

fn derive_struct(input: &syn::DeriveInput, s: &DataStruct) -> Result<TokenStream, Error> {
    let ident = &input.ident;
    let impl_generics = generics_bounds(&input.generics);
    let (_, ty_generics, where_clause) = &input.generics.split_for_impl();

    let fields = Fields::parse_ast(&s.fields)?;
    let compared: Vec<_> = fields.iter().filter(|f| !f.attrs.ignore).collect();

    let diff = if !compared.is_empty() {
        let same_fns = compared.iter().map(|f| f.attrs.same_fn_path_tokens());
        let fields = compared.iter().map(|f| f.ident_tokens());
        quote!( #( #same_fns(&self.#fields, &other.#fields) )&&* )
    } else {
        quote!(true)
    };

    Ok(quote! {
        impl<#impl_generics> ::#CRATE::Data for #ident #ty_generics #where_clause {
            fn same(&self, other: &Self) -> bool {
                #diff
            }
        }
    })
}

fn ident_from_str(s: &str) -> Ident {
    Ident::new(s, Span::call_site())
}

fn is_c_style_enum(s: &DataEnum) -> bool {
    s.variants.iter().all(|variant| variant.fields.is_empty())
}

fn derive_enum(input: &syn::DeriveInput, s: &DataEnum) -> Result<TokenStream, Error> {
    let ident = &input.ident;
    let impl_generics = generics_bounds(&input.generics);
    let (_, ty_generics, where_clause) = &input.generics.split_for_impl();

    if is_c_style_enum(s) {
        return Ok(quote! {
            impl<#impl_generics> ::#CRATE::Data for #ident #ty_generics #where_clause {
                fn same(&self, other: &Self) -> bool { self == other }
            }
        });
    }

    let cases = s
        .variants
        .iter()
        .map(|variant| {
            let fields = Fields::parse_ast(&variant.fields)?;
            let variant = &variant.ident;

            // the various inner `same()` calls, to the right of the match arm.
            let tests: Vec<_> = fields
                .iter()
                .filter(|field| !field.attrs.ignore)
                .map(|field| {
                    let same_fn = field.attrs.same_fn_path_tokens();
                    let var_left = ident_from_str(&format!("__self_{}", field.ident_string()));
                    let var_right = ident_from_str(&format!("__other_{}", field.ident_string()));
                    quote!( #same_fn(#var_left, #var_right) )
                })
                .collect();
            let tests = if tests.is_empty() { quote!(true) } else { quote!( #( #tests )&&* ) };

            if fields.len() == 0 {
                return Ok(quote! {
                    ( #ident :: #variant, #ident :: #variant ) => { true }
                });
            }

            let vars_left: Vec<_> = fields
                .iter()
                .map(|field| ident_from_str(&format!("__self_{}", field.ident_string())))
                .collect();
            let vars_right: Vec<_> = fields
                .iter()
                .map(|field| ident_from_str(&format!("__other_{}", field.ident_string())))
                .collect();

            if let FieldKind::Named = fields.kind {
                let names: Vec<_> = fields.iter().map(Field::ident_tokens).collect();
                Ok(quote! {
                    (#ident :: #variant { #( #names: #vars_left ),* }, #ident :: #variant { #( #names: #vars_right ),* }) => {
                        #tests
                    }
                })
            } else {
                Ok(quote! {
                    ( #ident :: #variant( #(#vars_left),* ),  #ident :: #variant( #(#vars_right),* )) => {
                        #tests
                    }
                })
            }
        })
        .collect::<Result<Vec<TokenStream>, Error>>()?;

    Ok(quote! {
        impl<#impl_generics> ::#CRATE::Data for #ident #ty_generics #where_clause {
            #[allow(unused_variables, unreachable_patterns)]
            fn same(&self, other: &Self) -> bool {
                match (self, other) {
                    #( #cases, )*
                    _ => false,
                }
            }
        }
    })
}

fn generics_bounds(generics: &syn::Generics) -> TokenStream {
    let res = generics.params.iter().map(|gp| {
        use syn::GenericParam::*;
        match gp {
            Type(ty) => {
                let ident = &ty.ident;
                let bounds = &ty.bounds;
                if bounds.is_empty() {
                    quote_spanned!(ty.span()=> #ident : ::#CRATE::Data)
                } else {
                    quote_spanned!(ty.span()=> #ident : #bounds + ::#CRATE::Data)
                }
            }
            Lifetime(lf) => quote!(#lf),
            Const(cst) => quote!(#cst),
        }
    });

    quote!( #( #res, )* )
}
