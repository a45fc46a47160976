//! The `model!` schema macro.
use crate::{data::DataAttrs, CRATE};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::{HashMap, HashSet};
use syn::{
    braced,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    Attribute, Expr, Ident, Token, Type, Visibility,
};

mod kw {
    syn::custom_keyword!(element);
    syn::custom_keyword!(value);
    syn::custom_keyword!(nested);
    syn::custom_keyword!(list);
}

/// Property names that would clash with the generated methods.
const RESERVED_PROPERTY_NAMES: &[&str] = &[
    "base",
    "builder",
    "to_builder",
    "build",
    "new",
    "same",
    "create",
    "apply",
    "materialize",
    "kind",
];

const ENUM_REPR_TYPES: &[&str] = &["i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "isize", "usize"];

////////////////////////////////////////////////////////////////////////////////////////////////////
// Syntax

struct NodeDecl {
    attrs: Vec<Attribute>,
    vis: Visibility,
    name: Ident,
}

struct EnumVariant {
    attrs: Vec<Attribute>,
    name: Ident,
    value: Expr,
}

impl Parse for EnumVariant {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let name: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let value: Expr = input.parse()?;
        Ok(EnumVariant { attrs, name, value })
    }
}

struct EnumDecl {
    attrs: Vec<Attribute>,
    vis: Visibility,
    name: Ident,
    repr: Ident,
    variants: Vec<EnumVariant>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Category {
    Element,
    Value,
}

enum PropertyType {
    /// Written as is.
    Scalar(Type),
    /// `enum E`
    Enum(Ident),
    /// `nested K`
    Nested(Ident),
    /// `list K`
    List(Ident),
}

struct PropertyDecl {
    /// Attributes other than `#[data]`, forwarded to accessors and setters.
    attrs: Vec<Attribute>,
    data: DataAttrs,
    name: Ident,
    ty: PropertyType,
}

impl Parse for PropertyDecl {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut attrs = input.call(Attribute::parse_outer)?;
        let data = DataAttrs::parse(&attrs)?;
        attrs.retain(|attr| !attr.path().is_ident("data"));
        let name: Ident = input.parse()?;
        input.parse::<Token![:]>()?;

        let ty = if input.peek(Token![enum]) {
            input.parse::<Token![enum]>()?;
            PropertyType::Enum(input.parse()?)
        } else if input.peek(kw::nested) && input.peek2(Ident) {
            input.parse::<kw::nested>()?;
            PropertyType::Nested(input.parse()?)
        } else if input.peek(kw::list) && input.peek2(Ident) {
            input.parse::<kw::list>()?;
            PropertyType::List(input.parse()?)
        } else {
            PropertyType::Scalar(input.parse()?)
        };

        Ok(PropertyDecl { attrs, data, name, ty })
    }
}

struct KindDecl {
    attrs: Vec<Attribute>,
    vis: Visibility,
    is_abstract: bool,
    category: Category,
    name: Ident,
    base: Option<Ident>,
    target: Type,
    properties: Vec<PropertyDecl>,
}

impl KindDecl {
    /// Parses the part after attributes and visibility.
    fn parse_rest(input: ParseStream, attrs: Vec<Attribute>, vis: Visibility) -> syn::Result<KindDecl> {
        let is_abstract = if input.peek(Token![abstract]) {
            input.parse::<Token![abstract]>()?;
            true
        } else {
            false
        };

        let lookahead = input.lookahead1();
        let category = if lookahead.peek(kw::element) {
            input.parse::<kw::element>()?;
            Category::Element
        } else if lookahead.peek(kw::value) {
            input.parse::<kw::value>()?;
            Category::Value
        } else {
            return Err(lookahead.error());
        };

        let name: Ident = input.parse()?;
        let base = if input.peek(Token![:]) {
            input.parse::<Token![:]>()?;
            Some(input.parse()?)
        } else {
            None
        };
        input.parse::<Token![=>]>()?;
        let target: Type = input.parse()?;

        let content;
        braced!(content in input);
        let properties = Punctuated::<PropertyDecl, Token![,]>::parse_terminated(&content)?
            .into_iter()
            .collect();

        Ok(KindDecl {
            attrs,
            vis,
            is_abstract,
            category,
            name,
            base,
            target,
            properties,
        })
    }
}

struct Schema {
    node: Option<NodeDecl>,
    enums: Vec<EnumDecl>,
    kinds: Vec<KindDecl>,
}

impl Parse for Schema {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut schema = Schema {
            node: None,
            enums: vec![],
            kinds: vec![],
        };

        while !input.is_empty() {
            let attrs = input.call(Attribute::parse_outer)?;
            let vis: Visibility = input.parse()?;
            let lookahead = input.lookahead1();
            if lookahead.peek(Token![enum]) {
                input.parse::<Token![enum]>()?;
                let name: Ident = input.parse()?;
                if input.peek(Token![;]) {
                    input.parse::<Token![;]>()?;
                    if schema.node.is_some() {
                        return Err(syn::Error::new(name.span(), "duplicate node enum declaration"));
                    }
                    schema.node = Some(NodeDecl { attrs, vis, name });
                } else {
                    input.parse::<Token![:]>()?;
                    let repr: Ident = input.parse()?;
                    let content;
                    braced!(content in input);
                    let variants = Punctuated::<EnumVariant, Token![,]>::parse_terminated(&content)?
                        .into_iter()
                        .collect();
                    schema.enums.push(EnumDecl {
                        attrs,
                        vis,
                        name,
                        repr,
                        variants,
                    });
                }
            } else if lookahead.peek(Token![abstract]) || lookahead.peek(kw::element) || lookahead.peek(kw::value) {
                schema.kinds.push(KindDecl::parse_rest(input, attrs, vis)?);
            } else {
                return Err(lookahead.error());
            }
        }

        Ok(schema)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Validation

fn model_ident(name: &Ident) -> Ident {
    format_ident!("{}Model", name)
}

fn builder_ident(name: &Ident) -> Ident {
    format_ident!("{}ModelBuilder", name)
}

struct Resolved<'a> {
    schema: &'a Schema,
    kinds: HashMap<String, &'a KindDecl>,
    enums: HashSet<String>,
}

impl<'a> Resolved<'a> {
    fn new(schema: &'a Schema) -> syn::Result<Resolved<'a>> {
        let mut names = HashSet::new();
        let mut kinds = HashMap::new();
        let mut enums = HashSet::new();

        if let Some(node) = &schema.node {
            names.insert(node.name.to_string());
        }
        for e in schema.enums.iter() {
            if !names.insert(e.name.to_string()) {
                return Err(syn::Error::new(e.name.span(), "duplicate name"));
            }
            if !ENUM_REPR_TYPES.contains(&e.repr.to_string().as_str()) {
                return Err(syn::Error::new(
                    e.repr.span(),
                    "the underlying representation of an enum must be a primitive integer type",
                ));
            }
            enums.insert(e.name.to_string());
        }
        for k in schema.kinds.iter() {
            if !names.insert(k.name.to_string()) {
                return Err(syn::Error::new(k.name.span(), "duplicate name"));
            }
            kinds.insert(k.name.to_string(), k);
        }

        let resolved = Resolved { schema, kinds, enums };
        for k in schema.kinds.iter() {
            resolved.validate_kind(k)?;
        }
        Ok(resolved)
    }

    fn is_node(&self, name: &Ident) -> bool {
        self.schema.node.as_ref().map_or(false, |node| node.name == *name)
    }

    /// Returns the kind and its bases, most derived first.
    fn chain(&self, kind: &'a KindDecl) -> syn::Result<Vec<&'a KindDecl>> {
        let mut chain = vec![kind];
        let mut current = kind;
        while let Some(base) = &current.base {
            let Some(base_kind) = self.kinds.get(&base.to_string()).copied() else {
                return Err(syn::Error::new(base.span(), format!("unknown base kind `{base}`")));
            };
            if chain.iter().any(|k| std::ptr::eq(*k, base_kind)) {
                return Err(syn::Error::new(base.span(), "cyclic inheritance"));
            }
            if base_kind.category != kind.category {
                return Err(syn::Error::new(
                    base.span(),
                    "a kind and its base must be both elements or both values",
                ));
            }
            chain.push(base_kind);
            current = base_kind;
        }
        Ok(chain)
    }

    fn validate_kind(&self, kind: &'a KindDecl) -> syn::Result<()> {
        let chain = self.chain(kind)?;

        let mut seen = HashSet::new();
        for k in chain.iter().rev() {
            for p in k.properties.iter() {
                let name = p.name.to_string();
                if RESERVED_PROPERTY_NAMES.contains(&name.as_str()) {
                    return Err(syn::Error::new(p.name.span(), format!("`{name}` is a reserved name")));
                }
                if !seen.insert(name) {
                    return Err(syn::Error::new(
                        p.name.span(),
                        "duplicate property (possibly declared by a base kind)",
                    ));
                }
            }
        }

        for p in kind.properties.iter() {
            match &p.ty {
                PropertyType::Scalar(_) => {}
                PropertyType::Enum(e) => {
                    if !self.enums.contains(&e.to_string()) {
                        return Err(syn::Error::new(e.span(), format!("unknown enum `{e}`")));
                    }
                }
                PropertyType::Nested(item) | PropertyType::List(item) => {
                    if !self.is_node(item) && !self.kinds.contains_key(&item.to_string()) {
                        return Err(syn::Error::new(
                            item.span(),
                            format!("`{item}` is neither a kind nor the node enum"),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Type of the items of nested and list properties.
    fn item_type(&self, name: &Ident) -> TokenStream {
        if self.is_node(name) {
            quote!(#name)
        } else {
            let model = model_ident(name);
            quote!(#model)
        }
    }

    /// Type of the value of a property, without the `Prop` wrapper.
    fn value_type(&self, property: &PropertyDecl) -> TokenStream {
        match &property.ty {
            PropertyType::Scalar(ty) => quote!(#ty),
            PropertyType::Enum(e) => {
                let model = model_ident(e);
                quote!(#model)
            }
            PropertyType::Nested(item) => {
                let item = self.item_type(item);
                quote!(::std::option::Option<#item>)
            }
            PropertyType::List(item) => {
                let item = self.item_type(item);
                quote!(::#CRATE::ModelList<#item>)
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Code generation

fn generate_enum(decl: &EnumDecl) -> TokenStream {
    let EnumDecl {
        attrs,
        vis,
        name,
        repr,
        variants,
    } = decl;
    let model = model_ident(name);
    let name_str = name.to_string();
    let variants = variants.iter().map(|v| {
        let attrs = &v.attrs;
        let name = &v.name;
        let value = &v.value;
        quote!( #(#attrs)* #name = #value, )
    });

    quote! {
        #(#attrs)*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        #[repr(#repr)]
        #vis enum #model {
            #(#variants)*
        }

        impl ::#CRATE::ModelEnum for #model {
            type Repr = #repr;
            const NAME: &'static str = #name_str;
            fn to_repr(self) -> #repr {
                self as #repr
            }
        }

        impl ::#CRATE::Data for #model {
            fn same(&self, other: &Self) -> bool {
                self == other
            }
        }
    }
}

fn property_info(property: &PropertyDecl) -> TokenStream {
    let name = property.name.to_string();
    let category = match &property.ty {
        PropertyType::Scalar(_) => quote!(::#CRATE::PropertyCategory::Scalar),
        PropertyType::Enum(e) => {
            let e = e.to_string();
            quote!(::#CRATE::PropertyCategory::Enum { name: #e })
        }
        PropertyType::Nested(item) => {
            let item = item.to_string();
            quote!(::#CRATE::PropertyCategory::Nested { kind: #item })
        }
        PropertyType::List(item) => {
            let item = item.to_string();
            quote!(::#CRATE::PropertyCategory::List { item: #item })
        }
    };
    quote!(::#CRATE::PropertyInfo { name: #name, category: #category })
}

/// Statement writing a property to `target` in `apply_properties`.
fn apply_property(property: &PropertyDecl) -> TokenStream {
    let name = &property.name;
    let setter = format_ident!("set_{}", name);
    match &property.ty {
        PropertyType::Scalar(_) => quote! {
            if let ::#CRATE::Prop::Set(value) = &self.#name {
                target.#setter(::std::clone::Clone::clone(value));
            }
        },
        PropertyType::Enum(_) => quote! {
            if let ::#CRATE::Prop::Set(value) = &self.#name {
                target.#setter(::#CRATE::__private::convert_enum(*value)?);
            }
        },
        // an explicit null writes nothing
        PropertyType::Nested(_) => quote! {
            if let ::#CRATE::Prop::Set(::std::option::Option::Some(value)) = &self.#name {
                target.#setter(::#CRATE::Materialize::materialize(value, cx)?);
            }
        },
        PropertyType::List(_) => {
            let getter = format_ident!("{}_mut", name);
            quote! {
                if let ::#CRATE::Prop::Set(list) = &self.#name {
                    ::#CRATE::reconcile_list(cx, list, target.#getter())?;
                }
            }
        }
    }
}

fn generate_kind<'a>(resolved: &Resolved<'a>, kind: &'a KindDecl) -> syn::Result<TokenStream> {
    let KindDecl {
        attrs,
        vis,
        is_abstract,
        category,
        name,
        base,
        target,
        properties,
    } = kind;

    let model = model_ident(name);
    let builder = builder_ident(name);
    let name_str = name.to_string();
    let chain = resolved.chain(kind)?;

    // --- model struct ---
    let base_model = base.as_ref().map(model_ident);
    let base_field = base_model.as_ref().map(|b| quote!(base: #b,));
    let fields = properties.iter().map(|p| {
        let name = &p.name;
        let ty = resolved.value_type(p);
        quote!(#name: ::#CRATE::Prop<#ty>,)
    });

    // --- accessors ---
    let base_accessor = base_model.as_ref().map(|b| {
        quote! {
            /// Returns the part of the description inherited from the base kind.
            pub fn base(&self) -> &#b {
                &self.base
            }
        }
    });
    let accessors = properties.iter().map(|p| {
        let attrs = &p.attrs;
        let name = &p.name;
        let ty = resolved.value_type(p);
        quote! {
            #(#attrs)*
            pub fn #name(&self) -> &::#CRATE::Prop<#ty> {
                &self.#name
            }
        }
    });
    let deref = base_model.as_ref().map(|b| {
        quote! {
            impl ::std::ops::Deref for #model {
                type Target = #b;
                fn deref(&self) -> &#b {
                    &self.base
                }
            }
        }
    });

    // --- builder setters, including inherited properties ---
    let mut setters = vec![];
    for (depth, k) in chain.iter().enumerate() {
        let bases = std::iter::repeat(quote!(.base)).take(depth).collect::<Vec<_>>();
        for p in k.properties.iter() {
            let attrs = &p.attrs;
            let name = &p.name;
            let field = quote!(self.model #(#bases)* .#name);
            let setter = match &p.ty {
                PropertyType::Scalar(ty) => quote! {
                    pub fn #name(mut self, value: impl ::std::convert::Into<#ty>) -> Self {
                        #field = ::#CRATE::Prop::Set(value.into());
                        self
                    }
                },
                PropertyType::Enum(e) => {
                    let e = model_ident(e);
                    quote! {
                        pub fn #name(mut self, value: #e) -> Self {
                            #field = ::#CRATE::Prop::Set(value);
                            self
                        }
                    }
                }
                PropertyType::Nested(_) | PropertyType::List(_) => {
                    let ty = resolved.value_type(p);
                    quote! {
                        pub fn #name(mut self, value: impl ::std::convert::Into<#ty>) -> Self {
                            #field = ::#CRATE::Prop::Set(value.into());
                            self
                        }
                    }
                }
            };
            setters.push(quote!( #(#attrs)* #setter ));
        }
    }

    // --- Data ---
    let base_same = base.as_ref().map(|_| quote!(&& ::#CRATE::Data::same(&self.base, &other.base)));
    let property_same = properties.iter().filter(|p| !p.data.ignore).map(|p| {
        let name = &p.name;
        let same_fn = match &p.data.same_fn {
            Some(path) => quote!(#path),
            None => {
                let ty = resolved.value_type(p);
                quote!(<#ty as ::#CRATE::Data>::same)
            }
        };
        quote!(&& ::#CRATE::Prop::same_with(&self.#name, &other.#name, #same_fn))
    });

    // --- Model ---
    let category_tokens = match category {
        Category::Element => quote!(::#CRATE::KindCategory::Element),
        Category::Value => quote!(::#CRATE::KindCategory::Value),
    };
    let base_kind = match &base_model {
        Some(b) => quote!(::std::option::Option::Some(<#b as ::#CRATE::Model>::KIND)),
        None => quote!(::std::option::Option::None),
    };
    let constructible = !is_abstract;
    let property_infos = properties.iter().map(property_info);
    let construct = if *is_abstract {
        quote!(::std::result::Result::Err(::#CRATE::Error::NotConstructible { kind: #name_str }))
    } else {
        quote!(::std::result::Result::Ok(<#target as ::std::default::Default>::default()))
    };
    let apply_base = base_model.as_ref().map(|b| {
        quote! {
            ::#CRATE::__private::apply_inherited(
                cx,
                &self.base,
                previous.map(|previous| &previous.base),
                ::std::convert::AsMut::<<#b as ::#CRATE::Model>::Target>::as_mut(target),
            )?;
        }
    });
    let apply_properties = properties.iter().map(apply_property);

    let materialize = match category {
        Category::Element => quote! {
            impl ::#CRATE::ElementModel for #model {}

            impl ::#CRATE::Materialize for #model {
                type Output = ::#CRATE::ElementPtr<#target>;
                fn materialize(&self, cx: &mut ::#CRATE::ApplyCtx) -> ::std::result::Result<Self::Output, ::#CRATE::Error> {
                    ::#CRATE::ElementModel::create(self, cx)
                }
            }
        },
        Category::Value => quote! {
            impl ::#CRATE::ValueModel for #model {}

            impl ::#CRATE::Materialize for #model {
                type Output = #target;
                fn materialize(&self, cx: &mut ::#CRATE::ApplyCtx) -> ::std::result::Result<Self::Output, ::#CRATE::Error> {
                    ::#CRATE::ValueModel::create(self, cx)
                }
            }
        },
    };

    let builder_doc = format!("Builder for [`{model}`].");

    Ok(quote! {
        #(#attrs)*
        #[derive(Clone, Debug, Default)]
        #vis struct #model {
            #base_field
            #(#fields)*
        }

        impl #model {
            /// Returns a builder for a new description, with all properties unset.
            pub fn builder() -> #builder {
                #builder::default()
            }

            /// Returns a builder initialized with the properties of this description.
            pub fn to_builder(&self) -> #builder {
                #builder { model: ::std::clone::Clone::clone(self) }
            }

            #base_accessor
            #(#accessors)*
        }

        #deref

        #[doc = #builder_doc]
        #[derive(Clone, Debug, Default)]
        #vis struct #builder {
            model: #model,
        }

        impl #builder {
            pub fn new() -> Self {
                ::std::default::Default::default()
            }

            #(#setters)*

            pub fn build(self) -> #model {
                self.model
            }
        }

        impl ::std::convert::From<#builder> for #model {
            fn from(builder: #builder) -> Self {
                builder.build()
            }
        }

        impl ::#CRATE::Data for #model {
            fn same(&self, other: &Self) -> bool {
                true #base_same #(#property_same)*
            }
        }

        impl ::#CRATE::Model for #model {
            type Target = #target;

            const KIND: &'static ::#CRATE::KindInfo = &::#CRATE::KindInfo {
                name: #name_str,
                base: #base_kind,
                category: #category_tokens,
                constructible: #constructible,
                properties: &[#(#property_infos),*],
            };

            fn construct() -> ::std::result::Result<#target, ::#CRATE::Error> {
                #construct
            }

            #[allow(unused_variables)]
            fn apply_properties(
                &self,
                cx: &mut ::#CRATE::ApplyCtx,
                previous: ::std::option::Option<&Self>,
                target: &mut #target,
            ) -> ::std::result::Result<(), ::#CRATE::Error> {
                #apply_base
                #(#apply_properties)*
                cx.run_hooks(self, target);
                ::std::result::Result::Ok(())
            }
        }

        #materialize
    })
}

fn generate_node(node: &NodeDecl, kinds: &[KindDecl]) -> TokenStream {
    let NodeDecl { attrs, vis, name } = node;
    let variants: Vec<_> = kinds.iter().map(|k| &k.name).collect();
    let models: Vec<_> = kinds.iter().map(|k| model_ident(&k.name)).collect();
    let builders: Vec<_> = kinds.iter().map(|k| builder_ident(&k.name)).collect();
    // `CRATE` is a constant and can't be interpolated inside repetitions
    let model_trait = quote!(::#CRATE::Model);
    let data_trait = quote!(::#CRATE::Data);

    let create_arms = kinds.iter().map(|k| {
        let variant = &k.name;
        let kind = k.name.to_string();
        match k.category {
            Category::Element => quote! {
                #name::#variant(model) => {
                    let element: ::#CRATE::ElementPtr = ::#CRATE::ElementModel::create(model, cx)?;
                    ::std::result::Result::Ok(element)
                }
            },
            Category::Value => quote! {
                #name::#variant(_) => ::std::result::Result::Err(::#CRATE::Error::UnsupportedMaterialization {
                    kind: #kind,
                    target: "dyn Element",
                })
            },
        }
    });
    let apply_arms = kinds.iter().map(|k| {
        let variant = &k.name;
        let kind = k.name.to_string();
        match k.category {
            Category::Element => quote! {
                #name::#variant(model) => ::#CRATE::__private::apply_dyn(model, cx, element)
            },
            Category::Value => quote! {
                #name::#variant(_) => ::std::result::Result::Err(::#CRATE::Error::UnsupportedMaterialization {
                    kind: #kind,
                    target: "dyn Element",
                })
            },
        }
    });

    quote! {
        #(#attrs)*
        #[derive(Clone, Debug)]
        #vis enum #name {
            #( #variants(#models), )*
        }

        impl #name {
            /// Descriptors of all the kinds in the schema.
            pub const KINDS: &'static [&'static ::#CRATE::KindInfo] = &[
                #( <#models as #model_trait>::KIND, )*
            ];

            pub fn kind(&self) -> &'static ::#CRATE::KindInfo {
                match self {
                    #( #name::#variants(_) => <#models as #model_trait>::KIND, )*
                }
            }

            /// Creates a new live element from this description.
            ///
            /// Fails with `UnsupportedMaterialization` for value kinds.
            pub fn create_element(
                &self,
                cx: &mut ::#CRATE::ApplyCtx,
            ) -> ::std::result::Result<::#CRATE::ElementPtr, ::#CRATE::Error> {
                match self {
                    #(#create_arms,)*
                }
            }

            /// Reconciles a live element with this description.
            ///
            /// Does nothing if the live element is not of the type created by this kind.
            pub fn apply(
                &self,
                cx: &mut ::#CRATE::ApplyCtx,
                element: &::#CRATE::ElementPod,
            ) -> ::std::result::Result<(), ::#CRATE::Error> {
                match self {
                    #(#apply_arms,)*
                }
            }
        }

        impl ::#CRATE::Data for #name {
            #[allow(unreachable_patterns)]
            fn same(&self, other: &Self) -> bool {
                match (self, other) {
                    #( (#name::#variants(a), #name::#variants(b)) => #data_trait::same(a, b), )*
                    _ => false,
                }
            }
        }

        impl ::#CRATE::Materialize for #name {
            type Output = ::#CRATE::ElementPtr;
            fn materialize(&self, cx: &mut ::#CRATE::ApplyCtx) -> ::std::result::Result<Self::Output, ::#CRATE::Error> {
                self.create_element(cx)
            }
        }

        #(
            impl ::std::convert::From<#models> for #name {
                fn from(model: #models) -> Self {
                    #name::#variants(model)
                }
            }

            impl ::std::convert::From<#builders> for #name {
                fn from(builder: #builders) -> Self {
                    #name::#variants(builder.build())
                }
            }
        )*
    }
}

fn generate(schema: &Schema) -> syn::Result<TokenStream> {
    let resolved = Resolved::new(schema)?;

    let mut output = TokenStream::new();
    for e in schema.enums.iter() {
        output.extend(generate_enum(e));
    }
    for k in schema.kinds.iter() {
        output.extend(generate_kind(&resolved, k)?);
    }
    if let Some(node) = &schema.node {
        if schema.kinds.is_empty() {
            return Err(syn::Error::new(node.name.span(), "the node enum needs at least one kind"));
        }
        output.extend(generate_node(node, &schema.kinds));
    }
    Ok(output)
}

pub(crate) fn model_impl(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let schema = parse_macro_input!(input as Schema);
    match generate(&schema) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(input: &str) -> syn::Result<()> {
        let schema: Schema = syn::parse_str(input)?;
        Resolved::new(&schema).map(|_| ())
    }

    fn error(input: &str) -> String {
        match resolve(input) {
            Ok(()) => panic!("schema accepted: {input}"),
            Err(err) => err.to_string(),
        }
    }

    const VALID: &str = "
        pub enum Node;
        pub enum Mode: u8 { Off = 0, On = 1 }
        pub abstract element Base => live::Base { mode: enum Mode }
        pub element Derived: Base => live::Derived {
            size: nested Size,
            #[data(same_fn = \"ModelList::same_items\")]
            children: list Node,
        }
        pub value Size => live::Size { width: f32 }
    ";

    #[test]
    fn valid_schema() {
        resolve(VALID).unwrap();
    }

    #[test]
    fn node_enum_generates_valid_items() {
        let schema: Schema = syn::parse_str(VALID).unwrap();
        let tokens = generate(&schema).unwrap();
        let file: syn::File = syn::parse2(tokens.clone()).unwrap();
        assert!(file.items.iter().any(|item| matches!(item, syn::Item::Enum(e) if e.ident == "Node")));
        let text = tokens.to_string();
        assert!(text.contains("kyute_model"));
        assert!(!text.contains("CRATE"));
    }

    #[test]
    fn node_enum_needs_kinds() {
        let schema: Schema = syn::parse_str("enum Node;").unwrap();
        let err = generate(&schema).err().unwrap();
        assert!(err.to_string().contains("at least one kind"));
    }

    #[test]
    fn unknown_base() {
        assert_eq!(error("element A: B => T {}"), "unknown base kind `B`");
    }

    #[test]
    fn cyclic_bases() {
        assert_eq!(error("element A: B => T {} element B: A => T {}"), "cyclic inheritance");
    }

    #[test]
    fn base_of_another_category() {
        assert!(error("element A: V => T {} value V => T {}").contains("both elements or both values"));
    }

    #[test]
    fn reserved_property_name() {
        assert_eq!(error("element A => T { build: i32 }"), "`build` is a reserved name");
    }

    #[test]
    fn property_declared_by_base() {
        let err = error("abstract element A => T { x: i32 } element B: A => T { x: f64 }");
        assert!(err.starts_with("duplicate property"));
    }

    #[test]
    fn duplicate_names() {
        assert_eq!(error("enum A: i32 { X = 0 } element A => T {}"), "duplicate name");
    }

    #[test]
    fn non_integer_repr() {
        assert!(error("enum E: f32 { X = 0 }").contains("primitive integer type"));
    }

    #[test]
    fn unresolved_references() {
        assert_eq!(error("element A => T { e: enum E }"), "unknown enum `E`");
        assert!(error("element A => T { n: nested Missing }").contains("neither a kind nor the node enum"));
        assert!(error("element A => T { l: list Missing }").contains("neither a kind nor the node enum"));
    }
}
