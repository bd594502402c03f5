//! Derive macros for eager-injector
//!
//! - `#[derive(Component)]` - Generate a `Component` impl whose single,
//!   inject-marked constructor takes the `#[inject]` fields as parameters.
//!
//! # Example
//!
//! ```rust,ignore
//! use eager_injector::{Component, Container};
//! use std::sync::Arc;
//!
//! #[derive(Component)]
//! struct UserService;
//!
//! #[derive(Component)]
//! struct UserController {
//!     #[inject]
//!     service: Arc<UserService>,
//!     // Non-injected fields use Default
//!     requests: u64,
//! }
//!
//! let container = Container::builder()
//!     .component::<UserController>()
//!     .component::<UserService>()
//!     .build()
//!     .unwrap();
//! ```

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Type, parse_macro_input};

/// Derive macro for the `Component` trait.
///
/// # Attributes
///
/// - `#[inject]` - Field is a constructor parameter. Must have type `Arc<T>`.
///   Parameters are declared in field order.
///
/// Fields without `#[inject]` use `Default::default()`. Unit structs get a
/// zero-argument constructor.
///
/// # Generated Code
///
/// ```rust,ignore
/// impl Component for UserController {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::of::<Self>().constructor(
///             Constructor::new(|(service,): (Arc<UserService>,)| Self {
///                 service,
///                 requests: Default::default(),
///             })
///             .inject(),
///         )
///     }
/// }
/// ```
#[proc_macro_derive(Component, attributes(inject))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return syn::Error::new_spanned(&input, "Component can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let mut param_types: Vec<&Type> = Vec::new();
    let mut param_names: Vec<syn::Ident> = Vec::new();
    let mut field_inits: Vec<proc_macro2::TokenStream> = Vec::new();

    match fields {
        Fields::Named(named) => {
            for field in named.named.iter() {
                let Some(field_name) = field.ident.as_ref() else {
                    continue;
                };
                let field_type = &field.ty;

                if has_inject_attr(&field.attrs) {
                    if extract_arc_inner_type(field_type).is_none() {
                        return syn::Error::new_spanned(
                            field_type,
                            "Fields marked with #[inject] must have type Arc<T>",
                        )
                        .to_compile_error()
                        .into();
                    }
                    let param = format_ident!("__param_{}", param_names.len());
                    param_types.push(field_type);
                    field_inits.push(quote! { #field_name: #param });
                    param_names.push(param);
                } else {
                    field_inits.push(quote! {
                        #field_name: ::std::default::Default::default()
                    });
                }
            }
        }
        Fields::Unit => {}
        Fields::Unnamed(_) => {
            return syn::Error::new_spanned(
                &input,
                "Component can only be derived for structs with named fields or unit structs",
            )
            .to_compile_error()
            .into();
        }
    }

    let body = match fields {
        Fields::Unit => quote! { Self },
        _ => quote! { Self { #(#field_inits),* } },
    };

    let expanded = quote! {
        impl #impl_generics ::eager_injector::Component for #name #ty_generics #where_clause {
            fn descriptor() -> ::eager_injector::TypeDescriptor {
                ::eager_injector::TypeDescriptor::of::<Self>().constructor(
                    ::eager_injector::Constructor::new(
                        |(#(#param_names,)*): (#(#param_types,)*)| #body
                    )
                    .inject()
                )
            }
        }
    };

    TokenStream::from(expanded)
}

/// Whether the field carries `#[inject]`
fn has_inject_attr(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident("inject"))
}

/// Extract T from Arc<T>
fn extract_arc_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        let segment = type_path.path.segments.last()?;
        if segment.ident == "Arc" {
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                    return Some(inner);
                }
            }
        }
    }
    None
}
