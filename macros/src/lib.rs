//! Derive macros for tagged-reducer
//!
//! This crate provides procedural macros to reduce boilerplate when writing
//! action unions for tag-dispatching reducers.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Maps each variant of an action enum to its tag and
//!   lets handlers receive a single variant's data
//!
//! # Example
//!
//! ```ignore
//! use tagged_reducer_macros::Action;
//!
//! struct Rename {
//!     name: String,
//! }
//!
//! #[derive(Action, Clone, Debug)]
//! enum UserAction {
//!     Rename(Rename),
//!
//!     #[action(rename = "user/logout")]
//!     Logout,
//! }
//!
//! // Generated:
//! assert_eq!(UserAction::Logout.action_type(), "user/logout");
//! assert_eq!(<Rename as ActionKind<UserAction>>::TYPE, "Rename");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashMap;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Type, Variant, parse_macro_input};

/// Derive macro for action enums
///
/// Generates:
/// - `action_type()` - The variant's tag (the variant name unless renamed)
/// - `ACTION_TYPES` - Every tag of the enum, in declaration order
/// - `impl TaggedAction` - So the enum can be dispatched by a `HandlerTable`
/// - For each single-field tuple variant `Variant(Kind)`: `impl ActionKind<Enum> for Kind`
///   and `impl From<Kind> for Enum`, so a handler registered with
///   `HandlerTable::handle` receives `Kind` directly
///
/// Kind impls are only generated for enums without generic parameters.
///
/// # Attributes
///
/// - `#[action(rename = "...")]` - Use a custom tag for a variant
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - Two variants resolve to the same tag
/// - Two newtype variants of a non-generic enum wrap the same kind type
/// - An `#[action(...)]` attribute is malformed
///
/// # Example
///
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum CounterAction {
///     Increment,
///     Add(Add),
///     #[action(rename = "counter/reset")]
///     Reset { to: i64 },
/// }
///
/// let reducer = handle_actions(
///     HandlerTable::new()
///         .on("Increment", |count, _| count + 1)
///         .handle(|count, Add(n): Add| count + n),
/// );
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_action(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_action(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums",
        ));
    };

    if data_enum.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "#[derive(Action)] requires at least one variant",
        ));
    }

    // Resolve each variant's tag, rejecting duplicates
    let mut tagged: Vec<(&Variant, String)> = Vec::new();
    let mut seen: HashMap<String, &syn::Ident> = HashMap::new();

    for variant in &data_enum.variants {
        let action_type = action_rename(&variant.attrs)?.unwrap_or_else(|| variant.ident.to_string());

        if let Some(previous) = seen.insert(action_type.clone(), &variant.ident) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("Action type \"{action_type}\" is already used by variant `{previous}`"),
            ));
        }

        tagged.push((variant, action_type));
    }

    // Generate action_type() match arms
    let action_type_arms = tagged.iter().map(|(variant, action_type)| {
        let variant_name = &variant.ident;
        match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } => #action_type, },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) => #action_type, },
            Fields::Unit => quote! { Self::#variant_name => #action_type, },
        }
    });

    let action_types = tagged.iter().map(|(_, action_type)| action_type);

    // Generate ActionKind and From impls for newtype variants
    let mut kind_impls = Vec::new();
    if input.generics.params.is_empty() {
        let mut kinds: HashMap<String, &syn::Ident> = HashMap::new();

        for (variant, action_type) in &tagged {
            let Some(kind) = newtype_field(variant) else {
                continue;
            };
            let variant_name = &variant.ident;

            if let Some(previous) = kinds.insert(quote!(#kind).to_string(), variant_name) {
                return Err(syn::Error::new_spanned(
                    kind,
                    format!(
                        "Kind type `{}` is already wrapped by variant `{previous}`; \
                         wrap each kind in at most one variant",
                        quote!(#kind)
                    ),
                ));
            }

            kind_impls.push(quote! {
                impl ::tagged_reducer_core::ActionKind<#name> for #kind {
                    const TYPE: &'static str = #action_type;

                    fn from_action(action: #name) -> ::core::result::Result<Self, #name> {
                        match action {
                            #name::#variant_name(kind) => ::core::result::Result::Ok(kind),
                            #[allow(unreachable_patterns)]
                            other => ::core::result::Result::Err(other),
                        }
                    }
                }

                impl ::core::convert::From<#kind> for #name {
                    fn from(kind: #kind) -> Self {
                        Self::#variant_name(kind)
                    }
                }
            });
        }
    }

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Every action type of this enum, in declaration order
            pub const ACTION_TYPES: &'static [&'static str] = &[#(#action_types),*];

            /// Returns the action type (tag) of this variant
            #[must_use]
            pub const fn action_type(&self) -> &'static str {
                match self {
                    #(#action_type_arms)*
                }
            }
        }

        impl #impl_generics ::tagged_reducer_core::TaggedAction for #name #ty_generics #where_clause {
            fn tag(&self) -> ::core::option::Option<&str> {
                ::core::option::Option::Some(self.action_type())
            }
        }

        #(#kind_impls)*
    })
}

/// The single field type of a `Variant(Kind)` variant
fn newtype_field(variant: &Variant) -> Option<&Type> {
    let Fields::Unnamed(fields) = &variant.fields else {
        return None;
    };
    if fields.unnamed.len() != 1 {
        return None;
    }
    fields.unnamed.first().map(|field| &field.ty)
}

/// Read `#[action(rename = "...")]` from a variant's attributes
fn action_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("action")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported action attribute, expected `rename = \"...\"`"))
            }
        })?;
    }

    Ok(rename)
}
