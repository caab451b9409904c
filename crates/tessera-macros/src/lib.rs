// Copyright 2025 eraflo
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

//! This crate provides procedural macros for the Tessera ECS.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, Ident, LitStr, Path, Type};

/// A derive macro that implements `tessera_data::ecs::ComponentClass` and
/// `tessera_data::ecs::Component`.
///
/// The type must be `'static`, non-generic, and `Clone` unless `copy_with` is given.
///
/// # Struct attributes
///
/// `#[component(...)]` accepts:
/// * `priority = <i32 expr>`: lifecycle ordering key, lower runs first (default `0`).
/// * `lifecycle`: the type implements `ComponentLifecycle` and wants its hooks called.
/// * `copy_with = path::to::fn`: a `fn(&Self, &mut EntityCopyData) -> Self` used
///   instead of `Clone` when the component is deep-copied.
/// * `group = "Name"`: submit the type for `ComponentFactory::with_registered_components`.
///   Requires `Default`.
///
/// # Field attributes
///
/// `#[reference]` marks a field holding entity or component handles so that deep
/// copies redirect it to the cloned graph. `#[reference(owned)]` additionally copies
/// the referenced entities along with the owner. `#[reference(keep)]` records the
/// property but leaves its value pointing at the original targets.
#[proc_macro_derive(Component, attributes(component, reference))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

#[derive(Default)]
struct ComponentArgs {
    priority: Option<Expr>,
    lifecycle: bool,
    copy_with: Option<Path>,
    group: Option<LitStr>,
}

struct ReferenceArgs {
    ident: Ident,
    ty: Type,
    owned: bool,
    copyable: bool,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Component cannot be derived for generic types",
        ));
    }

    let args = parse_component_args(input)?;
    let references = parse_references(&input.data)?;

    let priority = match &args.priority {
        Some(expr) => quote! { #expr },
        None => quote! { 0 },
    };

    let clone_body = match &args.copy_with {
        Some(path) => quote! { ::std::boxed::Box::new(#path(self, copy_data)) },
        None => quote! {
            let _ = copy_data;
            ::std::boxed::Box::new(::std::clone::Clone::clone(self))
        },
    };

    let lifecycle = if args.lifecycle {
        quote! {
            fn lifecycle_mut(&mut self) -> ::std::option::Option<&mut dyn ::tessera_data::ecs::ComponentLifecycle> {
                ::std::option::Option::Some(self)
            }
        }
    } else {
        quote! {}
    };

    let reflection = expand_references(&references);

    let registration = match &args.group {
        Some(group) => quote! {
            ::tessera_data::inventory::submit! {
                ::tessera_data::ecs::ComponentRegistration::of::<#name>(#group)
            }
        },
        None => quote! {},
    };

    Ok(quote! {
        impl ::tessera_data::ecs::ComponentClass for #name {
            fn class_meta() -> &'static ::tessera_data::ecs::ComponentMeta {
                static META: ::tessera_data::ecs::ComponentMeta = ::tessera_data::ecs::ComponentMeta::new(
                    ::std::stringify!(#name),
                    ::tessera_data::ecs::ComponentId::from_name(
                        ::std::concat!(::std::module_path!(), "::", ::std::stringify!(#name)),
                    ),
                    #priority,
                    ::std::any::type_name::<#name>,
                );
                &META
            }
        }

        impl ::tessera_data::ecs::Component for #name {
            fn meta(&self) -> &'static ::tessera_data::ecs::ComponentMeta {
                <Self as ::tessera_data::ecs::ComponentClass>::class_meta()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }

            fn attach_to_entity(
                self: ::std::boxed::Box<Self>,
                entity: ::tessera_data::ecs::EntityId,
            ) -> ::std::boxed::Box<dyn ::tessera_data::ecs::Component> {
                ::tessera_data::ecs::attach_component(self, entity)
            }

            fn detach_from_entity(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::tessera_data::ecs::Component> {
                self
            }

            fn clone_component(
                &self,
                copy_data: &mut ::tessera_data::ecs::EntityCopyData,
            ) -> ::std::boxed::Box<dyn ::tessera_data::ecs::Component> {
                #clone_body
            }

            #reflection

            #lifecycle
        }

        #registration
    })
}

fn parse_component_args(input: &DeriveInput) -> syn::Result<ComponentArgs> {
    let mut args = ComponentArgs::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("component") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("priority") {
                args.priority = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("lifecycle") {
                args.lifecycle = true;
            } else if meta.path.is_ident("copy_with") {
                args.copy_with = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("group") {
                args.group = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error("unsupported component attribute"));
            }
            Ok(())
        })?;
    }
    Ok(args)
}

fn parse_references(data: &Data) -> syn::Result<Vec<ReferenceArgs>> {
    let mut references = Vec::new();
    let Data::Struct(data) = data else {
        return Ok(references);
    };

    for field in data.fields.iter() {
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("reference")) {
            let Some(ident) = field.ident.clone() else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "#[reference] is only supported on named fields",
                ));
            };

            let mut reference = ReferenceArgs {
                ident,
                ty: field.ty.clone(),
                owned: false,
                copyable: true,
            };
            // Bare `#[reference]` carries no arguments.
            if !matches!(attr.meta, syn::Meta::Path(_)) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("owned") {
                        reference.owned = true;
                    } else if meta.path.is_ident("keep") {
                        reference.copyable = false;
                    } else {
                        return Err(meta.error("expected `owned` or `keep`"));
                    }
                    Ok(())
                })?;
            }
            references.push(reference);
        }
    }

    Ok(references)
}

fn expand_references(references: &[ReferenceArgs]) -> TokenStream2 {
    if references.is_empty() {
        return quote! {};
    }

    let properties = references.iter().map(|r| {
        let name = r.ident.to_string();
        let ty = &r.ty;
        let owned = r.owned;
        let copyable = r.copyable;
        quote! {
            ::tessera_data::ecs::ReferenceProperty::new(
                #name,
                <#ty as ::tessera_data::ecs::ReferenceField>::KIND,
                #owned,
                #copyable,
            )
        }
    });

    let getters = references.iter().map(|r| {
        let ident = &r.ident;
        let name = ident.to_string();
        quote! {
            #name => ::std::option::Option::Some(
                ::tessera_data::ecs::ReferenceField::to_reference(&self.#ident),
            ),
        }
    });

    let setters = references.iter().map(|r| {
        let ident = &r.ident;
        let name = ident.to_string();
        quote! {
            #name => ::tessera_data::ecs::ReferenceField::assign_reference(&mut self.#ident, value),
        }
    });

    quote! {
        fn reference_properties(&self) -> &'static [::tessera_data::ecs::ReferenceProperty] {
            const PROPERTIES: &[::tessera_data::ecs::ReferenceProperty] = &[#(#properties),*];
            PROPERTIES
        }

        fn reference(&self, name: &str) -> ::std::option::Option<::tessera_data::ecs::ReferenceValue> {
            match name {
                #(#getters)*
                _ => ::std::option::Option::None,
            }
        }

        fn set_reference(&mut self, name: &str, value: ::tessera_data::ecs::ReferenceValue) -> bool {
            match name {
                #(#setters)*
                _ => false,
            }
        }
    }
}
