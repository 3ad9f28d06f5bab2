use crate::attrs::{ArgumentAttrs, ContainerAttrs, FieldAttrs, VariantAttrs};
use crate::infer;
use crate::naming::{camel_case, screaming_snake_case};
use graphmark_core::{ArgumentKind, compatible_type_name};
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{Data, DataEnum, DeriveInput, Fields, FieldsNamed};

pub fn reflect_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let container = ContainerAttrs::parse(&input.attrs)?;
    let type_name = container
        .name
        .clone()
        .unwrap_or_else(|| compatible_type_name(&input.ident.to_string()));

    let body = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => struct_body(&type_name, &container, fields)?,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Reflect can only be derived for structs with named fields",
                ));
            }
        },
        Data::Enum(data) => enum_body(&type_name, &container, data)?,
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Reflect cannot be derived for unions",
            ));
        }
    };

    let description = container
        .description
        .as_ref()
        .map(|d| quote!(.with_description(#d)));

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::graphmark_core::Reflect for #ident #ty_generics #where_clause {
            fn type_descriptor() -> ::graphmark_core::TypeDescriptor {
                #body
                    #description
            }
        }
    })
}

fn struct_body(type_name: &str, container: &ContainerAttrs, fields: &FieldsNamed) -> syn::Result<TokenStream2> {
    let constructor = if container.input {
        quote!(::graphmark_core::TypeDescriptor::input(#type_name))
    } else if container.interface {
        quote!(::graphmark_core::TypeDescriptor::interface(#type_name))
    } else {
        quote!(::graphmark_core::TypeDescriptor::object(#type_name))
    };
    let interfaces = &container.implements;

    let mut sites = Vec::new();
    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let attrs = FieldAttrs::parse(&field.attrs)?;

        let member = attrs
            .rename
            .clone()
            .unwrap_or_else(|| camel_case(&ident.to_string()));

        // Ignored fields never need a resolvable type
        let value_type = match &attrs.ty {
            Some(ty) => ty.clone(),
            None if attrs.ignore => infer::infer(&field.ty).unwrap_or(graphmark_core::ValueType::String),
            None => infer::infer(&field.ty)?,
        };
        let value_type = infer::tokens(&value_type);

        sites.push(site_tokens(type_name, &member, value_type, &attrs));
    }

    Ok(quote! {
        #constructor
            #(.implements(#interfaces))*
            #(.site(#sites))*
    })
}

fn site_tokens(type_name: &str, member: &str, value_type: TokenStream2, attrs: &FieldAttrs) -> TokenStream2 {
    let ignore = attrs.ignore;
    let non_null = attrs.non_null;

    let arguments = attrs.has_arguments().then(|| {
        let single = attrs.single.iter().map(argument_tokens);
        let grouped = attrs.grouped.iter().map(argument_tokens);
        quote! {
            .arguments(::graphmark_core::ArgumentGroup::from(vec![#(#single,)* #(#grouped,)*]))
        }
    });
    let description = attrs.description.as_ref().map(|d| quote!(.with_description(#d)));
    let deprecation = attrs.deprecated.as_ref().map(|d| quote!(.deprecated(#d)));
    let paging = attrs.forward_paging.then(|| quote!(.forward_paging()));
    let complexity = attrs.complexity.map(|n| quote!(.with_complexity(#n)));

    quote! {
        ::graphmark_core::DeclarationSite::field(#type_name, #member, #value_type)
            .with_markers(::graphmark_core::Markers { ignore: #ignore, non_null: #non_null })
            #arguments
            #description
            #deprecation
            #paging
            #complexity
    }
}

fn argument_tokens(argument: &ArgumentAttrs) -> TokenStream2 {
    let name = match &argument.name {
        Some(name) => quote!(::std::option::Option::Some(::std::string::String::from(#name))),
        None => quote!(::std::option::Option::None),
    };
    let value_type = infer::tokens(&argument.ty);
    let kind = kind_ident(argument.kind);
    let nullable = argument.nullable;
    let default_value = match &argument.default_value {
        Some(value) => quote!(::std::string::String::from(#value)),
        None => quote!(::std::string::String::from(::graphmark_core::NO_DEFAULT_VALUE)),
    };
    let description = argument.description.clone().unwrap_or_default();
    let provider = argument.provider.clone().unwrap_or_default();

    quote! {
        ::graphmark_core::ArgumentDescriptor {
            name: #name,
            value_type: #value_type,
            kind: ::graphmark_core::ArgumentKind::#kind,
            nullable: #nullable,
            default_value: #default_value,
            description: ::std::string::String::from(#description),
            fragment_provider: ::std::string::String::from(#provider),
        }
    }
}

/// The `ArgumentKind` variant to emit for `kind`.
fn kind_ident(kind: ArgumentKind) -> Ident {
    let variant = match kind {
        ArgumentKind::Query => "Query",
        ArgumentKind::QueryContains => "QueryContains",
        ArgumentKind::QueryCustom => "QueryCustom",
        ArgumentKind::OrderBy => "OrderBy",
        ArgumentKind::OrderDirection => "OrderDirection",
    };
    format_ident!("{}", variant)
}

fn enum_body(type_name: &str, container: &ContainerAttrs, data: &DataEnum) -> syn::Result<TokenStream2> {
    if container.input || container.interface || !container.implements.is_empty() {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "enums cannot be `input`, `interface` or implement interfaces",
        ));
    }

    let mut values = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Reflect can only be derived for enums without fields",
            ));
        }
        let attrs = VariantAttrs::parse(&variant.attrs)?;
        values.push(
            attrs
                .rename
                .unwrap_or_else(|| screaming_snake_case(&variant.ident.to_string())),
        );
    }

    Ok(quote! {
        ::graphmark_core::TypeDescriptor::enumeration(#type_name, [#(#values),*])
    })
}
