// Field type inference and ValueType tokens

use graphmark_core::{ValueType, compatible_type_name};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type, spanned::Spanned};

/// Map a Rust field type onto a GraphQL type reference.
pub fn infer(ty: &Type) -> syn::Result<ValueType> {
    match ty {
        Type::Reference(reference) => infer(&reference.elem),
        Type::Paren(paren) => infer(&paren.elem),
        Type::Group(group) => infer(&group.elem),
        Type::Slice(slice) => Ok(ValueType::list_of(infer(&slice.elem)?)),
        Type::Array(array) => Ok(ValueType::list_of(infer(&array.elem)?)),
        Type::Path(path) if path.qself.is_none() => {
            let Some(segment) = path.path.segments.last() else {
                return Err(unsupported(ty));
            };
            let ident = segment.ident.to_string();
            let value_type = match ident.as_str() {
                "String" | "str" | "char" => ValueType::String,
                "i8" | "i16" | "i32" | "u8" | "u16" | "u32" => ValueType::Int,
                "i64" | "u64" | "isize" | "usize" => ValueType::Long,
                "f32" | "f64" => ValueType::Float,
                "bool" => ValueType::Boolean,
                "NaiveDate" => ValueType::Date,
                "NaiveDateTime" | "DateTime" => ValueType::DateTime,
                "Vec" | "VecDeque" | "HashSet" | "BTreeSet" => ValueType::list_of(infer(inner(segment, ty)?)?),
                "Option" | "Box" | "Arc" | "Rc" => infer(inner(segment, ty)?)?,
                _ => ValueType::named(compatible_type_name(&ident)),
            };
            Ok(value_type)
        }
        _ => Err(unsupported(ty)),
    }
}

fn inner<'a>(segment: &'a syn::PathSegment, ty: &Type) -> syn::Result<&'a Type> {
    if let PathArguments::AngleBracketed(args) = &segment.arguments {
        for arg in &args.args {
            if let GenericArgument::Type(inner) = arg {
                return Ok(inner);
            }
        }
    }
    Err(unsupported(ty))
}

fn unsupported(ty: &Type) -> syn::Error {
    syn::Error::new(
        ty.span(),
        "cannot infer a GraphQL type; add #[graphmark(ty = \"...\")]",
    )
}

/// Tokens constructing `value_type` at runtime.
pub fn tokens(value_type: &ValueType) -> TokenStream2 {
    match value_type {
        ValueType::Id => quote!(::graphmark_core::ValueType::Id),
        ValueType::String => quote!(::graphmark_core::ValueType::String),
        ValueType::Int => quote!(::graphmark_core::ValueType::Int),
        ValueType::Long => quote!(::graphmark_core::ValueType::Long),
        ValueType::Float => quote!(::graphmark_core::ValueType::Float),
        ValueType::Boolean => quote!(::graphmark_core::ValueType::Boolean),
        ValueType::Date => quote!(::graphmark_core::ValueType::Date),
        ValueType::DateTime => quote!(::graphmark_core::ValueType::DateTime),
        ValueType::Named(name) => quote!(::graphmark_core::ValueType::named(#name)),
        ValueType::List(inner) => {
            let inner = tokens(inner);
            quote!(::graphmark_core::ValueType::list_of(#inner))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn infer_str(ty: Type) -> String {
        infer(&ty).unwrap().to_string()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(infer_str(parse_quote!(String)), "String");
        assert_eq!(infer_str(parse_quote!(&'static str)), "String");
        assert_eq!(infer_str(parse_quote!(u32)), "Int");
        assert_eq!(infer_str(parse_quote!(i64)), "Long");
        assert_eq!(infer_str(parse_quote!(f32)), "Float");
        assert_eq!(infer_str(parse_quote!(bool)), "Boolean");
        assert_eq!(infer_str(parse_quote!(chrono::NaiveDate)), "Date");
    }

    #[test]
    fn test_wrappers() {
        assert_eq!(infer_str(parse_quote!(Option<i32>)), "Int");
        assert_eq!(infer_str(parse_quote!(Vec<Clip>)), "[Clip]");
        assert_eq!(infer_str(parse_quote!(Option<Vec<Box<Clip>>>)), "[Clip]");
        assert_eq!(infer_str(parse_quote!(std::sync::Arc<crate::model::Clip>)), "Clip");
    }

    #[test]
    fn test_unsupported() {
        let ty: Type = parse_quote!((i32, i32));
        assert!(infer(&ty).is_err());
        let ty: Type = parse_quote!(Vec);
        assert!(infer(&ty).is_err());
    }

    #[test]
    fn test_tokens() {
        let ts = tokens(&ValueType::list_of(ValueType::named("Clip"))).to_string();
        assert!(ts.contains("list_of"));
        assert!(ts.contains("\"Clip\""));
    }
}
