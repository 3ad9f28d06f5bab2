//! Parsing of `#[graphmark(...)]` attributes.
//!
//! Type and kind strings are validated here so mistakes surface as compile
//! errors on the offending literal instead of at schema build time.

use graphmark_core::{ArgumentKind, ValueType, is_valid_name};
use syn::{Attribute, Expr, ExprLit, Lit, LitBool, LitInt, LitStr, Meta, Token, meta::ParseNestedMeta};

/// Attributes on the struct or enum itself.
#[derive(Default)]
pub struct ContainerAttrs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub input: bool,
    pub interface: bool,
    pub implements: Vec<String>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in graphmark_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit = string_value(&meta)?;
                    if !is_valid_name(&lit.value()) {
                        return Err(syn::Error::new(lit.span(), "not a valid GraphQL type name"));
                    }
                    out.name = Some(lit.value());
                } else if meta.path.is_ident("description") {
                    out.description = Some(string_value(&meta)?.value());
                } else if meta.path.is_ident("input") {
                    out.input = true;
                } else if meta.path.is_ident("interface") {
                    out.interface = true;
                } else if meta.path.is_ident("implements") {
                    out.implements.push(string_value(&meta)?.value());
                } else {
                    return Err(meta.error("unknown graphmark container attribute"));
                }
                Ok(())
            })?;
        }

        if out.input && out.interface {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                "a type cannot be both `input` and `interface`",
            ));
        }

        if out.description.is_none() {
            out.description = doc_comment(attrs);
        }
        Ok(out)
    }
}

/// Attributes on a struct field.
#[derive(Default)]
pub struct FieldAttrs {
    pub ignore: bool,
    pub non_null: bool,
    pub forward_paging: bool,
    pub description: Option<String>,
    pub deprecated: Option<String>,
    pub rename: Option<String>,
    pub ty: Option<ValueType>,
    pub complexity: Option<u32>,
    /// Singular `argument(...)` entries, in order.
    pub single: Vec<ArgumentAttrs>,
    /// Entries of every `arguments(...)` group, in order.
    pub grouped: Vec<ArgumentAttrs>,
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in graphmark_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("ignore") {
                    out.ignore = true;
                } else if meta.path.is_ident("non_null") {
                    out.non_null = true;
                } else if meta.path.is_ident("forward_paging") {
                    out.forward_paging = true;
                } else if meta.path.is_ident("description") {
                    out.description = Some(string_value(&meta)?.value());
                } else if meta.path.is_ident("deprecated") {
                    out.deprecated = Some(if meta.input.peek(Token![=]) {
                        string_value(&meta)?.value()
                    } else {
                        "No longer supported".to_string()
                    });
                } else if meta.path.is_ident("rename") {
                    let lit = string_value(&meta)?;
                    if !is_valid_name(&lit.value()) {
                        return Err(syn::Error::new(lit.span(), "not a valid GraphQL field name"));
                    }
                    out.rename = Some(lit.value());
                } else if meta.path.is_ident("ty") {
                    out.ty = Some(value_type(&meta)?);
                } else if meta.path.is_ident("complexity") {
                    out.complexity = Some(meta.value()?.parse::<LitInt>()?.base10_parse()?);
                } else if meta.path.is_ident("argument") {
                    out.single.push(ArgumentAttrs::parse(&meta)?);
                } else if meta.path.is_ident("arguments") {
                    meta.parse_nested_meta(|item| {
                        if item.path.is_ident("argument") {
                            out.grouped.push(ArgumentAttrs::parse(&item)?);
                            Ok(())
                        } else {
                            Err(item.error("expected `argument(...)`"))
                        }
                    })?;
                } else {
                    return Err(meta.error("unknown graphmark field attribute"));
                }
                Ok(())
            })?;
        }

        if out.description.is_none() {
            out.description = doc_comment(attrs);
        }
        Ok(out)
    }

    pub fn has_arguments(&self) -> bool {
        !self.single.is_empty() || !self.grouped.is_empty()
    }
}

/// One `argument(...)` entry.
pub struct ArgumentAttrs {
    pub name: Option<String>,
    pub ty: ValueType,
    pub kind: ArgumentKind,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub description: Option<String>,
    pub provider: Option<String>,
}

impl ArgumentAttrs {
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let mut name = None;
        let mut ty = None;
        let mut kind = None;
        let mut nullable = true;
        let mut default_value = None;
        let mut description = None;
        let mut provider = None;

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("name") {
                let lit = string_value(&inner)?;
                if !is_valid_name(&lit.value()) {
                    return Err(syn::Error::new(lit.span(), "not a valid GraphQL argument name"));
                }
                name = Some(lit.value());
            } else if inner.path.is_ident("ty") {
                ty = Some(value_type(&inner)?);
            } else if inner.path.is_ident("kind") {
                let lit = string_value(&inner)?;
                let parsed = lit
                    .value()
                    .parse::<ArgumentKind>()
                    .map_err(|e| syn::Error::new(lit.span(), e.to_string()))?;
                kind = Some(parsed);
            } else if inner.path.is_ident("nullable") {
                nullable = inner.value()?.parse::<LitBool>()?.value;
            } else if inner.path.is_ident("default_value") {
                default_value = Some(string_value(&inner)?.value());
            } else if inner.path.is_ident("description") {
                description = Some(string_value(&inner)?.value());
            } else if inner.path.is_ident("provider") {
                provider = Some(string_value(&inner)?.value());
            } else {
                return Err(inner.error("unknown graphmark argument attribute"));
            }
            Ok(())
        })?;

        let Some(ty) = ty else {
            return Err(meta.error("argument requires `ty = \"...\"`"));
        };

        // A provider without an explicit kind means a custom argument
        let kind = match (kind, &provider) {
            (Some(kind), _) => kind,
            (None, Some(_)) => ArgumentKind::QueryCustom,
            (None, None) => ArgumentKind::default(),
        };

        Ok(Self {
            name,
            ty,
            kind,
            nullable,
            default_value,
            description,
            provider,
        })
    }
}

/// Attributes on an enum variant.
#[derive(Default)]
pub struct VariantAttrs {
    pub rename: Option<String>,
}

impl VariantAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in graphmark_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit = string_value(&meta)?;
                    if !is_valid_name(&lit.value()) {
                        return Err(syn::Error::new(lit.span(), "not a valid GraphQL enum value"));
                    }
                    out.rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unknown graphmark variant attribute"))
                }
            })?;
        }
        Ok(out)
    }
}

fn graphmark_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("graphmark"))
}

fn string_value(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    meta.value()?.parse()
}

fn value_type(meta: &ParseNestedMeta) -> syn::Result<ValueType> {
    let lit = string_value(meta)?;
    lit.value()
        .parse::<ValueType>()
        .map_err(|e| syn::Error::new(lit.span(), e.to_string()))
}

/// Joined `///` lines, if any.
fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    let joined = lines.join("\n").trim().to_string();
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_container_attrs() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[graphmark(name = "Film", implements = "Node")]),
            parse_quote!(#[graphmark(description = "A film")]),
        ];
        let parsed = ContainerAttrs::parse(&attrs).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Film"));
        assert_eq!(parsed.implements, ["Node"]);
        assert_eq!(parsed.description.as_deref(), Some("A film"));
    }

    #[test]
    fn test_doc_comment_becomes_description() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[doc = " A clip of a video"])];
        let parsed = ContainerAttrs::parse(&attrs).unwrap();
        assert_eq!(parsed.description.as_deref(), Some("A clip of a video"));
    }

    #[test]
    fn test_input_and_interface_conflict() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[graphmark(input, interface)])];
        assert!(ContainerAttrs::parse(&attrs).is_err());
    }

    #[test]
    fn test_field_arguments_keep_order() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[graphmark(
            non_null,
            argument(name = "status", ty = "String"),
            arguments(
                argument(name = "b", ty = "Int", nullable = false),
                argument(name = "a", ty = "[Int]", default_value = "[1]")
            )
        )])];
        let parsed = FieldAttrs::parse(&attrs).unwrap();
        assert!(parsed.non_null);
        assert_eq!(parsed.single.len(), 1);
        let grouped: Vec<_> = parsed.grouped.iter().filter_map(|a| a.name.as_deref()).collect();
        assert_eq!(grouped, ["b", "a"]);
        assert!(!parsed.grouped[0].nullable);
        assert_eq!(parsed.grouped[1].ty, ValueType::list_of(ValueType::Int));
    }

    #[test]
    fn test_provider_implies_custom_kind() {
        let attrs: Vec<Attribute> =
            vec![parse_quote!(#[graphmark(argument(name = "near", ty = "String", provider = "geo"))])];
        let parsed = FieldAttrs::parse(&attrs).unwrap();
        assert_eq!(parsed.single[0].kind, ArgumentKind::QueryCustom);
    }

    #[test]
    fn test_invalid_literals_are_rejected() {
        let bad_kind: Vec<Attribute> = vec![parse_quote!(#[graphmark(argument(ty = "String", kind = "SOMETIMES"))])];
        assert!(FieldAttrs::parse(&bad_kind).is_err());

        let bad_type: Vec<Attribute> = vec![parse_quote!(#[graphmark(ty = "[Broken")])];
        assert!(FieldAttrs::parse(&bad_type).is_err());

        let missing_type: Vec<Attribute> = vec![parse_quote!(#[graphmark(argument(name = "x"))])];
        assert!(FieldAttrs::parse(&missing_type).is_err());
    }

    #[test]
    fn test_complexity_attr() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[graphmark(complexity = 3)])];
        assert_eq!(FieldAttrs::parse(&attrs).unwrap().complexity, Some(3));

        let negative: Vec<Attribute> = vec![parse_quote!(#[graphmark(complexity = -1)])];
        assert!(FieldAttrs::parse(&negative).is_err());

        let quoted: Vec<Attribute> = vec![parse_quote!(#[graphmark(complexity = "3")])];
        assert!(FieldAttrs::parse(&quoted).is_err());
    }

    #[test]
    fn test_bare_deprecated() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[graphmark(deprecated)])];
        let parsed = FieldAttrs::parse(&attrs).unwrap();
        assert_eq!(parsed.deprecated.as_deref(), Some("No longer supported"));
    }
}
