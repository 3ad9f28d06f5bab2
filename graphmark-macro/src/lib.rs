// Procedural macros for graphmark
// `#[derive(Reflect)]` turns `#[graphmark(...)]` attributes into a
// `graphmark_core::Reflect` impl.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod infer;
mod naming;
mod reflect;

/// Derive `graphmark_core::Reflect` for a struct with named fields or a
/// fieldless enum.
///
/// ```ignore
/// #[derive(Reflect)]
/// #[graphmark(implements = "Node")]
/// struct Video {
///     id: String,
///     #[graphmark(non_null, argument(kind = "QUERY_CONTAINS", ty = "String"))]
///     title: String,
///     #[graphmark(forward_paging, argument(name = "orderBy", ty = "String", kind = "ORDER_BY"))]
///     clips: Vec<Clip>,
///     #[graphmark(ignore)]
///     storage_key: String,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(graphmark))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    reflect::reflect_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
