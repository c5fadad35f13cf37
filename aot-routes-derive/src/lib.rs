//! Attribute macros marking route groups and their endpoints. The attributes generate no code by
//! themselves: the `aot-routes` build step finds them in the package sources, so they only need to
//! be accepted by the compiler.

mod group;

use crate::group::generate_group;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Error, Item};

/// Marks an impl block as a group of routes nested under the given prefix. Route attributes of the
/// methods inside are removed, so they don't need to be imported.
///
/// ```ignore
/// #[group("todo")]
/// impl TodoService {
///     #[get("/")]
///     fn get_all(&self) -> String {
///         String::new()
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn group(_args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as Item);
    let group = generate_group(item).unwrap_or_else(Error::into_compile_error);

    (quote! {
        #group
    })
    .into()
}

/// Maps a method to `GET` requests matching the given pattern.
#[proc_macro_attribute]
pub fn get(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Maps a method to `POST` requests matching the given pattern.
#[proc_macro_attribute]
pub fn post(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Maps a method to `DELETE` requests matching the given pattern.
#[proc_macro_attribute]
pub fn delete(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Maps a method to `PUT` requests matching the given pattern.
#[proc_macro_attribute]
pub fn put(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}
