use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{Attribute, Error, ImplItem, Item, Result};

const ROUTE_ATTRIBUTES: [&str; 4] = ["Get", "Post", "Delete", "Put"];
const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Checks for `get`, `Get`, `get_attribute` or `GetAttribute` (and the same for other verbs),
/// possibly as the last segment of a path. Must stay in line with the names recognized by the
/// generator.
fn is_route_attribute(attribute: &Attribute) -> bool {
    attribute
        .path()
        .segments
        .last()
        .map(|segment| {
            let name = segment.ident.to_string().to_case(Case::Pascal);
            let name = name.strip_suffix(ATTRIBUTE_SUFFIX).unwrap_or(&name);
            ROUTE_ATTRIBUTES.contains(&name)
        })
        .unwrap_or(false)
}

pub fn generate_group(item: Item) -> Result<TokenStream> {
    if let Item::Impl(mut item) = item {
        if let Some((_, path, _)) = &item.trait_ {
            return Err(Error::new(
                path.span(),
                "Only inherent impl blocks can be marked as a route group!",
            ));
        }

        for impl_item in &mut item.items {
            if let ImplItem::Fn(method) = impl_item {
                method
                    .attrs
                    .retain(|attribute| !is_route_attribute(attribute));
            }
        }

        Ok(item.into_token_stream())
    } else {
        Err(Error::new(
            item.span(),
            "Only impl blocks can be marked as a route group!",
        ))
    }
}
