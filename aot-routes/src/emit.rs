//! Rendering of a [RegistrationPlan] into a single registration function. The function takes an
//! `axum::Router`, registers every endpoint of every group in plan order, and returns the router.
//! All names are rendered fully qualified and handlers call their methods directly, so the result
//! needs no runtime lookup of any kind.
//!
//! Rendering is a pure function of the plan and does not validate anything the plan carries. Raw
//! argument or type text which is not valid Rust ends up in the output and is reported by the
//! compiler of the generated code.

use crate::plan::{PathPrefix, RegistrationPlan, RouteEndpoint, RouteGroup};
use convert_case::{Case, Casing};
use fxhash::FxHashSet;
use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};
use syn::LitStr;
use tracing::warn;

/// Default name of the generated registration function.
pub const REGISTRATION_FUNCTION: &str = "set_map";

const HANDLE_PREFIX: &str = "api";

fn raw_tokens(text: &str) -> TokenStream {
    text.parse().unwrap_or_else(|_| {
        let message = format!("Cannot tokenize generated fragment: {text}");
        quote!(::core::compile_error!(#message))
    })
}

/// Derives unique handle identifiers for all groups, in plan order. Groups whose types share a
/// name get numeric suffixes.
pub fn group_handles(plan: &RegistrationPlan) -> Vec<Ident> {
    let mut used = FxHashSet::default();
    plan.groups
        .iter()
        .map(|group| {
            let type_name: String = group
                .type_name
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            let base = format!("{HANDLE_PREFIX}_{}", type_name.to_case(Case::Snake));

            let mut name = base.clone();
            let mut index = 0;
            while !used.insert(name.clone()) {
                index += 1;
                name = format!("{base}_{index}");
            }

            Ident::new(&name, Span::call_site())
        })
        .collect()
}

fn generate_handler(endpoint: &RouteEndpoint) -> TokenStream {
    let handler_type = raw_tokens(&endpoint.handler_type);
    let method = raw_tokens(&endpoint.method);
    let inputs: Vec<_> = endpoint
        .parameters
        .iter()
        .map(|parameter| {
            let name = raw_tokens(&parameter.name);
            let ty = raw_tokens(&parameter.ty);
            quote!(#name: #ty)
        })
        .collect();
    let arguments: Vec<_> = endpoint
        .parameters
        .iter()
        .map(|parameter| raw_tokens(&parameter.name))
        .collect();

    let call = if endpoint.has_receiver {
        quote! {
            <#handler_type as ::core::default::Default>::default().#method(#(#arguments),*)
        }
    } else {
        quote! {
            #handler_type::#method(#(#arguments),*)
        }
    };
    let call = if endpoint.is_async {
        quote!(#call.await)
    } else {
        call
    };

    quote! {
        |#(#inputs),*| async move { #call }
    }
}

fn generate_endpoint(handle: &Ident, endpoint: &RouteEndpoint) -> TokenStream {
    let pattern = raw_tokens(&endpoint.pattern);
    let routing_function = format_ident!("{}", endpoint.verb.routing_function());
    let handler = generate_handler(endpoint);

    quote! {
        let #handle = #handle.route(#pattern, ::axum::routing::#routing_function(#handler));
    }
}

fn generate_mount(handle: &Ident, prefix: &PathPrefix) -> TokenStream {
    let prefix = match prefix {
        PathPrefix::Literal(prefix) if !prefix.is_empty() => {
            let prefix = LitStr::new(&format!("/{prefix}"), Span::call_site());
            quote!(#prefix)
        }
        PathPrefix::Verbatim(prefix) if !prefix.is_empty() => raw_tokens(prefix),
        _ => {
            return quote! {
                let app = app.merge(#handle);
            }
        }
    };

    quote! {
        let app = app.nest(#prefix, #handle);
    }
}

fn generate_group(handle: &Ident, group: &RouteGroup) -> TokenStream {
    let endpoints = group
        .endpoints
        .iter()
        .map(|endpoint| generate_endpoint(handle, endpoint));
    let mount = generate_mount(handle, &group.prefix);

    quote! {
        let #handle = ::axum::Router::new();
        #(#endpoints)*
        #mount
    }
}

/// Generates the public registration function for the given plan.
pub fn generate_registrations(
    plan: &RegistrationPlan,
    function_name: &str,
    provenance: &str,
) -> TokenStream {
    let function_name = raw_tokens(function_name);
    let doc = format!(" Registers all annotated route handlers. Generated by {provenance}.");
    let groups = group_handles(plan)
        .into_iter()
        .zip(&plan.groups)
        .map(|(handle, group)| generate_group(&handle, group));

    quote! {
        #[doc = #doc]
        pub fn #function_name(app: ::axum::Router) -> ::axum::Router {
            #(#groups)*
            app
        }
    }
}

/// Formats generated tokens as a source file. Tokens which do not form a valid file are returned
/// unformatted.
pub fn format_source(tokens: TokenStream) -> String {
    match syn::parse2::<syn::File>(tokens.clone()) {
        Ok(file) => prettyplease::unparse(&file),
        Err(error) => {
            warn!(%error, "Generated source is not valid Rust - emitting unformatted tokens.");
            tokens.to_string()
        }
    }
}
