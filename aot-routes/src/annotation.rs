//! Canonical route annotations. The set of recognized names is fixed: one group annotation marking
//! handler types and four verb annotations marking handler methods. Attribute names written in
//! source are compared through [canonical_name], so `get`, `Get`, `get_attribute` and
//! `GetAttribute` all denote the same annotation.
//!
//! Since no annotation types exist before generation, [generate_definitions] synthesizes a minimal
//! definition for each canonical name.

use crate::plan::Verb;
use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::fmt::{Display, Formatter};

/// Conventional suffix of annotation type names.
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// A recognized annotation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AnnotationName {
    Group,
    Get,
    Post,
    Delete,
    Put,
}

/// All recognized annotations in priority order. Method annotations are resolved by testing the
/// candidates in this order.
pub const ANNOTATION_NAMES: [AnnotationName; 5] = [
    AnnotationName::Group,
    AnnotationName::Get,
    AnnotationName::Post,
    AnnotationName::Delete,
    AnnotationName::Put,
];

impl AnnotationName {
    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationName::Group => "Group",
            AnnotationName::Get => "Get",
            AnnotationName::Post => "Post",
            AnnotationName::Delete => "Delete",
            AnnotationName::Put => "Put",
        }
    }

    /// Returns the HTTP verb denoted by this annotation, if it is a verb annotation.
    pub fn verb(self) -> Option<Verb> {
        match self {
            AnnotationName::Group => None,
            AnnotationName::Get => Some(Verb::Get),
            AnnotationName::Post => Some(Verb::Post),
            AnnotationName::Delete => Some(Verb::Delete),
            AnnotationName::Put => Some(Verb::Put),
        }
    }

    /// Checks if an attribute name written in source denotes this annotation.
    pub fn matches(self, name: &str) -> bool {
        canonical_name(name) == Some(self)
    }
}

impl Display for AnnotationName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps an attribute name (the last path segment, in any case convention) to a recognized
/// annotation, ignoring the [ATTRIBUTE_SUFFIX].
pub fn canonical_name(name: &str) -> Option<AnnotationName> {
    let name = name.trim().to_case(Case::Pascal);
    let name = name.strip_suffix(ATTRIBUTE_SUFFIX).unwrap_or(&name);

    ANNOTATION_NAMES
        .into_iter()
        .find(|candidate| candidate.as_str() == name)
}

/// Name of the synthesized type for the given annotation name.
pub fn definition_name(name: &str) -> String {
    if name.ends_with(ATTRIBUTE_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{ATTRIBUTE_SUFFIX}")
    }
}

/// Generates one crate-visible definition per annotation name, each holding the route pattern
/// passed to its constructor.
pub fn generate_definitions(names: &[AnnotationName], provenance: &str) -> TokenStream {
    let definitions = names.iter().map(|name| {
        let ident = format_ident!("{}", definition_name(name.as_str()));
        let doc = format!("Route annotation `{name}`, generated by {provenance}.");

        quote! {
            #[doc = #doc]
            #[allow(dead_code)]
            pub(crate) struct #ident {
                pattern: &'static str,
            }

            #[allow(dead_code)]
            impl #ident {
                pub(crate) const fn new(pattern: &'static str) -> Self {
                    Self { pattern }
                }
            }
        }
    });

    quote! {
        #(#definitions)*
    }
}
