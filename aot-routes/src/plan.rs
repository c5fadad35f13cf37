//! The registration plan: an ordered, fully resolved description of every route to register. The
//! order of groups follows type declaration order and the order of endpoints follows method
//! declaration order, since routers observe registration order.

use crate::model::Parameter;
use std::fmt::{Display, Formatter};

/// HTTP verb of an endpoint.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Verb {
    Get,
    Post,
    Delete,
    Put,
}

impl Verb {
    /// Name of the matching `axum::routing` function.
    pub fn routing_function(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Delete => "delete",
            Verb::Put => "put",
        }
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Delete => "DELETE",
            Verb::Put => "PUT",
        })
    }
}

/// Path prefix of a group.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum PathPrefix {
    /// Value of a string literal argument, without leading and trailing separators.
    Literal(String),
    /// Raw argument text which is not a single string literal, without leading and trailing
    /// separators.
    Verbatim(String),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RouteEndpoint {
    pub verb: Verb,
    /// Raw argument text of the verb annotation.
    pub pattern: String,
    pub parameters: Vec<Parameter>,
    /// Fully qualified path of the handler type.
    pub handler_type: String,
    pub method: String,
    pub is_async: bool,
    pub has_receiver: bool,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RouteGroup {
    pub type_name: String,
    /// Namespace of the handler type, if resolved.
    pub namespace: Option<String>,
    pub prefix: PathPrefix,
    pub endpoints: Vec<RouteEndpoint>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct RegistrationPlan {
    pub groups: Vec<RouteGroup>,
}

impl RegistrationPlan {
    pub fn endpoint_count(&self) -> usize {
        self.groups.iter().map(|group| group.endpoints.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Joins a namespace and a type name into a fully qualified path. Unresolved namespaces leave the
/// bare type name.
pub fn qualified_type_name(namespace: Option<&str>, type_name: &str) -> String {
    match namespace {
        Some(namespace) if !namespace.is_empty() => format!("{namespace}::{type_name}"),
        _ => type_name.to_string(),
    }
}
