//! Route table extraction. Walks a [ProgramModel] and turns annotated types into a
//! [RegistrationPlan]. Extraction never fails on malformed input: arguments and types are carried
//! verbatim and any problem surfaces when the generated code is compiled.

use crate::annotation::{AnnotationName, ANNOTATION_NAMES};
use crate::error::GeneratorError;
use crate::model::{Annotation, MethodDeclaration, ProgramModel, TypeDeclaration};
use crate::plan::{qualified_type_name, PathPrefix, RegistrationPlan, RouteEndpoint, RouteGroup};
use syn::LitStr;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const PATH_SEPARATOR: char = '/';

/// Finds the first annotation matching any of the candidates. Candidates are tested in the given
/// order, so an earlier candidate wins over an earlier annotation in source.
pub fn find_annotation<'a>(
    annotations: &'a [Annotation],
    candidates: &[AnnotationName],
) -> Option<(AnnotationName, &'a Annotation)> {
    candidates.iter().find_map(|candidate| {
        annotations
            .iter()
            .find(|annotation| candidate.matches(annotation.simple_name()))
            .map(|annotation| (*candidate, annotation))
    })
}

/// Parses the argument of a group annotation into a prefix without surrounding separators.
pub fn parse_prefix(arguments: &str) -> PathPrefix {
    let arguments = arguments.trim();
    match syn::parse_str::<LitStr>(arguments) {
        Ok(literal) => PathPrefix::Literal(literal.value().trim_matches(PATH_SEPARATOR).to_string()),
        Err(_) => PathPrefix::Verbatim(arguments.trim_matches(PATH_SEPARATOR).to_string()),
    }
}

/// Creates an endpoint for a method whose highest priority annotation is a verb.
pub fn extract_endpoint(method: &MethodDeclaration, handler_type: &str) -> Option<RouteEndpoint> {
    let (name, annotation) = find_annotation(&method.annotations, &ANNOTATION_NAMES)?;
    let Some(verb) = name.verb() else {
        debug!(
            method = %method.name,
            handler_type,
            "Ignoring method with a group annotation."
        );
        return None;
    };

    Some(RouteEndpoint {
        verb,
        pattern: annotation.arguments.clone(),
        parameters: method.parameters.clone(),
        handler_type: handler_type.to_string(),
        method: method.name.clone(),
        is_async: method.is_async,
        has_receiver: method.has_receiver,
    })
}

/// Creates a group for a type carrying a group annotation. Only the first group annotation is
/// taken into account.
pub fn extract_group<M: ProgramModel + ?Sized>(
    model: &M,
    declaration: &TypeDeclaration,
) -> Option<RouteGroup> {
    let Some((_, annotation)) = find_annotation(&declaration.annotations, &[AnnotationName::Group])
    else {
        debug!(type_name = %declaration.name, "Skipping type without a group annotation.");
        return None;
    };

    let namespace = model.namespace_of(declaration);
    let handler_type = qualified_type_name(namespace.as_deref(), &declaration.name);
    let endpoints = declaration
        .methods
        .iter()
        .filter_map(|method| extract_endpoint(method, &handler_type))
        .collect();

    Some(RouteGroup {
        type_name: declaration.name.clone(),
        namespace,
        prefix: parse_prefix(&annotation.arguments),
        endpoints,
    })
}

/// Builds a plan from all types in the model, in declaration order.
pub fn extract_plan<M: ProgramModel + ?Sized>(
    model: &M,
    cancellation: &CancellationToken,
) -> Result<RegistrationPlan, GeneratorError> {
    let mut groups = Vec::new();
    for declaration in model.types() {
        if cancellation.is_cancelled() {
            return Err(GeneratorError::Cancelled);
        }

        if let Some(group) = extract_group(model, declaration) {
            groups.push(group);
        }
    }

    Ok(RegistrationPlan { groups })
}
