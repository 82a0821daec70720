//! Reference resolution against the document's components table.

use serde_json::Value;

use crate::error::GenerateError;

/// Resolve a `#/components/<group>/<name>` pointer to its fragment.
///
/// One hop only: when the resolved fragment is itself a bare `$ref` the
/// lookup fails rather than chasing the chain. Pure lookup, no side effects.
///
/// # Errors
///
/// Returns `GenerateError::UnresolvedReference` when the pointer is not of
/// the `#/components/<group>/<name>` form or names an absent group or member,
/// and `GenerateError::NestedReference` when the target is itself a `$ref`.
pub fn resolve_ref<'a>(document: &'a Value, reference: &str) -> Result<&'a Value, GenerateError> {
    let (group, name) = split_ref(reference).ok_or_else(|| unresolved(reference))?;

    let component = document
        .get("components")
        .and_then(|components| components.get(group))
        .and_then(|group| group.get(name))
        .ok_or_else(|| unresolved(reference))?;

    if component.get("$ref").is_some() {
        return Err(GenerateError::NestedReference {
            reference: reference.to_string(),
        });
    }

    Ok(component)
}

/// Split a reference pointer into its `(group, name)` segments.
///
/// Returns `None` unless the pointer is exactly `#/components/<group>/<name>`.
pub fn split_ref(reference: &str) -> Option<(&str, &str)> {
    let mut segments = reference.split('/');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some("#"), Some("components"), Some(group), Some(name), None)
            if !group.is_empty() && !name.is_empty() =>
        {
            Some((group, name))
        }
        _ => None,
    }
}

/// Resolve `fragment` when it is a `$ref`, otherwise return it unchanged.
///
/// The one-hop rule of [`resolve_ref`] applies.
pub fn resolve_if_ref<'a>(
    document: &'a Value,
    fragment: &'a Value,
) -> Result<&'a Value, GenerateError> {
    match fragment.get("$ref") {
        Some(reference) => {
            let reference = reference.as_str().ok_or_else(|| GenerateError::UnresolvedReference {
                reference: reference.to_string(),
            })?;
            resolve_ref(document, reference)
        }
        None => Ok(fragment),
    }
}

fn unresolved(reference: &str) -> GenerateError {
    GenerateError::UnresolvedReference {
        reference: reference.to_string(),
    }
}
