//! Schema-to-node conversion.
//!
//! The recursive heart of the generator: turns any schema fragment, however
//! nested, into a [`TypeNode`] tree. Fragments are dynamically shaped values;
//! dispatch goes through the rules below in order, and the first matching
//! rule wins. Shapes outside the recognized grammar abort the whole
//! generation with the offending fragment attached.

use serde_json::{Map, Value};

use crate::error::GenerateError;
use crate::node::{Metadata, TypeNode};
use crate::options::{capitalize, GeneratorOptions};
use crate::resolver::split_ref;

/// Convert one schema fragment into its type node.
///
/// Dispatch order (first match wins):
/// 1. a list of candidate schemas becomes a union of its members;
/// 2. `type: ["object", "null"]` rewrites to `type: object` + `nullable`;
///    any other multi-type combination is unsupported;
/// 3. `nullable: true` wraps the remainder as `null | ...`;
/// 4. an `application/json` envelope unwraps to its nested schema;
/// 5. a parameter object (`in` + `schema`) unwraps to its schema;
/// 6. `$ref` becomes an index into the referenced component group's alias,
///    never an inlined copy;
/// 7. `anyOf`/`oneOf` become unions, `allOf` an intersection;
/// 8. a fragment with `properties` but no `type` is assumed to be an object;
/// 9. the remaining fragments convert by their string `type`.
///
/// Every successful branch carries the fragment's `format`, `example`, and
/// `description` over to the node.
pub fn convert_schema(
    fragment: &Value,
    options: &GeneratorOptions,
) -> Result<TypeNode, GenerateError> {
    if let Value::Array(members) = fragment {
        let members = members
            .iter()
            .map(|member| convert_schema(member, options))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(TypeNode::union(members));
    }

    let Some(map) = fragment.as_object() else {
        return Err(unconvertible(fragment));
    };

    if let Some(Value::Array(types)) = map.get("type") {
        // Only the `["object", "null"]` combination has a meaning here; it
        // rewrites to a nullable object and re-dispatches.
        let has = |name: &str| types.iter().any(|t| t.as_str() == Some(name));
        if has("object") && has("null") {
            let mut rewritten = map.clone();
            rewritten.insert("type".to_string(), Value::String("object".to_string()));
            rewritten.insert("nullable".to_string(), Value::Bool(true));
            return convert_schema(&Value::Object(rewritten), options);
        }
        return Err(unconvertible(fragment));
    }

    let meta = Metadata::from_fragment(fragment);

    if map.get("nullable").and_then(Value::as_bool) == Some(true) {
        // Clearing `nullable` before recursing keeps the wrap idempotent:
        // converting the non-null member again yields no second union.
        let mut rewritten = map.clone();
        rewritten.remove("nullable");
        let inner = convert_schema(&Value::Object(rewritten), options)?;
        return Ok(TypeNode::union(vec![TypeNode::simple("null"), inner]).with_meta(meta));
    }

    if !map.contains_key("type") {
        if let Some(envelope) = map.get("application/json") {
            let schema = envelope
                .get("schema")
                .ok_or_else(|| unconvertible(fragment))?;
            let inner = convert_schema(schema, options)?;
            let node = if options.json_string_bodies {
                TypeNode::generic("JSONString", inner)
            } else {
                inner
            };
            return Ok(node.with_meta(meta));
        }
    }

    if map.contains_key("in") {
        if let Some(schema) = map.get("schema") {
            return Ok(convert_schema(schema, options)?.with_meta(meta));
        }
    }

    if let Some(reference) = map.get("$ref") {
        let reference = reference.as_str().ok_or_else(|| unconvertible(fragment))?;
        let (group, name) =
            split_ref(reference).ok_or_else(|| GenerateError::UnresolvedReference {
                reference: reference.to_string(),
            })?;
        let alias = format!("{}{}['{}']", options.type_prefix, capitalize(group), name);
        return Ok(TypeNode::simple(alias).with_meta(meta));
    }

    if let Some(members) = map.get("anyOf").and_then(Value::as_array) {
        return Ok(convert_members(members, options)?.with_meta(meta));
    }
    if let Some(members) = map.get("allOf").and_then(Value::as_array) {
        let members = members
            .iter()
            .map(|member| convert_schema(member, options))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(TypeNode::intersection(members).with_meta(meta));
    }
    if let Some(members) = map.get("oneOf").and_then(Value::as_array) {
        return Ok(convert_members(members, options)?.with_meta(meta));
    }

    // Malformed documents sometimes leave out `type: object`.
    let ty = match map.get("type").and_then(Value::as_str) {
        Some(ty) => ty,
        None if map.contains_key("properties") => "object",
        _ => return Err(unconvertible(fragment)),
    };

    match ty {
        "object" => Ok(convert_object(map, options)?.with_meta(meta)),
        "string" => {
            if let Some(values) = map.get("enum").and_then(Value::as_array) {
                Ok(TypeNode::enumeration(values.clone()).with_meta(meta))
            } else {
                Ok(TypeNode::simple("string").with_meta(meta))
            }
        }
        "array" => {
            let element = match map.get("items") {
                Some(Value::Null) | None => TypeNode::simple("unknown"),
                Some(items) => convert_schema(items, options)?,
            };
            Ok(TypeNode::array(element).with_meta(meta))
        }
        "int" | "integer" | "number" => Ok(TypeNode::simple("number").with_meta(meta)),
        "boolean" | "bool" => Ok(TypeNode::simple("boolean").with_meta(meta)),
        _ => Err(unconvertible(fragment)),
    }
}

fn convert_members(
    members: &[Value],
    options: &GeneratorOptions,
) -> Result<TypeNode, GenerateError> {
    let members = members
        .iter()
        .map(|member| convert_schema(member, options))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TypeNode::union(members))
}

fn convert_object(
    map: &Map<String, Value>,
    options: &GeneratorOptions,
) -> Result<TypeNode, GenerateError> {
    let mut node = TypeNode::object();

    // Some documents in the wild put object members under `items`.
    let properties = map
        .get("properties")
        .or_else(|| map.get("items"))
        .and_then(Value::as_object);

    if let Some(properties) = properties {
        let required = map.get("required").and_then(Value::as_array);
        for (name, property) in properties {
            let optional = !required
                .map(|required| required.iter().any(|r| r.as_str() == Some(name)))
                .unwrap_or(false);
            node.add_property(name, convert_schema(property, options)?, optional);
        }
    }

    match map.get("additionalProperties") {
        Some(Value::Bool(true)) => {
            node.add_additional_properties(TypeNode::simple("unknown"));
        }
        Some(Value::Bool(false)) | Some(Value::Null) | None => {}
        Some(schema) => {
            node.add_additional_properties(convert_schema(schema, options)?);
        }
    }

    Ok(node)
}

fn unconvertible(fragment: &Value) -> GenerateError {
    GenerateError::UnconvertibleSchema {
        fragment: fragment.clone(),
    }
}
