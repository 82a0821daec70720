//! Declaration assembly and final text emission.
//!
//! Output order is fixed: one declaration per component group, then the
//! endpoint map, then the utility declarations expressed over it. Within each
//! declaration, property order is the document's declaration order. The text
//! is valid TypeScript but deliberately unformatted; re-indenting belongs to
//! a downstream formatter.

use serde_json::Value;

use crate::convert::convert_schema;
use crate::endpoints::endpoints_node;
use crate::error::GenerateError;
use crate::node::TypeNode;
use crate::options::{capitalize, GeneratorOptions};

/// Convert a whole document into its declaration text.
///
/// # Errors
///
/// Any failure from reference resolution or schema conversion aborts the
/// whole generation; there is no partial output.
pub fn generate(document: &Value, options: &GeneratorOptions) -> Result<String, GenerateError> {
    let mut declarations: Vec<(String, TypeNode)> = Vec::new();

    if let Some(components) = document.get("components").and_then(Value::as_object) {
        for (group, members) in components {
            // Auth schemas are not modeled.
            if group == "securitySchemes" {
                continue;
            }
            let Some(members) = members.as_object() else {
                continue;
            };
            let mut group_node = TypeNode::object();
            for (name, component) in members {
                // Request-body and response components wrap their schema in
                // a content envelope; unwrap it when present.
                let fragment = component
                    .get("content")
                    .and_then(|content| content.get("application/json"))
                    .and_then(|media| media.get("schema"))
                    .unwrap_or(component);
                group_node.add_property(name, convert_schema(fragment, options)?, false);
            }
            let name = format!("{}{}", options.type_prefix, capitalize(group));
            declarations.push((name, group_node));
        }
    }

    let endpoints_name = format!("{}Endpoints", options.type_prefix);
    declarations.push((endpoints_name, endpoints_node(document, options)?));

    let mut output = declarations
        .iter()
        .map(|(name, node)| format!("export type {} = {}", name, node.render()))
        .collect::<Vec<_>>()
        .join("\n\n");
    output.push_str("\n\n");
    output.push_str(&utility_declarations(&options.type_prefix));
    Ok(output)
}

/// The fixed block of lookup helpers derived from the endpoint map: the path
/// union, per-path request and method lookups, the merged request type for a
/// path/method pair, and the response lookup with `"get"` as the default
/// method.
fn utility_declarations(prefix: &str) -> String {
    format!(
        r#"export type {prefix}Paths = keyof {prefix}Endpoints

export type {prefix}Requests<T extends {prefix}Paths> = {prefix}Endpoints[T]["requests"]

export type {prefix}Methods<T extends {prefix}Paths> = NonNullable<{prefix}Requests<T>["method"]>

export type {prefix}Request<
  T extends {prefix}Paths,
  M extends {prefix}Methods<T>
> = Omit<{{
  [MM in {prefix}Methods<T>]: {prefix}Requests<T> & {{ method: MM }}
}}[M], "method"> & {{method?: M}}

type DefaultToGet<T extends string | undefined> = T extends string
  ? T
  : "get"

export type {prefix}Response<
  T extends {prefix}Paths,
  M extends string | undefined
> = DefaultToGet<M> extends keyof {prefix}Endpoints[T]["responses"]
  ? {prefix}Endpoints[T]["responses"][DefaultToGet<M>]
  : never"#
    )
}
